//! # Source Reading Stage

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{
    errors::{FPResult, FeaturePipeError},
    pipeline::stage::{Stage, StageFactoryHook, check_stage_version, type_mismatch},
    record::{Payload, Record},
};

const KIND: &str = "read-source";

const DEFAULT_READER: &str = "inline";

/// Resolves a raw source handle into character data.
///
/// Implementations may hit the filesystem or a remote store; failures
/// surface as errors on the owning record only.
pub trait SourceReader: Send + Sync {
    /// Resolve a handle into its text.
    fn read_source(
        &self,
        handle: &str,
    ) -> FPResult<String>;

    /// A short stable name for the implementation, persisted with the
    /// stage so a reloaded pipeline can report which reader it was
    /// trained with.
    fn name(&self) -> &'static str {
        "custom"
    }
}

/// Treats the handle itself as the text. The default reader, and the
/// right one when records are constructed from in-memory strings.
#[derive(Debug, Default, Clone)]
pub struct InlineSource;

impl SourceReader for InlineSource {
    fn read_source(
        &self,
        handle: &str,
    ) -> FPResult<String> {
        Ok(handle.to_string())
    }

    fn name(&self) -> &'static str {
        DEFAULT_READER
    }
}

fn default_reader() -> String {
    DEFAULT_READER.to_string()
}

#[derive(Debug, Serialize, Deserialize)]
struct Config {
    // Absent in configs persisted before reader names were recorded.
    #[serde(default = "default_reader")]
    reader: String,
}

/// Transition `Raw` → `Chars` through a [`SourceReader`].
#[derive(Clone)]
pub struct ReadSource {
    reader: Arc<dyn SourceReader>,
}

impl Default for ReadSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ReadSource {
    /// Create the stage with the inline reader.
    pub fn new() -> Self {
        Self::with_reader(Arc::new(InlineSource))
    }

    /// Create the stage with a collaborator-supplied reader.
    pub fn with_reader(reader: Arc<dyn SourceReader>) -> Self {
        Self { reader }
    }
}

impl Stage for ReadSource {
    fn kind(&self) -> &'static str {
        KIND
    }

    fn apply(
        &self,
        mut record: Record,
    ) -> FPResult<Record> {
        match record.data {
            Payload::Raw(ref handle) => {
                let text = self.reader.read_source(handle)?;
                record.data = Payload::Chars(text);
                Ok(record)
            }
            ref other => Err(type_mismatch(KIND, "raw", other.kind())),
        }
    }

    fn export_config(&self) -> FPResult<serde_json::Value> {
        serde_json::to_value(Config {
            reader: self.reader.name().to_string(),
        })
        .map_err(|e| FeaturePipeError::Parse(e.to_string()))
    }
}

fn build(
    version: u32,
    config: &serde_json::Value,
) -> FPResult<Box<dyn Stage>> {
    check_stage_version(KIND, version, 1)?;
    let config: Config = if config.is_null() {
        Config {
            reader: default_reader(),
        }
    } else {
        serde_json::from_value(config.clone())
            .map_err(|e| FeaturePipeError::Parse(e.to_string()))?
    };

    // Persisted pipelines reload with the inline reader; callers
    // re-attach live collaborators after loading.
    if config.reader != DEFAULT_READER {
        log::warn!(
            "read-source stage was persisted with reader '{}'; reloading with '{}' - \
             re-attach the collaborator before processing",
            config.reader,
            DEFAULT_READER,
        );
    }

    Ok(Box::new(ReadSource::new()))
}

inventory::submit! {
    StageFactoryHook::new(KIND, build)
}
