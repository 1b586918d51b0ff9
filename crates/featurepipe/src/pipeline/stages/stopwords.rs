//! # Stopword Stage

use serde::{Deserialize, Serialize};

use crate::{
    errors::{FPResult, FeaturePipeError},
    pipeline::stage::{Stage, StageFactoryHook, check_stage_version, type_mismatch},
    record::{Payload, Record},
    types::FPHashSet,
};

const KIND: &str = "drop-stopwords";

#[derive(Debug, Serialize, Deserialize)]
struct Config {
    stopwords: Vec<String>,
}

/// Drop tokens whose text matches a stop-symbol set, in place.
///
/// Matching is exact; place a [`super::LowercaseTokens`] stage first
/// for case-insensitive removal.
#[derive(Debug, Clone)]
pub struct DropStopwords {
    stopwords: FPHashSet<String>,
}

impl DropStopwords {
    /// Create the stage from a stop-symbol set.
    pub fn new<W, S>(stopwords: W) -> Self
    where
        W: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            stopwords: stopwords.into_iter().map(Into::into).collect(),
        }
    }
}

impl Stage for DropStopwords {
    fn kind(&self) -> &'static str {
        KIND
    }

    fn apply(
        &self,
        mut record: Record,
    ) -> FPResult<Record> {
        match record.data {
            Payload::Tokens(ref mut tokens) => {
                tokens.retain(|token| !self.stopwords.contains(&token.text));
                Ok(record)
            }
            ref other => Err(type_mismatch(KIND, "tokens", other.kind())),
        }
    }

    fn export_config(&self) -> FPResult<serde_json::Value> {
        // Sorted for a stable persisted form.
        let mut stopwords: Vec<String> = self.stopwords.iter().cloned().collect();
        stopwords.sort_unstable();

        serde_json::to_value(Config { stopwords })
            .map_err(|e| FeaturePipeError::Parse(e.to_string()))
    }
}

fn build(
    version: u32,
    config: &serde_json::Value,
) -> FPResult<Box<dyn Stage>> {
    check_stage_version(KIND, version, 1)?;
    let config: Config = serde_json::from_value(config.clone())
        .map_err(|e| FeaturePipeError::Parse(e.to_string()))?;
    Ok(Box::new(DropStopwords::new(config.stopwords)))
}

inventory::submit! {
    StageFactoryHook::new(KIND, build)
}
