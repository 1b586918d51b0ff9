//! # Related-Symbol Expansion Stage
//!
//! The related-symbol source (an embedding neighborhood, a synonym
//! service) is an external collaborator, possibly backed by a remote
//! cache. When it is unreachable the record passes through unmodified;
//! unavailability never corrupts the alphabets.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{
    errors::{FPResult, FeaturePipeError},
    pipeline::stage::{Stage, StageFactoryHook, check_stage_version, type_mismatch},
    record::{Payload, Record, Token},
};

const KIND: &str = "expand-related";

const DEFAULT_SOURCE: &str = "none";

/// Supplies symbols related to a given symbol.
pub trait RelatedSymbols: Send + Sync {
    /// Ordered related symbols, possibly empty.
    ///
    /// A remote-backed implementation reports unreachability as
    /// [`FeaturePipeError::Unavailable`].
    fn related_symbols(
        &self,
        symbol: &str,
    ) -> FPResult<Vec<String>>;

    /// A short stable name for the implementation, persisted with the
    /// stage so a reloaded pipeline can report which source it was
    /// trained with.
    fn name(&self) -> &'static str {
        "custom"
    }
}

/// Relates nothing to anything. The reload default; callers re-attach
/// a live collaborator after loading a persisted pipeline.
#[derive(Debug, Default, Clone)]
pub struct NoRelatedSymbols;

impl RelatedSymbols for NoRelatedSymbols {
    fn related_symbols(
        &self,
        _symbol: &str,
    ) -> FPResult<Vec<String>> {
        Ok(Vec::new())
    }

    fn name(&self) -> &'static str {
        DEFAULT_SOURCE
    }
}

fn default_source() -> String {
    DEFAULT_SOURCE.to_string()
}

#[derive(Debug, Serialize, Deserialize)]
struct Config {
    // Absent in configs persisted before source names were recorded.
    #[serde(default = "default_source")]
    source: String,
}

/// Append collaborator-provided related tokens to the token sequence.
///
/// Expansions for the whole record are gathered first and appended at
/// the end, so a mid-sequence failure never leaves a half-expanded
/// record.
#[derive(Clone)]
pub struct ExpandRelated {
    source: Arc<dyn RelatedSymbols>,
}

impl Default for ExpandRelated {
    fn default() -> Self {
        Self::new()
    }
}

impl ExpandRelated {
    /// Create the stage with the empty source.
    pub fn new() -> Self {
        Self::with_source(Arc::new(NoRelatedSymbols))
    }

    /// Create the stage with a collaborator-supplied source.
    pub fn with_source(source: Arc<dyn RelatedSymbols>) -> Self {
        Self { source }
    }
}

impl Stage for ExpandRelated {
    fn kind(&self) -> &'static str {
        KIND
    }

    fn apply(
        &self,
        mut record: Record,
    ) -> FPResult<Record> {
        let diagnostic = record.diagnostic_name();

        let texts: Vec<String> = match record.data {
            Payload::Tokens(ref tokens) => tokens.iter().map(|t| t.text.clone()).collect(),
            ref other => return Err(type_mismatch(KIND, "tokens", other.kind())),
        };

        let mut expanded: Vec<Token> = Vec::new();
        for text in &texts {
            match self.source.related_symbols(text) {
                Ok(related) => {
                    expanded.extend(related.into_iter().map(Token::new));
                }
                Err(FeaturePipeError::Unavailable(detail)) => {
                    log::warn!(
                        "related-symbol source unavailable ({detail}); \
                         passing record '{diagnostic}' through unexpanded",
                    );
                    return Ok(record);
                }
                Err(err) => return Err(err),
            }
        }

        if let Payload::Tokens(ref mut tokens) = record.data {
            tokens.extend(expanded);
        }
        Ok(record)
    }

    fn export_config(&self) -> FPResult<serde_json::Value> {
        serde_json::to_value(Config {
            source: self.source.name().to_string(),
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
            source: default_source(),
        }
    } else {
        serde_json::from_value(config.clone())
            .map_err(|e| FeaturePipeError::Parse(e.to_string()))?
    };

    // Persisted pipelines reload with the empty source; callers
    // re-attach live collaborators after loading.
    if config.source != DEFAULT_SOURCE {
        log::warn!(
            "expand-related stage was persisted with source '{}'; reloading with '{}' - \
             re-attach the collaborator before processing",
            config.source,
            DEFAULT_SOURCE,
        );
    }

    Ok(Box::new(ExpandRelated::new()))
}

inventory::submit! {
    StageFactoryHook::new(KIND, build)
}
