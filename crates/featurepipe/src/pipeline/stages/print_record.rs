//! # Record Tracing Stage

use serde::{Deserialize, Serialize};

use crate::{
    errors::{FPResult, FeaturePipeError},
    pipeline::stage::{Stage, StageFactoryHook, check_stage_version},
    record::Record,
};

const KIND: &str = "print-record";

#[derive(Debug, Serialize, Deserialize)]
struct Config {
    prefix: Option<String>,
}

/// Log a record as it passes, unchanged. Useful for debugging a stage
/// ordering without disturbing it.
#[derive(Debug, Default, Clone)]
pub struct PrintRecord {
    prefix: Option<String>,
}

impl PrintRecord {
    /// Create the stage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a prefix distinguishing this stage's output when several are
    /// placed in one pipeline.
    pub fn with_prefix(
        mut self,
        prefix: impl Into<String>,
    ) -> Self {
        self.prefix = Some(prefix.into());
        self
    }
}

impl Stage for PrintRecord {
    fn kind(&self) -> &'static str {
        KIND
    }

    fn apply(
        &self,
        record: Record,
    ) -> FPResult<Record> {
        let prefix = self.prefix.as_deref().unwrap_or("");
        log::info!(
            "{prefix}record '{}': data={} target={:?}",
            record.diagnostic_name(),
            record.data.kind(),
            record.target,
        );
        Ok(record)
    }

    fn export_config(&self) -> FPResult<serde_json::Value> {
        serde_json::to_value(Config {
            prefix: self.prefix.clone(),
        })
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

    let mut stage = PrintRecord::new();
    if let Some(prefix) = config.prefix {
        stage = stage.with_prefix(prefix);
    }
    Ok(Box::new(stage))
}

inventory::submit! {
    StageFactoryHook::new(KIND, build)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Payload;

    #[test]
    fn test_record_passes_unchanged() {
        let stage = PrintRecord::new().with_prefix("trace: ");
        let record = Record::new(Payload::Chars("abc".into())).with_name("r1");

        let record = stage.apply(record).unwrap();
        assert_eq!(record.data, Payload::Chars("abc".into()));
        assert_eq!(record.name.as_deref(), Some("r1"));
    }

    #[test]
    fn test_config_round_trip() {
        let stage = PrintRecord::new().with_prefix("p: ");
        let config = stage.export_config().unwrap();
        assert!(build(1, &config).is_ok());
    }
}
