//! # Lowercase Stage

use crate::{
    errors::FPResult,
    pipeline::stage::{Stage, StageFactoryHook, check_stage_version, type_mismatch},
    record::{Payload, Record},
};

const KIND: &str = "lowercase";

/// Lowercase every token's text, in place.
#[derive(Debug, Default, Clone)]
pub struct LowercaseTokens;

impl LowercaseTokens {
    /// Create the stage.
    pub fn new() -> Self {
        Self
    }
}

impl Stage for LowercaseTokens {
    fn kind(&self) -> &'static str {
        KIND
    }

    fn apply(
        &self,
        mut record: Record,
    ) -> FPResult<Record> {
        match record.data {
            Payload::Tokens(ref mut tokens) => {
                for token in tokens {
                    token.text = token.text.to_lowercase();
                }
                Ok(record)
            }
            ref other => Err(type_mismatch(KIND, "tokens", other.kind())),
        }
    }
}

fn build(
    version: u32,
    _config: &serde_json::Value,
) -> FPResult<Box<dyn Stage>> {
    check_stage_version(KIND, version, 1)?;
    Ok(Box::new(LowercaseTokens::new()))
}

inventory::submit! {
    StageFactoryHook::new(KIND, build)
}
