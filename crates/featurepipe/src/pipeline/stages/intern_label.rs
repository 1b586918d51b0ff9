//! # Label Interning Stage

use crate::{
    alphabet::Alphabet,
    errors::{FPResult, FeaturePipeError},
    pipeline::stage::{Stage, StageFactoryHook, check_stage_version, type_mismatch},
    record::{Record, Target},
};

const KIND: &str = "intern-label";

/// Resolve the record's raw target through the pipeline's shared target
/// alphabet, in place. The data payload is untouched.
///
/// Unlike feature interning, a frozen-alphabet miss here fails the
/// record: an unknown label at inference is a data bug, not vocabulary
/// noise.
#[derive(Debug, Default, Clone)]
pub struct InternLabel {
    target_alphabet: Option<Alphabet<String>>,
}

impl InternLabel {
    /// Create the stage; the pipeline binds the alphabet.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Stage for InternLabel {
    fn kind(&self) -> &'static str {
        KIND
    }

    fn bind(
        &mut self,
        _data: &Alphabet<String>,
        target: &Alphabet<String>,
    ) {
        self.target_alphabet = Some(target.clone());
    }

    fn apply(
        &self,
        mut record: Record,
    ) -> FPResult<Record> {
        let alphabet = self
            .target_alphabet
            .as_ref()
            .ok_or(FeaturePipeError::UnboundStage { stage: KIND })?;

        match record.target {
            Target::Raw(ref label) => {
                let index = alphabet.intern(label)?;
                record.target = Target::Label(index);
                Ok(record)
            }
            Target::None => Err(type_mismatch(KIND, "target:raw", "target:none")),
            Target::Label(_) => Err(type_mismatch(KIND, "target:raw", "target:label")),
        }
    }
}

fn build(
    version: u32,
    _config: &serde_json::Value,
) -> FPResult<Box<dyn Stage>> {
    check_stage_version(KIND, version, 1)?;
    Ok(Box::new(InternLabel::new()))
}

inventory::submit! {
    StageFactoryHook::new(KIND, build)
}
