//! # Pipeline Stages

use crate::{
    alphabet::Alphabet,
    errors::{FPResult, FeaturePipeError},
    record::Record,
};

/// One named transformation in a pipeline.
///
/// A stage validates the incoming record representation, then performs
/// exactly one representation transition (`Chars` → `Tokens`) or an
/// in-place transformation at the same level (lowercasing). Stages that
/// intern features or labels do so against the shared alphabets they
/// were bound to - never against a private table.
pub trait Stage: Send + Sync {
    /// The stage's stable registry name.
    fn kind(&self) -> &'static str;

    /// The stage's config format version.
    fn version(&self) -> u32 {
        1
    }

    /// Bind the stage to a pipeline's shared alphabets.
    ///
    /// Called once when the stage is placed in a pipeline. Stages that
    /// use neither alphabet keep the default no-op.
    fn bind(
        &mut self,
        data: &Alphabet<String>,
        target: &Alphabet<String>,
    ) {
        let _ = (data, target);
    }

    /// Apply the stage to one record.
    fn apply(
        &self,
        record: Record,
    ) -> FPResult<Record>;

    /// Externalize the stage's configuration (not the shared alphabets,
    /// which the pipeline serializes once).
    fn export_config(&self) -> FPResult<serde_json::Value> {
        Ok(serde_json::Value::Null)
    }
}

/// Builder signature for reconstructing a stage from persisted state.
pub type StageBuilder = fn(version: u32, config: &serde_json::Value) -> FPResult<Box<dyn Stage>>;

/// Hook for registering stage factories at link time.
///
/// Each built-in stage submits one hook; downstream crates register
/// their own stages the same way.
pub struct StageFactoryHook {
    /// The stage kind the builder understands.
    pub kind: &'static str,

    /// Builder function for the stage.
    pub build: StageBuilder,
}
inventory::collect!(StageFactoryHook);

impl StageFactoryHook {
    /// Create a new factory hook.
    pub const fn new(
        kind: &'static str,
        build: StageBuilder,
    ) -> Self {
        Self { kind, build }
    }
}

/// Reconstruct a stage from its persisted `(kind, version, config)`.
///
/// ## Returns
/// * `Ok(stage)` - on success.
/// * `Err(FeaturePipeError::UnknownStage)` - no factory for the kind.
/// * `Err(FeaturePipeError::IncompatibleVersion)` - the stored version
///   exceeds what the factory understands.
pub fn build_stage(
    kind: &str,
    version: u32,
    config: &serde_json::Value,
) -> FPResult<Box<dyn Stage>> {
    for hook in inventory::iter::<StageFactoryHook> {
        if hook.kind == kind {
            return (hook.build)(version, config);
        }
    }
    Err(FeaturePipeError::UnknownStage {
        kind: kind.to_string(),
    })
}

/// Reject persisted stage versions newer than the builder supports.
pub(crate) fn check_stage_version(
    kind: &'static str,
    found: u32,
    supported: u32,
) -> FPResult<()> {
    if found > supported {
        return Err(FeaturePipeError::IncompatibleVersion {
            component: kind.to_string(),
            found,
            supported,
        });
    }
    Ok(())
}

/// Construct the [`FeaturePipeError::TypeMismatch`] for a stage handed
/// the wrong payload.
pub(crate) fn type_mismatch(
    stage: &'static str,
    expected: &'static str,
    actual: &'static str,
) -> FeaturePipeError {
    FeaturePipeError::TypeMismatch {
        stage,
        expected,
        actual,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_stage_unknown_kind() {
        let result = build_stage("no-such-stage", 1, &serde_json::Value::Null);
        assert!(matches!(
            result,
            Err(FeaturePipeError::UnknownStage { kind }) if kind == "no-such-stage"
        ));
    }

    #[test]
    fn test_check_stage_version() {
        assert!(check_stage_version("lowercase", 1, 1).is_ok());
        assert!(matches!(
            check_stage_version("lowercase", 2, 1),
            Err(FeaturePipeError::IncompatibleVersion {
                found: 2,
                supported: 1,
                ..
            })
        ));
    }
}
