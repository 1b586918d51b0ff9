//! # Vectorizing Stage

use crate::{
    errors::FPResult,
    pipeline::stage::{Stage, StageFactoryHook, check_stage_version, type_mismatch},
    record::{Payload, Record, SparseVector},
};

const KIND: &str = "vectorize";

/// Transition `Indices` → `Vector`, counting index repeats into values.
#[derive(Debug, Default, Clone)]
pub struct VectorizeIndices;

impl VectorizeIndices {
    /// Create the stage.
    pub fn new() -> Self {
        Self
    }
}

impl Stage for VectorizeIndices {
    fn kind(&self) -> &'static str {
        KIND
    }

    fn apply(
        &self,
        mut record: Record,
    ) -> FPResult<Record> {
        match record.data {
            Payload::Indices(ref indices) => {
                record.data = Payload::Vector(SparseVector::from_indices(indices));
                Ok(record)
            }
            ref other => Err(type_mismatch(KIND, "indices", other.kind())),
        }
    }
}

fn build(
    version: u32,
    _config: &serde_json::Value,
) -> FPResult<Box<dyn Stage>> {
    check_stage_version(KIND, version, 1)?;
    Ok(Box::new(VectorizeIndices::new()))
}

inventory::submit! {
    StageFactoryHook::new(KIND, build)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_repeats() {
        let stage = VectorizeIndices::new();

        let record = Record::new(Payload::Indices(vec![2, 0, 2]));
        let record = stage.apply(record).unwrap();

        let Payload::Vector(vector) = record.data else {
            panic!("expected vector");
        };
        assert_eq!(vector.indices(), &[0, 2]);
        assert_eq!(vector.values(), &[1.0, 2.0]);
    }
}
