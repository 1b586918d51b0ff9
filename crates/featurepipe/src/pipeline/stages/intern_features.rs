//! # Feature Interning Stage

use crate::{
    alphabet::Alphabet,
    errors::{FPResult, FeaturePipeError},
    pipeline::stage::{Stage, StageFactoryHook, check_stage_version, type_mismatch},
    record::{Payload, Record},
};

const KIND: &str = "intern-features";

/// Transition `Tokens` → `Indices` through the pipeline's shared data
/// alphabet.
///
/// While the alphabet grows, every token receives an index. Once the
/// alphabet is frozen, unseen tokens are dropped as out-of-vocabulary;
/// existing indices are never renumbered.
#[derive(Debug, Default, Clone)]
pub struct InternFeatures {
    data_alphabet: Option<Alphabet<String>>,
}

impl InternFeatures {
    /// Create the stage; the pipeline binds the alphabet.
    pub fn new() -> Self {
        Self::default()
    }

    fn alphabet(&self) -> FPResult<&Alphabet<String>> {
        self.data_alphabet
            .as_ref()
            .ok_or(FeaturePipeError::UnboundStage { stage: KIND })
    }
}

impl Stage for InternFeatures {
    fn kind(&self) -> &'static str {
        KIND
    }

    fn bind(
        &mut self,
        data: &Alphabet<String>,
        _target: &Alphabet<String>,
    ) {
        self.data_alphabet = Some(data.clone());
    }

    fn apply(
        &self,
        mut record: Record,
    ) -> FPResult<Record> {
        let alphabet = self.alphabet()?;
        let diagnostic = record.diagnostic_name();

        match record.data {
            Payload::Tokens(tokens) => {
                let mut indices = Vec::with_capacity(tokens.len());
                let mut dropped = 0usize;

                for token in &tokens {
                    match alphabet.intern(&token.text) {
                        Ok(index) => indices.push(index),
                        Err(FeaturePipeError::NotFound { .. }) => dropped += 1,
                        Err(err) => return Err(err),
                    }
                }

                if dropped > 0 {
                    log::debug!(
                        "dropped {dropped} out-of-vocabulary tokens from record '{diagnostic}'"
                    );
                }

                record.data = Payload::Indices(indices);
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
    Ok(Box::new(InternFeatures::new()))
}

inventory::submit! {
    StageFactoryHook::new(KIND, build)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Token;

    fn bound_stage() -> (InternFeatures, Alphabet<String>) {
        let alphabet = Alphabet::new();
        let mut stage = InternFeatures::new();
        stage.bind(&alphabet, &Alphabet::new());
        (stage, alphabet)
    }

    #[test]
    fn test_interns_against_bound_alphabet() {
        let (stage, alphabet) = bound_stage();

        let record = Record::new(Payload::Tokens(vec![
            Token::new("a"),
            Token::new("b"),
            Token::new("a"),
        ]));
        let record = stage.apply(record).unwrap();

        assert_eq!(record.data, Payload::Indices(vec![0, 1, 0]));
        assert_eq!(alphabet.len(), 2);
    }

    #[test]
    fn test_frozen_alphabet_drops_unseen() {
        let (stage, alphabet) = bound_stage();
        alphabet.intern(&"known".to_string()).unwrap();
        alphabet.freeze();

        let record = Record::new(Payload::Tokens(vec![
            Token::new("known"),
            Token::new("novel"),
        ]));
        let record = stage.apply(record).unwrap();

        assert_eq!(record.data, Payload::Indices(vec![0]));
        assert_eq!(alphabet.len(), 1);
    }

    #[test]
    fn test_unbound_stage_errors() {
        let stage = InternFeatures::new();
        let result = stage.apply(Record::new(Payload::Tokens(vec![])));
        assert!(matches!(
            result,
            Err(FeaturePipeError::UnboundStage {
                stage: "intern-features"
            })
        ));
    }
}
