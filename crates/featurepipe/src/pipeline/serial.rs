//! # Serial Pipelines

use rayon::prelude::*;

use crate::{
    alphabet::Alphabet,
    errors::{FPResult, FeaturePipeError},
    pipeline::stage::Stage,
    record::Record,
};

/// An ordered, alphabet-sharing composition of stages.
///
/// Every stage in one pipeline observes the same data alphabet and the
/// same target alphabet, so indices assigned by an early stage remain
/// valid for every later stage - and for stages appended after the
/// pipeline has already been trained.
///
/// Freezing the alphabets for inference is an explicit caller decision;
/// the pipeline never infers a training-vs-inference mode.
pub struct SerialPipeline {
    stages: Vec<Box<dyn Stage>>,
    data_alphabet: Alphabet<String>,
    target_alphabet: Alphabet<String>,
}

impl SerialPipeline {
    /// Create a pipeline with fresh, growth-enabled alphabets.
    ///
    /// Every stage is bound to the new alphabets.
    pub fn new(stages: Vec<Box<dyn Stage>>) -> Self {
        Self::with_alphabets(stages, Alphabet::new(), Alphabet::new())
    }

    /// Create a pipeline over existing alphabets.
    ///
    /// Used when reloading persisted state, or when several pipelines
    /// must share one vocabulary.
    pub fn with_alphabets(
        mut stages: Vec<Box<dyn Stage>>,
        data_alphabet: Alphabet<String>,
        target_alphabet: Alphabet<String>,
    ) -> Self {
        for stage in &mut stages {
            stage.bind(&data_alphabet, &target_alphabet);
        }
        Self {
            stages,
            data_alphabet,
            target_alphabet,
        }
    }

    /// Append a stage, binding it to the pipeline's *existing* alphabets.
    ///
    /// Prior indices stay valid: the alphabets are reused, never
    /// replaced.
    pub fn append(
        &mut self,
        mut stage: Box<dyn Stage>,
    ) {
        stage.bind(&self.data_alphabet, &self.target_alphabet);
        self.stages.push(stage);
    }

    /// The stages, in application order.
    pub fn stages(&self) -> &[Box<dyn Stage>] {
        &self.stages
    }

    /// The shared data alphabet.
    pub fn data_alphabet(&self) -> &Alphabet<String> {
        &self.data_alphabet
    }

    /// The shared target alphabet.
    pub fn target_alphabet(&self) -> &Alphabet<String> {
        &self.target_alphabet
    }

    /// Freeze both alphabets; recommended before inference.
    pub fn freeze_alphabets(&self) {
        self.data_alphabet.freeze();
        self.target_alphabet.freeze();
    }

    /// Process one record through every stage, in order.
    ///
    /// On failure the record's name and source are attached for
    /// diagnostics and no later stage runs for that record. Alphabet
    /// growth already committed by earlier stages is not rolled back -
    /// growth is monotonic and record-independent.
    pub fn process(
        &self,
        record: Record,
    ) -> FPResult<Record> {
        let diagnostic = record.diagnostic_name();

        let mut record = record;
        for stage in &self.stages {
            record = stage
                .apply(record)
                .map_err(|cause| FeaturePipeError::StageFailed {
                    stage: stage.kind().to_string(),
                    record: diagnostic.clone(),
                    cause: Box::new(cause),
                })?;
        }
        Ok(record)
    }

    /// Process a batch of records.
    ///
    /// Each record fails independently. With `stop_on_error` false,
    /// failures are logged and skipped; with it true, the first failure
    /// aborts the batch.
    pub fn process_batch(
        &self,
        records: Vec<Record>,
        stop_on_error: bool,
    ) -> FPResult<Vec<Record>> {
        let mut results = Vec::with_capacity(records.len());
        for record in records {
            match self.process(record) {
                Ok(record) => results.push(record),
                Err(err) if stop_on_error => return Err(err),
                Err(err) => log::warn!("skipping record: {err}"),
            }
        }
        Ok(results)
    }

    /// Process a batch in parallel, skipping failed records.
    ///
    /// Workers share the pipeline's alphabets; `intern` serializes
    /// growth, so indices stay consistent across workers.
    pub fn process_batch_parallel(
        &self,
        records: Vec<Record>,
    ) -> Vec<Record> {
        records
            .into_par_iter()
            .filter_map(|record| match self.process(record) {
                Ok(record) => Some(record),
                Err(err) => {
                    log::warn!("skipping record: {err}");
                    None
                }
            })
            .collect()
    }
}
