//! # Pipeline IO
//!
//! Persisted form: the ordered list of `(stage kind, stage version,
//! stage config)` plus one export of each shared alphabet, in that
//! fixed order, as JSON.
//!
//! Loading reconstructs the alphabets first, then each stage bound to
//! them, in original order. Load failures are fatal: nothing is
//! partially loaded.

use std::{
    fs::File,
    io::{BufReader, BufWriter, Read, Write},
    path::Path,
};

use serde::{Deserialize, Serialize};

use crate::{
    alphabet::{Alphabet, AlphabetExport},
    errors::{FPResult, FeaturePipeError},
    pipeline::{serial::SerialPipeline, stage::build_stage},
};

/// The newest pipeline format this reader writes and understands.
pub const PIPELINE_FORMAT_VERSION: u32 = 1;

/// One stage's persisted `(kind, version, config)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageExport {
    /// The stage's registry kind.
    pub kind: String,

    /// The stage's config format version.
    pub version: u32,

    /// The stage's externalized configuration.
    pub config: serde_json::Value,
}

/// A detached, serializable snapshot of a [`SerialPipeline`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineExport {
    /// The format version of this export.
    pub version: u32,

    /// Stage exports, in application order.
    pub stages: Vec<StageExport>,

    /// The shared data alphabet.
    pub data_alphabet: AlphabetExport<String>,

    /// The shared target alphabet.
    pub target_alphabet: AlphabetExport<String>,
}

/// Snapshot a pipeline into a serializable export.
pub fn export_pipeline(pipeline: &SerialPipeline) -> FPResult<PipelineExport> {
    let mut stages = Vec::with_capacity(pipeline.stages().len());
    for stage in pipeline.stages() {
        stages.push(StageExport {
            kind: stage.kind().to_string(),
            version: stage.version(),
            config: stage.export_config()?,
        });
    }

    Ok(PipelineExport {
        version: PIPELINE_FORMAT_VERSION,
        stages,
        data_alphabet: pipeline.data_alphabet().export(),
        target_alphabet: pipeline.target_alphabet().export(),
    })
}

/// Rebuild a pipeline from an export.
///
/// Alphabets are reconstructed first so every symbol keeps its index;
/// stages are then rebuilt through the factory registry and bound to
/// them in original order. Growth flags are restored verbatim -
/// freezing for inference remains the caller's decision.
pub fn import_pipeline(export: PipelineExport) -> FPResult<SerialPipeline> {
    if export.version > PIPELINE_FORMAT_VERSION {
        return Err(FeaturePipeError::IncompatibleVersion {
            component: "pipeline".to_string(),
            found: export.version,
            supported: PIPELINE_FORMAT_VERSION,
        });
    }

    let data_alphabet = Alphabet::import(export.data_alphabet)?;
    let target_alphabet = Alphabet::import(export.target_alphabet)?;

    let mut stages = Vec::with_capacity(export.stages.len());
    for stage in &export.stages {
        stages.push(build_stage(&stage.kind, stage.version, &stage.config)?);
    }

    Ok(SerialPipeline::with_alphabets(
        stages,
        data_alphabet,
        target_alphabet,
    ))
}

/// Write a pipeline to a [`Write`] writer as JSON.
pub fn write_pipeline<W: Write>(
    pipeline: &SerialPipeline,
    writer: &mut W,
) -> FPResult<()> {
    let export = export_pipeline(pipeline)?;
    serde_json::to_writer_pretty(writer, &export)
        .map_err(|e| FeaturePipeError::Parse(e.to_string()))
}

/// Read a pipeline from a [`Read`] reader.
pub fn read_pipeline<R: Read>(reader: R) -> FPResult<SerialPipeline> {
    let export: PipelineExport =
        serde_json::from_reader(reader).map_err(|e| FeaturePipeError::Parse(e.to_string()))?;
    import_pipeline(export)
}

/// Save a pipeline to a file.
///
/// ## Arguments
/// * `pipeline` - the pipeline to save.
/// * `path` - the path to save to.
pub fn save_pipeline_path<P: AsRef<Path>>(
    pipeline: &SerialPipeline,
    path: P,
) -> FPResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_pipeline(pipeline, &mut writer)
}

/// Load a pipeline from a file.
///
/// ## Arguments
/// * `path` - the path to load from.
pub fn load_pipeline_path<P: AsRef<Path>>(path: P) -> FPResult<SerialPipeline> {
    let reader = BufReader::new(File::open(path)?);
    read_pipeline(reader)
}
