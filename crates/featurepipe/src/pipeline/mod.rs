//! # Transformation Pipelines
//!
//! This module provides the composable stage pipeline.
//!
//! A [`Stage`] is one named `Record -> Record` transformation. A
//! [`SerialPipeline`] applies stages strictly in order, sharing one
//! data alphabet and one target alphabet across the whole chain so that
//! indices stay consistent from the first stage to the last - and
//! across process restarts via [`io`].
pub mod io;
pub mod serial;
pub mod stage;
pub mod stages;

#[doc(inline)]
pub use io::{PipelineExport, load_pipeline_path, save_pipeline_path};
#[doc(inline)]
pub use serial::SerialPipeline;
#[doc(inline)]
pub use stage::{Stage, StageFactoryHook, build_stage};
