//! # `featurepipe` Feature Extraction Pipelines
//!
//! `featurepipe` turns raw, variably-typed records into stable,
//! densely-indexed numeric representations for downstream statistical
//! models. The same symbol always maps to the same integer index -
//! across training and inference, and across process restarts via
//! persisted state.
//!
//! See:
//! * [`alphabet`] for the bidirectional symbol↔index table.
//! * [`pipeline`] to compose stages into alphabet-sharing pipelines.
//! * [`record`] for the carrier types flowing through a pipeline.
//! * [`universe`] for model-variable registries and shape caches.
//!
//! ## Training vs. inference
//!
//! Training runs with alphabet growth enabled: every stage that meets a
//! new symbol interns it. Before inference, freeze the alphabets
//! explicitly; unseen symbols are then dropped (or rejected, for
//! labels) instead of silently renumbering anything already assigned.
//! The pipeline never guesses a mode from context.
//!
//! ```rust
//! use featurepipe::pipeline::{SerialPipeline, stages};
//! use featurepipe::record::{Payload, Record};
//!
//! let pipeline = SerialPipeline::new(vec![
//!     Box::new(stages::SegmentChars::new()),
//!     Box::new(stages::LowercaseTokens::new()),
//!     Box::new(stages::DropStopwords::new(["the"])),
//!     Box::new(stages::InternFeatures::new()),
//!     Box::new(stages::VectorizeIndices::new()),
//! ]);
//!
//! let record = pipeline
//!     .process(Record::new(Payload::Chars("The cat sat".into())))
//!     .unwrap();
//! assert!(matches!(record.data, Payload::Vector(_)));
//!
//! pipeline.freeze_alphabets();
//! ```
#![warn(missing_docs, unused)]

pub mod alphabet;
pub mod errors;
pub mod pipeline;
pub mod record;
pub mod types;
pub mod universe;

#[doc(inline)]
pub use alphabet::Alphabet;
#[doc(inline)]
pub use errors::{FPResult, FeaturePipeError};
#[doc(inline)]
pub use pipeline::{SerialPipeline, Stage};
#[doc(inline)]
pub use record::{Payload, PatternMatchIterator, Record, SparseVector, Target, Token};
#[doc(inline)]
pub use types::{Symbol, SymbolIndex};
#[doc(inline)]
pub use universe::{Universe, Variable};
