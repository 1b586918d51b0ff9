//! # Records
//!
//! This module provides the [`Record`] carrier that flows through a
//! pipeline, its [`Payload`] representations, and the sparse feature
//! vector the final stage produces.
//!
//! ## Representations
//!
//! A record's `data` holds exactly one [`Payload`] variant at a time;
//! stages transition it along:
//! `Raw` → `Chars` → `Tokens` → `Indices` → `Vector`.
pub mod iterator;
pub mod record_types;
pub mod segments;
pub mod sparse_vector;

#[doc(inline)]
pub use iterator::PatternMatchIterator;
#[doc(inline)]
pub use record_types::{Payload, Record, Target, Token};
#[doc(inline)]
pub use segments::{Segment, min_segment_score, segments};
#[doc(inline)]
pub use sparse_vector::SparseVector;
