//! # Built-in Stages
//!
//! The standard representation transitions:
//! * [`ReadSource`] - `Raw` → `Chars`
//! * [`SegmentChars`] - `Chars` → `Tokens`
//! * [`InternFeatures`] - `Tokens` → `Indices`
//! * [`VectorizeIndices`] - `Indices` → `Vector`
//!
//! And the in-place transformations:
//! * [`LowercaseTokens`], [`DropStopwords`], [`ExpandRelated`] over
//!   `Tokens`,
//! * [`InternLabel`] over the target slot,
//! * [`PrintRecord`] anywhere.
pub mod intern_features;
pub mod intern_label;
pub mod lowercase;
pub mod print_record;
pub mod read_source;
pub mod related;
pub mod segment;
pub mod stopwords;
pub mod vectorize;

#[doc(inline)]
pub use intern_features::InternFeatures;
#[doc(inline)]
pub use intern_label::InternLabel;
#[doc(inline)]
pub use lowercase::LowercaseTokens;
#[doc(inline)]
pub use print_record::PrintRecord;
#[doc(inline)]
pub use read_source::{ReadSource, SourceReader};
#[doc(inline)]
pub use related::{ExpandRelated, RelatedSymbols};
#[doc(inline)]
pub use segment::{SegmentChars, Segmenter, WhitespaceSegmenter};
#[doc(inline)]
pub use stopwords::DropStopwords;
#[doc(inline)]
pub use vectorize::VectorizeIndices;
