//! # Symbol Alphabets
//!
//! This module provides the bidirectional symbol↔index table and its
//! io mechanisms.
//!
//! The primary type is [`Alphabet`]: a cheaply-cloneable shared handle
//! over an index-stable table. Every clone observes the same table, so a
//! pipeline and all of its stages can intern against one vocabulary.
pub mod io;
pub mod symbol_alphabet;

#[doc(inline)]
pub use io::{AlphabetExport, read_alphabet, write_alphabet};
#[doc(inline)]
pub use symbol_alphabet::Alphabet;
