//! # Common Types and Traits
use core::{fmt::Debug, hash::Hash};

/// A type that can be interned into an [`crate::alphabet::Alphabet`].
///
/// Symbols are opaque to the table; they only need to be hashable,
/// comparable, and cheap enough to clone into the table's arena.
pub trait Symbol: 'static + Clone + Eq + Hash + Debug + Send + Sync {}

impl<T> Symbol for T where T: 'static + Clone + Eq + Hash + Debug + Send + Sync {}

/// The dense index assigned to an interned symbol.
pub type SymbolIndex = u32;

/// Type Alias for hash maps in this crate.
pub type FPHashMap<K, V> = ahash::AHashMap<K, V>;

/// Type Alias for hash sets in this crate.
pub type FPHashSet<V> = ahash::AHashSet<V>;
