//! # Bidirectional Symbol Alphabet

use std::sync::Arc;

use parking_lot::RwLock;

use crate::{
    errors::{FPResult, FeaturePipeError},
    types::{FPHashMap, Symbol, SymbolIndex},
};

struct AlphabetInner<S: Symbol> {
    /// `{ symbol -> index }`; unique keys.
    forward: FPHashMap<S, SymbolIndex>,

    /// `{ index -> symbol }`; dense, 0-based, insertion order.
    backward: Vec<S>,

    /// Whether [`Alphabet::intern`] may allocate new indices.
    growth: bool,
}

/// Bidirectional, index-stable map between symbols and dense integers.
///
/// An `Alphabet` is a shared handle: cloning it yields another view of
/// the *same* table. A pipeline hands clones to each of its stages so
/// that every stage interns against one vocabulary.
///
/// Indices are assigned in strictly increasing order starting at 0 as
/// new symbols are first seen; once assigned, an index's symbol never
/// changes. When growth is frozen, unseen symbols yield
/// [`FeaturePipeError::NotFound`] instead of allocating.
#[derive(Clone)]
pub struct Alphabet<S: Symbol = String> {
    inner: Arc<RwLock<AlphabetInner<S>>>,
}

impl<S: Symbol> Default for Alphabet<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Symbol> Alphabet<S> {
    /// Create a new empty alphabet with growth enabled.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(AlphabetInner {
                forward: FPHashMap::default(),
                backward: Vec::new(),
                growth: true,
            })),
        }
    }

    /// Intern a symbol, returning its stable index.
    ///
    /// Returns the existing index if the symbol is present. If absent
    /// and growth is enabled, appends a new entry. If absent and growth
    /// is frozen, returns [`FeaturePipeError::NotFound`].
    ///
    /// Safe under concurrent calls: the check-then-insert runs in a
    /// single write-locked critical section, so no two symbols ever
    /// receive the same index, and one symbol never receives two.
    pub fn intern(
        &self,
        symbol: &S,
    ) -> FPResult<SymbolIndex> {
        if let Some(&index) = self.inner.read().forward.get(symbol) {
            return Ok(index);
        }

        let mut inner = self.inner.write();

        // Re-check: another writer may have raced us here.
        if let Some(&index) = inner.forward.get(symbol) {
            return Ok(index);
        }

        if !inner.growth {
            return Err(FeaturePipeError::NotFound {
                symbol: format!("{symbol:?}"),
            });
        }

        let index = inner.backward.len() as SymbolIndex;
        inner.backward.push(symbol.clone());
        inner.forward.insert(symbol.clone(), index);
        Ok(index)
    }

    /// Look up the index for a symbol.
    ///
    /// Pure read; never grows the table.
    pub fn lookup_index(
        &self,
        symbol: &S,
    ) -> Option<SymbolIndex> {
        self.inner.read().forward.get(symbol).copied()
    }

    /// Look up the symbol at an index.
    ///
    /// ## Returns
    /// * `Ok(symbol)` - if the index has been assigned.
    /// * `Err(FeaturePipeError::IndexOutOfRange)` - otherwise.
    pub fn lookup_symbol(
        &self,
        index: SymbolIndex,
    ) -> FPResult<S> {
        let inner = self.inner.read();
        inner
            .backward
            .get(index as usize)
            .cloned()
            .ok_or(FeaturePipeError::IndexOutOfRange {
                index: index as usize,
                size: inner.backward.len(),
            })
    }

    /// The number of interned symbols.
    pub fn len(&self) -> usize {
        self.inner.read().backward.len()
    }

    /// Whether the alphabet is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Disable growth. Idempotent.
    pub fn freeze(&self) {
        self.inner.write().growth = false;
    }

    /// Re-enable growth. Idempotent.
    pub fn unfreeze(&self) {
        self.inner.write().growth = true;
    }

    /// Whether growth is currently frozen.
    pub fn is_frozen(&self) -> bool {
        !self.inner.read().growth
    }

    /// Snapshot of all symbols in index order.
    pub fn symbols(&self) -> Vec<S> {
        self.inner.read().backward.clone()
    }

    /// Whether two handles view the same underlying table.
    pub fn same_table(
        &self,
        other: &Self,
    ) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<S: Symbol> core::fmt::Debug for Alphabet<S> {
    fn fmt(
        &self,
        f: &mut core::fmt::Formatter<'_>,
    ) -> core::fmt::Result {
        let inner = self.inner.read();
        f.debug_struct("Alphabet")
            .field("len", &inner.backward.len())
            .field("growth", &inner.growth)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(text: &str) -> String {
        text.to_string()
    }

    #[test]
    fn test_intern_assigns_dense_stable_indices() {
        let alphabet: Alphabet = Alphabet::new();

        assert_eq!(alphabet.intern(&s("a")).unwrap(), 0);
        assert_eq!(alphabet.intern(&s("b")).unwrap(), 1);
        assert_eq!(alphabet.intern(&s("a")).unwrap(), 0);
        assert_eq!(alphabet.intern(&s("c")).unwrap(), 2);

        assert_eq!(alphabet.len(), 3);
        assert_eq!(alphabet.lookup_index(&s("b")), Some(1));
        assert_eq!(alphabet.symbols(), vec![s("a"), s("b"), s("c")]);
    }

    #[test]
    fn test_bijection() {
        let alphabet: Alphabet = Alphabet::new();
        for word in ["red", "green", "blue"] {
            alphabet.intern(&s(word)).unwrap();
        }

        for word in ["red", "green", "blue"] {
            let index = alphabet.lookup_index(&s(word)).unwrap();
            assert_eq!(alphabet.lookup_symbol(index).unwrap(), s(word));
        }
        for index in 0..alphabet.len() as SymbolIndex {
            let symbol = alphabet.lookup_symbol(index).unwrap();
            assert_eq!(alphabet.lookup_index(&symbol), Some(index));
        }
    }

    #[test]
    fn test_freeze_blocks_growth() {
        let alphabet: Alphabet = Alphabet::new();
        alphabet.intern(&s("a")).unwrap();
        alphabet.intern(&s("b")).unwrap();

        alphabet.freeze();
        alphabet.freeze();
        assert!(alphabet.is_frozen());

        assert!(matches!(
            alphabet.intern(&s("d")),
            Err(FeaturePipeError::NotFound { .. })
        ));
        assert_eq!(alphabet.len(), 2);

        // Already-interned symbols still resolve.
        assert_eq!(alphabet.intern(&s("b")).unwrap(), 1);
        assert_eq!(alphabet.lookup_index(&s("d")), None);

        alphabet.unfreeze();
        assert_eq!(alphabet.intern(&s("d")).unwrap(), 2);
    }

    #[test]
    fn test_lookup_symbol_out_of_range() {
        let alphabet: Alphabet = Alphabet::new();
        alphabet.intern(&s("only")).unwrap();

        match alphabet.lookup_symbol(5) {
            Err(FeaturePipeError::IndexOutOfRange { index, size }) => {
                assert_eq!(index, 5);
                assert_eq!(size, 1);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_clones_share_one_table() {
        let alphabet: Alphabet = Alphabet::new();
        let view = alphabet.clone();

        alphabet.intern(&s("shared")).unwrap();
        assert_eq!(view.lookup_index(&s("shared")), Some(0));
        assert!(alphabet.same_table(&view));
        assert!(!alphabet.same_table(&Alphabet::new()));
    }

    #[test]
    fn test_concurrent_intern_is_exclusive() {
        let alphabet: Alphabet = Alphabet::new();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let view = alphabet.clone();
                std::thread::spawn(move || {
                    // Every thread interns the same 100 symbols.
                    (0..100)
                        .map(|i| view.intern(&format!("sym-{i}")).unwrap())
                        .collect::<Vec<SymbolIndex>>()
                })
            })
            .collect();

        let results: Vec<Vec<SymbolIndex>> =
            handles.into_iter().map(|h| h.join().unwrap()).collect();

        // No two concurrent calls received different indices for the
        // same symbol, and no index was handed out twice.
        assert_eq!(alphabet.len(), 100);
        for seen in &results {
            assert_eq!(seen, &results[0]);
        }
        let mut unique = results[0].clone();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), 100);
    }
}
