//! # Sparse Feature Vectors

use crate::types::{FPHashMap, SymbolIndex};

/// A sparse numeric feature vector.
///
/// Indices are sorted and unique; `values[i]` is the weight at
/// `indices[i]`. This is the value contract a downstream classifier
/// consumes from the final pipeline stage.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SparseVector {
    indices: Vec<SymbolIndex>,
    values: Vec<f64>,
}

impl SparseVector {
    /// Build a vector from a feature-index sequence, counting repeats.
    ///
    /// ## Arguments
    /// * `indices` - feature indices, repeats allowed, any order.
    pub fn from_indices(indices: &[SymbolIndex]) -> Self {
        let mut counts: FPHashMap<SymbolIndex, f64> = FPHashMap::default();
        for &index in indices {
            *counts.entry(index).or_insert(0.0) += 1.0;
        }
        Self::from_pairs(counts.into_iter())
    }

    /// Build a vector from `(index, value)` pairs.
    ///
    /// Repeated indices are summed.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (SymbolIndex, f64)>) -> Self {
        let mut merged: FPHashMap<SymbolIndex, f64> = FPHashMap::default();
        for (index, value) in pairs {
            *merged.entry(index).or_insert(0.0) += value;
        }

        let mut entries: Vec<(SymbolIndex, f64)> = merged.into_iter().collect();
        entries.sort_unstable_by_key(|(index, _)| *index);

        Self {
            indices: entries.iter().map(|(index, _)| *index).collect(),
            values: entries.iter().map(|(_, value)| *value).collect(),
        }
    }

    /// The sorted feature indices.
    pub fn indices(&self) -> &[SymbolIndex] {
        &self.indices
    }

    /// The values, aligned with [`Self::indices`].
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// The number of non-zero entries.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Whether the vector has no entries.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// The value at a feature index, 0.0 if absent.
    pub fn value_at(
        &self,
        index: SymbolIndex,
    ) -> f64 {
        match self.indices.binary_search(&index) {
            Ok(position) => self.values[position],
            Err(_) => 0.0,
        }
    }

    /// Iterate over `(index, value)` entries in index order.
    pub fn iter(&self) -> impl Iterator<Item = (SymbolIndex, f64)> + '_ {
        self.indices.iter().copied().zip(self.values.iter().copied())
    }

    /// Dot product with another sparse vector.
    pub fn dot(
        &self,
        other: &SparseVector,
    ) -> f64 {
        self.iter()
            .map(|(index, value)| value * other.value_at(index))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_indices_counts_repeats() {
        let vector = SparseVector::from_indices(&[3, 1, 3, 3, 7]);

        assert_eq!(vector.indices(), &[1, 3, 7]);
        assert_eq!(vector.values(), &[1.0, 3.0, 1.0]);
        assert_eq!(vector.len(), 3);
        assert_eq!(vector.value_at(3), 3.0);
        assert_eq!(vector.value_at(2), 0.0);
    }

    #[test]
    fn test_empty() {
        let vector = SparseVector::from_indices(&[]);
        assert!(vector.is_empty());
        assert_eq!(vector.value_at(0), 0.0);
    }

    #[test]
    fn test_dot() {
        let a = SparseVector::from_pairs([(0, 2.0), (2, 1.0)]);
        let b = SparseVector::from_pairs([(0, 3.0), (1, 5.0), (2, 4.0)]);

        assert_eq!(a.dot(&b), 10.0);
        assert_eq!(b.dot(&a), 10.0);
        assert_eq!(a.dot(&SparseVector::default()), 0.0);
    }
}
