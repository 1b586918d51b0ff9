//! # Variable Registry

use std::sync::Arc;

use parking_lot::RwLock;

use crate::{
    alphabet::Alphabet,
    errors::FPResult,
    types::{FPHashMap, SymbolIndex},
    universe::shape::ShapeProjection,
};

/// A discrete model variable: a label plus its outcome count.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Variable {
    label: String,
    num_outcomes: usize,
}

impl Variable {
    /// Create a new variable.
    ///
    /// ## Arguments
    /// * `label` - the variable's display label.
    /// * `num_outcomes` - the number of discrete outcomes.
    pub fn new(
        label: impl Into<String>,
        num_outcomes: usize,
    ) -> Self {
        Self {
            label: label.into(),
            num_outcomes,
        }
    }

    /// The variable's label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The variable's outcome count.
    pub fn num_outcomes(&self) -> usize {
        self.num_outcomes
    }
}

/// A registry of model variables plus a shape-keyed projection cache.
///
/// A `Universe` is a shared handle: cloning it yields another view of
/// the same registry. Construct one per top-level context; dropping the
/// last handle is the only "reset".
///
/// The variable table is permanently growth-enabled - variables are
/// registered on first use and never frozen.
#[derive(Clone, Default)]
pub struct Universe {
    variables: Alphabet<Variable>,
    projections: Arc<RwLock<FPHashMap<Vec<usize>, Arc<ShapeProjection>>>>,
}

impl Universe {
    /// Create a new empty universe.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a variable, returning its stable index.
    ///
    /// Re-registering an equal variable returns the original index.
    pub fn register(
        &self,
        variable: &Variable,
    ) -> FPResult<SymbolIndex> {
        self.variables.intern(variable)
    }

    /// Look up the variable at an index.
    pub fn variable(
        &self,
        index: SymbolIndex,
    ) -> FPResult<Variable> {
        self.variables.lookup_symbol(index)
    }

    /// Look up the index for a registered variable.
    pub fn index_of(
        &self,
        variable: &Variable,
    ) -> Option<SymbolIndex> {
        self.variables.lookup_index(variable)
    }

    /// The number of registered variables.
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    /// Whether the universe has no registered variables.
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Get the shared projection for a variable set's shape.
    ///
    /// The key is the *ordered* list of outcome counts - two sets with
    /// the same counts in a different order are different shapes. The
    /// projection is created on first request; every later request for
    /// the same shape observes the identical handle, including under
    /// concurrent first access.
    ///
    /// ## Returns
    /// * `Ok(projection)` - the shared handle for the shape.
    /// * `Err(FeaturePipeError::ShapeTooLarge)` - if the shape's
    ///   assignment count overflows `usize`; nothing is cached.
    pub fn shape_cache_for(
        &self,
        variables: &[Variable],
    ) -> FPResult<Arc<ShapeProjection>> {
        let key: Vec<usize> = variables.iter().map(Variable::num_outcomes).collect();

        if let Some(projection) = self.projections.read().get(&key) {
            return Ok(projection.clone());
        }

        let mut writer = self.projections.write();

        // Re-check: another writer may have created it first.
        if let Some(projection) = writer.get(&key) {
            return Ok(projection.clone());
        }

        let projection = Arc::new(ShapeProjection::new(key.clone())?);
        writer.insert(key, projection.clone());
        Ok(projection)
    }
}

impl core::fmt::Debug for Universe {
    fn fmt(
        &self,
        f: &mut core::fmt::Formatter<'_>,
    ) -> core::fmt::Result {
        f.debug_struct("Universe")
            .field("variables", &self.variables.len())
            .field("projections", &self.projections.read().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_is_index_stable() {
        let universe = Universe::new();

        let weather = Variable::new("weather", 3);
        let mood = Variable::new("mood", 2);

        assert_eq!(universe.register(&weather).unwrap(), 0);
        assert_eq!(universe.register(&mood).unwrap(), 1);
        assert_eq!(universe.register(&weather).unwrap(), 0);

        assert_eq!(universe.len(), 2);
        assert_eq!(universe.variable(1).unwrap(), mood);
        assert_eq!(universe.index_of(&weather), Some(0));
    }

    #[test]
    fn test_shape_cache_shared_by_shape_not_identity() {
        let universe = Universe::new();

        let a = [Variable::new("a0", 2), Variable::new("a1", 3)];
        let b = [Variable::new("b0", 2), Variable::new("b1", 3)];
        let c = [Variable::new("c0", 3), Variable::new("c1", 2)];

        let pa = universe.shape_cache_for(&a).unwrap();
        let pb = universe.shape_cache_for(&b).unwrap();
        let pc = universe.shape_cache_for(&c).unwrap();

        // Same shape, different variable identities: identical handle.
        assert!(Arc::ptr_eq(&pa, &pb));

        // [2,3] and [3,2] are different shapes.
        assert!(!Arc::ptr_eq(&pa, &pc));
        assert_eq!(pa.shape(), &[2, 3]);
        assert_eq!(pc.shape(), &[3, 2]);
    }

    #[test]
    fn test_fresh_handle_is_a_reset() {
        let first = Universe::new();
        first.register(&Variable::new("v", 2)).unwrap();
        let projection = first.shape_cache_for(&[Variable::new("v", 2)]).unwrap();

        let second = Universe::new();
        assert!(second.is_empty());
        assert!(!Arc::ptr_eq(
            &projection,
            &second.shape_cache_for(&[Variable::new("v", 2)]).unwrap()
        ));
    }

    #[test]
    fn test_oversized_shape_is_not_cached() {
        let universe = Universe::new();
        let huge = [Variable::new("h0", usize::MAX), Variable::new("h1", 2)];

        assert!(matches!(
            universe.shape_cache_for(&huge),
            Err(crate::errors::FeaturePipeError::ShapeTooLarge { .. })
        ));

        // The failure leaves the cache usable.
        assert!(universe.shape_cache_for(&huge[1..]).is_ok());
    }

    #[test]
    fn test_concurrent_first_access_creates_once() {
        let universe = Universe::new();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let view = universe.clone();
                std::thread::spawn(move || {
                    view.shape_cache_for(&[Variable::new("x", 4), Variable::new("y", 5)])
                        .unwrap()
                })
            })
            .collect();

        let projections: Vec<Arc<ShapeProjection>> =
            handles.into_iter().map(|h| h.join().unwrap()).collect();

        for projection in &projections {
            assert!(Arc::ptr_eq(projection, &projections[0]));
        }
    }
}
