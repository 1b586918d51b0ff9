//! # Shape Projections

use crate::errors::{FPResult, FeaturePipeError};

/// Precomputed mixed-radix index structure for one variable-set shape.
///
/// A shape is the ordered list of per-variable outcome counts. The
/// projection maps between a joint assignment (one outcome per
/// variable) and its dense assignment index, in row-major order with
/// the last variable varying fastest.
///
/// The structure depends only on the outcome counts, not on which
/// variables carry them, so every variable set with the same shape can
/// share one projection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeProjection {
    shape: Vec<usize>,
    strides: Vec<usize>,
    num_assignments: usize,
}

impl ShapeProjection {
    /// Build the projection for a shape.
    ///
    /// ## Returns
    /// * `Ok(projection)` - on success.
    /// * `Err(FeaturePipeError::ShapeTooLarge)` - if the joint
    ///   assignment count overflows `usize`.
    pub fn new(shape: Vec<usize>) -> FPResult<Self> {
        let too_large = || FeaturePipeError::ShapeTooLarge {
            shape: shape.clone(),
        };

        let mut strides = vec![1usize; shape.len()];
        for i in (0..shape.len().saturating_sub(1)).rev() {
            strides[i] = strides[i + 1]
                .checked_mul(shape[i + 1])
                .ok_or_else(too_large)?;
        }
        let num_assignments = shape
            .iter()
            .try_fold(1usize, |acc, &count| acc.checked_mul(count))
            .ok_or_else(too_large)?;

        Ok(Self {
            shape,
            strides,
            num_assignments,
        })
    }

    /// The ordered outcome counts this projection was built for.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// The number of variables in the shape.
    pub fn arity(&self) -> usize {
        self.shape.len()
    }

    /// The total number of joint assignments.
    pub fn num_assignments(&self) -> usize {
        self.num_assignments
    }

    /// Map a joint assignment to its dense index.
    ///
    /// ## Arguments
    /// * `outcomes` - one outcome per variable, in shape order.
    ///
    /// ## Returns
    /// * `Ok(index)` - the row-major assignment index.
    /// * `Err(FeaturePipeError::IndexOutOfRange)` - if an outcome
    ///   exceeds its variable's count, or the arity is wrong.
    pub fn assignment_index(
        &self,
        outcomes: &[usize],
    ) -> FPResult<usize> {
        if outcomes.len() != self.shape.len() {
            return Err(FeaturePipeError::IndexOutOfRange {
                index: outcomes.len(),
                size: self.shape.len(),
            });
        }

        let mut index = 0;
        for (i, &outcome) in outcomes.iter().enumerate() {
            if outcome >= self.shape[i] {
                return Err(FeaturePipeError::IndexOutOfRange {
                    index: outcome,
                    size: self.shape[i],
                });
            }
            index += outcome * self.strides[i];
        }
        Ok(index)
    }

    /// Map a dense assignment index back to its joint assignment.
    ///
    /// ## Returns
    /// * `Ok(outcomes)` - one outcome per variable, in shape order.
    /// * `Err(FeaturePipeError::IndexOutOfRange)` - if the index is past
    ///   [`Self::num_assignments`].
    pub fn assignment_of(
        &self,
        index: usize,
    ) -> FPResult<Vec<usize>> {
        if index >= self.num_assignments {
            return Err(FeaturePipeError::IndexOutOfRange {
                index,
                size: self.num_assignments,
            });
        }

        Ok(self
            .strides
            .iter()
            .zip(&self.shape)
            .map(|(&stride, &count)| (index / stride) % count)
            .collect())
    }
}
