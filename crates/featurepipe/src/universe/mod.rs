//! # Variable Universe
//!
//! This module provides the registry for probabilistic-model variables
//! and the shape-keyed projection cache.
//!
//! A [`Universe`] is an explicit handle owned by the caller's top-level
//! context; there is no process-global instance. "Resetting" is
//! constructing a fresh handle, so tests and independent models never
//! contaminate each other.
pub mod registry;
pub mod shape;

#[doc(inline)]
pub use registry::{Universe, Variable};
#[doc(inline)]
pub use shape::ShapeProjection;
