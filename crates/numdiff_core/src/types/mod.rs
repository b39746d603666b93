//! Core error and sample types.
//!
//! This module provides:
//! - `error`: Structured error type for all estimation operations
//! - `sample`: Scattered neighbour samples and the intercept constraint
//!
//! # Re-exports
//!
//! For convenience, commonly used types are re-exported at this module level:
//! - [`DifferentiationError`] from `error`
//! - [`NeighborSample`], [`InterceptConstraint`] from `sample`

pub mod error;
pub mod sample;

// Re-export commonly used types at module level
pub use error::DifferentiationError;
pub use sample::{InterceptConstraint, NeighborSample};
