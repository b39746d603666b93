//! Numerical derivative estimation.
//!
//! This module provides:
//! - `finite_difference`: Fixed-stencil formulas along one axis
//! - `scattered`: Weighted least-squares gradients from irregular samples

pub mod finite_difference;
pub mod scattered;
