//! Gradient estimation from irregularly placed samples.
//!
//! Fits a locally weighted plane to neighbouring `(location, value)` samples
//! and reads the gradient off its coefficients:
//!
//! ```text
//! min_β Σ wᵢ (rᵢ · β - bᵢ)²,   wᵢ = weight(query, locationᵢ)
//! ```
//!
//! The weight function decides how local the fit is; see [`weight`].
//! The system is solved with an SVD, and rank deficiency is reported as
//! `DifferentiationError::SingularSystem`.
//!
//! ## Examples
//!
//! ```
//! use numdiff_core::math::scattered::{estimate_gradient, WeightKind};
//! use numdiff_core::types::{InterceptConstraint, NeighborSample};
//!
//! let samples = vec![
//!     NeighborSample::new(vec![1.0, 0.0], 2.0),
//!     NeighborSample::new(vec![0.0, 1.0], 3.0),
//!     NeighborSample::new(vec![-1.0, 0.0], -2.0),
//!     NeighborSample::new(vec![0.0, -1.0], -3.0),
//! ];
//! let weight = WeightKind::from_name("inverse-squared-distance", None).unwrap();
//! let grad = estimate_gradient(&[0.0, 0.0], &samples, &weight, InterceptConstraint::forced(0.0)).unwrap();
//! assert!((grad[0] - 2.0).abs() < 1e-12);
//! assert!((grad[1] - 3.0).abs() < 1e-12);
//! ```

mod gradient;
mod linalg;
pub mod weight;

// Re-export public types at module level
pub use gradient::{estimate_gradient, estimate_gradient_into, estimate_slope};
pub use weight::{
    euclidean_distance, squared_distance, InverseSquaredDistance, SquaredExponential, Uniform,
    WeightFunction, WeightKind,
};
