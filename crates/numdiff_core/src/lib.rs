//! # numdiff_core: Derivative Estimation for Black-Box Functions
//!
//! ## Core Layer Role
//!
//! numdiff_core is the bottom layer of the workspace, providing:
//! - Fixed-stencil finite differences along one axis (`math::finite_difference`)
//! - Weighted least-squares gradients from scattered samples (`math::scattered`)
//! - Pluggable locality weights (`math::scattered::weight`)
//! - Error and sample types: `DifferentiationError`, `NeighborSample`,
//!   `InterceptConstraint` (`types`)
//!
//! ## Minimal Dependency Principle
//!
//! The core has no dependencies on other workspace crates and no logging:
//! - num-traits: Generic floating-point weights
//! - nalgebra: Dense SVD least-squares solve
//! - rayon: Concurrent stencil evaluation
//! - thiserror: Error derivation
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use numdiff_core::math::finite_difference::{estimate, EvalSettings, Stencil};
//! use numdiff_core::math::scattered::{estimate_gradient, Uniform};
//! use numdiff_core::types::{InterceptConstraint, NeighborSample};
//!
//! // d/dx sin(x) at x = 0
//! let settings = EvalSettings::new(1e-5).unwrap();
//! let d = estimate(f64::sin, 0.0, &Stencil::CENTRAL, &settings).unwrap();
//! assert!((d - 1.0).abs() < 1e-8);
//!
//! // Gradient of z = 1 + 2x - y from three samples
//! let samples = vec![
//!     NeighborSample::new(vec![0.0, 0.0], 1.0),
//!     NeighborSample::new(vec![1.0, 0.0], 3.0),
//!     NeighborSample::new(vec![0.0, 1.0], 0.0),
//! ];
//! let grad = estimate_gradient(&[0.0, 0.0], &samples, &Uniform, InterceptConstraint::free()).unwrap();
//! assert!((grad[0] - 2.0).abs() < 1e-10);
//! assert!((grad[1] + 1.0).abs() < 1e-10);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for stencils, settings and samples

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod types;
