//! Fixed-stencil finite differences for scalar functions.
//!
//! A [`Stencil`] is a list of `(offset, coefficient)` taps and a derivative
//! order. The estimate of the derivative at `x` with step `h` is
//!
//! ```text
//! f^(order)(x) ≈ Σ coeff_i · f(x + h · offset_i) / h^order
//! ```
//!
//! ## Available Stencils
//!
//! - [`Stencil::FORWARD`]: `(f(x+h) - f(x)) / h`
//! - [`Stencil::BACKWARD`]: `(f(x) - f(x-h)) / h`
//! - [`Stencil::CENTRAL`]: `(f(x+h) - f(x-h)) / 2h`
//! - [`Stencil::CENTRAL_2ND`]: `(f(x-h) - 2f(x) + f(x+h)) / h²`
//!
//! ## Configuration
//!
//! [`EvalSettings`] carries the step size, an optional cached `f(x)` for the
//! origin tap, and whether the taps are evaluated concurrently.
//!
//! ## Examples
//!
//! ```
//! use numdiff_core::math::finite_difference::{estimate, EvalSettings, Stencil};
//!
//! let f = |x: f64| x * x;
//! let settings = EvalSettings::new(1e-3).unwrap();
//!
//! let d2 = estimate(f, 3.0, &Stencil::CENTRAL_2ND, &settings).unwrap();
//! assert!((d2 - 2.0).abs() < 1e-6);
//! ```

mod evaluator;
mod settings;
mod stencil;

// Re-export public types at module level
pub use evaluator::{estimate, try_estimate, try_estimate_in_pool};
pub use settings::EvalSettings;
pub use stencil::{Stencil, StencilPoint};
