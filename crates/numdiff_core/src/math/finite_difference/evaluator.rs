//! Stencil evaluation, sequential or fanned out over the rayon pool.

use rayon::prelude::*;

use super::{EvalSettings, Stencil, StencilPoint};
use crate::types::DifferentiationError;

/// Estimate a derivative of `f` at `x`.
///
/// Sums `coeff * f(x + step * offset)` over the stencil taps and divides by
/// `step^order`. When `settings.origin_value` is present, the origin tap uses
/// it instead of calling `f`.
///
/// # Arguments
///
/// * `f` - Function to differentiate
/// * `x` - Evaluation point
/// * `method` - Finite-difference formula
/// * `settings` - Step size, cached `f(x)`, concurrency
///
/// # Returns
///
/// * `Ok(derivative)` - Estimated derivative of order `method.order()`
/// * `Err(DifferentiationError::InvalidArgument)` - Bad step or empty stencil
/// * `Err(DifferentiationError::Evaluation)` - Non-finite estimate
///
/// # Example
///
/// ```
/// use numdiff_core::math::finite_difference::{estimate, EvalSettings, Stencil};
///
/// let settings = EvalSettings::new(1e-6).unwrap().with_concurrent(true);
/// let d = estimate(f64::exp, 0.0, &Stencil::CENTRAL, &settings).unwrap();
/// assert!((d - 1.0).abs() < 1e-8);
/// ```
pub fn estimate<F>(
    f: F,
    x: f64,
    method: &Stencil,
    settings: &EvalSettings,
) -> Result<f64, DifferentiationError>
where
    F: Fn(f64) -> f64 + Sync,
{
    try_estimate(|t| Ok::<f64, DifferentiationError>(f(t)), x, method, settings)
}

/// Estimate a derivative of a fallible function.
///
/// Same as [`estimate`], but `f` may fail. Its error is returned unchanged;
/// validation failures are converted into the caller's error type through
/// `From<DifferentiationError>`.
///
/// In concurrent mode the call blocks until every dispatched evaluation has
/// returned. If any of them failed, the first failure in tap order is
/// returned and the other results are discarded, as on the sequential path.
///
/// A step whose power `step^order` underflows or overflows is rejected with
/// `InvalidArgument`, and a non-finite result with `Evaluation`.
///
/// # Example
///
/// ```
/// use numdiff_core::math::finite_difference::{try_estimate, EvalSettings, Stencil};
/// use numdiff_core::types::DifferentiationError;
///
/// let ln = |x: f64| {
///     if x > 0.0 {
///         Ok(x.ln())
///     } else {
///         Err(DifferentiationError::Evaluation(format!("ln undefined at {}", x)))
///     }
/// };
/// let settings = EvalSettings::new(1e-6).unwrap();
///
/// let d = try_estimate(ln, 2.0, &Stencil::CENTRAL, &settings).unwrap();
/// assert!((d - 0.5).abs() < 1e-8);
///
/// // The backward tap at x - h leaves the domain
/// assert!(try_estimate(ln, 0.0, &Stencil::BACKWARD, &settings).is_err());
/// ```
pub fn try_estimate<F, E>(f: F, x: f64, method: &Stencil, settings: &EvalSettings) -> Result<f64, E>
where
    F: Fn(f64) -> Result<f64, E> + Sync,
    E: From<DifferentiationError> + Send,
{
    settings.validate()?;
    let taps = method.taps();
    if taps.is_empty() {
        return Err(DifferentiationError::invalid_argument("stencil has no taps").into());
    }
    let order = i32::try_from(method.order()).map_err(|_| {
        DifferentiationError::invalid_argument(format!(
            "stencil order {} is too large",
            method.order()
        ))
    })?;

    let denominator = settings.step.powi(order);
    if !(denominator.is_finite() && denominator != 0.0) {
        return Err(DifferentiationError::invalid_argument(format!(
            "step {:e} raised to order {} is not representable",
            settings.step, order
        ))
        .into());
    }

    let contributions = if settings.concurrent {
        concurrent_contributions(&f, x, taps, settings)?
    } else {
        sequential_contributions(&f, x, taps, settings)?
    };

    // Fixed tap order keeps both paths bit-identical for deterministic f.
    let sum: f64 = contributions.iter().sum();
    let derivative = sum / denominator;
    if !derivative.is_finite() {
        return Err(DifferentiationError::Evaluation(format!(
            "non-finite estimate {} at x = {} with step {:e}",
            derivative, x, settings.step
        ))
        .into());
    }
    Ok(derivative)
}

/// [`try_estimate`] with concurrent taps dispatched on a dedicated pool.
///
/// Sequential settings run on the calling thread of the pool.
pub fn try_estimate_in_pool<F, E>(
    pool: &rayon::ThreadPool,
    f: F,
    x: f64,
    method: &Stencil,
    settings: &EvalSettings,
) -> Result<f64, E>
where
    F: Fn(f64) -> Result<f64, E> + Send + Sync,
    E: From<DifferentiationError> + Send,
{
    pool.install(|| try_estimate(f, x, method, settings))
}

/// Contribution of the origin tap when `f(x)` is already known.
#[inline]
fn cached_origin(tap: &StencilPoint, settings: &EvalSettings) -> Option<f64> {
    match settings.origin_value {
        Some(value) if tap.is_origin() => Some(tap.coefficient * value),
        _ => None,
    }
}

#[inline]
fn evaluate_tap<F, E>(f: &F, x: f64, tap: &StencilPoint, step: f64) -> Result<f64, E>
where
    F: Fn(f64) -> Result<f64, E>,
{
    Ok(tap.coefficient * f(x + step * tap.offset)?)
}

fn sequential_contributions<F, E>(
    f: &F,
    x: f64,
    taps: &[StencilPoint],
    settings: &EvalSettings,
) -> Result<Vec<f64>, E>
where
    F: Fn(f64) -> Result<f64, E>,
{
    taps.iter()
        .map(|tap| match cached_origin(tap, settings) {
            Some(contribution) => Ok(contribution),
            None => evaluate_tap(f, x, tap, settings.step),
        })
        .collect()
}

fn concurrent_contributions<F, E>(
    f: &F,
    x: f64,
    taps: &[StencilPoint],
    settings: &EvalSettings,
) -> Result<Vec<f64>, E>
where
    F: Fn(f64) -> Result<f64, E> + Sync,
    E: Send,
{
    let mut contributions = vec![0.0; taps.len()];
    let mut pending = Vec::with_capacity(taps.len());

    // The origin shortcut never calls f and stays on this thread.
    for (i, tap) in taps.iter().enumerate() {
        match cached_origin(tap, settings) {
            Some(contribution) => contributions[i] = contribution,
            None => pending.push(i),
        }
    }

    // Barrier: collect returns only after every branch has finished.
    // Results keep the order of `pending`, so the first error is in tap order.
    let evaluated: Vec<Result<f64, E>> = pending
        .par_iter()
        .map(|&i| evaluate_tap(f, x, &taps[i], settings.step))
        .collect();

    for (&i, result) in pending.iter().zip(evaluated) {
        contributions[i] = result?;
    }
    Ok(contributions)
}
