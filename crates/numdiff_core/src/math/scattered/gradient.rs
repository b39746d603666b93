//! Weighted least-squares gradient from scattered samples.

use super::linalg::solve_least_squares;
use super::WeightFunction;
use crate::types::{DifferentiationError, InterceptConstraint, NeighborSample};

/// Estimate the gradient at `query` by fitting a weighted plane to `samples`.
///
/// Each sample is weighted by `weighter.weight(query, location)`. The fit
/// minimises `Σ wᵢ (rᵢ · β - bᵢ)²` where
///
/// - with a forced intercept, `rᵢ = locationᵢ - query` and
///   `bᵢ = valueᵢ - intercept.value` (the plane passes through
///   `intercept.value` at the query);
/// - otherwise `rᵢ = [locationᵢ, 1]` and `bᵢ = valueᵢ`, so the constant term
///   is solved for together with the gradient.
///
/// # Arguments
///
/// * `query` - Point at which the gradient is wanted
/// * `samples` - Neighbouring function values
/// * `weighter` - Locality weight
/// * `intercept` - Whether the fit is pinned at the query
///
/// # Returns
///
/// * `Ok(gradient)` - One partial derivative per query dimension
/// * `Err(DimensionMismatch)` - A sample location has the wrong length
/// * `Err(InvalidWeight)` - A weight is undefined, negative or not finite
/// * `Err(SingularSystem)` - Too few or degenerate samples
///
/// # Example
///
/// ```
/// use numdiff_core::math::scattered::{estimate_gradient, SquaredExponential};
/// use numdiff_core::types::{InterceptConstraint, NeighborSample};
///
/// // f(x, y) = 2 + 3x - y, fitted through f(query) = 2
/// let f = |x: f64, y: f64| 2.0 + 3.0 * x - y;
/// let samples: Vec<NeighborSample> = [(0.1, 0.0), (0.0, 0.1), (-0.1, 0.05)]
///     .iter()
///     .map(|&(x, y)| NeighborSample::new(vec![x, y], f(x, y)))
///     .collect();
///
/// let kernel = SquaredExponential::new(0.2).unwrap();
/// let grad = estimate_gradient(&[0.0, 0.0], &samples, &kernel, InterceptConstraint::forced(2.0)).unwrap();
/// assert!((grad[0] - 3.0).abs() < 1e-10);
/// assert!((grad[1] + 1.0).abs() < 1e-10);
/// ```
pub fn estimate_gradient<W>(
    query: &[f64],
    samples: &[NeighborSample],
    weighter: &W,
    intercept: InterceptConstraint,
) -> Result<Vec<f64>, DifferentiationError>
where
    W: WeightFunction + ?Sized,
{
    let mut gradient = vec![0.0; query.len()];
    estimate_gradient_into(query, samples, weighter, intercept, &mut gradient)?;
    Ok(gradient)
}

/// [`estimate_gradient`] writing into a caller-provided buffer.
///
/// `gradient` must have the same length as `query`; it is left untouched
/// on error.
pub fn estimate_gradient_into<W>(
    query: &[f64],
    samples: &[NeighborSample],
    weighter: &W,
    intercept: InterceptConstraint,
    gradient: &mut [f64],
) -> Result<(), DifferentiationError>
where
    W: WeightFunction + ?Sized,
{
    let dim = query.len();
    if dim == 0 {
        return Err(DifferentiationError::invalid_argument(
            "query must have at least one dimension",
        ));
    }
    if gradient.len() != dim {
        return Err(DifferentiationError::DimensionMismatch {
            expected: dim,
            got: gradient.len(),
        });
    }
    if let Some(sample) = samples.iter().find(|s| s.dimension() != dim) {
        return Err(DifferentiationError::DimensionMismatch {
            expected: dim,
            got: sample.dimension(),
        });
    }

    let system = WeightedSystem::assemble(query, samples, weighter, intercept)?;
    let beta = solve_least_squares(&system.design, &system.rhs, samples.len(), system.unknowns)?;

    gradient.copy_from_slice(&beta[..dim]);
    Ok(())
}

/// Slope of a one-dimensional function at `x` from scattered `(location, value)` pairs.
///
/// # Example
///
/// ```
/// use numdiff_core::math::scattered::{estimate_slope, InverseSquaredDistance};
/// use numdiff_core::types::InterceptConstraint;
///
/// let samples = [(0.5, 2.0), (1.5, 4.0), (3.0, 7.0)];
/// let slope = estimate_slope(1.0, &samples, &InverseSquaredDistance, InterceptConstraint::free()).unwrap();
/// assert!((slope - 2.0).abs() < 1e-10);
/// ```
pub fn estimate_slope<W>(
    x: f64,
    samples: &[(f64, f64)],
    weighter: &W,
    intercept: InterceptConstraint,
) -> Result<f64, DifferentiationError>
where
    W: WeightFunction + ?Sized,
{
    let samples: Vec<NeighborSample> = samples
        .iter()
        .map(|&(location, value)| NeighborSample::new(vec![location], value))
        .collect();
    let mut slope = [0.0];
    estimate_gradient_into(&[x], &samples, weighter, intercept, &mut slope)?;
    Ok(slope[0])
}

/// Row-scaled design matrix and right-hand side.
struct WeightedSystem {
    /// Row-major, `samples × unknowns`
    design: Vec<f64>,
    rhs: Vec<f64>,
    unknowns: usize,
}

impl WeightedSystem {
    fn assemble<W>(
        query: &[f64],
        samples: &[NeighborSample],
        weighter: &W,
        intercept: InterceptConstraint,
    ) -> Result<Self, DifferentiationError>
    where
        W: WeightFunction + ?Sized,
    {
        let unknowns = if intercept.forced {
            query.len()
        } else {
            query.len() + 1
        };
        let mut design = Vec::with_capacity(samples.len() * unknowns);
        let mut rhs = Vec::with_capacity(samples.len());

        for (index, sample) in samples.iter().enumerate() {
            if !sample.value.is_finite() || sample.location.iter().any(|c| !c.is_finite()) {
                return Err(DifferentiationError::invalid_argument(format!(
                    "sample {} has a non-finite location or value",
                    index
                )));
            }

            let weight = checked_weight(weighter, query, sample, index)?;
            // Scaling by √w makes the squared residual carry weight w.
            let scale = weight.sqrt();

            if intercept.forced {
                design.extend(
                    sample
                        .location
                        .iter()
                        .zip(query)
                        .map(|(l, q)| scale * (l - q)),
                );
                rhs.push(scale * (sample.value - intercept.value));
            } else {
                design.extend(sample.location.iter().map(|l| scale * l));
                design.push(scale);
                rhs.push(scale * sample.value);
            }
        }

        Ok(Self {
            design,
            rhs,
            unknowns,
        })
    }
}

fn checked_weight<W>(
    weighter: &W,
    query: &[f64],
    sample: &NeighborSample,
    index: usize,
) -> Result<f64, DifferentiationError>
where
    W: WeightFunction + ?Sized,
{
    let weight = weighter.weight(query, &sample.location).ok_or_else(|| {
        DifferentiationError::invalid_weight(index, "weight is undefined for this sample")
    })?;
    if weight.is_nan() || weight.is_infinite() || weight < 0.0 {
        return Err(DifferentiationError::invalid_weight(
            index,
            format!("weight {} is not a finite non-negative number", weight),
        ));
    }
    Ok(weight)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::scattered::{InverseSquaredDistance, SquaredExponential, Uniform};
    use approx::assert_relative_eq;

    fn plane(a: f64, b: f64, c: f64, points: &[(f64, f64)]) -> Vec<NeighborSample> {
        points
            .iter()
            .map(|&(x, y)| NeighborSample::new(vec![x, y], a + b * x + c * y))
            .collect()
    }

    /// Weights looked up by the first coordinate of the neighbour.
    struct Table(Vec<(f64, f64)>);

    impl WeightFunction for Table {
        fn weight(&self, _query: &[f64], neighbor: &[f64]) -> Option<f64> {
            self.0
                .iter()
                .find(|(x, _)| *x == neighbor[0])
                .map(|(_, w)| *w)
        }
    }

    #[test]
    fn test_uniform_free_intercept_recovers_plane() {
        let samples = plane(5.0, 1.5, -2.0, &[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)]);
        let grad = estimate_gradient(&[0.3, 0.3], &samples, &Uniform, InterceptConstraint::free())
            .unwrap();
        assert_relative_eq!(grad[0], 1.5, epsilon = 1e-10);
        assert_relative_eq!(grad[1], -2.0, epsilon = 1e-10);
    }

    #[test]
    fn test_forced_intercept_matches_free_on_plane() {
        let (a, b, c) = (-1.0, 0.25, 4.0);
        let samples = plane(a, b, c, &[(1.0, 1.0), (2.0, 1.5), (0.5, 3.0), (1.2, 2.2)]);
        let query = [1.0, 2.0];
        let at_query = a + b * query[0] + c * query[1];

        let free = estimate_gradient(&query, &samples, &Uniform, InterceptConstraint::free())
            .unwrap();
        let forced = estimate_gradient(
            &query,
            &samples,
            &Uniform,
            InterceptConstraint::forced(at_query),
        )
        .unwrap();

        for i in 0..2 {
            assert_relative_eq!(free[i], forced[i], epsilon = 1e-10);
        }
        assert_relative_eq!(forced[0], b, epsilon = 1e-10);
        assert_relative_eq!(forced[1], c, epsilon = 1e-10);
    }

    #[test]
    fn test_forced_intercept_needs_only_d_samples() {
        let samples = plane(0.0, 2.0, 3.0, &[(1.0, 0.0), (0.0, 1.0)]);
        let grad = estimate_gradient(
            &[0.0, 0.0],
            &samples,
            &Uniform,
            InterceptConstraint::forced(0.0),
        )
        .unwrap();
        assert_relative_eq!(grad[0], 2.0, epsilon = 1e-12);
        assert_relative_eq!(grad[1], 3.0, epsilon = 1e-12);

        // Without the constraint the constant term is a third unknown
        let err = estimate_gradient(&[0.0, 0.0], &samples, &Uniform, InterceptConstraint::free())
            .unwrap_err();
        assert!(matches!(
            err,
            DifferentiationError::SingularSystem { unknowns: 3, .. }
        ));
    }

    #[test]
    fn test_weighted_objective() {
        // Forced through 0 at 0: β = Σ w x y / Σ w x²
        let samples = vec![
            NeighborSample::new(vec![1.0], 1.0),
            NeighborSample::new(vec![2.0], 6.0),
        ];
        let weights = Table(vec![(1.0, 4.0), (2.0, 1.0)]);
        let grad =
            estimate_gradient(&[0.0], &samples, &weights, InterceptConstraint::forced(0.0))
                .unwrap();
        let expected = (4.0 * 1.0 * 1.0 + 1.0 * 2.0 * 6.0) / (4.0 * 1.0 + 1.0 * 4.0);
        assert_relative_eq!(grad[0], expected, epsilon = 1e-12);
    }

    #[test]
    fn test_local_kernel_on_smooth_function() {
        // f = sin(x) + y², gradient at (0.5, -0.3) is (cos 0.5, -0.6)
        let query = [0.5, -0.3];
        let mut samples = Vec::new();
        for i in -2..=2 {
            for j in -2..=2 {
                let x = query[0] + 1e-3 * i as f64;
                let y = query[1] + 1e-3 * j as f64;
                samples.push(NeighborSample::new(vec![x, y], x.sin() + y * y));
            }
        }
        let kernel = SquaredExponential::new(2e-3).unwrap();
        let grad = estimate_gradient(&query, &samples, &kernel, InterceptConstraint::free())
            .unwrap();
        assert_relative_eq!(grad[0], 0.5_f64.cos(), epsilon = 1e-5);
        assert_relative_eq!(grad[1], -0.6, epsilon = 1e-5);
    }

    #[test]
    fn test_dimension_mismatch() {
        let samples = vec![
            NeighborSample::new(vec![1.0, 0.0], 1.0),
            NeighborSample::new(vec![0.0, 1.0, 2.0], 1.0),
        ];
        let err = estimate_gradient(&[0.0, 0.0], &samples, &Uniform, InterceptConstraint::free())
            .unwrap_err();
        assert_eq!(
            err,
            DifferentiationError::DimensionMismatch {
                expected: 2,
                got: 3
            }
        );
    }

    #[test]
    fn test_output_length_mismatch() {
        let samples = plane(0.0, 1.0, 1.0, &[(1.0, 0.0), (0.0, 1.0), (1.0, 1.0)]);
        let mut out = [0.0; 3];
        let err = estimate_gradient_into(
            &[0.0, 0.0],
            &samples,
            &Uniform,
            InterceptConstraint::free(),
            &mut out,
        )
        .unwrap_err();
        assert!(matches!(err, DifferentiationError::DimensionMismatch { .. }));
        assert_eq!(out, [0.0; 3]);
    }

    #[test]
    fn test_into_buffer() {
        let samples = plane(1.0, -1.0, 0.5, &[(1.0, 0.0), (0.0, 1.0), (1.0, 1.0)]);
        let mut out = [0.0; 2];
        estimate_gradient_into(
            &[0.0, 0.0],
            &samples,
            &Uniform,
            InterceptConstraint::free(),
            &mut out,
        )
        .unwrap();
        assert_relative_eq!(out[0], -1.0, epsilon = 1e-10);
        assert_relative_eq!(out[1], 0.5, epsilon = 1e-10);
    }

    #[test]
    fn test_inverse_squared_distance_rejects_coincident_sample() {
        let samples = plane(0.0, 1.0, 1.0, &[(1.0, 0.0), (0.0, 0.0), (0.0, 1.0)]);
        let err = estimate_gradient(
            &[0.0, 0.0],
            &samples,
            &InverseSquaredDistance,
            InterceptConstraint::free(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            DifferentiationError::InvalidWeight { index: 1, .. }
        ));
    }

    #[test]
    fn test_negative_and_nan_weights_rejected() {
        let samples = vec![
            NeighborSample::new(vec![1.0], 1.0),
            NeighborSample::new(vec![2.0], 2.0),
        ];
        let negative = Table(vec![(1.0, 1.0), (2.0, -0.5)]);
        let err = estimate_gradient(&[0.0], &samples, &negative, InterceptConstraint::free())
            .unwrap_err();
        assert!(matches!(
            err,
            DifferentiationError::InvalidWeight { index: 1, .. }
        ));

        let nan = Table(vec![(1.0, f64::NAN), (2.0, 1.0)]);
        let err =
            estimate_gradient(&[0.0], &samples, &nan, InterceptConstraint::free()).unwrap_err();
        assert!(matches!(
            err,
            DifferentiationError::InvalidWeight { index: 0, .. }
        ));

        let infinite = Table(vec![(1.0, 1.0), (2.0, f64::INFINITY)]);
        assert!(
            estimate_gradient(&[0.0], &samples, &infinite, InterceptConstraint::free()).is_err()
        );
    }

    #[test]
    fn test_collinear_samples_singular() {
        let samples = plane(0.0, 1.0, 1.0, &[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (3.0, 3.0)]);
        let err = estimate_gradient(&[0.0, 0.0], &samples, &Uniform, InterceptConstraint::free())
            .unwrap_err();
        assert!(matches!(err, DifferentiationError::SingularSystem { .. }));
    }

    #[test]
    fn test_no_samples_singular() {
        let err = estimate_gradient(&[0.0], &[], &Uniform, InterceptConstraint::forced(1.0))
            .unwrap_err();
        assert_eq!(
            err,
            DifferentiationError::SingularSystem {
                rank: 0,
                unknowns: 1
            }
        );
    }

    #[test]
    fn test_empty_query_rejected() {
        let err = estimate_gradient(&[], &[], &Uniform, InterceptConstraint::free()).unwrap_err();
        assert!(matches!(err, DifferentiationError::InvalidArgument(_)));
    }

    #[test]
    fn test_non_finite_sample_rejected() {
        let samples = vec![
            NeighborSample::new(vec![1.0], f64::NAN),
            NeighborSample::new(vec![2.0], 2.0),
        ];
        let err =
            estimate_gradient(&[0.0], &samples, &Uniform, InterceptConstraint::free()).unwrap_err();
        assert!(matches!(err, DifferentiationError::InvalidArgument(_)));
    }

    #[test]
    fn test_estimate_slope() {
        let samples = [(1.0, 3.0), (2.0, 5.0), (4.0, 9.0)];
        let slope = estimate_slope(0.0, &samples, &Uniform, InterceptConstraint::free()).unwrap();
        assert_relative_eq!(slope, 2.0, epsilon = 1e-12);
        let forced =
            estimate_slope(0.0, &samples, &Uniform, InterceptConstraint::forced(1.0)).unwrap();
        assert_relative_eq!(forced, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_dyn_weighter() {
        let samples = plane(0.0, 1.0, -1.0, &[(1.0, 0.0), (0.0, 1.0), (1.0, 1.0)]);
        let weighter: &dyn WeightFunction = &InverseSquaredDistance;
        let grad = estimate_gradient(&[0.0, 0.0], &samples, weighter, InterceptConstraint::free())
            .unwrap();
        assert_relative_eq!(grad[0], 1.0, epsilon = 1e-10);
        assert_relative_eq!(grad[1], -1.0, epsilon = 1e-10);
    }
}
