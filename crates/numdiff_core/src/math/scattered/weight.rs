//! Locality weights for the scattered least-squares fit.
//!
//! A weight function maps a (query, neighbour) pair of locations to a
//! non-negative weight. Weights that decay with distance turn the global
//! least-squares plane into a local, Taylor-style derivative estimate.
//!
//! ## Available Weights
//!
//! - [`Uniform`]: Constant 1 (ordinary least squares)
//! - [`InverseSquaredDistance`]: `1 / d²`, undefined at `d = 0`
//! - [`SquaredExponential`]: `exp(-(d / scale)²)`
//! - [`WeightKind`]: Runtime selection among the three

use num_traits::Float;

use crate::types::DifferentiationError;

/// Non-negative locality weight between two points.
///
/// Implementations must be symmetric in their arguments. `None` means the
/// weight is undefined for this pair; callers must reject it rather than
/// substitute a value.
///
/// # Example
///
/// ```
/// use numdiff_core::math::scattered::{SquaredExponential, WeightFunction};
///
/// let kernel = SquaredExponential::new(2.0).unwrap();
/// let w: f64 = kernel.weight(&[0.0, 0.0], &[0.0, 2.0]).unwrap();
/// assert!((w - (-1.0_f64).exp()).abs() < 1e-15);
/// ```
pub trait WeightFunction<T: Float = f64>: Send + Sync {
    /// Weight of `neighbor` when fitting at `query`.
    fn weight(&self, query: &[T], neighbor: &[T]) -> Option<T>;

    /// One-dimensional form of [`weight`](Self::weight).
    fn weight_scalar(&self, s: T, t: T) -> Option<T> {
        self.weight(&[s], &[t])
    }
}

/// Squared Euclidean distance between two points.
///
/// Coordinates beyond the shorter slice are ignored; callers check lengths.
#[inline]
pub fn squared_distance<T: Float>(a: &[T], b: &[T]) -> T {
    a.iter().zip(b).fold(T::zero(), |acc, (&x, &y)| {
        let d = x - y;
        acc + d * d
    })
}

/// Euclidean distance between two points.
#[inline]
pub fn euclidean_distance<T: Float>(a: &[T], b: &[T]) -> T {
    squared_distance(a, b).sqrt()
}

/// Every sample gets weight 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Uniform;

impl<T: Float> WeightFunction<T> for Uniform {
    #[inline]
    fn weight(&self, _query: &[T], _neighbor: &[T]) -> Option<T> {
        Some(T::one())
    }
}

/// Weight `1 / d²` with `d` the Euclidean distance.
///
/// Undefined when the neighbour coincides with the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InverseSquaredDistance;

impl<T: Float> WeightFunction<T> for InverseSquaredDistance {
    fn weight(&self, query: &[T], neighbor: &[T]) -> Option<T> {
        let d2 = squared_distance(query, neighbor);
        if d2 == T::zero() {
            return None;
        }
        Some(d2.recip())
    }
}

/// Gaussian kernel `exp(-(d / scale)²)`.
///
/// Equal to 1 at the query and decays towards 0 with distance; `scale` sets
/// the radius of the neighbourhood that effectively contributes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SquaredExponential {
    scale: f64,
}

impl SquaredExponential {
    /// Create a kernel with the given length scale.
    ///
    /// # Errors
    ///
    /// Returns `DifferentiationError::InvalidArgument` unless `scale` is
    /// finite and positive.
    pub fn new(scale: f64) -> Result<Self, DifferentiationError> {
        if !(scale.is_finite() && scale > 0.0) {
            return Err(DifferentiationError::invalid_argument(format!(
                "squared-exponential scale must be finite and positive, got {}",
                scale
            )));
        }
        Ok(Self { scale })
    }

    /// Length scale of the kernel.
    #[inline]
    pub fn scale(&self) -> f64 {
        self.scale
    }
}

impl<T: Float> WeightFunction<T> for SquaredExponential {
    fn weight(&self, query: &[T], neighbor: &[T]) -> Option<T> {
        let scale = T::from(self.scale)?;
        let norm2 = squared_distance(query, neighbor) / (scale * scale);
        Some((-norm2).exp())
    }
}

/// Weight function chosen at runtime.
///
/// # Example
///
/// ```
/// use numdiff_core::math::scattered::{WeightFunction, WeightKind};
///
/// let kind = WeightKind::from_name("inverse-squared-distance", None).unwrap();
/// assert_eq!(kind.weight(&[0.0_f64], &[2.0]), Some(0.25));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum WeightKind {
    /// See [`Uniform`]
    #[default]
    Uniform,
    /// See [`InverseSquaredDistance`]
    InverseSquaredDistance,
    /// See [`SquaredExponential`]
    SquaredExponential(SquaredExponential),
}

impl WeightKind {
    /// Select a weight by name.
    ///
    /// Accepted names: `uniform`, `inverse-squared-distance` (`inv-sq-dist`),
    /// `squared-exponential` (`sq-exp`). The squared exponential requires
    /// `scale`; the other kinds ignore it.
    pub fn from_name(name: &str, scale: Option<f64>) -> Result<Self, DifferentiationError> {
        match name.to_ascii_lowercase().replace('_', "-").as_str() {
            "uniform" => Ok(Self::Uniform),
            "inverse-squared-distance" | "inv-sq-dist" => Ok(Self::InverseSquaredDistance),
            "squared-exponential" | "sq-exp" => {
                let scale = scale.ok_or_else(|| {
                    DifferentiationError::invalid_argument(
                        "squared-exponential weight requires a scale",
                    )
                })?;
                Ok(Self::SquaredExponential(SquaredExponential::new(scale)?))
            }
            other => Err(DifferentiationError::invalid_argument(format!(
                "unknown weight '{}'. Supported: uniform, inverse-squared-distance, squared-exponential",
                other
            ))),
        }
    }

    /// Canonical name of the weight.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Uniform => "uniform",
            Self::InverseSquaredDistance => "inverse-squared-distance",
            Self::SquaredExponential(_) => "squared-exponential",
        }
    }
}

impl<T: Float> WeightFunction<T> for WeightKind {
    #[inline]
    fn weight(&self, query: &[T], neighbor: &[T]) -> Option<T> {
        match self {
            Self::Uniform => Uniform.weight(query, neighbor),
            Self::InverseSquaredDistance => InverseSquaredDistance.weight(query, neighbor),
            Self::SquaredExponential(kernel) => kernel.weight(query, neighbor),
        }
    }
}
