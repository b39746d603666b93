//! Scattered sample types.

/// A function value observed at a location near the query point.
///
/// The locality weight is not stored: it is derived from the query and the
/// location by a [`WeightFunction`](crate::math::scattered::WeightFunction)
/// when the gradient is estimated.
///
/// # Examples
/// ```
/// use numdiff_core::types::NeighborSample;
///
/// let sample = NeighborSample::new(vec![1.0, 2.0], 5.0);
/// assert_eq!(sample.dimension(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NeighborSample {
    /// Sample location, one coordinate per query dimension
    pub location: Vec<f64>,
    /// Function value at `location`
    pub value: f64,
}

impl NeighborSample {
    /// Create a sample at `location` with function value `value`.
    pub fn new(location: Vec<f64>, value: f64) -> Self {
        Self { location, value }
    }

    /// Number of coordinates in the sample location.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.location.len()
    }
}

/// Constraint on the constant term of the local linear fit.
///
/// When `forced` is true the fitted plane passes through `value` at the
/// query location and only the gradient is solved for. Otherwise the
/// constant term is estimated jointly with the gradient.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InterceptConstraint {
    /// Pin the fit to `value` at the query location
    pub forced: bool,
    /// Function value at the query location (used only when `forced`)
    pub value: f64,
}

impl InterceptConstraint {
    /// Estimate the intercept together with the gradient.
    pub fn free() -> Self {
        Self {
            forced: false,
            value: 0.0,
        }
    }

    /// Force the fit through `value` at the query location.
    pub fn forced(value: f64) -> Self {
        Self {
            forced: true,
            value,
        }
    }
}
