//! Evaluation settings for the finite-difference evaluator.

use crate::types::DifferentiationError;

/// Settings for one finite-difference estimate.
///
/// # Example
///
/// ```
/// use numdiff_core::math::finite_difference::EvalSettings;
///
/// // Default: step 1e-6, f(x) unknown, sequential
/// let settings = EvalSettings::default();
/// assert_eq!(settings.step, 1e-6);
///
/// // f(x) already computed by the caller, taps evaluated concurrently
/// let settings = EvalSettings::new(1e-4)
///     .unwrap()
///     .with_origin_value(0.5)
///     .with_concurrent(true);
/// assert_eq!(settings.origin_value, Some(0.5));
/// assert!(settings.concurrent);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EvalSettings {
    /// Step size `h`. Must be finite and positive.
    pub step: f64,

    /// `f(x)` when the caller already knows it.
    ///
    /// The origin tap then uses this value instead of calling `f`.
    pub origin_value: Option<f64>,

    /// Evaluate the taps that need `f` in parallel.
    pub concurrent: bool,
}

impl Default for EvalSettings {
    /// Default values:
    /// - `step`: 1e-6
    /// - `origin_value`: None
    /// - `concurrent`: false
    fn default() -> Self {
        Self {
            step: 1e-6,
            origin_value: None,
            concurrent: false,
        }
    }
}

impl EvalSettings {
    /// Create sequential settings with the given step and no cached `f(x)`.
    ///
    /// # Errors
    ///
    /// Returns `DifferentiationError::InvalidArgument` if `step` is not
    /// finite and positive.
    pub fn new(step: f64) -> Result<Self, DifferentiationError> {
        let settings = Self {
            step,
            ..Default::default()
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Use `value` as `f(x)` for the origin tap.
    pub fn with_origin_value(mut self, value: f64) -> Self {
        self.origin_value = Some(value);
        self
    }

    /// Enable or disable concurrent evaluation.
    pub fn with_concurrent(mut self, concurrent: bool) -> Self {
        self.concurrent = concurrent;
        self
    }

    /// Check the step size.
    ///
    /// Fields are public, so the evaluator validates again before use.
    pub fn validate(&self) -> Result<(), DifferentiationError> {
        if !(self.step.is_finite() && self.step > 0.0) {
            return Err(DifferentiationError::invalid_argument(format!(
                "step must be finite and positive, got {}",
                self.step
            )));
        }
        Ok(())
    }
}
