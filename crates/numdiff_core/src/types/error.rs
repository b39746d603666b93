//! Error types for structured error handling.
//!
//! This module provides [`DifferentiationError`], the single error type
//! returned by the finite-difference evaluator and the scattered gradient
//! estimator.

use thiserror::Error;

/// Categorised estimation errors.
///
/// Every failure aborts the estimate; no variant is ever converted into a
/// defaulted or clamped numeric result.
///
/// # Variants
/// - `InvalidArgument`: Malformed settings or stencil
/// - `DimensionMismatch`: Location or output length disagrees with the query
/// - `InvalidWeight`: Weight undefined, negative, NaN or infinite
/// - `SingularSystem`: Weighted design matrix is rank-deficient
/// - `Evaluation`: Caller-supplied function or solver backend failed
///
/// # Examples
/// ```
/// use numdiff_core::types::DifferentiationError;
///
/// let err = DifferentiationError::DimensionMismatch { expected: 2, got: 3 };
/// assert_eq!(format!("{}", err), "Dimension mismatch: expected 2, got 3");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DifferentiationError {
    /// Invalid settings, stencil or parameter.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A vector length disagrees with the query dimension.
    #[error("Dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Query dimension
        expected: usize,
        /// Offending length
        got: usize,
    },

    /// The locality weight of a sample cannot be used.
    #[error("Invalid weight for sample {index}: {reason}")]
    InvalidWeight {
        /// Index of the offending sample
        index: usize,
        /// Why the weight was rejected
        reason: String,
    },

    /// The weighted least-squares system does not determine every unknown.
    #[error("Singular system: rank {rank} is below the {unknowns} unknowns")]
    SingularSystem {
        /// Numerical rank of the weighted design matrix
        rank: usize,
        /// Number of unknowns in the fit
        unknowns: usize,
    },

    /// Failure reported by a caller-supplied function or the solver.
    #[error("Evaluation failed: {0}")]
    Evaluation(String),
}

impl DifferentiationError {
    /// Create an invalid argument error from any message.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Create an invalid weight error for the sample at `index`.
    pub fn invalid_weight(index: usize, reason: impl Into<String>) -> Self {
        Self::InvalidWeight {
            index,
            reason: reason.into(),
        }
    }
}
