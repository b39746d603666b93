//! Dense least-squares backend.
//!
//! Solves the rectangular system `A β ≈ b` in the least-squares sense with a
//! singular value decomposition from nalgebra. The numerical rank is checked
//! against the number of unknowns first: a rank-deficient design is reported
//! as `SingularSystem`, never answered with a minimum-norm solution.

use nalgebra::{DMatrix, DVector};

use crate::types::DifferentiationError;

/// Singular values below this fraction of the largest one count as zero.
const RANK_TOLERANCE: f64 = 1e-12;

/// Numerical rank of a matrix from its singular values.
///
/// Counts singular values above `RANK_TOLERANCE * σ_max`.
pub(crate) fn numerical_rank(singular_values: &[f64]) -> usize {
    let sigma_max = singular_values.iter().cloned().fold(0.0_f64, f64::max);
    if sigma_max == 0.0 {
        return 0;
    }
    let cutoff = RANK_TOLERANCE * sigma_max;
    singular_values.iter().filter(|&&s| s > cutoff).count()
}

/// Least-squares solution of `a β ≈ b`.
///
/// `a` is `rows × cols` in row-major order.
pub(crate) fn solve_least_squares(
    a: &[f64],
    b: &[f64],
    rows: usize,
    cols: usize,
) -> Result<Vec<f64>, DifferentiationError> {
    debug_assert_eq!(a.len(), rows * cols);
    debug_assert_eq!(b.len(), rows);

    if rows < cols {
        return Err(DifferentiationError::SingularSystem {
            rank: rows,
            unknowns: cols,
        });
    }

    let matrix = DMatrix::from_row_slice(rows, cols, a);
    let rhs = DVector::from_column_slice(b);

    let svd = matrix.svd(true, true);
    let rank = numerical_rank(svd.singular_values.as_slice());
    if rank < cols {
        return Err(DifferentiationError::SingularSystem {
            rank,
            unknowns: cols,
        });
    }

    let sigma_max = svd.singular_values.iter().cloned().fold(0.0_f64, f64::max);
    let eps = RANK_TOLERANCE * sigma_max;
    svd.solve(&rhs, eps)
        .map(|solution| solution.as_slice().to_vec())
        .map_err(|msg| DifferentiationError::Evaluation(format!("least-squares solve: {}", msg)))
}
