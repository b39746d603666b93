//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

pub mod check;
pub mod convergence;
pub mod derivative;
pub mod gradient;

use numdiff_core::math::finite_difference::{try_estimate, try_estimate_in_pool, EvalSettings, Stencil};
use rayon::ThreadPool;

use crate::config::FiniteDifferenceConfig;
use crate::functions::BuiltinFunction;
use crate::Result;

/// Dedicated pool for concurrent evaluation, when `threads > 0`.
///
/// `None` means taps run on the rayon global pool (or sequentially).
pub(crate) fn build_pool(config: &FiniteDifferenceConfig) -> Result<Option<ThreadPool>> {
    if !config.concurrent || config.threads == 0 {
        return Ok(None);
    }
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()?;
    Ok(Some(pool))
}

/// Estimate a derivative of a built-in function, on `pool` when given.
pub(crate) fn estimate_builtin(
    function: BuiltinFunction,
    x: f64,
    stencil: &Stencil,
    settings: &EvalSettings,
    pool: Option<&ThreadPool>,
) -> Result<f64> {
    let f = move |t: f64| function.evaluate(t);
    match pool {
        Some(pool) => try_estimate_in_pool(pool, f, x, stencil, settings),
        None => try_estimate(f, x, stencil, settings),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_pool() {
        let sequential = FiniteDifferenceConfig {
            threads: 2,
            ..Default::default()
        };
        assert!(build_pool(&sequential).unwrap().is_none());

        let global = FiniteDifferenceConfig {
            concurrent: true,
            ..Default::default()
        };
        assert!(build_pool(&global).unwrap().is_none());

        let dedicated = FiniteDifferenceConfig {
            concurrent: true,
            threads: 2,
            ..Default::default()
        };
        let pool = build_pool(&dedicated).unwrap().unwrap();
        assert_eq!(pool.current_num_threads(), 2);
    }
}
