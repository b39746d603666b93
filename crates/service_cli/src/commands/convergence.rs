//! Convergence command implementation
//!
//! Halves the step size repeatedly and reports, for every built-in stencil,
//! the absolute error against the analytic derivative and the ratio of
//! successive errors (≈2 for first-order, ≈4 for second-order formulas).

use numdiff_core::math::finite_difference::{EvalSettings, Stencil};
use tracing::{info, warn};

use super::{build_pool, estimate_builtin};
use crate::config::FiniteDifferenceConfig;
use crate::functions::BuiltinFunction;
use crate::{CliError, Result};

/// One row of the convergence table.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvergenceRow {
    /// Stencil name
    pub method: String,
    /// Step size
    pub step: f64,
    /// Absolute error against the analytic derivative
    pub error: f64,
    /// Error at the previous (twice larger) step divided by this error
    pub ratio: Option<f64>,
}

/// Compute the convergence table.
pub fn table(
    config: &FiniteDifferenceConfig,
    function: BuiltinFunction,
    x: f64,
    initial_step: f64,
    levels: usize,
) -> Result<Vec<ConvergenceRow>> {
    if levels == 0 {
        return Err(CliError::InvalidArgument(
            "levels must be at least 1".to_string(),
        ));
    }

    let pool = build_pool(config)?;
    let mut rows = Vec::with_capacity(4 * levels);
    for stencil in [
        Stencil::FORWARD,
        Stencil::BACKWARD,
        Stencil::CENTRAL,
        Stencil::CENTRAL_2ND,
    ] {
        let Some(exact) = function.derivative(x, stencil.order()) else {
            warn!("Skipping {}: no analytic derivative", stencil);
            continue;
        };

        let mut previous: Option<f64> = None;
        let mut step = initial_step;
        for _ in 0..levels {
            let settings = EvalSettings::new(step)?.with_concurrent(config.concurrent);
            let estimate = estimate_builtin(function, x, &stencil, &settings, pool.as_ref())?;
            let error = (estimate - exact).abs();
            rows.push(ConvergenceRow {
                method: stencil.to_string(),
                step,
                error,
                ratio: previous.map(|p| p / error),
            });
            previous = Some(error);
            step /= 2.0;
        }
    }
    Ok(rows)
}

/// Run the convergence command
pub fn run(
    config: &FiniteDifferenceConfig,
    function: BuiltinFunction,
    x: f64,
    initial_step: f64,
    levels: usize,
) -> Result<()> {
    info!(
        "Convergence study for {} at x = {} ({} levels from h = {:e})",
        function.name(),
        x,
        levels,
        initial_step
    );

    let rows = table(config, function, x, initial_step, levels)?;

    println!("{:<12} {:>12} {:>14} {:>8}", "method", "step", "abs error", "ratio");
    for row in &rows {
        let ratio = row
            .ratio
            .map(|r| format!("{:.3}", r))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<12} {:>12.4e} {:>14.6e} {:>8}",
            row.method, row.step, row.error, ratio
        );
    }

    info!("Convergence study complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orders_of_accuracy_on_sin() {
        let rows = table(
            &FiniteDifferenceConfig::default(),
            BuiltinFunction::Sin,
            1.0,
            0.1,
            3,
        )
        .unwrap();
        assert_eq!(rows.len(), 12);

        for row in rows.iter().filter(|r| r.ratio.is_some()) {
            let ratio = row.ratio.unwrap();
            match row.method.as_str() {
                "forward" | "backward" => assert!((1.8..2.2).contains(&ratio), "{:?}", row),
                "central" | "central2nd" => assert!((3.5..4.5).contains(&ratio), "{:?}", row),
                other => panic!("unexpected method {}", other),
            }
        }
    }

    #[test]
    fn test_table_on_dedicated_pool() {
        let config = FiniteDifferenceConfig {
            concurrent: true,
            threads: 2,
            ..Default::default()
        };
        let pooled = table(&config, BuiltinFunction::Exp, 0.5, 0.1, 2).unwrap();
        let sequential =
            table(&FiniteDifferenceConfig::default(), BuiltinFunction::Exp, 0.5, 0.1, 2).unwrap();
        assert_eq!(pooled, sequential);
    }

    #[test]
    fn test_zero_levels_rejected() {
        let err = table(
            &FiniteDifferenceConfig::default(),
            BuiltinFunction::Sin,
            1.0,
            0.1,
            0,
        )
        .unwrap_err();
        assert!(matches!(err, CliError::InvalidArgument(_)));
    }
}
