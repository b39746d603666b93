//! Derivative command implementation
//!
//! Estimates a derivative of a built-in function with a finite-difference
//! stencil and compares it with the analytic value.

use tracing::{debug, info, warn};

use super::{build_pool, estimate_builtin};
use crate::config::FiniteDifferenceConfig;
use crate::functions::BuiltinFunction;
use crate::Result;

/// Command-line overrides for the derivative command.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// Stencil name
    pub method: Option<String>,
    /// Step size
    pub step: Option<f64>,
    /// Concurrent (`Some(true)`) or sequential (`Some(false)`) evaluation
    pub concurrent: Option<bool>,
    /// Compute f(x) up front and pass it as the origin value
    pub origin_known: bool,
}

/// Apply command-line overrides on top of the loaded configuration.
pub fn resolve(base: &FiniteDifferenceConfig, overrides: &Overrides) -> FiniteDifferenceConfig {
    let mut config = base.clone();
    if let Some(method) = &overrides.method {
        config.method = method.clone();
    }
    if let Some(step) = overrides.step {
        config.step = step;
    }
    if let Some(concurrent) = overrides.concurrent {
        config.concurrent = concurrent;
    }
    config
}

/// Run the derivative command
pub fn run(
    base: &FiniteDifferenceConfig,
    function: BuiltinFunction,
    x: f64,
    overrides: &Overrides,
) -> Result<()> {
    let config = resolve(base, overrides);
    let stencil = config.stencil()?;
    let mut settings = config.eval_settings()?;

    info!("Estimating derivative...");
    info!("  Function: {}", function.name());
    info!("  Point: {}", x);
    info!("  Method: {} (order {})", stencil, stencil.order());
    info!("  Step: {:e}", settings.step);
    info!("  Concurrent: {}", settings.concurrent);

    if overrides.origin_known {
        let origin = function.evaluate(x)?;
        debug!("Using cached f(x) = {}", origin);
        settings = settings.with_origin_value(origin);
    }
    debug!(
        "{} evaluations of f required",
        stencil.evaluations_required(settings.origin_value.is_some())
    );

    let pool = build_pool(&config)?;
    let estimate = estimate_builtin(function, x, &stencil, &settings, pool.as_ref())?;
    println!("{}", estimate);

    match function.derivative(x, stencil.order()) {
        Some(exact) => {
            let error = (estimate - exact).abs();
            info!("Analytic value: {} (abs error {:e})", exact, error);
        }
        None => warn!(
            "No analytic derivative of order {} for {}",
            stencil.order(),
            function.name()
        ),
    }

    info!("Derivative estimate complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CliError;

    #[test]
    fn test_resolve_overrides() {
        let base = FiniteDifferenceConfig::default();
        let overrides = Overrides {
            method: Some("backward".to_string()),
            step: Some(1e-3),
            concurrent: Some(true),
            origin_known: false,
        };
        let config = resolve(&base, &overrides);
        assert_eq!(config.method, "backward");
        assert_eq!(config.step, 1e-3);
        assert!(config.concurrent);
    }

    #[test]
    fn test_resolve_keeps_config_when_no_overrides() {
        let base = FiniteDifferenceConfig {
            concurrent: true,
            ..Default::default()
        };
        let config = resolve(&base, &Overrides::default());
        assert_eq!(config, base);
    }

    #[test]
    fn test_resolve_turns_concurrency_off() {
        let base = FiniteDifferenceConfig {
            concurrent: true,
            threads: 4,
            ..Default::default()
        };
        let overrides = Overrides {
            concurrent: Some(false),
            ..Default::default()
        };
        let config = resolve(&base, &overrides);
        assert!(!config.concurrent);
        assert!(build_pool(&config).unwrap().is_none());
    }

    #[test]
    fn test_run_succeeds() {
        let overrides = Overrides {
            origin_known: true,
            ..Default::default()
        };
        run(&FiniteDifferenceConfig::default(), BuiltinFunction::Exp, 0.5, &overrides).unwrap();
    }

    #[test]
    fn test_run_propagates_domain_error() {
        let overrides = Overrides {
            method: Some("backward".to_string()),
            step: Some(0.5),
            ..Default::default()
        };
        let err = run(&FiniteDifferenceConfig::default(), BuiltinFunction::Ln, 0.25, &overrides)
            .unwrap_err();
        assert!(matches!(err, CliError::Domain { .. }));
    }

    #[test]
    fn test_run_on_dedicated_pool() {
        let base = FiniteDifferenceConfig {
            threads: 2,
            concurrent: true,
            ..Default::default()
        };
        run(&base, BuiltinFunction::Sin, 1.0, &Overrides::default()).unwrap();
    }

    #[test]
    fn test_run_rejects_unknown_method() {
        let overrides = Overrides {
            method: Some("five-point".to_string()),
            ..Default::default()
        };
        let err = run(&FiniteDifferenceConfig::default(), BuiltinFunction::Sin, 0.0, &overrides)
            .unwrap_err();
        assert!(matches!(err, CliError::Estimation(_)));
    }
}
