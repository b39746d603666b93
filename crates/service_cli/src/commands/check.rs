//! Check command implementation
//!
//! Prints the resolved configuration and runs a short self-test of both
//! estimators.

use numdiff_core::math::finite_difference::{estimate, EvalSettings, Stencil};
use numdiff_core::math::scattered::estimate_gradient;
use numdiff_core::types::{InterceptConstraint, NeighborSample};
use tracing::{error, info};

use crate::config::Settings;
use crate::{CliError, Result};

/// Run the check command
pub fn run(settings: &Settings) -> Result<()> {
    info!("Checking numdiff configuration...");

    let fd = &settings.finite_difference;
    let stencil = fd.stencil()?;
    let eval = fd.eval_settings()?;
    let weight = settings.scattered.weight_kind()?;

    println!("finite_difference.method     = {}", stencil);
    println!("finite_difference.step       = {:e}", eval.step);
    println!("finite_difference.concurrent = {}", eval.concurrent);
    println!("finite_difference.threads    = {}", fd.threads);
    println!("scattered.weight             = {}", weight.name());
    if let Some(scale) = settings.scattered.scale {
        println!("scattered.scale              = {}", scale);
    }

    self_test()?;
    println!("self-test                    = ok");
    info!("Check complete");
    Ok(())
}

/// Verify both estimators on problems with known answers.
pub fn self_test() -> Result<()> {
    let settings = EvalSettings::new(1e-5)?.with_concurrent(true);
    let d = estimate(f64::sin, 0.0, &Stencil::CENTRAL, &settings)?;
    if (d - 1.0).abs() > 1e-8 {
        error!("Central difference self-test failed: {}", d);
        return Err(CliError::InvalidArgument(format!(
            "finite-difference self-test returned {}",
            d
        )));
    }

    let samples = vec![
        NeighborSample::new(vec![1.0, 0.0], 2.0),
        NeighborSample::new(vec![0.0, 1.0], -1.0),
        NeighborSample::new(vec![-1.0, -1.0], -1.0),
    ];
    let grad = estimate_gradient(
        &[0.0, 0.0],
        &samples,
        &numdiff_core::math::scattered::Uniform,
        InterceptConstraint::forced(0.0),
    )?;
    if (grad[0] - 2.0).abs() > 1e-10 || (grad[1] + 1.0).abs() > 1e-10 {
        error!("Scattered gradient self-test failed: {:?}", grad);
        return Err(CliError::InvalidArgument(format!(
            "scattered self-test returned {:?}",
            grad
        )));
    }
    Ok(())
}
