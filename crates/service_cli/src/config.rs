//! Layered CLI settings.
//!
//! Configuration is loaded in the following order (later sources override
//! earlier):
//! 1. Built-in defaults
//! 2. The TOML file given by `--config` (optional, default `numdiff.toml`)
//! 3. Environment variables prefixed with `NUMDIFF__`, e.g.
//!    `NUMDIFF__FINITE_DIFFERENCE__STEP=1e-4`
//!
//! Command-line flags override all of these.

use config::{Config, Environment, File};
use numdiff_core::math::finite_difference::{EvalSettings, Stencil};
use numdiff_core::math::scattered::WeightKind;
use serde::Deserialize;

use crate::Result;

/// Main application settings.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct Settings {
    /// Finite-difference defaults
    #[serde(default)]
    pub finite_difference: FiniteDifferenceConfig,
    /// Scattered gradient defaults
    #[serde(default)]
    pub scattered: ScatteredConfig,
}

impl Settings {
    /// Load settings from `path` (if it exists) and the environment.
    pub fn load(path: &str) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(Environment::with_prefix("NUMDIFF").separator("__"))
            .build()?;

        let settings: Settings = config.try_deserialize()?;
        Ok(settings)
    }
}

/// Finite-difference configuration.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct FiniteDifferenceConfig {
    /// Step size
    #[serde(default = "default_step")]
    pub step: f64,
    /// Stencil name (forward, backward, central, central2nd)
    #[serde(default = "default_method")]
    pub method: String,
    /// Evaluate taps concurrently
    #[serde(default)]
    pub concurrent: bool,
    /// Worker threads for concurrent evaluation (0 = rayon global pool)
    #[serde(default)]
    pub threads: usize,
}

impl Default for FiniteDifferenceConfig {
    fn default() -> Self {
        Self {
            step: default_step(),
            method: default_method(),
            concurrent: false,
            threads: 0,
        }
    }
}

impl FiniteDifferenceConfig {
    /// Resolve the configured stencil.
    pub fn stencil(&self) -> Result<Stencil> {
        Ok(self.method.parse::<Stencil>()?)
    }

    /// Resolve core evaluation settings.
    pub fn eval_settings(&self) -> Result<EvalSettings> {
        Ok(EvalSettings::new(self.step)?.with_concurrent(self.concurrent))
    }
}

fn default_step() -> f64 {
    EvalSettings::default().step
}

fn default_method() -> String {
    "central".to_string()
}

/// Scattered gradient configuration.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ScatteredConfig {
    /// Weight name (uniform, inverse-squared-distance, squared-exponential)
    #[serde(default = "default_weight")]
    pub weight: String,
    /// Length scale for the squared-exponential weight
    #[serde(default)]
    pub scale: Option<f64>,
}

impl Default for ScatteredConfig {
    fn default() -> Self {
        Self {
            weight: default_weight(),
            scale: None,
        }
    }
}

impl ScatteredConfig {
    /// Resolve the configured weight function.
    pub fn weight_kind(&self) -> Result<WeightKind> {
        Ok(WeightKind::from_name(&self.weight, self.scale)?)
    }
}

fn default_weight() -> String {
    "uniform".to_string()
}
