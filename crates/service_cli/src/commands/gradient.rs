//! Gradient command implementation
//!
//! Loads scattered samples from a CSV file and estimates the gradient at a
//! query point with a weighted least-squares plane fit.
//!
//! Each CSV record holds the coordinates of one sample followed by the
//! function value: `x1,x2,...,xd,value`.

use std::path::Path;

use numdiff_core::math::scattered::{estimate_gradient, WeightKind};
use numdiff_core::types::{InterceptConstraint, NeighborSample};
use serde::Serialize;
use tracing::{debug, info};

use crate::config::ScatteredConfig;
use crate::{CliError, Result};

/// Output format for the gradient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// One partial derivative per line
    Table,
    /// JSON report
    Json,
}

/// Gradient report as written in JSON format.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GradientReport {
    /// Query point
    pub query: Vec<f64>,
    /// Estimated partial derivatives
    pub gradient: Vec<f64>,
    /// Weight function name
    pub weight: String,
    /// Forced intercept value, if any
    pub intercept: Option<f64>,
    /// Number of samples used
    pub samples: usize,
}

/// Parse a comma-separated query point.
pub fn parse_query(text: &str) -> Result<Vec<f64>> {
    text.split(',')
        .map(|part| {
            part.trim()
                .parse::<f64>()
                .map_err(|e| CliError::Parse(format!("query coordinate '{}': {}", part.trim(), e)))
        })
        .collect()
}

/// Read samples from CSV records `x1,...,xd,value`.
pub fn read_samples<R: std::io::Read>(reader: R, has_headers: bool) -> Result<Vec<NeighborSample>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(has_headers)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut samples = Vec::new();
    for (line, record) in csv_reader.records().enumerate() {
        let record = record?;
        let mut numbers = record
            .iter()
            .map(|field| {
                field.parse::<f64>().map_err(|e| {
                    CliError::Parse(format!("record {}: '{}': {}", line + 1, field, e))
                })
            })
            .collect::<Result<Vec<f64>>>()?;
        let value = numbers.pop().ok_or_else(|| {
            CliError::Parse(format!("record {} is empty", line + 1))
        })?;
        samples.push(NeighborSample::new(numbers, value));
    }
    Ok(samples)
}

/// Load samples from a CSV file.
pub fn load_samples(path: &str, has_headers: bool) -> Result<Vec<NeighborSample>> {
    if !Path::new(path).exists() {
        return Err(CliError::FileNotFound(path.to_string()));
    }
    let file = std::fs::File::open(path)?;
    read_samples(file, has_headers)
}

/// Estimate the gradient and build the report.
pub fn compute(
    query: Vec<f64>,
    samples: &[NeighborSample],
    weight: WeightKind,
    intercept: Option<f64>,
) -> Result<GradientReport> {
    let constraint = match intercept {
        Some(value) => InterceptConstraint::forced(value),
        None => InterceptConstraint::free(),
    };
    let gradient = estimate_gradient(&query, samples, &weight, constraint)?;
    Ok(GradientReport {
        query,
        gradient,
        weight: weight.name().to_string(),
        intercept,
        samples: samples.len(),
    })
}

/// Run the gradient command
#[allow(clippy::too_many_arguments)]
pub fn run(
    base: &ScatteredConfig,
    samples_path: &str,
    has_headers: bool,
    query: &str,
    weight: Option<&str>,
    scale: Option<f64>,
    intercept: Option<f64>,
    format: OutputFormat,
) -> Result<()> {
    let config = ScatteredConfig {
        weight: weight.map(str::to_string).unwrap_or_else(|| base.weight.clone()),
        scale: scale.or(base.scale),
    };
    let weight = config.weight_kind()?;
    let query = parse_query(query)?;

    info!("Estimating gradient...");
    info!("  Samples: {}", samples_path);
    info!("  Query: {:?}", query);
    info!("  Weight: {}", weight.name());

    let samples = load_samples(samples_path, has_headers)?;
    debug!("Loaded {} samples", samples.len());

    let report = compute(query, &samples, weight, intercept)?;

    match format {
        OutputFormat::Table => {
            for (i, g) in report.gradient.iter().enumerate() {
                println!("d/dx{} = {}", i + 1, g);
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    info!("Gradient estimate complete");
    Ok(())
}
