//! numdiff CLI - Command Line Derivative Estimation
//!
//! Operational entry point for the numdiff_core estimators.
//!
//! # Commands
//!
//! - `numdiff derivative --function <name> --at <x>` - Finite-difference derivative of a built-in function
//! - `numdiff convergence --function <name> --at <x>` - Error table as the step shrinks
//! - `numdiff gradient --samples <csv> --query <x1,x2,...>` - Gradient from scattered samples
//! - `numdiff check` - Show resolved settings and run a self-test

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;
mod functions;

pub use error::{CliError, Result};

use commands::gradient::OutputFormat;
use functions::BuiltinFunction;

/// Numerical derivative estimation CLI
#[derive(Parser)]
#[command(name = "numdiff")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "numdiff.toml")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate a derivative with a finite-difference stencil
    Derivative {
        /// Function to differentiate
        #[arg(short, long, value_enum)]
        function: BuiltinFunction,

        /// Evaluation point
        #[arg(short, long, allow_hyphen_values = true)]
        at: f64,

        /// Stencil (forward, backward, central, central2nd)
        #[arg(short, long)]
        method: Option<String>,

        /// Step size
        #[arg(short, long)]
        step: Option<f64>,

        /// Evaluate stencil taps concurrently
        #[arg(long, conflicts_with = "sequential")]
        concurrent: bool,

        /// Evaluate stencil taps sequentially, overriding the config file
        #[arg(long)]
        sequential: bool,

        /// Evaluate f(x) first and reuse it for the origin tap
        #[arg(long)]
        origin_known: bool,
    },

    /// Tabulate the estimation error as the step is halved
    Convergence {
        /// Function to differentiate
        #[arg(short, long, value_enum)]
        function: BuiltinFunction,

        /// Evaluation point
        #[arg(short, long, allow_hyphen_values = true)]
        at: f64,

        /// Initial step size
        #[arg(short, long, default_value = "0.1")]
        step: f64,

        /// Number of halvings
        #[arg(short, long, default_value = "4")]
        levels: usize,
    },

    /// Estimate a gradient from scattered samples
    Gradient {
        /// CSV file with records x1,...,xd,value
        #[arg(short = 'i', long)]
        samples: String,

        /// Query point, comma separated
        #[arg(short, long, allow_hyphen_values = true)]
        query: String,

        /// Weight (uniform, inverse-squared-distance, squared-exponential)
        #[arg(short, long)]
        weight: Option<String>,

        /// Length scale for the squared-exponential weight
        #[arg(long)]
        scale: Option<f64>,

        /// Force the fitted plane through this value at the query
        #[arg(long, allow_hyphen_values = true)]
        intercept: Option<f64>,

        /// The CSV file has no header row
        #[arg(long)]
        no_headers: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Check configuration and run a self-test
    Check,
}

fn main() -> Result<()> {
    // Initialise tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let settings = config::Settings::load(&cli.config)?;

    match cli.command {
        Commands::Derivative {
            function,
            at,
            method,
            step,
            concurrent,
            sequential,
            origin_known,
        } => commands::derivative::run(
            &settings.finite_difference,
            function,
            at,
            &commands::derivative::Overrides {
                method,
                step,
                concurrent: match (concurrent, sequential) {
                    (true, _) => Some(true),
                    (_, true) => Some(false),
                    _ => None,
                },
                origin_known,
            },
        ),
        Commands::Convergence {
            function,
            at,
            step,
            levels,
        } => commands::convergence::run(&settings.finite_difference, function, at, step, levels),
        Commands::Gradient {
            samples,
            query,
            weight,
            scale,
            intercept,
            no_headers,
            format,
        } => commands::gradient::run(
            &settings.scattered,
            &samples,
            !no_headers,
            &query,
            weight.as_deref(),
            scale,
            intercept,
            format,
        ),
        Commands::Check => commands::check::run(&settings),
    }
}
