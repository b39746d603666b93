//! Built-in test functions with known derivatives.

use clap::ValueEnum;

use crate::{CliError, Result};

/// Functions the CLI can differentiate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BuiltinFunction {
    /// sin(x)
    Sin,
    /// cos(x)
    Cos,
    /// exp(x)
    Exp,
    /// x²
    Square,
    /// x³
    Cube,
    /// ln(x), defined for x > 0
    Ln,
}

impl BuiltinFunction {
    /// Name used on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Exp => "exp",
            Self::Square => "square",
            Self::Cube => "cube",
            Self::Ln => "ln",
        }
    }

    /// Evaluate the function, failing outside its domain.
    pub fn evaluate(self, x: f64) -> Result<f64> {
        match self {
            Self::Sin => Ok(x.sin()),
            Self::Cos => Ok(x.cos()),
            Self::Exp => Ok(x.exp()),
            Self::Square => Ok(x * x),
            Self::Cube => Ok(x * x * x),
            Self::Ln if x > 0.0 => Ok(x.ln()),
            Self::Ln => Err(CliError::Domain {
                function: self.name(),
                x,
            }),
        }
    }

    /// Analytic derivative of the given order (1 or 2).
    pub fn derivative(self, x: f64, order: u32) -> Option<f64> {
        let value = match (self, order) {
            (Self::Sin, 1) => x.cos(),
            (Self::Sin, 2) => -x.sin(),
            (Self::Cos, 1) => -x.sin(),
            (Self::Cos, 2) => -x.cos(),
            (Self::Exp, 1 | 2) => x.exp(),
            (Self::Square, 1) => 2.0 * x,
            (Self::Square, 2) => 2.0,
            (Self::Cube, 1) => 3.0 * x * x,
            (Self::Cube, 2) => 6.0 * x,
            (Self::Ln, 1) if x > 0.0 => 1.0 / x,
            (Self::Ln, 2) if x > 0.0 => -1.0 / (x * x),
            _ => return None,
        };
        Some(value)
    }
}
