//! Stencil definitions and the table of built-in formulas.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use crate::types::DifferentiationError;

/// One tap of a finite-difference stencil.
///
/// The tap contributes `coefficient * f(x + step * offset)` to the weighted
/// sum.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StencilPoint {
    /// Location of the tap in units of the step size.
    pub offset: f64,
    /// Weight of the function value at the tap.
    pub coefficient: f64,
}

impl StencilPoint {
    /// Create a tap.
    pub const fn new(offset: f64, coefficient: f64) -> Self {
        Self {
            offset,
            coefficient,
        }
    }

    /// Whether this is the origin tap (offset 0).
    #[inline]
    pub fn is_origin(&self) -> bool {
        self.offset == 0.0
    }
}

/// A finite-difference formula.
///
/// # Invariants
///
/// - `taps` is non-empty
/// - at most one tap has offset 0
/// - `order >= 1`; the weighted sum is divided by `step^order`
///
/// The built-in stencils are associated constants. Custom stencils go
/// through [`Stencil::new`], which checks the invariants.
///
/// # Example
///
/// ```
/// use numdiff_core::math::finite_difference::{Stencil, StencilPoint};
///
/// assert_eq!(Stencil::CENTRAL.order(), 1);
/// assert_eq!(Stencil::CENTRAL_2ND.taps().len(), 3);
///
/// // Second-order accurate one-sided first derivative
/// let custom = Stencil::new(
///     vec![
///         StencilPoint::new(0.0, -1.5),
///         StencilPoint::new(1.0, 2.0),
///         StencilPoint::new(2.0, -0.5),
///     ],
///     1,
/// )
/// .unwrap();
/// assert!(custom.origin_tap().is_some());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stencil {
    taps: Cow<'static, [StencilPoint]>,
    order: u32,
}

impl Stencil {
    /// Forward difference: `(f(x+h) - f(x)) / h`.
    pub const FORWARD: Stencil = Stencil {
        taps: Cow::Borrowed(&[StencilPoint::new(0.0, -1.0), StencilPoint::new(1.0, 1.0)]),
        order: 1,
    };

    /// Backward difference: `(f(x) - f(x-h)) / h`.
    pub const BACKWARD: Stencil = Stencil {
        taps: Cow::Borrowed(&[StencilPoint::new(-1.0, -1.0), StencilPoint::new(0.0, 1.0)]),
        order: 1,
    };

    /// Central difference for the first derivative: `(f(x+h) - f(x-h)) / 2h`.
    pub const CENTRAL: Stencil = Stencil {
        taps: Cow::Borrowed(&[StencilPoint::new(-1.0, -0.5), StencilPoint::new(1.0, 0.5)]),
        order: 1,
    };

    /// Central difference for the second derivative:
    /// `(f(x-h) - 2f(x) + f(x+h)) / h²`.
    pub const CENTRAL_2ND: Stencil = Stencil {
        taps: Cow::Borrowed(&[
            StencilPoint::new(-1.0, 1.0),
            StencilPoint::new(0.0, -2.0),
            StencilPoint::new(1.0, 1.0),
        ]),
        order: 2,
    };

    /// Create a custom stencil.
    ///
    /// # Errors
    ///
    /// Returns `DifferentiationError::InvalidArgument` if `taps` is empty,
    /// more than one tap has offset 0, any offset or coefficient is not
    /// finite, or `order == 0`.
    pub fn new(taps: Vec<StencilPoint>, order: u32) -> Result<Self, DifferentiationError> {
        if taps.is_empty() {
            return Err(DifferentiationError::invalid_argument(
                "stencil must have at least one tap",
            ));
        }
        if order == 0 {
            return Err(DifferentiationError::invalid_argument(
                "stencil order must be at least 1",
            ));
        }
        if taps
            .iter()
            .any(|t| !t.offset.is_finite() || !t.coefficient.is_finite())
        {
            return Err(DifferentiationError::invalid_argument(
                "stencil offsets and coefficients must be finite",
            ));
        }
        if taps.iter().filter(|t| t.is_origin()).count() > 1 {
            return Err(DifferentiationError::invalid_argument(
                "stencil has more than one origin tap",
            ));
        }
        Ok(Self {
            taps: Cow::Owned(taps),
            order,
        })
    }

    /// The taps in evaluation order.
    #[inline]
    pub fn taps(&self) -> &[StencilPoint] {
        &self.taps
    }

    /// Power of the step size dividing the weighted sum.
    #[inline]
    pub fn order(&self) -> u32 {
        self.order
    }

    /// The tap with offset 0, if the stencil has one.
    pub fn origin_tap(&self) -> Option<&StencilPoint> {
        self.taps.iter().find(|t| t.is_origin())
    }

    /// Number of calls to `f` one estimate makes.
    ///
    /// The origin tap costs nothing when `f(x)` is already known.
    pub fn evaluations_required(&self, origin_known: bool) -> usize {
        self.taps
            .iter()
            .filter(|t| !(origin_known && t.is_origin()))
            .count()
    }

    /// Name of a built-in stencil, `None` for custom ones.
    pub fn name(&self) -> Option<&'static str> {
        builtin()
            .into_iter()
            .find(|(_, stencil)| stencil == self)
            .map(|(name, _)| name)
    }
}

impl Default for Stencil {
    /// Central difference, the usual choice for first derivatives.
    fn default() -> Self {
        Self::CENTRAL
    }
}

fn builtin() -> [(&'static str, Stencil); 4] {
    [
        ("forward", Stencil::FORWARD),
        ("backward", Stencil::BACKWARD),
        ("central", Stencil::CENTRAL),
        ("central2nd", Stencil::CENTRAL_2ND),
    ]
}

impl FromStr for Stencil {
    type Err = DifferentiationError;

    /// Parse a built-in stencil name (case-insensitive, `-`/`_` ignored).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();
        builtin()
            .into_iter()
            .find(|(name, _)| *name == key)
            .map(|(_, stencil)| stencil)
            .ok_or_else(|| {
                DifferentiationError::invalid_argument(format!(
                    "unknown stencil '{}'. Supported: forward, backward, central, central2nd",
                    s
                ))
            })
    }
}

impl fmt::Display for Stencil {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{}", name),
            None => write!(f, "custom(order={}, taps={})", self.order, self.taps.len()),
        }
    }
}
