use crate::{
    error::AplError,
    interpreter::{
        evaluator::core::EvalResult,
        value::{
            array::{Array, Element},
            number::{DEFAULT_COMPARISON_TOLERANCE, Number},
        },
    },
};

/// Initial index origin.
pub const DEFAULT_INDEX_ORIGIN: usize = 1;
/// Initial print precision.
pub const DEFAULT_PRINT_PRECISION: usize = 10;
/// Largest print precision an `f64` can honour.
pub const MAX_PRINT_PRECISION: usize = 17;
/// Initial random link.
pub const DEFAULT_RANDOM_LINK: u32 = 123;
/// Largest random link.
pub const MAX_RANDOM_LINK: u32 = 2_147_483_646;

/// A system variable seeded into every workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemParameter {
    /// `⎕IO`, the base from which indices count.
    IndexOrigin,
    /// `⎕PP`, the number of significant digits displayed.
    PrintPrecision,
    /// `⎕CT`, the relative tolerance of comparisons.
    ComparisonTolerance,
    /// `⎕RL`, the seed of the random number generator.
    RandomLink,
    /// `⎕LX`, the expression run when a workspace is loaded.
    LatentExpression,
}

impl SystemParameter {
    /// Every system parameter, in seeding order.
    pub const ALL: [Self; 5] = [Self::IndexOrigin,
                                Self::PrintPrecision,
                                Self::ComparisonTolerance,
                                Self::RandomLink,
                                Self::LatentExpression];

    /// Returns the distinguished name of the parameter.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::IndexOrigin => "⎕IO",
            Self::PrintPrecision => "⎕PP",
            Self::ComparisonTolerance => "⎕CT",
            Self::RandomLink => "⎕RL",
            Self::LatentExpression => "⎕LX",
        }
    }

    /// Finds the parameter with the given distinguished name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|parameter| parameter.name() == name)
    }

    /// Returns the value the parameter holds at session start.
    #[must_use]
    pub fn default_value(self) -> Array {
        match self {
            Self::IndexOrigin => Array::number(DEFAULT_INDEX_ORIGIN),
            Self::PrintPrecision => Array::number(DEFAULT_PRINT_PRECISION),
            Self::ComparisonTolerance => Array::number(DEFAULT_COMPARISON_TOLERANCE),
            Self::RandomLink => Array::number(f64::from(DEFAULT_RANDOM_LINK)),
            Self::LatentExpression => Array::chars(""),
        }
    }

    /// Checks a value about to be assigned to the parameter.
    ///
    /// # Errors
    /// Returns a `DomainError` when the value has the wrong type and a
    /// `LimitError` when it is outside the parameter's bounds.
    ///
    /// # Example
    /// ```
    /// use aplite::{
    ///     error::ErrorKind,
    ///     interpreter::{symbol::system::SystemParameter, value::array::Array},
    /// };
    ///
    /// assert!(SystemParameter::IndexOrigin.validate(Array::number(0.0)).is_ok());
    /// let error = SystemParameter::IndexOrigin.validate(Array::number(5.0)).unwrap_err();
    /// assert_eq!(error.kind, ErrorKind::Limit);
    /// let error = SystemParameter::PrintPrecision.validate(Array::chars("ab")).unwrap_err();
    /// assert_eq!(error.kind, ErrorKind::Domain);
    /// ```
    pub fn validate(self, value: Array) -> EvalResult<Array> {
        match self {
            Self::IndexOrigin => match numeric_value(&value)?.to_integer() {
                Some(origin @ (0 | 1)) => Ok(Array::number(f64::from(origin == 1))),
                _ => Err(AplError::limit("Index origin can only be either 0 or 1.")),
            },
            Self::PrintPrecision => {
                let precision = numeric_value(&value)?.to_integer();
                match precision.and_then(|p| usize::try_from(p).ok()) {
                    Some(p) if (1..=MAX_PRINT_PRECISION).contains(&p) => Ok(Array::number(p)),
                    _ => Err(AplError::limit(format!("Print precision must be between 1 and {MAX_PRINT_PRECISION}."))),
                }
            },
            Self::ComparisonTolerance => {
                let tolerance = numeric_value(&value)?.real;
                if (0.0..1.0).contains(&tolerance) {
                    Ok(Array::number(tolerance))
                } else {
                    Err(AplError::limit("Comparison tolerance must be at least 0 and less than 1."))
                }
            },
            Self::RandomLink => {
                let link = numeric_value(&value)?.to_integer();
                match link.and_then(|l| u32::try_from(l).ok()) {
                    Some(l) if (1..=MAX_RANDOM_LINK).contains(&l) => Ok(Array::number(f64::from(l))),
                    _ => Err(AplError::limit(format!("Random link must be an integer between 1 and {MAX_RANDOM_LINK}."))),
                }
            },
            Self::LatentExpression => {
                if value.rank() <= 1 && value.to_text().is_some() {
                    Ok(Array::vector(value.into_ravel()))
                } else {
                    Err(AplError::domain("Latent expression must be a character vector."))
                }
            },
        }
    }
}

/// Returns the sole real number of a parameter value.
fn numeric_value(value: &Array) -> EvalResult<Number> {
    match value.ravel() {
        [Element::Number(number)] if value.rank() <= 1 && number.near_real() => Ok(*number),
        _ => Err(AplError::domain("Invalid system parameter value.")),
    }
}
