//! Efficiency metric: drop rate per unit of effort.

use std::fmt;

use serde::Serialize;

use crate::error::DivisionError;

/// Round to one decimal place from the exact binary value.
///
/// Agrees with `{:.1}` formatting, so a quotient such as 0.35 (stored just
/// below the tie) rounds down to 0.3.
pub fn round_one_decimal(value: f64) -> f64 {
    format!("{value:.1}").parse().unwrap_or(value)
}

/// `rate / effort` rounded to one decimal place.
///
/// # Errors
///
/// Returns [`DivisionError`] when `effort` is zero.
pub fn efficiency(entity: &str, rate: f64, effort: f64) -> Result<f64, DivisionError> {
    if effort == 0.0 {
        return Err(DivisionError {
            entity: entity.to_string(),
        });
    }
    Ok(round_one_decimal(rate / effort))
}

/// Efficiency as carried on a drop row.
///
/// A zero effort does not fail aggregation; the row keeps
/// [`Efficiency::ZeroEffort`] so callers can show or skip it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value")]
pub enum Efficiency {
    Rate(f64),
    ZeroEffort,
    MissingRate,
}

impl Efficiency {
    pub fn compute(entity: &str, rate: Option<f64>, effort: f64) -> Self {
        let Some(rate) = rate else {
            return Self::MissingRate;
        };
        match efficiency(entity, rate, effort) {
            Ok(value) => Self::Rate(value),
            Err(error) => {
                tracing::warn!(%error, "zero effort, efficiency left undefined");
                Self::ZeroEffort
            }
        }
    }

    pub fn value(self) -> Option<f64> {
        match self {
            Self::Rate(value) => Some(value),
            Self::ZeroEffort | Self::MissingRate => None,
        }
    }
}

impl fmt::Display for Efficiency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rate(value) => write!(f, "{value:.1}"),
            Self::ZeroEffort => f.write_str("n/a"),
            Self::MissingRate => f.write_str("-"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_one_decimal() {
        assert_eq!(efficiency("A", 10.0, 3.0), Ok(3.3));
        assert_eq!(efficiency("A", 10.0, 4.0), Ok(2.5));
        assert_eq!(efficiency("A", 1.0, 16.0), Ok(0.1));
    }

    #[test]
    fn ties_round_like_one_decimal_formatting() {
        assert_eq!(efficiency("A", 0.35, 1.0), Ok(0.3));
        assert_eq!(efficiency("A", 0.15, 1.0), Ok(0.1));
        assert_eq!(efficiency("A", 1.45, 1.0), Ok(1.4));
        assert_eq!(Efficiency::compute("A", Some(0.35), 1.0).to_string(), "0.3");
    }

    #[test]
    fn zero_effort_is_a_division_error() {
        let error = efficiency("Obor", 5.0, 0.0).unwrap_err();
        assert_eq!(error.entity, "Obor");
        assert_eq!(Efficiency::compute("Obor", Some(5.0), 0.0), Efficiency::ZeroEffort);
    }

    #[test]
    fn missing_rate_is_reported() {
        let eff = Efficiency::compute("Obor", None, 2.0);
        assert_eq!(eff, Efficiency::MissingRate);
        assert_eq!(eff.value(), None);
    }

    #[test]
    fn display_uses_one_decimal() {
        assert_eq!(Efficiency::Rate(5.0).to_string(), "5.0");
        assert_eq!(Efficiency::Rate(3.3).to_string(), "3.3");
        assert_eq!(Efficiency::ZeroEffort.to_string(), "n/a");
        assert_eq!(Efficiency::MissingRate.to_string(), "-");
    }
}
