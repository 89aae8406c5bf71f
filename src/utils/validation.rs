//! Input validation primitives.
//!
//! Replace verbose ok_or_else + Error::validation_invalid_argument chains.

use crate::error::{Error, Result};
use std::fmt::Display;
use std::ops::RangeInclusive;

/// Require a value to fall inside an inclusive range.
///
/// ```ignore
/// validation::require_in_range(args.thickness, &(5..=300), "thickness", "mm")?;
/// ```
pub fn require_in_range<T>(value: T, range: &RangeInclusive<T>, field: &str, unit: &str) -> Result<T>
where
    T: PartialOrd + Display + Copy,
{
    if range.contains(&value) {
        Ok(value)
    } else {
        Err(Error::validation_invalid_argument(
            field,
            format!(
                "{} must be {}-{} {} (got {})",
                field,
                range.start(),
                range.end(),
                unit,
                value
            ),
            Some(value.to_string()),
        ))
    }
}

/// Require a float to be finite and strictly positive.
pub fn require_positive(value: f64, field: &str) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(Error::config_invalid_value(
            field,
            Some(value.to_string()),
            "must be a positive number",
        ))
    }
}

/// Require a float to be finite and not negative.
pub fn require_non_negative(value: f64, field: &str) -> Result<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(Error::config_invalid_value(
            field,
            Some(value.to_string()),
            "must be zero or a positive number",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_in_range_accepts_bounds() {
        assert_eq!(require_in_range(5, &(5..=300), "thickness", "mm").unwrap(), 5);
        assert_eq!(require_in_range(300, &(5..=300), "thickness", "mm").unwrap(), 300);
    }

    #[test]
    fn require_in_range_rejects_outside() {
        let err = require_in_range(4, &(5..=300), "thickness", "mm").unwrap_err();
        assert_eq!(err.code.as_str(), "validation.invalid_argument");
        let problem = err.details["problem"].as_str().unwrap();
        assert!(problem.contains("5-300 mm"), "got: {}", problem);

        assert!(require_in_range(301, &(5..=300), "thickness", "mm").is_err());
    }

    #[test]
    fn require_positive_rejects_zero_and_nan() {
        assert!(require_positive(0.0, "lap").is_err());
        assert!(require_positive(f64::NAN, "lap").is_err());
        assert_eq!(require_positive(0.05, "lap").unwrap(), 0.05);
    }

    #[test]
    fn require_non_negative_allows_zero() {
        assert_eq!(require_non_negative(0.0, "rate").unwrap(), 0.0);
        let err = require_non_negative(-1.0, "rate").unwrap_err();
        assert_eq!(err.code.as_str(), "config.invalid_value");
    }
}
