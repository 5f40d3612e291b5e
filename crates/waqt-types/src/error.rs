use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from waqt operations.
///
/// Everything here is recoverable at the boundary: callers turn the
/// not-found family into a "not found" response and input errors into a
/// "bad request". Parse and directory-read failures never reach this type;
/// they are skipped where they happen.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WaqtError {
    /// Country code is not two ASCII letters.
    #[error("Invalid country code: {input:?}")]
    InvalidCountryCode { input: String },

    /// Malformed request value (date, time, month-day).
    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },

    /// No time table matched the country, timezone and city hint.
    #[error("No prayer-time dataset found for country {country_code}")]
    DatasetNotFound { country_code: String },

    /// The table exists but carries no row for the date.
    #[error("No prayer times for {month_day} in {file}")]
    DateNotFound { month_day: String, file: String },

    /// The country's city list is missing or unreadable.
    #[error("City list not found for country {country_code}")]
    CityListNotFound { country_code: String },
}

impl WaqtError {
    pub fn invalid_country_code(input: impl Into<String>) -> Self {
        Self::InvalidCountryCode { input: input.into() }
    }

    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput { reason: reason.into() }
    }

    /// True for the variants a transport should report as "not found".
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::DatasetNotFound { .. } | Self::DateNotFound { .. } | Self::CityListNotFound { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_family() {
        let err = WaqtError::DatasetNotFound { country_code: "SA".into() };
        assert!(err.is_not_found());
        assert!(!WaqtError::invalid_input("bad").is_not_found());
        assert!(!WaqtError::invalid_country_code("XYZ").is_not_found());
    }

    #[test]
    fn test_messages() {
        let err = WaqtError::DateNotFound { month_day: "02-30".into(), file: "wtimes-sa.makkah.js".into() };
        assert_eq!(err.to_string(), "No prayer times for 02-30 in wtimes-sa.makkah.js");
    }
}
