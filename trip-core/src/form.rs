//! Form validation
//!
//! Turns raw user input into a [`SubmissionRequest`]. Validation is purely
//! local: a form that fails here never reaches the network.

use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;

use crate::domain::submission::SubmissionRequest;

const SECONDS_PER_DAY: i64 = 86_400;

/// Errors raised while validating user input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// One or more required fields were blank after trimming
    #[error("Please fill in all fields.")]
    MissingFields(Vec<&'static str>),

    /// A date field could not be parsed
    #[error("Invalid {field}: '{value}' (expected YYYY-MM-DD)")]
    InvalidDate { field: &'static str, value: String },

    /// The end date is not after the start date
    #[error("End date must be after start date.")]
    EmptyRange,
}

/// Raw trip form input, before trimming
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TripForm {
    /// Duration typed directly as a number of days
    Duration {
        location: String,
        duration: String,
        budget: String,
    },
    /// Duration derived from a travel date range
    DateRange {
        location: String,
        budget: String,
        from_date: String,
        to_date: String,
    },
}

impl TripForm {
    /// Validate the form and build the request to submit
    pub fn validate(&self) -> Result<SubmissionRequest, ValidationError> {
        match self {
            TripForm::Duration {
                location,
                duration,
                budget,
            } => {
                let [location, duration, budget] = require_all([
                    ("location", location),
                    ("duration", duration),
                    ("budget", budget),
                ])?;

                Ok(SubmissionRequest {
                    location,
                    duration,
                    budget,
                    from_date: None,
                    to_date: None,
                })
            }
            TripForm::DateRange {
                location,
                budget,
                from_date,
                to_date,
            } => {
                let [location, budget, from_date, to_date] = require_all([
                    ("location", location),
                    ("budget", budget),
                    ("from date", from_date),
                    ("to date", to_date),
                ])?;

                let days = duration_days(&from_date, &to_date)?;
                if days <= 0 {
                    return Err(ValidationError::EmptyRange);
                }

                Ok(SubmissionRequest {
                    location,
                    duration: days.to_string(),
                    budget,
                    from_date: Some(from_date),
                    to_date: Some(to_date),
                })
            }
        }
    }
}

/// Trim a single required field
pub fn require(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let [value] = require_all([(field, value)])?;
    Ok(value)
}

/// Trim every field, reporting all blank ones at once
fn require_all<const N: usize, S: AsRef<str>>(
    fields: [(&'static str, S); N],
) -> Result<[String; N], ValidationError> {
    let missing: Vec<&'static str> = fields
        .iter()
        .filter(|(_, value)| value.as_ref().trim().is_empty())
        .map(|(name, _)| *name)
        .collect();

    if !missing.is_empty() {
        return Err(ValidationError::MissingFields(missing));
    }

    Ok(fields.map(|(_, value)| value.as_ref().trim().to_string()))
}

/// Number of days between two dates, rounded up
///
/// Both plain dates and local date-times are accepted; a partial day counts
/// as a whole one.
pub fn duration_days(from: &str, to: &str) -> Result<i64, ValidationError> {
    let start = parse_date("from date", from)?;
    let end = parse_date("to date", to)?;

    let seconds = (end - start).num_seconds();
    Ok(-(-seconds).div_euclid(SECONDS_PER_DAY))
}

fn parse_date(field: &'static str, value: &str) -> Result<NaiveDateTime, ValidationError> {
    let value = value.trim();

    if let Some(midnight) = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
    {
        return Ok(midnight);
    }

    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .ok_or_else(|| ValidationError::InvalidDate {
            field,
            value: value.to_string(),
        })
}
