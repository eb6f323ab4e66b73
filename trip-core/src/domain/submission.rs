//! Submission domain types

use serde::{Deserialize, Serialize};

/// Validated trip request posted to `/generate_content`
///
/// Only built by [`crate::form::TripForm::validate`], so every field is
/// trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRequest {
    pub location: String,
    pub duration: String,
    pub budget: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_date: Option<String>,
}
