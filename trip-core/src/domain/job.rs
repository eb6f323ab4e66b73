//! Job domain types

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::trip::TripPlan;

/// Opaque identifier of an asynchronous trip generation job
///
/// The client never interprets the value; it is only echoed back to the
/// status endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobHandle {
    pub request_id: String,
}

impl JobHandle {
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.request_id
    }
}

impl fmt::Display for JobHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.request_id)
    }
}

/// Status of a job as reported by `/get_result/{request_id}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    /// The backend is still generating the plan
    Processing,
    /// The plan is ready
    Completed {
        result: TripPlan,
        pdf_url: Option<String>,
    },
    /// Any status the client does not recognize; always terminal
    Unexpected(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_displays_request_id() {
        let handle = JobHandle::new("abc-123");
        assert_eq!(handle.to_string(), "abc-123");
        assert_eq!(handle.as_str(), "abc-123");
    }
}
