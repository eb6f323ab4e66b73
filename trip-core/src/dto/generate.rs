//! Trip generation DTOs

use serde::{Deserialize, Serialize};

use crate::domain::job::{JobHandle, JobStatus};
use crate::domain::trip::TripPlan;

pub const STATUS_PROCESSING: &str = "processing";
pub const STATUS_COMPLETED: &str = "completed";

/// Body returned by `POST /generate_content`
///
/// Synchronous deployments fill `response`; queued deployments fill
/// `request_id` (and usually a `message`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub request_id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Body returned by `GET /get_result/{request_id}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub data: Option<TripPlan>,
    #[serde(default)]
    pub pdf_url: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl StatusResponse {
    /// Whether the body carries a status the poller knows how to continue from
    pub fn is_recognized(&self) -> bool {
        matches!(
            self.status.as_deref(),
            Some(STATUS_PROCESSING) | Some(STATUS_COMPLETED)
        )
    }

    /// Convert the wire body into a job status
    ///
    /// A `completed` status without trip data violates the contract and is
    /// reported as unexpected rather than as an empty plan.
    pub fn into_status(self) -> JobStatus {
        match self.status.as_deref() {
            Some(STATUS_PROCESSING) => JobStatus::Processing,
            Some(STATUS_COMPLETED) => match self.data {
                Some(result) => JobStatus::Completed {
                    result,
                    pdf_url: self.pdf_url.filter(|url| !url.trim().is_empty()),
                },
                None => JobStatus::Unexpected("completed without trip data".to_string()),
            },
            Some(other) => JobStatus::Unexpected(other.to_string()),
            None => JobStatus::Unexpected(
                self.error
                    .unwrap_or_else(|| "response carried no status".to_string()),
            ),
        }
    }
}

/// Result of a successful submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The backend answered directly with the generated text
    Immediate(String),
    /// The backend queued the work; poll with this handle
    Queued(JobHandle),
}
