//! Trip Planner HTTP Client
//!
//! A type-safe client for the trip planner backend, plus the polling and
//! session logic that turns a submitted form into something to display.
//!
//! # Example
//!
//! ```no_run
//! use trip_client::TripPlannerClient;
//! use trip_core::TripForm;
//! use trip_core::dto::generate::SubmitOutcome;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = TripPlannerClient::new("http://localhost:5000");
//!
//!     let request = TripForm::Duration {
//!         location: "Lisbon".to_string(),
//!         duration: "4".to_string(),
//!         budget: "1500".to_string(),
//!     }
//!     .validate()?;
//!
//!     match client.generate_content(&request).await? {
//!         SubmitOutcome::Immediate(text) => println!("{}", text),
//!         SubmitOutcome::Queued(handle) => println!("Queued as {}", handle),
//!     }
//!     Ok(())
//! }
//! ```

mod assistants;
pub mod clock;
pub mod error;
mod generate;
pub mod poller;
pub mod session;

#[cfg(test)]
mod testing;

// Re-export commonly used types
pub use clock::{Clock, ManualClock, TokioClock};
pub use error::{ClientError, Result};
pub use poller::{PollConfig, PollOutcome, ResultPoller};
pub use session::{PlanOutcome, PlanSession};

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use trip_core::domain::job::{JobHandle, JobStatus};
use trip_core::domain::submission::SubmissionRequest;
use trip_core::dto::ErrorBody;
use trip_core::dto::generate::SubmitOutcome;

/// The two backend calls a trip submission depends on
///
/// [`TripPlannerClient`] is the production implementation; the poller and
/// session only see this trait.
#[async_trait]
pub trait TripBackend: Send + Sync {
    /// Submit a validated trip request
    async fn generate_content(&self, request: &SubmissionRequest) -> Result<SubmitOutcome>;

    /// Check the status of a queued job
    async fn get_result(&self, handle: &JobHandle) -> Result<JobStatus>;
}

/// HTTP client for the trip planner API
///
/// Endpoints are grouped by concern:
/// - Trip generation (submit, status, PDF download)
/// - Assistants (location finder, itinerary, weather, restaurants and hotels)
#[derive(Debug, Clone)]
pub struct TripPlannerClient {
    /// Base URL of the backend (e.g., "http://localhost:5000")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl TripPlannerClient {
    /// Create a new client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the backend (e.g., "http://localhost:5000")
    ///
    /// # Example
    /// ```
    /// use trip_client::TripPlannerClient;
    ///
    /// let client = TripPlannerClient::new("http://localhost:5000");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    ///
    /// # Example
    /// ```
    /// use trip_client::TripPlannerClient;
    /// use reqwest::Client;
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(30))
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = TripPlannerClient::with_client("http://localhost:5000", http_client);
    /// ```
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the base URL of the backend
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Read the body of a response and decode it as JSON
    ///
    /// Non-success statuses become [`ClientError::Server`] carrying the
    /// backend's `error` message.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status().as_u16();
        let body = response.text().await?;

        decode(status, &body)
    }
}

#[async_trait]
impl TripBackend for TripPlannerClient {
    async fn generate_content(&self, request: &SubmissionRequest) -> Result<SubmitOutcome> {
        TripPlannerClient::generate_content(self, request).await
    }

    async fn get_result(&self, handle: &JobHandle) -> Result<JobStatus> {
        TripPlannerClient::get_result(self, handle).await
    }
}

/// Decode a response body given its status code
pub(crate) fn decode<T: DeserializeOwned>(status: u16, body: &str) -> Result<T> {
    if !(200..300).contains(&status) {
        return Err(ClientError::server(status, error_message(body)));
    }

    serde_json::from_str(body)
        .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
}

/// Extract the `error` field of a failure body, falling back to the raw text
pub(crate) fn error_message(body: &str) -> String {
    if let Ok(ErrorBody { error }) = serde_json::from_str::<ErrorBody>(body) {
        return error;
    }

    let text = body.trim();
    if text.is_empty() {
        "Unknown error".to_string()
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trip_core::dto::generate::GenerateResponse;

    #[test]
    fn test_client_creation() {
        let client = TripPlannerClient::new("http://localhost:5000");
        assert_eq!(client.base_url(), "http://localhost:5000");
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = TripPlannerClient::new("http://localhost:5000/");
        assert_eq!(client.base_url(), "http://localhost:5000");
        assert_eq!(
            client.url("/get_result/abc"),
            "http://localhost:5000/get_result/abc"
        );
    }

    #[test]
    fn test_client_with_custom_client() {
        let client = TripPlannerClient::with_client("http://localhost:5000", Client::new());
        assert_eq!(client.base_url(), "http://localhost:5000");
    }

    #[test]
    fn test_decode_error_body_verbatim() {
        let err = decode::<GenerateResponse>(
            400,
            r#"{"error": "All fields (location, duration, budget, fromDate, toDate) are required!"}"#,
        )
        .unwrap_err();

        match err {
            ClientError::Server { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(
                    message,
                    "All fields (location, duration, budget, fromDate, toDate) are required!"
                );
            }
            other => panic!("expected server error, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_non_json_failure_uses_text() {
        let err = decode::<GenerateResponse>(502, "Bad Gateway").unwrap_err();
        assert!(matches!(err, ClientError::Server { status: 502, ref message } if message == "Bad Gateway"));

        assert_eq!(error_message("   "), "Unknown error");
    }

    #[test]
    fn test_decode_garbage_success_is_parse_error() {
        let err = decode::<GenerateResponse>(200, "<html>").unwrap_err();
        assert!(err.is_transient());
    }
}
