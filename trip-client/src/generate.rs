//! Trip generation endpoints

use reqwest::Url;
use tracing::debug;
use trip_core::domain::job::{JobHandle, JobStatus};
use trip_core::domain::submission::SubmissionRequest;
use trip_core::dto::generate::{GenerateResponse, StatusResponse, SubmitOutcome};

use crate::TripPlannerClient;
use crate::error::{ClientError, Result};

impl TripPlannerClient {
    // =============================================================================
    // Submission
    // =============================================================================

    /// Submit a trip request
    ///
    /// Depending on how the backend is deployed, the answer is either the
    /// generated text itself or a handle to poll with [`Self::get_result`].
    /// Nothing is retried here.
    ///
    /// # Example
    /// ```no_run
    /// # use trip_client::TripPlannerClient;
    /// # use trip_core::TripForm;
    /// # async fn example() -> anyhow::Result<()> {
    /// let client = TripPlannerClient::new("http://localhost:5000");
    /// let request = TripForm::DateRange {
    ///     location: "Kyoto".to_string(),
    ///     budget: "2500".to_string(),
    ///     from_date: "2024-04-01".to_string(),
    ///     to_date: "2024-04-06".to_string(),
    /// }
    /// .validate()?;
    /// let outcome = client.generate_content(&request).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn generate_content(&self, request: &SubmissionRequest) -> Result<SubmitOutcome> {
        let url = self.url("generate_content");
        let response = self.client.post(&url).json(request).send().await?;

        let status = response.status().as_u16();
        let body: GenerateResponse = self.handle_response(response).await?;

        interpret_submission(status, body)
    }

    // =============================================================================
    // Job Status
    // =============================================================================

    /// Check the status of a queued job
    ///
    /// A non-success status whose body does not carry a recognizable job
    /// state is reported as [`JobStatus::Unexpected`], not as an error: only
    /// failures to get or decode a response come back as `Err`.
    pub async fn get_result(&self, handle: &JobHandle) -> Result<JobStatus> {
        let url = self.status_url(handle)?;
        let response = self.client.get(url).send().await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        debug!(request_id = %handle, status, "Received job status");

        interpret_status(status, &body)
    }

    /// Status endpoint for a handle, with the request id as a single path segment
    fn status_url(&self, handle: &JobHandle) -> Result<Url> {
        let mut url = Url::parse(&self.url("get_result"))
            .map_err(|e| ClientError::InvalidRequest(format!("{}: {}", self.base_url, e)))?;

        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidRequest(format!("{} cannot be a base", self.base_url)))?
            .push(handle.as_str());

        Ok(url)
    }

    /// Download the generated PDF from the link attached to a completed plan
    pub async fn download_pdf(&self, pdf_url: &str) -> Result<Vec<u8>> {
        let response = self.client.get(pdf_url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ClientError::server(
                status.as_u16(),
                crate::error_message(&text),
            ));
        }

        Ok(response.bytes().await?.to_vec())
    }
}

/// Map a decoded submission body onto an outcome
fn interpret_submission(status: u16, body: GenerateResponse) -> Result<SubmitOutcome> {
    if let Some(error) = body.error {
        return Err(ClientError::server(status, error));
    }

    if let Some(request_id) = body.request_id.filter(|id| !id.trim().is_empty()) {
        return Ok(SubmitOutcome::Queued(JobHandle::new(request_id)));
    }

    body.response.map(SubmitOutcome::Immediate).ok_or_else(|| {
        ClientError::Protocol("response carried neither a result nor a request id".to_string())
    })
}

/// Map a raw status response onto a job status
fn interpret_status(status: u16, body: &str) -> Result<JobStatus> {
    let success = (200..300).contains(&status);

    match serde_json::from_str::<StatusResponse>(body) {
        Ok(parsed) if success || parsed.is_recognized() => Ok(parsed.into_status()),
        Ok(parsed) => Ok(JobStatus::Unexpected(format!(
            "HTTP {}: {}",
            status,
            parsed.error.unwrap_or_else(|| "no status".to_string())
        ))),
        Err(_) if !success => Ok(JobStatus::Unexpected(format!(
            "HTTP {}: {}",
            status,
            crate::error_message(body)
        ))),
        Err(e) => Err(ClientError::ParseError(format!(
            "Failed to parse status response: {}",
            e
        ))),
    }
}
