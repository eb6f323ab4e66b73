//! Scripted backend used by the poller and session tests

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Notify;
use tokio_util::sync::CancellationToken;
use trip_core::domain::job::{JobHandle, JobStatus};
use trip_core::domain::submission::SubmissionRequest;
use trip_core::domain::trip::TripPlan;
use trip_core::dto::generate::SubmitOutcome;

use crate::TripBackend;
use crate::error::{ClientError, Result};

/// One scripted answer of the status endpoint
pub(crate) enum Step {
    Status(JobStatus),
    /// Transient failure (lost connection, truncated body)
    Fail,
    /// Never answers; signals `hung` when reached
    Hang,
    /// Cancels the token, then answers anyway
    CancelThen(CancellationToken, JobStatus),
}

pub(crate) fn completed(plan: TripPlan) -> Step {
    Step::Status(JobStatus::Completed {
        result: plan,
        pdf_url: Some("https://bucket/trip.pdf".to_string()),
    })
}

/// Backend whose answers are fixed up front
///
/// Once a job's script runs out, it keeps answering `processing`.
#[derive(Default)]
pub(crate) struct ScriptedBackend {
    submissions: Mutex<VecDeque<Result<SubmitOutcome>>>,
    statuses: Mutex<HashMap<String, VecDeque<Step>>>,
    submit_calls: AtomicUsize,
    status_calls: Mutex<Vec<String>>,
    pub hung: Notify,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_submit(self, outcome: Result<SubmitOutcome>) -> Self {
        self.submissions.lock().unwrap().push_back(outcome);
        self
    }

    pub fn queued(self, request_id: &str) -> Self {
        self.on_submit(Ok(SubmitOutcome::Queued(JobHandle::new(request_id))))
    }

    pub fn on_status(self, request_id: &str, steps: impl IntoIterator<Item = Step>) -> Self {
        self.statuses
            .lock()
            .unwrap()
            .entry(request_id.to_string())
            .or_default()
            .extend(steps);
        self
    }

    pub fn submit_calls(&self) -> usize {
        self.submit_calls.load(Ordering::SeqCst)
    }

    pub fn status_calls(&self, request_id: &str) -> usize {
        self.status_calls
            .lock()
            .unwrap()
            .iter()
            .filter(|id| id.as_str() == request_id)
            .count()
    }
}

#[async_trait]
impl TripBackend for ScriptedBackend {
    async fn generate_content(&self, _request: &SubmissionRequest) -> Result<SubmitOutcome> {
        self.submit_calls.fetch_add(1, Ordering::SeqCst);
        self.submissions
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ClientError::Protocol("no scripted submission".to_string())))
    }

    async fn get_result(&self, handle: &JobHandle) -> Result<JobStatus> {
        self.status_calls
            .lock()
            .unwrap()
            .push(handle.request_id.clone());

        let step = self
            .statuses
            .lock()
            .unwrap()
            .get_mut(handle.as_str())
            .and_then(VecDeque::pop_front);

        match step {
            Some(Step::Status(status)) => Ok(status),
            Some(Step::Fail) => Err(ClientError::ParseError("connection reset".to_string())),
            Some(Step::CancelThen(cancel, status)) => {
                cancel.cancel();
                Ok(status)
            }
            Some(Step::Hang) => {
                self.hung.notify_one();
                std::future::pending().await
            }
            None => Ok(JobStatus::Processing),
        }
    }
}
