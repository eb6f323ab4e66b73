//! Plan session
//!
//! Drives one trip form from validation to the final view: submit, then
//! either show the immediate answer or poll the queued job. Only one
//! submission per session is live at a time; starting another cancels the
//! poll of the previous one.

use std::sync::{Arc, Mutex};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use trip_core::domain::job::JobHandle;
use trip_core::domain::trip::TripPlan;
use trip_core::dto::generate::SubmitOutcome;
use trip_core::render::{LOADING_MESSAGE, TIMEOUT_MESSAGE, render_failure, render_text};
use trip_core::{FailureKind, TripForm, View, ViewSink};
use uuid::Uuid;

use crate::TripBackend;
use crate::clock::Clock;
use crate::poller::{PollConfig, PollOutcome, ResultPoller};

pub const TRIP_DETAILS_TITLE: &str = "Trip Details";

/// What a submission ended with
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanOutcome {
    /// The backend answered synchronously
    Answered(String),
    /// The queued job finished
    Completed {
        handle: JobHandle,
        result: TripPlan,
        pdf_url: Option<String>,
    },
    /// A terminal failure was shown to the user
    Failed { kind: FailureKind, message: String },
    /// Superseded before finishing; nothing was rendered for it
    Cancelled,
}

pub struct PlanSession {
    backend: Arc<dyn TripBackend>,
    poller: ResultPoller,
    in_flight: Mutex<Option<CancellationToken>>,
}

impl PlanSession {
    pub fn new(backend: Arc<dyn TripBackend>, clock: Arc<dyn Clock>, config: PollConfig) -> Self {
        let poller = ResultPoller::new(Arc::clone(&backend), clock, config);
        Self {
            backend,
            poller,
            in_flight: Mutex::new(None),
        }
    }

    /// Validate and submit a trip form, committing every view to `sink`
    ///
    /// Any submission still polling on this session is cancelled first,
    /// including when the new form turns out to be invalid.
    pub async fn plan(&self, form: &TripForm, sink: &mut dyn ViewSink) -> PlanOutcome {
        let submission_id = Uuid::new_v4();
        let cancel = self.begin();

        let request = match form.validate() {
            Ok(request) => request,
            Err(e) => {
                info!(%submission_id, "Form rejected: {}", e);
                return fail(sink, FailureKind::Validation, e.to_string());
            }
        };

        info!(%submission_id, location = %request.location, "Submitting trip request");
        sink.commit(View::Loading {
            message: LOADING_MESSAGE.to_string(),
        });

        let submitted = tokio::select! {
            biased;
            _ = cancel.cancelled() => return PlanOutcome::Cancelled,
            submitted = self.backend.generate_content(&request) => submitted,
        };

        match submitted {
            Ok(SubmitOutcome::Immediate(text)) => {
                info!(%submission_id, "Received immediate response");
                sink.commit(render_text(TRIP_DETAILS_TITLE, &text));
                PlanOutcome::Answered(text)
            }
            Ok(SubmitOutcome::Queued(handle)) => {
                info!(%submission_id, request_id = %handle, "Trip request queued");
                self.track(handle, sink, &cancel).await
            }
            Err(e) => {
                warn!(%submission_id, "Submission failed: {}", e);
                fail(sink, e.failure_kind(), e.user_message())
            }
        }
    }

    /// Resume polling a job submitted earlier
    pub async fn resume(&self, handle: JobHandle, sink: &mut dyn ViewSink) -> PlanOutcome {
        let cancel = self.begin();
        self.track(handle, sink, &cancel).await
    }

    /// Cancel whatever this session is currently waiting on
    pub fn cancel(&self) {
        if let Some(token) = self.lock_in_flight().take() {
            token.cancel();
        }
    }

    /// Cancel the previous submission and register a new one
    fn begin(&self) -> CancellationToken {
        let token = CancellationToken::new();
        if let Some(previous) = self.lock_in_flight().replace(token.clone()) {
            previous.cancel();
        }
        token
    }

    fn lock_in_flight(&self) -> std::sync::MutexGuard<'_, Option<CancellationToken>> {
        self.in_flight.lock().unwrap_or_else(|e| e.into_inner())
    }

    async fn track(
        &self,
        handle: JobHandle,
        sink: &mut dyn ViewSink,
        cancel: &CancellationToken,
    ) -> PlanOutcome {
        let outcome = self.poller.poll(&handle, sink, cancel).await;

        // The display may already belong to a newer submission
        if cancel.is_cancelled() {
            info!(request_id = %handle, "Dropping outcome of superseded poll");
            return PlanOutcome::Cancelled;
        }

        if let Some(view) = outcome.to_view() {
            sink.commit(view);
        }

        match outcome {
            PollOutcome::Completed { result, pdf_url } => PlanOutcome::Completed {
                handle,
                result,
                pdf_url,
            },
            PollOutcome::Unexpected(status) => PlanOutcome::Failed {
                kind: FailureKind::Protocol,
                message: format!("Unexpected status: {}", status),
            },
            PollOutcome::TimedOut => PlanOutcome::Failed {
                kind: FailureKind::Timeout,
                message: TIMEOUT_MESSAGE.to_string(),
            },
            PollOutcome::Cancelled => PlanOutcome::Cancelled,
        }
    }
}

fn fail(sink: &mut dyn ViewSink, kind: FailureKind, message: String) -> PlanOutcome {
    sink.commit(render_failure(kind, message.clone()));
    PlanOutcome::Failed { kind, message }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::error::ClientError;
    use crate::testing::{ScriptedBackend, Step, completed};
    use trip_core::domain::job::JobStatus;
    use trip_core::render::TRANSPORT_MESSAGE;

    fn form() -> TripForm {
        TripForm::Duration {
            location: "Lisbon".to_string(),
            duration: "4".to_string(),
            budget: "1500".to_string(),
        }
    }

    fn session(backend: &Arc<ScriptedBackend>) -> PlanSession {
        PlanSession::new(
            backend.clone(),
            Arc::new(ManualClock::new()),
            PollConfig::default(),
        )
    }

    #[tokio::test]
    async fn test_invalid_form_never_reaches_backend() {
        let backend = Arc::new(ScriptedBackend::new().queued("job"));
        let mut views: Vec<View> = Vec::new();

        let form = TripForm::Duration {
            location: "Lisbon".to_string(),
            duration: String::new(),
            budget: "1500".to_string(),
        };
        let outcome = session(&backend).plan(&form, &mut views).await;

        assert_eq!(
            outcome,
            PlanOutcome::Failed {
                kind: FailureKind::Validation,
                message: "Please fill in all fields.".to_string(),
            }
        );
        assert_eq!(backend.submit_calls(), 0);
        assert_eq!(views.len(), 1);
    }

    #[tokio::test]
    async fn test_immediate_response_is_rendered() {
        let backend = Arc::new(
            ScriptedBackend::new().on_submit(Ok(SubmitOutcome::Immediate("Day 1\nDay 2".into()))),
        );
        let mut views: Vec<View> = Vec::new();

        let outcome = session(&backend).plan(&form(), &mut views).await;

        assert_eq!(outcome, PlanOutcome::Answered("Day 1\nDay 2".to_string()));
        assert_eq!(
            views.last(),
            Some(&View::Text {
                title: TRIP_DETAILS_TITLE.to_string(),
                lines: vec!["Day 1".to_string(), "Day 2".to_string()],
            })
        );
    }

    #[tokio::test]
    async fn test_queued_job_is_polled_to_completion() {
        let backend = Arc::new(ScriptedBackend::new().queued("job-1").on_status(
            "job-1",
            [
                Step::Status(JobStatus::Processing),
                completed(TripPlan::default()),
            ],
        ));
        let mut views: Vec<View> = Vec::new();

        let outcome = session(&backend).plan(&form(), &mut views).await;

        assert!(matches!(
            outcome,
            PlanOutcome::Completed { ref handle, .. } if handle.as_str() == "job-1"
        ));
        assert!(matches!(views[0], View::Loading { .. }));
        assert!(matches!(views[1], View::Processing { .. }));
        assert!(matches!(views[2], View::Trip(_)));
        assert_eq!(views.len(), 3);
        assert_eq!(backend.status_calls("job-1"), 2);
    }

    #[tokio::test]
    async fn test_server_error_is_shown_verbatim() {
        let backend = Arc::new(
            ScriptedBackend::new()
                .on_submit(Err(ClientError::server(500, "Failed to send message to SQS."))),
        );
        let mut views: Vec<View> = Vec::new();

        let outcome = session(&backend).plan(&form(), &mut views).await;

        assert_eq!(
            views.last(),
            Some(&View::Failure {
                kind: FailureKind::Server,
                message: "Error: Failed to send message to SQS.".to_string(),
            })
        );
        assert!(matches!(
            outcome,
            PlanOutcome::Failed {
                kind: FailureKind::Server,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_transport_error_on_submit_is_not_retried() {
        let backend = Arc::new(
            ScriptedBackend::new().on_submit(Err(ClientError::ParseError("reset".to_string()))),
        );
        let mut views: Vec<View> = Vec::new();

        let outcome = session(&backend).plan(&form(), &mut views).await;

        assert_eq!(
            outcome,
            PlanOutcome::Failed {
                kind: FailureKind::Transport,
                message: TRANSPORT_MESSAGE.to_string(),
            }
        );
        assert_eq!(backend.submit_calls(), 1);
    }

    #[tokio::test]
    async fn test_unexpected_status_fails_submission() {
        let backend = Arc::new(ScriptedBackend::new().queued("job").on_status(
            "job",
            [Step::Status(JobStatus::Unexpected("cancelled".to_string()))],
        ));
        let mut views: Vec<View> = Vec::new();

        let outcome = session(&backend).plan(&form(), &mut views).await;

        assert_eq!(
            outcome,
            PlanOutcome::Failed {
                kind: FailureKind::Protocol,
                message: "Unexpected status: cancelled".to_string(),
            }
        );
        assert_eq!(backend.status_calls("job"), 1);
    }

    #[tokio::test]
    async fn test_new_submission_cancels_previous_poll() {
        let backend = Arc::new(
            ScriptedBackend::new()
                .queued("job-1")
                .queued("job-2")
                .on_status("job-1", [Step::Hang])
                .on_status("job-2", [completed(TripPlan::default())]),
        );
        let session = Arc::new(session(&backend));

        let first = {
            let session = Arc::clone(&session);
            tokio::spawn(async move {
                let mut views: Vec<View> = Vec::new();
                let outcome = session.plan(&form(), &mut views).await;
                (outcome, views)
            })
        };

        backend.hung.notified().await;

        let mut views: Vec<View> = Vec::new();
        let second = session.plan(&form(), &mut views).await;
        let (first, first_views) = first.await.unwrap();

        assert_eq!(first, PlanOutcome::Cancelled);
        assert!(!first_views.iter().any(View::is_terminal));
        assert!(matches!(second, PlanOutcome::Completed { .. }));
        assert_eq!(backend.status_calls("job-1"), 1);
    }

    #[tokio::test]
    async fn test_cancel_stops_resumed_poll() {
        let backend = Arc::new(ScriptedBackend::new().on_status("job", [Step::Hang]));
        let session = Arc::new(session(&backend));

        let task = {
            let session = Arc::clone(&session);
            tokio::spawn(async move {
                session
                    .resume(JobHandle::new("job"), &mut Vec::<View>::new())
                    .await
            })
        };

        backend.hung.notified().await;
        session.cancel();

        assert_eq!(task.await.unwrap(), PlanOutcome::Cancelled);
    }

    #[tokio::test]
    async fn test_result_arriving_after_cancel_is_not_rendered() {
        let cancel = CancellationToken::new();
        let backend = Arc::new(ScriptedBackend::new().on_status(
            "job",
            [Step::CancelThen(
                cancel.clone(),
                JobStatus::Completed {
                    result: TripPlan::default(),
                    pdf_url: None,
                },
            )],
        ));
        let mut views: Vec<View> = Vec::new();

        let outcome = session(&backend)
            .track(JobHandle::new("job"), &mut views, &cancel)
            .await;

        assert_eq!(outcome, PlanOutcome::Cancelled);
        assert!(views.is_empty());
        assert_eq!(backend.status_calls("job"), 1);
    }
}
