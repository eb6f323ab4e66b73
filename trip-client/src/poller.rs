//! Result poller
//!
//! Polls the status endpoint for one job until it completes, reports an
//! unrecognized status, runs past its deadline, or is cancelled. Transient
//! failures along the way are shown as "retrying" and polled again.

use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use trip_core::domain::job::{JobHandle, JobStatus};
use trip_core::domain::trip::TripPlan;
use trip_core::render::{
    PROCESSING_MESSAGE, RETRYING_MESSAGE, render_timeout, render_trip, render_unexpected_status,
};
use trip_core::{View, ViewSink};

use crate::TripBackend;
use crate::clock::Clock;

/// Polling cadence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    /// Wait between two status checks
    pub interval: Duration,
    /// Maximum time spent polling, measured from the first check
    pub deadline: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(5_000),
            deadline: Duration::from_millis(300_000),
        }
    }
}

/// How a poll ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    Completed {
        result: TripPlan,
        pdf_url: Option<String>,
    },
    /// The backend reported a status the client does not know
    Unexpected(String),
    TimedOut,
    /// Superseded by a newer submission or stopped by the user
    Cancelled,
}

impl PollOutcome {
    /// The terminal view for this outcome
    ///
    /// A cancelled poll no longer owns the display and renders nothing.
    pub fn to_view(&self) -> Option<View> {
        match self {
            PollOutcome::Completed { result, pdf_url } => {
                Some(View::Trip(render_trip(result, pdf_url.as_deref())))
            }
            PollOutcome::Unexpected(status) => Some(render_unexpected_status(status)),
            PollOutcome::TimedOut => Some(render_timeout()),
            PollOutcome::Cancelled => None,
        }
    }
}

/// Polls a job until it reaches a terminal state
#[derive(Clone)]
pub struct ResultPoller {
    backend: Arc<dyn TripBackend>,
    clock: Arc<dyn Clock>,
    config: PollConfig,
}

impl ResultPoller {
    pub fn new(backend: Arc<dyn TripBackend>, clock: Arc<dyn Clock>, config: PollConfig) -> Self {
        Self {
            backend,
            clock,
            config,
        }
    }

    /// Poll `handle` until a terminal outcome
    ///
    /// Intermediate views (processing, retrying) are committed to `sink`;
    /// the terminal view is left to the caller via [`PollOutcome::to_view`].
    pub async fn poll(
        &self,
        handle: &JobHandle,
        sink: &mut dyn ViewSink,
        cancel: &CancellationToken,
    ) -> PollOutcome {
        let start = self.clock.now();
        let mut attempt: u32 = 0;

        info!(
            request_id = %handle,
            "Polling for trip result (interval: {:?}, deadline: {:?})",
            self.config.interval, self.config.deadline
        );

        while self.clock.now().duration_since(start) < self.config.deadline {
            attempt += 1;
            debug!(request_id = %handle, attempt, "Checking job status");

            let checked = tokio::select! {
                biased;
                _ = cancel.cancelled() => return self.cancelled(handle, attempt),
                checked = self.backend.get_result(handle) => checked,
            };

            match checked {
                Ok(JobStatus::Completed { result, pdf_url }) => {
                    info!(request_id = %handle, attempt, "Trip plan completed");
                    return PollOutcome::Completed { result, pdf_url };
                }
                Ok(JobStatus::Processing) => {
                    sink.commit(View::Processing {
                        request_id: handle.request_id.clone(),
                        attempt,
                        message: PROCESSING_MESSAGE.to_string(),
                    });
                }
                Ok(JobStatus::Unexpected(status)) => {
                    warn!(request_id = %handle, attempt, %status, "Unexpected job status, giving up");
                    return PollOutcome::Unexpected(status);
                }
                Err(e) if e.is_transient() => {
                    warn!(request_id = %handle, attempt, "Status check failed, retrying: {}", e);
                    sink.commit(View::Retrying {
                        attempt,
                        message: RETRYING_MESSAGE.to_string(),
                    });
                }
                Err(e) => {
                    warn!(request_id = %handle, attempt, "Status check rejected: {}", e);
                    return PollOutcome::Unexpected(e.to_string());
                }
            }

            tokio::select! {
                biased;
                _ = cancel.cancelled() => return self.cancelled(handle, attempt),
                _ = self.clock.sleep(self.config.interval) => {}
            }
        }

        warn!(request_id = %handle, attempt, "Gave up waiting for trip plan");
        PollOutcome::TimedOut
    }

    fn cancelled(&self, handle: &JobHandle, attempt: u32) -> PollOutcome {
        info!(request_id = %handle, attempt, "Polling cancelled");
        PollOutcome::Cancelled
    }
}
