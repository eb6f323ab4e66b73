//! View-models and output sinks
//!
//! Every handler describes what the user should see as a [`View`] and commits
//! it to a [`ViewSink`] owned by the caller. Each commit replaces the
//! previous view wholesale.

use serde::Serialize;

/// Failure categories surfaced to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Local input problem; nothing was sent
    Validation,
    /// The backend answered with an error message
    Server,
    /// No usable response (network or decoding failure)
    Transport,
    /// Polling deadline exceeded
    Timeout,
    /// The backend broke the API contract (e.g. unknown job status)
    Protocol,
}

/// Everything the output region can show
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum View {
    /// Request sent, waiting for the first answer
    Loading { message: String },
    /// Job queued and still running on the backend
    Processing {
        request_id: String,
        attempt: u32,
        message: String,
    },
    /// A status check failed; the next one will retry
    Retrying { attempt: u32, message: String },
    /// Free text answer, one entry per line
    Text { title: String, lines: Vec<String> },
    /// Structured trip plan
    Trip(TripView),
    /// Terminal failure
    Failure { kind: FailureKind, message: String },
}

impl View {
    /// Whether this view ends a submission
    pub fn is_terminal(&self) -> bool {
        matches!(self, View::Text { .. } | View::Trip(_) | View::Failure { .. })
    }
}

/// Rendered trip plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TripView {
    pub sections: Vec<Section>,
    pub pdf_link: Option<Link>,
}

/// One titled block of a trip plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub title: String,
    pub body: SectionBody,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SectionBody {
    /// Text with its line breaks preserved
    Prose { lines: Vec<String> },
    /// Discrete list items, in order
    List { items: Vec<String> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub label: String,
    pub href: String,
}

/// Destination for committed views
pub trait ViewSink: Send {
    /// Replace whatever is displayed with `view`
    fn commit(&mut self, view: View);
}

/// Collects every commit; the last element is what is on screen
impl ViewSink for Vec<View> {
    fn commit(&mut self, view: View) {
        self.push(view);
    }
}
