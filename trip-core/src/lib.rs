//! Trip Core
//!
//! Core types and pure logic for the trip planner client.
//!
//! This crate contains:
//! - Domain types: submissions, job handles, job status and trip plans
//! - DTOs: wire shapes of the trip planner HTTP API
//! - Form validation and the trip renderer (view-models and sinks)

pub mod domain;
pub mod dto;
pub mod form;
pub mod render;
pub mod view;

pub use form::{TripForm, ValidationError};
pub use view::{FailureKind, View, ViewSink};
