//! Core domain types
//!
//! This module contains the structures shared by the client library and the
//! command-line front end: what gets submitted, how a queued job is
//! identified, and what a finished trip plan looks like.

pub mod job;
pub mod submission;
pub mod trip;
