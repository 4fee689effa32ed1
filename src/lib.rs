//! Smoke CLI - sequential HTTP API smoke tests
//!
//! This library provides a small conformance harness for JSON HTTP APIs:
//! request execution, token and artifact sharing between dependent steps,
//! ordered scenarios and an end-of-run report. A suite for the
//! time-tracking API is built in; other APIs can be covered by YAML plans.

pub mod cli;
pub mod commands;
pub mod common;
pub mod harness;
pub mod http;
pub mod plan;
pub mod session;
pub mod suite;

// Re-export commonly used types for tests
pub use common::{Error, Result};
pub use harness::{Report, RunSummary, Sequencer};
pub use http::{Executor, HttpExecutor, Outcome, RequestSpec};
