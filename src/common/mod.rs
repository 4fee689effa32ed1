//! Common utilities shared across the harness and the CLI

pub mod config;
pub mod error;
pub mod logging;
pub mod paths;

pub use error::{Error, Result};

/// Time-of-day stamp (`HHMMSS`) used to keep created entity names unique
/// between runs against the same server.
pub fn time_stamp() -> String {
    chrono::Local::now().format("%H%M%S").to_string()
}
