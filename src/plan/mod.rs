//! YAML test plans
//!
//! Describes request sequences in YAML instead of Rust so other APIs can
//! be smoke-tested with the same harness. Tokens and artifacts captured by
//! one step are available to later steps through `auth` and `{{key}}`
//! placeholders.

mod config;
mod runner;

pub use config::*;
pub use runner::{load_plan, parse_plan, PlanScenario};
