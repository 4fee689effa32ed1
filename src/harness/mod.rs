//! Test harness core
//!
//! Cases are judged into verdicts, scenarios group cases, the sequencer
//! runs scenarios in a fixed order and the report aggregates everything
//! once the run is over.

mod case;
mod report;
mod sequencer;
mod verdict;

#[cfg(test)]
pub(crate) mod testing;

pub use case::{Case, Check, Describe};
pub use report::{Format, Report, RunSummary};
pub use sequencer::{Checked, Context, Scenario, Sequencer};
pub use verdict::{Status, Verdict};
