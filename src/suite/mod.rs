//! Built-in smoke suite for the time-tracking API
//!
//! Order matters: logins must run before anything that needs a token, and
//! the employee created in "Employee Management" is what the time entry,
//! QR scan and summary scenarios work with.

mod access;
mod auth;
mod basic;
mod companies;
mod employees;
mod qr_scan;
mod summaries;
mod time_entries;
mod users;

pub use access::UnauthorizedAccess;
pub use auth::Authentication;
pub use basic::BasicEndpoints;
pub use companies::Companies;
pub use employees::Employees;
pub use qr_scan::QrScan;
pub use summaries::Summaries;
pub use time_entries::TimeEntries;
pub use users::Users;

use crate::harness::Sequencer;
use crate::http::Outcome;

/// Report title for the built-in suite
pub const TITLE: &str = "TimeTracker API Tests";

/// Company the seeded admin belongs to; new users and employees join it
pub const SEED_COMPANY_ID: &str = "1";

/// The built-in suite in execution order
pub fn builtin() -> Sequencer {
    Sequencer::new(TITLE)
        .with(BasicEndpoints)
        .with(Authentication)
        .with(Companies)
        .with(Users)
        .with(Employees)
        .with(TimeEntries)
        .with(QrScan)
        .with(Summaries)
        .with(UnauthorizedAccess)
}

/// Detail line counting the entries of a listing response
fn found(noun: &'static str) -> impl Fn(&Outcome) -> String + Send + Sync {
    move |outcome| format!("Found {} {}", outcome.count(), noun)
}
