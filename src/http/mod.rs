//! Request execution
//!
//! Turns a [`RequestSpec`] into an [`Outcome`] without ever failing: a
//! refused connection is as much a result as a 404.

mod executor;
mod outcome;
mod request;

pub use executor::{Executor, HttpExecutor};
pub use outcome::{value_text, Body, Outcome};
pub use request::{Method, RequestSpec};
