//! Agents - prompt templates bound to a completion client

mod checker;
mod reviser;

pub use checker::{CheckResult, CheckerAgent};
pub use reviser::ReviserAgent;
