//! Library half of the `insight` binary: logging, settings, and argument
//! helpers that integration tests can reach.

pub mod config;
pub mod filters;
pub mod logging;
