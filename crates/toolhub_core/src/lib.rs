//! ToolHub Core - Backend logic for the ToolHub document tools front-end
//!
//! This crate contains the tool catalog and the tool session state machine
//! with zero UI dependencies. Any front-end (terminal, web view, native GUI)
//! drives a [`session::ToolSession`] and renders from its events.

pub mod catalog;
pub mod config;
pub mod logging;
pub mod models;
pub mod progress;
pub mod session;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
