//! Static tool catalog.
//!
//! This module provides:
//! - `ToolDescriptor`: title, description, accept filter and output format of a tool
//! - `ToolCategory`: the PDF / Image / Document sections tools are grouped under
//! - `AcceptFilter`: advisory file-picker filter (`accept` attribute)
//! - Lookup helpers that fall back to a generic descriptor for unknown ids
//!
//! # Example
//!
//! ```
//! use toolhub_core::catalog;
//!
//! let tool = catalog::resolve("pdf-to-word");
//! assert_eq!(tool.title, "Convert PDF to Word");
//! assert_eq!(tool.accept.to_string(), ".pdf");
//!
//! let unknown = catalog::resolve("pdf-merge");
//! assert_eq!(unknown.title, "Process Files");
//! ```

mod registry;
mod types;

pub use registry::{all, by_category, lookup, resolve, DEFAULT_TOOL};
pub use types::{AcceptFilter, ToolCategory, ToolDescriptor};
