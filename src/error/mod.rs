//! Error handling for csvsh.
//!
//! This module provides the crate-wide error taxonomy:
//! - Navigation errors for filesystem commands (`cd`, `ls`, `delete`)
//! - Load errors for CSV ingestion
//! - Export and import errors for the JSON/MongoDB pipeline
//! - Wrappers for the underlying I/O, CSV, JSON, and driver errors
//!
//! Every externally-caused failure is reported at the operation site and the
//! relevant prompt loop continues; only unclassified internal errors are
//! allowed to propagate out of `main`.

pub mod kinds;

// Re-export commonly used types
pub use kinds::{
    ConfigError, ConnectionError, ExportError, ImportError, LoadError, NavigationError,
    ParseError, Result, ShellError,
};
