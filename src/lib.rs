//! csvsh Library
//!
//! This library provides the core functionality for csvsh, an interactive
//! shell that browses a mounted filesystem, loads CSV files into an
//! in-memory dataset, and exports them as JSON or imports them into MongoDB.
//!
//! # Modules
//!
//! - `cli`: Command-line interface and argument parsing
//! - `config`: Configuration management
//! - `connection`: MongoDB connection management
//! - `dataset`: CSV loading and the in-memory tabular dataset
//! - `error`: Error types and handling
//! - `executor`: Command execution, export dispatch, and import
//! - `formatter`: JSON output formatting
//! - `parser`: Command and sub-prompt parsing
//! - `repl`: Interactive prompt loop and completion
//! - `session`: Session state over the filesystem seam
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use csvsh::session::{OsWorkspace, Session, SharedState};
//!
//! let state = SharedState::new("/host".into());
//! let mut session = Session::new(state, Arc::new(OsWorkspace::new()));
//! let rows = session.load_csv("people.csv")?;
//! println!("loaded {rows} rows");
//! # Ok::<(), csvsh::error::ShellError>(())
//! ```

pub mod cli;
pub mod config;
pub mod connection;
pub mod dataset;
pub mod error;
pub mod executor;
pub mod formatter;
pub mod parser;
pub mod repl;
pub mod session;

// Re-export commonly used types
pub use config::Config;
pub use connection::ConnectionManager;
pub use dataset::Dataset;
pub use error::{Result, ShellError};
pub use executor::{ExecutionContext, Flow};
pub use formatter::JsonFormatter;
pub use parser::{Command, CommandParser, ExportChoice};
pub use repl::ReplEngine;
pub use session::Session;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library version string
///
/// # Returns
/// * `&str` - Version string
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
