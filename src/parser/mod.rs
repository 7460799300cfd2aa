//! Command parsing for the interactive shell.
//!
//! Top-level input is a closed set of navigation commands plus the fallthrough
//! CSV-path case; the export sub-prompt accepts a separate three-way choice.
//! Both are parsed with simple string matching on whitespace-delimited tokens.

pub mod command;

pub use command::{Command, CommandParser, ExportChoice};
