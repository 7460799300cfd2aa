//! Output formatting for datasets.
//!
//! One serialization path is shared by print-to-screen and save-to-file so the
//! two are byte-identical; the terminal variant only layers colors on top.

pub mod json;

pub use json::JsonFormatter;
