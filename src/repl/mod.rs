//! Interactive prompt loop for csvsh
//!
//! This module provides the interactive shell interface:
//! - Line editing and command history with rustyline
//! - Auto-completion routed between command keywords and filesystem paths
//! - Contextual prompt showing the current browsing directory
//!
//! The completion layer reads the browsing directory through the session's
//! [`SharedState`](crate::session::SharedState) handle, so `cd` is reflected
//! in path suggestions immediately.

pub mod completion;
pub mod engine;
pub mod helper;

pub use completion::{CompletionRouter, PathCandidateProvider};
pub use engine::ReplEngine;
pub use helper::ShellHelper;
