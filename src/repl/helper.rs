//! rustyline helper wiring for the shell.
//!
//! The helper delegates completion to the [`CompletionRouter`]; hinting,
//! highlighting, and validation keep their default single-line behavior.

use rustyline::Helper;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;

use super::completion::CompletionRouter;

/// Helper for rustyline providing routed completion.
pub struct ShellHelper {
    /// Command/path completion router
    router: CompletionRouter,
}

impl ShellHelper {
    /// Create a new helper.
    ///
    /// # Arguments
    /// * `router` - Completion router
    pub fn new(router: CompletionRouter) -> Self {
        Self { router }
    }
}

impl Helper for ShellHelper {}

impl Completer for ShellHelper {
    type Candidate = Pair;

    /// Complete input at the given position
    ///
    /// # Arguments
    /// * `line` - Current line
    /// * `pos` - Cursor position
    /// * `_ctx` - Readline context
    ///
    /// # Returns
    /// * `Result<(usize, Vec<Pair>)>` - Completion position and candidates
    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        Ok(self.router.complete(line, pos))
    }
}

impl Hinter for ShellHelper {
    type Hint = String;

    fn hint(&self, _line: &str, _pos: usize, _ctx: &rustyline::Context<'_>) -> Option<String> {
        None
    }
}

// Input is single-line commands; the default highlighting and validation
// behavior is sufficient.
impl Highlighter for ShellHelper {}

impl Validator for ShellHelper {}
