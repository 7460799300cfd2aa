//! Completion routing between command keywords and filesystem paths.
//!
//! Given the text typed so far, the router decides whether to offer command
//! suggestions or filesystem-path suggestions:
//! - nothing typed: every command keyword
//! - a path-taking command (`cd`, `ls`, `delete`) followed by a space or a
//!   begun argument: filesystem entries for the remainder
//! - a single token still being typed: keywords filtered by prefix
//!
//! The `path-only` mode bypasses the routing and always completes paths,
//! preserving the older single-completer behavior behind a configuration
//! flag.

use std::path::Path;
use std::sync::Arc;

use rustyline::completion::Pair;

use crate::config::CompletionMode;
use crate::session::{SharedState, Workspace};

/// Command keywords offered at the top level.
pub const COMMAND_KEYWORDS: [&str; 5] = ["ls", "pwd", "cd", "delete", "exit"];

/// Commands whose argument is a filesystem path.
const PATH_COMMANDS: [&str; 3] = ["cd", "ls", "delete"];

/// Routes completion requests to command or path candidates.
pub struct CompletionRouter {
    /// Routing mode
    mode: CompletionMode,

    /// Filesystem candidate source
    provider: PathCandidateProvider,
}

impl CompletionRouter {
    /// Create a new router.
    ///
    /// # Arguments
    /// * `mode` - Routing mode
    /// * `provider` - Filesystem candidate source
    pub fn new(mode: CompletionMode, provider: PathCandidateProvider) -> Self {
        Self { mode, provider }
    }

    /// Complete the input at the given cursor position.
    ///
    /// Never panics, including on empty or whitespace-only input.
    ///
    /// # Arguments
    /// * `line` - The input line
    /// * `pos` - Cursor position (byte index)
    ///
    /// # Returns
    /// * `(usize, Vec<Pair>)` - Completion start position and candidates
    pub fn complete(&self, line: &str, pos: usize) -> (usize, Vec<Pair>) {
        let text = &line[..pos];

        match self.mode {
            CompletionMode::PathOnly => {
                let (start, pairs) = self.provider.complete(text);
                (start, pairs)
            }
            CompletionMode::Unified => self.route(text),
        }
    }

    /// Decide between command and path completion for the typed text.
    fn route(&self, text: &str) -> (usize, Vec<Pair>) {
        let trimmed = text.trim_start();
        let command_start = text.len() - trimmed.len();

        let mut tokens = trimmed.split_whitespace();
        let Some(command) = tokens.next() else {
            // Nothing typed: offer every command keyword
            return (text.len(), Self::command_candidates(""));
        };

        let argument_begun = text.ends_with(char::is_whitespace) || tokens.next().is_some();

        if argument_begun {
            if Self::is_path_command(command) {
                // Complete the remainder after the command and its separator
                // as a filesystem path, rebasing spans onto the full line
                let command_end = command_start + command.len();
                let rest = &text[command_end..];
                let argument_start = command_end + (rest.len() - rest.trim_start().len());

                let (start, pairs) = self.provider.complete(&text[argument_start..]);
                return (argument_start + start, pairs);
            }
            // A completed non-path command takes no argument
            return (text.len(), Vec::new());
        }

        // A single token still being typed: filter command keywords
        (command_start, Self::command_candidates(command))
    }

    fn is_path_command(command: &str) -> bool {
        PATH_COMMANDS
            .iter()
            .any(|candidate| command.eq_ignore_ascii_case(candidate))
    }

    fn command_candidates(prefix: &str) -> Vec<Pair> {
        let prefix = prefix.to_ascii_lowercase();
        COMMAND_KEYWORDS
            .iter()
            .filter(|keyword| keyword.starts_with(&prefix))
            .map(|keyword| Pair {
                display: keyword.to_string(),
                replacement: keyword.to_string(),
            })
            .collect()
    }
}

/// Filesystem candidates for path completion.
///
/// Candidates are resolved against the session's current directory through
/// the [`Workspace`] seam, so suggestions follow `cd` and never touch the
/// process working directory.
pub struct PathCandidateProvider {
    /// Shared session directory
    state: SharedState,

    /// Filesystem access
    workspace: Arc<dyn Workspace>,
}

impl PathCandidateProvider {
    /// Create a new provider.
    ///
    /// # Arguments
    /// * `state` - Shared session directory handle
    /// * `workspace` - Filesystem implementation
    pub fn new(state: SharedState, workspace: Arc<dyn Workspace>) -> Self {
        Self { state, workspace }
    }

    /// Complete a partial path relative to the session directory.
    ///
    /// The partial is split at its last `/` into a directory part and a name
    /// prefix; matching entries of the directory are returned with the
    /// directory part preserved in the replacement. Directories gain a
    /// trailing `/`. Dot-files are hidden unless the prefix itself starts
    /// with `.`.
    ///
    /// # Arguments
    /// * `partial` - Partially typed path
    ///
    /// # Returns
    /// * `(usize, Vec<Pair>)` - Offset into `partial` where replacements
    ///   begin (always 0) and the sorted candidates
    pub fn complete(&self, partial: &str) -> (usize, Vec<Pair>) {
        let (dir_part, prefix) = match partial.rfind('/') {
            Some(index) => partial.split_at(index + 1),
            None => ("", partial),
        };

        let base = self.state.current_dir();
        let dir = if dir_part.is_empty() {
            base
        } else {
            let path = Path::new(dir_part);
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                base.join(path)
            }
        };

        let Ok(mut entries) = self.workspace.read_dir(&dir) else {
            return (0, Vec::new());
        };
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        let show_hidden = prefix.starts_with('.');
        let pairs = entries
            .into_iter()
            .filter(|entry| entry.name.starts_with(prefix))
            .filter(|entry| show_hidden || !entry.name.starts_with('.'))
            .map(|entry| {
                let suffix = if entry.is_dir { "/" } else { "" };
                Pair {
                    display: format!("{}{}", entry.name, suffix),
                    replacement: format!("{}{}{}", dir_part, entry.name, suffix),
                }
            })
            .collect();

        (0, pairs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemoryWorkspace;
    use std::path::PathBuf;

    fn test_router(mode: CompletionMode) -> (CompletionRouter, SharedState) {
        let ws = MemoryWorkspace::new();
        ws.add_dir("/host/data/reports");
        ws.add_file("/host/data/q3.csv", "a\n1\n");
        ws.add_file("/host/alpha.csv", "a\n1\n");
        ws.add_file("/host/notes.txt", "hello");
        ws.add_file("/host/.hidden", "secret");

        let state = SharedState::new(PathBuf::from("/host"));
        let provider = PathCandidateProvider::new(state.clone(), Arc::new(ws));
        (CompletionRouter::new(mode, provider), state)
    }

    fn replacements(pairs: &[Pair]) -> Vec<&str> {
        pairs.iter().map(|p| p.replacement.as_str()).collect()
    }

    #[test]
    fn test_empty_input_offers_all_commands() {
        let (router, _) = test_router(CompletionMode::Unified);
        let (start, pairs) = router.complete("", 0);
        assert_eq!(start, 0);
        assert_eq!(replacements(&pairs), vec!["ls", "pwd", "cd", "delete", "exit"]);
    }

    #[test]
    fn test_whitespace_only_input_does_not_panic() {
        let (router, _) = test_router(CompletionMode::Unified);
        let (_, pairs) = router.complete("   ", 3);
        assert_eq!(pairs.len(), COMMAND_KEYWORDS.len());
    }

    #[test]
    fn test_command_prefix_filtering() {
        let (router, _) = test_router(CompletionMode::Unified);

        let (start, pairs) = router.complete("p", 1);
        assert_eq!(start, 0);
        assert_eq!(replacements(&pairs), vec!["pwd"]);

        let (_, pairs) = router.complete("de", 2);
        assert_eq!(replacements(&pairs), vec!["delete"]);
    }

    #[test]
    fn test_command_prefix_is_case_insensitive() {
        let (router, _) = test_router(CompletionMode::Unified);
        let (_, pairs) = router.complete("EX", 2);
        assert_eq!(replacements(&pairs), vec!["exit"]);
    }

    #[test]
    fn test_trailing_space_after_path_command_lists_entries() {
        let (router, _) = test_router(CompletionMode::Unified);
        let (start, pairs) = router.complete("cd ", 3);
        assert_eq!(start, 3);
        // Dot-files hidden, directories suffixed
        assert_eq!(
            replacements(&pairs),
            vec!["alpha.csv", "data/", "notes.txt"]
        );
    }

    #[test]
    fn test_begun_argument_is_path_completed() {
        let (router, _) = test_router(CompletionMode::Unified);
        let (start, pairs) = router.complete("cd da", 5);
        assert_eq!(start, 3);
        assert_eq!(replacements(&pairs), vec!["data/"]);
    }

    #[test]
    fn test_nested_path_keeps_directory_part() {
        let (router, _) = test_router(CompletionMode::Unified);
        let (start, pairs) = router.complete("delete data/q", 13);
        assert_eq!(start, 7);
        assert_eq!(replacements(&pairs), vec!["data/q3.csv"]);
    }

    #[test]
    fn test_extra_spaces_before_argument() {
        let (router, _) = test_router(CompletionMode::Unified);
        let (start, pairs) = router.complete("ls   da", 7);
        assert_eq!(start, 5);
        assert_eq!(replacements(&pairs), vec!["data/"]);
    }

    #[test]
    fn test_dot_prefix_reveals_hidden_entries() {
        let (router, _) = test_router(CompletionMode::Unified);
        let (_, pairs) = router.complete("delete .h", 9);
        assert_eq!(replacements(&pairs), vec![".hidden"]);
    }

    #[test]
    fn test_non_path_command_with_space_yields_nothing() {
        let (router, _) = test_router(CompletionMode::Unified);
        let (_, pairs) = router.complete("exit ", 5);
        assert!(pairs.is_empty());
    }

    #[test]
    fn test_unknown_command_argument_yields_nothing() {
        let (router, _) = test_router(CompletionMode::Unified);
        let (_, pairs) = router.complete("frobnicate da", 13);
        assert!(pairs.is_empty());
    }

    #[test]
    fn test_completion_follows_cd() {
        let (router, state) = test_router(CompletionMode::Unified);
        state.set_current_dir(PathBuf::from("/host/data"));

        let (_, pairs) = router.complete("cd ", 3);
        assert_eq!(replacements(&pairs), vec!["q3.csv", "reports/"]);
    }

    #[test]
    fn test_path_only_mode_never_suggests_commands() {
        let (router, _) = test_router(CompletionMode::PathOnly);

        // "cd" is treated as a path prefix, not a command
        let (_, pairs) = router.complete("cd", 2);
        assert!(pairs.is_empty());

        let (start, pairs) = router.complete("al", 2);
        assert_eq!(start, 0);
        assert_eq!(replacements(&pairs), vec!["alpha.csv"]);
    }

    #[test]
    fn test_completion_respects_cursor_position() {
        let (router, _) = test_router(CompletionMode::Unified);
        // Cursor inside the first token: complete commands, not paths
        let (start, pairs) = router.complete("cd data", 2);
        assert_eq!(start, 0);
        assert_eq!(replacements(&pairs), vec!["cd"]);
    }
}
