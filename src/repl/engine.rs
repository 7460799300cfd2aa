use rustyline::history::DefaultHistory;
use rustyline::{Config, Editor};

use std::sync::Arc;

use crate::config::{CompletionMode, HistoryConfig};
use crate::error::{Result, ShellError};
use crate::executor::Prompter;
use crate::session::{SharedState, Workspace};

use super::completion::{CompletionRouter, PathCandidateProvider};
use super::helper::ShellHelper;

/// Line editor for the interactive command loop.
pub struct ReplEngine {
    /// Line editor with completion helper
    editor: Editor<ShellHelper, DefaultHistory>,

    /// Shared session directory for the prompt
    state: SharedState,

    /// History configuration
    history: HistoryConfig,
}

impl ReplEngine {
    /// Create a new REPL engine.
    ///
    /// # Arguments
    /// * `state` - Shared session directory handle
    /// * `workspace` - Filesystem implementation for path completion
    /// * `history_config` - History configuration
    /// * `completion_mode` - Completion routing mode
    ///
    /// # Returns
    /// * `Result<Self>` - New REPL engine or error
    pub fn new(
        state: SharedState,
        workspace: Arc<dyn Workspace>,
        history_config: HistoryConfig,
        completion_mode: CompletionMode,
    ) -> Result<Self> {
        let config = Config::builder()
            .max_history_size(history_config.max_size)?
            .history_ignore_space(true)
            .build();

        let provider = PathCandidateProvider::new(state.clone(), workspace);
        let helper = ShellHelper::new(CompletionRouter::new(completion_mode, provider));
        let mut editor = Editor::<ShellHelper, DefaultHistory>::with_config(config)?;
        editor.set_helper(Some(helper));

        // Load history if persistent
        if history_config.persist {
            let _ = editor.load_history(&history_config.file_path);
        }

        Ok(Self {
            editor,
            state,
            history: history_config,
        })
    }

    /// Read a single line of input at the main prompt.
    ///
    /// # Returns
    /// * `Result<Option<String>>` - Input line, or None on EOF / interrupt
    pub fn read_line(&mut self) -> Result<Option<String>> {
        let prompt = self.generate_prompt();
        match self.editor.readline(&prompt) {
            Ok(line) => {
                let _ = self.editor.add_history_entry(line.as_str());
                Ok(Some(line))
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                // Ctrl-C
                Ok(None)
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                // Ctrl-D
                Ok(None)
            }
            Err(err) => Err(ShellError::Generic(format!("Read error: {err}"))),
        }
    }

    /// Save history to the configured file, if persistence is enabled.
    ///
    /// # Returns
    /// * `Result<()>` - Success or error
    pub fn save_history(&mut self) -> Result<()> {
        if self.history.persist {
            self.editor.save_history(&self.history.file_path)?;
        }
        Ok(())
    }

    /// Generate the prompt string from the session directory.
    fn generate_prompt(&self) -> String {
        format!("{}> ", self.state.current_dir().display())
    }
}

impl Prompter for ReplEngine {
    /// Sub-prompts reuse the line editor so they get editing and completion.
    fn ask(&mut self, message: &str) -> Result<String> {
        match self.editor.readline(message) {
            Ok(line) => Ok(line.trim().to_string()),
            Err(
                rustyline::error::ReadlineError::Interrupted
                | rustyline::error::ReadlineError::Eof,
            ) => Err(ShellError::Generic("input interrupted".to_string())),
            Err(err) => Err(ShellError::Generic(format!("Read error: {err}"))),
        }
    }
}
