//! Command execution for the interactive shell.
//!
//! This module provides the execution layer that processes parsed commands:
//! - Navigation handlers for `pwd`, `ls`, `cd`, and `delete`
//! - The CSV load step and the export dispatcher sub-loop
//! - The MongoDB importer
//! - The `Prompter` seam used by all sub-prompts
//!
//! Every expected failure is reported at the operation site and the prompt
//! loop continues; only `exit` terminates the session, signalled to the
//! driver through [`Flow::Exit`] rather than by exiting the process.

pub mod export;
pub mod import;
pub mod navigator;
pub mod prompt;

use crate::config::Config;
use crate::error::Result;
use crate::parser::Command;
use crate::session::Session;

pub use prompt::{Prompter, StdinPrompter};

/// What the driver should do after executing a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep reading commands
    Continue,

    /// Shut down in an orderly fashion
    Exit,
}

/// Execution context shared by all command handlers.
pub struct ExecutionContext {
    /// Effective configuration
    config: Config,
}

impl ExecutionContext {
    /// Create a new execution context
    ///
    /// # Arguments
    /// * `config` - Effective configuration
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Execute one parsed command.
    ///
    /// Expected failures are reported here and do not propagate; the returned
    /// error is reserved for unclassified internal failures.
    ///
    /// # Arguments
    /// * `command` - Parsed command
    /// * `session` - Session state
    /// * `prompter` - Source for sub-prompt answers
    ///
    /// # Returns
    /// * `Result<Flow>` - Whether the driver should continue or exit
    pub async fn execute(
        &self,
        command: Command,
        session: &mut Session,
        prompter: &mut dyn Prompter,
    ) -> Result<Flow> {
        match command {
            Command::Pwd => navigator::pwd(session),
            Command::Ls(path) => navigator::list(session, path.as_deref()),
            Command::Cd(dir) => navigator::change_dir(session, &dir),
            Command::Delete(file) => navigator::delete(session, &file),
            Command::Load(path) => self.load_and_dispatch(session, prompter, &path).await?,
            Command::Exit => return Ok(Flow::Exit),
        }

        Ok(Flow::Continue)
    }

    /// Load a CSV file and, on success, enter the export dispatcher.
    async fn load_and_dispatch(
        &self,
        session: &mut Session,
        prompter: &mut dyn Prompter,
        path: &str,
    ) -> Result<()> {
        match session.load_csv(path) {
            Ok(rows) => {
                println!("Loaded {rows} rows from {path}.");
                export::run(session, prompter, &self.config).await
            }
            Err(e) => {
                eprintln!("{e}");
                Ok(())
            }
        }
    }
}
