//! csvsh - interactive CSV to JSON / MongoDB import shell
//!
//! Browses a mounted filesystem, loads CSV files into an in-memory dataset,
//! and exports them as JSON or bulk-inserts them into a MongoDB collection,
//! optionally dropping into an interactive database shell afterward.
//!
//! # Usage
//!
//! ```bash
//! # Interactive mode, browsing the MOUNT_PATH directory
//! csvsh
//!
//! # Explicit root and database endpoint
//! csvsh --root /mnt/exports --host localhost --port 27017
//! ```

use std::sync::Arc;
use tracing::Level;

mod cli;
mod config;
mod connection;
mod dataset;
mod error;
mod executor;
mod formatter;
mod parser;
mod repl;
mod session;

use cli::CliInterface;
use error::{NavigationError, Result};
use executor::{ExecutionContext, Flow};
use parser::CommandParser;
use repl::ReplEngine;
use session::{OsWorkspace, Session, SharedState, Workspace};

/// Application entry point
#[tokio::main]
async fn main() {
    // Initialize the application and handle any errors
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Main application logic
///
/// This function orchestrates the application startup:
/// 1. Parse command-line arguments
/// 2. Load configuration
/// 3. Initialize logging
/// 4. Handle subcommands or start the interactive session
///
/// # Returns
/// * `Result<()>` - Success or error
async fn run() -> Result<()> {
    // Parse command-line arguments and load configuration
    let cli = CliInterface::new()?;

    // Initialize logging based on verbosity
    initialize_logging(&cli);

    // Handle subcommands (version, completion, config)
    if cli.handle_subcommand()? {
        return Ok(());
    }

    // Print banner if not in quiet mode
    cli.print_banner();

    // Run in interactive mode
    run_interactive_mode(&cli).await
}

/// Run the interactive session
async fn run_interactive_mode(cli: &CliInterface) -> Result<()> {
    let workspace: Arc<dyn Workspace> = Arc::new(OsWorkspace::new());

    // The browsing root must exist before the prompt loop starts
    let root = cli.config().workspace.root.clone();
    if !workspace.is_dir(&root) {
        return Err(NavigationError::PathNotFound(root).into());
    }
    let root = workspace.canonicalize(&root)?;

    let state = SharedState::new(root);
    let mut session = Session::new(state.clone(), Arc::clone(&workspace));
    let mut repl = ReplEngine::new(
        state,
        workspace,
        cli.config().history.clone(),
        cli.config().completion.mode,
    )?;
    let context = ExecutionContext::new(cli.config().clone());

    run_repl_loop(&mut repl, &mut session, &context).await?;

    // Orderly shutdown
    if let Err(e) = repl.save_history() {
        tracing::debug!("failed to save history: {e}");
    }
    println!("Goodbye!");
    Ok(())
}

/// Main command loop
///
/// Reads input, parses it, and executes the resulting command. Parse and
/// execution failures are reported and the loop continues; only `exit`
/// (or end of input) leaves the loop.
async fn run_repl_loop(
    repl: &mut ReplEngine,
    session: &mut Session,
    context: &ExecutionContext,
) -> Result<()> {
    loop {
        let input = match repl.read_line()? {
            Some(line) if !line.trim().is_empty() => line,
            Some(_) => continue,
            None => break,
        };

        let command = match CommandParser::parse(&input) {
            Ok(command) => command,
            Err(e) => {
                eprintln!("{e}");
                continue;
            }
        };

        match context.execute(command, session, repl).await? {
            Flow::Continue => {}
            Flow::Exit => break,
        }
    }

    Ok(())
}

/// Initialize logging system based on verbosity level
///
/// # Arguments
/// * `cli` - CLI interface with verbosity settings
fn initialize_logging(cli: &CliInterface) {
    let level = if cli.args().very_verbose {
        Level::TRACE
    } else if cli.args().verbose {
        Level::DEBUG
    } else {
        cli.config().logging.level.to_tracing_level()
    };

    // Build subscriber with level filter
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false);

    // Configure timestamps
    if cli.config().logging.timestamps {
        subscriber.init();
    } else {
        subscriber.without_time().init();
    }
}
