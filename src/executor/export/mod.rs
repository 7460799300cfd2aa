//! Export dispatcher for a loaded dataset.
//!
//! After a successful CSV load the session enters this sub-loop, which offers
//! exactly three actions: save the dataset to a JSON file (`yes`), print it
//! to the terminal (`no`), or bulk-insert it into MongoDB (`import`). Any
//! other answer re-prompts. A completed save or print returns to the outer
//! command loop; a successful import loops back to this prompt once the
//! external database shell exits.

pub mod progress;

use std::io::IsTerminal;

use crate::config::Config;
use crate::dataset::Dataset;
use crate::error::{ExportError, Result};
use crate::executor::import;
use crate::executor::prompt::Prompter;
use crate::formatter::JsonFormatter;
use crate::parser::ExportChoice;
use crate::session::Session;

/// Run the export dispatcher for the session's loaded dataset.
///
/// Expected failures (bad destination path, unreachable database) are
/// reported here and end the sub-loop; the returned error is reserved for
/// prompt I/O failures.
///
/// # Arguments
/// * `session` - Session holding the loaded dataset
/// * `prompter` - Source for sub-prompt answers
/// * `config` - Effective configuration
///
/// # Returns
/// * `Result<()>` - Ok once the sub-loop ends
pub async fn run(
    session: &Session,
    prompter: &mut dyn Prompter,
    config: &Config,
) -> Result<()> {
    let Some(dataset) = session.dataset() else {
        return Ok(());
    };

    let formatter = JsonFormatter::new(config.display.indent, config.display.color_output);

    loop {
        let answer =
            prompter.ask("What do you want to do? (yes = save to file / no = show on screen / import = MongoDB): ")?;

        match ExportChoice::parse(&answer) {
            Some(ExportChoice::Save) => {
                if let Err(e) = save_to_file(session, dataset, prompter, config, &formatter) {
                    eprintln!("{e}");
                }
                // Success or failure, the save path ends this sub-loop
                return Ok(());
            }
            Some(ExportChoice::Print) => {
                println!("{}", formatter.format_for_terminal(&dataset.to_json())?);
                return Ok(());
            }
            Some(ExportChoice::Import) => {
                match import::run(dataset, prompter, &config.connection).await {
                    Ok(summary) => {
                        let noun = if summary.inserted == 1 { "record" } else { "records" };
                        println!(
                            "Inserted {} {noun} into {}.{}.",
                            summary.inserted, summary.database, summary.collection
                        );
                        if config.connection.open_shell {
                            if let Err(e) = import::open_shell(&config.connection, &summary.database)
                            {
                                eprintln!("{e}");
                            }
                        }
                        // Back to this sub-prompt after the shell session ends
                    }
                    Err(e) => {
                        eprintln!("{e}");
                        return Ok(());
                    }
                }
            }
            None => println!("Please answer 'yes', 'no', or 'import'."),
        }
    }
}

/// Prompt for a destination and write the dataset as pretty-printed JSON.
fn save_to_file(
    session: &Session,
    dataset: &Dataset,
    prompter: &mut dyn Prompter,
    config: &Config,
    formatter: &JsonFormatter,
) -> Result<()> {
    let destination = prompter.ask("Path to save the JSON file (including filename): ")?;
    let target = session.resolve(destination.trim());

    let json = formatter.format(&dataset.to_json())?;

    println!("Saving JSON file...");
    progress::run(config.display.progress && std::io::stdout().is_terminal());

    std::fs::write(&target, json).map_err(|e| ExportError::WriteFailed {
        path: target.clone(),
        cause: e.to_string(),
    })?;

    println!("Saved {} records to: {}", dataset.len(), target.display());
    Ok(())
}
