//! MongoDB bulk import for a loaded dataset.
//!
//! Each `import` selection opens a fresh connection, optionally clears the
//! target collection after an explicit confirmation, inserts the dataset as
//! documents, and finally hands the terminal to an external database shell.
//! Any connection or collection operation failure ends the attempt without
//! touching the outer session.

use mongodb::Collection;
use mongodb::bson::{Document, doc};
use tracing::{info, warn};

use crate::config::ConnectionConfig;
use crate::connection::ConnectionManager;
use crate::dataset::Dataset;
use crate::error::{ImportError, Result};
use crate::executor::prompt::{Prompter, confirm};

/// Outcome of a completed import.
#[derive(Debug, Clone)]
pub struct ImportSummary {
    /// Target database name
    pub database: String,

    /// Target collection name
    pub collection: String,

    /// Number of inserted documents
    pub inserted: usize,
}

/// Run one import attempt.
///
/// # Arguments
/// * `dataset` - Dataset to insert
/// * `prompter` - Source for the database/collection/clear prompts
/// * `config` - Connection configuration
///
/// # Returns
/// * `Result<ImportSummary>` - Summary on success, or the first failure
pub async fn run(
    dataset: &Dataset,
    prompter: &mut dyn Prompter,
    config: &ConnectionConfig,
) -> Result<ImportSummary> {
    if dataset.is_empty() {
        return Err(ImportError::EmptyDataset.into());
    }

    let database = prompter.ask("MongoDB database name: ")?;
    let collection = prompter.ask("MongoDB collection name: ")?;

    let mut manager = ConnectionManager::new(config.clone());
    manager.connect().await?;

    let outcome = insert_dataset(&manager, dataset, prompter, &database, &collection).await;

    // The connection is closed before the external shell takes the terminal
    manager.disconnect().await;

    let inserted = outcome?;
    info!("imported {} documents into {}.{}", inserted, database, collection);

    Ok(ImportSummary {
        database,
        collection,
        inserted,
    })
}

/// Count, optionally clear, and insert into the target collection.
async fn insert_dataset(
    manager: &ConnectionManager,
    dataset: &Dataset,
    prompter: &mut dyn Prompter,
    database: &str,
    collection_name: &str,
) -> Result<usize> {
    let collection: Collection<Document> = manager.database(database)?.collection(collection_name);

    let existing = collection
        .count_documents(doc! {})
        .await
        .map_err(|e| ImportError::OperationFailed(e.to_string()))?;

    if existing > 0 {
        let message = format!(
            "⚠️ Collection '{collection_name}' already contains {existing} documents. Clear it before import? (yes/no): "
        );
        if confirm(prompter, &message)? {
            collection
                .delete_many(doc! {})
                .await
                .map_err(|e| ImportError::OperationFailed(e.to_string()))?;
            println!("Existing documents cleared.");
        }
    }

    let mut documents = dataset.to_documents()?;
    let inserted = if documents.len() == 1 {
        // Degenerate single-record case
        let document = documents.remove(0);
        collection
            .insert_one(document)
            .await
            .map_err(|e| ImportError::OperationFailed(e.to_string()))?;
        1
    } else {
        collection
            .insert_many(documents)
            .await
            .map_err(|e| ImportError::OperationFailed(e.to_string()))?
            .inserted_ids
            .len()
    };

    Ok(inserted)
}

/// Launch the external database shell, blocking until it exits.
///
/// # Arguments
/// * `config` - Connection configuration naming the shell binary and host
/// * `database` - Database to open the shell against
///
/// # Returns
/// * `Result<()>` - Ok once the shell exits; spawn failures are errors
pub fn open_shell(config: &ConnectionConfig, database: &str) -> Result<()> {
    println!("Opening MongoDB shell... (type 'exit' to return)");

    let status = std::process::Command::new(&config.shell_binary)
        .arg("--host")
        .arg(&config.host)
        .arg(database)
        .status()
        .map_err(|e| ImportError::ShellFailed(e.to_string()))?;

    if !status.success() {
        warn!("database shell exited with {status}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ShellError;
    use crate::executor::prompt::ScriptedPrompter;

    #[tokio::test]
    async fn test_empty_dataset_is_rejected_before_any_prompt() {
        let dataset = Dataset::from_reader("a,b\n".as_bytes()).unwrap();
        let mut prompter = ScriptedPrompter::new(Vec::<String>::new());

        let err = run(&dataset, &mut prompter, &ConnectionConfig::default())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ShellError::Import(ImportError::EmptyDataset)
        ));
        assert_eq!(prompter.remaining(), 0);
    }
}
