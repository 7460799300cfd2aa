//! Connection management for MongoDB
//!
//! This module provides connection management functionality including:
//! - Connection establishment with timeouts and a ping verification
//! - Database handle access
//! - Orderly shutdown
//!
//! The importer opens a fresh connection for every import and closes it
//! before handing the terminal to the external shell; nothing is pooled or
//! reused across prompt-loop iterations.

use mongodb::bson::doc;
use mongodb::{Client, Database, options::ClientOptions};
use tracing::{debug, info};

use crate::config::ConnectionConfig;
use crate::error::{ConnectionError, Result};

/// MongoDB connection manager
pub struct ConnectionManager {
    /// MongoDB client instance
    client: Option<Client>,

    /// Connection configuration
    config: ConnectionConfig,

    /// Connection URI built from host and port
    uri: String,
}

impl ConnectionManager {
    /// Create a new connection manager
    ///
    /// # Arguments
    /// * `config` - Connection configuration
    ///
    /// # Returns
    /// * `Self` - New connection manager instance
    pub fn new(config: ConnectionConfig) -> Self {
        let uri = config.uri();
        Self {
            client: None,
            config,
            uri,
        }
    }

    /// Get the connection URI
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Establish connection to MongoDB
    ///
    /// Parses the URI, applies the configured timeouts, and verifies the
    /// server is reachable with a ping before reporting success.
    ///
    /// # Returns
    /// * `Result<()>` - Success or connection error
    pub async fn connect(&mut self) -> Result<()> {
        debug!("connecting to {}", self.uri);

        let mut options = ClientOptions::parse(&self.uri)
            .await
            .map_err(|e| ConnectionError::InvalidUri(e.to_string()))?;

        let timeout = self.config_timeout();
        options.connect_timeout = Some(timeout);
        options.server_selection_timeout = Some(timeout);
        options.app_name = Some("csvsh".to_string());

        let client = Client::with_options(options)
            .map_err(|e| ConnectionError::ConnectionFailed(e.to_string()))?;

        client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| ConnectionError::PingFailed(e.to_string()))?;

        info!("connected to {}", self.uri);
        self.client = Some(client);
        Ok(())
    }

    /// Get a database handle
    ///
    /// # Arguments
    /// * `name` - Database name
    ///
    /// # Returns
    /// * `Result<Database>` - Database handle, or `NotConnected`
    pub fn database(&self, name: &str) -> Result<Database> {
        let client = self.client.as_ref().ok_or(ConnectionError::NotConnected)?;
        Ok(client.database(name))
    }

    /// Check if currently connected
    pub fn is_connected(&self) -> bool {
        self.client.is_some()
    }

    /// Disconnect from MongoDB
    ///
    /// Closes the client and releases its resources. Safe to call when not
    /// connected.
    pub async fn disconnect(&mut self) {
        if let Some(client) = self.client.take() {
            client.shutdown().await;
            debug!("disconnected from {}", self.uri);
        }
    }

    fn config_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.config.timeout)
    }
}
