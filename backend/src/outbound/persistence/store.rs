//! MongoDB client bootstrap.
//!
//! The driver pools connections internally, so a single [`MongoStore`] is
//! shared by every repository. Connecting pings the server once so startup
//! fails fast on a bad URL or unreachable cluster.

use std::time::Duration;

use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Database};
use tracing::info;

/// Database used when neither configuration nor the URL names one.
pub const DEFAULT_DATABASE_NAME: &str = "test";

/// Errors that can occur while connecting to the store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The connection string could not be parsed or resolved.
    #[error("invalid database configuration: {message}")]
    Configuration { message: String },

    /// The server did not answer the initial ping.
    #[error("failed to connect to database: {message}")]
    Connect { message: String },
}

impl StoreError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn connect(message: impl Into<String>) -> Self {
        Self::Connect {
            message: message.into(),
        }
    }
}

/// Connection settings for [`MongoStore`].
///
/// # Example
///
/// ```ignore
/// let config = StoreConfig::new("mongodb://localhost:27017")
///     .with_database_name("medquiz");
/// let store = MongoStore::connect(config).await?;
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    database_url: String,
    database_name: Option<String>,
    app_name: String,
    server_selection_timeout: Duration,
}

impl StoreConfig {
    /// Create a configuration for `database_url` with defaults:
    /// - database name taken from the URL, else [`DEFAULT_DATABASE_NAME`]
    /// - `server_selection_timeout`: 10 seconds
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            database_name: None,
            app_name: env!("CARGO_PKG_NAME").to_owned(),
            server_selection_timeout: Duration::from_secs(10),
        }
    }

    /// Override the database name.
    pub fn with_database_name(mut self, name: impl Into<String>) -> Self {
        self.database_name = Some(name.into());
        self
    }
}

/// Handle to the configured MongoDB database.
#[derive(Debug, Clone)]
pub struct MongoStore {
    database: Database,
}

impl MongoStore {
    /// Parse the connection string, build a client and ping the database.
    pub async fn connect(config: StoreConfig) -> Result<Self, StoreError> {
        let mut options = ClientOptions::parse(&config.database_url)
            .await
            .map_err(|err| StoreError::configuration(err.to_string()))?;
        options.app_name = Some(config.app_name.clone());
        options.server_selection_timeout = Some(config.server_selection_timeout);

        let name = config
            .database_name
            .clone()
            .or_else(|| options.default_database.clone())
            .unwrap_or_else(|| DEFAULT_DATABASE_NAME.to_owned());
        let client = Client::with_options(options)
            .map_err(|err| StoreError::configuration(err.to_string()))?;
        let database = client.database(&name);

        database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|err| StoreError::connect(err.to_string()))?;
        info!(database = %name, "connected to MongoDB");

        Ok(Self { database })
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn database_name(&self) -> &str {
        self.database.name()
    }
}
