use std::time::Duration;

use async_trait::async_trait;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::{ClientOptions, IndexOptions, Tls, TlsOptions};
use mongodb::{Client, Collection, Database, IndexModel};
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;

/// MongoDB duplicate key error code
const DUPLICATE_KEY: i32 = 11000;

/// Errors from the persistence layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("invalid id: {0}")]
    InvalidId(String),

    #[error("{0} already exists")]
    Duplicate(String),

    #[error("context deadline exceeded")]
    Timeout,

    #[error("failed to encode document: {0}")]
    Encode(#[from] mongodb::bson::ser::Error),

    #[error(transparent)]
    Mongo(#[from] mongodb::error::Error),
}

impl DatabaseError {
    pub fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
        match err.kind.as_ref() {
            ErrorKind::Write(WriteFailure::WriteError(write_error)) => write_error.code == DUPLICATE_KEY,
            _ => false,
        }
    }
}

/// Parse a 24-char hex identifier.
pub fn parse_object_id(hex: &str) -> Result<ObjectId, DatabaseError> {
    ObjectId::parse_str(hex).map_err(|_| DatabaseError::InvalidId(hex.to_string()))
}

/// Liveness probe used by `GET /health`.
#[async_trait]
pub trait HealthCheck: Send + Sync {
    async fn ping(&self) -> Result<(), DatabaseError>;
}

/// Owns the pooled MongoDB client and the application database handle.
#[derive(Clone)]
pub struct DatabaseManager {
    client: Client,
    database: Database,
}

impl DatabaseManager {
    pub const USERS: &'static str = "users";
    pub const GALLERIES: &'static str = "galleries";
    pub const NEWS: &'static str = "news";
    pub const INFLUENCERS: &'static str = "influencers";

    /// Build the pooled client. The driver connects lazily, so this only
    /// fails on a malformed URI or option set.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let mut options = ClientOptions::parse(&config.uri).await?;
        options.app_name = Some(env!("CARGO_PKG_NAME").to_string());
        options.max_pool_size = Some(config.max_pool_size);
        options.min_pool_size = Some(config.min_pool_size);
        options.max_idle_time = Some(Duration::from_secs(config.max_idle_time_secs));
        options.connect_timeout = Some(Duration::from_secs(config.connect_timeout_secs));
        options.server_selection_timeout = Some(Duration::from_secs(config.server_selection_timeout_secs));

        if config.tls_insecure {
            let tls = TlsOptions::builder().allow_invalid_certificates(true).build();
            options.tls = Some(Tls::Enabled(tls));
        }

        let client = Client::with_options(options)?;
        let database = client.database(&config.name);

        info!("Configured MongoDB client for database: {}", config.name);
        Ok(Self { client, database })
    }

    pub fn collection<T>(&self, name: &str) -> Collection<T> {
        self.database.collection::<T>(name)
    }

    /// Unique index on `users.username`; duplicate inserts surface as 409.
    pub async fn ensure_indexes(&self) -> Result<(), DatabaseError> {
        let index = IndexModel::builder()
            .keys(doc! { "username": 1 })
            .options(IndexOptions::builder().unique(true).name("username_unique".to_string()).build())
            .build();

        self.database
            .collection::<mongodb::bson::Document>(Self::USERS)
            .create_index(index, None)
            .await?;

        info!("Ensured unique index on {}.username", Self::USERS);
        Ok(())
    }

    /// Close pooled connections (e.g., on shutdown)
    pub async fn shutdown(self) {
        self.client.shutdown().await;
        info!("Closed MongoDB client");
    }
}

#[async_trait]
impl HealthCheck for DatabaseManager {
    async fn ping(&self) -> Result<(), DatabaseError> {
        self.database.run_command(doc! { "ping": 1 }, None).await?;
        Ok(())
    }
}
