//! Storage layer for the analytics service
//!
//! Wraps the SeaORM database handle behind a shareable layer.

/// Database storage module
pub mod database;

use crate::config::StorageConfig;
use crate::core::traits::EventRepository;
use crate::utils::error::Result;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Main storage layer
#[derive(Debug, Clone)]
pub struct StorageLayer {
    /// Database connection pool
    pub database: Arc<database::Database>,
}

impl StorageLayer {
    /// Connect to the configured database and migrate it if enabled
    pub async fn new(config: &StorageConfig) -> Result<Self> {
        info!("Initializing storage layer");

        debug!("Connecting to database");
        let database = Arc::new(database::Database::new(&config.database).await?);
        let storage = Self { database };

        if config.database.run_migrations {
            storage.migrate().await?;
        }

        info!("Storage layer initialized successfully");
        Ok(storage)
    }

    /// Wrap an already connected database
    pub fn from_database(database: database::Database) -> Self {
        Self {
            database: Arc::new(database),
        }
    }

    /// Run database migrations
    pub async fn migrate(&self) -> Result<()> {
        self.database.migrate().await
    }

    /// Health check for the database
    pub async fn health_check(&self) -> StorageHealthStatus {
        let database = match self.database.health_check().await {
            Ok(()) => true,
            Err(e) => {
                warn!("Database health check failed: {}", e);
                false
            }
        };

        StorageHealthStatus { database }
    }

    /// Get database handle
    pub fn db(&self) -> &database::Database {
        &self.database
    }

    /// The database as an event source for analytics
    pub fn event_repository(&self) -> Arc<dyn EventRepository> {
        self.database.clone()
    }
}

/// Storage health status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StorageHealthStatus {
    /// Database reachable
    pub database: bool,
}
