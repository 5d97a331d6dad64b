//! Test database utilities
//!
//! Provides in-memory SQLite database for testing without external dependencies.
//! Each test gets an isolated database instance using SeaORM.

use abtest_analytics::config::{DatabaseConfig, StorageConfig};
use abtest_analytics::storage::StorageLayer;
use abtest_analytics::storage::database::Database;

/// Test database wrapper providing isolated in-memory SQLite instances
#[derive(Debug, Clone)]
pub struct TestDatabase {
    storage: StorageLayer,
}

impl TestDatabase {
    /// Create a new migrated in-memory test database
    pub async fn new() -> Self {
        let storage = StorageLayer::new(&test_storage_config())
            .await
            .expect("Failed to create in-memory test database");

        Self { storage }
    }

    /// Get reference to the underlying database
    pub fn db(&self) -> &Database {
        self.storage.db()
    }

    /// Storage layer over this database
    pub fn storage(&self) -> StorageLayer {
        self.storage.clone()
    }
}

/// Helper to create a simple test database config
pub fn test_db_config() -> DatabaseConfig {
    DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1, // In-memory DB only supports 1 connection
        connection_timeout: 5,
        run_migrations: true,
    }
}

/// Storage configuration around [`test_db_config`]
pub fn test_storage_config() -> StorageConfig {
    StorageConfig {
        database: test_db_config(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_database_creation() {
        let db = TestDatabase::new().await;
        assert!(db.db().health_check().await.is_ok());
    }

    #[tokio::test]
    async fn test_databases_are_isolated() {
        let a = TestDatabase::new().await;
        let b = TestDatabase::new().await;

        a.db().create_tenant("Acme Corp", "key-a").await.unwrap();
        assert!(b.db().find_tenant_by_api_key("key-a").await.unwrap().is_none());
    }
}
