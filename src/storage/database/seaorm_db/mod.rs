// Module declarations
mod assignment_ops;
mod connection;
mod event_ops;
mod experiment_ops;
mod tenant_ops;
mod types;

// Re-export public types
pub use types::{DatabaseBackendType, SeaOrmDatabase};
