//! Core data models for the analytics service
//!
//! This module defines the domain records that flow between storage, the
//! analytics engine and the HTTP layer. JSON field naming is camelCase to
//! match what dashboard clients consume.

pub mod event;
pub mod experiment;
pub mod tenant;

// Re-export commonly used types
pub use event::{Event, EventFilter, EventType, NewEvent};
pub use experiment::{
    Experiment, ExperimentCounts, ExperimentDetail, ExperimentStatus, NewExperiment,
    UserAssignment,
};
pub use tenant::Tenant;
