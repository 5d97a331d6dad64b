//! Experiment models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Experiment lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExperimentStatus {
    /// Configured but not yet running
    #[default]
    Draft,
    /// Currently collecting events
    Active,
    /// Finished
    Completed,
}

impl ExperimentStatus {
    /// Wire and storage representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ExperimentStatus::Draft => "DRAFT",
            ExperimentStatus::Active => "ACTIVE",
            ExperimentStatus::Completed => "COMPLETED",
        }
    }
}

impl fmt::Display for ExperimentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExperimentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DRAFT" => Ok(ExperimentStatus::Draft),
            "ACTIVE" => Ok(ExperimentStatus::Active),
            "COMPLETED" => Ok(ExperimentStatus::Completed),
            other => Err(format!("Unknown experiment status: {}", other)),
        }
    }
}

/// A named A/B test owned by a tenant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experiment {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub status: ExperimentStatus,
    /// Variant configuration as stored
    ///
    /// Either a list of labels (`["A", "B"]`) or a list of
    /// `{"name", "trafficSplit"}` objects.
    pub variants: serde_json::Value,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Experiment {
    /// Variant labels in configuration order
    ///
    /// Entries that are neither a string nor an object with a string `name`
    /// are skipped.
    pub fn variant_names(&self) -> Vec<String> {
        let Some(entries) = self.variants.as_array() else {
            return Vec::new();
        };

        entries
            .iter()
            .filter_map(|entry| match entry {
                serde_json::Value::String(name) => Some(name.clone()),
                serde_json::Value::Object(map) => map
                    .get("name")
                    .and_then(|name| name.as_str())
                    .map(str::to_string),
                _ => None,
            })
            .collect()
    }
}

/// Experiment ready to be persisted
#[derive(Debug, Clone, PartialEq)]
pub struct NewExperiment {
    pub tenant_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub status: ExperimentStatus,
    pub variants: Vec<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

/// Related row counts attached to an experiment detail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperimentCounts {
    pub events: u64,
    pub user_assignments: u64,
}

/// Experiment with its related counts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentDetail {
    #[serde(flatten)]
    pub experiment: Experiment,
    #[serde(rename = "_count")]
    pub count: ExperimentCounts,
}

/// Assignment of an end user to a variant of an experiment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAssignment {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub experiment_id: Uuid,
    pub user_id: String,
    pub variant: String,
    pub created_at: DateTime<Utc>,
}
