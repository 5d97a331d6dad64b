//! Dashboard types

use crate::core::models::ExperimentStatus;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// One table row: a single variant of an experiment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardRow {
    pub experiment_id: Uuid,
    pub experiment_name: String,
    pub variant: String,
    pub total_events: u64,
    pub unique_users: u64,
    pub conversions: u64,
    pub conversion_rate: f64,
    pub status: ExperimentStatus,
}

/// Headline numbers over a row set
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardCards {
    /// Distinct experiments among the rows
    pub total_campaigns: u64,
    pub total_events: u64,
    /// Mean of the row conversion rates
    pub avg_conversion_rate: f64,
    /// Distinct experiments with status `ACTIVE`
    pub active_experiments: u64,
}

/// Sortable table columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortColumn {
    ExperimentName,
    Variant,
    TotalEvents,
    UniqueUsers,
    ConversionRate,
    Status,
}

impl FromStr for SortColumn {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "experimentName" => Ok(SortColumn::ExperimentName),
            "variant" => Ok(SortColumn::Variant),
            "totalEvents" => Ok(SortColumn::TotalEvents),
            "uniqueUsers" => Ok(SortColumn::UniqueUsers),
            "conversionRate" => Ok(SortColumn::ConversionRate),
            "status" => Ok(SortColumn::Status),
            other => Err(format!("Unknown sort column: {}", other)),
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(format!("Unknown sort order: {}", other)),
        }
    }
}

/// Row selection applied before paging
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardFilter {
    /// Case-insensitive substring of the experiment name
    pub search: Option<String>,
    pub status: Option<ExperimentStatus>,
    pub sort_by: Option<SortColumn>,
    pub sort_order: SortOrder,
}

/// A page of dashboard rows plus cards over the whole filtered set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub rows: Vec<DashboardRow>,
    /// Number of rows after filtering, before paging
    pub total: u64,
    pub cards: DashboardCards,
}
