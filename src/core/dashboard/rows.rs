//! Row building, selection and cards

use super::types::{
    DashboardCards, DashboardFilter, DashboardRow, DashboardView, SortColumn, SortOrder,
};
use crate::core::analytics::AnalyticsSummary;
use crate::core::models::{Experiment, ExperimentStatus};
use std::cmp::Ordering;
use std::collections::HashSet;

/// Variant label used when an experiment has no configured variants
pub const UNCONFIGURED_VARIANT: &str = "N/A";

/// Rows for one experiment from its experiment-scoped summary
///
/// Configured variants without events get zero metrics. An experiment
/// without configured variants yields a single row carrying the summary's
/// overall totals.
pub fn build_rows(experiment: &Experiment, summary: &AnalyticsSummary) -> Vec<DashboardRow> {
    let row = |variant: String, events, users, conversions, conversion_rate| DashboardRow {
        experiment_id: experiment.id,
        experiment_name: experiment.name.clone(),
        variant,
        total_events: events,
        unique_users: users,
        conversions,
        conversion_rate,
        status: experiment.status,
    };

    let names = experiment.variant_names();
    if names.is_empty() {
        let fallback = match summary.variant("default") {
            Some(metrics) => row(
                UNCONFIGURED_VARIANT.to_string(),
                metrics.events,
                metrics.users,
                metrics.conversions,
                metrics.conversion_rate,
            ),
            None => row(
                UNCONFIGURED_VARIANT.to_string(),
                summary.total_events,
                summary.unique_users,
                0,
                0.0,
            ),
        };
        return vec![fallback];
    }

    names
        .into_iter()
        .map(|name| {
            let metrics = summary.variant(&name).cloned().unwrap_or_default();
            row(
                name,
                metrics.events,
                metrics.users,
                metrics.conversions,
                metrics.conversion_rate,
            )
        })
        .collect()
}

/// Keep rows matching the search term and status
pub fn filter_rows(rows: Vec<DashboardRow>, filter: &DashboardFilter) -> Vec<DashboardRow> {
    let needle = filter
        .search
        .as_deref()
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .map(str::to_lowercase);

    rows.into_iter()
        .filter(|row| match &needle {
            Some(needle) => row.experiment_name.to_lowercase().contains(needle),
            None => true,
        })
        .filter(|row| filter.status.is_none_or(|status| row.status == status))
        .collect()
}

/// Stable sort by one column
pub fn sort_rows(rows: &mut [DashboardRow], column: SortColumn, order: SortOrder) {
    rows.sort_by(|a, b| {
        let ordering = compare_by(a, b, column);
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
}

fn compare_by(a: &DashboardRow, b: &DashboardRow, column: SortColumn) -> Ordering {
    match column {
        SortColumn::ExperimentName => a.experiment_name.cmp(&b.experiment_name),
        SortColumn::Variant => a.variant.cmp(&b.variant),
        SortColumn::TotalEvents => a.total_events.cmp(&b.total_events),
        SortColumn::UniqueUsers => a.unique_users.cmp(&b.unique_users),
        SortColumn::ConversionRate => a.conversion_rate.total_cmp(&b.conversion_rate),
        SortColumn::Status => a.status.as_str().cmp(b.status.as_str()),
    }
}

/// The rows of a 1-based page
pub fn paginate(rows: Vec<DashboardRow>, page: u32, limit: u32) -> Vec<DashboardRow> {
    let offset = (page.saturating_sub(1) as usize).saturating_mul(limit as usize);
    rows.into_iter().skip(offset).take(limit as usize).collect()
}

/// Headline cards over a row set
pub fn compute_cards(rows: &[DashboardRow]) -> DashboardCards {
    let experiments: HashSet<_> = rows.iter().map(|row| row.experiment_id).collect();
    let active: HashSet<_> = rows
        .iter()
        .filter(|row| row.status == ExperimentStatus::Active)
        .map(|row| row.experiment_id)
        .collect();

    let avg_conversion_rate = if rows.is_empty() {
        0.0
    } else {
        rows.iter().map(|row| row.conversion_rate).sum::<f64>() / rows.len() as f64
    };

    DashboardCards {
        total_campaigns: experiments.len() as u64,
        total_events: rows.iter().map(|row| row.total_events).sum(),
        avg_conversion_rate,
        active_experiments: active.len() as u64,
    }
}

/// Filter, sort and page a row set
///
/// Cards are computed over every filtered row, not just the returned page.
pub fn assemble_view(
    rows: Vec<DashboardRow>,
    filter: &DashboardFilter,
    page: u32,
    limit: u32,
) -> DashboardView {
    let mut rows = filter_rows(rows, filter);
    if let Some(column) = filter.sort_by {
        sort_rows(&mut rows, column, filter.sort_order);
    }

    let cards = compute_cards(&rows);
    let total = rows.len() as u64;

    DashboardView {
        rows: paginate(rows, page, limit),
        total,
        cards,
    }
}
