//! Analytics query parsing
//!
//! Turns the raw query parameters of the summary endpoint into an
//! [`EventFilter`]. Empty parameters are treated as absent.

use crate::core::models::EventFilter;
use crate::utils::error::{AnalyticsError, Result};
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::Deserialize;
use uuid::Uuid;

/// Raw summary query parameters
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsQuery {
    /// Inclusive lower bound, `YYYY-MM-DD` or RFC 3339
    pub start_date: Option<String>,
    /// Inclusive upper bound; the whole day is included
    pub end_date: Option<String>,
    /// Restrict to one experiment
    pub experiment_id: Option<String>,
}

impl AnalyticsQuery {
    /// Build the event filter for a tenant
    pub fn to_filter(&self, tenant_id: Uuid) -> Result<EventFilter> {
        let start = non_empty(&self.start_date)
            .map(|raw| parse_date_bound(raw, "startDate").map(start_of))
            .transpose()?;
        let end = non_empty(&self.end_date)
            .map(|raw| parse_date_bound(raw, "endDate").map(end_of_day))
            .transpose()?;

        let experiment_id = non_empty(&self.experiment_id)
            .map(parse_experiment_id)
            .transpose()?;

        Ok(EventFilter {
            tenant_id,
            experiment_id,
            start,
            end,
        })
    }
}

/// Parse an experiment id supplied by a client
pub fn parse_experiment_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw.trim())
        .map_err(|_| AnalyticsError::validation(format!("Invalid experimentId: {}", raw)))
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

/// A parsed date parameter, keeping whether a time of day was supplied
#[derive(Debug, Clone, Copy)]
enum DateBound {
    Day(NaiveDate),
    Instant(DateTime<Utc>),
}

fn parse_date_bound(raw: &str, field: &str) -> Result<DateBound> {
    if let Ok(day) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(DateBound::Day(day));
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|instant| DateBound::Instant(instant.with_timezone(&Utc)))
        .map_err(|_| AnalyticsError::validation(format!("Invalid {}: {}", field, raw)))
}

fn start_of(bound: DateBound) -> DateTime<Utc> {
    match bound {
        DateBound::Day(day) => Utc.from_utc_datetime(&day.and_time(NaiveTime::MIN)),
        DateBound::Instant(instant) => instant,
    }
}

/// The last millisecond of the bound's UTC day
fn end_of_day(bound: DateBound) -> DateTime<Utc> {
    let day = match bound {
        DateBound::Day(day) => day,
        DateBound::Instant(instant) => instant.date_naive(),
    };
    let last_ms = NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN);
    Utc.from_utc_datetime(&day.and_time(last_ms))
}
