//! Experiment dashboard shaping
//!
//! Builds one row per configured variant of each experiment from its
//! experiment-scoped summary, then filters, sorts and pages the rows and
//! computes the headline cards.

mod rows;
mod types;


pub use rows::{
    UNCONFIGURED_VARIANT, assemble_view, build_rows, compute_cards, filter_rows, paginate,
    sort_rows,
};
pub use types::{
    DashboardCards, DashboardFilter, DashboardRow, DashboardView, SortColumn, SortOrder,
};
