//! Back-office derived data
//!
//! Filters, KPIs, analytics and pagination. Everything here is a pure
//! function over snapshots; the stores own the data.

pub mod analytics;
pub mod filters;
pub mod kpi;
pub mod pagination;

pub use pagination::paginate;
