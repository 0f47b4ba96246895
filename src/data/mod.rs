//! Data module - report loading and cleaning

mod loader;
mod processor;
pub mod schema;
mod table;

pub use loader::{ReportError, ReportLoader, ReportSource};
pub use processor::{GroupSums, ReportProcessor, SortOrder, FRAUD_LABELS};
pub use schema::{ColumnSpec, ReportKind, ReportSchema};
pub use table::{format_number, LoadStats, ReportTable};
