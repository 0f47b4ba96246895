//! Stats module - summaries derived from report tables

mod summary;

pub use summary::{
    DatasetOverview, FraudTotals, RankedEntry, SummaryCalculator, NO_DATA,
};
