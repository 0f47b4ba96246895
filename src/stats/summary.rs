//! Summary Calculator Module
//! Scalar summaries and one-line insights derived from cleaned report tables.

use crate::data::schema::{CATEGORY, COUNT, LABEL};
use crate::data::{
    format_number, ReportError, ReportProcessor, ReportTable, SortOrder, FRAUD_LABELS,
};

/// Shown wherever a summary has nothing to summarize.
pub const NO_DATA: &str = "No data";

/// Placeholder for a missing label cell.
const MISSING_LABEL: &str = "-";

/// One labelled value, e.g. a step and its fraud count.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedEntry {
    pub label: String,
    pub value: f64,
}

/// Fraud and non-fraud totals; `None` when the report has no row for that side.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FraudTotals {
    pub non_fraud: Option<f64>,
    pub fraud: Option<f64>,
}

impl FraudTotals {
    pub fn is_empty(&self) -> bool {
        self.non_fraud.is_none() && self.fraud.is_none()
    }

    /// Fraud as a percentage of all labelled transactions.
    pub fn fraud_share(&self) -> Option<f64> {
        let fraud = self.fraud.unwrap_or(0.0);
        let total = fraud + self.non_fraud.unwrap_or(0.0);
        if self.is_empty() || total <= 0.0 {
            None
        } else {
            Some(fraud / total * 100.0)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatasetOverview {
    pub rows: usize,
    pub columns: usize,
    pub malformed_lines: usize,
}

pub struct SummaryCalculator;

impl SummaryCalculator {
    /// Label the 0/1 flag and sum counts per category.
    pub fn fraud_totals(table: &ReportTable) -> Result<FraudTotals, ReportError> {
        let labelled = ReportProcessor::label_map(table, LABEL, &FRAUD_LABELS, CATEGORY)?;
        let sums = ReportProcessor::group_sum(&labelled, CATEGORY, COUNT)?;
        Ok(FraudTotals {
            non_fraud: sums.get(FRAUD_LABELS[0].1),
            fraud: sums.get(FRAUD_LABELS[1].1),
        })
    }

    /// The `k` largest values of `value_column`, ties in input order.
    pub fn ranked(
        table: &ReportTable,
        label_column: &str,
        value_column: &str,
        k: usize,
    ) -> Result<Vec<RankedEntry>, ReportError> {
        let top = ReportProcessor::top_k(table, value_column, k, SortOrder::default())?;
        Self::entries(&top, label_column, value_column)
    }

    /// The row attaining the maximum, or `None` for an empty table.
    pub fn peak(
        table: &ReportTable,
        label_column: &str,
        value_column: &str,
    ) -> Result<Option<RankedEntry>, ReportError> {
        Ok(Self::ranked(table, label_column, value_column, 1)?
            .into_iter()
            .next())
    }

    /// Label/value pairs in table order. Rows without a numeric value are skipped.
    pub fn entries(
        table: &ReportTable,
        label_column: &str,
        value_column: &str,
    ) -> Result<Vec<RankedEntry>, ReportError> {
        let labels = table.text_values(label_column)?;
        let values = table.f64_values(value_column)?;
        Ok(labels
            .into_iter()
            .zip(values)
            .filter_map(|(label, value)| {
                Some(RankedEntry {
                    label: label.unwrap_or_else(|| MISSING_LABEL.to_string()),
                    value: value?,
                })
            })
            .collect())
    }

    pub fn dataset_overview(table: &ReportTable) -> DatasetOverview {
        DatasetOverview {
            rows: table.height(),
            columns: table.width(),
            malformed_lines: table.stats().malformed_lines,
        }
    }

    pub fn peak_step_insight(peak: Option<&RankedEntry>) -> String {
        match peak {
            Some(entry) => format!(
                "Highest fraud occurs at step {} with {} fraud cases.",
                entry.label,
                format_number(entry.value)
            ),
            None => NO_DATA.to_string(),
        }
    }

    pub fn top_type_insight(top: Option<&RankedEntry>) -> String {
        match top {
            Some(entry) => format!(
                "The transaction type with the most fraud is {} with {} cases.",
                entry.label,
                format_number(entry.value)
            ),
            None => NO_DATA.to_string(),
        }
    }

    pub fn repeated_pattern_insight(top: Option<&RankedEntry>) -> String {
        match top {
            Some(entry) => format!(
                "The most repeated fraud pattern is {}, seen {} times.",
                entry.label,
                format_number(entry.value)
            ),
            None => NO_DATA.to_string(),
        }
    }

    /// Integer-style metric text, or the no-data marker.
    pub fn metric_text(value: Option<f64>) -> String {
        value.map(format_number).unwrap_or_else(|| NO_DATA.to_string())
    }
}
