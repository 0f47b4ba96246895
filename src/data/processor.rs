//! Report Processor Module
//! Pure cleaning and ranking steps over report tables.

use crate::data::loader::ReportError;
use crate::data::table::ReportTable;
use polars::prelude::*;
use std::collections::HashMap;
use tracing::debug;

/// Fraud flag values as written by the upstream job.
pub const FRAUD_LABELS: [(i64, &str); 2] = [(0, "Non-Fraud"), (1, "Fraud")];

/// Sort direction for ranking operations. Rankings default to largest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl Default for SortOrder {
    fn default() -> Self {
        SortOrder::Descending
    }
}

/// Per-group sums in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupSums {
    entries: Vec<(String, f64)>,
}

impl GroupSums {
    pub fn get(&self, key: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, sum)| *sum)
    }

    pub fn entries(&self) -> &[(String, f64)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Cleaning, labelling and ranking operations. Every call returns a new table.
pub struct ReportProcessor;

impl ReportProcessor {
    /// Cast a column to Float64 and drop rows where the value is missing or not a number.
    pub fn coerce_numeric(table: &ReportTable, column: &str) -> Result<ReportTable, ReportError> {
        let casted = table
            .column(column)?
            .as_materialized_series()
            .cast(&DataType::Float64)?;

        let keep: Vec<bool> = casted
            .f64()?
            .into_iter()
            .map(|v| v.is_some_and(|x| !x.is_nan()))
            .collect();
        let removed = keep.iter().filter(|k| !**k).count();
        let mask: BooleanChunked = keep.into_iter().collect();

        let mut df = table.dataframe().clone();
        df.with_column(casted)?;
        let df = df.filter(&mask)?;

        if removed > 0 {
            debug!(column, removed, "removed rows with missing numeric values");
        }

        Ok(table.derive(df))
    }

    /// Coerce every numeric column the schema declares.
    pub fn clean(table: &ReportTable) -> Result<ReportTable, ReportError> {
        let mut cleaned = table.clone();
        for column in &table.schema().numeric_columns {
            cleaned = Self::coerce_numeric(&cleaned, column)?;
        }
        Ok(cleaned)
    }

    /// Add `target` by looking up each value of `column` in `mapping`.
    /// Values without a mapping leave the category missing.
    pub fn label_map(
        table: &ReportTable,
        column: &str,
        mapping: &[(i64, &str)],
        target: &str,
    ) -> Result<ReportTable, ReportError> {
        let labels: Vec<Option<String>> = table
            .f64_values(column)?
            .into_iter()
            .map(|value| {
                let value = value.filter(|v| v.fract() == 0.0)?;
                mapping
                    .iter()
                    .find(|(key, _)| *key as f64 == value)
                    .map(|(_, label)| label.to_string())
            })
            .collect();

        let mut df = table.dataframe().clone();
        df.with_column(Column::new(target.into(), labels))?;
        Ok(table.derive(df))
    }

    /// Sum `value_column` per distinct `group_column`. Rows missing either side contribute nothing.
    pub fn group_sum(
        table: &ReportTable,
        group_column: &str,
        value_column: &str,
    ) -> Result<GroupSums, ReportError> {
        let keys = table.text_values(group_column)?;
        let values = table.f64_values(value_column)?;

        let mut index: HashMap<String, usize> = HashMap::new();
        let mut entries: Vec<(String, f64)> = Vec::new();

        for (key, value) in keys.into_iter().zip(values) {
            let (Some(key), Some(value)) = (key, value) else {
                continue;
            };
            if value.is_nan() {
                continue;
            }
            match index.get(&key) {
                Some(&pos) => entries[pos].1 += value,
                None => {
                    index.insert(key.clone(), entries.len());
                    entries.push((key, value));
                }
            }
        }

        Ok(GroupSums { entries })
    }

    /// Stable sort on the coerced numeric column; equal values keep their input order.
    pub fn sort_by(
        table: &ReportTable,
        column: &str,
        order: SortOrder,
    ) -> Result<ReportTable, ReportError> {
        let coerced = Self::coerce_numeric(table, column)?;
        let df = coerced.dataframe().sort(
            [column],
            SortMultipleOptions::default()
                .with_order_descending(order == SortOrder::Descending)
                .with_maintain_order(true),
        )?;
        Ok(table.derive(df))
    }

    /// First `k` rows under [`Self::sort_by`]; fewer when the table is smaller.
    pub fn top_k(
        table: &ReportTable,
        column: &str,
        k: usize,
        order: SortOrder,
    ) -> Result<ReportTable, ReportError> {
        let sorted = Self::sort_by(table, column, order)?;
        Ok(Self::head(&sorted, k))
    }

    pub fn head(table: &ReportTable, n: usize) -> ReportTable {
        table.derive(table.dataframe().head(Some(n)))
    }
}
