//! Report Table Module
//! A cleaned, ordered table paired with the schema that produced it.

use crate::data::loader::ReportError;
use crate::data::schema::ReportSchema;
use polars::prelude::*;

/// Line accounting from the most recent parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    /// Non-blank lines considered after the skipped preamble (header excluded).
    pub lines_read: usize,
    /// Lines dropped because their field count did not match the schema.
    pub malformed_lines: usize,
}

/// Ordered rows of one report. Derived tables are new values; nothing mutates in place.
#[derive(Debug, Clone)]
pub struct ReportTable {
    df: DataFrame,
    schema: ReportSchema,
    stats: LoadStats,
}

impl ReportTable {
    pub fn new(df: DataFrame, schema: ReportSchema, stats: LoadStats) -> Self {
        Self { df, schema, stats }
    }

    /// Build a derived table over a new frame, keeping schema and load stats.
    pub fn derive(&self, df: DataFrame) -> Self {
        Self {
            df,
            schema: self.schema.clone(),
            stats: self.stats,
        }
    }

    pub fn dataframe(&self) -> &DataFrame {
        &self.df
    }

    pub fn schema(&self) -> &ReportSchema {
        &self.schema
    }

    pub fn stats(&self) -> LoadStats {
        self.stats
    }

    pub fn height(&self) -> usize {
        self.df.height()
    }

    pub fn width(&self) -> usize {
        self.df.width()
    }

    pub fn is_empty(&self) -> bool {
        self.df.height() == 0
    }

    pub fn column_names(&self) -> Vec<String> {
        self.df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    pub fn column(&self, name: &str) -> Result<&Column, ReportError> {
        self.df
            .column(name)
            .map_err(|_| ReportError::ColumnMissing(name.to_string()))
    }

    /// Derived table with only the named columns, in the given order.
    pub fn select(&self, names: &[&str]) -> Result<ReportTable, ReportError> {
        for name in names {
            self.column(name)?;
        }
        let df = self.df.select(names.iter().copied())?;
        Ok(self.derive(df))
    }

    /// Numeric view of a column; values that are not numbers come back as `None`.
    pub fn f64_values(&self, name: &str) -> Result<Vec<Option<f64>>, ReportError> {
        let casted = self.column(name)?.cast(&DataType::Float64)?;
        let values = casted.f64()?.into_iter().collect();
        Ok(values)
    }

    /// Display text of every cell in a column; missing cells are `None`.
    pub fn text_values(&self, name: &str) -> Result<Vec<Option<String>>, ReportError> {
        let column = self.column(name)?;
        let mut values = Vec::with_capacity(column.len());
        for i in 0..column.len() {
            let value = column.get(i)?;
            values.push(any_value_text(&value));
        }
        Ok(values)
    }

    /// Display text of the first `limit` rows, in column order.
    pub fn rows_as_text(&self, limit: usize) -> Vec<Vec<String>> {
        let rows = self.df.height().min(limit);
        let columns = self.df.get_columns();
        (0..rows)
            .map(|i| {
                columns
                    .iter()
                    .map(|col| {
                        col.get(i)
                            .ok()
                            .and_then(|v| any_value_text(&v))
                            .unwrap_or_default()
                    })
                    .collect()
            })
            .collect()
    }
}

fn any_value_text(value: &AnyValue<'_>) -> Option<String> {
    match value {
        AnyValue::Null => None,
        AnyValue::String(s) => Some(s.to_string()),
        AnyValue::StringOwned(s) => Some(s.to_string()),
        AnyValue::Float64(v) => Some(format_number(*v)),
        AnyValue::Float32(v) => Some(format_number(f64::from(*v))),
        other => Some(other.to_string().trim_matches('"').to_string()),
    }
}

/// Whole numbers print without a fraction; everything else with two decimals.
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{:.2}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::schema::{ColumnSpec, ReportSchema};

    fn sample() -> ReportTable {
        let df = DataFrame::new(vec![
            Column::new("Name".into(), vec!["a", "b"]),
            Column::new("Value".into(), vec![1.0f64, 2.5]),
        ])
        .unwrap();
        ReportTable::new(
            df,
            ReportSchema::new(b'\t', ColumnSpec::named(&["Name", "Value"])),
            LoadStats::default(),
        )
    }

    #[test]
    fn format_number_drops_integral_fraction() {
        assert_eq!(format_number(42.0), "42");
        assert_eq!(format_number(-3.0), "-3");
        assert_eq!(format_number(2.5), "2.50");
        assert_eq!(format_number(f64::NAN), "NaN");
    }

    #[test]
    fn rows_as_text_respects_limit() {
        let table = sample();
        let rows = table.rows_as_text(1);
        assert_eq!(rows, vec![vec!["a".to_string(), "1".to_string()]]);
        assert_eq!(table.rows_as_text(10).len(), 2);
    }

    #[test]
    fn missing_column_is_reported_by_name() {
        let table = sample();
        match table.f64_values("Nope") {
            Err(ReportError::ColumnMissing(name)) => assert_eq!(name, "Nope"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn select_reorders_columns() {
        let table = sample().select(&["Value", "Name"]).unwrap();
        assert_eq!(table.column_names(), vec!["Value", "Name"]);
        assert!(matches!(
            sample().select(&["Name", "Other"]),
            Err(ReportError::ColumnMissing(_))
        ));
    }

    #[test]
    fn text_values_format_numbers() {
        let table = sample();
        let values = table.text_values("Value").unwrap();
        assert_eq!(values, vec![Some("1".to_string()), Some("2.50".to_string())]);
    }
}
