//! Report Schema Module
//! Configuration records for the fixed report file formats.

use std::fmt;

pub const TRANSACTION_TYPE: &str = "TransactionType";
pub const COUNT: &str = "Count";
pub const LABEL: &str = "Label";
pub const CATEGORY: &str = "Category";
pub const STEP: &str = "Step";
pub const FRAUD_COUNT: &str = "FraudCount";
pub const PATTERN: &str = "Pattern";

/// How column names are assigned to parsed fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnSpec {
    /// Names come from the first data line of the source.
    Header,
    /// Names are assigned positionally; lines must have exactly this many fields.
    Named(Vec<String>),
}

impl ColumnSpec {
    pub fn named(names: &[&str]) -> Self {
        ColumnSpec::Named(names.iter().map(|n| n.to_string()).collect())
    }
}

/// Parsing parameters for one delimited file format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSchema {
    /// Single-byte field separator.
    pub delimiter: u8,
    pub skip_rows: usize,
    pub columns: ColumnSpec,
    /// Strip one leading and one trailing delimiter (`| a | b |` style tables).
    pub trim_borders: bool,
    /// Columns that must hold numbers once the table is cleaned.
    pub numeric_columns: Vec<String>,
}

impl ReportSchema {
    pub fn new(delimiter: u8, columns: ColumnSpec) -> Self {
        Self {
            delimiter,
            skip_rows: 0,
            columns,
            trim_borders: false,
            numeric_columns: Vec::new(),
        }
    }

    pub fn with_skip_rows(mut self, skip_rows: usize) -> Self {
        self.skip_rows = skip_rows;
        self
    }

    pub fn with_trim_borders(mut self, trim_borders: bool) -> Self {
        self.trim_borders = trim_borders;
        self
    }

    pub fn with_numeric(mut self, columns: &[&str]) -> Self {
        self.numeric_columns = columns.iter().map(|c| c.to_string()).collect();
        self
    }

    /// Number of fields a line must have, when names are declared up front.
    pub fn expected_fields(&self) -> Option<usize> {
        match &self.columns {
            ColumnSpec::Header => None,
            ColumnSpec::Named(names) => Some(names.len()),
        }
    }
}

/// The precomputed report files the dashboard knows how to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ReportKind {
    RawDataset,
    TransactionTypes,
    FraudVsNonFraud,
    FraudByStep,
    FraudByType,
    PatternDetail,
    RepeatedPatterns,
}

impl ReportKind {
    pub const ALL: [ReportKind; 7] = [
        ReportKind::RawDataset,
        ReportKind::TransactionTypes,
        ReportKind::FraudVsNonFraud,
        ReportKind::FraudByStep,
        ReportKind::FraudByType,
        ReportKind::PatternDetail,
        ReportKind::RepeatedPatterns,
    ];

    pub fn schema(self) -> ReportSchema {
        match self {
            ReportKind::RawDataset => ReportSchema::new(b';', ColumnSpec::Header),
            ReportKind::TransactionTypes => {
                ReportSchema::new(b'\t', ColumnSpec::named(&[TRANSACTION_TYPE, COUNT]))
                    .with_numeric(&[COUNT])
            }
            ReportKind::FraudVsNonFraud => {
                ReportSchema::new(b'\t', ColumnSpec::named(&[LABEL, COUNT])).with_numeric(&[COUNT])
            }
            ReportKind::FraudByStep => {
                ReportSchema::new(b'\t', ColumnSpec::named(&[STEP, FRAUD_COUNT]))
                    .with_numeric(&[STEP, FRAUD_COUNT])
            }
            ReportKind::FraudByType => {
                ReportSchema::new(b'\t', ColumnSpec::named(&[TRANSACTION_TYPE, FRAUD_COUNT]))
                    .with_numeric(&[FRAUD_COUNT])
            }
            ReportKind::PatternDetail => {
                ReportSchema::new(b'\t', ColumnSpec::named(&[PATTERN, COUNT])).with_numeric(&[COUNT])
            }
            ReportKind::RepeatedPatterns => {
                ReportSchema::new(b'|', ColumnSpec::named(&[PATTERN, COUNT]))
                    .with_skip_rows(2)
                    .with_trim_borders(true)
                    .with_numeric(&[COUNT])
            }
        }
    }

    /// File name looked up under the data directory in path mode.
    pub fn default_file_name(self) -> &'static str {
        match self {
            ReportKind::RawDataset => "Paysim_Raw.csv",
            ReportKind::TransactionTypes => "distribusi_jenis_transaksi.txt",
            ReportKind::FraudVsNonFraud => "Jumlah Fraud vs Non-Fraud.txt",
            ReportKind::FraudByStep => "Fraud Berdasarkan Step.txt",
            ReportKind::FraudByType => "Fraud Berdasarkan Jenis Transaksi.txt",
            ReportKind::PatternDetail => "Pola Transaksi Fraud Paling Mencurigakan.txt",
            ReportKind::RepeatedPatterns => "repeated_transactions.txt",
        }
    }

    /// Key used in the `[files]` table of the configuration file.
    pub fn config_key(self) -> &'static str {
        match self {
            ReportKind::RawDataset => "raw_dataset",
            ReportKind::TransactionTypes => "transaction_types",
            ReportKind::FraudVsNonFraud => "fraud_vs_non_fraud",
            ReportKind::FraudByStep => "fraud_by_step",
            ReportKind::FraudByType => "fraud_by_type",
            ReportKind::PatternDetail => "pattern_detail",
            ReportKind::RepeatedPatterns => "repeated_patterns",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            ReportKind::RawDataset => "Raw transaction dataset",
            ReportKind::TransactionTypes => "Transaction type distribution",
            ReportKind::FraudVsNonFraud => "Fraud vs non-fraud",
            ReportKind::FraudByStep => "Fraud by step",
            ReportKind::FraudByType => "Fraud by transaction type",
            ReportKind::PatternDetail => "Suspicious pattern detail",
            ReportKind::RepeatedPatterns => "Repeated fraud patterns",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_patterns_skip_preamble() {
        let schema = ReportKind::RepeatedPatterns.schema();
        assert_eq!(schema.delimiter, b'|');
        assert_eq!(schema.skip_rows, 2);
        assert!(schema.trim_borders);
        assert_eq!(schema.expected_fields(), Some(2));
    }

    #[test]
    fn raw_dataset_reads_header() {
        let schema = ReportKind::RawDataset.schema();
        assert_eq!(schema.delimiter, b';');
        assert_eq!(schema.columns, ColumnSpec::Header);
        assert_eq!(schema.expected_fields(), None);
    }

    #[test]
    fn aggregate_reports_are_tab_delimited() {
        for kind in ReportKind::ALL {
            if matches!(kind, ReportKind::RawDataset | ReportKind::RepeatedPatterns) {
                continue;
            }
            let schema = kind.schema();
            assert_eq!(schema.delimiter, b'\t', "{kind}");
            assert_eq!(schema.skip_rows, 0, "{kind}");
            assert!(!schema.numeric_columns.is_empty(), "{kind}");
        }
    }

    #[test]
    fn config_keys_are_unique() {
        let mut keys: Vec<&str> = ReportKind::ALL.iter().map(|k| k.config_key()).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), ReportKind::ALL.len());
    }
}
