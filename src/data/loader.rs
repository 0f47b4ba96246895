//! Report Loader Module
//! Parses delimited report files into typed tables backed by Polars.

use crate::data::schema::{ColumnSpec, ReportSchema};
use crate::data::table::{LoadStats, ReportTable};
use polars::prelude::*;
use std::collections::HashSet;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

const BYTE_ORDER_MARK: char = '\u{feff}';

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Source unavailable: {origin} ({cause})")]
    SourceUnavailable {
        origin: String,
        #[source]
        cause: io::Error,
    },
    #[error("Column not found: {0}")]
    ColumnMissing(String),
    #[error("Unexpected failure: {0}")]
    Unexpected(#[from] PolarsError),
}

/// Where report bytes come from: a fixed path or a file the user picked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportSource {
    Path(PathBuf),
    Upload { name: String, bytes: Vec<u8> },
}

impl ReportSource {
    /// Human-readable origin used in notices and logs.
    pub fn origin(&self) -> String {
        match self {
            ReportSource::Path(path) => path.display().to_string(),
            ReportSource::Upload { name, .. } => name.clone(),
        }
    }
}

/// Loads delimited report files against a declared schema.
pub struct ReportLoader;

impl ReportLoader {
    pub fn load(source: &ReportSource, schema: &ReportSchema) -> Result<ReportTable, ReportError> {
        match source {
            ReportSource::Path(path) => Self::load_path(path, schema),
            ReportSource::Upload { name, bytes } => Self::load_reader(bytes.as_slice(), name, schema),
        }
    }

    pub fn load_path(path: &Path, schema: &ReportSchema) -> Result<ReportTable, ReportError> {
        let file = File::open(path).map_err(|cause| ReportError::SourceUnavailable {
            origin: path.display().to_string(),
            cause,
        })?;
        Self::load_reader(file, &path.display().to_string(), schema)
    }

    /// Read the whole stream, then parse it. A read failure yields no table at all.
    pub fn load_reader<R: Read>(
        mut reader: R,
        origin: &str,
        schema: &ReportSchema,
    ) -> Result<ReportTable, ReportError> {
        let mut bytes = Vec::new();
        reader
            .read_to_end(&mut bytes)
            .map_err(|cause| ReportError::SourceUnavailable {
                origin: origin.to_string(),
                cause,
            })?;

        let table = Self::parse_bytes(&bytes, schema)?;
        let stats = table.stats();
        info!(
            origin,
            rows = table.height(),
            columns = table.width(),
            malformed = stats.malformed_lines,
            "report loaded"
        );
        Ok(table)
    }

    /// Parse delimited text. Records whose field count differs from the schema are dropped.
    pub fn parse_bytes(bytes: &[u8], schema: &ReportSchema) -> Result<ReportTable, ReportError> {
        let body = prepare_lines(bytes, schema);
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(schema.delimiter)
            .trim(csv::Trim::All)
            .from_reader(body.as_bytes());
        let mut records = reader.records();

        let names = match &schema.columns {
            ColumnSpec::Named(names) => names.clone(),
            ColumnSpec::Header => match records.next() {
                Some(Ok(header)) => unique_names(header.iter().map(non_empty).collect()),
                Some(Err(e)) => {
                    debug!(error = %e, "unreadable header line");
                    Vec::new()
                }
                None => Vec::new(),
            },
        };

        let mut cells: Vec<Vec<Option<String>>> = vec![Vec::new(); names.len()];
        let mut stats = LoadStats::default();

        for record in records {
            stats.lines_read += 1;
            let record = match record {
                Ok(record) if record.len() == names.len() => record,
                _ => {
                    stats.malformed_lines += 1;
                    continue;
                }
            };
            for (column, field) in cells.iter_mut().zip(record.iter()) {
                column.push(non_empty(field));
            }
        }

        if stats.malformed_lines > 0 {
            debug!(
                dropped = stats.malformed_lines,
                expected_fields = names.len(),
                "dropped malformed lines"
            );
        }

        let columns: Vec<Column> = names
            .iter()
            .zip(cells)
            .map(|(name, values)| Column::new(name.as_str().into(), values))
            .collect();
        let df = DataFrame::new(columns)?;

        Ok(ReportTable::new(df, schema.clone(), stats))
    }
}

/// Decode, drop a leading byte order mark, skip the preamble, strip table
/// borders and blank lines. What remains goes to the csv reader.
fn prepare_lines(bytes: &[u8], schema: &ReportSchema) -> String {
    let decoded = String::from_utf8_lossy(bytes);
    let text: &str = &decoded;
    let text = text.strip_prefix(BYTE_ORDER_MARK).unwrap_or(text);
    let border = char::from(schema.delimiter);

    let mut body = String::with_capacity(text.len());
    for line in text.lines().skip(schema.skip_rows) {
        let line = if schema.trim_borders {
            let line = line.trim();
            let line = line.strip_prefix(border).unwrap_or(line);
            line.strip_suffix(border).unwrap_or(line)
        } else {
            line
        };
        if line.trim().is_empty() {
            continue;
        }
        body.push_str(line);
        body.push('\n');
    }
    body
}

fn non_empty(field: &str) -> Option<String> {
    if field.is_empty() {
        None
    } else {
        Some(field.to_string())
    }
}

/// Header names made unique the way spreadsheet exports expect: `a`, `a.1`, `a.2`.
fn unique_names(raw: Vec<Option<String>>) -> Vec<String> {
    let mut used = HashSet::new();
    raw.into_iter()
        .enumerate()
        .map(|(i, name)| {
            let base = name.unwrap_or_else(|| format!("column_{}", i + 1));
            let mut candidate = base.clone();
            let mut suffix = 0;
            while !used.insert(candidate.clone()) {
                suffix += 1;
                candidate = format!("{}.{}", base, suffix);
            }
            candidate
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::schema::{ReportKind, COUNT, PATTERN, STEP};

    struct BrokenReader;

    impl Read for BrokenReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "device gone"))
        }
    }

    #[test]
    fn drops_lines_with_wrong_field_count() {
        let input = b"0\t5\n1\t42\n2\t7\n3\t9\textra\n";
        let table = ReportLoader::parse_bytes(input, &ReportKind::FraudByStep.schema()).unwrap();
        assert_eq!(table.height(), 3);
        assert_eq!(table.stats().lines_read, 4);
        assert_eq!(table.stats().malformed_lines, 1);
    }

    #[test]
    fn preserves_input_order() {
        let input = b"2\t7\n0\t5\n1\t42\n";
        let table = ReportLoader::parse_bytes(input, &ReportKind::FraudByStep.schema()).unwrap();
        let steps = table.text_values(STEP).unwrap();
        assert_eq!(
            steps,
            vec![Some("2".into()), Some("0".into()), Some("1".into())]
        );
    }

    #[test]
    fn all_malformed_yields_empty_table() {
        let input = b"just one field\nanother\n";
        let table = ReportLoader::parse_bytes(input, &ReportKind::FraudByType.schema()).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.width(), 2);
        assert_eq!(table.stats().malformed_lines, 2);
    }

    #[test]
    fn repeated_patterns_skip_preamble_and_borders() {
        let input = "+---------+-------+\n| pattern | count |\n| C1→C2 | 12 |\n+---------+-------+\n| C3→C4 | 4 |\n";
        let table =
            ReportLoader::parse_bytes(input.as_bytes(), &ReportKind::RepeatedPatterns.schema())
                .unwrap();
        assert_eq!(table.height(), 2);
        assert_eq!(table.stats().malformed_lines, 1);
        assert_eq!(
            table.text_values(PATTERN).unwrap(),
            vec![Some("C1→C2".into()), Some("C3→C4".into())]
        );
        assert_eq!(
            table.text_values(COUNT).unwrap(),
            vec![Some("12".into()), Some("4".into())]
        );
    }

    #[test]
    fn plain_pipe_lines_after_preamble() {
        let input = "Pattern|Count\n-------|-----\nC1->C2|3\nC5->C6|8\n";
        let table =
            ReportLoader::parse_bytes(input.as_bytes(), &ReportKind::RepeatedPatterns.schema())
                .unwrap();
        assert_eq!(table.height(), 2);
        assert_eq!(table.stats().malformed_lines, 0);
    }

    #[test]
    fn header_mode_takes_names_from_first_line() {
        let input = "step;type;amount;type\n1;PAYMENT;9839.64;x\n1;TRANSFER;181.0\n\n2;CASH_OUT;\"181.0\";y\n";
        let table =
            ReportLoader::parse_bytes(input.as_bytes(), &ReportKind::RawDataset.schema()).unwrap();
        assert_eq!(table.column_names(), vec!["step", "type", "amount", "type.1"]);
        assert_eq!(table.height(), 2);
        assert_eq!(table.stats().malformed_lines, 1);
        assert_eq!(
            table.text_values("amount").unwrap(),
            vec![Some("9839.64".into()), Some("181.0".into())]
        );
    }

    #[test]
    fn empty_fields_are_missing() {
        let input = b"CASH_OUT\t\nTRANSFER\t3\n";
        let table = ReportLoader::parse_bytes(input, &ReportKind::FraudByType.schema()).unwrap();
        assert_eq!(table.height(), 2);
        assert_eq!(table.text_values(crate::data::schema::FRAUD_COUNT).unwrap()[0], None);
    }

    #[test]
    fn empty_source_is_not_an_error() {
        let table = ReportLoader::parse_bytes(b"", &ReportKind::RawDataset.schema()).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.width(), 0);
    }

    #[test]
    fn unreadable_stream_is_source_unavailable() {
        let result = ReportLoader::load_reader(BrokenReader, "upload", &ReportKind::FraudByStep.schema());
        match result {
            Err(ReportError::SourceUnavailable { origin, .. }) => assert_eq!(origin, "upload"),
            other => panic!("expected SourceUnavailable, got {other:?}"),
        }
    }

    #[test]
    fn missing_path_is_source_unavailable() {
        let source = ReportSource::Path(PathBuf::from("/definitely/not/here.txt"));
        let result = ReportLoader::load(&source, &ReportKind::FraudByStep.schema());
        assert!(matches!(result, Err(ReportError::SourceUnavailable { .. })));
    }

    #[test]
    fn upload_and_path_share_the_contract() {
        let source = ReportSource::Upload {
            name: "step.txt".into(),
            bytes: b"0\t5\n1\t42\n".to_vec(),
        };
        let table = ReportLoader::load(&source, &ReportKind::FraudByStep.schema()).unwrap();
        assert_eq!(table.height(), 2);
        assert_eq!(source.origin(), "step.txt");
    }

    #[test]
    fn quoted_delimiter_stays_in_one_field() {
        let input = "step;type;nameOrig\n1;\"PAY;MENT\";C1\n2;TRANSFER;C2\n";
        let table =
            ReportLoader::parse_bytes(input.as_bytes(), &ReportKind::RawDataset.schema()).unwrap();
        assert_eq!(table.height(), 2);
        assert_eq!(table.stats().malformed_lines, 0);
        assert_eq!(
            table.text_values("type").unwrap(),
            vec![Some("PAY;MENT".into()), Some("TRANSFER".into())]
        );
    }

    #[test]
    fn quoted_fields_lose_quotes_and_padding() {
        let input = b"\"CASH_OUT\"\t 4116 \n\"\"\t3\n";
        let table = ReportLoader::parse_bytes(input, &ReportKind::FraudByType.schema()).unwrap();
        assert_eq!(
            table.text_values(crate::data::schema::TRANSACTION_TYPE).unwrap(),
            vec![Some("CASH_OUT".into()), None]
        );
        assert_eq!(
            table.text_values(crate::data::schema::FRAUD_COUNT).unwrap(),
            vec![Some("4116".into()), Some("3".into())]
        );
    }

    #[test]
    fn leading_byte_order_mark_is_ignored() {
        let input = "\u{feff}0\t5\n1\t42\n2\t7\n";
        let table =
            ReportLoader::parse_bytes(input.as_bytes(), &ReportKind::FraudByStep.schema()).unwrap();
        let cleaned = crate::data::ReportProcessor::clean(&table).unwrap();
        assert_eq!(cleaned.height(), 3);
        assert_eq!(
            cleaned.text_values(STEP).unwrap(),
            vec![Some("0".into()), Some("1".into()), Some("2".into())]
        );
    }

    #[test]
    fn byte_order_mark_does_not_rename_first_header() {
        let input = "\u{feff}step;type\n1;PAYMENT\n";
        let table =
            ReportLoader::parse_bytes(input.as_bytes(), &ReportKind::RawDataset.schema()).unwrap();
        assert_eq!(table.column_names(), vec!["step", "type"]);
        assert_eq!(table.height(), 1);
    }
}
