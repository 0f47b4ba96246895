//! Report Pipeline
//! One load → clean → rank → summarize pipeline, parameterized by report kind.

use crate::charts::{ChartKind, ChartSpec, FRAUD_COLOR};
use crate::config::{DashboardConfig, IngressMode};
use crate::dashboard::view::DashboardView;
use crate::data::schema::{CATEGORY, COUNT, FRAUD_COUNT, LABEL, PATTERN, STEP, TRANSACTION_TYPE};
use crate::data::{
    ReportError, ReportKind, ReportLoader, ReportProcessor, ReportSource, ReportTable, SortOrder,
    FRAUD_LABELS,
};
use crate::stats::{SummaryCalculator, NO_DATA};
use std::collections::HashMap;
use tracing::{info, warn};

/// Where each report's bytes come from for the current interaction.
#[derive(Debug, Clone)]
pub struct SourceSet {
    mode: IngressMode,
    paths: HashMap<ReportKind, ReportSource>,
    uploads: HashMap<ReportKind, ReportSource>,
}

impl SourceSet {
    pub fn from_config(config: &DashboardConfig) -> Self {
        let paths = ReportKind::ALL
            .iter()
            .map(|&kind| (kind, ReportSource::Path(config.path_for(kind))))
            .collect();
        Self {
            mode: config.ingress,
            paths,
            uploads: HashMap::new(),
        }
    }

    pub fn mode(&self) -> IngressMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: IngressMode) {
        self.mode = mode;
    }

    pub fn set_upload(&mut self, kind: ReportKind, name: String, bytes: Vec<u8>) {
        self.uploads
            .insert(kind, ReportSource::Upload { name, bytes });
    }

    pub fn clear_upload(&mut self, kind: ReportKind) {
        self.uploads.remove(&kind);
    }

    /// `None` means nothing has been chosen yet for this report.
    pub fn source_for(&self, kind: ReportKind) -> Option<&ReportSource> {
        match self.mode {
            IngressMode::Path => self.paths.get(&kind),
            IngressMode::Upload => self.uploads.get(&kind),
        }
    }
}

/// Sizes that shape what a view shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineSettings {
    pub preview_rows: usize,
    pub top_patterns: usize,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            preview_rows: 50,
            top_patterns: 10,
        }
    }
}

impl From<&DashboardConfig> for PipelineSettings {
    fn from(config: &DashboardConfig) -> Self {
        Self {
            preview_rows: config.preview_rows,
            top_patterns: config.top_patterns,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Metric {
    pub label: String,
    pub value: String,
}

impl Metric {
    fn new(label: &str, value: String) -> Self {
        Self {
            label: label.to_string(),
            value,
        }
    }
}

/// Display text of a table, cut to a row limit.
#[derive(Debug, Clone, PartialEq)]
pub struct TablePreview {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub total_rows: usize,
}

impl TablePreview {
    pub fn from_table(table: &ReportTable, limit: usize) -> Self {
        Self {
            columns: table.column_names(),
            rows: table.rows_as_text(limit),
            total_rows: table.height(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SectionContent {
    pub metrics: Vec<Metric>,
    pub table: Option<TablePreview>,
    pub chart: Option<ChartSpec>,
    pub insight: Option<String>,
    pub caption: Option<String>,
    /// Set when the source was readable but held no usable rows.
    pub notice: Option<String>,
    /// Confirmation that the source was read, with its usable row count.
    pub loaded: Option<String>,
}

#[derive(Debug)]
pub enum SectionOutcome {
    /// No file chosen yet.
    AwaitingSource,
    /// The source could not be read, or processing failed; nothing partial is shown.
    Failed(ReportError),
    Ready(SectionContent),
}

#[derive(Debug)]
pub struct Section {
    pub kind: ReportKind,
    pub outcome: SectionOutcome,
}

/// Everything one view needs to draw, built once per interaction.
#[derive(Debug)]
pub struct RenderedReport {
    pub view: DashboardView,
    pub sections: Vec<Section>,
}

pub struct ReportPipeline;

impl ReportPipeline {
    /// Build every section of `view`. A failing section never affects its siblings.
    pub fn render(
        view: DashboardView,
        sources: &SourceSet,
        settings: &PipelineSettings,
    ) -> RenderedReport {
        let sections = view
            .report_kinds()
            .iter()
            .map(|&kind| Section {
                kind,
                outcome: Self::section_outcome(kind, sources.source_for(kind), settings),
            })
            .collect();
        RenderedReport { view, sections }
    }

    fn section_outcome(
        kind: ReportKind,
        source: Option<&ReportSource>,
        settings: &PipelineSettings,
    ) -> SectionOutcome {
        let Some(source) = source else {
            return SectionOutcome::AwaitingSource;
        };
        match Self::build(kind, source, settings) {
            Ok(content) => SectionOutcome::Ready(content),
            Err(e) => {
                warn!(report = %kind, origin = %source.origin(), error = %e, "report failed");
                SectionOutcome::Failed(e)
            }
        }
    }

    /// Load and clean one report, then describe it for display.
    pub fn build(
        kind: ReportKind,
        source: &ReportSource,
        settings: &PipelineSettings,
    ) -> Result<SectionContent, ReportError> {
        let raw = ReportLoader::load(source, &kind.schema())?;
        let table = ReportProcessor::clean(&raw)?;
        info!(report = %kind, rows = table.height(), "report cleaned");

        if table.is_empty() {
            return Ok(Self::empty_content(kind, &table));
        }

        let mut content = match kind {
            ReportKind::RawDataset => Self::raw_dataset(&table, settings)?,
            ReportKind::TransactionTypes => Self::transaction_types(&table)?,
            ReportKind::FraudVsNonFraud => Self::fraud_vs_non_fraud(&table)?,
            ReportKind::FraudByStep => Self::fraud_by_step(&table)?,
            ReportKind::FraudByType => Self::fraud_by_type(&table)?,
            ReportKind::PatternDetail => Self::pattern_detail(&table)?,
            ReportKind::RepeatedPatterns => Self::repeated_patterns(&table, settings)?,
        };
        content.loaded = Some(format!(
            "Loaded {} rows from {}",
            table.height(),
            source.origin()
        ));
        Ok(content)
    }

    fn empty_content(kind: ReportKind, table: &ReportTable) -> SectionContent {
        let metrics = match kind {
            ReportKind::RawDataset => vec![
                Metric::new("Rows", "0".to_string()),
                Metric::new("Columns", table.width().to_string()),
            ],
            ReportKind::FraudVsNonFraud => vec![
                Metric::new("Total Non-Fraud", NO_DATA.to_string()),
                Metric::new("Total Fraud", NO_DATA.to_string()),
            ],
            _ => Vec::new(),
        };
        SectionContent {
            metrics,
            notice: Some(NO_DATA.to_string()),
            ..Default::default()
        }
    }

    fn raw_dataset(
        table: &ReportTable,
        settings: &PipelineSettings,
    ) -> Result<SectionContent, ReportError> {
        let overview = SummaryCalculator::dataset_overview(table);
        let preview = ReportProcessor::head(table, settings.preview_rows);
        Ok(SectionContent {
            metrics: vec![
                Metric::new("Rows", overview.rows.to_string()),
                Metric::new("Columns", overview.columns.to_string()),
            ],
            table: Some(TablePreview::from_table(&preview, settings.preview_rows)),
            caption: Some(format!(
                "Showing the first {} of {} rows",
                preview.height(),
                overview.rows
            )),
            ..Default::default()
        })
    }

    fn transaction_types(table: &ReportTable) -> Result<SectionContent, ReportError> {
        let points = SummaryCalculator::entries(table, TRANSACTION_TYPE, COUNT)?;
        Ok(SectionContent {
            table: Some(TablePreview::from_table(table, table.height())),
            chart: Some(
                ChartSpec::new("transaction_types", ChartKind::Bar, "Transactions per type", points)
                    .with_axes("Transaction type", "Count"),
            ),
            ..Default::default()
        })
    }

    fn fraud_vs_non_fraud(table: &ReportTable) -> Result<SectionContent, ReportError> {
        let totals = SummaryCalculator::fraud_totals(table)?;
        let labelled = ReportProcessor::label_map(table, LABEL, &FRAUD_LABELS, CATEGORY)?;
        let shown = labelled.select(&[CATEGORY, COUNT])?;
        let points = SummaryCalculator::entries(&shown, CATEGORY, COUNT)?;

        Ok(SectionContent {
            metrics: vec![
                Metric::new(
                    "Total Non-Fraud",
                    SummaryCalculator::metric_text(totals.non_fraud),
                ),
                Metric::new("Total Fraud", SummaryCalculator::metric_text(totals.fraud)),
            ],
            table: Some(TablePreview::from_table(&shown, shown.height())),
            chart: Some(ChartSpec::new(
                "fraud_share",
                ChartKind::Pie,
                "Share of fraud vs non-fraud",
                points,
            )),
            insight: totals
                .fraud_share()
                .map(|share| format!("{:.2}% of labelled transactions are fraud.", share)),
            ..Default::default()
        })
    }

    fn fraud_by_step(table: &ReportTable) -> Result<SectionContent, ReportError> {
        let by_step = ReportProcessor::sort_by(table, STEP, SortOrder::Ascending)?;
        let points = SummaryCalculator::entries(&by_step, STEP, FRAUD_COUNT)?;
        let peak = SummaryCalculator::peak(&by_step, STEP, FRAUD_COUNT)?;

        Ok(SectionContent {
            table: Some(TablePreview::from_table(&by_step, by_step.height())),
            chart: Some(
                ChartSpec::new("fraud_by_step", ChartKind::Line, "Fraud cases per step", points)
                    .with_axes("Step (hour)", "Fraud count"),
            ),
            insight: Some(SummaryCalculator::peak_step_insight(peak.as_ref())),
            ..Default::default()
        })
    }

    /// Tabulated most-fraud first; bars drawn ascending so the largest sits on top.
    fn fraud_by_type(table: &ReportTable) -> Result<SectionContent, ReportError> {
        let descending = ReportProcessor::sort_by(table, FRAUD_COUNT, SortOrder::Descending)?;
        let ascending = ReportProcessor::sort_by(table, FRAUD_COUNT, SortOrder::Ascending)?;
        let points = SummaryCalculator::entries(&ascending, TRANSACTION_TYPE, FRAUD_COUNT)?;
        let top = SummaryCalculator::peak(&descending, TRANSACTION_TYPE, FRAUD_COUNT)?;

        Ok(SectionContent {
            table: Some(TablePreview::from_table(&descending, descending.height())),
            chart: Some(
                ChartSpec::new(
                    "fraud_by_type",
                    ChartKind::HorizontalBar,
                    "Fraud cases per transaction type",
                    points,
                )
                .with_axes("Fraud count", "Transaction type")
                .with_color(FRAUD_COLOR),
            ),
            insight: Some(SummaryCalculator::top_type_insight(top.as_ref())),
            ..Default::default()
        })
    }

    fn pattern_detail(table: &ReportTable) -> Result<SectionContent, ReportError> {
        Ok(SectionContent {
            table: Some(TablePreview::from_table(table, table.height())),
            caption: Some("Sender → receiver pairs flagged as fraud".to_string()),
            ..Default::default()
        })
    }

    fn repeated_patterns(
        table: &ReportTable,
        settings: &PipelineSettings,
    ) -> Result<SectionContent, ReportError> {
        let top = SummaryCalculator::ranked(table, PATTERN, COUNT, settings.top_patterns)?;
        let insight = SummaryCalculator::repeated_pattern_insight(top.first());
        Ok(SectionContent {
            chart: Some(
                ChartSpec::new(
                    "repeated_patterns",
                    ChartKind::Bar,
                    &format!("Top {} most repeated fraud patterns", settings.top_patterns),
                    top,
                )
                .with_axes("Pattern", "Transactions"),
            ),
            insight: Some(insight),
            ..Default::default()
        })
    }
}
