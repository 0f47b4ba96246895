//! Dashboard module - menu views and the report pipeline behind them

mod pipeline;
mod view;

pub use pipeline::{
    Metric, PipelineSettings, RenderedReport, ReportPipeline, Section, SectionContent,
    SectionOutcome, SourceSet, TablePreview,
};
pub use view::DashboardView;
