//! Report Viewer Widget
//! Central scrollable panel that draws the sections of the selected view.

use crate::charts::ChartPlotter;
use crate::dashboard::{RenderedReport, Section, SectionContent, SectionOutcome, TablePreview};
use crate::data::{ReportError, ReportKind};
use egui::{Color32, RichText, ScrollArea};

const SECTION_SPACING: f32 = 15.0;
const TABLE_MAX_HEIGHT: f32 = 320.0;

const ERROR_COLOR: Color32 = Color32::from_rgb(220, 53, 69);
const INFO_COLOR: Color32 = Color32::from_rgb(23, 162, 184);
const SUCCESS_COLOR: Color32 = Color32::from_rgb(40, 167, 69);

/// Scrollable report display. Holds the last rendered report until the next interaction.
#[derive(Default)]
pub struct ReportViewer {
    pub report: Option<RenderedReport>,
}

impl ReportViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_report(&mut self, report: RenderedReport) {
        self.report = Some(report);
    }

    pub fn show(&self, ui: &mut egui::Ui) {
        let Some(report) = &self.report else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        };

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.label(RichText::new(report.view.title()).size(24.0).strong());
                if let Some(description) = report.view.description() {
                    ui.label(RichText::new(description).size(13.0).color(Color32::GRAY));
                }
                ui.add_space(SECTION_SPACING);

                for section in &report.sections {
                    Self::draw_section(ui, section);
                    ui.add_space(SECTION_SPACING);
                }
            });
    }

    fn draw_section(ui: &mut egui::Ui, section: &Section) {
        egui::Frame::none()
            .rounding(8.0)
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(
                    RichText::new(section.kind.display_name())
                        .size(18.0)
                        .strong(),
                );
                ui.add_space(8.0);

                match &section.outcome {
                    SectionOutcome::AwaitingSource => {
                        ui.label(
                            RichText::new("No file selected yet. Pick one in the sidebar.")
                                .color(INFO_COLOR),
                        );
                    }
                    SectionOutcome::Failed(error) => Self::draw_error(ui, section.kind, error),
                    SectionOutcome::Ready(content) => Self::draw_content(ui, section.kind, content),
                }
            });
    }

    fn draw_error(ui: &mut egui::Ui, kind: ReportKind, error: &ReportError) {
        match error {
            ReportError::SourceUnavailable { origin, cause } => {
                ui.label(
                    RichText::new(format!("❌ Report file not available: {}", cause))
                        .color(ERROR_COLOR)
                        .strong(),
                );
                ui.label(RichText::new(origin).monospace().size(12.0));
                ui.label(
                    RichText::new("Make sure the file is in the data folder, or upload it.")
                        .color(Color32::GRAY),
                );
            }
            other => {
                ui.label(
                    RichText::new(format!("❌ Failed to read {}: {}", kind.display_name(), other))
                        .color(ERROR_COLOR)
                        .strong(),
                );
                egui::CollapsingHeader::new("Details")
                    .id_salt(format!("error_details_{:?}", kind))
                    .show(ui, |ui| {
                        ui.label(RichText::new(format!("{:#?}", other)).monospace().size(11.0));
                    });
            }
        }
    }

    fn draw_content(ui: &mut egui::Ui, kind: ReportKind, content: &SectionContent) {
        if !content.metrics.is_empty() {
            ui.horizontal(|ui| {
                for metric in &content.metrics {
                    ui.vertical(|ui| {
                        ui.label(RichText::new(&metric.label).size(12.0).color(Color32::GRAY));
                        ui.label(RichText::new(&metric.value).size(22.0).strong());
                    });
                    ui.add_space(40.0);
                }
            });
            ui.add_space(8.0);
        }

        if let Some(loaded) = &content.loaded {
            ui.label(RichText::new(format!("✔ {}", loaded)).size(12.0).color(SUCCESS_COLOR));
            ui.add_space(4.0);
        }

        if let Some(notice) = &content.notice {
            ui.label(RichText::new(notice).size(14.0).color(INFO_COLOR));
            return;
        }

        if let Some(table) = &content.table {
            Self::draw_table(ui, kind, table);
        }
        if let Some(caption) = &content.caption {
            ui.label(RichText::new(caption).size(11.0).color(Color32::GRAY));
        }

        if let Some(chart) = &content.chart {
            ui.add_space(10.0);
            ChartPlotter::draw(ui, chart);
        }

        if let Some(insight) = &content.insight {
            ui.add_space(8.0);
            egui::Frame::none()
                .stroke(egui::Stroke::new(1.0, SUCCESS_COLOR))
                .rounding(5.0)
                .inner_margin(8.0)
                .show(ui, |ui| {
                    ui.label(RichText::new(format!("📌 {}", insight)).size(13.0));
                });
        }
    }

    fn draw_table(ui: &mut egui::Ui, kind: ReportKind, table: &TablePreview) {
        ScrollArea::both()
            .id_salt(format!("table_scroll_{:?}", kind))
            .max_height(TABLE_MAX_HEIGHT)
            .auto_shrink([false, true])
            .show(ui, |ui| {
                egui::Grid::new(ui.make_persistent_id(format!("table_{:?}", kind)))
                    .striped(true)
                    .min_col_width(60.0)
                    .spacing([12.0, 4.0])
                    .show(ui, |ui| {
                        for column in &table.columns {
                            ui.label(RichText::new(column).strong().size(12.0));
                        }
                        ui.end_row();

                        for row in &table.rows {
                            for cell in row {
                                ui.label(RichText::new(cell).size(12.0));
                            }
                            ui.end_row();
                        }
                    });
            });
    }
}
