//! Fraud Dashboard Main Application
//! Main window with control panel and report viewer.

use crate::config::{DashboardConfig, IngressMode};
use crate::dashboard::{DashboardView, PipelineSettings, ReportPipeline, SourceSet};
use crate::data::ReportKind;
use crate::gui::{ControlPanel, ControlPanelAction, ReportViewer};
use egui::SidePanel;
use std::fs;
use tracing::{info, warn};

/// Main application window.
pub struct DashboardApp {
    sources: SourceSet,
    settings: PipelineSettings,
    control_panel: ControlPanel,
    report_viewer: ReportViewer,
}

impl DashboardApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: DashboardConfig) -> Self {
        let mut app = Self {
            sources: SourceSet::from_config(&config),
            settings: PipelineSettings::from(&config),
            control_panel: ControlPanel::new(config.ingress, config.data_dir.clone()),
            report_viewer: ReportViewer::new(),
        };
        app.render_selected();
        app
    }

    /// Run the pipeline for the selected view. Called once per interaction, never per frame.
    fn render_selected(&mut self) {
        let view = self.control_panel.selected_view;
        let report = ReportPipeline::render(view, &self.sources, &self.settings);
        self.control_panel
            .set_status(&format!("Showing {}", view.menu_label()));
        self.report_viewer.set_report(report);
    }

    fn handle_view_changed(&mut self, view: DashboardView) {
        info!(view = view.menu_label(), "view selected");
        self.render_selected();
    }

    fn handle_mode_changed(&mut self, mode: IngressMode) {
        info!(?mode, "ingress mode changed");
        self.sources.set_mode(mode);
        self.render_selected();
    }

    /// Read the picked file into memory; the loader only ever sees its bytes.
    fn handle_browse(&mut self, kind: ReportKind) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Report files", &["txt", "csv", "tsv"])
            .add_filter("All files", &["*"])
            .pick_file()
        else {
            return; // User cancelled
        };

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        match fs::read(&path) {
            Ok(bytes) => {
                info!(report = %kind, file = %name, size = bytes.len(), "file uploaded");
                self.sources.set_upload(kind, name, bytes);
                self.render_selected();
            }
            Err(e) => {
                warn!(report = %kind, file = %name, error = %e, "upload unreadable");
                self.control_panel
                    .set_status(&format!("Error: could not read {}: {}", name, e));
            }
        }
    }

    fn handle_clear_upload(&mut self, kind: ReportKind) {
        self.sources.clear_upload(kind);
        self.render_selected();
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(280.0)
            .max_width(340.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(ui, &self.sources);

                    match action {
                        ControlPanelAction::ViewChanged(view) => self.handle_view_changed(view),
                        ControlPanelAction::ModeChanged(mode) => self.handle_mode_changed(mode),
                        ControlPanelAction::Browse(kind) => self.handle_browse(kind),
                        ControlPanelAction::ClearUpload(kind) => self.handle_clear_upload(kind),
                        ControlPanelAction::Reload => self.render_selected(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Report Viewer
        egui::CentralPanel::default().show(ctx, |ui| {
            self.report_viewer.show(ui);
        });
    }
}
