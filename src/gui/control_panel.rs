//! Control Panel Widget
//! Left side panel with the report menu and data source controls.

use crate::config::IngressMode;
use crate::dashboard::{DashboardView, SourceSet};
use crate::data::ReportKind;
use egui::{Color32, RichText};
use std::path::PathBuf;

/// Left side control panel with menu selection and file controls.
pub struct ControlPanel {
    pub selected_view: DashboardView,
    pub mode: IngressMode,
    pub data_dir: PathBuf,
    pub status: String,
}

impl ControlPanel {
    pub fn new(mode: IngressMode, data_dir: PathBuf) -> Self {
        Self {
            selected_view: DashboardView::default(),
            mode,
            data_dir,
            status: "Ready".to_string(),
        }
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui, sources: &SourceSet) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("📁 Fraud Analysis")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(
                RichText::new("MapReduce report viewer")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Menu Section =====
        ui.label(RichText::new("📋 Menu").size(14.0).strong());
        ui.add_space(5.0);

        for view in DashboardView::ALL {
            if ui
                .radio_value(&mut self.selected_view, view, view.menu_label())
                .changed()
            {
                action = ControlPanelAction::ViewChanged(view);
            }
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Data Source Section =====
        ui.label(RichText::new("⚙️ Data Source").size(14.0).strong());
        ui.add_space(5.0);

        ui.horizontal(|ui| {
            if ui
                .radio_value(&mut self.mode, IngressMode::Path, "Data folder")
                .changed()
            {
                action = ControlPanelAction::ModeChanged(IngressMode::Path);
            }
            if ui
                .radio_value(&mut self.mode, IngressMode::Upload, "Upload")
                .changed()
            {
                action = ControlPanelAction::ModeChanged(IngressMode::Upload);
            }
        });

        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| match self.mode {
                IngressMode::Path => {
                    ui.label(
                        RichText::new(self.data_dir.display().to_string())
                            .size(12.0)
                            .monospace(),
                    );
                }
                IngressMode::Upload => {
                    for &kind in self.selected_view.report_kinds() {
                        if let Some(picked) = Self::upload_row(ui, kind, sources) {
                            action = picked;
                        }
                    }
                }
            });

        ui.add_space(10.0);
        ui.vertical_centered(|ui| {
            let button = egui::Button::new(RichText::new("⟳ Reload").size(14.0))
                .min_size(egui::vec2(150.0, 30.0));
            if ui.add(button).clicked() {
                action = ControlPanelAction::Reload;
            }
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(5.0);

        let status_color = if self.status.starts_with("Error") {
            Color32::from_rgb(220, 53, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    fn upload_row(
        ui: &mut egui::Ui,
        kind: ReportKind,
        sources: &SourceSet,
    ) -> Option<ControlPanelAction> {
        let mut action = None;
        ui.label(RichText::new(kind.display_name()).size(12.0).strong());
        ui.horizontal(|ui| {
            let picked = sources.source_for(kind).map(|s| s.origin());
            let name_color = if picked.is_some() {
                ui.visuals().strong_text_color()
            } else {
                Color32::GRAY
            };
            ui.label(
                RichText::new(picked.as_deref().unwrap_or("No file selected"))
                    .size(12.0)
                    .color(name_color),
            );

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("📂 Browse").clicked() {
                    action = Some(ControlPanelAction::Browse(kind));
                }
                if picked.is_some() && ui.small_button("✖").clicked() {
                    action = Some(ControlPanelAction::ClearUpload(kind));
                }
            });
        });
        ui.add_space(4.0);
        action
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    ViewChanged(DashboardView),
    ModeChanged(IngressMode),
    Browse(ReportKind),
    ClearUpload(ReportKind),
    Reload,
}
