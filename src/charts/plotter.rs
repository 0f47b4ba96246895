//! Chart Plotter Module
//! Draws report charts: bar, horizontal bar and line with egui_plot, pie with the egui painter.

use crate::data::format_number;
use crate::stats::{RankedEntry, NO_DATA};
use egui::{Align2, Color32, FontId, RichText, Sense, Shape, Stroke};
use egui_plot::{Bar, BarChart, Line, Plot, PlotPoints, Points};
use std::f64::consts::{FRAC_PI_2, TAU};

/// Default series color
pub const PRIMARY_COLOR: Color32 = Color32::from_rgb(52, 152, 219); // Blue
/// Series color for fraud-only charts
pub const FRAUD_COLOR: Color32 = Color32::from_rgb(244, 67, 54); // Red

pub const PALETTE: [Color32; 10] = [
    Color32::from_rgb(52, 152, 219), // Blue
    Color32::from_rgb(231, 76, 60),  // Red
    Color32::from_rgb(46, 204, 113), // Green
    Color32::from_rgb(155, 89, 182), // Purple
    Color32::from_rgb(243, 156, 18), // Orange
    Color32::from_rgb(26, 188, 156), // Teal
    Color32::from_rgb(233, 30, 99),  // Pink
    Color32::from_rgb(0, 188, 212),  // Cyan
    Color32::from_rgb(121, 85, 72),  // Brown
    Color32::from_rgb(96, 125, 139), // Blue Grey
];

const PLOT_HEIGHT: f32 = 300.0;
const PIE_SIZE: f32 = 320.0;
/// Widest arc a single pie wedge polygon may span, so every polygon stays convex.
const MAX_WEDGE_SWEEP: f64 = 0.25;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Bar,
    HorizontalBar,
    Line,
    Pie,
}

/// Everything needed to draw one chart; built by the report pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub id: String,
    pub kind: ChartKind,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub color: Color32,
    pub points: Vec<RankedEntry>,
}

impl ChartSpec {
    pub fn new(id: &str, kind: ChartKind, title: &str, points: Vec<RankedEntry>) -> Self {
        Self {
            id: id.to_string(),
            kind,
            title: title.to_string(),
            x_label: String::new(),
            y_label: String::new(),
            color: PRIMARY_COLOR,
            points,
        }
    }

    pub fn with_axes(mut self, x_label: &str, y_label: &str) -> Self {
        self.x_label = x_label.to_string();
        self.y_label = y_label.to_string();
        self
    }

    pub fn with_color(mut self, color: Color32) -> Self {
        self.color = color;
        self
    }

    pub fn labels(&self) -> Vec<String> {
        self.points.iter().map(|p| p.label.clone()).collect()
    }

    /// Pie slice percentages in point order; empty when nothing positive to share.
    pub fn shares(&self) -> Vec<f64> {
        let total: f64 = self.points.iter().map(|p| p.value.max(0.0)).sum();
        if total <= 0.0 {
            return Vec::new();
        }
        self.points
            .iter()
            .map(|p| p.value.max(0.0) / total * 100.0)
            .collect()
    }
}

/// Map an axis grid mark back to a category label; only whole positions get text.
fn category_label(labels: &[String], value: f64) -> String {
    let rounded = value.round();
    if (value - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    labels.get(rounded as usize).cloned().unwrap_or_default()
}

pub struct ChartPlotter;

impl ChartPlotter {
    pub fn draw(ui: &mut egui::Ui, spec: &ChartSpec) {
        ui.label(RichText::new(&spec.title).size(14.0).strong());
        ui.add_space(4.0);

        if spec.points.is_empty() {
            ui.label(RichText::new(NO_DATA).color(Color32::GRAY));
            return;
        }

        match spec.kind {
            ChartKind::Bar => Self::draw_bar_chart(ui, spec, false),
            ChartKind::HorizontalBar => Self::draw_bar_chart(ui, spec, true),
            ChartKind::Line => Self::draw_line_chart(ui, spec),
            ChartKind::Pie => Self::draw_pie_chart(ui, spec),
        }
    }

    /// Categories are laid out at positions 0..n; the axis formatter puts their labels back.
    fn draw_bar_chart(ui: &mut egui::Ui, spec: &ChartSpec, horizontal: bool) {
        let labels = spec.labels();
        let bars: Vec<Bar> = spec
            .points
            .iter()
            .enumerate()
            .map(|(i, p)| {
                Bar::new(i as f64, p.value)
                    .name(&p.label)
                    .fill(spec.color)
                    .width(0.6)
            })
            .collect();

        let mut chart = BarChart::new(bars).color(spec.color).name(&spec.y_label);
        if horizontal {
            chart = chart.horizontal();
        }

        let mut plot = Plot::new(format!("bar_{}", spec.id))
            .height(PLOT_HEIGHT)
            .allow_scroll(false)
            .x_axis_label(spec.x_label.clone())
            .y_axis_label(spec.y_label.clone());

        plot = if horizontal {
            plot.include_x(0.0)
                .y_axis_formatter(move |mark, _range| category_label(&labels, mark.value))
        } else {
            plot.include_y(0.0)
                .x_axis_formatter(move |mark, _range| category_label(&labels, mark.value))
        };

        plot.show(ui, |plot_ui| {
            plot_ui.bar_chart(chart);
        });
    }

    /// Labels that parse as numbers (steps) are used as x values; others fall back to position.
    fn draw_line_chart(ui: &mut egui::Ui, spec: &ChartSpec) {
        let points_vec: Vec<[f64; 2]> = spec
            .points
            .iter()
            .enumerate()
            .map(|(i, p)| [p.label.parse::<f64>().unwrap_or(i as f64), p.value])
            .collect();

        Plot::new(format!("line_{}", spec.id))
            .height(PLOT_HEIGHT)
            .allow_scroll(false)
            .x_axis_label(spec.x_label.clone())
            .y_axis_label(spec.y_label.clone())
            .include_y(0.0)
            .show(ui, |plot_ui| {
                plot_ui.line(
                    Line::new(PlotPoints::from_iter(points_vec.iter().copied()))
                        .color(spec.color)
                        .width(1.5)
                        .name(&spec.y_label),
                );
                plot_ui.points(
                    Points::new(PlotPoints::from_iter(points_vec.iter().copied()))
                        .radius(3.0)
                        .color(spec.color),
                );
            });
    }

    fn draw_pie_chart(ui: &mut egui::Ui, spec: &ChartSpec) {
        let shares = spec.shares();
        if shares.is_empty() {
            ui.label(RichText::new(NO_DATA).color(Color32::GRAY));
            return;
        }

        let (rect, _) = ui.allocate_exact_size(egui::vec2(PIE_SIZE, PIE_SIZE), Sense::hover());
        let painter = ui.painter_at(rect);
        let center = rect.center();
        let radius = f64::from(PIE_SIZE) * 0.4;
        let text_color = ui.visuals().strong_text_color();

        let point_at = |angle: f64, r: f64| {
            egui::pos2(
                center.x + (r * angle.cos()) as f32,
                center.y - (r * angle.sin()) as f32,
            )
        };

        // Start at 12 o'clock and go counter-clockwise.
        let mut start = FRAC_PI_2;
        for (i, share) in shares.iter().enumerate() {
            let sweep = share / 100.0 * TAU;
            let color = PALETTE[i % PALETTE.len()];

            let pieces = (sweep / MAX_WEDGE_SWEEP).ceil().max(1.0) as usize;
            let step = sweep / pieces as f64;
            for piece in 0..pieces {
                let a0 = start + step * piece as f64;
                let a1 = a0 + step;
                let wedge = vec![center, point_at(a0, radius), point_at(a1, radius)];
                painter.add(Shape::convex_polygon(wedge, color, Stroke::new(0.5, color)));
            }

            if sweep > 0.0 {
                let mid = start + sweep / 2.0;
                painter.text(
                    point_at(mid, radius * 0.6),
                    Align2::CENTER_CENTER,
                    format!("{:.2}%", share),
                    FontId::proportional(12.0),
                    Color32::WHITE,
                );
                painter.text(
                    point_at(mid, radius * 1.15),
                    Align2::CENTER_CENTER,
                    &spec.points[i].label,
                    FontId::proportional(12.0),
                    text_color,
                );
            }
            start += sweep;
        }

        // Legend
        ui.horizontal_wrapped(|ui| {
            for (i, point) in spec.points.iter().enumerate() {
                let (swatch, _) = ui.allocate_exact_size(egui::vec2(14.0, 14.0), Sense::hover());
                ui.painter()
                    .rect_filled(swatch, 3.0, PALETTE[i % PALETTE.len()]);
                ui.label(
                    RichText::new(format!("{} ({})", point.label, format_number(point.value)))
                        .size(12.0),
                );
                ui.add_space(12.0);
            }
        });
    }
}
