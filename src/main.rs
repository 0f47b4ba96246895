//! Fraud Dashboard - MapReduce Fraud Report Viewer
//!
//! Desktop dashboard for precomputed fraud-detection aggregates.

use anyhow::Context;
use eframe::egui;
use fraud_dashboard::config::DashboardConfig;
use fraud_dashboard::gui::DashboardApp;

fn main() -> anyhow::Result<()> {
    // Set RUST_LOG=debug for verbose logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config_path = DashboardConfig::config_path();
    let config = DashboardConfig::load_from_file(&config_path)
        .with_context(|| format!("loading configuration from {}", config_path.display()))?;
    tracing::info!(
        config = %config_path.display(),
        data_dir = %config.data_dir.display(),
        ingress = ?config.ingress,
        "starting fraud dashboard"
    );

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 850.0])
            .with_min_inner_size([1000.0, 650.0])
            .with_title("Fraud Transaction Analysis Dashboard"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Fraud Dashboard",
        options,
        Box::new(move |cc| Ok(Box::new(DashboardApp::new(cc, config)))),
    )
    .map_err(|e| anyhow::anyhow!("eframe error: {e}"))
}
