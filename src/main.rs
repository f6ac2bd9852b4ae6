//! LigaPro Dashboard - Player Dataset Analysis & Chart Viewer
//!
//! Loads the LigaPro 2020 player export, cleans it, and shows four KPIs and
//! eight descriptive charts.

mod charts;
mod config;
mod data;
mod gui;
mod stats;

use anyhow::Context;
use config::DashboardConfig;
use data::{CachedTableSource, CsvTableSource, TableSource};
use eframe::egui;
use gui::DashboardApp;
use stats::Dashboard;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = DashboardConfig::default();
    let source = CachedTableSource::new(CsvTableSource::new(config.source.clone()));

    // A missing or unreadable dataset is fatal; per-view problems are not.
    let raw = source.load().with_context(|| {
        format!(
            "Unable to read player data from {}",
            config.source.path.display()
        )
    })?;
    let dashboard =
        Dashboard::build(&raw, &config.pipeline).context("Failed to prepare the dashboard")?;
    log::info!(
        "{} of {} rows kept, {} charts ready",
        dashboard.rows_kept,
        dashboard.rows_loaded,
        dashboard.ready_views()
    );

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([1000.0, 700.0])
            .with_title("LigaPro Dashboard"),
        ..Default::default()
    };

    eframe::run_native(
        "LigaPro Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(DashboardApp::new(config, source, dashboard)))),
    )
    .map_err(|e| anyhow::anyhow!("UI error: {e}"))
}
