//! LigaPro Dashboard Main Application
//! KPI row on top, chart grid below. The pipeline runs outside the frame loop.

use crate::config::DashboardConfig;
use crate::data::{CachedTableSource, CsvTableSource, TableSource};
use crate::gui::{ChartViewer, KpiPanel};
use crate::stats::Dashboard;
use anyhow::Context;
use egui::{Color32, RichText, ScrollArea};

/// Main application window.
pub struct DashboardApp {
    config: DashboardConfig,
    source: CachedTableSource<CsvTableSource>,
    dashboard: Dashboard,
    status: String,
}

impl DashboardApp {
    pub fn new(
        config: DashboardConfig,
        source: CachedTableSource<CsvTableSource>,
        dashboard: Dashboard,
    ) -> Self {
        let status = Self::summary(&dashboard);
        Self {
            config,
            source,
            dashboard,
            status,
        }
    }

    fn summary(dashboard: &Dashboard) -> String {
        format!(
            "{} of {} players kept, {}/8 charts available",
            dashboard.rows_kept,
            dashboard.rows_loaded,
            dashboard.ready_views()
        )
    }

    /// Drop the cached table and rebuild every view from a fresh read.
    /// A failed reload keeps the previous dashboard on screen.
    fn handle_reload(&mut self) {
        self.source.invalidate();
        match self.rebuild() {
            Ok(dashboard) => {
                self.status = Self::summary(&dashboard);
                self.dashboard = dashboard;
            }
            Err(e) => {
                log::error!("Reload failed: {e:#}");
                self.status = format!("Error: {e:#}");
            }
        }
    }

    fn rebuild(&self) -> anyhow::Result<Dashboard> {
        if !self.source.is_cached() {
            log::info!("Re-reading {}", self.config.source.path.display());
        }
        let raw = self.source.load().context("reading player table")?;
        Dashboard::build(&raw, &self.config.pipeline).context("building dashboard")
    }

    fn handle_copy_json(&mut self, ctx: &egui::Context) {
        match self.dashboard.to_json() {
            Ok(json) => {
                ctx.copy_text(json);
                self.status = "Dashboard JSON copied to clipboard".to_string();
            }
            Err(e) => {
                self.status = format!("Error: {}", e);
            }
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.label(
                    RichText::new("📊 LigaPro Ecuador 2020 – Player Dashboard")
                        .size(22.0)
                        .color(Color32::from_rgb(100, 149, 237)),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("📋 Copy JSON").clicked() {
                        self.handle_copy_json(ctx);
                    }
                    if ui.button("🔄 Reload").clicked() {
                        self.handle_reload();
                    }
                });
            });
            ui.label(
                RichText::new(format!(
                    "{} • {}",
                    self.config.source.path.display(),
                    self.status
                ))
                .size(11.0)
                .color(Color32::GRAY),
            );
            ui.add_space(6.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
                ui.label(RichText::new("🧭 Indicators").size(16.0).strong());
                ui.add_space(5.0);
                KpiPanel::show(ui, &self.dashboard.age_summary, &self.dashboard.role_bmi);
                ui.add_space(10.0);
                ui.separator();
                ui.add_space(10.0);
                ChartViewer::show(ui, &self.dashboard);
            });
        });
    }
}
