//! GUI module - User interface components

mod app;
mod chart_viewer;
mod kpi_panel;

pub use app::DashboardApp;
pub use chart_viewer::ChartViewer;
pub use kpi_panel::KpiPanel;
