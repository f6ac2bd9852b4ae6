//! Chart Viewer Widget
//! Two-column grid of chart cards. A card shows its chart, or the reason the
//! view could not be computed.

use crate::charts::ChartPlotter;
use crate::stats::{Dashboard, ViewOutcome};
use egui::{Color32, RichText};

const CHART_SPACING: f32 = 15.0;
const ERROR_COLOR: Color32 = Color32::from_rgb(220, 53, 69);

pub struct ChartViewer;

impl ChartViewer {
    pub fn show(ui: &mut egui::Ui, dashboard: &Dashboard) {
        ui.columns(2, |cols| {
            Self::draw_card(&mut cols[0], "1. Players per team", &dashboard.team_counts, |ui, teams| {
                ChartPlotter::draw_team_counts(ui, teams)
            });
            Self::draw_card(
                &mut cols[1],
                "2. Age distribution (histogram + density)",
                &dashboard.age_histogram,
                ChartPlotter::draw_age_histogram,
            );
        });
        ui.add_space(CHART_SPACING);

        ui.columns(2, |cols| {
            Self::draw_card(&mut cols[0], "3. Height by role", &dashboard.height_by_role, |ui, d| {
                ChartPlotter::draw_role_boxes(ui, d, "Height (cm)")
            });
            Self::draw_card(
                &mut cols[1],
                "4. Weight vs height (color = role, size = age)",
                &dashboard.weight_height,
                ChartPlotter::draw_weight_height,
            );
        });
        ui.add_space(CHART_SPACING);

        ui.columns(2, |cols| {
            Self::draw_card(
                &mut cols[0],
                "5. Squads: domestic vs foreign",
                &dashboard.nationality,
                ChartPlotter::draw_nationality,
            );
            Self::draw_card(&mut cols[1], "6. BMI by role", &dashboard.bmi_by_role, |ui, d| {
                ChartPlotter::draw_role_boxes(ui, d, "BMI")
            });
        });
        ui.add_space(CHART_SPACING);

        ui.columns(2, |cols| {
            Self::draw_card(
                &mut cols[0],
                "7. Top 5 nationalities",
                &dashboard.top_nationalities,
                ChartPlotter::draw_top_nationalities,
            );
            Self::draw_card(
                &mut cols[1],
                "8. Correlation matrix",
                &dashboard.correlation,
                ChartPlotter::draw_correlation,
            );
        });
    }

    fn draw_card<T>(
        ui: &mut egui::Ui,
        title: &str,
        outcome: &ViewOutcome<T>,
        draw: impl FnOnce(&mut egui::Ui, &T),
    ) {
        egui::Frame::none()
            .rounding(8.0)
            .stroke(egui::Stroke::new(1.0, ui.visuals().widgets.noninteractive.bg_stroke.color))
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(RichText::new(title).size(16.0).strong());
                ui.add_space(8.0);

                match outcome {
                    ViewOutcome::Ready(value) => draw(ui, value),
                    _ => {
                        let reason = outcome.unavailable_reason().unwrap_or_default();
                        ui.label(RichText::new(format!("⚠ {}", reason)).color(ERROR_COLOR));
                    }
                }
            });
    }
}
