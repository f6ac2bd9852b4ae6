//! Chart Plotter Module
//! Draws the dashboard views with egui_plot. Only renders; all numbers come
//! precomputed from the stats module.

use crate::stats::{
    AgeHistogram, CorrelationMatrix, NationalityComposition, RoleDistribution, TeamCount,
    TopNationalities, WeightHeightView,
};
use egui::{Color32, RichText};
use egui_plot::{
    Bar, BarChart, BoxElem, BoxPlot, BoxSpread, Legend, Line, Plot, PlotPoints, PlotUi, Points,
};
use std::collections::BTreeMap;

pub const CHART_HEIGHT: f32 = 280.0;

pub const PRIMARY_COLOR: Color32 = Color32::from_rgb(52, 152, 219); // Blue
pub const SECONDARY_COLOR: Color32 = Color32::from_rgb(231, 76, 60); // Red

pub const PALETTE: [Color32; 10] = [
    Color32::from_rgb(52, 152, 219),  // Blue
    Color32::from_rgb(231, 76, 60),   // Red
    Color32::from_rgb(46, 204, 113),  // Green
    Color32::from_rgb(155, 89, 182),  // Purple
    Color32::from_rgb(243, 156, 18),  // Orange
    Color32::from_rgb(26, 188, 156),  // Teal
    Color32::from_rgb(233, 30, 99),   // Pink
    Color32::from_rgb(0, 188, 212),   // Cyan
    Color32::from_rgb(121, 85, 72),   // Brown
    Color32::from_rgb(96, 125, 139),  // Blue Grey
];

/// Creates the dashboard charts using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    pub fn palette_color(index: usize) -> Color32 {
        PALETTE[index % PALETTE.len()]
    }

    /// Plot with category labels on integer x positions.
    fn category_plot(
        ui: &mut egui::Ui,
        id: &str,
        labels: Vec<String>,
        y_label: &str,
        with_legend: bool,
        add_contents: impl FnOnce(&mut PlotUi),
    ) {
        let mut plot = Plot::new(id)
            .height(CHART_HEIGHT)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .y_axis_label(y_label)
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round();
                if (mark.value - idx).abs() > 1e-6 || idx < 0.0 {
                    return String::new();
                }
                labels.get(idx as usize).cloned().unwrap_or_default()
            });
        if with_legend {
            plot = plot.legend(Legend::default());
        }
        plot.show(ui, add_contents);
    }

    /// Chart 1: players per team, largest first.
    pub fn draw_team_counts(ui: &mut egui::Ui, teams: &[TeamCount]) {
        let labels = teams.iter().map(|t| t.team.clone()).collect();
        let bars = teams
            .iter()
            .enumerate()
            .map(|(i, t)| {
                Bar::new(i as f64, t.count as f64)
                    .width(0.7)
                    .name(&t.team)
            })
            .collect();

        Self::category_plot(ui, "team_counts", labels, "Players", false, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(PRIMARY_COLOR).name("Players"));
        });
    }

    /// Chart 2: age histogram with the density curve on top.
    pub fn draw_age_histogram(ui: &mut egui::Ui, histogram: &AgeHistogram) {
        let bars = histogram
            .bins
            .iter()
            .map(|bin| {
                Bar::new((bin.start + bin.end) / 2.0, bin.count as f64)
                    .width(histogram.bin_width)
                    .name(format!("{:.1}–{:.1}", bin.start, bin.end))
            })
            .collect();

        Plot::new("age_histogram")
            .height(CHART_HEIGHT)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .x_axis_label("Age")
            .y_axis_label("Frequency")
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(
                    BarChart::new(bars)
                        .color(PRIMARY_COLOR.gamma_multiply(0.8))
                        .name("Players"),
                );
                if !histogram.density.is_empty() {
                    plot_ui.line(
                        Line::new(PlotPoints::new(histogram.density.clone()))
                            .color(SECONDARY_COLOR)
                            .width(2.0)
                            .name("Density"),
                    );
                }
            });
    }

    /// Charts 3 and 6: one box per role.
    pub fn draw_role_boxes(ui: &mut egui::Ui, distribution: &RoleDistribution, y_label: &str) {
        let labels = distribution.groups.iter().map(|g| g.role.clone()).collect();

        let id = format!("boxes_{}", distribution.column);
        Self::category_plot(ui, &id, labels, y_label, false, |plot_ui| {
            for (i, group) in distribution.groups.iter().enumerate() {
                let color = Self::palette_color(i);
                let stats = &group.stats;
                let elem = BoxElem::new(
                    i as f64,
                    BoxSpread::new(
                        stats.whisker_low,
                        stats.q1,
                        stats.median,
                        stats.q3,
                        stats.whisker_high,
                    ),
                )
                .box_width(0.5)
                .fill(color.gamma_multiply(0.3))
                .stroke(egui::Stroke::new(1.5, color));
                plot_ui.box_plot(BoxPlot::new(vec![elem]).name(&group.role));

                if !stats.outliers.is_empty() {
                    let outliers: PlotPoints =
                        stats.outliers.iter().map(|&v| [i as f64, v]).collect();
                    plot_ui.points(Points::new(outliers).radius(2.5).color(color));
                }
            }
        });
    }

    /// Chart 4: weight vs height, colored by role, sized by age.
    pub fn draw_weight_height(ui: &mut egui::Ui, view: &WeightHeightView) {
        let roles: BTreeMap<&str, usize> = view
            .points
            .iter()
            .map(|p| p.role.as_str())
            .collect::<std::collections::BTreeSet<_>>()
            .into_iter()
            .enumerate()
            .map(|(i, role)| (role, i))
            .collect();

        Plot::new("weight_height")
            .height(CHART_HEIGHT)
            .allow_scroll(false)
            .x_axis_label("Weight (kg)")
            .y_axis_label("Height (cm)")
            .legend(Legend::default())
            .show(ui, |plot_ui| {
                for point in &view.points {
                    let role_idx = roles.get(point.role.as_str()).copied().unwrap_or(0);
                    let color = Self::palette_color(role_idx);
                    // Marker size is an area; egui_plot wants a radius.
                    let radius = point.size.sqrt() as f32 / 2.0;
                    plot_ui.points(
                        Points::new(PlotPoints::new(vec![[point.weight, point.height]]))
                            .radius(radius)
                            .color(color.gamma_multiply(0.7))
                            .name(&point.role),
                    );
                }
            });

        ui.label(
            RichText::new(format!(
                "Marker size: age {:.0} – {:.0}",
                view.min_age, view.max_age
            ))
            .size(11.0)
            .color(Color32::GRAY),
        );
    }

    /// Chart 5: domestic and foreign players stacked per team.
    pub fn draw_nationality(ui: &mut egui::Ui, composition: &NationalityComposition) {
        let labels = composition
            .teams
            .iter()
            .map(|t| format!("{} ({})", t.team, t.total()))
            .collect();
        let domestic = BarChart::new(
            composition
                .teams
                .iter()
                .enumerate()
                .map(|(i, t)| Bar::new(i as f64, t.domestic as f64).width(0.7))
                .collect(),
        )
        .color(PRIMARY_COLOR)
        .name("Domestic");
        let foreign = BarChart::new(
            composition
                .teams
                .iter()
                .enumerate()
                .map(|(i, t)| Bar::new(i as f64, t.foreign as f64).width(0.7))
                .collect(),
        )
        .color(SECONDARY_COLOR)
        .name("Foreign")
        .stack_on(&[&domestic]);

        Self::category_plot(ui, "nationality", labels, "Players", true, |plot_ui| {
            plot_ui.bar_chart(domestic);
            plot_ui.bar_chart(foreign);
        });
    }

    /// Chart 7: share of the top countries plus the rest.
    pub fn draw_top_nationalities(ui: &mut egui::Ui, top: &TopNationalities) {
        let labels = top
            .buckets
            .iter()
            .map(|b| format!("{} ({:.1}%)", b.country, b.proportion * 100.0))
            .collect();
        let bars = top
            .buckets
            .iter()
            .enumerate()
            .map(|(i, b)| {
                Bar::new(i as f64, b.proportion * 100.0)
                    .width(0.7)
                    .fill(Self::palette_color(i))
                    .name(&b.country)
            })
            .collect();

        Self::category_plot(ui, "top_nationalities", labels, "% of players", false, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("Share"));
        });
    }

    /// Chart 8: annotated correlation heatmap.
    pub fn draw_correlation(ui: &mut egui::Ui, matrix: &CorrelationMatrix) {
        let cell = egui::vec2(72.0, 32.0);

        egui::Grid::new("correlation_heatmap")
            .spacing([2.0, 2.0])
            .show(ui, |ui| {
                ui.label("");
                for name in &matrix.variables {
                    ui.label(RichText::new(name).size(11.0).strong());
                }
                ui.end_row();

                for (i, row_name) in matrix.variables.iter().enumerate() {
                    ui.label(RichText::new(row_name).size(11.0).strong());
                    for j in 0..matrix.variables.len() {
                        let value = matrix.get(i, j);
                        let (rect, _) = ui.allocate_exact_size(cell, egui::Sense::hover());
                        ui.painter()
                            .rect_filled(rect, 2.0, Self::correlation_color(value));
                        let text = value.map_or("—".to_string(), |v| format!("{:.2}", v));
                        ui.painter().text(
                            rect.center(),
                            egui::Align2::CENTER_CENTER,
                            text,
                            egui::FontId::proportional(13.0),
                            Color32::BLACK,
                        );
                    }
                    ui.end_row();
                }
            });

        ui.label(
            RichText::new(format!("{} complete rows", matrix.rows_used))
                .size(11.0)
                .color(Color32::GRAY),
        );
    }

    /// Diverging blue–white–red scale over [-1, 1]; grey for undefined.
    pub fn correlation_color(value: Option<f64>) -> Color32 {
        let Some(v) = value else {
            return Color32::from_gray(180);
        };
        let t = v.clamp(-1.0, 1.0);
        let target = if t >= 0.0 { SECONDARY_COLOR } else { PRIMARY_COLOR };
        let w = t.abs() as f32;
        let mix = |c: u8| (255.0 + (c as f32 - 255.0) * w).round() as u8;
        Color32::from_rgb(mix(target.r()), mix(target.g()), mix(target.b()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correlation_color_ends() {
        assert_eq!(ChartPlotter::correlation_color(Some(0.0)), Color32::WHITE);
        assert_eq!(ChartPlotter::correlation_color(Some(1.0)), SECONDARY_COLOR);
        assert_eq!(ChartPlotter::correlation_color(Some(-1.0)), PRIMARY_COLOR);
        assert_eq!(ChartPlotter::correlation_color(None), Color32::from_gray(180));
    }

    #[test]
    fn palette_wraps() {
        assert_eq!(ChartPlotter::palette_color(0), ChartPlotter::palette_color(PALETTE.len()));
    }
}
