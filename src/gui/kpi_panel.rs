//! KPI Row Widget
//! Four indicator cards across the top of the dashboard.

use crate::stats::{AgeSummary, RoleBmiRanking, ViewOutcome};
use egui::{Color32, RichText};

const KPI_ACCENT: Color32 = Color32::from_rgb(100, 149, 237);
const PLACEHOLDER: &str = "—";

/// Formatted text of one KPI card.
#[derive(Debug, Clone, PartialEq)]
pub struct KpiCard {
    pub title: &'static str,
    pub value: String,
    pub detail: Option<String>,
}

pub struct KpiPanel;

impl KpiPanel {
    /// k1–k4 card contents. Unavailable views show a dash and the reason.
    pub fn cards(ages: &ViewOutcome<AgeSummary>, bmi: &ViewOutcome<RoleBmiRanking>) -> [KpiCard; 4] {
        let age_card = |title: &'static str, pick: fn(&AgeSummary) -> String| KpiCard {
            title,
            value: ages.ready().map(pick).unwrap_or_else(|| PLACEHOLDER.to_string()),
            detail: ages.unavailable_reason(),
        };

        let mut mean_card = age_card("k1 • Mean age", |a| format!("{:.1} years", a.mean));
        if let Some(summary) = ages.ready() {
            mean_card.detail = Some(format!("σ {:.1} over {} players", summary.std, summary.count));
        }

        [
            mean_card,
            age_card("k2 • Minimum age", |a| format!("{:.0} years", a.min)),
            age_card("k3 • Maximum age", |a| format!("{:.0} years", a.max)),
            match bmi.ready() {
                Some(ranking) => KpiCard {
                    title: "k4 • Role with highest mean BMI",
                    value: ranking.top_role.clone(),
                    detail: Some(format!("{:.2}", ranking.top_mean)),
                },
                None => KpiCard {
                    title: "k4 • Role with highest mean BMI",
                    value: PLACEHOLDER.to_string(),
                    detail: bmi.unavailable_reason(),
                },
            },
        ]
    }

    pub fn show(ui: &mut egui::Ui, ages: &ViewOutcome<AgeSummary>, bmi: &ViewOutcome<RoleBmiRanking>) {
        let cards = Self::cards(ages, bmi);
        ui.columns(cards.len(), |columns| {
            for (column, card) in columns.iter_mut().zip(cards.iter()) {
                egui::Frame::none()
                    .fill(column.visuals().widgets.noninteractive.bg_fill)
                    .rounding(6.0)
                    .inner_margin(10.0)
                    .show(column, |ui| {
                        ui.set_width(ui.available_width());
                        ui.label(RichText::new(card.title).size(12.0).color(Color32::GRAY));
                        ui.label(RichText::new(&card.value).size(22.0).strong().color(KPI_ACCENT));
                        if let Some(detail) = &card.detail {
                            ui.label(RichText::new(detail).size(11.0));
                        }
                    });
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn age_cards_format_like_the_dashboard() {
        let ages = ViewOutcome::Ready(AgeSummary {
            count: 3,
            mean: 26.333,
            min: 19.0,
            max: 36.0,
            std: 8.5,
        });
        let cards = KpiPanel::cards(&ages, &ViewOutcome::NoData);

        assert_eq!(cards[0].value, "26.3 years");
        assert_eq!(cards[0].detail.as_deref(), Some("σ 8.5 over 3 players"));
        assert_eq!(cards[1].detail, None);
        assert_eq!(cards[1].value, "19 years");
        assert_eq!(cards[2].value, "36 years");
        assert_eq!(cards[3].value, "—");
        assert_eq!(cards[3].detail.as_deref(), Some("no data"));
    }

    #[test]
    fn missing_age_column_shows_reason() {
        let ages = ViewOutcome::MissingColumns(vec!["edadjugador".to_string()]);
        let cards = KpiPanel::cards(&ages, &ViewOutcome::NoData);
        assert_eq!(cards[0].value, "—");
        assert_eq!(
            cards[0].detail.as_deref(),
            Some("missing required columns: [edadjugador]")
        );
    }
}
