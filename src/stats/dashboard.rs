//! Dashboard Assembly
//! Runs cleaning and derivation once, then every view against the same table.

use crate::config::PipelineConfig;
use crate::data::{DataCleaner, MetricDeriver, PipelineError, PlayerTable};
use crate::stats::views::*;
use crate::stats::ViewOutcome;
use polars::prelude::DataFrame;
use serde::Serialize;

/// Clean the raw table and attach derived metrics.
pub fn prepare_table(raw: &DataFrame, config: &PipelineConfig) -> Result<PlayerTable, PipelineError> {
    let cleaned = DataCleaner::clean(raw, config)?;
    let derived = MetricDeriver::attach_bmi(&cleaned)?;
    Ok(PlayerTable::from_frame(&derived)?)
}

/// All KPIs and chart datasets for one run.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub rows_loaded: usize,
    pub rows_kept: usize,
    pub age_summary: ViewOutcome<AgeSummary>,
    pub role_bmi: ViewOutcome<RoleBmiRanking>,
    pub team_counts: ViewOutcome<Vec<TeamCount>>,
    pub age_histogram: ViewOutcome<AgeHistogram>,
    pub height_by_role: ViewOutcome<RoleDistribution>,
    pub weight_height: ViewOutcome<WeightHeightView>,
    pub nationality: ViewOutcome<NationalityComposition>,
    pub bmi_by_role: ViewOutcome<RoleDistribution>,
    pub top_nationalities: ViewOutcome<TopNationalities>,
    pub correlation: ViewOutcome<CorrelationMatrix>,
}

impl Dashboard {
    /// Full run: raw table in, every view out.
    pub fn build(raw: &DataFrame, config: &PipelineConfig) -> Result<Self, PipelineError> {
        let table = prepare_table(raw, config)?;
        if table.is_empty() {
            log::warn!("No rows survived cleaning; every view will report no data");
        } else {
            log::info!("Dashboard table: {} of {} rows kept", table.len(), raw.height());
        }
        Ok(Self::from_table(&table, raw.height(), config))
    }

    pub fn from_table(table: &PlayerTable, rows_loaded: usize, config: &PipelineConfig) -> Self {
        Self {
            rows_loaded,
            rows_kept: table.len(),
            age_summary: Aggregator::age_summary(table),
            role_bmi: Aggregator::role_bmi_ranking(table),
            team_counts: Aggregator::count_by_team(table),
            age_histogram: Aggregator::age_histogram(table, config),
            height_by_role: Aggregator::role_distribution(table, RoleMetric::Height),
            weight_height: Aggregator::weight_height(table, config),
            nationality: Aggregator::nationality_composition(table, config),
            bmi_by_role: Aggregator::role_distribution(table, RoleMetric::Bmi),
            top_nationalities: Aggregator::top_nationalities(table, config),
            correlation: Aggregator::correlation_matrix(table),
        }
    }

    /// Number of views that could be computed.
    pub fn ready_views(&self) -> usize {
        [
            self.team_counts.is_ready(),
            self.age_histogram.is_ready(),
            self.height_by_role.is_ready(),
            self.weight_height.is_ready(),
            self.nationality.is_ready(),
            self.bmi_by_role.is_ready(),
            self.top_nationalities.is_ready(),
            self.correlation.is_ready(),
        ]
        .into_iter()
        .filter(|ready| *ready)
        .count()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{AGE, BMI, COUNTRY, HEIGHT, ROLE, TEAM, WEIGHT};
    use polars::prelude::*;

    fn raw_fixture() -> DataFrame {
        df!(
            "idJugador" => ["1", "2", "3", "4", "5", "6"],
            TEAM => ["Emelec", "Emelec", "Aucas", "Aucas", "LDU", "LDU"],
            ROLE => ["DT", "Defensa ", "Portero", " Volante", "Delantero", "Defensa"],
            COUNTRY => ["Ecuador", "Ecuador", "Argentina", "ecuatoriano", "Colombia", "ECU"],
            AGE => ["55", "24", "31", "n/d", "28", "24"],
            WEIGHT => ["82", "78", "88", "70", "75", "80"],
            HEIGHT => ["178", "181", "192", "172", "60", "183"]
        )
        .unwrap()
    }

    #[test]
    fn cleaned_rows_respect_role_and_height_rules() {
        let config = PipelineConfig::default();
        let table = prepare_table(&raw_fixture(), &config).unwrap();

        assert_eq!(table.len(), 4);
        for record in table.records() {
            assert!(!record
                .role
                .as_deref()
                .is_some_and(|r| r.eq_ignore_ascii_case("DT")));
            assert!(record.height.is_some_and(|h| h >= 80.0));
            let expected = record.weight.zip(record.height).map(|(w, h)| w / (h / 100.0).powi(2));
            match (record.bmi, expected) {
                (Some(bmi), Some(expected)) => assert!((bmi - expected).abs() < 1e-9),
                (bmi, expected) => assert_eq!(bmi, expected),
            }
        }
    }

    #[test]
    fn coach_and_short_player_leave_one_row() {
        let raw = df!(
            ROLE => ["DT", "Defensa", "Defensa"],
            HEIGHT => [Some("180"), Some("70"), Some("182")],
            WEIGHT => [None, None, Some("80")]
        )
        .unwrap();
        let table = prepare_table(&raw, &PipelineConfig::default()).unwrap();

        assert_eq!(table.len(), 1);
        let bmi = table.records()[0].bmi.unwrap();
        assert!((bmi - 24.15).abs() < 0.01);
    }

    #[test]
    fn full_dashboard_computes_every_view() {
        let dashboard = Dashboard::build(&raw_fixture(), &PipelineConfig::default()).unwrap();

        assert_eq!(dashboard.rows_loaded, 6);
        assert_eq!(dashboard.rows_kept, 4);
        assert_eq!(dashboard.ready_views(), 8);
        assert!(dashboard.age_summary.is_ready());
        assert!(dashboard.role_bmi.is_ready());
        assert!(dashboard.to_json().unwrap().contains("\"status\": \"ready\""));
    }

    #[test]
    fn without_weight_only_bmi_views_degrade() {
        let raw = raw_fixture().drop(WEIGHT).unwrap();
        let dashboard = Dashboard::build(&raw, &PipelineConfig::default()).unwrap();

        assert_eq!(
            dashboard.role_bmi,
            ViewOutcome::MissingColumns(vec![BMI.to_string()])
        );
        assert!(!dashboard.bmi_by_role.is_ready());
        assert!(!dashboard.correlation.is_ready());
        assert!(!dashboard.weight_height.is_ready());

        let ages = dashboard.age_summary.ready().unwrap();
        assert_eq!(ages.min, 24.0);
        assert_eq!(ages.max, 31.0);
        assert!(dashboard.age_histogram.is_ready());
        assert!(dashboard.height_by_role.is_ready());
    }

    #[test]
    fn age_column_absent_is_not_fatal() {
        let raw = raw_fixture().drop(AGE).unwrap();
        let dashboard = Dashboard::build(&raw, &PipelineConfig::default()).unwrap();

        assert_eq!(
            dashboard.age_summary,
            ViewOutcome::MissingColumns(vec![AGE.to_string()])
        );
        assert!(dashboard.team_counts.is_ready());
        assert!(dashboard.top_nationalities.is_ready());
    }
}
