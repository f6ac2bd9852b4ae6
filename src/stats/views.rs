//! Dashboard Views Module
//! One pure aggregation per KPI or chart, each computed from the cleaned table.

use crate::config::PipelineConfig;
use crate::data::model::{AGE, BMI, COUNTRY, HEIGHT, ROLE, TEAM, WEIGHT};
use crate::data::{PlayerRecord, PlayerTable};
use crate::stats::calculator::{BoxStats, HistogramBin, StatsCalculator};
use crate::stats::ViewOutcome;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Label of the bucket that collects every country outside the top N.
pub const OTHER_BUCKET: &str = "Other";

/// KPIs k1–k3.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgeSummary {
    pub count: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    /// Sample standard deviation, 0 for a single age.
    pub std: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoleMean {
    pub role: String,
    pub mean: f64,
    pub count: usize,
}

/// KPI k4: mean BMI per role and the role where it peaks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoleBmiRanking {
    /// Sorted by role name.
    pub per_role: Vec<RoleMean>,
    pub top_role: String,
    pub top_mean: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamCount {
    pub team: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgeHistogram {
    pub count: usize,
    pub bin_width: f64,
    pub bins: Vec<HistogramBin>,
    /// Kernel density scaled to counts (density · n · bin width) so it
    /// overlays the bars.
    pub density: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoleBox {
    pub role: String,
    pub stats: BoxStats,
}

/// Per-role box statistics of one numeric column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoleDistribution {
    pub column: String,
    /// Sorted by role name.
    pub groups: Vec<RoleBox>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub weight: f64,
    pub height: f64,
    pub role: String,
    pub age: f64,
    /// Marker size derived from age, inside the configured size range.
    pub size: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightHeightView {
    pub min_age: f64,
    pub max_age: f64,
    pub points: Vec<ScatterPoint>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamNationality {
    pub team: String,
    pub domestic: usize,
    pub foreign: usize,
}

impl TeamNationality {
    pub fn total(&self) -> usize {
        self.domestic + self.foreign
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NationalityComposition {
    /// Domestic count descending, then foreign count descending.
    pub teams: Vec<TeamNationality>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryShare {
    pub country: String,
    pub count: usize,
    pub proportion: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopNationalities {
    pub total: usize,
    /// Top countries by count followed by the [`OTHER_BUCKET`].
    pub buckets: Vec<CountryShare>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub variables: Vec<String>,
    pub rows_used: usize,
    /// `None` where a variable has no spread.
    pub values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.values.get(row)?.get(col).copied().flatten()
    }
}

/// Numeric attribute shown per role as a box plot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleMetric {
    Height,
    Bmi,
}

impl RoleMetric {
    pub fn column(self) -> &'static str {
        match self {
            RoleMetric::Height => HEIGHT,
            RoleMetric::Bmi => BMI,
        }
    }

    fn value(self, record: &PlayerRecord) -> Option<f64> {
        match self {
            RoleMetric::Height => record.height,
            RoleMetric::Bmi => record.bmi,
        }
    }
}

/// Domestic when the trimmed, lowercased country is one of `synonyms`.
pub fn is_domestic(country: &str, synonyms: &[String]) -> bool {
    let normalized = country.trim().to_lowercase();
    synonyms.iter().any(|s| *s == normalized)
}

/// Computes every dashboard view.
pub struct Aggregator;

impl Aggregator {
    fn unavailable<T>(table: &PlayerTable, view: &str, required: &[&str]) -> Option<ViewOutcome<T>> {
        let missing = table.missing_columns(required);
        if missing.is_empty() {
            return None;
        }
        log::warn!("{} unavailable, missing columns: {:?}", view, missing);
        Some(ViewOutcome::MissingColumns(missing))
    }

    pub fn age_summary(table: &PlayerTable) -> ViewOutcome<AgeSummary> {
        if let Some(outcome) = Self::unavailable(table, "Age summary", &[AGE]) {
            return outcome;
        }

        let ages: Vec<f64> = table.records().iter().filter_map(|r| r.age).collect();
        StatsCalculator::compute_descriptive_stats(&ages)
            .map(|stats| AgeSummary {
                count: stats.count,
                mean: stats.mean,
                min: stats.min,
                max: stats.max,
                std: stats.std,
            })
            .into()
    }

    pub fn role_bmi_ranking(table: &PlayerTable) -> ViewOutcome<RoleBmiRanking> {
        if let Some(outcome) = Self::unavailable(table, "Role BMI ranking", &[BMI, ROLE]) {
            return outcome;
        }

        let per_role: Vec<RoleMean> = Self::group_by_role(table.records(), |r| r.bmi)
            .into_iter()
            .map(|(role, values)| RoleMean {
                role,
                mean: values.iter().sum::<f64>() / values.len() as f64,
                count: values.len(),
            })
            .collect();

        // First role wins a tie, matching the name order of `per_role`.
        let top = per_role
            .iter()
            .fold(None::<&RoleMean>, |best, rm| match best {
                Some(b) if b.mean >= rm.mean => Some(b),
                _ => Some(rm),
            })
            .map(|rm| (rm.role.clone(), rm.mean));

        match top {
            Some((top_role, top_mean)) => ViewOutcome::Ready(RoleBmiRanking {
                per_role,
                top_role,
                top_mean,
            }),
            None => ViewOutcome::NoData,
        }
    }

    pub fn count_by_team(table: &PlayerTable) -> ViewOutcome<Vec<TeamCount>> {
        if let Some(outcome) = Self::unavailable(table, "Count by team", &[TEAM]) {
            return outcome;
        }

        let mut counts: HashMap<&str, usize> = HashMap::new();
        for team in table.records().iter().filter_map(|r| r.team.as_deref()) {
            *counts.entry(team).or_default() += 1;
        }
        if counts.is_empty() {
            return ViewOutcome::NoData;
        }

        let mut teams: Vec<TeamCount> = counts
            .into_iter()
            .map(|(team, count)| TeamCount {
                team: team.to_string(),
                count,
            })
            .collect();
        teams.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.team.cmp(&b.team)));
        ViewOutcome::Ready(teams)
    }

    pub fn age_histogram(table: &PlayerTable, config: &PipelineConfig) -> ViewOutcome<AgeHistogram> {
        if let Some(outcome) = Self::unavailable(table, "Age histogram", &[AGE]) {
            return outcome;
        }

        let ages: Vec<f64> = table.records().iter().filter_map(|r| r.age).collect();
        let bins = StatsCalculator::histogram(&ages, config.histogram_bins);
        let Some(first) = bins.first() else {
            return ViewOutcome::NoData;
        };
        let bin_width = first.end - first.start;

        let scale = ages.len() as f64 * bin_width;
        let density = StatsCalculator::gaussian_kde(&ages, config.density_points)
            .into_iter()
            .map(|[x, d]| [x, d * scale])
            .collect();

        ViewOutcome::Ready(AgeHistogram {
            count: ages.len(),
            bin_width,
            bins,
            density,
        })
    }

    /// Box statistics of one metric for each role.
    pub fn role_distribution(table: &PlayerTable, metric: RoleMetric) -> ViewOutcome<RoleDistribution> {
        let column = metric.column();
        let view = format!("{} by role", column);
        if let Some(outcome) = Self::unavailable(table, &view, &[column, ROLE]) {
            return outcome;
        }

        let groups: Vec<RoleBox> = Self::group_by_role(table.records(), |r| metric.value(r))
            .into_iter()
            .filter_map(|(role, values)| {
                StatsCalculator::compute_box_stats(&values).map(|stats| RoleBox { role, stats })
            })
            .collect();

        if groups.is_empty() {
            return ViewOutcome::NoData;
        }
        ViewOutcome::Ready(RoleDistribution {
            column: column.to_string(),
            groups,
        })
    }

    pub fn weight_height(table: &PlayerTable, config: &PipelineConfig) -> ViewOutcome<WeightHeightView> {
        if let Some(outcome) =
            Self::unavailable(table, "Weight vs height", &[WEIGHT, HEIGHT, ROLE, AGE])
        {
            return outcome;
        }

        let complete: Vec<(f64, f64, &str, f64)> = table
            .records()
            .iter()
            .filter_map(|r| Some((r.weight?, r.height?, r.role.as_deref()?, r.age?)))
            .collect();

        let ages: Vec<f64> = complete.iter().map(|p| p.3).collect();
        let Some((min_age, max_age)) = StatsCalculator::min_max(&ages) else {
            return ViewOutcome::NoData;
        };

        let points = complete
            .into_iter()
            .map(|(weight, height, role, age)| ScatterPoint {
                weight,
                height,
                role: role.to_string(),
                age,
                size: StatsCalculator::rescale(age, min_age, max_age, config.size_range),
            })
            .collect();

        ViewOutcome::Ready(WeightHeightView {
            min_age,
            max_age,
            points,
        })
    }

    pub fn nationality_composition(
        table: &PlayerTable,
        config: &PipelineConfig,
    ) -> ViewOutcome<NationalityComposition> {
        if let Some(outcome) = Self::unavailable(table, "Nationality composition", &[TEAM, COUNTRY]) {
            return outcome;
        }

        let mut by_team: HashMap<&str, TeamNationality> = HashMap::new();
        for record in table.records() {
            let (Some(team), Some(country)) = (record.team.as_deref(), record.country.as_deref())
            else {
                continue;
            };
            let entry = by_team.entry(team).or_insert_with(|| TeamNationality {
                team: team.to_string(),
                domestic: 0,
                foreign: 0,
            });
            if is_domestic(country, &config.domestic_synonyms) {
                entry.domestic += 1;
            } else {
                entry.foreign += 1;
            }
        }
        if by_team.is_empty() {
            return ViewOutcome::NoData;
        }

        let mut teams: Vec<TeamNationality> = by_team.into_values().collect();
        teams.sort_by(|a, b| {
            b.domestic
                .cmp(&a.domestic)
                .then_with(|| b.foreign.cmp(&a.foreign))
                .then_with(|| a.team.cmp(&b.team))
        });
        ViewOutcome::Ready(NationalityComposition { teams })
    }

    pub fn top_nationalities(table: &PlayerTable, config: &PipelineConfig) -> ViewOutcome<TopNationalities> {
        if let Some(outcome) = Self::unavailable(table, "Top nationalities", &[COUNTRY]) {
            return outcome;
        }

        let mut counts: HashMap<&str, usize> = HashMap::new();
        for country in table.records().iter().filter_map(|r| r.country.as_deref()) {
            *counts.entry(country).or_default() += 1;
        }
        let total: usize = counts.values().sum();
        if total == 0 {
            return ViewOutcome::NoData;
        }

        let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

        let split = config.top_countries.min(ranked.len());
        let other: usize = ranked[split..].iter().map(|(_, c)| c).sum();

        let share = |country: &str, count: usize| CountryShare {
            country: country.to_string(),
            count,
            proportion: count as f64 / total as f64,
        };
        let mut buckets: Vec<CountryShare> = ranked[..split]
            .iter()
            .map(|&(country, count)| share(country, count))
            .collect();
        buckets.push(share(OTHER_BUCKET, other));

        ViewOutcome::Ready(TopNationalities { total, buckets })
    }

    pub fn correlation_matrix(table: &PlayerTable) -> ViewOutcome<CorrelationMatrix> {
        const VARIABLES: [&str; 4] = [AGE, WEIGHT, HEIGHT, BMI];
        if let Some(outcome) = Self::unavailable(table, "Correlation matrix", &VARIABLES) {
            return outcome;
        }

        let rows: Vec<[f64; 4]> = table
            .records()
            .iter()
            .filter_map(|r| Some([r.age?, r.weight?, r.height?, r.bmi?]))
            .collect();
        if rows.len() < 2 {
            return ViewOutcome::NoData;
        }

        let columns: Vec<Vec<f64>> = (0..VARIABLES.len())
            .map(|i| rows.iter().map(|row| row[i]).collect())
            .collect();

        let values = (0..VARIABLES.len())
            .map(|i| {
                (0..VARIABLES.len())
                    .map(|j| {
                        let r = StatsCalculator::pearson(&columns[i], &columns[j]);
                        if i == j {
                            r.map(|_| 1.0)
                        } else {
                            r
                        }
                    })
                    .collect()
            })
            .collect();

        ViewOutcome::Ready(CorrelationMatrix {
            variables: VARIABLES.iter().map(|v| v.to_string()).collect(),
            rows_used: rows.len(),
            values,
        })
    }

    /// Values of `value_of` grouped by role, skipping rows missing either.
    fn group_by_role(
        records: &[PlayerRecord],
        value_of: impl Fn(&PlayerRecord) -> Option<f64>,
    ) -> BTreeMap<String, Vec<f64>> {
        let mut groups: BTreeMap<String, Vec<f64>> = BTreeMap::new();
        for record in records {
            if let (Some(role), Some(value)) = (record.role.as_ref(), value_of(record)) {
                groups.entry(role.clone()).or_default().push(value);
            }
        }
        groups
    }
}
