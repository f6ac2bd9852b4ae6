//! Configuration Module
//! Data source location and the domain constants used by the cleaning pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default dataset file, resolved relative to the working directory.
pub const DEFAULT_DATA_PATH: &str = "ligapro2020.csv";

/// Field separator used by the LigaPro export.
pub const DEFAULT_SEPARATOR: u8 = b';';

/// Where the raw player table comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSourceConfig {
    pub path: PathBuf,
    pub separator: u8,
}

impl Default for DataSourceConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DATA_PATH),
            separator: DEFAULT_SEPARATOR,
        }
    }
}

/// Domain constants for cleaning and aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Rows below this height (cm) are treated as data-entry errors.
    pub min_height_cm: f64,
    /// Role token for coaching staff, compared case-insensitively.
    pub excluded_role: String,
    /// Lowercase country spellings that count as domestic.
    pub domestic_synonyms: Vec<String>,
    pub histogram_bins: usize,
    /// Number of points the density curve is evaluated at.
    pub density_points: usize,
    pub top_countries: usize,
    /// Marker size range for the weight-vs-height scatter.
    pub size_range: (f64, f64),
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            min_height_cm: 80.0,
            excluded_role: "DT".to_string(),
            domestic_synonyms: ["ecuador", "ecuatoriano", "ecuatoriana", "ecu"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            histogram_bins: 15,
            density_points: 200,
            top_countries: 5,
            size_range: (30.0, 200.0),
        }
    }
}

/// Everything the dashboard needs to run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    pub source: DataSourceConfig,
    pub pipeline: PipelineConfig,
}
