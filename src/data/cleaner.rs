//! Data Cleaner Module
//! Numeric coercion, role normalization and row filtering over the raw table.

use crate::config::PipelineConfig;
use crate::data::model::{frame_has_column, HEIGHT, NUMERIC_COLUMNS, ROLE};
use polars::prelude::*;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// Handles data cleaning operations. Never mutates the raw table.
pub struct DataCleaner;

impl DataCleaner {
    /// Run the full cleaning pass.
    ///
    /// Missing columns are skipped: a table without `roljugador` simply
    /// gets no role filter, one without `alturajugador` no height filter.
    pub fn clean(raw: &DataFrame, config: &PipelineConfig) -> Result<DataFrame, PipelineError> {
        let mut df = Self::coerce_numeric_columns(raw, &NUMERIC_COLUMNS)?;

        if frame_has_column(&df, ROLE) {
            df = Self::filter_excluded_role(&df, &config.excluded_role)?;
        }
        if frame_has_column(&df, HEIGHT) {
            df = Self::filter_min_height(&df, config.min_height_cm)?;
        }

        log::debug!("Cleaned table: {} of {} rows kept", df.height(), raw.height());
        Ok(df)
    }

    /// Convert each present column in `columns` to Float64.
    /// Cells that do not parse as a finite number become null.
    pub fn coerce_numeric_columns(
        df: &DataFrame,
        columns: &[&str],
    ) -> Result<DataFrame, PipelineError> {
        let mut out = df.clone();
        for name in columns {
            if !frame_has_column(&out, name) {
                log::debug!("Numeric column '{}' not present, skipping", name);
                continue;
            }
            let coerced = Self::coerce_numeric(out.column(name)?)?;
            out.with_column(coerced)?;
        }
        Ok(out)
    }

    fn coerce_numeric(column: &Column) -> Result<Series, PipelineError> {
        let values: Float64Chunked = match column.dtype() {
            DataType::String => column
                .as_materialized_series()
                .str()?
                .into_iter()
                .map(|v| v.and_then(parse_number))
                .collect(),
            _ => column
                .cast(&DataType::Float64)?
                .f64()?
                .into_iter()
                .map(|v| v.filter(|x| x.is_finite()))
                .collect(),
        };
        Ok(values.with_name(column.name().clone()).into_series())
    }

    /// Trim the role column and drop rows whose role matches `excluded`
    /// case-insensitively. Rows with no role are kept.
    pub fn filter_excluded_role(df: &DataFrame, excluded: &str) -> Result<DataFrame, PipelineError> {
        let roles = df.column(ROLE)?.cast(&DataType::String)?;
        let trimmed: StringChunked = roles
            .as_materialized_series()
            .str()?
            .into_iter()
            .map(|v| v.map(str::trim))
            .collect();
        let trimmed = trimmed.with_name(ROLE.into());

        let keep: BooleanChunked = trimmed
            .into_iter()
            .map(|v| Some(!v.is_some_and(|role| role.eq_ignore_ascii_case(excluded))))
            .collect();

        let mut out = df.clone();
        out.with_column(trimmed.into_series())?;
        let out = out.filter(&keep)?;

        log::debug!(
            "Role filter removed {} '{}' rows",
            df.height() - out.height(),
            excluded
        );
        Ok(out)
    }

    /// Drop rows whose height is null or below `min_height_cm`.
    /// Expects the height column to be numeric already.
    pub fn filter_min_height(df: &DataFrame, min_height_cm: f64) -> Result<DataFrame, PipelineError> {
        let heights = df.column(HEIGHT)?.cast(&DataType::Float64)?;
        let keep: BooleanChunked = heights
            .f64()?
            .into_iter()
            .map(|v| Some(v.is_some_and(|h| h >= min_height_cm)))
            .collect();

        let out = df.filter(&keep)?;
        log::debug!(
            "Height filter removed {} rows below {} cm",
            df.height() - out.height(),
            min_height_cm
        );
        Ok(out)
    }
}

/// Lenient number parsing: surrounding whitespace is ignored, anything
/// else that is not a finite float is treated as absent.
fn parse_number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{AGE, WEIGHT};

    fn heights(df: &DataFrame) -> Vec<Option<f64>> {
        df.column(HEIGHT).unwrap().f64().unwrap().into_iter().collect()
    }

    #[test]
    fn unparsable_numbers_become_null() {
        let raw = df!(AGE => [Some("25"), Some(" 31 "), Some("abc"), None]).unwrap();
        let df = DataCleaner::coerce_numeric_columns(&raw, &[AGE]).unwrap();

        let ages: Vec<Option<f64>> = df.column(AGE).unwrap().f64().unwrap().into_iter().collect();
        assert_eq!(ages, vec![Some(25.0), Some(31.0), None, None]);
    }

    #[test]
    fn integer_columns_are_widened() {
        let raw = df!(AGE => [20i64, 30]).unwrap();
        let df = DataCleaner::coerce_numeric_columns(&raw, &[AGE, WEIGHT]).unwrap();
        assert_eq!(df.column(AGE).unwrap().dtype(), &DataType::Float64);
        assert!(!frame_has_column(&df, WEIGHT));
    }

    #[test]
    fn coach_and_short_rows_are_dropped() {
        let raw = df!(
            ROLE => ["DT", "Defensa", "Defensa"],
            HEIGHT => ["180", "70", "182"],
            WEIGHT => [None, None, Some("80")]
        )
        .unwrap();

        let df = DataCleaner::clean(&raw, &PipelineConfig::default()).unwrap();

        assert_eq!(df.height(), 1);
        assert_eq!(heights(&df), vec![Some(182.0)]);
    }

    #[test]
    fn role_is_trimmed_and_matched_case_insensitively() {
        let raw = df!(ROLE => [" dt ", "Dt", " Delantero ", "DTX"]).unwrap();
        let df = DataCleaner::clean(&raw, &PipelineConfig::default()).unwrap();

        let roles: Vec<Option<&str>> = df
            .column(ROLE)
            .unwrap()
            .as_materialized_series()
            .str()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(roles, vec![Some("Delantero"), Some("DTX")]);
    }

    #[test]
    fn missing_height_drops_the_row() {
        let raw = df!(HEIGHT => [Some("185"), None, Some("n/a"), Some("80")]).unwrap();
        let df = DataCleaner::clean(&raw, &PipelineConfig::default()).unwrap();
        assert_eq!(heights(&df), vec![Some(185.0), Some(80.0)]);
    }

    #[test]
    fn filters_are_noops_without_their_columns() {
        let raw = df!(AGE => ["22", "35"]).unwrap();
        let df = DataCleaner::clean(&raw, &PipelineConfig::default()).unwrap();
        assert_eq!(df.height(), 2);
    }

    #[test]
    fn filters_commute() {
        let raw = df!(
            ROLE => ["DT", "Portero", "Defensa", "dt"],
            HEIGHT => [190.0, 60.0, 181.0, 50.0]
        )
        .unwrap();

        let role_first = DataCleaner::filter_excluded_role(&raw, "DT").unwrap();
        let role_first = DataCleaner::filter_min_height(&role_first, 80.0).unwrap();
        let height_first = DataCleaner::filter_min_height(&raw, 80.0).unwrap();
        let height_first = DataCleaner::filter_excluded_role(&height_first, "DT").unwrap();

        assert!(role_first.equals(&height_first));
        assert_eq!(role_first.height(), 1);
    }

    #[test]
    fn raw_table_is_left_untouched() {
        let raw = df!(ROLE => [" DT", "Defensa "], HEIGHT => ["180", "181"]).unwrap();
        let _ = DataCleaner::clean(&raw, &PipelineConfig::default()).unwrap();

        assert_eq!(raw.height(), 2);
        assert_eq!(raw.column(HEIGHT).unwrap().dtype(), &DataType::String);
    }

    #[test]
    fn threshold_comes_from_config() {
        let raw = df!(HEIGHT => ["150", "170"]).unwrap();
        let config = PipelineConfig {
            min_height_cm: 160.0,
            ..PipelineConfig::default()
        };
        let df = DataCleaner::clean(&raw, &config).unwrap();
        assert_eq!(heights(&df), vec![Some(170.0)]);
    }
}
