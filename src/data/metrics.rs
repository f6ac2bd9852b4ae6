//! Derived Metrics Module
//! Body-mass index from weight (kg) and height (cm).

use crate::data::cleaner::PipelineError;
use crate::data::model::{frame_has_column, BMI, HEIGHT, WEIGHT};
use polars::prelude::*;

/// BMI = weight / (height in meters)². `None` when either input is missing
/// or the height is not positive.
pub fn body_mass_index(weight_kg: Option<f64>, height_cm: Option<f64>) -> Option<f64> {
    match (weight_kg, height_cm) {
        (Some(w), Some(h)) if h > 0.0 => Some(w / (h / 100.0).powi(2)),
        _ => None,
    }
}

/// Attaches per-row derived columns.
pub struct MetricDeriver;

impl MetricDeriver {
    /// Add the `imc` column when both weight and height columns exist.
    /// Otherwise the frame is returned unchanged and BMI views report the
    /// missing inputs.
    pub fn attach_bmi(df: &DataFrame) -> Result<DataFrame, PipelineError> {
        if !frame_has_column(df, WEIGHT) || !frame_has_column(df, HEIGHT) {
            log::debug!("Skipping BMI: weight or height column missing");
            return Ok(df.clone());
        }

        let weight = df.column(WEIGHT)?.cast(&DataType::Float64)?;
        let height = df.column(HEIGHT)?.cast(&DataType::Float64)?;

        let bmi: Float64Chunked = weight
            .f64()?
            .into_iter()
            .zip(height.f64()?.into_iter())
            .map(|(w, h)| body_mass_index(w, h))
            .collect();

        let mut out = df.clone();
        out.with_column(bmi.with_name(BMI.into()).into_series())?;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::AGE;

    fn bmi_values(df: &DataFrame) -> Vec<Option<f64>> {
        df.column(BMI).unwrap().f64().unwrap().into_iter().collect()
    }

    #[test]
    fn bmi_uses_height_in_meters() {
        let bmi = body_mass_index(Some(80.0), Some(182.0)).unwrap();
        assert!((bmi - 80.0 / (1.82 * 1.82)).abs() < 1e-9);
        assert!((bmi - 24.15).abs() < 0.01);
    }

    #[test]
    fn bmi_is_absent_per_row_when_an_input_is_absent() {
        let df = df!(
            WEIGHT => [Some(80.0), None, Some(70.0)],
            HEIGHT => [Some(182.0), Some(175.0), None]
        )
        .unwrap();

        let values = bmi_values(&MetricDeriver::attach_bmi(&df).unwrap());
        assert!(values[0].is_some());
        assert_eq!(values[1], None);
        assert_eq!(values[2], None);
    }

    #[test]
    fn no_bmi_column_without_weight() {
        let df = df!(HEIGHT => [182.0], AGE => [25.0]).unwrap();
        let out = MetricDeriver::attach_bmi(&df).unwrap();
        assert!(!frame_has_column(&out, BMI));
        assert_eq!(out.width(), 2);
    }

    #[test]
    fn zero_height_has_no_bmi() {
        assert_eq!(body_mass_index(Some(70.0), Some(0.0)), None);
    }
}
