//! Player Table Model
//! Column names of the LigaPro export and the typed row view used by the aggregators.

use polars::prelude::*;
use serde::Serialize;
use std::collections::BTreeSet;

pub const AGE: &str = "edadjugador";
pub const WEIGHT: &str = "pesojugador";
pub const HEIGHT: &str = "alturajugador";
pub const ROLE: &str = "roljugador";
pub const TEAM: &str = "nombreequipo";
pub const COUNTRY: &str = "paisjugador";
/// Derived body-mass index column.
pub const BMI: &str = "imc";

/// Columns coerced to numbers by the cleaner.
pub const NUMERIC_COLUMNS: [&str; 3] = [AGE, WEIGHT, HEIGHT];

/// One player row. Every attribute is optional: the column may be missing
/// from the file, or the cell may be empty or unparsable.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlayerRecord {
    pub team: Option<String>,
    pub role: Option<String>,
    pub country: Option<String>,
    pub age: Option<f64>,
    pub weight: Option<f64>,
    pub height: Option<f64>,
    pub bmi: Option<f64>,
}

/// Cleaned player table: its column set plus typed rows.
#[derive(Debug, Clone)]
pub struct PlayerTable {
    columns: BTreeSet<String>,
    records: Vec<PlayerRecord>,
}

impl PlayerTable {
    /// Build the typed view over a (cleaned) frame.
    pub fn from_frame(frame: &DataFrame) -> PolarsResult<Self> {
        let columns: BTreeSet<String> = frame
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        let height = frame.height();
        let team = text_values(frame, TEAM, false)?;
        let role = text_values(frame, ROLE, true)?;
        let country = text_values(frame, COUNTRY, true)?;
        let age = numeric_values(frame, AGE)?;
        let weight = numeric_values(frame, WEIGHT)?;
        let height_cm = numeric_values(frame, HEIGHT)?;
        let bmi = numeric_values(frame, BMI)?;

        let records = (0..height)
            .map(|i| PlayerRecord {
                team: cell(&team, i),
                role: cell(&role, i),
                country: cell(&country, i),
                age: cell(&age, i),
                weight: cell(&weight, i),
                height: cell(&height_cm, i),
                bmi: cell(&bmi, i),
            })
            .collect();

        Ok(Self { columns, records })
    }

    pub fn records(&self) -> &[PlayerRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains(name)
    }

    /// Required columns that this table does not carry, in the order given.
    pub fn missing_columns(&self, required: &[&str]) -> Vec<String> {
        required
            .iter()
            .filter(|name| !self.has_column(name))
            .map(|name| name.to_string())
            .collect()
    }
}

/// True when `frame` has a column called `name`.
pub fn frame_has_column(frame: &DataFrame, name: &str) -> bool {
    frame
        .get_column_names()
        .iter()
        .any(|c| c.as_str() == name)
}

fn cell<T: Clone>(values: &Option<Vec<Option<T>>>, i: usize) -> Option<T> {
    values.as_ref().and_then(|v| v.get(i).cloned().flatten())
}

fn numeric_values(frame: &DataFrame, name: &str) -> PolarsResult<Option<Vec<Option<f64>>>> {
    if !frame_has_column(frame, name) {
        return Ok(None);
    }
    let column = frame.column(name)?.cast(&DataType::Float64)?;
    let values = column
        .f64()?
        .into_iter()
        .map(|v| v.filter(|x| x.is_finite()))
        .collect();
    Ok(Some(values))
}

/// Text cells of `name`. Role and country are compared after trimming, so
/// those are read with `trim`; team names are kept exactly as exported.
/// A blank cell stays present (as an empty or whitespace string); only a
/// null cell is absent.
fn text_values(
    frame: &DataFrame,
    name: &str,
    trim: bool,
) -> PolarsResult<Option<Vec<Option<String>>>> {
    if !frame_has_column(frame, name) {
        return Ok(None);
    }
    let column = frame.column(name)?.cast(&DataType::String)?;
    let values = column
        .as_materialized_series()
        .str()?
        .into_iter()
        .map(|v| v.map(|s| if trim { s.trim().to_string() } else { s.to_string() }))
        .collect();
    Ok(Some(values))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_follow_available_columns() {
        let frame = df!(
            ROLE => [Some("Defensa"), None],
            HEIGHT => [Some(182.0), Some(175.0)],
            "idJugador" => [7i64, 8]
        )
        .unwrap();
        let table = PlayerTable::from_frame(&frame).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.records()[0].role.as_deref(), Some("Defensa"));
        assert_eq!(table.records()[1].role, None);
        assert_eq!(table.records()[1].height, Some(175.0));
        assert_eq!(table.records()[0].weight, None);
    }

    #[test]
    fn missing_columns_lists_only_absent_names() {
        let frame = df!(AGE => [25.0, 30.0]).unwrap();
        let table = PlayerTable::from_frame(&frame).unwrap();

        assert!(table.has_column(AGE));
        assert_eq!(
            table.missing_columns(&[AGE, WEIGHT, HEIGHT]),
            vec![WEIGHT.to_string(), HEIGHT.to_string()]
        );
    }

    #[test]
    fn role_and_country_are_trimmed_team_is_not() {
        let frame = df!(
            TEAM => [" Emelec", "Emelec"],
            ROLE => [" Defensa ", "Portero"],
            COUNTRY => ["  ", " Ecuador "]
        )
        .unwrap();
        let table = PlayerTable::from_frame(&frame).unwrap();

        assert_eq!(table.records()[0].team.as_deref(), Some(" Emelec"));
        assert_eq!(table.records()[1].team.as_deref(), Some("Emelec"));
        assert_eq!(table.records()[0].role.as_deref(), Some("Defensa"));
        assert_eq!(table.records()[0].country.as_deref(), Some(""));
        assert_eq!(table.records()[1].country.as_deref(), Some("Ecuador"));
    }

    #[test]
    fn null_text_cells_are_absent() {
        let frame = df!(COUNTRY => [None, Some("Chile")]).unwrap();
        let table = PlayerTable::from_frame(&frame).unwrap();

        assert_eq!(table.records()[0].country, None);
        assert_eq!(table.records()[1].country.as_deref(), Some("Chile"));
    }
}
