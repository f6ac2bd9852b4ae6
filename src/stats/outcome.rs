//! View Outcome
//! Every dashboard view either computes, or says precisely why it cannot.

use serde::Serialize;

/// Result of a single dashboard view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum ViewOutcome<T> {
    Ready(T),
    /// Required columns absent from the table, in the order the view lists them.
    MissingColumns(Vec<String>),
    /// The columns exist but no row is eligible.
    NoData,
}

impl<T> ViewOutcome<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            ViewOutcome::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, ViewOutcome::Ready(_))
    }

    /// Human-readable reason for an unavailable view, `None` when ready.
    pub fn unavailable_reason(&self) -> Option<String> {
        match self {
            ViewOutcome::Ready(_) => None,
            ViewOutcome::MissingColumns(columns) => Some(format!(
                "missing required columns: [{}]",
                columns.join(", ")
            )),
            ViewOutcome::NoData => Some("no data".to_string()),
        }
    }
}

impl<T> From<Option<T>> for ViewOutcome<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(ViewOutcome::NoData, ViewOutcome::Ready)
    }
}
