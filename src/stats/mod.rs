//! Stats module - statistical helpers and dashboard views

mod calculator;
mod dashboard;
mod outcome;
mod views;

pub use dashboard::Dashboard;
pub use outcome::ViewOutcome;
pub use views::{
    AgeHistogram, AgeSummary, CorrelationMatrix, NationalityComposition, RoleBmiRanking,
    RoleDistribution, TeamCount, TopNationalities, WeightHeightView,
};
