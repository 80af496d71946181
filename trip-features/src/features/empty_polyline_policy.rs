use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Enumerates alternative ways to handle a trip
/// whose grid polyline has no coordinates
#[derive(Serialize, Deserialize, Debug, ValueEnum, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EmptyPolylinePolicy {
    /// abort the run with an error naming the trip
    #[default]
    Fail,
    /// write the row with the dependent cell fields left empty
    Missing,
}

impl Display for EmptyPolylinePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmptyPolylinePolicy::Fail => write!(f, "fail"),
            EmptyPolylinePolicy::Missing => write!(f, "missing"),
        }
    }
}
