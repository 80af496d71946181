use chrono::NaiveDateTime;
use geo::Point;
use serde::Deserialize;

use crate::features::{
    codec::{literal, timestamp},
    grid::GridCoord,
};

/// a row of the binarized trips table, holding a full trip and its truncated
/// prefix. literal columns are parsed while deserializing, so a malformed row
/// fails at the CSV reader with its record position.
///
/// columns beyond the ones listed here are ignored.
#[derive(Deserialize, Debug, Clone)]
pub struct TripRecord {
    #[serde(rename = "TRIP_ID")]
    pub trip_id: String,
    #[serde(rename = "TIMESTAMP", deserialize_with = "timestamp::deserialize_timestamp")]
    pub timestamp: NaiveDateTime,
    /// first recorded GPS point of the trip as (lon, lat)
    #[serde(rename = "START_POINT", deserialize_with = "literal::deserialize_point")]
    pub start_point: Point<f64>,
    /// last GPS point of the truncated trip
    #[serde(rename = "TRUNC_POINT", deserialize_with = "literal::deserialize_point")]
    pub trunc_point: Point<f64>,
    /// final destination of the full trip
    #[serde(rename = "END_POINT", deserialize_with = "literal::deserialize_point")]
    pub end_point: Point<f64>,
    #[serde(
        rename = "GRID_POLYLINE",
        deserialize_with = "literal::deserialize_grid_polyline"
    )]
    pub grid_polyline: Vec<GridCoord>,
    #[serde(
        rename = "TRUNC_GRID_POLYLINE",
        deserialize_with = "literal::deserialize_grid_polyline"
    )]
    pub trunc_grid_polyline: Vec<GridCoord>,
    #[serde(rename = "HOUR")]
    pub hour: u32,
    #[serde(rename = "WDAY")]
    pub wday: u32,
    #[serde(rename = "DURATION")]
    pub duration: f64,
    #[serde(rename = "TRUNC_DURATION")]
    pub trunc_duration: f64,
}

impl TripRecord {
    /// column names read from the source table.
    pub const COLUMNS: [&'static str; 11] = [
        "TRIP_ID",
        "TIMESTAMP",
        "START_POINT",
        "TRUNC_POINT",
        "END_POINT",
        "GRID_POLYLINE",
        "TRUNC_GRID_POLYLINE",
        "HOUR",
        "WDAY",
        "DURATION",
        "TRUNC_DURATION",
    ];
}
