use chrono::Datelike;
use serde::Serialize;
use uom::si::{f64::Length, length::kilometer};

use crate::features::{
    codec::number,
    empty_polyline_policy::EmptyPolylinePolicy,
    feature_error::FeatureError,
    grid::{GridCoord, GridDimensions},
    trip_record::TripRecord,
};

/// a row of the linear model feature table.
///
/// the END_* fields describe where the trip actually finished. they are kept
/// so predictions on a validation set can be scored, and must not be used as
/// explanatory variables at prediction time.
///
/// field order is the output column order, see [FeatureRow::COLUMNS].
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct FeatureRow {
    #[serde(rename = "TRIP_ID")]
    pub trip_id: String,
    #[serde(rename = "START_POINT_LON")]
    pub start_point_lon: f64,
    #[serde(rename = "START_POINT_LAT")]
    pub start_point_lat: f64,
    #[serde(rename = "TRUNC_POINT_LON")]
    pub trunc_point_lon: f64,
    #[serde(rename = "TRUNC_POINT_LAT")]
    pub trunc_point_lat: f64,
    #[serde(rename = "END_POINT_LON")]
    pub end_point_lon: f64,
    #[serde(rename = "END_POINT_LAT")]
    pub end_point_lat: f64,
    #[serde(rename = "START_CELL")]
    pub start_cell: Option<i64>,
    #[serde(rename = "TRUNC_CELL")]
    pub trunc_cell: Option<i64>,
    #[serde(rename = "END_CELL")]
    pub end_cell: Option<i64>,
    #[serde(rename = "HOUR")]
    pub hour: u32,
    #[serde(rename = "WDAY")]
    pub wday: u32,
    /// ISO-8601 week of the year of the trip timestamp
    #[serde(rename = "WEEK")]
    pub week: u32,
    #[serde(rename = "DURATION", serialize_with = "number::serialize_integral")]
    pub duration: f64,
    #[serde(
        rename = "TRUNC_DURATION",
        serialize_with = "number::serialize_integral"
    )]
    pub trunc_duration: f64,
    /// haversine distance in kilometers from the start point to the truncated point
    #[serde(rename = "TRUNC_DISTANCE")]
    pub trunc_distance: f64,
}

impl FeatureRow {
    /// explanatory variables written to the feature table, in order.
    pub const COLUMNS: [&'static str; 16] = [
        "TRIP_ID",
        "START_POINT_LON",
        "START_POINT_LAT",
        "TRUNC_POINT_LON",
        "TRUNC_POINT_LAT",
        "END_POINT_LON",
        "END_POINT_LAT",
        "START_CELL",
        "TRUNC_CELL",
        "END_CELL",
        "HOUR",
        "WDAY",
        "WEEK",
        "DURATION",
        "TRUNC_DURATION",
        "TRUNC_DISTANCE",
    ];

    /// derives the feature row for a single trip record.
    ///
    /// # Arguments
    ///
    /// * `record` - source trip
    /// * `trunc_distance` - haversine distance from the start point to the truncated point
    /// * `grid` - dimensions used to turn grid coordinates into cell indices
    /// * `policy` - how to treat a record with an empty grid polyline
    ///
    /// # Returns
    ///
    /// the feature row, or an error if a polyline is empty under
    /// [EmptyPolylinePolicy::Fail] or a cell index does not fit in an `i64`
    pub fn try_from_record(
        record: &TripRecord,
        trunc_distance: Length,
        grid: &GridDimensions,
        policy: &EmptyPolylinePolicy,
    ) -> Result<FeatureRow, FeatureError> {
        let start = record.grid_polyline.first();
        let trunc = record.trunc_grid_polyline.last();
        let end = record.grid_polyline.last();

        let start_cell = cell(record, "GRID_POLYLINE", start, grid, policy)?;
        let trunc_cell = cell(record, "TRUNC_GRID_POLYLINE", trunc, grid, policy)?;
        let end_cell = cell(record, "GRID_POLYLINE", end, grid, policy)?;

        Ok(FeatureRow {
            trip_id: record.trip_id.clone(),
            start_point_lon: record.start_point.x(),
            start_point_lat: record.start_point.y(),
            trunc_point_lon: record.trunc_point.x(),
            trunc_point_lat: record.trunc_point.y(),
            end_point_lon: record.end_point.x(),
            end_point_lat: record.end_point.y(),
            start_cell,
            trunc_cell,
            end_cell,
            hour: record.hour,
            wday: record.wday,
            week: record.timestamp.iso_week().week(),
            duration: record.duration,
            trunc_duration: record.trunc_duration,
            trunc_distance: trunc_distance.get::<kilometer>(),
        })
    }
}

fn cell(
    record: &TripRecord,
    column: &str,
    coord: Option<&GridCoord>,
    grid: &GridDimensions,
    policy: &EmptyPolylinePolicy,
) -> Result<Option<i64>, FeatureError> {
    match coord {
        Some(c) => {
            if !grid.contains(c) {
                log::debug!(
                    "trip '{}' has {} coordinate {} outside of the {}x{} grid",
                    record.trip_id,
                    column,
                    c,
                    grid.width,
                    grid.height
                );
            }
            grid.cell_index(c)
                .map(Some)
                .ok_or_else(|| FeatureError::CellIndexOverflow {
                    trip_id: record.trip_id.clone(),
                    column: String::from(column),
                    coord: c.to_string(),
                })
        }
        None => match policy {
            EmptyPolylinePolicy::Fail => Err(FeatureError::EmptyPolyline {
                trip_id: record.trip_id.clone(),
                column: String::from(column),
            }),
            EmptyPolylinePolicy::Missing => Ok(None),
        },
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::features::haversine::haversine;
    use chrono::NaiveDate;
    use geo::point;

    fn record() -> TripRecord {
        TripRecord {
            trip_id: String::from("1372636858620000589"),
            timestamp: NaiveDate::from_ymd_opt(2013, 7, 1)
                .and_then(|d| d.and_hms_opt(12, 0, 0))
                .expect("valid date"),
            start_point: point!(x: -8.6, y: 41.1),
            trunc_point: point!(x: -8.6, y: 41.1),
            end_point: point!(x: -8.63, y: 41.16),
            grid_polyline: vec![GridCoord::new(5, 2), GridCoord::new(7, 3)],
            trunc_grid_polyline: vec![GridCoord::new(5, 2), GridCoord::new(6, 2)],
            hour: 12,
            wday: 0,
            duration: 600.0,
            trunc_duration: 300.0,
        }
    }

    fn features(
        r: &TripRecord,
        policy: &EmptyPolylinePolicy,
    ) -> Result<FeatureRow, FeatureError> {
        let distance = haversine(r.start_point, r.trunc_point);
        FeatureRow::try_from_record(r, distance, &GridDimensions::default(), policy)
    }

    #[test]
    fn test_features_from_record() {
        let row = features(&record(), &EmptyPolylinePolicy::Fail).expect("valid record");
        assert_eq!(row.trunc_distance, 0.0);
        assert_eq!(row.start_cell, Some(205));
        assert_eq!(row.trunc_cell, Some(206));
        assert_eq!(row.end_cell, Some(307));
        assert_eq!(row.week, 27);
        assert_eq!((row.end_point_lon, row.end_point_lat), (-8.63, 41.16));
        assert_eq!((row.hour, row.wday), (12, 0));
    }

    #[test]
    fn test_iso_week_at_year_boundary() {
        let mut r = record();
        // 2013-12-30 is a monday in ISO week 1 of 2014
        r.timestamp = NaiveDate::from_ymd_opt(2013, 12, 30)
            .and_then(|d| d.and_hms_opt(8, 0, 0))
            .expect("valid date");
        let row = features(&r, &EmptyPolylinePolicy::Fail).expect("valid record");
        assert_eq!(row.week, 1);
    }

    #[test]
    fn test_empty_polyline_fails() {
        let mut r = record();
        r.trunc_grid_polyline = vec![];
        let result = features(&r, &EmptyPolylinePolicy::Fail);
        match result {
            Err(FeatureError::EmptyPolyline { trip_id, column }) => {
                assert_eq!(trip_id, "1372636858620000589");
                assert_eq!(column, "TRUNC_GRID_POLYLINE");
            }
            other => panic!("expected empty polyline error, found {other:?}"),
        }
    }

    #[test]
    fn test_empty_polyline_missing() {
        let mut r = record();
        r.grid_polyline = vec![];
        let row = features(&r, &EmptyPolylinePolicy::Missing)
            .expect("missing policy keeps the row");
        assert_eq!(row.start_cell, None);
        assert_eq!(row.end_cell, None);
        assert_eq!(row.trunc_cell, Some(206));
    }

    #[test]
    fn test_cell_index_overflow_fails() {
        let mut r = record();
        r.grid_polyline = vec![GridCoord::new(0, 100_000_000_000_000_000)];
        match features(&r, &EmptyPolylinePolicy::Missing) {
            Err(FeatureError::CellIndexOverflow {
                trip_id,
                column,
                coord,
            }) => {
                assert_eq!(trip_id, "1372636858620000589");
                assert_eq!(column, "GRID_POLYLINE");
                assert_eq!(coord, "[0,100000000000000000]");
            }
            other => panic!("expected cell index overflow, found {other:?}"),
        }
    }

    #[test]
    fn test_trunc_distance_in_kilometers() {
        let mut r = record();
        r.start_point = point!(x: 0.0, y: 0.0);
        r.trunc_point = point!(x: 0.0, y: 1.0);
        let row = features(&r, &EmptyPolylinePolicy::Fail).expect("valid record");
        assert!((row.trunc_distance - 111.194_926_6).abs() < 1e-6, "{}", row.trunc_distance);
    }

    #[test]
    fn test_integral_durations_written_without_fraction() {
        let mut r = record();
        r.trunc_duration = 30.5;
        let row = features(&r, &EmptyPolylinePolicy::Fail).expect("valid record");
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(vec![]);
        writer.serialize(&row).expect("serialize row");
        let bytes = writer.into_inner().expect("flush writer");
        let text = String::from_utf8(bytes).expect("utf8");
        let fields: Vec<&str> = text.trim_end().split(',').collect();
        assert_eq!(fields[13], "600");
        assert_eq!(fields[14], "30.5");
    }

    #[test]
    fn test_serialized_header_matches_columns() {
        let row = features(&record(), &EmptyPolylinePolicy::Fail).expect("valid record");
        let mut writer = csv::WriterBuilder::new()
            .has_headers(true)
            .from_writer(vec![]);
        writer.serialize(&row).expect("serialize row");
        let bytes = writer.into_inner().expect("flush writer");
        let text = String::from_utf8(bytes).expect("utf8");
        let header = text.lines().next().expect("header line");
        assert_eq!(header, FeatureRow::COLUMNS.join(","));
    }
}
