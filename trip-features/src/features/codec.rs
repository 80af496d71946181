pub mod timestamp {
    //! deserializers for trip timestamps. accepts RFC 3339 strings, ISO-8601
    //! date-times with either a `T` or space separator, bare dates and integer
    //! unix epoch seconds.
    use chrono::{DateTime, NaiveDate, NaiveDateTime};
    use serde::{de::Error, Deserialize, Deserializer};

    pub const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];
    pub const DATE_FORMAT: &str = "%Y-%m-%d";

    /// parses a timestamp string into a naive date-time. offsets found in
    /// RFC 3339 input are normalized to UTC.
    pub fn parse_timestamp(s: &str) -> Result<NaiveDateTime, String> {
        let trimmed = s.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
            return Ok(dt.naive_utc());
        }
        for format in DATETIME_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
                return Ok(dt);
            }
        }
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
            return Ok(date.and_time(chrono::NaiveTime::MIN));
        }
        if let Ok(epoch) = trimmed.parse::<i64>() {
            return DateTime::from_timestamp(epoch, 0)
                .map(|dt| dt.naive_utc())
                .ok_or_else(|| format!("epoch seconds out of range: {epoch}"));
        }
        Err(format!("unrecognized timestamp '{trimmed}'"))
    }

    pub fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let ts_str: String = String::deserialize(deserializer)?;
        parse_timestamp(&ts_str).map_err(|e| D::Error::custom(format!("Invalid timestamp: {e}")))
    }
}

pub mod literal {
    //! deserializers for point and grid polyline columns, backed by the
    //! bounded parser in [crate::features::literal].
    use crate::features::{grid::GridCoord, literal as parser};
    use geo::Point;
    use serde::{de::Error, Deserialize, Deserializer};

    pub fn deserialize_point<'de, D>(deserializer: D) -> Result<Point<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s: String = String::deserialize(deserializer)?;
        parser::parse_point(&s)
            .map_err(|e| D::Error::custom(format!("Invalid point literal '{s}': {e}")))
    }

    pub fn deserialize_grid_polyline<'de, D>(deserializer: D) -> Result<Vec<GridCoord>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s: String = String::deserialize(deserializer)?;
        parser::parse_grid_polyline(&s)
            .map_err(|e| D::Error::custom(format!("Invalid grid polyline literal '{s}': {e}")))
    }
}

pub mod number {
    //! serializers for numeric columns copied from the trips table.
    use serde::Serializer;

    /// largest magnitude below which every integral `f64` is exact as an `i64`.
    const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

    /// writes integral values without a fractional part, so a duration of `600`
    /// is written back as `600` and not `600.0`.
    pub fn serialize_integral<S>(n: &f64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if n.fract() == 0.0 && n.abs() < MAX_EXACT_INTEGER {
            serializer.serialize_i64(*n as i64)
        } else {
            serializer.serialize_f64(*n)
        }
    }
}
