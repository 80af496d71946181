#[derive(thiserror::Error, Debug)]
pub enum FeatureError {
    #[error("invalid feature extraction configuration: {0}")]
    ConfigurationError(String),
    #[error("failure reading trips file {0}: {1}")]
    CsvReadError(String, csv::Error),
    #[error("trips file {0} is missing required column {1}")]
    MissingColumn(String, String),
    #[error("failure writing to file {0}: {1}")]
    CsvWriteError(String, csv::Error),
    #[error("failure opening {0}: {1}")]
    IoError(String, std::io::Error),
    #[error("trip '{trip_id}' has an empty {column}")]
    EmptyPolyline { trip_id: String, column: String },
    #[error("trip '{trip_id}' has a {column} coordinate {coord} whose cell index overflows")]
    CellIndexOverflow {
        trip_id: String,
        column: String,
        coord: String,
    },
    #[error("cannot pair {0} points with {1} points")]
    LengthMismatch(usize, usize),
}
