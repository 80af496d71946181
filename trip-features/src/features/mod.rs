pub mod app;
pub mod batch_ops;
pub mod codec;
pub mod empty_polyline_policy;
pub mod feature_error;
pub mod feature_row;
pub mod grid;
pub mod haversine;
pub mod literal;
pub mod trip_record;

pub use batch_ops::{run_extraction, ExtractionSummary};
pub use empty_polyline_policy::EmptyPolylinePolicy;
pub use feature_error::FeatureError;
pub use feature_row::FeatureRow;
pub use grid::{GridCoord, GridDimensions};
pub use trip_record::TripRecord;
