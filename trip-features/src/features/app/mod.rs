mod features_app;
mod operation;

pub use features_app::TripFeaturesApp;
pub use operation::FeaturesOperation;
