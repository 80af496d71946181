mod feature_config;

pub use feature_config::FeatureConfiguration;
