use crate::features::{
    empty_polyline_policy::EmptyPolylinePolicy, feature_error::FeatureError, grid::GridDimensions,
};
use serde::{Deserialize, Serialize};

/// defines behaviors for a feature table extraction. any field missing from
/// a configuration file takes its default value.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(default)]
pub struct FeatureConfiguration {
    /// binarized trips CSV to read
    pub input_file: String,
    /// feature table CSV to write
    pub output_file: String,
    /// number of rows held in memory at a time
    pub batch_size: usize,
    pub grid: GridDimensions,
    pub empty_polyline_policy: EmptyPolylinePolicy,
    /// scan the input once before extraction so progress can report a total
    pub count_rows: bool,
}

impl Default for FeatureConfiguration {
    fn default() -> Self {
        Self {
            input_file: String::from("train_binarized_trips_validation.csv"),
            output_file: String::from("val_lm.csv"),
            batch_size: 1000,
            grid: GridDimensions::default(),
            empty_polyline_policy: EmptyPolylinePolicy::default(),
            count_rows: true,
        }
    }
}

impl FeatureConfiguration {
    pub fn validate(&self) -> Result<(), FeatureError> {
        if self.batch_size == 0 {
            return Err(FeatureError::ConfigurationError(String::from(
                "batch_size must be positive",
            )));
        }
        if self.grid.width <= 0 || self.grid.height <= 0 {
            return Err(FeatureError::ConfigurationError(format!(
                "grid dimensions must be positive, found {}x{}",
                self.grid.width, self.grid.height
            )));
        }
        if self.input_file == self.output_file {
            return Err(FeatureError::ConfigurationError(format!(
                "input and output files must differ, both are '{}'",
                self.input_file
            )));
        }
        Ok(())
    }
}

impl TryFrom<&String> for FeatureConfiguration {
    type Error = FeatureError;

    fn try_from(f: &String) -> Result<Self, Self::Error> {
        if f.ends_with(".toml") {
            let s = std::fs::read_to_string(f).map_err(|e| {
                FeatureError::ConfigurationError(format!("failure reading {f}: {e}"))
            })?;
            toml::from_str(&s).map_err(|e| {
                FeatureError::ConfigurationError(format!("failure decoding {f}: {e}"))
            })
        } else if f.ends_with(".json") {
            let s = std::fs::read_to_string(f).map_err(|e| {
                FeatureError::ConfigurationError(format!("failure reading {f}: {e}"))
            })?;
            serde_json::from_str(&s).map_err(|e| {
                FeatureError::ConfigurationError(format!("failure decoding {f}: {e}"))
            })
        } else {
            Err(FeatureError::ConfigurationError(format!(
                "unsupported file type: {f}"
            )))
        }
    }
}
