//! operations of the trip_features command line tool.
use crate::config::FeatureConfiguration;
use crate::features::{
    batch_ops, empty_polyline_policy::EmptyPolylinePolicy, feature_error::FeatureError,
};
use clap::Subcommand;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Subcommand)]
pub enum FeaturesOperation {
    /// derive the linear model feature table from a binarized trips table.
    /// flags override values from the configuration file, which override defaults.
    Extract {
        /// binarized trips CSV to read
        #[arg(long)]
        input: Option<String>,
        /// feature table CSV to write, replaced if it exists
        #[arg(long)]
        output: Option<String>,
        /// path to a .toml or .json file with extraction parameters
        #[arg(long)]
        configuration_file: Option<String>,
        /// number of trips held in memory at a time
        #[arg(long)]
        batch_size: Option<usize>,
        /// number of grid columns, used to compute cell indices
        #[arg(long)]
        grid_width: Option<i64>,
        /// number of grid rows
        #[arg(long)]
        grid_height: Option<i64>,
        #[arg(long, value_enum)]
        empty_polyline_policy: Option<EmptyPolylinePolicy>,
        /// do not pre-scan the input, progress is reported without a total
        #[arg(long)]
        skip_row_count: bool,
    },
}

impl FeaturesOperation {
    pub fn run(&self) -> Result<(), FeatureError> {
        match self {
            FeaturesOperation::Extract { .. } => {
                let conf = self.configuration()?;
                let summary = batch_ops::run_extraction(&conf)?;
                log::debug!("extraction summary: {summary:?}");
                Ok(())
            }
        }
    }

    /// resolves the configuration of this operation: defaults, then the
    /// configuration file, then command line flags.
    pub fn configuration(&self) -> Result<FeatureConfiguration, FeatureError> {
        match self {
            FeaturesOperation::Extract {
                input,
                output,
                configuration_file,
                batch_size,
                grid_width,
                grid_height,
                empty_polyline_policy,
                skip_row_count,
            } => {
                let mut conf = match configuration_file {
                    None => FeatureConfiguration::default(),
                    Some(f) => {
                        log::info!("reading trip_features configuration from {f}");
                        FeatureConfiguration::try_from(f)?
                    }
                };
                if let Some(i) = input {
                    conf.input_file = i.clone();
                }
                if let Some(o) = output {
                    conf.output_file = o.clone();
                }
                if let Some(b) = batch_size {
                    conf.batch_size = *b;
                }
                if let Some(w) = grid_width {
                    conf.grid.width = *w;
                }
                if let Some(h) = grid_height {
                    conf.grid.height = *h;
                }
                if let Some(p) = empty_polyline_policy {
                    conf.empty_polyline_policy = *p;
                }
                if *skip_row_count {
                    conf.count_rows = false;
                }
                Ok(conf)
            }
        }
    }
}
