use super::FeaturesOperation;
use clap::Parser;

/// command line tool for turning binarized trips into a linear model feature table
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct TripFeaturesApp {
    #[command(subcommand)]
    pub op: FeaturesOperation,
}
