//! this script reads a binarized trips table in batches and writes the
//! feature table consumed by the destination prediction linear model.
use clap::Parser;
use trip_features::features::app::TripFeaturesApp;

fn main() {
    env_logger::init();
    let args = TripFeaturesApp::parse();
    match args.op.run() {
        Ok(_) => log::info!("finished."),
        Err(e) => {
            log::error!("failed running trip_features: {e}");
            std::process::exit(1);
        }
    }
}
