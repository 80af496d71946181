//! prepares the linear model feature table for trip destination prediction.
//! binarized trips are read in batches, each trip gets time, grid cell and
//! distance features, and the batches are appended to a CSV table.
pub mod config;
pub mod features;
