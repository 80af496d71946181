use csv::QuoteStyle;
use geo::Point;
use itertools::Itertools;
use kdam::{tqdm, BarExt};
use std::{
    fs::{File, OpenOptions},
    path::Path,
};

use crate::{
    config::FeatureConfiguration,
    features::{
        empty_polyline_policy::EmptyPolylinePolicy, feature_error::FeatureError,
        feature_row::FeatureRow, grid::GridDimensions, haversine::haversine_pairwise,
        trip_record::TripRecord,
    },
};

/// counts of work done by [run_extraction].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ExtractionSummary {
    pub batches: usize,
    pub rows: usize,
}

/// streams the trips table through memory `batch_size` rows at a time,
/// derives a [FeatureRow] for every trip and appends each batch to the
/// feature table.
///
/// the first batch truncates the output file and writes the header; every
/// later batch re-opens the file in append mode. an input without data rows
/// still produces a header-only output. there is no recovery: the first
/// failure aborts the run and rows written by earlier batches stay on disk.
///
/// # Arguments
///
/// * `conf` - input/output paths, batch size, grid and empty polyline policy
///
/// # Returns
///
/// the number of batches and rows written
pub fn run_extraction(conf: &FeatureConfiguration) -> Result<ExtractionSummary, FeatureError> {
    conf.validate()?;
    let input = Path::new(&conf.input_file);
    let output = Path::new(&conf.output_file);
    log::info!(
        "extracting features from {} into {} with batch size {}",
        conf.input_file,
        conf.output_file,
        conf.batch_size
    );
    log::debug!(
        "grid {}x{}, empty polyline policy '{}'",
        conf.grid.width,
        conf.grid.height,
        conf.empty_polyline_policy
    );

    let total_batches = if conf.count_rows {
        let n_rows = count_rows(input)?;
        let n_batches = n_rows.div_ceil(conf.batch_size);
        log::info!("{} has {n_rows} trips in {n_batches} batches", conf.input_file);
        Some(n_batches)
    } else {
        None
    };

    let mut reader = create_reader(input)?;
    check_columns(&mut reader, &conf.input_file)?;
    let mut bar = total_batches.map(|total| tqdm!(total = total, desc = "extract features"));
    let mut summary = ExtractionSummary::default();
    let batches = reader.into_deserialize::<TripRecord>().chunks(conf.batch_size);
    for (batch_idx, batch) in batches.into_iter().enumerate() {
        let records = batch
            .map(|r| r.map_err(|e| FeatureError::CsvReadError(conf.input_file.clone(), e)))
            .collect::<Result<Vec<TripRecord>, FeatureError>>()?;
        let rows = transform_batch(&records, &conf.grid, &conf.empty_polyline_policy)?;
        write_batch(output, &rows, batch_idx == 0)?;

        summary.batches += 1;
        summary.rows += rows.len();
        report_progress(batch_idx + 1, total_batches);
        if let Some(ref mut b) = bar {
            let _ = b.update(1);
        }
    }
    if bar.is_some() {
        eprintln!();
    }

    if summary.batches == 0 {
        log::warn!("{} has no trips, writing header only", conf.input_file);
        write_batch(output, &[], true)?;
    }

    log::info!(
        "wrote {} feature rows in {} batches to {}",
        summary.rows,
        summary.batches,
        conf.output_file
    );
    Ok(summary)
}

/// derives the feature rows of one batch, preserving record order.
/// truncated trip distances are computed for the whole batch at once.
pub fn transform_batch(
    records: &[TripRecord],
    grid: &GridDimensions,
    policy: &EmptyPolylinePolicy,
) -> Result<Vec<FeatureRow>, FeatureError> {
    let (starts, truncs): (Vec<Point<f64>>, Vec<Point<f64>>) = records
        .iter()
        .map(|r| (r.start_point, r.trunc_point))
        .unzip();
    let distances = haversine_pairwise(&starts, &truncs)?;
    records
        .iter()
        .zip(distances)
        .map(|(record, distance)| FeatureRow::try_from_record(record, distance, grid, policy))
        .collect()
}

/// writes one batch of feature rows. the first batch creates (or truncates)
/// the file and writes the header, later batches append rows only.
pub fn write_batch(
    output: &Path,
    rows: &[FeatureRow],
    first_batch: bool,
) -> Result<(), FeatureError> {
    let filename = output.to_string_lossy().to_string();
    let mut writer = create_writer(output, first_batch)?;
    if first_batch {
        writer
            .write_record(FeatureRow::COLUMNS)
            .map_err(|e| FeatureError::CsvWriteError(filename.clone(), e))?;
    }
    for row in rows.iter() {
        writer
            .serialize(row)
            .map_err(|e| FeatureError::CsvWriteError(filename.clone(), e))?;
    }
    writer
        .flush()
        .map_err(|e| FeatureError::IoError(filename.clone(), e))
}

fn report_progress(batch_number: usize, total_batches: Option<usize>) {
    match total_batches {
        Some(total) => {
            println!("-- processed batch {batch_number} of {total}");
            log::info!("processed batch {batch_number} of {total}");
        }
        None => {
            println!("-- processed batch {batch_number}");
            log::info!("processed batch {batch_number}");
        }
    }
}

/// number of data rows in a CSV file, excluding the header.
fn count_rows(input: &Path) -> Result<usize, FeatureError> {
    let filename = input.to_string_lossy().to_string();
    let mut reader = create_reader(input)?;
    let mut n_rows = 0;
    for record in reader.byte_records() {
        record.map_err(|e| FeatureError::CsvReadError(filename.clone(), e))?;
        n_rows += 1;
    }
    Ok(n_rows)
}

/// fails early, naming the column, if the source lacks a required trip column.
fn check_columns(reader: &mut csv::Reader<File>, filename: &str) -> Result<(), FeatureError> {
    let headers = reader
        .headers()
        .map_err(|e| FeatureError::CsvReadError(String::from(filename), e))?;
    match TripRecord::COLUMNS
        .iter()
        .find(|column| !headers.iter().any(|h| h == **column))
    {
        Some(column) => Err(FeatureError::MissingColumn(
            String::from(filename),
            String::from(*column),
        )),
        None => Ok(()),
    }
}

fn create_reader(input: &Path) -> Result<csv::Reader<File>, FeatureError> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(input)
        .map_err(|e| FeatureError::CsvReadError(input.to_string_lossy().to_string(), e))
}

/// helper function to build a file writer for a feature table batch. the
/// header row is written explicitly by [write_batch], so the writer never
/// infers one from the serialized rows.
fn create_writer(output: &Path, first_batch: bool) -> Result<csv::Writer<File>, FeatureError> {
    let file = if first_batch {
        File::create(output)
    } else {
        OpenOptions::new().append(true).open(output)
    }
    .map_err(|e| FeatureError::IoError(output.to_string_lossy().to_string(), e))?;
    let writer = csv::WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Necessary)
        .from_writer(file);
    Ok(writer)
}
