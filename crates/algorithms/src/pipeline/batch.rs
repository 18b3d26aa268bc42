//! Batch extraction over dated acquisitions
//!
//! One acquisition failing to read or process must not abort the rest of
//! a multi-year run, so the runner partitions results into successful
//! records and skipped acquisitions and keeps going.

use crate::maybe_rayon::*;
use crate::pipeline::{extract, Extraction, SourceProfile};
use shorewatch_core::{Error, Result};
use std::path::PathBuf;
use tracing::{info, warn};

/// One dated scene queued for extraction
#[derive(Debug, Clone)]
pub struct Acquisition {
    /// GeoTIFF path
    pub path: PathBuf,
    /// Acquisition year
    pub year: i32,
    /// Period label within the year, a quarter code like "q1" or free text
    pub period: String,
    /// Extraction profile for this scene
    pub profile: SourceProfile,
}

impl Acquisition {
    pub fn new(
        path: impl Into<PathBuf>,
        year: i32,
        period: impl Into<String>,
        profile: SourceProfile,
    ) -> Self {
        Self {
            path: path.into(),
            year,
            period: period.into(),
            profile,
        }
    }
}

/// Successful extraction with its acquisition metadata
#[derive(Debug, Clone)]
pub struct TemporalRecord {
    /// Acquisition year
    pub year: i32,
    /// Period label as given on the acquisition
    pub period: String,
    /// Source scene path
    pub path: PathBuf,
    /// Pipeline output for the scene
    pub extraction: Extraction,
}

/// Acquisition that failed, and why
#[derive(Debug)]
pub struct SkippedAcquisition {
    pub path: PathBuf,
    pub year: i32,
    pub period: String,
    pub error: Error,
}

/// Outcome of a batch run
#[derive(Debug)]
pub struct BatchOutput {
    /// Successful extractions, in input order
    pub records: Vec<TemporalRecord>,
    /// Failed acquisitions, in input order
    pub skipped: Vec<SkippedAcquisition>,
}

impl BatchOutput {
    /// True when every acquisition was extracted
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Extract coastlines for every acquisition.
///
/// Scenes are processed in parallel when the `parallel` feature is on.
/// A failed acquisition is logged and skipped; the batch always runs to
/// the end.
pub fn run_batch(acquisitions: Vec<Acquisition>) -> BatchOutput {
    let total = acquisitions.len();
    let results: Vec<(Acquisition, Result<Extraction>)> = acquisitions
        .into_par_iter()
        .map(|acquisition| {
            let result = extract(&acquisition.path, &acquisition.profile);
            (acquisition, result)
        })
        .collect();

    let mut records = Vec::new();
    let mut skipped = Vec::new();
    for (acquisition, result) in results {
        match result {
            Ok(extraction) => records.push(TemporalRecord {
                year: acquisition.year,
                period: acquisition.period,
                path: acquisition.path,
                extraction,
            }),
            Err(error) => {
                warn!(
                    path = %acquisition.path.display(),
                    year = acquisition.year,
                    %error,
                    "acquisition skipped"
                );
                skipped.push(SkippedAcquisition {
                    path: acquisition.path,
                    year: acquisition.year,
                    period: acquisition.period,
                    error,
                });
            }
        }
    }

    info!(
        total,
        extracted = records.len(),
        skipped = skipped.len(),
        "batch finished"
    );

    BatchOutput { records, skipped }
}

/// Expand a quarter code into its month-range label.
///
/// Unrecognized labels pass through unchanged, so callers can mix quarter
/// codes with free-text periods.
pub fn normalize_period(period: &str) -> String {
    match period {
        "q1" => "Jan_Mar".to_string(),
        "q2" => "Apr_Jun".to_string(),
        "q3" => "Jul_Sep".to_string(),
        "q4" => "Okt_Des".to_string(),
        other => other.to_string(),
    }
}
