//! Coastline extraction pipeline
//!
//! - [`SourceProfile`] - per-sensor thresholds and switches
//! - [`extract`] / [`extract_from_raster`] - full pipeline for one scene
//! - [`run_batch`] - many dated scenes, failures logged and skipped

mod batch;
mod extract;
mod profile;

pub use batch::{
    normalize_period, run_batch, Acquisition, BatchOutput, SkippedAcquisition, TemporalRecord,
};
pub use extract::{extract, extract_from_raster, ExtractCoastline, Extraction};
pub use profile::SourceProfile;
