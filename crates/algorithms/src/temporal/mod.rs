//! Temporal aggregation and change measurement
//!
//! - [`resample_coastline`] / [`interpolate_line`] - arc-length resampling
//! - [`partition_years`] / [`YearGroup`] - year spans for group averaging
//! - [`mean_coastline`] / [`mean_mask_coastlines`] - representative
//!   coastline per group, from resampled lines or from mask consensus
//! - [`measure_displacement`] - transect distances between two coastlines

mod average;
mod distance;
mod interpolate;

pub use average::{
    group_mean_coastline, mean_coastline, mean_mask_coastlines, partition_years, YearGroup,
};
pub use distance::{
    coastline_length, haversine_distance, match_transects, measure_displacement, Displacement,
    DisplacementReport, TransectPair,
};
pub use interpolate::{interpolate_line, resample_coastline};
