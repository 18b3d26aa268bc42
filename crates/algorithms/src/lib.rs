//! # ShoreWatch Algorithms
//!
//! Coastline extraction and temporal shoreline analysis.
//!
//! ## Stages
//!
//! - **smoothing**: majority filter for binary water masks
//! - **components**: connected-component labeling, size-based cleaning,
//!   ocean identification
//! - **contour**: marching-squares tracing and georeferencing
//! - **pipeline**: per-scene extraction profiles and batch orchestration
//! - **temporal**: shoreline resampling, epoch averaging and displacement
//!   measurement

pub mod components;
pub mod contour;
pub mod pipeline;
pub mod smoothing;
pub mod temporal;

pub(crate) mod maybe_rayon;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::components::{
        clean_components, identify_ocean, label_components, CleanSummary, LabeledComponents,
        OceanMask,
    };
    pub use crate::contour::{find_contours, project_contour, project_contours, SaddleConnect};
    pub use crate::pipeline::{
        extract, extract_from_raster, normalize_period, run_batch, Acquisition, BatchOutput,
        Extraction, SourceProfile, TemporalRecord,
    };
    pub use crate::smoothing::{majority_filter, MajorityFilter, MajorityFilterParams};
    pub use crate::temporal::{
        coastline_length, group_mean_coastline, haversine_distance, interpolate_line,
        match_transects, mean_coastline, mean_mask_coastlines, measure_displacement,
        partition_years, resample_coastline, Displacement, DisplacementReport, TransectPair,
        YearGroup,
    };
    pub use shorewatch_core::prelude::*;
}
