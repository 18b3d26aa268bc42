//! Single-scene coastline extraction
//!
//! Runs the full stage chain for one acquisition: binarize against the
//! profile's water value, remove small water bodies, remove small land
//! regions, smooth with a majority filter, optionally keep only
//! border-connected water, trace the 0.5 iso-level and project the traced
//! contours into map coordinates.

use crate::components::{clean_components, identify_ocean, OceanMask};
use crate::contour::{find_contours, project_contours, SaddleConnect};
use crate::pipeline::SourceProfile;
use crate::smoothing::majority_filter;
use shorewatch_core::io::read_geotiff;
use shorewatch_core::{
    Algorithm, Coastline, Connectivity, Contour, Error, Raster, RasterElement, Result, LAND, WATER,
};
use std::path::Path;
use tracing::{debug, info};

/// Everything produced for one acquisition
#[derive(Debug, Clone)]
pub struct Extraction {
    /// Corrected land/water mask after cleaning and smoothing
    pub mask: Raster<u8>,
    /// Border-connected water, when the profile discriminates ocean
    pub ocean: Option<OceanMask>,
    /// Traced contours in fractional (row, col) space
    pub contours: Vec<Contour>,
    /// Georeferenced coastlines, one per contour, in trace order
    pub coastlines: Vec<Coastline>,
}

impl Extraction {
    /// The first traced coastline.
    ///
    /// `None` when the scene is uniform and nothing was traced.
    pub fn primary(&self) -> Option<&Coastline> {
        self.coastlines.first()
    }
}

/// Coastline extraction algorithm over an already-loaded scene
#[derive(Debug, Clone, Default)]
pub struct ExtractCoastline;

impl Algorithm for ExtractCoastline {
    type Input = Raster<f64>;
    type Output = Extraction;
    type Params = SourceProfile;
    type Error = Error;

    fn name(&self) -> &'static str {
        "ExtractCoastline"
    }

    fn description(&self) -> &'static str {
        "Binarize, correct and trace the land/water boundary of one scene"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        extract_from_raster(&input, &params)
    }
}

/// Extract the coastline from a classified GeoTIFF scene.
pub fn extract<P: AsRef<Path>>(path: P, profile: &SourceProfile) -> Result<Extraction> {
    let scene: Raster<f64> = read_geotiff(path.as_ref())?;
    debug!(
        path = %path.as_ref().display(),
        rows = scene.rows(),
        cols = scene.cols(),
        "scene loaded"
    );
    extract_from_raster(&scene, profile)
}

/// Extract the coastline from an in-memory scene.
///
/// Zero traced contours is a valid outcome for a uniform scene; the
/// returned [`Extraction`] then has empty contour and coastline lists.
pub fn extract_from_raster(scene: &Raster<f64>, profile: &SourceProfile) -> Result<Extraction> {
    profile.validate()?;

    let binary = binarize(scene, profile.raw_water_value);
    let (water_cleaned, water_summary) =
        clean_components(&binary, WATER, profile.min_water_size, Connectivity::Four)?;
    let (land_cleaned, land_summary) =
        clean_components(&water_cleaned, LAND, profile.min_land_size, Connectivity::Four)?;
    let mask = majority_filter(&land_cleaned, profile.smoothing_window)?;

    debug!(
        water_removed = water_summary.components_removed,
        land_removed = land_summary.components_removed,
        "mask corrected"
    );

    let ocean = if profile.ocean_only {
        Some(identify_ocean(&mask, Connectivity::Four)?)
    } else {
        None
    };
    let traced = ocean.as_ref().map(|o| &o.mask).unwrap_or(&mask);

    let contours = find_contours(traced, 0.5, SaddleConnect::Low);
    let coastlines = project_contours(&contours, mask.transform());

    info!(
        profile = %profile.name,
        contours = contours.len(),
        water_cells = mask.count_eq(WATER),
        "extraction finished"
    );

    Ok(Extraction {
        mask,
        ocean,
        contours,
        coastlines,
    })
}

/// Classify a scene into a binary land/water mask.
///
/// With a raw water value set, cells equal to it become 1 and all others
/// 0 before anything else; the no-data substitution then runs on the
/// remapped grid, so a sentinel equal to the raw value leaves water
/// intact. Without a remap, no-data cells become [`LAND`] and cells equal
/// to 1.0 become [`WATER`].
fn binarize(scene: &Raster<f64>, raw_water_value: Option<f64>) -> Raster<u8> {
    let (rows, cols) = scene.shape();
    let nodata = scene.nodata();
    let mut mask: Raster<u8> = scene.with_same_meta(rows, cols);
    for ((row, col), &value) in scene.data().indexed_iter() {
        let value = match raw_water_value {
            Some(raw) => {
                if value == raw {
                    1.0
                } else {
                    0.0
                }
            }
            None => value,
        };
        let class = if !value.is_nodata(nodata) && value == 1.0 {
            WATER
        } else {
            LAND
        };
        unsafe { mask.set_unchecked(row, col, class) };
    }
    mask
}
