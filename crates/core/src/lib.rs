//! # ShoreWatch Core
//!
//! Core types, traits and I/O for the ShoreWatch coastline extraction library.
//!
//! This crate provides:
//! - `Raster<T>`: Generic raster grid type for classified scenes and masks
//! - `GeoTransform`: Affine transformation for georeferencing
//! - `CRS`: Coordinate Reference System handling
//! - `Contour` / `Coastline`: traced shoreline geometry in pixel and geographic space
//! - Algorithm traits for consistent API
//! - Native GeoTIFF I/O

pub mod crs;
pub mod error;
pub mod io;
pub mod raster;
pub mod vector;

pub use crs::CRS;
pub use error::{Error, Result};
pub use raster::{Connectivity, GeoTransform, Raster, RasterElement};
pub use vector::{Coastline, Contour, PixelPoint};

/// Class value for land cells in a binary water mask
pub const LAND: u8 = 0;

/// Class value for water cells in a binary water mask
pub const WATER: u8 = 1;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::crs::CRS;
    pub use crate::error::{Error, Result};
    pub use crate::raster::{Connectivity, GeoTransform, Raster, RasterElement};
    pub use crate::vector::{Coastline, Contour, PixelPoint};
    pub use crate::Algorithm;
    pub use crate::{LAND, WATER};
}

/// Core trait for all algorithms in ShoreWatch.
///
/// Algorithms are pure functions that transform input data according to parameters.
pub trait Algorithm {
    /// Input type for the algorithm
    type Input;
    /// Output type for the algorithm
    type Output;
    /// Parameters controlling algorithm behavior
    type Params: Default;
    /// Error type for algorithm execution
    type Error: std::error::Error;

    /// Returns the algorithm name
    fn name(&self) -> &'static str;

    /// Returns a description of what the algorithm does
    fn description(&self) -> &'static str;

    /// Execute the algorithm
    fn execute(
        &self,
        input: Self::Input,
        params: Self::Params,
    ) -> std::result::Result<Self::Output, Self::Error>;

    /// Execute with default parameters
    fn execute_default(&self, input: Self::Input) -> std::result::Result<Self::Output, Self::Error> {
        self.execute(input, Self::Params::default())
    }
}
