//! Shoreline geometry in pixel and geographic space

use geo_types::{Coord, LineString};

/// A vertex of a traced contour, in fractional pixel coordinates.
///
/// Follows the raster convention: `row` 0 is the top of the image and
/// grows downward, `col` grows to the right. Vertices sit on cell edges,
/// so one of the two components is usually fractional.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelPoint {
    pub row: f64,
    pub col: f64,
}

impl PixelPoint {
    pub fn new(row: f64, col: f64) -> Self {
        Self { row, col }
    }
}

impl From<(f64, f64)> for PixelPoint {
    fn from((row, col): (f64, f64)) -> Self {
        Self { row, col }
    }
}

/// An iso-contour traced from a mask, in pixel space.
///
/// A contour is closed when its first and last vertices coincide;
/// open contours start and end on the image border.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Contour {
    points: Vec<PixelPoint>,
}

impl Contour {
    pub fn new(points: Vec<PixelPoint>) -> Self {
        Self { points }
    }

    /// Number of vertices
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Vertices in trace order
    pub fn points(&self) -> &[PixelPoint] {
        &self.points
    }

    pub fn into_points(self) -> Vec<PixelPoint> {
        self.points
    }

    /// Whether the first and last vertices coincide
    pub fn is_closed(&self) -> bool {
        match (self.points.first(), self.points.last()) {
            (Some(a), Some(b)) if self.points.len() > 2 => a == b,
            _ => false,
        }
    }
}

/// A shoreline in geographic coordinates.
///
/// Thin wrapper around [`LineString`] so shoreline-specific operations
/// (resampling, averaging, displacement) have a home without leaking
/// pixel-space details.
#[derive(Debug, Clone, PartialEq)]
pub struct Coastline {
    line: LineString<f64>,
}

impl Coastline {
    pub fn new(line: LineString<f64>) -> Self {
        Self { line }
    }

    /// Build from (x, y) pairs, usually (longitude, latitude)
    pub fn from_xy(points: Vec<(f64, f64)>) -> Self {
        Self {
            line: LineString::from(points),
        }
    }

    /// Number of vertices
    pub fn len(&self) -> usize {
        self.line.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.line.0.is_empty()
    }

    /// Vertices in trace order
    pub fn coords(&self) -> &[Coord<f64>] {
        &self.line.0
    }

    pub fn line(&self) -> &LineString<f64> {
        &self.line
    }

    pub fn into_line(self) -> LineString<f64> {
        self.line
    }
}

impl From<LineString<f64>> for Coastline {
    fn from(line: LineString<f64>) -> Self {
        Self::new(line)
    }
}

impl From<Coastline> for LineString<f64> {
    fn from(coastline: Coastline) -> Self {
        coastline.into_line()
    }
}
