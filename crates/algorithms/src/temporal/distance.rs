//! Shoreline displacement measurement
//!
//! Samples evenly spaced points along one coastline, matches each to the
//! nearest-longitude point of a second coastline and reports the
//! great-circle distance of every matched pair. Coastlines are expected
//! in geographic coordinates (longitude x, latitude y).

use geo::{Coord, Euclidean, Length};
use serde::Serialize;
use shorewatch_core::{Coastline, Error, Result};

use super::interpolate::linspace;

/// WGS84 equatorial radius, km
const EARTH_RADIUS_KM: f64 = 6378.137;

/// Great-circle distance between two geographic points, in meters.
///
/// Uses the haversine formula on a sphere of the WGS84 equatorial radius,
/// the measurement convention of the surveys this library reproduces.
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c * 1000.0
}

/// Planar length of a coastline in CRS units
pub fn coastline_length(coastline: &Coastline) -> f64 {
    coastline.line().length::<Euclidean>()
}

/// Matched sample indices on two coastlines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TransectPair {
    /// Index into the first coastline's coordinates
    pub index_a: usize,
    /// Index of the nearest-longitude coordinate on the second coastline
    pub index_b: usize,
}

/// Match `count` evenly spaced points of `a` to points of `b`.
///
/// Sample positions are `count` evenly spaced indices along `a`,
/// truncated to integers. Each sample is paired with the coordinate of
/// `b` whose longitude is closest; ties keep the earliest coordinate.
/// Longitude-only matching assumes shorelines roughly monotonic in
/// longitude; a cape or inlet can pair with the wrong branch.
pub fn match_transects(a: &Coastline, b: &Coastline, count: usize) -> Result<Vec<TransectPair>> {
    if count == 0 {
        return Err(Error::InvalidParameter {
            name: "count",
            value: count.to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
    if a.is_empty() || b.is_empty() {
        return Err(Error::NoCoastline(
            "cannot match transects against an empty coastline".to_string(),
        ));
    }

    let a_coords = a.coords();
    let b_coords = b.coords();
    let pairs = linspace((a_coords.len() - 1) as f64, count)
        .into_iter()
        .map(|position| {
            let index_a = position as usize;
            let index_b = nearest_longitude(b_coords, a_coords[index_a].x);
            TransectPair { index_a, index_b }
        })
        .collect();
    Ok(pairs)
}

/// Index of the coordinate whose longitude is closest to `lon`
fn nearest_longitude(coords: &[Coord<f64>], lon: f64) -> usize {
    let mut best = 0;
    let mut best_delta = f64::INFINITY;
    for (i, coord) in coords.iter().enumerate() {
        let delta = (coord.x - lon).abs();
        if delta < best_delta {
            best_delta = delta;
            best = i;
        }
    }
    best
}

/// One measured transect between two coastlines
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Displacement {
    /// Sampled index on the first coastline
    pub index_a: usize,
    /// Matched index on the second coastline
    pub index_b: usize,
    pub from_lon: f64,
    pub from_lat: f64,
    pub to_lon: f64,
    pub to_lat: f64,
    /// Great-circle distance between the pair, meters
    pub meters: f64,
}

/// Displacement measurements between two coastlines
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplacementReport {
    pub transects: Vec<Displacement>,
    pub mean_m: f64,
    pub min_m: f64,
    pub max_m: f64,
}

/// Measure shoreline displacement from `a` to `b` along `count` transects.
///
/// Each transect records the matched endpoints and their haversine
/// distance in meters, with the mean, minimum and maximum across all
/// transects for reporting.
pub fn measure_displacement(
    a: &Coastline,
    b: &Coastline,
    count: usize,
) -> Result<DisplacementReport> {
    let pairs = match_transects(a, b, count)?;

    let a_coords = a.coords();
    let b_coords = b.coords();
    let transects: Vec<Displacement> = pairs
        .into_iter()
        .map(|pair| {
            let from = a_coords[pair.index_a];
            let to = b_coords[pair.index_b];
            Displacement {
                index_a: pair.index_a,
                index_b: pair.index_b,
                from_lon: from.x,
                from_lat: from.y,
                to_lon: to.x,
                to_lat: to.y,
                meters: haversine_distance(from.y, from.x, to.y, to.x),
            }
        })
        .collect();

    let mut mean_m = 0.0;
    let mut min_m = f64::INFINITY;
    let mut max_m = f64::NEG_INFINITY;
    for transect in &transects {
        mean_m += transect.meters;
        min_m = min_m.min(transect.meters);
        max_m = max_m.max(transect.meters);
    }
    mean_m /= transects.len() as f64;

    Ok(DisplacementReport {
        transects,
        mean_m,
        min_m,
        max_m,
    })
}
