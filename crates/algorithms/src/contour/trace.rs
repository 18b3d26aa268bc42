//! Sub-pixel contour tracing
//!
//! Marching squares over the cell grid. Every 2x2 window of neighboring
//! cells is classified against the iso level, crossing points are placed
//! on the window edges by linear interpolation, and the resulting segments
//! are stitched into polylines. Coordinates are fractional (row, col)
//! positions. Closed rings repeat their first point at the end; open lines
//! start and end where the level surface leaves the grid.

use ndarray::Array2;
use shorewatch_core::{Algorithm, Contour, Error, PixelPoint, Raster, RasterElement, Result};
use std::collections::{BTreeMap, HashMap, VecDeque};

/// How to connect the two ambiguous saddle configurations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SaddleConnect {
    /// Treat the window center as below the level
    #[default]
    Low,
    /// Treat the window center as above the level
    High,
}

/// Parameters for contour tracing
#[derive(Debug, Clone)]
pub struct FindContoursParams {
    /// Iso level to trace
    pub level: f64,
    /// Saddle disambiguation
    pub saddle: SaddleConnect,
}

impl Default for FindContoursParams {
    fn default() -> Self {
        Self {
            level: 0.5,
            saddle: SaddleConnect::Low,
        }
    }
}

/// Contour tracing algorithm
#[derive(Debug, Clone, Default)]
pub struct FindContours;

impl Algorithm for FindContours {
    type Input = Raster<u8>;
    type Output = Vec<Contour>;
    type Params = FindContoursParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "FindContours"
    }

    fn description(&self) -> &'static str {
        "Trace iso-level contours through the cell grid"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        Ok(find_contours(&input, params.level, params.saddle))
    }
}

/// Trace all contours of `raster` at the given iso level.
///
/// A binary land/water mask traced at level 0.5 yields the boundary
/// running halfway between land and water cells. Contours are returned in
/// the scan order of their first traced segment. Windows touching a
/// no-data cell are skipped, so contours break at no-data regions.
pub fn find_contours<T: RasterElement>(
    raster: &Raster<T>,
    level: f64,
    saddle: SaddleConnect,
) -> Vec<Contour> {
    let (rows, cols) = raster.shape();
    if rows < 2 || cols < 2 {
        return Vec::new();
    }

    let nodata = raster.nodata();
    let grid: Array2<f64> = raster.data().mapv(|v| {
        if v.is_nodata(nodata) {
            f64::NAN
        } else {
            v.to_f64().unwrap_or(f64::NAN)
        }
    });

    let mut segments: Vec<([f64; 2], [f64; 2])> = Vec::new();
    for r0 in 0..rows - 1 {
        for c0 in 0..cols - 1 {
            let ul = grid[[r0, c0]];
            let ur = grid[[r0, c0 + 1]];
            let ll = grid[[r0 + 1, c0]];
            let lr = grid[[r0 + 1, c0 + 1]];
            if ul.is_nan() || ur.is_nan() || ll.is_nan() || lr.is_nan() {
                continue;
            }

            let case = (ul > level) as u8
                | ((ur > level) as u8) << 1
                | ((ll > level) as u8) << 2
                | ((lr > level) as u8) << 3;
            if case == 0 || case == 15 {
                continue;
            }

            let r = r0 as f64;
            let c = c0 as f64;
            let top = [r, c + fraction(ul, ur, level)];
            let bottom = [r + 1.0, c + fraction(ll, lr, level)];
            let left = [r + fraction(ul, ll, level), c];
            let right = [r + fraction(ur, lr, level), c + 1.0];

            match case {
                1 => segments.push((top, left)),
                2 => segments.push((right, top)),
                3 => segments.push((right, left)),
                4 => segments.push((left, bottom)),
                5 => segments.push((top, bottom)),
                6 => match saddle {
                    SaddleConnect::High => {
                        segments.push((left, top));
                        segments.push((right, bottom));
                    }
                    SaddleConnect::Low => {
                        segments.push((right, top));
                        segments.push((left, bottom));
                    }
                },
                7 => segments.push((right, bottom)),
                8 => segments.push((bottom, right)),
                9 => match saddle {
                    SaddleConnect::High => {
                        segments.push((top, right));
                        segments.push((bottom, left));
                    }
                    SaddleConnect::Low => {
                        segments.push((top, left));
                        segments.push((bottom, right));
                    }
                },
                10 => segments.push((bottom, top)),
                11 => segments.push((bottom, left)),
                12 => segments.push((left, right)),
                13 => segments.push((top, right)),
                14 => segments.push((left, top)),
                _ => unreachable!(),
            }
        }
    }

    assemble(segments)
}

/// Position of the level crossing between two cell values, in [0, 1]
fn fraction(from: f64, to: f64, level: f64) -> f64 {
    if to == from {
        return 0.0;
    }
    (level - from) / (to - from)
}

type PointKey = (u64, u64);

fn key(point: [f64; 2]) -> PointKey {
    // Crossing points are computed from the same inputs wherever two
    // windows share an edge, so bit-exact equality is safe here.
    (point[0].to_bits(), point[1].to_bits())
}

/// Stitch directed segments into polylines.
///
/// Each segment either extends an existing polyline at one end, joins two
/// polylines, closes a ring, or starts a new polyline. Joins keep the
/// index of the earlier polyline so output order follows trace order.
fn assemble(segments: Vec<([f64; 2], [f64; 2])>) -> Vec<Contour> {
    let mut contours: BTreeMap<usize, VecDeque<[f64; 2]>> = BTreeMap::new();
    let mut starts: HashMap<PointKey, usize> = HashMap::new();
    let mut ends: HashMap<PointKey, usize> = HashMap::new();
    let mut next_index = 0usize;

    for (from, to) in segments {
        if from == to {
            continue;
        }

        let tail = starts.remove(&key(to));
        let head = ends.remove(&key(from));

        match (tail, head) {
            (Some(t), Some(h)) if t == h => {
                // The segment closes a ring. Its endpoints stay out of the
                // maps so nothing attaches to the closed contour.
                contours.get_mut(&t).unwrap().push_back(to);
            }
            (Some(t), Some(h)) if t > h => {
                let tail = contours.remove(&t).unwrap();
                let merged = contours.get_mut(&h).unwrap();
                merged.extend(tail);
                starts.insert(key(*merged.front().unwrap()), h);
                ends.insert(key(*merged.back().unwrap()), h);
            }
            (Some(t), Some(h)) => {
                let head = contours.remove(&h).unwrap();
                starts.remove(&key(*head.front().unwrap()));
                let merged = contours.get_mut(&t).unwrap();
                for point in head.into_iter().rev() {
                    merged.push_front(point);
                }
                starts.insert(key(*merged.front().unwrap()), t);
                ends.insert(key(*merged.back().unwrap()), t);
            }
            (Some(t), None) => {
                let contour = contours.get_mut(&t).unwrap();
                contour.push_front(from);
                starts.insert(key(from), t);
            }
            (None, Some(h)) => {
                let contour = contours.get_mut(&h).unwrap();
                contour.push_back(to);
                ends.insert(key(to), h);
            }
            (None, None) => {
                contours.insert(next_index, VecDeque::from([from, to]));
                starts.insert(key(from), next_index);
                ends.insert(key(to), next_index);
                next_index += 1;
            }
        }
    }

    contours
        .into_values()
        .map(|points| {
            Contour::new(
                points
                    .into_iter()
                    .map(|[row, col]| PixelPoint::new(row, col))
                    .collect(),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use shorewatch_core::{LAND, WATER};

    fn make_mask(rows: usize, cols: usize, water_cells: &[(usize, usize)]) -> Raster<u8> {
        let mut mask = Raster::filled(rows, cols, LAND);
        for &(r, c) in water_cells {
            mask.set(r, c, WATER).unwrap();
        }
        mask
    }

    fn points_of(contour: &Contour) -> Vec<(f64, f64)> {
        contour.points().iter().map(|p| (p.row, p.col)).collect()
    }

    #[test]
    fn test_single_cell_closed_ring() {
        let mask = make_mask(3, 3, &[(1, 1)]);
        let contours = find_contours(&mask, 0.5, SaddleConnect::Low);

        assert_eq!(contours.len(), 1);
        assert!(contours[0].is_closed());
        assert_eq!(
            points_of(&contours[0]),
            vec![(1.5, 1.0), (1.0, 0.5), (0.5, 1.0), (1.0, 1.5), (1.5, 1.0)]
        );
    }

    #[test]
    fn test_vertical_split_open_line() {
        // Land in the left two columns, water in the right two: one open
        // contour along column 1.5 spanning the full height.
        let mut mask = Raster::filled(4, 4, LAND);
        for r in 0..4 {
            for c in 2..4 {
                mask.set(r, c, WATER).unwrap();
            }
        }

        let contours = find_contours(&mask, 0.5, SaddleConnect::Low);
        assert_eq!(contours.len(), 1);
        assert!(!contours[0].is_closed());
        assert_eq!(
            points_of(&contours[0]),
            vec![(3.0, 1.5), (2.0, 1.5), (1.0, 1.5), (0.0, 1.5)]
        );
    }

    #[test]
    fn test_saddle_low_and_high() {
        // Checkerboard corner values form the ambiguous case.
        let mask = Raster::from_vec(vec![WATER, LAND, LAND, WATER], 2, 2).unwrap();

        let low = find_contours(&mask, 0.5, SaddleConnect::Low);
        assert_eq!(low.len(), 2);
        assert_eq!(points_of(&low[0]), vec![(0.0, 0.5), (0.5, 0.0)]);
        assert_eq!(points_of(&low[1]), vec![(1.0, 0.5), (0.5, 1.0)]);

        let high = find_contours(&mask, 0.5, SaddleConnect::High);
        assert_eq!(high.len(), 2);
        assert_eq!(points_of(&high[0]), vec![(0.0, 0.5), (0.5, 1.0)]);
        assert_eq!(points_of(&high[1]), vec![(1.0, 0.5), (0.5, 0.0)]);
    }

    #[test]
    fn test_crossing_is_interpolated() {
        // Values 0 and 10 traced at 2.5 put the crossing a quarter of the
        // way along the edge.
        let raster = Raster::from_vec(vec![0.0, 10.0, 0.0, 10.0], 2, 2).unwrap();
        let contours = find_contours(&raster, 2.5, SaddleConnect::Low);

        assert_eq!(contours.len(), 1);
        for point in contours[0].points() {
            assert_relative_eq!(point.col, 0.25);
        }
    }

    #[test]
    fn test_uniform_mask_has_no_contours() {
        let land = Raster::filled(4, 4, LAND);
        assert!(find_contours(&land, 0.5, SaddleConnect::Low).is_empty());

        let water = Raster::filled(4, 4, WATER);
        assert!(find_contours(&water, 0.5, SaddleConnect::Low).is_empty());
    }

    #[test]
    fn test_nodata_window_is_skipped() {
        let mut raster = Raster::from_vec(vec![0.0, 1.0, 0.0, 1.0], 2, 2).unwrap();
        raster.set(0, 0, f64::NAN).unwrap();
        assert!(find_contours(&raster, 0.5, SaddleConnect::Low).is_empty());
    }

    #[test]
    fn test_too_small_raster() {
        let mask = make_mask(1, 5, &[(0, 2)]);
        assert!(find_contours(&mask, 0.5, SaddleConnect::Low).is_empty());
    }

    #[test]
    fn test_two_islands_trace_in_scan_order() {
        let mask = make_mask(5, 7, &[(1, 1), (3, 5)]);
        let contours = find_contours(&mask, 0.5, SaddleConnect::Low);

        assert_eq!(contours.len(), 2);
        assert!(contours.iter().all(|c| c.is_closed()));
        // The island nearer the top-left is traced first.
        assert!(contours[0].points()[0].row < contours[1].points()[0].row);
    }
}
