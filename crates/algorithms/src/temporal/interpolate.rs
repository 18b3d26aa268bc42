//! Arc-length resampling
//!
//! Group averaging needs every member line to carry the same number of
//! points regardless of original vertex density. Lines are reparameterized
//! by cumulative chord length and sampled at evenly spaced targets with
//! per-axis linear interpolation.

use geo::{Coord, Distance, Euclidean, LineString, Point};
use shorewatch_core::{Coastline, Error, Result};

/// Resample a polyline to `samples` points spaced evenly along its length.
///
/// The first and last output points coincide with the input endpoints. A
/// polyline with fewer than 2 points has no length to parameterize and is
/// returned unchanged.
pub fn interpolate_line(points: &[Coord<f64>], samples: usize) -> Result<Vec<Coord<f64>>> {
    if samples == 0 {
        return Err(Error::InvalidParameter {
            name: "samples",
            value: samples.to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
    if points.len() < 2 {
        return Ok(points.to_vec());
    }

    // Cumulative chord length at every vertex.
    let mut knots = Vec::with_capacity(points.len());
    knots.push(0.0);
    let mut total = 0.0;
    for pair in points.windows(2) {
        total += Euclidean::distance(Point::from(pair[0]), Point::from(pair[1]));
        knots.push(total);
    }

    // Every vertex coincident: nothing to parameterize.
    if total == 0.0 {
        return Ok(vec![points[0]; samples]);
    }

    Ok(linspace(total, samples)
        .into_iter()
        .map(|t| sample_at(t, &knots, points))
        .collect())
}

/// Resample a coastline to `samples` evenly spaced points.
pub fn resample_coastline(coastline: &Coastline, samples: usize) -> Result<Coastline> {
    let points = interpolate_line(coastline.coords(), samples)?;
    Ok(Coastline::new(LineString::new(points)))
}

/// `n` evenly spaced values from 0 to `end` inclusive.
///
/// The final value is pinned to `end` exactly rather than accumulated, so
/// endpoint lookups do not drift.
pub(crate) fn linspace(end: f64, n: usize) -> Vec<f64> {
    if n == 1 {
        return vec![0.0];
    }
    let step = end / (n - 1) as f64;
    let mut values: Vec<f64> = (0..n).map(|i| step * i as f64).collect();
    values[n - 1] = end;
    values
}

/// Linear interpolation of the vertex sequence at arc-length `t`.
///
/// Targets at or past the ends clamp to the end vertices. Within a run of
/// duplicate knots the later vertex wins.
fn sample_at(t: f64, knots: &[f64], points: &[Coord<f64>]) -> Coord<f64> {
    let hi = knots.partition_point(|&k| k <= t);
    if hi == 0 {
        return points[0];
    }
    if hi == knots.len() {
        return points[points.len() - 1];
    }
    let lo = hi - 1;
    // knots[lo] <= t < knots[hi], so the span is strictly positive.
    let f = (t - knots[lo]) / (knots[hi] - knots[lo]);
    Coord {
        x: points[lo].x + (points[hi].x - points[lo].x) * f,
        y: points[lo].y + (points[hi].y - points[lo].y) * f,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn coords(points: &[(f64, f64)]) -> Vec<Coord<f64>> {
        points.iter().map(|&(x, y)| Coord { x, y }).collect()
    }

    #[test]
    fn test_straight_line_resampling() {
        let line = coords(&[(0.0, 0.0), (10.0, 0.0)]);
        let resampled = interpolate_line(&line, 5).unwrap();

        assert_eq!(resampled.len(), 5);
        for (i, expected_x) in [0.0, 2.5, 5.0, 7.5, 10.0].iter().enumerate() {
            assert_relative_eq!(resampled[i].x, expected_x);
            assert_relative_eq!(resampled[i].y, 0.0);
        }
    }

    #[test]
    fn test_corner_line_keeps_endpoints() {
        // An L of total length 8: targets fall at 0, 2, 4, 6, 8.
        let line = coords(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0)]);
        let resampled = interpolate_line(&line, 5).unwrap();

        assert_eq!(resampled.len(), 5);
        assert_relative_eq!(resampled[0].x, 0.0);
        assert_relative_eq!(resampled[0].y, 0.0);
        assert_relative_eq!(resampled[1].x, 2.0);
        assert_relative_eq!(resampled[2].x, 4.0);
        assert_relative_eq!(resampled[2].y, 0.0);
        assert_relative_eq!(resampled[3].y, 2.0);
        assert_relative_eq!(resampled[4].x, 4.0);
        assert_relative_eq!(resampled[4].y, 4.0);
    }

    #[test]
    fn test_duplicate_vertex_is_skipped() {
        let line = coords(&[(0.0, 0.0), (5.0, 0.0), (5.0, 0.0), (10.0, 0.0)]);
        let resampled = interpolate_line(&line, 3).unwrap();

        assert_relative_eq!(resampled[0].x, 0.0);
        assert_relative_eq!(resampled[1].x, 5.0);
        assert_relative_eq!(resampled[2].x, 10.0);
    }

    #[test]
    fn test_short_input_returned_unchanged() {
        let empty: Vec<Coord<f64>> = Vec::new();
        assert!(interpolate_line(&empty, 5).unwrap().is_empty());

        let single = coords(&[(3.0, 7.0)]);
        let result = interpolate_line(&single, 5).unwrap();
        assert_eq!(result.len(), 1);
        assert_relative_eq!(result[0].x, 3.0);
    }

    #[test]
    fn test_coincident_vertices_repeat_the_point() {
        let line = coords(&[(2.0, 2.0), (2.0, 2.0), (2.0, 2.0)]);
        let resampled = interpolate_line(&line, 4).unwrap();
        assert_eq!(resampled.len(), 4);
        for point in resampled {
            assert_relative_eq!(point.x, 2.0);
            assert_relative_eq!(point.y, 2.0);
        }
    }

    #[test]
    fn test_zero_samples_rejected() {
        let line = coords(&[(0.0, 0.0), (1.0, 1.0)]);
        assert!(matches!(
            interpolate_line(&line, 0),
            Err(Error::InvalidParameter { name: "samples", .. })
        ));
    }

    #[test]
    fn test_single_sample_is_the_start() {
        let line = coords(&[(1.0, 2.0), (9.0, 2.0)]);
        let resampled = interpolate_line(&line, 1).unwrap();
        assert_eq!(resampled.len(), 1);
        assert_relative_eq!(resampled[0].x, 1.0);
    }

    #[test]
    fn test_resample_coastline() {
        let coastline = Coastline::from_xy(vec![(0.0, 0.0), (6.0, 8.0)]);
        let resampled = resample_coastline(&coastline, 3).unwrap();

        assert_eq!(resampled.len(), 3);
        let mid = resampled.coords()[1];
        assert_relative_eq!(mid.x, 3.0);
        assert_relative_eq!(mid.y, 4.0);
    }

    #[test]
    fn test_linspace_endpoint_is_exact() {
        let values = linspace(0.3, 7);
        assert_eq!(values.len(), 7);
        assert_eq!(values[0], 0.0);
        assert_eq!(values[6], 0.3);
    }
}
