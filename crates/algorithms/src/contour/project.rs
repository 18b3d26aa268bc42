//! Pixel-space contours to georeferenced coastlines

use shorewatch_core::{Coastline, Contour, GeoTransform};

/// Project a traced contour into map coordinates.
///
/// Contour points are fractional (row, col) positions; each is shifted to
/// its cell-center offset and pushed through the affine transform, so a
/// point on a cell boundary lands halfway between the two cell centers.
pub fn project_contour(contour: &Contour, transform: &GeoTransform) -> Coastline {
    let points = contour
        .points()
        .iter()
        .map(|p| transform.subpixel_to_geo(p.col, p.row))
        .collect();
    Coastline::from_xy(points)
}

/// Project every contour of a trace with the same transform.
pub fn project_contours(contours: &[Contour], transform: &GeoTransform) -> Vec<Coastline> {
    contours
        .iter()
        .map(|contour| project_contour(contour, transform))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use shorewatch_core::PixelPoint;

    #[test]
    fn test_project_applies_center_offset() {
        let transform = GeoTransform::new(100.0, 200.0, 10.0, -10.0);
        let contour = Contour::new(vec![
            PixelPoint::new(1.5, 2.0),
            PixelPoint::new(0.0, 0.0),
        ]);

        let coastline = project_contour(&contour, &transform);
        let coords = coastline.coords();
        assert_eq!(coords.len(), 2);
        assert_relative_eq!(coords[0].x, 125.0);
        assert_relative_eq!(coords[0].y, 180.0);
        assert_relative_eq!(coords[1].x, 105.0);
        assert_relative_eq!(coords[1].y, 195.0);
    }

    #[test]
    fn test_project_many() {
        let transform = GeoTransform::new(0.0, 0.0, 1.0, -1.0);
        let contours = vec![
            Contour::new(vec![PixelPoint::new(0.0, 0.0)]),
            Contour::new(vec![PixelPoint::new(1.0, 1.0), PixelPoint::new(2.0, 2.0)]),
        ];

        let coastlines = project_contours(&contours, &transform);
        assert_eq!(coastlines.len(), 2);
        assert_eq!(coastlines[0].len(), 1);
        assert_eq!(coastlines[1].len(), 2);
        assert_relative_eq!(coastlines[1].coords()[0].x, 1.5);
        assert_relative_eq!(coastlines[1].coords()[0].y, -1.5);
    }
}
