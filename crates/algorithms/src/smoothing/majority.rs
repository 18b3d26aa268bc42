//! Majority (modal) smoothing for binary water masks
//!
//! Replaces each cell with the majority class of the square window
//! centered on it. Windows are clipped at the image border, so edge cells
//! vote over a smaller neighborhood instead of seeing padded values.

use crate::maybe_rayon::*;
use ndarray::Array2;
use shorewatch_core::{Algorithm, Error, Raster, Result, LAND, WATER};

/// Parameters for majority smoothing
#[derive(Debug, Clone)]
pub struct MajorityFilterParams {
    /// Square window edge length in cells, must be odd
    pub window_size: usize,
}

impl Default for MajorityFilterParams {
    fn default() -> Self {
        Self { window_size: 7 }
    }
}

/// Majority smoothing algorithm
#[derive(Debug, Clone, Default)]
pub struct MajorityFilter;

impl Algorithm for MajorityFilter {
    type Input = Raster<u8>;
    type Output = Raster<u8>;
    type Params = MajorityFilterParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "MajorityFilter"
    }

    fn description(&self) -> &'static str {
        "Majority vote over a square window, ties resolve to water"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        majority_filter(&input, params.window_size)
    }
}

/// Smooth a binary water mask with a majority vote.
///
/// Each output cell is the majority class of the `window_size` x
/// `window_size` window centered on it, with the window clipped at the
/// raster border. An exact tie becomes water, which keeps narrow channels
/// attached to the sea instead of silting them shut.
///
/// Returns a new raster; the input is untouched.
///
/// # Arguments
/// * `mask` - Binary water mask (LAND/WATER)
/// * `window_size` - Window edge length, odd and non-zero
pub fn majority_filter(mask: &Raster<u8>, window_size: usize) -> Result<Raster<u8>> {
    if window_size == 0 || window_size % 2 == 0 {
        return Err(Error::InvalidParameter {
            name: "window_size",
            value: window_size.to_string(),
            reason: "must be odd and non-zero".into(),
        });
    }

    let (rows, cols) = mask.shape();
    if rows == 0 || cols == 0 {
        return Ok(mask.clone());
    }

    let radius = (window_size / 2) as isize;

    let output_data: Vec<u8> = (0..rows)
        .into_par_iter()
        .flat_map(|row| {
            let mut row_data = vec![LAND; cols];

            for (col, out) in row_data.iter_mut().enumerate() {
                let r = row as isize;
                let c = col as isize;

                let r0 = (r - radius).max(0) as usize;
                let r1 = ((r + radius) as usize).min(rows - 1);
                let c0 = (c - radius).max(0) as usize;
                let c1 = ((c + radius) as usize).min(cols - 1);

                let mut water = 0usize;
                let mut total = 0usize;
                for wr in r0..=r1 {
                    for wc in c0..=c1 {
                        let v = unsafe { mask.get_unchecked(wr, wc) };
                        if v == WATER {
                            water += 1;
                        }
                        total += 1;
                    }
                }

                // Tie goes to water
                *out = if water * 2 >= total { WATER } else { LAND };
            }

            row_data
        })
        .collect();

    let mut output = mask.like(LAND);
    *output.data_mut() = Array2::from_shape_vec((rows, cols), output_data)
        .map_err(|e| Error::Other(e.to_string()))?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_mask(rows: usize, cols: usize, water_cells: &[(usize, usize)]) -> Raster<u8> {
        let mut mask = Raster::filled(rows, cols, LAND);
        for &(r, c) in water_cells {
            mask.set(r, c, WATER).unwrap();
        }
        mask
    }

    #[test]
    fn test_uniform_mask_unchanged() {
        let land = Raster::filled(9, 9, LAND);
        let result = majority_filter(&land, 7).unwrap();
        assert_eq!(result.count_eq(WATER), 0);

        let water = Raster::filled(9, 9, WATER);
        let result = majority_filter(&water, 7).unwrap();
        assert_eq!(result.count_eq(WATER), 81);
    }

    #[test]
    fn test_speckle_removed() {
        let mask = make_mask(9, 9, &[(4, 4)]);
        let result = majority_filter(&mask, 3).unwrap();
        assert_eq!(result.get(4, 4).unwrap(), LAND);
        assert_eq!(result.count_eq(WATER), 0);
    }

    #[test]
    fn test_tie_becomes_water() {
        // Corner cell with a 3x3 window sees a clipped 2x2 neighborhood.
        // Two water cells out of four is a tie, which must resolve to water.
        let mask = make_mask(5, 5, &[(0, 1), (1, 0)]);
        let result = majority_filter(&mask, 3).unwrap();
        assert_eq!(result.get(0, 0).unwrap(), WATER);
    }

    #[test]
    fn test_straight_boundary_is_stable() {
        // A clean half-water mask should survive smoothing untouched: every
        // window along the boundary is at worst tied, and ties go to water.
        let mut mask = Raster::new(8, 8);
        for r in 0..8 {
            for c in 4..8 {
                mask.set(r, c, WATER).unwrap();
            }
        }
        let result = majority_filter(&mask, 3).unwrap();
        for r in 0..8 {
            for c in 0..8 {
                assert_eq!(result.get(r, c).unwrap(), mask.get(r, c).unwrap());
            }
        }
    }

    #[test]
    fn test_input_untouched() {
        let mask = make_mask(9, 9, &[(4, 4)]);
        let _ = majority_filter(&mask, 3).unwrap();
        assert_eq!(mask.get(4, 4).unwrap(), WATER);
    }

    #[test]
    fn test_even_window_rejected() {
        let mask = make_mask(5, 5, &[]);
        assert!(majority_filter(&mask, 4).is_err());
        assert!(majority_filter(&mask, 0).is_err());
    }
}
