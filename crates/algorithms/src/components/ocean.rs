//! Ocean identification
//!
//! Separates open sea from inland water. A water body counts as ocean when
//! it reaches the raster border; lakes, rivers and retained ponds do not,
//! and are dropped from the mask so the traced coastline follows the sea
//! edge only.

use shorewatch_core::{Algorithm, Connectivity, Error, Raster, Result, LAND, WATER};

use super::label::label_components;

/// Parameters for ocean identification
#[derive(Debug, Clone, Default)]
pub struct IdentifyOceanParams {
    /// Neighbor relation used when labeling water bodies
    pub connectivity: Connectivity,
}

/// Ocean identification algorithm
#[derive(Debug, Clone, Default)]
pub struct IdentifyOcean;

impl Algorithm for IdentifyOcean {
    type Input = Raster<u8>;
    type Output = OceanMask;
    type Params = IdentifyOceanParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "IdentifyOcean"
    }

    fn description(&self) -> &'static str {
        "Keep only water bodies connected to the raster border"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        identify_ocean(&input, params.connectivity)
    }
}

/// Water restricted to border-touching bodies
#[derive(Debug, Clone)]
pub struct OceanMask {
    /// WATER where the cell belongs to a border-touching water body
    pub mask: Raster<u8>,
    /// Component labels classified as ocean, ascending
    pub labels: Vec<u32>,
}

impl OceanMask {
    /// True when no water body reaches the border
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Keep only the water bodies that touch the raster border.
///
/// Every other cell of the returned mask is [`LAND`]. The scene is assumed
/// to extend past the raster on the seaward side, so any water body cut by
/// the border is open sea.
pub fn identify_ocean(mask: &Raster<u8>, connectivity: Connectivity) -> Result<OceanMask> {
    let (rows, cols) = mask.shape();
    if rows == 0 || cols == 0 {
        return Ok(OceanMask {
            mask: mask.like(LAND),
            labels: Vec::new(),
        });
    }

    let labeled = label_components(mask, WATER, connectivity)?;
    let mut border = vec![false; labeled.count as usize + 1];
    for col in 0..cols {
        border[unsafe { labeled.labels.get_unchecked(0, col) } as usize] = true;
        border[unsafe { labeled.labels.get_unchecked(rows - 1, col) } as usize] = true;
    }
    for row in 0..rows {
        border[unsafe { labeled.labels.get_unchecked(row, 0) } as usize] = true;
        border[unsafe { labeled.labels.get_unchecked(row, cols - 1) } as usize] = true;
    }
    border[0] = false;

    let mut ocean = mask.like(LAND);
    for ((row, col), &label) in labeled.labels.data().indexed_iter() {
        if border[label as usize] {
            unsafe { ocean.set_unchecked(row, col, WATER) };
        }
    }

    let labels: Vec<u32> = (1..=labeled.count)
        .filter(|&label| border[label as usize])
        .collect();

    Ok(OceanMask {
        mask: ocean,
        labels,
    })
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
    fn test_sea_kept_lake_dropped() {
        // Water in the rightmost two columns reaches the border; the single
        // cell at (2, 1) is an inland lake.
        let mut mask = Raster::filled(5, 5, LAND);
        for r in 0..5 {
            for c in 3..5 {
                mask.set(r, c, WATER).unwrap();
            }
        }
        mask.set(2, 1, WATER).unwrap();

        let ocean = identify_ocean(&mask, Connectivity::Four).unwrap();
        assert_eq!(ocean.labels, vec![1]);
        assert_eq!(ocean.mask.get(2, 1).unwrap(), LAND);
        assert_eq!(ocean.mask.get(2, 3).unwrap(), WATER);
        assert_eq!(ocean.mask.count_eq(WATER), 10);
    }

    #[test]
    fn test_island_scene_is_all_ocean() {
        // All water except one land cell: the sea surrounds the island.
        let mut mask = Raster::filled(10, 10, WATER);
        mask.set(5, 5, LAND).unwrap();

        let ocean = identify_ocean(&mask, Connectivity::Four).unwrap();
        assert_eq!(ocean.labels, vec![1]);
        assert_eq!(ocean.mask.count_eq(WATER), 99);
        assert_eq!(ocean.mask.get(5, 5).unwrap(), LAND);
    }

    #[test]
    fn test_landlocked_scene_has_no_ocean() {
        let mask = make_mask(5, 5, &[(2, 2), (2, 3)]);
        let ocean = identify_ocean(&mask, Connectivity::Four).unwrap();
        assert!(ocean.is_empty());
        assert_eq!(ocean.mask.count_eq(WATER), 0);
    }

    #[test]
    fn test_corner_cell_counts_as_border() {
        let mask = make_mask(4, 4, &[(3, 3)]);
        let ocean = identify_ocean(&mask, Connectivity::Four).unwrap();
        assert_eq!(ocean.labels, vec![1]);
        assert_eq!(ocean.mask.get(3, 3).unwrap(), WATER);
    }

    #[test]
    fn test_two_seas_both_kept() {
        // Water on the left and right edges, separated by land.
        let mut mask = Raster::filled(3, 5, LAND);
        for r in 0..3 {
            mask.set(r, 0, WATER).unwrap();
            mask.set(r, 4, WATER).unwrap();
        }

        let ocean = identify_ocean(&mask, Connectivity::Four).unwrap();
        assert_eq!(ocean.labels, vec![1, 2]);
        assert_eq!(ocean.mask.count_eq(WATER), 6);
    }

    #[test]
    fn test_empty_raster() {
        let mask: Raster<u8> = Raster::new(0, 0);
        let ocean = identify_ocean(&mask, Connectivity::Four).unwrap();
        assert!(ocean.is_empty());
    }
}
