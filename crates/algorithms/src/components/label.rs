//! Connected-component labeling
//!
//! Flood-fill labeling of all connected regions of one class in a binary
//! mask. Labels are assigned in row-major scan order of each region's
//! first cell, so numbering is deterministic for a given mask.

use shorewatch_core::{Algorithm, Connectivity, Error, Raster, Result, WATER};
use std::collections::VecDeque;

/// Parameters for component labeling
#[derive(Debug, Clone)]
pub struct LabelComponentsParams {
    /// Class value whose regions are labeled
    pub target: u8,
    /// Neighbor relation
    pub connectivity: Connectivity,
}

impl Default for LabelComponentsParams {
    fn default() -> Self {
        Self {
            target: WATER,
            connectivity: Connectivity::Four,
        }
    }
}

/// Component labeling algorithm
#[derive(Debug, Clone, Default)]
pub struct LabelComponents;

impl Algorithm for LabelComponents {
    type Input = Raster<u8>;
    type Output = LabeledComponents;
    type Params = LabelComponentsParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "LabelComponents"
    }

    fn description(&self) -> &'static str {
        "Label connected regions of one class in a binary mask"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        label_components(&input, params.target, params.connectivity)
    }
}

/// Labeled connected regions of one class of a mask
#[derive(Debug, Clone)]
pub struct LabeledComponents {
    /// 0 where the cell is not the target class, 1..=count otherwise
    pub labels: Raster<u32>,
    /// Number of components found
    pub count: u32,
    /// Cell count per component, indexed by label - 1
    pub sizes: Vec<usize>,
}

impl LabeledComponents {
    /// Size in cells of the component with the given label
    pub fn size_of(&self, label: u32) -> Option<usize> {
        if label == 0 {
            return None;
        }
        self.sizes.get(label as usize - 1).copied()
    }
}

/// Label the connected regions of `target` cells in a binary mask.
///
/// Cells of any other value become background (label 0). Labels start at 1
/// and follow the row-major position of each region's first cell.
pub fn label_components(
    mask: &Raster<u8>,
    target: u8,
    connectivity: Connectivity,
) -> Result<LabeledComponents> {
    let (rows, cols) = mask.shape();
    let mut labels: Raster<u32> = mask.with_same_meta(rows, cols);
    let mut sizes: Vec<usize> = Vec::new();
    let mut queue: VecDeque<(usize, usize)> = VecDeque::new();
    let mut next_label = 0u32;

    for row in 0..rows {
        for col in 0..cols {
            if unsafe { mask.get_unchecked(row, col) } != target
                || unsafe { labels.get_unchecked(row, col) } != 0
            {
                continue;
            }

            next_label += 1;
            let mut size = 0usize;
            unsafe { labels.set_unchecked(row, col, next_label) };
            queue.push_back((row, col));

            while let Some((r, c)) = queue.pop_front() {
                size += 1;
                for (nr, nc) in connectivity.neighbors(r, c, rows, cols) {
                    if unsafe { mask.get_unchecked(nr, nc) } == target
                        && unsafe { labels.get_unchecked(nr, nc) } == 0
                    {
                        unsafe { labels.set_unchecked(nr, nc, next_label) };
                        queue.push_back((nr, nc));
                    }
                }
            }

            sizes.push(size);
        }
    }

    Ok(LabeledComponents {
        labels,
        count: next_label,
        sizes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use shorewatch_core::LAND;

    fn make_mask(rows: usize, cols: usize, water_cells: &[(usize, usize)]) -> Raster<u8> {
        let mut mask = Raster::filled(rows, cols, LAND);
        for &(r, c) in water_cells {
            mask.set(r, c, WATER).unwrap();
        }
        mask
    }

    #[test]
    fn test_two_separate_blobs() {
        let mask = make_mask(5, 5, &[(0, 0), (0, 1), (4, 3), (4, 4)]);
        let result = label_components(&mask, WATER, Connectivity::Four).unwrap();

        assert_eq!(result.count, 2);
        assert_eq!(result.sizes, vec![2, 2]);
        // Scan order: the top-left blob gets label 1
        assert_eq!(result.labels.get(0, 0).unwrap(), 1);
        assert_eq!(result.labels.get(0, 1).unwrap(), 1);
        assert_eq!(result.labels.get(4, 3).unwrap(), 2);
        assert_eq!(result.labels.get(2, 2).unwrap(), 0);
    }

    #[test]
    fn test_diagonal_cells_split_under_four_connectivity() {
        let mask = make_mask(4, 4, &[(1, 1), (2, 2)]);

        let four = label_components(&mask, WATER, Connectivity::Four).unwrap();
        assert_eq!(four.count, 2);

        let eight = label_components(&mask, WATER, Connectivity::Eight).unwrap();
        assert_eq!(eight.count, 1);
        assert_eq!(eight.sizes, vec![2]);
    }

    #[test]
    fn test_label_land_regions() {
        // A water frame around a single land cell: one land component.
        let mut mask = Raster::filled(3, 3, WATER);
        mask.set(1, 1, LAND).unwrap();

        let result = label_components(&mask, LAND, Connectivity::Four).unwrap();
        assert_eq!(result.count, 1);
        assert_eq!(result.sizes, vec![1]);
        assert_eq!(result.labels.get(1, 1).unwrap(), 1);
        assert_eq!(result.labels.get(0, 0).unwrap(), 0);
    }

    #[test]
    fn test_size_of() {
        let mask = make_mask(5, 5, &[(0, 0), (0, 1), (0, 2)]);
        let result = label_components(&mask, WATER, Connectivity::Four).unwrap();
        assert_eq!(result.size_of(1), Some(3));
        assert_eq!(result.size_of(0), None);
        assert_eq!(result.size_of(9), None);
    }

    #[test]
    fn test_empty_mask() {
        let mask = make_mask(4, 4, &[]);
        let result = label_components(&mask, WATER, Connectivity::Four).unwrap();
        assert_eq!(result.count, 0);
        assert!(result.sizes.is_empty());
    }
}
