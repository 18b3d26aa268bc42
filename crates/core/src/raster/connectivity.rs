//! Pixel connectivity for component analysis

/// Defines which cells count as neighbors during connected-component labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Connectivity {
    /// Edge-adjacent neighbors only (von Neumann)
    #[default]
    Four,
    /// Edge- and corner-adjacent neighbors (Moore)
    Eight,
}

impl Connectivity {
    /// Relative (row, col) offsets of the neighbors, in raster scan order
    pub fn offsets(&self) -> &'static [(isize, isize)] {
        match self {
            Connectivity::Four => &[(-1, 0), (0, -1), (0, 1), (1, 0)],
            Connectivity::Eight => &[
                (-1, -1),
                (-1, 0),
                (-1, 1),
                (0, -1),
                (0, 1),
                (1, -1),
                (1, 0),
                (1, 1),
            ],
        }
    }

    /// Iterate over the in-bounds neighbors of `(row, col)` in a grid
    /// of `rows` x `cols` cells.
    pub fn neighbors(
        &self,
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    ) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.offsets().iter().filter_map(move |&(dr, dc)| {
            let r = row as isize + dr;
            let c = col as isize + dc;
            if r >= 0 && r < rows as isize && c >= 0 && c < cols as isize {
                Some((r as usize, c as usize))
            } else {
                None
            }
        })
    }
}
