use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// a discretized (column, row) position on the trip grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridCoord {
    pub column: i64,
    pub row: i64,
}

impl GridCoord {
    pub fn new(column: i64, row: i64) -> Self {
        Self { column, row }
    }
}

impl Display for GridCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{},{}]", self.column, self.row)
    }
}

/// size of the discretization grid, `width` columns by `height` rows.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridDimensions {
    pub width: i64,
    pub height: i64,
}

impl Default for GridDimensions {
    fn default() -> Self {
        Self {
            width: 100,
            height: 75,
        }
    }
}

impl GridDimensions {
    pub fn new(width: i64, height: i64) -> Self {
        Self { width, height }
    }

    /// cell index of a grid coordinate, `width * row + column`.
    ///
    /// the height does not take part in the index. coordinates outside of the
    /// grid are not rejected, so indices are only unique for coordinates
    /// where [GridDimensions::contains] holds. returns `None` if the index
    /// does not fit in an `i64`.
    pub fn cell_index(&self, coord: &GridCoord) -> Option<i64> {
        self.width
            .checked_mul(coord.row)
            .and_then(|offset| offset.checked_add(coord.column))
    }

    /// true if `0 <= column < width` and `0 <= row < height`.
    pub fn contains(&self, coord: &GridCoord) -> bool {
        (0..self.width).contains(&coord.column) && (0..self.height).contains(&coord.row)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_cell_index() {
        let grid = GridDimensions::default();
        assert_eq!(grid.cell_index(&GridCoord::new(5, 2)), Some(205));
        assert_eq!(grid.cell_index(&GridCoord::new(7, 3)), Some(307));
        assert_eq!(grid.cell_index(&GridCoord::new(0, 0)), Some(0));
        assert_eq!(grid.cell_index(&GridCoord::new(99, 74)), Some(7499));
    }

    #[test]
    fn test_cell_index_ignores_height() {
        let short = GridDimensions::new(100, 1);
        let tall = GridDimensions::new(100, 1000);
        let coord = GridCoord::new(12, 40);
        assert_eq!(short.cell_index(&coord), tall.cell_index(&coord));
    }

    #[test]
    fn test_out_of_range_is_not_rejected() {
        let grid = GridDimensions::default();
        // (100, 0) collides with (0, 1) once outside the grid
        let outside = GridCoord::new(100, 0);
        assert!(!grid.contains(&outside));
        assert_eq!(
            grid.cell_index(&outside),
            grid.cell_index(&GridCoord::new(0, 1))
        );
        assert_eq!(grid.cell_index(&GridCoord::new(-1, 0)), Some(-1));
    }

    #[test]
    fn test_cell_index_overflow() {
        let grid = GridDimensions::default();
        assert_eq!(grid.cell_index(&GridCoord::new(0, 100_000_000_000_000_000)), None);
        assert_eq!(grid.cell_index(&GridCoord::new(i64::MAX, 1)), None);
        assert_eq!(grid.cell_index(&GridCoord::new(i64::MIN, -1)), None);
        assert_eq!(
            grid.cell_index(&GridCoord::new(7, 92_233_720_368_547_758)),
            Some(i64::MAX)
        );
    }

    #[test]
    fn test_contains() {
        let grid = GridDimensions::default();
        assert!(grid.contains(&GridCoord::new(0, 0)));
        assert!(grid.contains(&GridCoord::new(99, 74)));
        assert!(!grid.contains(&GridCoord::new(99, 75)));
        assert!(!grid.contains(&GridCoord::new(0, -1)));
    }
}
