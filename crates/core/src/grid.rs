//! Grid module - logical occupancy matrix and row clearing
//!
//! The grid is rebuilt from the fixed shapes' blocks whenever rows need to be
//! checked. Uses a flat row-major array like the rest of the board code.
//! Coordinates: (x, y) where x is the column and y the row, (0, 0) top-left.

use crate::shape::Shape;
use crate::types::BLOCK_SIZE;

/// Occupancy matrix: 1 where a block sits, 0 elsewhere
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<u8>,
}

impl Grid {
    /// Create an empty grid
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![0; width * height],
        }
    }

    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Get cell at (x, y); None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<u8> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Mark (x, y) as occupied. Returns false if out of bounds.
    pub fn mark(&mut self, x: i32, y: i32) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = 1;
                true
            }
            None => false,
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= self.height {
            return false;
        }
        let start = y * self.width;
        self.cells[start..start + self.width].iter().all(|&c| c == 1)
    }

    /// Rows as slices, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.cells.chunks(self.width.max(1))
    }
}

/// Build a `height x width` grid with a 1 at each logical position.
///
/// Positions outside the grid (blocks still above the canvas) are ignored.
pub fn construct_grid(
    width: usize,
    height: usize,
    positions: impl IntoIterator<Item = (i32, i32)>,
) -> Grid {
    let mut grid = Grid::new(width, height);
    for (x, y) in positions {
        grid.mark(x, y);
    }
    grid
}

/// Indices of every fully occupied row, top to bottom
pub fn find_full_rows(grid: &Grid) -> Vec<usize> {
    (0..grid.height()).filter(|&y| grid.is_row_full(y)).collect()
}

/// Outcome of clearing the full rows of a board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineClear {
    /// Surviving fixed shapes, in their original order
    pub shapes: Vec<Shape>,
    /// Cleared rows as pixel y values, top to bottom
    pub rows: Vec<i32>,
}

/// Clear every full row of `shapes` and let the blocks above fall.
///
/// Shapes left without blocks are dropped.
pub fn clear_full_rows(shapes: &[Shape], width: usize, height: usize) -> LineClear {
    let grid = construct_grid(
        width,
        height,
        shapes
            .iter()
            .flat_map(|s| s.blocks().iter().map(|b| b.cell())),
    );
    let rows: Vec<i32> = find_full_rows(&grid)
        .into_iter()
        .map(|row| row as i32 * BLOCK_SIZE)
        .collect();

    if rows.is_empty() {
        return LineClear {
            shapes: shapes.to_vec(),
            rows,
        };
    }

    let shapes = shapes.iter().filter_map(|s| s.clear_rows(&rows)).collect();
    LineClear { shapes, rows }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_index_calculation() {
        let grid = Grid::new(10, 20);
        assert_eq!(grid.index(0, 0), Some(0));
        assert_eq!(grid.index(9, 0), Some(9));
        assert_eq!(grid.index(0, 1), Some(10));
        assert_eq!(grid.index(9, 19), Some(199));
        assert_eq!(grid.index(-1, 0), None);
        assert_eq!(grid.index(10, 0), None);
        assert_eq!(grid.index(0, 20), None);
    }

    #[test]
    fn test_construct_grid_marks_positions() {
        let grid = construct_grid(3, 2, [(0, 0), (2, 1), (5, 5), (1, -1)]);
        let rows: Vec<&[u8]> = grid.rows().collect();
        assert_eq!(rows, vec![&[1u8, 0, 0][..], &[0u8, 0, 1][..]]);
    }

    #[test]
    fn test_find_full_rows_in_order() {
        let mut positions = Vec::new();
        for x in 0..4 {
            positions.push((x, 1));
            positions.push((x, 3));
        }
        positions.push((0, 2));
        let grid = construct_grid(4, 4, positions);
        assert_eq!(find_full_rows(&grid), vec![1, 3]);
    }

    #[test]
    fn test_empty_grid_has_no_full_rows() {
        assert!(find_full_rows(&Grid::new(10, 20)).is_empty());
    }
}
