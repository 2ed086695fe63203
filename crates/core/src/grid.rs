//! Grid module - storage for locked cells
//!
//! The grid is 10 columns x 22 rows held in one flat array for cache locality
//! and zero allocation. Coordinates are (x, y) with x in 0..10 (left to right)
//! and y in 0..22 (top to bottom). Dimensions never change; only cell
//! contents do.

use arrayvec::ArrayVec;

use crate::types::{Cell, GRID_COLUMNS, GRID_ROWS};

/// Grid width as a usize
pub const COLUMNS: usize = GRID_COLUMNS as usize;

/// Grid height as a usize
pub const ROWS: usize = GRID_ROWS as usize;

/// Total number of cells on the grid
const GRID_SIZE: usize = COLUMNS * ROWS;

/// Row indices removed by one clear pass, top to bottom
pub type ClearedRows = ArrayVec<usize, ROWS>;

/// The locked-cell grid, row-major flat storage
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    /// Flat array of cells (y * COLUMNS + x)
    cells: [Cell; GRID_SIZE],
}

impl Grid {
    /// Create a new empty grid
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; GRID_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= GRID_COLUMNS as i8 || y < 0 || y >= GRID_ROWS as i8 {
            return None;
        }
        Some((y as usize) * COLUMNS + (x as usize))
    }

    pub fn columns(&self) -> u8 {
        GRID_COLUMNS
    }

    pub fn rows(&self) -> u8 {
        GRID_ROWS
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Whether (x, y) is inside the grid and filled
    pub fn is_filled(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Cell::Filled(_)))
    }

    /// One row as a slice of cells
    pub fn row(&self, y: usize) -> &[Cell] {
        let y = y.min(ROWS - 1);
        &self.cells[y * COLUMNS..(y + 1) * COLUMNS]
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        y < ROWS && self.row(y).iter().all(Cell::is_filled)
    }

    /// Remove row `y`: rows `0..y` shift down by one and row 0 becomes empty.
    ///
    /// Rows below `y` are untouched. Out-of-range rows are ignored.
    pub fn clear_row(&mut self, y: usize) {
        if y >= ROWS {
            return;
        }

        // copy_within handles the overlapping ranges
        for row in (1..=y).rev() {
            let src_start = (row - 1) * COLUMNS;
            self.cells
                .copy_within(src_start..src_start + COLUMNS, row * COLUMNS);
        }

        self.cells[..COLUMNS].fill(Cell::Empty);
    }

    /// Clear every full row, scanning top to bottom.
    ///
    /// Each full row is removed with [`Grid::clear_row`], which keeps the
    /// relative order of the remaining rows. Returns the cleared indices.
    pub fn clear_full_rows(&mut self) -> ClearedRows {
        let mut cleared = ClearedRows::new();
        for y in 0..ROWS {
            if self.is_row_full(y) {
                self.clear_row(y);
                cleared.push(y);
            }
        }
        cleared
    }

    /// Index of the first row from the top holding a filled cell,
    /// or None if the grid is empty
    pub fn top_occupied_row(&self) -> Option<usize> {
        (0..ROWS).find(|&y| self.row(y).iter().any(Cell::is_filled))
    }

    /// Number of filled cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_filled()).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Copy into a 2D array (row-major), for snapshots
    pub fn to_rows(&self) -> [[Cell; COLUMNS]; ROWS] {
        let mut out = [[Cell::Empty; COLUMNS]; ROWS];
        for (y, row) in out.iter_mut().enumerate() {
            row.copy_from_slice(self.row(y));
        }
        out
    }

    /// Clear the entire grid
    pub fn clear(&mut self) {
        self.cells.fill(Cell::Empty);
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Color;

    const RED: Color = Color::new("#FF5A5A");

    #[test]
    fn test_grid_index_calculation() {
        assert_eq!(Grid::index(0, 0), Some(0));
        assert_eq!(Grid::index(9, 0), Some(9));
        assert_eq!(Grid::index(0, 1), Some(10));
        assert_eq!(Grid::index(9, 21), Some(219));
        assert_eq!(Grid::index(-1, 0), None);
        assert_eq!(Grid::index(10, 0), None);
        assert_eq!(Grid::index(0, 22), None);
    }

    #[test]
    fn test_grid_flat_array() {
        let mut grid = Grid::new();
        grid.set(0, 0, Cell::Filled(RED));
        grid.set(5, 10, Cell::Filled(RED));

        assert!(grid.is_filled(0, 0));
        assert!(grid.is_filled(5, 10));
        assert_eq!(grid.cells[10 * 10 + 5], Cell::Filled(RED));
        assert_eq!(grid.filled_count(), 2);
    }

    #[test]
    fn test_clear_row_shifts_rows_above() {
        let mut grid = Grid::new();
        // Marker above the full row at y = 21
        grid.set(4, 19, Cell::Filled(RED));
        for x in 0..10 {
            grid.set(x, 21, Cell::Filled(RED));
        }

        let cleared = grid.clear_full_rows();
        assert_eq!(cleared.as_slice(), &[21]);
        assert!(grid.is_filled(4, 20));
        assert!(!grid.is_filled(4, 19));
        assert_eq!(grid.filled_count(), 1);
    }

    #[test]
    fn test_clear_non_adjacent_rows() {
        let mut grid = Grid::new();
        for x in 0..10 {
            grid.set(x, 21, Cell::Filled(RED));
            grid.set(x, 19, Cell::Filled(RED));
        }
        grid.set(0, 20, Cell::Filled(RED));
        grid.set(1, 18, Cell::Filled(RED));

        let cleared = grid.clear_full_rows();
        assert_eq!(cleared.as_slice(), &[19, 21]);
        // Row 20 survives and lands on 21, row 18 lands on 20.
        assert!(grid.is_filled(0, 21));
        assert!(grid.is_filled(1, 20));
        assert_eq!(grid.filled_count(), 2);
    }

    #[test]
    fn test_top_occupied_row() {
        let mut grid = Grid::new();
        assert_eq!(grid.top_occupied_row(), None);
        grid.set(3, 15, Cell::Filled(RED));
        grid.set(3, 12, Cell::Filled(RED));
        assert_eq!(grid.top_occupied_row(), Some(12));
    }
}
