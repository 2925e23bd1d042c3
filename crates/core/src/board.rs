//! Board module - manages the settled-cell grid
//!
//! The board is a `width x height` grid where each cell is either empty or filled
//! with a fill color. Uses a flat row-major vector for cache locality; the
//! dimensions are fixed for the lifetime of the board.
//! Coordinates: (x, y) where x is the column (left to right) and y is the row
//! (top to bottom). Row 0 is the top row.

use crate::types::Cell;

/// The settled-cell grid, flat row-major storage (y * width + x)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width * height],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if self.is_out_of_bounds(x, y) {
            return None;
        }
        Some((y as usize) * self.width + (x as usize))
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    pub fn is_out_of_bounds(&self, x: i32, y: i32) -> bool {
        x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height
    }

    /// A slice over one row, or None past the last row
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= self.height {
            return None;
        }
        let start = y * self.width;
        Some(&self.cells[start..start + self.width])
    }

    /// Check if every cell in a row is filled
    pub fn is_row_complete(&self, y: usize) -> bool {
        self.row(y)
            .map_or(false, |row| row.iter().all(|cell| cell.is_some()))
    }

    /// Remove a row, shift every row above it down by one and empty the top row
    pub fn clear_row(&mut self, y: usize) {
        if y >= self.height {
            return;
        }

        let width = self.width;
        // copy_within handles the overlapping ranges.
        for row in (1..=y).rev() {
            let src_start = (row - 1) * width;
            self.cells
                .copy_within(src_start..src_start + width, row * width);
        }

        self.cells[..width].fill(None);
    }

    /// Clear every complete row, compacting the board toward the bottom.
    ///
    /// Scans from the bottom row upward. After a row is removed the same index is
    /// checked again, because the row above has slid into it, so stacked complete
    /// rows cascade within one pass. Returns the number of rows cleared.
    pub fn clear_completed_rows(&mut self) -> usize {
        let mut cleared = 0;
        let mut y = self.height;

        while y > 0 {
            if self.is_row_complete(y - 1) {
                self.clear_row(y - 1);
                cleared += 1;
            } else {
                y -= 1;
            }
        }

        cleared
    }

    /// Number of filled cells on the whole board
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Get a reference to the internal cells slice
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Reset every cell to empty, keeping the dimensions
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Build a board from rows of cells (all rows must share one width)
    pub fn from_rows(rows: &[Vec<Cell>]) -> Self {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        let mut board = Self::new(width, height);
        for (y, row) in rows.iter().enumerate() {
            for (x, cell) in row.iter().take(width).enumerate() {
                board.cells[y * width + x] = *cell;
            }
        }
        board
    }

    /// Convert to rows of cells for testing/display
    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        self.cells.chunks(self.width.max(1)).map(<[Cell]>::to_vec).collect()
    }
}
