//! Board module - manages the playing field
//!
//! The field is a 10x22 grid where each cell is empty or holds the kind of the
//! piece that locked there. Uses a flat array for cache locality and zero allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..21 (top to bottom).
//! Rows above row 0 form the hidden buffer: they are never stored and always read as empty.

use arrayvec::ArrayVec;

use crate::types::{Cell, Coord, PieceKind, FIELD_HEIGHT, FIELD_WIDTH};

const WIDTH: usize = FIELD_WIDTH as usize;
const HEIGHT: usize = FIELD_HEIGHT as usize;

/// Total number of cells on the board
const BOARD_SIZE: usize = WIDTH * HEIGHT;

/// Rows cleared by a single scan, in the order they were removed
pub type ClearedRows = ArrayVec<usize, HEIGHT>;

/// The playing field - 10 columns x 22 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= FIELD_WIDTH as i8 || y < 0 || y >= FIELD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * WIDTH + (x as usize))
    }

    /// Get width of the board
    pub fn width(&self) -> u8 {
        FIELD_WIDTH
    }

    /// Get height of the board
    pub fn height(&self) -> u8 {
        FIELD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if outside the stored grid (hidden buffer included)
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

    /// Check if a piece cell may sit at (x, y)
    ///
    /// The column must lie on the field and the row above the floor. Cells in
    /// the hidden buffer are never occupied, everything else must be empty.
    pub fn is_valid(&self, x: i8, y: i8) -> bool {
        if x < 0 || x >= FIELD_WIDTH as i8 || y >= FIELD_HEIGHT as i8 {
            return false;
        }
        y < 0 || !self.is_occupied(x, y)
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= HEIGHT {
            return false;
        }
        let start = y * WIDTH;
        self.cells[start..start + WIDTH].iter().all(|cell| cell.is_some())
    }

    /// Clear a row and shift all rows above down
    ///
    /// Row `r` receives row `r - 1` for every `r` from `y` down to 1, then row 0
    /// is emptied explicitly.
    /// Returns the number of lines cleared (1 or 0)
    pub fn clear_row(&mut self, y: usize) -> usize {
        if y >= HEIGHT {
            return 0;
        }

        // copy_within handles the overlapping ranges
        for row in (1..=y).rev() {
            let src_start = (row - 1) * WIDTH;
            self.cells
                .copy_within(src_start..src_start + WIDTH, row * WIDTH);
        }

        self.cells[..WIDTH].fill(None);

        1
    }

    /// Clear all full rows, scanning from the bottom up
    ///
    /// A row index is re-checked after each shift, since the row moved into it
    /// may be full as well. Returns the index of every clear in order, so an
    /// index appears once per row removed there.
    pub fn clear_full_rows(&mut self) -> ClearedRows {
        let mut cleared_rows = ClearedRows::new();

        for y in (0..HEIGHT).rev() {
            while self.is_row_full(y) {
                self.clear_row(y);
                cleared_rows.push(y);
            }
        }

        cleared_rows
    }

    /// Lock piece cells onto the board
    ///
    /// Returns false without touching the board if any cell is in the hidden
    /// buffer, off the field or already occupied.
    pub fn lock_cells(&mut self, cells: &[Coord], kind: PieceKind) -> bool {
        if cells
            .iter()
            .any(|&(x, y)| y < 0 || !self.is_valid(x, y))
        {
            return false;
        }

        for &(x, y) in cells {
            self.set(x, y, Some(kind));
        }

        true
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Iterate rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(WIDTH)
    }

    /// Occupancy grid, one bool per cell
    pub fn occupancy(&self) -> [[bool; WIDTH]; HEIGHT] {
        let mut out = [[false; WIDTH]; HEIGHT];
        for (dst, row) in out.iter_mut().zip(self.rows()) {
            for (d, cell) in dst.iter_mut().zip(row) {
                *d = cell.is_some();
            }
        }
        out
    }

    /// Write the grid as bytes: 0 for empty, otherwise catalog index + 1
    pub fn write_u8_grid(&self, out: &mut [[u8; WIDTH]; HEIGHT]) {
        for (dst, row) in out.iter_mut().zip(self.rows()) {
            for (d, cell) in dst.iter_mut().zip(row) {
                *d = cell.map_or(0, |kind| kind.index() as u8 + 1);
            }
        }
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Fill a row except for the listed columns (test and bench fixture)
    #[doc(hidden)]
    pub fn fill_row_except(&mut self, y: i8, holes: &[i8], kind: PieceKind) {
        for x in 0..FIELD_WIDTH as i8 {
            let cell = if holes.contains(&x) { None } else { Some(kind) };
            self.set(x, y, cell);
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
