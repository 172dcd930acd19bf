//! Read-only view of a game for renderers and observers.
//!
//! Snapshots are plain `Copy` data: taking one never borrows the game.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::pieces::{PieceShape, Tetromino};
use crate::types::{PieceKind, Rotation, FIELD_HEIGHT, FIELD_WIDTH, PREVIEW_LEN};

/// Field grid as bytes: 0 for empty, otherwise catalog index + 1
pub type BoardGrid = [[u8; FIELD_WIDTH as usize]; FIELD_HEIGHT as usize];

/// FNV-1a 64-bit hash of a field grid
pub fn fnv1a64_board(board: &BoardGrid) -> u64 {
    let mut h: u64 = 0xcbf29ce484222325;
    for &b in board.iter().flatten() {
        h ^= b as u64;
        h = h.wrapping_mul(0x00000100000001B3);
    }
    h
}

/// The active piece in field coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub cells: PieceShape,
}

impl From<Tetromino> for ActiveSnapshot {
    fn from(value: Tetromino) -> Self {
        Self {
            kind: value.kind(),
            rotation: value.rotation(),
            cells: *value.cells(),
        }
    }
}

impl Default for ActiveSnapshot {
    fn default() -> Self {
        ActiveSnapshot::from(Tetromino::new(PieceKind::I))
    }
}

/// An upcoming piece, cells relative to its bounding box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NextSnapshot {
    pub kind: PieceKind,
    pub cells: PieceShape,
}

impl From<Tetromino> for NextSnapshot {
    fn from(value: Tetromino) -> Self {
        Self {
            kind: value.kind(),
            cells: *value.cells(),
        }
    }
}

impl Default for NextSnapshot {
    fn default() -> Self {
        NextSnapshot::from(Tetromino::new(PieceKind::I))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GameSnapshot {
    pub board: BoardGrid,
    pub board_hash: u64,
    pub active: ActiveSnapshot,
    pub next: [NextSnapshot; PREVIEW_LEN],
    pub score: u32,
    pub seed: u32,
    pub piece_id: u32,
    pub game_over: bool,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.board = [[0u8; FIELD_WIDTH as usize]; FIELD_HEIGHT as usize];
        self.board_hash = fnv1a64_board(&self.board);
        self.active = ActiveSnapshot::default();
        self.next = [NextSnapshot::default(); PREVIEW_LEN];
        self.score = 0;
        self.seed = 0;
        self.piece_id = 0;
        self.game_over = false;
    }

    pub fn playable(&self) -> bool {
        !self.game_over
    }

    /// Kind stored in a board cell, if any
    pub fn cell_kind(&self, x: usize, y: usize) -> Option<PieceKind> {
        let v = *self.board.get(y)?.get(x)?;
        v.checked_sub(1).map(|i| PieceKind::from_index(i as u32))
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let mut s = Self {
            board: [[0u8; FIELD_WIDTH as usize]; FIELD_HEIGHT as usize],
            board_hash: 0,
            active: ActiveSnapshot::default(),
            next: [NextSnapshot::default(); PREVIEW_LEN],
            score: 0,
            seed: 0,
            piece_id: 0,
            game_over: false,
        };
        s.clear();
        s
    }
}
