//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no required dependencies, so they can be
//! shared by the engine, the terminal view and the input mapping alike.
//!
//! # Field Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 22 rows (indexed 0-21, row 0 is the top visible row)
//! - **Hidden buffer**: rows with a negative index sit above the field. They are
//!   always empty and only ever hold the active piece while it spawns or rotates.
//!
//! Coordinates are `(x, y)` pairs: `x` is the column, `y` the row, growing downward.
//!
//! # Frame Timing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `FRAME_MS` | 16 | Frame length of the terminal loop (~60 FPS) |
//! | `GRAVITY_FRAMES` | 60 | Frames between automatic gravity ticks |
//!
//! # Examples
//!
//! ```
//! use srs_tetris_types::{PieceKind, Rotation, FIELD_WIDTH, FIELD_HEIGHT};
//!
//! // Piece kinds are numbered in catalog order
//! assert_eq!(PieceKind::from_index(0), PieceKind::I);
//! assert_eq!(PieceKind::from_index(6), PieceKind::Z);
//!
//! // Rotation wraps in both directions
//! assert_eq!(Rotation::North.rotate_ccw(), Rotation::West);
//! assert_eq!(Rotation::from_index(-1), Rotation::West);
//!
//! assert_eq!(FIELD_WIDTH, 10);
//! assert_eq!(FIELD_HEIGHT, 22);
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Field width in cells (10 columns)
pub const FIELD_WIDTH: u8 = 10;

/// Field height in cells (22 rows, visible plus buffer)
pub const FIELD_HEIGHT: u8 = 22;

/// Number of pieces held by the lookahead queue (active piece plus three previews)
pub const QUEUE_LEN: usize = 4;

/// Number of upcoming pieces shown to the player
pub const PREVIEW_LEN: usize = QUEUE_LEN - 1;

/// Offset added to a catalog layout when a piece spawns
pub const SPAWN_OFFSET: (i8, i8) = (3, -2);

/// Spawn offset for the O piece, whose layout hugs the left edge of its box
pub const SPAWN_OFFSET_O: (i8, i8) = (4, -2);

/// Kick attempts per rotation (attempt 0 is the unkicked rotation)
pub const KICK_ATTEMPTS: usize = 5;

/// Frame length of the terminal loop in milliseconds (16ms ≈ 60 FPS)
pub const FRAME_MS: u32 = 16;

/// Frames between automatic gravity ticks (60 frames ≈ 1 second)
pub const GRAVITY_FRAMES: u32 = 60;

/// A cell position `(x, y)`: column and row, rows may be negative
pub type Coord = (i8, i8);

/// A cell on the field
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Occupied by a locked piece of that kind
pub type Cell = Option<PieceKind>;


/// The seven tetromino piece kinds, in catalog order
///
/// The discriminant is the catalog index drawn from the PRNG (`next() % 7`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// All kinds in catalog order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Catalog index of this kind (I=0 .. Z=6)
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Kind for a catalog index, reduced modulo 7
    pub const fn from_index(index: u32) -> Self {
        Self::ALL[(index % 7) as usize]
    }

    /// Side length of the bounding box the piece rotates in
    ///
    /// The I piece rotates in a 4x4 box, the O piece does not rotate at all
    /// and the rest share a 3x3 box.
    pub const fn box_size(self) -> i8 {
        match self {
            PieceKind::I => 4,
            PieceKind::O => 2,
            _ => 3,
        }
    }
}

/// Rotation states following the Super Rotation System (SRS)
///
/// - **North**: Spawn orientation (0° rotation)
/// - **East**: Rotated 90° clockwise
/// - **South**: Rotated 180°
/// - **West**: Rotated 270° clockwise
///
/// The rotation cycle goes: North → East → South → West → North
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotation state as an index 0..=3
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Rotation state for any integer, wrapping into 0..=3
    ///
    /// Negative values wrap as well: `-1` is `West`.
    pub const fn from_index(index: i32) -> Self {
        match index.rem_euclid(4) {
            0 => Rotation::North,
            1 => Rotation::East,
            2 => Rotation::South,
            _ => Rotation::West,
        }
    }

    /// Rotate clockwise (90°)
    pub const fn rotate_cw(self) -> Self {
        Self::from_index(self as i32 + 1)
    }

    /// Rotate counter-clockwise (-90° or 270°)
    pub const fn rotate_ccw(self) -> Self {
        Self::from_index(self as i32 - 1)
    }
}

/// Game actions that can be applied to modify game state
///
/// Every action maps onto one engine operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GameAction {
    /// Slide piece one cell left
    MoveLeft,
    /// Slide piece one cell right
    MoveRight,
    /// Drop piece one cell down, locking it if it cannot move
    SoftDrop,
    /// Drop piece to the lowest valid position and lock it
    HardDrop,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
    /// Start over, seeding with the current PRNG state
    Restart,
}

/// Event recorded after a piece locks into the field.
///
/// Consumed by observers through `GameState::take_last_event`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LockEvent {
    /// Kind of the piece that locked
    pub kind: PieceKind,
    /// Rows cleared by this lockdown
    pub lines_cleared: u32,
    /// Score after the lockdown
    pub score: u32,
}
