//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the rules of the falling-block game: the piece
//! catalog, rotation with wall kicks, the field, and the lock cycle.
//! It has **zero dependencies** on UI, timing or I/O, making it:
//!
//! - **Deterministic**: Same seed and inputs produce identical games
//! - **Testable**: Every rule is reachable from plain function calls
//! - **Portable**: Can run in any environment (terminal, GUI, headless)
//! - **Allocation-free**: Game operations only touch fixed-size arrays
//!
//! # Module Structure
//!
//! - [`board`]: 10x22 field with collision checks and line clearing
//! - [`game_state`]: Active piece, lookahead queue, score and the lock cycle
//! - [`pieces`]: Tetromino catalog and SRS rotation with wall kicks
//! - [`rng`]: xorshift32 piece generation
//! - [`snapshot`]: Read-only copy of the state for renderers
//!
//! # Game Rules
//!
//! - **Queue**: The active piece plus three upcoming pieces, refilled one at a time
//! - **SRS Rotation**: Five kick attempts per rotation for every piece except O
//! - **Lockdown**: A piece locks as soon as it cannot move down
//! - **Scoring**: One point per cleared row
//! - **Game Over**: Locking any cell above the visible field
//!
//! # Example
//!
//! ```
//! use srs_tetris_core::GameState;
//! use srs_tetris_types::GameAction;
//!
//! let mut game = GameState::new(12345);
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::RotateCw);
//! let running = game.apply_action(GameAction::HardDrop);
//!
//! assert!(running);
//! assert_eq!(game.piece_id(), 2);
//! ```

pub mod board;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod snapshot;

pub use srs_tetris_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use game_state::GameState;
pub use pieces::{get_shape, try_rotate, Tetromino};
pub use rng::XorShift32;
pub use snapshot::{ActiveSnapshot, GameSnapshot, NextSnapshot};
