//! Terminal "game renderer" crate.
//!
//! A small, game-oriented rendering layer for terminal gameplay. It renders
//! into a simple framebuffer that is then flushed to a terminal backend.
//!
//! Goals:
//! - Keep `core` deterministic and free of I/O
//! - Keep the view pure so it can be unit-tested
//! - Allow precise control over aspect ratio (2 chars wide per cell)

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use srs_tetris_core as core;
pub use srs_tetris_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Viewport};
pub use renderer::{encode_frame_into, TerminalRenderer};
