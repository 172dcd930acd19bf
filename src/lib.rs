//! SRS Tetris (workspace facade crate).
//!
//! Re-exports the workspace crates as `srs_tetris::{core,input,term,types}`
//! and holds the command-line configuration of the terminal front-end.

pub mod config;

pub use srs_tetris_core as core;
pub use srs_tetris_input as input;
pub use srs_tetris_term as term;
pub use srs_tetris_types as types;
