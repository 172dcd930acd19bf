//! RNG module - xorshift32 piece generation
//!
//! Every piece kind is drawn as `next_u32() % 7`, so one seed always
//! produces the same piece sequence.

use crate::types::PieceKind;

/// Marsaglia xorshift32 generator (shifts 13, 17, 5)
///
/// A zero state is a fixed point of the recurrence and yields an
/// endless run of I pieces; the seed is nevertheless taken as given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XorShift32 {
    state: u32,
}

impl XorShift32 {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Advance the state and return it
    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Draw the next piece kind (`next_u32() % 7` in catalog order)
    pub fn next_kind(&mut self) -> PieceKind {
        PieceKind::from_index(self.next_u32())
    }

    /// Get the current RNG state (for restarting game with same sequence)
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl Default for XorShift32 {
    fn default() -> Self {
        Self::new(1)
    }
}
