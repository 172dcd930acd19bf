//! Game state module - manages the complete game state
//!
//! This module ties together the board, the piece catalog and the RNG. It
//! owns the lookahead queue and runs the lock cycle: merge the active piece,
//! clear full rows, advance the queue and spawn the next piece.
//!
//! Every operation runs to completion and is driven by the caller; pacing
//! gravity is up to whoever calls [`GameState::tick`].

use crate::board::Board;
use crate::pieces::{try_rotate, Tetromino};
use crate::rng::XorShift32;
use crate::snapshot::{fnv1a64_board, ActiveSnapshot, GameSnapshot, NextSnapshot};
use crate::types::*;

/// Complete game state
///
/// `queue[0]` is the active piece in field coordinates, `queue[1..]` are the
/// upcoming pieces in spawn-ready form.
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    queue: [Tetromino; QUEUE_LEN],
    rng: XorShift32,
    /// Seed passed to the last `init`.
    seed: u32,
    score: u32,
    /// Monotonic id for spawned pieces (1 for the first piece of a game).
    piece_id: u32,
    game_over: bool,
    /// Last lock event (consumed by observers).
    last_event: Option<LockEvent>,
}

impl GameState {
    /// Create a new game with the given RNG seed
    pub fn new(seed: u32) -> Self {
        let mut state = Self {
            board: Board::new(),
            queue: [Tetromino::new(PieceKind::I); QUEUE_LEN],
            rng: XorShift32::new(seed),
            seed,
            score: 0,
            piece_id: 0,
            game_over: false,
            last_event: None,
        };
        state.init(seed);
        state
    }

    /// Reset everything and start a new game from `seed`
    pub fn init(&mut self, seed: u32) {
        self.rng = XorShift32::new(seed);
        self.seed = seed;
        self.score = 0;
        self.piece_id = 0;
        self.game_over = false;
        self.last_event = None;
        self.board.clear();

        let rng = &mut self.rng;
        self.queue = std::array::from_fn(|_| Tetromino::new(rng.next_kind()));

        self.spawn_active();
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Current PRNG state, usable as a seed to continue the sequence
    pub fn rng_state(&self) -> u32 {
        self.rng.state()
    }

    pub fn piece_id(&self) -> u32 {
        self.piece_id
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The piece under player control
    pub fn active(&self) -> &Tetromino {
        &self.queue[0]
    }

    /// The whole lookahead queue, active piece first
    pub fn queue(&self) -> &[Tetromino; QUEUE_LEN] {
        &self.queue
    }

    /// Upcoming pieces in spawn-ready form
    pub fn next_pieces(&self) -> &[Tetromino] {
        &self.queue[1..]
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    #[cfg(test)]
    pub(crate) fn set_active(&mut self, piece: Tetromino) {
        self.queue[0] = piece;
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_u8_grid(&mut out.board);
        out.board_hash = fnv1a64_board(&out.board);

        out.active = ActiveSnapshot::from(self.queue[0]);
        for (dst, piece) in out.next.iter_mut().zip(self.next_pieces()) {
            *dst = NextSnapshot::from(*piece);
        }
        out.score = self.score;
        out.seed = self.seed;
        out.piece_id = self.piece_id;
        out.game_over = self.game_over;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Place the piece in slot 0 at the spawn offset
    ///
    /// The spawned piece is not checked against the field; an overlap only
    /// surfaces at the next lockdown.
    fn spawn_active(&mut self) {
        self.queue[0] = Tetromino::spawned(self.queue[0].kind());
        self.piece_id = self.piece_id.wrapping_add(1);
    }

    /// Try to move the active piece
    pub(crate) fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        let candidate = self.queue[0].translated(dx, dy);
        if candidate.fits(|x, y| self.board.is_valid(x, y)) {
            self.queue[0] = candidate;
            return true;
        }
        false
    }

    /// Slide the active piece one column
    ///
    /// Returns false when the move is rejected; the piece is then unchanged.
    pub fn slide(&mut self, left: bool) -> bool {
        if self.game_over {
            return false;
        }
        self.try_move(if left { -1 } else { 1 }, 0)
    }

    /// Rotate the active piece with SRS wall kicks
    ///
    /// Returns false when every kick attempt is rejected or the piece is an O.
    pub fn rotate(&mut self, ccw: bool) -> bool {
        if self.game_over {
            return false;
        }
        let rotated = try_rotate(&self.queue[0], !ccw, |x, y| self.board.is_valid(x, y));
        match rotated {
            Some(piece) => {
                self.queue[0] = piece;
                true
            }
            None => false,
        }
    }

    /// Gravity step: move down one row, locking the piece if it cannot
    ///
    /// Returns false once the game is over.
    pub fn tick(&mut self) -> bool {
        if self.game_over {
            return false;
        }
        if self.try_move(0, 1) {
            return true;
        }
        self.lockdown()
    }

    /// Player-requested single-row drop (same as a gravity tick)
    pub fn soft_drop(&mut self) -> bool {
        self.tick()
    }

    /// Drop the active piece as far as it goes and lock it
    ///
    /// Returns false once the game is over.
    pub fn hard_drop(&mut self) -> bool {
        if self.game_over {
            return false;
        }
        while self.try_move(0, 1) {}
        self.lockdown()
    }

    /// Lock the active piece onto the board and handle line clears
    ///
    /// A piece with any cell in the hidden buffer ends the game; the board is
    /// left untouched in that case.
    fn lockdown(&mut self) -> bool {
        let active = self.queue[0];

        if !self.board.lock_cells(active.cells(), active.kind()) {
            self.game_over = true;
            return false;
        }

        let cleared_rows = self.board.clear_full_rows();
        let lines_cleared = cleared_rows.len() as u32;
        self.score += lines_cleared;

        // Advance the queue and draw the new last slot
        self.queue.rotate_left(1);
        self.queue[QUEUE_LEN - 1] = Tetromino::new(self.rng.next_kind());
        self.spawn_active();

        self.last_event = Some(LockEvent {
            kind: active.kind(),
            lines_cleared,
            score: self.score,
        });

        true
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Apply a game action
    ///
    /// Returns whether the game continues afterwards.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => {
                self.slide(true);
            }
            GameAction::MoveRight => {
                self.slide(false);
            }
            GameAction::SoftDrop => return self.soft_drop(),
            GameAction::HardDrop => return self.hard_drop(),
            GameAction::RotateCw => {
                self.rotate(false);
            }
            GameAction::RotateCcw => {
                self.rotate(true);
            }
            GameAction::Restart => {
                let seed = self.rng.state();
                self.init(seed);
            }
        }
        !self.game_over
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Vertical I piece occupying column 0, rows 0..=3
    fn vertical_i_at_left_wall() -> Tetromino {
        // East puts the bar in box column 2; the spawned box starts at (3, -2).
        Tetromino::spawned(PieceKind::I)
            .rotated(true, (0, 0))
            .translated(-5, 2)
    }

    #[test]
    fn test_init_fills_queue_from_seed() {
        let state = GameState::new(1);
        let kinds: Vec<PieceKind> = state.queue().iter().map(|p| p.kind()).collect();
        assert_eq!(
            kinds,
            vec![PieceKind::J, PieceKind::O, PieceKind::Z, PieceKind::S]
        );

        // Active J spawned at (+3, -2), previews left in spawn-ready form.
        assert_eq!(state.active().cells(), &[(3, -2), (3, -1), (4, -1), (5, -1)]);
        assert_eq!(state.next_pieces()[0], Tetromino::new(PieceKind::O));
        assert_eq!(state.score(), 0);
        assert_eq!(state.piece_id(), 1);
        assert!(!state.game_over());
    }

    #[test]
    fn test_init_resets_previous_game() {
        let mut state = GameState::new(7);
        state.board_mut().set(0, 21, Some(PieceKind::T));
        state.score = 12;
        state.game_over = true;

        state.init(1);

        assert_eq!(state.board(), &Board::new());
        assert_eq!(state.score(), 0);
        assert!(!state.game_over());
        assert_eq!(state.snapshot(), GameState::new(1).snapshot());
    }

    #[test]
    fn test_tick_moves_down_until_lock() {
        let mut state = GameState::new(1);
        let start = *state.active();

        assert!(state.tick());
        assert_eq!(*state.active(), start.translated(0, 1));

        // J spans two rows: 21 more ticks land it on the floor.
        for _ in 0..21 {
            assert!(state.tick());
        }
        assert_eq!(state.piece_id(), 1);
        assert!(state.tick());
        assert_eq!(state.piece_id(), 2);
        assert_eq!(state.active().kind(), PieceKind::O);
        assert!(state.board().is_occupied(3, 20));
        assert!(state.board().is_occupied(5, 21));
    }

    #[test]
    fn test_lockdown_advances_queue_and_draws() {
        let mut state = GameState::new(1);
        assert!(state.hard_drop());

        let kinds: Vec<PieceKind> = state.queue().iter().map(|p| p.kind()).collect();
        // Fifth draw from seed 1 is an O.
        assert_eq!(
            kinds,
            vec![PieceKind::O, PieceKind::Z, PieceKind::S, PieceKind::O]
        );
        assert_eq!(*state.active(), Tetromino::spawned(PieceKind::O));
        assert_eq!(state.active().cells(), &[(4, -2), (5, -2), (4, -1), (5, -1)]);
        assert_eq!(
            state.take_last_event(),
            Some(LockEvent {
                kind: PieceKind::J,
                lines_cleared: 0,
                score: 0,
            })
        );
        assert_eq!(state.take_last_event(), None);
    }

    #[test]
    fn test_single_line_clear_scores_one() {
        let mut state = GameState::new(1);
        state.board_mut().fill_row_except(21, &[0], PieceKind::L);
        state.set_active(vertical_i_at_left_wall());

        assert!(state.hard_drop());

        assert_eq!(state.score(), 1);
        // The three I cells above the cleared row moved down by one.
        assert!(state.board().is_occupied(0, 21));
        assert!(state.board().is_occupied(0, 20));
        assert!(state.board().is_occupied(0, 19));
        assert!(!state.board().is_occupied(0, 18));
        assert!(!state.board().is_occupied(1, 21));
        assert_eq!(state.take_last_event().map(|e| e.lines_cleared), Some(1));
    }

    #[test]
    fn test_multi_line_clear_counts_each_row() {
        let mut state = GameState::new(1);
        for y in 18..22 {
            state.board_mut().fill_row_except(y, &[0], PieceKind::Z);
        }
        state.set_active(vertical_i_at_left_wall());

        assert!(state.hard_drop());

        assert_eq!(state.score(), 4);
        assert_eq!(state.board(), &Board::new());
    }

    #[test]
    fn test_line_clear_shifts_rows_above_in_order() {
        let mut state = GameState::new(1);
        state.board_mut().fill_row_except(21, &[0], PieceKind::L);
        state.board_mut().set(5, 19, Some(PieceKind::S));
        state.board_mut().set(7, 18, Some(PieceKind::T));
        state.set_active(vertical_i_at_left_wall());

        assert!(state.hard_drop());

        assert_eq!(state.score(), 1);
        assert_eq!(state.board().get(5, 20), Some(Some(PieceKind::S)));
        assert_eq!(state.board().get(7, 19), Some(Some(PieceKind::T)));
        assert!(!state.board().is_occupied(5, 19));
        assert!(!state.board().is_occupied(7, 18));
    }

    #[test]
    fn test_lock_above_field_is_game_over() {
        let mut state = GameState::new(1);
        // Columns 3..=5 filled from row 1 down; no row is complete.
        for y in 1..22 {
            for x in 3..=5 {
                state.board_mut().set(x, y, Some(PieceKind::I));
            }
        }
        let board_before = state.board().clone();

        // J moves to rows -1..=0, then cannot fall further.
        assert!(state.tick());
        assert_eq!(state.active().cells(), &[(3, -1), (3, 0), (4, 0), (5, 0)]);
        assert!(!state.tick());

        assert!(state.game_over());
        assert_eq!(state.board(), &board_before);
        assert_eq!(state.piece_id(), 1);
        assert_eq!(state.take_last_event(), None);

        // Terminal: nothing moves any more.
        let frozen = *state.active();
        assert!(!state.slide(true));
        assert!(!state.rotate(false));
        assert!(!state.tick());
        assert!(!state.hard_drop());
        assert_eq!(*state.active(), frozen);
    }

    #[test]
    fn test_restart_after_game_over() {
        let mut state = GameState::new(1);
        for y in 0..22 {
            for x in 3..=5 {
                state.board_mut().set(x, y, Some(PieceKind::I));
            }
        }
        assert!(!state.hard_drop());
        let resume = state.rng_state();

        assert!(state.apply_action(GameAction::Restart));
        assert!(!state.game_over());
        assert_eq!(state.seed(), resume);
        assert_eq!(state.board(), &Board::new());
    }

    #[test]
    fn test_slide_stops_at_walls() {
        let mut state = GameState::new(1);
        let mut moves = 0;
        while state.slide(true) {
            moves += 1;
        }
        assert_eq!(moves, 3);
        assert_eq!(state.active().cells()[0].0, 0);

        let before = *state.active();
        assert!(!state.slide(true));
        assert_eq!(*state.active(), before);
    }

    #[test]
    fn test_slide_blocked_by_locked_cell() {
        let mut state = GameState::new(1);
        assert!(state.tick());
        assert!(state.tick());
        // J now covers (3,0) (3,1) (4,1) (5,1).
        assert_eq!(state.active().cells(), &[(3, 0), (3, 1), (4, 1), (5, 1)]);

        state.board_mut().set(6, 1, Some(PieceKind::Z));
        state.board_mut().set(2, 0, Some(PieceKind::Z));
        let board = state.board().clone();
        let before = *state.active();

        assert!(!state.slide(false));
        assert_eq!(*state.active(), before);
        assert!(!state.slide(true));
        assert_eq!(*state.active(), before);
        assert_eq!(state.board(), &board);
    }

    #[test]
    fn test_rotate_o_is_noop() {
        let mut state = GameState::new(1);
        assert!(state.hard_drop());
        assert_eq!(state.active().kind(), PieceKind::O);

        let before = *state.active();
        assert!(!state.rotate(false));
        assert!(!state.rotate(true));
        assert_eq!(*state.active(), before);
    }

    #[test]
    fn test_floor_kick_direction_follows_rotation() {
        // T resting on the floor in its spawn orientation.
        let resting = Tetromino::spawned(PieceKind::T).translated(0, 22);
        assert_eq!(resting.origin(), (3, 20));

        let mut cw = GameState::new(1);
        cw.set_active(resting);
        assert!(cw.rotate(false));
        assert_eq!(cw.active().rotation(), Rotation::East);
        assert_eq!(cw.active().origin(), (2, 19));

        let mut ccw = GameState::new(1);
        ccw.set_active(resting);
        assert!(ccw.rotate(true));
        assert_eq!(ccw.active().rotation(), Rotation::West);
        assert_eq!(ccw.active().origin(), (4, 19));
    }

    #[test]
    fn test_apply_action_reports_continue() {
        let mut state = GameState::new(3);
        assert!(state.apply_action(GameAction::MoveLeft));
        assert!(state.apply_action(GameAction::RotateCw));
        assert!(state.apply_action(GameAction::SoftDrop));
        assert!(state.apply_action(GameAction::HardDrop));
        assert_eq!(state.piece_id(), 2);
    }
}
