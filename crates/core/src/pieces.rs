//! Pieces module - Tetromino catalog and SRS rotation with wall kicks
//!
//! The catalog keeps, per kind, the rotation-state-0 layout inside the
//! piece's bounding box. The other three orientations are derived at compile
//! time by walking the per-cell clockwise transform tables, so every rotation
//! state maps cell `i` of the layout to cell `i` of the rotated layout.
//!
//! Kick data follows the Super Rotation System.
//! Reference: https://tetris.wiki/SRS

use crate::types::{Coord, PieceKind, Rotation, KICK_ATTEMPTS, SPAWN_OFFSET, SPAWN_OFFSET_O};

/// Shape of a piece - 4 cell offsets inside its bounding box
pub type PieceShape = [Coord; 4];

/// Rotation-state-0 layouts in catalog order (I, J, L, O, S, T, Z)
pub const INITIAL_LAYOUTS: [PieceShape; 7] = [
    [(0, 1), (1, 1), (2, 1), (3, 1)], // I
    [(0, 0), (0, 1), (1, 1), (2, 1)], // J
    [(2, 0), (0, 1), (1, 1), (2, 1)], // L
    [(0, 0), (1, 0), (0, 1), (1, 1)], // O
    [(1, 0), (2, 0), (0, 1), (1, 1)], // S
    [(1, 0), (0, 1), (1, 1), (2, 1)], // T
    [(0, 0), (1, 0), (1, 1), (2, 1)], // Z
];

/// Clockwise step for each cell of a 3x3 box, indexed `[y][x]`
pub const ROT3: [[Coord; 3]; 3] = [
    [(2, 0), (1, 1), (0, 2)],
    [(1, -1), (0, 0), (-1, 1)],
    [(0, -2), (-1, -1), (-2, 0)],
];

/// Clockwise step for each cell of a 4x4 box, indexed `[y][x]`
pub const ROT4: [[Coord; 4]; 4] = [
    [(3, 0), (2, 1), (1, 2), (0, 3)],
    [(2, -1), (1, 0), (0, 1), (-1, 2)],
    [(1, -2), (0, -1), (-1, 0), (-2, 1)],
    [(0, -3), (-1, -2), (-2, -1), (-3, 0)],
];

/// Advance one cell a quarter turn clockwise inside the kind's box
const fn rotate_cell_cw(kind: PieceKind, (x, y): Coord) -> Coord {
    let (dx, dy) = match kind {
        PieceKind::O => (0, 0),
        PieceKind::I => ROT4[y as usize][x as usize],
        _ => ROT3[y as usize][x as usize],
    };
    (x + dx, y + dy)
}

const fn build_shapes() -> [[PieceShape; 4]; 7] {
    let mut out = [[[(0, 0); 4]; 4]; 7];
    let mut k = 0;
    while k < 7 {
        let kind = PieceKind::ALL[k];
        let mut shape = INITIAL_LAYOUTS[k];
        let mut r = 0;
        while r < 4 {
            out[k][r] = shape;
            let mut i = 0;
            while i < 4 {
                shape[i] = rotate_cell_cw(kind, shape[i]);
                i += 1;
            }
            r += 1;
        }
        k += 1;
    }
    out
}

/// Box-relative layout of every kind at every rotation state
static SHAPES: [[PieceShape; 4]; 7] = build_shapes();

/// Get the shape (box offsets) for a piece kind and rotation
pub fn get_shape(kind: PieceKind, rotation: Rotation) -> PieceShape {
    SHAPES[kind.index()][rotation.index()]
}

/// Get initial shape for a new piece (rotation state 0)
pub fn get_spawn_shape(kind: PieceKind) -> PieceShape {
    INITIAL_LAYOUTS[kind.index()]
}

/// Spawn offset for a piece kind (x, y)
pub fn spawn_offset(kind: PieceKind) -> Coord {
    match kind {
        PieceKind::O => SPAWN_OFFSET_O,
        _ => SPAWN_OFFSET,
    }
}

/// One kick test, with separate offsets per rotation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Kick {
    pub cw: Coord,
    pub ccw: Coord,
}

impl Kick {
    const fn new(cw: Coord, ccw: Coord) -> Self {
        Self { cw, ccw }
    }

    /// Offset for the requested direction, in the table's y-up convention
    pub fn offset(&self, clockwise: bool) -> Coord {
        if clockwise {
            self.cw
        } else {
            self.ccw
        }
    }
}

/// SRS wall kick data, indexed `[from_rotation][attempt]`
///
/// Offsets are written as on the guideline tables, with y pointing up.
/// Attempt 0 is always the unkicked rotation.
pub type KickTable = [[Kick; KICK_ATTEMPTS]; 4];

/// JLSTZ kick table (shared by J, L, S, T, Z)
pub const JLSTZ_KICKS: KickTable = [
    // 0->R / 0->L
    [
        Kick::new((0, 0), (0, 0)),
        Kick::new((-1, 0), (1, 0)),
        Kick::new((-1, 1), (1, 1)),
        Kick::new((0, -2), (0, -2)),
        Kick::new((-1, -2), (1, -2)),
    ],
    // R->2 / R->0
    [
        Kick::new((0, 0), (0, 0)),
        Kick::new((1, 0), (1, 0)),
        Kick::new((1, -1), (1, -1)),
        Kick::new((0, 2), (0, 2)),
        Kick::new((1, 2), (1, 2)),
    ],
    // 2->L / 2->R
    [
        Kick::new((0, 0), (0, 0)),
        Kick::new((1, 0), (-1, 0)),
        Kick::new((1, 1), (-1, 1)),
        Kick::new((0, -2), (0, -2)),
        Kick::new((1, -2), (-1, -2)),
    ],
    // L->0 / L->2
    [
        Kick::new((0, 0), (0, 0)),
        Kick::new((-1, 0), (-1, 0)),
        Kick::new((-1, -1), (-1, -1)),
        Kick::new((0, 2), (0, 2)),
        Kick::new((-1, 2), (-1, 2)),
    ],
];

/// I piece kick table (different from JLSTZ)
pub const I_KICKS: KickTable = [
    // 0->R / 0->L
    [
        Kick::new((0, 0), (0, 0)),
        Kick::new((-2, 0), (-1, 0)),
        Kick::new((1, 0), (2, 0)),
        Kick::new((-2, -1), (-1, 2)),
        Kick::new((1, 2), (2, -1)),
    ],
    // R->2 / R->0
    [
        Kick::new((0, 0), (0, 0)),
        Kick::new((-1, 0), (2, 0)),
        Kick::new((2, 0), (-1, 0)),
        Kick::new((-1, 2), (2, 1)),
        Kick::new((2, -1), (-1, -2)),
    ],
    // 2->L / 2->R
    [
        Kick::new((0, 0), (0, 0)),
        Kick::new((2, 0), (1, 0)),
        Kick::new((-1, 0), (-2, 0)),
        Kick::new((2, 1), (1, -2)),
        Kick::new((-1, -2), (-2, 1)),
    ],
    // L->0 / L->2
    [
        Kick::new((0, 0), (0, 0)),
        Kick::new((1, 0), (-2, 0)),
        Kick::new((-2, 0), (1, 0)),
        Kick::new((1, -2), (-2, -1)),
        Kick::new((-2, 1), (1, 2)),
    ],
];

/// Get kick table for a piece kind
///
/// The O piece has no rotation geometry and therefore no table.
pub fn get_kick_table(kind: PieceKind) -> Option<&'static KickTable> {
    match kind {
        PieceKind::O => None,
        PieceKind::I => Some(&I_KICKS),
        _ => Some(&JLSTZ_KICKS),
    }
}

/// Field-space offset (rows grow downward) for one kick attempt
pub fn kick_offset(
    kind: PieceKind,
    from: Rotation,
    attempt: usize,
    clockwise: bool,
) -> Option<Coord> {
    let table = get_kick_table(kind)?;
    let (dx, dy) = table[from.index()].get(attempt)?.offset(clockwise);
    Some((dx, -dy))
}

/// A piece instance: kind, rotation state and four absolute cells
///
/// The cells are always the kind's layout at `rotation`, translated as a
/// whole. Only sliding, dropping, kicking and spawning move them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    kind: PieceKind,
    rotation: Rotation,
    cells: PieceShape,
}

impl Tetromino {
    /// Create a spawn-ready piece: rotation state 0, cells relative to its box
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: Rotation::North,
            cells: get_spawn_shape(kind),
        }
    }

    /// Create a piece placed at the spawn offset above the field
    pub fn spawned(kind: PieceKind) -> Self {
        let (dx, dy) = spawn_offset(kind);
        Self::new(kind).translated(dx, dy)
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn cells(&self) -> &PieceShape {
        &self.cells
    }

    /// Position of the bounding box's top-left corner
    pub fn origin(&self) -> Coord {
        let (sx, sy) = get_shape(self.kind, self.rotation)[0];
        let (cx, cy) = self.cells[0];
        (cx - sx, cy - sy)
    }

    /// Copy of the piece moved by `(dx, dy)`
    pub fn translated(&self, dx: i8, dy: i8) -> Self {
        let mut cells = self.cells;
        for cell in &mut cells {
            cell.0 += dx;
            cell.1 += dy;
        }
        Self { cells, ..*self }
    }

    /// Copy of the piece turned one step and shifted by a field-space kick
    ///
    /// The O piece is returned unchanged.
    pub fn rotated(&self, clockwise: bool, (kx, ky): Coord) -> Self {
        if self.kind == PieceKind::O {
            return *self;
        }
        let rotation = if clockwise {
            self.rotation.rotate_cw()
        } else {
            self.rotation.rotate_ccw()
        };
        let (ox, oy) = self.origin();
        let mut cells = get_shape(self.kind, rotation);
        for cell in &mut cells {
            cell.0 += ox + kx;
            cell.1 += oy + ky;
        }
        Self {
            kind: self.kind,
            rotation,
            cells,
        }
    }

    /// Check if all cells satisfy the given placement predicate
    pub fn fits(&self, is_valid: impl Fn(i8, i8) -> bool) -> bool {
        self.cells.iter().all(|&(x, y)| is_valid(x, y))
    }
}

/// Try to rotate a piece with wall kicks
///
/// Kick attempts are tried in order, each one against the original piece.
/// Returns the first valid candidate, or `None` for the O piece and when
/// all five attempts are rejected.
pub fn try_rotate(
    piece: &Tetromino,
    clockwise: bool,
    is_valid: impl Fn(i8, i8) -> bool,
) -> Option<Tetromino> {
    (0..KICK_ATTEMPTS)
        .map_while(|attempt| kick_offset(piece.kind, piece.rotation, attempt, clockwise))
        .map(|kick| piece.rotated(clockwise, kick))
        .find(|candidate| candidate.fits(&is_valid))
}
