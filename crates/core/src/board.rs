//! Board module - the grid plus the active piece
//!
//! The board owns the locked-cell [`Grid`] and the authoritative position of
//! the active piece. Every mutation is validated first and leaves the board
//! untouched when it fails.
//!
//! Collision works on the *solid* bounding box of the active shape: padded
//! matrices may hang over the walls as long as their solid cells do not.
//! Cells above row 0 are allowed so pieces can spawn and rotate partly off
//! the top.

use arrayvec::ArrayVec;

use crate::catalog::{definition, Shape};
use crate::grid::{ClearedRows, Grid};
use crate::types::{Cell, Color, PieceKind, Side, StackState, Turn, GRID_COLUMNS, GRID_ROWS};

/// Wall-kick translations as (dy, dx): one row up, one row down,
/// one column left, one column right.
const KICKS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// The falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub shape: Shape,
    pub color: Color,
    pub x: i8,
    pub y: i8,
}

impl ActivePiece {
    /// Piece at its catalog spawn state
    pub fn spawn(kind: PieceKind) -> Self {
        let def = definition(kind);
        Self {
            kind,
            shape: def.shape,
            color: def.color,
            x: def.spawn_x,
            y: def.spawn_y,
        }
    }
}

/// Result of locking the active piece
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockOutcome {
    /// Rows removed by this lock, top to bottom
    pub cleared: ClearedRows,
    /// A solid cell landed above the visible grid
    pub block_out: bool,
}

impl LockOutcome {
    pub fn rows_cleared(&self) -> usize {
        self.cleared.len()
    }
}

/// Grid plus active piece
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    grid: Grid,
    active: ActivePiece,
    stack_state: StackState,
    /// Set by a hard drop or a blocked downward move
    needs_lock: bool,
}

impl Board {
    /// Empty grid with `first` at its spawn position
    pub fn new(first: PieceKind) -> Self {
        Self {
            grid: Grid::new(),
            active: ActivePiece::spawn(first),
            stack_state: StackState::Ok,
            needs_lock: false,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Mutable grid access, for puzzle setups and tests
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn active(&self) -> &ActivePiece {
        &self.active
    }

    pub fn stack_state(&self) -> StackState {
        self.stack_state
    }

    pub fn needs_lock(&self) -> bool {
        self.needs_lock
    }

    /// Replace the active piece with a fresh spawn of `kind`
    pub fn spawn(&mut self, kind: PieceKind) {
        self.active = ActivePiece::spawn(kind);
        self.needs_lock = false;
    }

    /// Place the active piece directly, for puzzle setups and tests.
    ///
    /// Returns false (and changes nothing) if the position is invalid.
    pub fn place(&mut self, piece: ActivePiece) -> bool {
        if !self.fits(&piece.shape, piece.y, piece.x) {
            return false;
        }
        self.active = piece;
        self.needs_lock = false;
        true
    }

    /// Check whether the active shape fits with its matrix origin at (x, y)
    pub fn is_position_valid(&self, y: i8, x: i8) -> bool {
        self.fits(&self.active.shape, y, x)
    }

    fn fits(&self, shape: &Shape, y: i8, x: i8) -> bool {
        // Widened so origins near the i8 limits cannot overflow.
        let (x, y) = (i16::from(x), i16::from(y));
        let col_start = x + shape.solid_edge(Side::Left) as i16;
        let col_end = x + shape.solid_edge(Side::Right) as i16;
        let row_start = y + shape.solid_edge(Side::Up) as i16;
        let row_end = y + shape.solid_edge(Side::Down) as i16;

        if col_start < 0 || col_end >= i16::from(GRID_COLUMNS) || row_end >= i16::from(GRID_ROWS) {
            return false;
        }

        // Both ranges now lie inside the grid, so the i8 casts are lossless.
        for grid_y in row_start.max(0)..=row_end {
            for grid_x in col_start..=col_end {
                let solid = shape.is_solid((grid_y - y) as usize, (grid_x - x) as usize);
                if solid && self.grid.is_filled(grid_x as i8, grid_y as i8) {
                    return false;
                }
            }
        }

        true
    }

    /// Translate the active piece; commits only if the target is valid
    pub fn attempt_move(&mut self, dx: i8, dy: i8) -> bool {
        let (Some(x), Some(y)) = (self.active.x.checked_add(dx), self.active.y.checked_add(dy)) else {
            return false;
        };
        if !self.is_position_valid(y, x) {
            return false;
        }
        self.active.x = x;
        self.active.y = y;
        true
    }

    /// Rotate the active piece, trying wall kicks when the rotated shape
    /// does not fit in place.
    ///
    /// Returns true if the orientation changed. When neither the plain
    /// rotation nor any kick fits, the piece keeps its previous shape and
    /// position.
    pub fn rotate(&mut self, turn: Turn) -> bool {
        let rotated = self.active.shape.rotated(turn);
        let (x, y) = (self.active.x, self.active.y);

        if self.fits(&rotated, y, x) {
            self.active.shape = rotated;
            return true;
        }

        for (dy, dx) in kick_candidates(self.active.kind) {
            let (Some(ky), Some(kx)) = (y.checked_add(dy), x.checked_add(dx)) else {
                continue;
            };
            if self.fits(&rotated, ky, kx) {
                self.active.shape = rotated;
                self.active.x = kx;
                self.active.y = ky;
                return true;
            }
        }

        false
    }

    /// Row the active piece would rest on after a hard drop (ghost piece)
    pub fn landing_y(&self) -> i8 {
        let mut y = self.active.y;
        while self.is_position_valid(y + 1, self.active.x) {
            y += 1;
        }
        y
    }

    /// Move to the landing row and mark the piece for locking.
    ///
    /// Returns the number of rows dropped.
    pub fn hard_drop(&mut self) -> u8 {
        let landing = self.landing_y();
        let distance = (landing - self.active.y) as u8;
        self.active.y = landing;
        self.needs_lock = true;
        distance
    }

    /// Move down one row. When blocked, mark the piece for locking and
    /// return false.
    pub fn soft_drop_or_gravity_tick(&mut self) -> bool {
        if self.attempt_move(0, 1) {
            return true;
        }
        self.needs_lock = true;
        false
    }

    /// Write the active piece into the grid and clear complete rows.
    ///
    /// Solid cells above row 0 are not written; any such cell sets the stack
    /// state to [`StackState::NotUpdatable`] and no row is cleared for this
    /// lock.
    pub fn lock_and_resolve(&mut self) -> LockOutcome {
        let piece = self.active;
        let mut block_out = false;

        for (row, col) in piece.shape.solid_cells() {
            let y = piece.y + row as i8;
            let x = piece.x + col as i8;
            if y < 0 {
                block_out = true;
                continue;
            }
            self.grid.set(x, y, Cell::Filled(piece.color));
        }
        self.needs_lock = false;

        if block_out {
            self.stack_state = StackState::NotUpdatable;
            return LockOutcome {
                cleared: ClearedRows::new(),
                block_out,
            };
        }

        LockOutcome {
            cleared: self.grid.clear_full_rows(),
            block_out,
        }
    }

    /// First row from the top holding a filled cell, None if the grid is empty
    pub fn top_occupied_row(&self) -> Option<usize> {
        self.grid.top_occupied_row()
    }
}

/// Kick candidates in trial order.
///
/// The long piece also tries each direction at double magnitude, after the
/// single-step set.
fn kick_candidates(kind: PieceKind) -> ArrayVec<(i8, i8), 8> {
    let mut out: ArrayVec<(i8, i8), 8> = KICKS.into_iter().collect();
    if kind == PieceKind::I {
        out.extend(KICKS.iter().map(|&(dy, dx)| (dy * 2, dx * 2)));
    }
    out
}
