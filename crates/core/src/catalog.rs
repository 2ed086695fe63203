//! Piece catalog - the seven tetromino definitions
//!
//! Each kind is a square matrix of solid/empty cells (3x3, 4x4 or 2x2), a
//! display color and a spawn offset. Apart from the 2x2 kind, matrices carry
//! non-solid padding, so collision checks work from the *solid* edges of a
//! shape rather than from its matrix bounds (see [`Shape::solid_edge`]).

use serde::Serialize;

use crate::types::{Color, PieceKind, Side, Turn};

/// Largest matrix side used by any kind
pub const MAX_SHAPE: usize = 4;

/// One rotation state of a piece: a square matrix of solid cells.
///
/// Shapes are immutable values; rotating returns a new shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Shape {
    size: u8,
    cells: [[bool; MAX_SHAPE]; MAX_SHAPE],
}

impl Shape {
    /// Build a shape from `N` rows of 0/1 values (`N <= 4`).
    pub const fn from_rows<const N: usize>(rows: [[u8; N]; N]) -> Self {
        assert!(N > 0 && N <= MAX_SHAPE);
        let mut cells = [[false; MAX_SHAPE]; MAX_SHAPE];
        let mut r = 0;
        while r < N {
            let mut c = 0;
            while c < N {
                cells[r][c] = rows[r][c] != 0;
                c += 1;
            }
            r += 1;
        }
        Self {
            size: N as u8,
            cells,
        }
    }

    /// Side length of the matrix
    pub fn size(&self) -> usize {
        self.size as usize
    }

    /// Whether the cell at (row, col) is solid; false outside the matrix
    #[inline]
    pub fn is_solid(&self, row: usize, col: usize) -> bool {
        row < self.size() && col < self.size() && self.cells[row][col]
    }

    /// Iterate solid cells as (row, col), row-major
    pub fn solid_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let n = self.size();
        (0..n).flat_map(move |r| (0..n).filter(move |&c| self.cells[r][c]).map(move |c| (r, c)))
    }

    /// Rows of the matrix as 0/1 values, for display and debugging
    pub fn rows(&self) -> Vec<Vec<u8>> {
        let n = self.size();
        (0..n)
            .map(|r| (0..n).map(|c| self.cells[r][c] as u8).collect())
            .collect()
    }

    /// Rotate by 90°.
    ///
    /// Clockwise: `new[r][c] = old[n-1-c][r]` (transpose, then reverse rows).
    /// Counter-clockwise: `new[r][c] = old[c][n-1-r]`.
    pub fn rotated(&self, turn: Turn) -> Shape {
        let n = self.size();
        let mut cells = [[false; MAX_SHAPE]; MAX_SHAPE];
        for (r, row) in cells.iter_mut().enumerate().take(n) {
            for (c, cell) in row.iter_mut().enumerate().take(n) {
                *cell = match turn {
                    Turn::Clockwise => self.cells[n - 1 - c][r],
                    Turn::CounterClockwise => self.cells[c][n - 1 - r],
                };
            }
        }
        Shape {
            size: self.size,
            cells,
        }
    }

    /// Offset of the outermost solid cell on one side of the matrix.
    ///
    /// - `Left`: smallest column holding a solid cell
    /// - `Right`: largest column holding a solid cell
    /// - `Up`: smallest row holding a solid cell
    /// - `Down`: largest row holding a solid cell
    ///
    /// A shape with no solid cells reports the matrix size for `Left`/`Up` and
    /// 0 for `Right`/`Down`.
    pub fn solid_edge(&self, side: Side) -> usize {
        let n = self.size();
        let row_has_solid = |r: usize| (0..n).any(|c| self.cells[r][c]);
        let col_has_solid = |c: usize| (0..n).any(|r| self.cells[r][c]);
        match side {
            Side::Left => (0..n).find(|&c| col_has_solid(c)).unwrap_or(n),
            Side::Right => (0..n).rev().find(|&c| col_has_solid(c)).unwrap_or(0),
            Side::Up => (0..n).find(|&r| row_has_solid(r)).unwrap_or(n),
            Side::Down => (0..n).rev().find(|&r| row_has_solid(r)).unwrap_or(0),
        }
    }
}

/// Static definition of one piece kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceDef {
    pub kind: PieceKind,
    pub shape: Shape,
    pub color: Color,
    /// Spawn column of the matrix origin
    pub spawn_x: i8,
    /// Spawn row of the matrix origin (negative: above the visible grid)
    pub spawn_y: i8,
}

/// Catalog entries in [`PieceKind::ALL`] order
static CATALOG: [PieceDef; 7] = [
    // Orange Ricky
    PieceDef {
        kind: PieceKind::L,
        shape: Shape::from_rows([[0, 0, 1], [1, 1, 1], [0, 0, 0]]),
        color: Color::new("#FFA366"),
        spawn_x: 3,
        spawn_y: -2,
    },
    // Blue Ricky
    PieceDef {
        kind: PieceKind::J,
        shape: Shape::from_rows([[1, 0, 0], [1, 1, 1], [0, 0, 0]]),
        color: Color::new("#0099CC"),
        spawn_x: 3,
        spawn_y: -2,
    },
    // Cleveland Z
    PieceDef {
        kind: PieceKind::Z,
        shape: Shape::from_rows([[1, 1, 0], [0, 1, 1], [0, 0, 0]]),
        color: Color::new("#FF5A5A"),
        spawn_x: 3,
        spawn_y: -2,
    },
    // Rhode Island Z
    PieceDef {
        kind: PieceKind::S,
        shape: Shape::from_rows([[0, 1, 1], [1, 1, 0], [0, 0, 0]]),
        color: Color::new("#70C05A"),
        spawn_x: 3,
        spawn_y: -2,
    },
    // Hero
    PieceDef {
        kind: PieceKind::I,
        shape: Shape::from_rows([[0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]]),
        color: Color::new("#97FFFF"),
        spawn_x: 3,
        spawn_y: -3,
    },
    // Teewee
    PieceDef {
        kind: PieceKind::T,
        shape: Shape::from_rows([[0, 1, 0], [1, 1, 1], [0, 0, 0]]),
        color: Color::new("#A667E7"),
        spawn_x: 3,
        spawn_y: -2,
    },
    // Smashboy
    PieceDef {
        kind: PieceKind::O,
        shape: Shape::from_rows([[1, 1], [1, 1]]),
        color: Color::new("#FFE066"),
        spawn_x: 4,
        spawn_y: -2,
    },
];

/// Look up the definition of a kind
pub fn definition(kind: PieceKind) -> &'static PieceDef {
    &CATALOG[kind.index()]
}

/// Base (spawn) shape of a kind
pub fn base_shape(kind: PieceKind) -> Shape {
    definition(kind).shape
}
