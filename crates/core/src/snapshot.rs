//! Read-only view of a game for renderers and other observers

use serde::Serialize;

use crate::board::ActivePiece;
use crate::catalog::Shape;
use crate::grid::{COLUMNS, ROWS};
use crate::types::{Cell, Color, Phase, PieceKind, StackState, COUNTDOWN_START, QUEUE_LEN};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub shape: Shape,
    pub color: Color,
    pub x: i8,
    pub y: i8,
}

impl From<ActivePiece> for ActiveSnapshot {
    fn from(value: ActivePiece) -> Self {
        Self {
            kind: value.kind,
            shape: value.shape,
            color: value.color,
            x: value.x,
            y: value.y,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameSnapshot {
    pub grid: [[Cell; COLUMNS]; ROWS],
    /// None while counting down and once the game is over
    pub active: Option<ActiveSnapshot>,
    /// Landing row of the active piece
    pub ghost_y: Option<i8>,
    pub lookahead: [PieceKind; QUEUE_LEN],
    pub held: Option<PieceKind>,
    pub can_hold: bool,
    pub phase: Phase,
    pub countdown: u8,
    /// Countdown digit to draw; the final one outlives `New` by one interval
    pub countdown_digit: Option<u8>,
    pub points: u32,
    pub cleared_rows: u32,
    pub level: u32,
    /// Tick interval in milliseconds
    pub speed_ms: f64,
    pub speed_multiplier: f64,
    pub stack_state: StackState,
    pub top_occupied_row: Option<usize>,
    pub display_ghost: bool,
    pub display_next: bool,
    pub hold_allowed: bool,
}

impl GameSnapshot {
    /// Whether gameplay commands currently have an effect
    pub fn playable(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn game_over(&self) -> bool {
        matches!(self.phase, Phase::Ending | Phase::Ended)
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            grid: [[Cell::Empty; COLUMNS]; ROWS],
            active: None,
            ghost_y: None,
            lookahead: [PieceKind::I; QUEUE_LEN],
            held: None,
            can_hold: true,
            phase: Phase::New,
            countdown: COUNTDOWN_START,
            countdown_digit: None,
            points: 0,
            cleared_rows: 0,
            level: 1,
            speed_ms: 0.0,
            speed_multiplier: 0.0,
            stack_state: StackState::Ok,
            top_occupied_row: None,
            display_ghost: true,
            display_next: true,
            hold_allowed: true,
        }
    }
}
