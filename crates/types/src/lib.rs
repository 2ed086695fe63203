//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! Everything here is plain data with no behaviour beyond parsing and simple
//! conversions, so it can be shared by the core, the session driver and the
//! terminal front end alike.
//!
//! # Grid Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 22 rows (indexed 0-21, row 0 at the top)
//! - Pieces spawn partly above row 0 (negative `y`)
//!
//! # Timing
//!
//! The core has no clock. It reports a tick interval (`speed`, milliseconds)
//! derived from [`BASE_SPEED_MS`], the level and the difficulty multiplier,
//! and an external scheduler decides when to deliver the next gravity tick.
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Command, PieceKind, GRID_COLUMNS, GRID_ROWS};
//!
//! assert_eq!(PieceKind::from_str("t"), Some(PieceKind::T));
//! assert_eq!(Command::from_str("move_left"), Some(Command::MoveLeft));
//! assert_eq!(Command::from_str("dance"), None);
//!
//! assert_eq!(GRID_COLUMNS, 10);
//! assert_eq!(GRID_ROWS, 22);
//! ```

use serde::{Deserialize, Serialize};

/// Grid width in cells (10 columns)
pub const GRID_COLUMNS: u8 = 10;

/// Grid height in cells (22 rows)
pub const GRID_ROWS: u8 = 22;

/// Number of upcoming kinds kept in the lookahead
pub const QUEUE_LEN: usize = 3;

/// Base tick interval at level 1 with a neutral multiplier
pub const BASE_SPEED_MS: f64 = 1000.0;

/// Rows to clear per level
pub const ROWS_PER_LEVEL: u32 = 10;

/// First value shown by the start countdown
pub const COUNTDOWN_START: u8 = 3;

/// Rows from the top at or above which the stack counts as "on the edge"
pub const EDGE_ROW: usize = 7;

/// Line clear scoring table, indexed by rows cleared
///
/// - 1 row: 40 points
/// - 2 rows: 100 points
/// - 3 rows: 300 points
/// - 4 rows: 1200 points
///
/// Points are multiplied by the current level (1-based).
pub const LINE_SCORES: [u32; 5] = [0, 40, 100, 300, 1200];

/// The seven tetromino piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    L,
    J,
    Z,
    S,
    I,
    T,
    O,
}

impl PieceKind {
    /// All kinds in catalog order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::L,
        PieceKind::J,
        PieceKind::Z,
        PieceKind::S,
        PieceKind::I,
        PieceKind::T,
        PieceKind::O,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "l" => Some(PieceKind::L),
            "j" => Some(PieceKind::J),
            "z" => Some(PieceKind::Z),
            "s" => Some(PieceKind::S),
            "i" => Some(PieceKind::I),
            "t" => Some(PieceKind::T),
            "o" => Some(PieceKind::O),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::L => "l",
            PieceKind::J => "j",
            PieceKind::Z => "z",
            PieceKind::S => "s",
            PieceKind::I => "i",
            PieceKind::T => "t",
            PieceKind::O => "o",
        }
    }

    /// Position of this kind in [`PieceKind::ALL`]
    pub fn index(&self) -> usize {
        match self {
            PieceKind::L => 0,
            PieceKind::J => 1,
            PieceKind::Z => 2,
            PieceKind::S => 3,
            PieceKind::I => 4,
            PieceKind::T => 5,
            PieceKind::O => 6,
        }
    }
}

/// Display color tag, stored as a `#RRGGBB` hex string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Color(&'static str);

impl Color {
    pub const fn new(hex: &'static str) -> Self {
        Self(hex)
    }

    pub fn hex(&self) -> &'static str {
        self.0
    }

    /// Decode the hex tag into RGB components.
    ///
    /// Malformed components decode as 0.
    ///
    /// ```
    /// use blockfall_types::Color;
    ///
    /// assert_eq!(Color::new("#FFA366").rgb(), (0xFF, 0xA3, 0x66));
    /// assert_eq!(Color::new("bogus").rgb(), (0, 0, 0));
    /// ```
    pub fn rgb(&self) -> (u8, u8, u8) {
        let hex = self.0.strip_prefix('#').unwrap_or(self.0);
        let component = |range: std::ops::Range<usize>| {
            hex.get(range)
                .and_then(|s| u8::from_str_radix(s, 16).ok())
                .unwrap_or(0)
        };
        if hex.len() != 6 {
            return (0, 0, 0);
        }
        (component(0..2), component(2..4), component(4..6))
    }
}

/// A cell on the grid
///
/// Empty, or filled and tagged with the color of the piece that locked there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Cell {
    #[default]
    Empty,
    Filled(Color),
}

impl Cell {
    pub fn is_filled(&self) -> bool {
        matches!(self, Cell::Filled(_))
    }

    pub fn color(&self) -> Option<Color> {
        match self {
            Cell::Empty => None,
            Cell::Filled(color) => Some(*color),
        }
    }
}

/// Rotation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Turn {
    Clockwise,
    CounterClockwise,
}

impl Turn {
    pub fn reverse(&self) -> Self {
        match self {
            Turn::Clockwise => Turn::CounterClockwise,
            Turn::CounterClockwise => Turn::Clockwise,
        }
    }
}

/// Edge of a shape's bounding matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
    Up,
    Down,
}

/// Commands accepted by the engine, one per step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    /// Move piece one column left
    MoveLeft,
    /// Move piece one column right
    MoveRight,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
    /// Drop piece to its landing row and lock it
    HardDrop,
    /// Swap the active piece with the held one (or stash it)
    Hold,
    /// Move one row down, locking when blocked (default tick)
    GravityTick,
    /// Pause a running game or resume a paused one
    TogglePause,
    /// Resume a paused game
    Resume,
}

impl Command {
    /// Parse a command name.
    ///
    /// Case, underscores and dashes are ignored, so `move_left`, `moveLeft`
    /// and `MOVE-LEFT` are the same command.
    ///
    /// ```
    /// use blockfall_types::Command;
    ///
    /// assert_eq!(Command::from_str("hardDrop"), Some(Command::HardDrop));
    /// assert_eq!(Command::from_str("gravity_tick"), Some(Command::GravityTick));
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();
        match normalized.as_str() {
            "moveleft" => Some(Command::MoveLeft),
            "moveright" => Some(Command::MoveRight),
            "rotatecw" => Some(Command::RotateCw),
            "rotateccw" => Some(Command::RotateCcw),
            "harddrop" => Some(Command::HardDrop),
            "hold" => Some(Command::Hold),
            "gravitytick" => Some(Command::GravityTick),
            "togglepause" => Some(Command::TogglePause),
            "resume" => Some(Command::Resume),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Command::MoveLeft => "move_left",
            Command::MoveRight => "move_right",
            Command::RotateCw => "rotate_cw",
            Command::RotateCcw => "rotate_ccw",
            Command::HardDrop => "hard_drop",
            Command::Hold => "hold",
            Command::GravityTick => "gravity_tick",
            Command::TogglePause => "toggle_pause",
            Command::Resume => "resume",
        }
    }
}

/// Game lifecycle phase
///
/// `New → Running ⇄ Paused`, `Running → Ending → Ended`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    #[default]
    New,
    Running,
    Paused,
    Ending,
    Ended,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::New => "new",
            Phase::Running => "running",
            Phase::Paused => "paused",
            Phase::Ending => "ending",
            Phase::Ended => "ended",
        }
    }
}

/// Whether the locked stack can still take pieces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StackState {
    #[default]
    Ok,
    /// A lock placed a solid cell above the visible grid (block-out)
    NotUpdatable,
}

/// Settings accepted from outside the core
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Difficulty knob; positive values slow play down, negative speed it up
    pub speed_multiplier: f64,
    /// Presentation toggle, consumed by renderers only
    pub display_ghost: bool,
    /// Presentation toggle, consumed by renderers only
    pub display_next: bool,
    /// Gates the hold command
    pub hold_allowed: bool,
    pub base_speed_ms: f64,
    /// Seed for the piece generator; `None` seeds from entropy
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            speed_multiplier: 0.0,
            display_ghost: true,
            display_next: true,
            hold_allowed: true,
            base_speed_ms: BASE_SPEED_MS,
            seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn piece_kind_index_matches_all_order() {
        for (i, kind) in PieceKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
            assert_eq!(PieceKind::from_str(kind.as_str()), Some(*kind));
        }
    }

    #[test]
    fn command_names_roundtrip() {
        for cmd in [
            Command::MoveLeft,
            Command::MoveRight,
            Command::RotateCw,
            Command::RotateCcw,
            Command::HardDrop,
            Command::Hold,
            Command::GravityTick,
            Command::TogglePause,
            Command::Resume,
        ] {
            assert_eq!(Command::from_str(cmd.as_str()), Some(cmd));
        }
        assert_eq!(Command::from_str("MOVE-RIGHT"), Some(Command::MoveRight));
        assert_eq!(Command::from_str(""), None);
    }

    #[test]
    fn turn_reverse_is_involution() {
        assert_eq!(Turn::Clockwise.reverse(), Turn::CounterClockwise);
        assert_eq!(Turn::Clockwise.reverse().reverse(), Turn::Clockwise);
    }

    #[test]
    fn cell_reports_color() {
        let c = Color::new("#97FFFF");
        assert_eq!(Cell::Filled(c).color(), Some(c));
        assert!(Cell::Filled(c).is_filled());
        assert_eq!(Cell::Empty.color(), None);
        assert!(!Cell::default().is_filled());
    }
}
