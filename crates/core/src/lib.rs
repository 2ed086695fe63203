//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds the game rules and state. It has no dependency on
//! terminals, clocks or files:
//!
//! - **Deterministic**: a seeded generator (or a scripted kind source)
//!   reproduces a game exactly
//! - **Clockless**: the game reports a tick interval and an outside
//!   scheduler decides when to call [`Game::step`]
//! - **Allocation-free hot path**: grid, shapes and queue are fixed-size
//!
//! # Module Structure
//!
//! - [`catalog`]: the seven piece kinds (shape matrix, color, spawn offset)
//! - [`grid`]: 10x22 locked-cell storage with row clearing
//! - [`board`]: active piece movement, rotation with wall kicks, drops, locks
//! - [`queue`]: three-kind lookahead, hold slot and kind sources
//! - [`scoring`]: points, levels and tick speed
//! - [`game`]: the phase machine tying it all together
//! - [`snapshot`]: read-only view for renderers
//!
//! # Example
//!
//! ```
//! use blockfall_core::Game;
//! use blockfall_core::types::{Command, Phase};
//!
//! let mut game = Game::new(12345);
//!
//! // Three gravity ticks of countdown
//! for _ in 0..3 {
//!     game.step(None);
//! }
//! assert_eq!(game.phase(), Phase::Running);
//!
//! game.step(Some(Command::MoveRight));
//! game.step(Some(Command::RotateCw));
//! let report = game.step(Some(Command::HardDrop));
//! assert!(report.locked);
//! ```

pub mod board;
pub mod catalog;
pub mod game;
pub mod grid;
pub mod queue;
pub mod scoring;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::{ActivePiece, Board, LockOutcome};
pub use catalog::{base_shape, definition, PieceDef, Shape};
pub use game::{Game, StepReport};
pub use grid::Grid;
pub use queue::{KindSource, PieceQueue, ScriptedKinds, UniformKinds};
pub use scoring::{compute_speed, difficulty_multiplier, points_for_clear, should_level_up, ScoreState};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
