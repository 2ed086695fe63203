//! Terminal front end.
//!
//! A small game-oriented rendering layer: views draw into an off-screen
//! [`Canvas`] and the [`Screen`] flushes only the changed glyphs through
//! `crossterm`.

pub mod canvas;
pub mod screen;
pub mod view;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use canvas::{Canvas, Glyph, Rgb, Style};
pub use screen::{encode_changes, encode_full, Screen};
pub use view::{banner, on_edge, BoardView, Hud, Viewport};
