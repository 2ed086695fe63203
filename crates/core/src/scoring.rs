//! Scoring module - points, levels and tick speed
//!
//! The rules are pure functions; [`ScoreState`] is the mutable tally the
//! game owns and feeds through them.
//!
//! - A clear of 1-4 rows scores `LINE_SCORES[rows] * level` (level is 1-based)
//! - The level goes up once cleared rows reach `10 * level`
//! - Tick interval: `base * (0.9 - (level-1) * 0.007)^(level-1)`, then scaled
//!   by `1 + 0.2 * multiplier`

use crate::types::{BASE_SPEED_MS, LINE_SCORES, ROWS_PER_LEVEL};

/// Points for clearing `rows` rows at `level`; 0 outside 1..=4
pub fn points_for_clear(rows: usize, level: u32) -> u32 {
    if rows == 0 || rows > 4 {
        return 0;
    }
    LINE_SCORES[rows].saturating_mul(level)
}

/// Whether the cumulative cleared rows earn the next level
pub fn should_level_up(cleared_rows_total: u32, level: u32) -> bool {
    cleared_rows_total >= ROWS_PER_LEVEL.saturating_mul(level)
}

/// Tick interval in milliseconds for `level` and the difficulty `multiplier`.
///
/// Decreases as the level rises; a positive multiplier lengthens the
/// interval and a negative one shortens it.
pub fn compute_speed(base_speed: f64, multiplier: f64, level: u32) -> f64 {
    let steps = level.saturating_sub(1);
    let factor = 0.9 - steps as f64 * 0.007;
    let speed_by_level = base_speed * factor.powi(steps as i32);
    speed_by_level + 0.2 * speed_by_level * multiplier
}

/// Multiplier for a difficulty slider setting (1..=5, 3 is neutral).
///
/// Lower settings are easier (slower ticks).
pub fn difficulty_multiplier(setting: u8) -> f64 {
    0.8 * (3.0 - setting as f64)
}

/// Running score, level and speed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreState {
    points: u32,
    cleared_rows: u32,
    level: u32,
    speed: f64,
    speed_multiplier: f64,
    base_speed: f64,
}

impl ScoreState {
    pub fn new(base_speed: f64, speed_multiplier: f64) -> Self {
        Self {
            points: 0,
            cleared_rows: 0,
            level: 1,
            speed: compute_speed(base_speed, speed_multiplier, 1),
            speed_multiplier,
            base_speed,
        }
    }

    /// Add a clear of `rows` rows at the current level.
    ///
    /// Returns the points awarded.
    pub fn record_clear(&mut self, rows: usize) -> u32 {
        let gained = points_for_clear(rows, self.level);
        self.points = self.points.saturating_add(gained);
        self.cleared_rows = self.cleared_rows.saturating_add(rows as u32);
        gained
    }

    /// Raise the level by one if the cleared rows qualify, recomputing the
    /// speed. Returns true on a level up.
    pub fn check_level_up(&mut self) -> bool {
        if !should_level_up(self.cleared_rows, self.level) {
            return false;
        }
        self.level += 1;
        self.recompute_speed();
        true
    }

    /// Change the difficulty knob; the speed follows immediately
    pub fn set_speed_multiplier(&mut self, multiplier: f64) {
        self.speed_multiplier = multiplier;
        self.recompute_speed();
    }

    fn recompute_speed(&mut self) {
        self.speed = compute_speed(self.base_speed, self.speed_multiplier, self.level);
    }

    pub fn points(&self) -> u32 {
        self.points
    }

    pub fn cleared_rows(&self) -> u32 {
        self.cleared_rows
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Current tick interval in milliseconds
    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn speed_multiplier(&self) -> f64 {
        self.speed_multiplier
    }
}

impl Default for ScoreState {
    fn default() -> Self {
        Self::new(BASE_SPEED_MS, 0.0)
    }
}
