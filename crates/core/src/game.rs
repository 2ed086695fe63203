//! Game module - the phase machine that drives board, queue and score
//!
//! A [`Game`] has no clock. Callers feed it one command per [`Game::step`]
//! (`None` meaning a gravity tick) and read back a [`StepReport`] with the
//! signals observers care about, plus [`Game::snapshot`] for rendering.
//!
//! Phases: `New` counts down on gravity ticks, `Running` plays, `Paused`
//! waits for a resume, `Ending` lasts exactly one step after a block-out and
//! `Ended` ignores everything. A finished game is never reset; build a new
//! one instead.

use crate::board::Board;
use crate::queue::{KindSource, PieceQueue, UniformKinds};
use crate::scoring::ScoreState;
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{Command, GameConfig, Phase, StackState, Turn, COUNTDOWN_START};

/// Signals produced by one step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepReport {
    /// Phase after the step
    pub phase: Phase,
    /// The command changed some state
    pub accepted: bool,
    pub locked: bool,
    pub hard_dropped: bool,
    pub rows_cleared: usize,
    pub points_gained: u32,
    pub level_up: bool,
    pub top_occupied_row: Option<usize>,
    /// This step moved the game into `Ended`
    pub entered_ended: bool,
    /// The tick scheduler should drop its timing baseline
    pub reset_timing: bool,
}

/// One game session
#[derive(Debug, Clone)]
pub struct Game<S = UniformKinds> {
    board: Board,
    queue: PieceQueue<S>,
    score: ScoreState,
    phase: Phase,
    countdown: u8,
    /// Digit drawn by the latest countdown tick
    countdown_digit: Option<u8>,
    config: GameConfig,
}

impl Game<UniformKinds> {
    /// Default settings with a seeded piece generator
    pub fn new(seed: u64) -> Self {
        let config = GameConfig {
            seed: Some(seed),
            ..GameConfig::default()
        };
        Self::from_config(&config)
    }

    /// Settings from `config`; without a seed the generator uses entropy
    pub fn from_config(config: &GameConfig) -> Self {
        let source = match config.seed {
            Some(seed) => UniformKinds::seeded(seed),
            None => UniformKinds::from_entropy(),
        };
        Self::with_source(config, source)
    }
}

impl<S: KindSource> Game<S> {
    /// Build a game drawing kinds from `source`
    pub fn with_source(config: &GameConfig, source: S) -> Self {
        let queue = PieceQueue::new(source);
        Self {
            board: Board::new(queue.current()),
            queue,
            score: ScoreState::new(config.base_speed_ms, config.speed_multiplier),
            phase: Phase::New,
            countdown: COUNTDOWN_START,
            countdown_digit: None,
            config: config.clone(),
        }
    }

    /// Apply one command; `None` is a gravity tick
    pub fn step(&mut self, command: Option<Command>) -> StepReport {
        let command = command.unwrap_or(Command::GravityTick);
        let mut report = StepReport::default();

        match self.phase {
            Phase::New => self.step_new(command, &mut report),
            Phase::Running => self.step_running(command, &mut report),
            Phase::Paused => self.step_paused(command, &mut report),
            Phase::Ending => {
                self.phase = Phase::Ended;
                report.entered_ended = true;
                report.accepted = true;
            }
            Phase::Ended => {}
        }

        report.phase = self.phase;
        report.top_occupied_row = self.board.top_occupied_row();
        report
    }

    fn step_new(&mut self, command: Command, report: &mut StepReport) {
        if command != Command::GravityTick {
            return;
        }
        self.countdown_digit = Some(self.countdown);
        let finished = self.countdown <= 1;
        self.countdown = self.countdown.saturating_sub(1);
        if finished {
            self.phase = Phase::Running;
        }
        report.accepted = true;
    }

    fn step_running(&mut self, command: Command, report: &mut StepReport) {
        // The last digit stays up until the first running step.
        self.countdown_digit = None;
        report.accepted = match command {
            Command::MoveLeft => self.board.attempt_move(-1, 0),
            Command::MoveRight => self.board.attempt_move(1, 0),
            Command::RotateCw => self.board.rotate(Turn::Clockwise),
            Command::RotateCcw => self.board.rotate(Turn::CounterClockwise),
            Command::HardDrop => {
                self.board.hard_drop();
                report.hard_dropped = true;
                true
            }
            Command::Hold => self.hold(),
            Command::GravityTick => {
                self.board.soft_drop_or_gravity_tick();
                true
            }
            Command::TogglePause => {
                self.phase = Phase::Paused;
                report.reset_timing = true;
                true
            }
            Command::Resume => false,
        };

        if self.board.needs_lock() {
            self.lock_active(report);
        }

        if self.phase == Phase::Running {
            report.level_up = self.score.check_level_up();
        }
    }

    fn step_paused(&mut self, command: Command, report: &mut StepReport) {
        if matches!(command, Command::TogglePause | Command::Resume) {
            self.phase = Phase::Running;
            report.reset_timing = true;
            report.accepted = true;
        }
    }

    fn hold(&mut self) -> bool {
        if !self.config.hold_allowed || !self.queue.try_set_held() {
            return false;
        }
        self.board.spawn(self.queue.current());
        true
    }

    fn lock_active(&mut self, report: &mut StepReport) {
        let outcome = self.board.lock_and_resolve();
        report.locked = true;
        self.queue.reset_hold_availability();

        if outcome.block_out || self.board.stack_state() == StackState::NotUpdatable {
            self.phase = Phase::Ending;
            report.reset_timing = true;
            return;
        }

        report.rows_cleared = outcome.rows_cleared();
        report.points_gained = self.score.record_clear(outcome.rows_cleared());

        let next = self.queue.advance();
        self.board.spawn(next);
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Remaining countdown value while in `New`
    pub fn countdown(&self) -> u8 {
        self.countdown
    }

    /// Countdown digit currently on screen, if any
    pub fn countdown_digit(&self) -> Option<u8> {
        self.countdown_digit
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable board access, for puzzle setups and tests
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn queue(&self) -> &PieceQueue<S> {
        &self.queue
    }

    pub fn score(&self) -> &ScoreState {
        &self.score
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Current tick interval in milliseconds
    pub fn speed_ms(&self) -> f64 {
        self.score.speed()
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, Phase::Ending | Phase::Ended)
    }

    pub fn set_speed_multiplier(&mut self, multiplier: f64) {
        self.config.speed_multiplier = multiplier;
        self.score.set_speed_multiplier(multiplier);
    }

    pub fn set_hold_allowed(&mut self, allowed: bool) {
        self.config.hold_allowed = allowed;
    }

    pub fn set_display_ghost(&mut self, display: bool) {
        self.config.display_ghost = display;
    }

    pub fn set_display_next(&mut self, display: bool) {
        self.config.display_next = display;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut snapshot = GameSnapshot::default();
        self.snapshot_into(&mut snapshot);
        snapshot
    }

    /// Fill an existing snapshot in place
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        let show_active = matches!(self.phase, Phase::Running | Phase::Paused);

        out.grid = self.board.grid().to_rows();
        out.active = show_active.then(|| ActiveSnapshot::from(*self.board.active()));
        out.ghost_y = show_active.then(|| self.board.landing_y());
        out.lookahead = self.queue.lookahead();
        out.held = self.queue.held();
        out.can_hold = self.queue.can_hold() && self.config.hold_allowed;
        out.phase = self.phase;
        out.countdown = self.countdown;
        out.countdown_digit = self.countdown_digit;
        out.points = self.score.points();
        out.cleared_rows = self.score.cleared_rows();
        out.level = self.score.level();
        out.speed_ms = self.score.speed();
        out.speed_multiplier = self.score.speed_multiplier();
        out.stack_state = self.board.stack_state();
        out.top_occupied_row = self.board.top_occupied_row();
        out.display_ghost = self.config.display_ghost;
        out.display_next = self.config.display_next;
        out.hold_allowed = self.config.hold_allowed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queue::ScriptedKinds;
    use crate::types::{Cell, Color, PieceKind, GRID_COLUMNS};

    const GRAY: Color = Color::new("#808080");

    fn scripted(kinds: &[PieceKind]) -> Game<ScriptedKinds> {
        Game::with_source(&GameConfig::default(), ScriptedKinds::new(kinds.iter().copied()))
    }

    fn running(kinds: &[PieceKind]) -> Game<ScriptedKinds> {
        let mut game = scripted(kinds);
        for _ in 0..COUNTDOWN_START {
            game.step(None);
        }
        assert_eq!(game.phase(), Phase::Running);
        game
    }

    fn fill_rows_except_first_column(game: &mut Game<ScriptedKinds>, rows: std::ops::Range<i8>) {
        let grid = game.board_mut().grid_mut();
        for y in rows {
            for x in 1..GRID_COLUMNS as i8 {
                grid.set(x, y, Cell::Filled(GRAY));
            }
        }
    }

    /// Vertical long piece pushed against the left wall
    fn line_up_i_on_left_wall(game: &mut Game<ScriptedKinds>) {
        assert_eq!(game.board().active().kind, PieceKind::I);
        assert!(game.step(Some(Command::RotateCw)).accepted);
        while game.step(Some(Command::MoveLeft)).accepted {}
        assert_eq!(game.board().active().x, -2);
    }

    #[test]
    fn test_countdown_takes_three_ticks() {
        let mut game = scripted(&[PieceKind::T]);
        assert_eq!(game.step(None).phase, Phase::New);
        assert_eq!(game.countdown(), 2);
        assert_eq!(game.step(Some(Command::GravityTick)).phase, Phase::New);
        assert_eq!(game.countdown(), 1);
        assert_eq!(game.step(None).phase, Phase::Running);
    }

    #[test]
    fn test_each_countdown_digit_lasts_one_tick() {
        let mut game = scripted(&[PieceKind::T]);
        assert_eq!(game.countdown_digit(), None);

        let mut shown = Vec::new();
        for _ in 0..COUNTDOWN_START {
            game.step(None);
            shown.push(game.snapshot().countdown_digit);
        }
        assert_eq!(shown, vec![Some(3), Some(2), Some(1)]);
        assert_eq!(game.phase(), Phase::Running);

        // "1" stays up for the interval until the first running step.
        let report = game.step(None);
        assert_eq!(report.phase, Phase::Running);
        assert_eq!(game.snapshot().countdown_digit, None);
    }

    #[test]
    fn test_countdown_ignores_movement() {
        let mut game = scripted(&[PieceKind::T]);
        let before = *game.board().active();
        let report = game.step(Some(Command::MoveLeft));
        assert!(!report.accepted);
        assert_eq!(game.countdown(), COUNTDOWN_START);
        assert_eq!(*game.board().active(), before);
    }

    #[test]
    fn test_hard_drop_locks_and_spawns_next() {
        let mut game = running(&[PieceKind::I, PieceKind::O]);
        let report = game.step(Some(Command::HardDrop));
        assert!(report.hard_dropped);
        assert!(report.locked);
        assert_eq!(report.rows_cleared, 0);
        assert_eq!(report.top_occupied_row, Some(21));
        for x in 3..7 {
            assert!(game.board().grid().is_filled(x, 21));
        }
        assert_eq!(game.board().stack_state(), StackState::Ok);
        assert_eq!(game.board().active().kind, PieceKind::O);
    }

    #[test]
    fn test_gravity_locks_only_when_blocked() {
        let mut game = running(&[PieceKind::O]);
        let mut locked = false;
        for _ in 0..30 {
            let report = game.step(None);
            if report.locked {
                locked = true;
                break;
            }
        }
        assert!(locked);
        assert!(game.board().grid().is_filled(4, 21));
        assert!(game.board().grid().is_filled(5, 20));
    }

    #[test]
    fn test_hold_needs_a_lock_in_between() {
        let mut game = running(&[PieceKind::T, PieceKind::I, PieceKind::O, PieceKind::S]);
        assert!(game.step(Some(Command::Hold)).accepted);
        assert_eq!(game.board().active().kind, PieceKind::I);
        assert_eq!(game.queue().held(), Some(PieceKind::T));

        assert!(!game.step(Some(Command::Hold)).accepted);
        assert_eq!(game.board().active().kind, PieceKind::I);

        game.step(Some(Command::HardDrop));
        assert!(game.queue().can_hold());
        assert!(game.step(Some(Command::Hold)).accepted);
        assert_eq!(game.board().active().kind, PieceKind::T);
    }

    #[test]
    fn test_hold_disabled_by_config() {
        let mut game = running(&[PieceKind::T, PieceKind::I]);
        game.set_hold_allowed(false);
        assert!(!game.step(Some(Command::Hold)).accepted);
        assert_eq!(game.queue().held(), None);
        assert!(!game.snapshot().can_hold);
    }

    #[test]
    fn test_pause_blocks_gameplay() {
        let mut game = running(&[PieceKind::T]);
        let report = game.step(Some(Command::TogglePause));
        assert_eq!(report.phase, Phase::Paused);
        assert!(report.reset_timing);

        let before = *game.board().active();
        assert!(!game.step(Some(Command::MoveLeft)).accepted);
        assert!(!game.step(None).accepted);
        assert_eq!(*game.board().active(), before);

        let report = game.step(Some(Command::Resume));
        assert_eq!(report.phase, Phase::Running);
        assert!(report.reset_timing);
    }

    #[test]
    fn test_block_out_ends_game_after_one_step() {
        let mut game = running(&[PieceKind::O]);
        let mut report = StepReport::default();
        for _ in 0..12 {
            report = game.step(Some(Command::HardDrop));
            if report.phase != Phase::Running {
                break;
            }
        }
        assert_eq!(report.phase, Phase::Ending);
        assert!(report.locked);
        assert!(report.reset_timing);
        assert_eq!(game.board().stack_state(), StackState::NotUpdatable);
        assert!(game.snapshot().active.is_none());

        let report = game.step(Some(Command::MoveLeft));
        assert_eq!(report.phase, Phase::Ended);
        assert!(report.entered_ended);

        let report = game.step(Some(Command::Resume));
        assert_eq!(report.phase, Phase::Ended);
        assert!(!report.entered_ended);
        assert!(!report.accepted);
    }

    #[test]
    fn test_clears_score_and_level_up() {
        let mut game = running(&[PieceKind::I]);
        for round in 1..=3 {
            fill_rows_except_first_column(&mut game, 18..22);
            line_up_i_on_left_wall(&mut game);
            let report = game.step(Some(Command::HardDrop));
            assert_eq!(report.rows_cleared, 4);
            assert_eq!(report.points_gained, 1200);
            assert_eq!(report.level_up, round == 3);
            assert_eq!(report.top_occupied_row, None);
        }
        assert_eq!(game.score().cleared_rows(), 12);
        assert_eq!(game.score().points(), 3600);
        assert_eq!(game.score().level(), 2);
        assert!(game.speed_ms() < 1000.0);
    }

    #[test]
    fn test_speed_multiplier_applies_immediately() {
        let mut game = scripted(&[PieceKind::T]);
        game.set_speed_multiplier(1.0);
        assert!((game.speed_ms() - 1200.0).abs() < 1e-9);
        assert!((game.snapshot().speed_multiplier - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_snapshot_reports_ghost_and_queue() {
        let game = running(&[PieceKind::I, PieceKind::T, PieceKind::O, PieceKind::S]);
        let snapshot = game.snapshot();
        assert!(snapshot.playable());
        let active = snapshot.active.expect("running game has an active piece");
        assert_eq!(active.kind, PieceKind::I);
        assert_eq!(snapshot.ghost_y, Some(20));
        assert_eq!(snapshot.lookahead, [PieceKind::T, PieceKind::O, PieceKind::S]);
        assert_eq!(snapshot.level, 1);
    }

    #[test]
    fn test_seeded_games_repeat() {
        let a = Game::new(99);
        let b = Game::new(99);
        assert_eq!(a.queue().lookahead(), b.queue().lookahead());
        assert_eq!(a.board().active().kind, b.board().active().kind);
    }
}
