//! Session - one game wired to a scheduler and an event log
//!
//! The front end feeds frames (`on_frame`) and discrete input
//! (`on_command`, `on_focus_lost`); the session turns frames into gravity
//! ticks at the game's current speed and keeps the scheduler baseline in
//! step with pauses.

use std::fs::File;
use std::io::Write;

use blockfall_core::types::{Command, Phase};
use blockfall_core::{Game, GameSnapshot, KindSource, StepReport, UniformKinds};

use crate::event_log::{EventLog, EventRecord};
use crate::scheduler::Scheduler;

#[derive(Debug)]
pub struct Session<S = UniformKinds, W: Write = File> {
    game: Game<S>,
    scheduler: Scheduler,
    log: Option<EventLog<W>>,
    started: bool,
    now_ms: u64,
}

impl<S: KindSource> Session<S, File> {
    pub fn new(game: Game<S>) -> Self {
        Self {
            game,
            scheduler: Scheduler::new(),
            log: None,
            started: false,
            now_ms: 0,
        }
    }
}

impl<S: KindSource, W: Write> Session<S, W> {
    /// Session that records events to `log`
    pub fn with_log(game: Game<S>, log: EventLog<W>) -> Self {
        Self {
            game,
            scheduler: Scheduler::new(),
            log: Some(log),
            started: false,
            now_ms: 0,
        }
    }

    /// Arm automatic ticking; frames before this do nothing
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        self.scheduler.reset();
        self.log(EventRecord::Phase {
            t_ms: self.now_ms,
            phase: self.game.phase(),
        });
    }

    /// Advance the clock to `now_ms`, stepping with a gravity tick when one
    /// is due. `Ending` is always due.
    pub fn on_frame(&mut self, now_ms: u64) -> Option<StepReport> {
        self.now_ms = now_ms;
        if !self.started {
            return None;
        }
        let due = match self.game.phase() {
            Phase::Paused | Phase::Ended => false,
            Phase::Ending => true,
            Phase::New | Phase::Running => self.scheduler.due(now_ms, self.game.speed_ms()),
        };
        due.then(|| self.apply(None))
    }

    /// Forward one discrete input.
    ///
    /// Before the session starts only `Resume` has an effect: it starts it.
    /// During the countdown only the pause commands get through, so manual
    /// gravity ticks cannot speed it up.
    pub fn on_command(&mut self, command: Command) -> Option<StepReport> {
        if !self.started {
            if command == Command::Resume {
                self.start();
            }
            return None;
        }
        if self.game.phase() == Phase::New
            && !matches!(command, Command::TogglePause | Command::Resume)
        {
            return None;
        }
        Some(self.apply(Some(command)))
    }

    /// Pause a running game when the window or terminal loses focus
    pub fn on_focus_lost(&mut self) -> Option<StepReport> {
        if !self.started || self.game.phase() != Phase::Running {
            return None;
        }
        Some(self.apply(Some(Command::TogglePause)))
    }

    fn apply(&mut self, command: Option<Command>) -> StepReport {
        let before = self.game.phase();
        let report = self.game.step(command);

        if report.reset_timing {
            self.scheduler.reset();
        }
        self.record(before, &report);
        report
    }

    fn record(&mut self, before: Phase, report: &StepReport) {
        if self.log.is_none() {
            return;
        }
        let t_ms = self.now_ms;
        let score = *self.game.score();

        if report.locked {
            self.log(EventRecord::Lock {
                t_ms,
                rows_cleared: report.rows_cleared,
                points_gained: report.points_gained,
                points: score.points(),
                top_occupied_row: report.top_occupied_row,
            });
        }
        if report.level_up {
            self.log(EventRecord::LevelUp {
                t_ms,
                level: score.level(),
                speed_ms: score.speed(),
            });
        }
        if report.phase != before {
            self.log(EventRecord::Phase {
                t_ms,
                phase: report.phase,
            });
        }
        if report.entered_ended {
            self.log(EventRecord::Ended {
                t_ms,
                points: score.points(),
                cleared_rows: score.cleared_rows(),
                level: score.level(),
            });
        }
    }

    fn log(&mut self, record: EventRecord) {
        if let Some(log) = self.log.as_mut() {
            log.record(&record);
        }
    }

    pub fn game(&self) -> &Game<S> {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut Game<S> {
        &mut self.game
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.game.snapshot()
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn phase(&self) -> Phase {
        self.game.phase()
    }

    /// Give back the event log, if one is still attached
    pub fn into_log(self) -> Option<EventLog<W>> {
        self.log
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockfall_core::types::{GameConfig, PieceKind};
    use blockfall_core::ScriptedKinds;

    fn session() -> Session<ScriptedKinds> {
        let game = Game::with_source(&GameConfig::default(), ScriptedKinds::repeat(PieceKind::O));
        Session::new(game)
    }

    /// Start and run the countdown at 1000ms per tick
    fn running_session() -> Session<ScriptedKinds> {
        let mut s = session();
        s.start();
        for t in [0, 1000, 2000] {
            assert!(s.on_frame(t).is_some());
        }
        assert_eq!(s.phase(), Phase::Running);
        s
    }

    #[test]
    fn frames_do_nothing_before_start() {
        let mut s = session();
        assert!(s.on_frame(0).is_none());
        assert!(s.on_frame(5_000).is_none());
        assert!(s.on_command(Command::MoveLeft).is_none());
        assert_eq!(s.game().countdown(), 3);
    }

    #[test]
    fn resume_starts_session() {
        let mut s = session();
        assert!(s.on_command(Command::Resume).is_none());
        assert!(s.is_started());
        assert!(s.on_frame(100).is_some());
    }

    #[test]
    fn countdown_only_follows_frames() {
        let mut s = session();
        s.start();
        assert!(s.on_frame(0).is_some());
        assert!(s.on_command(Command::GravityTick).is_none());
        assert!(s.on_command(Command::GravityTick).is_none());
        assert!(s.on_command(Command::HardDrop).is_none());
        assert_eq!(s.phase(), Phase::New);
        assert_eq!(s.game().countdown(), 2);

        assert!(s.on_frame(1_000).is_some());
        assert!(s.on_frame(2_000).is_some());
        assert_eq!(s.phase(), Phase::Running);
    }

    #[test]
    fn gravity_follows_speed() {
        let mut s = running_session();
        let y = s.game().board().active().y;
        assert!(s.on_frame(2_500).is_none());
        assert!(s.on_frame(3_000).is_some());
        assert_eq!(s.game().board().active().y, y + 1);
    }

    #[test]
    fn focus_loss_pauses_and_stops_ticks() {
        let mut s = running_session();
        let report = s.on_focus_lost().expect("running game pauses");
        assert_eq!(report.phase, Phase::Paused);
        assert!(s.on_frame(60_000).is_none());
        assert!(s.on_focus_lost().is_none());

        // Resuming resets the baseline so the next frame ticks right away.
        s.on_command(Command::TogglePause);
        let y = s.game().board().active().y;
        assert!(s.on_frame(60_001).is_some());
        assert_eq!(s.game().board().active().y, y + 1);
    }

    #[test]
    fn ending_resolves_on_next_frame() {
        let mut s = running_session();
        let mut phase = Phase::Running;
        for _ in 0..12 {
            phase = s.on_command(Command::HardDrop).expect("started").phase;
            if phase != Phase::Running {
                break;
            }
        }
        assert_eq!(phase, Phase::Ending);
        let report = s.on_frame(2_001).expect("ending is always due");
        assert!(report.entered_ended);
        assert!(s.on_frame(10_000).is_none());
    }

    #[test]
    fn log_records_lifecycle() {
        let game = Game::with_source(&GameConfig::default(), ScriptedKinds::repeat(PieceKind::O));
        let mut s = Session::with_log(game, EventLog::new(Vec::new()));
        s.start();
        for t in [0, 1000, 2000] {
            s.on_frame(t);
        }
        s.on_command(Command::HardDrop);

        let bytes = s.into_log().and_then(EventLog::into_inner).expect("log attached");
        let text = String::from_utf8(bytes).expect("utf8");
        let kinds: Vec<String> = text
            .lines()
            .map(|line| {
                let value: serde_json::Value = serde_json::from_str(line).expect("json");
                value["type"].as_str().unwrap_or_default().to_string()
            })
            .collect();
        assert_eq!(kinds, vec!["phase", "phase", "lock"]);
    }
}
