//! Terminal runner (default binary).
//!
//! Reads keys through crossterm, feeds frames and commands to a `Session`
//! and draws each frame with the canvas renderer.

use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event};

use blockfall::cli::Args;
use blockfall::core::Game;
use blockfall::engine::{EventLog, Session};
use blockfall::input::{handle_key_event, should_quit};
use blockfall::term::{BoardView, Canvas, Hud, Screen, Viewport};
use blockfall::types::{Command, GameConfig, Phase};

/// Frame budget; gravity runs on the game's own interval
const FRAME_MS: u64 = 16;

const LEVEL_UP_BANNER_MS: u64 = 1500;

fn main() -> Result<()> {
    let args = Args::parse();
    let config = args.resolve_config()?;
    // Open the log before touching the terminal so errors print normally.
    let first = new_session(&config, args.log_path.as_deref())?;

    let mut screen = Screen::stdout();
    screen.enter()?;

    let result = run(&mut screen, first, &config, args.log_path.as_deref());

    // Always try to restore terminal state.
    let _ = screen.leave();
    result
}

fn new_session(config: &GameConfig, log_path: Option<&Path>) -> Result<Session> {
    let game = Game::from_config(config);
    let log = match log_path {
        Some(path) => Some(EventLog::open(path)?),
        None => EventLog::from_env(),
    };
    Ok(match log {
        Some(log) => Session::with_log(game, log),
        None => Session::new(game),
    })
}

fn run(
    screen: &mut Screen,
    mut session: Session,
    config: &GameConfig,
    log_path: Option<&Path>,
) -> Result<()> {
    let clock = Instant::now();
    let view = BoardView::default();
    let mut canvas = Canvas::new(0, 0);
    let mut banner_until_ms = 0u64;

    loop {
        let now_ms = clock.elapsed().as_millis() as u64;
        if let Some(report) = session.on_frame(now_ms) {
            if report.level_up {
                banner_until_ms = now_ms + LEVEL_UP_BANNER_MS;
            }
        }

        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let hud = Hud {
            started: session.is_started(),
            level_up: now_ms < banner_until_ms,
        };
        view.render_into(&session.snapshot(), hud, Viewport::new(w, h), &mut canvas);
        screen.present(&mut canvas)?;

        if !event::poll(Duration::from_millis(FRAME_MS))? {
            continue;
        }
        match event::read()? {
            Event::Key(key) => {
                if should_quit(key) {
                    return Ok(());
                }
                let Some(command) = handle_key_event(key) else {
                    continue;
                };
                // A finished game is replaced, never reset.
                if command == Command::Resume && session.phase() == Phase::Ended {
                    session = new_session(config, log_path)?;
                    session.start();
                    banner_until_ms = 0;
                    continue;
                }
                if let Some(report) = session.on_command(command) {
                    if report.level_up {
                        banner_until_ms = now_ms + LEVEL_UP_BANNER_MS;
                    }
                }
            }
            Event::FocusLost => {
                session.on_focus_lost();
            }
            Event::Resize(_, _) => screen.invalidate(),
            _ => {}
        }
    }
}
