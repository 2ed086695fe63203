//! Collaborators around the core game
//!
//! - [`scheduler`]: turns frame timestamps into gravity ticks
//! - [`session`]: one game plus scheduler, event log and focus handling
//! - [`event_log`]: JSON-lines record of phase changes, locks and level ups
//! - [`config`]: `GameConfig` loading from file and environment

pub mod config;
pub mod event_log;
pub mod scheduler;
pub mod session;

pub use config::{apply_env, load_config, parse_config};
pub use event_log::{EventLog, EventRecord, LOG_PATH_ENV};
pub use scheduler::Scheduler;
pub use session::Session;
