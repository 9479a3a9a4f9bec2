//! Session runtime for delayed actions.
//!
//! This crate wires the deterministic core of `level-actions` to the parts of
//! a game session that live outside it: a persisted action log, the set of
//! generated levels and hooks that surface side effects.
//!
//! Modules are organized by responsibility:
//! - [`session`] hosts the level lifecycle (enter, schedule, catch up)
//! - [`repository`] stores the action log in memory or on disk
//! - [`hooks`] renders side effects as `tracing` events
//! - [`config`] resolves where saves live
pub mod config;
pub mod error;
pub mod hooks;
pub mod repository;
pub mod session;

pub use config::{SessionConfig, default_save_dir};
pub use error::{Result, RuntimeError};
pub use hooks::TracingHooks;
pub use repository::{ActionLogRepository, FileActionLog, InMemoryActionLog, RepositoryError};
pub use session::Session;
