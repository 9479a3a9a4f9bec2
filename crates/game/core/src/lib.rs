//! Deferred world-wide effects for a multi-level dungeon.
//!
//! `level-actions` owns the delayed-action log, the per-level replay cursor,
//! the applicator that mutates a level for each logged entry and the counter
//! cache summarising counted kinds. Everything here is deterministic: the same
//! log replayed on the same level with the same [`GameConfig`] always produces
//! the same result.
//!
//! Side effects that belong to other systems (messages, AI, automap) leave the
//! crate through [`LevelHooks`]; persistence and session wiring live in the
//! runtime crate.
pub mod config;
pub mod daction;
pub mod env;
pub mod error;
pub mod state;

pub use config::GameConfig;
pub use daction::{
    ActionError, ActionLog, CountedAction, CounterCache, DelayedAction, DelayedActions,
    HookEvent, LevelHooks, NoHooks, RecordingHooks, UncountedAction,
};
pub use error::{ErrorSeverity, GameError};
pub use state::{Level, LevelError, LevelFlags, LevelId, Monster, MonsterId};
