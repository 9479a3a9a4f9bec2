//! Delayed actions: world-wide effects that reach dormant levels lazily.
//!
//! When something happens that should affect every level of the dungeon
//! (a god abandoning the player, a monster band being freed), the effect is
//! recorded once in the session's [`ActionLog`]. Each [`Level`](crate::state::Level)
//! carries a cursor into that log and replays the entries it has not seen the
//! next time it is loaded.
//!
//! Counted kinds additionally keep a cached population count per level so the
//! rest of the game can ask how many affected monsters remain anywhere.
mod apply;
mod counters;
mod hooks;
mod kind;
mod log;
mod predicate;
mod queue;

pub use apply::apply;
pub use counters::{CounterCache, LevelCounters};
pub use hooks::{
    BehaviourEvent, EventSource, HookEvent, KillCategory, LevelHooks, NoHooks, RecordingHooks,
};
pub use kind::{ACTION_NAMES, ActionError, CountedAction, DelayedAction, UncountedAction};
pub use log::ActionLog;
pub use predicate::matches;
pub use queue::DelayedActions;
