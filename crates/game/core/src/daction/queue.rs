//! Scheduling and replay of delayed actions.
//!
//! [`DelayedActions`] is the session-wide context: the append-only log, the
//! counter cache and the configuration seeding replays. Scheduling appends to
//! the log and immediately replays it on the active level; every other level
//! catches up the next time it becomes active.

use crate::config::GameConfig;
use crate::env::compute_seed;
use crate::state::Level;

use super::apply::apply;
use super::counters::{CounterCache, LevelCounters};
use super::hooks::LevelHooks;
use super::kind::{CountedAction, DelayedAction};
use super::log::ActionLog;

/// Session state shared by every level.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DelayedActions {
    config: GameConfig,
    log: ActionLog,
    counters: CounterCache,
}

impl DelayedActions {
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            log: ActionLog::new(),
            counters: CounterCache::new(),
        }
    }

    /// Resumes a session from a previously recorded log.
    ///
    /// The counter cache starts empty; [`recount`](Self::recount) the saved
    /// levels to restore it.
    pub fn from_log(config: GameConfig, log: ActionLog) -> Self {
        Self {
            config,
            log,
            counters: CounterCache::new(),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn log(&self) -> &ActionLog {
        &self.log
    }

    pub fn counters(&self) -> &CounterCache {
        &self.counters
    }

    /// Records `act` for the whole world and applies it to `active` at once.
    ///
    /// A counted kind's counters drop to zero before anything is mutated: the
    /// monsters it counts are gone as far as the rest of the game is
    /// concerned, even on levels that have not caught up yet.
    pub fn schedule<H>(&mut self, act: impl Into<DelayedAction>, active: &mut Level, hooks: &mut H)
    where
        H: LevelHooks + ?Sized,
    {
        let act = act.into();
        tracing::debug!("scheduling delayed action: {}", act.name());
        self.log.push(act);

        if let Some(counter) = act.counter() {
            self.counters.clear(counter);
        }

        self.catchup(active, hooks);
    }

    /// Applies every log entry `level` has not seen yet, in log order.
    ///
    /// Returns the number of entries applied; zero when the level is current.
    pub fn catchup<H>(&self, level: &mut Level, hooks: &mut H) -> usize
    where
        H: LevelHooks + ?Sized,
    {
        let start = level.actions_done();
        debug_assert!(
            start <= self.log.len(),
            "level {} has replayed {start} delayed actions but the log holds {}",
            level.id,
            self.log.len()
        );
        for (index, act) in self.log.entries_from(start) {
            let seed = compute_seed(self.config.game_seed, index as u64, level.id.seed_key(), 0);
            apply(act, level, hooks, seed);
            level.advance_cursor();
        }

        let applied = level.actions_done().saturating_sub(start);
        if applied > 0 {
            tracing::debug!(level = %level.id, applied, "caught up delayed actions");
        }
        applied
    }

    /// Rescans `level` and stores its population counts.
    pub fn update_counters(&mut self, level: &Level) {
        self.counters.update(level);
    }

    /// Counts a level that may be behind the log.
    ///
    /// Counted kinds still pending for `level` read zero, as they did on
    /// every level when they were scheduled.
    pub fn recount(&mut self, level: &Level) {
        let mut counters = LevelCounters::scan(level);
        for (_, act) in self.log.entries_from(level.actions_done()) {
            if let Some(counter) = act.counter() {
                counters.clear(counter);
            }
        }
        self.counters.insert(level.id, counters);
    }

    /// Remaining monsters matching `act` across all recorded levels.
    pub fn query_counter(&self, act: CountedAction) -> u32 {
        self.counters.query(act)
    }
}
