//! Cached population counts for counted delayed actions.
//!
//! Counts are refreshed by a full scan of a level, never incrementally. The
//! cache keeps one entry per level the player has visited, so other systems
//! can ask "how many allied holy beings are left anywhere" without loading
//! dormant levels.

use std::collections::BTreeMap;

use strum::{EnumCount, IntoEnumIterator};

use crate::state::{Level, LevelId};

use super::kind::CountedAction;
use super::predicate::matches;

/// Population counts of one level, one slot per [`CountedAction`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelCounters([u32; CountedAction::COUNT]);

impl LevelCounters {
    /// Counts the live monsters of `level` matching each counted kind.
    pub fn scan(level: &Level) -> Self {
        let mut counters = Self::default();
        for mon in level.live_monsters() {
            for act in CountedAction::iter() {
                if matches(mon, act.into()) {
                    counters.0[act.slot()] += 1;
                }
            }
        }
        counters
    }

    pub fn get(&self, act: CountedAction) -> u32 {
        self.0[act.slot()]
    }

    pub fn clear(&mut self, act: CountedAction) {
        self.0[act.slot()] = 0;
    }
}

/// Per-level counters for every level the session has recorded.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CounterCache {
    levels: BTreeMap<LevelId, LevelCounters>,
}

impl CounterCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recomputes every counter of `level` from scratch.
    pub fn update(&mut self, level: &Level) {
        self.insert(level.id, LevelCounters::scan(level));
    }

    /// Stores precomputed counters for `id`, replacing any previous entry.
    pub fn insert(&mut self, id: LevelId, counters: LevelCounters) {
        tracing::trace!(level = %id, ?counters, "updated delayed-action counters");
        self.levels.insert(id, counters);
    }

    /// Zeroes `act` on every cached level.
    pub fn clear(&mut self, act: CountedAction) {
        for counters in self.levels.values_mut() {
            counters.clear(act);
        }
    }

    /// Sum of `act` over all cached levels; unknown levels count as zero.
    pub fn query(&self, act: CountedAction) -> u32 {
        self.levels.values().map(|counters| counters.get(act)).sum()
    }

    pub fn level(&self, id: LevelId) -> Option<&LevelCounters> {
        self.levels.get(&id)
    }
}
