//! Side effects emitted while delayed actions are applied.
//!
//! Applying an action mutates the level directly; everything else the game
//! reacts with (messages, monster AI alerts, attitude bookkeeping, automap)
//! is reported through [`LevelHooks`] so the core stays free of rendering and
//! AI concerns.

use crate::state::{Attitude, Level, LevelFlags, LevelId, Monster, MonsterId};

/// Behaviour events raised on a monster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BehaviourEvent {
    /// The monster becomes aware of its source.
    Alert,
}

/// Who caused a behaviour event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventSource {
    Player,
}

/// How a monster left the level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum KillCategory {
    /// Removed without a fight: no corpse, no experience.
    Dismissed,
}

/// Receiver for side effects of delayed-action application.
///
/// Every method defaults to a no-op.
pub trait LevelHooks {
    /// A message about `monster`, e.g. `" turns against you!"`.
    fn monster_message(&mut self, _monster: &Monster, _suffix: &str) {}

    fn behaviour_event(&mut self, _monster: &Monster, _event: BehaviourEvent, _source: EventSource) {}

    /// The monster's attitude changed; dependent state must be re-derived.
    fn attitude_changed(&mut self, _monster: &Monster) {}

    /// `monster` has already been removed from `level`.
    fn monster_died(&mut self, _level: &Level, _monster: &Monster, _how: KillCategory) {}

    /// Re-applies passive mapping to the level.
    fn reautomap(&mut self, _level: &Level) {}

    /// `cleared` were removed from the level flags; `silent` suppresses any announcement.
    fn level_flags_unset(&mut self, _level: &Level, _cleared: LevelFlags, _silent: bool) {}
}

/// Hooks that ignore every side effect.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoHooks;

impl LevelHooks for NoHooks {}

/// One recorded side effect.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HookEvent {
    Message { monster: MonsterId, text: String },
    Behaviour { monster: MonsterId, event: BehaviourEvent, source: EventSource },
    AttitudeChanged { monster: MonsterId, attitude: Attitude },
    Died { level: LevelId, monster: MonsterId, how: KillCategory },
    Reautomapped { level: LevelId },
    FlagsUnset { level: LevelId, cleared: LevelFlags, silent: bool },
}

/// Hooks that record every side effect in order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecordingHooks {
    pub events: Vec<HookEvent>,
}

impl RecordingHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&mut self) -> Vec<HookEvent> {
        std::mem::take(&mut self.events)
    }

    /// Message texts in emission order.
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.events.iter().filter_map(|event| match event {
            HookEvent::Message { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl LevelHooks for RecordingHooks {
    fn monster_message(&mut self, monster: &Monster, suffix: &str) {
        self.events.push(HookEvent::Message {
            monster: monster.id,
            text: format!("{}{}", monster.display_name(), suffix),
        });
    }

    fn behaviour_event(&mut self, monster: &Monster, event: BehaviourEvent, source: EventSource) {
        self.events.push(HookEvent::Behaviour {
            monster: monster.id,
            event,
            source,
        });
    }

    fn attitude_changed(&mut self, monster: &Monster) {
        self.events.push(HookEvent::AttitudeChanged {
            monster: monster.id,
            attitude: monster.attitude,
        });
    }

    fn monster_died(&mut self, level: &Level, monster: &Monster, how: KillCategory) {
        self.events.push(HookEvent::Died {
            level: level.id,
            monster: monster.id,
            how,
        });
    }

    fn reautomap(&mut self, level: &Level) {
        self.events.push(HookEvent::Reautomapped { level: level.id });
    }

    fn level_flags_unset(&mut self, level: &Level, cleared: LevelFlags, silent: bool) {
        self.events.push(HookEvent::FlagsUnset {
            level: level.id,
            cleared,
            silent,
        });
    }
}
