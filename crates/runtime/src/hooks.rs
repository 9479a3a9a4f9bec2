//! Level hooks that report delayed-action side effects as tracing events.

use level_actions::daction::{BehaviourEvent, EventSource, KillCategory};
use level_actions::{Level, LevelFlags, LevelHooks, Monster};

/// [`LevelHooks`] that turn every side effect into a `tracing` event.
///
/// Player-facing messages are logged at `info`; bookkeeping callbacks that
/// only other systems care about are logged at `debug`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingHooks;

impl LevelHooks for TracingHooks {
    fn monster_message(&mut self, monster: &Monster, suffix: &str) {
        tracing::info!(monster = %monster.id, "{}{}", monster.display_name(), suffix);
    }

    fn behaviour_event(&mut self, monster: &Monster, event: BehaviourEvent, source: EventSource) {
        tracing::debug!(monster = %monster.id, ?event, ?source, "behaviour event");
    }

    fn attitude_changed(&mut self, monster: &Monster) {
        tracing::debug!(monster = %monster.id, attitude = ?monster.attitude, "attitude changed");
    }

    fn monster_died(&mut self, level: &Level, monster: &Monster, how: KillCategory) {
        tracing::info!(
            level = %level.id,
            monster = %monster.id,
            ?how,
            "{} leaves the level",
            monster.display_name()
        );
    }

    fn reautomap(&mut self, level: &Level) {
        tracing::debug!(level = %level.id, "reautomapping level");
    }

    fn level_flags_unset(&mut self, level: &Level, cleared: LevelFlags, silent: bool) {
        if silent {
            tracing::debug!(level = %level.id, ?cleared, "level flags cleared");
        } else {
            tracing::info!(level = %level.id, ?cleared, "level flags cleared");
        }
    }
}
