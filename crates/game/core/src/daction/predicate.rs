//! Which monsters a delayed action applies to.

use crate::config::GameConfig;
use crate::state::{Enchantments, God, Monster, MonsterFlags, MonsterType};

use super::kind::{CountedAction, DelayedAction, UncountedAction};

/// Returns true if `mon` is a target of `act`.
///
/// Pure: used both to count populations and to select mutation targets.
/// Dead monsters never match. Kinds that do not act on monsters never match.
pub fn matches(mon: &Monster, act: DelayedAction) -> bool {
    if !mon.is_alive() {
        return false;
    }

    match act {
        DelayedAction::Counted(act) => matches_counter(mon, act),
        DelayedAction::Uncounted(UncountedAction::AllyTrog) => {
            mon.friendly() && mon.is_god_gift(God::Trog)
        }
        DelayedAction::Uncounted(UncountedAction::HolyPetsGoNeutral) => {
            mon.friendly()
                && !mon.has_ench(Enchantments::CHARM)
                && mon.is_holy()
                && mon.is_god_gift(God::ShiningOne)
        }
        DelayedAction::Uncounted(UncountedAction::PikelSlaves) => {
            mon.mtype == MonsterType::Slave
                && mon.flags.contains(MonsterFlags::BAND_MEMBER)
                && mon.has_prop(GameConfig::PIKEL_BAND_PROP)
                && mon.name != GameConfig::FREED_SLAVE_NAME
        }
        DelayedAction::Uncounted(_) => false,
    }
}

fn matches_counter(mon: &Monster, act: CountedAction) -> bool {
    match act {
        CountedAction::AllyHoly => mon.wont_attack() && mon.god.is_good(),
        CountedAction::AllyUnholyEvil => mon.wont_attack() && (mon.is_unholy() || mon.is_evil()),
        CountedAction::AllyUncleanChaotic => {
            mon.wont_attack() && (mon.is_unclean() || mon.is_chaotic())
        }
        CountedAction::AllySpellcaster => mon.wont_attack() && mon.is_actual_spellcaster(),
        // Enslavement alone qualifies; monsters merely marked friendly do not.
        CountedAction::AllyYredSlave => mon.is_yred_undead_slave(),
        CountedAction::AllyBeogh => mon.wont_attack() && mon.is_god_gift(God::Beogh),
        CountedAction::AllySlime => mon.is_fellow_slime(),
        // All plants count as friendly from the moment the player joined Fedhas.
        CountedAction::AllyPlant => mon.is_plant(),
    }
}
