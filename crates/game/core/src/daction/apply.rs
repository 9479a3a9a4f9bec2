//! Application of one delayed action to the active level.
//!
//! Each kind is a single pass over the level. Passes are idempotent: replay
//! may revisit monsters an earlier pass already converted, and converting
//! them again changes nothing.

use crate::config::GameConfig;
use crate::env::{PcgRng, compute_seed, shuffle};
use crate::state::{
    Attitude, Behaviour, Branch, Enchantments, Feature, Item, ItemKind, Level, LevelFlags, Monster,
    MonsterFlags, MonsterId,
};

use super::hooks::{BehaviourEvent, EventSource, KillCategory, LevelHooks};
use super::kind::{CountedAction, DelayedAction, UncountedAction};
use super::predicate::matches;

/// Applies `act` to `level`, returning how many monsters, items or cells changed.
///
/// `seed` drives every random roll of the pass.
pub fn apply<H>(act: DelayedAction, level: &mut Level, hooks: &mut H, seed: u64) -> usize
where
    H: LevelHooks + ?Sized,
{
    tracing::debug!(level = %level.id, "applying delayed action: {}", act.name());

    let affected = match act {
        DelayedAction::Counted(_) | DelayedAction::Uncounted(UncountedAction::AllyTrog) => {
            go_hostile(act, level, hooks)
        }
        DelayedAction::Uncounted(UncountedAction::OldEnslavedSoulsPoof) => {
            free_enslaved_souls(level, hooks)
        }
        DelayedAction::Uncounted(UncountedAction::HolyNewAttempt) => {
            allow_new_attempt(level, |mon| mon.is_holy())
        }
        DelayedAction::Uncounted(UncountedAction::SlimeNewAttempt) => {
            allow_new_attempt(level, |mon| mon.is_slime())
        }
        DelayedAction::Uncounted(UncountedAction::HolyPetsGoNeutral)
        | DelayedAction::Uncounted(UncountedAction::PikelSlaves) => {
            go_good_neutral(act, level, hooks)
        }
        DelayedAction::Uncounted(UncountedAction::ShuffleDecks) => shuffle_decks(level, seed),
        DelayedAction::Uncounted(UncountedAction::Reautomap) => {
            hooks.reautomap(level);
            0
        }
        DelayedAction::Uncounted(UncountedAction::RemoveJiyvaAltars) => remove_jiyva_altars(level),
        DelayedAction::Uncounted(UncountedAction::RotCorpses) => rot_corpses(level),
        DelayedAction::Uncounted(UncountedAction::TombCtele) => tomb_loses_ctele(level, hooks),
    };

    tracing::debug!(level = %level.id, affected, "applied delayed action: {}", act.name());
    affected
}

fn go_hostile<H>(act: DelayedAction, level: &mut Level, hooks: &mut H) -> usize
where
    H: LevelHooks + ?Sized,
{
    // Reconverting to Fedhas/Jiyva must be able to win plants and slimes back.
    let allow_reconversion = matches!(
        act,
        DelayedAction::Counted(CountedAction::AllyPlant | CountedAction::AllySlime)
    );
    let is_trog = act == DelayedAction::Uncounted(UncountedAction::AllyTrog);

    let mut affected = 0;
    for mon in level.live_monsters_mut() {
        if !matches(mon, act) {
            continue;
        }

        tracing::debug!("going hostile: {}", mon.display_name());
        mon.attitude = Attitude::Hostile;
        mon.del_ench(Enchantments::CHARM);
        hooks.behaviour_event(mon, BehaviourEvent::Alert, EventSource::Player);
        hooks.attitude_changed(mon);

        if allow_reconversion {
            mon.flags.remove(MonsterFlags::ATT_CHANGE_ATTEMPT);
        }

        // Trog's gifts get their own message instead of a global one.
        if is_trog {
            hooks.monster_message(mon, " turns against you!");
        }
        affected += 1;
    }
    affected
}

fn free_enslaved_souls<H>(level: &mut Level, hooks: &mut H) -> usize
where
    H: LevelHooks + ?Sized,
{
    let souls: Vec<MonsterId> = level
        .live_monsters()
        .filter(|mon| mon.is_enslaved_soul())
        .map(|mon| mon.id)
        .collect();

    for &id in &souls {
        if let Some(mon) = level.monster(id) {
            hooks.monster_message(mon, " is freed.");
        }
        if let Some(mon) = level.remove_monster(id) {
            hooks.monster_died(level, &mon, KillCategory::Dismissed);
        }
    }
    souls.len()
}

fn allow_new_attempt(level: &mut Level, eligible: impl Fn(&Monster) -> bool) -> usize {
    let mut affected = 0;
    for mon in level.live_monsters_mut() {
        if eligible(mon) {
            mon.flags.remove(MonsterFlags::ATT_CHANGE_ATTEMPT);
            affected += 1;
        }
    }
    affected
}

fn go_good_neutral<H>(act: DelayedAction, level: &mut Level, hooks: &mut H) -> usize
where
    H: LevelHooks + ?Sized,
{
    let is_pikel = act == DelayedAction::Uncounted(UncountedAction::PikelSlaves);

    let mut affected = 0;
    for mon in level.live_monsters_mut() {
        if !matches(mon, act) {
            continue;
        }

        mon.attitude = Attitude::GoodNeutral;
        hooks.attitude_changed(mon);

        if is_pikel {
            mon.flags |=
                MonsterFlags::NAME_REPLACE | MonsterFlags::NAME_DESCRIPTOR | MonsterFlags::NAME_NOCORPSE;
            mon.name = GameConfig::FREED_SLAVE_NAME.to_string();
        } else {
            hooks.monster_message(mon, " becomes indifferent.");
        }
        mon.behaviour = Behaviour::Wander;
        affected += 1;
    }
    affected
}

fn shuffle_decks(level: &mut Level, seed: u64) -> usize {
    let rng = PcgRng;
    let mut affected = 0;
    for (slot, item) in level.items_mut().iter_mut().enumerate() {
        if let ItemKind::Deck { cards } = &mut item.kind {
            shuffle(&rng, compute_seed(seed, slot as u64, 0, 1), cards);
            affected += 1;
        }
    }
    affected
}

fn remove_jiyva_altars(level: &mut Level) -> usize {
    let mut affected = 0;
    for pos in level.terrain.rectangle(GameConfig::MAP_BORDER) {
        if level.terrain.get(pos) == Some(Feature::AltarJiyva) {
            level.terrain.set(pos, Feature::Floor);
            affected += 1;
        }
    }
    affected
}

fn rot_corpses(level: &mut Level) -> usize {
    let mut affected = 0;
    for item in level.items_mut().iter_mut() {
        if item.is_corpse_body() {
            item.special = Item::THOROUGHLY_ROTTEN;
            affected += 1;
        }
    }
    affected
}

fn tomb_loses_ctele<H>(level: &mut Level, hooks: &mut H) -> usize
where
    H: LevelHooks + ?Sized,
{
    if level.id.branch != Branch::Tomb {
        return 0;
    }

    let cleared = level.unset_flags(LevelFlags::NO_TELE_CONTROL);
    if cleared.is_empty() {
        return 0;
    }

    // Only announced on the level where teleport control was taken away.
    let silent = level.id.depth != GameConfig::TOMB_CTELE_DEPTH;
    hooks.level_flags_unset(level, cleared, silent);
    1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::daction::hooks::{HookEvent, NoHooks, RecordingHooks};
    use crate::state::{
        Card, CorpseKind, God, LevelId, MonsterClass, MonsterType, Position, PropValue,
        TerrainGrid,
    };

    fn level() -> Level {
        Level::new(
            LevelId::new(Branch::Dungeon, 4),
            TerrainGrid::new(10, 10, Feature::Floor),
        )
    }

    fn add(level: &mut Level, mon: Monster) {
        level.add_monster(mon).unwrap();
    }

    #[test]
    fn hostile_flip_alerts_and_removes_charm() {
        let mut lvl = level();
        add(
            &mut lvl,
            Monster::new(MonsterId(1), MonsterType::Imp)
                .with_class(MonsterClass::EVIL)
                .with_attitude(Attitude::Friendly)
                .with_enchantments(Enchantments::CHARM),
        );
        add(&mut lvl, Monster::new(MonsterId(2), MonsterType::Orc).with_attitude(Attitude::Friendly));

        let mut hooks = RecordingHooks::new();
        let affected = apply(CountedAction::AllyUnholyEvil.into(), &mut lvl, &mut hooks, 0);

        assert_eq!(affected, 1);
        let imp = lvl.monster(MonsterId(1)).unwrap();
        assert_eq!(imp.attitude, Attitude::Hostile);
        assert!(!imp.has_ench(Enchantments::CHARM));
        assert_eq!(lvl.monster(MonsterId(2)).unwrap().attitude, Attitude::Friendly);
        assert_eq!(
            hooks.events,
            vec![
                HookEvent::Behaviour {
                    monster: MonsterId(1),
                    event: BehaviourEvent::Alert,
                    source: EventSource::Player,
                },
                HookEvent::AttitudeChanged {
                    monster: MonsterId(1),
                    attitude: Attitude::Hostile,
                },
            ]
        );
    }

    #[test]
    fn plant_flip_clears_reconversion_flag() {
        let mut lvl = level();
        add(
            &mut lvl,
            Monster::new(MonsterId(1), MonsterType::Oklob)
                .with_class(MonsterClass::PLANT)
                .with_attitude(Attitude::Friendly)
                .with_flags(MonsterFlags::ATT_CHANGE_ATTEMPT),
        );

        apply(CountedAction::AllyPlant.into(), &mut lvl, &mut NoHooks, 0);

        let plant = lvl.monster(MonsterId(1)).unwrap();
        assert_eq!(plant.attitude, Attitude::Hostile);
        assert!(!plant.flags.contains(MonsterFlags::ATT_CHANGE_ATTEMPT));
    }

    #[test]
    fn spellcaster_flip_keeps_reconversion_flag() {
        let mut lvl = level();
        add(
            &mut lvl,
            Monster::new(MonsterId(1), MonsterType::OrcPriest)
                .with_class(MonsterClass::SPELLCASTER)
                .with_attitude(Attitude::Friendly)
                .with_flags(MonsterFlags::ATT_CHANGE_ATTEMPT),
        );

        apply(CountedAction::AllySpellcaster.into(), &mut lvl, &mut NoHooks, 0);

        let priest = lvl.monster(MonsterId(1)).unwrap();
        assert_eq!(priest.attitude, Attitude::Hostile);
        assert!(priest.flags.contains(MonsterFlags::ATT_CHANGE_ATTEMPT));
    }

    #[test]
    fn trog_gifts_announce_betrayal() {
        let mut lvl = level();
        add(
            &mut lvl,
            Monster::new(MonsterId(1), MonsterType::Berserker)
                .gift_of(God::Trog)
                .with_attitude(Attitude::Friendly),
        );

        let mut hooks = RecordingHooks::new();
        apply(UncountedAction::AllyTrog.into(), &mut lvl, &mut hooks, 0);

        assert_eq!(lvl.monster(MonsterId(1)).unwrap().attitude, Attitude::Hostile);
        assert_eq!(hooks.messages().collect::<Vec<_>>(), vec!["berserker turns against you!"]);
    }

    #[test]
    fn enslaved_souls_are_dismissed() {
        let mut lvl = level();
        add(
            &mut lvl,
            Monster::new(MonsterId(7), MonsterType::SpectralThing)
                .with_class(MonsterClass::ENSLAVED_SOUL | MonsterClass::UNDEAD),
        );
        add(&mut lvl, Monster::new(MonsterId(8), MonsterType::Orc));

        let mut hooks = RecordingHooks::new();
        let affected = apply(UncountedAction::OldEnslavedSoulsPoof.into(), &mut lvl, &mut hooks, 0);

        assert_eq!(affected, 1);
        assert!(lvl.monster(MonsterId(7)).is_none());
        assert!(lvl.monster(MonsterId(8)).is_some());
        assert_eq!(
            hooks.events,
            vec![
                HookEvent::Message {
                    monster: MonsterId(7),
                    text: "spectral thing is freed.".to_string(),
                },
                HookEvent::Died {
                    level: lvl.id,
                    monster: MonsterId(7),
                    how: KillCategory::Dismissed,
                },
            ]
        );
    }

    #[test]
    fn new_attempt_clears_flag_without_touching_attitude() {
        let mut lvl = level();
        add(
            &mut lvl,
            Monster::new(MonsterId(1), MonsterType::Angel)
                .with_class(MonsterClass::HOLY)
                .with_flags(MonsterFlags::ATT_CHANGE_ATTEMPT),
        );
        add(
            &mut lvl,
            Monster::new(MonsterId(2), MonsterType::Jelly)
                .with_class(MonsterClass::SLIME)
                .with_flags(MonsterFlags::ATT_CHANGE_ATTEMPT),
        );

        apply(UncountedAction::HolyNewAttempt.into(), &mut lvl, &mut NoHooks, 0);
        let angel = lvl.monster(MonsterId(1)).unwrap();
        assert!(!angel.flags.contains(MonsterFlags::ATT_CHANGE_ATTEMPT));
        assert_eq!(angel.attitude, Attitude::Hostile);
        assert!(lvl.monster(MonsterId(2)).unwrap().flags.contains(MonsterFlags::ATT_CHANGE_ATTEMPT));

        apply(UncountedAction::SlimeNewAttempt.into(), &mut lvl, &mut NoHooks, 0);
        assert!(!lvl.monster(MonsterId(2)).unwrap().flags.contains(MonsterFlags::ATT_CHANGE_ATTEMPT));
    }

    #[test]
    fn holy_pets_become_indifferent() {
        let mut lvl = level();
        add(
            &mut lvl,
            Monster::new(MonsterId(1), MonsterType::Daeva)
                .with_class(MonsterClass::HOLY)
                .gift_of(God::ShiningOne)
                .with_attitude(Attitude::Friendly),
        );
        lvl.monster_mut(MonsterId(1)).unwrap().behaviour = Behaviour::Seek;

        let mut hooks = RecordingHooks::new();
        apply(UncountedAction::HolyPetsGoNeutral.into(), &mut lvl, &mut hooks, 0);

        let daeva = lvl.monster(MonsterId(1)).unwrap();
        assert_eq!(daeva.attitude, Attitude::GoodNeutral);
        assert_eq!(daeva.behaviour, Behaviour::Wander);
        assert!(daeva.name.is_empty());
        assert_eq!(hooks.messages().collect::<Vec<_>>(), vec!["daeva becomes indifferent."]);
    }

    #[test]
    fn pikel_slaves_are_renamed_and_stop_matching() {
        let mut lvl = level();
        add(
            &mut lvl,
            Monster::new(MonsterId(3), MonsterType::Slave)
                .with_flags(MonsterFlags::BAND_MEMBER)
                .with_prop(GameConfig::PIKEL_BAND_PROP, PropValue::Bool(true))
                .with_attitude(Attitude::Hostile),
        );

        let mut hooks = RecordingHooks::new();
        assert_eq!(apply(UncountedAction::PikelSlaves.into(), &mut lvl, &mut hooks, 0), 1);

        let slave = lvl.monster(MonsterId(3)).unwrap();
        assert_eq!(slave.name, GameConfig::FREED_SLAVE_NAME);
        assert_eq!(slave.attitude, Attitude::GoodNeutral);
        assert!(slave.flags.contains(
            MonsterFlags::NAME_REPLACE | MonsterFlags::NAME_DESCRIPTOR | MonsterFlags::NAME_NOCORPSE
        ));
        assert_eq!(hooks.messages().count(), 0);
        assert!(!matches(slave, UncountedAction::PikelSlaves.into()));

        assert_eq!(apply(UncountedAction::PikelSlaves.into(), &mut lvl, &mut hooks, 0), 0);
    }

    #[test]
    fn decks_are_shuffled_in_place() {
        let mut lvl = level();
        let cards: Vec<Card> = (0..20).map(Card).collect();
        let slot = lvl.add_item(Item::deck(Position::new(2, 2), cards.clone())).unwrap();
        lvl.add_item(Item::new(ItemKind::Potion, Position::new(3, 3))).unwrap();

        let affected = apply(UncountedAction::ShuffleDecks.into(), &mut lvl, &mut NoHooks, 99);
        assert_eq!(affected, 1);

        let mut shuffled = lvl.items().get(slot).unwrap().deck_cards().unwrap().to_vec();
        shuffled.sort();
        assert_eq!(shuffled, cards);
    }

    #[test]
    fn deck_shuffle_depends_only_on_seed() {
        let cards: Vec<Card> = (0..20).map(Card).collect();
        let mut first = level();
        first.add_item(Item::deck(Position::new(2, 2), cards.clone())).unwrap();
        let mut second = first.clone();

        apply(UncountedAction::ShuffleDecks.into(), &mut first, &mut NoHooks, 5);
        apply(UncountedAction::ShuffleDecks.into(), &mut second, &mut NoHooks, 5);
        assert_eq!(first, second);
    }

    #[test]
    fn reautomap_is_delegated() {
        let mut lvl = level();
        let mut hooks = RecordingHooks::new();
        apply(UncountedAction::Reautomap.into(), &mut lvl, &mut hooks, 0);
        assert_eq!(hooks.events, vec![HookEvent::Reautomapped { level: lvl.id }]);
    }

    #[test]
    fn jiyva_altars_become_floor_inside_border() {
        let mut lvl = level();
        lvl.set_feature(Position::new(4, 4), Feature::AltarJiyva).unwrap();
        lvl.set_feature(Position::new(5, 5), Feature::AltarZin).unwrap();
        lvl.set_feature(Position::new(0, 0), Feature::AltarJiyva).unwrap();

        let affected = apply(UncountedAction::RemoveJiyvaAltars.into(), &mut lvl, &mut NoHooks, 0);

        assert_eq!(affected, 1);
        assert_eq!(lvl.terrain.get(Position::new(4, 4)), Some(Feature::Floor));
        assert_eq!(lvl.terrain.get(Position::new(5, 5)), Some(Feature::AltarZin));
        // The permanent border is never touched.
        assert_eq!(lvl.terrain.get(Position::new(0, 0)), Some(Feature::AltarJiyva));
    }

    #[test]
    fn only_body_corpses_rot() {
        let mut lvl = level();
        let body = lvl.add_item(Item::corpse(Position::new(1, 1), CorpseKind::Body, 150)).unwrap();
        let bones = lvl
            .add_item(Item::corpse(Position::new(1, 2), CorpseKind::Skeleton, 150))
            .unwrap();

        apply(UncountedAction::RotCorpses.into(), &mut lvl, &mut NoHooks, 0);

        assert_eq!(lvl.items().get(body).unwrap().special, Item::THOROUGHLY_ROTTEN);
        assert_eq!(lvl.items().get(bones).unwrap().special, 150);
    }

    #[test]
    fn tomb_ctele_only_affects_tomb_levels() {
        let mut dungeon = level().with_flags(LevelFlags::NO_TELE_CONTROL);
        apply(UncountedAction::TombCtele.into(), &mut dungeon, &mut NoHooks, 0);
        assert!(dungeon.flags.contains(LevelFlags::NO_TELE_CONTROL));

        for (depth, silent) in [(1, true), (3, false)] {
            let mut tomb = Level::new(
                LevelId::new(Branch::Tomb, depth),
                TerrainGrid::new(5, 5, Feature::Floor),
            )
            .with_flags(LevelFlags::NO_TELE_CONTROL);

            let mut hooks = RecordingHooks::new();
            apply(UncountedAction::TombCtele.into(), &mut tomb, &mut hooks, 0);

            assert!(!tomb.flags.contains(LevelFlags::NO_TELE_CONTROL));
            assert_eq!(
                hooks.events,
                vec![HookEvent::FlagsUnset {
                    level: tomb.id,
                    cleared: LevelFlags::NO_TELE_CONTROL,
                    silent,
                }]
            );

            // Replaying is a no-op.
            apply(UncountedAction::TombCtele.into(), &mut tomb, &mut hooks, 0);
            assert_eq!(hooks.events.len(), 1);
        }
    }

    #[test]
    fn reapplying_hostile_flip_is_harmless() {
        let mut lvl = level();
        add(
            &mut lvl,
            Monster::new(MonsterId(1), MonsterType::Zombie)
                .with_class(MonsterClass::UNDEAD)
                .gift_of(God::Yredelemnul)
                .with_attitude(Attitude::Friendly),
        );

        apply(CountedAction::AllyYredSlave.into(), &mut lvl, &mut NoHooks, 0);
        let once = lvl.clone();
        apply(CountedAction::AllyYredSlave.into(), &mut lvl, &mut NoHooks, 0);
        assert_eq!(lvl, once);
    }
}
