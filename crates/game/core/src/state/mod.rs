//! World state touched by delayed actions.
//!
//! This module owns the data structures for a level: its monsters, items,
//! terrain and flags, plus the replay cursor recording how much of the
//! session's delayed-action log the level has already seen.
mod item;
mod level;
mod monster;
mod terrain;

pub use item::{Card, CorpseKind, DeckCards, Item, ItemKind, ItemTable};
pub use level::{Branch, Level, LevelError, LevelFlags, LevelId};
pub use monster::{
    Attitude, Behaviour, Enchantments, God, Monster, MonsterClass, MonsterFlags, MonsterId,
    MonsterType, PropValue,
};
pub use terrain::{Feature, Position, TerrainGrid};
