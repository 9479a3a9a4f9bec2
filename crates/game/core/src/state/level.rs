//! A single dungeon level and its replay cursor.

use std::fmt;

use bitflags::bitflags;

use crate::config::GameConfig;
use crate::error::{ErrorSeverity, GameError};

use super::{Feature, Item, ItemTable, Monster, MonsterId, Position, TerrainGrid};

/// Dungeon branches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Branch {
    #[default]
    Dungeon,
    Temple,
    Orc,
    Lair,
    Slime,
    Vaults,
    Crypt,
    Tomb,
}

/// Identity of a level: branch plus depth within the branch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelId {
    pub branch: Branch,
    pub depth: u8,
}

impl LevelId {
    pub const fn new(branch: Branch, depth: u8) -> Self {
        Self { branch, depth }
    }

    /// Compact key used to seed per-level random rolls.
    pub fn seed_key(&self) -> u32 {
        ((self.branch as u32) << 8) | self.depth as u32
    }
}

impl fmt::Display for LevelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.branch, self.depth)
    }
}

bitflags! {
    /// Level-wide rule modifiers.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct LevelFlags: u8 {
        const NO_TELE_CONTROL = 1 << 0;
        const NOT_MAPPABLE    = 1 << 1;
        const NO_MAGIC_MAP    = 1 << 2;
    }
}

/// Errors raised while assembling a level.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LevelError {
    #[error("monster list is full (max: {max})")]
    MonsterListFull { max: usize },

    #[error("item table is full (max: {max})")]
    ItemTableFull { max: usize },

    #[error("monster {id} already exists on this level")]
    DuplicateMonster { id: MonsterId },

    #[error("position {position} is outside the level map")]
    OutOfBounds { position: Position },
}

impl GameError for LevelError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MonsterListFull { .. } => "LEVEL_MONSTER_LIST_FULL",
            Self::ItemTableFull { .. } => "LEVEL_ITEM_TABLE_FULL",
            Self::DuplicateMonster { .. } => "LEVEL_DUPLICATE_MONSTER",
            Self::OutOfBounds { .. } => "LEVEL_OUT_OF_BOUNDS",
        }
    }
}

/// Live state of one level.
///
/// Only the active level is ever mutated; dormant levels keep the state they
/// had when the player left, plus `actions_done`, the number of delayed
/// actions from the session log already applied here.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Level {
    pub id: LevelId,
    pub terrain: TerrainGrid,
    pub flags: LevelFlags,
    monsters: Vec<Monster>,
    items: ItemTable,
    actions_done: usize,
}

impl Level {
    pub fn new(id: LevelId, terrain: TerrainGrid) -> Self {
        Self {
            id,
            terrain,
            flags: LevelFlags::empty(),
            monsters: Vec::new(),
            items: ItemTable::new(),
            actions_done: 0,
        }
    }

    /// Starts the replay cursor at `done` instead of zero.
    pub fn with_actions_done(mut self, done: usize) -> Self {
        self.actions_done = done;
        self
    }

    pub fn with_flags(mut self, flags: LevelFlags) -> Self {
        self.flags |= flags;
        self
    }

    /// Number of session log entries already applied to this level.
    pub fn actions_done(&self) -> usize {
        self.actions_done
    }

    /// Moves the replay cursor one entry forward.
    pub(crate) fn advance_cursor(&mut self) {
        self.actions_done += 1;
    }

    pub fn add_monster(&mut self, monster: Monster) -> Result<(), LevelError> {
        if self.monsters.len() >= GameConfig::MAX_MONSTERS {
            return Err(LevelError::MonsterListFull {
                max: GameConfig::MAX_MONSTERS,
            });
        }
        if self.monster(monster.id).is_some() {
            return Err(LevelError::DuplicateMonster { id: monster.id });
        }
        self.monsters.push(monster);
        Ok(())
    }

    /// Removes a monster from the level, returning it.
    pub fn remove_monster(&mut self, id: MonsterId) -> Option<Monster> {
        let index = self.monsters.iter().position(|mon| mon.id == id)?;
        Some(self.monsters.remove(index))
    }

    pub fn monster(&self, id: MonsterId) -> Option<&Monster> {
        self.monsters.iter().find(|mon| mon.id == id)
    }

    pub fn monster_mut(&mut self, id: MonsterId) -> Option<&mut Monster> {
        self.monsters.iter_mut().find(|mon| mon.id == id)
    }

    /// Iterates the monsters that are still alive.
    pub fn live_monsters(&self) -> impl Iterator<Item = &Monster> {
        self.monsters.iter().filter(|mon| mon.is_alive())
    }

    pub fn live_monsters_mut(&mut self) -> impl Iterator<Item = &mut Monster> {
        self.monsters.iter_mut().filter(|mon| mon.is_alive())
    }

    pub fn monster_count(&self) -> usize {
        self.monsters.len()
    }

    pub fn add_item(&mut self, item: Item) -> Result<usize, LevelError> {
        if !self.terrain.in_bounds(item.position) {
            return Err(LevelError::OutOfBounds {
                position: item.position,
            });
        }
        self.items.insert(item).map_err(|_| LevelError::ItemTableFull {
            max: GameConfig::MAX_ITEMS,
        })
    }

    pub fn items(&self) -> &ItemTable {
        &self.items
    }

    pub fn items_mut(&mut self) -> &mut ItemTable {
        &mut self.items
    }

    pub fn set_feature(&mut self, position: Position, feature: Feature) -> Result<(), LevelError> {
        if self.terrain.set(position, feature) {
            Ok(())
        } else {
            Err(LevelError::OutOfBounds { position })
        }
    }

    /// Clears `flags`, returning the subset that was actually set before.
    pub fn unset_flags(&mut self, flags: LevelFlags) -> LevelFlags {
        let cleared = self.flags & flags;
        self.flags.remove(flags);
        cleared
    }
}
