//! Items lying on a level.

use arrayvec::ArrayVec;

use crate::config::GameConfig;

use super::Position;

/// Card identifier inside a deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Card(pub u8);

pub type DeckCards = ArrayVec<Card, { GameConfig::MAX_DECK_CARDS }>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CorpseKind {
    Body,
    Skeleton,
}

/// Base type and subtype of an item.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemKind {
    Corpse(CorpseKind),
    Deck { cards: DeckCards },
    Weapon,
    Potion,
    Gold,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub kind: ItemKind,
    pub position: Position,
    pub quantity: u16,
    /// Kind-specific counter; for corpses, the freshness left before rotting.
    pub special: i32,
}

impl Item {
    /// Corpse freshness meaning "rotten through".
    pub const THOROUGHLY_ROTTEN: i32 = 1;

    pub fn new(kind: ItemKind, position: Position) -> Self {
        Self {
            kind,
            position,
            quantity: 1,
            special: 0,
        }
    }

    pub fn corpse(position: Position, kind: CorpseKind, freshness: i32) -> Self {
        Self {
            special: freshness,
            ..Self::new(ItemKind::Corpse(kind), position)
        }
    }

    pub fn deck(position: Position, cards: impl IntoIterator<Item = Card>) -> Self {
        let cards = cards.into_iter().take(GameConfig::MAX_DECK_CARDS).collect();
        Self::new(ItemKind::Deck { cards }, position)
    }

    pub fn is_corpse_body(&self) -> bool {
        matches!(self.kind, ItemKind::Corpse(CorpseKind::Body))
    }

    pub fn deck_cards(&self) -> Option<&[Card]> {
        match &self.kind {
            ItemKind::Deck { cards } => Some(cards),
            _ => None,
        }
    }
}

/// Item table of a level, capped at [`GameConfig::MAX_ITEMS`] slots.
///
/// Slots live on the heap; levels are moved between active and dormant
/// storage by value.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemTable {
    items: Vec<Item>,
}

impl ItemTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores an item and returns its slot, or hands it back if the table is full.
    pub fn insert(&mut self, item: Item) -> Result<usize, Item> {
        if self.items.len() >= GameConfig::MAX_ITEMS {
            return Err(item);
        }
        self.items.push(item);
        Ok(self.items.len() - 1)
    }

    pub fn get(&self, slot: usize) -> Option<&Item> {
        self.items.get(slot)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Item> {
        self.items.iter_mut()
    }
}
