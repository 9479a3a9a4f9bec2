//! Delayed action kinds.
//!
//! Kinds come in two families. [`CountedAction`]s remove a population of
//! allies and keep a per-level counter of how many such monsters remain;
//! [`UncountedAction`]s are one-shot level mutations with nothing to count.
//!
//! Every kind also has a flat index (`0..DelayedAction::COUNT`, counted kinds
//! first) used when the session log is persisted.

use strum::{EnumCount, IntoEnumIterator};

use crate::error::{ErrorSeverity, GameError};

/// Delayed actions that track a live population per level.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::EnumCount,
    strum::EnumIter,
    strum::FromRepr,
)]
#[repr(u8)]
pub enum CountedAction {
    AllyHoly,
    AllyUnholyEvil,
    AllyUncleanChaotic,
    AllySpellcaster,
    AllyYredSlave,
    /// Beogh's orcs and the demons summoned by their priests.
    AllyBeogh,
    AllySlime,
    AllyPlant,
}

/// One-shot delayed actions.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::EnumCount,
    strum::EnumIter,
    strum::FromRepr,
)]
#[repr(u8)]
pub enum UncountedAction {
    OldEnslavedSoulsPoof,
    HolyNewAttempt,
    SlimeNewAttempt,
    HolyPetsGoNeutral,
    AllyTrog,
    ShuffleDecks,
    Reautomap,
    RemoveJiyvaAltars,
    PikelSlaves,
    RotCorpses,
    TombCtele,
}

/// Any action that can be recorded in the session log.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(into = "u8", try_from = "u8")
)]
pub enum DelayedAction {
    Counted(CountedAction),
    Uncounted(UncountedAction),
}

/// Diagnostic names, indexed by [`DelayedAction::index`].
///
/// The array length ties the table to the enumeration at compile time.
pub const ACTION_NAMES: [&str; DelayedAction::COUNT] = [
    "holy beings go hostile",
    "unholy/evil go hostile",
    "unclean/chaotic go hostile",
    "spellcasters go hostile",
    "yred slaves go hostile",
    "beogh orcs and their summons go hostile",
    "fellow slimes go hostile",
    "plants go hostile (allowing reconversion)",
    "old enslaved souls go poof",
    "holy beings allow another conversion attempt",
    "slimes allow another conversion attempt",
    "holy beings go neutral",
    "Trog's gifts go hostile",
    "shuffle decks",
    "reapply passive mapping",
    "remove Jiyva altars",
    "Pikel's slaves go good-neutral",
    "corpses rot",
    "Tomb loses -cTele",
];

/// Errors raised when decoding a raw action index.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionError {
    #[error("invalid delayed action kind {value} (expected 0..{})", DelayedAction::COUNT)]
    InvalidKind { value: usize },
}

impl GameError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidKind { .. } => "ACTION_INVALID_KIND",
        }
    }
}

impl CountedAction {
    /// Slot of this kind in per-level counter arrays.
    pub const fn slot(self) -> usize {
        self as usize
    }
}

impl DelayedAction {
    /// Number of kinds carrying a population counter.
    pub const NUM_COUNTED: usize = CountedAction::COUNT;
    /// Total number of kinds.
    pub const COUNT: usize = CountedAction::COUNT + UncountedAction::COUNT;

    /// Flat index: counted kinds first, then uncounted kinds.
    pub const fn index(self) -> usize {
        match self {
            Self::Counted(act) => act as usize,
            Self::Uncounted(act) => Self::NUM_COUNTED + act as usize,
        }
    }

    pub fn from_index(index: usize) -> Result<Self, ActionError> {
        let invalid = ActionError::InvalidKind { value: index };
        if index < Self::NUM_COUNTED {
            let repr = u8::try_from(index).map_err(|_| invalid.clone())?;
            CountedAction::from_repr(repr)
                .map(Self::Counted)
                .ok_or(invalid)
        } else {
            let repr = u8::try_from(index - Self::NUM_COUNTED).map_err(|_| invalid.clone())?;
            UncountedAction::from_repr(repr)
                .map(Self::Uncounted)
                .ok_or(invalid)
        }
    }

    /// Human-readable description for diagnostics.
    pub const fn name(self) -> &'static str {
        ACTION_NAMES[self.index()]
    }

    /// The counter this kind invalidates, if any.
    pub const fn counter(self) -> Option<CountedAction> {
        match self {
            Self::Counted(act) => Some(act),
            Self::Uncounted(_) => None,
        }
    }

    pub const fn is_counted(self) -> bool {
        matches!(self, Self::Counted(_))
    }

    /// Every kind in index order.
    pub fn iter() -> impl Iterator<Item = Self> {
        CountedAction::iter()
            .map(Self::Counted)
            .chain(UncountedAction::iter().map(Self::Uncounted))
    }
}

impl From<CountedAction> for DelayedAction {
    fn from(act: CountedAction) -> Self {
        Self::Counted(act)
    }
}

impl From<UncountedAction> for DelayedAction {
    fn from(act: UncountedAction) -> Self {
        Self::Uncounted(act)
    }
}

impl From<DelayedAction> for u8 {
    fn from(act: DelayedAction) -> Self {
        // COUNT is far below 256
        act.index() as u8
    }
}

impl TryFrom<u8> for DelayedAction {
    type Error = ActionError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_index(value as usize)
    }
}

impl core::fmt::Display for DelayedAction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_round_trips_for_every_kind() {
        for (expected, act) in DelayedAction::iter().enumerate() {
            assert_eq!(act.index(), expected);
            assert_eq!(DelayedAction::from_index(expected), Ok(act));
        }
        assert_eq!(DelayedAction::iter().count(), DelayedAction::COUNT);
    }

    #[test]
    fn counted_kinds_come_first() {
        for act in DelayedAction::iter() {
            assert_eq!(act.is_counted(), act.index() < DelayedAction::NUM_COUNTED);
        }
        assert_eq!(
            DelayedAction::from(UncountedAction::OldEnslavedSoulsPoof).index(),
            DelayedAction::NUM_COUNTED
        );
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        let err = DelayedAction::try_from(DelayedAction::COUNT as u8).unwrap_err();
        assert_eq!(
            err,
            ActionError::InvalidKind {
                value: DelayedAction::COUNT
            }
        );
        assert!(err.severity().is_fatal());
        assert!(DelayedAction::from_index(usize::MAX).is_err());
    }

    #[test]
    fn names_match_kinds() {
        assert_eq!(
            DelayedAction::from(CountedAction::AllyHoly).name(),
            "holy beings go hostile"
        );
        assert_eq!(
            DelayedAction::from(UncountedAction::TombCtele).to_string(),
            "Tomb loses -cTele"
        );
        assert_eq!(
            DelayedAction::from(UncountedAction::SlimeNewAttempt).name(),
            "slimes allow another conversion attempt"
        );
    }

    #[test]
    fn only_counted_kinds_have_counters() {
        assert_eq!(
            DelayedAction::from(CountedAction::AllyPlant).counter(),
            Some(CountedAction::AllyPlant)
        );
        assert_eq!(DelayedAction::from(UncountedAction::AllyTrog).counter(), None);
    }
}
