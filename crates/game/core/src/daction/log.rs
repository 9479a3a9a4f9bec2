use super::kind::DelayedAction;

/// Session-wide, append-only record of scheduled delayed actions.
///
/// Entries are never removed or reordered. A level's replay cursor is an
/// index into this log.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ActionLog {
    entries: Vec<DelayedAction>,
}

impl ActionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry, returning its position.
    pub fn push(&mut self, act: DelayedAction) -> usize {
        self.entries.push(act);
        self.entries.len() - 1
    }

    pub fn get(&self, index: usize) -> Option<DelayedAction> {
        self.entries.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = DelayedAction> + '_ {
        self.entries.iter().copied()
    }

    /// Entries at positions `cursor..`, paired with their positions.
    pub fn entries_from(&self, cursor: usize) -> impl Iterator<Item = (usize, DelayedAction)> + '_ {
        self.entries
            .iter()
            .copied()
            .enumerate()
            .skip(cursor)
    }
}

impl FromIterator<DelayedAction> for ActionLog {
    fn from_iter<I: IntoIterator<Item = DelayedAction>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
