//! In-memory action log implementation.

use level_actions::{ActionLog, DelayedAction};

use super::{ActionLogRepository, Result};

/// In-memory action log for testing and development.
///
/// Not persistent across process restarts. Offsets are entry indices.
#[derive(Clone, Debug, Default)]
pub struct InMemoryActionLog {
    entries: Vec<DelayedAction>,
}

impl InMemoryActionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all entries (for testing/debugging).
    pub fn entries(&self) -> &[DelayedAction] {
        &self.entries
    }
}

impl FromIterator<DelayedAction> for InMemoryActionLog {
    fn from_iter<I: IntoIterator<Item = DelayedAction>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl ActionLogRepository for InMemoryActionLog {
    fn append(&mut self, act: DelayedAction) -> Result<u64> {
        self.entries.push(act);
        Ok((self.entries.len() - 1) as u64)
    }

    fn load_all(&mut self) -> Result<ActionLog> {
        Ok(self.entries.iter().copied().collect())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use level_actions::{CountedAction, UncountedAction};

    #[test]
    fn offsets_are_indices() {
        let mut repo = InMemoryActionLog::new();
        assert_eq!(repo.append(CountedAction::AllyBeogh.into()).unwrap(), 0);
        assert_eq!(repo.append(UncountedAction::ShuffleDecks.into()).unwrap(), 1);
        assert_eq!(repo.len(), 2);

        let log = repo.load_all().unwrap();
        assert_eq!(log.get(1), Some(UncountedAction::ShuffleDecks.into()));
    }
}
