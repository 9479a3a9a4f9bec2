//! Repository contract for the persisted delayed-action log.

use level_actions::{ActionLog, DelayedAction};

use super::Result;

/// Append-only storage for the session's delayed-action log.
///
/// The log is part of the player's save: every scheduled action must reach
/// the repository before it is applied anywhere, so a reloaded session
/// replays exactly what the previous one did.
pub trait ActionLogRepository: Send {
    /// Appends one entry.
    ///
    /// Returns the position the entry was written at. Positions are
    /// implementation-defined but strictly increasing.
    fn append(&mut self, act: DelayedAction) -> Result<u64>;

    /// Reads back every entry in append order.
    fn load_all(&mut self) -> Result<ActionLog>;

    /// Flushes buffered writes to durable storage.
    fn flush(&mut self) -> Result<()>;

    /// Number of entries stored.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
