//! Persistence for the delayed-action log.
//!
//! The log is the only piece of delayed-action state that outlives a
//! session: level cursors travel with the saved levels and the counter cache
//! is rebuilt from visited levels.

mod error;
mod file;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::FileActionLog;
pub use memory::InMemoryActionLog;
pub use traits::ActionLogRepository;
