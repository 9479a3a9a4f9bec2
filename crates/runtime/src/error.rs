//! Errors surfaced by the session runtime.

use level_actions::LevelId;
use thiserror::Error;

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("level {0} is not part of this session")]
    UnknownLevel(LevelId),

    #[error("level {0} is already part of this session")]
    DuplicateLevel(LevelId),

    #[error("level {level} has replayed {done} delayed actions but the log holds {len}")]
    CursorAhead {
        level: LevelId,
        done: usize,
        len: usize,
    },

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
