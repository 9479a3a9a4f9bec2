use std::path::{Path, PathBuf};

use level_actions::GameConfig;

use crate::repository::{FileActionLog, Result};

/// Session configuration.
#[derive(Clone, Debug)]
pub struct SessionConfig {
    pub game_config: GameConfig,
    /// Directory holding the save files
    pub save_dir: PathBuf,
    /// Action log filename inside `save_dir`
    pub action_log_file: String,
}

impl SessionConfig {
    pub const DEFAULT_ACTION_LOG_FILE: &'static str = "actions.log";

    pub fn with_save_dir(mut self, save_dir: impl Into<PathBuf>) -> Self {
        self.save_dir = save_dir.into();
        self
    }

    pub fn with_game_config(mut self, game_config: GameConfig) -> Self {
        self.game_config = game_config;
        self
    }

    pub fn action_log_path(&self) -> PathBuf {
        self.save_dir.join(&self.action_log_file)
    }

    /// Opens the configured action log, creating it on first use.
    pub fn open_action_log(&self) -> Result<FileActionLog> {
        FileActionLog::open_or_create(&self.save_dir, &self.action_log_file)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            game_config: GameConfig::default(),
            save_dir: default_save_dir(),
            action_log_file: Self::DEFAULT_ACTION_LOG_FILE.to_string(),
        }
    }
}

/// Platform-specific data directory for saves.
///
/// - Linux: `~/.local/share/level-actions` (or `$XDG_DATA_HOME/level-actions`)
/// - macOS: `~/Library/Application Support/level-actions`
/// - Windows: `%APPDATA%\level-actions`
/// - Fallback: `./save_data`
pub fn default_save_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "level-actions")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| Path::new("./save_data").to_path_buf())
}
