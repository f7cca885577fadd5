//! Runtime configuration and environment loading.

use std::env;
use std::path::PathBuf;

use game_core::GameConfig;

/// Runtime configuration shared by sessions and tooling.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub game_config: GameConfig,
    /// Directory holding the save file, battle history and debug log.
    pub save_dir: PathBuf,
    /// Write the run save after every completed node (default: true)
    pub enable_persistence: bool,
    /// Append a history record after every battle (default: true)
    pub enable_history: bool,
    /// Mirror the session log into a plain-text file (default: false)
    pub debug_log: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game_config: GameConfig::default(),
            save_dir: default_save_dir(),
            enable_persistence: true,
            enable_history: true,
            debug_log: false,
        }
    }
}

impl RuntimeConfig {
    /// Configuration for tests and replays: nothing touches the disk.
    pub fn ephemeral(game_config: GameConfig) -> Self {
        Self {
            game_config,
            enable_persistence: false,
            enable_history: false,
            debug_log: false,
            ..Self::default()
        }
    }

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `SAVE_DATA_DIR` - Save directory (default: platform data dir)
    /// - `ENABLE_PERSISTENCE` - Save the run between nodes (default: true)
    /// - `ENABLE_HISTORY` - Record finished battles (default: true)
    /// - `DEBUG_LOG` - Write the plain-text debug log (default: false)
    /// - `RUN_MAX_FLOOR` - Number of acts (default: 2)
    /// - `RUN_MAP_ROWS` - Rows per act map (default: 15)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = env::var("SAVE_DATA_DIR")
            && !dir.trim().is_empty()
        {
            config.save_dir = PathBuf::from(dir);
        }
        if let Some(enabled) = read_env_bool("ENABLE_PERSISTENCE") {
            config.enable_persistence = enabled;
        }
        if let Some(enabled) = read_env_bool("ENABLE_HISTORY") {
            config.enable_history = enabled;
        }
        if let Some(enabled) = read_env_bool("DEBUG_LOG") {
            config.debug_log = enabled;
        }
        if let Some(max_floor) = read_env::<u32>("RUN_MAX_FLOOR") {
            config.game_config = GameConfig::with_max_floor(max_floor).map_rows(config.game_config.map_rows);
        }
        if let Some(rows) = read_env::<u32>("RUN_MAP_ROWS") {
            config.game_config = config.game_config.map_rows(rows);
        }

        config
    }
}

/// Platform data directory for save files, falling back to `./save_data`.
///
/// - macOS: `~/Library/Application Support/deckrun`
/// - Linux: `~/.local/share/deckrun` (or `$XDG_DATA_HOME/deckrun`)
/// - Windows: `%APPDATA%\deckrun`
pub fn default_save_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "deckrun")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./save_data"))
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

fn read_env_bool(key: &str) -> Option<bool> {
    match env::var(key).ok()?.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
