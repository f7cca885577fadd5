//! Platform-specific directory utilities
//!
//! Provides consistent directory paths across different operating systems,
//! following platform conventions for data directories.

use std::path::PathBuf;

/// Save directory: `--data-dir` if given, then `SAVE_DATA_DIR`, then the
/// platform data directory.
///
/// - macOS: `~/Library/Application Support/deckrun`
/// - Linux: `~/.local/share/deckrun` (or `$XDG_DATA_HOME/deckrun`)
/// - Windows: `%APPDATA%\deckrun`
/// - Fallback: `./save_data`
pub fn data_dir(explicit: Option<PathBuf>) -> PathBuf {
    explicit
        .or_else(|| std::env::var_os("SAVE_DATA_DIR").map(PathBuf::from))
        .unwrap_or_else(runtime::default_save_dir)
}
