use std::path::PathBuf;
use std::sync::OnceLock;

/// XDG-compliant directory layout for pomolofi.
///
/// On Linux this follows the XDG Base Directory Specification:
///   Config:  $XDG_CONFIG_HOME/pomolofi  (~/.config/pomolofi)
///   Data:    $XDG_DATA_HOME/pomolofi    (~/.local/share/pomolofi)
///
/// On macOS both resolve under ~/Library/Application Support/pomolofi.
/// Base paths are resolved once and cached in OnceLock cells.

static DATA_DIR: OnceLock<PathBuf> = OnceLock::new();
static CONFIG_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Root data directory: $XDG_DATA_HOME/pomolofi
pub fn data_dir() -> &'static PathBuf {
    DATA_DIR.get_or_init(|| {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("pomolofi")
    })
}

/// Root config directory: $XDG_CONFIG_HOME/pomolofi
pub fn config_dir() -> &'static PathBuf {
    CONFIG_DIR.get_or_init(|| {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("pomolofi")
    })
}

/// Config file path: <config_dir>/config.toml
pub fn config_file() -> PathBuf {
    config_dir().join("config.toml")
}

/// Persisted UI preferences: <data_dir>/prefs.toml
pub fn prefs_file() -> PathBuf {
    data_dir().join("prefs.toml")
}

/// Log file: <data_dir>/pomolofi.log
pub fn log_file() -> PathBuf {
    data_dir().join("pomolofi.log")
}

/// Default music directory: <data_dir>/music
pub fn music_dir() -> PathBuf {
    data_dir().join("music")
}
