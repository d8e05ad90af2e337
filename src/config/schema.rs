use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/gamehaul/config.toml` or `~/.config/gamehaul/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `GAMEHAUL__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub catalog: CatalogSettings,
    pub volumes: VolumeSettings,
    pub ui: UiSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    /// Where the JSON catalog lives. Relative paths resolve against the
    /// working directory, matching where older installs kept their file.
    pub path: String,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            path: "games.json".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VolumeSettings {
    /// Volume roots to manage, e.g. `["D:", "E:"]` or `["/mnt/ssd", "/mnt/hdd"]`.
    /// Empty means "scan drive letters" (Windows only).
    pub roots: Vec<String>,
    /// The volume shown in the right-hand pane. Defaults to the first root.
    pub primary: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ haul your games, keep your catalog ~ ".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Log file path. Unset disables logging entirely, keeping the terminal
    /// free of stray output while the TUI is up.
    pub file: Option<String>,
    /// `tracing` env-filter directive, e.g. "info" or "gamehaul=debug".
    pub filter: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            file: None,
            filter: "info".to_string(),
        }
    }
}
