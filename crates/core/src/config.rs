//! Application configuration.
//!
//! Values come from built-in defaults, then `~/.config/frontdesk/config.toml`,
//! then `FRONTDESK_*` environment variables.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use ::config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::store::RoomStore;

/// Directory under the user's config directory holding `config.toml`.
pub const CONFIG_DIR: &str = "frontdesk";

const DEFAULT_CONFIG: &str = r#"# Front desk configuration.
#
# Path of the room inventory file. Guest stays are never written to it.
# rooms_file = "/var/lib/frontdesk/rooms.txt"

# Directory receiving frontdesk.log.
log_dir = "logs"

# Write the room file after every added room, not only on exit.
autosave = false
"#;

/// Runtime settings for the front desk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Room inventory file.
    pub rooms_file: PathBuf,
    /// Directory for log output.
    pub log_dir: PathBuf,
    /// Save the room file after each added room.
    pub autosave: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            rooms_file: RoomStore::default_path(),
            log_dir: PathBuf::from("logs"),
            autosave: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from the default file location and environment.
    pub fn load() -> Result<Self> {
        Self::load_from(config_path())
    }

    /// Load configuration from `path` (optional) and environment.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let defaults = AppConfig::default();
        let settings = Config::builder()
            .set_default(
                "rooms_file",
                defaults.rooms_file.to_string_lossy().to_string(),
            )?
            .set_default("log_dir", defaults.log_dir.to_string_lossy().to_string())?
            .set_default("autosave", defaults.autosave)?
            .add_source(
                File::from(path.to_path_buf())
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(Environment::with_prefix("FRONTDESK"))
            .build()
            .with_context(|| format!("failed to read config {}", path.display()))?;

        settings
            .try_deserialize()
            .with_context(|| format!("failed to parse config {}", path.display()))
    }

    /// Store for the configured room file.
    pub fn room_store(&self) -> RoomStore {
        RoomStore::new(&self.rooms_file)
    }
}

/// Location of the user's config file.
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR)
        .join("config.toml")
}

/// Write a commented default config file if none exists yet.
pub fn ensure_default_config() -> Result<()> {
    write_default_config(config_path())
}

fn write_default_config(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create config directory {}", parent.display()))?;
    }
    fs::write(path, DEFAULT_CONFIG)
        .with_context(|| format!("failed to write config {}", path.display()))?;
    info!(path = %path.display(), "Wrote default config");
    Ok(())
}
