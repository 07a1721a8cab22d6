//! Configuration loading and data folder resolution
//!
//! Each setting is resolved in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! A missing config file is not an error; callers fall back to
//! [`TomlConfig::default`].

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable naming the data folder
pub const DATA_FOLDER_ENV: &str = "MPM_DATA_FOLDER";

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5780;
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// SQLite file name inside the data folder
pub const DATABASE_FILE: &str = "mpm.db";

/// Contents of `config.toml`; every key is optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TomlConfig {
    pub data_folder: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub log_level: Option<String>,
}

/// Values supplied on the command line or through clap's `env` lookup
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub data_folder: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub log_level: Option<String>,
}

/// Fully resolved service settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub data_folder: PathBuf,
    pub host: String,
    pub port: u16,
    pub log_level: String,
}

impl Settings {
    pub fn resolve(overrides: &Overrides, toml: &TomlConfig) -> Self {
        Self {
            data_folder: resolve_data_folder(
                overrides.data_folder.as_deref(),
                DATA_FOLDER_ENV,
                toml,
            ),
            host: overrides
                .host
                .clone()
                .or_else(|| toml.host.clone())
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: overrides.port.or(toml.port).unwrap_or(DEFAULT_PORT),
            log_level: overrides
                .log_level
                .clone()
                .or_else(|| toml.log_level.clone())
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
        }
    }

    pub fn database_path(&self) -> PathBuf {
        database_path(&self.data_folder)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Data folder: CLI → environment → TOML → OS default
pub fn resolve_data_folder(cli_arg: Option<&str>, env_var_name: &str, toml: &TomlConfig) -> PathBuf {
    if let Some(path) = cli_arg {
        return PathBuf::from(path);
    }

    if let Ok(path) = std::env::var(env_var_name) {
        if !path.is_empty() {
            return PathBuf::from(path);
        }
    }

    if let Some(path) = &toml.data_folder {
        return PathBuf::from(path);
    }

    default_data_folder()
}

pub fn database_path(data_folder: &Path) -> PathBuf {
    data_folder.join(DATABASE_FILE)
}

/// Parse a TOML config file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Invalid config file {}: {}", path.display(), e)))
}

/// First existing config file for the platform
pub fn find_config_file() -> Option<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join("mpm").join("config.toml"));
    if let Some(path) = user_config {
        if path.exists() {
            return Some(path);
        }
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/mpm/config.toml");
        if system_config.exists() {
            return Some(system_config);
        }
    }

    None
}

/// OS-dependent default data folder
pub fn default_data_folder() -> PathBuf {
    if cfg!(target_os = "linux") {
        // ~/.local/share/mpm
        dirs::data_local_dir()
            .map(|d| d.join("mpm"))
            .unwrap_or_else(|| PathBuf::from("/var/lib/mpm"))
    } else if cfg!(target_os = "macos") {
        dirs::data_dir()
            .map(|d| d.join("mpm"))
            .unwrap_or_else(|| PathBuf::from("/Library/Application Support/mpm"))
    } else if cfg!(target_os = "windows") {
        dirs::data_local_dir()
            .map(|d| d.join("mpm"))
            .unwrap_or_else(|| PathBuf::from("C:\\ProgramData\\mpm"))
    } else {
        PathBuf::from("./mpm_data")
    }
}
