// tabshell Settings Engine
// Loads and saves shell settings as a JSON file at the platform config path,
// then layers TABSHELL_* environment overrides on top.

use std::fs;
use std::path::{Path, PathBuf};

use crate::platform;
use crate::types::errors::SettingsError;
use crate::types::settings::ShellSettings;

pub const ENV_CONFIG: &str = "TABSHELL_CONFIG";
pub const ENV_DATA_DIR: &str = "TABSHELL_DATA_DIR";
pub const ENV_BIND: &str = "TABSHELL_BIND";
pub const ENV_API_BASE: &str = "TABSHELL_API_BASE";

const DATABASE_FILE: &str = "tabshell.db";

/// Trait defining the settings engine interface.
pub trait SettingsEngineTrait {
    fn load(&mut self) -> Result<ShellSettings, SettingsError>;
    fn save(&self) -> Result<(), SettingsError>;
    fn get_settings(&self) -> &ShellSettings;
    fn get_config_path(&self) -> &str;
}

/// Settings engine that persists settings as JSON on disk.
pub struct SettingsEngine {
    config_path: String,
    settings: ShellSettings,
    data_dir_override: Option<PathBuf>,
}

impl SettingsEngine {
    /// Creates a new SettingsEngine.
    ///
    /// If `path_override` is `Some`, uses that path for the config file.
    /// Otherwise, uses `settings.json` in the platform config directory.
    pub fn new(path_override: Option<String>) -> Self {
        let config_path = match path_override {
            Some(p) => p,
            None => platform::get_config_dir()
                .join("settings.json")
                .to_string_lossy()
                .to_string(),
        };

        Self {
            config_path,
            settings: ShellSettings::default(),
            data_dir_override: None,
        }
    }

    /// Creates an engine whose config path honours `TABSHELL_CONFIG`.
    pub fn from_env() -> Self {
        Self::new(std::env::var(ENV_CONFIG).ok())
    }

    /// Applies overrides read through `lookup` (an env-var style getter).
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(bind) = lookup(ENV_BIND) {
            self.settings.server.bind_address = bind;
        }
        if let Some(base) = lookup(ENV_API_BASE) {
            self.settings.shell.api_base_url = base;
        }
        if let Some(dir) = lookup(ENV_DATA_DIR) {
            self.data_dir_override = Some(PathBuf::from(dir));
        }
    }

    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Where the SQLite database lives: `TABSHELL_DATA_DIR`, then the
    /// configured path, then the platform data directory.
    pub fn database_path(&self) -> PathBuf {
        if let Some(dir) = &self.data_dir_override {
            return dir.join(DATABASE_FILE);
        }
        match &self.settings.server.database_path {
            Some(path) => PathBuf::from(path),
            None => platform::get_data_dir().join(DATABASE_FILE),
        }
    }
}

impl SettingsEngineTrait for SettingsEngine {
    /// Loads settings from the JSON config file.
    ///
    /// If the file does not exist, returns default settings.
    /// If the file exists but is malformed, returns a serialization error.
    fn load(&mut self) -> Result<ShellSettings, SettingsError> {
        let path = Path::new(&self.config_path);

        if !path.exists() {
            self.settings = ShellSettings::default();
            return Ok(self.settings.clone());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| SettingsError::IoError(format!("Failed to read config file: {}", e)))?;

        let settings: ShellSettings = serde_json::from_str(&content).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to parse config file: {}", e))
        })?;

        self.settings = settings;
        Ok(self.settings.clone())
    }

    /// Saves the current settings, creating parent directories as needed.
    fn save(&self) -> Result<(), SettingsError> {
        let path = Path::new(&self.config_path);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                SettingsError::IoError(format!("Failed to create config directory: {}", e))
            })?;
        }

        let json = serde_json::to_string_pretty(&self.settings).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to serialize settings: {}", e))
        })?;

        fs::write(path, json)
            .map_err(|e| SettingsError::IoError(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    fn get_settings(&self) -> &ShellSettings {
        &self.settings
    }

    fn get_config_path(&self) -> &str {
        &self.config_path
    }
}
