//! User-facing settings for the ledger tools, persisted as JSON.

use std::{
    env,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{currency::DEFAULT_CURRENCY, errors::Result};

/// Environment variable naming the configuration file.
pub const CONFIG_PATH_ENV: &str = "LEDGER_CONFIG";
/// Environment variable overriding [`Config::data_file`].
pub const DATA_FILE_ENV: &str = "LEDGER_DATA_FILE";

const DEFAULT_CONFIG_FILE: &str = "ledger.json";
const DEFAULT_DATA_FILE: &str = "accounts.csv";
const TMP_SUFFIX: &str = "tmp";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "Config::default_data_file")]
    pub data_file: PathBuf,
    #[serde(default = "Config::default_currency")]
    pub currency: String,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: Self::default_data_file(),
            currency: Self::default_currency(),
            ui_color_enabled: Self::default_ui_color_enabled(),
        }
    }
}

impl Config {
    pub fn default_data_file() -> PathBuf {
        PathBuf::from(DEFAULT_DATA_FILE)
    }

    pub fn default_currency() -> String {
        DEFAULT_CURRENCY.into()
    }

    pub fn default_ui_color_enabled() -> bool {
        true
    }

    /// Applies overrides from the process environment.
    pub fn apply_env(&mut self) {
        if let Some(path) = env::var_os(DATA_FILE_ENV).filter(|value| !value.is_empty()) {
            self.data_file = PathBuf::from(path);
        }
    }
}

/// Loads and stores [`Config`] at a fixed path.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Uses `LEDGER_CONFIG` when set, else `ledger.json` in the working directory.
    pub fn from_env() -> Self {
        let path = env::var_os(CONFIG_PATH_ENV)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        Self::new(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the configuration, falling back to defaults when the file is missing.
    pub fn load(&self) -> Result<Config> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&data)?)
    }

    /// Writes the configuration by staging to a temporary file and renaming it.
    pub fn save(&self, config: &Config) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        let mut file = File::create(&tmp)?;
        file.write_all(json.as_bytes())?;
        file.flush()?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}
