use crate::collab::DEFAULT_PLACEHOLDER_BASE;
use crate::error::{CardsError, Result};
use crate::storage::{validate_key, DEFAULT_STORAGE_KEY};
use crate::theme::THEME_KEY;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";

/// Slots already taken in the data directory.
const RESERVED_KEYS: [&str; 2] = ["config", THEME_KEY];

/// Keys accepted by [`CardsConfig::get`] and [`CardsConfig::set`].
pub const CONFIG_KEYS: [&str; 3] = ["storage-key", "placeholder-base", "seed-examples"];

/// Configuration for cardshelf, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CardsConfig {
    /// Storage key holding the card collection
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Base URL for generated placeholder images
    #[serde(default = "default_placeholder_base")]
    pub placeholder_base: String,

    /// Whether an empty catalog is populated with example cards at startup
    #[serde(default = "default_seed_examples")]
    pub seed_examples: bool,
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_placeholder_base() -> String {
    DEFAULT_PLACEHOLDER_BASE.to_string()
}

fn default_seed_examples() -> bool {
    true
}

impl Default for CardsConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            placeholder_base: default_placeholder_base(),
            seed_examples: default_seed_examples(),
        }
    }
}

impl CardsConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(CardsError::Io)?;
        let config: CardsConfig =
            serde_json::from_str(&content).map_err(CardsError::Serialization)?;
        validate_storage_key(&config.storage_key)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(CardsError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(CardsError::Serialization)?;
        fs::write(config_path, content).map_err(CardsError::Io)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Result<String> {
        match key {
            "storage-key" => Ok(self.storage_key.clone()),
            "placeholder-base" => Ok(self.placeholder_base.clone()),
            "seed-examples" => Ok(self.seed_examples.to_string()),
            _ => Err(unknown_key(key)),
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "storage-key" => {
                validate_storage_key(value)?;
                self.storage_key = value.to_string();
            }
            "placeholder-base" => {
                let value = value.trim_end_matches('?');
                if value.is_empty() {
                    return Err(CardsError::Config(
                        "placeholder-base cannot be empty".to_string(),
                    ));
                }
                self.placeholder_base = value.to_string();
            }
            "seed-examples" => {
                self.seed_examples = value.parse().map_err(|_| {
                    CardsError::Config(format!(
                        "seed-examples expects true or false, got {:?}",
                        value
                    ))
                })?;
            }
            _ => return Err(unknown_key(key)),
        }
        Ok(())
    }
}

/// A storage key must be a safe file name and must not collide with another slot.
fn validate_storage_key(key: &str) -> Result<()> {
    validate_key(key)?;
    if RESERVED_KEYS.contains(&key) {
        return Err(CardsError::Config(format!(
            "storage-key {:?} is reserved",
            key
        )));
    }
    Ok(())
}

fn unknown_key(key: &str) -> CardsError {
    CardsError::Config(format!(
        "Unknown config key {:?} (expected one of: {})",
        key,
        CONFIG_KEYS.join(", ")
    ))
}
