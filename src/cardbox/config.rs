use crate::error::{CardboxError, Result};
use crate::persist::DEFAULT_SLOT;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";

/// Configuration for cardbox, stored in `<data dir>/config.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CardboxConfig {
    /// Name of the slot the card collection is kept under
    #[serde(default = "default_slot")]
    pub slot: String,

    /// Ask before deleting a card
    #[serde(default = "default_confirm_delete")]
    pub confirm_delete: bool,
}

fn default_slot() -> String {
    DEFAULT_SLOT.to_string()
}

fn default_confirm_delete() -> bool {
    true
}

impl Default for CardboxConfig {
    fn default() -> Self {
        Self {
            slot: default_slot(),
            confirm_delete: default_confirm_delete(),
        }
    }
}

impl CardboxConfig {
    pub const KEYS: [&'static str; 2] = ["slot", "confirm-delete"];

    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(CardboxError::Io)?;
        let config: CardboxConfig =
            serde_json::from_str(&content).map_err(CardboxError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(CardboxError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(CardboxError::Serialization)?;
        fs::write(config_path, content).map_err(CardboxError::Io)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Result<String> {
        match key {
            "slot" => Ok(self.slot.clone()),
            "confirm-delete" => Ok(self.confirm_delete.to_string()),
            other => Err(unknown_key(other)),
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "slot" => {
                let value = value.trim();
                let valid = !value.is_empty()
                    && value
                        .chars()
                        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
                if !valid {
                    return Err(CardboxError::Api(format!(
                        "slot must be letters, digits, '-' or '_', got '{}'",
                        value
                    )));
                }
                // The slot file lives next to config.json.
                if value == "config" {
                    return Err(CardboxError::Api("slot cannot be named 'config'".to_string()));
                }
                self.slot = value.to_string();
            }
            "confirm-delete" => {
                self.confirm_delete = match value.trim().to_ascii_lowercase().as_str() {
                    "true" | "yes" | "on" | "1" => true,
                    "false" | "no" | "off" | "0" => false,
                    other => {
                        return Err(CardboxError::Api(format!(
                            "confirm-delete expects true or false, got '{}'",
                            other
                        )))
                    }
                };
            }
            other => return Err(unknown_key(other)),
        }
        Ok(())
    }
}

fn unknown_key(key: &str) -> CardboxError {
    CardboxError::Api(format!(
        "Unknown config key: {} (known: {})",
        key,
        CardboxConfig::KEYS.join(", ")
    ))
}
