use crate::error::Result;
use crate::storage::KeyValueStore;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Storage key for the display preference.
pub const THEME_KEY: &str = "theme";

/// Light or dark palette. Dark unless the user switched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

impl ThemeMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Dark => "dark",
            ThemeMode::Light => "light",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Dark => ThemeMode::Light,
            ThemeMode::Light => ThemeMode::Dark,
        }
    }

    /// Reads the stored JSON string. Anything unreadable falls back to dark.
    pub fn load<S: KeyValueStore>(kv: &S) -> Self {
        match kv.get(THEME_KEY) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!(error = %e, "ignoring unreadable theme preference");
                ThemeMode::Dark
            }),
            Ok(None) => ThemeMode::Dark,
            Err(e) => {
                warn!(error = %e, "could not read theme preference");
                ThemeMode::Dark
            }
        }
    }

    pub fn save<S: KeyValueStore>(self, kv: &S) -> Result<()> {
        kv.set(THEME_KEY, &serde_json::to_string(&self)?)
    }
}
