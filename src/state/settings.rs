use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::data::loader::DEFAULT_DELIMITER;
use crate::error::{AppError, Result};
use crate::state::theme::Theme;

/// Environment variable naming a JSON settings file.
pub const CONFIG_ENV: &str = "SHEETLENS_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Field separator of loaded files. Must be a single ASCII character.
    pub delimiter: char,
    pub theme: Theme,
    pub window_size: [f32; 2],
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER as char,
            theme: Theme::default(),
            window_size: [1000.0, 700.0],
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings =
            serde_json::from_str(json).map_err(|e| AppError::config(e.to_string()))?;
        settings.delimiter_byte()?;
        Ok(settings)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| AppError::config(format!("Cannot read {}: {e}", path.display())))?;
        Self::from_json(&json)
    }

    /// Settings from `$SHEETLENS_CONFIG`, or defaults. A broken file still
    /// yields defaults; the error is handed back so it can be shown.
    pub fn from_env() -> (Self, Option<AppError>) {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => match Self::load(Path::new(&path)) {
                Ok(settings) => (settings, None),
                Err(e) => (Self::default(), Some(e)),
            },
            None => (Self::default(), None),
        }
    }

    pub fn delimiter_byte(&self) -> Result<u8> {
        match self.delimiter {
            '"' | '\n' | '\r' => Err(AppError::config(format!(
                "delimiter {:?} clashes with quoting or line endings",
                self.delimiter
            ))),
            c if c.is_ascii() => Ok(c as u8),
            c => Err(AppError::config(format!(
                "delimiter {c:?} is not an ASCII character"
            ))),
        }
    }
}
