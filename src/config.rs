//! Window-level settings that are not part of a layout document.

use egui::Color32;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;

/// How component geometry is expressed relative to its parent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    /// Pixel offsets; the window keeps the canvas size
    Absolute,
    /// Fractions of the parent; the window resizes and fonts rescale
    #[default]
    Relative,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuiConfig {
    pub mode: LayoutMode,
    /// Root window fill behind every component
    pub background: Color32,
    /// Keyboard shortcuts for opening (Ctrl+O) and reloading (Ctrl+R) layouts
    pub shortcuts: bool,
}

impl Default for GuiConfig {
    fn default() -> Self {
        Self {
            mode: LayoutMode::default(),
            background: Color32::WHITE,
            shortcuts: true,
        }
    }
}

impl GuiConfig {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&json)?)
    }
}
