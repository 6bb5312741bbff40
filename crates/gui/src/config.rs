//! Dispatcher settings loaded from TOML.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use invmenu_core::Text;
use serde::{Deserialize, Serialize};
use tracing::warn;

const DEFAULT_NO_PERMISSION_MESSAGE: &str = "<red>You do not have permission.";

/// Behaviour knobs for [`crate::ClickDispatcher`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct GuiConfig {
    /// Markup sent when an icon without its own no-permission action is denied.
    pub no_permission_message: String,
    /// Log denied clicks at `info` instead of `debug`.
    pub log_denied_clicks: bool,
}

impl Default for GuiConfig {
    fn default() -> Self {
        Self {
            no_permission_message: DEFAULT_NO_PERMISSION_MESSAGE.to_string(),
            log_denied_clicks: true,
        }
    }
}

impl GuiConfig {
    /// Parse from a TOML string, failing on syntax or type errors.
    pub fn load_from_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("invalid menu settings")
    }

    /// Load from `path`, falling back to defaults (with a warning) on any error.
    pub fn load_from_path(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match Self::load_from_str(&contents) {
                Ok(cfg) => cfg,
                Err(err) => {
                    warn!("Failed to parse {}: {err:#}. Using defaults", path.display());
                    GuiConfig::default()
                }
            },
            Err(err) => {
                warn!("Failed to read {}: {err}. Using defaults", path.display());
                GuiConfig::default()
            }
        }
    }

    /// The rejection message as rich text.
    pub fn no_permission_text(&self) -> Text {
        Text::markup(self.no_permission_message.clone())
    }
}
