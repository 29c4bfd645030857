//! Waylay configuration system
//!
//! This crate provides centralized configuration management for Waylay,
//! loading dialog defaults from `waylay.toml` as an alternative to
//! environment variables. Defaults are copied when a binding is resolved,
//! so editing a config value afterwards never changes existing bindings.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure for Waylay
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct WaylayConfig {
    /// Confirmation dialog defaults
    pub dialog: DialogDefaults,
}

/// Defaults applied to every binding unless overridden at bind time.
///
/// The identifiers follow the conventional markup shipped with the
/// library: an overlay `confirm` whose first child is the dialog panel,
/// with `m1_yes` / `m1_no` action buttons inside the panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DialogDefaults {
    /// Event that triggers interception
    pub event: String,
    /// Identifier of the overlay element
    pub overlay: String,
    /// Identifier of the dialog panel (default: the overlay's first child)
    pub popup: Option<String>,
    /// Identifier of the confirm button inside the panel
    pub confirm_button: String,
    /// Identifier of the deny button inside the panel
    pub deny_button: String,
    /// Which action buttons a cycle presents
    pub buttons: ButtonSet,
}

/// Which of the two action buttons a cycle presents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ButtonSet {
    #[default]
    Both,
    ConfirmOnly,
    DenyOnly,
}

impl ButtonSet {
    pub fn shows_confirm(&self) -> bool {
        !matches!(self, ButtonSet::DenyOnly)
    }

    pub fn shows_deny(&self) -> bool {
        !matches!(self, ButtonSet::ConfirmOnly)
    }
}

impl Default for DialogDefaults {
    fn default() -> Self {
        Self {
            event: "click".to_owned(),
            overlay: "confirm".to_owned(),
            popup: None,
            confirm_button: "m1_yes".to_owned(),
            deny_button: "m1_no".to_owned(),
            buttons: ButtonSet::Both,
        }
    }
}

impl WaylayConfig {
    /// Load configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the waylay.toml configuration file
    ///
    /// # Returns
    /// * `Ok(WaylayConfig)` - Successfully loaded configuration
    /// * `Err(String)` - Error message if loading failed
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {}", e))
    }

    /// Load configuration from the default location (waylay.toml in the current
    /// directory) or return default configuration if file doesn't exist
    pub fn load_or_default() -> Self {
        Self::load_from_file("waylay.toml").unwrap_or_default()
    }

    /// Merge configuration with environment variables
    ///
    /// Environment variables take precedence over configuration file values.
    /// This allows for temporary overrides without modifying the config file.
    pub fn merge_with_env(&mut self) {
        if let Ok(event) = std::env::var("WAYLAY_EVENT") {
            self.dialog.event = event;
        }
        if let Ok(overlay) = std::env::var("WAYLAY_OVERLAY_ID") {
            self.dialog.overlay = overlay;
        }
        if let Ok(popup) = std::env::var("WAYLAY_POPUP_ID") {
            self.dialog.popup = Some(popup);
        }
        if let Ok(id) = std::env::var("WAYLAY_CONFIRM_BTN") {
            self.dialog.confirm_button = id;
        }
        if let Ok(id) = std::env::var("WAYLAY_DENY_BTN") {
            self.dialog.deny_button = id;
        }
        if let Ok(val) = std::env::var("WAYLAY_BUTTONS") {
            match val.as_str() {
                "both" => self.dialog.buttons = ButtonSet::Both,
                "confirm_only" => self.dialog.buttons = ButtonSet::ConfirmOnly,
                "deny_only" => self.dialog.buttons = ButtonSet::DenyOnly,
                _ => {}
            }
        }
    }

    /// Load configuration with environment variable overrides
    ///
    /// This is the recommended way to load configuration:
    /// 1. Load from waylay.toml (or use defaults if not found)
    /// 2. Override with environment variables if present
    pub fn load() -> Self {
        let mut config = Self::load_or_default();
        config.merge_with_env();
        config
    }
}
