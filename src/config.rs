//! Page configuration.
//!
//! DESIGN
//! ======
//! Every name the page features depend on (store key, CSS classes, lookup
//! hooks, toast timing, bindings) is a field here with the contract value as
//! its default, so a host page only spells out what it changes:
//!
//! ```json
//! { "targets": { "search_id": "busca" }, "toast": { "lifetime_ms": 5000 } }
//! ```

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::{
    HELP_TITLE, MAX_TOAST_LIFETIME_MS, NEW_ITEM_SELECTOR, SEARCH_ID, SEARCH_SELECTOR, TOAST_LIFETIME_MS, TOAST_STYLE,
};
use crate::error::ErrorCode;
use crate::shortcut::BindingTable;
use crate::theme::ThemeSettings;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid config json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("config field must not be empty: {0}")]
    EmptyField(&'static str),
    #[error("toast lifetime must be greater than zero")]
    ZeroLifetime,
    #[error("toast lifetime of {0} ms exceeds the {MAX_TOAST_LIFETIME_MS} ms timer limit")]
    LifetimeTooLong(u64),
}

impl ErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Parse(_) => "E_CONFIG_PARSE",
            Self::EmptyField(_) => "E_CONFIG_EMPTY_FIELD",
            Self::ZeroLifetime => "E_CONFIG_ZERO_LIFETIME",
            Self::LifetimeTooLong(_) => "E_CONFIG_LIFETIME_TOO_LONG",
        }
    }
}

/// Elements the shortcuts act on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShortcutTargets {
    /// Id of the search input; looked up before `search_selector`.
    pub search_id: String,
    pub search_selector: String,
    pub new_item_selector: String,
}

impl Default for ShortcutTargets {
    fn default() -> Self {
        Self {
            search_id: SEARCH_ID.to_owned(),
            search_selector: SEARCH_SELECTOR.to_owned(),
            new_item_selector: NEW_ITEM_SELECTOR.to_owned(),
        }
    }
}

/// Toast presentation and timing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToastSettings {
    pub lifetime_ms: u64,
    /// Inline style applied to every toast element.
    pub style: String,
}

impl Default for ToastSettings {
    fn default() -> Self {
        Self { lifetime_ms: TOAST_LIFETIME_MS, style: TOAST_STYLE.to_owned() }
    }
}

impl ToastSettings {
    #[must_use]
    pub fn lifetime(&self) -> Duration {
        Duration::from_millis(self.lifetime_ms)
    }
}

/// Full page configuration; every field falls back to the contract default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub theme: ThemeSettings,
    pub targets: ShortcutTargets,
    pub toast: ToastSettings,
    pub help_title: String,
    pub bindings: BindingTable,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            theme: ThemeSettings::default(),
            targets: ShortcutTargets::default(),
            toast: ToastSettings::default(),
            help_title: HELP_TITLE.to_owned(),
            bindings: BindingTable::default(),
        }
    }
}

impl PageConfig {
    /// Parse and validate a JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the JSON is malformed (including invalid
    /// key combos) or a field fails validation.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that would silently disable a feature.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyField`] for a blank required name and
    /// [`ConfigError::ZeroLifetime`] or [`ConfigError::LifetimeTooLong`] for a
    /// toast that would vanish at once.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("theme.storage_key", &self.theme.storage_key),
            ("theme.dark_class", &self.theme.dark_class),
            ("targets.search_selector", &self.targets.search_selector),
            ("targets.new_item_selector", &self.targets.new_item_selector),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::EmptyField(field));
            }
        }
        if self.toast.lifetime_ms == 0 {
            return Err(ConfigError::ZeroLifetime);
        }
        if self.toast.lifetime_ms > MAX_TOAST_LIFETIME_MS {
            return Err(ConfigError::LifetimeTooLong(self.toast.lifetime_ms));
        }
        Ok(())
    }
}
