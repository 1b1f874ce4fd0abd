//! Controller configuration.

use serde::Deserialize;

use crate::mode::Mode;

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

/// Storage key holding the persisted mode.
pub const DEFAULT_STORAGE_KEY: &str = "pdfjs.dark_mode";

/// `id` given to the injected `<style>` element by the web adapter.
pub const DEFAULT_STYLE_ELEMENT_ID: &str = "pdfjs-darkmode-style";

/// Tunables for a [`crate::controller::ModeController`].
///
/// Every field has a default, so partial JSON such as
/// `{"storage_key": "viewer.theme"}` is accepted.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Key under which the mode is persisted.
    pub storage_key: String,
    /// Mode used when nothing valid is persisted.
    pub default_mode: Mode,
    /// Element id for the injected style declaration.
    pub style_element_id: String,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_owned(),
            default_mode: Mode::Auto,
            style_element_id: DEFAULT_STYLE_ELEMENT_ID.to_owned(),
        }
    }
}

impl ControllerConfig {
    /// Parse configuration from JSON, filling omitted fields with defaults.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error for malformed JSON or an unknown mode.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
