//! Capabilities the controller calls into.
//!
//! The controller never touches a browser global directly. Storage, the style
//! element, localization and the toggle control are handed to it as trait
//! objects, so the same state machine runs against `web_sys` in the browser
//! and against in-memory fakes in tests.

use futures::future::LocalBoxFuture;

use crate::l10n::L10nArgs;

/// Error from a [`KeyValueStore`] operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// No storage backend is reachable (private browsing, sandboxed frame).
    #[error("storage unavailable")]
    Unavailable,
    /// The backend refused the operation, e.g. quota exceeded.
    #[error("storage rejected {key:?}: {reason}")]
    Rejected { key: String, reason: String },
}

/// Error creating the style target.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StyleError {
    #[error("failed to create style element: {0}")]
    CreateFailed(String),
}

/// Error resolving a localized string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LocalizeError {
    /// The key has no translation and the localizer does not fall back.
    #[error("no translation for {key:?}")]
    Missing { key: String },
    /// The lookup itself failed or was abandoned.
    #[error("localization failed: {0}")]
    Failed(String),
}

/// Durable string key-value storage that outlives the page.
pub trait KeyValueStore {
    /// Read `key`. `Ok(None)` means the key is absent.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the backend refuses the write.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// One style declaration owned by the controller.
pub trait StyleSheet {
    /// Replace the full text of the sheet.
    fn replace(&self, css: &str);
}

/// Creates style declarations in the hosting page.
pub trait StyleHost {
    /// Create a new, empty style declaration.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError`] when the page refuses the element.
    fn create_sheet(&self) -> Result<Box<dyn StyleSheet>, StyleError>;
}

/// Resolves localized strings, possibly asynchronously.
pub trait Localizer {
    /// Resolve `key` with `args`. Implementations without a translation
    /// should return `fallback` rather than fail.
    fn resolve(
        &self,
        key: &str,
        args: &L10nArgs,
        fallback: &str,
    ) -> LocalBoxFuture<'static, Result<String, LocalizeError>>;
}

/// The externally owned toggle button.
pub trait ToggleControl {
    /// Set the hover tooltip.
    fn set_tooltip(&self, text: &str);

    /// Set the accessible label.
    fn set_label(&self, text: &str);
}
