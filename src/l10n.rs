//! Localization arguments and two ready-made [`Localizer`]s.
//!
//! Strings use `{{name}}` placeholders. [`FallbackLocalizer`] is for hosts
//! with no translation service; [`CatalogLocalizer`] serves a fixed
//! key-to-string table, typically loaded from JSON.

use std::collections::{BTreeMap, HashMap};

use futures::future::{self, LocalBoxFuture};
use futures::FutureExt;

use crate::host::{LocalizeError, Localizer};

#[cfg(test)]
#[path = "l10n_test.rs"]
mod l10n_test;

/// Named arguments substituted into `{{name}}` placeholders.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct L10nArgs(BTreeMap<String, String>);

impl L10nArgs {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Replace every `{{name}}` in `template` with its argument.
    ///
    /// Placeholders without a matching argument are left as written.
    #[must_use]
    pub fn interpolate(&self, template: &str) -> String {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;
        while let Some(start) = rest.find("{{") {
            out.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            let Some(end) = after.find("}}") else {
                out.push_str(&rest[start..]);
                return out;
            };
            let name = after[..end].trim();
            match self.get(name) {
                Some(value) => out.push_str(value),
                None => out.push_str(&rest[start..start + 2 + end + 2]),
            }
            rest = &after[end + 2..];
        }
        out.push_str(rest);
        out
    }
}

/// Localizer that always answers with the interpolated fallback.
#[derive(Clone, Copy, Debug, Default)]
pub struct FallbackLocalizer;

impl Localizer for FallbackLocalizer {
    fn resolve(
        &self,
        _key: &str,
        args: &L10nArgs,
        fallback: &str,
    ) -> LocalBoxFuture<'static, Result<String, LocalizeError>> {
        future::ready(Ok(args.interpolate(fallback))).boxed_local()
    }
}

/// Localizer backed by an in-memory table of translated strings.
#[derive(Clone, Debug, Default)]
pub struct CatalogLocalizer {
    entries: HashMap<String, String>,
}

impl CatalogLocalizer {
    #[must_use]
    pub fn new(entries: HashMap<String, String>) -> Self {
        Self { entries }
    }

    /// Load a flat JSON object of `key: string` pairs.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error when `json` is not such an object.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json).map(Self::new)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Localizer for CatalogLocalizer {
    fn resolve(
        &self,
        key: &str,
        args: &L10nArgs,
        fallback: &str,
    ) -> LocalBoxFuture<'static, Result<String, LocalizeError>> {
        let template = self.entries.get(key).map_or(fallback, String::as_str);
        future::ready(Ok(args.interpolate(template))).boxed_local()
    }
}
