//! Mode registry: the fixed table mapping each [`Mode`] to its style sheet,
//! its successor, and the localization metadata of the toggle control.
//!
//! DESIGN
//! ======
//! The table is `static` data and [`config_for`] is an exhaustive `match`, so
//! a lookup cannot fail at runtime and adding a mode without a row is a
//! compile error.

use crate::mode::Mode;
use crate::styles;

#[cfg(test)]
#[path = "registry_test.rs"]
mod registry_test;

/// Everything the controller needs to present one mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModeConfig {
    /// Style-sheet text applied while this mode is active.
    pub style: &'static str,
    /// Mode entered by `advance()` from this one.
    pub next: Mode,
    /// Localization key of the control tooltip. The accessible label uses the
    /// same key with a `_label` suffix.
    pub label_key: &'static str,
    /// Literal text used when localization is unavailable.
    pub label_fallback: &'static str,
}

impl ModeConfig {
    /// Localization key of the accessible label.
    #[must_use]
    pub fn aria_label_key(&self) -> String {
        format!("{}_label", self.label_key)
    }
}

static AUTO: ModeConfig = ModeConfig {
    style: styles::AUTO,
    next: Mode::Light,
    label_key: "dark_mode_auto",
    label_fallback: "Theme: follow system",
};

static LIGHT: ModeConfig = ModeConfig {
    style: styles::LIGHT,
    next: Mode::Dark,
    label_key: "dark_mode_light",
    label_fallback: "Theme: light",
};

static DARK: ModeConfig = ModeConfig {
    style: styles::DARK,
    next: Mode::Auto,
    label_key: "dark_mode_dark",
    label_fallback: "Theme: dark",
};

/// Look up the configuration for `mode`.
#[must_use]
pub fn config_for(mode: Mode) -> &'static ModeConfig {
    match mode {
        Mode::Auto => &AUTO,
        Mode::Light => &LIGHT,
        Mode::Dark => &DARK,
    }
}

/// Iterate the advance cycle starting at `start`, yielding each mode once.
pub fn cycle_from(start: Mode) -> impl Iterator<Item = Mode> {
    std::iter::successors(Some(start), |mode| Some(config_for(*mode).next)).take(Mode::ALL.len())
}
