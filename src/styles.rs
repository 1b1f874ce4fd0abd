//! Style-sheet text injected for each presentation mode.
//!
//! The controller treats these as opaque strings; it only ever replaces the
//! whole content of its style element with one of them.

// ── Dark rules ──────────────────────────────────────────────────

/// Rules shared by forced dark mode and the dark branch of auto mode.
macro_rules! dark_rules {
    () => {
        ":root { color-scheme: dark; }
#viewerContainer { background-color: #1e1e1e; }
.page, .thumbnailImage { filter: invert(0.9) hue-rotate(180deg); }
.textLayer { background: black; }
"
    };
}

// ── Per-mode sheets ─────────────────────────────────────────────

/// Follow the system color scheme.
pub const AUTO: &str = concat!("@media (prefers-color-scheme: dark) {\n", dark_rules!(), "}\n");

/// Force the light scheme, overriding a dark system preference.
pub const LIGHT: &str = ":root { color-scheme: light; }\n";

/// Force the dark scheme.
pub const DARK: &str = dark_rules!();
