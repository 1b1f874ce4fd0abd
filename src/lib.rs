//! Auto / light / dark presentation mode for a document viewer.
//!
//! A [`controller::ModeController`] owns one injected style sheet, persists
//! the chosen [`mode::Mode`] in key-value storage, and keeps the toggle
//! control's tooltip and accessible label in sync with the active mode. All
//! page access goes through the traits in [`host`], so the state machine is
//! tested with in-memory fakes and wired to the browser by [`web`] (feature
//! `web`).
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`mode`] | The closed set of modes and their storage strings |
//! | [`registry`] | Per-mode style, successor and label metadata |
//! | [`styles`] | Style-sheet text for each mode |
//! | [`controller`] | The mode state machine |
//! | [`host`] | Capability traits and their error types |
//! | [`l10n`] | Localization arguments and built-in localizers |
//! | [`signal`] | Toggle / set-mode requests from the host |
//! | [`config`] | Controller configuration |

pub mod config;
pub mod controller;
pub mod host;
pub mod l10n;
pub mod mode;
pub mod registry;
pub mod signal;
pub mod styles;
#[cfg(test)]
mod testing;
#[cfg(feature = "web")]
pub mod web;

pub use config::ControllerConfig;
pub use controller::{Capabilities, ControllerError, ModeController};
pub use mode::Mode;
pub use signal::{ModeRequest, ModeSignal};
