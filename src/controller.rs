//! Mode controller: the presentation-mode state machine.
//!
//! DESIGN
//! ======
//! Storage is the source of truth for "current mode": `advance()` re-reads it
//! on every call so another tab or script changing the key is honored.
//!
//! A transition runs in two phases. The synchronous phase persists the mode
//! and replaces the owned style sheet, so the page restyles immediately. The
//! asynchronous phase resolves the tooltip and accessible label on a local
//! task and writes both to the control in one step once both are ready.
//!
//! Every transition bumps a generation counter and its label task carries
//! that generation. A task whose generation is no longer the latest drops its
//! result, so the control always reflects the most recently requested mode
//! regardless of the order localization resolves in.
//!
//! TRADE-OFFS
//! ==========
//! A failed storage write is returned to the caller but does not undo the
//! style change, so storage and display can disagree until the next
//! successful write.

use std::cell::RefCell;
use std::rc::Rc;

use futures::future;
use futures::task::{LocalSpawn, LocalSpawnExt};
use futures::StreamExt;
use tracing::{debug, info, warn};

use crate::config::ControllerConfig;
use crate::host::{KeyValueStore, Localizer, StorageError, StyleError, StyleHost, StyleSheet, ToggleControl};
use crate::l10n::L10nArgs;
use crate::mode::Mode;
use crate::registry::config_for;
use crate::signal::{ModeRequest, ModeRequests};

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

/// Error from constructing or driving a [`ModeController`].
#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    /// The new mode could not be persisted. Styling was still applied.
    #[error("failed to persist mode: {0}")]
    Persist(#[from] StorageError),
    /// The style target could not be created.
    #[error(transparent)]
    Style(#[from] StyleError),
    /// A local task could not be spawned.
    #[error("failed to spawn task: {0}")]
    Spawn(String),
}

/// Page capabilities the controller calls into.
#[derive(Clone)]
pub struct Capabilities {
    pub store: Rc<dyn KeyValueStore>,
    pub styles: Rc<dyn StyleHost>,
    pub localizer: Rc<dyn Localizer>,
    pub spawner: Rc<dyn LocalSpawn>,
}

/// Mutable controller state.
struct State {
    /// Mode most recently applied by this controller.
    current: Mode,
    /// Text most recently written to the style sheet.
    style: String,
    /// Tag of the latest label request.
    generation: u64,
}

struct Inner {
    config: ControllerConfig,
    store: Rc<dyn KeyValueStore>,
    sheet: Box<dyn StyleSheet>,
    localizer: Rc<dyn Localizer>,
    spawner: Rc<dyn LocalSpawn>,
    control: Rc<dyn ToggleControl>,
    state: RefCell<State>,
}

/// Owns the injected style sheet and drives mode transitions.
///
/// Cheap to clone; clones share the same state.
#[derive(Clone)]
pub struct ModeController {
    inner: Rc<Inner>,
}

impl ModeController {
    /// Build a controller and bring the page in line with the persisted mode.
    ///
    /// Creates the single style sheet, reads the initial mode (falling back
    /// to `config.default_mode`), applies it, and starts listening on
    /// `requests`.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::Style`] if the style sheet cannot be created
    /// and [`ControllerError::Spawn`] if a local task cannot be started. A
    /// failure to persist the initial mode is logged, not returned.
    pub fn new(
        config: ControllerConfig,
        caps: Capabilities,
        control: Rc<dyn ToggleControl>,
        requests: ModeRequests,
    ) -> Result<Self, ControllerError> {
        let sheet = caps.styles.create_sheet()?;
        let initial = read_mode(caps.store.as_ref(), &config, config.default_mode);

        let controller = Self {
            inner: Rc::new(Inner {
                config,
                store: caps.store,
                sheet,
                localizer: caps.localizer,
                spawner: caps.spawner,
                control,
                state: RefCell::new(State { current: initial, style: String::new(), generation: 0 }),
            }),
        };

        match controller.switch_to(initial) {
            Err(ControllerError::Persist(err)) => {
                warn!(mode = %initial, error = %err, "initial mode not persisted");
            }
            Err(err) => return Err(err),
            Ok(_) => {}
        }

        let listener = controller.clone();
        controller
            .inner
            .spawner
            .spawn_local(listen(listener, requests))
            .map_err(|e| ControllerError::Spawn(e.to_string()))?;

        info!(mode = %initial, key = %controller.inner.config.storage_key, "mode controller ready");
        Ok(controller)
    }

    /// Move to the successor of the persisted mode.
    ///
    /// If storage cannot be read, the successor of the last mode this
    /// controller applied is used instead.
    ///
    /// # Errors
    ///
    /// See [`ModeController::switch_to`].
    pub fn advance(&self) -> Result<Mode, ControllerError> {
        let current = read_mode(self.inner.store.as_ref(), &self.inner.config, self.current());
        self.switch_to(config_for(current).next)
    }

    /// Switch to `mode`: persist it, restyle, then relabel the control.
    ///
    /// Calling this twice with the same mode is harmless; the second call
    /// writes the same value and the same style text.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::Persist`] if storage refused the write. The
    /// style and label update still happen. Returns [`ControllerError::Spawn`]
    /// if the write succeeded but the label task could not be started.
    pub fn switch_to(&self, mode: Mode) -> Result<Mode, ControllerError> {
        let config = config_for(mode);
        let persisted = self.inner.store.set(&self.inner.config.storage_key, mode.as_str());

        self.inner.sheet.replace(config.style);
        let generation = {
            let mut state = self.inner.state.borrow_mut();
            state.current = mode;
            config.style.clone_into(&mut state.style);
            state.generation += 1;
            state.generation
        };
        debug!(%mode, generation, "mode applied");

        let labels = self.request_labels(mode, generation);
        if let Err(err) = persisted {
            if let Err(spawn) = &labels {
                warn!(%mode, error = %spawn, "label task not started");
            }
            return Err(err.into());
        }
        labels?;
        Ok(mode)
    }

    /// Mode most recently applied by this controller.
    #[must_use]
    pub fn current(&self) -> Mode {
        self.inner.state.borrow().current
    }

    /// Text most recently written to the owned style sheet.
    #[must_use]
    pub fn style_text(&self) -> String {
        self.inner.state.borrow().style.clone()
    }

    /// Tag of the latest label request.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.inner.state.borrow().generation
    }

    /// The configuration this controller was built with.
    #[must_use]
    pub fn config(&self) -> &ControllerConfig {
        &self.inner.config
    }

    fn request_labels(&self, mode: Mode, generation: u64) -> Result<(), ControllerError> {
        let config = config_for(mode);
        let args = L10nArgs::new().with("mode", mode.as_str());
        let tooltip = self.inner.localizer.resolve(config.label_key, &args, config.label_fallback);
        let label = self
            .inner
            .localizer
            .resolve(&config.aria_label_key(), &args, config.label_fallback);

        let controller = self.clone();
        self.inner
            .spawner
            .spawn_local(async move {
                match future::try_join(tooltip, label).await {
                    Ok((tooltip, label)) => controller.apply_labels(mode, generation, &tooltip, &label),
                    Err(err) => debug!(%mode, generation, error = %err, "keeping previous control text"),
                }
            })
            .map_err(|e| ControllerError::Spawn(e.to_string()))
    }

    fn apply_labels(&self, mode: Mode, generation: u64, tooltip: &str, label: &str) {
        let latest = self.generation();
        if generation != latest {
            debug!(%mode, generation, latest, "discarding stale labels");
            return;
        }
        self.inner.control.set_tooltip(tooltip);
        self.inner.control.set_label(label);
    }
}

/// Read the persisted mode, treating absent or unknown values as the default.
fn read_mode(store: &dyn KeyValueStore, config: &ControllerConfig, on_error: Mode) -> Mode {
    match store.get(&config.storage_key) {
        Ok(Some(raw)) => match raw.parse::<Mode>() {
            Ok(mode) => mode,
            Err(err) => {
                warn!(key = %config.storage_key, error = %err, "ignoring invalid persisted mode");
                config.default_mode
            }
        },
        Ok(None) => config.default_mode,
        Err(err) => {
            warn!(key = %config.storage_key, error = %err, fallback = %on_error, "storage read failed");
            on_error
        }
    }
}

/// Drain user-intent requests until every sender is dropped.
async fn listen(controller: ModeController, mut requests: ModeRequests) {
    while let Some(request) = requests.next().await {
        let result = match request {
            ModeRequest::Advance => controller.advance(),
            ModeRequest::Set(mode) => controller.switch_to(mode),
        };
        if let Err(err) = result {
            warn!(?request, error = %err, "mode request incomplete");
        }
    }
    debug!("mode signal closed");
}
