//! Browser adapters for the controller's capabilities.
//!
//! `localStorage` backs persistence, a `<style>` element appended to `<head>`
//! carries the mode's rules, and the toggle button's `title` and `aria-label`
//! attributes carry its text. Label tasks run on the page's microtask queue
//! through `wasm-bindgen-futures`.

use std::rc::Rc;

use futures::future::LocalFutureObj;
use futures::task::{LocalSpawn, SpawnError};
use tracing::debug;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, Storage};

use crate::config::ControllerConfig;
use crate::controller::{Capabilities, ControllerError, ModeController};
use crate::host::{KeyValueStore, Localizer, StorageError, StyleError, StyleHost, StyleSheet, ToggleControl};
use crate::signal::{self, ModeSignal};

// ── Storage ─────────────────────────────────────────────────────

/// `window.localStorage`, looked up on every call.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorage;

impl LocalStorage {
    fn storage() -> Result<Storage, StorageError> {
        let window = web_sys::window().ok_or(StorageError::Unavailable)?;
        match window.local_storage() {
            Ok(Some(storage)) => Ok(storage),
            _ => Err(StorageError::Unavailable),
        }
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::storage()?.get_item(key).map_err(|_| StorageError::Unavailable)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|err| StorageError::Rejected { key: key.to_owned(), reason: format!("{err:?}") })
    }
}

// ── Styles ──────────────────────────────────────────────────────

/// Appends `<style id=...>` elements to the document head.
#[derive(Clone, Debug)]
pub struct HeadStyles {
    id: String,
}

impl HeadStyles {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

struct StyleElement(Element);

impl StyleSheet for StyleElement {
    fn replace(&self, css: &str) {
        self.0.set_text_content(Some(css));
    }
}

impl StyleHost for HeadStyles {
    fn create_sheet(&self) -> Result<Box<dyn StyleSheet>, StyleError> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| StyleError::CreateFailed("no document".to_owned()))?;
        let head = document
            .head()
            .ok_or_else(|| StyleError::CreateFailed("no <head>".to_owned()))?;
        let element = document
            .create_element("style")
            .map_err(|err| StyleError::CreateFailed(format!("{err:?}")))?;
        element.set_id(&self.id);
        head.append_child(&element)
            .map_err(|err| StyleError::CreateFailed(format!("{err:?}")))?;
        Ok(Box::new(StyleElement(element)))
    }
}

// ── Control ─────────────────────────────────────────────────────

/// The toggle button; only its `title` and `aria-label` are touched.
#[derive(Clone, Debug)]
pub struct ButtonControl(HtmlElement);

impl ButtonControl {
    #[must_use]
    pub fn new(button: HtmlElement) -> Self {
        Self(button)
    }
}

impl ToggleControl for ButtonControl {
    fn set_tooltip(&self, text: &str) {
        self.0.set_title(text);
    }

    fn set_label(&self, text: &str) {
        if let Err(err) = self.0.set_attribute("aria-label", text) {
            debug!(?err, "aria-label not set");
        }
    }
}

// ── Tasks ───────────────────────────────────────────────────────

/// Spawns onto the browser's microtask queue.
#[derive(Clone, Copy, Debug, Default)]
pub struct MicrotaskSpawner;

impl LocalSpawn for MicrotaskSpawner {
    fn spawn_local_obj(&self, future: LocalFutureObj<'static, ()>) -> Result<(), SpawnError> {
        wasm_bindgen_futures::spawn_local(future);
        Ok(())
    }
}

// ── Wiring ──────────────────────────────────────────────────────

/// Build a controller wired to the live page.
///
/// Returns the controller and the signal the host's event bus should fire
/// when the user asks for the next mode.
///
/// # Errors
///
/// Returns [`ControllerError::Style`] when the style element cannot be added.
pub fn mount(
    button: HtmlElement,
    localizer: Rc<dyn Localizer>,
    config: ControllerConfig,
) -> Result<(ModeController, ModeSignal), ControllerError> {
    let caps = Capabilities {
        store: Rc::new(LocalStorage),
        styles: Rc::new(HeadStyles::new(config.style_element_id.clone())),
        localizer,
        spawner: Rc::new(MicrotaskSpawner),
    };
    let (signal, requests) = signal::channel();
    let controller = ModeController::new(config, caps, Rc::new(ButtonControl::new(button)), requests)?;
    Ok((controller, signal))
}

/// Like [`mount`], locating the button by element id.
///
/// Returns `Ok(None)` when no such element exists or it is not an HTML
/// element.
///
/// # Errors
///
/// See [`mount`].
pub fn mount_by_id(
    button_id: &str,
    localizer: Rc<dyn Localizer>,
    config: ControllerConfig,
) -> Result<Option<(ModeController, ModeSignal)>, ControllerError> {
    let Some(element) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(button_id))
    else {
        debug!(button_id, "toggle button not found");
        return Ok(None);
    };
    match element.dyn_into::<HtmlElement>() {
        Ok(button) => mount(button, localizer, config).map(Some),
        Err(_) => Ok(None),
    }
}
