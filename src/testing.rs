//! In-memory capabilities for exercising the controller without a browser.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use futures::channel::oneshot;
use futures::future::LocalBoxFuture;
use futures::FutureExt;

use crate::host::{KeyValueStore, LocalizeError, Localizer, StorageError, StyleError, StyleHost, StyleSheet, ToggleControl};
use crate::l10n::L10nArgs;

// =============================================================
// Storage
// =============================================================

/// `HashMap`-backed store with switchable read and write failures.
#[derive(Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
    pub fail_reads: Cell<bool>,
    pub fail_writes: Cell<bool>,
    pub writes: Cell<usize>,
}

impl MemoryStore {
    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::default();
        store.entries.borrow_mut().insert(key.to_owned(), value.to_owned());
        store
    }

    pub fn value(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    pub fn put(&self, key: &str, value: &str) {
        self.entries.borrow_mut().insert(key.to_owned(), value.to_owned());
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.fail_reads.get() {
            return Err(StorageError::Unavailable);
        }
        Ok(self.value(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes.get() {
            return Err(StorageError::Rejected { key: key.to_owned(), reason: "quota exceeded".to_owned() });
        }
        self.writes.set(self.writes.get() + 1);
        self.put(key, value);
        Ok(())
    }
}

// =============================================================
// Styles
// =============================================================

/// Style host whose sheets all write into one shared buffer.
#[derive(Default)]
pub struct RecordingStyles {
    pub text: Rc<RefCell<String>>,
    pub created: Cell<usize>,
    pub replacements: Rc<Cell<usize>>,
    pub refuse: Cell<bool>,
}

impl RecordingStyles {
    pub fn text(&self) -> String {
        self.text.borrow().clone()
    }
}

struct RecordingSheet {
    text: Rc<RefCell<String>>,
    replacements: Rc<Cell<usize>>,
}

impl StyleSheet for RecordingSheet {
    fn replace(&self, css: &str) {
        css.clone_into(&mut self.text.borrow_mut());
        self.replacements.set(self.replacements.get() + 1);
    }
}

impl StyleHost for RecordingStyles {
    fn create_sheet(&self) -> Result<Box<dyn StyleSheet>, StyleError> {
        if self.refuse.get() {
            return Err(StyleError::CreateFailed("head missing".to_owned()));
        }
        self.created.set(self.created.get() + 1);
        Ok(Box::new(RecordingSheet { text: Rc::clone(&self.text), replacements: Rc::clone(&self.replacements) }))
    }
}

// =============================================================
// Control
// =============================================================

/// Records every text write to the toggle control.
#[derive(Default)]
pub struct RecordingControl {
    pub tooltip: RefCell<String>,
    pub label: RefCell<String>,
    pub writes: RefCell<Vec<(&'static str, String)>>,
}

impl RecordingControl {
    pub fn texts(&self) -> (String, String) {
        (self.tooltip.borrow().clone(), self.label.borrow().clone())
    }
}

impl ToggleControl for RecordingControl {
    fn set_tooltip(&self, text: &str) {
        text.clone_into(&mut self.tooltip.borrow_mut());
        self.writes.borrow_mut().push(("tooltip", text.to_owned()));
    }

    fn set_label(&self, text: &str) {
        text.clone_into(&mut self.label.borrow_mut());
        self.writes.borrow_mut().push(("label", text.to_owned()));
    }
}

// =============================================================
// Localization
// =============================================================

/// A localization request waiting for the test to answer it.
pub struct Pending {
    pub key: String,
    pub fallback: String,
    tx: oneshot::Sender<Result<String, LocalizeError>>,
}

impl Pending {
    /// Resolve with `text`. Returns `false` if the requester is gone.
    pub fn resolve(self, text: &str) -> bool {
        self.tx.send(Ok(text.to_owned())).is_ok()
    }

    /// Resolve with the request's fallback.
    pub fn resolve_fallback(self) -> bool {
        let fallback = self.fallback.clone();
        self.resolve(&fallback)
    }

    /// Reject the request.
    pub fn fail(self) -> bool {
        self.tx.send(Err(LocalizeError::Missing { key: self.key.clone() })).is_ok()
    }
}

/// Localizer whose answers are delivered by hand, in any order.
#[derive(Default)]
pub struct ManualLocalizer {
    pending: RefCell<Vec<Pending>>,
}

impl ManualLocalizer {
    /// Take the oldest unanswered request for `key`.
    pub fn take(&self, key: &str) -> Option<Pending> {
        let mut pending = self.pending.borrow_mut();
        let index = pending.iter().position(|p| p.key == key)?;
        Some(pending.remove(index))
    }

    pub fn pending_keys(&self) -> Vec<String> {
        self.pending.borrow().iter().map(|p| p.key.clone()).collect()
    }

    /// Answer every outstanding request with its fallback.
    pub fn resolve_all(&self) {
        let drained: Vec<Pending> = self.pending.borrow_mut().drain(..).collect();
        for pending in drained {
            pending.resolve_fallback();
        }
    }
}

impl Localizer for ManualLocalizer {
    fn resolve(
        &self,
        key: &str,
        args: &L10nArgs,
        fallback: &str,
    ) -> LocalBoxFuture<'static, Result<String, LocalizeError>> {
        let (tx, rx) = oneshot::channel();
        self.pending.borrow_mut().push(Pending {
            key: key.to_owned(),
            fallback: args.interpolate(fallback),
            tx,
        });
        rx.map(|answer| match answer {
            Ok(result) => result,
            Err(canceled) => Err(LocalizeError::Failed(canceled.to_string())),
        })
        .boxed_local()
    }
}
