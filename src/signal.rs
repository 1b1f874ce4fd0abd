//! User-intent signals delivered to the controller.
//!
//! The host's event system holds a [`ModeSignal`] and fires it when the user
//! asks for a mode change. The controller drains the paired [`ModeRequests`]
//! stream on a local task.

use futures::channel::mpsc;

#[cfg(test)]
#[path = "signal_test.rs"]
mod signal_test;

/// A request to change the presentation mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModeRequest {
    /// Move to the successor of the persisted mode.
    Advance,
    /// Switch to the given mode.
    Set(crate::mode::Mode),
}

/// Receiving half, consumed by the controller.
pub type ModeRequests = mpsc::UnboundedReceiver<ModeRequest>;

/// Sending half, held by whatever dispatches user intent.
#[derive(Clone, Debug)]
pub struct ModeSignal {
    tx: mpsc::UnboundedSender<ModeRequest>,
}

impl ModeSignal {
    /// Fire the "toggle requested" signal.
    ///
    /// Returns `false` if the controller is gone.
    #[must_use]
    pub fn toggle(&self) -> bool {
        self.send(ModeRequest::Advance)
    }

    /// Request an explicit mode.
    ///
    /// Returns `false` if the controller is gone.
    #[must_use]
    pub fn set(&self, mode: crate::mode::Mode) -> bool {
        self.send(ModeRequest::Set(mode))
    }

    fn send(&self, request: ModeRequest) -> bool {
        self.tx.unbounded_send(request).is_ok()
    }
}

/// Create a connected signal/request pair.
#[must_use]
pub fn channel() -> (ModeSignal, ModeRequests) {
    let (tx, rx) = mpsc::unbounded();
    (ModeSignal { tx }, rx)
}
