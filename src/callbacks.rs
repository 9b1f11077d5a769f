// SPDX-License-Identifier: GPL-3.0-only

//! Host callbacks.
//!
//! Callbacks are only ever invoked from inside a widget handler, one at a
//! time. A callback the host did not supply falls back to a log line that is
//! emitted only when console logs are enabled.

use crate::state::DisplayStatus;

type LoadFn = Box<dyn FnMut() + Send>;
type MessageFn = Box<dyn FnMut(&str) + Send>;
type StateChangeFn = Box<dyn FnMut(DisplayStatus) + Send>;

/// Callbacks registered at initialization.
#[derive(Default)]
pub struct Callbacks {
    on_load: Option<LoadFn>,
    on_message: Option<MessageFn>,
    on_state_change: Option<StateChangeFn>,
}

impl std::fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Callbacks")
            .field("on_load", &self.on_load.is_some())
            .field("on_message", &self.on_message.is_some())
            .field("on_state_change", &self.on_state_change.is_some())
            .finish()
    }
}

impl Callbacks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called when the frame finished loading.
    #[must_use]
    pub fn on_load(mut self, f: impl FnMut() + Send + 'static) -> Self {
        self.on_load = Some(Box::new(f));
        self
    }

    /// Called with the `eventType` of every `event` message from the frame.
    #[must_use]
    pub fn on_message(mut self, f: impl FnMut(&str) + Send + 'static) -> Self {
        self.on_message = Some(Box::new(f));
        self
    }

    /// Called once per committed display status change.
    #[must_use]
    pub fn on_state_change(mut self, f: impl FnMut(DisplayStatus) + Send + 'static) -> Self {
        self.on_state_change = Some(Box::new(f));
        self
    }

    pub(crate) fn loaded(&mut self, console_logs: bool) {
        match self.on_load.as_mut() {
            Some(f) => f(),
            None if console_logs => tracing::info!("onLoad"),
            None => {}
        }
    }

    pub(crate) fn message(&mut self, event_type: &str, console_logs: bool) {
        match self.on_message.as_mut() {
            Some(f) => f(event_type),
            None if console_logs => tracing::info!("onMessage: {}", event_type),
            None => {}
        }
    }

    pub(crate) fn state_changed(&mut self, status: DisplayStatus, console_logs: bool) {
        match self.on_state_change.as_mut() {
            Some(f) => f(status),
            None if console_logs => tracing::info!("{}", status),
            None => {}
        }
    }
}
