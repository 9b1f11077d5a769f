// SPDX-License-Identifier: GPL-3.0-only

//! Public entry points: `initialize`, `open`, `close`.
//!
//! [`Sdk`] owns the host and at most one [`Widget`]. Every call is handled
//! synchronously and the resulting effects are applied to the host before
//! the call returns.

use crate::callbacks::Callbacks;
use crate::config::WidgetConfig;
use crate::host::Host;
use crate::state::ModalPosition;
use crate::widget::{Widget, WidgetEvent};

/// The embeddable widget bound to a host.
#[derive(Debug)]
pub struct Sdk<H: Host> {
    host: H,
    widget: Option<Widget>,
}

impl<H: Host> Sdk<H> {
    pub fn new(host: H) -> Self {
        Self { host, widget: None }
    }

    /// Creates the widget context.
    ///
    /// An invalid configuration is logged and leaves the current state
    /// untouched. Initializing again replaces the previous context after
    /// removing its listeners.
    pub fn initialize(&mut self, config: WidgetConfig, callbacks: Callbacks) {
        let widget = match Widget::new(config, callbacks, &self.host) {
            Ok(widget) => widget,
            Err(e) => {
                tracing::error!("Failed to initialize widget: {}", e);
                return;
            }
        };

        if let Some(mut previous) = self.widget.replace(widget) {
            tracing::warn!("Widget already initialized, replacing previous context");
            for effect in previous.teardown() {
                self.host.apply(effect);
            }
        }
    }

    /// Opens the widget, optionally anchored at `modal_position`.
    pub fn open(&mut self, modal_position: Option<ModalPosition>) {
        self.dispatch_named("open", WidgetEvent::Open { modal_position });
    }

    /// Closes the widget.
    pub fn close(&mut self) {
        self.dispatch_named("close", WidgetEvent::Close);
    }

    /// Delivers a host event (button click, frame message, timer, ...).
    ///
    /// Events arriving before initialization are dropped.
    pub fn dispatch(&mut self, event: WidgetEvent) {
        let Some(widget) = self.widget.as_mut() else {
            tracing::debug!("Dropping {:?} before initialization", event);
            return;
        };

        let effects = widget.update(event, &self.host);
        for effect in effects {
            self.host.apply(effect);
        }
    }

    fn dispatch_named(&mut self, name: &str, event: WidgetEvent) {
        if self.widget.is_none() {
            tracing::warn!("Please initialize before calling '{}'", name);
            return;
        }
        self.dispatch(event);
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.widget.is_some()
    }

    pub fn widget(&self) -> Option<&Widget> {
        self.widget.as_ref()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Consumes the SDK and returns the host.
    pub fn into_host(self) -> H {
        self.host
    }
}
