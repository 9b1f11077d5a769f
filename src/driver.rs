// SPDX-License-Identifier: GPL-3.0-only

//! Async driver for hosts living on a tokio runtime.
//!
//! Calls and host events are funneled through one command channel and
//! handled one at a time, which keeps the widget single-threaded like the
//! page it models. [`TimerHost`] fulfils [`Effect::Schedule`] with tokio
//! timers whose [`WidgetEvent::TimerElapsed`] events arrive on a separate
//! timer channel, so the driver still stops once every command sender is
//! gone.

use futures::SinkExt;
use futures::StreamExt;
use futures::channel::mpsc;
use std::time::Duration;

use crate::callbacks::Callbacks;
use crate::config::WidgetConfig;
use crate::effect::Effect;
use crate::geometry::Bounds;
use crate::host::{Host, Surface};
use crate::sdk::Sdk;
use crate::state::ModalPosition;
use crate::widget::WidgetEvent;

/// Capacity of the command channel.
pub const COMMAND_BUFFER: usize = 32;

/// Receiving end of the timer channel.
pub type Timers = mpsc::UnboundedReceiver<WidgetEvent>;

/// Requests handled by [`run`].
#[derive(Debug)]
pub enum Command {
    Initialize(WidgetConfig, Callbacks),
    Open(Option<ModalPosition>),
    Close,
    Event(WidgetEvent),
    /// Stop the driver loop.
    Shutdown,
}

/// Creates the command channel.
pub fn channel() -> (mpsc::Sender<Command>, mpsc::Receiver<Command>) {
    mpsc::channel(COMMAND_BUFFER)
}

/// Creates the channel timer events travel on.
pub fn timer_channel() -> (mpsc::UnboundedSender<WidgetEvent>, Timers) {
    mpsc::unbounded()
}

/// Host wrapper that runs scheduled tasks on tokio timers.
///
/// Every effect, schedules included, is still forwarded to the inner host.
#[derive(Debug)]
pub struct TimerHost<H> {
    inner: H,
    timer_tx: mpsc::UnboundedSender<WidgetEvent>,
}

impl<H: Host> TimerHost<H> {
    /// Wraps `inner`; fired timers are delivered on the returned [`Timers`].
    pub fn new(inner: H) -> (Self, Timers) {
        let (timer_tx, timers) = timer_channel();
        (Self { inner, timer_tx }, timers)
    }

    pub fn inner(&self) -> &H {
        &self.inner
    }

    pub fn into_inner(self) -> H {
        self.inner
    }
}

impl<H: Host> Surface for TimerHost<H> {
    fn viewport_width(&self) -> f64 {
        self.inner.viewport_width()
    }

    fn has_element(&self, id: &str) -> bool {
        self.inner.has_element(id)
    }

    fn button_bounds(&self) -> Option<Bounds> {
        self.inner.button_bounds()
    }
}

impl<H: Host> Host for TimerHost<H> {
    fn apply(&mut self, effect: Effect) {
        if let Effect::Schedule {
            token,
            delay_ms,
            task,
        } = effect
        {
            let mut tx = self.timer_tx.clone();
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                let event = WidgetEvent::TimerElapsed { token, task };
                if let Err(e) = tx.send(event).await {
                    tracing::debug!("Timer fired after driver stopped: {}", e);
                }
            });
        }

        self.inner.apply(effect);
    }
}

/// Processes commands and fired timers until [`Command::Shutdown`] or until
/// every command sender is gone.
///
/// Hosts without timers pass the receiver of a [`timer_channel`] whose
/// sender is dropped. Returns the SDK so callers can inspect the final state.
pub async fn run<H: Host>(
    mut sdk: Sdk<H>,
    mut commands: mpsc::Receiver<Command>,
    mut timers: Timers,
) -> Sdk<H> {
    tracing::info!("Widget driver started");

    loop {
        tokio::select! {
            command = commands.next() => match command {
                Some(Command::Initialize(config, callbacks)) => sdk.initialize(config, callbacks),
                Some(Command::Open(position)) => sdk.open(position),
                Some(Command::Close) => sdk.close(),
                Some(Command::Event(event)) => sdk.dispatch(event),
                Some(Command::Shutdown) => break,
                None => {
                    tracing::debug!("All command senders dropped");
                    break;
                }
            },
            Some(event) = timers.next() => sdk.dispatch(event),
        }
    }

    tracing::info!("Widget driver stopped");
    sdk
}
