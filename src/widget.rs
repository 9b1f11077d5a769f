// SPDX-License-Identifier: GPL-3.0-only

use crate::animator::TransitionAnimator;
use crate::app_settings::{
    self, BUTTON_CONTAINER_ID, BUTTON_HIDE_DURATION_MS, BUTTON_ID, BUTTON_REVEAL_DELAY_MS,
    BUTTON_REVEAL_DURATION_MS, MODAL_DURATION_MS, TRANSITION_DURATION_MS,
};
use crate::bridge::{self, InboundMessage};
use crate::callbacks::Callbacks;
use crate::config::{ConfigError, WidgetConfig};
use crate::effect::{DeferredTask, Effect, Element, Listener, Timing, TransitionToken};
use crate::geometry::StateOverlay;
use crate::host::Surface;
use crate::machine::{self, Action};
use crate::responsive;
use crate::state::{DisplayStatus, ModalPosition, WidgetState};

/// Events delivered to the widget.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetEvent {
    /// The trigger button was clicked.
    ButtonClicked,
    /// The host called `open`.
    Open { modal_position: Option<ModalPosition> },
    /// The host called `close`.
    Close,
    /// A `message` event reached the host window.
    FrameMessage { origin: String, data: String },
    /// The frame finished loading.
    FrameLoaded,
    /// The mobile breakpoint media query changed.
    BreakpointChanged { is_mobile: bool },
    /// A [`Effect::Schedule`] timer fired.
    TimerElapsed {
        token: TransitionToken,
        task: DeferredTask,
    },
}

impl WidgetEvent {
    /// Returns true for events delivered by a session listener.
    fn needs_listener(&self) -> bool {
        matches!(
            self,
            WidgetEvent::FrameMessage { .. }
                | WidgetEvent::FrameLoaded
                | WidgetEvent::BreakpointChanged { .. }
        )
    }
}

/// Which flow opened the current session, and so how it closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseFlow {
    Button,
    Api,
}

/// The widget context: state, configuration and callbacks of one instance.
///
/// All handlers run synchronously through [`Widget::update`] and return the
/// effects to apply, in order.
pub struct Widget {
    state: WidgetState,
    config: WidgetConfig,
    callbacks: Callbacks,
    animator: TransitionAnimator,
    /// Close action registered by the latest open.
    close_flow: Option<CloseFlow>,
    /// Whether the session listeners are registered with the host.
    subscribed: bool,
    /// Whether the page provides the trigger button.
    button_available: bool,
}

impl std::fmt::Debug for Widget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Widget")
            .field("state", &self.state)
            .field("close_flow", &self.close_flow)
            .field("subscribed", &self.subscribed)
            .field("button_available", &self.button_available)
            .finish_non_exhaustive()
    }
}

impl Widget {
    /// Creates the widget for `config` on `surface`.
    ///
    /// A page without the trigger button only supports the API flow.
    pub fn new(
        config: WidgetConfig,
        callbacks: Callbacks,
        surface: &dyn Surface,
    ) -> Result<Self, ConfigError> {
        let target_url = config.frame_url()?;
        let button_available =
            surface.has_element(BUTTON_ID) && surface.has_element(BUTTON_CONTAINER_ID);

        if config.enable_console_logs {
            tracing::info!("<<<< Widget loaded >>>>");
        }
        if !button_available {
            tracing::debug!("Trigger button not found, only the API flow is available");
        }

        let mut state = WidgetState::new(target_url.as_str());
        state.is_mobile = responsive::is_mobile_width(surface.viewport_width());

        Ok(Self {
            state,
            config,
            callbacks,
            animator: TransitionAnimator::new(),
            close_flow: None,
            subscribed: false,
            button_available,
        })
    }

    pub fn state(&self) -> &WidgetState {
        &self.state
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    /// Close action registered by the latest open, if any.
    pub fn close_flow(&self) -> Option<CloseFlow> {
        self.close_flow
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscribed
    }

    pub fn button_available(&self) -> bool {
        self.button_available
    }

    /// Handles one event and returns the effects it requests.
    ///
    /// Frame messages, frame loads and breakpoint changes only arrive through
    /// the session listeners and are dropped while those are not registered.
    pub fn update(&mut self, event: WidgetEvent, surface: &dyn Surface) -> Vec<Effect> {
        if !self.subscribed && event.needs_listener() {
            tracing::trace!("No listener registered, dropping {:?}", event);
            return Vec::new();
        }

        match event {
            WidgetEvent::ButtonClicked => {
                if !self.button_available {
                    tracing::warn!("Button click reported but no trigger button was found");
                    return Vec::new();
                }
                self.open_from_button(surface)
            }
            WidgetEvent::Open { modal_position } => self.open_from_api(modal_position, surface),
            WidgetEvent::Close => self.close(surface, true),
            WidgetEvent::FrameMessage { origin, data } => {
                self.handle_frame_message(&origin, &data, surface)
            }
            WidgetEvent::FrameLoaded => {
                self.callbacks.loaded(self.config.enable_console_logs);
                Vec::new()
            }
            WidgetEvent::BreakpointChanged { is_mobile } => responsive::on_breakpoint(
                &mut self.state,
                &self.animator,
                is_mobile,
                surface.button_bounds(),
            ),
            WidgetEvent::TimerElapsed { token, task } => {
                self.animator
                    .run_deferred(token, task, self.state.modal_position)
            }
        }
    }

    // ========================================================================
    // Open
    // ========================================================================

    /// Loads the frame and registers the session listeners.
    fn prepare_open(&mut self, surface: &dyn Surface) -> Vec<Effect> {
        let mut effects = vec![Effect::LoadFrame {
            url: self.state.target_url.clone(),
        }];

        if !self.subscribed {
            effects.extend(
                Listener::ALL
                    .iter()
                    .map(|&listener| Effect::Subscribe { listener }),
            );
            self.subscribed = true;
        }

        self.state.is_mobile = responsive::is_mobile_width(surface.viewport_width());
        effects.push(Effect::MountOverlay);
        effects
    }

    fn open_from_button(&mut self, surface: &dyn Surface) -> Vec<Effect> {
        tracing::info!("Opening from trigger button");
        machine::begin_button_session(&mut self.state);

        let mut effects = self.prepare_open(surface);
        effects.push(Effect::FillFrame);
        self.close_flow = Some(CloseFlow::Button);

        self.animator.supersede();
        effects.push(
            self.animator
                .reveal_container_later(BUTTON_REVEAL_DELAY_MS, BUTTON_REVEAL_DURATION_MS),
        );
        effects.extend(self.animator.transition(
            &self.state,
            StateOverlay::status(DisplayStatus::Open),
            &[Element::ButtonContainer, Element::Frame],
            TRANSITION_DURATION_MS,
            surface.button_bounds(),
        ));
        effects.push(Effect::Fade {
            element: Element::ButtonLabel,
            from: 1.0,
            to: 0.0,
            timing: Timing {
                duration_ms: TRANSITION_DURATION_MS,
                easing: crate::animator::EASE_OPEN,
            },
        });

        self.commit(Action::Open);
        effects
    }

    fn open_from_api(
        &mut self,
        modal_position: Option<ModalPosition>,
        surface: &dyn Surface,
    ) -> Vec<Effect> {
        if self.state.is_from_button {
            tracing::debug!("Button session active, API open follows the button flow");
            return self.open_from_button(surface);
        }

        tracing::info!("Opening from API");
        let mut effects = self.prepare_open(surface);
        self.state.modal_position = modal_position.unwrap_or_default();
        self.close_flow = Some(CloseFlow::Api);

        self.animator.supersede();
        effects.extend(
            self.animator
                .reveal_container(self.state.modal_position, MODAL_DURATION_MS),
        );
        effects.extend(self.animator.transition(
            &self.state,
            StateOverlay::status(DisplayStatus::Open),
            &[Element::Frame],
            MODAL_DURATION_MS,
            surface.button_bounds(),
        ));

        self.commit(Action::Open);
        effects
    }

    // ========================================================================
    // Close
    // ========================================================================

    /// Runs the registered close action, then the `close` transition.
    ///
    /// With `teardown`, a close that fully dismisses the widget also drops
    /// the session listeners.
    fn close(&mut self, surface: &dyn Surface, teardown: bool) -> Vec<Effect> {
        let mut effects = match self.close_flow {
            Some(CloseFlow::Button) => self.close_from_button(surface),
            Some(CloseFlow::Api) => self.close_from_api(surface),
            None => Vec::new(),
        };

        let status = self.commit(Action::Close);

        if teardown && status == DisplayStatus::Hidden {
            effects.extend(self.teardown());
        }

        effects
    }

    /// Removes the session listeners, if registered.
    pub fn teardown(&mut self) -> Vec<Effect> {
        if !self.subscribed {
            return Vec::new();
        }

        tracing::debug!("Removing session listeners");
        self.subscribed = false;
        Listener::ALL
            .iter()
            .map(|&listener| Effect::Unsubscribe { listener })
            .collect()
    }

    fn close_from_button(&mut self, surface: &dyn Surface) -> Vec<Effect> {
        let next = machine::next_status(&self.state, Action::Close);

        self.animator.supersede();
        let mut effects = self.animator.hide_container(BUTTON_HIDE_DURATION_MS);
        effects.extend(self.animator.transition(
            &self.state,
            StateOverlay::status(next),
            &[Element::ButtonContainer, Element::Frame],
            TRANSITION_DURATION_MS,
            surface.button_bounds(),
        ));
        effects
    }

    fn close_from_api(&mut self, surface: &dyn Surface) -> Vec<Effect> {
        self.animator.supersede();
        let mut effects = self.animator.hide_container(MODAL_DURATION_MS);
        effects.extend(self.animator.transition(
            &self.state,
            StateOverlay::status(DisplayStatus::Closed),
            &[Element::Frame],
            MODAL_DURATION_MS,
            surface.button_bounds(),
        ));
        effects
    }

    /// Commits `action` and notifies `onStateChange`.
    fn commit(&mut self, action: Action) -> DisplayStatus {
        let transition = machine::apply(&mut self.state, action);
        self.callbacks
            .state_changed(transition.to, self.config.enable_console_logs);
        transition.to
    }

    // ========================================================================
    // Frame messages
    // ========================================================================

    fn handle_frame_message(
        &mut self,
        origin: &str,
        data: &str,
        surface: &dyn Surface,
    ) -> Vec<Effect> {
        let message = match bridge::decode(&self.state.target_url, origin, data) {
            Ok(message) => message,
            Err(discard) => {
                tracing::trace!("Discarding frame message: {}", discard);
                return Vec::new();
            }
        };

        match message {
            InboundMessage::ExitExperience => {
                tracing::debug!("Frame requested exit");
                self.close(surface, false)
            }
            InboundMessage::Event { event_type } => {
                self.callbacks
                    .message(&event_type, self.config.enable_console_logs);
                Vec::new()
            }
            InboundMessage::HideCloseButton => match self.config.login_redirect() {
                Ok(message) => vec![Effect::PostMessage {
                    message,
                    target_origin: app_settings::ANY_ORIGIN.to_string(),
                }],
                Err(e) => {
                    tracing::error!("Cannot build login redirect: {}", e);
                    Vec::new()
                }
            },
        }
    }
}
