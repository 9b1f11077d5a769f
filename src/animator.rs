// SPDX-License-Identifier: GPL-3.0-only

//! Transition requests for the overlay elements.
//!
//! The animator turns a state change into [`Effect`]s: a shape animation per
//! element, the frame corner sync, and the container choreography around
//! them. It never writes to [`WidgetState`]; callers commit status changes
//! themselves.
//!
//! # Container choreography
//!
//! - Reveal: the container becomes visible first, then the backdrop fades in.
//! - Hide: the backdrop fades out immediately, the container is hidden once
//!   the fade has run. The hide is a [`DeferredTask`] tied to the current
//!   [`TransitionToken`], so a newer open or close cancels it.

use crate::effect::{
    DeferredTask, Easing, Effect, Element, ScrimBackground, Timing, TransitionToken,
};
use crate::geometry::{Bounds, StateOverlay, transition_shapes};
use crate::state::{DisplayStatus, ModalPosition, WidgetState};

/// Curve used when the overlay ends up open.
pub const EASE_OPEN: Easing = Easing::cubic_bezier(0.7, 0.0, 0.3, 1.0);

/// Curve used for every other destination.
pub const EASE_CLOSE: Easing = Easing::cubic_bezier(0.7, 0.0, 0.3, 1.0);

/// Picks the easing for a transition ending in `status`.
#[must_use]
pub fn easing_for(status: DisplayStatus) -> Easing {
    if status == DisplayStatus::Open {
        EASE_OPEN
    } else {
        EASE_CLOSE
    }
}

/// Backdrop fill matching the panel anchor.
#[must_use]
pub fn scrim_background(position: ModalPosition) -> ScrimBackground {
    match position {
        ModalPosition::Left => ScrimBackground::FromLeft,
        ModalPosition::Right => ScrimBackground::FromRight,
        ModalPosition::Center => ScrimBackground::Uniform,
    }
}

/// Drives shape transitions and owns the current transition token.
#[derive(Debug, Default)]
pub struct TransitionAnimator {
    token: TransitionToken,
}

impl TransitionAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Token of the latest open or close.
    #[must_use]
    pub fn token(&self) -> TransitionToken {
        self.token
    }

    /// Starts a new open or close, invalidating every pending deferred task.
    pub fn supersede(&mut self) -> TransitionToken {
        self.token = self.token.next();
        self.token
    }

    /// Requests the same shape transition on every element in `elements`.
    ///
    /// `overlay` is applied on top of `state` for the destination only. The
    /// destination corner radius is also pushed onto the frame itself.
    pub fn transition(
        &self,
        state: &WidgetState,
        overlay: StateOverlay,
        elements: &[Element],
        duration_ms: u64,
        button_bounds: Option<Bounds>,
    ) -> Vec<Effect> {
        let shapes = transition_shapes(state, overlay, button_bounds);
        let status = overlay.display_status.unwrap_or(state.display_status);
        let timing = Timing {
            duration_ms,
            easing: easing_for(status),
        };

        tracing::debug!(
            "Transition towards {} over {}ms for {} element(s)",
            status,
            duration_ms,
            elements.len()
        );

        let mut effects: Vec<Effect> = elements
            .iter()
            .map(|&element| Effect::Animate {
                element,
                from: shapes.current,
                to: shapes.next,
                timing,
            })
            .collect();

        effects.push(Effect::SetFrameBorderRadius {
            radius: shapes.next.border_radius,
        });

        effects
    }

    /// Shows the container and fades the backdrop in.
    pub fn reveal_container(&self, position: ModalPosition, duration_ms: u64) -> Vec<Effect> {
        vec![
            Effect::SetContainerVisible { visible: true },
            Effect::SetScrimBackground {
                background: scrim_background(position),
            },
            Effect::Fade {
                element: Element::Scrim,
                from: 0.0,
                to: 1.0,
                timing: Timing {
                    duration_ms,
                    easing: EASE_OPEN,
                },
            },
        ]
    }

    /// Fades the backdrop out and hides the container once the fade is done.
    pub fn hide_container(&self, duration_ms: u64) -> Vec<Effect> {
        vec![
            Effect::Fade {
                element: Element::Scrim,
                from: 1.0,
                to: 0.0,
                timing: Timing {
                    duration_ms,
                    easing: EASE_CLOSE,
                },
            },
            Effect::Schedule {
                token: self.token,
                delay_ms: duration_ms,
                task: DeferredTask::HideContainer,
            },
        ]
    }

    /// Reveals the container after `delay_ms`, unless superseded meanwhile.
    pub fn reveal_container_later(&self, delay_ms: u64, duration_ms: u64) -> Effect {
        Effect::Schedule {
            token: self.token,
            delay_ms,
            task: DeferredTask::RevealContainer { duration_ms },
        }
    }

    /// Runs a deferred task whose timer fired.
    ///
    /// Tasks scheduled under an older token are dropped.
    pub fn run_deferred(
        &self,
        token: TransitionToken,
        task: DeferredTask,
        position: ModalPosition,
    ) -> Vec<Effect> {
        if token != self.token {
            tracing::trace!(
                "Dropping stale {:?} (token {:?}, current {:?})",
                task,
                token,
                self.token
            );
            return Vec::new();
        }

        match task {
            DeferredTask::RevealContainer { duration_ms } => {
                self.reveal_container(position, duration_ms)
            }
            DeferredTask::HideContainer => vec![Effect::SetContainerVisible { visible: false }],
        }
    }
}
