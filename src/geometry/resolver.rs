// SPDX-License-Identifier: GPL-3.0-only

//! Mapping from widget state to target shapes.
//!
//! The current shape and the next shape of a transition follow different
//! rules: while a button session has not yet left the `closed` status, the
//! current shape is taken from the live bounds of the trigger button so the
//! overlay grows out of it. The next shape always comes from the table in
//! [`resolve`].

use super::presets::{
    BOTTOM_BAR, CENTER_MODAL, FLOATING_CONTROL, HIDDEN_AT_BOTTOM, HIDDEN_CENTER, HIDDEN_LEFT,
    HIDDEN_RIGHT, LEFT_MODAL, MOBILE_MODAL, RIGHT_MODAL,
};
use super::{Bounds, Shape};
use crate::state::{DisplayStatus, ModalPosition, WidgetState};

/// The part of [`WidgetState`] that determines geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeometryInput {
    pub display_status: DisplayStatus,
    pub is_mobile: bool,
    pub modal_position: ModalPosition,
}

impl From<&WidgetState> for GeometryInput {
    fn from(state: &WidgetState) -> Self {
        Self {
            display_status: state.display_status,
            is_mobile: state.is_mobile,
            modal_position: state.modal_position,
        }
    }
}

/// Partial state applied on top of the current one to compute the next shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StateOverlay {
    pub display_status: Option<DisplayStatus>,
    pub is_mobile: Option<bool>,
}

impl StateOverlay {
    /// Overlay moving to another display status.
    pub fn status(display_status: DisplayStatus) -> Self {
        Self {
            display_status: Some(display_status),
            ..Self::default()
        }
    }

    /// Overlay switching between the mobile and wide layouts.
    pub fn mobile(is_mobile: bool) -> Self {
        Self {
            is_mobile: Some(is_mobile),
            ..Self::default()
        }
    }

    /// Applies the overlay to `input`.
    #[must_use]
    pub fn apply(&self, input: GeometryInput) -> GeometryInput {
        GeometryInput {
            display_status: self.display_status.unwrap_or(input.display_status),
            is_mobile: self.is_mobile.unwrap_or(input.is_mobile),
            modal_position: input.modal_position,
        }
    }
}

/// Start and end point of one transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapePair {
    pub current: Shape,
    pub next: Shape,
}

/// Returns the resting shape for `input`.
///
/// This is a pure table lookup: the same input always yields the same shape.
#[must_use]
pub fn resolve(input: GeometryInput) -> Shape {
    match input.display_status {
        DisplayStatus::Closed | DisplayStatus::Hidden => {
            if input.is_mobile {
                return HIDDEN_AT_BOTTOM;
            }
            match input.modal_position {
                ModalPosition::Left => HIDDEN_LEFT,
                ModalPosition::Right => HIDDEN_RIGHT,
                ModalPosition::Center => HIDDEN_CENTER,
            }
        }
        DisplayStatus::Floating => {
            if input.is_mobile {
                BOTTOM_BAR
            } else {
                FLOATING_CONTROL
            }
        }
        DisplayStatus::Open => {
            if input.is_mobile {
                return MOBILE_MODAL;
            }
            match input.modal_position {
                ModalPosition::Left => LEFT_MODAL,
                ModalPosition::Right => RIGHT_MODAL,
                ModalPosition::Center => CENTER_MODAL,
            }
        }
    }
}

/// Returns the shape the overlay is in right now, if it can be determined.
///
/// `None` means a button session is starting but the button's bounds could
/// not be measured.
#[must_use]
pub fn current_shape(state: &WidgetState, button_bounds: Option<Bounds>) -> Option<Shape> {
    if state.display_status == DisplayStatus::Closed && state.is_from_button {
        return button_bounds.map(|bounds| bounds.to_shape());
    }

    Some(resolve(GeometryInput::from(state)))
}

/// Computes both endpoints of a transition.
///
/// `overlay` only affects the next shape. When the current shape is unknown
/// the transition fades in from a transparent copy of the next shape.
#[must_use]
pub fn transition_shapes(
    state: &WidgetState,
    overlay: StateOverlay,
    button_bounds: Option<Bounds>,
) -> ShapePair {
    let next = resolve(overlay.apply(GeometryInput::from(state)));
    let current = current_shape(state, button_bounds).unwrap_or_else(|| next.transparent());

    ShapePair { current, next }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Dimension;

    fn input(
        display_status: DisplayStatus,
        is_mobile: bool,
        position: ModalPosition,
    ) -> GeometryInput {
        GeometryInput {
            display_status,
            is_mobile,
            modal_position: position,
        }
    }

    const ALL_STATUSES: [DisplayStatus; 4] = [
        DisplayStatus::Closed,
        DisplayStatus::Hidden,
        DisplayStatus::Floating,
        DisplayStatus::Open,
    ];

    const ALL_POSITIONS: [ModalPosition; 3] =
        [ModalPosition::Left, ModalPosition::Center, ModalPosition::Right];

    #[test]
    fn test_resolve_table() {
        use DisplayStatus::*;
        use ModalPosition::*;

        for position in ALL_POSITIONS {
            assert_eq!(resolve(input(Closed, true, position)), HIDDEN_AT_BOTTOM);
            assert_eq!(resolve(input(Hidden, true, position)), HIDDEN_AT_BOTTOM);
            assert_eq!(resolve(input(Floating, true, position)), BOTTOM_BAR);
            assert_eq!(resolve(input(Floating, false, position)), FLOATING_CONTROL);
            assert_eq!(resolve(input(Open, true, position)), MOBILE_MODAL);
        }

        assert_eq!(resolve(input(Hidden, false, Left)), HIDDEN_LEFT);
        assert_eq!(resolve(input(Hidden, false, Right)), HIDDEN_RIGHT);
        assert_eq!(resolve(input(Closed, false, Center)), HIDDEN_CENTER);
        assert_eq!(resolve(input(Open, false, Left)), LEFT_MODAL);
        assert_eq!(resolve(input(Open, false, Right)), RIGHT_MODAL);
        assert_eq!(resolve(input(Open, false, Center)), CENTER_MODAL);
    }

    #[test]
    fn test_resolve_is_pure() {
        let mut previous = Vec::new();
        for status in ALL_STATUSES {
            for is_mobile in [false, true] {
                for position in ALL_POSITIONS {
                    let given = input(status, is_mobile, position);
                    previous.push((given, resolve(given)));
                }
            }
        }

        // Resolve again in reverse order; history must not matter.
        for (given, shape) in previous.iter().rev() {
            assert_eq!(resolve(*given), *shape);
        }
    }

    #[test]
    fn test_closed_button_session_starts_at_button() {
        let mut state = WidgetState::new("https://remitly.com");
        state.is_from_button = true;
        let bounds = Bounds::new(300.0, 24.0, 180.0, 80.0);

        let pair =
            transition_shapes(&state, StateOverlay::status(DisplayStatus::Open), Some(bounds));

        assert_eq!(pair.current, bounds.to_shape());
        assert_ne!(pair.current, HIDDEN_CENTER);
        assert_eq!(pair.next, CENTER_MODAL);
    }

    #[test]
    fn test_hidden_button_session_uses_table() {
        let mut state = WidgetState::new("https://remitly.com");
        state.is_from_button = true;
        state.display_status = DisplayStatus::Hidden;

        let pair = transition_shapes(
            &state,
            StateOverlay::status(DisplayStatus::Open),
            Some(Bounds::new(1.0, 1.0, 1.0, 1.0)),
        );

        assert_eq!(pair.current, HIDDEN_CENTER);
    }

    #[test]
    fn test_missing_button_bounds_fades_in() {
        let mut state = WidgetState::new("https://remitly.com");
        state.is_from_button = true;

        let pair = transition_shapes(&state, StateOverlay::status(DisplayStatus::Open), None);

        assert_eq!(pair.next, CENTER_MODAL);
        assert_eq!(pair.current, CENTER_MODAL.transparent());
    }

    #[test]
    fn test_overlay_only_affects_next_shape() {
        let mut state = WidgetState::new("https://remitly.com");
        state.display_status = DisplayStatus::Open;
        state.modal_position = ModalPosition::Left;

        let pair = transition_shapes(&state, StateOverlay::mobile(true), None);

        assert_eq!(pair.current, LEFT_MODAL);
        assert_eq!(pair.next, MOBILE_MODAL);
        assert_eq!(pair.next.top, Dimension::Percent(10.0));
    }
}
