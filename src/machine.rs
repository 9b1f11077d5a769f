// SPDX-License-Identifier: GPL-3.0-only

//! Display-state machine.
//!
//! ```text
//!   closed ──open──▶ open ◀──open── hidden / floating
//!                     │
//!          close, button session ──▶ floating ──close──▶ hidden
//!          close, API session    ──▶ hidden
//! ```
//!
//! Transitions are computed without side effects. The caller commits them
//! with [`apply`] and then notifies `onStateChange`.

use crate::state::{DisplayStatus, ModalPosition, WidgetState};

/// Caller intent driving the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Open,
    Close,
}

/// A committed status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: DisplayStatus,
    pub to: DisplayStatus,
    /// Whether the button session ended with this transition.
    pub ended_button_session: bool,
}

/// Returns the status `action` leads to from `state`.
#[must_use]
pub fn next_status(state: &WidgetState, action: Action) -> DisplayStatus {
    match action {
        Action::Open => DisplayStatus::Open,
        Action::Close => {
            if state.is_from_button && state.display_status == DisplayStatus::Open {
                DisplayStatus::Floating
            } else {
                DisplayStatus::Hidden
            }
        }
    }
}

/// Commits `action` to `state`.
///
/// Any transition into `hidden` ends a button session, so the next open
/// starts fresh. On reachable paths this only happens for `floating ->
/// hidden`: a button session closing from `open` always floats first.
pub fn apply(state: &mut WidgetState, action: Action) -> Transition {
    let from = state.display_status;
    let to = next_status(state, action);

    let ended_button_session = to == DisplayStatus::Hidden && state.is_from_button;
    if ended_button_session {
        state.is_from_button = false;
    }
    state.display_status = to;

    tracing::debug!("Display status {} -> {}", from, to);

    Transition {
        from,
        to,
        ended_button_session,
    }
}

/// Marks the session as started from the trigger button.
///
/// Button sessions always open centered.
pub fn begin_button_session(state: &mut WidgetState) {
    state.is_from_button = true;
    state.modal_position = ModalPosition::Center;
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn state_with(status: DisplayStatus, is_from_button: bool) -> WidgetState {
        let mut state = WidgetState::new("https://remitly.com");
        state.display_status = status;
        state.is_from_button = is_from_button;
        state
    }

    /// Reference model of the transition table.
    fn expected(
        status: DisplayStatus,
        is_from_button: bool,
        action: Action,
    ) -> (DisplayStatus, bool) {
        match action {
            Action::Open => (DisplayStatus::Open, is_from_button),
            Action::Close if is_from_button && status == DisplayStatus::Open => {
                (DisplayStatus::Floating, true)
            }
            Action::Close => (DisplayStatus::Hidden, false),
        }
    }

    #[test]
    fn test_open_from_every_status() {
        for status in [
            DisplayStatus::Closed,
            DisplayStatus::Hidden,
            DisplayStatus::Floating,
            DisplayStatus::Open,
        ] {
            assert_eq!(next_status(&state_with(status, false), Action::Open), DisplayStatus::Open);
            assert_eq!(next_status(&state_with(status, true), Action::Open), DisplayStatus::Open);
        }
    }

    #[test]
    fn test_button_session_floats_then_hides() {
        let mut state = state_with(DisplayStatus::Open, true);

        let first = apply(&mut state, Action::Close);
        assert_eq!(first.to, DisplayStatus::Floating);
        assert!(!first.ended_button_session);
        assert!(state.is_from_button);

        let second = apply(&mut state, Action::Close);
        assert_eq!(second.from, DisplayStatus::Floating);
        assert_eq!(second.to, DisplayStatus::Hidden);
        assert!(second.ended_button_session);
        assert!(!state.is_from_button);
    }

    #[test]
    fn test_api_session_hides_directly() {
        let mut state = state_with(DisplayStatus::Open, false);

        let transition = apply(&mut state, Action::Close);

        assert_eq!(transition.to, DisplayStatus::Hidden);
        assert!(!transition.ended_button_session);
    }

    #[test]
    fn test_close_before_open_hides() {
        let mut state = state_with(DisplayStatus::Closed, false);
        assert_eq!(apply(&mut state, Action::Close).to, DisplayStatus::Hidden);
    }

    #[test]
    fn test_button_session_forces_center() {
        let mut state = state_with(DisplayStatus::Closed, false);
        state.modal_position = ModalPosition::Right;

        begin_button_session(&mut state);

        assert!(state.is_from_button);
        assert_eq!(state.modal_position, ModalPosition::Center);
    }

    fn arb_status() -> impl Strategy<Value = DisplayStatus> {
        prop_oneof![
            Just(DisplayStatus::Closed),
            Just(DisplayStatus::Hidden),
            Just(DisplayStatus::Floating),
            Just(DisplayStatus::Open),
        ]
    }

    fn arb_action() -> impl Strategy<Value = Action> {
        prop_oneof![Just(Action::Open), Just(Action::Close)]
    }

    proptest! {
        /// Every action sequence follows the transition table step by step.
        #[test]
        fn prop_sequences_follow_table(
            start in arb_status(),
            is_from_button in any::<bool>(),
            actions in proptest::collection::vec(arb_action(), 0..32),
        ) {
            let mut state = state_with(start, is_from_button);
            let mut model = (start, is_from_button);

            for action in actions {
                model = expected(model.0, model.1, action);
                let transition = apply(&mut state, action);

                prop_assert_eq!(transition.to, model.0);
                prop_assert_eq!(state.display_status, model.0);
                prop_assert_eq!(state.is_from_button, model.1);
            }
        }

        /// Only a button session that is open can float.
        #[test]
        fn prop_floating_requires_open_button_session(
            start in arb_status(),
            is_from_button in any::<bool>(),
        ) {
            let state = state_with(start, is_from_button);
            let floats = next_status(&state, Action::Close) == DisplayStatus::Floating;
            prop_assert_eq!(floats, is_from_button && start == DisplayStatus::Open);
        }
    }
}
