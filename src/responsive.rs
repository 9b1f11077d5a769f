// SPDX-License-Identifier: GPL-3.0-only

//! Viewport breakpoint handling.

use crate::animator::TransitionAnimator;
use crate::app_settings::{MOBILE_BREAKPOINT_PX, TRANSITION_DURATION_MS};
use crate::effect::{Effect, Element};
use crate::geometry::{Bounds, StateOverlay};
use crate::state::WidgetState;

/// Returns true when a viewport of `width` logical pixels uses the mobile layout.
#[must_use]
pub fn is_mobile_width(width: f64) -> bool {
    width <= MOBILE_BREAKPOINT_PX
}

/// Elements reshaped on a breakpoint crossing.
#[must_use]
pub fn affected_elements(state: &WidgetState) -> Vec<Element> {
    let mut elements = vec![Element::Frame];
    if state.is_from_button {
        elements.push(Element::ButtonContainer);
    }
    elements
}

/// Applies a breakpoint crossing to `state`.
///
/// `is_mobile` is always recorded. A transition towards the new layout is
/// requested only while something is on screen; `displayStatus` is left
/// unchanged either way.
pub fn on_breakpoint(
    state: &mut WidgetState,
    animator: &TransitionAnimator,
    is_mobile: bool,
    button_bounds: Option<Bounds>,
) -> Vec<Effect> {
    if state.is_mobile == is_mobile {
        tracing::trace!("Breakpoint report without crossing (mobile: {})", is_mobile);
        return Vec::new();
    }

    let effects = if state.display_status.is_visible() {
        animator.transition(
            state,
            StateOverlay::mobile(is_mobile),
            &affected_elements(state),
            TRANSITION_DURATION_MS,
            button_bounds,
        )
    } else {
        Vec::new()
    };

    tracing::debug!(
        "Breakpoint crossed (mobile: {}) while {}",
        is_mobile,
        state.display_status
    );
    state.is_mobile = is_mobile;

    effects
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::presets;
    use crate::state::DisplayStatus;

    fn state_with(status: DisplayStatus, is_from_button: bool) -> WidgetState {
        let mut state = WidgetState::new("https://remitly.com");
        state.display_status = status;
        state.is_from_button = is_from_button;
        state
    }

    fn animations(effects: &[Effect]) -> Vec<Element> {
        effects.iter().filter_map(Effect::animated_element).collect()
    }

    #[test]
    fn test_breakpoint_boundary() {
        assert!(is_mobile_width(480.0));
        assert!(is_mobile_width(320.0));
        assert!(!is_mobile_width(480.5));
        assert!(!is_mobile_width(1280.0));
    }

    #[test]
    fn test_crossing_while_closed_only_records() {
        let animator = TransitionAnimator::new();
        for status in [DisplayStatus::Closed, DisplayStatus::Hidden] {
            let mut state = state_with(status, false);

            let effects = on_breakpoint(&mut state, &animator, true, None);

            assert!(effects.is_empty());
            assert!(state.is_mobile);
            assert_eq!(state.display_status, status);
        }
    }

    #[test]
    fn test_crossing_while_open_reshapes_frame() {
        let animator = TransitionAnimator::new();
        let mut state = state_with(DisplayStatus::Open, false);

        let effects = on_breakpoint(&mut state, &animator, true, None);

        assert_eq!(animations(&effects), vec![Element::Frame]);
        assert!(state.is_mobile);
        assert_eq!(state.display_status, DisplayStatus::Open);
        match &effects[0] {
            Effect::Animate { from, to, .. } => {
                assert_eq!(*from, presets::CENTER_MODAL);
                assert_eq!(*to, presets::MOBILE_MODAL);
            }
            other => panic!("Expected Animate, got {:?}", other),
        }
    }

    #[test]
    fn test_crossing_while_floating_reshapes_button_too() {
        let animator = TransitionAnimator::new();
        let mut state = state_with(DisplayStatus::Floating, true);
        state.is_mobile = true;

        let effects = on_breakpoint(&mut state, &animator, false, None);

        assert_eq!(
            animations(&effects),
            vec![Element::Frame, Element::ButtonContainer]
        );
        match &effects[1] {
            Effect::Animate { from, to, .. } => {
                assert_eq!(*from, presets::BOTTOM_BAR);
                assert_eq!(*to, presets::FLOATING_CONTROL);
            }
            other => panic!("Expected Animate, got {:?}", other),
        }
    }

    #[test]
    fn test_report_without_crossing_is_ignored() {
        let animator = TransitionAnimator::new();
        let mut state = state_with(DisplayStatus::Open, false);

        let effects = on_breakpoint(&mut state, &animator, false, None);

        assert!(effects.is_empty());
        assert!(!state.is_mobile);
    }
}
