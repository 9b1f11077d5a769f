// SPDX-License-Identifier: GPL-3.0-only

//! Seam between the widget and the rendering environment.
//!
//! A [`Surface`] answers the few questions the widget asks about the page. A
//! [`Host`] additionally applies the [`Effect`]s the widget returns.
//! [`RecordingHost`] keeps everything in memory and backs the tests and the
//! replay tool.

use crate::app_settings::{BUTTON_CONTAINER_ID, BUTTON_ID};
use crate::effect::{Effect, Element};
use crate::geometry::Bounds;

/// Read-only view of the host page.
pub trait Surface {
    /// Current viewport width in logical pixels.
    fn viewport_width(&self) -> f64;

    /// Returns true when an element with `id` exists on the page.
    fn has_element(&self, id: &str) -> bool;

    /// Live bounding box of the trigger button container, if measurable.
    fn button_bounds(&self) -> Option<Bounds>;
}

/// A surface that can also carry out effects.
pub trait Host: Surface {
    fn apply(&mut self, effect: Effect);
}

/// In-memory host recording every applied effect.
#[derive(Debug, Clone, Default)]
pub struct RecordingHost {
    pub viewport_width: f64,
    /// Bounds of the trigger button container; `None` when the page has no button.
    pub button: Option<Bounds>,
    pub effects: Vec<Effect>,
}

impl RecordingHost {
    /// A page without a trigger button.
    pub fn new(viewport_width: f64) -> Self {
        Self {
            viewport_width,
            ..Self::default()
        }
    }

    /// Adds a trigger button at `bounds`.
    #[must_use]
    pub fn with_button(mut self, bounds: Bounds) -> Self {
        self.button = Some(bounds);
        self
    }

    /// Removes and returns the effects recorded so far.
    pub fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    /// Number of shape animations recorded for `element`.
    #[must_use]
    pub fn animation_count(&self, element: Element) -> usize {
        self.effects
            .iter()
            .filter(|effect| effect.animated_element() == Some(element))
            .count()
    }
}

impl Surface for RecordingHost {
    fn viewport_width(&self) -> f64 {
        self.viewport_width
    }

    fn has_element(&self, id: &str) -> bool {
        self.button.is_some() && (id == BUTTON_ID || id == BUTTON_CONTAINER_ID)
    }

    fn button_bounds(&self) -> Option<Bounds> {
        self.button
    }
}

impl Host for RecordingHost {
    fn apply(&mut self, effect: Effect) {
        self.effects.push(effect);
    }
}
