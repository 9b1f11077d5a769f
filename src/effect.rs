// SPDX-License-Identifier: GPL-3.0-only

//! Side-effect requests emitted by the widget.
//!
//! The widget never touches the page directly. Every handler returns a list
//! of [`Effect`]s, in the order they must be applied, and the host performs
//! them (see [`crate::host::Host`]). Effects serialize to JSON so a binding
//! layer or the replay tool can forward them verbatim.

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

use crate::bridge::OutboundMessage;
use crate::geometry::{CornerRadii, Shape};

/// Overlay elements the widget animates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Element {
    /// The embedded frame showing the remote experience.
    Frame,
    /// Host element wrapping the trigger button.
    ButtonContainer,
    /// The trigger button itself (its label fades during a button open).
    ButtonLabel,
    /// Backdrop behind the frame.
    Scrim,
}

/// A cubic Bézier timing function.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Easing {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl Easing {
    pub const fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cubic-bezier({},{},{},{})", self.x1, self.y1, self.x2, self.y2)
    }
}

impl Serialize for Easing {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Duration and easing of one animation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Timing {
    pub duration_ms: u64,
    pub easing: Easing,
}

/// Event listeners the widget asks the host to hold while a session is live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Listener {
    /// `message` events posted to the host window.
    FrameMessages,
    /// `load` events of the embedded frame.
    FrameLoad,
    /// Change events of the mobile breakpoint media query.
    Breakpoint,
}

impl Listener {
    pub const ALL: [Listener; 3] = [
        Listener::FrameMessages,
        Listener::FrameLoad,
        Listener::Breakpoint,
    ];

    /// Media query backing this listener, if any.
    #[must_use]
    pub fn media_query(&self) -> Option<&'static str> {
        match self {
            Listener::Breakpoint => Some(crate::app_settings::MOBILE_MEDIA_QUERY),
            Listener::FrameMessages | Listener::FrameLoad => None,
        }
    }
}

/// Fill of the backdrop, following the side the panel opens on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrimBackground {
    /// Dark at the left edge, fading out to the right.
    FromLeft,
    /// Dark at the right edge, fading out to the left.
    FromRight,
    /// Uniform tint.
    Uniform,
}

impl ScrimBackground {
    /// CSS `background` value.
    #[must_use]
    pub fn css(&self) -> &'static str {
        match self {
            ScrimBackground::FromLeft => "linear-gradient(to right, #0008, #0000)",
            ScrimBackground::FromRight => "linear-gradient(to left, #0008, #0000)",
            ScrimBackground::Uniform => "rgba(0, 0, 0, 0.6)",
        }
    }
}

impl Serialize for ScrimBackground {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.css())
    }
}

/// Identifies the open/close transition a deferred task belongs to.
///
/// Every open or close bumps the token; a task carrying an older token is
/// stale and is dropped when its timer fires.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TransitionToken(pub u64);

impl TransitionToken {
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// Work the widget wants done after a delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DeferredTask {
    /// Show the container and fade the backdrop in over `duration_ms`.
    #[serde(rename_all = "camelCase")]
    RevealContainer { duration_ms: u64 },
    /// Take the container out of the layout.
    HideContainer,
}

/// A side-effect request for the host.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Effect {
    /// Attach the overlay container to the page.
    MountOverlay,
    /// Point the frame at `url`.
    LoadFrame { url: String },
    /// Start delivering events of `listener`.
    Subscribe { listener: Listener },
    /// Stop delivering events of `listener`.
    Unsubscribe { listener: Listener },
    /// Reset the frame to fill its animated element.
    FillFrame,
    /// Show or hide the overlay container.
    SetContainerVisible { visible: bool },
    /// Set the backdrop fill.
    SetScrimBackground { background: ScrimBackground },
    /// Animate `element` between two shapes.
    Animate {
        element: Element,
        from: Shape,
        to: Shape,
        timing: Timing,
    },
    /// Animate only the opacity of `element`.
    Fade {
        element: Element,
        from: f32,
        to: f32,
        timing: Timing,
    },
    /// Keep the frame's own corner clipping in sync with its shape.
    SetFrameBorderRadius { radius: CornerRadii },
    /// Send [`crate::widget::WidgetEvent::TimerElapsed`] back after `delay_ms`.
    #[serde(rename_all = "camelCase")]
    Schedule {
        token: TransitionToken,
        delay_ms: u64,
        task: DeferredTask,
    },
    /// Post `message` into the frame.
    #[serde(rename_all = "camelCase")]
    PostMessage {
        message: OutboundMessage,
        target_origin: String,
    },
}

impl Effect {
    /// Returns the animated element if this is a shape animation.
    #[must_use]
    pub fn animated_element(&self) -> Option<Element> {
        match self {
            Effect::Animate { element, .. } => Some(*element),
            _ => None,
        }
    }
}
