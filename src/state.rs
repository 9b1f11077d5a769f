// SPDX-License-Identifier: GPL-3.0-only

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse visual mode of the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayStatus {
    /// Never opened since initialization.
    #[default]
    Closed,
    /// Dismissed; nothing is visible.
    Hidden,
    /// A button session was dismissed into a small anchored control.
    Floating,
    /// The remote experience is shown.
    Open,
}

impl DisplayStatus {
    /// Returns the wire name of the status, as handed to `onStateChange`.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayStatus::Closed => "closed",
            DisplayStatus::Hidden => "hidden",
            DisplayStatus::Floating => "floating",
            DisplayStatus::Open => "open",
        }
    }

    /// Returns true when something is on screen that a viewport change reshapes.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        matches!(self, DisplayStatus::Floating | DisplayStatus::Open)
    }
}

impl fmt::Display for DisplayStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Horizontal anchor of the open panel on wide viewports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModalPosition {
    Left,
    #[default]
    Center,
    Right,
}

/// The single mutable record of one widget instance.
///
/// Callbacks are held next to the state by [`crate::widget::Widget`] so this
/// record stays plain data and can be cloned into tests freely.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetState {
    /// Which shape family currently applies.
    pub display_status: DisplayStatus,
    /// Whether the current open or floating session came from the trigger button.
    pub is_from_button: bool,
    /// Whether the viewport is at or below the mobile breakpoint.
    pub is_mobile: bool,
    /// Anchor of the open panel; forced to center for button sessions.
    pub modal_position: ModalPosition,
    /// Address loaded into the frame; also the allow-list for inbound origins.
    pub target_url: String,
}

impl WidgetState {
    /// Creates the initial state for a widget loading `target_url`.
    pub fn new(target_url: impl Into<String>) -> Self {
        Self {
            display_status: DisplayStatus::Closed,
            is_from_button: false,
            is_mobile: false,
            modal_position: ModalPosition::Center,
            target_url: target_url.into(),
        }
    }
}
