// SPDX-License-Identifier: GPL-3.0-only

//! Fixed shapes for every display status.

use super::{CornerRadii, Dimension, Shape, Transform};

/// Ring width of the trigger button and the floating control.
pub const BUTTON_BORDER_WIDTH_PX: f32 = 2.0;

/// Corner radius of the open panel and the mobile sheet.
const PANEL_RADIUS: f32 = 16.0;

const VERTICALLY_CENTERED: Transform =
    Transform::Translate(Dimension::Px(0.0), Dimension::Percent(-50.0));

/// Fixed-size panel centered in the viewport.
pub const CENTER_MODAL: Shape = Shape {
    top: Dimension::Percent(50.0),
    right: Dimension::Auto,
    bottom: Dimension::Auto,
    left: Dimension::Percent(50.0),
    width: Dimension::Px(380.0),
    height: Dimension::Percent(100.0),
    max_height: Dimension::Px(680.0),
    border_radius: CornerRadii::uniform(PANEL_RADIUS),
    border_width: Dimension::Px(0.0),
    opacity: 1.0,
    transform: Transform::Translate(Dimension::Percent(-50.0), Dimension::Percent(-50.0)),
};

/// Panel anchored near the left edge.
pub const LEFT_MODAL: Shape = Shape {
    left: Dimension::Percent(6.0),
    right: Dimension::Auto,
    transform: VERTICALLY_CENTERED,
    ..CENTER_MODAL
};

/// Panel anchored near the right edge.
pub const RIGHT_MODAL: Shape = Shape {
    left: Dimension::Auto,
    right: Dimension::Percent(6.0),
    transform: VERTICALLY_CENTERED,
    ..CENTER_MODAL
};

/// Near-full-screen sheet below a strip of the host page.
pub const MOBILE_MODAL: Shape = Shape {
    top: Dimension::Percent(10.0),
    right: Dimension::Auto,
    bottom: Dimension::Auto,
    left: Dimension::Auto,
    width: Dimension::Percent(100.0),
    height: Dimension::Percent(100.0),
    max_height: Dimension::None,
    border_radius: CornerRadii::top(PANEL_RADIUS),
    border_width: Dimension::Px(0.0),
    opacity: 1.0,
    transform: Transform::None,
};

/// Circular control left behind by a dismissed button session.
pub const FLOATING_CONTROL: Shape = Shape {
    top: Dimension::Auto,
    right: Dimension::Percent(15.0),
    bottom: Dimension::Percent(15.0),
    left: Dimension::Auto,
    width: Dimension::Px(64.0),
    height: Dimension::Px(64.0),
    max_height: Dimension::None,
    border_radius: CornerRadii::uniform(32.0),
    border_width: Dimension::Px(BUTTON_BORDER_WIDTH_PX),
    opacity: 1.0,
    transform: Transform::None,
};

/// Floating control on mobile: a bar along the bottom edge.
pub const BOTTOM_BAR: Shape = Shape {
    top: Dimension::Auto,
    right: Dimension::Px(0.0),
    bottom: Dimension::Px(0.0),
    left: Dimension::Px(0.0),
    width: Dimension::Auto,
    height: Dimension::Px(64.0),
    max_height: Dimension::None,
    border_radius: CornerRadii::uniform(PANEL_RADIUS),
    border_width: Dimension::Px(0.0),
    opacity: 1.0,
    transform: Transform::None,
};

/// Mobile sheet pushed below the bottom edge.
pub const HIDDEN_AT_BOTTOM: Shape = Shape {
    top: Dimension::Percent(100.0),
    bottom: Dimension::Px(0.0),
    ..MOBILE_MODAL
};

pub const HIDDEN_LEFT: Shape = Shape {
    left: Dimension::Percent(-10.0),
    opacity: 0.0,
    ..LEFT_MODAL
};

pub const HIDDEN_CENTER: Shape = Shape {
    opacity: 0.0,
    ..CENTER_MODAL
};

pub const HIDDEN_RIGHT: Shape = Shape {
    right: Dimension::Percent(-10.0),
    opacity: 0.0,
    ..RIGHT_MODAL
};
