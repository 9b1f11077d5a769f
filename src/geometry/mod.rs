// SPDX-License-Identifier: GPL-3.0-only

//! Geometry values used as animation endpoints.
//!
//! A [`Shape`] describes where the overlay sits and how it looks at rest. It
//! serializes to a CSS keyframe object (camelCase property names, CSS text
//! values) so a host can hand it to its animation primitive unchanged.
//!
//! # Modules
//!
//! - `presets`: the fixed shapes for each display status
//! - `resolver`: mapping from widget state to a shape pair

pub mod presets;
pub mod resolver;

use serde::{Serialize, Serializer};
use std::fmt;

pub use resolver::{GeometryInput, ShapePair, StateOverlay, resolve, transition_shapes};

// ============================================================================
// Scalar values
// ============================================================================

/// A CSS-like length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Dimension {
    /// `auto`
    Auto,
    /// `none`, only meaningful for limits such as `maxHeight`.
    None,
    /// Logical pixels.
    Px(f32),
    /// Percentage of the containing block.
    Percent(f32),
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::Auto => f.write_str("auto"),
            Dimension::None => f.write_str("none"),
            Dimension::Px(v) => write!(f, "{}px", v),
            Dimension::Percent(v) => write!(f, "{}%", v),
        }
    }
}

impl Serialize for Dimension {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Corner radii in pixels, clockwise from the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CornerRadii {
    pub top_left: f32,
    pub top_right: f32,
    pub bottom_right: f32,
    pub bottom_left: f32,
}

impl CornerRadii {
    /// Same radius on every corner.
    pub const fn uniform(radius: f32) -> Self {
        Self {
            top_left: radius,
            top_right: radius,
            bottom_right: radius,
            bottom_left: radius,
        }
    }

    /// Rounded top corners only, for sheets attached to the bottom edge.
    pub const fn top(radius: f32) -> Self {
        Self {
            top_left: radius,
            top_right: radius,
            bottom_right: 0.0,
            bottom_left: 0.0,
        }
    }

    fn is_uniform(&self) -> bool {
        self.top_left == self.top_right
            && self.top_right == self.bottom_right
            && self.bottom_right == self.bottom_left
    }
}

impl fmt::Display for CornerRadii {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_uniform() {
            write!(f, "{}px", self.top_left)
        } else {
            write!(
                f,
                "{}px {}px {}px {}px",
                self.top_left, self.top_right, self.bottom_right, self.bottom_left
            )
        }
    }
}

impl Serialize for CornerRadii {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A 2D transform applied after positioning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transform {
    None,
    Translate(Dimension, Dimension),
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transform::None => f.write_str("none"),
            Transform::Translate(x, y) => write!(f, "translate({}, {})", x, y),
        }
    }
}

impl Serialize for Transform {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// ============================================================================
// Shape
// ============================================================================

/// Declarative position, size and look of an overlay element.
///
/// Shapes are immutable endpoints; derive a variant with struct update syntax
/// rather than mutating one in place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Shape {
    pub top: Dimension,
    pub right: Dimension,
    pub bottom: Dimension,
    pub left: Dimension,
    pub width: Dimension,
    pub height: Dimension,
    pub max_height: Dimension,
    pub border_radius: CornerRadii,
    pub border_width: Dimension,
    pub opacity: f32,
    pub transform: Transform,
}

impl Shape {
    /// Returns the same shape fully transparent.
    #[must_use]
    pub fn transparent(self) -> Self {
        Self {
            opacity: 0.0,
            ..self
        }
    }
}

/// Viewport-relative bounding box of an element, in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, serde::Deserialize)]
pub struct Bounds {
    pub top: f32,
    pub left: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    /// Creates bounds from a top-left corner and a size.
    pub fn new(top: f32, left: f32, width: f32, height: f32) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }

    /// Shape that pins an element exactly over these bounds.
    #[must_use]
    pub fn to_shape(&self) -> Shape {
        Shape {
            top: Dimension::Px(self.top),
            right: Dimension::Auto,
            bottom: Dimension::Auto,
            left: Dimension::Px(self.left),
            width: Dimension::Px(self.width),
            height: Dimension::Px(self.height),
            max_height: Dimension::None,
            border_radius: CornerRadii::uniform(0.0),
            border_width: Dimension::Px(presets::BUTTON_BORDER_WIDTH_PX),
            opacity: 1.0,
            transform: Transform::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_css_text() {
        assert_eq!(Dimension::Auto.to_string(), "auto");
        assert_eq!(Dimension::None.to_string(), "none");
        assert_eq!(Dimension::Px(380.0).to_string(), "380px");
        assert_eq!(Dimension::Percent(-10.0).to_string(), "-10%");
        assert_eq!(Dimension::Px(12.5).to_string(), "12.5px");
    }

    #[test]
    fn test_corner_radii_css_text() {
        assert_eq!(CornerRadii::uniform(16.0).to_string(), "16px");
        assert_eq!(CornerRadii::top(16.0).to_string(), "16px 16px 0px 0px");
    }

    #[test]
    fn test_transform_css_text() {
        let centered = Transform::Translate(Dimension::Percent(-50.0), Dimension::Percent(-50.0));
        assert_eq!(centered.to_string(), "translate(-50%, -50%)");
        assert_eq!(Transform::None.to_string(), "none");
    }

    #[test]
    fn test_shape_serializes_as_keyframe() {
        let json = serde_json::to_value(presets::CENTER_MODAL).unwrap();

        assert_eq!(json["top"], "50%");
        assert_eq!(json["maxHeight"], "680px");
        assert_eq!(json["borderRadius"], "16px");
        assert_eq!(json["transform"], "translate(-50%, -50%)");
        assert_eq!(json["opacity"], 1.0);
    }

    #[test]
    fn test_bounds_shape_pins_element() {
        let shape = Bounds::new(120.0, 40.0, 180.0, 80.0).to_shape();

        assert_eq!(shape.top, Dimension::Px(120.0));
        assert_eq!(shape.left, Dimension::Px(40.0));
        assert_eq!(shape.width, Dimension::Px(180.0));
        assert_eq!(shape.height, Dimension::Px(80.0));
        assert_eq!(shape.right, Dimension::Auto);
        assert_eq!(shape.bottom, Dimension::Auto);
        assert_eq!(shape.border_radius, CornerRadii::uniform(0.0));
        assert_eq!(shape.opacity, 1.0);
    }

    #[test]
    fn test_transparent_keeps_geometry() {
        let faded = presets::FLOATING_CONTROL.transparent();
        assert_eq!(faded.opacity, 0.0);
        assert_eq!(faded.width, presets::FLOATING_CONTROL.width);
    }
}
