// SPDX-License-Identifier: GPL-3.0-only

//! ce-widget - An embeddable overlay for a cross-origin remote experience
//!
//! The widget mounts a frame on a host page and animates it between a few
//! display states: a centered or side-anchored modal, a full-screen mobile
//! sheet, and a floating control left behind by a session started from the
//! page's trigger button.
//!
//! # Architecture
//!
//! The core is host-driven. The host feeds [`widget::WidgetEvent`]s in and
//! applies the [`effect::Effect`]s that come back, so the same logic runs in
//! a browser binding, in tests and in the bundled replay tool.
//!
//! # Modules
//!
//! - `sdk`: `initialize` / `open` / `close` entry points bound to a host
//! - `widget`: event handling and open/close choreography
//! - `machine`: display-state transitions
//! - `geometry`: shape table and transition endpoints
//! - `animator`: shape animations, container reveal and deferred hide
//! - `responsive`: mobile breakpoint handling
//! - `bridge`: frame message protocol and origin check
//! - `config`: host options and frame address
//! - `callbacks`: `onLoad`, `onMessage`, `onStateChange`
//! - `host`: the host seam and an in-memory recording host
//! - `driver`: tokio driver with real timers
//! - `replay`: scripted sessions for the `ce-widget-replay` binary

pub mod animator;
pub mod app_settings;
pub mod bridge;
pub mod callbacks;
pub mod config;
pub mod driver;
pub mod effect;
pub mod geometry;
pub mod host;
pub mod machine;
pub mod replay;
pub mod responsive;
pub mod sdk;
pub mod state;
pub mod widget;

pub use crate::callbacks::Callbacks;
pub use crate::config::{ConfigError, Environment, WidgetConfig};
pub use crate::effect::Effect;
pub use crate::host::{Host, RecordingHost, Surface};
pub use crate::sdk::Sdk;
pub use crate::state::{DisplayStatus, ModalPosition};

// ============================================================================
// Integration Tests
// ============================================================================
