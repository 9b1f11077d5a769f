// SPDX-License-Identifier: GPL-3.0-only

//! Centralized widget settings and constants.

/// Viewport width in logical pixels at or below which the mobile layout applies.
pub const MOBILE_BREAKPOINT_PX: f64 = 480.0;

/// Media query matching the mobile layout.
pub const MOBILE_MEDIA_QUERY: &str = "(max-width: 480px)";

/// Viewport width the replay tool starts with.
pub const REPLAY_VIEWPORT_WIDTH: f64 = 1280.0;

// ============================================================================
// Durations
// ============================================================================

/// Default duration for shape transitions in milliseconds.
pub const TRANSITION_DURATION_MS: u64 = 600;

/// Duration of API-initiated open and close transitions in milliseconds.
pub const MODAL_DURATION_MS: u64 = 800;

/// Delay before the container is revealed during a button open.
pub const BUTTON_REVEAL_DELAY_MS: u64 = 200;

/// Backdrop fade-in duration used by the button open.
pub const BUTTON_REVEAL_DURATION_MS: u64 = 600;

/// Backdrop fade-out duration used by the button close.
pub const BUTTON_HIDE_DURATION_MS: u64 = 200;

// ============================================================================
// Host element identifiers
// ============================================================================

/// Identifier of the optional host-supplied trigger button.
pub const BUTTON_ID: &str = "remitly-button";

/// Identifier of the optional element wrapping the trigger button.
pub const BUTTON_CONTAINER_ID: &str = "remitly-button-container";

// ============================================================================
// Remote experience addressing
// ============================================================================

/// Host serving the remote experience in production.
pub const PRODUCTION_BASE_URL: &str = "https://remitly.com";

/// Host serving the remote experience for development and staging.
pub const PREPROD_BASE_URL: &str = "https://preprod.dev.remitly.com";

/// Value of the `utm_medium` attribution parameter.
pub const UTM_MEDIUM: &str = "channelpartner";

/// Target origin used for outbound frame messages.
pub const ANY_ORIGIN: &str = "*";
