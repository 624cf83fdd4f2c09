// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_zoom --heading-base-level=0

//! Understory Zoom: a headless zoom/pan/rotate engine for large content.
//!
//! This crate models how a piece of content (typically a very large image)
//! is shown inside a fixed-size container: fitting, step scales, bounded
//! panning, rubber-band pinch zoom, flings and quarter-turn rotation. It
//! focuses on:
//! - Pure zoom-space math ([`ContentLayout`] and the `compute_*` functions):
//!   base transform, scale bounds, visible rects, offset bounds, coordinate
//!   conversion between content, container and touch space.
//! - A stateful [`ZoomEngine`] exposing the interaction API and change
//!   notification.
//! - Frame-driven animators ([`FloatAnimator`], [`FlingAnimator`]).
//!
//! It does **not** decode, tile or paint anything, and it does not recognize
//! gestures. Callers are expected to:
//! - Feed container and content sizes into the engine.
//! - Translate their input events into [`ZoomEngine::gesture_transform`],
//!   [`ZoomEngine::fling`] and friends.
//! - Call [`ZoomEngine::on_frame`] once per display refresh while
//!   [`ZoomEngine::is_animating`].
//! - Paint with [`ZoomEngine::display_affine`], and request tiles for
//!   [`ZoomEngine::content_visible_rect`].
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Rect, Size, Vec2};
//! use understory_zoom::ZoomEngine;
//!
//! let mut engine = ZoomEngine::new();
//! engine.set_container_size(Size::new(1000.0, 1000.0));
//! engine.set_content_size(Size::new(2000.0, 1000.0));
//!
//! // Fitted as a horizontal strip, centered vertically.
//! assert_eq!(engine.min_scale(), 0.5);
//! assert_eq!(
//!     engine.content_base_display_rect(),
//!     Rect::new(0.0, 250.0, 1000.0, 750.0)
//! );
//!
//! // Pinch out around the container center.
//! engine.gesture_transform(Point::new(500.0, 500.0), Vec2::ZERO, 2.0, 0.0);
//! assert_eq!(engine.transform().scale_x(), 1.0);
//!
//! // The content point under a touch.
//! let under_finger = engine.touch_point_to_content_point(Point::new(500.0, 500.0));
//! assert_eq!(under_finger, Point::new(1000.0, 500.0));
//! ```
//!
//! ## Driving animations
//!
//! ```rust
//! use kurbo::Size;
//! use understory_zoom::ZoomEngine;
//!
//! let mut engine = ZoomEngine::new();
//! engine.set_container_size(Size::new(1000.0, 1000.0));
//! engine.set_content_size(Size::new(2000.0, 1000.0));
//!
//! // Double tap: zoom to the next step, animated.
//! let next = engine.switch_scale(None, true);
//! let mut now = 0;
//! while engine.on_frame(now) {
//!     now += 16;
//! }
//! assert_eq!(engine.transform().scale_x(), next);
//! ```
//!
//! ## Design notes
//!
//! - Scale is uniform for interaction; only [`ContentScale::Fill`] produces
//!   a non-uniform base scale.
//! - Rotation is limited to quarter turns and rotates content within its own
//!   bounds, so content coordinates stay positive.
//! - Rects stored by the engine are rounded to whole pixels.
//! - Logging goes through `tracing` with target `understory_zoom`.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod animation;
mod config;
mod engine;
mod error;
mod geometry;
mod listeners;
mod math;
mod modes;
mod read_mode;

pub use animation::{AnimationSpec, Easing, FlingAnimator, FloatAnimator};
pub use config::ZoomConfig;
pub use engine::ZoomEngine;
pub use error::RotationError;
pub use geometry::{
    Edge, ScaleFactor, ScrollEdge, Transform, is_empty_size, lerp, normalize_rotation,
    reverse_rotation, rotate_point_in_space, rotate_rect_in_space, rotate_size, rotate_vec2,
    rotation_affine, size_center,
};
pub use listeners::{ListenerId, ListenerSet, Listeners};
pub use math::{
    ContentLayout, DEFAULT_MEDIUM_SCALE_MIN_MULTIPLE, InitialZoom, RUBBER_BAND_RATIO,
    calculate_next_step_scale, can_scroll_by_edge, compute_container_visible_rect,
    compute_initial_zoom, compute_location_user_offset, compute_scroll_edge,
    compute_transform_offset, container_point_to_touch_point, limit_scale_with_rubber_band,
    touch_point_to_container_point,
};
pub use modes::{Alignment, AxisAlignment, ContentScale};
pub use read_mode::{LongImageDecider, ReadMode, ReadModeAxes};
