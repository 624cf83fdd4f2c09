// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Read mode: an alternate initial placement for long content.
//!
//! Very long images (comic strips, chat screenshots, panoramas) are unreadable
//! when fitted whole. With a [`ReadMode`] configured, the engine instead
//! starts such content zoomed to fill the container across its short axis and
//! scrolled to its start, so the user can read it by panning along the long
//! axis.

use kurbo::Size;

use crate::geometry::{is_empty_size, round_hundredths};

bitflags::bitflags! {
    /// Content orientations a [`ReadMode`] applies to.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct ReadModeAxes: u8 {
        /// Content wider than it is tall.
        const HORIZONTAL = 0b01;
        /// Content taller than it is wide.
        const VERTICAL = 0b10;
    }
}

/// Decides whether content is "long" relative to the container.
///
/// Aspect ratios are compared after rounding to two decimals. When content
/// and container share an orientation (both portrait or both landscape) the
/// content must be at least `same_direction_multiple` times longer in aspect
/// than the container; otherwise `not_same_direction_multiple` applies.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LongImageDecider {
    /// Minimum aspect ratio multiple when orientations match.
    pub same_direction_multiple: f64,
    /// Minimum aspect ratio multiple when orientations differ.
    pub not_same_direction_multiple: f64,
}

impl LongImageDecider {
    /// Creates a decider with the given thresholds.
    #[must_use]
    pub const fn new(same_direction_multiple: f64, not_same_direction_multiple: f64) -> Self {
        Self {
            same_direction_multiple,
            not_same_direction_multiple,
        }
    }

    /// Returns `true` if `content` is long relative to `container`.
    #[must_use]
    pub fn is_long(&self, content: Size, container: Size) -> bool {
        if is_empty_size(content) || is_empty_size(container) {
            return false;
        }
        let content_ratio = round_hundredths(content.width / content.height);
        let container_ratio = round_hundredths(container.width / container.height);
        let same_direction = content_ratio == 1.0
            || container_ratio == 1.0
            || (content_ratio > 1.0 && container_ratio > 1.0)
            || (content_ratio < 1.0 && container_ratio < 1.0);
        let ratio = content_ratio.max(container_ratio) / content_ratio.min(container_ratio);
        let threshold = if same_direction {
            self.same_direction_multiple
        } else {
            self.not_same_direction_multiple
        };
        ratio >= threshold
    }
}

impl Default for LongImageDecider {
    fn default() -> Self {
        Self::new(2.5, 5.0)
    }
}

/// Read mode policy: which orientations it covers, and how "long" is judged.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReadMode {
    /// Orientations read mode is enabled for.
    pub axes: ReadModeAxes,
    /// Long-content test.
    pub decider: LongImageDecider,
}

impl ReadMode {
    /// Creates a read mode policy.
    #[must_use]
    pub const fn new(axes: ReadModeAxes, decider: LongImageDecider) -> Self {
        Self { axes, decider }
    }

    /// Returns `true` if read mode applies to `content` shown in `container`.
    ///
    /// `content` should already account for rotation.
    #[must_use]
    pub fn accepts(&self, content: Size, container: Size) -> bool {
        let orientation_enabled = (self.axes.contains(ReadModeAxes::HORIZONTAL)
            && content.width > content.height)
            || (self.axes.contains(ReadModeAxes::VERTICAL) && content.height > content.width);
        orientation_enabled && self.decider.is_long(content, container)
    }
}

impl Default for ReadMode {
    fn default() -> Self {
        Self::new(ReadModeAxes::all(), LongImageDecider::default())
    }
}
