// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Engine configuration.

use crate::animation::AnimationSpec;
use crate::math::DEFAULT_MEDIUM_SCALE_MIN_MULTIPLE;
use crate::modes::{Alignment, ContentScale};
use crate::read_mode::ReadMode;

/// Configuration of a [`ZoomEngine`](crate::ZoomEngine).
///
/// Fields that affect layout (`content_scale`, `alignment`, `read_mode`,
/// `medium_scale_min_multiple`) reset the engine when changed. The others
/// only affect later interactions.
///
/// ```rust
/// use understory_zoom::{ContentScale, ReadMode, ZoomConfig};
///
/// let config = ZoomConfig::default()
///     .with_content_scale(ContentScale::Crop)
///     .with_read_mode(Some(ReadMode::default()))
///     .with_three_step_scale(true);
/// assert!(config.three_step_scale);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ZoomConfig {
    /// How content is fitted into the container.
    pub content_scale: ContentScale,
    /// Where fitted content sits in the container.
    pub alignment: Alignment,
    /// Alternate initial placement for long content, if any.
    pub read_mode: Option<ReadMode>,
    /// The medium scale is at least this multiple of the minimum scale.
    pub medium_scale_min_multiple: f64,
    /// Duration and easing of animated transitions.
    pub animation_spec: AnimationSpec,
    /// Cycle through min, medium and max on [`switch_scale`](crate::ZoomEngine::switch_scale)
    /// instead of min and medium only.
    pub three_step_scale: bool,
    /// Let gestures stretch past the scale bounds with resistance.
    pub rubber_band_scale: bool,
}

impl ZoomConfig {
    /// Returns the config with `content_scale` replaced.
    #[must_use]
    pub fn with_content_scale(self, content_scale: ContentScale) -> Self {
        Self {
            content_scale,
            ..self
        }
    }

    /// Returns the config with `alignment` replaced.
    #[must_use]
    pub fn with_alignment(self, alignment: Alignment) -> Self {
        Self { alignment, ..self }
    }

    /// Returns the config with `read_mode` replaced.
    #[must_use]
    pub fn with_read_mode(self, read_mode: Option<ReadMode>) -> Self {
        Self { read_mode, ..self }
    }

    /// Returns the config with `medium_scale_min_multiple` replaced.
    #[must_use]
    pub fn with_medium_scale_min_multiple(self, medium_scale_min_multiple: f64) -> Self {
        Self {
            medium_scale_min_multiple,
            ..self
        }
    }

    /// Returns the config with `animation_spec` replaced.
    #[must_use]
    pub fn with_animation_spec(self, animation_spec: AnimationSpec) -> Self {
        Self {
            animation_spec,
            ..self
        }
    }

    /// Returns the config with `three_step_scale` replaced.
    #[must_use]
    pub fn with_three_step_scale(self, three_step_scale: bool) -> Self {
        Self {
            three_step_scale,
            ..self
        }
    }

    /// Returns the config with `rubber_band_scale` replaced.
    #[must_use]
    pub fn with_rubber_band_scale(self, rubber_band_scale: bool) -> Self {
        Self {
            rubber_band_scale,
            ..self
        }
    }

    /// Returns `true` if `self` and `other` lay content out differently.
    pub(crate) fn layout_differs(&self, other: &Self) -> bool {
        self.content_scale != other.content_scale
            || self.alignment != other.alignment
            || self.read_mode != other.read_mode
            || self.medium_scale_min_multiple != other.medium_scale_min_multiple
    }
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            content_scale: ContentScale::default(),
            alignment: Alignment::default(),
            read_mode: None,
            medium_scale_min_multiple: DEFAULT_MEDIUM_SCALE_MIN_MULTIPLE,
            animation_spec: AnimationSpec::default(),
            three_step_scale: false,
            rubber_band_scale: true,
        }
    }
}
