// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pure zoom-space math.
//!
//! Three coordinate spaces are involved:
//! - **Content space**: pixels of the (unrotated) content, `0..content_size`.
//! - **Container space**: the container at the base transform, i.e. where
//!   the fitted content sits before any user zoom or pan.
//! - **Touch space**: what the user sees, container space after the user
//!   transform (`touch = container * user_scale + user_offset`).
//!
//! Most functions take a [`ContentLayout`], the five inputs that determine
//! the base transform. Every function returns a neutral value when the
//! container or the content is empty, never NaN.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Point, Rect, Size, Vec2};

use crate::geometry::{
    Edge, ScaleFactor, ScrollEdge, Transform, is_empty_size, normalize_rotation, reverse_rotation,
    rotate_point_in_space, rotate_rect_in_space, rotate_size, rotate_vec2, round_hundredths,
    size_center,
};
use crate::modes::{Alignment, AxisAlignment, ContentScale};
use crate::read_mode::ReadMode;

/// Default multiple of the minimum scale that the medium scale reaches at least.
pub const DEFAULT_MEDIUM_SCALE_MIN_MULTIPLE: f64 = 3.0;

/// How far past its bounds a rubber-band gesture may stretch the scale, as a
/// multiple of `max` (or divisor of `min`).
pub const RUBBER_BAND_RATIO: f64 = 2.0;

/// The inputs that place content in a container at the base transform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContentLayout {
    /// Size of the container (viewport), in pixels.
    pub container_size: Size,
    /// Logical size of the content, in pixels.
    pub content_size: Size,
    /// How content is fitted into the container.
    pub content_scale: ContentScale,
    /// Where fitted content sits in the container.
    pub alignment: Alignment,
    /// Rotation of the content in degrees: a multiple of 90 in `0..360`.
    pub rotation: u32,
}

impl ContentLayout {
    /// Creates a layout. `rotation` is normalized into `0..360`.
    #[must_use]
    pub fn new(
        container_size: Size,
        content_size: Size,
        content_scale: ContentScale,
        alignment: Alignment,
        rotation: u32,
    ) -> Self {
        Self {
            container_size,
            content_size,
            content_scale,
            alignment,
            rotation: normalize_rotation(rotation),
        }
    }

    /// Returns `true` if the container or the content has no area.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        is_empty_size(self.container_size) || is_empty_size(self.content_size)
    }

    /// Content size after rotation.
    #[must_use]
    pub fn rotated_content_size(&self) -> Size {
        rotate_size(self.content_size, self.rotation)
    }

    /// Scale factor of the base transform.
    #[must_use]
    pub fn base_scale_factor(&self) -> ScaleFactor {
        self.content_scale
            .scale_factor(self.rotated_content_size(), self.container_size)
    }

    /// The base transform: rotated content scaled per the content scale and
    /// aligned in the container.
    #[must_use]
    pub fn base_transform(&self) -> Transform {
        if self.is_empty() {
            return Transform::IDENTITY;
        }
        let scale = self.base_scale_factor();
        let scaled = scale.scale_size(self.rotated_content_size());
        let offset = self.alignment.align(scaled, self.container_size);
        Transform::new(scale, offset, f64::from(self.rotation))
    }

    /// Content bounds in container space at the base transform.
    #[must_use]
    pub fn base_display_rect(&self) -> Rect {
        if self.is_empty() {
            return Rect::ZERO;
        }
        let base = self.base_transform();
        let scaled = base.scale.scale_size(self.rotated_content_size());
        Rect::from_origin_size(base.offset.to_point(), scaled)
    }

    /// The part of the content visible at the base transform, in content space.
    #[must_use]
    pub fn base_visible_rect(&self) -> Rect {
        if self.is_empty() {
            return Rect::ZERO;
        }
        self.content_rect_under(self.container_size.to_rect())
    }

    /// Content bounds in touch space under the given user transform.
    #[must_use]
    pub fn display_rect(&self, user_scale: f64, user_offset: Vec2) -> Rect {
        if self.is_empty() {
            return Rect::ZERO;
        }
        let base = self.base_display_rect();
        Rect::new(
            base.x0 * user_scale + user_offset.x,
            base.y0 * user_scale + user_offset.y,
            base.x1 * user_scale + user_offset.x,
            base.y1 * user_scale + user_offset.y,
        )
    }

    /// The part of the content visible under the given user transform, in
    /// content space.
    #[must_use]
    pub fn visible_rect(&self, user_scale: f64, user_offset: Vec2) -> Rect {
        if self.is_empty() {
            return Rect::ZERO;
        }
        let visible =
            compute_container_visible_rect(self.container_size, user_scale, user_offset);
        self.content_rect_under(visible)
    }

    /// Maps a container-space region onto the content it covers, in content space.
    fn content_rect_under(&self, container_region: Rect) -> Rect {
        let display = self.base_display_rect();
        let visible = display.intersect(container_region);
        if visible.width() <= 0.0 || visible.height() <= 0.0 {
            return Rect::ZERO;
        }
        let scale = self.base_scale_factor();
        let rotated_visible = Rect::new(
            (visible.x0 - display.x0) / scale.scale_x,
            (visible.y0 - display.y0) / scale.scale_y,
            (visible.x1 - display.x0) / scale.scale_x,
            (visible.y1 - display.y0) / scale.scale_y,
        )
        .intersect(self.rotated_content_size().to_rect());
        rotate_rect_in_space(
            rotated_visible,
            self.rotated_content_size(),
            reverse_rotation(self.rotation),
        )
    }

    /// The range of user offsets that keeps content from revealing empty
    /// space past its edges, at the given user scale.
    ///
    /// On an axis where the scaled content is smaller than the container, the
    /// range collapses to the single offset that keeps the content aligned.
    #[must_use]
    pub fn user_offset_bounds(&self, user_scale: f64) -> Rect {
        if self.is_empty() {
            return Rect::ZERO;
        }
        let base = self.base_display_rect();
        let scaled = Rect::new(
            base.x0 * user_scale,
            base.y0 * user_scale,
            base.x1 * user_scale,
            base.y1 * user_scale,
        );
        let container = self.container_size;
        let (left, right) = axis_offset_bounds(
            scaled.x0,
            scaled.x1,
            container.width,
            user_scale,
            self.alignment.horizontal(),
        );
        let (top, bottom) = axis_offset_bounds(
            scaled.y0,
            scaled.y1,
            container.height,
            user_scale,
            self.alignment.vertical(),
        );
        Rect::new(left, top, right, bottom)
    }

    /// Maps a content-space point into container space.
    #[must_use]
    pub fn content_point_to_container_point(&self, content_point: Point) -> Point {
        if self.is_empty() {
            return Point::ZERO;
        }
        let base = self.base_transform();
        let rotated = rotate_point_in_space(content_point, self.content_size, self.rotation);
        (base.scale.scale_vec2(rotated.to_vec2()) + base.offset).to_point()
    }

    /// Maps a container-space point into content space.
    ///
    /// This is the exact inverse of
    /// [`content_point_to_container_point`](Self::content_point_to_container_point);
    /// points outside the content map outside `0..content_size`.
    #[must_use]
    pub fn container_point_to_content_point(&self, container_point: Point) -> Point {
        if self.is_empty() {
            return Point::ZERO;
        }
        let base = self.base_transform();
        let rotated = base
            .scale
            .unscale_vec2(container_point.to_vec2() - base.offset)
            .to_point();
        rotate_point_in_space(
            rotated,
            self.rotated_content_size(),
            reverse_rotation(self.rotation),
        )
    }
}

fn axis_offset_bounds(
    start: f64,
    end: f64,
    container: f64,
    user_scale: f64,
    alignment: AxisAlignment,
) -> (f64, f64) {
    if (end - start).round() >= container.round() {
        return (container - end, -start);
    }
    let overflow = container * user_scale - container;
    let offset = match alignment {
        AxisAlignment::Start => 0.0,
        AxisAlignment::Center => -overflow / 2.0,
        AxisAlignment::End => -overflow,
    };
    (offset, offset)
}

/// Scale bounds, base transform and initial user transform for a layout.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InitialZoom {
    /// Smallest allowed effective scale: the base scale.
    pub min_scale: f64,
    /// Intermediate step scale.
    pub medium_scale: f64,
    /// Largest allowed effective scale.
    pub max_scale: f64,
    /// Transform placing unscaled content in the container.
    pub base_transform: Transform,
    /// User transform to start from.
    pub user_transform: Transform,
}

impl InitialZoom {
    /// The result for an empty layout.
    pub const ORIGIN: Self = Self {
        min_scale: 1.0,
        medium_scale: 1.0,
        max_scale: 1.0,
        base_transform: Transform::IDENTITY,
        user_transform: Transform::IDENTITY,
    };
}

/// Computes scale bounds, base transform and initial user transform.
///
/// - `min_scale` is the base scale.
/// - `medium_scale` is at least `min_scale * medium_scale_min_multiple`, and
///   at least the scale at which the content covers the container.
/// - `max_scale` is at least twice `medium_scale`, and at least the scale at
///   which `content_origin_size` pixels are shown 1:1 when the content is a
///   downsampled preview of a larger original.
/// - With a matching `read_mode` (and a content scale other than
///   [`ContentScale::Fill`]) the user transform pre-zooms and pans to the
///   start of the content.
#[must_use]
pub fn compute_initial_zoom(
    layout: &ContentLayout,
    content_origin_size: Size,
    read_mode: Option<&ReadMode>,
    medium_scale_min_multiple: f64,
) -> InitialZoom {
    if layout.is_empty() {
        return InitialZoom::ORIGIN;
    }
    let base_transform = layout.base_transform();
    let rotated_content = layout.rotated_content_size();
    let [min_scale, medium_scale, max_scale] = compute_step_scales(
        layout.container_size,
        rotated_content,
        rotate_size(content_origin_size, layout.rotation),
        base_transform.scale_x(),
        medium_scale_min_multiple,
    );
    let read_mode_applies = layout.content_scale != ContentScale::Fill
        && read_mode.is_some_and(|mode| mode.accepts(rotated_content, layout.container_size));
    let user_transform = if read_mode_applies {
        compute_read_mode_transform(layout) - base_transform
    } else {
        Transform::IDENTITY
    };
    InitialZoom {
        min_scale,
        medium_scale,
        max_scale,
        base_transform,
        user_transform,
    }
}

/// Computes `[min, medium, max]` scales for rotated content.
fn compute_step_scales(
    container_size: Size,
    content_size: Size,
    content_origin_size: Size,
    base_scale: f64,
    medium_scale_min_multiple: f64,
) -> [f64; 3] {
    let min_scale = base_scale;
    let fill_scale = (container_size.width / content_size.width)
        .max(container_size.height / content_size.height);
    let origin_scale = if is_empty_size(content_origin_size) {
        1.0
    } else {
        (content_origin_size.width / content_size.width)
            .max(content_origin_size.height / content_size.height)
    };
    let medium_scale = (min_scale * medium_scale_min_multiple)
        .max(fill_scale)
        .max(min_scale);
    let max_scale = origin_scale.max(medium_scale * 2.0);
    [min_scale, medium_scale, max_scale]
}

/// The absolute transform read mode starts from: content fills the
/// container across its short axis and shows the start of its long axis.
fn compute_read_mode_transform(layout: &ContentLayout) -> Transform {
    let container = layout.container_size;
    let content = layout.rotated_content_size();
    let scale = (container.width / content.width).max(container.height / content.height);
    let scaled = Size::new(content.width * scale, content.height * scale);
    let axis = |alignment: AxisAlignment, size: f64, space: f64| {
        if size.round() > space.round() {
            match alignment {
                AxisAlignment::End => space - size,
                AxisAlignment::Start | AxisAlignment::Center => 0.0,
            }
        } else {
            alignment.align(size, space)
        }
    };
    let offset = Vec2::new(
        axis(layout.alignment.horizontal(), scaled.width, container.width),
        axis(layout.alignment.vertical(), scaled.height, container.height),
    );
    Transform::new(
        ScaleFactor::uniform(scale),
        offset,
        f64::from(layout.rotation),
    )
}

/// The visible part of the container under a user transform, in container space.
#[must_use]
pub fn compute_container_visible_rect(
    container_size: Size,
    user_scale: f64,
    user_offset: Vec2,
) -> Rect {
    if is_empty_size(container_size) || user_scale.is_nan() || user_scale <= 0.0 {
        return Rect::ZERO;
    }
    Rect::new(
        -user_offset.x / user_scale,
        -user_offset.y / user_scale,
        (container_size.width - user_offset.x) / user_scale,
        (container_size.height - user_offset.y) / user_scale,
    )
    .intersect(container_size.to_rect())
}

/// Computes the offset that keeps `centroid` fixed while scaling from
/// `current_scale` to `target_scale`, then applies `pan`.
///
/// `gesture_rotate` (degrees) rotates the content around the centroid.
#[must_use]
pub fn compute_transform_offset(
    current_scale: f64,
    current_offset: Vec2,
    target_scale: f64,
    centroid: Point,
    pan: Vec2,
    gesture_rotate: f64,
) -> Vec2 {
    if current_scale.is_nan() || current_scale <= 0.0 {
        return current_offset + pan;
    }
    let centroid = centroid.to_vec2();
    let arm = (centroid - current_offset) * (target_scale / current_scale);
    centroid - rotate_vec2(arm, gesture_rotate) + pan
}

/// Computes the user offset that centers `container_point` in the container
/// at `user_scale`.
#[must_use]
pub fn compute_location_user_offset(
    container_size: Size,
    container_point: Point,
    user_scale: f64,
) -> Vec2 {
    size_center(container_size).to_vec2() - container_point.to_vec2() * user_scale
}

/// Classifies the scroll position of `user_offset` within `user_offset_bounds`.
///
/// Values are compared after rounding to whole pixels.
#[must_use]
pub fn compute_scroll_edge(user_offset_bounds: Rect, user_offset: Vec2) -> ScrollEdge {
    let axis = |min: f64, max: f64, value: f64| {
        let (min, max, value) = (min.round(), max.round(), value.round());
        if min == max {
            Edge::Both
        } else if value >= max {
            Edge::Start
        } else if value <= min {
            Edge::End
        } else {
            Edge::None
        }
    };
    ScrollEdge::new(
        axis(user_offset_bounds.x0, user_offset_bounds.x1, user_offset.x),
        axis(user_offset_bounds.y0, user_offset_bounds.y1, user_offset.y),
    )
}

/// Returns whether content can scroll further on an axis.
///
/// A negative `direction` asks about scrolling toward the start (left/up);
/// zero or positive asks about scrolling toward the end (right/down).
#[must_use]
pub fn can_scroll_by_edge(scroll_edge: ScrollEdge, horizontal: bool, direction: i32) -> bool {
    let edge = if horizontal {
        scroll_edge.horizontal
    } else {
        scroll_edge.vertical
    };
    if direction < 0 {
        !matches!(edge, Edge::Start | Edge::Both)
    } else {
        !matches!(edge, Edge::End | Edge::Both)
    }
}

/// Limits a gesture scale to `[min_scale, max_scale]` with rubber-band resistance.
///
/// Inside the bounds, `target_scale` passes through. Past a bound, each
/// requested change is damped by half and by how far the scale has already
/// stretched toward [`RUBBER_BAND_RATIO`] times the bound. The result never
/// leaves `[min_scale / RUBBER_BAND_RATIO, max_scale * RUBBER_BAND_RATIO]`.
/// Collapsed bounds (`max_scale <= min_scale`) always yield `max_scale`.
#[must_use]
pub fn limit_scale_with_rubber_band(
    current_scale: f64,
    target_scale: f64,
    min_scale: f64,
    max_scale: f64,
) -> f64 {
    let lower = (min_scale / RUBBER_BAND_RATIO).max(f64::MIN_POSITIVE);
    let upper = (max_scale * RUBBER_BAND_RATIO).max(lower);
    if max_scale <= min_scale {
        return max_scale;
    }
    if !target_scale.is_finite() {
        return current_scale.clamp(lower, upper);
    }
    let stretched = if target_scale > max_scale {
        let range = upper - max_scale;
        if range <= 0.0 {
            return max_scale;
        }
        let progress = ((target_scale - max_scale) / range).clamp(0.0, 1.0);
        current_scale + (target_scale - current_scale) * (1.0 - progress) * 0.5
    } else if target_scale < min_scale {
        let range = min_scale - lower;
        if range <= 0.0 {
            return min_scale;
        }
        let progress = ((min_scale - target_scale) / range).clamp(0.0, 1.0);
        current_scale + (target_scale - current_scale) * (1.0 - progress) * 0.5
    } else {
        return target_scale;
    };
    stretched.clamp(lower, upper)
}

/// Picks the step scale that follows `current_scale`.
///
/// Returns the first step greater than `current_scale`, wrapping to the first
/// step when `current_scale` is at or past the last one. Comparison uses two
/// decimal places. Returns `current_scale` if `steps` is empty.
#[must_use]
pub fn calculate_next_step_scale(steps: &[f64], current_scale: f64) -> f64 {
    let current = round_hundredths(current_scale);
    steps
        .iter()
        .copied()
        .find(|step| round_hundredths(*step) > current)
        .or_else(|| steps.first().copied())
        .unwrap_or(current_scale)
}

/// Maps a touch-space point into container space.
#[must_use]
pub fn touch_point_to_container_point(
    user_scale: f64,
    user_offset: Vec2,
    touch_point: Point,
) -> Point {
    if user_scale.is_nan() || user_scale <= 0.0 {
        return touch_point;
    }
    ((touch_point.to_vec2() - user_offset) / user_scale).to_point()
}

/// Maps a container-space point into touch space.
#[must_use]
pub fn container_point_to_touch_point(
    user_scale: f64,
    user_offset: Vec2,
    container_point: Point,
) -> Point {
    (container_point.to_vec2() * user_scale + user_offset).to_point()
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect, Size, Vec2};

    use super::*;
    use crate::geometry::{Edge, ScrollEdge};
    use crate::read_mode::ReadMode;

    fn layout(container: Size, content: Size, scale: ContentScale, rotation: u32) -> ContentLayout {
        ContentLayout::new(container, content, scale, Alignment::Center, rotation)
    }

    fn wide_strip() -> ContentLayout {
        layout(
            Size::new(1000.0, 1000.0),
            Size::new(2000.0, 1000.0),
            ContentScale::Fit,
            0,
        )
    }

    #[test]
    fn fit_centers_wide_content_as_horizontal_strip() {
        let layout = wide_strip();
        let base = layout.base_transform();
        assert_eq!(base.scale, ScaleFactor::uniform(0.5));
        assert_eq!(base.offset, Vec2::new(0.0, 250.0));
        assert_eq!(
            layout.base_display_rect(),
            Rect::new(0.0, 250.0, 1000.0, 750.0)
        );
        assert_eq!(
            layout.base_visible_rect(),
            Rect::new(0.0, 0.0, 2000.0, 1000.0)
        );
    }

    #[test]
    fn crop_shows_the_middle_of_the_content() {
        let layout = layout(
            Size::new(1000.0, 1000.0),
            Size::new(2000.0, 1000.0),
            ContentScale::Crop,
            0,
        );
        assert_eq!(
            layout.base_display_rect(),
            Rect::new(-500.0, 0.0, 1500.0, 1000.0)
        );
        assert_eq!(
            layout.base_visible_rect(),
            Rect::new(500.0, 0.0, 1500.0, 1000.0)
        );
    }

    #[test]
    fn rotation_swaps_the_fitted_axes() {
        let layout = layout(
            Size::new(1000.0, 1000.0),
            Size::new(2000.0, 1000.0),
            ContentScale::Fit,
            90,
        );
        assert_eq!(layout.rotated_content_size(), Size::new(1000.0, 2000.0));
        assert_eq!(
            layout.base_display_rect(),
            Rect::new(250.0, 0.0, 750.0, 1000.0)
        );
        assert_eq!(layout.base_transform().rotation, 90.0);
    }

    #[test]
    fn empty_layout_is_neutral() {
        let layout = layout(Size::ZERO, Size::new(10.0, 10.0), ContentScale::Fit, 0);
        assert_eq!(layout.base_transform(), Transform::IDENTITY);
        assert_eq!(layout.base_display_rect(), Rect::ZERO);
        assert_eq!(layout.visible_rect(2.0, Vec2::ZERO), Rect::ZERO);
        assert_eq!(layout.user_offset_bounds(2.0), Rect::ZERO);
        let zoom = compute_initial_zoom(&layout, Size::ZERO, None, 3.0);
        assert_eq!(zoom, InitialZoom::ORIGIN);
    }

    #[test]
    fn offset_bounds_lock_axes_that_fit() {
        let layout = wide_strip();
        // At user scale 1 the strip spans the width exactly and is 500px tall.
        assert_eq!(
            layout.user_offset_bounds(1.0),
            Rect::new(0.0, 0.0, 0.0, 0.0)
        );
        // At 2x the strip is 2000x1000 in a 1000x1000 container.
        let bounds = layout.user_offset_bounds(2.0);
        assert_eq!(bounds, Rect::new(-1000.0, -500.0, 0.0, -500.0));
        // At 4x both axes overflow.
        let bounds = layout.user_offset_bounds(4.0);
        assert_eq!(bounds, Rect::new(-3000.0, -2000.0, 0.0, -1000.0));
    }

    #[test]
    fn offset_bounds_follow_alignment_when_locked() {
        let container = Size::new(1000.0, 1000.0);
        let content = Size::new(2000.0, 1000.0);
        let top = ContentLayout::new(container, content, ContentScale::Fit, Alignment::TopStart, 0);
        assert_eq!(top.user_offset_bounds(1.5).y0, 0.0);
        let bottom =
            ContentLayout::new(container, content, ContentScale::Fit, Alignment::BottomEnd, 0);
        assert_eq!(bottom.user_offset_bounds(1.5).y0, -500.0);
    }

    #[test]
    fn visible_rect_tracks_user_pan() {
        let layout = wide_strip();
        // 4x zoom, panned to the top-left corner of the content.
        let visible = layout.visible_rect(4.0, Vec2::new(0.0, -1000.0));
        assert_eq!(visible, Rect::new(0.0, 0.0, 500.0, 500.0));
        // Panned far away from the content: nothing is visible.
        assert_eq!(layout.visible_rect(1.0, Vec2::new(0.0, 5000.0)), Rect::ZERO);
    }

    #[test]
    fn container_visible_rect_is_clipped_to_container() {
        let size = Size::new(1000.0, 800.0);
        assert_eq!(
            compute_container_visible_rect(size, 2.0, Vec2::new(-200.0, -100.0)),
            Rect::new(100.0, 50.0, 600.0, 450.0)
        );
        assert_eq!(
            compute_container_visible_rect(size, 1.0, Vec2::new(100.0, 0.0)),
            Rect::new(0.0, 0.0, 900.0, 800.0)
        );
    }

    #[test]
    fn point_mapping_round_trips_for_all_rotations() {
        for rotation in [0, 90, 180, 270] {
            let layout = ContentLayout::new(
                Size::new(1080.0, 1920.0),
                Size::new(3000.0, 1700.0),
                ContentScale::Fit,
                Alignment::BottomStart,
                rotation,
            );
            let content_point = Point::new(1234.0, 567.0);
            let container_point = layout.content_point_to_container_point(content_point);
            let back = layout.container_point_to_content_point(container_point);
            assert!(
                (back - content_point).hypot() < 1e-6,
                "rotation {rotation}: {back:?}"
            );
        }
    }

    #[test]
    fn content_corner_maps_to_display_rect_corner() {
        let layout = layout(
            Size::new(1000.0, 1000.0),
            Size::new(2000.0, 1000.0),
            ContentScale::Fit,
            90,
        );
        // Top-left of the content lands at the top-right of the rotated box.
        assert_eq!(
            layout.content_point_to_container_point(Point::ZERO),
            Point::new(750.0, 0.0)
        );
    }

    #[test]
    fn step_scales_are_ordered() {
        let zoom = compute_initial_zoom(&wide_strip(), Size::new(8000.0, 4000.0), None, 3.0);
        assert_eq!(zoom.min_scale, 0.5);
        // Fill scale is 1.0, 3x min is 1.5.
        assert_eq!(zoom.medium_scale, 1.5);
        // Origin is 4x the content: 1:1 needs 4.0, more than 2x medium.
        assert_eq!(zoom.max_scale, 4.0);
        assert_eq!(zoom.user_transform, Transform::IDENTITY);
    }

    #[test]
    fn medium_scale_fills_the_container_for_long_content() {
        let layout = layout(
            Size::new(1000.0, 1000.0),
            Size::new(1000.0, 10_000.0),
            ContentScale::Fit,
            0,
        );
        let zoom = compute_initial_zoom(&layout, Size::ZERO, None, 3.0);
        assert_eq!(zoom.min_scale, 0.1);
        assert!((zoom.medium_scale - 1.0).abs() < 1e-12);
        assert!((zoom.max_scale - 2.0).abs() < 1e-12);
    }

    #[test]
    fn read_mode_starts_at_the_top_of_a_tall_strip() {
        let layout = layout(
            Size::new(1000.0, 1000.0),
            Size::new(1000.0, 10_000.0),
            ContentScale::Fit,
            0,
        );
        let zoom = compute_initial_zoom(&layout, Size::ZERO, Some(&ReadMode::default()), 3.0);
        let transform = zoom.base_transform + zoom.user_transform;
        assert!((transform.scale_x() - 1.0).abs() < 1e-9);
        assert!(transform.offset.hypot() < 1e-9);
        // The initial user transform stays inside the offset bounds.
        let bounds = layout.user_offset_bounds(zoom.user_transform.scale_x());
        assert!(zoom.user_transform.offset.x >= bounds.x0 - 0.5);
        assert!(zoom.user_transform.offset.y <= bounds.y1 + 0.5);
    }

    #[test]
    fn read_mode_is_ignored_for_fill() {
        let layout = layout(
            Size::new(1000.0, 1000.0),
            Size::new(1000.0, 10_000.0),
            ContentScale::Fill,
            0,
        );
        let zoom = compute_initial_zoom(&layout, Size::ZERO, Some(&ReadMode::default()), 3.0);
        assert_eq!(zoom.user_transform, Transform::IDENTITY);
    }

    #[test]
    fn transform_offset_keeps_centroid_fixed() {
        let current_offset = Vec2::new(-100.0, -50.0);
        let centroid = Point::new(300.0, 400.0);
        let offset = compute_transform_offset(2.0, current_offset, 3.0, centroid, Vec2::ZERO, 0.0);
        let before = touch_point_to_container_point(2.0, current_offset, centroid);
        let after = touch_point_to_container_point(3.0, offset, centroid);
        assert!((before - after).hypot() < 1e-9);

        let panned =
            compute_transform_offset(2.0, current_offset, 2.0, centroid, Vec2::new(5.0, -7.0), 0.0);
        assert_eq!(panned, Vec2::new(-95.0, -57.0));
    }

    #[test]
    fn rotating_transform_offset_keeps_centroid_fixed() {
        let current_scale = 2.0;
        let current_offset = Vec2::new(-100.0, -50.0);
        let target_scale = 3.0;
        let centroid = Point::new(300.0, 400.0);
        // The content point under the centroid before the gesture.
        let anchor = (centroid.to_vec2() - current_offset) / current_scale;
        for degrees in [90.0, 37.5, -140.0] {
            let offset = compute_transform_offset(
                current_scale,
                current_offset,
                target_scale,
                centroid,
                Vec2::ZERO,
                degrees,
            );
            let touch = rotate_vec2(anchor * target_scale, degrees) + offset;
            assert!((touch - centroid.to_vec2()).hypot() < 1e-9);
        }
    }

    #[test]
    fn location_offset_centers_the_point() {
        let container = Size::new(1000.0, 800.0);
        let point = Point::new(250.0, 100.0);
        let offset = compute_location_user_offset(container, point, 2.0);
        assert_eq!(
            container_point_to_touch_point(2.0, offset, point),
            Point::new(500.0, 400.0)
        );
    }

    #[test]
    fn scroll_edges() {
        let bounds = Rect::new(-1000.0, -500.0, 0.0, -500.0);
        assert_eq!(
            compute_scroll_edge(bounds, Vec2::new(0.0, -500.0)),
            ScrollEdge::new(Edge::Start, Edge::Both)
        );
        assert_eq!(
            compute_scroll_edge(bounds, Vec2::new(-1000.2, -500.0)),
            ScrollEdge::new(Edge::End, Edge::Both)
        );
        assert_eq!(
            compute_scroll_edge(bounds, Vec2::new(-400.0, -500.0)),
            ScrollEdge::new(Edge::None, Edge::Both)
        );
    }

    #[test]
    fn can_scroll_respects_edges() {
        let edge = ScrollEdge::new(Edge::Start, Edge::Both);
        assert!(can_scroll_by_edge(edge, true, 1));
        assert!(!can_scroll_by_edge(edge, true, -1));
        assert!(can_scroll_by_edge(edge, true, 0));
        assert!(!can_scroll_by_edge(ScrollEdge::new(Edge::End, Edge::None), true, 0));
        assert!(can_scroll_by_edge(ScrollEdge::new(Edge::End, Edge::None), true, -1));
        assert!(!can_scroll_by_edge(edge, false, 1));
        assert!(!can_scroll_by_edge(edge, false, -1));
        assert!(!can_scroll_by_edge(edge, false, 0));
    }

    #[test]
    fn rubber_band_passes_through_inside_bounds() {
        assert_eq!(limit_scale_with_rubber_band(1.0, 1.5, 1.0, 4.0), 1.5);
    }

    #[test]
    fn rubber_band_damps_overshoot() {
        let limited = limit_scale_with_rubber_band(4.0, 5.0, 1.0, 4.0);
        assert!(limited > 4.0 && limited < 5.0, "{limited}");
        // Progress 0.25 of the band: 1.0 * 0.75 * 0.5.
        assert!((limited - 4.375).abs() < 1e-12);

        let limited = limit_scale_with_rubber_band(1.0, 0.8, 1.0, 4.0);
        assert!(limited < 1.0 && limited > 0.8, "{limited}");
    }

    #[test]
    fn rubber_band_never_collapses_or_explodes() {
        assert!(limit_scale_with_rubber_band(1.0, 0.0, 1.0, 4.0) >= 0.5);
        assert!(limit_scale_with_rubber_band(1.0, -3.0, 1.0, 4.0) >= 0.5);
        assert!(limit_scale_with_rubber_band(4.0, f64::INFINITY, 1.0, 4.0) <= 8.0);
        assert!(limit_scale_with_rubber_band(4.0, 1e300, 1.0, 4.0) <= 8.0);
        assert_eq!(limit_scale_with_rubber_band(2.0, 2.0, 2.0, 2.0), 2.0);
    }

    #[test]
    fn rubber_band_holds_collapsed_bounds() {
        assert_eq!(limit_scale_with_rubber_band(2.0, 3.0, 2.0, 2.0), 2.0);
        assert_eq!(limit_scale_with_rubber_band(2.0, 1.0, 2.0, 2.0), 2.0);
        assert_eq!(limit_scale_with_rubber_band(2.5, 9.0, 2.0, 2.0), 2.0);
        assert_eq!(limit_scale_with_rubber_band(2.0, f64::NAN, 2.0, 2.0), 2.0);
    }

    #[test]
    fn next_step_scale_cycles_and_wraps() {
        let steps = [1.0, 2.0, 4.0];
        assert_eq!(calculate_next_step_scale(&steps, 1.0), 2.0);
        assert_eq!(calculate_next_step_scale(&steps, 1.5), 2.0);
        assert_eq!(calculate_next_step_scale(&steps, 2.0), 4.0);
        assert_eq!(calculate_next_step_scale(&steps, 4.0), 1.0);
        assert_eq!(calculate_next_step_scale(&steps, 9.0), 1.0);
        // Residue below the rounding threshold does not skip a step.
        assert_eq!(calculate_next_step_scale(&steps, 1.999_9), 4.0);
        assert_eq!(calculate_next_step_scale(&[], 3.0), 3.0);
    }
}
