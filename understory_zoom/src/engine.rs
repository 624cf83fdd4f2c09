// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The stateful zoom engine.

use kurbo::{Affine, Point, Rect, Size, Vec2};
use tracing::debug;

use crate::animation::{AnimationSpec, FlingAnimator, FloatAnimator};
use crate::config::ZoomConfig;
use crate::error::RotationError;
use crate::geometry::{ScaleFactor, ScrollEdge, Transform, lerp, round_hundredths, size_center};
use crate::listeners::{ListenerId, Listeners};
use crate::math::{
    ContentLayout, calculate_next_step_scale, can_scroll_by_edge, compute_container_visible_rect,
    compute_initial_zoom, compute_location_user_offset, compute_scroll_edge,
    compute_transform_offset, container_point_to_touch_point, limit_scale_with_rubber_band,
    touch_point_to_container_point,
};
use crate::modes::{Alignment, ContentScale};
use crate::read_mode::ReadMode;

const LOG_TARGET: &str = "understory_zoom";

#[derive(Clone, Copy, Debug)]
enum ScaleMotion {
    /// Interpolate the user transform.
    Transform { from: Transform, to: Transform },
    /// Step the effective scale back into bounds around a gesture centroid.
    Rollback {
        centroid: Point,
        from_scale: f64,
        to_scale: f64,
    },
}

#[derive(Clone, Debug)]
struct ScaleAnimation {
    animator: FloatAnimator,
    motion: ScaleMotion,
    scale_change: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ScaleLimit {
    Clamp,
    RubberBand,
    Unbounded,
}

/// Headless zoom, pan and quarter-turn rotation of content in a container.
///
/// The engine owns a *base* transform that fits the content into the
/// container (per [`ContentScale`], [`Alignment`] and rotation) and a *user*
/// transform layered on top by interaction. Their composition,
/// [`transform`](Self::transform), maps content into the container as the
/// user sees it; [`display_affine`](Self::display_affine) gives it as a
/// [`kurbo::Affine`] ready for painting.
///
/// Any change of container size, content size, layout configuration or
/// rotation calls [`reset`](Self::reset), which recomputes the scale bounds
/// and returns to the initial user transform. Operations that depend on
/// layout are no-ops while the container or the content is empty.
///
/// Animated operations only record their target. The host drives them by
/// calling [`on_frame`](Self::on_frame) once per display refresh while
/// [`is_animating`](Self::is_animating) returns `true`.
///
/// The engine is neither `Send` nor `Sync`: it belongs to the thread that
/// owns the view. Listener callbacks run synchronously on that thread.
#[derive(Debug)]
pub struct ZoomEngine {
    config: ZoomConfig,
    container_size: Size,
    content_size: Size,
    content_origin_size: Size,
    rotation: u32,

    min_scale: f64,
    medium_scale: f64,
    max_scale: f64,
    base_transform: Transform,
    user_transform: Transform,
    transform: Transform,

    container_visible_rect: Rect,
    content_base_display_rect: Rect,
    content_base_visible_rect: Rect,
    content_display_rect: Rect,
    content_visible_rect: Rect,
    scroll_edge: ScrollEdge,

    scaling: bool,
    flinging: bool,
    last_transform_centroid: Option<Point>,
    scale_animation: Option<ScaleAnimation>,
    fling_animation: Option<FlingAnimator>,
    listeners: Listeners,
}

impl Default for ZoomEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ZoomEngine {
    /// Creates an engine with the default configuration and empty sizes.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ZoomConfig::default())
    }

    /// Creates an engine with the given configuration and empty sizes.
    #[must_use]
    pub fn with_config(config: ZoomConfig) -> Self {
        let mut engine = Self {
            config,
            container_size: Size::ZERO,
            content_size: Size::ZERO,
            content_origin_size: Size::ZERO,
            rotation: 0,
            min_scale: 1.0,
            medium_scale: 1.0,
            max_scale: 1.0,
            base_transform: Transform::IDENTITY,
            user_transform: Transform::IDENTITY,
            transform: Transform::IDENTITY,
            container_visible_rect: Rect::ZERO,
            content_base_display_rect: Rect::ZERO,
            content_base_visible_rect: Rect::ZERO,
            content_display_rect: Rect::ZERO,
            content_visible_rect: Rect::ZERO,
            scroll_edge: ScrollEdge::default(),
            scaling: false,
            flinging: false,
            last_transform_centroid: None,
            scale_animation: None,
            fling_animation: None,
            listeners: Listeners::default(),
        };
        engine.reset();
        engine
    }

    // --- Inputs ---

    /// Current configuration.
    #[must_use]
    pub fn config(&self) -> &ZoomConfig {
        &self.config
    }

    /// Replaces the configuration, resetting if a layout field changed.
    pub fn set_config(&mut self, config: ZoomConfig) {
        let layout_changed = self.config.layout_differs(&config);
        self.config = config;
        if layout_changed {
            self.reset();
        }
    }

    /// Size of the container, in pixels.
    #[must_use]
    pub fn container_size(&self) -> Size {
        self.container_size
    }

    /// Sets the container size, resets, then notifies container size listeners.
    pub fn set_container_size(&mut self, size: Size) {
        if self.container_size != size {
            self.container_size = size;
            self.reset();
            self.notify_container_size_changed();
        }
    }

    /// Logical size of the content, in pixels.
    #[must_use]
    pub fn content_size(&self) -> Size {
        self.content_size
    }

    /// Sets the content size, resets, then notifies content size listeners.
    pub fn set_content_size(&mut self, size: Size) {
        if self.content_size != size {
            self.content_size = size;
            self.reset();
            self.notify_content_size_changed();
        }
    }

    /// Full-resolution size of the content, or [`Size::ZERO`] if unknown.
    #[must_use]
    pub fn content_origin_size(&self) -> Size {
        self.content_origin_size
    }

    /// Sets the full-resolution size of the content.
    ///
    /// When the content is a downsampled preview, this lets the maximum scale
    /// reach the original pixels.
    pub fn set_content_origin_size(&mut self, size: Size) {
        if self.content_origin_size != size {
            self.content_origin_size = size;
            self.reset();
        }
    }

    /// How content is fitted into the container.
    #[must_use]
    pub fn content_scale(&self) -> ContentScale {
        self.config.content_scale
    }

    /// Sets how content is fitted into the container.
    pub fn set_content_scale(&mut self, content_scale: ContentScale) {
        if self.config.content_scale != content_scale {
            self.config.content_scale = content_scale;
            self.reset();
        }
    }

    /// Where fitted content sits in the container.
    #[must_use]
    pub fn alignment(&self) -> Alignment {
        self.config.alignment
    }

    /// Sets where fitted content sits in the container.
    pub fn set_alignment(&mut self, alignment: Alignment) {
        if self.config.alignment != alignment {
            self.config.alignment = alignment;
            self.reset();
        }
    }

    /// Read mode policy, if any.
    #[must_use]
    pub fn read_mode(&self) -> Option<&ReadMode> {
        self.config.read_mode.as_ref()
    }

    /// Sets the read mode policy.
    pub fn set_read_mode(&mut self, read_mode: Option<ReadMode>) {
        if self.config.read_mode != read_mode {
            self.config.read_mode = read_mode;
            self.reset();
        }
    }

    /// Minimum multiple of the minimum scale that the medium scale reaches.
    #[must_use]
    pub fn medium_scale_min_multiple(&self) -> f64 {
        self.config.medium_scale_min_multiple
    }

    /// Sets the minimum multiple of the minimum scale that the medium scale reaches.
    pub fn set_medium_scale_min_multiple(&mut self, multiple: f64) {
        if self.config.medium_scale_min_multiple != multiple {
            self.config.medium_scale_min_multiple = multiple;
            self.reset();
        }
    }

    /// Duration and easing of animated operations.
    #[must_use]
    pub fn animation_spec(&self) -> AnimationSpec {
        self.config.animation_spec
    }

    /// Sets the duration and easing of animated operations started from now on.
    pub fn set_animation_spec(&mut self, animation_spec: AnimationSpec) {
        self.config.animation_spec = animation_spec;
    }

    /// Whether [`switch_scale`](Self::switch_scale) cycles through three steps.
    #[must_use]
    pub fn three_step_scale(&self) -> bool {
        self.config.three_step_scale
    }

    /// Sets whether [`switch_scale`](Self::switch_scale) cycles through three steps.
    pub fn set_three_step_scale(&mut self, three_step_scale: bool) {
        self.config.three_step_scale = three_step_scale;
    }

    /// Whether gestures may stretch past the scale bounds.
    #[must_use]
    pub fn rubber_band_scale(&self) -> bool {
        self.config.rubber_band_scale
    }

    /// Sets whether gestures may stretch past the scale bounds.
    pub fn set_rubber_band_scale(&mut self, rubber_band_scale: bool) {
        self.config.rubber_band_scale = rubber_band_scale;
    }

    /// Rotation of the content in degrees, in `0..360`.
    #[must_use]
    pub fn rotation(&self) -> u32 {
        self.rotation
    }

    // --- Derived state ---

    /// The current layout inputs.
    #[must_use]
    pub fn layout(&self) -> ContentLayout {
        ContentLayout::new(
            self.container_size,
            self.content_size,
            self.config.content_scale,
            self.config.alignment,
            self.rotation,
        )
    }

    /// Transform fitting unscaled content into the container.
    #[must_use]
    pub fn base_transform(&self) -> Transform {
        self.base_transform
    }

    /// Transform applied by interaction on top of the base transform.
    #[must_use]
    pub fn user_transform(&self) -> Transform {
        self.user_transform
    }

    /// Effective transform: base, then user.
    #[must_use]
    pub fn transform(&self) -> Transform {
        self.transform
    }

    /// The effective transform as an affine map from content to container
    /// coordinates, rotation included.
    #[must_use]
    pub fn display_affine(&self) -> Affine {
        self.transform.to_affine(self.content_size)
    }

    /// Smallest effective scale.
    #[must_use]
    pub fn min_scale(&self) -> f64 {
        self.min_scale
    }

    /// Intermediate step scale.
    #[must_use]
    pub fn medium_scale(&self) -> f64 {
        self.medium_scale
    }

    /// Largest effective scale.
    #[must_use]
    pub fn max_scale(&self) -> f64 {
        self.max_scale
    }

    /// Visible part of the container, in container space. Rounded.
    #[must_use]
    pub fn container_visible_rect(&self) -> Rect {
        self.container_visible_rect
    }

    /// Content bounds in container space at the base transform. Rounded.
    #[must_use]
    pub fn content_base_display_rect(&self) -> Rect {
        self.content_base_display_rect
    }

    /// Content visible at the base transform, in content space. Rounded.
    #[must_use]
    pub fn content_base_visible_rect(&self) -> Rect {
        self.content_base_visible_rect
    }

    /// Content bounds as the user sees them. Rounded.
    #[must_use]
    pub fn content_display_rect(&self) -> Rect {
        self.content_display_rect
    }

    /// Content currently visible, in content space. Rounded.
    #[must_use]
    pub fn content_visible_rect(&self) -> Rect {
        self.content_visible_rect
    }

    /// Legal user offsets at the current user scale.
    #[must_use]
    pub fn user_offset_bounds(&self) -> Rect {
        self.layout().user_offset_bounds(self.user_transform.scale_x())
    }

    /// Scroll position of the content relative to its offset bounds.
    #[must_use]
    pub fn scroll_edge(&self) -> ScrollEdge {
        self.scroll_edge
    }

    /// `true` while an animation changes the scale.
    #[must_use]
    pub fn is_scaling(&self) -> bool {
        self.scaling
    }

    /// `true` while a fling runs.
    #[must_use]
    pub fn is_flinging(&self) -> bool {
        self.flinging
    }

    /// `true` while any animation needs frames.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.scale_animation.is_some() || self.fling_animation.is_some()
    }

    /// Centroid of the last gesture, used by [`rollback_scale`](Self::rollback_scale).
    #[must_use]
    pub fn last_transform_centroid(&self) -> Option<Point> {
        self.last_transform_centroid
    }

    // --- Lifecycle ---

    /// Stops animations, recomputes the base transform and scale bounds, and
    /// returns to the initial user transform.
    ///
    /// Resetting twice with unchanged inputs yields identical state.
    pub fn reset(&mut self) {
        self.stop_animations("reset");
        let layout = self.layout();
        let zoom = compute_initial_zoom(
            &layout,
            self.content_origin_size,
            self.config.read_mode.as_ref(),
            self.config.medium_scale_min_multiple,
        );
        debug!(
            target: LOG_TARGET,
            container_size = ?self.container_size,
            content_size = ?self.content_size,
            content_origin_size = ?self.content_origin_size,
            content_scale = ?self.config.content_scale,
            alignment = ?self.config.alignment,
            rotation = self.rotation,
            min_scale = zoom.min_scale,
            medium_scale = zoom.medium_scale,
            max_scale = zoom.max_scale,
            base_transform = ?zoom.base_transform,
            user_transform = ?zoom.user_transform,
            "reset"
        );
        self.min_scale = zoom.min_scale;
        self.medium_scale = zoom.medium_scale;
        self.max_scale = zoom.max_scale;
        self.base_transform = zoom.base_transform;
        self.update_user_transform(zoom.user_transform, false, "reset");
    }

    /// Stops running animations, leaving the transform where they left it.
    pub fn stop_all_animation(&mut self) {
        self.stop_animations("stop_all_animation");
    }

    /// Stops running animations and releases them. The transform is kept.
    pub fn clean(&mut self) {
        self.stop_animations("clean");
    }

    /// Advances running animations to `frame_time_millis`.
    ///
    /// Returns `true` if another frame is needed.
    pub fn on_frame(&mut self, frame_time_millis: u64) -> bool {
        self.step_scale_animation(frame_time_millis);
        self.step_fling_animation(frame_time_millis);
        self.is_animating()
    }

    // --- Interaction ---

    /// Zooms to the effective scale `target_scale`, clamped to the scale bounds.
    ///
    /// The content under the container position of `content_point` stays
    /// in place; without a point the container center is kept.
    pub fn scale(&mut self, target_scale: f64, content_point: Option<Point>, animated: bool) {
        let layout = self.layout();
        if layout.is_empty() {
            return;
        }
        self.stop_animations("scale");

        let target_user_scale = target_scale / self.base_transform.scale_x();
        let limited_user_scale = self.limit_user_scale(target_user_scale);
        let current = self.user_transform;
        let container_point = match content_point {
            Some(point) => layout.content_point_to_container_point(point),
            None => size_center(self.container_size),
        };
        let target_user_offset = compute_transform_offset(
            current.scale_x(),
            current.offset,
            limited_user_scale,
            container_point,
            Vec2::ZERO,
            0.0,
        );
        let limited_user_offset = self.limit_user_offset(target_user_offset, limited_user_scale);
        let target = current
            .with_scale(ScaleFactor::uniform(limited_user_scale))
            .with_offset(limited_user_offset);
        debug!(
            target: LOG_TARGET,
            target_scale,
            content_point = ?content_point,
            animated,
            container_point = ?container_point,
            target_user_scale,
            limited_user_scale,
            user_offset = ?limited_user_offset,
            "scale"
        );
        self.update_user_transform(target, animated, "scale");
    }

    /// Pans so the effective offset becomes `target_offset`, clamped to the
    /// offset bounds at the current scale.
    pub fn offset(&mut self, target_offset: Vec2, animated: bool) {
        if self.layout().is_empty() {
            return;
        }
        self.stop_animations("offset");

        let current = self.user_transform;
        let target_user_offset =
            target_offset - current.scale.scale_vec2(self.base_transform.offset);
        let limited_user_offset = self.limit_user_offset(target_user_offset, current.scale_x());
        debug!(
            target: LOG_TARGET,
            target_offset = ?target_offset,
            animated,
            target_user_offset = ?target_user_offset,
            limited_user_offset = ?limited_user_offset,
            "offset"
        );
        self.update_user_transform(current.with_offset(limited_user_offset), animated, "offset");
    }

    /// Centers `content_point` in the container at effective scale
    /// `target_scale` (the current scale if `None`), within bounds.
    pub fn location(&mut self, content_point: Point, target_scale: Option<f64>, animated: bool) {
        let layout = self.layout();
        if layout.is_empty() {
            return;
        }
        self.stop_animations("location");

        let target_scale = target_scale.unwrap_or(self.transform.scale_x());
        let container_point = layout.content_point_to_container_point(content_point);
        let target_user_scale = target_scale / self.base_transform.scale_x();
        let limited_user_scale = self.limit_user_scale(target_user_scale);
        let target_user_offset =
            compute_location_user_offset(self.container_size, container_point, limited_user_scale);
        let limited_user_offset = self.limit_user_offset(target_user_offset, limited_user_scale);
        let target = self
            .user_transform
            .with_scale(ScaleFactor::uniform(limited_user_scale))
            .with_offset(limited_user_offset);
        debug!(
            target: LOG_TARGET,
            content_point = ?content_point,
            target_scale,
            animated,
            container_point = ?container_point,
            limited_user_scale,
            user_offset = ?limited_user_offset,
            "location"
        );
        self.update_user_transform(target, animated, "location");
    }

    /// Rotates the content to `degrees` and resets.
    ///
    /// # Panics
    ///
    /// Panics if `degrees` is negative or not a multiple of 90. See
    /// [`try_rotate`](Self::try_rotate) for a non-panicking variant.
    #[track_caller]
    pub fn rotate(&mut self, degrees: i32) {
        if let Err(err) = self.try_rotate(degrees) {
            panic!("{err}");
        }
    }

    /// Rotates the content to `degrees` (normalized into `0..360`) and
    /// resets. Does nothing if the rotation is unchanged.
    pub fn try_rotate(&mut self, degrees: i32) -> Result<(), RotationError> {
        let rotation = RotationError::check(degrees)?;
        if rotation == self.rotation {
            return Ok(());
        }
        self.stop_animations("rotate");
        debug!(target: LOG_TARGET, from = self.rotation, to = rotation, "rotate");
        self.rotation = rotation;
        self.reset();
        Ok(())
    }

    /// Rotates the content by `degrees` relative to its current rotation.
    ///
    /// # Panics
    ///
    /// Panics if `degrees` is negative or not a multiple of 90.
    #[track_caller]
    pub fn rotate_by(&mut self, degrees: i32) {
        let delta = match RotationError::check(degrees) {
            Ok(delta) => delta,
            Err(err) => panic!("{err}"),
        };
        let target = (self.rotation + delta) % 360;
        // Both values are below 360.
        self.rotate(i32::try_from(target).unwrap_or_default());
    }

    /// Applies one step of a live pinch/pan gesture. Never animated.
    ///
    /// The scale is multiplied by `zoom_change` around `centroid` (touch
    /// space), then `pan_change` is added. With
    /// [`rubber_band_scale`](Self::rubber_band_scale) the scale may stretch
    /// past its bounds with resistance; call
    /// [`rollback_scale`](Self::rollback_scale) when the gesture ends.
    /// `rotation_change` is logged but not applied: rotation only changes in
    /// quarter turns through [`rotate`](Self::rotate).
    pub fn gesture_transform(
        &mut self,
        centroid: Point,
        pan_change: Vec2,
        zoom_change: f64,
        rotation_change: f64,
    ) {
        if self.layout().is_empty() {
            return;
        }
        self.stop_animations("gesture_transform");
        let limit = if self.config.rubber_band_scale {
            ScaleLimit::RubberBand
        } else {
            ScaleLimit::Clamp
        };
        debug!(
            target: LOG_TARGET,
            centroid = ?centroid,
            pan_change = ?pan_change,
            zoom_change,
            rotation_change,
            "gesture_transform"
        );
        self.apply_gesture(centroid, pan_change, zoom_change, limit);
    }

    /// Starts a decelerating pan with the given velocity, in pixels per second.
    pub fn fling(&mut self, velocity_x: f64, velocity_y: f64) {
        if self.layout().is_empty() {
            return;
        }
        self.stop_animations("fling");
        let start = self.user_transform.offset;
        let bounds = self
            .layout()
            .user_offset_bounds(self.user_transform.scale_x())
            .round();
        debug!(
            target: LOG_TARGET,
            start = ?start,
            bounds = ?bounds,
            velocity_x,
            velocity_y,
            "fling start"
        );
        let mut animator = FlingAnimator::new(start, Vec2::new(velocity_x, velocity_y), bounds);
        animator.start();
        self.fling_animation = Some(animator);
        self.set_flinging(true);
    }

    /// Animates the scale back into bounds after a rubber-band gesture.
    ///
    /// Pivots on the last gesture centroid. Returns `false` without doing
    /// anything if no gesture happened yet or if the scale is within bounds
    /// when compared at two decimal places.
    pub fn rollback_scale(&mut self) -> bool {
        let Some(centroid) = self.last_transform_centroid else {
            return false;
        };
        let current_scale = self.transform.scale_x();
        let rounded = round_hundredths(current_scale);
        let target_scale = if rounded > round_hundredths(self.max_scale) {
            self.max_scale
        } else if rounded < round_hundredths(self.min_scale) {
            self.min_scale
        } else {
            return false;
        };
        self.stop_animations("rollback_scale");
        debug!(
            target: LOG_TARGET,
            centroid = ?centroid,
            from_scale = current_scale,
            to_scale = target_scale,
            "rollback_scale"
        );
        let mut animator = FloatAnimator::new(0.0, 1.0, self.config.animation_spec);
        animator.start();
        self.scale_animation = Some(ScaleAnimation {
            animator,
            motion: ScaleMotion::Rollback {
                centroid,
                from_scale: current_scale,
                to_scale: target_scale,
            },
            scale_change: true,
        });
        self.set_scaling(true);
        true
    }

    /// Zooms to the next step scale around `content_point` and returns it.
    ///
    /// Without a point, the center of the visible content is used, or the
    /// content center if nothing is visible. Returns the current scale
    /// without doing anything if the content is empty.
    pub fn switch_scale(&mut self, content_point: Option<Point>, animated: bool) -> f64 {
        let point = content_point
            .or_else(|| {
                (!self.content_visible_rect.is_zero_area())
                    .then(|| self.content_visible_rect.center())
            })
            .or_else(|| (!self.layout().is_empty()).then(|| size_center(self.content_size)));
        let Some(point) = point else {
            return self.transform.scale_x();
        };
        let next_scale = self.next_step_scale();
        self.location(point, Some(next_scale), animated);
        next_scale
    }

    /// The step scale [`switch_scale`](Self::switch_scale) would zoom to.
    #[must_use]
    pub fn next_step_scale(&self) -> f64 {
        let current = self.transform.scale_x();
        if self.config.three_step_scale {
            calculate_next_step_scale(&[self.min_scale, self.medium_scale, self.max_scale], current)
        } else {
            calculate_next_step_scale(&[self.min_scale, self.medium_scale], current)
        }
    }

    /// Returns whether content can scroll on an axis in a direction.
    ///
    /// A negative `direction` asks about scrolling toward the start; zero or
    /// positive asks about scrolling toward the end.
    #[must_use]
    pub fn can_scroll(&self, horizontal: bool, direction: i32) -> bool {
        can_scroll_by_edge(self.scroll_edge, horizontal, direction)
    }

    // --- Coordinate conversion ---

    /// Maps a touch position to the content point under it, clamped to the
    /// content bounds.
    ///
    /// Returns [`Point::ZERO`] while the container or content is empty.
    #[must_use]
    pub fn touch_point_to_content_point(&self, touch_point: Point) -> Point {
        let layout = self.layout();
        if layout.is_empty() {
            return Point::ZERO;
        }
        let container_point = touch_point_to_container_point(
            self.user_transform.scale_x(),
            self.user_transform.offset,
            touch_point,
        );
        let content_point = layout.container_point_to_content_point(container_point);
        Point::new(
            content_point.x.clamp(0.0, self.content_size.width),
            content_point.y.clamp(0.0, self.content_size.height),
        )
    }

    /// Maps a content point to its current touch position.
    ///
    /// Returns [`Point::ZERO`] while the container or content is empty.
    #[must_use]
    pub fn content_point_to_touch_point(&self, content_point: Point) -> Point {
        let layout = self.layout();
        if layout.is_empty() {
            return Point::ZERO;
        }
        container_point_to_touch_point(
            self.user_transform.scale_x(),
            self.user_transform.offset,
            layout.content_point_to_container_point(content_point),
        )
    }

    // --- Listeners ---

    /// A handle to the engine's listener sets, for use inside callbacks.
    #[must_use]
    pub fn listeners(&self) -> Listeners {
        self.listeners.clone()
    }

    /// Registers a callback run whenever the transform or an animation flag changes.
    pub fn add_on_matrix_change_listener(
        &self,
        listener: impl Fn(&Self) + 'static,
    ) -> ListenerId {
        self.listeners.matrix_change().add(listener)
    }

    /// Removes a matrix change listener. Returns `false` if it was not registered.
    pub fn remove_on_matrix_change_listener(&self, id: ListenerId) -> bool {
        self.listeners.matrix_change().remove(id)
    }

    /// Registers a callback run after the container size changed.
    pub fn add_on_container_size_change_listener(
        &self,
        listener: impl Fn(&Self) + 'static,
    ) -> ListenerId {
        self.listeners.container_size_change().add(listener)
    }

    /// Removes a container size listener. Returns `false` if it was not registered.
    pub fn remove_on_container_size_change_listener(&self, id: ListenerId) -> bool {
        self.listeners.container_size_change().remove(id)
    }

    /// Registers a callback run after the content size changed.
    pub fn add_on_content_size_change_listener(
        &self,
        listener: impl Fn(&Self) + 'static,
    ) -> ListenerId {
        self.listeners.content_size_change().add(listener)
    }

    /// Removes a content size listener. Returns `false` if it was not registered.
    pub fn remove_on_content_size_change_listener(&self, id: ListenerId) -> bool {
        self.listeners.content_size_change().remove(id)
    }

    // --- Internals ---

    fn limit_user_scale(&self, target_user_scale: f64) -> f64 {
        let base_scale = self.base_transform.scale_x();
        clamp_between(
            target_user_scale,
            self.min_scale / base_scale,
            self.max_scale / base_scale,
        )
    }

    fn limit_user_scale_with_rubber_band(&self, target_user_scale: f64) -> f64 {
        let base_scale = self.base_transform.scale_x();
        limit_scale_with_rubber_band(
            self.user_transform.scale_x(),
            target_user_scale,
            self.min_scale / base_scale,
            self.max_scale / base_scale,
        )
    }

    fn limit_user_offset(&self, user_offset: Vec2, user_scale: f64) -> Vec2 {
        let bounds = self.layout().user_offset_bounds(user_scale).round();
        Vec2::new(
            clamp_between(user_offset.x, bounds.x0, bounds.x1),
            clamp_between(user_offset.y, bounds.y0, bounds.y1),
        )
    }

    fn apply_gesture(
        &mut self,
        centroid: Point,
        pan_change: Vec2,
        zoom_change: f64,
        limit: ScaleLimit,
    ) {
        self.last_transform_centroid = Some(centroid);
        let target_scale = self.transform.scale_x() * zoom_change;
        let target_user_scale = target_scale / self.base_transform.scale_x();
        let limited_user_scale = match limit {
            ScaleLimit::Clamp => self.limit_user_scale(target_user_scale),
            ScaleLimit::RubberBand => self.limit_user_scale_with_rubber_band(target_user_scale),
            ScaleLimit::Unbounded => target_user_scale,
        };
        let current = self.user_transform;
        let target_user_offset = compute_transform_offset(
            current.scale_x(),
            current.offset,
            limited_user_scale,
            centroid,
            pan_change,
            0.0,
        );
        let limited_user_offset = self.limit_user_offset(target_user_offset, limited_user_scale);
        let target = current
            .with_scale(ScaleFactor::uniform(limited_user_scale))
            .with_offset(limited_user_offset);
        self.update_user_transform(target, false, "gesture");
    }

    fn update_user_transform(&mut self, target: Transform, animated: bool, caller: &'static str) {
        if animated {
            let from = self.user_transform;
            let scale_change = from.scale != target.scale;
            let mut animator = FloatAnimator::new(0.0, 1.0, self.config.animation_spec);
            animator.start();
            debug!(target: LOG_TARGET, caller, from = ?from, to = ?target, "animation start");
            self.scale_animation = Some(ScaleAnimation {
                animator,
                motion: ScaleMotion::Transform { from, to: target },
                scale_change,
            });
            if scale_change {
                self.set_scaling(true);
            }
        } else {
            self.user_transform = target;
            self.update_transform();
        }
    }

    fn update_transform(&mut self) {
        let layout = self.layout();
        let user_scale = self.user_transform.scale_x();
        let user_offset = self.user_transform.offset;
        self.transform = self.base_transform + self.user_transform;
        self.container_visible_rect =
            compute_container_visible_rect(self.container_size, user_scale, user_offset).round();
        self.content_base_display_rect = layout.base_display_rect().round();
        self.content_base_visible_rect = layout.base_visible_rect().round();
        self.content_display_rect = layout.display_rect(user_scale, user_offset).round();
        self.content_visible_rect = layout.visible_rect(user_scale, user_offset).round();
        self.scroll_edge = compute_scroll_edge(layout.user_offset_bounds(user_scale), user_offset);
        self.notify_matrix_changed();
    }

    fn step_scale_animation(&mut self, now_millis: u64) {
        let Some(animation) = self.scale_animation.as_mut() else {
            return;
        };
        let Some(fraction) = animation.animator.tick(now_millis) else {
            return;
        };
        let finished = !animation.animator.is_running();
        let motion = animation.motion;
        let scale_change = animation.scale_change;
        match motion {
            ScaleMotion::Transform { from, to } => {
                self.user_transform = if finished { to } else { from.lerp(to, fraction) };
                self.update_transform();
            }
            ScaleMotion::Rollback {
                centroid,
                from_scale,
                to_scale,
            } => {
                let frame_scale = lerp(from_scale, to_scale, fraction);
                let zoom_change = frame_scale / self.transform.scale_x();
                self.apply_gesture(centroid, Vec2::ZERO, zoom_change, ScaleLimit::Unbounded);
            }
        }
        if finished {
            self.scale_animation = None;
            debug!(target: LOG_TARGET, transform = ?self.transform, "animation end");
            if scale_change {
                self.set_scaling(false);
            }
            self.notify_matrix_changed();
        }
    }

    fn step_fling_animation(&mut self, now_millis: u64) {
        let Some(fling) = self.fling_animation.as_mut() else {
            return;
        };
        let Some(offset) = fling.tick(now_millis) else {
            return;
        };
        let finished = !fling.is_running();
        self.user_transform = self.user_transform.with_offset(offset);
        self.update_transform();
        if finished {
            self.fling_animation = None;
            debug!(target: LOG_TARGET, offset = ?offset, "fling end");
            self.set_flinging(false);
            self.notify_matrix_changed();
        }
    }

    fn stop_animations(&mut self, caller: &'static str) {
        if let Some(mut animation) = self.scale_animation.take() {
            animation.animator.stop();
            debug!(target: LOG_TARGET, caller, "stop scale animation");
            self.set_scaling(false);
        }
        if let Some(mut fling) = self.fling_animation.take() {
            fling.stop();
            debug!(target: LOG_TARGET, caller, "stop fling animation");
            self.set_flinging(false);
        }
    }

    fn set_scaling(&mut self, scaling: bool) {
        if self.scaling != scaling {
            self.scaling = scaling;
            self.notify_matrix_changed();
        }
    }

    fn set_flinging(&mut self, flinging: bool) {
        if self.flinging != flinging {
            self.flinging = flinging;
            self.notify_matrix_changed();
        }
    }

    fn notify_matrix_changed(&self) {
        self.listeners.matrix_change().dispatch(self);
    }

    fn notify_container_size_changed(&self) {
        self.listeners.container_size_change().dispatch(self);
    }

    fn notify_content_size_changed(&self) {
        self.listeners.content_size_change().dispatch(self);
    }
}

/// Clamps `value` into the range spanned by `a` and `b`, in either order.
///
/// NaN clamps to the lower end.
fn clamp_between(value: f64, a: f64, b: f64) -> f64 {
    let (low, high) = if a <= b { (a, b) } else { (b, a) };
    value.max(low).min(high)
}
