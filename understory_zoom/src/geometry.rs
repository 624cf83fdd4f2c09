// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Value types shared by the zoom math and the engine.
//!
//! Positions, displacements, sizes and rectangles are plain Kurbo types. This
//! module adds the pieces Kurbo does not model directly: a per-axis
//! [`ScaleFactor`], the scale/offset/rotation [`Transform`] the engine
//! composes, scroll edge classification, and quarter-turn rotation helpers
//! that rotate geometry *within* a bounded space (so the rotated result stays
//! in positive coordinates).

use core::ops::{Add, Div, Mul, Sub};

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Affine, Point, Rect, Size, Vec2};

/// Independent scale factors along the X and Y axes.
///
/// The engine itself only produces uniform factors, but content scale modes
/// such as [`ContentScale::Fill`](crate::ContentScale::Fill) stretch the axes
/// independently.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleFactor {
    /// Horizontal scale.
    pub scale_x: f64,
    /// Vertical scale.
    pub scale_y: f64,
}

impl ScaleFactor {
    /// The identity scale.
    pub const ONE: Self = Self::uniform(1.0);

    /// Creates a scale factor with independent axes.
    #[must_use]
    pub const fn new(scale_x: f64, scale_y: f64) -> Self {
        Self { scale_x, scale_y }
    }

    /// Creates a scale factor with the same value on both axes.
    #[must_use]
    pub const fn uniform(scale: f64) -> Self {
        Self::new(scale, scale)
    }

    /// Linearly interpolates between `self` and `other`.
    #[must_use]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        Self::new(
            lerp(self.scale_x, other.scale_x, t),
            lerp(self.scale_y, other.scale_y, t),
        )
    }

    /// Scales a size.
    #[must_use]
    pub fn scale_size(self, size: Size) -> Size {
        Size::new(size.width * self.scale_x, size.height * self.scale_y)
    }

    /// Scales a displacement.
    #[must_use]
    pub fn scale_vec2(self, v: Vec2) -> Vec2 {
        Vec2::new(v.x * self.scale_x, v.y * self.scale_y)
    }

    /// Divides a displacement by this scale.
    #[must_use]
    pub fn unscale_vec2(self, v: Vec2) -> Vec2 {
        Vec2::new(v.x / self.scale_x, v.y / self.scale_y)
    }
}

impl Default for ScaleFactor {
    fn default() -> Self {
        Self::ONE
    }
}

impl Mul for ScaleFactor {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::new(self.scale_x * rhs.scale_x, self.scale_y * rhs.scale_y)
    }
}

impl Div for ScaleFactor {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        Self::new(self.scale_x / rhs.scale_x, self.scale_y / rhs.scale_y)
    }
}

/// A scale, offset and rotation applied to content.
///
/// The rotation is expressed in degrees and is applied to the content
/// *within its own bounds* (see [`rotate_point_in_space`]) before the scale
/// and offset. In the engine, `rotation` is always a multiple of 90.
///
/// Transforms compose with `+`: `a + b` applies `a` first, then `b`. This is
/// how the engine derives its effective transform from the base (fit)
/// transform and the user transform. `a - b` is the transform that has to
/// follow `b` to reach `a`, so `b + (a - b) == a`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    /// Scale applied after rotation.
    pub scale: ScaleFactor,
    /// Translation applied after scaling, in container pixels.
    pub offset: Vec2,
    /// Rotation in degrees.
    pub rotation: f64,
}

impl Transform {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        scale: ScaleFactor::ONE,
        offset: Vec2::ZERO,
        rotation: 0.0,
    };

    /// Creates a transform.
    #[must_use]
    pub const fn new(scale: ScaleFactor, offset: Vec2, rotation: f64) -> Self {
        Self {
            scale,
            offset,
            rotation,
        }
    }

    /// Horizontal scale.
    #[must_use]
    pub fn scale_x(&self) -> f64 {
        self.scale.scale_x
    }

    /// Vertical scale.
    #[must_use]
    pub fn scale_y(&self) -> f64 {
        self.scale.scale_y
    }

    /// Returns a copy with the scale replaced.
    #[must_use]
    pub fn with_scale(self, scale: ScaleFactor) -> Self {
        Self { scale, ..self }
    }

    /// Returns a copy with the offset replaced.
    #[must_use]
    pub fn with_offset(self, offset: Vec2) -> Self {
        Self { offset, ..self }
    }

    /// Component-wise linear interpolation between `self` and `other`.
    #[must_use]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        Self {
            scale: self.scale.lerp(other.scale, t),
            offset: self.offset.lerp(other.offset, t),
            rotation: lerp(self.rotation, other.rotation, t),
        }
    }

    /// Returns the affine map from content coordinates to container
    /// coordinates, for content of the given (unrotated) size.
    ///
    /// Non-quarter-turn rotations are treated as the nearest lower quarter turn.
    #[must_use]
    pub fn to_affine(&self, content_size: Size) -> Affine {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "quarter turns of a finite rotation fit in i64"
        )]
        let quarter = ((self.rotation / 90.0).floor() as i64).rem_euclid(4);
        let rotation = u32::try_from(quarter).unwrap_or_default() * 90;
        Affine::translate(self.offset)
            * Affine::scale_non_uniform(self.scale.scale_x, self.scale.scale_y)
            * rotation_affine(content_size, rotation)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Add for Transform {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            scale: self.scale * rhs.scale,
            offset: rhs.scale.scale_vec2(self.offset) + rhs.offset,
            rotation: self.rotation + rhs.rotation,
        }
    }
}

impl Sub for Transform {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        let scale = self.scale / rhs.scale;
        Self {
            scale,
            offset: self.offset - scale.scale_vec2(rhs.offset),
            rotation: self.rotation - rhs.rotation,
        }
    }
}

/// Scroll state of a single axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Edge {
    /// Content can scroll both ways.
    #[default]
    None,
    /// Content is at its start edge: it cannot scroll further toward the start.
    Start,
    /// Content is at its end edge: it cannot scroll further toward the end.
    End,
    /// Content fits on this axis and cannot scroll at all.
    Both,
}

/// Scroll state of both axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct ScrollEdge {
    /// Horizontal axis state.
    pub horizontal: Edge,
    /// Vertical axis state.
    pub vertical: Edge,
}

impl ScrollEdge {
    /// Creates a scroll edge pair.
    #[must_use]
    pub const fn new(horizontal: Edge, vertical: Edge) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }
}

/// Returns `true` if `size` has no area.
///
/// NaN dimensions count as empty.
#[must_use]
pub fn is_empty_size(size: Size) -> bool {
    !(size.width > 0.0 && size.height > 0.0)
}

/// Returns the center of a size, as a point in that size's space.
#[must_use]
pub fn size_center(size: Size) -> Point {
    Point::new(size.width / 2.0, size.height / 2.0)
}

/// Normalizes a rotation in degrees into `0..360`.
#[must_use]
pub fn normalize_rotation(rotation: u32) -> u32 {
    rotation % 360
}

/// Returns the rotation that undoes `rotation`.
#[must_use]
pub fn reverse_rotation(rotation: u32) -> u32 {
    (360 - normalize_rotation(rotation)) % 360
}

/// Returns the bounding size of `size` after a quarter-turn rotation.
#[must_use]
pub fn rotate_size(size: Size, rotation: u32) -> Size {
    if normalize_rotation(rotation) % 180 == 90 {
        Size::new(size.height, size.width)
    } else {
        size
    }
}

/// Rotates `point` clockwise within a space of `space` size.
///
/// The result is expressed in the rotated space (of size
/// [`rotate_size(space, rotation)`](rotate_size)), so rotating the space's
/// top-left corner by 90 degrees lands on the rotated space's top-right corner.
/// Only multiples of 90 rotate; other angles round down to a quarter turn.
#[must_use]
pub fn rotate_point_in_space(point: Point, space: Size, rotation: u32) -> Point {
    match normalize_rotation(rotation) / 90 {
        1 => Point::new(space.height - point.y, point.x),
        2 => Point::new(space.width - point.x, space.height - point.y),
        3 => Point::new(point.y, space.width - point.x),
        _ => point,
    }
}

/// Rotates `rect` clockwise within a space of `space` size.
///
/// See [`rotate_point_in_space`].
#[must_use]
pub fn rotate_rect_in_space(rect: Rect, space: Size, rotation: u32) -> Rect {
    let p0 = rotate_point_in_space(Point::new(rect.x0, rect.y0), space, rotation);
    let p1 = rotate_point_in_space(Point::new(rect.x1, rect.y1), space, rotation);
    Rect::from_points(p0, p1)
}

/// The affine equivalent of [`rotate_point_in_space`].
#[must_use]
pub fn rotation_affine(space: Size, rotation: u32) -> Affine {
    match normalize_rotation(rotation) / 90 {
        1 => Affine::new([0.0, 1.0, -1.0, 0.0, space.height, 0.0]),
        2 => Affine::new([-1.0, 0.0, 0.0, -1.0, space.width, space.height]),
        3 => Affine::new([0.0, -1.0, 1.0, 0.0, 0.0, space.width]),
        _ => Affine::IDENTITY,
    }
}

/// Rotates a displacement by `degrees` around the origin.
#[must_use]
pub fn rotate_vec2(v: Vec2, degrees: f64) -> Vec2 {
    if degrees == 0.0 {
        return v;
    }
    let (sin, cos) = degrees.to_radians().sin_cos();
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

/// Linear interpolation between two scalars.
#[must_use]
pub fn lerp(start: f64, stop: f64, t: f64) -> f64 {
    start + (stop - start) * t
}

/// Rounds to two decimal places.
///
/// Scale comparisons that decide user-visible steps go through this so that
/// floating-point residue does not skip or repeat a step.
pub(crate) fn round_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect, Size, Vec2};

    use super::*;

    fn assert_point_eq(a: Point, b: Point) {
        assert!(
            (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9,
            "{a:?} != {b:?}"
        );
    }

    #[test]
    fn transform_add_applies_left_then_right() {
        let base = Transform::new(ScaleFactor::uniform(0.5), Vec2::new(0.0, 250.0), 0.0);
        let user = Transform::new(ScaleFactor::uniform(2.0), Vec2::new(-100.0, -20.0), 0.0);
        let combined = base + user;
        assert_eq!(combined.scale, ScaleFactor::uniform(1.0));
        assert_eq!(combined.offset, Vec2::new(-100.0, 480.0));
    }

    #[test]
    fn transform_sub_is_the_remaining_step() {
        let a = Transform::new(ScaleFactor::new(1.5, 0.75), Vec2::new(12.0, -7.0), 90.0);
        let b = Transform::new(ScaleFactor::uniform(3.0), Vec2::new(-40.0, 9.5), 0.0);
        let back = b + (a - b);
        assert!((back.scale_x() - a.scale_x()).abs() < 1e-12);
        assert!((back.scale_y() - a.scale_y()).abs() < 1e-12);
        assert!((back.offset - a.offset).hypot() < 1e-9);
        assert_eq!(back.rotation, a.rotation);
    }

    #[test]
    fn to_affine_maps_content_corners() {
        let content = Size::new(200.0, 100.0);
        let t = Transform::new(ScaleFactor::uniform(2.0), Vec2::new(10.0, 20.0), 90.0);
        let affine = t.to_affine(content);
        // Top-left of the content ends up at the top-right of the rotated box.
        assert_point_eq(affine * Point::ZERO, Point::new(210.0, 20.0));
        assert_point_eq(affine * Point::new(200.0, 100.0), Point::new(10.0, 420.0));
    }

    #[test]
    fn transform_lerp_endpoints() {
        let a = Transform::IDENTITY;
        let b = Transform::new(ScaleFactor::uniform(4.0), Vec2::new(-300.0, -300.0), 0.0);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        let mid = a.lerp(b, 0.5);
        assert_eq!(mid.scale_x(), 2.5);
        assert_eq!(mid.offset, Vec2::new(-150.0, -150.0));
    }

    #[test]
    fn rotate_point_in_space_quarter_turns() {
        let space = Size::new(200.0, 100.0);
        let p = Point::new(10.0, 20.0);
        assert_point_eq(rotate_point_in_space(p, space, 0), p);
        assert_point_eq(rotate_point_in_space(p, space, 90), Point::new(80.0, 10.0));
        assert_point_eq(rotate_point_in_space(p, space, 180), Point::new(190.0, 80.0));
        assert_point_eq(rotate_point_in_space(p, space, 270), Point::new(20.0, 190.0));
        assert_point_eq(rotate_point_in_space(p, space, 360), p);
    }

    #[test]
    fn rotate_point_round_trips_through_reverse_rotation() {
        let space = Size::new(640.0, 480.0);
        let p = Point::new(123.0, 45.5);
        for rotation in [0, 90, 180, 270] {
            let rotated = rotate_point_in_space(p, space, rotation);
            let rotated_space = rotate_size(space, rotation);
            let back = rotate_point_in_space(rotated, rotated_space, reverse_rotation(rotation));
            assert_point_eq(back, p);
        }
    }

    #[test]
    fn rotation_affine_matches_point_rotation() {
        let space = Size::new(300.0, 120.0);
        let p = Point::new(33.0, 101.0);
        for rotation in [0, 90, 180, 270] {
            assert_point_eq(
                rotation_affine(space, rotation) * p,
                rotate_point_in_space(p, space, rotation),
            );
        }
    }

    #[test]
    fn rotate_rect_stays_inside_rotated_space() {
        let space = Size::new(200.0, 100.0);
        let rect = Rect::new(0.0, 0.0, 50.0, 100.0);
        let rotated = rotate_rect_in_space(rect, space, 90);
        assert_eq!(rotated, Rect::new(0.0, 0.0, 100.0, 50.0));
        let rotated = rotate_rect_in_space(rect, space, 270);
        assert_eq!(rotated, Rect::new(0.0, 150.0, 100.0, 200.0));
    }

    #[test]
    fn empty_sizes() {
        assert!(is_empty_size(Size::ZERO));
        assert!(is_empty_size(Size::new(10.0, 0.0)));
        assert!(is_empty_size(Size::new(f64::NAN, 10.0)));
        assert!(!is_empty_size(Size::new(1.0, 1.0)));
    }

    #[test]
    fn rotate_vec2_quarter_turn() {
        let v = rotate_vec2(Vec2::new(1.0, 0.0), 90.0);
        assert!((v - Vec2::new(0.0, 1.0)).hypot() < 1e-12);
    }
}
