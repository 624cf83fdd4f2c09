// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame-driven animators.
//!
//! Animators here own no clock and schedule nothing. The host calls `tick`
//! with its frame timestamp (milliseconds, monotonic) once per display
//! refresh; the first tick after `start` anchors the animation's clock, so
//! the host does not need to know when an animation was started.
//!
//! Both animators are small state machines: idle, pending (started, not yet
//! ticked) and running. [`FloatAnimator::stop`] and [`FlingAnimator::stop`]
//! take effect immediately and leave whatever value was last produced as the
//! final value.

use core::f64::consts::{E, PI};

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Rect, Vec2};

/// Easing curves for [`FloatAnimator`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Easing {
    /// Constant speed.
    Linear,
    /// Slow start and end, fastest in the middle (cosine curve).
    #[default]
    AccelerateDecelerate,
    /// Fast start, quadratic slow down.
    Decelerate,
    /// Fast start, cubic slow down.
    EaseOutCubic,
    /// Cubic ease in and out.
    EaseInOutCubic,
}

impl Easing {
    /// Maps linear progress `t` to eased progress.
    ///
    /// `t` is clamped to `[0, 1]`; `apply(0) == 0` and `apply(1) == 1` for
    /// every curve.
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::AccelerateDecelerate => ((t + 1.0) * PI).cos() / 2.0 + 0.5,
            Self::Decelerate => 1.0 - (1.0 - t) * (1.0 - t),
            Self::EaseOutCubic => 1.0 - cube(1.0 - t),
            Self::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - cube(2.0 - 2.0 * t) / 2.0
                }
            }
        }
    }
}

fn cube(x: f64) -> f64 {
    x * x * x
}

/// Duration and easing of animated engine transitions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnimationSpec {
    /// Duration in milliseconds. Zero completes on the first frame.
    pub duration_millis: u32,
    /// Easing curve.
    pub easing: Easing,
}

impl AnimationSpec {
    /// Default duration of animated transitions.
    pub const DEFAULT_DURATION_MILLIS: u32 = 300;

    /// Creates an animation spec.
    #[must_use]
    pub const fn new(duration_millis: u32, easing: Easing) -> Self {
        Self {
            duration_millis,
            easing,
        }
    }

    /// A spec that completes on the first frame.
    #[must_use]
    pub const fn immediate() -> Self {
        Self::new(0, Easing::Linear)
    }
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DURATION_MILLIS, Easing::AccelerateDecelerate)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Idle,
    Pending,
    Running { start_millis: u64 },
}

impl Phase {
    fn elapsed_seconds(&mut self, now_millis: u64) -> Option<f64> {
        match *self {
            Self::Idle => None,
            Self::Pending => {
                *self = Self::Running {
                    start_millis: now_millis,
                };
                Some(0.0)
            }
            Self::Running { start_millis } => {
                Some(now_millis.saturating_sub(start_millis) as f64 / 1000.0)
            }
        }
    }
}

/// Eases a scalar from `start` to `end` over an [`AnimationSpec`].
#[derive(Clone, Debug)]
pub struct FloatAnimator {
    start: f64,
    end: f64,
    spec: AnimationSpec,
    phase: Phase,
    value: f64,
}

impl FloatAnimator {
    /// Creates an idle animator.
    #[must_use]
    pub fn new(start: f64, end: f64, spec: AnimationSpec) -> Self {
        Self {
            start,
            end,
            spec,
            phase: Phase::Idle,
            value: start,
        }
    }

    /// Starts (or restarts) the animation from `start`.
    pub fn start(&mut self) {
        self.phase = Phase::Pending;
        self.value = self.start;
    }

    /// Stops the animation, keeping the last produced value.
    pub fn stop(&mut self) {
        self.phase = Phase::Idle;
    }

    /// Returns `true` between [`start`](Self::start) and completion or [`stop`](Self::stop).
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.phase != Phase::Idle
    }

    /// The last produced value.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Advances to `now_millis` and returns the new value.
    ///
    /// Returns `None` when idle. The tick that reaches the end of the
    /// duration returns exactly `end` and leaves the animator idle.
    pub fn tick(&mut self, now_millis: u64) -> Option<f64> {
        let elapsed = self.phase.elapsed_seconds(now_millis)?;
        let duration = f64::from(self.spec.duration_millis) / 1000.0;
        let progress = if duration > 0.0 {
            elapsed / duration
        } else {
            1.0
        };
        if progress >= 1.0 {
            self.value = self.end;
            self.phase = Phase::Idle;
        } else {
            let eased = self.spec.easing.apply(progress);
            self.value = self.start + (self.end - self.start) * eased;
        }
        Some(self.value)
    }
}

/// Decelerating fling of a 2D offset, confined to bounds.
///
/// Velocity decays exponentially, `v(t) = v0 * e^(-FRICTION * t)`. Each axis
/// stops independently, either at a bound or once its velocity drops below
/// [`FlingAnimator::MIN_VELOCITY`].
#[derive(Clone, Debug)]
pub struct FlingAnimator {
    start: Vec2,
    velocity: Vec2,
    bounds: Rect,
    phase: Phase,
    value: Vec2,
}

impl FlingAnimator {
    /// Exponential decay rate, per second.
    pub const FRICTION: f64 = 4.2;
    /// Speed below which an axis comes to rest, in pixels per second.
    pub const MIN_VELOCITY: f64 = 1.0;

    /// Creates an idle fling from `start` with initial `velocity` (pixels per
    /// second), confined to `bounds`.
    #[must_use]
    pub fn new(start: Vec2, velocity: Vec2, bounds: Rect) -> Self {
        let bounds = bounds.abs();
        Self {
            start,
            velocity,
            bounds,
            phase: Phase::Idle,
            value: start,
        }
    }

    /// Starts (or restarts) the fling.
    pub fn start(&mut self) {
        self.phase = Phase::Pending;
        self.value = self.start;
    }

    /// Stops the fling, keeping the last produced offset.
    pub fn stop(&mut self) {
        self.phase = Phase::Idle;
    }

    /// Returns `true` between [`start`](Self::start) and completion or [`stop`](Self::stop).
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.phase != Phase::Idle
    }

    /// The last produced offset.
    #[must_use]
    pub fn value(&self) -> Vec2 {
        self.value
    }

    /// Advances to `now_millis` and returns the new offset.
    ///
    /// Returns `None` when idle. The tick on which both axes have come to
    /// rest leaves the animator idle.
    pub fn tick(&mut self, now_millis: u64) -> Option<Vec2> {
        let elapsed = self.phase.elapsed_seconds(now_millis)?;
        let (x, x_done) = Self::axis(
            self.start.x,
            self.velocity.x,
            self.bounds.x0,
            self.bounds.x1,
            elapsed,
        );
        let (y, y_done) = Self::axis(
            self.start.y,
            self.velocity.y,
            self.bounds.y0,
            self.bounds.y1,
            elapsed,
        );
        self.value = Vec2::new(x, y);
        if x_done && y_done {
            self.phase = Phase::Idle;
        }
        Some(self.value)
    }

    /// Position of one axis after `elapsed` seconds, and whether it is at rest.
    fn axis(start: f64, velocity: f64, min: f64, max: f64, elapsed: f64) -> (f64, bool) {
        let speed = velocity.abs();
        if !speed.is_finite() || speed < Self::MIN_VELOCITY {
            return (start, true);
        }
        // Time at which the decayed speed reaches the threshold.
        let rest_time = (speed / Self::MIN_VELOCITY).ln() / Self::FRICTION;
        let t = elapsed.min(rest_time);
        let travel = velocity / Self::FRICTION * (1.0 - E.powf(-Self::FRICTION * t));
        let position = start + travel;
        let clamped = position.clamp(min, max);
        let at_bound = (velocity > 0.0 && position >= max) || (velocity < 0.0 && position <= min);
        (clamped, at_bound || elapsed >= rest_time)
    }
}
