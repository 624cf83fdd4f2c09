// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Size, Vec2};

use crate::geometry::{ScaleFactor, is_empty_size};

/// How content is scaled to fit into the container before any user zoom.
///
/// The resulting factor is the base scale of [`crate::ZoomEngine`] and, for
/// every mode except [`ContentScale::Fill`], also its minimum scale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ContentScale {
    /// Scale uniformly so the whole content is visible.
    #[default]
    Fit,
    /// Stretch each axis independently so the content exactly covers the container.
    Fill,
    /// Scale uniformly so the content covers the whole container, cropping the overflow.
    Crop,
    /// Like [`ContentScale::Fit`], but never scale content up.
    Inside,
    /// Do not scale.
    None,
    /// Scale uniformly so the content width matches the container width.
    FillWidth,
    /// Scale uniformly so the content height matches the container height.
    FillHeight,
}

impl ContentScale {
    /// Computes the factor that scales `src` into `dst` under this mode.
    ///
    /// Returns [`ScaleFactor::ONE`] if either size is empty.
    #[must_use]
    pub fn scale_factor(self, src: Size, dst: Size) -> ScaleFactor {
        if is_empty_size(src) || is_empty_size(dst) {
            return ScaleFactor::ONE;
        }
        let width_scale = dst.width / src.width;
        let height_scale = dst.height / src.height;
        match self {
            Self::Fit => ScaleFactor::uniform(width_scale.min(height_scale)),
            Self::Fill => ScaleFactor::new(width_scale, height_scale),
            Self::Crop => ScaleFactor::uniform(width_scale.max(height_scale)),
            Self::Inside => {
                if src.width <= dst.width && src.height <= dst.height {
                    ScaleFactor::ONE
                } else {
                    ScaleFactor::uniform(width_scale.min(height_scale))
                }
            }
            Self::None => ScaleFactor::ONE,
            Self::FillWidth => ScaleFactor::uniform(width_scale),
            Self::FillHeight => ScaleFactor::uniform(height_scale),
        }
    }
}

/// Placement along a single axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AxisAlignment {
    /// Left or top.
    Start,
    /// Centered.
    Center,
    /// Right or bottom.
    End,
}

impl AxisAlignment {
    fn bias(self) -> f64 {
        match self {
            Self::Start => -1.0,
            Self::Center => 0.0,
            Self::End => 1.0,
        }
    }

    /// Offset that places an extent of `size` inside an extent of `space`.
    ///
    /// The result is negative when `size` is larger than `space`.
    #[must_use]
    pub fn align(self, size: f64, space: f64) -> f64 {
        (space - size) * (1.0 + self.bias()) / 2.0
    }
}

/// Where content sits inside the container when it does not fill it.
///
/// A 9-point grid of left-to-right positions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Alignment {
    /// Top-left.
    TopStart,
    /// Top edge, horizontally centered.
    TopCenter,
    /// Top-right.
    TopEnd,
    /// Left edge, vertically centered.
    CenterStart,
    /// Centered on both axes.
    #[default]
    Center,
    /// Right edge, vertically centered.
    CenterEnd,
    /// Bottom-left.
    BottomStart,
    /// Bottom edge, horizontally centered.
    BottomCenter,
    /// Bottom-right.
    BottomEnd,
}

impl Alignment {
    /// Horizontal component of this alignment.
    #[must_use]
    pub fn horizontal(self) -> AxisAlignment {
        match self {
            Self::TopStart | Self::CenterStart | Self::BottomStart => AxisAlignment::Start,
            Self::TopCenter | Self::Center | Self::BottomCenter => AxisAlignment::Center,
            Self::TopEnd | Self::CenterEnd | Self::BottomEnd => AxisAlignment::End,
        }
    }

    /// Vertical component of this alignment.
    #[must_use]
    pub fn vertical(self) -> AxisAlignment {
        match self {
            Self::TopStart | Self::TopCenter | Self::TopEnd => AxisAlignment::Start,
            Self::CenterStart | Self::Center | Self::CenterEnd => AxisAlignment::Center,
            Self::BottomStart | Self::BottomCenter | Self::BottomEnd => AxisAlignment::End,
        }
    }

    /// Offset of the top-left corner of `size` when aligned inside `space`.
    #[must_use]
    pub fn align(self, size: Size, space: Size) -> Vec2 {
        Vec2::new(
            self.horizontal().align(size.width, space.width),
            self.vertical().align(size.height, space.height),
        )
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Size, Vec2};

    use super::{Alignment, ContentScale};
    use crate::geometry::ScaleFactor;

    const CONTAINER: Size = Size::new(1000.0, 1000.0);

    #[test]
    fn fit_and_crop_pick_min_and_max_axis() {
        let wide = Size::new(2000.0, 1000.0);
        assert_eq!(
            ContentScale::Fit.scale_factor(wide, CONTAINER),
            ScaleFactor::uniform(0.5)
        );
        assert_eq!(
            ContentScale::Crop.scale_factor(wide, CONTAINER),
            ScaleFactor::uniform(1.0)
        );
        assert_eq!(
            ContentScale::Fill.scale_factor(wide, CONTAINER),
            ScaleFactor::new(0.5, 1.0)
        );
        assert_eq!(
            ContentScale::FillWidth.scale_factor(wide, CONTAINER),
            ScaleFactor::uniform(0.5)
        );
        assert_eq!(
            ContentScale::FillHeight.scale_factor(wide, CONTAINER),
            ScaleFactor::uniform(1.0)
        );
    }

    #[test]
    fn inside_never_scales_up() {
        let small = Size::new(200.0, 100.0);
        assert_eq!(
            ContentScale::Inside.scale_factor(small, CONTAINER),
            ScaleFactor::ONE
        );
        assert_eq!(
            ContentScale::Fit.scale_factor(small, CONTAINER),
            ScaleFactor::uniform(5.0)
        );
        let large = Size::new(4000.0, 2000.0);
        assert_eq!(
            ContentScale::Inside.scale_factor(large, CONTAINER),
            ScaleFactor::uniform(0.25)
        );
    }

    #[test]
    fn empty_sizes_scale_by_one() {
        for mode in [ContentScale::Fit, ContentScale::Crop, ContentScale::Fill] {
            assert_eq!(mode.scale_factor(Size::ZERO, CONTAINER), ScaleFactor::ONE);
            assert_eq!(
                mode.scale_factor(Size::new(10.0, 10.0), Size::ZERO),
                ScaleFactor::ONE
            );
        }
    }

    #[test]
    fn alignment_grid_offsets() {
        let size = Size::new(400.0, 200.0);
        assert_eq!(Alignment::TopStart.align(size, CONTAINER), Vec2::ZERO);
        assert_eq!(
            Alignment::Center.align(size, CONTAINER),
            Vec2::new(300.0, 400.0)
        );
        assert_eq!(
            Alignment::BottomEnd.align(size, CONTAINER),
            Vec2::new(600.0, 800.0)
        );
        assert_eq!(
            Alignment::CenterStart.align(size, CONTAINER),
            Vec2::new(0.0, 400.0)
        );
    }

    #[test]
    fn alignment_of_oversized_content_is_negative() {
        let size = Size::new(2000.0, 1000.0);
        assert_eq!(
            Alignment::Center.align(size, CONTAINER),
            Vec2::new(-500.0, 0.0)
        );
        assert_eq!(
            Alignment::TopEnd.align(size, CONTAINER),
            Vec2::new(-1000.0, 0.0)
        );
    }
}
