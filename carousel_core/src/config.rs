// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout configuration and the geometry derived from it.
//!
//! Items sit on a circle of radius [`LayoutConfig::radius`] whose center lies
//! below the item row. Adjacent items are separated by the angle an item's
//! width subtends at that distance:
//!
//! ```text
//!   angle_per_item = atan(item_width / radius)
//! ```
//!
//! Every item rotates about the same pivot, expressed as a normalized
//! [`anchor_point`](LayoutConfig::anchor_point) relative to the item's own
//! bounds. Its `y` component is greater than 1, placing the pivot `radius`
//! below the item's center.

use kurbo::{Point, Size};
#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use crate::error::{ConfigField, LayoutError};

/// Item size and arc radius.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutConfig {
    /// Size of a single item. Both dimensions must be positive.
    pub item_size: Size,
    /// Distance from the arc's center to the item row. Must be positive.
    pub radius: f64,
}

impl LayoutConfig {
    /// Item size used by [`LayoutConfig::DEFAULT`].
    pub const DEFAULT_ITEM_SIZE: Size = Size::new(150.0, 150.0);

    /// Radius used by [`LayoutConfig::DEFAULT`].
    pub const DEFAULT_RADIUS: f64 = 500.0;

    /// 150×150 items on a 500-point radius.
    pub const DEFAULT: Self = Self::new(Self::DEFAULT_ITEM_SIZE, Self::DEFAULT_RADIUS);

    /// Creates a configuration without validating it.
    ///
    /// Use [`validate`](Self::validate) (or let the engine do it) before
    /// deriving geometry.
    #[inline]
    #[must_use]
    pub const fn new(item_size: Size, radius: f64) -> Self {
        Self { item_size, radius }
    }

    /// Returns a copy with a different item size.
    #[inline]
    #[must_use]
    pub const fn with_item_size(self, item_size: Size) -> Self {
        Self { item_size, ..self }
    }

    /// Returns a copy with a different radius.
    #[inline]
    #[must_use]
    pub const fn with_radius(self, radius: f64) -> Self {
        Self { radius, ..self }
    }

    /// Checks that width, height, and radius are finite and positive.
    ///
    /// Fields are checked in that order; the first offender is reported.
    pub fn validate(&self) -> Result<(), LayoutError> {
        check_positive(ConfigField::ItemWidth, self.item_size.width)?;
        check_positive(ConfigField::ItemHeight, self.item_size.height)?;
        check_positive(ConfigField::Radius, self.radius)
    }

    /// Angular spacing between adjacent items, in radians.
    #[inline]
    #[must_use]
    pub fn angle_per_item(&self) -> f64 {
        (self.item_size.width / self.radius).atan()
    }

    /// Normalized rotation pivot shared by every item.
    ///
    /// `x` is the horizontal middle; `y` is `radius` below the item's center,
    /// in units of item height.
    #[inline]
    #[must_use]
    pub fn anchor_point(&self) -> Point {
        let height = self.item_size.height;
        Point::new(0.5, (height / 2.0 + self.radius) / height)
    }

    /// Half of the angular aperture visible through a viewport of the given
    /// size.
    ///
    /// Items whose angle (relative to the current rotation) falls outside
    /// `[-half_angle, half_angle]` are off screen.
    #[inline]
    #[must_use]
    pub fn visible_half_angle(&self, viewport: Size) -> f64 {
        (viewport.width / 2.0)
            .atan2(self.radius + self.item_size.height / 2.0 - viewport.height / 2.0)
    }
}

impl Default for LayoutConfig {
    #[inline]
    fn default() -> Self {
        Self::DEFAULT
    }
}

fn check_positive(field: ConfigField, value: f64) -> Result<(), LayoutError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(LayoutError::InvalidConfiguration { field, value })
    }
}
