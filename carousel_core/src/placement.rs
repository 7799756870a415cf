// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Conversion from layout attributes to renderable placements.
//!
//! [`ItemAttributes`] describe an item as "centered here, rotated by this
//! much about a pivot `radius` below its middle". Rendering layers usually
//! want one of two things instead:
//!
//! - an anchor point, a position for that anchor, and a rotation (how layer
//!   trees such as Core Animation position content), or
//! - a single affine transform from item-local coordinates to content
//!   coordinates.
//!
//! [`ItemPlacement`] carries both. Moving the anchor from the middle to the
//! pivot shifts the position down by `(anchor.y - 0.5) * height`, which is
//! exactly `radius`, so an unrotated item still appears at its center.

use kurbo::{Affine, Point, Rect, Size, Vec2};

use crate::attributes::ItemAttributes;

/// Renderable placement of one item.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ItemPlacement {
    /// Item index in the data source.
    pub index: usize,
    /// Unrotated item size.
    pub size: Size,
    /// Normalized rotation pivot.
    pub anchor_point: Point,
    /// Where the anchor point sits, in content coordinates.
    pub position: Point,
    /// Rotation about the anchor point, in radians.
    pub angle: f64,
    /// Z ordering. Higher values draw on top.
    pub stack_order: i64,
    /// Item-local space (origin at the item's top-left) to content space.
    pub transform: Affine,
}

impl ItemPlacement {
    /// Builds the placement for `attributes`.
    #[must_use]
    pub fn from_attributes(attributes: &ItemAttributes) -> Self {
        let size = attributes.size();
        let anchor_point = attributes.anchor_point();
        let center = attributes.center();
        let position = Point::new(
            center.x,
            center.y + (anchor_point.y - 0.5) * size.height,
        );
        let anchor_offset = Vec2::new(anchor_point.x * size.width, anchor_point.y * size.height);
        let transform = Affine::translate(position.to_vec2())
            * attributes.rotation()
            * Affine::translate(-anchor_offset);

        Self {
            index: attributes.index(),
            size,
            anchor_point,
            position,
            angle: attributes.angle(),
            stack_order: attributes.stack_order(),
            transform,
        }
    }

    /// The rotation pivot in content coordinates.
    #[inline]
    #[must_use]
    pub fn pivot(&self) -> Point {
        self.position
    }

    /// Item bounds in item-local coordinates.
    #[inline]
    #[must_use]
    pub fn local_bounds(&self) -> Rect {
        self.size.to_rect()
    }

    /// Where the middle of the item ends up after rotation.
    #[must_use]
    pub fn visual_center(&self) -> Point {
        self.transform * self.local_bounds().center()
    }

    /// Axis-aligned bounds of the rotated item, in content coordinates.
    #[must_use]
    pub fn bounding_box(&self) -> Rect {
        self.transform.transform_rect_bbox(self.local_bounds())
    }
}

impl From<&ItemAttributes> for ItemPlacement {
    fn from(attributes: &ItemAttributes) -> Self {
        Self::from_attributes(attributes)
    }
}
