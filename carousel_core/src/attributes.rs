// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-item placement records.

use core::cmp::Ordering;

use kurbo::{Affine, Point, Size};

/// Placement of one item on the arc.
///
/// Identity (`index`, `size`, `anchor_point`) is fixed when the engine
/// builds its cache. `center`, `angle`, and `stack_order` are rewritten on
/// every visible-range pass.
///
/// Two records are equal when all fields are equal. Hosts use this to skip
/// re-applying attributes to items whose geometry did not move.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ItemAttributes {
    index: usize,
    size: Size,
    anchor_point: Point,
    center: Point,
    angle: f64,
    stack_order: i64,
}

impl ItemAttributes {
    /// Creates attributes for `index` with zero angle at the origin.
    #[inline]
    #[must_use]
    pub const fn new(index: usize, size: Size, anchor_point: Point) -> Self {
        Self {
            index,
            size,
            anchor_point,
            center: Point::ORIGIN,
            angle: 0.0,
            stack_order: 0,
        }
    }

    /// Item index in the data source.
    #[inline]
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Bounding size of the (unrotated) item.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> Size {
        self.size
    }

    /// Normalized rotation pivot.
    #[inline]
    #[must_use]
    pub const fn anchor_point(&self) -> Point {
        self.anchor_point
    }

    /// Absolute center in content coordinates, before the anchor adjustment.
    #[inline]
    #[must_use]
    pub const fn center(&self) -> Point {
        self.center
    }

    /// Signed rotation in radians. Positive angles place the item to the
    /// right of the viewport center.
    #[inline]
    #[must_use]
    pub const fn angle(&self) -> f64 {
        self.angle
    }

    /// Z ordering derived from [`angle`](Self::angle). Higher values draw on
    /// top.
    #[inline]
    #[must_use]
    pub const fn stack_order(&self) -> i64 {
        self.stack_order
    }

    /// Rotation about the anchor point.
    #[inline]
    #[must_use]
    pub fn rotation(&self) -> Affine {
        Affine::rotate(self.angle)
    }

    /// Sets the angle and re-derives the stack order.
    #[inline]
    pub fn set_angle(&mut self, angle: f64) {
        self.angle = angle;
        self.stack_order = stack_order_for(angle);
    }

    /// Sets the absolute center.
    #[inline]
    pub fn set_center(&mut self, center: Point) {
        self.center = center;
    }
}

impl PartialOrd for ItemAttributes {
    /// Orders by stack order, then index. Records that tie on both but differ
    /// elsewhere are unordered.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match self
            .stack_order
            .cmp(&other.stack_order)
            .then(self.index.cmp(&other.index))
        {
            Ordering::Equal if self != other => None,
            ord => Some(ord),
        }
    }
}

/// Encodes an angle as an integer z ordering.
///
/// Micro-radian resolution, truncated toward zero. Monotonic (non-decreasing)
/// in `angle`; saturates for non-finite input.
#[inline]
#[must_use]
#[expect(
    clippy::cast_possible_truncation,
    reason = "truncation to micro-radians is the encoding"
)]
pub fn stack_order_for(angle: f64) -> i64 {
    (angle * 1_000_000.0) as i64
}

/// Sorts attributes back-to-front (lowest stack order first) for painters.
pub fn sort_by_stack_order(attributes: &mut [ItemAttributes]) {
    attributes.sort_by(|a, b| {
        a.stack_order
            .cmp(&b.stack_order)
            .then(a.index.cmp(&b.index))
    });
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use super::*;

    fn sample(index: usize, angle: f64) -> ItemAttributes {
        let mut attrs =
            ItemAttributes::new(index, Size::new(150.0, 150.0), Point::new(0.5, 3.8));
        attrs.set_angle(angle);
        attrs
    }

    #[test]
    fn set_angle_updates_stack_order() {
        let attrs = sample(0, 0.25);
        assert_eq!(attrs.stack_order(), 250_000);

        let negative = sample(0, -1.125);
        assert_eq!(negative.stack_order(), -1_125_000);

        // Truncates toward zero.
        assert_eq!(stack_order_for(0.000_000_9), 0);
        assert_eq!(stack_order_for(-0.000_000_9), 0);
    }

    #[test]
    fn stack_order_is_monotonic() {
        let mut prev = i64::MIN;
        let mut angle = -2.0;
        while angle <= 2.0 {
            let order = stack_order_for(angle);
            assert!(order >= prev, "stack order decreased at angle {angle}");
            prev = order;
            angle += 0.013;
        }
    }

    #[test]
    fn stack_order_saturates_on_non_finite() {
        assert_eq!(stack_order_for(f64::INFINITY), i64::MAX);
        assert_eq!(stack_order_for(f64::NEG_INFINITY), i64::MIN);
        assert_eq!(stack_order_for(f64::NAN), 0);
    }

    #[test]
    fn equality_requires_angle_and_anchor() {
        let a = sample(2, 0.5);
        let b = sample(2, 0.5);
        assert_eq!(a, b);

        let rotated = sample(2, 0.500_001);
        assert_ne!(a, rotated);

        let mut moved_anchor = ItemAttributes::new(2, a.size(), Point::new(0.5, 4.0));
        moved_anchor.set_angle(0.5);
        assert_ne!(a, moved_anchor);

        let other_index = sample(3, 0.5);
        assert_ne!(a, other_index);
    }

    #[test]
    fn ordering_follows_stack_order_then_index() {
        let left = sample(0, -0.3);
        let right = sample(1, 0.3);
        assert!(left < right, "lower angle should sort first");

        let same_z_a = sample(4, 0.1);
        let same_z_b = sample(5, 0.1);
        assert!(same_z_a < same_z_b, "ties on z break by index");

        let mut centered = sample(4, 0.1);
        centered.set_center(Point::new(10.0, 10.0));
        assert_eq!(same_z_a.partial_cmp(&centered), None);
        assert_eq!(same_z_a.partial_cmp(&same_z_a), Some(Ordering::Equal));
    }

    #[test]
    fn sort_back_to_front() {
        let mut list = vec![sample(0, 0.4), sample(1, -0.2), sample(2, 0.0)];
        sort_by_stack_order(&mut list);
        let order: Vec<usize> = list.iter().map(ItemAttributes::index).collect();
        assert_eq!(order, vec![1, 2, 0]);
    }
}
