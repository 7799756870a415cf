// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Velocity-aware snapping.
//!
//! When a drag or fling ends, the scroll container proposes a resting
//! offset. The engine converts it to an angle, measures it in items, rounds
//! to a whole item (direction chosen by the release velocity), and converts
//! back:
//!
//! ```text
//!   factor     = -angle_at_extreme / (content_width - viewport_width)
//!   ratio      = proposed_offset_x * factor / angle_per_item
//!   multiplier = ceil | floor | round (ratio)
//!   target     = multiplier * angle_per_item / factor
//! ```
//!
//! Snapping an offset that already sits on an item returns it unchanged.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use crate::engine::CircularLayoutEngine;
use crate::trace::{SnapEvent, Tracer};

/// How a fractional item position is rounded to a whole item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SnapRounding {
    /// Next item in the scroll direction (positive velocity).
    Up,
    /// Previous item (negative velocity).
    Down,
    /// Closest item, ties away from zero (no velocity).
    Nearest,
}

impl SnapRounding {
    /// Picks the rounding for a release velocity.
    ///
    /// `NaN` counts as no velocity.
    #[inline]
    #[must_use]
    pub fn from_velocity(velocity_x: f64) -> Self {
        if velocity_x > 0.0 {
            Self::Up
        } else if velocity_x < 0.0 {
            Self::Down
        } else {
            Self::Nearest
        }
    }

    /// Rounds `ratio` to a whole number.
    #[inline]
    #[must_use]
    pub fn apply(self, ratio: f64) -> f64 {
        match self {
            Self::Up => ratio.ceil(),
            Self::Down => ratio.floor(),
            Self::Nearest => ratio.round(),
        }
    }

    /// Short label used in trace output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Nearest => "nearest",
        }
    }
}

impl CircularLayoutEngine {
    /// Radians of rotation per point of horizontal scroll.
    ///
    /// `None` when the mapping is undefined: zero scroll span, or a single
    /// item (no rotation to map onto).
    #[must_use]
    pub fn snap_factor(
        &self,
        content_width: f64,
        viewport_width: f64,
        item_count: usize,
    ) -> Option<f64> {
        let factor = -self.angle_at_extreme(item_count) / (content_width - viewport_width);
        (factor.is_finite() && factor != 0.0).then_some(factor)
    }

    /// Corrects a proposed resting offset so the carousel settles exactly on
    /// an item.
    ///
    /// Returns `0.0` when [`snap_factor`](Self::snap_factor) is undefined.
    #[must_use]
    pub fn snap_target(
        &self,
        proposed_offset_x: f64,
        velocity_x: f64,
        content_width: f64,
        viewport_width: f64,
        item_count: usize,
    ) -> f64 {
        self.snap_target_traced(
            proposed_offset_x,
            velocity_x,
            content_width,
            viewport_width,
            item_count,
            &mut Tracer::none(),
        )
    }

    /// Like [`snap_target`](Self::snap_target), emitting a [`SnapEvent`].
    #[must_use]
    pub fn snap_target_traced(
        &self,
        proposed_offset_x: f64,
        velocity_x: f64,
        content_width: f64,
        viewport_width: f64,
        item_count: usize,
        tracer: &mut Tracer<'_>,
    ) -> f64 {
        let rounding = SnapRounding::from_velocity(velocity_x);
        let (ratio, multiplier, target) =
            match self.snap_factor(content_width, viewport_width, item_count) {
                Some(factor) => {
                    let proposed_angle = proposed_offset_x * factor;
                    let ratio = proposed_angle / self.angle_per_item;
                    let multiplier = rounding.apply(ratio);
                    let target = multiplier * self.angle_per_item / factor;
                    (ratio, multiplier, if target.is_finite() { target } else { 0.0 })
                }
                None => (0.0, 0.0, 0.0),
            };

        tracer.snap(&SnapEvent {
            proposed_offset_x,
            velocity_x,
            ratio,
            rounding,
            multiplier,
            target_offset_x: target,
        });
        target
    }
}
