// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Visible-range pass.
//!
//! Given a scroll offset and a viewport, the pass works out the global
//! rotation, the window of indices that can intersect the viewport, and
//! writes fresh center and angle values into those cache entries:
//!
//! ```text
//!   angle      = angle_for_offset(scroll_offset_x, ...)
//!   half_angle = atan2(vw / 2, radius + item_h / 2 - vh / 2)
//!   item angle = angle + angle_per_item * index
//! ```
//!
//! Entries outside the window are left as they were. Entries inside the
//! window whose values did not change are not reported as updated.

use core::cmp::Ordering;
use core::ops::RangeInclusive;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::Rect;

use crate::attributes::ItemAttributes;
use crate::dirty;
use crate::engine::CircularLayoutEngine;
use crate::trace::{StaleCacheEvent, Tracer, VisibleRangeEvent};

/// Inclusive range of item indices laid out by a visible-range pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct VisibleWindow {
    start: usize,
    end: usize,
    fallback: bool,
}

impl VisibleWindow {
    /// The window holding only index 0, used when no index falls in range.
    pub const FALLBACK: Self = Self {
        start: 0,
        end: 0,
        fallback: true,
    };

    /// Window over `start..=end`. Returns `None` if `start > end`.
    #[inline]
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Option<Self> {
        if start > end {
            return None;
        }
        Some(Self {
            start,
            end,
            fallback: false,
        })
    }

    /// First index in the window.
    #[inline]
    #[must_use]
    pub const fn start(&self) -> usize {
        self.start
    }

    /// Last index in the window (inclusive).
    #[inline]
    #[must_use]
    pub const fn end(&self) -> usize {
        self.end
    }

    /// Whether the computed window was empty and the pass fell back to
    /// index 0 alone.
    #[inline]
    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        self.fallback
    }

    /// Number of indices in the window. Always at least one.
    #[inline]
    #[must_use]
    pub const fn count(&self) -> usize {
        self.end - self.start + 1
    }

    /// Whether `index` lies in the window.
    #[inline]
    #[must_use]
    pub const fn contains(&self, index: usize) -> bool {
        self.start <= index && index <= self.end
    }

    /// The window as an index range.
    #[inline]
    #[must_use]
    pub const fn range(&self) -> RangeInclusive<usize> {
        self.start..=self.end
    }
}

/// Computes the window of indices whose angle can fall inside
/// `[-half_angle, half_angle]` once rotated by `angle`.
///
/// Returns `None` for an empty collection. When rounding leaves no index in
/// range (`end < start`), the window collapses to index 0 with
/// [`fallback`](VisibleWindow::fallback) set.
#[must_use]
pub fn visible_window(
    angle: f64,
    half_angle: f64,
    angle_per_item: f64,
    item_count: usize,
) -> Option<VisibleWindow> {
    let last = item_count.checked_sub(1)?;

    let start = if angle < -half_angle {
        ((-half_angle - angle) / angle_per_item).floor().max(0.0)
    } else {
        0.0
    };
    let end = ((half_angle - angle) / angle_per_item)
        .ceil()
        .min(last as f64);

    match end.partial_cmp(&start) {
        Some(Ordering::Less) | None => Some(VisibleWindow::FALLBACK),
        Some(_) => VisibleWindow::new(to_index(start), to_index(end)),
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "callers clamp the value to 0..=last before converting"
)]
fn to_index(value: f64) -> usize {
    value as usize
}

impl CircularLayoutEngine {
    /// Lays out the items visible through `viewport` at `scroll_offset_x` and
    /// returns their attributes, in index order.
    ///
    /// `viewport` is the visible bounds in content coordinates; each visible
    /// item is centered on its center before rotation. If the cache was not
    /// built for `item_count` it is rebuilt first. Returns an empty slice for
    /// an empty collection.
    pub fn attributes_in_range(
        &mut self,
        scroll_offset_x: f64,
        viewport: Rect,
        item_count: usize,
    ) -> &[ItemAttributes] {
        self.attributes_in_range_traced(scroll_offset_x, viewport, item_count, &mut Tracer::none())
    }

    /// Like [`attributes_in_range`](Self::attributes_in_range), emitting
    /// [`StaleCacheEvent`], [`RebuildEvent`](crate::trace::RebuildEvent),
    /// [`VisibleRangeEvent`], and (with `trace-rich`) one
    /// [`ItemPlacedEvent`](crate::trace::ItemPlacedEvent) per laid-out item.
    pub fn attributes_in_range_traced(
        &mut self,
        scroll_offset_x: f64,
        viewport: Rect,
        item_count: usize,
        tracer: &mut Tracer<'_>,
    ) -> &[ItemAttributes] {
        if !self.is_built_for(item_count) {
            tracer.stale_cache(&StaleCacheEvent {
                cached: self.attributes.len(),
                expected: item_count,
            });
            self.rebuild(item_count, tracer);
        }

        let viewport_size = viewport.size();
        let content_width = self.content_extent(item_count, viewport_size.height).width;
        let angle = self.angle_for_offset(
            scroll_offset_x,
            content_width,
            viewport_size.width,
            item_count,
        );
        let half_angle = self.config.visible_half_angle(viewport_size);
        let window = visible_window(angle, half_angle, self.angle_per_item, item_count);

        let mut changed = 0;
        if let Some(window) = window {
            let center = viewport.center();
            for index in window.range() {
                let Some(entry) = self.attributes.get_mut(index) else {
                    break;
                };
                let mut next = *entry;
                next.set_center(center);
                next.set_angle(angle + self.angle_per_item * index as f64);
                let is_changed = next != *entry;
                if is_changed {
                    *entry = next;
                    self.dirty.mark(index, dirty::GEOMETRY);
                    changed += 1;
                }

                #[cfg(feature = "trace-rich")]
                tracer.item_placed(&crate::trace::ItemPlacedEvent {
                    index,
                    angle: next.angle(),
                    stack_order: next.stack_order(),
                    changed: is_changed,
                });
            }
        }

        tracer.visible_range(&VisibleRangeEvent {
            scroll_offset_x,
            angle,
            half_angle,
            window,
            changed,
        });

        match window {
            Some(window) => self.attributes.get(window.range()).unwrap_or(&[]),
            None => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    #[cfg(not(feature = "std"))]
    use kurbo::common::FloatFuncs as _;
    use kurbo::{Point, Size};

    use super::*;
    use crate::config::LayoutConfig;
    use crate::engine::LayoutChanges;

    const EPS: f64 = 1e-9;

    fn phone_viewport(scroll_x: f64) -> Rect {
        Rect::from_origin_size(Point::new(scroll_x, 0.0), Size::new(375.0, 667.0))
    }

    #[test]
    fn empty_collection_has_no_window() {
        assert_eq!(visible_window(0.0, 0.5, 0.29, 0), None);
    }

    #[test]
    fn window_clamps_to_last_index() {
        let window = visible_window(0.0, 0.5, 0.29, 3).expect("non-empty");
        assert_eq!(window.start(), 0);
        assert_eq!(window.end(), 2);
        assert!(!window.is_fallback());
        assert_eq!(window.count(), 3);
    }

    #[test]
    fn window_skips_items_rotated_past_the_left_edge() {
        // angle -1.0, half 0.5, api 0.25: start = floor(0.5 / 0.25) = 2,
        // end = ceil(1.5 / 0.25) = 6.
        let window = visible_window(-1.0, 0.5, 0.25, 20).expect("non-empty");
        assert_eq!((window.start(), window.end()), (2, 6));
        assert!(window.contains(4));
        assert!(!window.contains(7));
    }

    #[test]
    fn empty_window_falls_back_to_first_index() {
        // A rotation far to the right leaves end < start.
        let window = visible_window(10.0, 0.1, 0.25, 5).expect("non-empty");
        assert_eq!(window.range(), 0..=0);
        assert!(window.is_fallback());
        assert_eq!(window, VisibleWindow::FALLBACK);
    }

    #[test]
    fn inverted_window_is_rejected() {
        assert_eq!(VisibleWindow::new(3, 2), None);
        let single = VisibleWindow::new(4, 4).expect("start == end is valid");
        assert_eq!(single.count(), 1);
        assert!(!single.is_fallback());
    }

    #[test]
    fn phone_viewport_at_origin_shows_four_of_five() {
        let mut engine = CircularLayoutEngine::default();
        // half_angle = atan2(187.5, 241.5) ~ 0.66, so ceil(0.66 / 0.2915) = 3.
        let visible = engine.attributes_in_range(0.0, phone_viewport(0.0), 5);
        assert_eq!(visible.len(), 4);

        let api = (0.3_f64).atan();
        let center = Point::new(187.5, 333.5);
        for (i, attrs) in visible.iter().enumerate() {
            assert_eq!(attrs.index(), i);
            assert_eq!(attrs.center(), center);
            assert!((attrs.angle() - api * i as f64).abs() < EPS, "item {i}");
        }
        assert_eq!(visible[0].stack_order(), 0);
        assert!(visible[1].stack_order() > visible[0].stack_order());
    }

    #[test]
    fn angle_offsets_follow_index() {
        let mut engine = CircularLayoutEngine::default();
        let content = engine.content_extent(20, 667.0).width;
        let offset = 0.4 * (content - 375.0);
        let angle = engine.angle_for_offset(offset, content, 375.0, 20);
        let api = engine.angle_per_item();

        for attrs in engine.attributes_in_range(offset, phone_viewport(offset), 20) {
            let expected = angle + api * attrs.index() as f64;
            assert!((attrs.angle() - expected).abs() < EPS);
        }
    }

    #[test]
    fn scrolled_window_starts_past_zero() {
        let mut engine = CircularLayoutEngine::default();
        let content = engine.content_extent(40, 667.0).width;
        let offset = content - 375.0;
        let visible = engine.attributes_in_range(offset, phone_viewport(offset), 40);
        assert!(!visible.is_empty());
        assert!(visible[0].index() > 0, "first items have rotated away");
        assert_eq!(visible[visible.len() - 1].index(), 39);
        for pair in visible.windows(2) {
            assert_eq!(pair[0].index() + 1, pair[1].index());
        }
    }

    #[test]
    fn visible_items_sit_inside_aperture() {
        let mut engine = CircularLayoutEngine::default();
        let content = engine.content_extent(30, 667.0).width;
        let offset = 0.5 * (content - 375.0);
        let half = engine
            .config()
            .visible_half_angle(Size::new(375.0, 667.0));
        let api = engine.angle_per_item();
        for attrs in engine.attributes_in_range(offset, phone_viewport(offset), 30) {
            assert!(
                attrs.angle() >= -half - api && attrs.angle() <= half + api,
                "item {} at {} outside aperture",
                attrs.index(),
                attrs.angle()
            );
        }
    }

    #[test]
    fn full_width_pass_matches_lookup() {
        let mut engine = CircularLayoutEngine::default();
        let extent = engine.content_extent(5, 667.0);
        let full = Rect::from_origin_size(Point::ORIGIN, extent);
        let visible: alloc::vec::Vec<ItemAttributes> =
            engine.attributes_in_range(0.0, full, 5).to_vec();
        assert_eq!(visible.len(), 5);
        for (i, attrs) in visible.iter().enumerate() {
            assert_eq!(engine.attribute_for_index(i, 5), Ok(*attrs));
        }
    }

    #[test]
    fn empty_collection_returns_empty_slice() {
        let mut engine = CircularLayoutEngine::default();
        assert!(engine.attributes_in_range(0.0, phone_viewport(0.0), 0).is_empty());
        assert!(engine.is_built_for(0));
    }

    #[test]
    fn stale_cache_is_rebuilt_before_layout() {
        let mut engine = CircularLayoutEngine::default();
        engine.on_item_count_changed(3);
        let generation = engine.generation();

        let visible = engine.attributes_in_range(0.0, phone_viewport(0.0), 4);
        assert_eq!(visible.len(), 4);
        assert!(engine.is_built_for(4));
        assert_eq!(engine.generation(), generation + 1);
    }

    #[test]
    fn unchanged_pass_reports_no_updates() {
        let mut engine = CircularLayoutEngine::default();
        engine.on_item_count_changed(5);
        let _ = engine.take_changes();

        let _ = engine.attributes_in_range(0.0, phone_viewport(0.0), 5);
        let first = engine.take_changes();
        // Item 0 stays at angle 0, but its center moved off the origin.
        assert_eq!(first.updated, [0, 1, 2, 3]);
        assert!(!first.rebuilt);

        let _ = engine.attributes_in_range(0.0, phone_viewport(0.0), 5);
        let second = engine.take_changes();
        assert!(second.is_empty(), "identical pass must not mark anything");
    }

    #[test]
    fn scrolling_marks_only_moved_items() {
        let mut engine = CircularLayoutEngine::default();
        let content = engine.content_extent(40, 667.0).width;
        let _ = engine.attributes_in_range(0.0, phone_viewport(0.0), 40);
        let mut changes = LayoutChanges::default();
        engine.take_changes_into(&mut changes);
        assert!(changes.rebuilt);

        let offset = 0.25 * (content - 375.0);
        let visible: alloc::vec::Vec<usize> = engine
            .attributes_in_range(offset, phone_viewport(offset), 40)
            .iter()
            .map(ItemAttributes::index)
            .collect();
        engine.take_changes_into(&mut changes);
        assert!(!changes.rebuilt);
        assert_eq!(changes.updated, visible);
    }

    #[test]
    fn non_finite_angle_is_treated_as_zero() {
        let mut engine = CircularLayoutEngine::new(LayoutConfig::new(Size::new(375.0, 150.0), 500.0))
            .expect("valid configuration");
        // One item exactly as wide as the viewport: zero scroll span.
        let visible = engine.attributes_in_range(12.0, phone_viewport(12.0), 1);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].angle(), 0.0);
    }
}
