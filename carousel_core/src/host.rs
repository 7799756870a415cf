// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Contract between the engine and the scroll container that drives it.
//!
//! A scroll container reports how many items it has and which rectangle of
//! content is currently visible. [`HostBinding`] combines that with an
//! explicitly owned [`CircularLayoutEngine`] and answers the questions a
//! collection-view style layout is asked during a pass:
//!
//! 1. [`prepare`](HostBinding::prepare): sync the cache with the item count.
//! 2. [`content_size`](HostBinding::content_size): size of the scrollable
//!    area.
//! 3. [`visible_attributes`](HostBinding::visible_attributes): geometry for
//!    the items visible through the host's viewport.
//! 4. [`target_content_offset`](HostBinding::target_content_offset): where a
//!    fling should come to rest.
//!
//! Signed host counts are validated once, here; the engine itself only sees
//! `usize`.

use kurbo::{Point, Rect, Size, Vec2};

use crate::attributes::ItemAttributes;
use crate::engine::CircularLayoutEngine;
use crate::error::LayoutError;
use crate::placement::ItemPlacement;
use crate::trace::Tracer;

/// A scroll container hosting a carousel.
pub trait CarouselHost {
    /// Number of items in the data source.
    ///
    /// Signed because many platform collection APIs report counts that way;
    /// negative values are rejected with [`LayoutError::InvalidItemCount`].
    fn item_count(&self) -> isize;

    /// Currently visible rectangle, in content coordinates. Its `x0` is the
    /// horizontal scroll offset.
    fn viewport(&self) -> Rect;
}

/// Converts a signed host count into an item count.
pub fn item_count_from_host(count: isize) -> Result<usize, LayoutError> {
    usize::try_from(count).map_err(|_| LayoutError::InvalidItemCount(count))
}

/// Drives a [`CircularLayoutEngine`] on behalf of a [`CarouselHost`].
pub struct HostBinding<'a, H: ?Sized> {
    engine: &'a mut CircularLayoutEngine,
    host: &'a H,
    tracer: Tracer<'a>,
}

impl<H: ?Sized> core::fmt::Debug for HostBinding<'_, H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("HostBinding")
            .field("engine", &self.engine)
            .finish_non_exhaustive()
    }
}

impl<'a, H: CarouselHost + ?Sized> HostBinding<'a, H> {
    /// Binds `engine` to `host` without tracing.
    #[must_use]
    pub fn new(engine: &'a mut CircularLayoutEngine, host: &'a H) -> Self {
        Self::with_tracer(engine, host, Tracer::none())
    }

    /// Binds `engine` to `host`, routing engine events to `tracer`.
    #[must_use]
    pub fn with_tracer(
        engine: &'a mut CircularLayoutEngine,
        host: &'a H,
        tracer: Tracer<'a>,
    ) -> Self {
        Self {
            engine,
            host,
            tracer,
        }
    }

    /// The bound engine.
    #[must_use]
    pub fn engine(&self) -> &CircularLayoutEngine {
        &*self.engine
    }

    /// Mutable access to the bound engine, e.g. to drain changes.
    pub fn engine_mut(&mut self) -> &mut CircularLayoutEngine {
        &mut *self.engine
    }

    /// The host's item count, validated.
    pub fn item_count(&self) -> Result<usize, LayoutError> {
        item_count_from_host(self.host.item_count())
    }

    /// Syncs the attribute cache with the host's item count. Returns whether
    /// the cache was rebuilt.
    pub fn prepare(&mut self) -> Result<bool, LayoutError> {
        let item_count = self.item_count()?;
        Ok(self
            .engine
            .on_item_count_changed_traced(item_count, &mut self.tracer))
    }

    /// Scrollable content size for the host's items and viewport height.
    pub fn content_size(&self) -> Result<Size, LayoutError> {
        let item_count = self.item_count()?;
        Ok(self
            .engine
            .content_extent(item_count, self.host.viewport().height()))
    }

    /// Attributes for the visible items whose bounds overlap `rect`.
    ///
    /// Geometry always comes from the host's viewport; `rect` only trims
    /// items at either end of the window that lie entirely outside it. A
    /// rect covering the viewport returns the same items as
    /// [`visible_attributes`](Self::visible_attributes).
    pub fn attributes_in_rect(&mut self, rect: Rect) -> Result<&[ItemAttributes], LayoutError> {
        let visible = self.visible_attributes()?;
        let overlaps = |attributes: &ItemAttributes| {
            let bounds = ItemPlacement::from_attributes(attributes).bounding_box();
            !bounds.intersect(rect).is_zero_area()
        };
        let start = visible.iter().position(overlaps).unwrap_or(visible.len());
        let end = visible
            .iter()
            .rposition(overlaps)
            .map_or(start, |last| last + 1);
        Ok(visible.get(start..end).unwrap_or(&[]))
    }

    /// Attributes for the host's current viewport. Its `x0` is the scroll
    /// offset.
    pub fn visible_attributes(&mut self) -> Result<&[ItemAttributes], LayoutError> {
        let item_count = self.item_count()?;
        let viewport = self.host.viewport();
        Ok(self.engine.attributes_in_range_traced(
            viewport.x0,
            viewport,
            item_count,
            &mut self.tracer,
        ))
    }

    /// Cached attributes for a single item.
    pub fn attribute_for_item(&self, index: usize) -> Result<ItemAttributes, LayoutError> {
        let item_count = self.item_count()?;
        self.engine.attribute_for_index(index, item_count)
    }

    /// Snaps a proposed resting offset to an item. The `y` component passes
    /// through unchanged.
    pub fn target_content_offset(
        &mut self,
        proposed: Point,
        velocity: Vec2,
    ) -> Result<Point, LayoutError> {
        let item_count = self.item_count()?;
        let viewport = self.host.viewport();
        let content_width = self
            .engine
            .content_extent(item_count, viewport.height())
            .width;
        let x = self.engine.snap_target_traced(
            proposed.x,
            velocity.x,
            content_width,
            viewport.width(),
            item_count,
            &mut self.tracer,
        );
        Ok(Point::new(x, proposed.y))
    }

    /// Whether a change of visible bounds requires a new layout pass.
    ///
    /// Always `true`: every scroll tick changes every visible angle.
    #[inline]
    #[must_use]
    pub fn should_invalidate_for_bounds_change(&self, new_bounds: Rect) -> bool {
        _ = new_bounds;
        true
    }
}
