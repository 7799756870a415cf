// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The circular layout engine and its capability trait.
//!
//! [`CircularLayoutEngine`] owns the configuration, the derived angle per
//! item, and a cache of one [`ItemAttributes`] per item. The cache has two
//! states (see [`CacheState`]):
//!
//! - **Unbuilt**: after construction or any configuration change.
//! - **Built**: after a rebuild for a specific item count.
//!
//! A rebuild replaces every entry at once and happens only when the cache is
//! unbuilt or was built for a different item count, so calling
//! [`on_item_count_changed`](CircularLayoutEngine::on_item_count_changed)
//! twice with the same count is a no-op the second time.
//!
//! Per-frame work lives in [`visible`](crate::visible) (the visible-range
//! pass) and [`snap`](crate::snap) (snap targets); both extend
//! `CircularLayoutEngine` with further `impl` blocks.

use alloc::vec::Vec;

use kurbo::{Rect, Size};
use understory_dirty::{CycleHandling, DirtyTracker};

use crate::attributes::ItemAttributes;
use crate::config::LayoutConfig;
use crate::dirty;
use crate::error::LayoutError;
use crate::trace::{ConfigureEvent, RebuildEvent, Tracer};

/// Whether the attribute cache is valid, and for which item count.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CacheState {
    /// No usable cache; the next geometry query or count change rebuilds it.
    Unbuilt,
    /// Cache holds exactly `item_count` entries for the current configuration.
    Built {
        /// Item count the cache was built for.
        item_count: usize,
    },
}

/// Changes accumulated since the last
/// [`take_changes`](CircularLayoutEngine::take_changes) call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LayoutChanges {
    /// Indices whose attributes changed, in ascending order.
    pub updated: Vec<usize>,
    /// Whether the cache was rebuilt. When set, hosts should re-apply every
    /// visible item regardless of [`updated`](Self::updated).
    pub rebuilt: bool,
}

impl LayoutChanges {
    /// Clears all change lists.
    pub fn clear(&mut self) {
        self.updated.clear();
        self.rebuilt = false;
    }

    /// Returns `true` if nothing changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.updated.is_empty() && !self.rebuilt
    }
}

/// Layout operations a carousel host drives.
///
/// [`CircularLayoutEngine`] is the implementation in this crate; hosts that
/// only need the contract (or a test double) can be generic over this trait.
pub trait LayoutEngine {
    /// Replaces item size and radius. Invalidates the attribute cache.
    fn set_configuration(&mut self, item_size: Size, radius: f64) -> Result<(), LayoutError>;

    /// Replaces the item size, keeping the radius. Invalidates the cache.
    fn set_item_size(&mut self, item_size: Size) -> Result<(), LayoutError>;

    /// Replaces the radius, keeping the item size. Invalidates the cache.
    fn set_radius(&mut self, radius: f64) -> Result<(), LayoutError>;

    /// Makes the cache hold exactly `item_count` entries. Returns whether a
    /// rebuild happened.
    fn on_item_count_changed(&mut self, item_count: usize) -> bool;

    /// Total scrollable size for `item_count` items.
    fn content_extent(&self, item_count: usize, viewport_height: f64) -> Size;

    /// Global rotation for a horizontal scroll offset.
    fn angle_for_offset(
        &self,
        scroll_offset_x: f64,
        content_width: f64,
        viewport_width: f64,
        item_count: usize,
    ) -> f64;

    /// Lays out and returns the items visible through `viewport`.
    fn attributes_in_range(
        &mut self,
        scroll_offset_x: f64,
        viewport: Rect,
        item_count: usize,
    ) -> &[ItemAttributes];

    /// Returns a copy of the cached attributes for one item.
    fn attribute_for_index(
        &self,
        index: usize,
        item_count: usize,
    ) -> Result<ItemAttributes, LayoutError>;

    /// Corrects a proposed resting offset so it lands on an item.
    fn snap_target(
        &self,
        proposed_offset_x: f64,
        velocity_x: f64,
        content_width: f64,
        viewport_width: f64,
        item_count: usize,
    ) -> f64;
}

/// Lays items out along a circular arc.
///
/// See the [module docs](self) for the cache lifecycle.
#[derive(Debug)]
pub struct CircularLayoutEngine {
    pub(crate) config: LayoutConfig,
    pub(crate) angle_per_item: f64,

    // -- Attribute cache --
    pub(crate) attributes: Vec<ItemAttributes>,
    pub(crate) state: CacheState,
    pub(crate) generation: u32,

    // -- Change tracking --
    pub(crate) dirty: DirtyTracker<usize>,
    pub(crate) rebuilt: bool,
}

impl Default for CircularLayoutEngine {
    fn default() -> Self {
        Self::with_valid_config(LayoutConfig::DEFAULT)
    }
}

impl CircularLayoutEngine {
    /// Creates an engine with the given configuration.
    ///
    /// The cache starts unbuilt.
    pub fn new(config: LayoutConfig) -> Result<Self, LayoutError> {
        config.validate()?;
        Ok(Self::with_valid_config(config))
    }

    fn with_valid_config(config: LayoutConfig) -> Self {
        Self {
            config,
            angle_per_item: config.angle_per_item(),
            attributes: Vec::new(),
            state: CacheState::Unbuilt,
            generation: 0,
            dirty: DirtyTracker::with_cycle_handling(CycleHandling::Error),
            rebuilt: false,
        }
    }

    // -- Configuration API --

    /// Returns the current configuration.
    #[must_use]
    pub fn config(&self) -> LayoutConfig {
        self.config
    }

    /// Returns the angular spacing between adjacent items.
    #[must_use]
    pub fn angle_per_item(&self) -> f64 {
        self.angle_per_item
    }

    /// Replaces item size and radius.
    ///
    /// On success the angle per item is recomputed and the cache becomes
    /// [`CacheState::Unbuilt`]. No geometry is computed until the next query.
    /// On failure nothing changes.
    pub fn set_configuration(&mut self, item_size: Size, radius: f64) -> Result<(), LayoutError> {
        self.set_configuration_traced(item_size, radius, &mut Tracer::none())
    }

    /// Like [`set_configuration`](Self::set_configuration), emitting a
    /// [`ConfigureEvent`].
    pub fn set_configuration_traced(
        &mut self,
        item_size: Size,
        radius: f64,
        tracer: &mut Tracer<'_>,
    ) -> Result<(), LayoutError> {
        let config = LayoutConfig::new(item_size, radius);
        config.validate()?;
        self.config = config;
        self.angle_per_item = config.angle_per_item();
        self.invalidate();
        tracer.configure(&ConfigureEvent {
            item_size,
            radius,
            angle_per_item: self.angle_per_item,
        });
        Ok(())
    }

    /// Replaces the item size, keeping the radius.
    pub fn set_item_size(&mut self, item_size: Size) -> Result<(), LayoutError> {
        self.set_configuration(item_size, self.config.radius)
    }

    /// Replaces the radius, keeping the item size.
    pub fn set_radius(&mut self, radius: f64) -> Result<(), LayoutError> {
        self.set_configuration(self.config.item_size, radius)
    }

    // -- Cache API --

    /// Returns the cache state.
    #[must_use]
    pub fn cache_state(&self) -> CacheState {
        self.state
    }

    /// Returns whether the cache is valid for `item_count` items.
    #[must_use]
    pub fn is_built_for(&self, item_count: usize) -> bool {
        self.state == CacheState::Built { item_count }
    }

    /// Number of rebuilds performed so far.
    ///
    /// Unchanged across calls that find the cache already valid.
    #[must_use]
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Returns the cached attributes, in index order.
    ///
    /// Empty while the cache is unbuilt.
    #[must_use]
    pub fn attributes(&self) -> &[ItemAttributes] {
        &self.attributes
    }

    /// Makes the cache hold exactly `item_count` entries.
    ///
    /// Rebuilds only when the cache is unbuilt or was built for a different
    /// count; returns whether a rebuild happened. Every entry gets the same
    /// anchor point and size; only the index differs.
    pub fn on_item_count_changed(&mut self, item_count: usize) -> bool {
        self.on_item_count_changed_traced(item_count, &mut Tracer::none())
    }

    /// Like [`on_item_count_changed`](Self::on_item_count_changed), emitting
    /// a [`RebuildEvent`] when a rebuild happens.
    pub fn on_item_count_changed_traced(
        &mut self,
        item_count: usize,
        tracer: &mut Tracer<'_>,
    ) -> bool {
        if self.is_built_for(item_count) {
            return false;
        }
        self.rebuild(item_count, tracer);
        true
    }

    /// Returns a copy of the cached attributes for `index`.
    ///
    /// # Errors
    ///
    /// - [`LayoutError::IndexOutOfBounds`] if `index >= item_count`.
    /// - [`LayoutError::StaleCache`] if the cache was not built for
    ///   `item_count` (call
    ///   [`on_item_count_changed`](Self::on_item_count_changed) first).
    pub fn attribute_for_index(
        &self,
        index: usize,
        item_count: usize,
    ) -> Result<ItemAttributes, LayoutError> {
        if index >= item_count {
            return Err(LayoutError::IndexOutOfBounds { index, item_count });
        }
        if !self.is_built_for(item_count) {
            return Err(LayoutError::StaleCache {
                cached: self.attributes.len(),
                expected: item_count,
            });
        }
        self.attributes
            .get(index)
            .copied()
            .ok_or(LayoutError::IndexOutOfBounds { index, item_count })
    }

    // -- Geometry --

    /// Total scrollable size: one item width per item, viewport height.
    #[must_use]
    pub fn content_extent(&self, item_count: usize, viewport_height: f64) -> Size {
        Size::new(
            item_count as f64 * self.config.item_size.width,
            viewport_height,
        )
    }

    /// Rotation that brings the last item to the center.
    ///
    /// Zero for empty collections.
    #[must_use]
    pub fn angle_at_extreme(&self, item_count: usize) -> f64 {
        match item_count {
            0 => 0.0,
            n => -((n - 1) as f64) * self.angle_per_item,
        }
    }

    /// Global rotation for a horizontal scroll offset.
    ///
    /// Maps `0..=(content_width - viewport_width)` linearly onto
    /// `0..=angle_at_extreme`. Returns `0.0` when that span is zero (zero or
    /// one item filling the viewport) or the result is otherwise not finite.
    #[must_use]
    pub fn angle_for_offset(
        &self,
        scroll_offset_x: f64,
        content_width: f64,
        viewport_width: f64,
        item_count: usize,
    ) -> f64 {
        let angle = self.angle_at_extreme(item_count) * scroll_offset_x
            / (content_width - viewport_width);
        if angle.is_finite() { angle } else { 0.0 }
    }

    // -- Change tracking --

    /// Drains accumulated changes.
    #[must_use]
    pub fn take_changes(&mut self) -> LayoutChanges {
        let mut changes = LayoutChanges::default();
        self.take_changes_into(&mut changes);
        changes
    }

    /// Like [`take_changes`](Self::take_changes), but reuses a
    /// caller-provided buffer to avoid allocation.
    pub fn take_changes_into(&mut self, changes: &mut LayoutChanges) {
        changes.clear();
        changes.rebuilt = core::mem::take(&mut self.rebuilt);
        changes
            .updated
            .extend(self.dirty.drain(dirty::GEOMETRY).deterministic().run());
        changes.updated.sort_unstable();
        changes.updated.dedup();
    }

    // -- Internal helpers --

    /// Drops the cache. Pending per-item marks refer to entries that no
    /// longer exist, so they go too.
    fn invalidate(&mut self) {
        self.attributes = Vec::new();
        self.state = CacheState::Unbuilt;
        self.discard_geometry_marks();
    }

    pub(crate) fn rebuild(&mut self, item_count: usize, tracer: &mut Tracer<'_>) {
        let size = self.config.item_size;
        let anchor_point = self.config.anchor_point();
        self.attributes = (0..item_count)
            .map(|index| ItemAttributes::new(index, size, anchor_point))
            .collect();
        self.state = CacheState::Built { item_count };
        self.generation = self.generation.wrapping_add(1);
        self.discard_geometry_marks();
        self.rebuilt = true;
        tracer.rebuild(&RebuildEvent {
            item_count,
            generation: self.generation,
        });
    }

    fn discard_geometry_marks(&mut self) {
        let _: Vec<usize> = self
            .dirty
            .drain(dirty::GEOMETRY)
            .deterministic()
            .run()
            .collect();
    }
}

impl LayoutEngine for CircularLayoutEngine {
    fn set_configuration(&mut self, item_size: Size, radius: f64) -> Result<(), LayoutError> {
        Self::set_configuration(self, item_size, radius)
    }

    fn set_item_size(&mut self, item_size: Size) -> Result<(), LayoutError> {
        Self::set_item_size(self, item_size)
    }

    fn set_radius(&mut self, radius: f64) -> Result<(), LayoutError> {
        Self::set_radius(self, radius)
    }

    fn on_item_count_changed(&mut self, item_count: usize) -> bool {
        Self::on_item_count_changed(self, item_count)
    }

    fn content_extent(&self, item_count: usize, viewport_height: f64) -> Size {
        Self::content_extent(self, item_count, viewport_height)
    }

    fn angle_for_offset(
        &self,
        scroll_offset_x: f64,
        content_width: f64,
        viewport_width: f64,
        item_count: usize,
    ) -> f64 {
        Self::angle_for_offset(
            self,
            scroll_offset_x,
            content_width,
            viewport_width,
            item_count,
        )
    }

    fn attributes_in_range(
        &mut self,
        scroll_offset_x: f64,
        viewport: Rect,
        item_count: usize,
    ) -> &[ItemAttributes] {
        Self::attributes_in_range(self, scroll_offset_x, viewport, item_count)
    }

    fn attribute_for_index(
        &self,
        index: usize,
        item_count: usize,
    ) -> Result<ItemAttributes, LayoutError> {
        Self::attribute_for_index(self, index, item_count)
    }

    fn snap_target(
        &self,
        proposed_offset_x: f64,
        velocity_x: f64,
        content_width: f64,
        viewport_width: f64,
        item_count: usize,
    ) -> f64 {
        Self::snap_target(
            self,
            proposed_offset_x,
            velocity_x,
            content_width,
            viewport_width,
            item_count,
        )
    }
}
