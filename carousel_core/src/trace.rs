// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for layout passes.
//!
//! This module provides a [`LayoutTraceSink`] trait with one method per
//! event the engine emits. All method bodies default to no-ops, so
//! implementing only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn LayoutTraceSink`. When the `trace`
//! feature is **off**, every `Tracer` method compiles to nothing (zero
//! overhead). When **on**, each method performs a single `Option` branch
//! before dispatching.
//!
//! Engine operations that emit events come in two flavors: a plain method
//! (e.g. [`attributes_in_range`]) and a `_traced` variant taking a
//! `&mut Tracer<'_>`.
//!
//! # Crate features
//!
//! - `trace`: enables the `Tracer` method bodies (one branch per call).
//! - `trace-rich` (implies `trace`): gates [`ItemPlacedEvent`] and the
//!   corresponding `LayoutTraceSink` method.
//!
//! [`attributes_in_range`]: crate::engine::CircularLayoutEngine::attributes_in_range

use kurbo::Size;

use crate::snap::SnapRounding;
use crate::visible::VisibleWindow;

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when the engine accepts a new configuration.
#[derive(Clone, Copy, Debug)]
pub struct ConfigureEvent {
    /// New item size.
    pub item_size: Size,
    /// New radius.
    pub radius: f64,
    /// Derived angular spacing.
    pub angle_per_item: f64,
}

/// Emitted when the attribute cache is rebuilt.
#[derive(Clone, Copy, Debug)]
pub struct RebuildEvent {
    /// Number of entries in the new cache.
    pub item_count: usize,
    /// Rebuild generation after this rebuild.
    pub generation: u32,
}

/// Emitted when a geometry query finds the cache built for a different item
/// count and rebuilds it before answering.
#[derive(Clone, Copy, Debug)]
pub struct StaleCacheEvent {
    /// Entries that were cached.
    pub cached: usize,
    /// Item count the query asked for.
    pub expected: usize,
}

/// Emitted at the end of a visible-range pass.
#[derive(Clone, Copy, Debug)]
pub struct VisibleRangeEvent {
    /// Horizontal scroll offset of the pass.
    pub scroll_offset_x: f64,
    /// Global rotation for that offset.
    pub angle: f64,
    /// Visible half-aperture.
    pub half_angle: f64,
    /// Index window that was laid out, or `None` for an empty collection.
    pub window: Option<VisibleWindow>,
    /// Number of entries whose attributes changed.
    pub changed: usize,
}

/// Emitted when a snap target is computed.
#[derive(Clone, Copy, Debug)]
pub struct SnapEvent {
    /// Offset the scroll container proposed.
    pub proposed_offset_x: f64,
    /// Release velocity.
    pub velocity_x: f64,
    /// Proposed position measured in items.
    pub ratio: f64,
    /// Rounding chosen from the velocity sign.
    pub rounding: SnapRounding,
    /// Item slot the offset snapped to.
    pub multiplier: f64,
    /// Corrected offset.
    pub target_offset_x: f64,
}

/// Emitted for every item written during a visible-range pass.
#[cfg(feature = "trace-rich")]
#[derive(Clone, Copy, Debug)]
pub struct ItemPlacedEvent {
    /// Item index.
    pub index: usize,
    /// Angle written for the item.
    pub angle: f64,
    /// Stack order derived from the angle.
    pub stack_order: i64,
    /// Whether the attributes differ from the previous pass.
    pub changed: bool,
}

// ---------------------------------------------------------------------------
// LayoutTraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the layout engine.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait LayoutTraceSink {
    /// Called when a configuration is accepted.
    fn on_configure(&mut self, e: &ConfigureEvent) {
        _ = e;
    }

    /// Called after the attribute cache is rebuilt.
    fn on_rebuild(&mut self, e: &RebuildEvent) {
        _ = e;
    }

    /// Called when a query self-heals a stale cache.
    fn on_stale_cache(&mut self, e: &StaleCacheEvent) {
        _ = e;
    }

    /// Called at the end of a visible-range pass.
    fn on_visible_range(&mut self, e: &VisibleRangeEvent) {
        _ = e;
    }

    /// Called when a snap target is computed.
    fn on_snap(&mut self, e: &SnapEvent) {
        _ = e;
    }

    /// Called for each item laid out (requires `trace-rich` feature).
    #[cfg(feature = "trace-rich")]
    fn on_item_placed(&mut self, e: &ItemPlacedEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`LayoutTraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl LayoutTraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`LayoutTraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn LayoutTraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn LayoutTraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn LayoutTraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`ConfigureEvent`].
    #[inline]
    pub fn configure(&mut self, e: &ConfigureEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_configure(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`RebuildEvent`].
    #[inline]
    pub fn rebuild(&mut self, e: &RebuildEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_rebuild(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`StaleCacheEvent`].
    #[inline]
    pub fn stale_cache(&mut self, e: &StaleCacheEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_stale_cache(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`VisibleRangeEvent`].
    #[inline]
    pub fn visible_range(&mut self, e: &VisibleRangeEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_visible_range(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`SnapEvent`].
    #[inline]
    pub fn snap(&mut self, e: &SnapEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_snap(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits an [`ItemPlacedEvent`] (requires `trace-rich` feature).
    #[cfg(feature = "trace-rich")]
    #[inline]
    pub fn item_placed(&mut self, e: &ItemPlacedEvent) {
        if let Some(s) = &mut self.sink {
            s.on_item_placed(e);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_rebuild() -> RebuildEvent {
        RebuildEvent {
            item_count: 12,
            generation: 3,
        }
    }

    #[test]
    fn noop_sink_compiles() {
        let mut sink = NoopSink;
        sink.on_rebuild(&sample_rebuild());
        sink.on_stale_cache(&StaleCacheEvent {
            cached: 0,
            expected: 4,
        });
        sink.on_snap(&SnapEvent {
            proposed_offset_x: 10.0,
            velocity_x: 0.0,
            ratio: 0.1,
            rounding: SnapRounding::Nearest,
            multiplier: 0.0,
            target_offset_x: 0.0,
        });
    }

    #[test]
    fn tracer_none_does_nothing() {
        let mut tracer = Tracer::none();
        tracer.rebuild(&sample_rebuild());
        tracer.configure(&ConfigureEvent {
            item_size: Size::new(150.0, 150.0),
            radius: 500.0,
            angle_per_item: 0.29,
        });
    }

    #[cfg(feature = "trace")]
    #[test]
    fn tracer_dispatches_to_sink() {
        use alloc::vec::Vec;

        struct RecordingSink {
            generations: Vec<u32>,
        }
        impl LayoutTraceSink for RecordingSink {
            fn on_rebuild(&mut self, e: &RebuildEvent) {
                self.generations.push(e.generation);
            }
        }

        let mut sink = RecordingSink {
            generations: Vec::new(),
        };
        let mut tracer = Tracer::new(&mut sink);
        tracer.rebuild(&sample_rebuild());
        // Access sink after tracer is dropped.
        drop(tracer);
        assert_eq!(sink.generations, &[3]);
    }
}
