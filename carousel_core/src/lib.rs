// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout engine for a horizontally-scrolling carousel that arranges items
//! along a circular arc.
//!
//! `carousel_core` turns a scroll offset, an item count, and a small
//! configuration (item size and arc radius) into per-item geometry: an angle
//! on a virtual circle, a rotation pivot below the item, and a stacking
//! order. It also computes velocity-aware snap targets so scrolling settles
//! exactly on an item. It is `no_std` compatible (with `alloc`) and owns no
//! item content.
//!
//! # Architecture
//!
//! ```text
//!   CarouselHost (item count, visible bounds)
//!       │
//!       ▼
//!   HostBinding::prepare() ──► CircularLayoutEngine::on_item_count_changed()
//!       │                              │ (rebuilds cached ItemAttributes)
//!       ▼                              ▼
//!   HostBinding::attributes_in_rect() ──► attributes_in_range() ──► &[ItemAttributes]
//!       │                                                              │
//!       │                 ┌────────────────────────────────────────────┘
//!       │                 ▼
//!       │   ItemPlacement::from_attributes() + take_changes() ──► ItemPresenter::apply()
//!       ▼
//!   HostBinding::target_content_offset() ──► snap_target()
//! ```
//!
//! **[`config`]**: [`LayoutConfig`](config::LayoutConfig) holds item size, radius,
//! and the quantities derived from them (angle per item, anchor point,
//! visible half-angle).
//!
//! **[`attributes`]**: [`ItemAttributes`](attributes::ItemAttributes), the
//! per-item placement record with equality for render diffing and an
//! ordering by stack order.
//!
//! **[`engine`]**: [`CircularLayoutEngine`](engine::CircularLayoutEngine)
//! and the [`LayoutEngine`](engine::LayoutEngine) capability trait. The
//! visible-range pass lives in [`visible`], snapping in [`snap`].
//!
//! **[`dirty`]**: Per-item change tracking via `understory_dirty`, surfaced
//! as [`LayoutChanges`](engine::LayoutChanges).
//!
//! **[`placement`]**: Converts attributes into what a rendering layer
//! applies: anchor point, adjusted position, and a full affine transform.
//!
//! **[`host`]** / **[`presenter`]**: Contracts for the scroll container that
//! drives the engine and for the platform adapter that draws the result.
//!
//! **[`trace`]**: [`LayoutTraceSink`](trace::LayoutTraceSink) trait and
//! event types, with a zero-overhead [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).
//! - `trace-rich` (disabled by default, implies `trace`): Gates per-item
//!   placement events.

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod attributes;
pub mod config;
pub mod dirty;
pub mod engine;
pub mod error;
pub mod host;
pub mod placement;
pub mod presenter;
pub mod snap;
pub mod trace;
pub mod visible;
