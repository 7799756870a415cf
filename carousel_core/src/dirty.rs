// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dirty-tracking channel constants.
//!
//! The engine uses [`understory_dirty`] to remember which cached entries
//! changed since the host last asked. Keys are item indices.
//!
//! - [`GEOMETRY`]: local-only. Marked by a visible-range pass for each entry
//!   whose angle, center, or stack order actually changed. Entries that were
//!   rewritten with identical values are not marked, so hosts can skip
//!   re-applying them.
//!
//! A cache rebuild discards pending [`GEOMETRY`] marks (the indices may no
//! longer exist) and is reported separately through
//! [`LayoutChanges::rebuilt`](crate::engine::LayoutChanges::rebuilt).
//!
//! # Consumption
//!
//! Callers never query dirty state directly.
//! [`CircularLayoutEngine::take_changes`](crate::engine::CircularLayoutEngine::take_changes)
//! drains the channel and surfaces the result as
//! [`LayoutChanges`](crate::engine::LayoutChanges).

use understory_dirty::Channel;

/// Item angle, center, or stack order changed.
pub const GEOMETRY: Channel = Channel::new(0);
