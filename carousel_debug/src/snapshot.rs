// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON snapshot of a layout pass.
//!
//! [`export`] writes the configuration, scroll state, and every placement of
//! one pass as a single JSON object:
//!
//! ```text
//! {
//!   "config":   { "item_width", "item_height", "radius", "angle_per_item" },
//!   "scroll":   { "offset_x", "angle", "item_count", "viewport": [x0, y0, x1, y1] },
//!   "items":    [ { "index", "angle", "z", "anchor", "position", "transform" }, ... ]
//! }
//! ```
//!
//! `transform` holds the six affine coefficients `[a, b, c, d, e, f]` in
//! kurbo's order.

use std::io::{self, Write};

use carousel_core::config::LayoutConfig;
use carousel_core::placement::ItemPlacement;
use kurbo::Rect;
use serde_json::{Value, json};

/// Scroll state recorded alongside the placements.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutSnapshotMeta {
    /// Configuration the pass ran with.
    pub config: LayoutConfig,
    /// Item count of the pass.
    pub item_count: usize,
    /// Horizontal scroll offset.
    pub scroll_offset_x: f64,
    /// Global rotation for that offset.
    pub angle: f64,
    /// Visible bounds in content coordinates.
    pub viewport: Rect,
}

/// Writes a JSON snapshot of `placements` to `writer`.
pub fn export(
    placements: &[ItemPlacement],
    meta: &LayoutSnapshotMeta,
    writer: &mut dyn Write,
) -> io::Result<()> {
    let items: Vec<Value> = placements
        .iter()
        .map(|p| {
            json!({
                "index": p.index,
                "angle": p.angle,
                "z": p.stack_order,
                "anchor": [p.anchor_point.x, p.anchor_point.y],
                "position": [p.position.x, p.position.y],
                "transform": p.transform.as_coeffs(),
            })
        })
        .collect();

    let viewport = meta.viewport;
    let document = json!({
        "config": {
            "item_width": meta.config.item_size.width,
            "item_height": meta.config.item_size.height,
            "radius": meta.config.radius,
            "angle_per_item": meta.config.angle_per_item(),
        },
        "scroll": {
            "offset_x": meta.scroll_offset_x,
            "angle": meta.angle,
            "item_count": meta.item_count,
            "viewport": [viewport.x0, viewport.y0, viewport.x1, viewport.y1],
        },
        "items": items,
    });

    serde_json::to_writer_pretty(writer, &document)?;
    Ok(())
}
