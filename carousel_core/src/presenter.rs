// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Presenter trait for platform adapters.
//!
//! A presenter owns the platform-side item views (layers, DOM nodes, GPU
//! quads) and pushes placements into them. The engine never touches those
//! objects; it only hands over [`ItemPlacement`]s and the
//! [`LayoutChanges`] accumulated since the previous frame.

use crate::engine::LayoutChanges;
use crate::placement::ItemPlacement;

/// Applies layout output to a platform presentation tree.
///
/// `placements` covers every visible item, in index order. When
/// `changes.rebuilt` is set every placement must be applied; otherwise an
/// implementation may skip placements whose index is not in
/// `changes.updated`.
pub trait ItemPresenter {
    /// Pushes `placements` to the presentation tree.
    fn apply(&mut self, placements: &[ItemPlacement], changes: &LayoutChanges);
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use kurbo::{Point, Rect, Size};

    use super::*;
    use crate::engine::CircularLayoutEngine;

    /// Records which indices it actually touched.
    #[derive(Default)]
    struct RecordingPresenter {
        applied: Vec<usize>,
    }

    impl ItemPresenter for RecordingPresenter {
        fn apply(&mut self, placements: &[ItemPlacement], changes: &LayoutChanges) {
            self.applied.clear();
            for placement in placements {
                if changes.rebuilt || changes.updated.binary_search(&placement.index).is_ok() {
                    self.applied.push(placement.index);
                }
            }
        }
    }

    fn frame(
        engine: &mut CircularLayoutEngine,
        presenter: &mut impl ItemPresenter,
        scroll_x: f64,
        item_count: usize,
    ) {
        let viewport = Rect::from_origin_size(Point::new(scroll_x, 0.0), Size::new(375.0, 667.0));
        let placements: Vec<ItemPlacement> = engine
            .attributes_in_range(scroll_x, viewport, item_count)
            .iter()
            .map(ItemPlacement::from_attributes)
            .collect();
        let changes = engine.take_changes();
        presenter.apply(&placements, &changes);
    }

    #[test]
    fn first_frame_applies_everything() {
        let mut engine = CircularLayoutEngine::default();
        let mut presenter = RecordingPresenter::default();
        frame(&mut engine, &mut presenter, 0.0, 12);
        assert_eq!(presenter.applied, [0, 1, 2, 3]);
    }

    #[test]
    fn repeated_frame_applies_nothing() {
        let mut engine = CircularLayoutEngine::default();
        let mut presenter = RecordingPresenter::default();
        frame(&mut engine, &mut presenter, 0.0, 12);
        frame(&mut engine, &mut presenter, 0.0, 12);
        assert!(presenter.applied.is_empty(), "nothing moved");
    }

    #[test]
    fn count_change_forces_full_apply() {
        let mut engine = CircularLayoutEngine::default();
        let mut presenter = RecordingPresenter::default();
        frame(&mut engine, &mut presenter, 0.0, 12);
        frame(&mut engine, &mut presenter, 0.0, 13);
        assert_eq!(presenter.applied, [0, 1, 2, 3]);
    }
}
