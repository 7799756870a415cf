// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Simulated scroll container that exercises the carousel layout pipeline.
//!
//! Sweeps a 12-item carousel across a phone-sized viewport, releases a few
//! flings and lets the engine snap them, then changes the item count. Every
//! engine event goes to a
//! [`PrettyPrintSink`](carousel_debug::pretty::PrettyPrintSink) on stdout,
//! and the final pass is written to `carousel.json`.

use std::cell::Cell;
use std::fs::File;
use std::io::BufWriter;

use carousel_core::config::LayoutConfig;
use carousel_core::engine::{CircularLayoutEngine, LayoutChanges, LayoutEngine};
use carousel_core::host::{CarouselHost, HostBinding, item_count_from_host};
use carousel_core::placement::ItemPlacement;
use carousel_core::presenter::ItemPresenter;
use carousel_core::trace::Tracer;
use kurbo::{Point, Rect, Size, Vec2};

use carousel_debug::pretty::PrettyPrintSink;
use carousel_debug::snapshot::{LayoutSnapshotMeta, export};

const ITEM_COUNT: isize = 12;
const SWEEP_FRAMES: u32 = 24;
const VIEWPORT: Size = Size::new(375.0, 667.0);

/// A scroll container with a mutable offset and item count.
struct SimulatedHost {
    item_count: Cell<isize>,
    scroll_x: Cell<f64>,
}

impl SimulatedHost {
    fn new(item_count: isize) -> Self {
        Self {
            item_count: Cell::new(item_count),
            scroll_x: Cell::new(0.0),
        }
    }
}

impl CarouselHost for SimulatedHost {
    fn item_count(&self) -> isize {
        self.item_count.get()
    }

    fn viewport(&self) -> Rect {
        Rect::from_origin_size(Point::new(self.scroll_x.get(), 0.0), VIEWPORT)
    }
}

/// Prints the items it would have touched.
#[derive(Default)]
struct ConsolePresenter {
    frames: u32,
    applied: usize,
}

impl ItemPresenter for ConsolePresenter {
    fn apply(&mut self, placements: &[ItemPlacement], changes: &LayoutChanges) {
        self.frames += 1;
        let touched: Vec<&ItemPlacement> = placements
            .iter()
            .filter(|p| changes.rebuilt || changes.updated.binary_search(&p.index).is_ok())
            .collect();
        self.applied += touched.len();

        let front = placements.iter().max_by_key(|p| p.stack_order);
        if let Some(front) = front {
            let center = front.visual_center();
            println!(
                "  present: {} visible, {} applied, front #{} at ({:.1}, {:.1})",
                placements.len(),
                touched.len(),
                front.index,
                center.x,
                center.y,
            );
        }
    }
}

fn main() {
    let mut pretty = PrettyPrintSink::new(Box::new(std::io::stdout()));
    let mut engine =
        CircularLayoutEngine::new(LayoutConfig::DEFAULT).expect("default configuration is valid");
    let host = SimulatedHost::new(ITEM_COUNT);
    let mut presenter = ConsolePresenter::default();

    let last_pass = {
        let mut binding = HostBinding::with_tracer(&mut engine, &host, Tracer::new(&mut pretty));
        binding.prepare().expect("host count is non-negative");
        let content = binding.content_size().expect("host count is non-negative");
        let span = content.width - VIEWPORT.width;

        // -- scroll sweep ----------------------------------------------------
        for frame in 0..=SWEEP_FRAMES {
            let x = span * f64::from(frame) / f64::from(SWEEP_FRAMES);
            host.scroll_x.set(x);
            if !binding.should_invalidate_for_bounds_change(host.viewport()) {
                continue;
            }
            present(&mut binding, &mut presenter);
        }

        // -- flings ------------------------------------------------------------
        for (proposed, velocity) in [(163.0, 0.0), (410.0, 900.0), (410.0, -900.0), (span, 0.0)] {
            let target = binding
                .target_content_offset(Point::new(proposed, 0.0), Vec2::new(velocity, 0.0))
                .expect("host count is non-negative");
            host.scroll_x.set(target.x);
            present(&mut binding, &mut presenter);
        }

        // -- data change -------------------------------------------------------
        host.item_count.set(ITEM_COUNT + 1);
        binding.prepare().expect("host count is non-negative");
        present(&mut binding, &mut presenter)
    };

    println!(
        "{} frames presented, {} item updates applied",
        presenter.frames, presenter.applied
    );
    let item_count =
        item_count_from_host(host.item_count.get()).expect("host count is non-negative");
    describe(&engine, item_count);

    // -- export snapshot -------------------------------------------------------
    let viewport = host.viewport();
    let content_width = engine.content_extent(item_count, viewport.height()).width;
    let meta = LayoutSnapshotMeta {
        config: engine.config(),
        item_count,
        scroll_offset_x: viewport.x0,
        angle: engine.angle_for_offset(viewport.x0, content_width, viewport.width(), item_count),
        viewport,
    };
    let path = "carousel.json";
    let file = File::create(path).expect("failed to create carousel.json");
    let mut writer = BufWriter::new(file);
    export(&last_pass, &meta, &mut writer).expect("failed to write snapshot");

    println!("Wrote {path} ({} items)", last_pass.len());
}

/// Runs one layout pass and hands the result to the presenter.
fn present(
    binding: &mut HostBinding<'_, SimulatedHost>,
    presenter: &mut impl ItemPresenter,
) -> Vec<ItemPlacement> {
    let placements: Vec<ItemPlacement> = binding
        .visible_attributes()
        .expect("host count is non-negative")
        .iter()
        .map(ItemPlacement::from_attributes)
        .collect();
    let changes = binding.engine_mut().take_changes();
    presenter.apply(&placements, &changes);
    placements
}

/// Prints a summary through the capability trait only.
fn describe(engine: &impl LayoutEngine, item_count: usize) {
    let extent = engine.content_extent(item_count, VIEWPORT.height);
    let span = extent.width - VIEWPORT.width;
    let end_angle = engine.angle_for_offset(span, extent.width, VIEWPORT.width, item_count);
    println!(
        "content {:.0}x{:.0}, full sweep rotates {:.1}°",
        extent.width,
        extent.height,
        end_angle.to_degrees(),
    );
    for index in [0, item_count / 2, item_count.saturating_sub(1)] {
        match engine.attribute_for_index(index, item_count) {
            Ok(attrs) => println!("  item {index}: angle {:.1}°", attrs.angle().to_degrees()),
            Err(err) => println!("  item {index}: {err}"),
        }
    }
}
