// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`LayoutTraceSink`] and writes one line per
//! event to a [`Write`](std::io::Write) destination (default: stderr).
//! Angles are printed in degrees.

use std::io::Write;

use carousel_core::trace::{
    ConfigureEvent, ItemPlacedEvent, LayoutTraceSink, RebuildEvent, SnapEvent, StaleCacheEvent,
    VisibleRangeEvent,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
    per_item: bool,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink")
            .field("per_item", &self.per_item)
            .finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
            per_item: false,
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self {
            writer,
            per_item: false,
        }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self {
            writer,
            per_item: false,
        }
    }

    /// Also print one line per placed item. Off by default; a single pass
    /// can place dozens of items.
    #[must_use]
    pub fn per_item(mut self, enabled: bool) -> Self {
        self.per_item = enabled;
        self
    }

    /// Consumes the sink, returning the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn degrees(radians: f64) -> f64 {
    radians.to_degrees()
}

impl<W: Write> LayoutTraceSink for PrettyPrintSink<W> {
    fn on_configure(&mut self, e: &ConfigureEvent) {
        let _ = writeln!(
            self.writer,
            "[configure] item={}x{} radius={} step={:.3}°",
            e.item_size.width,
            e.item_size.height,
            e.radius,
            degrees(e.angle_per_item),
        );
    }

    fn on_rebuild(&mut self, e: &RebuildEvent) {
        let _ = writeln!(
            self.writer,
            "[rebuild] items={} generation={}",
            e.item_count, e.generation,
        );
    }

    fn on_stale_cache(&mut self, e: &StaleCacheEvent) {
        let _ = writeln!(
            self.writer,
            "[stale] cached={} expected={}",
            e.cached, e.expected,
        );
    }

    fn on_visible_range(&mut self, e: &VisibleRangeEvent) {
        let window = match e.window {
            Some(w) if w.is_fallback() => format!("{}..={} (fallback)", w.start(), w.end()),
            Some(w) => format!("{}..={}", w.start(), w.end()),
            None => "empty".to_owned(),
        };
        let _ = writeln!(
            self.writer,
            "[visible] x={:.1} angle={:.3}° half={:.3}° window={window} changed={}",
            e.scroll_offset_x,
            degrees(e.angle),
            degrees(e.half_angle),
            e.changed,
        );
    }

    fn on_snap(&mut self, e: &SnapEvent) {
        let _ = writeln!(
            self.writer,
            "[snap] proposed={:.1} velocity={:.1} ratio={:.3} {} -> item {} at {:.1}",
            e.proposed_offset_x,
            e.velocity_x,
            e.ratio,
            e.rounding.as_str(),
            e.multiplier,
            e.target_offset_x,
        );
    }

    fn on_item_placed(&mut self, e: &ItemPlacedEvent) {
        if !self.per_item {
            return;
        }
        let marker = if e.changed { "*" } else { " " };
        let _ = writeln!(
            self.writer,
            "[item]{marker} index={} angle={:.3}° z={}",
            e.index,
            degrees(e.angle),
            e.stack_order,
        );
    }
}

#[cfg(test)]
mod tests {
    use carousel_core::config::LayoutConfig;
    use carousel_core::engine::CircularLayoutEngine;
    use carousel_core::snap::SnapRounding;
    use carousel_core::trace::Tracer;
    use carousel_core::visible::VisibleWindow;
    use kurbo::{Point, Rect, Size};

    use super::*;

    fn output(sink: PrettyPrintSink<Vec<u8>>) -> String {
        String::from_utf8(sink.into_inner()).unwrap()
    }

    #[test]
    fn pretty_print_rebuild() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_rebuild(&RebuildEvent {
            item_count: 12,
            generation: 1,
        });
        let output = output(sink);
        assert!(output.contains("[rebuild]"), "got: {output}");
        assert!(output.contains("items=12"), "got: {output}");
    }

    #[test]
    fn pretty_print_fallback_window() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_visible_range(&VisibleRangeEvent {
            scroll_offset_x: 0.0,
            angle: 0.0,
            half_angle: 0.5,
            window: Some(VisibleWindow::FALLBACK),
            changed: 1,
        });
        let output = output(sink);
        assert!(output.contains("window=0..=0 (fallback)"), "got: {output}");
    }

    #[test]
    fn pretty_print_snap() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_snap(&SnapEvent {
            proposed_offset_x: 260.0,
            velocity_x: 2.0,
            ratio: 2.1,
            rounding: SnapRounding::Up,
            multiplier: 3.0,
            target_offset_x: 375.0,
        });
        let output = output(sink);
        assert!(output.contains("up -> item 3 at 375.0"), "got: {output}");
    }

    #[test]
    fn per_item_lines_are_opt_in() {
        let event = ItemPlacedEvent {
            index: 4,
            angle: 0.25,
            stack_order: 250_000,
            changed: true,
        };

        let mut quiet = PrettyPrintSink::with_writer(Vec::<u8>::new());
        quiet.on_item_placed(&event);
        assert!(output(quiet).is_empty());

        let mut chatty = PrettyPrintSink::with_writer(Vec::<u8>::new()).per_item(true);
        chatty.on_item_placed(&event);
        let output = output(chatty);
        assert!(output.contains("[item]* index=4"), "got: {output}");
        assert!(output.contains("z=250000"), "got: {output}");
    }

    #[test]
    fn traced_engine_pass_is_printed() {
        let mut engine = CircularLayoutEngine::new(LayoutConfig::default()).unwrap();
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        {
            let mut tracer = Tracer::new(&mut sink);
            engine
                .set_configuration_traced(Size::new(150.0, 150.0), 500.0, &mut tracer)
                .unwrap();
            let viewport = Rect::from_origin_size(Point::ORIGIN, Size::new(375.0, 667.0));
            let _ = engine.attributes_in_range_traced(0.0, viewport, 8, &mut tracer);
        }
        let output = output(sink);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 4, "got: {output}");
        assert!(lines[0].starts_with("[configure]"), "got: {output}");
        assert!(lines[1].starts_with("[stale]"), "got: {output}");
        assert!(lines[2].starts_with("[rebuild]"), "got: {output}");
        assert!(lines[3].starts_with("[visible]"), "got: {output}");
    }
}
