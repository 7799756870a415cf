// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pretty-printing and JSON snapshot export for carousel layout diagnostics.
//!
//! This crate provides development tooling on top of `carousel_core`:
//!
//! - [`pretty::PrettyPrintSink`]: a
//!   [`LayoutTraceSink`](carousel_core::trace::LayoutTraceSink) that writes
//!   human-readable one-line-per-event output.
//! - [`snapshot::export`]: writes the placements of one layout pass as
//!   JSON, for post-mortem inspection or golden comparisons.

pub mod pretty;
pub mod snapshot;
