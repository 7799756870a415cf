// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for layout operations.

use core::fmt;

/// Which configuration value was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConfigField {
    /// Item width (used as a divisor when deriving the angle per item).
    ItemWidth,
    /// Item height (used as a divisor when deriving the anchor point).
    ItemHeight,
    /// Arc radius.
    Radius,
}

impl ConfigField {
    /// Returns a short name for messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ItemWidth => "item width",
            Self::ItemHeight => "item height",
            Self::Radius => "radius",
        }
    }
}

/// Errors from [`CircularLayoutEngine`](crate::engine::CircularLayoutEngine)
/// and [`HostBinding`](crate::host::HostBinding) operations.
///
/// None of these are fatal: the engine keeps its previous state when an
/// operation fails.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LayoutError {
    /// A configuration value was non-positive or not finite.
    InvalidConfiguration {
        /// The rejected field.
        field: ConfigField,
        /// The rejected value.
        value: f64,
    },
    /// The host reported a negative item count.
    InvalidItemCount(isize),
    /// An item index outside `0..item_count`.
    IndexOutOfBounds {
        /// The requested index.
        index: usize,
        /// The item count at the time of the request.
        item_count: usize,
    },
    /// A read-only query found a cache built for a different item count.
    StaleCache {
        /// Entries currently cached.
        cached: usize,
        /// Item count the caller asked about.
        expected: usize,
    },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfiguration { field, value } => {
                write!(f, "invalid {}: {value} (must be finite and > 0)", field.as_str())
            }
            Self::InvalidItemCount(count) => write!(f, "invalid item count {count}"),
            Self::IndexOutOfBounds { index, item_count } => {
                write!(f, "item index {index} out of bounds (item count {item_count})")
            }
            Self::StaleCache { cached, expected } => write!(
                f,
                "attribute cache holds {cached} entries but {expected} items were requested"
            ),
        }
    }
}

impl core::error::Error for LayoutError {}
