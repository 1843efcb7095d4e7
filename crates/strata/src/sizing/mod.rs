//! Size computation.
//!
//! The [`SizeController`] turns item sizing policies into concrete sizes
//! under a section's [`Constraints`](crate::model::Constraints):
//!
//! | Distribution | Cross length of an item | Rows |
//! |---|---|---|
//! | `EntireRow` | the full available cross length | one item per row |
//! | `Equally(n)` | `(W - (n - 1) * spacing) / n` | `n` items per row |
//! | `Proportional` | natural, capped at `W` | greedy first fit |
//! | `ProportionalFillLast` | natural; a relative last item takes the leftover | greedy first fit |
//!
//! `W` is the container's cross length minus the section's cross insets.
//! A section's length is its along insets plus, per row, the row's tallest
//! item and the line spacing; headers and footers add their own extent.
//!
//! Relative items that are not the last cell of a fill-last section are
//! resolved by a [`SizeDelegate`], then by the [`FillerSizing`] share when
//! filler sizing is enabled, and otherwise measured with their template
//! after reporting a violation.

mod controller;
mod delegate;
mod filler;
mod layout;
mod packing;

pub use controller::SizeController;
pub use delegate::SizeDelegate;
pub use filler::{FillerResolution, FillerSizing};
pub(crate) use filler::snapshot_axis;
pub use layout::{RelativeFallback, SectionLayout, Supplementary};
