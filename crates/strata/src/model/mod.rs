//! The list data model.
//!
//! A list is a [`Snapshot`]: an ordered list of [`Section`]s, each holding
//! shared [`ItemModel`]s plus the [`Constraints`] that govern their layout.
//!
//! # Identity and Equality
//!
//! Every item carries a caller-supplied string identifier that is stable
//! across snapshots for the same logical item. Content equality is a
//! separate question answered by [`ItemModel::identical`]; the diff engine
//! uses the first to match items and the second to decide whether a
//! surviving item needs rebinding.
//!
//! ```
//! use strata::model::{identical_by_eq, ItemModel, Section, Snapshot};
//!
//! #[derive(Debug, PartialEq)]
//! struct Row { id: String, text: String }
//!
//! impl ItemModel for Row {
//!     fn identifier(&self) -> &str { &self.id }
//!     fn identical(&self, other: &dyn ItemModel) -> bool { identical_by_eq(self, other) }
//! }
//!
//! let snapshot = Snapshot::new(vec![
//!     Section::new("inbox")
//!         .with_item(Row { id: "m1".into(), text: "hello".into() })
//!         .with_item(Row { id: "m2".into(), text: "again".into() }),
//! ]);
//! assert_eq!(snapshot.index_path_of("m2").map(|p| p.item), Some(1));
//! ```

mod index;
mod item;
mod section;
mod snapshot;

pub use index::IndexPath;
pub use item::{identical_by_eq, item, AsItemAny, ItemKind, ItemModel, ItemRef, SizeSpec};
pub use section::{Constraints, Distribution, Section};
pub use snapshot::Snapshot;
