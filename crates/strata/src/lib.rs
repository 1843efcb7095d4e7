//! Strata - a sectioned list diffing-and-sizing engine.
//!
//! Strata sits between an application's list data and a platform list view.
//! The application hands over whole snapshots; Strata works out what
//! changed, how big everything is, and in which order the view may apply it.
//!
//! - [`model`]: items, sections, constraints and snapshots
//! - [`render`]: the renderer contract and typed renderer registry
//! - [`sizing`]: the size controller, distributions and filler sizing
//! - [`update`]: the update controller, diffing and the host contract
//!
//! The foundation types from `strata-core` are re-exported at the root.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use strata::prelude::*;
//!
//! #[derive(Debug, PartialEq)]
//! struct Tile { id: &'static str, height: f32 }
//!
//! impl ItemModel for Tile {
//!     fn identifier(&self) -> &str { self.id }
//!     fn identical(&self, other: &dyn ItemModel) -> bool { identical_by_eq(self, other) }
//!     fn size_policy(&self, _container: Size) -> SizeSpec { SizeSpec::explicit(0.0, self.height) }
//! }
//!
//! let section = Section::new("grid")
//!     .with_constraints(Constraints::new(Distribution::Equally(2)))
//!     .with_item(Tile { id: "a", height: 40.0 })
//!     .with_item(Tile { id: "b", height: 60.0 })
//!     .with_item(Tile { id: "c", height: 20.0 });
//!
//! let mut sizes = SizeController::new(Arc::new(RendererRegistry::new()), &EngineConfig::default());
//! let size = sizes.size_of_section(&section, 0, Size::new(300.0, 600.0));
//! assert_eq!(size, Size::new(300.0, 80.0));
//! ```

pub use strata_core::*;

pub mod model;
pub mod render;
pub mod sizing;
pub mod update;

/// The types most hosts need.
pub mod prelude {
    pub use crate::model::{
        identical_by_eq, item, Constraints, Distribution, IndexPath, ItemModel, ItemRef, Section, SizeSpec,
        Snapshot,
    };
    pub use crate::render::{AnyRenderer, BindMode, FittingRequest, Renderer, RendererRegistry};
    pub use crate::sizing::{SizeController, SizeDelegate};
    pub use crate::update::{
        ControllerHandle, ListHost, ScrollRequest, ScrollTarget, Transition, TransitionCompletion,
        UpdateController,
    };
    pub use strata_core::{Axis, EngineConfig, Insets, Size};
}

static_assertions::assert_impl_all!(model::Snapshot: Send, Sync, Clone);
static_assertions::assert_impl_all!(model::ItemRef: Send, Sync);
static_assertions::assert_impl_all!(update::EditScript: Send, Sync);
static_assertions::assert_impl_all!(render::RendererRegistry: Send, Sync);
