//! The platform view layer's side of the update protocol.

use strata_core::Point;

use super::diff::EditScript;
use crate::model::{IndexPath, ItemRef, Snapshot};
use crate::render::AnyRenderer;

/// How a host finishes a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionCompletion {
    /// The host applied the change synchronously.
    Immediate,
    /// The host is animating; it calls
    /// [`UpdateController::finish_transition`](super::UpdateController::finish_transition)
    /// when done.
    Deferred,
}

/// Presentation attributes for an item entering or leaving the list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionAttributes {
    /// Opacity at the hidden end of the animation.
    pub alpha: f32,
    /// Offset from the item's resting position.
    pub offset: Point,
    /// Scale at the hidden end of the animation.
    pub scale: f32,
}

impl Default for TransitionAttributes {
    fn default() -> Self {
        Self {
            alpha: 0.0,
            offset: Point::ZERO,
            scale: 1.0,
        }
    }
}

/// Per-item enter and exit attributes.
///
/// Both hooks default to `None`, leaving the host's own animation in place.
pub trait TransitionCustomizer {
    /// Attributes for `item` appearing at `at` in the new snapshot.
    fn entering(&self, _item: &ItemRef, _at: IndexPath) -> Option<TransitionAttributes> {
        None
    }

    /// Attributes for `item` leaving from `at` in the old snapshot.
    fn exiting(&self, _item: &ItemRef, _at: IndexPath) -> Option<TransitionAttributes> {
        None
    }
}

/// A snapshot change handed to the host.
#[derive(Debug, Clone)]
pub struct Transition {
    /// The snapshot on screen.
    pub old: Snapshot,
    /// The snapshot being applied.
    pub new: Snapshot,
    /// Edits from `old` to `new`.
    pub script: EditScript,
    /// Whether the host should animate.
    pub animated: bool,
    /// Customized attributes for inserted items, at new positions.
    pub entering: Vec<(IndexPath, TransitionAttributes)>,
    /// Customized attributes for removed items, at old positions.
    pub exiting: Vec<(IndexPath, TransitionAttributes)>,
}

/// Where to scroll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrollTarget {
    /// The item with this identifier.
    Item(String),
    /// The item at this location.
    IndexPath(IndexPath),
    /// One end of the content.
    Edge(Edge),
}

impl ScrollTarget {
    /// Target an item by identifier.
    pub fn item(identifier: impl Into<String>) -> Self {
        Self::Item(identifier.into())
    }
}

impl From<IndexPath> for ScrollTarget {
    fn from(at: IndexPath) -> Self {
        Self::IndexPath(at)
    }
}

impl From<Edge> for ScrollTarget {
    fn from(edge: Edge) -> Self {
        Self::Edge(edge)
    }
}

/// An end of the scrollable content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// The leading end.
    Top,
    /// The trailing end.
    Bottom,
}

/// A resolved scroll position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollPosition {
    /// Bring this item into view.
    Item(IndexPath),
    /// Scroll to the leading end.
    Top,
    /// Scroll to the trailing end.
    Bottom,
}

/// A scroll the host should perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollRequest {
    pub position: ScrollPosition,
    pub animated: bool,
}

/// The platform view layer.
///
/// The update controller drives a host from its owning context only. A host
/// that returns [`TransitionCompletion::Deferred`] must eventually report
/// back through `finish_transition`, or the queue stalls.
pub trait ListHost {
    /// Apply a snapshot change.
    fn perform_updates(&mut self, transition: &Transition) -> TransitionCompletion;

    /// Redisplay everything without structural changes.
    fn perform_reload(&mut self) -> TransitionCompletion;

    /// Scroll as requested.
    fn scroll_to(&mut self, request: &ScrollRequest);

    /// Visit every renderer currently on screen with its location.
    fn visible_renderers(&mut self, visit: &mut dyn FnMut(IndexPath, &mut dyn AnyRenderer));

    /// Recompute layout on the next pass.
    fn invalidate_layout(&mut self);
}

/// Emitted when the user reorders an item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemMoved {
    pub identifier: String,
    pub from: IndexPath,
    pub to: IndexPath,
}

/// Emitted after a snapshot is installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotApplied {
    /// Section count of the installed snapshot.
    pub sections: usize,
    /// Item count of the installed snapshot.
    pub items: usize,
}
