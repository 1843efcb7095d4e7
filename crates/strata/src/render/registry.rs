//! Typed renderer registration.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use strata_core::logging::targets;

use super::renderer::{AnyRenderer, Renderer, TypedRenderer};
use crate::model::ItemKind;

type Factory = Arc<dyn Fn() -> Box<dyn AnyRenderer> + Send + Sync>;

/// Maps item kinds to renderer factories.
///
/// Registration is explicit and keyed by the renderer's
/// [`Renderer::Item`] type, so a missing mapping is a programming error
/// caught the first time the kind is measured, never a lookup by name.
///
/// # Example
///
/// ```
/// use strata::model::{identical_by_eq, ItemModel};
/// use strata::render::{BindMode, FittingRequest, Renderer, RendererRegistry};
/// use strata_core::Size;
///
/// #[derive(Debug, PartialEq)]
/// struct Divider;
///
/// impl ItemModel for Divider {
///     fn identifier(&self) -> &str { "divider" }
///     fn identical(&self, other: &dyn ItemModel) -> bool { identical_by_eq(self, other) }
/// }
///
/// #[derive(Default)]
/// struct DividerRenderer;
///
/// impl Renderer for DividerRenderer {
///     type Item = Divider;
///     fn bind(&mut self, _item: &Divider, _mode: BindMode) {}
///     fn fitting_size(&self, request: &FittingRequest) -> Size {
///         Size::new(request.target.width, 1.0)
///     }
/// }
///
/// let registry = RendererRegistry::new().with::<DividerRenderer>();
/// assert!(registry.create(strata::model::ItemKind::of::<Divider>()).is_some());
/// ```
#[derive(Clone, Default)]
pub struct RendererRegistry {
    factories: HashMap<ItemKind, Factory>,
}

impl RendererRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a default-constructible renderer for its item kind.
    ///
    /// A later registration for the same kind replaces the earlier one.
    pub fn register<R: Renderer + Default>(&mut self) -> &mut Self {
        self.register_with(R::default)
    }

    /// Register a renderer built by `factory`.
    pub fn register_with<R, F>(&mut self, factory: F) -> &mut Self
    where
        R: Renderer,
        F: Fn() -> R + Send + Sync + 'static,
    {
        let kind = ItemKind::of::<R::Item>();
        tracing::debug!(target: targets::RENDER, kind = kind.name(), "renderer registered");
        self.factories
            .insert(kind, Arc::new(move || TypedRenderer::boxed(factory())));
        self
    }

    /// Builder form of [`register`](Self::register).
    pub fn with<R: Renderer + Default>(mut self) -> Self {
        self.register::<R>();
        self
    }

    /// Builder form of [`register_with`](Self::register_with).
    pub fn with_factory<R, F>(mut self, factory: F) -> Self
    where
        R: Renderer,
        F: Fn() -> R + Send + Sync + 'static,
    {
        self.register_with(factory);
        self
    }

    /// Instantiate a renderer for `kind`.
    pub fn create(&self, kind: ItemKind) -> Option<Box<dyn AnyRenderer>> {
        self.factories.get(&kind).map(|factory| factory())
    }

    /// Whether a renderer is registered for `kind`.
    pub fn contains(&self, kind: ItemKind) -> bool {
        self.factories.contains_key(&kind)
    }

    /// Number of registered kinds.
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl fmt::Debug for RendererRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set()
            .entries(self.factories.keys().map(ItemKind::short_name))
            .finish()
    }
}
