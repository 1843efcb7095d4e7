//! Measurement templates.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use strata_core::Size;
use strata_core::logging::targets;

use super::registry::RendererRegistry;
use super::renderer::{AnyRenderer, BindMode, FittingRequest};
use crate::model::{AsItemAny, ItemKind, ItemModel};

/// One reusable renderer per item kind, bound in sizing mode to measure
/// items.
///
/// Templates are created lazily on first use and live until
/// [`clear`](Self::clear) or until the cache is dropped. The cache belongs to
/// a single size controller.
pub struct TemplateCache {
    registry: Arc<RendererRegistry>,
    templates: HashMap<ItemKind, Box<dyn AnyRenderer>>,
    created: usize,
}

impl TemplateCache {
    /// Create an empty cache backed by `registry`.
    pub fn new(registry: Arc<RendererRegistry>) -> Self {
        Self {
            registry,
            templates: HashMap::new(),
            created: 0,
        }
    }

    /// The backing registry.
    pub fn registry(&self) -> &Arc<RendererRegistry> {
        &self.registry
    }

    /// Measure `item` with its kind's template.
    ///
    /// Returns `None` when no renderer is registered for the item's kind.
    /// The raw fitting size is returned; callers apply the request's
    /// priorities.
    pub fn measure(&mut self, item: &dyn ItemModel, request: &FittingRequest) -> Option<Size> {
        let template = self.template_for(item.kind())?;
        template.prepare_for_reuse();
        if !template.bind_item(item, BindMode::Sizing) {
            return None;
        }
        Some(template.fitting_size(request))
    }

    fn template_for(&mut self, kind: ItemKind) -> Option<&mut Box<dyn AnyRenderer>> {
        if !self.templates.contains_key(&kind) {
            let template = self.registry.create(kind)?;
            tracing::trace!(target: targets::RENDER, kind = kind.name(), "template created");
            self.created += 1;
            self.templates.insert(kind, template);
        }
        self.templates.get_mut(&kind)
    }

    /// Whether a template for `kind` is cached.
    pub fn contains(&self, kind: ItemKind) -> bool {
        self.templates.contains_key(&kind)
    }

    /// Number of cached templates.
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Whether no templates are cached.
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Total templates ever created by this cache.
    pub fn created_count(&self) -> usize {
        self.created
    }

    /// Drop every template.
    pub fn clear(&mut self) {
        self.templates.clear();
    }
}

impl fmt::Debug for TemplateCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemplateCache")
            .field("templates", &self.templates.len())
            .field("created", &self.created)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::identical_by_eq;
    use crate::render::Renderer;
    use parking_lot::Mutex;
    use strata_core::Axis;

    #[derive(Debug, PartialEq)]
    struct Note(&'static str);

    impl ItemModel for Note {
        fn identifier(&self) -> &str {
            self.0
        }

        fn identical(&self, other: &dyn ItemModel) -> bool {
            identical_by_eq(self, other)
        }
    }

    #[derive(Debug, PartialEq)]
    struct Unregistered;

    impl ItemModel for Unregistered {
        fn identifier(&self) -> &str {
            "u"
        }

        fn identical(&self, other: &dyn ItemModel) -> bool {
            identical_by_eq(self, other)
        }
    }

    struct NoteRenderer {
        binds: Arc<Mutex<Vec<(&'static str, BindMode)>>>,
        last: &'static str,
    }

    impl Renderer for NoteRenderer {
        type Item = Note;

        fn bind(&mut self, item: &Note, mode: BindMode) {
            self.last = item.0;
            self.binds.lock().push((item.0, mode));
        }

        fn fitting_size(&self, _request: &FittingRequest) -> Size {
            Size::new(10.0, self.last.len() as f32)
        }
    }

    fn cache() -> (TemplateCache, Arc<Mutex<Vec<(&'static str, BindMode)>>>) {
        let binds = Arc::new(Mutex::new(Vec::new()));
        let shared = binds.clone();
        let registry = RendererRegistry::new().with_factory(move || NoteRenderer {
            binds: shared.clone(),
            last: "",
        });
        (TemplateCache::new(Arc::new(registry)), binds)
    }

    #[test]
    fn test_one_template_per_kind() {
        let (mut cache, binds) = cache();
        let request = FittingRequest::fixed_cross(Axis::Vertical, 100.0, 100.0);

        assert_eq!(cache.measure(&Note("abc"), &request), Some(Size::new(10.0, 3.0)));
        assert_eq!(cache.measure(&Note("abcdef"), &request), Some(Size::new(10.0, 6.0)));

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.created_count(), 1);
        assert!(cache.contains(ItemKind::of::<Note>()));
        assert!(binds.lock().iter().all(|(_, mode)| *mode == BindMode::Sizing));
    }

    #[test]
    fn test_missing_renderer() {
        let (mut cache, _) = cache();
        let request = FittingRequest::fixed_cross(Axis::Vertical, 100.0, 100.0);
        assert_eq!(cache.measure(&Unregistered, &request), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_clear_recreates_lazily() {
        let (mut cache, _) = cache();
        let request = FittingRequest::fixed_cross(Axis::Vertical, 100.0, 100.0);
        cache.measure(&Note("a"), &request);
        cache.clear();
        assert!(cache.is_empty());
        cache.measure(&Note("a"), &request);
        assert_eq!(cache.created_count(), 2);
    }
}
