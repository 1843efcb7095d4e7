//! The size controller.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use strata_core::logging::{span_names, targets};
use strata_core::{Axis, Checks, EngineConfig, PerfSpan, Size, ThreadAffinity, Violation};

use super::delegate::SizeDelegate;
use super::layout::{RelativeFallback, SectionLayout, Supplementary};
use super::packing::{Placement, RowPacker};
use crate::model::{AsItemAny, Distribution, IndexPath, ItemModel, ItemRef, Section, SizeSpec, Snapshot};
use crate::render::{FittingRequest, RendererRegistry, TemplateCache};

/// A remembered template measurement.
///
/// Reused only while the item is still `identical` to the one measured and
/// the request has not changed.
struct Measurement {
    item: ItemRef,
    request: FittingRequest,
    size: Size,
}

/// Computes concrete sizes for items under their section's constraints.
///
/// The controller owns the template cache used for autolayout measurement
/// and implements the four distributions. Section lengths, single item sizes
/// and frames all come from the same row-packing pass, so they always agree.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use strata::model::{identical_by_eq, Constraints, Distribution, ItemModel, Section, SizeSpec};
/// use strata::render::RendererRegistry;
/// use strata::sizing::SizeController;
/// use strata_core::{EngineConfig, Size};
///
/// #[derive(Debug, PartialEq)]
/// struct Tile(String);
///
/// impl ItemModel for Tile {
///     fn identifier(&self) -> &str { &self.0 }
///     fn identical(&self, other: &dyn ItemModel) -> bool { identical_by_eq(self, other) }
///     fn size_policy(&self, _container: Size) -> SizeSpec { SizeSpec::explicit(50.0, 100.0) }
/// }
///
/// let section = (0..5).fold(
///     Section::new("grid").with_constraints(Constraints::new(Distribution::Equally(2))),
///     |s, i| s.with_item(Tile(format!("t{i}"))),
/// );
///
/// let mut sizes = SizeController::new(Arc::new(RendererRegistry::new()), &EngineConfig::default());
/// let total = sizes.size_of_section(&section, 0, Size::new(320.0, 600.0));
/// assert_eq!(total, Size::new(320.0, 300.0));
/// ```
pub struct SizeController {
    templates: TemplateCache,
    measurements: HashMap<String, Measurement>,
    delegate: Option<Box<dyn SizeDelegate>>,
    checks: Checks,
    minimum_dimension: f32,
    affinity: ThreadAffinity,
}

impl SizeController {
    /// Create a controller measuring with renderers from `registry`.
    pub fn new(registry: Arc<RendererRegistry>, config: &EngineConfig) -> Self {
        Self::with_checks(registry, config, Checks::new(config.checks))
    }

    /// Create a controller that reports into an existing [`Checks`].
    pub fn with_checks(registry: Arc<RendererRegistry>, config: &EngineConfig, checks: Checks) -> Self {
        Self {
            templates: TemplateCache::new(registry),
            measurements: HashMap::new(),
            delegate: None,
            checks,
            minimum_dimension: config.effective_minimum_dimension(),
            affinity: ThreadAffinity::current(),
        }
    }

    /// Install or remove the size delegate for relative items.
    pub fn set_size_delegate(&mut self, delegate: Option<Box<dyn SizeDelegate>>) {
        self.affinity.debug_assert_same_thread();
        self.delegate = delegate;
    }

    /// Whether a size delegate is installed.
    pub fn has_size_delegate(&self) -> bool {
        self.delegate.is_some()
    }

    /// The violation reporter.
    pub fn checks(&self) -> &Checks {
        &self.checks
    }

    /// The template cache.
    pub fn templates(&self) -> &TemplateCache {
        &self.templates
    }

    /// The smallest length handed out.
    pub fn minimum_dimension(&self) -> f32 {
        self.minimum_dimension
    }

    /// Drop every template and remembered measurement.
    pub fn clear_cache(&mut self) {
        self.affinity.debug_assert_same_thread();
        tracing::debug!(
            target: targets::SIZING,
            templates = self.templates.len(),
            measurements = self.measurements.len(),
            "size cache cleared"
        );
        self.templates.clear();
        self.measurements.clear();
    }

    /// Drop remembered measurements but keep the templates.
    pub fn clear_measurements(&mut self) {
        self.affinity.debug_assert_same_thread();
        self.measurements.clear();
    }

    /// Forget measurements for items no longer in `snapshot`.
    pub fn retain_measurements(&mut self, snapshot: &Snapshot) {
        let live: HashSet<&str> = snapshot.iter().map(|(_, item)| item.identifier()).collect();
        self.measurements
            .retain(|identifier, _| live.contains(identifier.as_str()));
    }

    /// Size of the item at `at` in `section`.
    ///
    /// `at.item` indexes into `section`; `at.section` is only reported to the
    /// size delegate. Returns the minimum size when the index is out of
    /// range.
    pub fn size_of_item(&mut self, section: &Section, at: IndexPath, container: Size) -> Size {
        self.size_of_item_with(section, at, container, RelativeFallback::Template)
    }

    /// [`size_of_item`](Self::size_of_item) with an explicit fallback for
    /// unresolved relative items.
    pub fn size_of_item_with(
        &mut self,
        section: &Section,
        at: IndexPath,
        container: Size,
        fallback: RelativeFallback,
    ) -> Size {
        self.affinity.debug_assert_same_thread();
        if at.item >= section.len() {
            self.checks.report(Violation::MissingLocation {
                section: at.section,
                item: at.item,
            });
            return self.minimum_size();
        }

        if self.is_fill_last_cell(section, at.item, container) {
            let (packer, _) = self.pack(section, at.section, container, fallback, at.item);
            self.fill_last_cell(section, at.item, container, &packer)
        } else {
            self.measure_item(section, at, container, fallback)
        }
    }

    /// Size of a whole section: full container cross length by the summed
    /// along extent of header, insets, rows and footer.
    pub fn size_of_section(&mut self, section: &Section, section_index: usize, container: Size) -> Size {
        self.size_of_section_with(section, section_index, container, RelativeFallback::Template)
    }

    /// [`size_of_section`](Self::size_of_section) with an explicit fallback
    /// for unresolved relative items.
    pub fn size_of_section_with(
        &mut self,
        section: &Section,
        section_index: usize,
        container: Size,
        fallback: RelativeFallback,
    ) -> Size {
        self.affinity.debug_assert_same_thread();
        let _span = PerfSpan::new(span_names::MEASURE_SECTION);

        let (packer, _) = self.pack(section, section_index, container, fallback, section.len());
        let rows = packer.finish();
        let size = self.section_size(section, container, rows);

        tracing::trace!(
            target: targets::SIZING,
            section = section.identifier(),
            items = section.len(),
            width = size.width,
            height = size.height,
            "section measured"
        );
        size
    }

    /// Size of a section's header or footer, measured across the full
    /// container cross length.
    pub fn size_of_supplementary(
        &mut self,
        section: &Section,
        kind: Supplementary,
        container: Size,
    ) -> Option<Size> {
        self.affinity.debug_assert_same_thread();
        let item = match kind {
            Supplementary::Header => section.header(),
            Supplementary::Footer => section.footer(),
        }?;

        let axis = section.constraints().axis;
        let cross = axis.cross_of(container);
        let request = FittingRequest::fixed_cross(axis, cross, axis.along_of(container));
        let size = match item.size_policy(container) {
            SizeSpec::Explicit(size) => axis.size(cross, axis.along_of(size)),
            SizeSpec::Autolayout => self.autolayout(item, request),
            SizeSpec::Relative => {
                self.checks.report(Violation::UnresolvedRelativeItem {
                    identifier: item.identifier().to_owned(),
                });
                self.autolayout(item, request)
            }
        };
        Some(self.checked(item, size))
    }

    /// Frames of every item of a section, relative to the section's origin.
    pub fn layout_section(&mut self, section: &Section, section_index: usize, container: Size) -> SectionLayout {
        self.layout_section_with(section, section_index, container, RelativeFallback::Template)
    }

    /// [`layout_section`](Self::layout_section) with an explicit fallback for
    /// unresolved relative items.
    pub fn layout_section_with(
        &mut self,
        section: &Section,
        section_index: usize,
        container: Size,
        fallback: RelativeFallback,
    ) -> SectionLayout {
        self.affinity.debug_assert_same_thread();
        let constraints = *section.constraints();
        let axis = constraints.axis;
        let cross = axis.cross_of(container);

        let header_along = self
            .size_of_supplementary(section, Supplementary::Header, container)
            .map(|size| axis.along_of(size));
        let header = header_along.map(|along| axis.rect(0.0, 0.0, cross, along));
        let header_along = header_along.unwrap_or(0.0);

        let (packer, placed) = self.pack(section, section_index, container, fallback, section.len());
        let rows = packer.finish();

        let cross_origin = constraints.insets.cross_leading(axis);
        let along_origin = header_along + constraints.insets.along_leading(axis);
        let items = placed
            .iter()
            .map(|(size, placement)| {
                axis.rect(
                    cross_origin + placement.cross_offset,
                    along_origin + placement.along_offset,
                    axis.cross_of(*size),
                    axis.along_of(*size),
                )
            })
            .collect();

        let footer_origin = header_along + constraints.insets.along(axis) + rows;
        let footer_along = self
            .size_of_supplementary(section, Supplementary::Footer, container)
            .map(|size| axis.along_of(size));
        let footer = footer_along.map(|along| axis.rect(0.0, footer_origin, cross, along));
        let footer_along = footer_along.unwrap_or(0.0);

        SectionLayout {
            header,
            items,
            footer,
            size: axis.size(cross, footer_origin + footer_along),
        }
    }

    /// Size the delegate reports for a relative item, if any.
    pub fn delegate_size(&self, item: &ItemRef, at: IndexPath, container: Size) -> Option<Size> {
        self.delegate
            .as_ref()
            .and_then(|delegate| delegate.size_for(item.as_ref(), at, container))
    }

    /// Whether the item at `index` is the relative last cell of a fill-last
    /// section.
    pub fn is_fill_last_cell(&self, section: &Section, index: usize, container: Size) -> bool {
        matches!(section.constraints().distribution, Distribution::ProportionalFillLast { .. })
            && index + 1 == section.len()
            && section
                .item(index)
                .is_some_and(|item| item.size_policy(container).is_relative())
    }

    fn minimum_size(&self) -> Size {
        Size::new(self.minimum_dimension, self.minimum_dimension)
    }

    /// Cross length available to items: the container minus cross insets.
    fn available_cross(section: &Section, container: Size) -> f32 {
        let constraints = section.constraints();
        let axis = constraints.axis;
        (axis.cross_of(container) - constraints.insets.cross(axis)).max(0.0)
    }

    /// The cell cross length imposed by the distribution, if any.
    fn cell_cross(section: &Section, container: Size) -> Option<f32> {
        let constraints = section.constraints();
        let available = Self::available_cross(section, container);
        match constraints.distribution {
            Distribution::EntireRow => Some(available),
            Distribution::Equally(columns) => {
                let columns = columns.max(1) as f32;
                let gaps = (columns - 1.0) * constraints.min_interitem_spacing;
                Some(((available - gaps) / columns).max(0.0))
            }
            Distribution::Proportional | Distribution::ProportionalFillLast { .. } => None,
        }
    }

    /// Fit a resolved size into the distribution's cell: a fixed cell forces
    /// the cross length, otherwise it is capped at the available length.
    fn reshape(axis: Axis, cell: Option<f32>, available: f32, size: Size) -> Size {
        match cell {
            Some(cross) => axis.size(cross, axis.along_of(size)),
            None => axis.size(axis.cross_of(size).min(available), axis.along_of(size)),
        }
    }

    fn section_size(&mut self, section: &Section, container: Size, rows: f32) -> Size {
        let axis = section.constraints().axis;
        let header = self
            .size_of_supplementary(section, Supplementary::Header, container)
            .map_or(0.0, |size| axis.along_of(size));
        let footer = self
            .size_of_supplementary(section, Supplementary::Footer, container)
            .map_or(0.0, |size| axis.along_of(size));
        let along = header + section.constraints().insets.along(axis) + rows + footer;
        axis.size(axis.cross_of(container), along)
    }

    /// Size and place items `[0, upto)` of a section.
    fn pack(
        &mut self,
        section: &Section,
        section_index: usize,
        container: Size,
        fallback: RelativeFallback,
        upto: usize,
    ) -> (RowPacker, Vec<(Size, Placement)>) {
        let constraints = *section.constraints();
        let axis = constraints.axis;
        let mut packer = RowPacker::new(
            Self::available_cross(section, container),
            constraints.min_interitem_spacing,
            constraints.min_line_spacing,
        );
        let mut placed = Vec::with_capacity(upto);

        for index in 0..upto.min(section.len()) {
            let size = if self.is_fill_last_cell(section, index, container) {
                self.fill_last_cell(section, index, container, &packer)
            } else {
                self.measure_item(section, IndexPath::new(section_index, index), container, fallback)
            };

            let placement = packer.place(axis.cross_of(size), axis.along_of(size));
            match constraints.distribution {
                Distribution::EntireRow => packer.end_row(),
                Distribution::Equally(columns) if packer.row_len() >= columns.max(1) => packer.end_row(),
                _ => {}
            }
            placed.push((size, placement));
        }

        (packer, placed)
    }

    /// Size the relative last cell of a fill-last section given the packing
    /// of every item before it.
    fn fill_last_cell(&mut self, section: &Section, index: usize, container: Size, packer: &RowPacker) -> Size {
        let constraints = section.constraints();
        let axis = constraints.axis;
        let Distribution::ProportionalFillLast { minimum_width } = constraints.distribution else {
            return self.minimum_size();
        };
        let Some(item) = section.item(index) else {
            return self.minimum_size();
        };

        let leftover = packer.leftover();
        let cross = if leftover >= minimum_width {
            leftover
        } else {
            Self::available_cross(section, container)
        };

        let request = FittingRequest::fixed_cross(axis, cross, axis.along_of(container));
        let along = axis.along_of(self.autolayout(item, request));
        tracing::trace!(
            target: targets::SIZING,
            item = item.identifier(),
            leftover,
            cross,
            "fill-last cell sized"
        );
        self.checked(item, axis.size(cross, along))
    }

    /// Size one item that is not a fill-last cell.
    fn measure_item(&mut self, section: &Section, at: IndexPath, container: Size, fallback: RelativeFallback) -> Size {
        let Some(item) = section.item(at.item) else {
            return self.minimum_size();
        };
        let axis = section.constraints().axis;
        let available = Self::available_cross(section, container);
        let cell = Self::cell_cross(section, container);
        let along_hint = axis.along_of(container);
        let request = match cell {
            Some(cross) => FittingRequest::fixed_cross(axis, cross, along_hint),
            None => FittingRequest::natural(axis, available, along_hint),
        };

        let size = match item.size_policy(container) {
            SizeSpec::Explicit(size) => Self::reshape(axis, cell, available, size),
            SizeSpec::Autolayout => self.autolayout(item, request),
            SizeSpec::Relative => {
                let resolved = match self.delegate_size(item, at, container) {
                    Some(size) => size,
                    None => match fallback {
                        RelativeFallback::Fixed(size) => size,
                        RelativeFallback::Collapse => return axis.size(cell.unwrap_or(0.0), 0.0),
                        RelativeFallback::Template => {
                            self.checks.report(Violation::UnresolvedRelativeItem {
                                identifier: item.identifier().to_owned(),
                            });
                            self.autolayout(item, request)
                        }
                    },
                };
                Self::reshape(axis, cell, available, resolved)
            }
        };

        self.checked(item, size)
    }

    /// Measure with the item's template, reusing a remembered measurement
    /// when possible.
    fn autolayout(&mut self, item: &ItemRef, request: FittingRequest) -> Size {
        let cached = self
            .measurements
            .get(item.identifier())
            .filter(|hit| hit.request == request && hit.item.identical(item.as_ref()))
            .map(|hit| hit.size);
        if let Some(size) = cached {
            return size;
        }

        match self.templates.measure(item.as_ref(), &request) {
            Some(raw) => {
                let size = request.resolve(raw);
                self.measurements.insert(
                    item.identifier().to_owned(),
                    Measurement {
                        item: item.clone(),
                        request,
                        size,
                    },
                );
                size
            }
            None => {
                self.checks.report(Violation::MissingRenderer {
                    kind: item.kind().name(),
                });
                self.minimum_size()
            }
        }
    }

    /// Clamp degenerate sizes to the minimum dimension.
    fn checked(&self, item: &ItemRef, size: Size) -> Size {
        let degenerate = !(size.width > 0.0 && size.height > 0.0);
        if degenerate {
            self.checks.report(Violation::DegenerateSize {
                identifier: item.identifier().to_owned(),
                width: size.width,
                height: size.height,
            });
            return size.at_least(self.minimum_dimension);
        }
        size
    }
}

impl fmt::Debug for SizeController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SizeController")
            .field("templates", &self.templates)
            .field("measurements", &self.measurements.len())
            .field("has_delegate", &self.delegate.is_some())
            .field("minimum_dimension", &self.minimum_dimension)
            .finish()
    }
}
