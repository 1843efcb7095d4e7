//! Sections, their layout constraints and distribution policies.

use std::fmt;
use std::sync::Arc;

use strata_core::{Axis, Insets};

use super::item::{ItemModel, ItemRef};

/// How items in a section are arranged along the cross axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Distribution {
    /// Every item spans the full cross length and forms its own row.
    #[default]
    EntireRow,
    /// Rows of `n` equally wide cells.
    Equally(usize),
    /// Items take their natural cross length and pack greedily into rows.
    Proportional,
    /// Like `Proportional`, but a relative last item takes whatever is left
    /// of its row, or a full row when less than `minimum_width` remains.
    ProportionalFillLast {
        /// The least leftover cross length the last item accepts.
        minimum_width: f32,
    },
}

impl Distribution {
    /// Whether items are packed by their natural cross length.
    #[inline]
    pub fn is_proportional(&self) -> bool {
        matches!(self, Self::Proportional | Self::ProportionalFillLast { .. })
    }
}

/// Layout constraints of a section.
///
/// Spacing values are minimums in the spirit of flow layouts: the engine
/// never squeezes items closer than this.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constraints {
    /// Space around the section's items.
    pub insets: Insets,
    /// Space between rows.
    pub min_line_spacing: f32,
    /// Space between items in one row.
    pub min_interitem_spacing: f32,
    /// Cross-axis arrangement.
    pub distribution: Distribution,
    /// Scroll direction.
    pub axis: Axis,
}

impl Default for Constraints {
    fn default() -> Self {
        Self {
            insets: Insets::ZERO,
            min_line_spacing: 0.0,
            min_interitem_spacing: 0.0,
            distribution: Distribution::EntireRow,
            axis: Axis::Vertical,
        }
    }
}

impl Constraints {
    /// Create constraints with the given distribution and no spacing.
    pub fn new(distribution: Distribution) -> Self {
        Self {
            distribution,
            ..Self::default()
        }
    }

    /// Set the insets.
    pub fn with_insets(mut self, insets: Insets) -> Self {
        self.insets = insets;
        self
    }

    /// Set the line spacing.
    pub fn with_line_spacing(mut self, spacing: f32) -> Self {
        self.min_line_spacing = spacing;
        self
    }

    /// Set the interitem spacing.
    pub fn with_interitem_spacing(mut self, spacing: f32) -> Self {
        self.min_interitem_spacing = spacing;
        self
    }

    /// Set the scroll axis.
    pub fn with_axis(mut self, axis: Axis) -> Self {
        self.axis = axis;
        self
    }
}

/// An ordered group of items laid out together.
///
/// Equality covers the identifier, the constraints and the identities of the
/// header and footer. Item content never affects it; per-item changes are the
/// diff engine's business.
#[derive(Clone)]
pub struct Section {
    identifier: String,
    items: Vec<ItemRef>,
    constraints: Constraints,
    header: Option<ItemRef>,
    footer: Option<ItemRef>,
}

impl Section {
    /// Create an empty section with default constraints.
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            items: Vec::new(),
            constraints: Constraints::default(),
            header: None,
            footer: None,
        }
    }

    /// Append an item.
    pub fn with_item(mut self, item: impl ItemModel) -> Self {
        self.items.push(Arc::new(item));
        self
    }

    /// Append shared items.
    pub fn with_items(mut self, items: impl IntoIterator<Item = ItemRef>) -> Self {
        self.items.extend(items);
        self
    }

    /// Set the constraints.
    pub fn with_constraints(mut self, constraints: Constraints) -> Self {
        self.constraints = constraints;
        self
    }

    /// Set the header.
    pub fn with_header(mut self, header: impl ItemModel) -> Self {
        self.header = Some(Arc::new(header));
        self
    }

    /// Set the footer.
    pub fn with_footer(mut self, footer: impl ItemModel) -> Self {
        self.footer = Some(Arc::new(footer));
        self
    }

    /// The section identifier.
    #[inline]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// The items, in display order.
    #[inline]
    pub fn items(&self) -> &[ItemRef] {
        &self.items
    }

    /// The item at `index`, if any.
    #[inline]
    pub fn item(&self, index: usize) -> Option<&ItemRef> {
        self.items.get(index)
    }

    /// Number of items.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the section has no items.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The layout constraints.
    #[inline]
    pub fn constraints(&self) -> &Constraints {
        &self.constraints
    }

    /// The header model.
    #[inline]
    pub fn header(&self) -> Option<&ItemRef> {
        self.header.as_ref()
    }

    /// The footer model.
    #[inline]
    pub fn footer(&self) -> Option<&ItemRef> {
        self.footer.as_ref()
    }

    /// Position of the item with `identifier`.
    pub fn position_of(&self, identifier: &str) -> Option<usize> {
        self.items.iter().position(|item| item.identifier() == identifier)
    }

    /// A copy of this section with its item list replaced.
    pub(crate) fn with_replaced_items(&self, items: Vec<ItemRef>) -> Self {
        Self {
            items,
            ..self.clone()
        }
    }
}

fn same_identity(a: Option<&ItemRef>, b: Option<&ItemRef>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => a.identifier() == b.identifier(),
        _ => false,
    }
}

impl PartialEq for Section {
    fn eq(&self, other: &Self) -> bool {
        self.identifier == other.identifier
            && self.constraints == other.constraints
            && same_identity(self.header(), other.header())
            && same_identity(self.footer(), other.footer())
    }
}

impl fmt::Debug for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Section")
            .field("identifier", &self.identifier)
            .field("items", &self.items.len())
            .field("distribution", &self.constraints.distribution)
            .field("header", &self.header.as_ref().map(|h| h.identifier().to_owned()))
            .field("footer", &self.footer.as_ref().map(|f| f.identifier().to_owned()))
            .finish()
    }
}
