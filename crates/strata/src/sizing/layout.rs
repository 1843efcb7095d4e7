//! Computed section geometry.

use strata_core::{Axis, Rect, Size};

/// Which supplementary view of a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Supplementary {
    /// Shown before the section's items.
    Header,
    /// Shown after the section's items.
    Footer,
}

/// Where a relative item gets its size when no delegate answers.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum RelativeFallback {
    /// Measure with the item's template and report it as unresolved.
    #[default]
    Template,
    /// Contribute nothing along the scroll axis. Used while measuring the
    /// space fillers may take.
    Collapse,
    /// A size computed elsewhere, such as a filler share.
    Fixed(Size),
}

/// Frames of one section, relative to the section's own origin.
///
/// The layout order along the scroll axis is: header, leading inset, rows,
/// trailing inset, footer.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SectionLayout {
    /// Header frame.
    pub header: Option<Rect>,
    /// Item frames, in item order.
    pub items: Vec<Rect>,
    /// Footer frame.
    pub footer: Option<Rect>,
    /// Total size of the section, equal to
    /// [`SizeController::size_of_section`](super::SizeController::size_of_section).
    pub size: Size,
}

impl SectionLayout {
    /// The same layout shifted `along` units down the scroll axis.
    pub fn translated(&self, axis: Axis, along: f32) -> Self {
        let (dx, dy) = match axis {
            Axis::Vertical => (0.0, along),
            Axis::Horizontal => (along, 0.0),
        };
        Self {
            header: self.header.map(|r| r.offset(dx, dy)),
            items: self.items.iter().map(|r| r.offset(dx, dy)).collect(),
            footer: self.footer.map(|r| r.offset(dx, dy)),
            size: self.size,
        }
    }

    /// Frame of the item at `index`.
    pub fn item(&self, index: usize) -> Option<Rect> {
        self.items.get(index).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translated() {
        let layout = SectionLayout {
            header: Some(Rect::new(0.0, 0.0, 100.0, 10.0)),
            items: vec![Rect::new(0.0, 10.0, 100.0, 20.0)],
            footer: None,
            size: Size::new(100.0, 30.0),
        };

        let moved = layout.translated(Axis::Vertical, 50.0);
        assert_eq!(moved.header, Some(Rect::new(0.0, 50.0, 100.0, 10.0)));
        assert_eq!(moved.item(0), Some(Rect::new(0.0, 60.0, 100.0, 20.0)));
        assert_eq!(moved.size, layout.size);

        let sideways = layout.translated(Axis::Horizontal, 5.0);
        assert_eq!(sideways.item(0), Some(Rect::new(5.0, 10.0, 100.0, 20.0)));
        assert!(sideways.item(1).is_none());
    }
}
