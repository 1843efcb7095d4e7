//! Item addressing.

use std::fmt;

/// The location of an item in a snapshot.
///
/// Ordered section-major, so sorting index paths gives display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct IndexPath {
    /// Section position.
    pub section: usize,
    /// Item position within the section.
    pub item: usize,
}

impl IndexPath {
    /// Create an index path.
    #[inline]
    pub const fn new(section: usize, item: usize) -> Self {
        Self { section, item }
    }

    /// An index path in the same section at a different item.
    #[inline]
    pub const fn with_item(self, item: usize) -> Self {
        Self {
            section: self.section,
            item,
        }
    }
}

impl From<(usize, usize)> for IndexPath {
    fn from((section, item): (usize, usize)) -> Self {
        Self { section, item }
    }
}

impl fmt::Display for IndexPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.section, self.item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_is_section_major() {
        let mut paths = vec![IndexPath::new(1, 0), IndexPath::new(0, 5), IndexPath::new(0, 1)];
        paths.sort();
        assert_eq!(paths, vec![IndexPath::new(0, 1), IndexPath::new(0, 5), IndexPath::new(1, 0)]);
    }

    #[test]
    fn test_display_and_sibling() {
        let path = IndexPath::from((2, 3));
        assert_eq!(path.to_string(), "[2, 3]");
        assert_eq!(path.with_item(0), IndexPath::new(2, 0));
    }
}
