//! The applied list of sections.

use std::collections::HashSet;
use std::fmt::Write as _;
use std::ops::Index;

use strata_core::{Checks, TreeFormatOptions, Violation};

use super::index::IndexPath;
use super::item::{AsItemAny, ItemModel, ItemRef};
use super::section::Section;

/// An ordered list of sections.
///
/// Snapshots are replaced as a whole; the editing helpers here return new
/// snapshots and leave the receiver untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    sections: Vec<Section>,
}

impl Snapshot {
    /// Create a snapshot from sections.
    pub fn new(sections: Vec<Section>) -> Self {
        Self { sections }
    }

    /// The sections, in display order.
    #[inline]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// The section at `index`.
    #[inline]
    pub fn section(&self, index: usize) -> Option<&Section> {
        self.sections.get(index)
    }

    /// Number of sections.
    #[inline]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Whether there are no sections.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Total number of items across all sections.
    pub fn item_count(&self) -> usize {
        self.sections.iter().map(Section::len).sum()
    }

    /// The item at `at`.
    pub fn item(&self, at: IndexPath) -> Option<&ItemRef> {
        self.sections.get(at.section)?.item(at.item)
    }

    /// Locate the item with `identifier`.
    pub fn index_path_of(&self, identifier: &str) -> Option<IndexPath> {
        self.sections.iter().enumerate().find_map(|(section, s)| {
            s.position_of(identifier)
                .map(|item| IndexPath::new(section, item))
        })
    }

    /// Every item with its location, in display order.
    pub fn iter(&self) -> impl Iterator<Item = (IndexPath, &ItemRef)> + '_ {
        self.sections.iter().enumerate().flat_map(|(section, s)| {
            s.items()
                .iter()
                .enumerate()
                .map(move |(item, model)| (IndexPath::new(section, item), model))
        })
    }

    /// Consume the snapshot, returning its sections.
    pub fn into_sections(self) -> Vec<Section> {
        self.sections
    }

    /// A copy without the item at `at`.
    ///
    /// A section left empty by the removal is dropped. Returns `None` when
    /// nothing lives at `at`.
    pub fn without_item(&self, at: IndexPath) -> Option<Snapshot> {
        let section = self.sections.get(at.section)?;
        if at.item >= section.len() {
            return None;
        }

        let mut sections = self.sections.clone();
        if section.len() == 1 {
            sections.remove(at.section);
        } else {
            let mut items = section.items().to_vec();
            items.remove(at.item);
            sections[at.section] = section.with_replaced_items(items);
        }
        Some(Snapshot { sections })
    }

    /// A copy with the item at `from` moved to `to`.
    ///
    /// `to` addresses the item's final position. Sections are never dropped
    /// by a move, even when left empty. Returns `None` when either location
    /// is out of range.
    pub fn moving_item(&self, from: IndexPath, to: IndexPath) -> Option<Snapshot> {
        let moved = self.item(from)?.clone();
        if to.section >= self.sections.len() {
            return None;
        }

        let mut sections = self.sections.clone();
        let mut source = sections[from.section].items().to_vec();
        source.remove(from.item);
        sections[from.section] = sections[from.section].with_replaced_items(source);

        let mut target = sections[to.section].items().to_vec();
        if to.item > target.len() {
            return None;
        }
        target.insert(to.item, moved);
        sections[to.section] = sections[to.section].with_replaced_items(target);

        Some(Snapshot { sections })
    }

    /// Check identifier invariants, reporting every problem found.
    ///
    /// Section identifiers must be non-empty and unique. Item identifiers
    /// must be non-empty and unique across the whole snapshot. Returns `true`
    /// when nothing was reported. Does nothing when checks are disabled.
    pub fn validate(&self, checks: &Checks) -> bool {
        if !checks.enabled() {
            return true;
        }

        let mut valid = true;
        let mut section_ids = HashSet::with_capacity(self.sections.len());
        let mut item_ids = HashSet::with_capacity(self.item_count());
        let mut reported = HashSet::new();

        for section in &self.sections {
            if section.identifier().is_empty() || !section_ids.insert(section.identifier()) {
                valid = false;
                checks.report(Violation::DuplicateSection {
                    identifier: section.identifier().to_owned(),
                });
            }

            for (index, item) in section.items().iter().enumerate() {
                let identifier = item.identifier();
                if identifier.is_empty() {
                    valid = false;
                    checks.report(Violation::EmptyIdentifier {
                        section: section.identifier().to_owned(),
                        index,
                    });
                } else if !item_ids.insert(identifier) && reported.insert(identifier) {
                    valid = false;
                    checks.report(Violation::DuplicateIdentifier {
                        identifier: identifier.to_owned(),
                    });
                }
            }
        }

        valid
    }

    /// Render the snapshot as an indented tree.
    pub fn format_tree(&self, options: &TreeFormatOptions) -> String {
        let style = options.style;
        let mut out = format!("Snapshot ({} sections, {} items)\n", self.len(), self.item_count());

        for (section_index, section) in self.sections.iter().enumerate() {
            let last_section = section_index + 1 == self.sections.len();
            let (branch, indent) = if last_section {
                (style.last_branch(), "    ")
            } else {
                (style.branch(), style.continuation())
            };

            let _ = write!(out, "{branch}{} [{}]", section.identifier(), section.len());
            if options.show_constraints {
                let c = section.constraints();
                let _ = write!(
                    out,
                    " {:?} {:?} line={} interitem={}",
                    c.axis, c.distribution, c.min_line_spacing, c.min_interitem_spacing
                );
            }
            out.push('\n');

            let shown = options.max_items.unwrap_or(usize::MAX).min(section.len());
            let hidden = section.len() - shown;
            for (index, item) in section.items().iter().take(shown).enumerate() {
                let last_item = index + 1 == shown && hidden == 0;
                let item_branch = if last_item { style.last_branch() } else { style.branch() };
                let _ = write!(out, "{indent}{item_branch}{}", item.identifier());
                if options.show_kinds {
                    let _ = write!(out, " ({})", item.kind().short_name());
                }
                out.push('\n');
            }
            if hidden > 0 {
                let _ = writeln!(out, "{indent}{}... {hidden} more", style.last_branch());
            }
        }

        out
    }
}

impl From<Vec<Section>> for Snapshot {
    fn from(sections: Vec<Section>) -> Self {
        Self::new(sections)
    }
}

impl FromIterator<Section> for Snapshot {
    fn from_iter<I: IntoIterator<Item = Section>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl Index<usize> for Snapshot {
    type Output = Section;

    fn index(&self, index: usize) -> &Section {
        &self.sections[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::identical_by_eq;
    use parking_lot::Mutex;
    use std::sync::Arc;
    use strata_core::{CheckMode, TreeStyle};

    #[derive(Debug, PartialEq)]
    struct Row(&'static str);

    impl ItemModel for Row {
        fn identifier(&self) -> &str {
            self.0
        }

        fn identical(&self, other: &dyn ItemModel) -> bool {
            identical_by_eq(self, other)
        }
    }

    fn sample() -> Snapshot {
        Snapshot::new(vec![
            Section::new("top").with_item(Row("a")).with_item(Row("b")),
            Section::new("solo").with_item(Row("c")),
            Section::new("bottom").with_item(Row("d")).with_item(Row("e")),
        ])
    }

    fn collecting_checks() -> (Checks, Arc<Mutex<Vec<Violation>>>) {
        let checks = Checks::new(CheckMode::Log);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        checks.violations().connect(move |v| sink.lock().push(v.clone()));
        (checks, seen)
    }

    #[test]
    fn test_lookup() {
        let snapshot = sample();
        assert_eq!(snapshot.item_count(), 5);
        assert_eq!(snapshot.index_path_of("d"), Some(IndexPath::new(2, 0)));
        assert_eq!(snapshot.index_path_of("zz"), None);
        assert_eq!(
            snapshot.item(IndexPath::new(0, 1)).map(|i| i.identifier()),
            Some("b")
        );
        assert!(snapshot.item(IndexPath::new(1, 1)).is_none());

        let ids: Vec<_> = snapshot.iter().map(|(_, i)| i.identifier()).collect();
        assert_eq!(ids, ["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn test_without_item_keeps_populated_section() {
        let snapshot = sample();
        let next = snapshot.without_item(IndexPath::new(0, 0)).unwrap();
        assert_eq!(next.len(), 3);
        assert_eq!(next[0].len(), 1);
        assert_eq!(next.index_path_of("b"), Some(IndexPath::new(0, 0)));
        // Receiver untouched.
        assert_eq!(snapshot[0].len(), 2);
    }

    #[test]
    fn test_without_item_drops_emptied_section() {
        let next = sample().without_item(IndexPath::new(1, 0)).unwrap();
        assert_eq!(next.len(), 2);
        assert!(next.sections().iter().all(|s| s.identifier() != "solo"));
    }

    #[test]
    fn test_without_item_out_of_range() {
        assert!(sample().without_item(IndexPath::new(1, 1)).is_none());
        assert!(sample().without_item(IndexPath::new(7, 0)).is_none());
    }

    #[test]
    fn test_moving_item() {
        let snapshot = sample();
        let within = snapshot.moving_item(IndexPath::new(0, 0), IndexPath::new(0, 1)).unwrap();
        let ids: Vec<_> = within[0].items().iter().map(|i| i.identifier()).collect();
        assert_eq!(ids, ["b", "a"]);

        let across = snapshot.moving_item(IndexPath::new(1, 0), IndexPath::new(2, 2)).unwrap();
        assert!(across[1].is_empty());
        assert_eq!(across.index_path_of("c"), Some(IndexPath::new(2, 2)));

        assert!(snapshot.moving_item(IndexPath::new(0, 0), IndexPath::new(2, 5)).is_none());
        assert!(snapshot.moving_item(IndexPath::new(0, 9), IndexPath::new(0, 0)).is_none());
    }

    #[test]
    fn test_validate_accepts_unique() {
        let (checks, seen) = collecting_checks();
        assert!(sample().validate(&checks));
        assert!(seen.lock().is_empty());
    }

    #[test]
    fn test_validate_reports_duplicates_and_empty() {
        let (checks, seen) = collecting_checks();
        let snapshot = Snapshot::new(vec![
            Section::new("s").with_item(Row("a")).with_item(Row("")),
            Section::new("s").with_item(Row("a")).with_item(Row("a")),
        ]);

        assert!(!snapshot.validate(&checks));
        let seen = seen.lock();
        assert!(seen.contains(&Violation::DuplicateSection { identifier: "s".into() }));
        assert!(seen.contains(&Violation::EmptyIdentifier { section: "s".into(), index: 1 }));
        let duplicates = seen
            .iter()
            .filter(|v| matches!(v, Violation::DuplicateIdentifier { .. }))
            .count();
        assert_eq!(duplicates, 1);
    }

    #[test]
    fn test_validate_disabled_is_silent() {
        let checks = Checks::new(CheckMode::Disabled);
        let snapshot = Snapshot::new(vec![Section::new("").with_item(Row(""))]);
        assert!(snapshot.validate(&checks));
    }

    #[test]
    fn test_format_tree() {
        let options = TreeFormatOptions {
            style: TreeStyle::Ascii,
            max_items: Some(1),
            ..TreeFormatOptions::default()
        };
        let tree = sample().format_tree(&options);
        assert!(tree.starts_with("Snapshot (3 sections, 5 items)"));
        assert!(tree.contains("+-- top [2]"));
        assert!(tree.contains("a (Row)"));
        assert!(tree.contains("... 1 more"));
        assert!(tree.contains("`-- bottom [2]"));
    }
}
