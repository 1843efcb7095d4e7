//! Edit scripts between snapshots.

use std::collections::HashMap;

use crate::model::{IndexPath, ItemModel, ItemRef, Section};

/// The changes that turn one snapshot into another.
///
/// Old positions (`removes`, the source of `moves`) address the previous
/// snapshot; new positions (`inserts`, `reloads`, the target of `moves`)
/// address the next one. Items inside inserted or removed sections are
/// implied by the section change and not listed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditScript {
    /// New section positions.
    pub section_inserts: Vec<usize>,
    /// Old section positions.
    pub section_removes: Vec<usize>,
    /// Old to new section positions.
    pub section_moves: Vec<(usize, usize)>,
    /// New positions of surviving sections whose constraints or
    /// supplementary views changed.
    pub section_reloads: Vec<usize>,
    /// New item positions.
    pub item_inserts: Vec<IndexPath>,
    /// Old item positions.
    pub item_removes: Vec<IndexPath>,
    /// Old to new item positions.
    pub item_moves: Vec<(IndexPath, IndexPath)>,
    /// New positions of surviving items that are no longer `identical`.
    pub item_reloads: Vec<IndexPath>,
}

impl EditScript {
    /// Whether the script changes nothing.
    pub fn is_empty(&self) -> bool {
        self.change_count() == 0
    }

    /// Total number of section and item changes.
    pub fn change_count(&self) -> usize {
        self.section_inserts.len()
            + self.section_removes.len()
            + self.section_moves.len()
            + self.section_reloads.len()
            + self.item_inserts.len()
            + self.item_removes.len()
            + self.item_moves.len()
            + self.item_reloads.len()
    }
}

/// Computes edit scripts.
///
/// Implementations match items by identifier and decide rebinding with
/// [`ItemModel::identical`]. Two snapshots whose items are all identical to
/// their predecessors must produce an empty script.
pub trait DiffEngine {
    /// The edit script from `old` to `new`.
    fn diff(&self, old: &[Section], new: &[Section]) -> EditScript;
}

/// Keyed diff using longest increasing subsequences to keep moves minimal.
///
/// Sections are matched by identifier; items are matched by identifier across
/// the whole snapshot, so an item may move between surviving sections.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyedDiff;

impl DiffEngine for KeyedDiff {
    fn diff(&self, old: &[Section], new: &[Section]) -> EditScript {
        let mut script = EditScript::default();

        let old_sections = index_sections(old);
        let new_sections = index_sections(new);

        // Sections.
        script.section_removes = old
            .iter()
            .enumerate()
            .filter(|(_, s)| !new_sections.contains_key(s.identifier()))
            .map(|(i, _)| i)
            .collect();

        let mut survivors = Vec::new();
        for (j, section) in new.iter().enumerate() {
            match old_sections.get(section.identifier()) {
                Some(&i) => survivors.push((i, j)),
                None => script.section_inserts.push(j),
            }
        }

        let order: Vec<usize> = survivors.iter().map(|&(i, _)| i).collect();
        let stable = longest_increasing(&order);
        for (k, &(i, j)) in survivors.iter().enumerate() {
            if !stable[k] {
                script.section_moves.push((i, j));
            }
            if section_changed(&old[i], &new[j]) {
                script.section_reloads.push(j);
            }
        }

        // Items.
        let old_items = index_items(old);
        let new_items = index_items(new);
        let old_survives = |section: usize| new_sections.contains_key(old[section].identifier());
        let new_survives = |section: usize| old_sections.contains_key(new[section].identifier());

        for (identifier, &(at, _)) in &old_items {
            if !old_survives(at.section) {
                continue;
            }
            match new_items.get(identifier) {
                Some(&(to, _)) if new_survives(to.section) => {}
                _ => script.item_removes.push(at),
            }
        }

        for &(i, j) in &survivors {
            let mut stayed = Vec::new();
            for (index, item) in new[j].items().iter().enumerate() {
                let to = IndexPath::new(j, index);
                match old_items.get(item.identifier()) {
                    Some(&(from, previous)) if old_survives(from.section) => {
                        if !previous.identical(item.as_ref()) {
                            script.item_reloads.push(to);
                        }
                        if from.section == i {
                            stayed.push((from, to));
                        } else {
                            script.item_moves.push((from, to));
                        }
                    }
                    _ => script.item_inserts.push(to),
                }
            }

            let order: Vec<usize> = stayed.iter().map(|(from, _)| from.item).collect();
            let stable = longest_increasing(&order);
            script.item_moves.extend(
                stayed
                    .iter()
                    .zip(stable)
                    .filter(|(_, keep)| !keep)
                    .map(|(&pair, _)| pair),
            );
        }

        script.item_removes.sort();
        script.item_inserts.sort();
        script.item_reloads.sort();
        script.item_moves.sort();
        script
    }
}

fn index_sections(sections: &[Section]) -> HashMap<&str, usize> {
    sections
        .iter()
        .enumerate()
        .map(|(i, s)| (s.identifier(), i))
        .collect()
}

fn index_items(sections: &[Section]) -> HashMap<&str, (IndexPath, &ItemRef)> {
    sections
        .iter()
        .enumerate()
        .flat_map(|(section, s)| {
            s.items()
                .iter()
                .enumerate()
                .map(move |(item, model)| (model.identifier(), (IndexPath::new(section, item), model)))
        })
        .collect()
}

fn section_changed(old: &Section, new: &Section) -> bool {
    let content_changed = |a: Option<&ItemRef>, b: Option<&ItemRef>| match (a, b) {
        (Some(a), Some(b)) => !a.identical(b.as_ref()),
        _ => false,
    };
    old != new
        || content_changed(old.header(), new.header())
        || content_changed(old.footer(), new.footer())
}

/// Marks the members of one longest strictly increasing subsequence.
fn longest_increasing(seq: &[usize]) -> Vec<bool> {
    let mut tails: Vec<usize> = Vec::new();
    let mut previous: Vec<Option<usize>> = vec![None; seq.len()];

    for (i, &value) in seq.iter().enumerate() {
        let slot = tails.partition_point(|&t| seq[t] < value);
        if slot > 0 {
            previous[i] = Some(tails[slot - 1]);
        }
        if slot == tails.len() {
            tails.push(i);
        } else {
            tails[slot] = i;
        }
    }

    let mut keep = vec![false; seq.len()];
    let mut cursor = tails.last().copied();
    while let Some(i) = cursor {
        keep[i] = true;
        cursor = previous[i];
    }
    keep
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{identical_by_eq, Constraints, Distribution};

    #[derive(Debug, PartialEq)]
    struct Row(&'static str, u32);

    impl ItemModel for Row {
        fn identifier(&self) -> &str {
            self.0
        }

        fn identical(&self, other: &dyn ItemModel) -> bool {
            identical_by_eq(self, other)
        }
    }

    fn section(id: &'static str, rows: &[(&'static str, u32)]) -> Section {
        rows.iter()
            .fold(Section::new(id), |s, &(row, value)| s.with_item(Row(row, value)))
    }

    #[test]
    fn test_lis() {
        assert_eq!(longest_increasing(&[]), Vec::<bool>::new());
        assert_eq!(longest_increasing(&[0, 1, 2]), vec![true, true, true]);
        assert_eq!(longest_increasing(&[2, 0, 1]), vec![false, true, true]);
        assert_eq!(longest_increasing(&[3, 1, 2, 0]).iter().filter(|k| **k).count(), 2);
    }

    #[test]
    fn test_identical_snapshots_give_empty_script() {
        let old = vec![section("a", &[("x", 1), ("y", 2)]), section("b", &[("z", 3)])];
        let new = vec![section("a", &[("x", 1), ("y", 2)]), section("b", &[("z", 3)])];
        let script = KeyedDiff.diff(&old, &new);
        assert!(script.is_empty(), "{script:?}");
    }

    #[test]
    fn test_item_insert_remove_reload() {
        let old = vec![section("a", &[("x", 1), ("y", 2), ("z", 3)])];
        let new = vec![section("a", &[("x", 1), ("y", 20), ("w", 4)])];
        let script = KeyedDiff.diff(&old, &new);

        assert_eq!(script.item_removes, vec![IndexPath::new(0, 2)]);
        assert_eq!(script.item_inserts, vec![IndexPath::new(0, 2)]);
        assert_eq!(script.item_reloads, vec![IndexPath::new(0, 1)]);
        assert!(script.item_moves.is_empty());
        assert_eq!(script.change_count(), 3);
    }

    #[test]
    fn test_minimal_moves_within_section() {
        let old = vec![section("a", &[("a", 0), ("b", 0), ("c", 0), ("d", 0)])];
        let new = vec![section("a", &[("d", 0), ("a", 0), ("b", 0), ("c", 0)])];
        let script = KeyedDiff.diff(&old, &new);
        assert_eq!(script.item_moves, vec![(IndexPath::new(0, 3), IndexPath::new(0, 0))]);
        assert_eq!(script.change_count(), 1);
    }

    #[test]
    fn test_cross_section_move() {
        let old = vec![section("a", &[("x", 0), ("y", 0)]), section("b", &[("z", 0)])];
        let new = vec![section("a", &[("x", 0)]), section("b", &[("y", 0), ("z", 0)])];
        let script = KeyedDiff.diff(&old, &new);
        assert_eq!(script.item_moves, vec![(IndexPath::new(0, 1), IndexPath::new(1, 0))]);
        assert!(script.item_inserts.is_empty());
        assert!(script.item_removes.is_empty());
    }

    #[test]
    fn test_section_changes() {
        let old = vec![section("a", &[("x", 0)]), section("b", &[]), section("c", &[("y", 0)])];
        let new = vec![
            section("c", &[("y", 0)]),
            section("a", &[("x", 0)]).with_constraints(Constraints::new(Distribution::Equally(2))),
            section("d", &[("w", 0)]),
        ];
        let script = KeyedDiff.diff(&old, &new);

        assert_eq!(script.section_removes, vec![1]);
        assert_eq!(script.section_inserts, vec![2]);
        assert_eq!(script.section_moves.len(), 1);
        assert_eq!(script.section_reloads, vec![1]);
        // Items inside the inserted section are implied.
        assert!(script.item_inserts.is_empty());
        assert!(script.item_moves.is_empty());
    }

    #[test]
    fn test_header_content_change_reloads_section() {
        let old = vec![Section::new("a").with_header(Row("h", 1))];
        let new = vec![Section::new("a").with_header(Row("h", 2))];
        assert_eq!(KeyedDiff.diff(&old, &new).section_reloads, vec![0]);
    }

    #[test]
    fn test_item_leaving_removed_section_is_reinserted() {
        let old = vec![section("gone", &[("x", 0)]), section("kept", &[])];
        let new = vec![section("kept", &[("x", 0)])];
        let script = KeyedDiff.diff(&old, &new);
        assert_eq!(script.section_removes, vec![0]);
        assert_eq!(script.item_inserts, vec![IndexPath::new(0, 0)]);
        assert!(script.item_moves.is_empty());
    }

    #[test]
    fn test_item_entering_inserted_section_is_removed() {
        let old = vec![section("kept", &[("x", 0), ("y", 0)])];
        let new = vec![section("kept", &[("y", 0)]), section("new", &[("x", 0)])];
        let script = KeyedDiff.diff(&old, &new);
        assert_eq!(script.section_inserts, vec![1]);
        assert_eq!(script.item_removes, vec![IndexPath::new(0, 0)]);
        assert!(script.item_inserts.is_empty());
    }
}
