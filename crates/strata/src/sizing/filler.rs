//! Equal division of left-over space among relative items.

use strata_core::logging::{span_names, targets};
use strata_core::{Axis, PerfSpan, Size};

use super::controller::SizeController;
use super::layout::RelativeFallback;
use crate::model::{IndexPath, ItemModel, Snapshot};

/// The outcome of a filler pass for one container size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FillerResolution {
    /// The container the pass ran against.
    pub container: Size,
    /// Along extent used by everything except the fillers.
    pub used: f32,
    /// Along extent left for fillers, never negative.
    pub free: f32,
    /// Number of filler items sharing `free`.
    pub count: usize,
    /// The size each filler receives.
    pub size: Size,
}

/// Divides the space left over along the scroll axis equally among relative
/// items.
///
/// A filler is a relative item that is neither the last cell of a
/// fill-last section nor answered by the size delegate. Each filler gets the
/// full container cross length and `max(minimum, free / count)` along the
/// scroll axis.
#[derive(Debug, Clone, Copy, Default)]
pub struct FillerSizing;

impl FillerSizing {
    /// Measure `snapshot` inside `container` and share out the free space.
    ///
    /// The scroll axis is taken from the first section. With no fillers the
    /// resolution carries a minimal size.
    pub fn resolve(sizes: &mut SizeController, snapshot: &Snapshot, container: Size) -> FillerResolution {
        let _span = PerfSpan::new(span_names::RESOLVE_FILLERS);
        let axis = snapshot_axis(snapshot);
        let minimum = sizes.minimum_dimension();

        let used: f32 = snapshot
            .sections()
            .iter()
            .enumerate()
            .map(|(index, section)| {
                axis.along_of(sizes.size_of_section_with(section, index, container, RelativeFallback::Collapse))
            })
            .sum();
        let free = (axis.along_of(container) - used).max(0.0);
        let count = Self::count(sizes, snapshot, container);

        let size = if count == 0 {
            Size::new(minimum, minimum)
        } else {
            axis.size(axis.cross_of(container), (free / count as f32).max(minimum))
        };

        tracing::debug!(
            target: targets::SIZING,
            used,
            free,
            count,
            along = axis.along_of(size),
            "fillers resolved"
        );

        FillerResolution {
            container,
            used,
            free,
            count,
            size,
        }
    }

    /// Number of relative items that would take a filler share.
    pub fn count(sizes: &SizeController, snapshot: &Snapshot, container: Size) -> usize {
        snapshot
            .sections()
            .iter()
            .enumerate()
            .map(|(section_index, section)| {
                section
                    .items()
                    .iter()
                    .enumerate()
                    .filter(|(index, item)| {
                        item.size_policy(container).is_relative()
                            && !sizes.is_fill_last_cell(section, *index, container)
                            && sizes
                                .delegate_size(item, IndexPath::new(section_index, *index), container)
                                .is_none()
                    })
                    .count()
            })
            .sum()
    }
}

/// The scroll axis a snapshot's fillers are resolved along.
pub(crate) fn snapshot_axis(snapshot: &Snapshot) -> Axis {
    snapshot
        .section(0)
        .map(|section| section.constraints().axis)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{identical_by_eq, Constraints, Distribution, Section, SizeSpec};
    use crate::render::RendererRegistry;
    use std::sync::Arc;
    use strata_core::EngineConfig;

    #[derive(Debug, PartialEq)]
    struct Block(&'static str, f32);

    impl ItemModel for Block {
        fn identifier(&self) -> &str {
            self.0
        }

        fn identical(&self, other: &dyn ItemModel) -> bool {
            identical_by_eq(self, other)
        }

        fn size_policy(&self, _container: Size) -> SizeSpec {
            SizeSpec::explicit(10.0, self.1)
        }
    }

    #[derive(Debug, PartialEq)]
    struct Spacer(&'static str);

    impl ItemModel for Spacer {
        fn identifier(&self) -> &str {
            self.0
        }

        fn identical(&self, other: &dyn ItemModel) -> bool {
            identical_by_eq(self, other)
        }

        fn size_policy(&self, _container: Size) -> SizeSpec {
            SizeSpec::Relative
        }
    }

    fn controller() -> SizeController {
        SizeController::new(Arc::new(RendererRegistry::new()), &EngineConfig::default())
    }

    #[test]
    fn test_divides_free_space() {
        let snapshot = Snapshot::new(vec![
            Section::new("a").with_item(Block("a1", 100.0)).with_item(Spacer("f1")),
            Section::new("b").with_item(Block("b1", 200.0)).with_item(Spacer("f2")),
        ]);

        let mut sizes = controller();
        let resolution = FillerSizing::resolve(&mut sizes, &snapshot, Size::new(320.0, 500.0));
        assert_eq!(resolution.used, 300.0);
        assert_eq!(resolution.free, 200.0);
        assert_eq!(resolution.count, 2);
        assert_eq!(resolution.size, Size::new(320.0, 100.0));
    }

    #[test]
    fn test_overfull_container_gives_minimum() {
        let snapshot = Snapshot::new(vec![Section::new("a")
            .with_item(Block("a1", 900.0))
            .with_item(Spacer("f"))]);

        let mut sizes = controller();
        let resolution = FillerSizing::resolve(&mut sizes, &snapshot, Size::new(320.0, 500.0));
        assert_eq!(resolution.free, 0.0);
        assert_eq!(resolution.size, Size::new(320.0, 1.0));
    }

    #[test]
    fn test_no_fillers() {
        let snapshot = Snapshot::new(vec![Section::new("a").with_item(Block("a1", 100.0))]);
        let mut sizes = controller();
        let resolution = FillerSizing::resolve(&mut sizes, &snapshot, Size::new(320.0, 500.0));
        assert_eq!(resolution.count, 0);
        assert_eq!(resolution.size, Size::new(1.0, 1.0));

        let empty = FillerSizing::resolve(&mut sizes, &Snapshot::default(), Size::new(320.0, 500.0));
        assert_eq!(empty.used, 0.0);
        assert_eq!(empty.count, 0);
    }

    #[test]
    fn test_fill_last_cells_and_delegated_items_are_not_fillers() {
        let fill_last = Constraints::new(Distribution::ProportionalFillLast { minimum_width: 50.0 });
        let snapshot = Snapshot::new(vec![
            Section::new("row")
                .with_constraints(fill_last)
                .with_item(Block("a", 40.0))
                .with_item(Spacer("last")),
            Section::new("list").with_item(Spacer("delegated")).with_item(Spacer("free")),
        ]);

        let mut sizes = controller();
        sizes.set_size_delegate(Some(Box::new(
            |item: &dyn ItemModel, _at: IndexPath, _container: Size| {
                (item.identifier() == "delegated").then(|| Size::new(320.0, 60.0))
            },
        )));

        assert_eq!(FillerSizing::count(&sizes, &snapshot, Size::new(320.0, 500.0)), 1);
    }
}
