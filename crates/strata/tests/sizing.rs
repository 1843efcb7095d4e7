//! Size controller integration tests.
//!
//! Exercises the public sizing surface: configuration loading, the four
//! distributions and section frame layout.

use std::sync::Arc;

use strata::model::{identical_by_eq, Constraints, Distribution, IndexPath, ItemModel, Section, SizeSpec};
use strata::render::{BindMode, FittingRequest, Renderer, RendererRegistry};
use strata::sizing::SizeController;
use strata_core::logging::targets;
use strata_core::{Axis, CheckMode, EngineConfig, Insets, Rect, Size};

#[derive(Debug, PartialEq)]
struct Chip {
    id: String,
    width: f32,
    height: f32,
}

impl ItemModel for Chip {
    fn identifier(&self) -> &str {
        &self.id
    }

    fn identical(&self, other: &dyn ItemModel) -> bool {
        identical_by_eq(self, other)
    }

    fn size_policy(&self, _container: Size) -> SizeSpec {
        SizeSpec::explicit(self.width, self.height)
    }
}

fn chip(id: impl Into<String>, width: f32, height: f32) -> Chip {
    Chip {
        id: id.into(),
        width,
        height,
    }
}

#[derive(Debug, PartialEq)]
struct SearchField(&'static str);

impl ItemModel for SearchField {
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

#[derive(Default)]
struct SearchFieldRenderer;

impl Renderer for SearchFieldRenderer {
    type Item = SearchField;

    fn bind(&mut self, _item: &SearchField, mode: BindMode) {
        assert_eq!(mode, BindMode::Sizing);
    }

    fn fitting_size(&self, request: &FittingRequest) -> Size {
        request.axis.size(request.cross_target(), 36.0)
    }
}

fn controller() -> SizeController {
    let config = EngineConfig::from_toml_str(
        r#"
        checks = "log"
        minimum_dimension = 1.0
        "#,
    )
    .expect("valid config");
    assert_eq!(config.checks, CheckMode::Log);

    let registry = RendererRegistry::new().with::<SearchFieldRenderer>();
    SizeController::new(Arc::new(registry), &config)
}

fn uniform(id: &str, distribution: Distribution, count: usize, height: f32) -> Section {
    (0..count).fold(
        Section::new(id).with_constraints(Constraints::new(distribution)),
        |section, i| section.with_item(chip(format!("{id}-{i}"), 10.0, height)),
    )
}

#[test]
fn test_grid_and_list_lengths() {
    let mut sizes = controller();
    let container = Size::new(300.0, 800.0);

    let grid = uniform("grid", Distribution::Equally(3), 19, 100.0);
    assert_eq!(sizes.size_of_section(&grid, 0, container).height, 700.0);

    let list = uniform("list", Distribution::EntireRow, 19, 100.0);
    assert_eq!(sizes.size_of_section(&list, 1, container).height, 1900.0);
}

#[test]
fn test_filter_bar_fill_last() {
    let mut sizes = controller();
    let container = Size::new(320.0, 600.0);
    let bar = Section::new("filters")
        .with_constraints(Constraints::new(Distribution::ProportionalFillLast {
            minimum_width: 120.0,
        }))
        .with_item(chip("all", 60.0, 36.0))
        .with_item(chip("unread", 80.0, 36.0))
        .with_item(SearchField("search"));

    // 320 - 60 - 80 leaves 180 for the search field on the same row.
    let field = sizes.size_of_item(&bar, IndexPath::new(0, 2), container);
    assert_eq!(field, Size::new(180.0, 36.0));
    assert_eq!(sizes.size_of_section(&bar, 0, container).height, 36.0);

    // Below the minimum the field wraps to a full-width row.
    let narrow = Size::new(250.0, 600.0);
    let field = sizes.size_of_item(&bar, IndexPath::new(0, 2), narrow);
    assert_eq!(field, Size::new(250.0, 36.0));
    assert_eq!(sizes.size_of_section(&bar, 0, narrow).height, 72.0);
}

fn fill_last_bar(chips: usize) -> Section {
    (0..chips)
        .fold(
            Section::new("bar").with_constraints(Constraints::new(Distribution::ProportionalFillLast {
                minimum_width: 100.0,
            })),
            |section, i| section.with_item(chip(format!("chip-{i}"), 100.0, 40.0)),
        )
        .with_item(SearchField("search"))
}

#[test]
fn test_fill_last_uses_leftover_of_the_last_packed_row() {
    let mut sizes = controller();
    let container = Size::new(200.0, 1000.0);

    // Three chips pack as [0 1] [2]; the field shares row two with chip 2.
    let bar = fill_last_bar(3);
    assert_eq!(sizes.size_of_item(&bar, IndexPath::new(0, 3), container), Size::new(100.0, 36.0));
    let layout = sizes.layout_section(&bar, 0, container);
    assert_eq!(layout.item(3), Some(Rect::new(100.0, 40.0, 100.0, 36.0)));
    assert_eq!(layout.size.height, 80.0);

    // Two chips fill row one exactly, so the field wraps at full width.
    let bar = fill_last_bar(2);
    assert_eq!(sizes.size_of_item(&bar, IndexPath::new(0, 2), container), Size::new(200.0, 36.0));
    let layout = sizes.layout_section(&bar, 0, container);
    assert_eq!(layout.item(2), Some(Rect::new(0.0, 40.0, 200.0, 36.0)));
    assert_eq!(layout.size.height, 76.0);
}

#[test]
fn test_layout_matches_section_size_for_every_distribution() {
    let container = Size::new(360.0, 640.0);
    let distributions = [
        Distribution::EntireRow,
        Distribution::Equally(4),
        Distribution::Proportional,
        Distribution::ProportionalFillLast { minimum_width: 50.0 },
    ];

    for distribution in distributions {
        let mut sizes = controller();
        let constraints = Constraints::new(distribution)
            .with_insets(Insets::new(8.0, 12.0, 8.0, 4.0))
            .with_line_spacing(6.0)
            .with_interitem_spacing(4.0);
        let section = (0..11)
            .fold(Section::new("s").with_constraints(constraints), |s, i| {
                s.with_item(chip(format!("c{i}"), 40.0 + 10.0 * i as f32, 20.0 + i as f32))
            })
            .with_header(chip("header", 360.0, 30.0));

        let size = sizes.size_of_section(&section, 0, container);
        let layout = sizes.layout_section(&section, 0, container);
        assert_eq!(layout.size, size, "{distribution:?}");
        assert_eq!(layout.items.len(), 11);
        assert!(
            layout.items.iter().all(|r| r.left() >= 8.0 && r.right() <= 352.0 + 1e-3),
            "{distribution:?} {:?}",
            layout.items
        );
        assert!(layout.items.iter().all(|r| r.top() >= 42.0), "{distribution:?}");
    }
}

#[test]
fn test_horizontal_carousel() {
    let mut sizes = controller();
    let container = Size::new(1000.0, 200.0);
    let carousel = Section::new("carousel")
        .with_constraints(Constraints::new(Distribution::EntireRow).with_axis(Axis::Horizontal))
        .with_item(chip("a", 150.0, 10.0))
        .with_item(chip("b", 120.0, 10.0));

    assert_eq!(
        sizes.size_of_item(&carousel, IndexPath::new(0, 0), container),
        Size::new(150.0, 200.0)
    );
    assert_eq!(sizes.size_of_section(&carousel, 0, container), Size::new(270.0, 200.0));
}

#[test]
fn test_sizing_emits_traces() {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(format!("{}=trace,{}=debug", targets::SIZING, targets::PERF))
        .with_test_writer()
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        let mut sizes = controller();
        let section = uniform("traced", Distribution::Equally(2), 3, 40.0);
        assert_eq!(sizes.size_of_section(&section, 0, Size::new(200.0, 400.0)).height, 80.0);
    });
}
