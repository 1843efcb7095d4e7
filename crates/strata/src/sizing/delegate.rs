//! External size resolution for relative items.

use strata_core::Size;

use crate::model::{IndexPath, ItemModel};

/// Resolves sizes for items whose policy is
/// [`SizeSpec::Relative`](crate::model::SizeSpec::Relative).
///
/// Consulted only for relative items the fill-last rule does not cover.
/// Returning `None` leaves the item to the configured fallback.
///
/// Closures with the matching signature implement this trait:
///
/// ```
/// use strata::model::{IndexPath, ItemModel};
/// use strata::sizing::SizeDelegate;
/// use strata_core::Size;
///
/// let delegate = |_item: &dyn ItemModel, at: IndexPath, container: Size| {
///     (at.section == 0).then(|| Size::new(container.width, 120.0))
/// };
/// let _: &dyn SizeDelegate = &delegate;
/// ```
pub trait SizeDelegate {
    /// The size of `item` at `at` inside a container of `constrained_to`.
    fn size_for(&self, item: &dyn ItemModel, at: IndexPath, constrained_to: Size) -> Option<Size>;
}

impl<F> SizeDelegate for F
where
    F: Fn(&dyn ItemModel, IndexPath, Size) -> Option<Size>,
{
    fn size_for(&self, item: &dyn ItemModel, at: IndexPath, constrained_to: Size) -> Option<Size> {
        self(item, at, constrained_to)
    }
}
