//! The item model trait and its identity contract.

use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use strata_core::Size;

/// Shared handle to an item model.
///
/// Snapshots are cheap to clone because they only clone these handles.
pub type ItemRef = Arc<dyn ItemModel>;

/// Strongly typed key for an item model's concrete type.
///
/// Renderers are registered against, and templates are cached by, this key.
#[derive(Clone, Copy)]
pub struct ItemKind {
    id: TypeId,
    name: &'static str,
}

impl ItemKind {
    /// The kind of item type `T`.
    pub fn of<T: 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// The fully qualified type name, for diagnostics.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The last path segment of the type name.
    pub fn short_name(&self) -> &'static str {
        self.name.rsplit("::").next().unwrap_or(self.name)
    }
}

impl PartialEq for ItemKind {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ItemKind {}

impl Hash for ItemKind {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ItemKind({})", self.name)
    }
}

/// How an item wants to be sized.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SizeSpec {
    /// Bind the item to its kind's template renderer and ask for the fitting
    /// size.
    #[default]
    Autolayout,
    /// A fixed size.
    Explicit(Size),
    /// Deferred: the last cell of a fill-last section, a size delegate, or
    /// the filler helper decides.
    Relative,
}

impl SizeSpec {
    /// Convenience constructor for an explicit size.
    pub fn explicit(width: f32, height: f32) -> Self {
        Self::Explicit(Size::new(width, height))
    }

    /// Whether this is [`SizeSpec::Relative`].
    #[inline]
    pub fn is_relative(&self) -> bool {
        matches!(self, Self::Relative)
    }
}

/// Type-erasure support for [`ItemModel`], implemented for every item type.
pub trait AsItemAny {
    /// Downcast support.
    fn as_any(&self) -> &dyn Any;

    /// The item's kind key.
    fn kind(&self) -> ItemKind;
}

impl<T: ItemModel> AsItemAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn kind(&self) -> ItemKind {
        ItemKind::of::<T>()
    }
}

/// One renderable unit in a list.
///
/// Item models are lightweight values built fresh for every snapshot. The
/// engine never mutates them and never compares them structurally: identity
/// comes from [`identifier`](Self::identifier) and content equality from
/// [`identical`](Self::identical).
///
/// # Example
///
/// ```
/// use strata::model::{identical_by_eq, ItemModel, SizeSpec};
/// use strata_core::Size;
///
/// #[derive(Debug, PartialEq)]
/// struct Title {
///     id: String,
///     text: String,
/// }
///
/// impl ItemModel for Title {
///     fn identifier(&self) -> &str {
///         &self.id
///     }
///
///     fn identical(&self, other: &dyn ItemModel) -> bool {
///         identical_by_eq(self, other)
///     }
///
///     fn size_policy(&self, container: Size) -> SizeSpec {
///         SizeSpec::explicit(container.width, 44.0)
///     }
/// }
/// ```
pub trait ItemModel: AsItemAny + Send + Sync + fmt::Debug + 'static {
    /// Stable identity across snapshots. Must be non-empty and unique within
    /// a snapshot.
    fn identifier(&self) -> &str;

    /// Content equality with another item.
    ///
    /// Must be reflexive and must return `false` for an item of another kind.
    fn identical(&self, other: &dyn ItemModel) -> bool;

    /// The sizing policy inside a container of the given size.
    fn size_policy(&self, _container: Size) -> SizeSpec {
        SizeSpec::Autolayout
    }
}

/// Implement [`ItemModel::identical`] through `PartialEq`.
///
/// Returns `false` when `other` is a different concrete type.
pub fn identical_by_eq<T>(this: &T, other: &dyn ItemModel) -> bool
where
    T: ItemModel + PartialEq,
{
    other
        .as_any()
        .downcast_ref::<T>()
        .is_some_and(|other| this == other)
}

/// Build an [`ItemRef`] from an item value.
pub fn item<T: ItemModel>(value: T) -> ItemRef {
    Arc::new(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Label {
        id: &'static str,
        text: &'static str,
    }

    impl ItemModel for Label {
        fn identifier(&self) -> &str {
            self.id
        }

        fn identical(&self, other: &dyn ItemModel) -> bool {
            identical_by_eq(self, other)
        }
    }

    #[derive(Debug, PartialEq)]
    struct Spacer {
        id: &'static str,
    }

    impl ItemModel for Spacer {
        fn identifier(&self) -> &str {
            self.id
        }

        fn identical(&self, other: &dyn ItemModel) -> bool {
            identical_by_eq(self, other)
        }

        fn size_policy(&self, _container: Size) -> SizeSpec {
            SizeSpec::Relative
        }
    }

    #[test]
    fn test_identical_is_reflexive() {
        let a = item(Label { id: "a", text: "hello" });
        assert!(a.identical(a.as_ref()));
    }

    #[test]
    fn test_identical_compares_content() {
        let a = Label { id: "a", text: "hello" };
        let b = Label { id: "a", text: "bye" };
        assert!(!a.identical(&b));
        assert!(a.identical(&Label { id: "a", text: "hello" }));
    }

    #[test]
    fn test_identical_rejects_other_kind() {
        let label = Label { id: "x", text: "" };
        let spacer = Spacer { id: "x" };
        assert!(!label.identical(&spacer));
        assert!(!spacer.identical(&label));
    }

    #[test]
    fn test_item_kind() {
        let label: ItemRef = item(Label { id: "a", text: "" });
        let spacer: ItemRef = item(Spacer { id: "b" });
        assert_eq!(label.kind(), ItemKind::of::<Label>());
        assert_ne!(label.kind(), spacer.kind());
        assert_eq!(spacer.kind().short_name(), "Spacer");
    }

    #[test]
    fn test_size_policy_default() {
        let label = Label { id: "a", text: "" };
        assert_eq!(label.size_policy(Size::ZERO), SizeSpec::Autolayout);
        assert!(Spacer { id: "s" }.size_policy(Size::ZERO).is_relative());
    }
}
