//! The renderer binding contract.

use std::any::Any;
use std::fmt;

use strata_core::{Axis, Size};

use crate::model::{AsItemAny, ItemKind, ItemModel};

/// Why a renderer is being bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindMode {
    /// The renderer is about to be shown. Side effects are allowed.
    Display,
    /// The renderer is a measurement template. Implementations must skip
    /// anything with side effects: network or image loads, subscriptions,
    /// timers.
    Sizing,
}

impl BindMode {
    /// Whether this bind is for measurement only.
    #[inline]
    pub fn is_sizing_only(self) -> bool {
        self == Self::Sizing
    }
}

/// Priority of one dimension in a fitting request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fitting {
    /// The dimension must equal the target.
    Required,
    /// The renderer picks the dimension, capped at the target.
    Flexible,
}

/// A request for a renderer's fitting size.
///
/// The along-axis dimension is always flexible and uncapped; the cross-axis
/// priority depends on the section's distribution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FittingRequest {
    /// Scroll direction of the section being measured.
    pub axis: Axis,
    /// Target size: the available cross length and the container's along
    /// length.
    pub target: Size,
    /// Priority of the cross-axis dimension.
    pub cross: Fitting,
}

impl FittingRequest {
    /// Cross length fixed at `cross`; the renderer chooses its along extent.
    pub fn fixed_cross(axis: Axis, cross: f32, along: f32) -> Self {
        Self {
            axis,
            target: axis.size(cross, along),
            cross: Fitting::Required,
        }
    }

    /// Natural size with the cross length capped at `max_cross`.
    pub fn natural(axis: Axis, max_cross: f32, along: f32) -> Self {
        Self {
            axis,
            target: axis.size(max_cross, along),
            cross: Fitting::Flexible,
        }
    }

    /// The target cross length.
    #[inline]
    pub fn cross_target(&self) -> f32 {
        self.axis.cross_of(self.target)
    }

    /// The target along length.
    #[inline]
    pub fn along_target(&self) -> f32 {
        self.axis.along_of(self.target)
    }

    /// Apply the request's priorities to a measured size.
    pub fn resolve(&self, measured: Size) -> Size {
        let cross = match self.cross {
            Fitting::Required => self.cross_target(),
            Fitting::Flexible => self.axis.cross_of(measured).min(self.cross_target()),
        };
        self.axis.size(cross, self.axis.along_of(measured))
    }
}

/// A view that renders one kind of item.
///
/// Hosts own display renderers; the size controller owns one template per
/// item kind and binds it with [`BindMode::Sizing`].
pub trait Renderer: 'static {
    /// The item model this renderer displays.
    type Item: ItemModel;

    /// Populate the renderer from an item.
    fn bind(&mut self, item: &Self::Item, mode: BindMode);

    /// Reset state before the renderer is bound to another item.
    fn prepare_for_reuse(&mut self) {}

    /// The renderer is about to become visible.
    fn will_display(&mut self) {}

    /// The renderer stopped being visible.
    fn did_end_displaying(&mut self) {}

    /// The size the bound content wants under `request`.
    fn fitting_size(&self, request: &FittingRequest) -> Size;
}

/// Object-safe form of [`Renderer`], used wherever the item kind is only
/// known at runtime.
pub trait AnyRenderer {
    /// The item kind this renderer accepts.
    fn item_kind(&self) -> ItemKind;

    /// Bind an item. Returns `false` if the item is of another kind.
    fn bind_item(&mut self, item: &dyn ItemModel, mode: BindMode) -> bool;

    /// See [`Renderer::prepare_for_reuse`].
    fn prepare_for_reuse(&mut self);

    /// See [`Renderer::will_display`].
    fn will_display(&mut self);

    /// See [`Renderer::did_end_displaying`].
    fn did_end_displaying(&mut self);

    /// See [`Renderer::fitting_size`].
    fn fitting_size(&self, request: &FittingRequest) -> Size;

    /// The concrete renderer, for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// The concrete renderer, for downcasting.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl dyn AnyRenderer + '_ {
    /// Downcast to a concrete renderer type.
    pub fn downcast_ref<R: Renderer>(&self) -> Option<&R> {
        self.as_any().downcast_ref::<R>()
    }

    /// Downcast to a concrete renderer type.
    pub fn downcast_mut<R: Renderer>(&mut self) -> Option<&mut R> {
        self.as_any_mut().downcast_mut::<R>()
    }
}

impl fmt::Debug for dyn AnyRenderer + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AnyRenderer({})", self.item_kind().short_name())
    }
}

/// Adapter that erases a [`Renderer`] into an [`AnyRenderer`].
#[derive(Debug, Default)]
pub struct TypedRenderer<R>(pub R);

impl<R: Renderer> TypedRenderer<R> {
    /// Box a renderer as an [`AnyRenderer`].
    pub fn boxed(renderer: R) -> Box<dyn AnyRenderer> {
        Box::new(Self(renderer))
    }
}

impl<R: Renderer> AnyRenderer for TypedRenderer<R> {
    fn item_kind(&self) -> ItemKind {
        ItemKind::of::<R::Item>()
    }

    fn bind_item(&mut self, item: &dyn ItemModel, mode: BindMode) -> bool {
        match item.as_any().downcast_ref::<R::Item>() {
            Some(item) => {
                self.0.bind(item, mode);
                true
            }
            None => false,
        }
    }

    fn prepare_for_reuse(&mut self) {
        self.0.prepare_for_reuse();
    }

    fn will_display(&mut self) {
        self.0.will_display();
    }

    fn did_end_displaying(&mut self) {
        self.0.did_end_displaying();
    }

    fn fitting_size(&self, request: &FittingRequest) -> Size {
        self.0.fitting_size(request)
    }

    fn as_any(&self) -> &dyn Any {
        &self.0
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        &mut self.0
    }
}
