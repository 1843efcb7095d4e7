//! Renderer binding.
//!
//! Renderers are the platform views that display items. The engine never
//! draws anything itself; it only needs renderers for two things:
//!
//! - **Measurement**: the size controller keeps one template renderer per
//!   item kind in a [`TemplateCache`], binds it with [`BindMode::Sizing`]
//!   and asks for its fitting size.
//! - **Notification**: the update controller rebinds visible renderers on
//!   reload and forwards display notifications to them.
//!
//! Renderers are registered per item kind in a [`RendererRegistry`].

mod registry;
mod renderer;
mod template;

pub use registry::RendererRegistry;
pub use renderer::{AnyRenderer, BindMode, Fitting, FittingRequest, Renderer, TypedRenderer};
pub use template::TemplateCache;
