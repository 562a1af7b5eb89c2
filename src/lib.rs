//! Builds egui user interfaces from declarative JSON layout documents.
//!
//! A layout names a canvas and a flat list of positioned components.
//! [`AutoGui`] parents each component to the container holding it, builds
//! one widget per component into a [`WidgetRegistry`], and hands out typed
//! accessors by component id.

pub mod accessor;
pub mod app;
pub mod config;
pub mod containment;
pub mod error;
pub mod factory;
pub mod layout;
pub mod raster;
pub mod registry;
mod render;
pub mod rescale;
pub mod widget;

pub use accessor::{
    Accessor, BaseAccess, BaseAccessor, ButtonAccessor, CheckAccessor, ProgressAccessor,
    RadioGroupAccessor, SelectAccessor, SliderAccessor, SpinnerAccessor, ToggleAccessor,
    ValueAccessor,
};
pub use app::AutoGui;
pub use config::{GuiConfig, LayoutMode};
pub use error::{BuildError, ConfigError, FontError, GuiError, GuiResult, LayoutError, RasterError};
pub use layout::{CanvasSpec, ComponentSpec, LayoutDocument};
pub use registry::{UiEvent, WidgetRef, WidgetRegistry, WindowAction};
pub use widget::{ComponentKind, Descriptor};
