//! Error types for layout loading, widget construction and accessor lookup.

use std::path::PathBuf;

use thiserror::Error;

use crate::widget::ComponentKind;

/// A layout document could not be loaded.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// The layout file is missing or unreadable
    #[error("Failed to read layout {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The layout is not valid JSON or does not match the document shape
    #[error("Malformed layout: {0}")]
    Json(#[from] serde_json::Error),
}

/// A single component could not be turned into a widget.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The component's `type` is not one the factory knows how to build
    #[error("Unsupported component type '{kind}' for '{id}'")]
    UnsupportedType { id: String, kind: String },

    /// A property is present but has the wrong shape
    #[error("Malformed property '{key}' on '{id}': {reason}")]
    MalformedProperty {
        id: String,
        key: String,
        reason: String,
    },
}

/// A font could not be registered or applied to a widget.
#[derive(Debug, Error, PartialEq)]
pub enum FontError {
    #[error("Font family '{0}' is not available")]
    UnknownFamily(String),

    #[error("Invalid font size {0}")]
    InvalidSize(f32),

    /// The bytes handed to `register_font` are not a TTF/OTF font
    #[error("Font '{name}' could not be parsed: {reason}")]
    InvalidFontData { name: String, reason: String },
}

/// Errors surfaced to callers of the runtime widget API.
#[derive(Debug, Error)]
pub enum GuiError {
    /// No component with this id exists in the current layout
    #[error("No component named '{0}'")]
    UnknownComponent(String),

    /// The component exists but does not offer the requested accessor
    #[error("Component '{id}' is a {actual:?}, not a {expected}")]
    WrongKind {
        id: String,
        expected: &'static str,
        actual: ComponentKind,
    },

    /// A widget reference was taken before the layout was rebuilt
    #[error("Widget reference '{id}' is from generation {held}, current is {current}")]
    StaleWidget { id: String, held: u64, current: u64 },

    #[error(transparent)]
    Layout(#[from] LayoutError),

    /// Window icon could not be loaded
    #[error("Failed to load icon {}: {source}", path.display())]
    Icon {
        path: PathBuf,
        #[source]
        source: RasterError,
    },
}

/// Result type alias for runtime widget operations
pub type GuiResult<T> = Result<T, GuiError>;

/// An embedded or on-disk image could not be turned into pixels.
#[derive(Debug, Error)]
pub enum RasterError {
    #[error("Invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Image decoding failed: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Image has no pixels")]
    Empty,
}

/// The configuration file could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed config: {0}")]
    Json(#[from] serde_json::Error),
}
