//! Error types for the chip container.

use std::fmt;
use std::path::PathBuf;

/// Result type alias for chipflow operations.
pub type Result<T> = std::result::Result<T, ChipError>;

/// The kind of resource an opaque id refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// A node template.
    Layout,
    /// A background drawable.
    Drawable,
    /// A color.
    Color,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Layout => "layout",
            Self::Drawable => "drawable",
            Self::Color => "color",
        })
    }
}

/// Errors that can occur while building or configuring a chip view.
#[derive(Debug, thiserror::Error)]
pub enum ChipError {
    /// An override id did not resolve to a resource.
    #[error("no {kind} resource with id {id}")]
    ResourceResolution { kind: ResourceKind, id: u32 },

    /// Configuration could not be parsed.
    #[error("invalid chip view configuration: {source}")]
    Config {
        path: Option<PathBuf>,
        #[source]
        source: toml::de::Error,
    },

    /// Configuration could not be serialized.
    #[error("failed to serialize chip view configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// File I/O error.
    #[error("failed to access configuration '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ChipError {
    /// Create a resource resolution error.
    pub fn unresolved(kind: ResourceKind, id: u32) -> Self {
        Self::ResourceResolution { kind, id }
    }

    /// Create a configuration parse error.
    pub fn config(path: Option<PathBuf>, source: toml::de::Error) -> Self {
        Self::Config { path, source }
    }

    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this error came from resource lookup during a refresh.
    pub fn is_resource_error(&self) -> bool {
        matches!(self, Self::ResourceResolution { .. })
    }
}
