//! Error types shared by the scene, focus and camera layers.
//!
//! Every variant here is recoverable: callers log it and skip the requested
//! operation, leaving state unchanged.

use crate::types::ViewMode;

/// Configuration and lifecycle errors raised by the core.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum OrreryError {
    /// A view-mode key that does not name a [`ViewMode`].
    #[error("unknown view mode \"{0}\"")]
    UnknownViewMode(String),

    /// The view mode is valid but no camera pose is registered for it.
    #[error("no viewpoint registered for view mode {0}")]
    MissingViewpoint(ViewMode),

    /// Body-name lookup miss.
    #[error("no body named \"{0}\"")]
    UnknownBody(String),

    /// Two bodies share a name.
    #[error("duplicate body name \"{0}\"")]
    DuplicateBody(String),

    /// `build` was called on a registry that is already built.
    #[error("scene registry has already been built")]
    AlreadyBuilt,

    /// The scene was released and accepts no further requests.
    #[error("scene has been disposed")]
    Disposed,
}
