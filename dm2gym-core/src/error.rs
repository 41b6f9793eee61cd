//! Errors in the library.
use thiserror::Error;

/// Errors raised by dm2gym itself.
///
/// Errors of the wrapped simulator are not converted into this type;
/// they are passed to the caller as they are.
#[derive(Error, Debug, PartialEq)]
pub enum Dm2GymError {
    /// The space descriptor has no counterpart in the gym interface.
    #[error("Unsupported space kind: {0}")]
    UnsupportedSpaceKind(String),

    /// Bounds of a bounded descriptor can not be broadcast to its shape.
    #[error("Bounds of shape {found:?} do not match space shape {expected:?}")]
    BoundsShapeMismatch {
        /// Shape of the descriptor.
        expected: Vec<usize>,
        /// Shape of the bounds.
        found: Vec<usize>,
    },

    /// Render mode other than `human` or `rgb_array`.
    #[error("Unsupported render mode: {0}")]
    UnsupportedRenderMode(String),

    /// Viewer backend other than `gym` or `opencv`.
    #[error("Invalid viewer backend: {0}")]
    InvalidViewerBackend(String),

    /// The viewer backend can not be opened in this build.
    #[error("Viewer unavailable: {0}")]
    ViewerUnavailable(String),

    /// The environment was used after `close()`.
    #[error("Environment has been closed")]
    EnvClosed,

    /// No environment is registered with the id.
    #[error("Unknown environment id: {0}")]
    UnknownEnvId(String),

    /// An environment is already registered with the id.
    #[error("Environment id already registered: {0}")]
    DuplicateEnvId(String),
}
