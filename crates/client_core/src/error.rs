use thiserror::Error;

/// Why the UI could not show or dismiss the edit surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EditSurfaceError {
    #[error("edit surface element not found")]
    ElementNotFound,
    #[error("edit surface instance not found")]
    InstanceNotFound,
}
