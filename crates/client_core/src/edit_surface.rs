//! Seam between the list controller and whatever UI presents the edit form.

use shared::domain::Todo;

use crate::error::EditSurfaceError;

pub trait EditSurface: Send {
    /// Present the edit form populated from `todo`.
    fn open(&mut self, todo: &Todo) -> Result<(), EditSurfaceError>;
    /// Dismiss the edit form.
    fn close(&mut self) -> Result<(), EditSurfaceError>;
}

/// Surface for callers that have nothing to show, e.g. scripted use.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeadlessEditSurface;

impl EditSurface for HeadlessEditSurface {
    fn open(&mut self, _todo: &Todo) -> Result<(), EditSurfaceError> {
        Ok(())
    }

    fn close(&mut self) -> Result<(), EditSurfaceError> {
        Ok(())
    }
}
