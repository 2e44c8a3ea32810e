//! Terminal rendering of the todo list and the edit panel.

use std::io::{self, Write};

use client_core::{EditSurface, EditSurfaceError};
use shared::domain::Todo;

pub fn render_items(out: &mut impl Write, items: Option<&[Todo]>) -> io::Result<()> {
    let Some(items) = items else {
        return writeln!(out, "(list not loaded)");
    };
    if items.is_empty() {
        return writeln!(out, "no todos");
    }

    for todo in items {
        let mark = if todo.completed { 'x' } else { ' ' };
        let id = todo.id.as_ref().map(|id| id.as_str()).unwrap_or("-");
        if todo.description.is_empty() {
            writeln!(out, "[{mark}] {id}  {}", todo.title)?;
        } else {
            writeln!(out, "[{mark}] {id}  {} - {}", todo.title, todo.description)?;
        }
    }
    out.flush()
}

/// Edit panel printed inline; it only remembers whether it is showing.
pub struct TerminalEditSurface<W> {
    out: W,
    open: bool,
}

impl TerminalEditSurface<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalEditSurface<W> {
    pub fn new(out: W) -> Self {
        Self { out, open: false }
    }

    #[cfg(test)]
    pub fn is_open(&self) -> bool {
        self.open
    }

    #[cfg(test)]
    pub fn output(&self) -> &W {
        &self.out
    }
}

impl<W: Write + Send> EditSurface for TerminalEditSurface<W> {
    fn open(&mut self, todo: &Todo) -> Result<(), EditSurfaceError> {
        let id = todo.id.as_ref().map(|id| id.as_str()).unwrap_or("(unsaved)");
        writeln!(
            self.out,
            "editing {id}: title={:?} description={:?} completed={}",
            todo.title, todo.description, todo.completed
        )
        .map_err(|_| EditSurfaceError::ElementNotFound)?;
        self.open = true;
        Ok(())
    }

    fn close(&mut self) -> Result<(), EditSurfaceError> {
        if !self.open {
            return Err(EditSurfaceError::InstanceNotFound);
        }
        self.open = false;
        writeln!(self.out, "edit closed").map_err(|_| EditSurfaceError::ElementNotFound)
    }
}

#[cfg(test)]
mod tests {
    use shared::domain::TodoId;

    use super::*;

    fn rendered(items: Option<&[Todo]>) -> String {
        let mut out = Vec::new();
        render_items(&mut out, items).expect("render");
        String::from_utf8(out).expect("utf8")
    }

    #[test]
    fn renders_unloaded_and_empty_lists() {
        assert_eq!(rendered(None), "(list not loaded)\n");
        assert_eq!(rendered(Some(&[])), "no todos\n");
    }

    #[test]
    fn renders_completion_marks_in_remote_order() {
        let items = vec![
            Todo {
                id: Some(TodoId::from("2")),
                completed: true,
                ..Todo::new("Walk dog", "")
            },
            Todo {
                id: Some(TodoId::from("1")),
                ..Todo::new("Buy milk", "2%")
            },
        ];
        assert_eq!(
            rendered(Some(&items)),
            "[x] 2  Walk dog\n[ ] 1  Buy milk - 2%\n"
        );
    }

    #[test]
    fn close_without_open_reports_missing_instance() {
        let mut surface = TerminalEditSurface::new(Vec::new());
        assert_eq!(surface.close(), Err(EditSurfaceError::InstanceNotFound));

        surface
            .open(&Todo {
                id: Some(TodoId::from("7")),
                ..Todo::new("X", "")
            })
            .expect("open");
        assert!(surface.is_open());
        surface.close().expect("close");
        assert!(!surface.is_open());

        let printed = String::from_utf8(surface.output().clone()).expect("utf8");
        assert!(printed.starts_with("editing 7: title=\"X\""));
        assert!(printed.ends_with("edit closed\n"));
    }
}
