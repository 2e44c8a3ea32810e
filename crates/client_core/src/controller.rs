//! List controller: maps user actions onto remote calls and reloads the list
//! after every successful mutation.

use anyhow::Result;
use shared::domain::{Todo, TodoId, TodoPatch};
use tracing::{error, info};

use crate::{api::TodoApi, edit_surface::EditSurface, error::EditSurfaceError};

/// The title and description inputs of the "new todo" form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoForm {
    pub title: String,
    pub description: String,
}

impl TodoForm {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn clear(&mut self) {
        self.title.clear();
        self.description.clear();
    }
}

pub struct TodoListController<A, S> {
    api: A,
    surface: S,
    items: Option<Vec<Todo>>,
    selected: Todo,
}

impl<A: TodoApi, S: EditSurface> TodoListController<A, S> {
    pub fn new(api: A, surface: S) -> Self {
        Self {
            api,
            surface,
            items: None,
            selected: Todo::placeholder(),
        }
    }

    /// Items from the last successful list call; `None` before the first one.
    pub fn items(&self) -> Option<&[Todo]> {
        self.items.as_deref()
    }

    pub fn selected(&self) -> &Todo {
        &self.selected
    }

    pub fn selected_mut(&mut self) -> &mut Todo {
        &mut self.selected
    }

    pub fn find(&self, id: &TodoId) -> Option<&Todo> {
        self.items
            .as_deref()?
            .iter()
            .find(|todo| todo.id.as_ref() == Some(id))
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Replaces the in-memory list with whatever the remote returns.
    pub async fn initialize(&mut self) -> Result<()> {
        let todos = self.api.list().await?;
        self.items = Some(todos);
        Ok(())
    }

    /// Creates an item from the form. The form is cleared once the create
    /// succeeded, even when the reload that follows fails.
    pub async fn add(&mut self, form: &mut TodoForm) -> Result<()> {
        let todo = Todo::new(form.title.clone(), form.description.clone());
        let created = self.api.create(&todo).await?;
        info!(id = ?created.id, title = %created.title, "todo created");

        let reloaded = self.initialize().await;
        form.clear();
        reloaded
    }

    pub async fn remove(&mut self, id: &TodoId) -> Result<()> {
        self.api.delete(id).await?;
        info!(%id, "todo deleted");
        self.initialize().await
    }

    pub fn begin_edit(&mut self, todo: &Todo) {
        self.selected = todo.clone();
        if let Err(err) = self.surface.open(&self.selected) {
            log_surface_error(err);
        }
    }

    /// Abandons the current edit without touching the remote.
    pub fn cancel_edit(&mut self) {
        self.selected = Todo::placeholder();
        if let Err(err) = self.surface.close() {
            log_surface_error(err);
        }
    }

    /// Sends the whole selected item as an update. A selection without a
    /// persisted id is logged and dropped without any request.
    pub async fn commit_edit(&mut self) -> Result<()> {
        let Some(id) = self.selected.persisted_id().cloned() else {
            error!("todo id is undefined; edit not saved");
            return Ok(());
        };

        self.api
            .update(&id, &TodoPatch::from(&self.selected))
            .await?;
        info!(%id, "todo updated");

        let reloaded = self.initialize().await;
        if let Err(err) = self.surface.close() {
            log_surface_error(err);
        }
        reloaded
    }

    pub async fn toggle_complete(&mut self, todo: &Todo) -> Result<()> {
        let Some(id) = todo.persisted_id() else {
            error!(title = %todo.title, "non-existent todo; completion not toggled");
            return Ok(());
        };

        self.api
            .update(id, &TodoPatch::completed(!todo.completed))
            .await?;
        info!(%id, completed = !todo.completed, "todo completion toggled");
        self.initialize().await
    }
}

// UI housekeeping only; the remote call already went through.
fn log_surface_error(err: EditSurfaceError) {
    error!("{err}");
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
