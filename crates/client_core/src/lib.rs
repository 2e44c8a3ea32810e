//! Client side of the todo list: the HTTP access layer and the list
//! controller that drives it.

pub mod api;
pub mod controller;
pub mod edit_surface;
pub mod error;

pub use api::{HttpTodoApi, TodoApi};
pub use controller::{TodoForm, TodoListController};
pub use edit_surface::{EditSurface, HeadlessEditSurface};
pub use error::EditSurfaceError;
