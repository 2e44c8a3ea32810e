//! Interactive session keeping one controller, and its selection, alive.

use std::io::Write;

use anyhow::Result;
use client_core::{EditSurface, TodoApi, TodoForm, TodoListController};
use shared::domain::{Todo, TodoId};
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

use crate::{events::UiError, ui::render_items};

const HELP: &str = "\
commands:
  list                          reload and show the list
  add <title> [| <description>] create a todo
  rm <id>                       delete a todo
  toggle <id>                   flip completion
  edit <id>                     select a todo for editing
  title <text>                  set the selected title
  desc <text>                   set the selected description
  save                          send the selected todo
  cancel                        drop the selection
  help                          show this text
  quit                          leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    List,
    Add { title: String, description: String },
    Remove(TodoId),
    Toggle(TodoId),
    Edit(TodoId),
    Title(String),
    Description(String),
    Save,
    Cancel,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShellParseError {
    #[error("unknown command '{0}' (try 'help')")]
    UnknownCommand(String),
    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),
}

impl ShellCommand {
    /// Parses one input line; blank lines yield `None`.
    pub fn parse(line: &str) -> Result<Option<Self>, ShellParseError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let id_arg = |name: &'static str| {
            if rest.is_empty() {
                Err(ShellParseError::MissingArgument(name))
            } else {
                Ok(TodoId::new(rest))
            }
        };

        let command = match word {
            "list" | "ls" => Self::List,
            // Empty titles are allowed; the store decides what to accept.
            "add" => {
                let (title, description) = rest.split_once('|').unwrap_or((rest, ""));
                Self::Add {
                    title: title.trim().to_string(),
                    description: description.trim().to_string(),
                }
            }
            "rm" | "remove" => Self::Remove(id_arg("rm")?),
            "toggle" => Self::Toggle(id_arg("toggle")?),
            "edit" => Self::Edit(id_arg("edit")?),
            "title" => Self::Title(rest.to_string()),
            "desc" => Self::Description(rest.to_string()),
            "save" => Self::Save,
            "cancel" => Self::Cancel,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => return Err(ShellParseError::UnknownCommand(other.to_string())),
        };
        Ok(Some(command))
    }
}

/// The loaded item with `id`, or the id-less placeholder so the controller's
/// guards reject it.
pub fn lookup_or_placeholder<A: TodoApi, S: EditSurface>(
    controller: &TodoListController<A, S>,
    id: &TodoId,
) -> Todo {
    controller
        .find(id)
        .cloned()
        .unwrap_or_else(Todo::placeholder)
}

pub async fn run_shell<A, S, R, W>(
    controller: &mut TodoListController<A, S>,
    input: R,
    out: &mut W,
) -> Result<()>
where
    A: TodoApi,
    S: EditSurface,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut form = TodoForm::default();
    let mut lines = input.lines();

    match controller.initialize().await {
        Ok(()) => render_items(out, controller.items())?,
        Err(err) => writeln!(out, "{}", UiError::from_error(&err).message())?,
    }

    loop {
        write!(out, "todo> ")?;
        out.flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };

        let command = match ShellCommand::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                writeln!(out, "{err}")?;
                continue;
            }
        };
        debug!(?command, "shell command");

        let outcome = match command {
            ShellCommand::Quit => break,
            ShellCommand::Help => {
                writeln!(out, "{HELP}")?;
                continue;
            }
            ShellCommand::Title(title) => {
                controller.selected_mut().title = title;
                continue;
            }
            ShellCommand::Description(description) => {
                controller.selected_mut().description = description;
                continue;
            }
            ShellCommand::Cancel => {
                controller.cancel_edit();
                continue;
            }
            ShellCommand::Edit(id) => {
                let todo = lookup_or_placeholder(controller, &id);
                controller.begin_edit(&todo);
                continue;
            }
            ShellCommand::List => controller.initialize().await,
            ShellCommand::Add { title, description } => {
                form.title = title;
                form.description = description;
                controller.add(&mut form).await
            }
            ShellCommand::Remove(id) => controller.remove(&id).await,
            ShellCommand::Toggle(id) => {
                let todo = lookup_or_placeholder(controller, &id);
                controller.toggle_complete(&todo).await
            }
            ShellCommand::Save => controller.commit_edit().await,
        };

        match outcome {
            Ok(()) => render_items(out, controller.items())?,
            Err(err) => writeln!(out, "{}", UiError::from_error(&err).message())?,
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "tests/shell_tests.rs"]
mod tests;
