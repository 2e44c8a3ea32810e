use std::{io, process::ExitCode};

use anyhow::Result;
use clap::{Parser, Subcommand};
use client_core::{EditSurface, HttpTodoApi, TodoApi, TodoForm, TodoListController};
use shared::domain::TodoId;
use tokio::io::BufReader;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod config;
mod events;
mod shell;
mod ui;

use config::load_settings;
use events::UiError;
use shell::{lookup_or_placeholder, run_shell};
use ui::{render_items, TerminalEditSurface};

#[derive(Parser, Debug)]
#[command(name = "todo", about = "Manage a remote todo list")]
struct Cli {
    /// Base URL of the todo collection, e.g. http://localhost:3000/api/todos
    #[arg(long, global = true)]
    api_url: Option<String>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show every todo
    List,
    /// Create a todo
    Add {
        title: String,
        #[arg(default_value = "")]
        description: String,
    },
    /// Delete a todo
    Remove { id: String },
    /// Flip a todo between done and not done
    Toggle { id: String },
    /// Change fields of a todo and save it
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        completed: Option<bool>,
    },
    /// Interactive session
    Shell,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = load_settings(cli.api_url.as_deref())?;
    info!(api_url = %settings.api_url, "using todo store");

    let mut controller = TodoListController::new(
        HttpTodoApi::new(settings.api_url),
        TerminalEditSurface::stdout(),
    );

    match run(cli.command.unwrap_or(Command::List), &mut controller).await {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) => Ok(report_failure(&err)),
    }
}

/// Logs a failed command once, with its classification, and picks the exit code.
fn report_failure(err: &anyhow::Error) -> ExitCode {
    let ui_error = UiError::from_error(err);
    error!(
        category = ?ui_error.category(),
        status = ?ui_error.status(),
        "{}",
        ui_error.message()
    );
    ExitCode::FAILURE
}

async fn run<A: TodoApi, S: EditSurface>(
    command: Command,
    controller: &mut TodoListController<A, S>,
) -> Result<()> {
    let mut out = io::stdout();

    match command {
        Command::List => controller.initialize().await?,
        Command::Add { title, description } => {
            let mut form = TodoForm::new(title, description);
            controller.add(&mut form).await?;
        }
        Command::Remove { id } => controller.remove(&TodoId::new(id)).await?,
        Command::Toggle { id } => {
            controller.initialize().await?;
            let todo = lookup_or_placeholder(controller, &TodoId::new(id));
            controller.toggle_complete(&todo).await?;
        }
        Command::Edit {
            id,
            title,
            description,
            completed,
        } => {
            controller.initialize().await?;
            let todo = lookup_or_placeholder(controller, &TodoId::new(id));
            controller.begin_edit(&todo);

            let selected = controller.selected_mut();
            if let Some(title) = title {
                selected.title = title;
            }
            if let Some(description) = description {
                selected.description = description;
            }
            if let Some(completed) = completed {
                selected.completed = completed;
            }
            controller.commit_edit().await?;
        }
        Command::Shell => {
            let input = BufReader::new(tokio::io::stdin());
            return run_shell(controller, input, &mut out).await;
        }
    }

    render_items(&mut out, controller.items())?;
    Ok(())
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
