use super::*;

use anyhow::anyhow;
use async_trait::async_trait;
use client_core::HeadlessEditSurface;
use shared::domain::TodoPatch;
use tokio::sync::Mutex;

use crate::ui::TerminalEditSurface;

/// In-memory store assigning sequential ids.
#[derive(Default)]
struct MemoryApi {
    todos: Mutex<Vec<Todo>>,
    updates: Mutex<Vec<(TodoId, TodoPatch)>>,
}

#[async_trait]
impl TodoApi for MemoryApi {
    async fn list(&self) -> Result<Vec<Todo>> {
        Ok(self.todos.lock().await.clone())
    }

    async fn create(&self, todo: &Todo) -> Result<Todo> {
        let mut todos = self.todos.lock().await;
        let created = Todo {
            id: Some(TodoId::new((todos.len() + 1).to_string())),
            ..todo.clone()
        };
        todos.push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: &TodoId, patch: &TodoPatch) -> Result<Todo> {
        self.updates.lock().await.push((id.clone(), patch.clone()));
        let mut todos = self.todos.lock().await;
        let todo = todos
            .iter_mut()
            .find(|todo| todo.id.as_ref() == Some(id))
            .ok_or_else(|| anyhow!("update todo rejected by server: 404 for {id}"))?;
        if let Some(title) = &patch.title {
            todo.title = title.clone();
        }
        if let Some(description) = &patch.description {
            todo.description = description.clone();
        }
        if let Some(completed) = patch.completed {
            todo.completed = completed;
        }
        Ok(todo.clone())
    }

    async fn delete(&self, id: &TodoId) -> Result<Option<Todo>> {
        let mut todos = self.todos.lock().await;
        let index = todos
            .iter()
            .position(|todo| todo.id.as_ref() == Some(id))
            .ok_or_else(|| anyhow!("delete todo rejected by server: 404 for {id}"))?;
        Ok(Some(todos.remove(index)))
    }
}

async fn run_script(
    controller: &mut TodoListController<MemoryApi, TerminalEditSurface<Vec<u8>>>,
    script: &str,
) -> String {
    let mut out = Vec::new();
    run_shell(controller, script.as_bytes(), &mut out)
        .await
        .expect("shell");
    String::from_utf8(out).expect("utf8")
}

#[test]
fn parses_commands_and_arguments() {
    assert_eq!(ShellCommand::parse("   "), Ok(None));
    assert_eq!(ShellCommand::parse("ls"), Ok(Some(ShellCommand::List)));
    assert_eq!(
        ShellCommand::parse("add Buy milk | 2%"),
        Ok(Some(ShellCommand::Add {
            title: "Buy milk".into(),
            description: "2%".into(),
        }))
    );
    assert_eq!(
        ShellCommand::parse("add"),
        Ok(Some(ShellCommand::Add {
            title: String::new(),
            description: String::new(),
        }))
    );
    assert_eq!(
        ShellCommand::parse("rm 42"),
        Ok(Some(ShellCommand::Remove(TodoId::from("42"))))
    );
    assert_eq!(
        ShellCommand::parse("title  Buy oat milk "),
        Ok(Some(ShellCommand::Title("Buy oat milk".into())))
    );
    assert_eq!(ShellCommand::parse("exit"), Ok(Some(ShellCommand::Quit)));
}

#[test]
fn rejects_unknown_commands_and_missing_ids() {
    assert_eq!(
        ShellCommand::parse("frobnicate 3"),
        Err(ShellParseError::UnknownCommand("frobnicate".into()))
    );
    assert_eq!(
        ShellCommand::parse("toggle"),
        Err(ShellParseError::MissingArgument("toggle"))
    );
}

#[tokio::test]
async fn lookup_falls_back_to_placeholder() {
    let mut controller = TodoListController::new(MemoryApi::default(), HeadlessEditSurface);
    let mut form = TodoForm::new("a", "");
    controller.add(&mut form).await.expect("add");

    assert_eq!(
        lookup_or_placeholder(&controller, &TodoId::from("1")).title,
        "a"
    );
    assert_eq!(
        lookup_or_placeholder(&controller, &TodoId::from("9")),
        Todo::placeholder()
    );
}

#[tokio::test]
async fn session_adds_toggles_edits_and_removes() {
    let mut controller = TodoListController::new(
        MemoryApi::default(),
        TerminalEditSurface::new(Vec::new()),
    );

    let printed = run_script(
        &mut controller,
        "add Buy milk | 2%\n\
         toggle 1\n\
         edit 1\n\
         title Buy oat milk\n\
         save\n\
         add Walk dog\n\
         rm 2\n\
         quit\n\
         list\n",
    )
    .await;

    assert!(printed.starts_with("no todos\n"), "{printed}");
    assert!(printed.contains("[ ] 1  Buy milk - 2%"), "{printed}");
    assert!(printed.contains("[x] 1  Buy milk - 2%"), "{printed}");
    assert!(printed.contains("[x] 1  Buy oat milk - 2%"), "{printed}");
    assert!(printed.contains("[ ] 2  Walk dog"), "{printed}");
    assert!(printed.trim_end().ends_with("todo>"), "{printed}");

    assert_eq!(controller.items().map(<[Todo]>::len), Some(1));
    assert!(!controller.surface().is_open());
    assert_eq!(
        controller.api().updates.lock().await.clone(),
        vec![
            (TodoId::from("1"), TodoPatch::completed(true)),
            (
                TodoId::from("1"),
                TodoPatch {
                    id: Some(TodoId::from("1")),
                    title: Some("Buy oat milk".into()),
                    description: Some("2%".into()),
                    completed: Some(true),
                    is_deleted: Some(false),
                }
            ),
        ]
    );
}

#[tokio::test]
async fn session_reports_failures_and_keeps_going() {
    let mut controller = TodoListController::new(
        MemoryApi::default(),
        TerminalEditSurface::new(Vec::new()),
    );

    let printed = run_script(&mut controller, "rm 9\nbogus\nsave\nadd Still here\n").await;

    assert!(printed.contains("Todo API error: delete todo rejected by server"), "{printed}");
    assert!(printed.contains("unknown command 'bogus'"), "{printed}");
    assert!(printed.contains("[ ] 1  Still here"), "{printed}");
    assert!(controller.api().updates.lock().await.is_empty());
}
