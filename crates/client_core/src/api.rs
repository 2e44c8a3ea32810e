//! HTTP access to the remote todo collection.

use anyhow::{anyhow, ensure, Context, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use shared::domain::{Todo, TodoId, TodoPatch};
use tracing::debug;
use url::Url;

/// The four calls the remote collection supports.
///
/// Every call is exactly one request. Nothing is retried or cached, and
/// failures are handed back as-is.
#[async_trait]
pub trait TodoApi: Send + Sync {
    async fn list(&self) -> Result<Vec<Todo>>;
    async fn create(&self, todo: &Todo) -> Result<Todo>;
    async fn update(&self, id: &TodoId, patch: &TodoPatch) -> Result<Todo>;
    async fn delete(&self, id: &TodoId) -> Result<Option<Todo>>;
}

#[derive(Debug, Clone)]
pub struct HttpTodoApi {
    http: Client,
    base_url: Url,
}

impl HttpTodoApi {
    pub fn new(base_url: Url) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    fn item_url(&self, id: &TodoId) -> Result<Url> {
        ensure!(!id.is_empty(), "todo id must not be empty");

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| anyhow!("base url {} cannot address items", self.base_url))?
            .pop_if_empty()
            .push(id.as_str());
        Ok(url)
    }
}

async fn send_checked(request: RequestBuilder, operation: &str) -> Result<Response> {
    let response = request
        .send()
        .await
        .with_context(|| format!("{operation} request failed"))?;
    response
        .error_for_status()
        .with_context(|| format!("{operation} rejected by server"))
}

#[async_trait]
impl TodoApi for HttpTodoApi {
    async fn list(&self) -> Result<Vec<Todo>> {
        debug!(method = "GET", url = %self.base_url, "listing todos");
        let todos = send_checked(self.http.get(self.base_url.clone()), "list todos")
            .await?
            .json()
            .await
            .context("malformed todo list")?;
        Ok(todos)
    }

    async fn create(&self, todo: &Todo) -> Result<Todo> {
        debug!(method = "POST", url = %self.base_url, title = %todo.title, "creating todo");
        let created = send_checked(
            self.http.post(self.base_url.clone()).json(todo),
            "create todo",
        )
        .await?
        .json()
        .await
        .context("malformed created todo")?;
        Ok(created)
    }

    async fn update(&self, id: &TodoId, patch: &TodoPatch) -> Result<Todo> {
        let url = self.item_url(id)?;
        debug!(method = "PUT", url = %url, "updating todo");
        let updated = send_checked(self.http.put(url).json(patch), "update todo")
            .await
            .with_context(|| format!("todo {id}"))?
            .json()
            .await
            .with_context(|| format!("malformed updated todo {id}"))?;
        Ok(updated)
    }

    async fn delete(&self, id: &TodoId) -> Result<Option<Todo>> {
        let url = self.item_url(id)?;
        debug!(method = "DELETE", url = %url, "deleting todo");
        let body = send_checked(self.http.delete(url), "delete todo")
            .await
            .with_context(|| format!("todo {id}"))?
            .bytes()
            .await?;

        // Some stores answer a delete with no body at all.
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        let deleted = serde_json::from_slice::<Option<Todo>>(&body)
            .with_context(|| format!("malformed deleted todo {id}"))?;
        Ok(deleted)
    }
}

#[cfg(test)]
#[path = "tests/api_tests.rs"]
mod tests;
