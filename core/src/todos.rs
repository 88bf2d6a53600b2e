//! The dashboard's to-do list.

use crate::client::InventoryClient;
use crate::effect::{Outcome, Outgoing};
use crate::error::ApiError;
use crate::http::HttpResponse;
use crate::types::{NewTodo, Todo};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoTicket {
    Load,
    Add,
    Delete { id: String },
}

pub type TodoRequest = Outgoing<TodoTicket>;

#[derive(Debug, Clone)]
pub struct TodoList {
    client: InventoryClient,
    todos: Vec<Todo>,
}

impl TodoList {
    pub fn new(client: InventoryClient) -> Self {
        Self {
            client,
            todos: Vec::new(),
        }
    }

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn load(&self) -> TodoRequest {
        Outgoing::new(TodoTicket::Load, self.client.build_list_todos())
    }

    pub fn add(&self, todo: &NewTodo) -> Result<TodoRequest, ApiError> {
        if todo.title.trim().is_empty() {
            return Err(ApiError::Validation("to-do title is required".to_string()));
        }
        Ok(Outgoing::new(
            TodoTicket::Add,
            self.client.build_create_todo(todo)?,
        ))
    }

    pub fn delete(&self, id: &str) -> TodoRequest {
        Outgoing::new(
            TodoTicket::Delete { id: id.to_string() },
            self.client.build_delete_todo(id),
        )
    }

    pub fn complete(
        &mut self,
        ticket: TodoTicket,
        response: Result<HttpResponse, ApiError>,
    ) -> Outcome {
        let result = match ticket {
            TodoTicket::Load => response
                .and_then(|r| self.client.parse_list_todos(r))
                .map(|todos| self.todos = todos),
            TodoTicket::Add => response
                .and_then(|r| self.client.parse_create_todo(r))
                .map(|todo| self.todos.push(todo)),
            TodoTicket::Delete { id } => response
                .and_then(|r| self.client.parse_delete_todo(r))
                .map(|()| self.todos.retain(|t| t.id != id)),
        };
        match result {
            Ok(()) => Outcome::Applied,
            Err(err) => {
                tracing::error!(error = %err, "to-do request failed");
                Outcome::Failed(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpMethod;

    fn list() -> TodoList {
        TodoList::new(InventoryClient::new("http://localhost:8080"))
    }

    #[test]
    fn load_replaces_list() {
        let mut todos = list();
        let out = todos.load();
        assert_eq!(out.request.path, "http://localhost:8080/api/todos");
        let body = r#"[{"id":"t1","title":"Ship","description":null,"dueDate":null,"completed":false}]"#;
        assert_eq!(
            todos.complete(out.ticket, Ok(HttpResponse::new(200, body))),
            Outcome::Applied
        );
        assert_eq!(todos.todos().len(), 1);
        assert_eq!(todos.todos()[0].title, "Ship");
    }

    #[test]
    fn add_appends_server_copy() {
        let mut todos = list();
        let out = todos
            .add(&NewTodo {
                title: "Reprice".to_string(),
                description: Some("old stock".to_string()),
            })
            .unwrap();
        assert_eq!(out.request.method, HttpMethod::Post);
        let body = r#"{"id":"t9","title":"Reprice","description":"old stock"}"#;
        todos.complete(out.ticket, Ok(HttpResponse::new(200, body)));
        assert_eq!(todos.todos()[0].id, "t9");
    }

    #[test]
    fn blank_title_is_rejected() {
        let err = list()
            .add(&NewTodo {
                title: "  ".to_string(),
                description: None,
            })
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn delete_only_after_confirmation() {
        let mut todos = list();
        let out = todos.load();
        let body = r#"[{"id":"t1","title":"A"},{"id":"t2","title":"B"}]"#;
        todos.complete(out.ticket, Ok(HttpResponse::new(200, body)));

        let out = todos.delete("t1");
        let outcome = todos.complete(out.ticket, Err(ApiError::transport("offline")));
        assert!(matches!(outcome, Outcome::Failed(_)));
        assert_eq!(todos.todos().len(), 2);

        let out = todos.delete("t1");
        todos.complete(out.ticket, Ok(HttpResponse::new(200, "")));
        assert_eq!(todos.todos().len(), 1);
        assert_eq!(todos.todos()[0].id, "t2");
    }
}
