//! Todo HTTP Server
//!
//! Routes:
//! - `GET /` list every todo
//! - `POST /add?task=...` create a todo
//! - `GET /edit?todo_id=...&task=...[&completed=...]` overwrite a todo
//! - `GET /delete?todo_id=...` remove a todo

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::{any::Any, future::Future, net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tracing::info;

use crate::{
    error::ApiError,
    handler::TodoHandler,
    request_logger::{correlation_logging_middleware, HandlerPanic, RequestContext},
};
use ::todo_core::{
    AddTodoParams, DeleteTodoParams, EditTodoParams, Todo, TodoError, TodoProtocol,
    TodoRepository,
};

/// Boxed error returned by the serve functions
pub type ServeError = Box<dyn std::error::Error + Send + Sync>;

/// Shared server state for handlers
pub struct TodoServerState<R> {
    pub handler: TodoHandler<R>,
}

/// Body of every successful write
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// HTTP server exposing the todo operations
pub struct TodoServer<R> {
    handler: TodoHandler<R>,
}

impl<R: TodoRepository + 'static> TodoServer<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            handler: TodoHandler::new(repository),
        }
    }

    /// Bind `addr` and serve until `shutdown` resolves
    pub async fn serve<F>(self, addr: &str, shutdown: F) -> Result<(), ServeError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let socket_addr: SocketAddr = addr
            .parse()
            .map_err(|e| format!("Invalid address '{addr}': {e}"))?;

        let listener = TcpListener::bind(socket_addr).await?;
        self.serve_listener(listener, shutdown).await
    }

    /// Serve on an already bound listener until `shutdown` resolves
    pub async fn serve_listener<F>(self, listener: TcpListener, shutdown: F) -> Result<(), ServeError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        info!("Starting todo server on {}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await?;

        Ok(())
    }

    /// Create the router with all endpoints
    ///
    /// The correlation middleware is the outermost layer; the panic guard sits
    /// inside it so a panicking handler still yields a logged, tagged 500.
    pub fn router(self) -> Router {
        let state = Arc::new(TodoServerState {
            handler: self.handler,
        });

        Router::new()
            .route("/", get(list_todos::<R>))
            .route("/add", post(add_todo::<R>))
            .route("/edit", get(edit_todo::<R>))
            .route("/delete", get(delete_todo::<R>))
            .fallback(fallback_handler)
            .layer(CatchPanicLayer::custom(handle_panic))
            .layer(middleware::from_fn(correlation_logging_middleware))
            .with_state(state)
    }
}

/// Log a store failure against the request and convert it for the client
fn report(context: &RequestContext, err: TodoError) -> ApiError {
    context.log_error(&err);
    ApiError::from(err)
}

async fn list_todos<R: TodoRepository>(
    State(state): State<Arc<TodoServerState<R>>>,
    Extension(context): Extension<RequestContext>,
) -> Result<Json<Vec<Todo>>, ApiError> {
    let todos = state
        .handler
        .list_todos()
        .await
        .map_err(|e| report(&context, e))?;

    Ok(Json(todos))
}

async fn add_todo<R: TodoRepository>(
    State(state): State<Arc<TodoServerState<R>>>,
    Extension(context): Extension<RequestContext>,
    params: Result<Query<AddTodoParams>, QueryRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Query(params) = params?;

    state
        .handler
        .add_todo(params)
        .await
        .map_err(|e| report(&context, e))?;

    Ok(Json(MessageResponse::new("Successfully added the new ToDo")))
}

async fn edit_todo<R: TodoRepository>(
    State(state): State<Arc<TodoServerState<R>>>,
    Extension(context): Extension<RequestContext>,
    params: Result<Query<EditTodoParams>, QueryRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Query(params) = params?;
    let todo_id = params.todo_id;

    state
        .handler
        .edit_todo(params)
        .await
        .map_err(|e| report(&context, e))?;

    Ok(Json(MessageResponse::new(format!(
        "Successfully edited {todo_id}"
    ))))
}

async fn delete_todo<R: TodoRepository>(
    State(state): State<Arc<TodoServerState<R>>>,
    Extension(context): Extension<RequestContext>,
    params: Result<Query<DeleteTodoParams>, QueryRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Query(params) = params?;
    let todo_id = params.todo_id;

    state
        .handler
        .delete_todo(params)
        .await
        .map_err(|e| report(&context, e))?;

    Ok(Json(MessageResponse::new(format!(
        "Successfully deleted {todo_id}"
    ))))
}

async fn fallback_handler() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "detail": "Not Found" }))).into_response()
}

fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    let mut response = ApiError::Internal.into_response();
    response.extensions_mut().insert(HandlerPanic(detail));
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_response_shape() {
        let value = serde_json::to_value(MessageResponse::new("Successfully deleted 1")).unwrap();
        assert_eq!(value, json!({"message": "Successfully deleted 1"}));
    }

    #[test]
    fn test_handle_panic_returns_500() {
        let response = handle_panic(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.extensions().get::<HandlerPanic>(),
            Some(&HandlerPanic("boom".to_string()))
        );

        let response = handle_panic(Box::new(String::from("bang")));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.extensions().get::<HandlerPanic>(),
            Some(&HandlerPanic("bang".to_string()))
        );

        let response = handle_panic(Box::new(42_u8));
        assert_eq!(
            response.extensions().get::<HandlerPanic>(),
            Some(&HandlerPanic("unknown panic".to_string()))
        );
    }
}
