//! JSON-RPC 2.0 handler for A2A protocol operations
//!
//! Dispatches JSON-RPC methods:
//! - `message/send`   → run one blocking turn, return the finished task
//! - `message/stream` → run one turn, stream update events over SSE
//! - `tasks/get`      → retrieve a task by ID
//! - `tasks/cancel`   → cancel a non-terminal task

use std::convert::Infallible;
use std::time::Duration;

use axum::{
    extract::State,
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse, Json, Response,
    },
};
use serde_json::Value;
use uuid::Uuid;

use crate::protocol::{
    jsonrpc::{error_codes, methods, MessageSendParams, TasksCancelParams, TasksGetParams},
    JsonRpcRequest, JsonRpcResponse, Message, Task, TaskState,
};

use super::{store::CancelError, updater::TaskUpdater, AppState};

/// POST / - JSON-RPC 2.0 endpoint
pub async fn handle_jsonrpc(
    State(state): State<AppState>,
    Json(request): Json<JsonRpcRequest>,
) -> Response {
    if request.jsonrpc != "2.0" {
        return Json(JsonRpcResponse::error(
            request.id,
            error_codes::INVALID_REQUEST,
            "Invalid JSON-RPC version, expected 2.0",
        ))
        .into_response();
    }

    match request.method.as_str() {
        methods::MESSAGE_SEND => {
            Json(handle_message_send(&state, request.params, request.id).await).into_response()
        }
        methods::MESSAGE_STREAM => handle_message_stream(state, request.params, request.id).await,
        methods::TASKS_GET => {
            Json(handle_tasks_get(&state, request.params, request.id).await).into_response()
        }
        methods::TASKS_CANCEL => {
            Json(handle_tasks_cancel(&state, request.params, request.id).await).into_response()
        }
        _ => Json(JsonRpcResponse::error(
            request.id,
            error_codes::METHOD_NOT_FOUND,
            format!("Method not found: {}", request.method),
        ))
        .into_response(),
    }
}

/// Create the task for an inbound message and return its (task, context) ids
async fn create_task(state: &AppState, message: &Message) -> (String, String) {
    let task_id = message
        .task_id
        .clone()
        .unwrap_or_else(|| Uuid::now_v7().to_string());
    let context_id = message
        .context_id
        .clone()
        .unwrap_or_else(|| Uuid::now_v7().to_string());

    let task = Task::new(&task_id, &context_id).with_history_message(message.clone());
    state.store().insert(task).await;

    (task_id, context_id)
}

/// Handle `message/send` - run the executor to completion and return the task
async fn handle_message_send(state: &AppState, params: Value, id: Value) -> JsonRpcResponse {
    let params: MessageSendParams = match serde_json::from_value(params) {
        Ok(params) => params,
        Err(e) => {
            return JsonRpcResponse::error(
                id,
                error_codes::INVALID_PARAMS,
                format!("Invalid params: {}", e),
            );
        }
    };

    let (task_id, context_id) = create_task(state, &params.message).await;
    tracing::info!(task_id = %task_id, "processing message/send turn");

    let updater = TaskUpdater::new(state.store().clone(), task_id.as_str(), context_id.as_str());

    if let Err(e) = state.executor().execute(params.message, updater.clone()).await {
        tracing::error!(task_id = %task_id, error = %e, "executor failed");
        return JsonRpcResponse::error(
            id,
            error_codes::INTERNAL_ERROR,
            format!("Executor error: {}", e),
        );
    }
    updater.complete().await;

    match state.store().get(&task_id).await {
        Some(task) => {
            JsonRpcResponse::success(id, serde_json::to_value(&task).unwrap_or_default())
        }
        None => JsonRpcResponse::error(
            id,
            error_codes::INTERNAL_ERROR,
            format!("Task disappeared: {}", task_id),
        ),
    }
}

/// Handle `message/stream` - run the executor and stream update events as SSE
///
/// Each SSE data frame carries a JSON-RPC success envelope whose result is one
/// update event; the stream closes after the final status event.
async fn handle_message_stream(state: AppState, params: Value, id: Value) -> Response {
    let params: MessageSendParams = match serde_json::from_value(params) {
        Ok(params) => params,
        Err(e) => {
            return Json(JsonRpcResponse::error(
                id,
                error_codes::INVALID_PARAMS,
                format!("Invalid params: {}", e),
            ))
            .into_response();
        }
    };

    let (task_id, context_id) = create_task(&state, &params.message).await;
    tracing::info!(task_id = %task_id, "processing message/stream turn");

    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let updater = TaskUpdater::new(state.store().clone(), task_id.as_str(), context_id.as_str())
        .with_subscriber(tx);

    let executor = state.executor().clone();
    tokio::spawn(async move {
        if let Err(e) = executor.execute(params.message, updater.clone()).await {
            tracing::error!(task_id = %updater.task_id(), error = %e, "executor failed");
            updater
                .update_status(TaskState::Failed, Some(Message::agent(e.to_string())))
                .await;
            return;
        }
        updater.complete().await;
    });

    let request_id = id;
    let stream = async_stream::stream! {
        while let Some(event) = rx.recv().await {
            let envelope = JsonRpcResponse::success(
                request_id.clone(),
                serde_json::to_value(&event).unwrap_or_default(),
            );
            if let Ok(data) = serde_json::to_string(&envelope) {
                yield Ok::<_, Infallible>(Event::default().data(data));
            }
        }
    };

    Sse::new(stream)
        .keep_alive(
            KeepAlive::new()
                .interval(Duration::from_secs(15))
                .text("ping"),
        )
        .into_response()
}

/// Handle `tasks/get` - retrieve a task by ID
async fn handle_tasks_get(state: &AppState, params: Value, id: Value) -> JsonRpcResponse {
    let params: TasksGetParams = match serde_json::from_value(params) {
        Ok(params) => params,
        Err(e) => {
            return JsonRpcResponse::error(
                id,
                error_codes::INVALID_PARAMS,
                format!("Invalid params: {}", e),
            );
        }
    };

    match state.store().get(&params.task_id).await {
        Some(task) => {
            JsonRpcResponse::success(id, serde_json::to_value(&task).unwrap_or_default())
        }
        None => JsonRpcResponse::error(
            id,
            error_codes::TASK_NOT_FOUND,
            format!("Task not found: {}", params.task_id),
        ),
    }
}

/// Handle `tasks/cancel` - cancel a non-terminal task
async fn handle_tasks_cancel(state: &AppState, params: Value, id: Value) -> JsonRpcResponse {
    let params: TasksCancelParams = match serde_json::from_value(params) {
        Ok(params) => params,
        Err(e) => {
            return JsonRpcResponse::error(
                id,
                error_codes::INVALID_PARAMS,
                format!("Invalid params: {}", e),
            );
        }
    };

    match state.store().cancel(&params.task_id).await {
        Ok(task) => {
            tracing::info!(task_id = %params.task_id, "task canceled");
            JsonRpcResponse::success(id, serde_json::to_value(&task).unwrap_or_default())
        }
        Err(CancelError::Terminal(task_state)) => JsonRpcResponse::error(
            id,
            error_codes::UNSUPPORTED_OPERATION,
            format!("Cannot cancel task in {:?} state", task_state),
        ),
        Err(CancelError::NotFound) => JsonRpcResponse::error(
            id,
            error_codes::TASK_NOT_FOUND,
            format!("Task not found: {}", params.task_id),
        ),
    }
}
