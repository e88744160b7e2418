/*
 * Responsibility
 * - /getalltasks, /createtask, /deletetask, /donetask
 * - AuthCtx はそのまま渡す。認可の判断は BackendClient が行う
 */
use axum::{Json, extract::State, extract::rejection::JsonRejection};

use crate::{
    api::{
        dto::{
            auth::MessageResponse,
            tasks::{CreateTaskRequest, CreateTaskResponse, TaskIdRequest, TaskListResponse},
        },
        extractors::AuthCtxExtractor,
    },
    error::AppError,
    state::AppState,
};

pub async fn get_all_tasks(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
) -> Result<Json<TaskListResponse>, AppError> {
    let tasks = state
        .backend
        .list_tasks(&ctx)
        .await
        .inspect_err(|e| tracing::warn!(error = %e, "failed to get all tasks"))?;

    Ok(Json(TaskListResponse { tasks }))
}

pub async fn create_task(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    payload: Result<Json<CreateTaskRequest>, JsonRejection>,
) -> Result<Json<CreateTaskResponse>, AppError> {
    let Json(req) = payload?;

    let created = state
        .backend
        .create_task(&ctx, &req.title, &req.description)
        .await
        .inspect_err(|e| tracing::warn!(error = %e, "failed to create task"))?;

    Ok(Json(CreateTaskResponse { id: created.id }))
}

pub async fn delete_task(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    payload: Result<Json<TaskIdRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let Json(req) = payload?;

    let message = state
        .backend
        .delete_task(&ctx, req.id)
        .await
        .inspect_err(|e| tracing::warn!(error = %e, task_id = req.id, "failed to delete task"))?;

    Ok(Json(MessageResponse { message }))
}

pub async fn done_task(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    payload: Result<Json<TaskIdRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let Json(req) = payload?;

    let message = state
        .backend
        .done_task(&ctx, req.id)
        .await
        .inspect_err(|e| tracing::warn!(error = %e, task_id = req.id, "failed to mark task done"))?;

    Ok(Json(MessageResponse { message }))
}
