/*
 * Responsibility
 * - Task の request/response DTO
 * - request に owner フィールドは無い (owner は常に検証済み identity から)
 */
use serde::{Deserialize, Serialize};

use crate::models::Task;

#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Serialize)]
pub struct CreateTaskResponse {
    pub id: i64,
}

/// Body of /deletetask and /donetask.
#[derive(Debug, Deserialize)]
pub struct TaskIdRequest {
    #[serde(default)]
    pub id: i64,
}

#[derive(Debug, Serialize)]
pub struct TaskListResponse {
    pub tasks: Vec<Task>,
}
