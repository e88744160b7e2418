//! Backend client facade used by the handlers.
//!
//! - Credential operations (login/register) validate input locally first.
//! - Task operations require a verified identity; this is the only place the
//!   gateway turns a missing or invalid credential into `Unauthorized`.
//! - The owning user on every task call comes from the verified identity.
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tonic::Status;
use tracing::warn;

use super::backend::{
    CredentialBackend, GrpcCredentialBackend, GrpcTaskBackend, RetryingChannel, TaskBackend,
};
use super::error::ClientError;
use super::proto;
use super::retry::RetryPolicy;
use crate::models::Task;
use crate::services::auth::AuthCtx;

/// Deadline for a whole backend call, retries included.
pub const CALL_DEADLINE: Duration = Duration::from_secs(5);

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedTask {
    pub id: i64,
    pub message: String,
}

#[derive(Clone)]
pub struct BackendClient {
    credentials: Arc<dyn CredentialBackend>,
    tasks: Arc<dyn TaskBackend>,
    deadline: Duration,
}

impl std::fmt::Debug for BackendClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendClient")
            .field("deadline", &self.deadline)
            .finish_non_exhaustive()
    }
}

impl BackendClient {
    pub fn new(credentials: Arc<dyn CredentialBackend>, tasks: Arc<dyn TaskBackend>) -> Self {
        Self {
            credentials,
            tasks,
            deadline: CALL_DEADLINE,
        }
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    /// Dial both backends once. Either failing is fatal for the caller.
    pub async fn connect(
        auth_addr: &str,
        tasks_addr: &str,
        retry: RetryPolicy,
    ) -> Result<Self, ClientError> {
        let auth = RetryingChannel::connect(auth_addr, retry.clone())
            .await
            .map_err(|source| ClientError::Connect {
                service: "credential service",
                source,
            })?;
        let tasks = RetryingChannel::connect(tasks_addr, retry)
            .await
            .map_err(|source| ClientError::Connect {
                service: "task service",
                source,
            })?;

        Ok(Self::new(
            Arc::new(GrpcCredentialBackend::new(auth)),
            Arc::new(GrpcTaskBackend::new(tasks)),
        ))
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<String, ClientError> {
        validate_credentials(email, password)?;

        let resp = self
            .call(
                "login",
                self.credentials.login(proto::LoginRequest {
                    email: email.to_string(),
                    password: password.to_string(),
                }),
            )
            .await?;

        Ok(resp.token)
    }

    pub async fn register(&self, email: &str, password: &str) -> Result<String, ClientError> {
        validate_credentials(email, password)?;

        let resp = self
            .call(
                "register",
                self.credentials.register(proto::RegisterRequest {
                    email: email.to_string(),
                    password: password.to_string(),
                }),
            )
            .await?;

        Ok(resp.message)
    }

    pub async fn create_task(
        &self,
        ctx: &AuthCtx,
        title: &str,
        description: &str,
    ) -> Result<CreatedTask, ClientError> {
        let user_id = require_identity(ctx, "create task")?;

        let resp = self
            .call(
                "create task",
                self.tasks.create_task(proto::CreateRequest {
                    title: title.to_string(),
                    description: description.to_string(),
                    userid: user_id,
                }),
            )
            .await?;

        Ok(CreatedTask {
            id: resp.id,
            message: resp.message,
        })
    }

    pub async fn delete_task(&self, ctx: &AuthCtx, id: i64) -> Result<String, ClientError> {
        let user_id = require_identity(ctx, "delete task")?;

        let resp = self
            .call(
                "delete task",
                self.tasks.delete_task(proto::DeleteRequest {
                    id,
                    userid: user_id,
                }),
            )
            .await?;

        Ok(resp.message)
    }

    pub async fn done_task(&self, ctx: &AuthCtx, id: i64) -> Result<String, ClientError> {
        let user_id = require_identity(ctx, "done task")?;

        let resp = self
            .call(
                "done task",
                self.tasks.done_task(proto::DoneRequest {
                    id,
                    userid: user_id,
                }),
            )
            .await?;

        Ok(resp.message)
    }

    /// Tasks in backend order.
    pub async fn list_tasks(&self, ctx: &AuthCtx) -> Result<Vec<Task>, ClientError> {
        let user_id = require_identity(ctx, "get all tasks")?;

        let resp = self
            .call(
                "get all tasks",
                self.tasks
                    .get_all_tasks(proto::GetAllRequest { userid: user_id }),
            )
            .await?;

        Ok(resp.tasks.into_iter().map(Task::from).collect())
    }

    // Bounds the call by the deadline and collapses transport failures into
    // `OperationFailed`. Dropping the caller's future cancels the call.
    async fn call<T, F>(&self, op: &'static str, fut: F) -> Result<T, ClientError>
    where
        F: Future<Output = Result<T, Status>>,
    {
        match tokio::time::timeout(self.deadline, fut).await {
            Ok(Ok(resp)) => Ok(resp),
            Ok(Err(status)) => {
                warn!(
                    op,
                    code = ?status.code(),
                    message = status.message(),
                    "backend call failed"
                );
                Err(ClientError::OperationFailed(op))
            }
            Err(_) => {
                warn!(op, deadline = ?self.deadline, "backend call deadline exceeded");
                Err(ClientError::OperationFailed(op))
            }
        }
    }
}

fn require_identity(ctx: &AuthCtx, op: &'static str) -> Result<i64, ClientError> {
    if let Some(identity) = ctx.identity() {
        return Ok(identity.user_id);
    }

    match ctx.error() {
        Some(err) => warn!(op, reason = %err, "rejecting call: credential failed verification"),
        None => warn!(op, "rejecting call: no identity resolved for request"),
    }
    Err(ClientError::Unauthorized)
}

fn validate_credentials(email: &str, password: &str) -> Result<(), ClientError> {
    if email.is_empty() {
        return Err(ClientError::Validation("email is empty"));
    }
    if password.is_empty() {
        return Err(ClientError::Validation("password is empty"));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ClientError::Validation(
            "password must be at least 6 characters",
        ));
    }
    Ok(())
}
