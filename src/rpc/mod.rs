/*
 * Responsibility
 * - credential / task サービスへの outbound gRPC
 * - channel は起動時に 1 回だけ作成、channel ごとに retry decorator
 * - task 操作の identity gate を強制する client facade
 */
pub mod backend;
pub mod client;
pub mod error;
pub mod proto;
pub mod retry;

pub use backend::{CredentialBackend, TaskBackend};
pub use client::{BackendClient, CreatedTask};
pub use error::ClientError;
pub use retry::RetryPolicy;
