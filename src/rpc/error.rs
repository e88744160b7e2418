/*
 * Responsibility
 * - backend client の安定したエラー分類
 * - 生の transport error は発生箇所でログに出し、ここには持ち込まない
 */
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{0}")]
    Validation(&'static str),
    #[error("unauthorized")]
    Unauthorized,
    #[error("{0} failed")]
    OperationFailed(&'static str),
    #[error("failed to connect to {service}")]
    Connect {
        service: &'static str,
        #[source]
        source: tonic::transport::Error,
    },
}
