/*
 * Responsibility
 * - HTTP adapter: body decode → BackendClient 呼び出し 1 回 → 結果 encode
 * - 公開エントリポイントは routes() のみ
 */
pub mod dto;
pub mod extractors;
pub mod handlers;
mod routes;

pub use routes::routes;
