/*!
 * Authentication context extractor
 *
 * Responsibility:
 * - リクエストの identity outcome (AuthCtx) を handler に提供する
 * - 型定義は services::auth 側、ここは axum との接着のみ
 *
 * Public API:
 * - AuthCtxExtractor
 */

mod core;

pub use core::AuthCtxExtractor;
