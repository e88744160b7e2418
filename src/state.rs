/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - backend client (長寿命 channel 2 本) と token verifier
 * - Clone 前提で持つ (内部は Arc)、起動後は read-only
 */
use std::sync::Arc;

use crate::rpc::BackendClient;
use crate::services::auth::TokenVerifier;

#[derive(Clone, Debug)]
pub struct AppState {
    pub backend: Arc<BackendClient>,
    pub verifier: Arc<TokenVerifier>,
}

impl AppState {
    pub fn new(backend: Arc<BackendClient>, verifier: Arc<TokenVerifier>) -> Self {
        Self { backend, verifier }
    }
}
