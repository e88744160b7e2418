/*
 * Responsibility
 * - gateway の URL 構成
 * - Public: /health, /login, /register (identity middleware なし)
 * - Private: task 系 route、identity middleware でラップ
 */
use axum::{
    Router,
    routing::{get, post},
};

use crate::api::handlers::{
    auth::{login, register},
    health::health,
    tasks::{create_task, delete_task, done_task, get_all_tasks},
};
use crate::middleware;
use crate::state::AppState;

pub fn routes(state: &AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/health", get(health))
        .route("/login", post(login))
        .route("/register", post(register));

    let private = Router::new()
        .route("/getalltasks", get(get_all_tasks))
        .route("/createtask", post(create_task))
        .route("/deletetask", post(delete_task))
        .route("/donetask", post(done_task));
    let private = middleware::auth::identity::apply(private, state.verifier.clone());

    public.merge(private)
}
