/*
 * Responsibility
 * - middleware 層の公開インターフェース (re-export)
 * - auth::identity::apply(...), cors::apply(...), http::apply(...)
 */
pub mod auth;
pub mod cors;
pub mod http;
