//! Authenticated HTTP → gRPC gateway for the task services.
//!
//! Requests on protected routes get their bearer token verified into a
//! request-scoped identity; the backend client refuses task operations
//! without one and stamps the verified user id on every task call.
pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod rpc;
pub mod services;
pub mod state;
