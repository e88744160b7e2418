/*
 * Responsibility
 * - Config読み込み → 依存生成 → Router 組み立て
 * - Middleware の適用 (CORS / HTTP layers / private route の identity)
 * - hyper-util の接続ループ (HTTP/1 + HTTP/2) で起動、timer と graceful shutdown 付き
 */
use std::pin::pin;
use std::sync::Arc;
use std::time::Duration;
use std::{panic, process};

use anyhow::Result;
use axum::Router;
use axum::http::Request;
use hyper::body::Incoming;
use hyper::service::service_fn;
use hyper_util::rt::{TokioExecutor, TokioIo, TokioTimer};
use hyper_util::server::conn::auto;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tower::Service;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::rpc::{BackendClient, ClientError, RetryPolicy};
use crate::services::auth::TokenVerifier;
use crate::state::AppState;
use crate::{api, middleware};

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,task_gateway=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        tracing::error!(?info, "panic");

        // Development: crash the whole process so it gets noticed.
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;

    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        "starting gateway in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let state = build_state(&config)
        .await
        .inspect_err(|e| tracing::error!(error = ?e, "backend dial failed"))?;
    let app = build_router(state, &config);

    let listener = TcpListener::bind(&config.addr).await?;
    serve(listener, app, ConnLimits::from(&config), shutdown_signal()).await
}

/// Dial both backends and build the shared state. Failing here is fatal.
pub async fn build_state(config: &Config) -> Result<AppState, ClientError> {
    let retry = RetryPolicy::new(config.grpc_retry_max, config.grpc_retry_timeout);
    let backend =
        BackendClient::connect(&config.grpc_auth_addr, &config.grpc_db_addr, retry).await?;
    tracing::info!(
        auth = %config.grpc_auth_addr,
        tasks = %config.grpc_db_addr,
        "connected to backends"
    );

    let verifier = TokenVerifier::new(config.secret_key.as_bytes());

    Ok(AppState::new(Arc::new(backend), Arc::new(verifier)))
}

pub fn build_router(state: AppState, config: &Config) -> Router {
    let router = api::routes(&state).with_state(state);
    let router = middleware::cors::apply(router, config);
    middleware::http::apply(router, config)
}

/// Per-connection limits for the HTTP server.
#[derive(Debug, Clone, Copy)]
pub struct ConnLimits {
    /// Bound on reading request headers. HTTP/1 starts this timer as soon as
    /// the connection waits for a request, so it also closes silent
    /// keep-alive connections.
    pub read: Duration,
    /// HTTP/2 keep-alive ping interval; also bounds the shutdown drain.
    pub idle: Duration,
}

impl From<&Config> for ConnLimits {
    fn from(config: &Config) -> Self {
        Self {
            read: config.server_timeout,
            idle: config.idle_timeout,
        }
    }
}

fn connection_builder(limits: ConnLimits) -> auto::Builder<TokioExecutor> {
    let mut builder = auto::Builder::new(TokioExecutor::new());
    builder
        .http1()
        .timer(TokioTimer::new())
        .header_read_timeout(limits.read);
    builder
        .http2()
        .timer(TokioTimer::new())
        .keep_alive_interval(limits.idle)
        .keep_alive_timeout(limits.read);
    builder
}

/// Accept connections until `shutdown` resolves, then let in-flight
/// connections finish for at most `limits.idle`.
///
/// Serves HTTP/1 and HTTP/2 (including h2c prior knowledge) on the same
/// listener.
pub async fn serve<F>(
    listener: TcpListener,
    app: Router,
    limits: ConnLimits,
    shutdown: F,
) -> Result<()>
where
    F: Future<Output = ()> + Send,
{
    let (signal_tx, signal_rx) = watch::channel(());
    let (close_tx, close_rx) = watch::channel(());
    let mut shutdown = pin!(shutdown);

    loop {
        let (stream, remote) = tokio::select! {
            accepted = listener.accept() => match accepted {
                Ok(conn) => conn,
                Err(e) => {
                    tracing::warn!(error = %e, "failed to accept connection");
                    continue;
                }
            },
            _ = &mut shutdown => break,
        };

        let service = app.clone();
        let mut signal = signal_rx.clone();
        let close = close_rx.clone();

        tokio::spawn(async move {
            let hyper_service =
                service_fn(move |req: Request<Incoming>| service.clone().call(req));
            let builder = connection_builder(limits);
            let mut conn =
                pin!(builder.serve_connection_with_upgrades(TokioIo::new(stream), hyper_service));

            let mut draining = false;
            loop {
                tokio::select! {
                    result = conn.as_mut() => {
                        if let Err(e) = result {
                            tracing::debug!(error = %e, %remote, "connection closed");
                        }
                        break;
                    }
                    _ = signal.changed(), if !draining => {
                        draining = true;
                        conn.as_mut().graceful_shutdown();
                    }
                }
            }

            drop(close);
        });
    }

    drop(listener);
    tracing::info!(drain = ?limits.idle, "shutdown signal received, draining connections");
    signal_tx.send_replace(());
    drop(close_rx);

    if tokio::time::timeout(limits.idle, close_tx.closed()).await.is_err() {
        tracing::warn!("drain timeout reached, dropping remaining connections");
    }
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
