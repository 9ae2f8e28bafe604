//! HTTP front end: router, handlers, and the serve loop.
//!
//! # Routes
//!
//! | Method | Path      | Response                                      |
//! |--------|-----------|-----------------------------------------------|
//! | GET    | `/`       | HTML index, `?offset=&limit=` optional        |
//! | POST   | `/create` | `201 Created` + stored comment as JSON        |
//! | GET    | `/:id`    | HTML page for one comment, `404` if unknown   |
//! | any    | other     | `404 not found`                               |
//!
//! Every request passes through a [`TraceLayer`] and a [`TimeoutLayer`]; the
//! latter answers `408 Request Timeout` once `request_timeout` elapses.
//!
//! # Shutdown
//!
//! [`serve`] stops accepting connections when the `shutdown` future
//! completes and lets in-flight requests finish.  If they are still running
//! after the grace period, `serve` returns anyway and leaves them to the
//! runtime, which drops them when it shuts down.  [`serve_tls`] does the same
//! for HTTPS through an `axum_server` handle, which closes them itself.

use std::future::{Future, IntoFuture};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::{get, post},
    Json, Router,
};
use axum_server::{tls_rustls::RustlsConfig, Handle};
use comment_core::{Comment, CommentStore, NewComment, Pagination};
use tokio::net::TcpListener;
use tokio::sync::Notify;
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::application::render::{render_comment, render_index, CREATE_PATH};
use crate::domain::config::ServerConfig;
use crate::infrastructure::error::AppError;
use crate::infrastructure::tls::load_tls_config;

/// State shared by every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub store: CommentStore,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Builds the application router over `store`.
///
/// Exposed separately from [`run_server`] so tests can mount the router on an
/// ephemeral port or drive it in-process.
pub fn build_router(store: CommentStore, config: &ServerConfig) -> Router {
    Router::new()
        .route("/", get(list_comments))
        .route(CREATE_PATH, post(create_comment))
        .route("/:id", get(show_comment))
        .fallback(handler_404)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::with_status_code(
                    StatusCode::REQUEST_TIMEOUT,
                    config.request_timeout,
                )),
        )
        .with_state(AppState { store })
}

/// Binds `config.bind_addr` and serves an empty store until `shutdown`
/// completes, over HTTPS when `config.tls` is set.
///
/// # Errors
///
/// Returns an error if the TLS files cannot be loaded, the listener cannot be
/// bound, or the server fails.
pub async fn run_server<F>(config: ServerConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let router = build_router(CommentStore::new(), &config);

    let Some(paths) = &config.tls else {
        let listener = TcpListener::bind(config.bind_addr)
            .await
            .with_context(|| format!("failed to bind HTTP listener on {}", config.bind_addr))?;
        info!("comment server listening on http://{}", config.bind_addr);
        return serve(listener, router, config.shutdown_grace, shutdown).await;
    };

    let tls = load_tls_config(paths)?;
    info!("comment server listening on https://{}", config.bind_addr);
    serve_tls(
        config.bind_addr,
        tls,
        router,
        Handle::new(),
        config.shutdown_grace,
        shutdown,
    )
    .await
}

/// Serves `router` on `listener` with graceful shutdown bounded by `grace`.
pub async fn serve<F>(
    listener: TcpListener,
    router: Router,
    grace: Duration,
    shutdown: F,
) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let signalled = Arc::new(Notify::new());
    let notify = Arc::clone(&signalled);

    let server = axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            shutdown.await;
            info!("shutdown signal received; draining connections");
            notify.notify_one();
        })
        .into_future();
    tokio::pin!(server);

    tokio::select! {
        result = &mut server => {
            result.context("HTTP server failed")?;
        }
        () = async {
            signalled.notified().await;
            tokio::time::sleep(grace).await;
        } => {
            warn!("shutdown grace period of {grace:?} elapsed; abandoning open connections");
        }
    }

    Ok(())
}

/// Serves `router` over HTTPS on `addr` until `shutdown` completes.
///
/// `handle` reports the bound address through [`Handle::listening`], which is
/// how callers binding port 0 find the real port.  After the signal, open
/// connections get `grace` to finish before they are closed.
///
/// # Errors
///
/// Returns an error if `addr` cannot be bound or the server fails.
pub async fn serve_tls<F>(
    addr: SocketAddr,
    tls: RustlsConfig,
    router: Router,
    handle: Handle,
    grace: Duration,
    shutdown: F,
) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let signal_handle = handle.clone();
    let watcher = tokio::spawn(async move {
        shutdown.await;
        info!("shutdown signal received; draining connections");
        signal_handle.graceful_shutdown(Some(grace));
    });

    let result = axum_server::bind_rustls(addr, tls)
        .handle(handle)
        .serve(router.into_make_service())
        .await
        .with_context(|| format!("HTTPS server on {addr} failed"));

    watcher.abort();
    result
}

/// Completes on Ctrl+C, or on SIGTERM where the platform has it.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl+C signal: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}

// ── Handlers ──────────────────────────────────────────────────────────────────

async fn list_comments(
    State(state): State<AppState>,
    pagination: Option<Query<Pagination>>,
) -> Result<Html<String>, AppError> {
    let Query(pagination) = pagination.unwrap_or_default();
    let page = state.store.list(&pagination)?;
    debug!(
        total = page.total,
        shown = page.entries.len(),
        "rendering comment index"
    );
    Ok(Html(render_index(&page, &pagination)))
}

async fn show_comment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    // A malformed id cannot name a stored comment, so it is a 404 as well.
    let id = Uuid::parse_str(&id).map_err(|_| AppError::NotFound)?;
    let comment = state.store.get(&id)?.ok_or(AppError::NotFound)?;
    Ok(Html(render_comment(&comment)))
}

async fn create_comment(
    State(state): State<AppState>,
    Json(input): Json<NewComment>,
) -> Result<(StatusCode, Json<Comment>), AppError> {
    let comment = input.validate()?.into_comment(Uuid::new_v4());
    state.store.insert(comment.clone())?;
    info!(id = %comment.id, name = %comment.name, "comment created");
    Ok((StatusCode::CREATED, Json(comment)))
}

async fn handler_404() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "404 not found")
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request};
    use tower::ServiceExt;

    fn router() -> (Router, CommentStore) {
        let store = CommentStore::new();
        (build_router(store.clone(), &ServerConfig::default()), store)
    }

    fn create_request(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/create")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_string(response: axum::response::Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_create_returns_201_and_stores_comment() {
        // Arrange
        let (app, store) = router();
        let body = r#"{"name":"Ada","text":"hello","utc":"2024-05-01T12:30:00.123Z"}"#;

        // Act
        let response = app.oneshot(create_request(body)).await.unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::CREATED);
        let created: Comment = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(created.name, "Ada");
        assert_eq!(store.get(&created.id).unwrap(), Some(created));
    }

    #[tokio::test]
    async fn test_create_with_blank_text_returns_422() {
        let (app, store) = router();
        let body = r#"{"name":"Ada","text":"  ","utc":"2024-05-01T12:30:00.123Z"}"#;

        let response = app.oneshot(create_request(body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(store.is_empty().unwrap());
    }

    #[tokio::test]
    async fn test_create_without_timestamp_is_rejected() {
        let (app, _) = router();
        let response = app
            .oneshot(create_request(r#"{"name":"Ada","text":"hi"}"#))
            .await
            .unwrap();
        assert!(response.status().is_client_error());
    }

    #[tokio::test]
    async fn test_index_lists_stored_comments() {
        let (app, store) = router();
        let comment = NewComment {
            name: "Grace".to_string(),
            text: "hello".to_string(),
            utc: chrono::Utc::now(),
        }
        .into_comment(Uuid::new_v4());
        store.insert(comment).unwrap();

        let response = app
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_string(response).await;
        assert!(html.contains("Grace"));
        assert!(html.contains("1 comment</p>"));
    }

    #[tokio::test]
    async fn test_show_unknown_id_returns_404() {
        let (app, _) = router();
        let uri = format!("/{}", Uuid::new_v4());
        let response = app
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_show_malformed_id_returns_404() {
        let (app, _) = router();
        let response = app
            .oneshot(Request::get("/not-a-uuid").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unknown_nested_path_hits_fallback() {
        let (app, _) = router();
        let response = app
            .oneshot(Request::get("/a/b/c").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_string(response).await, "404 not found");
    }
}
