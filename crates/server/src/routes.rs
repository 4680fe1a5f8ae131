// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP routes.
//!
//! Each complaint route maps to one [`LifecycleService`] operation. Service
//! calls block on the store and classifier, so they run on tokio's blocking
//! pool. Errors become `{"kind", "message"}` bodies: 400 for validation
//! failures and malformed requests, 500 for everything else.

use std::net::SocketAddr;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::Serialize;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use ch_core::{
    Complaint, ErrorKind, LifecycleService, NewComment, NewComplaint, StatusChange, Submitted,
};

/// Body returned by operations that only report success.
#[derive(Debug, Serialize)]
pub struct Message {
    pub message: &'static str,
}

/// An error ready to be sent as a response.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    kind: &'static str,
    message: String,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    kind: &'a str,
    message: &'a str,
}

impl ApiError {
    fn internal(message: String) -> Self {
        ApiError {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            kind: "internal",
            message,
        }
    }
}

impl From<ch_core::Error> for ApiError {
    fn from(e: ch_core::Error) -> Self {
        let kind = e.kind();
        let status = match kind {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::Store | ErrorKind::Classifier | ErrorKind::Config => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        if status.is_server_error() {
            error!("{} error: {}", kind, e);
        } else {
            warn!("rejected request: {}", e);
        }
        ApiError {
            status,
            kind: kind.as_str(),
            message: e.to_string(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        warn!("malformed request body: {}", rejection.body_text());
        ApiError {
            status: StatusCode::BAD_REQUEST,
            kind: ErrorKind::Validation.as_str(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            kind: self.kind,
            message: &self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

type ApiResult<T> = Result<Json<T>, ApiError>;

/// Build the application router.
pub fn router(service: LifecycleService) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/complaint", post(create_complaint))
        .route("/api/complaint/all", get(list_all))
        .route("/api/complaint/user/:uid", get(list_by_user))
        .route("/api/complaint/:id", get(get_complaint))
        .route("/api/complaint/:id/status", put(update_status))
        .route("/api/complaint/:id/comment", post(add_comment))
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

/// Serve the router on `addr` until Ctrl-C.
pub async fn serve(addr: SocketAddr, service: LifecycleService) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, router(service))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}

/// Run a service call on the blocking pool.
async fn call<T, F>(service: LifecycleService, op: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&LifecycleService) -> ch_core::Result<T> + Send + 'static,
{
    tokio::task::spawn_blocking(move || op(&service))
        .await
        .map_err(|e| ApiError::internal(format!("request worker failed: {e}")))?
        .map_err(ApiError::from)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

async fn create_complaint(
    State(service): State<LifecycleService>,
    body: Result<Json<NewComplaint>, JsonRejection>,
) -> ApiResult<Submitted> {
    let Json(submission) = body?;
    let submitted = call(service, move |s| s.submit(submission)).await?;
    Ok(Json(submitted))
}

async fn list_all(State(service): State<LifecycleService>) -> ApiResult<Vec<Complaint>> {
    Ok(Json(call(service, |s| s.list_all()).await?))
}

async fn list_by_user(
    State(service): State<LifecycleService>,
    Path(uid): Path<String>,
) -> ApiResult<Vec<Complaint>> {
    Ok(Json(call(service, move |s| s.list_by_user(&uid)).await?))
}

async fn get_complaint(
    State(service): State<LifecycleService>,
    Path(id): Path<String>,
) -> ApiResult<Complaint> {
    Ok(Json(call(service, move |s| s.get(&id)).await?))
}

async fn update_status(
    State(service): State<LifecycleService>,
    Path(id): Path<String>,
    body: Result<Json<StatusChange>, JsonRejection>,
) -> ApiResult<Message> {
    let Json(change) = body?;
    call(service, move |s| s.update_status(&id, change)).await?;
    Ok(Json(Message {
        message: "Complaint status updated successfully",
    }))
}

async fn add_comment(
    State(service): State<LifecycleService>,
    Path(id): Path<String>,
    body: Result<Json<NewComment>, JsonRejection>,
) -> ApiResult<Message> {
    let Json(request) = body?;
    call(service, move |s| s.add_comment(&id, request)).await?;
    Ok(Json(Message {
        message: "Comment added successfully",
    }))
}

#[cfg(test)]
#[path = "routes_tests.rs"]
mod tests;
