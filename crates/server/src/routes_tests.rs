// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request};
use ch_core::{Classifier, MemoryStore};
use serde_json::{json, Value};
use tower::ServiceExt;

use super::*;

/// Answers "High" for anything mentioning fire, fails otherwise.
struct FireAlarm;

impl Classifier for FireAlarm {
    fn classify(&self, text: &str) -> ch_core::Result<String> {
        if text.contains("fire") {
            Ok("High".to_string())
        } else {
            Err(ch_core::Error::Classifier("no prediction".to_string()))
        }
    }
}

fn service() -> LifecycleService {
    LifecycleService::new(Arc::new(MemoryStore::new()), Arc::new(FireAlarm))
}

async fn send(
    service: &LifecycleService,
    method: &str,
    uri: &str,
    body: Option<&str>,
) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    if body.is_some() {
        request = request.header(header::CONTENT_TYPE, "application/json");
    }
    let request = request
        .body(body.map(|b| Body::from(b.to_string())).unwrap_or_default())
        .unwrap();

    let response = router(service.clone()).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn submit(service: &LifecycleService, body: Value) -> String {
    let (status, value) = send(service, "POST", "/api/complaint", Some(&body.to_string())).await;
    assert_eq!(status, StatusCode::OK, "{value}");
    value["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_reports_ok() {
    let (status, body) = send(&service(), "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));
}

#[tokio::test]
async fn submit_returns_id_and_message() {
    let service = service();
    let body = json!({"uid": "u1", "description": "leaking pipe", "title": "Pipe"});

    let (status, value) =
        send(&service, "POST", "/api/complaint", Some(&body.to_string())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(value["message"], "Complaint created successfully");
    let id = value["id"].as_str().unwrap();

    let (status, stored) = send(&service, "GET", &format!("/api/complaint/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stored["uid"], "u1");
    assert_eq!(stored["title"], "Pipe");
    assert!(stored["timestamp"].is_string());
    assert_eq!(stored["updates"], json!([]));
    assert_eq!(stored["comments"], json!([]));
}

#[tokio::test]
async fn submit_without_uid_is_bad_request() {
    let service = service();
    let (status, value) = send(
        &service,
        "POST",
        "/api/complaint",
        Some(r#"{"description": "no owner"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(value["kind"], "validation");
    assert!(value["message"].as_str().unwrap().contains("missing uid"));

    let (_, all) = send(&service, "GET", "/api/complaint/all", None).await;
    assert_eq!(all, json!([]));
}

#[tokio::test]
async fn malformed_body_is_bad_request() {
    let (status, value) = send(&service(), "POST", "/api/complaint", Some("{not json")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(value["kind"], "validation");
}

#[tokio::test]
async fn missing_content_type_is_bad_request() {
    let service = service();
    let request = Request::builder()
        .method("POST")
        .uri("/api/complaint")
        .body(Body::from(r#"{"uid": "u1"}"#))
        .unwrap();

    let response = router(service).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn list_all_fills_missing_priorities() {
    let service = service();
    submit(&service, json!({"uid": "u1", "description": "fire in hall"})).await;
    submit(&service, json!({"uid": "u2", "description": "slow wifi"})).await;
    submit(&service, json!({"uid": "u3", "description": "fire", "priority": "Low"})).await;

    let (status, all) = send(&service, "GET", "/api/complaint/all", None).await;

    assert_eq!(status, StatusCode::OK);
    let priorities: Vec<&str> = all
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["priority"].as_str().unwrap())
        .collect();
    assert_eq!(priorities, vec!["High", "Unknown", "Low"]);
}

#[tokio::test]
async fn list_by_user_filters_without_enrichment() {
    let service = service();
    submit(&service, json!({"uid": "u1", "description": "fire"})).await;
    submit(&service, json!({"uid": "u2", "description": "fire"})).await;

    let (status, mine) = send(&service, "GET", "/api/complaint/user/u1", None).await;

    assert_eq!(status, StatusCode::OK);
    let mine = mine.as_array().unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0]["uid"], "u1");
    assert!(mine[0].get("priority").is_none());
}

#[tokio::test]
async fn list_by_unknown_user_is_empty() {
    let (status, value) = send(&service(), "GET", "/api/complaint/user/nobody", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(value, json!([]));
}

#[tokio::test]
async fn get_missing_complaint_is_store_error() {
    let (status, value) = send(&service(), "GET", "/api/complaint/absent", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(value["kind"], "store");
}

#[tokio::test]
async fn update_status_records_history() {
    let service = service();
    let id = submit(&service, json!({"uid": "u1", "status": "Pending"})).await;

    let (status, value) = send(
        &service,
        "PUT",
        &format!("/api/complaint/{id}/status"),
        Some(r#"{"status": "Resolved", "updatedBy": "ops", "description": "fixed"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(value["message"], "Complaint status updated successfully");

    let (_, stored) = send(&service, "GET", &format!("/api/complaint/{id}"), None).await;
    assert_eq!(stored["status"], "Resolved");
    assert_eq!(stored["updatedBy"], "ops");
    assert!(stored["updatedAt"].is_string());
    let updates = stored["updates"].as_array().unwrap();
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0]["by"], "ops");
    assert_eq!(updates[0]["status"], "Resolved");
    assert_eq!(updates[0]["description"], "fixed");
}

#[tokio::test]
async fn update_status_of_missing_complaint_fails() {
    let (status, value) = send(
        &service(),
        "PUT",
        "/api/complaint/absent/status",
        Some(r#"{"status": "Resolved"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(value["kind"], "store");
    assert!(value["message"].as_str().unwrap().contains("field overwrite"));
}

#[tokio::test]
async fn add_comment_uses_default_author() {
    let service = service();
    let id = submit(&service, json!({"uid": "u1"})).await;

    let (status, value) = send(
        &service,
        "POST",
        &format!("/api/complaint/{id}/comment"),
        Some(r#"{"content": "looking into it"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(value["message"], "Comment added successfully");

    let (_, stored) = send(&service, "GET", &format!("/api/complaint/{id}"), None).await;
    let comments = stored["comments"].as_array().unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0]["userId"], "admin");
    assert_eq!(comments[0]["userName"], "Admin");
    assert_eq!(comments[0]["content"], "looking into it");
}

#[tokio::test]
async fn blank_comment_is_bad_request() {
    let service = service();
    let id = submit(&service, json!({"uid": "u1"})).await;

    let (status, value) = send(
        &service,
        "POST",
        &format!("/api/complaint/{id}/comment"),
        Some(r#"{"content": "   "}"#),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(value["kind"], "validation");
    let (_, stored) = send(&service, "GET", &format!("/api/complaint/{id}"), None).await;
    assert_eq!(stored["comments"], json!([]));
}
