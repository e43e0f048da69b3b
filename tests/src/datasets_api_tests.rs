//! Router-level tests for the dataset CRUD routes over an in-memory store.

use anyhow::Result;
use axum::http::StatusCode;
use serde_json::json;

use crate::utils::{call, create_body, datasets, find, offline_app};

// ── Create / list ───────────────────────────────────────────────────

#[tokio::test]
async fn test_create_then_list() -> Result<()> {
    let app = offline_app()?;

    let (status, body) = call(&app, "POST", "/datasets/create", Some(create_body(json!("123"), "G"))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "response": "Created dataset 123" }));

    let (status, body) = call(&app, "GET", "/datasets/", None).await?;
    assert_eq!(status, StatusCode::OK);
    let list = datasets(&body);
    assert_eq!(list.len(), 1);
    assert_eq!(
        list[0],
        json!({
            "privacy_group_id": "123",
            "privacy_group_name": "G",
            "description": "d",
            "fetcher_active": true,
            "matcher_active": false,
            "write_back": false,
            "in_use": true
        })
    );
    Ok(())
}

#[tokio::test]
async fn test_list_without_trailing_slash() -> Result<()> {
    let app = offline_app()?;

    let (status, body) = call(&app, "GET", "/datasets", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "datasets_response": [] }));
    Ok(())
}

#[tokio::test]
async fn test_numeric_id_is_normalized() -> Result<()> {
    let app = offline_app()?;

    let (status, body) = call(&app, "POST", "/datasets/create", Some(create_body(json!(456), "N"))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], "Created dataset 456");

    // Same group addressed as a string is the same record.
    let (_, _) = call(&app, "POST", "/datasets/create", Some(create_body(json!("456"), "Other"))).await?;

    let (_, body) = call(&app, "GET", "/datasets/", None).await?;
    let list = datasets(&body);
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["privacy_group_id"], "456");
    assert_eq!(list[0]["privacy_group_name"], "N");
    Ok(())
}

#[tokio::test]
async fn test_create_is_idempotent() -> Result<()> {
    let app = offline_app()?;

    call(&app, "POST", "/datasets/create", Some(create_body(json!("1"), "first"))).await?;
    let mut second = create_body(json!("1"), "second");
    second["matcher_active"] = json!(true);
    let (status, body) = call(&app, "POST", "/datasets/create", Some(second)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], "Created dataset 1");

    let (_, body) = call(&app, "GET", "/datasets/", None).await?;
    let list = datasets(&body);
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["privacy_group_name"], "first");
    assert_eq!(list[0]["matcher_active"], false);
    Ok(())
}

// ── Malformed requests ──────────────────────────────────────────────

#[tokio::test]
async fn test_create_missing_field_is_bad_request() -> Result<()> {
    let app = offline_app()?;
    let mut body = create_body(json!("1"), "G");
    body.as_object_mut().unwrap().remove("write_back");

    let (status, body) = call(&app, "POST", "/datasets/create", Some(body)).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("write_back"));

    let (_, body) = call(&app, "GET", "/datasets/", None).await?;
    assert!(datasets(&body).is_empty());
    Ok(())
}

#[tokio::test]
async fn test_create_mistyped_and_unknown_fields_are_bad_request() -> Result<()> {
    let app = offline_app()?;

    let mut mistyped = create_body(json!("1"), "G");
    mistyped["fetcher_active"] = json!("yes");
    let (status, _) = call(&app, "POST", "/datasets/create", Some(mistyped)).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut unknown = create_body(json!("1"), "G");
    unknown["in_use"] = json!(false);
    let (status, _) = call(&app, "POST", "/datasets/create", Some(unknown)).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = call(&app, "POST", "/datasets/create", Some(create_body(json!(""), "G"))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn test_missing_body_is_bad_request() -> Result<()> {
    let app = offline_app()?;

    let (status, body) = call(&app, "POST", "/datasets/update", None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    Ok(())
}

// ── Update ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_update_only_changes_flags() -> Result<()> {
    let app = offline_app()?;
    call(&app, "POST", "/datasets/create", Some(create_body(json!("123"), "G"))).await?;

    let (status, body) = call(
        &app,
        "POST",
        "/datasets/update",
        Some(json!({
            "privacy_group_id": 123,
            "fetcher_active": false,
            "matcher_active": true,
            "write_back": true
        })),
    )
    .await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "privacy_group_id": "123",
            "privacy_group_name": "G",
            "description": "d",
            "fetcher_active": false,
            "matcher_active": true,
            "write_back": true,
            "in_use": true
        })
    );

    let (_, list) = call(&app, "GET", "/datasets/", None).await?;
    assert_eq!(datasets(&list), vec![body]);
    Ok(())
}

#[tokio::test]
async fn test_update_unknown_id_is_not_found() -> Result<()> {
    let app = offline_app()?;

    let (status, body) = call(
        &app,
        "POST",
        "/datasets/update",
        Some(json!({
            "privacy_group_id": "404",
            "fetcher_active": true,
            "matcher_active": true,
            "write_back": true
        })),
    )
    .await?;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);

    let (_, body) = call(&app, "GET", "/datasets/", None).await?;
    assert!(datasets(&body).is_empty());
    Ok(())
}

// ── Delete ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_delete_removes_dataset() -> Result<()> {
    let app = offline_app()?;
    call(&app, "POST", "/datasets/create", Some(create_body(json!("123"), "G"))).await?;
    call(&app, "POST", "/datasets/create", Some(create_body(json!("124"), "H"))).await?;

    let (status, body) = call(&app, "POST", "/datasets/delete/123", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "response": "The privacy group is deleted" }));

    let (_, body) = call(&app, "GET", "/datasets/", None).await?;
    let list = datasets(&body);
    assert!(find(&list, "123").is_none());
    assert!(find(&list, "124").is_some());
    Ok(())
}

#[tokio::test]
async fn test_delete_unknown_id_is_not_found() -> Result<()> {
    let app = offline_app()?;

    let (status, body) = call(&app, "POST", "/datasets/delete/999", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    Ok(())
}

// ── Ambient ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_health_counts_dataset_requests() -> Result<()> {
    let app = offline_app()?;
    call(&app, "GET", "/datasets/", None).await?;
    call(&app, "POST", "/datasets/delete/1", None).await?;

    let (status, body) = call(&app, "GET", "/health", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["store_backend"], "memory");
    assert_eq!(body["requests"], 2);
    Ok(())
}

#[tokio::test]
async fn test_request_id_is_echoed() -> Result<()> {
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    let app = offline_app()?;

    let request = Request::builder()
        .uri("/datasets/")
        .header("x-request-id", "abc-123")
        .body(Body::empty())?;
    let response = app.clone().oneshot(request).await?;
    assert_eq!(response.headers()["x-request-id"], "abc-123");

    let request = Request::builder().uri("/datasets/").body(Body::empty())?;
    let response = app.oneshot(request).await?;
    let generated = response.headers()["x-request-id"].to_str()?;
    assert!(generated.starts_with("ds-"));
    Ok(())
}
