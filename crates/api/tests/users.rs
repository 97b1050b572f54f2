//! User endpoint suite against the local JSONPlaceholder stub

mod common;

use std::time::Duration;

use pretty_assertions::assert_eq;
use regex::Regex;
use serde_json::json;
use sweetcheck_api::schema::{user_schema, users_array_schema};
use sweetcheck_api::{assert_schema, ApiError, HttpMethod, RequestConfig, UserBuilder, UserDraft};

#[tokio::test]
async fn test_get_all_users() {
    let client = common::client().await;
    let response = client.get_users().await.unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(response.body.len() as u64, common::USERS);

    let raw = client
        .request_value(RequestConfig::new(HttpMethod::Get, "/users"))
        .await
        .unwrap();
    assert_schema(&raw.body, &users_array_schema()).unwrap();
}

#[tokio::test]
async fn test_response_time_is_reasonable() {
    let client = common::client().await;
    let response = client.get_users().await.unwrap();
    assert!(response.duration < Duration::from_secs(3));
}

#[tokio::test]
async fn test_get_user_by_id() {
    let client = common::client().await;
    let response = client.get_user(1).await.unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(response.body.id, 1);
    assert_schema(&serde_json::to_value(&response.body).unwrap(), &user_schema()).unwrap();

    let email = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
    assert!(email.is_match(&response.body.email));
}

#[tokio::test]
async fn test_unknown_user_is_404() {
    let client = common::client().await;
    match client.get_user(99_999).await {
        Err(ApiError::UnexpectedStatus { status, .. }) => assert_eq!(status, 404),
        other => panic!("expected 404, got {:?}", other.map(|r| r.status)),
    }
}

#[tokio::test]
async fn test_create_user() {
    let client = common::client().await;
    let draft = UserBuilder::create()
        .with_name("John Doe")
        .with_email("john@example.com")
        .build();

    let response = client.create_user(&draft).await.unwrap();
    assert_eq!(response.status, 201);
    assert_eq!(response.body.name, "John Doe");
    assert_eq!(response.body.email, "john@example.com");
    assert!(response.body.id > 0);
}

#[tokio::test]
async fn test_create_minimal_user() {
    let client = common::client().await;
    let response = client.create_user(&UserBuilder::create_minimal()).await.unwrap();
    assert_eq!(response.status, 201);
    assert!(response.body.company.is_none());
}

#[tokio::test]
async fn test_update_user() {
    let client = common::client().await;
    let draft = UserBuilder::create()
        .with_name("Updated Name")
        .with_email("updated@example.com")
        .build();

    let response = client.update_user(1, &draft).await.unwrap();
    assert_eq!(response.status, 200);
    assert_eq!(response.body.id, 1);
    assert_eq!(response.body.name, "Updated Name");
}

#[tokio::test]
async fn test_patch_user() {
    let client = common::client().await;
    let patch = UserDraft {
        name: Some("Partially Updated Name".to_string()),
        ..Default::default()
    };

    let response = client.patch_user(1, &patch).await.unwrap();
    assert_eq!(response.status, 200);
    assert_eq!(response.body["id"], 1);
    assert_eq!(response.body["name"], "Partially Updated Name");
    assert_eq!(response.body["username"], "user1");
}

#[tokio::test]
async fn test_delete_user() {
    let client = common::client().await;
    let response = client.delete_user(1).await.unwrap();
    assert_eq!(response.status, 200);
}

#[tokio::test]
async fn test_invalid_endpoint_without_status_failure() {
    let client = common::client().await;
    let response = client
        .request_value(RequestConfig::new(HttpMethod::Get, "/invalid-endpoint").allow_any_status())
        .await
        .unwrap();
    assert_eq!(response.status, 404);
}

#[tokio::test]
async fn test_malformed_create_is_accepted_or_rejected() {
    let client = common::client().await;
    let response = client
        .request_value(
            RequestConfig::new(HttpMethod::Post, "/users")
                .body(json!({ "invalid": "data" }))
                .allow_any_status(),
        )
        .await
        .unwrap();
    assert!([201, 400, 422].contains(&response.status));
}

#[tokio::test]
async fn test_auth_header_is_sent() {
    let mut client = common::client().await;
    client.base_mut().set_auth_token("token-123");
    let response = client.get_user(2).await.unwrap();
    assert_eq!(response.body.id, 2);
}
