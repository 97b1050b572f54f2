//! Post and comment endpoint suite against the local JSONPlaceholder stub

mod common;

use std::time::{Duration, Instant};

use futures::future::join_all;
use pretty_assertions::assert_eq;
use sweetcheck_api::schema::{post_schema, posts_array_schema};
use sweetcheck_api::{validate_schema, PostBuilder};

#[tokio::test]
async fn test_get_all_posts() {
    let client = common::client().await;
    let response = client.get_posts().await.unwrap();

    assert_eq!(response.status, 200);
    assert!(!response.body.is_empty());

    let body = serde_json::to_value(&response.body).unwrap();
    assert!(validate_schema(&body, &posts_array_schema()).unwrap().valid);
}

#[tokio::test]
async fn test_get_post_by_id() {
    let client = common::client().await;
    let response = client.get_post(1).await.unwrap();

    assert_eq!(response.body.id, 1);
    assert!(!response.body.title.is_empty());
    let body = serde_json::to_value(&response.body).unwrap();
    assert!(validate_schema(&body, &post_schema()).unwrap().valid);
}

#[tokio::test]
async fn test_filter_posts_by_user() {
    let client = common::client().await;
    let response = client.get_posts_by_user(1).await.unwrap();

    assert_eq!(response.body.len() as u64, common::POSTS_PER_USER);
    assert!(response.body.iter().all(|post| post.user_id == 1));
}

#[tokio::test]
async fn test_filter_posts_by_unknown_user_is_empty() {
    let client = common::client().await;
    let response = client.get_posts_by_user(99_999).await.unwrap();

    assert_eq!(response.status, 200);
    assert!(response.body.is_empty());
}

#[tokio::test]
async fn test_create_post() {
    let client = common::client().await;
    let draft = PostBuilder::create()
        .with_user_id(1)
        .with_title("Test Post Title")
        .with_body("Test post body content")
        .build();

    let response = client.create_post(&draft).await.unwrap();
    assert_eq!(response.status, 201);
    assert_eq!(response.body.title, "Test Post Title");
    assert_eq!(response.body.body, "Test post body content");
    assert_eq!(response.body.user_id, 1);
}

#[tokio::test]
async fn test_create_many_posts() {
    let client = common::client().await;
    for draft in PostBuilder::create_many(3, Some(1)) {
        let response = client.create_post(&draft).await.unwrap();
        assert_eq!(response.status, 201);
        assert_eq!(response.body.user_id, 1);
    }
}

#[tokio::test]
async fn test_update_post() {
    let client = common::client().await;
    let draft = PostBuilder::create()
        .with_user_id(1)
        .with_title("Updated Title")
        .with_body("Updated body content")
        .build();

    let response = client.update_post(1, &draft).await.unwrap();
    assert_eq!(response.status, 200);
    assert_eq!(response.body.id, 1);
    assert_eq!(response.body.title, "Updated Title");
}

#[tokio::test]
async fn test_delete_post() {
    let client = common::client().await;
    assert_eq!(client.delete_post(1).await.unwrap().status, 200);
}

#[tokio::test]
async fn test_comments_for_post() {
    let client = common::client().await;
    let response = client.get_comments_by_post(1).await.unwrap();

    assert_eq!(response.body.len() as u64, common::COMMENTS_PER_POST);
    assert!(response.body.iter().all(|comment| comment.post_id == 1));
    assert!(response.body.iter().all(|comment| comment.email.contains('@')));
}

#[tokio::test]
async fn test_concurrent_requests() {
    let client = common::client().await;
    let responses = join_all((1..=5).map(|id| client.get_post(id))).await;

    for (index, response) in responses.into_iter().enumerate() {
        let response = response.unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.body.id, index as u64 + 1);
    }
}

#[tokio::test]
async fn test_posts_complete_within_budget() {
    let client = common::client().await;
    let start = Instant::now();
    client.get_posts().await.unwrap();
    assert!(start.elapsed() < Duration::from_secs(3));
}
