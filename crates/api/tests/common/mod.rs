//! In-process stand-in for the JSONPlaceholder API
//!
//! Serves deterministic users, posts, comments, todos, albums and photos on
//! an ephemeral port. Writes are echoed back the way the real service does
//! and never persisted.

#![allow(dead_code)]

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use sweetcheck_api::ApiClient;

pub const USERS: u64 = 10;
pub const POSTS_PER_USER: u64 = 10;
pub const TODOS_PER_USER: u64 = 20;
pub const COMMENTS_PER_POST: u64 = 5;

struct Data {
    users: Vec<Value>,
    posts: Vec<Value>,
    comments: Vec<Value>,
    todos: Vec<Value>,
    albums: Vec<Value>,
    photos: Vec<Value>,
}

impl Data {
    fn seed() -> Self {
        let users = (1..=USERS)
            .map(|id| {
                json!({
                    "id": id,
                    "name": format!("User {}", id),
                    "username": format!("user{}", id),
                    "email": format!("user{}@example.com", id),
                    "address": {
                        "street": "Kulas Light",
                        "suite": format!("Apt. {}", id),
                        "city": "Gwenborough",
                        "zipcode": "92998-3874",
                        "geo": { "lat": "-37.3159", "lng": "81.1496" }
                    },
                    "phone": "1-770-736-8031",
                    "website": "hildegard.org",
                    "company": { "name": "Romaguera-Crona", "catchPhrase": "Multi-layered", "bs": "e-markets" }
                })
            })
            .collect();

        let posts: Vec<Value> = (1..=USERS * POSTS_PER_USER)
            .map(|id| {
                json!({
                    "id": id,
                    "userId": (id - 1) / POSTS_PER_USER + 1,
                    "title": format!("post title {}", id),
                    "body": format!("post body {}", id)
                })
            })
            .collect();

        let comments = (1..=posts.len() as u64 * COMMENTS_PER_POST)
            .map(|id| {
                json!({
                    "id": id,
                    "postId": (id - 1) / COMMENTS_PER_POST + 1,
                    "name": format!("comment {}", id),
                    "email": format!("commenter{}@example.com", id),
                    "body": "comment body"
                })
            })
            .collect();

        let todos = (1..=USERS * TODOS_PER_USER)
            .map(|id| {
                json!({
                    "id": id,
                    "userId": (id - 1) / TODOS_PER_USER + 1,
                    "title": format!("todo {}", id),
                    "completed": id % 3 == 0
                })
            })
            .collect();

        let albums = (1..=USERS)
            .map(|id| json!({ "id": id, "userId": id, "title": format!("album {}", id) }))
            .collect();

        let photos = (1..=USERS * 2)
            .map(|id| {
                json!({
                    "id": id,
                    "albumId": (id - 1) / 2 + 1,
                    "title": format!("photo {}", id),
                    "url": format!("https://via.placeholder.com/600/{}", id),
                    "thumbnailUrl": format!("https://via.placeholder.com/150/{}", id)
                })
            })
            .collect();

        Self {
            users,
            posts,
            comments,
            todos,
            albums,
            photos,
        }
    }
}

type Shared = State<Arc<Data>>;

#[derive(Debug, Deserialize)]
struct OwnerFilter {
    #[serde(rename = "userId")]
    user_id: Option<u64>,
}

fn find(items: &[Value], id: u64) -> Option<&Value> {
    items.iter().find(|item| item["id"] == id)
}

fn found_or_404(item: Option<&Value>) -> Response {
    match item {
        Some(item) => Json(item.clone()).into_response(),
        None => (StatusCode::NOT_FOUND, Json(json!({}))).into_response(),
    }
}

fn filter_by(items: &[Value], key: &str, id: u64) -> Vec<Value> {
    items.iter().filter(|item| item[key] == id).cloned().collect()
}

fn owned(items: &[Value], filter: &OwnerFilter) -> Json<Vec<Value>> {
    match filter.user_id {
        Some(user_id) => Json(filter_by(items, "userId", user_id)),
        None => Json(items.to_vec()),
    }
}

fn with_id(body: Value, id: u64) -> Value {
    let mut object = match body {
        Value::Object(object) => object,
        _ => Map::new(),
    };
    object.insert("id".to_string(), json!(id));
    Value::Object(object)
}

fn created(body: Value, next_id: usize) -> Response {
    (StatusCode::CREATED, Json(with_id(body, next_id as u64 + 1))).into_response()
}

fn replaced(items: &[Value], id: u64, body: Value) -> Response {
    match find(items, id) {
        Some(_) => Json(with_id(body, id)).into_response(),
        None => (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({}))).into_response(),
    }
}

fn merged(items: &[Value], id: u64, body: Value) -> Response {
    let Some(Value::Object(existing)) = find(items, id).cloned() else {
        return (StatusCode::NOT_FOUND, Json(json!({}))).into_response();
    };
    let mut object = existing;
    if let Value::Object(patch) = body {
        object.extend(patch);
    }
    Json(Value::Object(object)).into_response()
}

async fn list_users(State(data): Shared) -> Json<Vec<Value>> {
    Json(data.users.clone())
}

async fn get_user(State(data): Shared, Path(id): Path<u64>) -> Response {
    found_or_404(find(&data.users, id))
}

async fn create_user(State(data): Shared, Json(body): Json<Value>) -> Response {
    created(body, data.users.len())
}

async fn put_user(State(data): Shared, Path(id): Path<u64>, Json(body): Json<Value>) -> Response {
    replaced(&data.users, id, body)
}

async fn patch_user(State(data): Shared, Path(id): Path<u64>, Json(body): Json<Value>) -> Response {
    merged(&data.users, id, body)
}

async fn delete_any() -> Json<Value> {
    Json(json!({}))
}

async fn list_posts(State(data): Shared, Query(filter): Query<OwnerFilter>) -> Json<Vec<Value>> {
    owned(&data.posts, &filter)
}

async fn get_post(State(data): Shared, Path(id): Path<u64>) -> Response {
    found_or_404(find(&data.posts, id))
}

async fn create_post(State(data): Shared, Json(body): Json<Value>) -> Response {
    created(body, data.posts.len())
}

async fn put_post(State(data): Shared, Path(id): Path<u64>, Json(body): Json<Value>) -> Response {
    replaced(&data.posts, id, body)
}

async fn post_comments(State(data): Shared, Path(id): Path<u64>) -> Json<Vec<Value>> {
    Json(filter_by(&data.comments, "postId", id))
}

async fn list_comments(State(data): Shared) -> Json<Vec<Value>> {
    Json(data.comments.clone())
}

async fn create_comment(State(data): Shared, Json(body): Json<Value>) -> Response {
    created(body, data.comments.len())
}

async fn list_todos(State(data): Shared, Query(filter): Query<OwnerFilter>) -> Json<Vec<Value>> {
    owned(&data.todos, &filter)
}

async fn get_todo(State(data): Shared, Path(id): Path<u64>) -> Response {
    found_or_404(find(&data.todos, id))
}

async fn create_todo(State(data): Shared, Json(body): Json<Value>) -> Response {
    created(body, data.todos.len())
}

async fn put_todo(State(data): Shared, Path(id): Path<u64>, Json(body): Json<Value>) -> Response {
    replaced(&data.todos, id, body)
}

async fn list_albums(State(data): Shared) -> Json<Vec<Value>> {
    Json(data.albums.clone())
}

async fn get_album(State(data): Shared, Path(id): Path<u64>) -> Response {
    found_or_404(find(&data.albums, id))
}

async fn album_photos(State(data): Shared, Path(id): Path<u64>) -> Json<Vec<Value>> {
    Json(filter_by(&data.photos, "albumId", id))
}

async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({}))).into_response()
}

fn router() -> Router {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/:id",
            get(get_user).put(put_user).patch(patch_user).delete(delete_any),
        )
        .route("/posts", get(list_posts).post(create_post))
        .route("/posts/:id", get(get_post).put(put_post).delete(delete_any))
        .route("/posts/:id/comments", get(post_comments))
        .route("/comments", get(list_comments).post(create_comment))
        .route("/todos", get(list_todos).post(create_todo))
        .route("/todos/:id", get(get_todo).put(put_todo).delete(delete_any))
        .route("/albums", get(list_albums))
        .route("/albums/:id", get(get_album))
        .route("/albums/:id/photos", get(album_photos))
        .fallback(not_found)
        .with_state(Arc::new(Data::seed()))
}

/// Start the stub on an ephemeral port and return its base URL
pub async fn spawn_stub() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub listener");
    let addr = listener.local_addr().expect("stub address");
    tokio::spawn(async move {
        axum::serve(listener, router()).await.expect("stub server");
    });
    format!("http://{}", addr)
}

pub async fn client() -> ApiClient {
    ApiClient::with_base_url(spawn_stub().await).expect("api client")
}
