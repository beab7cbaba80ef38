//! Router assembly.

mod common;
mod library;

pub use common::common_routes;
pub use library::library_routes;

use crate::state::AppState;
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Request bodies are small JSON objects.
pub const BODY_LIMIT_BYTES: usize = 64 * 1024;

/// The full application: resources, operational endpoints, body limit and request tracing.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(library_routes(state))
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Association, NewBook, NewReader};
    use crate::store::{MemoryStore, Store};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(b) => builder
                .header("content-type", "application/json")
                .body(Body::from(b.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    #[tokio::test]
    async fn empty_store_lists_no_books() {
        let app = app(AppState::new(MemoryStore::new()));
        let (status, body) = send(&app, "GET", "/", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"books": []}));
    }

    #[tokio::test]
    async fn posted_book_appears_once_with_a_fresh_key() {
        let app = app(AppState::new(MemoryStore::new()));
        let (_, first) = send(&app, "POST", "/", Some(json!({"title": "Dune", "author": "Frank Herbert"}))).await;

        let (status, created) = send(
            &app,
            "POST",
            "/",
            Some(json!({"pk": first["pk"], "title": "Emma", "author": "Jane Austen"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(created["title"], "Emma");
        assert_eq!(created["author"], "Jane Austen");
        assert_ne!(created["pk"], first["pk"]);

        let (_, listed) = send(&app, "GET", "/", None).await;
        let books = listed["books"].as_array().unwrap();
        assert_eq!(books.len(), 2);
        assert_eq!(books.iter().filter(|b| b["title"] == "Emma").count(), 1);
        assert!(books.contains(&created));
    }

    #[tokio::test]
    async fn book_without_author_is_rejected() {
        let app = app(AppState::new(MemoryStore::new()));
        let (status, body) = send(&app, "POST", "/", Some(json!({"title": "Untitled"}))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "validation_error");

        let (_, listed) = send(&app, "GET", "/", None).await;
        assert_eq!(listed, json!({"books": []}));
    }

    #[tokio::test]
    async fn book_with_extra_keys_is_rejected() {
        let app = app(AppState::new(MemoryStore::new()));
        let body = json!({"title": "Dune", "author": "Herbert", "isbn": "123", "reader_pk": 5});
        let (status, body) = send(&app, "POST", "/", Some(body)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "validation_error");

        let (_, listed) = send(&app, "GET", "/", None).await;
        assert_eq!(listed, json!({"books": []}));
    }

    #[tokio::test]
    async fn malformed_json_gets_the_error_envelope() {
        let app = app(AppState::new(MemoryStore::new()));
        let request = Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/json")
            .body(Body::from("{\"title\": \"Dune\""))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"]["code"], "bad_request");

        let request = Request::builder()
            .method("POST")
            .uri("/readers")
            .body(Body::from("first_name=Ada"))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn reader_books_lists_only_linked_books() {
        let store = MemoryStore::new();
        let (alice, bob, a, b) = {
            let mut session = store.begin().await.unwrap();
            let alice = session
                .insert_reader(&NewReader { first_name: "Alice".into(), last_name: "Liddell".into() })
                .await
                .unwrap();
            let bob = session
                .insert_reader(&NewReader { first_name: "Bob".into(), last_name: "Cratchit".into() })
                .await
                .unwrap();
            let a = session.insert_book(&NewBook { title: "A".into(), author: "X".into() }).await.unwrap();
            let b = session.insert_book(&NewBook { title: "B".into(), author: "Y".into() }).await.unwrap();
            let c = session.insert_book(&NewBook { title: "C".into(), author: "Z".into() }).await.unwrap();
            for (book_pk, reader_pk) in [(a.pk, alice.pk), (b.pk, alice.pk), (c.pk, bob.pk)] {
                session.insert_association(Association { book_pk, reader_pk }).await.unwrap();
            }
            session.commit().await.unwrap();
            (alice, bob, a, b)
        };
        let app = app(AppState::new(store));

        let (status, body) = send(&app, "GET", &format!("/readers/{}/books", alice.pk), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"data": [
                {"pk": a.pk, "title": "A", "author": "X"},
                {"pk": b.pk, "title": "B", "author": "Y"}
            ]})
        );

        let (_, body) = send(&app, "GET", &format!("/readers/{}/books", bob.pk), None).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn reader_without_books_gets_empty_data() {
        let app = app(AppState::new(MemoryStore::new()));
        let (_, reader) = send(&app, "POST", "/readers", Some(json!({"first_name": "Ada", "last_name": "Lovelace"}))).await;
        let (status, body) = send(&app, "GET", &format!("/readers/{}/books", reader["pk"]), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"data": []}));
    }

    #[tokio::test]
    async fn unknown_reader_is_404_and_server_keeps_serving() {
        let app = app(AppState::new(MemoryStore::new()));
        let (status, body) = send(&app, "GET", "/readers/404/books", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "not_found");

        let (status, _) = send(&app, "GET", "/readers/abc/books", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(&app, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn attaching_books_over_http() {
        let app = app(AppState::new(MemoryStore::new()));
        let (_, book) = send(&app, "POST", "/", Some(json!({"title": "Dune", "author": "Frank Herbert"}))).await;
        let (_, reader) = send(&app, "POST", "/readers", Some(json!({"first_name": "Ada", "last_name": "Lovelace"}))).await;
        let uri = format!("/readers/{}/books", reader["pk"]);

        let (status, link) = send(&app, "POST", &uri, Some(json!({"book_pk": book["pk"]}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(link, json!({"book_pk": book["pk"], "reader_pk": reader["pk"]}));

        let (status, body) = send(&app, "POST", &uri, Some(json!({"book_pk": book["pk"]}))).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["code"], "constraint_violation");

        let (_, listed) = send(&app, "GET", &uri, None).await;
        assert_eq!(listed, json!({"data": [book]}));

        let (_, readers) = send(&app, "GET", "/readers", None).await;
        assert_eq!(readers, json!({"readers": [reader]}));
    }

    #[tokio::test]
    async fn ready_reports_store_status() {
        let app = app(AppState::new(MemoryStore::new()));
        let (status, body) = send(&app, "GET", "/ready", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "ok", "database": "ok"}));

        let (_, version) = send(&app, "GET", "/version", None).await;
        assert_eq!(version["name"], "bookshelf");
    }
}
