//! Books and reader resource routes.

use crate::handlers::{attach_book, create_book, create_reader, list_books, list_readers, reader_books};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn library_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(list_books).post(create_book))
        .route("/readers", get(list_readers).post(create_reader))
        .route("/readers/:reader_pk/books", get(reader_books).post(attach_book))
        .with_state(state)
}
