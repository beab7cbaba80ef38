//! Books resource: `GET /` and `POST /`.

use crate::error::AppError;
use crate::model::{from_body, NewBook};
use crate::response::{keyed_records, record_ok};
use crate::service::LibraryService;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    response::IntoResponse,
    Json,
};
use serde_json::Value;

pub async fn list_books(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let books = LibraryService::list_books(state.store.as_ref()).await?;
    Ok(keyed_records("books", &books))
}

pub async fn create_book(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(body) = body?;
    let new: NewBook = from_body(body)?;
    let book = LibraryService::create_book(state.store.as_ref(), &new).await?;
    Ok(record_ok(&book))
}
