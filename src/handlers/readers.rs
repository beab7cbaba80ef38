//! Reader resource: the reader's books, plus reader creation and book attachment.

use crate::error::AppError;
use crate::model::{from_body, AttachBook, NewReader, Pk};
use crate::response::{keyed_records, record_ok};
use crate::service::LibraryService;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::IntoResponse,
    Json,
};
use serde_json::Value;

fn parse_pk(raw: &str) -> Result<Pk, AppError> {
    raw.parse()
        .map_err(|_| AppError::BadRequest(format!("invalid reader_pk: '{}'", raw)))
}

pub async fn reader_books(
    State(state): State<AppState>,
    Path(reader_pk): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let reader_pk = parse_pk(&reader_pk)?;
    let books = LibraryService::reader_books(state.store.as_ref(), reader_pk).await?;
    Ok(keyed_records("data", &books))
}

pub async fn attach_book(
    State(state): State<AppState>,
    Path(reader_pk): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(body) = body?;
    let reader_pk = parse_pk(&reader_pk)?;
    let AttachBook { book_pk } = from_body(body)?;
    let link = LibraryService::attach_book(state.store.as_ref(), reader_pk, book_pk).await?;
    Ok(record_ok(&link))
}

pub async fn list_readers(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let readers = LibraryService::list_readers(state.store.as_ref()).await?;
    Ok(keyed_records("readers", &readers))
}

pub async fn create_reader(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(body) = body?;
    let new: NewReader = from_body(body)?;
    let reader = LibraryService::create_reader(state.store.as_ref(), &new).await?;
    Ok(record_ok(&reader))
}
