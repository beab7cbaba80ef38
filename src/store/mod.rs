//! Persistence access: a `Store` opens `Session`s, each session is one unit of work.
//! Writes become visible to other sessions only after `commit`; dropping an
//! uncommitted session rolls every pending write back.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::{ensure_database_exists, PgStore};

use crate::error::AppError;
use crate::model::{Association, Book, NewBook, NewReader, Pk, Reader};
use async_trait::async_trait;

/// Widest value accepted by the `VARCHAR(255)` columns.
pub const MAX_TEXT_LEN: usize = 255;

#[async_trait]
pub trait Store: Send + Sync {
    /// Start a unit of work.
    async fn begin(&self) -> Result<Box<dyn Session>, AppError>;

    /// Cheap connectivity probe for readiness checks.
    async fn ping(&self) -> Result<(), AppError>;
}

#[async_trait]
pub trait Session: Send {
    async fn all_books(&mut self) -> Result<Vec<Book>, AppError>;
    async fn book_by_pk(&mut self, pk: Pk) -> Result<Option<Book>, AppError>;
    async fn all_readers(&mut self) -> Result<Vec<Reader>, AppError>;
    async fn reader_by_pk(&mut self, pk: Pk) -> Result<Option<Reader>, AppError>;

    /// Books joined through `association` for one reader, ordered by book pk.
    async fn books_of_reader(&mut self, reader_pk: Pk) -> Result<Vec<Book>, AppError>;

    async fn insert_book(&mut self, new: &NewBook) -> Result<Book, AppError>;
    async fn insert_reader(&mut self, new: &NewReader) -> Result<Reader, AppError>;
    async fn insert_association(&mut self, link: Association) -> Result<Association, AppError>;

    async fn commit(self: Box<Self>) -> Result<(), AppError>;
}
