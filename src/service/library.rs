//! Library operations: each call is one session, committed before returning.

use crate::error::AppError;
use crate::model::{Association, Book, NewBook, NewReader, Pk, Reader};
use crate::store::Store;

pub struct LibraryService;

impl LibraryService {
    pub async fn list_books(store: &dyn Store) -> Result<Vec<Book>, AppError> {
        let mut session = store.begin().await?;
        session.all_books().await
    }

    /// Insert and commit. Returns the row with its generated key.
    pub async fn create_book(store: &dyn Store, new: &NewBook) -> Result<Book, AppError> {
        let mut session = store.begin().await?;
        let book = session.insert_book(new).await?;
        session.commit().await?;
        tracing::info!(pk = book.pk, title = %book.title, "book created");
        Ok(book)
    }

    pub async fn list_readers(store: &dyn Store) -> Result<Vec<Reader>, AppError> {
        let mut session = store.begin().await?;
        session.all_readers().await
    }

    pub async fn create_reader(store: &dyn Store, new: &NewReader) -> Result<Reader, AppError> {
        let mut session = store.begin().await?;
        let reader = session.insert_reader(new).await?;
        session.commit().await?;
        tracing::info!(pk = reader.pk, "reader created");
        Ok(reader)
    }

    /// Books linked to the reader. Unknown reader is `NotFound`, not an empty list.
    pub async fn reader_books(store: &dyn Store, reader_pk: Pk) -> Result<Vec<Book>, AppError> {
        let mut session = store.begin().await?;
        if session.reader_by_pk(reader_pk).await?.is_none() {
            return Err(AppError::NotFound(format!("reader {}", reader_pk)));
        }
        session.books_of_reader(reader_pk).await
    }

    /// Link an existing book to an existing reader. A repeated pair is a constraint violation.
    pub async fn attach_book(store: &dyn Store, reader_pk: Pk, book_pk: Pk) -> Result<Association, AppError> {
        let mut session = store.begin().await?;
        if session.reader_by_pk(reader_pk).await?.is_none() {
            return Err(AppError::NotFound(format!("reader {}", reader_pk)));
        }
        if session.book_by_pk(book_pk).await?.is_none() {
            return Err(AppError::NotFound(format!("book {}", book_pk)));
        }
        let link = session.insert_association(Association { book_pk, reader_pk }).await?;
        session.commit().await?;
        tracing::info!(book_pk, reader_pk, "book attached to reader");
        Ok(link)
    }
}
