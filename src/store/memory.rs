//! In-process backend. A session holds the table lock for its whole lifetime and
//! works on a staged copy, so commit is a single swap and drop is a rollback.

use super::{Session, Store, MAX_TEXT_LEN};
use crate::error::AppError;
use crate::model::{Association, Book, NewBook, NewReader, Pk, Reader};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

#[derive(Clone, Debug, Default)]
struct Tables {
    books: Vec<Book>,
    readers: Vec<Reader>,
    association: Vec<Association>,
    book_seq: Pk,
    reader_seq: Pk,
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn begin(&self) -> Result<Box<dyn Session>, AppError> {
        let guard = self.tables.clone().lock_owned().await;
        let staged = Tables::clone(&guard);
        Ok(Box::new(MemorySession { guard, staged }))
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

pub struct MemorySession {
    guard: OwnedMutexGuard<Tables>,
    staged: Tables,
}

/// Same text rules Postgres applies to `VARCHAR(255)`: no NUL bytes, at most 255 characters.
fn check_text(column: &str, value: &str) -> Result<(), AppError> {
    if value.contains('\0') {
        return Err(AppError::Validation(format!("{} contains a NUL character", column)));
    }
    if value.chars().count() > MAX_TEXT_LEN {
        return Err(AppError::Validation(format!(
            "value too long for {} (max {} characters)",
            column, MAX_TEXT_LEN
        )));
    }
    Ok(())
}

#[async_trait]
impl Session for MemorySession {
    async fn all_books(&mut self) -> Result<Vec<Book>, AppError> {
        Ok(self.staged.books.clone())
    }

    async fn book_by_pk(&mut self, pk: Pk) -> Result<Option<Book>, AppError> {
        Ok(self.staged.books.iter().find(|b| b.pk == pk).cloned())
    }

    async fn all_readers(&mut self) -> Result<Vec<Reader>, AppError> {
        Ok(self.staged.readers.clone())
    }

    async fn reader_by_pk(&mut self, pk: Pk) -> Result<Option<Reader>, AppError> {
        Ok(self.staged.readers.iter().find(|r| r.pk == pk).cloned())
    }

    async fn books_of_reader(&mut self, reader_pk: Pk) -> Result<Vec<Book>, AppError> {
        let mut books: Vec<Book> = self
            .staged
            .association
            .iter()
            .filter(|a| a.reader_pk == reader_pk)
            .filter_map(|a| self.staged.books.iter().find(|b| b.pk == a.book_pk).cloned())
            .collect();
        books.sort_by_key(|b| b.pk);
        Ok(books)
    }

    async fn insert_book(&mut self, new: &NewBook) -> Result<Book, AppError> {
        check_text("title", &new.title)?;
        check_text("author", &new.author)?;
        self.staged.book_seq += 1;
        let book = Book {
            pk: self.staged.book_seq,
            title: new.title.clone(),
            author: new.author.clone(),
        };
        self.staged.books.push(book.clone());
        Ok(book)
    }

    async fn insert_reader(&mut self, new: &NewReader) -> Result<Reader, AppError> {
        check_text("first_name", &new.first_name)?;
        check_text("last_name", &new.last_name)?;
        self.staged.reader_seq += 1;
        let reader = Reader {
            pk: self.staged.reader_seq,
            first_name: new.first_name.clone(),
            last_name: new.last_name.clone(),
        };
        self.staged.readers.push(reader.clone());
        Ok(reader)
    }

    async fn insert_association(&mut self, link: Association) -> Result<Association, AppError> {
        if !self.staged.books.iter().any(|b| b.pk == link.book_pk) {
            return Err(AppError::Constraint(format!("book {} does not exist", link.book_pk)));
        }
        if !self.staged.readers.iter().any(|r| r.pk == link.reader_pk) {
            return Err(AppError::Constraint(format!("reader {} does not exist", link.reader_pk)));
        }
        if self.staged.association.contains(&link) {
            return Err(AppError::Constraint(format!(
                "book {} is already associated with reader {}",
                link.book_pk, link.reader_pk
            )));
        }
        self.staged.association.push(link);
        Ok(link)
    }

    async fn commit(self: Box<Self>) -> Result<(), AppError> {
        let MemorySession { mut guard, staged } = *self;
        *guard = staged;
        Ok(())
    }
}
