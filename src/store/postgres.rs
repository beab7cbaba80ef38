//! PostgreSQL backend: one pooled transaction per session.

use super::{Session, Store};
use crate::config::DbConfig;
use crate::error::AppError;
use crate::model::{Association, Book, NewBook, NewReader, Pk, Reader};
use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{ConnectOptions, PgPool, Postgres, Transaction};

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        PgStore { pool }
    }

    /// Create the database if needed, open the pool and create the tables.
    pub async fn connect(config: &DbConfig) -> Result<Self, AppError> {
        ensure_database_exists(config).await?;
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(config.connect_options())
            .await?;
        crate::migration::apply_migrations(&pool).await?;
        Ok(PgStore { pool })
    }
}

#[async_trait]
impl Store for PgStore {
    async fn begin(&self) -> Result<Box<dyn Session>, AppError> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(PgSession { tx }))
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

pub struct PgSession {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl Session for PgSession {
    async fn all_books(&mut self) -> Result<Vec<Book>, AppError> {
        let sql = "SELECT pk, title, author FROM books ORDER BY pk";
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query_as::<_, Book>(sql).fetch_all(&mut *self.tx).await?;
        Ok(rows)
    }

    async fn book_by_pk(&mut self, pk: Pk) -> Result<Option<Book>, AppError> {
        let sql = "SELECT pk, title, author FROM books WHERE pk = $1";
        tracing::debug!(sql = %sql, pk, "query");
        let row = sqlx::query_as::<_, Book>(sql)
            .bind(pk)
            .fetch_optional(&mut *self.tx)
            .await?;
        Ok(row)
    }

    async fn all_readers(&mut self) -> Result<Vec<Reader>, AppError> {
        let sql = "SELECT pk, first_name, last_name FROM readers ORDER BY pk";
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query_as::<_, Reader>(sql).fetch_all(&mut *self.tx).await?;
        Ok(rows)
    }

    async fn reader_by_pk(&mut self, pk: Pk) -> Result<Option<Reader>, AppError> {
        let sql = "SELECT pk, first_name, last_name FROM readers WHERE pk = $1";
        tracing::debug!(sql = %sql, pk, "query");
        let row = sqlx::query_as::<_, Reader>(sql)
            .bind(pk)
            .fetch_optional(&mut *self.tx)
            .await?;
        Ok(row)
    }

    async fn books_of_reader(&mut self, reader_pk: Pk) -> Result<Vec<Book>, AppError> {
        let sql = r#"
            SELECT b.pk, b.title, b.author
            FROM books b
            JOIN association a ON a.book_pk = b.pk
            WHERE a.reader_pk = $1
            ORDER BY b.pk
        "#;
        tracing::debug!(sql = %sql, reader_pk, "query");
        let rows = sqlx::query_as::<_, Book>(sql)
            .bind(reader_pk)
            .fetch_all(&mut *self.tx)
            .await?;
        Ok(rows)
    }

    async fn insert_book(&mut self, new: &NewBook) -> Result<Book, AppError> {
        let sql = "INSERT INTO books (title, author) VALUES ($1, $2) RETURNING pk, title, author";
        tracing::debug!(sql = %sql, "query (tx)");
        let row = sqlx::query_as::<_, Book>(sql)
            .bind(&new.title)
            .bind(&new.author)
            .fetch_one(&mut *self.tx)
            .await?;
        Ok(row)
    }

    async fn insert_reader(&mut self, new: &NewReader) -> Result<Reader, AppError> {
        let sql = "INSERT INTO readers (first_name, last_name) VALUES ($1, $2) RETURNING pk, first_name, last_name";
        tracing::debug!(sql = %sql, "query (tx)");
        let row = sqlx::query_as::<_, Reader>(sql)
            .bind(&new.first_name)
            .bind(&new.last_name)
            .fetch_one(&mut *self.tx)
            .await?;
        Ok(row)
    }

    async fn insert_association(&mut self, link: Association) -> Result<Association, AppError> {
        let sql = "INSERT INTO association (book_pk, reader_pk) VALUES ($1, $2) RETURNING book_pk, reader_pk";
        tracing::debug!(sql = %sql, book_pk = link.book_pk, reader_pk = link.reader_pk, "query (tx)");
        let row = sqlx::query_as::<_, Association>(sql)
            .bind(link.book_pk)
            .bind(link.reader_pk)
            .fetch_one(&mut *self.tx)
            .await?;
        Ok(row)
    }

    async fn commit(self: Box<Self>) -> Result<(), AppError> {
        self.tx.commit().await?;
        Ok(())
    }
}

/// Connect to the `postgres` maintenance database and create the target database if missing.
pub async fn ensure_database_exists(config: &DbConfig) -> Result<(), AppError> {
    if config.name.is_empty() || config.name == "postgres" {
        return Ok(());
    }
    let opts: PgConnectOptions = config.connect_options().database("postgres");
    let mut conn: sqlx::PgConnection = opts.connect().await.map_err(AppError::Db)?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&config.name)
        .fetch_one(&mut conn)
        .await
        .map_err(AppError::Db)?;
    if !exists.0 {
        tracing::info!(database = %config.name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&config.name)))
            .execute(&mut conn)
            .await
            .map_err(AppError::Db)?;
    }
    Ok(())
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
