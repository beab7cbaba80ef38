//! Table DDL for `books`, `readers` and their `association` join table.
//! Order follows foreign-key dependencies; every statement is idempotent.

use crate::error::AppError;
use crate::model::{Association, Book, Entity, Reader};
use sqlx::PgPool;

fn table_ddl() -> [String; 3] {
    [
        format!(
            "CREATE TABLE IF NOT EXISTS {} (\n  pk SERIAL PRIMARY KEY,\n  title VARCHAR(255) NOT NULL,\n  author VARCHAR(255) NOT NULL\n)",
            Book::TABLE
        ),
        format!(
            "CREATE TABLE IF NOT EXISTS {} (\n  pk SERIAL PRIMARY KEY,\n  first_name VARCHAR(255) NOT NULL,\n  last_name VARCHAR(255) NOT NULL\n)",
            Reader::TABLE
        ),
        format!(
            "CREATE TABLE IF NOT EXISTS {} (\n  book_pk INTEGER NOT NULL REFERENCES {}(pk),\n  reader_pk INTEGER NOT NULL REFERENCES {}(pk),\n  PRIMARY KEY (book_pk, reader_pk)\n)",
            Association::TABLE,
            Book::TABLE,
            Reader::TABLE
        ),
    ]
}

/// Create the three tables if they do not exist.
pub async fn apply_migrations(pool: &PgPool) -> Result<(), AppError> {
    for sql in table_ddl() {
        tracing::debug!(sql = %sql, "migration");
        sqlx::query(&sql).execute(pool).await?;
    }
    Ok(())
}
