//! The `association` join table between books and readers.

use super::{Entity, Pk};
use serde::Deserialize;
use serde_json::{Map, Value};

/// A row of the `association` join table. The pair is the primary key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, sqlx::FromRow)]
pub struct Association {
    pub book_pk: Pk,
    pub reader_pk: Pk,
}

/// Body of `POST /readers/:reader_pk/books`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AttachBook {
    pub book_pk: Pk,
}

impl Entity for Association {
    const TABLE: &'static str = "association";
    const COLUMNS: &'static [&'static str] = &["book_pk", "reader_pk"];

    fn as_record(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("book_pk".into(), Value::from(self.book_pk));
        map.insert("reader_pk".into(), Value::from(self.reader_pk));
        map
    }
}
