//! `books` rows and the `POST /` payload.

use super::{Entity, Pk};
use serde::de::IgnoredAny;
use serde::Deserialize;
use serde_json::{Map, Value};

/// A row of `books`.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Book {
    pub pk: Pk,
    pub title: String,
    pub author: String,
}

/// Insert payload for `books`. Keys other than the columns are rejected; a client `pk` is accepted and dropped.
#[derive(Debug, Clone, Deserialize)]
#[serde(from = "BookBody")]
pub struct NewBook {
    pub title: String,
    pub author: String,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct BookBody {
    #[serde(default, rename = "pk")]
    _pk: Option<IgnoredAny>,
    title: String,
    author: String,
}

impl From<BookBody> for NewBook {
    fn from(body: BookBody) -> Self {
        NewBook {
            title: body.title,
            author: body.author,
        }
    }
}

impl Entity for Book {
    const TABLE: &'static str = "books";
    const COLUMNS: &'static [&'static str] = &["pk", "title", "author"];

    fn as_record(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("pk".into(), Value::from(self.pk));
        map.insert("title".into(), Value::from(self.title.as_str()));
        map.insert("author".into(), Value::from(self.author.as_str()));
        map
    }
}
