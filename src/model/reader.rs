//! `readers` rows and the `POST /readers` payload.

use super::{Entity, Pk};
use serde::de::IgnoredAny;
use serde::Deserialize;
use serde_json::{Map, Value};

/// A row of `readers`.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Reader {
    pub pk: Pk,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(from = "ReaderBody")]
pub struct NewReader {
    pub first_name: String,
    pub last_name: String,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ReaderBody {
    #[serde(default, rename = "pk")]
    _pk: Option<IgnoredAny>,
    first_name: String,
    last_name: String,
}

impl From<ReaderBody> for NewReader {
    fn from(body: ReaderBody) -> Self {
        NewReader {
            first_name: body.first_name,
            last_name: body.last_name,
        }
    }
}

impl Entity for Reader {
    const TABLE: &'static str = "readers";
    const COLUMNS: &'static [&'static str] = &["pk", "first_name", "last_name"];

    fn as_record(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("pk".into(), Value::from(self.pk));
        map.insert("first_name".into(), Value::from(self.first_name.as_str()));
        map.insert("last_name".into(), Value::from(self.last_name.as_str()));
        map
    }
}
