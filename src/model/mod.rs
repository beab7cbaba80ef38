//! Row types for the three tables and their explicit column mappings.

mod association;
mod book;
mod reader;

pub use association::{Association, AttachBook};
pub use book::{Book, NewBook};
pub use reader::{NewReader, Reader};

use serde_json::{Map, Value};

/// Primary key type shared by `books` and `readers` (Postgres `SERIAL`).
pub type Pk = i32;

/// A table row that can be flattened to `column name -> value`.
/// Only declared columns are emitted; related rows never are.
pub trait Entity {
    const TABLE: &'static str;
    const COLUMNS: &'static [&'static str];

    fn as_record(&self) -> Map<String, Value>;

    fn to_json(&self) -> Value {
        Value::Object(self.as_record())
    }
}

/// Parse a request body into an insertable row. Missing or ill-typed fields become a validation error.
pub fn from_body<T: serde::de::DeserializeOwned>(body: Value) -> Result<T, crate::error::AppError> {
    if !body.is_object() {
        return Err(crate::error::AppError::BadRequest("body must be a JSON object".into()));
    }
    serde_json::from_value(body).map_err(|e| crate::error::AppError::Validation(e.to_string()))
}
