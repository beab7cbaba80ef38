//! Response helpers: rows are always rendered through `Entity::as_record`.

use crate::model::Entity;
use axum::{http::StatusCode, Json};
use serde_json::{Map, Value};

/// `{ "<key>": [record, ...] }` with 200.
pub fn keyed_records<E: Entity>(key: &str, rows: &[E]) -> (StatusCode, Json<Value>) {
    let records: Vec<Value> = rows.iter().map(E::to_json).collect();
    let mut body = Map::new();
    body.insert(key.to_string(), Value::Array(records));
    (StatusCode::OK, Json(Value::Object(body)))
}

/// A single record as a bare JSON object with 200.
pub fn record_ok<E: Entity>(row: &E) -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(row.to_json()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Book;
    use serde_json::json;

    #[test]
    fn empty_list_keeps_its_key() {
        let (status, Json(body)) = keyed_records::<Book>("books", &[]);
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"books": []}));
    }
}
