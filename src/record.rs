//! Dynamic record access.
//!
//! Record shapes are owned by the remote API and change without notice,
//! so records stay dynamic JSON. The extractors here turn the handful of
//! keys the reshaping logic relies on into typed errors when absent.

use std::collections::HashSet;

use serde::Deserialize;
use serde_json::Value;

use crate::error::GraphError;
use crate::types::ObjectId;

/// Envelope wrapper used by edge listings and FQL results (`{"data": […]}`).
#[derive(Debug, Deserialize)]
pub(crate) struct DataEnvelope {
    #[serde(default)]
    pub data: Vec<Value>,
}

/// The `id` field of a record.
pub(crate) fn id_of<'a>(record: &'a Value, context: &'static str) -> Result<&'a str, GraphError> {
    record["id"]
        .as_str()
        .ok_or(GraphError::MissingField { field: "id", context })
}

/// The `object_id` field of an FQL row. Old-style rows carry it as a
/// number, newer ones as a string.
pub(crate) fn object_id_of(row: &Value, context: &'static str) -> Result<ObjectId, GraphError> {
    match &row["object_id"] {
        Value::String(s) => Ok(ObjectId::new(s.clone())),
        Value::Number(n) => Ok(ObjectId::new(n.to_string())),
        _ => Err(GraphError::MissingField {
            field: "object_id",
            context,
        }),
    }
}

/// Interpret a response as a list of records.
pub(crate) fn expect_array(value: Value, context: &str) -> Result<Vec<Value>, GraphError> {
    match value {
        Value::Array(items) => Ok(items),
        _ => Err(GraphError::UnexpectedShape {
            context: context.to_string(),
            expected: "array of records",
        }),
    }
}

/// Collect the id of every photo attached to an album record.
pub(crate) fn photo_id_set(album: &Value) -> Result<HashSet<String>, GraphError> {
    let photos = album["photos"].as_array().ok_or(GraphError::MissingField {
        field: "photos",
        context: "album",
    })?;
    photos
        .iter()
        .map(|photo| id_of(photo, "photo").map(str::to_string))
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_envelope_defaults_to_empty() {
        let env: DataEnvelope = serde_json::from_str("{}").unwrap();
        assert!(env.data.is_empty());
    }

    #[test]
    fn test_id_of_missing_key() {
        let rec = json!({"name": "no id here"});
        let err = id_of(&rec, "photo").unwrap_err();
        assert!(matches!(
            err,
            GraphError::MissingField {
                field: "id",
                context: "photo"
            }
        ));
    }

    #[test]
    fn test_object_id_of_accepts_string_and_number() {
        let s = json!({"object_id": "77", "aid": "1_2"});
        assert_eq!(object_id_of(&s, "album").unwrap(), ObjectId::from("77"));
        let n = json!({"object_id": 77, "aid": "1_2"});
        assert_eq!(object_id_of(&n, "album").unwrap(), ObjectId::from("77"));
    }

    #[test]
    fn test_expect_array_rejects_objects() {
        let err = expect_array(json!({"data": []}), "u1/friends").unwrap_err();
        assert!(matches!(err, GraphError::UnexpectedShape { .. }));
    }

    #[test]
    fn test_photo_id_set() {
        let album = json!({
            "id": "a1",
            "photos": [{"id": "p1"}, {"id": "p2"}]
        });
        let ids = photo_id_set(&album).unwrap();
        assert_eq!(ids, HashSet::from(["p1".to_string(), "p2".to_string()]));
    }

    #[test]
    fn test_photo_id_set_without_photos_is_a_fault() {
        let album = json!({"id": "a1"});
        assert!(photo_id_set(&album).is_err());
    }
}
