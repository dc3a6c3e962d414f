//! Hashing - SHA-256 of Normalized Documents
//!
//! The same document always hashes the same, whatever its key order.

use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::document::InstructionDocument;

/// Lower-case hex SHA-256 of `data`
pub fn sha256_hex(data: &[u8]) -> String {
    Sha256::digest(data)
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}

/// Compact JSON with object keys sorted at every level
pub fn canonical_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string(&sorted(serde_json::to_value(value)?))
}

fn sorted(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<_> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            Value::Object(entries.into_iter().map(|(k, v)| (k, sorted(v))).collect())
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sorted).collect()),
        other => other,
    }
}

pub fn document_hash(document: &InstructionDocument) -> Result<String, serde_json::Error> {
    Ok(sha256_hex(canonical_json(document)?.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Instructions, Size};
    use serde_json::json;

    fn document(format: &str) -> InstructionDocument {
        InstructionDocument {
            dimensions: Size::new(10, 10),
            final_dimensions: Size::new(10, 10),
            instructions: Instructions::default(),
            source_file: "a.jpg".into(),
            destination_file: "b.jpg".into(),
            format: format.into(),
        }
    }

    #[test]
    fn test_canonical_json_sorted() {
        let value = json!({"z": 1, "a": {"d": 2, "b": [{"y": 1, "x": 2}]}});
        assert_eq!(
            canonical_json(&value).unwrap(),
            r#"{"a":{"b":[{"x":2,"y":1}],"d":2},"z":1}"#
        );
    }

    #[test]
    fn test_document_hash_stable_and_sensitive() {
        let h1 = document_hash(&document("jpeg")).unwrap();
        let h2 = document_hash(&document("jpeg")).unwrap();
        assert_eq!(h1, h2);
        assert_eq!(h1.len(), 64);
        assert_ne!(h1, document_hash(&document("png")).unwrap());
    }
}
