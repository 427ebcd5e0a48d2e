//! # Document Decoder
//!
//! Decodes one manifest file into its documents. Content starting with `{` is a
//! JSON stream, anything else a multi-document YAML stream. Empty documents
//! (blank, comment-only, `null` or `{}`) are dropped.

use crate::error::{GenerateError, Result};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::path::Path;
use tracing::debug;

/// Decode every non-empty document of `content`, in stream order
pub fn decode_documents(path: &Path, content: &str) -> Result<Vec<Map<String, Value>>> {
    let values = if content.trim_start().starts_with('{') {
        decode_json_stream(path, content)?
    } else {
        decode_yaml_stream(path, content)?
    };

    let mut documents = Vec::with_capacity(values.len());
    for (index, value) in values.into_iter().enumerate() {
        match value {
            Value::Null => debug!("Skipping empty document {index} in {}", path.display()),
            Value::Object(map) if map.is_empty() => {
                debug!("Skipping empty document {index} in {}", path.display());
            }
            Value::Object(map) => documents.push(map),
            other => {
                return Err(decode_error(
                    path,
                    format!("document {index} is not a mapping (got {})", kind_of(&other)),
                ))
            }
        }
    }

    Ok(documents)
}

fn decode_yaml_stream(path: &Path, content: &str) -> Result<Vec<Value>> {
    let mut values = Vec::new();
    for (index, document) in serde_yaml::Deserializer::from_str(content).enumerate() {
        let mut yaml = serde_yaml::Value::deserialize(document)
            .map_err(|e| decode_error(path, format!("document {index}: {e}")))?;
        yaml.apply_merge()
            .map_err(|e| decode_error(path, format!("document {index}: {e}")))?;
        let json = serde_json::to_value(&yaml)
            .map_err(|e| decode_error(path, format!("document {index}: {e}")))?;
        values.push(json);
    }
    Ok(values)
}

fn decode_json_stream(path: &Path, content: &str) -> Result<Vec<Value>> {
    serde_json::Deserializer::from_str(content)
        .into_iter::<Value>()
        .enumerate()
        .map(|(index, value)| value.map_err(|e| decode_error(path, format!("document {index}: {e}"))))
        .collect()
}

fn decode_error(path: &Path, reason: String) -> GenerateError {
    GenerateError::DocumentDecode {
        path: path.to_path_buf(),
        reason,
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(content: &str) -> Result<Vec<Map<String, Value>>> {
        decode_documents(Path::new("test.yaml"), content)
    }

    #[test]
    fn test_multi_document_yaml() {
        let documents = decode(
            r#"
apiVersion: v1
kind: ConfigMap
metadata:
  name: one
---
apiVersion: v1
kind: ConfigMap
metadata:
  name: two
"#,
        )
        .unwrap();
        assert_eq!(documents.len(), 2);
        assert_eq!(documents[1]["metadata"]["name"], "two");
    }

    #[test]
    fn test_blank_documents_skipped() {
        let documents = decode("---\n---\nkind: A\n---\n# only a comment\n---\n{}\n").unwrap();
        assert_eq!(documents.len(), 1);
        assert_eq!(documents[0]["kind"], "A");
    }

    #[test]
    fn test_merge_keys_resolved() {
        let documents = decode(
            r#"
apiVersion: v1
kind: ConfigMap
base: &base
  app: web
metadata:
  name: web
  labels:
    <<: *base
    tier: fe
"#,
        )
        .unwrap();
        assert_eq!(
            documents[0]["metadata"]["labels"],
            serde_json::json!({"app": "web", "tier": "fe"})
        );
    }

    #[test]
    fn test_empty_content() {
        assert!(decode("").unwrap().is_empty());
        assert!(decode("   \n").unwrap().is_empty());
    }

    #[test]
    fn test_json_object() {
        let documents = decode(r#" {"apiVersion": "v1", "kind": "Service", "metadata": {"name": "web"}}"#)
            .unwrap();
        assert_eq!(documents.len(), 1);
        assert_eq!(documents[0]["kind"], "Service");
    }

    #[test]
    fn test_json_stream() {
        let documents = decode(r#"{"kind": "A"} {"kind": "B"}"#).unwrap();
        assert_eq!(documents.len(), 2);
    }

    #[test]
    fn test_non_mapping_document() {
        let err = decode("- a\n- b\n").unwrap_err();
        assert!(err.to_string().contains("not a mapping"));
        assert!(err.to_string().contains("test.yaml"));
    }

    #[test]
    fn test_malformed_yaml() {
        let err = decode("kind: [unclosed\n").unwrap_err();
        assert!(matches!(err, GenerateError::DocumentDecode { .. }));
    }

    #[test]
    fn test_malformed_json() {
        let err = decode(r#"{"kind": "#).unwrap_err();
        assert!(matches!(err, GenerateError::DocumentDecode { .. }));
    }
}
