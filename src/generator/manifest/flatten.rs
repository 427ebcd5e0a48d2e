//! # Manifest Flattening
//!
//! Turns manifest paths into one Kubernetes resource per non-empty document,
//! in file order then document order. Documents are identified by their own
//! `apiVersion`, `kind`, `metadata.namespace` and `metadata.name`.
//!
//! Two documents with the same coordinates both produce a resource with the
//! same id; resolving that is left to the consumer.

use super::decoder::decode_documents;
use super::file_finder::find_manifest_files;
use crate::error::{GenerateError, Result};
use crate::generator::CancellationToken;
use crate::resource::{kubernetes_resource_id, Resource};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Flatten every manifest under `paths` into resources
///
/// Any unreadable path or malformed document fails the whole call.
pub fn flatten(paths: &[String], cancel: &CancellationToken) -> Result<Vec<Resource>> {
    let files = find_manifest_files(paths, cancel)?;

    let mut decoded: Vec<(PathBuf, Vec<Map<String, Value>>)> = Vec::with_capacity(files.len());
    for file in files {
        cancel.check()?;
        let content = std::fs::read_to_string(&file).map_err(|source| GenerateError::PathAccess {
            path: file.clone(),
            source,
        })?;
        let documents = decode_documents(&file, &content)?;
        debug!(
            "Decoded {} document(s) from {}",
            documents.len(),
            file.display()
        );
        decoded.push((file, documents));
    }

    let mut resources = Vec::new();
    for (file, documents) in decoded {
        for (index, document) in documents.into_iter().enumerate() {
            resources.push(document_to_resource(&file, index, document)?);
        }
    }
    Ok(resources)
}

/// Convert one decoded document into a Kubernetes resource
///
/// `index` counts non-empty documents within the file and only feeds diagnostics.
pub fn document_to_resource(
    path: &Path,
    index: usize,
    document: Map<String, Value>,
) -> Result<Resource> {
    let api_version = required_str(path, index, &document, &["apiVersion"])?;
    let kind = required_str(path, index, &document, &["kind"])?;
    let name = required_str(path, index, &document, &["metadata", "name"])?;
    let namespace = lookup(&document, &["metadata", "namespace"]).and_then(Value::as_str);

    let id = kubernetes_resource_id(api_version, kind, namespace, name);
    debug!(%id, "Flattened manifest document");
    Ok(Resource::kubernetes(id, document))
}

fn lookup<'a>(document: &'a Map<String, Value>, field: &[&str]) -> Option<&'a Value> {
    let (first, rest) = field.split_first()?;
    rest.iter()
        .try_fold(document.get(*first)?, |value, key| value.get(key))
}

fn required_str<'a>(
    path: &Path,
    index: usize,
    document: &'a Map<String, Value>,
    field: &[&str],
) -> Result<&'a str> {
    lookup(document, field)
        .and_then(Value::as_str)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| GenerateError::DocumentDecode {
            path: path.to_path_buf(),
            reason: format!(
                "document {index} is missing required string field '{}'",
                field.join(".")
            ),
        })
}
