//! # File Finder
//!
//! Expands manifest paths into the ordered list of files to decode.
//!
//! - A file path is taken as is, whatever its extension
//! - A directory is walked recursively in file-name order and only files with a
//!   recognized extension (`.yaml`, `.yml`, `.json`, case-insensitive) are kept
//! - A file reached more than once is only listed the first time

use crate::constants::MANIFEST_FILE_EXTENSIONS;
use crate::error::{GenerateError, Result};
use crate::generator::CancellationToken;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Whether a file found during a directory walk is a manifest
pub fn has_manifest_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            MANIFEST_FILE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// Find manifest files for every path, in path order then walk order
pub fn find_manifest_files(paths: &[String], cancel: &CancellationToken) -> Result<Vec<PathBuf>> {
    let mut seen: HashSet<PathBuf> = HashSet::new();
    let mut files = Vec::new();

    let mut push = |file: PathBuf, files: &mut Vec<PathBuf>| {
        if seen.insert(file.clone()) {
            files.push(file);
        } else {
            warn!("Skipping duplicate manifest file: {}", file.display());
        }
    };

    for path in paths {
        cancel.check()?;
        let path = Path::new(path);
        let metadata = std::fs::metadata(path).map_err(|source| GenerateError::PathAccess {
            path: path.to_path_buf(),
            source,
        })?;

        if !metadata.is_dir() {
            debug!("Found manifest file: {}", path.display());
            push(path.to_path_buf(), &mut files);
            continue;
        }

        for entry in WalkDir::new(path).sort_by_file_name() {
            cancel.check()?;
            let entry = entry.map_err(|e| GenerateError::PathAccess {
                path: e
                    .path()
                    .map_or_else(|| path.to_path_buf(), Path::to_path_buf),
                source: e.into(),
            })?;

            if entry.file_type().is_dir() {
                continue;
            }

            if has_manifest_extension(entry.path()) {
                debug!("Found manifest file: {}", entry.path().display());
                push(entry.into_path(), &mut files);
            } else {
                debug!("Ignoring non-manifest file: {}", entry.path().display());
            }
        }
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(dir: &Path, relative: &str) -> PathBuf {
        let path = dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, "").unwrap();
        path
    }

    fn as_strings(paths: &[PathBuf]) -> Vec<String> {
        paths.iter().map(|p| p.display().to_string()).collect()
    }

    #[test]
    fn test_has_manifest_extension() {
        assert!(has_manifest_extension(Path::new("a.yaml")));
        assert!(has_manifest_extension(Path::new("a.YML")));
        assert!(has_manifest_extension(Path::new("a.Json")));
        assert!(!has_manifest_extension(Path::new("a.txt")));
        assert!(!has_manifest_extension(Path::new("yaml")));
    }

    #[test]
    fn test_directory_walk_filters_and_sorts() {
        let dir = TempDir::new().unwrap();
        let b = touch(dir.path(), "b.yaml");
        let a = touch(dir.path(), "a.YML");
        let nested = touch(dir.path(), "nested/c.json");
        touch(dir.path(), "README.md");

        let files = find_manifest_files(
            &[dir.path().display().to_string()],
            &CancellationToken::new(),
        )
        .unwrap();
        assert_eq!(files, vec![a, b, nested]);
    }

    #[test]
    fn test_explicit_file_kept_regardless_of_extension() {
        let dir = TempDir::new().unwrap();
        let file = touch(dir.path(), "manifest.txt");
        let files = find_manifest_files(&as_strings(&[file.clone()]), &CancellationToken::new())
            .unwrap();
        assert_eq!(files, vec![file]);
    }

    #[test]
    fn test_file_listed_once() {
        let dir = TempDir::new().unwrap();
        let file = touch(dir.path(), "app.yaml");
        let paths = vec![file.display().to_string(), dir.path().display().to_string()];
        let files = find_manifest_files(&paths, &CancellationToken::new()).unwrap();
        assert_eq!(files, vec![file]);
    }

    #[test]
    fn test_missing_path() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing");
        let err = find_manifest_files(
            &[missing.display().to_string()],
            &CancellationToken::new(),
        )
        .unwrap_err();
        match err {
            GenerateError::PathAccess { path, .. } => assert_eq!(path, missing),
            other => panic!("expected PathAccess, got {other:?}"),
        }
    }

    #[test]
    fn test_cancelled_walk() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "app.yaml");
        let cancel = CancellationToken::new();
        cancel.cancel();
        let err = find_manifest_files(&[dir.path().display().to_string()], &cancel).unwrap_err();
        assert!(matches!(err, GenerateError::Cancelled));
    }
}
