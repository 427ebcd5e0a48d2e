//! Common test utilities for integration tests
//!
//! Provides request builders and manifest fixtures shared by the test binaries.

#![allow(dead_code, reason = "each test binary uses a subset of the helpers")]

use resource_synth::generator::GeneratorRequest;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEPLOYMENT_AND_SERVICE: &str = r#"apiVersion: apps/v1
kind: Deployment
metadata:
  name: web
  namespace: default
spec:
  replicas: 2
  selector:
    matchLabels:
      app: web
  template:
    metadata:
      labels:
        app: web
    spec:
      containers:
        - name: web
          image: nginx:1.25
---
apiVersion: v1
kind: Service
metadata:
  name: web
  namespace: default
spec:
  selector:
    app: web
  ports:
    - port: 80
"#;

/// Request for module instance `app` in project `shop`
pub fn request(app: &str, dev: Option<Value>, platform: Option<Value>) -> GeneratorRequest {
    GeneratorRequest {
        project: "shop".to_string(),
        stack: "dev".to_string(),
        app: app.to_string(),
        dev_config: dev,
        platform_config: platform,
        ..Default::default()
    }
}

/// Write `content` to `relative` under `dir`, creating parent directories
pub fn write_file(dir: &Path, relative: &str, content: &str) -> PathBuf {
    let path = dir.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create fixture directory");
    }
    fs::write(&path, content).expect("Failed to write fixture file");
    path
}

pub fn path_string(path: &Path) -> String {
    path.display().to_string()
}
