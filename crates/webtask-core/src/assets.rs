//! Vendor-library and static-resource copying
//!
//! Vendor libraries are the `dependencies` of the package manifest; each
//! dependency's tree under `node_modules` is copied to both the versioned
//! distribution root and the development lib directory. Static resources are
//! copied verbatim into the distribution root. Artifact writes are
//! independent and idempotent (overwrite).

use std::path::{Path, PathBuf};

use serde_json::Value;
use tokio::fs;
use walkdir::WalkDir;

use crate::config::Project;
use crate::error::{Result, TaskError};

/// Copy every declared vendor library into the distribution root and the
/// development lib directory. A manifest without a `dependencies` table
/// copies nothing; a declared dependency missing on disk is skipped.
pub async fn copy_web_lib(project: &Project) -> Result<Vec<PathBuf>> {
    let manifest_path = &project.config.package_manifest;
    let text = fs::read_to_string(manifest_path)
        .await
        .map_err(|e| TaskError::io(manifest_path.clone(), e))?;
    let manifest: Value =
        serde_json::from_str(&text).map_err(|e| TaskError::malformed(manifest_path, e))?;

    let dependencies: Vec<String> = manifest
        .get("dependencies")
        .and_then(Value::as_object)
        .map(|table| table.keys().cloned().collect())
        .unwrap_or_default();

    let mut written = Vec::new();
    for dependency in dependencies {
        let source = project.config.node_modules_dir.join(&dependency);
        if !source.is_dir() {
            continue;
        }
        let dist_dest = project.dist_root.join(&dependency);
        let lib_dest = project.config.web_lib_dir.join(&dependency);
        let (dist, lib) = tokio::join!(
            copy_tree(&source, &dist_dest),
            copy_tree(&source, &lib_dest),
        );
        written.extend(dist?);
        written.extend(lib?);
    }
    Ok(written)
}

/// Copy the static resource tree into the distribution root. An absent
/// resource directory copies nothing.
pub async fn copy_web_resource(project: &Project) -> Result<Vec<PathBuf>> {
    let source = &project.config.web_resource_dir;
    if !source.is_dir() {
        return Ok(Vec::new());
    }
    copy_tree(source, &project.dist_root).await
}

/// Copy a directory tree file by file, preserving the relative layout.
pub(crate) async fn copy_tree(source: &Path, dest: &Path) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    for entry in WalkDir::new(source) {
        let entry = entry.map_err(|e| TaskError::io(source.to_path_buf(), e.into()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = match entry.path().strip_prefix(source) {
            Ok(relative) => relative,
            Err(_) => continue,
        };
        let target = dest.join(relative);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| TaskError::io(parent.to_path_buf(), e))?;
        }
        fs::copy(entry.path(), &target)
            .await
            .map_err(|e| TaskError::io(target.clone(), e))?;
        written.push(target);
    }
    Ok(written)
}
