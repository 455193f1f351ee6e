//! Internationalization pipeline
//!
//! Compiles nested JSON i18n documents into two output forms per source:
//! a flat server-side resource bundle (named via the configured pattern)
//! and a client-side script bundle assigning the unflattened document to a
//! global. The two output branches of each document run concurrently.

use std::path::{Path, PathBuf};

use serde_json::Value;
use tokio::fs;
use walkdir::WalkDir;

use crate::config::Project;
use crate::error::{Result, TaskError};
use crate::flatten::{client_bundle, to_properties};

/// Substitution marker in the resource-bundle naming pattern.
pub const NAME_MARKER: &str = "{name}";

/// Compiles i18n source documents into server and client bundles.
pub struct I18nPipeline<'a> {
    project: &'a Project,
}

impl<'a> I18nPipeline<'a> {
    pub fn new(project: &'a Project) -> Self {
        Self { project }
    }

    /// Compile every `*.json` document beneath the configured i18n source
    /// directory. An absent directory means no sources.
    pub async fn compile_all(&self) -> Result<Vec<PathBuf>> {
        let sources = self.sources()?;
        self.compile(&sources).await
    }

    /// Compile an explicit set of source documents.
    pub async fn compile(&self, sources: &[PathBuf]) -> Result<Vec<PathBuf>> {
        let mut written = Vec::new();
        for source in sources {
            let text = fs::read_to_string(source)
                .await
                .map_err(|e| TaskError::io(source.clone(), e))?;
            let value: Value =
                serde_json::from_str(&text).map_err(|e| TaskError::malformed(source, e))?;
            let name = document_name(source);

            let (server, client) = tokio::join!(
                self.write_properties(&name, &value),
                self.write_client(&name, &value),
            );
            written.push(server?);
            written.push(client?);
        }
        Ok(written)
    }

    fn sources(&self) -> Result<Vec<PathBuf>> {
        let dir = &self.project.config.i18n_dir;
        if !dir.is_dir() {
            return Ok(Vec::new());
        }
        let mut found = Vec::new();
        for entry in WalkDir::new(dir) {
            let entry = entry.map_err(|e| TaskError::io(dir.clone(), e.into()))?;
            if entry.file_type().is_file()
                && entry.path().extension().is_some_and(|ext| ext == "json")
            {
                found.push(entry.into_path());
            }
        }
        found.sort();
        Ok(found)
    }

    /// Flattened resource bundle under the server i18n directory, named by
    /// substituting the document name into the configured pattern.
    async fn write_properties(&self, name: &str, value: &Value) -> Result<PathBuf> {
        let file_name = self
            .project
            .config
            .bundle_pattern
            .replace(NAME_MARKER, name);
        let dest = self.project.config.java_i18n_dir.join(file_name);
        write_artifact(&dest, to_properties(value)).await?;
        Ok(dest)
    }

    /// Client bundle under the distribution i18n directory.
    async fn write_client(&self, name: &str, value: &Value) -> Result<PathBuf> {
        let dest = self.project.dist_i18n.join(format!("{name}.js"));
        write_artifact(&dest, client_bundle(&self.project.config.i18n_global, value)).await?;
        Ok(dest)
    }
}

fn document_name(source: &Path) -> String {
    source
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

async fn write_artifact(dest: &Path, content: String) -> Result<()> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| TaskError::io(parent.to_path_buf(), e))?;
    }
    fs::write(dest, content)
        .await
        .map_err(|e| TaskError::io(dest.to_path_buf(), e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_name_strips_extension() {
        assert_eq!(document_name(Path::new("src/main/i18n/zh_TW.json")), "zh_TW");
        assert_eq!(document_name(Path::new("en.json")), "en");
    }

    #[test]
    fn test_bundle_pattern_substitution() {
        assert_eq!(
            "messages_{name}.properties".replace(NAME_MARKER, "en"),
            "messages_en.properties"
        );
    }
}
