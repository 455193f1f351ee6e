//! Version/CDN environment loaded from properties files
//!
//! The two generated snippet formats are verbatim contracts consumed by
//! scripts and stylesheets; their rendering must stay byte-exact.

use std::path::Path;

use tokio::fs;

use crate::config::BuildConfig;
use crate::error::{Result, TaskError};
use crate::flatten::property_value;

/// Version and CDN settings read once at project resolution.
#[derive(Debug, Clone)]
pub struct Env {
    pub version: String,
    pub cdn: String,
}

impl Env {
    /// Read the version and CDN base from their properties files.
    pub async fn load(config: &BuildConfig) -> Result<Self> {
        let version = read_property(&config.version_file, "version").await?;
        if version.is_empty() {
            return Err(TaskError::Config(format!(
                "{}: empty version value",
                config.version_file.display()
            )));
        }
        let cdn = read_property(&config.cdn_file, "cdn").await?;
        Ok(Self { version, cdn })
    }

    /// CDN path of the current distribution: `<cdn>/<version>`.
    pub fn cdn_path(&self) -> String {
        format!("{}/{}", self.cdn, self.version)
    }

    /// Environment snippet consumed by scripts.
    pub fn script_snippet(&self) -> String {
        format!(
            "var env = {{version:\"{}\",cdn:\"{}\"}};",
            self.version,
            self.cdn_path()
        )
    }

    /// Environment snippet consumed by stylesheets.
    pub fn css_snippet(&self) -> String {
        format!(
            "env{{version:\"{}\";cdn:\"{}\"}}",
            self.version,
            self.cdn_path()
        )
    }
}

async fn read_property(path: &Path, key: &str) -> Result<String> {
    let content = fs::read_to_string(path).await.map_err(|e| {
        TaskError::Config(format!("cannot read {} file {}: {e}", key, path.display()))
    })?;
    property_value(&content, key)
        .map(|value| value.trim_end().to_string())
        .ok_or_else(|| {
            TaskError::Config(format!(
                "{}: no '{key}=' entry found",
                path.display()
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env() -> Env {
        Env {
            version: "1.0.0".to_string(),
            cdn: "/dist".to_string(),
        }
    }

    #[test]
    fn test_script_snippet_is_byte_exact() {
        assert_eq!(
            env().script_snippet(),
            "var env = {version:\"1.0.0\",cdn:\"/dist/1.0.0\"};"
        );
    }

    #[test]
    fn test_css_snippet_is_byte_exact() {
        assert_eq!(env().css_snippet(), "env{version:\"1.0.0\";cdn:\"/dist/1.0.0\"}");
    }

    #[test]
    fn test_cdn_path_appends_version() {
        assert_eq!(env().cdn_path(), "/dist/1.0.0");
    }
}
