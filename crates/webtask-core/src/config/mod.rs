//! Build settings and the resolved per-invocation project record
//!
//! [`BuildConfig`] is the flat table of named settings with built-in
//! defaults; every field can be overridden from a YAML file. [`Project`]
//! resolves a config once per invocation (loading the version/CDN
//! environment and deriving the versioned distribution tree) and is passed
//! by reference into every operation.

mod env;

pub use env::Env;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, TaskError};

/// Default name of the settings override file.
pub const CONFIG_FILE: &str = "webtask.yaml";

/// Named build settings with built-in defaults.
///
/// Unspecified fields keep their defaults when loading overrides, so a
/// config file only lists what it changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Filename extension for scaffolded script sources
    pub script_ext: String,
    /// Filename extension for scaffolded style sources
    pub css_ext: String,
    /// Filename extension for scaffolded view markup
    pub html_ext: String,

    /// Root directory holding template bundles
    pub template_dir: PathBuf,
    /// Vendor library tree (npm layout)
    pub node_modules_dir: PathBuf,
    /// Location of the `dependencies` manifest driving vendor-lib copying
    pub package_manifest: PathBuf,

    /// i18n source documents (nested JSON)
    pub i18n_dir: PathBuf,
    /// Scaffolded script destination root
    pub script_dir: PathBuf,
    /// Scaffolded style destination root
    pub css_dir: PathBuf,
    /// Scaffolded view destination root
    pub views_dir: PathBuf,
    /// Generated client-side i18n documents (removed by clean)
    pub json_i18n_dir: PathBuf,
    /// Generated server-side resource bundles
    pub java_i18n_dir: PathBuf,
    /// Vendor libraries served during development
    pub web_lib_dir: PathBuf,
    /// Static resources copied verbatim into dist
    pub web_resource_dir: PathBuf,
    /// Distribution root; the resolved tree lives under `<dist_dir>/<version>`
    pub dist_dir: PathBuf,

    /// Properties file carrying the `version=` entry
    pub version_file: PathBuf,
    /// Properties file carrying the `cdn=` entry
    pub cdn_file: PathBuf,

    /// Global variable name assigned by the client-side translation bundle
    pub i18n_global: String,
    /// Resource-bundle naming pattern; `{name}` is replaced with the source
    /// document's base name
    pub bundle_pattern: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            script_ext: "coffee".to_string(),
            css_ext: "less".to_string(),
            html_ext: "html".to_string(),
            template_dir: PathBuf::from("templates"),
            node_modules_dir: PathBuf::from("node_modules"),
            package_manifest: PathBuf::from("package.json"),
            i18n_dir: PathBuf::from("src/main/i18n"),
            script_dir: PathBuf::from("src/main/webapp/coffee"),
            css_dir: PathBuf::from("src/main/webapp/less"),
            views_dir: PathBuf::from("src/main/webapp/WEB-INF/view"),
            json_i18n_dir: PathBuf::from("src/main/webapp/i18n"),
            java_i18n_dir: PathBuf::from("src/main/resources/i18n"),
            web_lib_dir: PathBuf::from("src/main/webapp/lib"),
            web_resource_dir: PathBuf::from("src/main/webapp/resource"),
            dist_dir: PathBuf::from("src/main/webapp/dist"),
            version_file: PathBuf::from("src/main/resources/version.properties"),
            cdn_file: PathBuf::from("src/main/resources/cdn.properties"),
            i18n_global: "jsWebI18n".to_string(),
            bundle_pattern: "messages_{name}.properties".to_string(),
        }
    }
}

impl BuildConfig {
    /// Load settings from a YAML override file.
    pub fn load(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| TaskError::io(path.to_path_buf(), e))?;
        serde_yaml::from_str(&content)
            .map_err(|e| TaskError::Config(format!("{}: {e}", path.display())))
    }

    /// Load settings from a YAML override file, falling back to the built-in
    /// defaults when the file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }
}

/// Resolved, read-only project record for a single invocation.
///
/// Holds the settings, the loaded version/CDN environment and the derived
/// versioned distribution tree. Constructed once, then borrowed by every
/// operation.
#[derive(Debug, Clone)]
pub struct Project {
    pub config: BuildConfig,
    pub env: Env,
    /// `<dist_dir>/<version>`
    pub dist_root: PathBuf,
    pub dist_js: PathBuf,
    pub dist_css: PathBuf,
    pub dist_i18n: PathBuf,
}

impl Project {
    /// Resolve a project from settings: loads the version/CDN properties
    /// files and derives the versioned distribution tree.
    ///
    /// Missing or malformed settings files fail with [`TaskError::Config`];
    /// there is no silent fallback.
    pub async fn load(config: BuildConfig) -> Result<Self> {
        let env = Env::load(&config).await?;
        let dist_root = config.dist_dir.join(&env.version);
        let dist_js = dist_root.join("js");
        let dist_css = dist_root.join("css");
        let dist_i18n = dist_root.join("i18n");
        Ok(Self {
            config,
            env,
            dist_root,
            dist_js,
            dist_css,
            dist_i18n,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_original_layout() {
        let config = BuildConfig::default();
        assert_eq!(config.script_ext, "coffee");
        assert_eq!(config.css_ext, "less");
        assert_eq!(config.dist_dir, PathBuf::from("src/main/webapp/dist"));
        assert_eq!(config.bundle_pattern, "messages_{name}.properties");
        assert_eq!(config.i18n_global, "jsWebI18n");
    }

    #[test]
    fn test_partial_yaml_override_keeps_defaults() {
        let config: BuildConfig =
            serde_yaml::from_str("script_ext: js\ndist_dir: build/dist\n").unwrap();
        assert_eq!(config.script_ext, "js");
        assert_eq!(config.dist_dir, PathBuf::from("build/dist"));
        // Untouched fields keep their defaults
        assert_eq!(config.css_ext, "less");
        assert_eq!(config.html_ext, "html");
    }
}
