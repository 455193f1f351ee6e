//! Template bundles and the pure rendering rules
//!
//! A template bundle is a named directory beneath the configured template
//! root, containing a script source, a style source and optionally a view
//! source. The `default` bundle must always exist. Rendering and
//! destination-path derivation are pure functions, independent of file I/O.

use std::io;
use std::path::{Path, PathBuf};

use tokio::fs;

use crate::error::{Result, TaskError};

/// Marker inside template sources replaced with the parent-directory steps
/// needed to reach the shared root from the generated artifact.
pub const ROOT_MARKER: &str = "{{root}}";

/// Reserved fallback template name.
pub const DEFAULT_TEMPLATE: &str = "default";

/// Nesting depth of a module/view path below its destination root: the
/// number of parent-directory steps needed to climb from the generated
/// artifact back to the root. A single-segment path sits at the root itself
/// and has depth 0.
pub fn path_depth(path: &str) -> usize {
    path.split('.').count().saturating_sub(1)
}

/// Replace every root marker with `depth` parent-directory steps.
///
/// Depth 0 renders the marker as nothing, so embedded references resolve at
/// the configured root itself. Byte-deterministic for fixed inputs.
pub fn render_at_depth(text: &str, depth: usize) -> String {
    text.replace(ROOT_MARKER, &"../".repeat(depth))
}

/// Destination of a dotted path under a root directory: dots become
/// directory separators and the configured extension is appended, so
/// `a.b.c` with extension `coffee` lands at `<root>/a/b/c.coffee`.
pub fn artifact_path(root: &Path, path: &str, ext: &str) -> PathBuf {
    let mut relative = path.replace('.', "/");
    relative.push('.');
    relative.push_str(ext);
    root.join(relative)
}

/// A named template bundle directory.
#[derive(Debug, Clone)]
pub struct TemplateBundle {
    name: String,
    dir: PathBuf,
}

impl TemplateBundle {
    /// Locate a bundle beneath the template root, falling back to the
    /// reserved `default` name when none is given.
    pub fn locate(template_root: &Path, name: Option<&str>) -> Result<Self> {
        let name = name.unwrap_or(DEFAULT_TEMPLATE);
        let dir = template_root.join(name);
        if !dir.is_dir() {
            return Err(TaskError::TemplateNotFound {
                name: name.to_string(),
                missing: dir,
            });
        }
        Ok(Self {
            name: name.to_string(),
            dir,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Read a required member source (`script.<ext>`, `css.<ext>`,
    /// `html.<ext>`). An absent member is a template error, not an I/O one.
    pub async fn read_member(&self, member: &str) -> Result<String> {
        let path = self.dir.join(member);
        match fs::read_to_string(&path).await {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(TaskError::TemplateNotFound {
                name: self.name.clone(),
                missing: path,
            }),
            Err(e) => Err(TaskError::io(path, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_depth_counts_steps_back_to_root() {
        assert_eq!(path_depth("index"), 0);
        assert_eq!(path_depth("a.b"), 1);
        assert_eq!(path_depth("a.b.c"), 2);
    }

    #[test]
    fn test_render_at_depth_zero_removes_marker() {
        assert_eq!(render_at_depth("url({{root}}env.css)", 0), "url(env.css)");
    }

    #[test]
    fn test_render_at_depth_two_inserts_two_steps() {
        assert_eq!(
            render_at_depth("require '{{root}}env'", 2),
            "require '../../env'"
        );
    }

    #[test]
    fn test_render_replaces_every_marker() {
        assert_eq!(
            render_at_depth("{{root}}a {{root}}b", 1),
            "../a ../b"
        );
    }

    #[test]
    fn test_render_is_deterministic() {
        let text = "import \"{{root}}env.css\";";
        assert_eq!(render_at_depth(text, 3), render_at_depth(text, 3));
    }

    #[test]
    fn test_artifact_path_nests_segments() {
        assert_eq!(
            artifact_path(Path::new("src/coffee"), "a.b.c", "coffee"),
            PathBuf::from("src/coffee/a/b/c.coffee")
        );
        assert_eq!(
            artifact_path(Path::new("view"), "index", "html"),
            PathBuf::from("view/index.html")
        );
    }
}
