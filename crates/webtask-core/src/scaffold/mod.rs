//! Scaffolding engine
//!
//! Creates and deletes the generated artifacts for a dotted module/view
//! path: each artifact is the template member rendered at the path's depth
//! and written beneath its kind's destination root. Script and style
//! emission run as independent branches; both must complete before the
//! operation is done. Deletion is template-agnostic and idempotent.

pub mod template;

pub use template::{artifact_path, path_depth, render_at_depth, TemplateBundle};

use std::io;
use std::path::PathBuf;

use tokio::fs;

use crate::config::Project;
use crate::error::{Result, TaskError};

/// The artifact kinds a template bundle can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ArtifactKind {
    Script,
    Style,
    View,
}

impl ArtifactKind {
    fn ext<'a>(&self, project: &'a Project) -> &'a str {
        match self {
            ArtifactKind::Script => &project.config.script_ext,
            ArtifactKind::Style => &project.config.css_ext,
            ArtifactKind::View => &project.config.html_ext,
        }
    }

    fn dest_root<'a>(&self, project: &'a Project) -> &'a std::path::Path {
        match self {
            ArtifactKind::Script => &project.config.script_dir,
            ArtifactKind::Style => &project.config.css_dir,
            ArtifactKind::View => &project.config.views_dir,
        }
    }

    /// Template member name for this kind, e.g. `script.coffee`.
    fn member(&self, project: &Project) -> String {
        let base = match self {
            ArtifactKind::Script => "script",
            ArtifactKind::Style => "css",
            ArtifactKind::View => "html",
        };
        format!("{base}.{}", self.ext(project))
    }
}

/// Scaffolds module and view artifacts from template bundles.
pub struct ScaffoldEngine<'a> {
    project: &'a Project,
}

/// Trim a module/view path, rejecting paths that are empty afterwards.
fn trimmed(path: &str) -> Result<&str> {
    let path = path.trim();
    if path.is_empty() {
        return Err(TaskError::EmptyPath);
    }
    Ok(path)
}

impl<'a> ScaffoldEngine<'a> {
    pub fn new(project: &'a Project) -> Self {
        Self { project }
    }

    /// Scaffold the script and style artifacts for a dotted module path.
    ///
    /// Both artifacts are rendered at the path's depth and written
    /// concurrently; returns the destination paths written.
    pub async fn create_module(
        &self,
        path: &str,
        template: Option<&str>,
    ) -> Result<Vec<PathBuf>> {
        let path = trimmed(path)?;
        let bundle = TemplateBundle::locate(&self.project.config.template_dir, template)?;
        let (script, style) = tokio::join!(
            self.emit(&bundle, ArtifactKind::Script, path),
            self.emit(&bundle, ArtifactKind::Style, path),
        );
        Ok(vec![script?, style?])
    }

    /// Scaffold a view: the markup artifact plus a full module scaffold for
    /// the same path. Both branches are required.
    pub async fn create_view(&self, path: &str, template: Option<&str>) -> Result<Vec<PathBuf>> {
        let path = trimmed(path)?;
        let bundle = TemplateBundle::locate(&self.project.config.template_dir, template)?;
        let (view, module) = tokio::join!(
            self.emit(&bundle, ArtifactKind::View, path),
            self.create_module(path, template),
        );
        let mut written = module?;
        written.push(view?);
        Ok(written)
    }

    /// Delete the module artifacts `create_module` would have produced.
    /// Missing files are not an error.
    pub async fn delete_module(&self, path: &str) -> Result<()> {
        let path = trimmed(path)?;
        self.remove(ArtifactKind::Script, path).await?;
        self.remove(ArtifactKind::Style, path).await
    }

    /// Delete the view artifact plus the module artifacts for the same path.
    pub async fn delete_view(&self, path: &str) -> Result<()> {
        let path = trimmed(path)?;
        self.remove(ArtifactKind::View, path).await?;
        self.delete_module(path).await
    }

    async fn emit(
        &self,
        bundle: &TemplateBundle,
        kind: ArtifactKind,
        path: &str,
    ) -> Result<PathBuf> {
        let source = bundle.read_member(&kind.member(self.project)).await?;
        let rendered = render_at_depth(&source, path_depth(path));
        let dest = artifact_path(kind.dest_root(self.project), path, kind.ext(self.project));
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| TaskError::io(parent.to_path_buf(), e))?;
        }
        fs::write(&dest, rendered)
            .await
            .map_err(|e| TaskError::io(dest.clone(), e))?;
        Ok(dest)
    }

    async fn remove(&self, kind: ArtifactKind, path: &str) -> Result<()> {
        let dest = artifact_path(kind.dest_root(self.project), path, kind.ext(self.project));
        match fs::remove_file(&dest).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(TaskError::io(dest, e)),
        }
    }
}
