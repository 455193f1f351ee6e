//! Task orchestration
//!
//! The composite tasks sequence the operation modules: clean removes all
//! generated trees, init copies vendor libs and static resources, build
//! runs the whole pipeline. Independent branches run fan-out/join: every
//! branch completes, the first failure is surfaced, and siblings are not
//! rolled back.

use std::io;
use std::path::PathBuf;

use tokio::fs;

use crate::assets::{self, copy_tree};
use crate::config::Project;
use crate::error::{Result, TaskError};
use crate::i18n::I18nPipeline;

/// Pluggable compile steps for the build pipeline.
///
/// The defaults copy the script and style source trees into the versioned
/// distribution directories unchanged; a caller with a real compiler
/// substitutes its own implementation.
pub trait BuildSteps: Sync {
    /// Produce the distributable scripts under `dist_js`.
    fn build_script(
        &self,
        project: &Project,
    ) -> impl std::future::Future<Output = Result<Vec<PathBuf>>> + Send {
        async move { copy_source_tree(&project.config.script_dir, &project.dist_js).await }
    }

    /// Produce the distributable stylesheets under `dist_css`.
    fn build_css(
        &self,
        project: &Project,
    ) -> impl std::future::Future<Output = Result<Vec<PathBuf>>> + Send {
        async move { copy_source_tree(&project.config.css_dir, &project.dist_css).await }
    }
}

/// The default pass-through steps.
#[derive(Debug, Clone, Copy, Default)]
pub struct CopySteps;

impl BuildSteps for CopySteps {}

async fn copy_source_tree(source: &std::path::Path, dest: &std::path::Path) -> Result<Vec<PathBuf>> {
    if !source.is_dir() {
        return Ok(Vec::new());
    }
    copy_tree(source, dest).await
}

/// Remove every generated tree: the distribution directory and both i18n
/// output directories. Already-absent trees are fine.
pub async fn clean(project: &Project) -> Result<()> {
    let config = &project.config;
    for dir in [&config.dist_dir, &config.json_i18n_dir, &config.java_i18n_dir] {
        match fs::remove_dir_all(dir).await {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(TaskError::io(dir.clone(), e)),
        }
    }
    Ok(())
}

/// Copy vendor libraries and static resources, as independent branches.
pub async fn init(project: &Project) -> Result<Vec<PathBuf>> {
    let (lib, resource) = tokio::join!(
        assets::copy_web_lib(project),
        assets::copy_web_resource(project),
    );
    let mut written = lib?;
    written.extend(resource?);
    Ok(written)
}

/// Write the environment snippets consumed by scripts and stylesheets: the
/// script form at the script root, the style form at the style root, so
/// scaffolded artifacts reach them through their rendered root references.
pub async fn write_env(project: &Project) -> Result<Vec<PathBuf>> {
    let script_dest = project.config.script_dir.join("env.js");
    let css_dest = project.config.css_dir.join("env.css");
    let (script, css) = tokio::join!(
        write_snippet(script_dest, project.env.script_snippet()),
        write_snippet(css_dest, project.env.css_snippet()),
    );
    Ok(vec![script?, css?])
}

async fn write_snippet(dest: PathBuf, content: String) -> Result<PathBuf> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| TaskError::io(parent.to_path_buf(), e))?;
    }
    fs::write(&dest, content)
        .await
        .map_err(|e| TaskError::io(dest.clone(), e))?;
    Ok(dest)
}

/// Full build pipeline: clean, copy assets, then generate i18n bundles and
/// environment snippets, then run the compile steps.
pub async fn build<S: BuildSteps>(project: &Project, steps: &S) -> Result<Vec<PathBuf>> {
    clean(project).await?;
    let mut written = init(project).await?;

    let pipeline = I18nPipeline::new(project);
    let (bundles, env) = tokio::join!(pipeline.compile_all(), write_env(project));
    written.extend(bundles?);
    written.extend(env?);

    let (scripts, styles) = tokio::join!(steps.build_script(project), steps.build_css(project));
    written.extend(scripts?);
    written.extend(styles?);
    Ok(written)
}
