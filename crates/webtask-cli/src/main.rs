//! Webtask CLI - named build tasks for servlet-style web applications
//!
//! Each subcommand maps to one core operation. The CLI plays the task-runner
//! role of the original design: it resolves the project once, invokes the
//! named operation, and reports written files. `watch` re-invokes the i18n
//! and environment tasks on file-change notifications.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use notify::{RecursiveMode, Watcher};
use webtask_core::config::CONFIG_FILE;
use webtask_core::{tasks, BuildConfig, CopySteps, I18nPipeline, Project, ScaffoldEngine};

#[derive(Parser, Debug)]
#[command(name = "webtask")]
#[command(about = "Build tasks for servlet-style web applications")]
#[command(version)]
struct Args {
    /// Settings override file (built-in defaults apply if absent)
    #[arg(short, long, default_value = CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scaffold script and style artifacts for a dotted module path
    AddModule {
        /// Dot-delimited module path, e.g. `user.profile`
        path: String,
        /// Template bundle name (defaults to `default`)
        #[arg(short, long)]
        template: Option<String>,
    },
    /// Scaffold a view plus its module artifacts
    AddView {
        /// Dot-delimited view path
        path: String,
        /// Template bundle name (defaults to `default`)
        #[arg(short, long)]
        template: Option<String>,
    },
    /// Delete the artifacts a module scaffold produced
    DelModule { path: String },
    /// Delete a view's artifacts plus its module artifacts
    DelView { path: String },
    /// Remove the distribution and generated i18n trees
    Clean,
    /// Copy declared vendor libraries into dist and the dev lib directory
    CopyWebLib,
    /// Copy the static resource tree into dist
    CopyWebResource,
    /// Compile specific i18n source documents
    I18n {
        /// Source documents (nested JSON)
        paths: Vec<PathBuf>,
    },
    /// Compile every i18n source document
    I18nAll,
    /// Write the environment snippets consumed by scripts and stylesheets
    Env,
    /// Copy vendor libraries and static resources
    Init,
    /// Run the full build pipeline
    Build,
    /// Re-run i18n and environment generation when sources change
    Watch,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Exit cleanly on Ctrl+C (matters for the watch loop)
    ctrlc::set_handler(move || std::process::exit(130)).ok();

    let args = Args::parse();
    let project = load_project(&args.config).await?;

    match args.command {
        Command::AddModule { path, template } => {
            let written = ScaffoldEngine::new(&project)
                .create_module(&path, template.as_deref())
                .await?;
            report("add-module", &written);
        }
        Command::AddView { path, template } => {
            let written = ScaffoldEngine::new(&project)
                .create_view(&path, template.as_deref())
                .await?;
            report("add-view", &written);
        }
        Command::DelModule { path } => {
            ScaffoldEngine::new(&project).delete_module(&path).await?;
            println!("{} del-module {}", "Done".green().bold(), path);
        }
        Command::DelView { path } => {
            ScaffoldEngine::new(&project).delete_view(&path).await?;
            println!("{} del-view {}", "Done".green().bold(), path);
        }
        Command::Clean => {
            tasks::clean(&project).await?;
            println!("{} clean", "Done".green().bold());
        }
        Command::CopyWebLib => {
            let written = webtask_core::assets::copy_web_lib(&project).await?;
            report("copy-web-lib", &written);
        }
        Command::CopyWebResource => {
            let written = webtask_core::assets::copy_web_resource(&project).await?;
            report("copy-web-resource", &written);
        }
        Command::I18n { paths } => {
            let written = I18nPipeline::new(&project).compile(&paths).await?;
            report("i18n", &written);
        }
        Command::I18nAll => {
            let written = I18nPipeline::new(&project).compile_all().await?;
            report("i18n-all", &written);
        }
        Command::Env => {
            let written = tasks::write_env(&project).await?;
            report("env", &written);
        }
        Command::Init => {
            let written = tasks::init(&project).await?;
            report("init", &written);
        }
        Command::Build => {
            let written = tasks::build(&project, &CopySteps).await?;
            report("build", &written);
        }
        Command::Watch => {
            watch(&args.config, project).await?;
        }
    }

    Ok(())
}

async fn load_project(config_path: &PathBuf) -> Result<Project> {
    let config = BuildConfig::load_or_default(config_path)
        .with_context(|| format!("Failed to load settings from {}", config_path.display()))?;
    Project::load(config)
        .await
        .context("Failed to resolve project")
}

fn report(task: &str, written: &[PathBuf]) {
    for path in written {
        println!("  {} {}", "->".blue(), path.display());
    }
    println!(
        "{} {} ({} file(s))",
        "Done".green().bold(),
        task,
        written.len()
    );
}

/// Watch the i18n sources and the version/CDN properties files, re-running
/// i18n-all and env generation on every change burst. The project is
/// re-resolved each cycle so version bumps take effect.
async fn watch(config_path: &PathBuf, project: Project) -> Result<()> {
    // Notify delivers events on its own thread; an unbounded tokio channel
    // bridges them to this task so the loop awaits instead of blocking a
    // runtime worker.
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let mut watcher = notify::recommended_watcher(move |event| {
        let _ = tx.send(event);
    })
    .context("Failed to create file watcher")?;

    let config = &project.config;
    if config.i18n_dir.is_dir() {
        watcher
            .watch(&config.i18n_dir, RecursiveMode::Recursive)
            .with_context(|| format!("Failed to watch {}", config.i18n_dir.display()))?;
    }
    for file in [&config.version_file, &config.cdn_file] {
        if file.is_file() {
            watcher
                .watch(file, RecursiveMode::NonRecursive)
                .with_context(|| format!("Failed to watch {}", file.display()))?;
        }
    }

    println!(
        "{} i18n sources and properties files (ctrl-c to stop)",
        "Watching".cyan().bold()
    );

    while let Some(event) = rx.recv().await {
        if let Err(e) = event {
            eprintln!("{} {e}", "Watch error:".red());
            continue;
        }
        // Collapse event bursts from editors and bulk copies
        while rx.try_recv().is_ok() {}

        match regenerate(config_path).await {
            Ok(count) => println!("{} {} file(s)", "Regenerated".green().bold(), count),
            Err(e) => eprintln!("{} {e:#}", "Error:".red()),
        }
    }

    Ok(())
}

async fn regenerate(config_path: &PathBuf) -> Result<usize> {
    let project = load_project(config_path).await?;
    let (bundles, env) = tokio::join!(
        async { I18nPipeline::new(&project).compile_all().await },
        tasks::write_env(&project),
    );
    Ok(bundles?.len() + env?.len())
}
