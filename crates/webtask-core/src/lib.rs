//! Webtask Core - build tasks for servlet-style web applications
//!
//! This library provides the named build tasks used by the `webtask` CLI:
//! scaffolding per-module script/style/view files from template bundles,
//! flattening nested JSON documents into server-readable resource bundles,
//! copying vendor libraries and static resources into a versioned
//! distribution tree, and writing small generated environment snippets.
//!
//! # Architecture
//!
//! - **Pure core** - path depth, marker rendering and JSON flattening are
//!   plain functions with no I/O ([`scaffold::template`], [`flatten`])
//! - **Operations** - [`ScaffoldEngine`], the i18n pipeline and asset copying
//!   perform the file work, each borrowing a read-only [`Project`]
//! - **Orchestration** - [`tasks`] sequences the composite tasks (clean,
//!   init, build) and exposes the [`BuildSteps`] injection seam for callers
//!   that substitute a real compiler for the default copy-through steps
//!
//! There is no ambient global: a [`Project`] is constructed once per
//! invocation from [`BuildConfig`] plus the version/CDN properties files,
//! and passed by reference into every operation.

pub mod assets;
pub mod config;
pub mod error;
pub mod flatten;
pub mod i18n;
pub mod scaffold;
pub mod tasks;

// Re-export main types for convenience
pub use config::{BuildConfig, Env, Project};
pub use error::{Result, TaskError};
pub use i18n::I18nPipeline;
pub use scaffold::ScaffoldEngine;
pub use tasks::{build, clean, init, write_env, BuildSteps, CopySteps};
