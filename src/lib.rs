//! Fetch, build, and package pipeline for the Fossil Threads C library.
//!
//! The package lifecycle is modeled as an explicit pipeline of stages:
//! fetch the tagged sources with git, generate a Meson machine file from
//! the configured settings and options, configure and compile with Meson,
//! install into a package folder, and lay out the public headers. Each
//! CLI command runs a slice of that pipeline; the driver stops at the
//! first failing stage.
//!
//! The configuration surface is closed. Settings (`os`, `compiler`,
//! `build_type`, `arch`) and options (`shared`) are enums and booleans,
//! and unknown keys or values are rejected up front rather than silently
//! ignored.

pub mod core;
pub mod meson;
pub mod pipeline;
pub mod sources;
pub mod util;

pub use crate::core::{Layout, Options, PackageInfo, Recipe, Settings};
pub use crate::meson::{BuildFrontend, Meson};
pub use crate::pipeline::{Pipeline, PipelineReport, Stage, StageError};
pub use crate::sources::{GitCli, VcsClient};
