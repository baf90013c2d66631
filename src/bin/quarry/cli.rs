//! CLI definitions using clap.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use semver::Version;

use quarry::core::settings::parse_assignment;
use quarry::core::{Layout, Options, Profile, Recipe, Settings};
use quarry::util::ColorChoice;

/// Quarry - fetch, build, and package the Fossil Threads C library
#[derive(Parser)]
#[command(name = "quarry")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress status output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// When to color output: auto, always, never
    #[arg(long, global = true, default_value = "auto", value_name = "WHEN")]
    pub color: ColorChoice,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the full lifecycle: fetch, build, and package
    Create(CreateArgs),

    /// Fetch the upstream sources at the release tag
    Source(SourceArgs),

    /// Generate the toolchain, configure, and compile fetched sources
    Build(BuildArgs),

    /// Install built artifacts and headers into the package folder
    Package(PackageArgs),

    /// Show recipe metadata and consumer package info
    Info(InfoArgs),

    /// Check that the external tools the pipeline needs are available
    Doctor(DoctorArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Flags shared by every command that resolves the recipe configuration.
#[derive(Args)]
pub struct RecipeArgs {
    /// Upstream version to build instead of the pinned one
    #[arg(long, value_name = "VERSION")]
    pub version: Option<Version>,

    /// Override a setting, e.g. `-s build_type=debug` (repeatable)
    #[arg(short = 's', long = "setting", value_name = "KEY=VALUE")]
    pub settings: Vec<String>,

    /// Override an option, e.g. `-o shared=true` (repeatable)
    #[arg(short = 'o', long = "option", value_name = "KEY=VALUE")]
    pub options: Vec<String>,

    /// Load settings and options from a TOML profile before applying
    /// `-s`/`-o` overrides
    #[arg(long, value_name = "PATH")]
    pub profile: Option<PathBuf>,
}

impl RecipeArgs {
    /// Resolve the recipe, settings, and options. Host defaults first,
    /// then the profile, then individual overrides. Unknown keys or
    /// values fail here, before any stage runs.
    pub fn resolve(&self) -> Result<(Recipe, Settings, Options)> {
        let mut recipe = Recipe::fossil_threads();
        if let Some(version) = &self.version {
            recipe = recipe.with_version(version.clone());
        }

        let mut settings = Settings::host();
        let mut options = Options::default();

        if let Some(path) = &self.profile {
            Profile::load(path)?.apply_to(&mut settings, &mut options);
        }
        for raw in &self.settings {
            let (key, value) = parse_assignment(raw)?;
            settings.apply(key, value)?;
        }
        for raw in &self.options {
            let (key, value) = parse_assignment(raw)?;
            options.apply(key, value)?;
        }

        Ok((recipe, settings, options))
    }
}

/// The workspace folder a command operates in.
#[derive(Args)]
pub struct FolderArgs {
    /// Workspace folder holding sources and build artifacts
    #[arg(long, default_value = ".", value_name = "PATH")]
    pub folder: PathBuf,
}

impl FolderArgs {
    pub fn layout(&self) -> Layout {
        Layout::resolve(&self.folder)
    }
}

/// Pick the package folder: explicit flag, or `<folder>/package`. Always
/// absolute, since `meson install --destdir` resolves relative paths
/// against the build folder rather than the working directory.
pub fn resolve_package_folder(folder: &Path, package_folder: &Option<PathBuf>) -> PathBuf {
    let chosen = package_folder
        .clone()
        .unwrap_or_else(|| folder.join("package"));
    quarry::util::fs::absolutize(&chosen)
}

#[derive(Args)]
pub struct CreateArgs {
    #[command(flatten)]
    pub recipe: RecipeArgs,

    #[command(flatten)]
    pub folders: FolderArgs,

    /// Where the finished package lands (defaults to `<folder>/package`)
    #[arg(long, value_name = "PATH")]
    pub package_folder: Option<PathBuf>,

    /// Clone the full upstream history instead of a shallow checkout
    #[arg(long)]
    pub full_history: bool,

    /// Number of parallel compile jobs
    #[arg(short, long)]
    pub jobs: Option<usize>,
}

#[derive(Args)]
pub struct SourceArgs {
    #[command(flatten)]
    pub recipe: RecipeArgs,

    #[command(flatten)]
    pub folders: FolderArgs,

    /// Clone the full upstream history instead of a shallow checkout
    #[arg(long)]
    pub full_history: bool,
}

#[derive(Args)]
pub struct BuildArgs {
    #[command(flatten)]
    pub recipe: RecipeArgs,

    #[command(flatten)]
    pub folders: FolderArgs,

    /// Number of parallel compile jobs
    #[arg(short, long)]
    pub jobs: Option<usize>,
}

#[derive(Args)]
pub struct PackageArgs {
    #[command(flatten)]
    pub recipe: RecipeArgs,

    #[command(flatten)]
    pub folders: FolderArgs,

    /// Where the finished package lands (defaults to `<folder>/package`)
    #[arg(long, value_name = "PATH")]
    pub package_folder: Option<PathBuf>,
}

#[derive(Args)]
pub struct InfoArgs {
    #[command(flatten)]
    pub recipe: RecipeArgs,

    /// Emit machine-readable JSON instead of the human summary
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct DoctorArgs {
    /// Exit non-zero if any tool is missing
    #[arg(long)]
    pub strict: bool,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
