//! The build pipeline.
//!
//! Every lifecycle operation is a plan: an ordered slice of [`Stage`]s run
//! by one driver loop. The driver stops at the first failing stage and
//! reports which stage failed; later stages are never attempted.

pub mod error;

pub use error::{HeaderCopyFailure, ProcessFailure, StageError};

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tracing::debug;

use crate::core::{Layout, Options, PackageInfo, Recipe, Settings};
use crate::meson::{BuildFrontend, NATIVE_FILE_NAME};
use crate::sources::{CloneRequest, VcsClient};
use crate::util::{fs, Shell, Status};

/// One step of the pipeline, in lifecycle order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Clone the upstream sources at the release tag.
    Fetch,
    /// Write the Meson machine file from settings and options.
    Toolchain,
    /// `meson setup`.
    Configure,
    /// `meson compile`.
    Build,
    /// `meson install` into the package folder.
    Install,
    /// Copy public headers into the package folder.
    Headers,
}

impl Stage {
    pub fn name(&self) -> &'static str {
        match self {
            Stage::Fetch => "fetch",
            Stage::Toolchain => "toolchain",
            Stage::Configure => "configure",
            Stage::Build => "build",
            Stage::Install => "install",
            Stage::Headers => "headers",
        }
    }
}

/// The whole lifecycle, source checkout through package folder.
pub const FULL_PLAN: &[Stage] = &[
    Stage::Fetch,
    Stage::Toolchain,
    Stage::Configure,
    Stage::Build,
    Stage::Install,
    Stage::Headers,
];

/// Just the source checkout.
pub const SOURCE_PLAN: &[Stage] = &[Stage::Fetch];

/// Configure and compile an already-fetched checkout.
pub const BUILD_PLAN: &[Stage] = &[Stage::Toolchain, Stage::Configure, Stage::Build];

/// Install and lay out the package from an already-built checkout.
pub const PACKAGE_PLAN: &[Stage] = &[Stage::Install, Stage::Headers];

/// Timing for one completed stage.
#[derive(Debug, Clone, Copy)]
pub struct StageReport {
    pub stage: Stage,
    pub duration: Duration,
}

/// What a pipeline run produced.
#[derive(Debug, Default)]
pub struct PipelineReport {
    pub stages: Vec<StageReport>,
    /// Headers copied into the package folder, if the headers stage ran.
    pub headers: Vec<PathBuf>,
    /// Consumer info, populated once packaging completes.
    pub package_info: Option<PackageInfo>,
}

impl PipelineReport {
    pub fn total(&self) -> Duration {
        self.stages.iter().map(|s| s.duration).sum()
    }
}

/// Driver for a sequence of stages against one recipe checkout.
pub struct Pipeline<'a> {
    pub recipe: &'a Recipe,
    pub settings: &'a Settings,
    pub options: &'a Options,
    pub layout: &'a Layout,
    pub package_folder: &'a Path,
    /// Clone with `--depth 1`. Off for full history.
    pub shallow: bool,
    pub vcs: &'a dyn VcsClient,
    pub frontend: &'a dyn BuildFrontend,
    pub shell: &'a Shell,
}

impl<'a> Pipeline<'a> {
    /// Run the stages of `plan` in order, stopping at the first failure.
    pub fn run(&self, plan: &[Stage]) -> Result<PipelineReport, StageError> {
        let mut report = PipelineReport::default();
        for &stage in plan {
            debug!("stage {} starting", stage.name());
            let started = Instant::now();
            self.run_stage(stage, &mut report)?;
            let duration = started.elapsed();
            debug!("stage {} finished in {:.2?}", stage.name(), duration);
            report.stages.push(StageReport { stage, duration });
        }
        Ok(report)
    }

    fn run_stage(&self, stage: Stage, report: &mut PipelineReport) -> Result<(), StageError> {
        match stage {
            Stage::Fetch => {
                self.shell.status(
                    Status::Fetching,
                    format!(
                        "{} {} ({})",
                        self.recipe.name,
                        self.recipe.tag(),
                        self.recipe.url
                    ),
                );
                let request = CloneRequest::for_recipe(self.recipe, self.layout, self.shallow);
                self.vcs.clone_at_tag(&request)?;
            }
            Stage::Toolchain => {
                self.shell.status(
                    Status::Generating,
                    format!("{NATIVE_FILE_NAME} ({})", self.settings),
                );
                self.frontend
                    .generate_toolchain(self.settings, self.options, self.layout)?;
            }
            Stage::Configure => {
                self.shell
                    .status(Status::Configuring, self.layout.build_folder.display());
                self.frontend.configure(self.layout)?;
            }
            Stage::Build => {
                self.shell.status(
                    Status::Building,
                    format!(
                        "{} {} [{}]",
                        self.recipe.name,
                        self.recipe.tag(),
                        self.options.default_library()
                    ),
                );
                self.frontend.build(self.layout)?;
            }
            Stage::Install => {
                self.shell
                    .status(Status::Installing, self.package_folder.display());
                self.frontend.install(self.layout, self.package_folder)?;
            }
            Stage::Headers => {
                self.shell
                    .status(Status::Packaging, format!("headers ({})", Recipe::HEADER_INSTALL_DIR));
                report.headers = self.copy_headers()?;
                report.package_info = Some(PackageInfo::for_recipe(self.recipe));
            }
        }
        Ok(())
    }

    /// Copy the public headers out of the source tree. Installing zero
    /// headers would produce an unusable package, so an empty match is an
    /// error.
    fn copy_headers(&self) -> Result<Vec<PathBuf>, StageError> {
        let src = self.layout.source_folder.join(Recipe::HEADER_SOURCE_DIR);
        let dst = self.package_folder.join(Recipe::HEADER_INSTALL_DIR);

        let copied = fs::copy_matching(Recipe::HEADER_GLOB, &src, &dst).map_err(|failure| {
            StageError::HeaderCopy {
                src: src.clone(),
                failure: failure.into(),
            }
        })?;

        if copied.is_empty() {
            return Err(StageError::HeaderCopy {
                src,
                failure: HeaderCopyFailure::Empty {
                    pattern: Recipe::HEADER_GLOB.to_string(),
                },
            });
        }

        debug!("copied {} header(s) into {}", copied.len(), dst.display());
        Ok(copied)
    }
}
