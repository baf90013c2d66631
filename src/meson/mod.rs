//! Driving the Meson build system.

pub mod toolchain;

pub use toolchain::{MesonToolchain, NATIVE_FILE_NAME};

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::{Layout, Options, Settings};
use crate::pipeline::{ProcessFailure, StageError};
use crate::util::process::{CommandOutput, ProcessBuilder};

/// The build-system frontend the pipeline drives.
///
/// A trait so tests can substitute a recording fake for the real Meson
/// installation.
pub trait BuildFrontend {
    /// Materialize the toolchain description the frontend will consume.
    fn generate_toolchain(
        &self,
        settings: &Settings,
        options: &Options,
        layout: &Layout,
    ) -> Result<PathBuf, StageError>;

    /// Configure the build folder from the source folder.
    fn configure(&self, layout: &Layout) -> Result<CommandOutput, StageError>;

    /// Compile the configured build folder.
    fn build(&self, layout: &Layout) -> Result<CommandOutput, StageError>;

    /// Install the built artifacts into the package folder.
    fn install(&self, layout: &Layout, package_folder: &Path)
        -> Result<CommandOutput, StageError>;
}

/// [`BuildFrontend`] backed by the system `meson` binary.
#[derive(Debug, Clone)]
pub struct Meson {
    program: PathBuf,
    jobs: Option<usize>,
}

impl Meson {
    pub fn new() -> Self {
        Meson {
            program: PathBuf::from("meson"),
            jobs: None,
        }
    }

    /// Use a specific meson binary instead of whatever `PATH` resolves.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Meson {
            program: program.into(),
            jobs: None,
        }
    }

    /// Cap compile parallelism. `None` leaves the choice to Meson.
    pub fn with_jobs(mut self, jobs: Option<usize>) -> Self {
        self.jobs = jobs;
        self
    }

    fn configure_args(layout: &Layout) -> Vec<String> {
        vec![
            "setup".to_string(),
            layout.build_folder.display().to_string(),
            layout.source_folder.display().to_string(),
            "--native-file".to_string(),
            layout.build_folder.join(NATIVE_FILE_NAME).display().to_string(),
        ]
    }

    fn compile_args(&self, layout: &Layout) -> Vec<String> {
        let mut args = vec![
            "compile".to_string(),
            "-C".to_string(),
            layout.build_folder.display().to_string(),
        ];
        if let Some(jobs) = self.jobs {
            args.push("-j".to_string());
            args.push(jobs.to_string());
        }
        args
    }

    fn install_args(layout: &Layout, package_folder: &Path) -> Vec<String> {
        vec![
            "install".to_string(),
            "-C".to_string(),
            layout.build_folder.display().to_string(),
            "--destdir".to_string(),
            package_folder.display().to_string(),
        ]
    }

    /// Run meson with the given arguments, mapping failures through
    /// `on_failure` so each caller lands on its own stage error.
    fn run(
        &self,
        args: Vec<String>,
        on_failure: impl Fn(ProcessFailure) -> StageError,
    ) -> Result<CommandOutput, StageError> {
        let cmd = ProcessBuilder::new(&self.program).args(args);
        debug!("running {}", cmd.display_command());

        let output = cmd.exec().map_err(|source| {
            on_failure(ProcessFailure::Spawn {
                command: cmd.display_command(),
                source,
            })
        })?;

        if !output.success() {
            return Err(on_failure(ProcessFailure::Exit(output)));
        }
        Ok(output)
    }
}

impl Default for Meson {
    fn default() -> Self {
        Meson::new()
    }
}

impl BuildFrontend for Meson {
    fn generate_toolchain(
        &self,
        settings: &Settings,
        options: &Options,
        layout: &Layout,
    ) -> Result<PathBuf, StageError> {
        MesonToolchain::new(settings, options).write(&layout.build_folder)
    }

    fn configure(&self, layout: &Layout) -> Result<CommandOutput, StageError> {
        self.run(Self::configure_args(layout), |failure| {
            StageError::Configure { failure }
        })
    }

    fn build(&self, layout: &Layout) -> Result<CommandOutput, StageError> {
        self.run(self.compile_args(layout), |failure| StageError::Build {
            failure,
        })
    }

    fn install(
        &self,
        layout: &Layout,
        package_folder: &Path,
    ) -> Result<CommandOutput, StageError> {
        self.run(Self::install_args(layout, package_folder), |failure| {
            StageError::Install { failure }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::Stage;

    fn layout() -> Layout {
        Layout::resolve(Path::new("/work/fossil"))
    }

    #[test]
    fn test_configure_args() {
        assert_eq!(
            Meson::configure_args(&layout()),
            vec![
                "setup",
                "/work/fossil/builddir",
                "/work/fossil",
                "--native-file",
                "/work/fossil/builddir/quarry-native.ini",
            ]
        );
    }

    #[test]
    fn test_compile_args_serial() {
        let meson = Meson::new();
        assert_eq!(
            meson.compile_args(&layout()),
            vec!["compile", "-C", "/work/fossil/builddir"]
        );
    }

    #[test]
    fn test_compile_args_with_jobs() {
        let meson = Meson::new().with_jobs(Some(4));
        assert_eq!(
            meson.compile_args(&layout()),
            vec!["compile", "-C", "/work/fossil/builddir", "-j", "4"]
        );
    }

    #[test]
    fn test_install_args() {
        assert_eq!(
            Meson::install_args(&layout(), Path::new("/work/fossil/package")),
            vec![
                "install",
                "-C",
                "/work/fossil/builddir",
                "--destdir",
                "/work/fossil/package",
            ]
        );
    }

    #[test]
    fn test_missing_binary_reports_configure_stage() {
        let meson = Meson::with_program("/nonexistent/definitely-not-meson");
        let err = meson.configure(&layout()).unwrap_err();
        assert_eq!(err.stage(), Stage::Configure);
        assert!(err.captured().is_none());
    }
}
