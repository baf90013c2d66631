//! Error types for pipeline stages.

use std::io;
use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

use crate::pipeline::Stage;
use crate::util::process::CommandOutput;

/// Why an external command did not succeed.
///
/// A spawn failure means the program never ran (missing binary, permission
/// denied). An exit failure carries the full captured output of a run that
/// finished with a non-zero status.
#[derive(Debug, Error)]
pub enum ProcessFailure {
    #[error("failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },
    #[error("`{}` failed with {}", .0.command, .0.exit_display())]
    Exit(CommandOutput),
}

impl ProcessFailure {
    /// Captured output, when the command actually ran.
    pub fn output(&self) -> Option<&CommandOutput> {
        match self {
            ProcessFailure::Spawn { .. } => None,
            ProcessFailure::Exit(output) => Some(output),
        }
    }
}

/// Why copying headers into the package folder failed.
#[derive(Debug, Error)]
pub enum HeaderCopyFailure {
    #[error("no files matched `{pattern}`")]
    Empty { pattern: String },
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// A pipeline stage failed. Each variant maps back to exactly one [`Stage`].
#[derive(Debug, Error, Diagnostic)]
pub enum StageError {
    #[error("failed to fetch `{url}` at tag `{tag}`")]
    #[diagnostic(
        code(quarry::source::fetch),
        help("check that the tag exists upstream and that git can reach the remote")
    )]
    Fetch {
        url: String,
        tag: String,
        #[source]
        failure: ProcessFailure,
    },

    #[error("failed to write toolchain file `{}`", .path.display())]
    #[diagnostic(code(quarry::generate::toolchain))]
    Toolchain {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("meson setup failed")]
    #[diagnostic(
        code(quarry::build::configure),
        help("the build folder may hold a partial configuration; remove it and retry")
    )]
    Configure {
        #[source]
        failure: ProcessFailure,
    },

    #[error("meson compile failed")]
    #[diagnostic(code(quarry::build::compile))]
    Build {
        #[source]
        failure: ProcessFailure,
    },

    #[error("meson install failed")]
    #[diagnostic(code(quarry::package::install))]
    Install {
        #[source]
        failure: ProcessFailure,
    },

    #[error("failed to copy headers from `{}`", .src.display())]
    #[diagnostic(
        code(quarry::package::headers),
        help("the source tree may be missing or laid out differently than expected")
    )]
    HeaderCopy {
        src: PathBuf,
        #[source]
        failure: HeaderCopyFailure,
    },
}

impl StageError {
    /// The stage this error belongs to.
    pub fn stage(&self) -> Stage {
        match self {
            StageError::Fetch { .. } => Stage::Fetch,
            StageError::Toolchain { .. } => Stage::Toolchain,
            StageError::Configure { .. } => Stage::Configure,
            StageError::Build { .. } => Stage::Build,
            StageError::Install { .. } => Stage::Install,
            StageError::HeaderCopy { .. } => Stage::Headers,
        }
    }

    /// Captured command output, when the failing stage ran an external
    /// command that exited non-zero.
    pub fn captured(&self) -> Option<&CommandOutput> {
        match self {
            StageError::Fetch { failure, .. }
            | StageError::Configure { failure }
            | StageError::Build { failure }
            | StageError::Install { failure } => failure.output(),
            StageError::Toolchain { .. } | StageError::HeaderCopy { .. } => None,
        }
    }
}
