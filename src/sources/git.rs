//! Fetching sources with the `git` command-line client.

use std::path::PathBuf;

use tracing::debug;

use crate::pipeline::{ProcessFailure, StageError};
use crate::sources::{CloneRequest, VcsClient};
use crate::util::process::{CommandOutput, ProcessBuilder};

/// [`VcsClient`] backed by the system `git` binary.
#[derive(Debug, Clone)]
pub struct GitCli {
    program: PathBuf,
}

impl GitCli {
    pub fn new() -> Self {
        GitCli {
            program: PathBuf::from("git"),
        }
    }

    /// Use a specific git binary instead of whatever `PATH` resolves.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        GitCli {
            program: program.into(),
        }
    }

    /// Arguments for a tag checkout. `--branch` accepts tags as well as
    /// branches, so a single clone lands directly on the release commit.
    fn clone_args(request: &CloneRequest) -> Vec<String> {
        let mut args = vec![
            "clone".to_string(),
            "--branch".to_string(),
            request.tag.clone(),
        ];
        if request.shallow {
            args.push("--depth".to_string());
            args.push("1".to_string());
        }
        args.push(request.url.clone());
        args.push(request.dest.display().to_string());
        args
    }
}

impl Default for GitCli {
    fn default() -> Self {
        GitCli::new()
    }
}

impl VcsClient for GitCli {
    fn clone_at_tag(&self, request: &CloneRequest) -> Result<CommandOutput, StageError> {
        let cmd = ProcessBuilder::new(&self.program).args(Self::clone_args(request));
        debug!("running {}", cmd.display_command());

        let fetch_error = |failure| StageError::Fetch {
            url: request.url.clone(),
            tag: request.tag.clone(),
            failure,
        };

        let output = cmd.exec().map_err(|source| {
            fetch_error(ProcessFailure::Spawn {
                command: cmd.display_command(),
                source,
            })
        })?;

        if !output.success() {
            return Err(fetch_error(ProcessFailure::Exit(output)));
        }
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(shallow: bool) -> CloneRequest {
        CloneRequest {
            url: "https://github.com/fossillogic/fossil-threads".to_string(),
            tag: "v0.1.1".to_string(),
            shallow,
            dest: PathBuf::from("/work/src"),
        }
    }

    #[test]
    fn test_shallow_clone_args() {
        let args = GitCli::clone_args(&request(true));
        assert_eq!(
            args,
            vec![
                "clone",
                "--branch",
                "v0.1.1",
                "--depth",
                "1",
                "https://github.com/fossillogic/fossil-threads",
                "/work/src",
            ]
        );
    }

    #[test]
    fn test_full_history_clone_args() {
        let args = GitCli::clone_args(&request(false));
        assert!(!args.contains(&"--depth".to_string()));
        assert_eq!(args[0], "clone");
        assert_eq!(args[1], "--branch");
    }

    #[test]
    fn test_missing_binary_reports_fetch_stage() {
        let git = GitCli::with_program("/nonexistent/definitely-not-git");
        let err = git.clone_at_tag(&request(true)).unwrap_err();
        assert_eq!(err.stage(), crate::pipeline::Stage::Fetch);
        assert!(err.captured().is_none());
    }
}
