//! Subprocess execution with captured output.
//!
//! Every external tool the pipeline invokes goes through [`ProcessBuilder`],
//! and every invocation produces a [`CommandOutput`] that keeps the exit code
//! and the captured streams so failures stay diagnosable after the fact.

use std::ffi::OsStr;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Builder for subprocess execution.
#[derive(Debug, Clone)]
pub struct ProcessBuilder {
    program: PathBuf,
    args: Vec<String>,
}

impl ProcessBuilder {
    /// Create a new process builder for the given program.
    pub fn new(program: impl AsRef<Path>) -> Self {
        ProcessBuilder {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
        }
    }

    /// Add a single argument.
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_string_lossy().into_owned());
        self
    }

    /// Add multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args.extend(
            args.into_iter()
                .map(|s| s.as_ref().to_string_lossy().into_owned()),
        );
        self
    }

    /// Display the command for log and error messages.
    pub fn display_command(&self) -> String {
        let mut parts = vec![self.program.display().to_string()];
        parts.extend(self.args.iter().cloned());
        parts.join(" ")
    }

    /// Execute the command, wait for it to exit, and capture its output.
    ///
    /// Returns an error only when the process cannot be spawned (missing
    /// tool, permission problem). A process that runs and exits non-zero is
    /// a successful `exec` returning an unsuccessful [`CommandOutput`].
    pub fn exec(&self) -> io::Result<CommandOutput> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        let output = cmd.output()?;
        Ok(CommandOutput::from_output(self.display_command(), &output))
    }
}

/// The observable result of one external invocation.
///
/// Exit status and captured streams are preserved verbatim so the caller can
/// relay tool diagnostics without re-running anything.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// The command line that was executed, for display purposes.
    pub command: String,

    /// Exit code, or `None` if the process was terminated by a signal.
    pub exit_code: Option<i32>,

    /// Captured standard output.
    pub stdout: String,

    /// Captured standard error.
    pub stderr: String,
}

impl CommandOutput {
    /// Build a `CommandOutput` from a finished [`std::process::Output`].
    pub fn from_output(command: String, output: &std::process::Output) -> Self {
        CommandOutput {
            command,
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }

    /// Whether the process exited with status zero.
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Human-readable exit description ("exit code 1", "signal termination").
    pub fn exit_display(&self) -> String {
        match self.exit_code {
            Some(code) => format!("exit code {}", code),
            None => "signal termination".to_string(),
        }
    }

    /// The captured diagnostics a failed tool left behind: stderr if any,
    /// otherwise stdout.
    pub fn diagnostics(&self) -> &str {
        if self.stderr.trim().is_empty() {
            self.stdout.trim_end()
        } else {
            self.stderr.trim_end()
        }
    }
}

/// Find an executable in PATH.
pub fn find_executable(name: &str) -> Option<PathBuf> {
    which::which(name).ok()
}
