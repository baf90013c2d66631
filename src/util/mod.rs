//! Shared utilities: process execution, filesystem helpers, terminal output.

pub mod fs;
pub mod process;
pub mod shell;

pub use process::{find_executable, CommandOutput, ProcessBuilder};
pub use shell::{ColorChoice, Shell, Status, Verbosity};
