//! Terminal output for the CLI.
//!
//! Status lines follow the familiar cargo layout: a right-aligned, colored
//! verb followed by a free-form message.

use std::fmt;
use std::io::{self, IsTerminal, Write};
use std::str::FromStr;

/// How much output the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
}

/// Whether to colorize output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorChoice {
    Auto,
    Always,
    Never,
}

impl FromStr for ColorChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(ColorChoice::Auto),
            "always" => Ok(ColorChoice::Always),
            "never" => Ok(ColorChoice::Never),
            other => Err(format!(
                "invalid color choice `{other}` (expected `auto`, `always`, or `never`)"
            )),
        }
    }
}

/// Status verbs printed at the left margin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Fetching,
    Generating,
    Configuring,
    Building,
    Installing,
    Packaging,
    Created,
    Finished,
    Info,
    Warning,
    Error,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Fetching => "Fetching",
            Status::Generating => "Generating",
            Status::Configuring => "Configuring",
            Status::Building => "Building",
            Status::Installing => "Installing",
            Status::Packaging => "Packaging",
            Status::Created => "Created",
            Status::Finished => "Finished",
            Status::Info => "Info",
            Status::Warning => "Warning",
            Status::Error => "Error",
        }
    }

    fn color_code(&self) -> &'static str {
        match self {
            Status::Warning => "\x1b[1;33m",
            Status::Error => "\x1b[1;31m",
            _ => "\x1b[1;32m",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Handle for user-facing output.
#[derive(Debug, Clone)]
pub struct Shell {
    verbosity: Verbosity,
    use_color: bool,
}

impl Shell {
    /// Build a shell from the standard CLI flags.
    pub fn from_flags(quiet: bool, verbose: bool, color: ColorChoice) -> Self {
        let verbosity = if quiet {
            Verbosity::Quiet
        } else if verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        };
        let use_color = match color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => io::stderr().is_terminal(),
        };
        Shell { verbosity, use_color }
    }

    pub fn is_quiet(&self) -> bool {
        self.verbosity == Verbosity::Quiet
    }

    pub fn is_verbose(&self) -> bool {
        self.verbosity == Verbosity::Verbose
    }

    /// Print a status line: right-aligned colored verb, then the message.
    pub fn status(&self, status: Status, message: impl fmt::Display) {
        if self.is_quiet() {
            return;
        }
        let line = self.format_status(status, &message.to_string());
        let _ = writeln!(io::stderr(), "{line}");
    }

    /// Print a warning regardless of quiet mode.
    pub fn warn(&self, message: impl fmt::Display) {
        let line = self.format_status(Status::Warning, &message.to_string());
        let _ = writeln!(io::stderr(), "{line}");
    }

    /// Print an error regardless of quiet mode.
    pub fn error(&self, message: impl fmt::Display) {
        let line = self.format_status(Status::Error, &message.to_string());
        let _ = writeln!(io::stderr(), "{line}");
    }

    /// Verbose-only detail line, indented under the status column.
    pub fn note(&self, message: impl fmt::Display) {
        if !self.is_verbose() {
            return;
        }
        let _ = writeln!(io::stderr(), "{:>12} {message}", "");
    }

    fn format_status(&self, status: Status, message: &str) -> String {
        if self.use_color {
            format!(
                "{}{:>12}\x1b[0m {message}",
                status.color_code(),
                status.as_str()
            )
        } else {
            format!("{:>12} {message}", status.as_str())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_choice_parsing() {
        assert_eq!("auto".parse::<ColorChoice>().unwrap(), ColorChoice::Auto);
        assert_eq!(
            "always".parse::<ColorChoice>().unwrap(),
            ColorChoice::Always
        );
        assert_eq!("never".parse::<ColorChoice>().unwrap(), ColorChoice::Never);
        assert!("sometimes".parse::<ColorChoice>().is_err());
    }

    #[test]
    fn test_status_column_is_right_aligned() {
        let shell = Shell {
            verbosity: Verbosity::Normal,
            use_color: false,
        };
        let line = shell.format_status(Status::Fetching, "fossil-threads v0.1.1");
        assert_eq!(line, "    Fetching fossil-threads v0.1.1");
    }

    #[test]
    fn test_colored_status_wraps_verb_only() {
        let shell = Shell {
            verbosity: Verbosity::Normal,
            use_color: true,
        };
        let line = shell.format_status(Status::Error, "boom");
        assert!(line.starts_with("\x1b[1;31m"));
        assert!(line.ends_with("\x1b[0m boom"));
    }

    #[test]
    fn test_quiet_suppresses_status() {
        let shell = Shell {
            verbosity: Verbosity::Quiet,
            use_color: false,
        };
        assert!(shell.is_quiet());
    }
}
