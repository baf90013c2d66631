//! `quarry doctor` command

use std::path::Path;

use anyhow::Result;

use quarry::util::{find_executable, ProcessBuilder, Shell, Status};

use crate::cli::DoctorArgs;

/// External tools the pipeline shells out to, with what each is for.
const TOOLS: &[(&str, &str)] = &[
    ("git", "fetches the upstream sources"),
    ("meson", "configures and drives the build"),
    ("ninja", "default compile backend used by meson"),
];

pub fn execute(args: DoctorArgs, shell: &Shell) -> Result<()> {
    let mut missing = 0;
    for (name, purpose) in TOOLS {
        match find_executable(name) {
            Some(path) => {
                let version = probe_version(&path);
                shell.status(
                    Status::Info,
                    format!("{name} at {} ({version})", path.display()),
                );
            }
            None => {
                missing += 1;
                shell.warn(format!("{name} not found on PATH; {purpose}"));
            }
        }
    }

    if missing > 0 && args.strict {
        anyhow::bail!("{missing} required tool(s) missing");
    }
    Ok(())
}

fn probe_version(path: &Path) -> String {
    ProcessBuilder::new(path)
        .arg("--version")
        .exec()
        .ok()
        .filter(|output| output.success())
        .and_then(|output| output.stdout.lines().next().map(str::to_string))
        .unwrap_or_else(|| "unknown version".to_string())
}
