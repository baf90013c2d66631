//! Command implementations

pub mod build;
pub mod completions;
pub mod create;
pub mod doctor;
pub mod info;
pub mod package;
pub mod source;

use std::path::Path;

use anyhow::Result;
use quarry::pipeline::{PipelineReport, StageError};
use quarry::util::{fs, Shell, Status};

/// Print the captured output of a failed external command, then convert
/// the error for the caller to propagate.
pub(crate) fn relay_failure(err: StageError) -> anyhow::Error {
    if let Some(output) = err.captured() {
        let text = output.diagnostics().trim_end();
        if !text.is_empty() {
            eprintln!("{text}");
        }
    }
    err.into()
}

/// Finish a packaging run: write the consumer info file and report what
/// the package folder now holds.
pub(crate) fn finish_package(
    shell: &Shell,
    report: &PipelineReport,
    package_folder: &Path,
) -> Result<()> {
    if let Some(info) = &report.package_info {
        info.write_to(package_folder)?;
    }
    let files = fs::file_inventory(package_folder);
    shell.status(
        Status::Created,
        format!("{} ({} files)", package_folder.display(), files.len()),
    );
    for file in &files {
        shell.note(file.display());
    }
    Ok(())
}
