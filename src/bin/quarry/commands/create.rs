//! `quarry create` command
//!
//! The whole lifecycle in one go: fetch the tagged sources, generate the
//! toolchain, configure, compile, and lay out the package folder.

use anyhow::Result;

use quarry::meson::Meson;
use quarry::pipeline::{Pipeline, FULL_PLAN};
use quarry::sources::GitCli;
use quarry::util::{Shell, Status};

use crate::cli::{resolve_package_folder, CreateArgs};
use crate::commands::{finish_package, relay_failure};

pub fn execute(args: CreateArgs, shell: &Shell) -> Result<()> {
    let (recipe, settings, options) = args.recipe.resolve()?;
    let layout = args.folders.layout();
    let package_folder = resolve_package_folder(&args.folders.folder, &args.package_folder);

    let git = GitCli::new();
    let meson = Meson::new().with_jobs(args.jobs);
    let pipeline = Pipeline {
        recipe: &recipe,
        settings: &settings,
        options: &options,
        layout: &layout,
        package_folder: &package_folder,
        shallow: !args.full_history,
        vcs: &git,
        frontend: &meson,
        shell,
    };

    let report = pipeline.run(FULL_PLAN).map_err(relay_failure)?;

    finish_package(shell, &report, &package_folder)?;
    shell.status(
        Status::Finished,
        format!(
            "{} [{}] in {:.2?}",
            settings.build_type,
            options.default_library(),
            report.total()
        ),
    );
    Ok(())
}
