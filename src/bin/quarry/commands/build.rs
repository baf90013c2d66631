//! `quarry build` command

use anyhow::Result;

use quarry::meson::Meson;
use quarry::pipeline::{Pipeline, BUILD_PLAN};
use quarry::sources::GitCli;
use quarry::util::{Shell, Status};

use crate::cli::{resolve_package_folder, BuildArgs};
use crate::commands::relay_failure;

pub fn execute(args: BuildArgs, shell: &Shell) -> Result<()> {
    let (recipe, settings, options) = args.recipe.resolve()?;
    let layout = args.folders.layout();
    let package_folder = resolve_package_folder(&args.folders.folder, &None);

    let git = GitCli::new();
    let meson = Meson::new().with_jobs(args.jobs);
    let pipeline = Pipeline {
        recipe: &recipe,
        settings: &settings,
        options: &options,
        layout: &layout,
        package_folder: &package_folder,
        shallow: true,
        vcs: &git,
        frontend: &meson,
        shell,
    };

    let report = pipeline.run(BUILD_PLAN).map_err(relay_failure)?;

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
