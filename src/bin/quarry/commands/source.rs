//! `quarry source` command

use anyhow::Result;

use quarry::meson::Meson;
use quarry::pipeline::{Pipeline, SOURCE_PLAN};
use quarry::sources::GitCli;
use quarry::util::{Shell, Status};

use crate::cli::{resolve_package_folder, SourceArgs};
use crate::commands::relay_failure;

pub fn execute(args: SourceArgs, shell: &Shell) -> Result<()> {
    let (recipe, settings, options) = args.recipe.resolve()?;
    let layout = args.folders.layout();
    let package_folder = resolve_package_folder(&args.folders.folder, &None);

    let git = GitCli::new();
    let meson = Meson::new();
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

    pipeline.run(SOURCE_PLAN).map_err(relay_failure)?;

    shell.status(
        Status::Finished,
        format!(
            "{} {} checked out into {}",
            recipe.name,
            recipe.tag(),
            layout.source_folder.display()
        ),
    );
    Ok(())
}
