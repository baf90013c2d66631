//! `quarry package` command

use anyhow::Result;

use quarry::meson::Meson;
use quarry::pipeline::{Pipeline, PACKAGE_PLAN};
use quarry::sources::GitCli;
use quarry::util::Shell;

use crate::cli::{resolve_package_folder, PackageArgs};
use crate::commands::{finish_package, relay_failure};

pub fn execute(args: PackageArgs, shell: &Shell) -> Result<()> {
    let (recipe, settings, options) = args.recipe.resolve()?;
    let layout = args.folders.layout();
    let package_folder = resolve_package_folder(&args.folders.folder, &args.package_folder);

    let git = GitCli::new();
    let meson = Meson::new();
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

    let report = pipeline.run(PACKAGE_PLAN).map_err(relay_failure)?;

    finish_package(shell, &report, &package_folder)
}
