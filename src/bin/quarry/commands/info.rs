//! `quarry info` command

use anyhow::Result;

use quarry::core::PackageInfo;

use crate::cli::InfoArgs;

pub fn execute(args: InfoArgs) -> Result<()> {
    let (recipe, settings, options) = args.recipe.resolve()?;
    let info = PackageInfo::for_recipe(&recipe);

    if args.json {
        let doc = serde_json::json!({
            "recipe": recipe,
            "settings": settings,
            "options": options,
            "package_info": info,
        });
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(());
    }

    println!("{} v{}", recipe.name, recipe.version);
    println!("license: {}", recipe.license);
    println!("author: {}", recipe.author);
    println!("url: {}", recipe.url);
    println!("description: {}", recipe.description);
    println!("topics: {}", recipe.topics.join(", "));
    println!("settings: {settings}");
    println!("options: {options}");
    println!("libs: {}", info.libs.join(", "));
    println!("includedirs: {}", info.includedirs.join(", "));
    Ok(())
}
