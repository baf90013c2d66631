//! Source acquisition.

pub mod git;

pub use git::GitCli;

use std::path::PathBuf;

use crate::core::{Layout, Recipe};
use crate::pipeline::StageError;
use crate::util::process::CommandOutput;

/// A request to materialize upstream sources at a release tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloneRequest {
    pub url: String,
    pub tag: String,
    /// Clone only the tip commit. A full-history clone is the slow path,
    /// needed only when someone wants to poke at upstream history.
    pub shallow: bool,
    pub dest: PathBuf,
}

impl CloneRequest {
    pub fn for_recipe(recipe: &Recipe, layout: &Layout, shallow: bool) -> Self {
        CloneRequest {
            url: recipe.url.to_string(),
            tag: recipe.tag(),
            shallow,
            dest: layout.source_folder.clone(),
        }
    }
}

/// A version-control client that can produce a checkout at a tag.
pub trait VcsClient {
    fn clone_at_tag(&self, request: &CloneRequest) -> Result<CommandOutput, StageError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_request_for_fossil_threads() {
        let recipe = Recipe::fossil_threads();
        let layout = Layout::resolve(Path::new("/work"));

        let request = CloneRequest::for_recipe(&recipe, &layout, true);

        assert_eq!(request.url, "https://github.com/fossillogic/fossil-threads");
        assert_eq!(request.tag, "v0.1.1");
        assert!(request.shallow);
        assert_eq!(request.dest, Path::new("/work"));
    }
}
