//! Consumer-facing package information.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::recipe::Recipe;

/// What a consumer needs to link against the packaged library: the library
/// names to pass to the linker and the include roots, relative to the
/// package folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageInfo {
    pub libs: Vec<String>,
    pub includedirs: Vec<String>,
}

impl PackageInfo {
    /// File name used when the info is written into a package folder.
    pub const FILE_NAME: &'static str = "package-info.json";

    pub fn for_recipe(recipe: &Recipe) -> Self {
        PackageInfo {
            libs: vec![recipe.name.clone()],
            includedirs: vec!["include".to_string()],
        }
    }

    /// Serialize into `dir` as pretty-printed JSON. Returns the file path.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(Self::FILE_NAME);
        let json = serde_json::to_string_pretty(self).context("failed to serialize package info")?;
        crate::util::fs::write_string(&path, &json)?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_info_for_fossil_threads() {
        let info = PackageInfo::for_recipe(&Recipe::fossil_threads());
        assert_eq!(info.libs, vec!["fossil_threads"]);
        assert_eq!(info.includedirs, vec!["include"]);
    }

    #[test]
    fn test_write_and_read_back() {
        let tmp = TempDir::new().unwrap();
        let info = PackageInfo::for_recipe(&Recipe::fossil_threads());

        let path = info.write_to(tmp.path()).unwrap();

        assert_eq!(path.file_name().unwrap(), PackageInfo::FILE_NAME);
        let raw = std::fs::read_to_string(&path).unwrap();
        let parsed: PackageInfo = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed, info);
    }
}
