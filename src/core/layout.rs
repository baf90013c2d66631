//! Folder layout for a recipe workspace.

use std::path::{Path, PathBuf};

/// Name of the out-of-source build directory.
pub const BUILD_DIR_NAME: &str = "builddir";

/// Where sources live and where build artifacts go.
///
/// The source folder is the workspace root itself; the build folder is a
/// subdirectory of it, so the build never writes outside the workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub source_folder: PathBuf,
    pub build_folder: PathBuf,
}

impl Layout {
    /// Resolve the layout rooted at a workspace folder.
    pub fn resolve(root: &Path) -> Self {
        Layout {
            source_folder: root.to_path_buf(),
            build_folder: root.join(BUILD_DIR_NAME),
        }
    }
}
