//! Package recipe metadata.

use semver::Version;
use serde::Serialize;
use url::Url;

/// Everything we know about the package being built, independent of any
/// particular settings or options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recipe {
    pub name: String,
    pub version: Version,
    pub license: String,
    pub author: String,
    pub url: Url,
    pub description: String,
    pub topics: Vec<String>,
}

impl Recipe {
    /// Where library headers live inside the source tree.
    pub const HEADER_SOURCE_DIR: &'static str = "code/logic/fossil/threads";
    /// Where headers are installed inside the package folder.
    pub const HEADER_INSTALL_DIR: &'static str = "include/fossil/threads";
    /// Glob selecting which files count as headers.
    pub const HEADER_GLOB: &'static str = "*.h";

    /// The recipe for the Fossil Threads C library.
    pub fn fossil_threads() -> Self {
        Recipe {
            name: "fossil_threads".to_string(),
            version: Version::new(0, 1, 1),
            license: "MPL-2.0".to_string(),
            author: "Fossil Logic <michaelbrockus@gmail.com>".to_string(),
            url: Url::parse("https://github.com/fossillogic/fossil-threads").unwrap(),
            description: "Fossil Threads is a lightweight, portable multithreading library \
                          written in pure C with no external dependencies."
                .to_string(),
            topics: [
                "c",
                "thread",
                "mutex",
                "condition",
                "cpp",
                "meson",
                "conan-recipe",
                "mesonbuild",
                "ninja-build",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        }
    }

    /// Same recipe pinned to a different upstream version.
    pub fn with_version(mut self, version: Version) -> Self {
        self.version = version;
        self
    }

    /// The git tag for this version. Upstream tags releases as `v{version}`.
    pub fn tag(&self) -> String {
        format!("v{}", self.version)
    }
}
