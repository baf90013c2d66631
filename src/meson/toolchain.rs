//! Meson machine file generation.
//!
//! Settings and options are projected into a native machine file that
//! `meson setup` consumes via `--native-file`. The file pins the compiler
//! and archiver, describes the target machine, and fixes the built-in
//! options the pipeline depends on. `prefix` is `/` so that installing
//! with `--destdir` lands files directly under the package folder.

use std::fs;
use std::path::{Path, PathBuf};

use crate::core::{Options, Settings};
use crate::pipeline::StageError;

/// File name of the generated machine file inside the build folder.
pub const NATIVE_FILE_NAME: &str = "quarry-native.ini";

/// Renderer for the machine file.
#[derive(Debug, Clone, Copy)]
pub struct MesonToolchain {
    settings: Settings,
    options: Options,
}

impl MesonToolchain {
    pub fn new(settings: &Settings, options: &Options) -> Self {
        MesonToolchain {
            settings: *settings,
            options: *options,
        }
    }

    /// Render the machine file contents. Deterministic for given inputs.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str("# Machine file generated by quarry. Do not edit.\n");
        out.push_str("[binaries]\n");
        out.push_str(&format!("c = '{}'\n", self.settings.compiler.c_binary()));
        out.push_str(&format!("ar = '{}'\n", self.settings.compiler.ar_binary()));
        out.push('\n');
        out.push_str("[properties]\n");
        out.push_str(&format!("system = '{}'\n", self.settings.os.as_meson_system()));
        out.push_str(&format!(
            "cpu_family = '{}'\n",
            self.settings.arch.as_meson_cpu_family()
        ));
        out.push('\n');
        out.push_str("[built-in options]\n");
        out.push_str(&format!(
            "buildtype = '{}'\n",
            self.settings.build_type.as_meson()
        ));
        out.push_str(&format!(
            "default_library = '{}'\n",
            self.options.default_library()
        ));
        out.push_str("prefix = '/'\n");
        out
    }

    /// Write the machine file into the build folder, creating the folder if
    /// needed. Returns the path of the written file.
    pub fn write(&self, build_folder: &Path) -> Result<PathBuf, StageError> {
        let path = build_folder.join(NATIVE_FILE_NAME);
        let toolchain_error = |source| StageError::Toolchain {
            path: path.clone(),
            source,
        };

        fs::create_dir_all(build_folder).map_err(toolchain_error)?;
        fs::write(&path, self.render()).map_err(toolchain_error)?;
        Ok(path)
    }
}
