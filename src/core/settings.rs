//! Build settings and options.
//!
//! The configuration surface is closed: every axis is an enum, and applying
//! an unknown key or value is an error rather than a silent no-op. Values
//! reach the build through their Meson spellings (`as_meson_*` methods).

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::util::fs;

/// Target operating system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetOs {
    Linux,
    Macos,
    Windows,
}

impl TargetOs {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetOs::Linux => "linux",
            TargetOs::Macos => "macos",
            TargetOs::Windows => "windows",
        }
    }

    /// The `system` property in a Meson machine file.
    pub fn as_meson_system(&self) -> &'static str {
        match self {
            TargetOs::Linux => "linux",
            TargetOs::Macos => "darwin",
            TargetOs::Windows => "windows",
        }
    }
}

impl FromStr for TargetOs {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "linux" => Ok(TargetOs::Linux),
            "macos" => Ok(TargetOs::Macos),
            "windows" => Ok(TargetOs::Windows),
            other => Err(format!(
                "unsupported os `{other}` (expected `linux`, `macos`, or `windows`)"
            )),
        }
    }
}

impl fmt::Display for TargetOs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// C compiler family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Compiler {
    Gcc,
    Clang,
    #[serde(rename = "apple-clang")]
    AppleClang,
    Msvc,
}

impl Compiler {
    pub fn as_str(&self) -> &'static str {
        match self {
            Compiler::Gcc => "gcc",
            Compiler::Clang => "clang",
            Compiler::AppleClang => "apple-clang",
            Compiler::Msvc => "msvc",
        }
    }

    /// The C compiler binary for the machine file.
    pub fn c_binary(&self) -> &'static str {
        match self {
            Compiler::Gcc => "gcc",
            Compiler::Clang | Compiler::AppleClang => "clang",
            Compiler::Msvc => "cl",
        }
    }

    /// The archiver binary for the machine file.
    pub fn ar_binary(&self) -> &'static str {
        match self {
            Compiler::Msvc => "lib",
            _ => "ar",
        }
    }
}

impl FromStr for Compiler {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gcc" => Ok(Compiler::Gcc),
            "clang" => Ok(Compiler::Clang),
            "apple-clang" => Ok(Compiler::AppleClang),
            "msvc" => Ok(Compiler::Msvc),
            other => Err(format!(
                "unsupported compiler `{other}` (expected `gcc`, `clang`, `apple-clang`, or `msvc`)"
            )),
        }
    }
}

impl fmt::Display for Compiler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optimization/debug profile for the build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BuildType {
    Debug,
    #[default]
    Release,
    RelWithDebInfo,
    MinSizeRel,
}

impl BuildType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildType::Debug => "debug",
            BuildType::Release => "release",
            BuildType::RelWithDebInfo => "relwithdebinfo",
            BuildType::MinSizeRel => "minsizerel",
        }
    }

    /// The Meson `buildtype` option value.
    pub fn as_meson(&self) -> &'static str {
        match self {
            BuildType::Debug => "debug",
            BuildType::Release => "release",
            BuildType::RelWithDebInfo => "debugoptimized",
            BuildType::MinSizeRel => "minsize",
        }
    }
}

impl FromStr for BuildType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "debug" => Ok(BuildType::Debug),
            "release" => Ok(BuildType::Release),
            "relwithdebinfo" => Ok(BuildType::RelWithDebInfo),
            "minsizerel" => Ok(BuildType::MinSizeRel),
            other => Err(format!(
                "unsupported build_type `{other}` (expected `debug`, `release`, `relwithdebinfo`, or `minsizerel`)"
            )),
        }
    }
}

impl fmt::Display for BuildType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Target CPU architecture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Arch {
    X86_64,
    Aarch64,
    X86,
    Riscv64,
}

impl Arch {
    pub fn as_str(&self) -> &'static str {
        match self {
            Arch::X86_64 => "x86_64",
            Arch::Aarch64 => "aarch64",
            Arch::X86 => "x86",
            Arch::Riscv64 => "riscv64",
        }
    }

    /// The `cpu_family` property in a Meson machine file.
    pub fn as_meson_cpu_family(&self) -> &'static str {
        match self {
            Arch::X86_64 => "x86_64",
            Arch::Aarch64 => "aarch64",
            Arch::X86 => "x86",
            Arch::Riscv64 => "riscv64",
        }
    }
}

impl FromStr for Arch {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "x86_64" => Ok(Arch::X86_64),
            "aarch64" => Ok(Arch::Aarch64),
            "x86" => Ok(Arch::X86),
            "riscv64" => Ok(Arch::Riscv64),
            other => Err(format!(
                "unsupported arch `{other}` (expected `x86_64`, `aarch64`, `x86`, or `riscv64`)"
            )),
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The full settings axis: what we are building for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub os: TargetOs,
    pub compiler: Compiler,
    pub build_type: BuildType,
    pub arch: Arch,
}

impl Settings {
    /// Detect sensible defaults for the machine we are running on.
    pub fn host() -> Self {
        let os = if cfg!(target_os = "macos") {
            TargetOs::Macos
        } else if cfg!(target_os = "windows") {
            TargetOs::Windows
        } else {
            TargetOs::Linux
        };
        let compiler = match os {
            TargetOs::Macos => Compiler::AppleClang,
            TargetOs::Windows => Compiler::Msvc,
            TargetOs::Linux => Compiler::Gcc,
        };
        let arch = if cfg!(target_arch = "aarch64") {
            Arch::Aarch64
        } else if cfg!(target_arch = "x86") {
            Arch::X86
        } else if cfg!(target_arch = "riscv64") {
            Arch::Riscv64
        } else {
            Arch::X86_64
        };
        Settings {
            os,
            compiler,
            build_type: BuildType::default(),
            arch,
        }
    }

    /// Apply a single `key=value` override. Unknown keys and values are
    /// rejected outright.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "os" => self.os = value.parse().map_err(anyhow::Error::msg)?,
            "compiler" => self.compiler = value.parse().map_err(anyhow::Error::msg)?,
            "build_type" => self.build_type = value.parse().map_err(anyhow::Error::msg)?,
            "arch" => self.arch = value.parse().map_err(anyhow::Error::msg)?,
            other => bail!(
                "unknown setting `{other}` (expected `os`, `compiler`, `build_type`, or `arch`)"
            ),
        }
        Ok(())
    }
}

impl fmt::Display for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "os={}, compiler={}, build_type={}, arch={}",
            self.os, self.compiler, self.build_type, self.arch
        )
    }
}

/// Package options: how the library is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Options {
    /// Build a shared library instead of a static one.
    pub shared: bool,
}

impl Options {
    /// The Meson `default_library` option value.
    pub fn default_library(&self) -> &'static str {
        if self.shared {
            "shared"
        } else {
            "static"
        }
    }

    /// Apply a single `key=value` override.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "shared" => {
                self.shared = match value {
                    "true" => true,
                    "false" => false,
                    other => bail!(
                        "invalid value `{other}` for option `shared` (expected `true` or `false`)"
                    ),
                }
            }
            other => bail!("unknown option `{other}` (expected `shared`)"),
        }
        Ok(())
    }
}

impl fmt::Display for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "shared={}", self.shared)
    }
}

/// Split a `key=value` argument as passed to `-s`/`-o` flags.
pub fn parse_assignment(raw: &str) -> Result<(&str, &str)> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() && !value.is_empty() => Ok((key, value)),
        _ => bail!("malformed assignment `{raw}` (expected `key=value`)"),
    }
}

/// A profile file: partial settings and options loaded from TOML.
///
/// Every field is optional; missing fields keep their current value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Profile {
    #[serde(default)]
    pub settings: ProfileSettings,
    #[serde(default)]
    pub options: ProfileOptions,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfileSettings {
    pub os: Option<TargetOs>,
    pub compiler: Option<Compiler>,
    pub build_type: Option<BuildType>,
    pub arch: Option<Arch>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfileOptions {
    pub shared: Option<bool>,
}

impl Profile {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        toml::from_str(&contents)
            .with_context(|| format!("failed to parse profile: {}", path.display()))
    }

    /// Overlay this profile onto existing settings and options.
    pub fn apply_to(&self, settings: &mut Settings, options: &mut Options) {
        if let Some(os) = self.settings.os {
            settings.os = os;
        }
        if let Some(compiler) = self.settings.compiler {
            settings.compiler = compiler;
        }
        if let Some(build_type) = self.settings.build_type {
            settings.build_type = build_type;
        }
        if let Some(arch) = self.settings.arch {
            settings.arch = arch;
        }
        if let Some(shared) = self.options.shared {
            options.shared = shared;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linux_gcc() -> Settings {
        Settings {
            os: TargetOs::Linux,
            compiler: Compiler::Gcc,
            build_type: BuildType::Release,
            arch: Arch::X86_64,
        }
    }

    #[test]
    fn test_apply_known_setting() {
        let mut settings = linux_gcc();
        settings.apply("build_type", "debug").unwrap();
        assert_eq!(settings.build_type, BuildType::Debug);
    }

    #[test]
    fn test_apply_unknown_setting_key() {
        let mut settings = linux_gcc();
        let err = settings.apply("flavor", "spicy").unwrap_err();
        assert!(err.to_string().contains("unknown setting `flavor`"));
    }

    #[test]
    fn test_apply_unknown_setting_value() {
        let mut settings = linux_gcc();
        let err = settings.apply("os", "plan9").unwrap_err();
        assert!(err.to_string().contains("unsupported os `plan9`"));
        assert!(err.to_string().contains("linux"));
    }

    #[test]
    fn test_apply_unknown_option() {
        let mut options = Options::default();
        let err = options.apply("fpic", "true").unwrap_err();
        assert!(err.to_string().contains("unknown option `fpic`"));
    }

    #[test]
    fn test_options_default_is_static() {
        let options = Options::default();
        assert!(!options.shared);
        assert_eq!(options.default_library(), "static");
    }

    #[test]
    fn test_build_type_meson_mapping() {
        assert_eq!(BuildType::Release.as_meson(), "release");
        assert_eq!(BuildType::RelWithDebInfo.as_meson(), "debugoptimized");
        assert_eq!(BuildType::MinSizeRel.as_meson(), "minsize");
    }

    #[test]
    fn test_compiler_binaries() {
        assert_eq!(Compiler::Gcc.c_binary(), "gcc");
        assert_eq!(Compiler::AppleClang.c_binary(), "clang");
        assert_eq!(Compiler::Msvc.c_binary(), "cl");
        assert_eq!(Compiler::Msvc.ar_binary(), "lib");
    }

    #[test]
    fn test_parse_assignment() {
        assert_eq!(parse_assignment("os=linux").unwrap(), ("os", "linux"));
        assert!(parse_assignment("os").is_err());
        assert!(parse_assignment("=linux").is_err());
        assert!(parse_assignment("os=").is_err());
    }

    #[test]
    fn test_profile_overlay() {
        let toml_src = r#"
            [settings]
            build_type = "debug"

            [options]
            shared = true
        "#;
        let profile: Profile = toml::from_str(toml_src).unwrap();
        let mut settings = linux_gcc();
        let mut options = Options::default();

        profile.apply_to(&mut settings, &mut options);

        assert_eq!(settings.build_type, BuildType::Debug);
        assert_eq!(settings.os, TargetOs::Linux);
        assert!(options.shared);
    }

    #[test]
    fn test_profile_rejects_unknown_fields() {
        let toml_src = r#"
            [settings]
            flavor = "spicy"
        "#;
        assert!(toml::from_str::<Profile>(toml_src).is_err());
    }

    #[test]
    fn test_apple_clang_spelling() {
        #[derive(Deserialize)]
        struct Wrap {
            compiler: Compiler,
        }
        let wrap: Wrap = toml::from_str(r#"compiler = "apple-clang""#).unwrap();
        assert_eq!(wrap.compiler, Compiler::AppleClang);
        assert_eq!("apple-clang".parse::<Compiler>().unwrap(), Compiler::AppleClang);
    }
}
