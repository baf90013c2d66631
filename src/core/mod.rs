//! Core domain types: the recipe, its folder layout, the settings and
//! options surface, and the consumer-facing package info.

pub mod layout;
pub mod package_info;
pub mod recipe;
pub mod settings;

pub use layout::{Layout, BUILD_DIR_NAME};
pub use package_info::PackageInfo;
pub use recipe::Recipe;
pub use settings::{Arch, BuildType, Compiler, Options, Profile, Settings, TargetOs};
