// lvpkg-core - build and package LabVIEW projects through the g-cli bridge

pub mod artifacts;
pub mod config;
pub mod gcli;
pub mod git;
pub mod lvproj;
pub mod platform;
pub mod project;
pub mod recipe;
pub mod version;

pub use artifacts::copy_tree;
pub use config::{RecipeOptions, OPTIONS_FILE};
pub use gcli::{lvbuild_params, GcliError, GcliRunner, LVBUILD_TOOL};
pub use git::GitError;
pub use lvproj::{labview_year, read_lv_version, LvprojError};
pub use platform::{require_windows, Platform, PlatformError};
pub use project::{find_project_file, package_name, project_stem, ProjectError};
pub use recipe::{Recipe, BUILD_OUTPUT_DIR, PACKAGE_LIB_DIR};
pub use version::{derive_version, ResolvedVersion, VersionError, FALLBACK_VERSION};
