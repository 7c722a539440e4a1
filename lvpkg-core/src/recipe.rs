//! Recipe lifecycle: the steps an outer package workflow drives.
//!
//! A [`Recipe`] is resolved once per evaluation (name, version, branch)
//! and immutable afterwards. The steps mirror the usual package-manager
//! hooks: source retrieval, build, package, import.

use crate::artifacts::copy_tree;
use crate::config::RecipeOptions;
use crate::gcli::{lvbuild_params, GcliRunner, LVBUILD_TOOL};
use crate::platform::{require_windows, Platform};
use crate::version::derive_version;
use crate::{git, lvproj, project};
use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

/// Sub-directory the LabVIEW build specification writes its output to
pub const BUILD_OUTPUT_DIR: &str = "Build";

/// Sub-directory binaries occupy inside a package
pub const PACKAGE_LIB_DIR: &str = "lib";

/// One resolved recipe evaluation
#[derive(Debug, Clone)]
pub struct Recipe {
    root: PathBuf,
    options: RecipeOptions,
    platform: Platform,
    name: String,
    version: String,
    branch: Option<String>,
}

impl Recipe {
    /// Resolve a recipe for the project at `root`: load options, locate
    /// the project file, derive name and version from it and from the
    /// repository history.
    pub fn resolve(root: &Path) -> Result<Self> {
        let options = RecipeOptions::load(root)?;

        let stem = project::project_stem(root)?;
        let name = project::package_name(&stem);

        let resolved = derive_version(root, &options.primary_branch)?;

        log::info!("resolved {} {}", name, resolved.version);

        Ok(Self {
            root: root.to_path_buf(),
            options,
            platform: Platform::detect(),
            name,
            version: resolved.version,
            branch: resolved.branch,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Branch the version was derived from; None when no repository was
    /// found and the fallback version applies.
    pub fn branch(&self) -> Option<&str> {
        self.branch.as_deref()
    }

    pub fn options(&self) -> &RecipeOptions {
        &self.options
    }

    /// Whether this evaluation produces a debug build: anything off the
    /// primary branch is built with debugging enabled.
    pub fn is_debug(&self) -> bool {
        match &self.branch {
            Some(branch) => branch != &self.options.primary_branch,
            None => false,
        }
    }

    /// Binary package identity: a digest over name, version and build
    /// settings. The install folder is deliberately left out, so changing
    /// where artifacts land never produces a new package id.
    pub fn package_id(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.name.as_bytes());
        hasher.update(self.version.as_bytes());
        hasher.update(self.platform.os.as_bytes());
        hasher.update(self.platform.arch.as_bytes());

        format!("{:x}", hasher.finalize())
    }

    /// Clone the configured repository into `dest` and check out the
    /// branch this recipe was resolved from.
    pub fn fetch_source(&self, dest: &Path) -> Result<()> {
        if self.options.git_url.is_empty() {
            anyhow::bail!("no git_url configured in lvpkg.json; cannot fetch source");
        }

        let branch = self
            .branch
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("no branch resolved; cannot fetch source"))?;

        git::clone(&self.options.git_url, dest)
            .with_context(|| format!("Failed to clone {}", self.options.git_url))?;
        git::checkout(dest, branch).context("Failed to check out resolved branch")?;

        Ok(())
    }

    /// Compile the project through the build bridge. Windows only.
    ///
    /// The build tool rewrites project files while compiling, so the
    /// working tree is reset afterwards.
    pub fn build(&self, force_debug: bool) -> Result<()> {
        require_windows(&self.platform)?;

        let project_path = project::find_project_file(&self.root)?;
        let lv_year = lvproj::project_labview_year(&project_path)?;

        let branch = self.branch().unwrap_or(self.options.primary_branch.as_str());
        let debug = force_debug || self.is_debug();

        println!("Building {} {} (LabVIEW {})", self.name, self.version, lv_year);

        let runner = GcliRunner::new(&lv_year, self.options.timeout_ms);
        let params = lvbuild_params(&self.version, branch, debug, &project_path);
        runner.run_tool(LVBUILD_TOOL, &params)?;

        git::reset_hard(&self.root).context("Failed to restore working tree after build")?;

        Ok(())
    }

    /// Copy build output into the package layout. Windows only.
    pub fn package(&self, package_dir: &Path) -> Result<()> {
        require_windows(&self.platform)?;

        let build_output = self.root.join(BUILD_OUTPUT_DIR);
        let lib_dir = package_dir.join(PACKAGE_LIB_DIR);

        let copied = copy_tree(&build_output, &lib_dir)?;
        println!("Packaged {} files into {}", copied, lib_dir.display());

        Ok(())
    }

    /// Copy packaged binaries into the project's install folder (or an
    /// explicit destination).
    pub fn import(&self, package_dir: &Path, dest: Option<&Path>) -> Result<()> {
        let lib_dir = package_dir.join(PACKAGE_LIB_DIR);
        let target = match dest {
            Some(dir) => dir.to_path_buf(),
            None => self.root.join(&self.options.install_folder),
        };

        let copied = copy_tree(&lib_dir, &target)?;
        println!("Imported {} files into {}", copied, target.display());

        Ok(())
    }
}
