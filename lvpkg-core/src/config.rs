// Recipe options - lvpkg.json

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the options file looked up in the project directory
pub const OPTIONS_FILE: &str = "lvpkg.json";

/// Recipe options (lvpkg.json). Every field has a default, and a missing
/// file means "all defaults".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecipeOptions {
    /// Repository to clone in the source step. Empty means "source step
    /// unavailable", which is an error only when that step runs.
    #[serde(default)]
    pub git_url: String,

    /// Release branch; governs version-bump policy and the debug flag.
    #[serde(default = "default_primary_branch")]
    pub primary_branch: String,

    /// Destination sub-path for imported artifacts.
    #[serde(default = "default_install_folder")]
    pub install_folder: String,

    /// Timeout handed to the build bridge, in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_primary_branch() -> String {
    "master".to_string()
}

fn default_install_folder() -> String {
    "Support".to_string()
}

fn default_timeout_ms() -> u64 {
    60_000
}

impl Default for RecipeOptions {
    fn default() -> Self {
        Self {
            git_url: String::new(),
            primary_branch: default_primary_branch(),
            install_folder: default_install_folder(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl RecipeOptions {
    /// Load options from a project directory, defaulting when no
    /// lvpkg.json is present.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let path = project_dir.join(OPTIONS_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let options: RecipeOptions =
            serde_json::from_str(&content).context("Failed to parse lvpkg.json")?;

        options.validate()?;
        Ok(options)
    }

    /// Write options to a project directory.
    pub fn save(&self, project_dir: &Path) -> Result<()> {
        let path = project_dir.join(OPTIONS_FILE);
        let content = serde_json::to_string_pretty(self).context("Failed to serialize options")?;

        fs::write(&path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;

        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.primary_branch.is_empty() {
            anyhow::bail!("primary_branch cannot be empty");
        }

        if self.install_folder.is_empty() {
            anyhow::bail!("install_folder cannot be empty");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = RecipeOptions::default();
        assert_eq!(options.primary_branch, "master");
        assert_eq!(options.install_folder, "Support");
        assert_eq!(options.timeout_ms, 60_000);
        assert!(options.git_url.is_empty());
    }

    #[test]
    fn test_missing_file_means_defaults() {
        let dir = std::env::temp_dir().join("lvpkg_config_missing");
        fs::create_dir_all(&dir).unwrap();
        fs::remove_file(dir.join(OPTIONS_FILE)).ok();

        let options = RecipeOptions::load(&dir).unwrap();
        assert_eq!(options, RecipeOptions::default());

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = std::env::temp_dir().join("lvpkg_config_partial");
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join(OPTIONS_FILE),
            r#"{ "install_folder": "Deps", "primary_branch": "main" }"#,
        )
        .unwrap();

        let options = RecipeOptions::load(&dir).unwrap();
        assert_eq!(options.install_folder, "Deps");
        assert_eq!(options.primary_branch, "main");
        assert_eq!(options.timeout_ms, 60_000);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_empty_branch_rejected() {
        let dir = std::env::temp_dir().join("lvpkg_config_invalid");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(OPTIONS_FILE), r#"{ "primary_branch": "" }"#).unwrap();

        assert!(RecipeOptions::load(&dir).is_err());

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_round_trip() {
        let dir = std::env::temp_dir().join("lvpkg_config_roundtrip");
        fs::create_dir_all(&dir).unwrap();

        let mut options = RecipeOptions::default();
        options.git_url = "https://example.com/proj.git".to_string();
        options.save(&dir).unwrap();

        assert_eq!(RecipeOptions::load(&dir).unwrap(), options);

        fs::remove_dir_all(&dir).ok();
    }
}
