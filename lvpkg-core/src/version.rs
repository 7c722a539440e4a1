//! Version derivation from repository history.
//!
//! The package version is `major.minor.patch.commitCount`, taken from the
//! most recent numeric release tag and the total commit count. On any
//! branch other than the primary one the patch component is bumped by one
//! first, marking the build as "next patch, in progress".

use crate::git::{self, GitError};
use regex::Regex;
use std::path::Path;

/// Version used when the project has no git history at all.
pub const FALLBACK_VERSION: &str = "0.0.0.1";

/// Errors from version derivation
#[derive(Debug, thiserror::Error)]
pub enum VersionError {
    #[error(transparent)]
    Git(#[from] GitError),
    #[error("release tag {0:?} is not of the form major.minor.patch")]
    BadTag(String),
}

/// Version and branch resolved from one repository state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedVersion {
    pub version: String,
    /// None when no repository was found and the fallback version applies.
    pub branch: Option<String>,
}

/// Derive the package version for the repository at `dir`.
///
/// A failing branch lookup means there is no usable history; that case
/// falls back to [`FALLBACK_VERSION`]. Every failure after the branch
/// resolved (missing tags, malformed tags) is fatal.
pub fn derive_version(dir: &Path, primary_branch: &str) -> Result<ResolvedVersion, VersionError> {
    let branch = match git::current_branch(dir) {
        Ok(branch) => branch,
        Err(err) => {
            log::debug!("no git history ({err}), using fallback version");
            return Ok(ResolvedVersion {
                version: FALLBACK_VERSION.to_string(),
                branch: None,
            });
        }
    };

    let tag = git::latest_release_tag(dir)?;
    let head = git::head_commit(dir)?;
    let root = git::root_commit(dir)?;
    let count = git::commit_count(dir, &root, &head)?;

    let version = if branch == primary_branch {
        format!("{tag}.{count}")
    } else {
        let (major, minor, patch) = split_release_tag(&tag)?;
        format!("{major}.{minor}.{}.{count}", patch + 1)
    };

    Ok(ResolvedVersion {
        version,
        branch: Some(branch),
    })
}

/// Split a `major.minor.patch` tag into numeric components.
pub fn split_release_tag(tag: &str) -> Result<(u64, u64, u64), VersionError> {
    // The describe glob is looser than the real shape, so re-check here.
    let pattern = match Regex::new(r"^(\d+)\.(\d+)\.(\d+)$") {
        Ok(p) => p,
        Err(_) => return Err(VersionError::BadTag(tag.to_string())),
    };

    let captures = pattern
        .captures(tag)
        .ok_or_else(|| VersionError::BadTag(tag.to_string()))?;

    let component = |i: usize| -> Result<u64, VersionError> {
        captures
            .get(i)
            .and_then(|m| m.as_str().parse::<u64>().ok())
            .ok_or_else(|| VersionError::BadTag(tag.to_string()))
    };

    Ok((component(1)?, component(2)?, component(3)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::test_support::{fixture_repo, git_ok};

    #[test]
    fn test_split_release_tag() {
        assert_eq!(split_release_tag("1.2.3").unwrap(), (1, 2, 3));
        assert_eq!(split_release_tag("0.10.200").unwrap(), (0, 10, 200));
    }

    #[test]
    fn test_split_rejects_malformed_tags() {
        assert!(split_release_tag("1.2").is_err());
        assert!(split_release_tag("v1.2.3").is_err());
        assert!(split_release_tag("1.2.x").is_err());
        assert!(split_release_tag("1.2.3.4").is_err());
    }

    #[test]
    fn test_primary_branch_version() {
        let dir = fixture_repo("version_master", 5, Some("1.2.3"));

        let resolved = derive_version(&dir, "master").unwrap();
        assert_eq!(resolved.version, "1.2.3.5");
        assert_eq!(resolved.branch.as_deref(), Some("master"));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_feature_branch_bumps_patch() {
        let dir = fixture_repo("version_branch", 5, Some("1.2.3"));
        git_ok(&dir, &["checkout", "-b", "feature/next"]);

        let resolved = derive_version(&dir, "master").unwrap();
        assert_eq!(resolved.version, "1.2.4.5");
        assert_eq!(resolved.branch.as_deref(), Some("feature/next"));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_configurable_primary_branch() {
        let dir = fixture_repo("version_main", 2, Some("0.1.0"));
        git_ok(&dir, &["branch", "-m", "master", "main"]);

        let resolved = derive_version(&dir, "main").unwrap();
        assert_eq!(resolved.version, "0.1.0.2");

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_no_repository_falls_back() {
        let dir = std::env::temp_dir().join("lvpkg_version_norepo");
        std::fs::create_dir_all(&dir).ok();

        // Only meaningful when the temp dir is not itself under a repo.
        if crate::git::current_branch(&dir).is_err() {
            let resolved = derive_version(&dir, "master").unwrap();
            assert_eq!(resolved.version, FALLBACK_VERSION);
            assert_eq!(resolved.branch, None);
        }

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_missing_tag_is_fatal() {
        let dir = fixture_repo("version_untagged", 2, None);

        assert!(matches!(
            derive_version(&dir, "master").unwrap_err(),
            VersionError::Git(_)
        ));

        std::fs::remove_dir_all(&dir).ok();
    }
}
