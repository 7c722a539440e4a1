// Git integration: every query shells out to the git binary

use std::path::Path;
use std::process::Command;

/// Tag pattern handed to `git describe --match`: plain numeric
/// major.minor.patch, no leading "v".
pub const RELEASE_TAG_GLOB: &str = "[0-9]*.[0-9]*.[0-9]*";

/// Errors from git subprocess calls
#[derive(Debug, thiserror::Error)]
pub enum GitError {
    #[error("failed to execute git: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("git {command} failed: {stderr}")]
    Failed { command: String, stderr: String },
}

/// Run git in `dir` and return trimmed stdout.
fn run_git(dir: &Path, args: &[&str]) -> Result<String, GitError> {
    let output = Command::new("git").arg("-C").arg(dir).args(args).output()?;

    if !output.status.success() {
        return Err(GitError::Failed {
            command: args.join(" "),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Name of the currently checked-out branch.
///
/// Fails when `dir` is not inside a git repository; the version deriver
/// treats that as "no history" and falls back to a fixed version.
pub fn current_branch(dir: &Path) -> Result<String, GitError> {
    run_git(dir, &["rev-parse", "--abbrev-ref", "HEAD"])
}

/// Most recent reachable tag matching the release pattern.
pub fn latest_release_tag(dir: &Path) -> Result<String, GitError> {
    run_git(
        dir,
        &[
            "describe",
            "--tags",
            "--match",
            RELEASE_TAG_GLOB,
            "--abbrev=0",
        ],
    )
}

/// SHA of the current HEAD commit.
pub fn head_commit(dir: &Path) -> Result<String, GitError> {
    run_git(dir, &["rev-parse", "HEAD"])
}

/// SHA of the repository's root commit (the one with no parents).
pub fn root_commit(dir: &Path) -> Result<String, GitError> {
    run_git(dir, &["rev-list", "--max-parents=0", "HEAD"])
}

/// Number of commits reachable from root and head together.
///
/// With root an ancestor of head this is the total history length, which
/// is what the version scheme appends as its fourth component.
pub fn commit_count(dir: &Path, root: &str, head: &str) -> Result<u64, GitError> {
    let raw = run_git(dir, &["rev-list", "--count", root, head])?;

    raw.parse::<u64>().map_err(|_| GitError::Failed {
        command: "rev-list --count".to_string(),
        stderr: format!("unexpected count output: {raw}"),
    })
}

/// Clone a repository into `dir`.
pub fn clone(url: &str, dir: &Path) -> Result<(), GitError> {
    let dir_str = dir.to_string_lossy();
    let output = Command::new("git")
        .args(["clone", url, dir_str.as_ref()])
        .output()?;

    if !output.status.success() {
        return Err(GitError::Failed {
            command: format!("clone {url}"),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(())
}

/// Check out a branch or tag.
pub fn checkout(dir: &Path, rev: &str) -> Result<(), GitError> {
    run_git(dir, &["checkout", rev]).map(|_| ())
}

/// Discard every working-tree change. The LabVIEW build tool rewrites
/// project files in place; the tree is restored after each build.
pub fn reset_hard(dir: &Path) -> Result<(), GitError> {
    run_git(dir, &["reset", "--hard"]).map(|_| ())
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use std::path::PathBuf;

    /// Create a scratch git repository with `commits` commits and run
    /// `git tag <tag>` on the first one if a tag is given.
    pub fn fixture_repo(name: &str, commits: usize, tag: Option<&str>) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("lvpkg_git_{}", name));
        if dir.exists() {
            std::fs::remove_dir_all(&dir).ok();
        }
        std::fs::create_dir_all(&dir).unwrap();

        git_ok(&dir, &["init", "-b", "master"]);
        git_ok(&dir, &["config", "user.email", "test@lvpkg.local"]);
        git_ok(&dir, &["config", "user.name", "lvpkg tests"]);

        for i in 0..commits {
            std::fs::write(dir.join("file.txt"), format!("rev {i}")).unwrap();
            git_ok(&dir, &["add", "."]);
            git_ok(&dir, &["commit", "-m", &format!("commit {i}")]);

            if i == 0 {
                if let Some(t) = tag {
                    git_ok(&dir, &["tag", t]);
                }
            }
        }

        dir
    }

    pub fn git_ok(dir: &Path, args: &[&str]) {
        let output = Command::new("git")
            .arg("-C")
            .arg(dir)
            .args(args)
            .output()
            .unwrap();
        assert!(
            output.status.success(),
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
    }
}
