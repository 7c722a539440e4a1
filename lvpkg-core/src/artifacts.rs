// Artifact copying between build, package and install layouts

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Copy every file under `src` into `dst`, preserving relative paths.
/// Returns the number of files copied.
pub fn copy_tree(src: &Path, dst: &Path) -> Result<u64> {
    if !src.exists() {
        anyhow::bail!("source directory not found: {}", src.display());
    }

    fs::create_dir_all(dst)
        .with_context(|| format!("Failed to create directory: {}", dst.display()))?;

    let mut copied = 0u64;

    for entry in
        fs::read_dir(src).with_context(|| format!("Failed to read {}", src.display()))?
    {
        let entry = entry?;
        let path = entry.path();
        let target = dst.join(entry.file_name());

        if path.is_dir() {
            copied += copy_tree(&path, &target)?;
        } else {
            fs::copy(&path, &target).with_context(|| {
                format!("Failed to copy {} to {}", path.display(), target.display())
            })?;
            copied += 1;
        }
    }

    Ok(copied)
}
