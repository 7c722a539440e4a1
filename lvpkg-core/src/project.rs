// Project discovery: locate the .lvproj file and derive the package name

use std::path::{Path, PathBuf};

/// LabVIEW project file extension
pub const PROJECT_EXTENSION: &str = "lvproj";

/// Errors from project discovery
#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    #[error("no .{PROJECT_EXTENSION} file found in {0}")]
    NotFound(PathBuf),
    #[error("project file name is not valid UTF-8: {0}")]
    InvalidFileName(PathBuf),
    #[error("failed to read directory {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Find the LabVIEW project file in a directory.
///
/// Returns the first entry with the `.lvproj` extension. Iteration order
/// is whatever the filesystem yields, so with multiple project files the
/// selection is unspecified but stable for a given directory state.
pub fn find_project_file(dir: &Path) -> Result<PathBuf, ProjectError> {
    let entries = std::fs::read_dir(dir).map_err(|source| ProjectError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_file()
            && path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case(PROJECT_EXTENSION))
        {
            return Ok(path);
        }
    }

    Err(ProjectError::NotFound(dir.to_path_buf()))
}

/// Base name of the project file, without the extension
pub fn project_stem(dir: &Path) -> Result<String, ProjectError> {
    let path = find_project_file(dir)?;

    path.file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.to_string())
        .ok_or_else(|| ProjectError::InvalidFileName(path.clone()))
}

/// Normalize a project stem into a package name.
///
/// LabVIEW project files routinely carry spaces and mixed case; package
/// names do not.
pub fn package_name(stem: &str) -> String {
    stem.to_lowercase().replace(' ', "_")
}
