//! g-cli build bridge.
//!
//! g-cli is the command-line frontend to a local LabVIEW installation.
//! The invocation grammar is fixed:
//!
//! ```text
//! g-cli --kill --lv-ver <year> --timeout <ms> <tool-vi> -- <tool params>
//! ```
//!
//! The tool VIs ship inside the LabVIEW installation under
//! `vi.lib\G CLI Tools`. Exit status is the only success signal.

use std::path::{Path, PathBuf};
use std::process::Command;

/// Name of the bridge executable expected on PATH
pub const GCLI_EXECUTABLE: &str = "g-cli";

/// Tool VI that compiles a .lvproj build specification
pub const LVBUILD_TOOL: &str = "LVBuild.vi";

/// Errors from running the build bridge
#[derive(Debug, thiserror::Error)]
pub enum GcliError {
    #[error("g-cli not found on PATH; is the LabVIEW CLI bridge installed?")]
    MissingExecutable,
    #[error("failed to execute g-cli: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("g-cli {tool} exited with {code}: {stderr}")]
    ToolFailed {
        tool: String,
        code: i32,
        stderr: String,
    },
}

/// Runner bound to one LabVIEW release year
pub struct GcliRunner {
    lv_year: String,
    timeout_ms: u64,
}

impl GcliRunner {
    pub fn new(lv_year: &str, timeout_ms: u64) -> Self {
        Self {
            lv_year: lv_year.to_string(),
            timeout_ms,
        }
    }

    /// Path of a tool VI inside the LabVIEW installation for this year.
    pub fn tool_path(&self, tool: &str) -> PathBuf {
        PathBuf::from(format!(
            r"C:\Program Files (x86)\National Instruments\LabVIEW {}",
            self.lv_year
        ))
        .join(r"vi.lib\G CLI Tools")
        .join(tool)
    }

    /// Run a tool VI with the given parameters. Non-zero exit is fatal.
    pub fn run_tool(&self, tool: &str, params: &[String]) -> Result<(), GcliError> {
        which::which(GCLI_EXECUTABLE).map_err(|_| GcliError::MissingExecutable)?;

        let tool_vi = self.tool_path(tool);

        let mut command = Command::new(GCLI_EXECUTABLE);
        command
            .arg("--kill")
            .args(["--lv-ver", &self.lv_year])
            .args(["--timeout", &self.timeout_ms.to_string()])
            .arg(&tool_vi)
            .arg("--")
            .args(params);

        log::info!("running {} via g-cli (LabVIEW {})", tool, self.lv_year);

        let output = command.output()?;

        if !output.status.success() {
            return Err(GcliError::ToolFailed {
                tool: tool.to_string(),
                code: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(())
    }
}

/// Parameters for the LVBuild tool.
///
/// `-Debug "True"` is appended exactly when the build is not a release
/// build, i.e. off the primary branch or explicitly requested.
pub fn lvbuild_params(version: &str, branch: &str, debug: bool, project: &Path) -> Vec<String> {
    let mut params = vec![
        "-Version".to_string(),
        version.to_string(),
        "-Branch".to_string(),
        branch.to_string(),
    ];

    if debug {
        params.push("-Debug".to_string());
        params.push("True".to_string());
    }

    params.push(project.to_string_lossy().to_string());
    params
}
