// Host platform detection and the Windows-only guard

/// Host platform information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Platform {
    pub os: String,
    pub arch: String,
}

impl Platform {
    /// Detect the current host platform
    pub fn detect() -> Self {
        Self {
            os: detect_os(),
            arch: detect_arch(),
        }
    }

    /// LabVIEW builds only run on Windows hosts.
    pub fn is_windows(&self) -> bool {
        self.os == "windows"
    }
}

/// Errors from platform gating
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("OS {0} is not supported: LabVIEW builds require a Windows host")]
    Unsupported(String),
}

/// Fail unless the host is Windows. Build and package both call this
/// before touching the build tool.
pub fn require_windows(platform: &Platform) -> Result<(), PlatformError> {
    if platform.is_windows() {
        Ok(())
    } else {
        Err(PlatformError::Unsupported(platform.os.clone()))
    }
}

/// Detect operating system
fn detect_os() -> String {
    if cfg!(target_os = "linux") {
        "linux".to_string()
    } else if cfg!(target_os = "macos") {
        "macos".to_string()
    } else if cfg!(target_os = "windows") {
        "windows".to_string()
    } else {
        "unknown".to_string()
    }
}

/// Detect CPU architecture
fn detect_arch() -> String {
    if cfg!(target_arch = "x86_64") {
        "x64".to_string()
    } else if cfg!(target_arch = "aarch64") {
        "arm64".to_string()
    } else {
        "unknown".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_detection() {
        let platform = Platform::detect();
        assert!(!platform.os.is_empty());
        assert!(!platform.arch.is_empty());
    }

    #[test]
    fn test_require_windows() {
        let windows = Platform {
            os: "windows".to_string(),
            arch: "x64".to_string(),
        };
        assert!(require_windows(&windows).is_ok());

        let linux = Platform {
            os: "linux".to_string(),
            arch: "x64".to_string(),
        };
        let err = require_windows(&linux).unwrap_err();
        assert!(err.to_string().contains("linux"));
    }
}
