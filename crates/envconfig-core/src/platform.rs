//! Per-platform differences, kept in one table instead of scattered `cfg!` checks.

use std::path::PathBuf;

use crate::error::{EnvConfigError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Windows,
    MacOs,
    Linux,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformCapabilities {
    /// Lowercase `http_proxy` & co. are distinct variables (not on Windows, where
    /// lookup is case-insensitive).
    pub lowercase_proxy_vars: bool,
    /// CUDA/ROCm visibility variables apply (not on macOS).
    pub gpu_visibility_vars: bool,
    /// Library directory relative to the executable's directory.
    pub lib_relative_to_exe: &'static str,
}

const WINDOWS: PlatformCapabilities = PlatformCapabilities {
    lowercase_proxy_vars: false,
    gpu_visibility_vars: true,
    lib_relative_to_exe: ".",
};

const MACOS: PlatformCapabilities = PlatformCapabilities {
    lowercase_proxy_vars: true,
    gpu_visibility_vars: false,
    lib_relative_to_exe: "..",
};

// Linux and everything else: binary lives in bin/, libraries one level up.
const UNIX: PlatformCapabilities = PlatformCapabilities {
    lowercase_proxy_vars: true,
    gpu_visibility_vars: true,
    lib_relative_to_exe: "..",
};

impl Platform {
    pub const fn current() -> Self {
        if cfg!(target_os = "windows") {
            Self::Windows
        } else if cfg!(target_os = "macos") {
            Self::MacOs
        } else if cfg!(target_os = "linux") {
            Self::Linux
        } else {
            Self::Other
        }
    }

    pub const fn capabilities(self) -> PlatformCapabilities {
        match self {
            Self::Windows => WINDOWS,
            Self::MacOs => MACOS,
            Self::Linux | Self::Other => UNIX,
        }
    }
}

/// `"."` on Windows, `".."` elsewhere.
pub fn lib_relative_to_exe() -> &'static str {
    Platform::current().capabilities().lib_relative_to_exe
}

/// Library directory for the running executable.
pub fn lib_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe().map_err(EnvConfigError::CurrentExe)?;
    let dir = exe
        .parent()
        .ok_or_else(|| EnvConfigError::NoExecutableDir(exe.clone()))?;
    Ok(dir.join(lib_relative_to_exe()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capability_table() {
        assert!(!Platform::Windows.capabilities().lowercase_proxy_vars);
        assert!(Platform::Windows.capabilities().gpu_visibility_vars);
        assert!(Platform::MacOs.capabilities().lowercase_proxy_vars);
        assert!(!Platform::MacOs.capabilities().gpu_visibility_vars);
        assert_eq!(Platform::Linux.capabilities(), Platform::Other.capabilities());
    }

    #[test]
    fn test_lib_relative_to_exe() {
        assert_eq!(Platform::Windows.capabilities().lib_relative_to_exe, ".");
        assert_eq!(Platform::MacOs.capabilities().lib_relative_to_exe, "..");
        assert_eq!(Platform::Linux.capabilities().lib_relative_to_exe, "..");

        let expected = if cfg!(windows) { "." } else { ".." };
        assert_eq!(lib_relative_to_exe(), expected);
    }

    #[test]
    fn test_current_platform() {
        #[cfg(target_os = "linux")]
        assert_eq!(Platform::current(), Platform::Linux);
        #[cfg(target_os = "macos")]
        assert_eq!(Platform::current(), Platform::MacOs);
        #[cfg(windows)]
        assert_eq!(Platform::current(), Platform::Windows);
    }

    #[test]
    fn test_lib_dir_sits_next_to_exe() {
        let exe = std::env::current_exe().unwrap();
        let dir = lib_dir().unwrap();
        assert_eq!(dir, exe.parent().unwrap().join(lib_relative_to_exe()));
    }
}
