use std::path::PathBuf;

use thiserror::Error;

/// Errors that cannot be papered over with a default.
#[derive(Debug, Error)]
pub enum EnvConfigError {
    /// No `OLLAMA_MODELS` and no resolvable home directory to derive it from.
    #[error("cannot resolve the home directory for the default models path; set OLLAMA_MODELS")]
    HomeDirUnavailable,

    #[error("cannot locate the current executable: {0}")]
    CurrentExe(#[source] std::io::Error),

    #[error("executable path {} has no parent directory", .0.display())]
    NoExecutableDir(PathBuf),
}

pub type Result<T> = std::result::Result<T, EnvConfigError>;
