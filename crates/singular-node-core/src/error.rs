//! Error taxonomy shared by every toolchain operation.
//!
//! All variants are fatal. Nothing in the workspace retries; a failed install
//! is recovered by the clean step of the next install.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// OS name not recognised. Raised before any filesystem or network activity.
    #[error("Unsupported platform: '{os_name}' (supported: macOS, Linux, Windows)")]
    UnsupportedPlatform { os_name: String },

    #[error("Failed to extract {}: {source}", archive.display())]
    ExtractionFailure {
        archive: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The process ran and exited unsuccessfully. `code` is `None` when it was
    /// terminated by a signal.
    #[error("{} exited with {}", executable.display(), describe_exit(*code))]
    ProcessFailure {
        executable: PathBuf,
        code: Option<i32>,
    },

    #[error("Failed to start {}: {source}", executable.display())]
    ProcessSpawn {
        executable: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to {action} {}: {source}", path.display())]
    FilesystemStateFailure {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Missing required setting {setting}")]
    MissingConfiguration { setting: &'static str },
}

impl Error {
    pub fn filesystem(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FilesystemStateFailure {
            action,
            path: path.into(),
            source,
        }
    }

    pub fn extraction(archive: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ExtractionFailure {
            archive: archive.into(),
            source,
        }
    }

    /// Exit code of a failed toolchain process, if it produced one.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::ProcessFailure { code, .. } => *code,
            _ => None,
        }
    }
}

fn describe_exit(code: Option<i32>) -> String {
    match code {
        Some(c) => format!("exit code {}", c),
        None => "no exit code (terminated by signal)".to_string(),
    }
}
