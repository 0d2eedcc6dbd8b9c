//! Structured CLI errors with meaningful exit codes.
//!
//! Exit code scheme:
//! - 0:  success
//! - 2:  clap arg parse error (automatic, before our code runs)
//! - 10: color or palette error (unparseable color, incomplete palette)
//! - 11: I/O error (project store read/write)
//! - 12: input error (bad --config JSON, unknown format)
//! - 13: serialization error
//! - 14: project error (unknown or duplicate project)

use std::fmt;
use tonekit_core::StudioError;

/// Errors produced by CLI operations, each mapped to a distinct exit code.
pub enum CliError {
    /// A color-level error (bad color string, bad palette record).
    Color(StudioError),
    /// An I/O error on the project store.
    Io(String),
    /// A user input error (bad JSON config, unknown format or name).
    Input(String),
    /// A serialization error (JSON output failure).
    Serialization(String),
    /// A project lookup or naming conflict.
    Project(StudioError),
}

impl CliError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Color(_) => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
            CliError::Project(_) => 14,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Color(e) | CliError::Project(e) => write!(f, "{e}"),
            CliError::Io(msg) => write!(f, "{msg}"),
            CliError::Input(msg) => write!(f, "{msg}"),
            CliError::Serialization(msg) => write!(f, "{msg}"),
        }
    }
}

impl From<StudioError> for CliError {
    fn from(e: StudioError) -> Self {
        match e {
            StudioError::Io(msg) => CliError::Io(msg),
            e @ (StudioError::UnknownFormat(_) | StudioError::InvalidName(_)) => {
                CliError::Input(e.to_string())
            }
            e @ (StudioError::UnknownProject(_) | StudioError::DuplicateProject(_)) => {
                CliError::Project(e)
            }
            other => CliError::Color(other),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}
