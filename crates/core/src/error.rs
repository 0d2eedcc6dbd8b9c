//! Error types for the tonekit core.
//!
//! The color engine itself never fails: conversions fall back to an echo of
//! the input or a zero color. These errors cover the fallible edges around
//! it (strict parsing, persisted records, the project store).

use thiserror::Error;

/// Errors produced by tonekit operations.
#[derive(Debug, Error)]
pub enum StudioError {
    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// A palette could not be rebuilt from the given entries.
    #[error("invalid palette: {0}")]
    InvalidPalette(String),

    /// A palette key name is not one of the known keys.
    #[error("unknown palette key: {0}")]
    UnknownPaletteKey(String),

    /// A display format name was not recognized.
    #[error("unknown color format: {0} (expected oklch, hex, rgba or hsl)")]
    UnknownFormat(String),

    /// A project name was not found in the store.
    #[error("project not found: {0}")]
    UnknownProject(String),

    /// A project with this name already exists in the store.
    #[error("project already exists: {0}")]
    DuplicateProject(String),

    /// A project or palette name is empty or otherwise unusable.
    #[error("invalid name: {0:?}")]
    InvalidName(String),

    /// Reading or writing persisted state failed.
    #[error("i/o error: {0}")]
    Io(String),
}
