//! Unified error types for slackpack.
//!
//! A single [`SlackpackError`] enum covers every failure the export pipeline
//! can hit. Unresolvable user references are not errors: they fall back to the
//! raw ID and never show up here.
//!
//! # Error Categories
//!
//! - **Usage errors** - the input path is not a directory ([`SlackpackError::NotADirectory`])
//! - **Malformed input** - invalid JSON, missing `id`, bad `ts`
//! - **I/O and output** - file system and CSV writer failures

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// A specialized [`Result`] type for slackpack operations.
///
/// # Example
///
/// ```rust
/// use slackpack::error::Result;
/// use slackpack::UserIndex;
///
/// fn build() -> Result<UserIndex> {
///     Ok(UserIndex::new())
/// }
/// ```
pub type Result<T> = std::result::Result<T, SlackpackError>;

/// The error type for all slackpack operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SlackpackError {
    /// An I/O error occurred, optionally tied to the file that caused it.
    #[error("IO error{}: {source}", path.as_ref().map(|p| format!(" (file: {})", p.display())).unwrap_or_default())]
    Io {
        /// The underlying I/O error
        #[source]
        source: io::Error,
        /// The file path, if available
        path: Option<PathBuf>,
    },

    /// Failed to parse an export file as JSON.
    ///
    /// Also covers records missing a required field such as a user `id`,
    /// since serde reports those as JSON errors.
    #[error("Failed to parse {format}{}: {source}", path.as_ref().map(|p| format!(" (file: {})", p.display())).unwrap_or_default())]
    Parse {
        /// The kind of file being parsed (e.g., "user directory", "channel-day")
        format: &'static str,
        /// The underlying JSON error
        #[source]
        source: serde_json::Error,
        /// The file path, if available
        path: Option<PathBuf>,
    },

    /// A message `ts` field was missing or not numeric.
    #[error("Invalid timestamp '{value}'{}: expected epoch seconds", path.as_ref().map(|p| format!(" (file: {})", p.display())).unwrap_or_default())]
    InvalidTimestamp {
        /// The offending value (`<missing>` when the field was absent)
        value: String,
        /// The file path, if available
        path: Option<PathBuf>,
    },

    /// The input path is not a directory.
    #[error("{} is not a directory", display_name(path))]
    NotADirectory {
        /// The path that was given
        path: PathBuf,
    },

    /// A discovery glob pattern could not be compiled.
    #[error("Invalid search pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// A path matched during discovery could not be read.
    #[error("Discovery error: {0}")]
    Glob(#[from] glob::GlobError),

    /// CSV writing error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl From<io::Error> for SlackpackError {
    fn from(err: io::Error) -> Self {
        SlackpackError::Io {
            source: err,
            path: None,
        }
    }
}

/// Final path component, or the whole path when there is none (e.g. `/`).
fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl SlackpackError {
    /// Creates an I/O error tied to a file.
    pub fn io(source: io::Error, path: impl Into<PathBuf>) -> Self {
        SlackpackError::Io {
            source,
            path: Some(path.into()),
        }
    }

    /// Creates a parse error for a user directory file.
    pub fn users_parse(source: serde_json::Error, path: Option<PathBuf>) -> Self {
        SlackpackError::Parse {
            format: "user directory",
            source,
            path,
        }
    }

    /// Creates a parse error for a channel-day message file.
    pub fn messages_parse(source: serde_json::Error, path: Option<PathBuf>) -> Self {
        SlackpackError::Parse {
            format: "channel-day file",
            source,
            path,
        }
    }

    /// Creates an invalid timestamp error.
    pub fn invalid_timestamp(value: impl Into<String>, path: Option<PathBuf>) -> Self {
        SlackpackError::InvalidTimestamp {
            value: value.into(),
            path,
        }
    }

    /// Creates a not-a-directory usage error.
    pub fn not_a_directory(path: impl Into<PathBuf>) -> Self {
        SlackpackError::NotADirectory { path: path.into() }
    }

    /// Attaches a file path to errors that carry one and don't have it yet.
    #[must_use]
    pub fn with_path(self, file: &Path) -> Self {
        match self {
            SlackpackError::Io { source, path: None } => SlackpackError::io(source, file),
            SlackpackError::Parse {
                format,
                source,
                path: None,
            } => SlackpackError::Parse {
                format,
                source,
                path: Some(file.to_path_buf()),
            },
            SlackpackError::InvalidTimestamp { value, path: None } => {
                SlackpackError::invalid_timestamp(value, Some(file.to_path_buf()))
            }
            other => other,
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, SlackpackError::Io { .. })
    }

    /// Returns `true` if this is a parse error.
    pub fn is_parse(&self) -> bool {
        matches!(self, SlackpackError::Parse { .. })
    }

    /// Returns `true` if this is a timestamp error.
    pub fn is_invalid_timestamp(&self) -> bool {
        matches!(self, SlackpackError::InvalidTimestamp { .. })
    }

    /// Returns `true` if this is a usage error (input not a directory).
    pub fn is_usage(&self) -> bool {
        matches!(self, SlackpackError::NotADirectory { .. })
    }
}

// ============================================================================
// Tests
// ============================================================================
