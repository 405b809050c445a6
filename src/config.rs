//! Configuration types for the export pipeline.
//!
//! This module provides plain configuration structs for library usage,
//! without any CLI framework dependencies. The CLI always runs with
//! [`ExportConfig::default`].
//!
//! # Example
//!
//! ```rust
//! use slackpack::config::{CsvSchema, ExportConfig};
//!
//! let config = ExportConfig::new()
//!     .with_output_file_name("messages.csv")
//!     .with_schema(CsvSchema::Legacy)
//!     .with_missing_user("Anonymous User");
//!
//! assert_eq!(config.schema.header()[0], "time");
//! ```

use serde::{Deserialize, Serialize};

/// Default name of the CSV written into the input directory.
pub const DEFAULT_OUTPUT_FILE: &str = "output.csv";

/// Versioned CSV column layout.
///
/// Both versions carry the same four columns in the same order; they only
/// differ in the name of the first one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CsvSchema {
    /// `time,user,channel,message`
    Legacy,

    /// `timestamp,user,channel,message`
    #[default]
    Current,
}

impl CsvSchema {
    /// Returns the header row for this schema.
    pub fn header(self) -> [&'static str; 4] {
        match self {
            CsvSchema::Legacy => ["time", "user", "channel", "message"],
            CsvSchema::Current => ["timestamp", "user", "channel", "message"],
        }
    }

    /// Schema version number, starting at 1.
    pub fn version(self) -> u32 {
        match self {
            CsvSchema::Legacy => 1,
            CsvSchema::Current => 2,
        }
    }
}

impl std::fmt::Display for CsvSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "v{} ({})", self.version(), self.header().join(","))
    }
}

/// Configuration for a directory export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// File name of the CSV created inside the input directory (default: `output.csv`)
    pub output_file_name: String,

    /// Column layout (default: [`CsvSchema::Current`])
    pub schema: CsvSchema,

    /// Value written to the `user` column when a message has no `user` field
    /// (default: empty)
    pub missing_user: String,

    /// Replace mention tokens in message text with display names (default: true)
    pub translate_mentions: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_file_name: DEFAULT_OUTPUT_FILE.to_string(),
            schema: CsvSchema::Current,
            missing_user: String::new(),
            translate_mentions: true,
        }
    }
}

impl ExportConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the output file name.
    #[must_use]
    pub fn with_output_file_name(mut self, name: impl Into<String>) -> Self {
        self.output_file_name = name.into();
        self
    }

    /// Sets the CSV schema.
    #[must_use]
    pub fn with_schema(mut self, schema: CsvSchema) -> Self {
        self.schema = schema;
        self
    }

    /// Sets the placeholder for messages without an author.
    #[must_use]
    pub fn with_missing_user(mut self, placeholder: impl Into<String>) -> Self {
        self.missing_user = placeholder.into();
        self
    }

    /// Enables or disables mention translation.
    #[must_use]
    pub fn with_translate_mentions(mut self, enabled: bool) -> Self {
        self.translate_mentions = enabled;
        self
    }
}
