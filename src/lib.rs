//! # Slackpack
//!
//! Flatten a Slack workspace export into a single CSV of messages with user
//! IDs resolved to display names.
//!
//! ## Overview
//!
//! A Slack export is a directory tree with one folder per channel, one
//! `YYYY-MM-DD.json` file per day, and one or more `users.json` directory
//! files. Slackpack runs a single pass over it:
//!
//! 1. load every `*users.json` into a [`UserIndex`]
//! 2. discover every channel-day file, tagging it with its channel
//! 3. translate `<@U…>` mentions in message text to display names
//! 4. write `timestamp,user,channel,message` rows to `output.csv`
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use slackpack::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let stats = export_directory("slack_export".as_ref(), &ExportConfig::default())?;
//!     println!("wrote {} rows to {}", stats.rows, stats.output_path.display());
//!     Ok(())
//! }
//! ```
//!
//! ## Using the Stages Directly
//!
//! ```rust
//! use slackpack::core::{MentionTranslator, UserIndex, UserRecord};
//!
//! let index: UserIndex = [UserRecord::new("U123ABCDE").with_real_name("Ann")]
//!     .iter()
//!     .collect();
//!
//! let translator = MentionTranslator::new(&index);
//! assert_eq!(translator.translate("ping <@U123ABCDE>"), "ping Ann");
//! ```
//!
//! ## Module Structure
//!
//! - [`core`] — Pipeline stages
//!   - [`core::users`] — [`UserIndex`], [`load_user_index`](core::load_user_index)
//!   - [`core::discovery`] — [`discover_channel_files`](core::discover_channel_files)
//!   - [`core::mentions`] — [`MentionTranslator`](core::MentionTranslator)
//!   - [`core::output`] — [`CsvExporter`](core::CsvExporter), [`to_csv`](core::to_csv)
//!   - [`core::processor`] — [`export_directory`](core::export_directory), [`Exporter`](core::Exporter)
//! - [`config`] — [`ExportConfig`](config::ExportConfig), [`CsvSchema`](config::CsvSchema)
//! - [`progress`] — Progress callbacks
//! - [`cli`] — CLI arguments (requires the `cli` feature)
//! - [`error`] — Unified error types ([`SlackpackError`], [`Result`])
//! - [`prelude`] — Convenient re-exports

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod progress;

// Re-export the main types at the crate root for convenience
pub use crate::core::UserIndex;
pub use error::{Result, SlackpackError};

/// Convenient re-exports for common usage.
///
/// ```rust
/// use slackpack::prelude::*;
/// ```
pub mod prelude {
    // Error types
    pub use crate::error::{Result, SlackpackError};

    // Configuration
    pub use crate::config::{CsvSchema, ExportConfig};

    // Records
    pub use crate::core::models::{ChannelDayFile, OutputRow, RawMessage, UserRecord};

    // Pipeline stages
    pub use crate::core::discovery::{discover_channel_files, read_channel_file};
    pub use crate::core::mentions::{MentionTranslator, translate_mentions};
    pub use crate::core::users::{UserIndex, load_user_index};

    // Output
    pub use crate::core::output::{CsvExporter, to_csv, write_csv};

    // Pipeline
    pub use crate::core::processor::{ExportStats, Exporter, build_row, export_directory};

    // Progress
    pub use crate::progress::{Progress, ProgressCallback};
}
