//! Core export logic for slackpack.
//!
//! This module contains:
//! - [`models`] - Raw export records and output rows
//! - [`users`] - User directory loading and the [`UserIndex`]
//! - [`discovery`] - Finding channel-day files
//! - [`mentions`] - Inline mention translation
//! - [`output`] - CSV writer
//! - [`processor`] - The end-to-end export pipeline
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use slackpack::core::{ExportConfig, export_directory};
//!
//! let stats = export_directory("slack_export".as_ref(), &ExportConfig::default())?;
//! println!("{} rows", stats.rows);
//! # Ok::<(), slackpack::SlackpackError>(())
//! ```

pub mod discovery;
pub mod mentions;
pub mod models;
pub mod output;
pub mod processor;
pub mod users;

// Re-export main types for convenience
pub use discovery::{discover_channel_files, read_channel_file};
pub use mentions::{MentionTranslator, translate_mentions};
pub use models::{ChannelDayFile, OutputRow, RawMessage, SlackTimestamp, UserRecord};
pub use output::{CsvExporter, to_csv, write_csv};
pub use processor::{ExportStats, Exporter, build_row, export_directory};
pub use users::{UserIndex, load_user_index};

pub use crate::config::ExportConfig;
