//! Output writers.
//!
//! Only CSV is produced:
//! - [`CsvExporter`] - incremental row writer used by the export pipeline
//! - [`write_csv`] / [`to_csv`] - whole-slice helpers for library users
//!
//! # Example
//!
//! ```rust
//! # fn main() -> slackpack::Result<()> {
//! use slackpack::config::CsvSchema;
//! use slackpack::core::OutputRow;
//! use slackpack::core::output::to_csv;
//!
//! let rows = vec![OutputRow {
//!     timestamp: "2024-01-15T10:30:00".into(),
//!     user: "Ann".into(),
//!     channel: "general".into(),
//!     message: "Hello!".into(),
//! }];
//!
//! let csv = to_csv(&rows, CsvSchema::Current)?;
//! assert!(csv.starts_with("timestamp,user,channel,message\n"));
//! # Ok(())
//! # }
//! ```

mod csv_writer;

pub use csv_writer::{CsvExporter, to_csv, write_csv};
