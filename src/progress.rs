//! Progress reporting for directory exports.
//!
//! The pipeline pushes a [`Progress`] snapshot to a callback after every
//! channel-day file. Reporting is a pure side effect: the callback cannot
//! influence the export.
//!
//! # Example
//!
//! ```rust
//! use slackpack::progress::{Progress, ProgressCallback};
//! use std::sync::Arc;
//!
//! let callback: ProgressCallback = Arc::new(|progress| {
//!     if let Some(pct) = progress.percentage() {
//!         println!("Progress: {:.1}%", pct);
//!     }
//! });
//!
//! for i in 0..4usize {
//!     callback(Progress::new(i + 1, Some(4), (i + 1) * 10));
//! }
//! ```

use std::sync::Arc;

/// Snapshot of an export in flight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Progress {
    /// Channel-day files fully written so far.
    pub files_processed: usize,

    /// Number of channel-day files discovered, if known.
    pub total_files: Option<usize>,

    /// CSV rows written so far (header excluded).
    pub rows_written: usize,
}

impl Progress {
    pub fn new(files_processed: usize, total_files: Option<usize>, rows_written: usize) -> Self {
        Self {
            files_processed,
            total_files,
            rows_written,
        }
    }

    /// Returns file progress as a percentage (0.0 - 100.0).
    ///
    /// Returns `None` if the total is not known.
    ///
    /// ```rust
    /// use slackpack::progress::Progress;
    ///
    /// assert_eq!(Progress::new(1, Some(4), 0).percentage(), Some(25.0));
    /// assert_eq!(Progress::new(1, None, 0).percentage(), None);
    /// ```
    pub fn percentage(&self) -> Option<f64> {
        self.total_files.map(|total| {
            if total == 0 {
                100.0
            } else {
                (self.files_processed as f64 / total as f64) * 100.0
            }
        })
    }

    /// Returns whether every discovered file has been processed.
    pub fn is_complete(&self) -> bool {
        self.total_files
            .map(|total| self.files_processed >= total)
            .unwrap_or(false)
    }

    /// Files still to process, if the total is known.
    pub fn remaining_files(&self) -> Option<usize> {
        self.total_files
            .map(|total| total.saturating_sub(self.files_processed))
    }
}

/// Callback type for receiving progress updates.
pub type ProgressCallback = Arc<dyn Fn(Progress) + Send + Sync>;

/// Creates a no-op progress callback.
pub fn no_progress() -> ProgressCallback {
    Arc::new(|_| {})
}

/// Creates a progress callback that redraws a single line on stderr.
pub fn stderr_progress() -> ProgressCallback {
    Arc::new(|progress| {
        if let (Some(pct), Some(total)) = (progress.percentage(), progress.total_files) {
            eprint!(
                "\r   {:>5.1}% ({}/{} files, {} rows)",
                pct, progress.files_processed, total, progress.rows_written
            );
            if progress.is_complete() {
                eprintln!();
            }
        }
    })
}
