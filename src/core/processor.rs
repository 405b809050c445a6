//! The export pipeline: users → discovery → translation → CSV.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use super::discovery::{discover_channel_files, read_channel_file};
use super::mentions::MentionTranslator;
use super::models::{OutputRow, RawMessage};
use super::output::CsvExporter;
use super::users::{discover_user_files, load_user_files};
use crate::config::ExportConfig;
use crate::error::{Result, SlackpackError};
use crate::progress::{Progress, ProgressCallback};

/// Statistics about a completed export.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExportStats {
    /// User directory files loaded
    pub user_files: usize,
    /// Distinct user IDs in the index
    pub users: usize,
    /// Channel-day files processed
    pub message_files: usize,
    /// Distinct channel names seen
    pub channels: usize,
    /// CSV data rows written (one per message)
    pub rows: usize,
    /// Where the CSV was written
    pub output_path: PathBuf,
}

impl ExportStats {
    /// Average messages per channel-day file.
    pub fn rows_per_file(&self) -> f64 {
        if self.message_files == 0 {
            return 0.0;
        }
        self.rows as f64 / self.message_files as f64
    }
}

/// Turns one raw message into a CSV row.
///
/// - timestamp: local ISO-8601, error if `ts` is missing or not numeric
/// - user: display name, else the raw ID, else `config.missing_user`
/// - message: mention-translated text, empty when absent
pub fn build_row(
    channel: &str,
    message: &RawMessage,
    translator: &MentionTranslator<'_>,
    config: &ExportConfig,
) -> Result<OutputRow> {
    let timestamp = message.timestamp()?.to_local_iso8601()?;

    let user = match message.user.as_deref() {
        Some(id) => translator.index().resolve(id).to_string(),
        None => config.missing_user.clone(),
    };

    let text = message.text.as_deref();
    let message = if config.translate_mentions {
        translator.translate_opt(text)
    } else {
        text.unwrap_or_default().to_string()
    };

    Ok(OutputRow {
        timestamp,
        user,
        channel: channel.to_string(),
        message,
    })
}

/// Configurable export runner.
///
/// # Example
///
/// ```rust,no_run
/// use slackpack::config::ExportConfig;
/// use slackpack::core::Exporter;
/// use slackpack::progress::stderr_progress;
///
/// let stats = Exporter::new(ExportConfig::default())
///     .with_progress(stderr_progress())
///     .run("slack_export".as_ref())?;
/// # Ok::<(), slackpack::SlackpackError>(())
/// ```
pub struct Exporter {
    config: ExportConfig,
    progress: Option<ProgressCallback>,
}

impl Exporter {
    pub fn new(config: ExportConfig) -> Self {
        Self {
            config,
            progress: None,
        }
    }

    /// Registers a callback invoked after each channel-day file.
    #[must_use]
    pub fn with_progress(mut self, callback: ProgressCallback) -> Self {
        self.progress = Some(callback);
        self
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Path of the CSV this exporter writes for `root`.
    pub fn output_path(&self, root: &Path) -> PathBuf {
        root.join(&self.config.output_file_name)
    }

    /// Runs the export for `root`.
    ///
    /// The output file is created (and truncated) before any input is read.
    /// Processing stops at the first malformed file; rows already written stay
    /// in the output.
    pub fn run(&self, root: &Path) -> Result<ExportStats> {
        if !root.is_dir() {
            return Err(SlackpackError::not_a_directory(root));
        }

        let output_path = self.output_path(root);
        let mut exporter = CsvExporter::create(&output_path, self.config.schema)?;
        exporter.write_header()?;

        let user_files = discover_user_files(root)?;
        let index = load_user_files(&user_files)?;

        let translator = MentionTranslator::new(&index);
        let files = discover_channel_files(root)?;
        let total = files.len();
        let mut channels = BTreeSet::new();

        for (done, file) in files.iter().enumerate() {
            let messages = read_channel_file(file)?;
            for message in &messages {
                let row = build_row(&file.channel, message, &translator, &self.config)
                    .map_err(|e| e.with_path(&file.path))?;
                exporter.write_row(&row)?;
            }
            channels.insert(file.channel.as_str());

            if let Some(callback) = &self.progress {
                callback(Progress::new(done + 1, Some(total), exporter.rows_written()));
            }
        }

        let rows = exporter.rows_written();
        exporter.finish()?;
        tracing::info!(rows, path = %output_path.display(), "export complete");

        Ok(ExportStats {
            user_files: user_files.len(),
            users: index.len(),
            message_files: total,
            channels: channels.len(),
            rows,
            output_path,
        })
    }
}

/// Exports `root` with `config` and no progress reporting.
pub fn export_directory(root: &Path, config: &ExportConfig) -> Result<ExportStats> {
    Exporter::new(config.clone()).run(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{RawTimestamp, UserRecord};
    use crate::core::users::UserIndex;

    fn index() -> UserIndex {
        [UserRecord::new("U123ABCDE").with_real_name("Ann")]
            .iter()
            .collect()
    }

    fn message(user: Option<&str>, ts: &str, text: Option<&str>) -> RawMessage {
        RawMessage {
            user: user.map(String::from),
            ts: Some(RawTimestamp::Text(ts.to_string())),
            text: text.map(String::from),
        }
    }

    #[test]
    fn test_build_row_resolves_everything() {
        let index = index();
        let translator = MentionTranslator::new(&index);
        let msg = message(Some("U123ABCDE"), "1700000000", Some("hi <@U123ABCDE>"));

        let row = build_row("general", &msg, &translator, &ExportConfig::default()).unwrap();
        assert_eq!(row.user, "Ann");
        assert_eq!(row.channel, "general");
        assert_eq!(row.message, "hi Ann");
        assert_eq!(
            row.timestamp,
            "1700000000"
                .parse::<crate::core::SlackTimestamp>()
                .unwrap()
                .to_local_iso8601()
                .unwrap()
        );
    }

    #[test]
    fn test_build_row_unknown_user_keeps_id() {
        let index = index();
        let translator = MentionTranslator::new(&index);
        let msg = message(Some("U999ZZZZZ"), "1", None);

        let row = build_row("general", &msg, &translator, &ExportConfig::default()).unwrap();
        assert_eq!(row.user, "U999ZZZZZ");
        assert_eq!(row.message, "");
    }

    #[test]
    fn test_build_row_missing_user_placeholder() {
        let index = index();
        let translator = MentionTranslator::new(&index);
        let msg = message(None, "1", Some("bot says hi"));

        let row = build_row("general", &msg, &translator, &ExportConfig::default()).unwrap();
        assert_eq!(row.user, "");

        let config = ExportConfig::new().with_missing_user("Anonymous User");
        let row = build_row("general", &msg, &translator, &config).unwrap();
        assert_eq!(row.user, "Anonymous User");
    }

    #[test]
    fn test_build_row_translation_disabled() {
        let index = index();
        let translator = MentionTranslator::new(&index);
        let msg = message(Some("U123ABCDE"), "1", Some("hi <@U123ABCDE>"));

        let config = ExportConfig::new().with_translate_mentions(false);
        let row = build_row("general", &msg, &translator, &config).unwrap();
        assert_eq!(row.message, "hi <@U123ABCDE>");
    }

    #[test]
    fn test_build_row_bad_timestamp() {
        let index = index();
        let translator = MentionTranslator::new(&index);

        let msg = message(Some("U123ABCDE"), "soon", Some("x"));
        let err = build_row("general", &msg, &translator, &ExportConfig::default()).unwrap_err();
        assert!(err.is_invalid_timestamp());

        let msg = RawMessage {
            ts: None,
            ..message(None, "1", None)
        };
        let err = build_row("general", &msg, &translator, &ExportConfig::default()).unwrap_err();
        assert!(err.is_invalid_timestamp());
    }

    #[test]
    fn test_rows_per_file() {
        let stats = ExportStats {
            message_files: 4,
            rows: 10,
            ..ExportStats::default()
        };
        assert_eq!(stats.rows_per_file(), 2.5);
        assert_eq!(ExportStats::default().rows_per_file(), 0.0);
    }

    #[test]
    fn test_run_rejects_non_directory() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let err = export_directory(file.path(), &ExportConfig::default()).unwrap_err();
        assert!(err.is_usage());
    }
}
