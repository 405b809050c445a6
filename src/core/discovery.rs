//! Locating export files inside an input directory.
//!
//! A Slack export is laid out as one directory per channel holding one JSON
//! file per day, plus user directory files somewhere in the tree:
//!
//! ```text
//! export/
//! ├── users.json
//! ├── general/
//! │   ├── 2024-01-15.json
//! │   └── 2024-01-16.json
//! └── random/
//!     └── 2024-01-15.json
//! ```
//!
//! All discovery is recursive and returns paths in sorted order, so both the
//! user-directory merge precedence and the CSV row order are reproducible.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use glob::{MatchOptions, Pattern, glob_with};
use regex::Regex;

use super::models::{ChannelDayFile, RawMessage};
use crate::error::{Result, SlackpackError};

/// Glob for user directory files, relative to the input root.
pub const USERS_GLOB: &str = "**/*users.json";

/// Glob for channel-day candidates, relative to the input root.
pub const CHANNEL_DAY_GLOB: &str = "**/????-??-??.json";

/// Exact shape of a channel-day file name. The glob's `?` accepts any
/// character, this narrows it down to digits.
static CHANNEL_DAY_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}\.json$").expect("valid regex"));

/// Returns every regular file under `root` matching `pattern`, sorted by path.
///
/// `root` is escaped so directories with glob metacharacters in their names
/// (`[`, `*`, `?`) are taken literally.
///
/// The `glob` crate only takes UTF-8 patterns. A root that is not valid UTF-8
/// is matched lossily, which normally finds nothing; a warning is logged.
pub fn find_files(root: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let root_str = root.to_string_lossy();
    if root.to_str().is_none() {
        tracing::warn!(root = %root_str, "input path is not valid UTF-8, files below it may be missed");
    }
    let full = format!(
        "{}/{}",
        Pattern::escape(&root_str).trim_end_matches('/'),
        pattern
    );
    let options = MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: false,
    };

    let mut files = Vec::new();
    for entry in glob_with(&full, options)? {
        let path = entry?;
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Returns `true` if `name` looks like `YYYY-MM-DD.json`.
pub fn is_channel_day_name(name: &str) -> bool {
    CHANNEL_DAY_NAME.is_match(name)
}

/// Channel name for a channel-day file: its parent directory's name.
///
/// Files sitting directly in a root given as `.` have no named parent; they
/// take the name of the resolved root directory instead.
pub fn channel_name(path: &Path, root: &Path) -> String {
    if let Some(name) = path.parent().and_then(Path::file_name) {
        return name.to_string_lossy().into_owned();
    }
    root.canonicalize()
        .ok()
        .as_deref()
        .and_then(Path::file_name)
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Discovers all channel-day files under `root`.
pub fn discover_channel_files(root: &Path) -> Result<Vec<ChannelDayFile>> {
    let files: Vec<ChannelDayFile> = find_files(root, CHANNEL_DAY_GLOB)?
        .into_iter()
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(is_channel_day_name)
        })
        .map(|path| {
            let channel = channel_name(&path, root);
            tracing::debug!(path = %path.display(), channel = %channel, "found channel-day file");
            ChannelDayFile { path, channel }
        })
        .collect();

    tracing::info!(count = files.len(), "discovered channel-day files");
    Ok(files)
}

/// Parses the contents of a channel-day file.
pub fn parse_messages_str(content: &str) -> Result<Vec<RawMessage>> {
    serde_json::from_str(content).map_err(|e| SlackpackError::messages_parse(e, None))
}

/// Reads and parses one channel-day file.
pub fn read_channel_file(file: &ChannelDayFile) -> Result<Vec<RawMessage>> {
    let content = fs::read_to_string(&file.path).map_err(|e| SlackpackError::io(e, &file.path))?;
    parse_messages_str(&content).map_err(|e| e.with_path(&file.path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_is_channel_day_name() {
        assert!(is_channel_day_name("2024-01-15.json"));
        assert!(!is_channel_day_name("2024-1-15.json"));
        assert!(!is_channel_day_name("abcd-ef-gh.json"));
        assert!(!is_channel_day_name("2024-01-15.json.bak"));
        assert!(!is_channel_day_name("users.json"));
    }

    #[test]
    fn test_channel_name_from_parent() {
        let root = Path::new("/export");
        let path = Path::new("/export/general/2024-01-15.json");
        assert_eq!(channel_name(path, root), "general");
    }

    #[test]
    fn test_root_level_file_takes_root_name() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("acme-export");
        fs::create_dir_all(root.join("general")).unwrap();
        fs::write(root.join("2024-01-01.json"), "[]").unwrap();
        fs::write(root.join("general/2024-01-01.json"), "[]").unwrap();

        let channels: Vec<String> = discover_channel_files(&root)
            .unwrap()
            .into_iter()
            .map(|f| f.channel)
            .collect();
        assert_eq!(channels, vec!["acme-export", "general"]);
    }

    #[test]
    fn test_channel_name_without_named_parent_uses_resolved_root() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("acme-export");
        fs::create_dir_all(&root).unwrap();

        // What a walk from "." yields for a root-level file
        let path = Path::new("2024-01-01.json");
        assert_eq!(channel_name(path, &root.join(".")), "acme-export");
        assert_eq!(channel_name(path, &root.join("missing")), "");
    }

    #[cfg(unix)]
    #[test]
    fn test_find_files_non_utf8_root_does_not_error() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = tempdir().unwrap();
        let root = dir.path().join(OsStr::from_bytes(b"export-\xff"));
        fs::create_dir_all(root.join("general")).unwrap();
        fs::write(root.join("general/2024-01-01.json"), "[]").unwrap();

        assert!(find_files(&root, CHANNEL_DAY_GLOB).is_ok());
    }

    #[test]
    fn test_discover_channel_files_sorted_and_filtered() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("random")).unwrap();
        fs::create_dir_all(root.join("general")).unwrap();
        fs::write(root.join("random/2024-01-02.json"), "[]").unwrap();
        fs::write(root.join("general/2024-01-02.json"), "[]").unwrap();
        fs::write(root.join("general/2024-01-01.json"), "[]").unwrap();
        fs::write(root.join("general/abcd-ef-gh.json"), "[]").unwrap();
        fs::write(root.join("general/channels.json"), "[]").unwrap();

        let files = discover_channel_files(root).unwrap();
        let names: Vec<(String, String)> = files
            .iter()
            .map(|f| {
                (
                    f.channel.clone(),
                    f.path.file_name().unwrap().to_string_lossy().into_owned(),
                )
            })
            .collect();

        assert_eq!(
            names,
            vec![
                ("general".to_string(), "2024-01-01.json".to_string()),
                ("general".to_string(), "2024-01-02.json".to_string()),
                ("random".to_string(), "2024-01-02.json".to_string()),
            ]
        );
    }

    #[test]
    fn test_discover_skips_directories_with_date_names() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("general/2024-01-01.json")).unwrap();

        let files = discover_channel_files(dir.path()).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_find_files_escapes_root() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("export [2024]");
        fs::create_dir_all(root.join("general")).unwrap();
        fs::write(root.join("general/2024-01-01.json"), "[]").unwrap();

        let files = discover_channel_files(&root).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].channel, "general");
    }

    #[test]
    fn test_parse_messages_str() {
        let messages = parse_messages_str(
            r#"[{"user": "U123ABCDE", "ts": "1", "text": "a"}, {"ts": "2", "subtype": "bot_message"}]"#,
        )
        .unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].user.as_deref(), Some("U123ABCDE"));
        assert!(messages[1].user.is_none());
        assert!(messages[1].text.is_none());
    }

    #[test]
    fn test_read_channel_file_invalid_json_names_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("2024-01-01.json");
        fs::write(&path, "{ not json").unwrap();

        let file = ChannelDayFile {
            path: path.clone(),
            channel: "x".into(),
        };
        let err = read_channel_file(&file).unwrap_err();
        assert!(err.is_parse());
        assert!(err.to_string().contains("2024-01-01.json"));
    }
}
