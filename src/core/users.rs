//! User directory loading and ID-to-name resolution.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fs;
use std::path::{Path, PathBuf};

use super::discovery::{USERS_GLOB, find_files};
use super::models::UserRecord;
use crate::error::{Result, SlackpackError};

/// Mapping from Slack user ID to display name.
///
/// Built once before any message is processed. Inserting an ID that is
/// already present replaces the earlier name (last writer wins).
///
/// # Example
///
/// ```rust
/// use slackpack::core::{UserIndex, UserRecord};
///
/// let mut index = UserIndex::new();
/// index.insert(&UserRecord::new("U123ABCDE").with_name("ann"));
/// index.insert(&UserRecord::new("U123ABCDE").with_real_name("Ann Smith"));
///
/// assert_eq!(index.get("U123ABCDE"), Some("Ann Smith"));
/// assert_eq!(index.resolve("U999ZZZZZ"), "U999ZZZZZ");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserIndex {
    names: HashMap<String, String>,
}

impl UserIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a record under its ID, replacing any earlier entry.
    pub fn insert(&mut self, record: &UserRecord) {
        let name = record.display_name().to_string();
        match self.names.entry(record.id.clone()) {
            Entry::Occupied(mut slot) => {
                if slot.get() != &name {
                    tracing::warn!(
                        id = %record.id,
                        previous = %slot.get(),
                        current = %name,
                        "user ID redefined"
                    );
                }
                slot.insert(name);
            }
            Entry::Vacant(slot) => {
                slot.insert(name);
            }
        }
    }

    /// Inserts every record in order.
    pub fn extend<'a>(&mut self, records: impl IntoIterator<Item = &'a UserRecord>) {
        for record in records {
            self.insert(record);
        }
    }

    /// Merges `other` into `self`; entries from `other` win.
    pub fn merge(&mut self, other: UserIndex) {
        self.names.extend(other.names);
    }

    /// Looks up the display name for an ID.
    pub fn get(&self, id: &str) -> Option<&str> {
        self.names.get(id).map(String::as_str)
    }

    /// Display name for an ID, or the ID itself when unknown.
    pub fn resolve<'a>(&'a self, id: &'a str) -> &'a str {
        self.get(id).unwrap_or(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.names.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterates over `(id, display name)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.names.iter().map(|(id, name)| (id.as_str(), name.as_str()))
    }
}

impl<'a> FromIterator<&'a UserRecord> for UserIndex {
    fn from_iter<I: IntoIterator<Item = &'a UserRecord>>(iter: I) -> Self {
        let mut index = UserIndex::new();
        index.extend(iter);
        index
    }
}

/// Parses the contents of a user directory file.
pub fn parse_users_str(content: &str) -> Result<Vec<UserRecord>> {
    serde_json::from_str(content).map_err(|e| SlackpackError::users_parse(e, None))
}

/// Reads and parses one user directory file.
pub fn read_users_file(path: &Path) -> Result<Vec<UserRecord>> {
    let content = fs::read_to_string(path).map_err(|e| SlackpackError::io(e, path))?;
    parse_users_str(&content).map_err(|e| e.with_path(path))
}

/// Finds every `*users.json` file under `root`, sorted by path.
pub fn discover_user_files(root: &Path) -> Result<Vec<PathBuf>> {
    find_files(root, USERS_GLOB)
}

/// Builds an index from the given user directory files, applied in order.
pub fn load_user_files(paths: &[PathBuf]) -> Result<UserIndex> {
    let mut index = UserIndex::new();
    for path in paths {
        let records = read_users_file(path)?;
        tracing::debug!(path = %path.display(), users = records.len(), "loaded user directory");
        index.extend(&records);
    }
    tracing::info!(files = paths.len(), users = index.len(), "built user index");
    Ok(index)
}

/// Builds the user index from all user directory files under `root`.
///
/// Files are applied in sorted path order, so for duplicate IDs the file with
/// the greatest path wins. Any unreadable or malformed file aborts the load.
pub fn load_user_index(root: &Path) -> Result<UserIndex> {
    load_user_files(&discover_user_files(root)?)
}
