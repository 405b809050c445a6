//! Inline user mention translation.
//!
//! Slack stores mentions as raw user IDs, usually wrapped as `<@U024BE7LH>`
//! or `<@U024BE7LH|label>`, sometimes bare. This module swaps them for
//! display names from a [`UserIndex`].
//!
//! Rules:
//! - An ID is `U` followed by 7 to 12 uppercase letters or digits, on word
//!   boundaries. Matching is case-sensitive.
//! - A resolved wrapped mention is replaced as a whole (`<@U…>` becomes
//!   `Ann`). A resolved bare token is replaced in place.
//! - Unknown IDs are left exactly as they were, wrapper included.
//! - Replacement text is never rescanned.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::users::UserIndex;

/// Shape of a Slack user ID, without anchors.
pub const USER_ID_PATTERN: &str = r"U[A-Z0-9]{7,12}";

static MENTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"<@(?P<wrapped>{id})(?:\|[^>]*)?>|\b(?P<bare>{id})\b",
        id = USER_ID_PATTERN
    ))
    .expect("valid mention regex")
});

/// Translates mentions against a borrowed [`UserIndex`].
///
/// # Example
///
/// ```rust
/// use slackpack::core::{MentionTranslator, UserIndex, UserRecord};
///
/// let index: UserIndex = [UserRecord::new("U123ABCDE").with_real_name("Ann")]
///     .iter()
///     .collect();
/// let translator = MentionTranslator::new(&index);
///
/// assert_eq!(translator.translate("hi <@U123ABCDE>"), "hi Ann");
/// assert_eq!(translator.translate("cc U999ZZZZZ"), "cc U999ZZZZZ");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct MentionTranslator<'a> {
    index: &'a UserIndex,
}

impl<'a> MentionTranslator<'a> {
    pub fn new(index: &'a UserIndex) -> Self {
        Self { index }
    }

    /// The index names are resolved against.
    pub fn index(&self) -> &'a UserIndex {
        self.index
    }

    /// Replaces every resolvable mention in `text`.
    ///
    /// Borrows the input unchanged when nothing matched.
    pub fn translate<'t>(&self, text: &'t str) -> Cow<'t, str> {
        MENTION_RE.replace_all(text, |caps: &Captures<'_>| {
            let whole = &caps[0];
            let id = caps
                .name("wrapped")
                .or_else(|| caps.name("bare"))
                .map_or(whole, |m| m.as_str());
            self.index.get(id).unwrap_or(whole).to_string()
        })
    }

    /// Translates an optional message body; `None` yields an empty string.
    pub fn translate_opt(&self, text: Option<&str>) -> String {
        text.map(|t| self.translate(t).into_owned())
            .unwrap_or_default()
    }

    /// Lists the user IDs mentioned in `text`, in order of appearance.
    pub fn mentioned_ids(text: &str) -> Vec<&str> {
        MENTION_RE
            .captures_iter(text)
            .filter_map(|caps| caps.name("wrapped").or_else(|| caps.name("bare")))
            .map(|m| m.as_str())
            .collect()
    }
}

/// Convenience wrapper around [`MentionTranslator::translate_opt`].
pub fn translate_mentions(text: Option<&str>, index: &UserIndex) -> String {
    MentionTranslator::new(index).translate_opt(text)
}
