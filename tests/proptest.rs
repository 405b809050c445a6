//! Property-based tests for slackpack.
//!
//! These tests generate random inputs to find edge cases.

use proptest::prelude::*;

use slackpack::config::CsvSchema;
use slackpack::core::{MentionTranslator, OutputRow, UserIndex, UserRecord, to_csv};

/// Generate a realistic Slack user ID (U + 8 uppercase alphanumerics)
fn arb_user_id() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop::sample::select(b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789".to_vec()),
        8,
    )
    .prop_map(|chars| format!("U{}", String::from_utf8(chars).unwrap()))
}

/// Generate a user record with an arbitrary mix of name fields
fn arb_user() -> impl Strategy<Value = UserRecord> {
    (
        arb_user_id(),
        prop::option::of(prop::sample::select(vec!["Ann", "Бob", "Ünïcode Name"])),
        prop::option::of(prop::sample::select(vec!["ann", "bob", "carol"])),
    )
        .prop_map(|(id, real_name, name)| UserRecord {
            id,
            real_name: real_name.map(String::from),
            name: name.map(String::from),
        })
}

/// Filler text that never forms an ID on its own
fn arb_filler() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "hello".to_string(),
        " ".to_string(),
        ", ".to_string(),
        "Привет".to_string(),
        "🎉".to_string(),
        "\n".to_string(),
        "\"quoted\"".to_string(),
    ])
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // ============================================
    // USER INDEX PROPERTIES
    // ============================================

    /// Display name follows real_name → name → id
    #[test]
    fn display_name_fallback(user in arb_user()) {
        let index: UserIndex = [user.clone()].iter().collect();
        let expected = user
            .real_name
            .clone()
            .or_else(|| user.name.clone())
            .unwrap_or_else(|| user.id.clone());
        prop_assert_eq!(index.get(&user.id), Some(expected.as_str()));
    }

    /// The last record for an ID wins
    #[test]
    fn last_writer_wins(users in prop::collection::vec(arb_user(), 1..20)) {
        let index: UserIndex = users.iter().collect();
        for user in &users {
            let last = users.iter().rev().find(|u| u.id == user.id).unwrap();
            prop_assert_eq!(index.get(&user.id), Some(last.display_name()));
        }
    }

    // ============================================
    // MENTION PROPERTIES
    // ============================================

    /// Unknown tokens survive translation untouched
    #[test]
    fn unknown_mentions_unchanged(
        ids in prop::collection::vec(arb_user_id(), 0..5),
        filler in arb_filler(),
    ) {
        let text = ids
            .iter()
            .map(|id| format!("<@{id}>"))
            .collect::<Vec<_>>()
            .join(&filler);
        let index = UserIndex::new();
        let translator = MentionTranslator::new(&index);
        prop_assert_eq!(translator.translate(&text), text.as_str());
    }

    /// Every known wrapped mention is replaced
    #[test]
    fn known_mentions_fully_replaced(
        users in prop::collection::vec(arb_user(), 1..6),
        filler in arb_filler(),
    ) {
        let index: UserIndex = users.iter().collect();
        let translator = MentionTranslator::new(&index);

        let text = users
            .iter()
            .map(|u| format!("<@{}>", u.id))
            .collect::<Vec<_>>()
            .join(&filler);
        let expected = users
            .iter()
            .map(|u| index.get(&u.id).unwrap().to_string())
            .collect::<Vec<_>>()
            .join(&filler);

        prop_assert_eq!(translator.translate(&text), expected.as_str());
    }

    // ============================================
    // CSV PROPERTIES
    // ============================================

    /// One data row per input row, and fields survive a read-back
    #[test]
    fn csv_preserves_rows(
        messages in prop::collection::vec(arb_filler(), 0..20),
    ) {
        let rows: Vec<OutputRow> = messages
            .iter()
            .map(|m| OutputRow {
                timestamp: "2024-01-01T00:00:00".into(),
                user: "Ann".into(),
                channel: "general".into(),
                message: m.clone(),
            })
            .collect();

        let csv = to_csv(&rows, CsvSchema::Current).unwrap();
        let mut reader = csv::Reader::from_reader(csv.as_bytes());
        let read: Vec<String> = reader
            .records()
            .map(|r| r.unwrap()[3].to_string())
            .collect();

        prop_assert_eq!(read, messages);
    }
}
