//! Property tests for standup classification

use proptest::prelude::*;
use standup_bot::services::classifier::{classify, Section};

fn filler() -> impl Strategy<Value = String> {
    // Lowercase latin words that cannot contain a section keyword
    prop::collection::vec("[a-j]{1,8}", 1..6).prop_map(|words| words.join(" "))
}

proptest! {
    #[test]
    fn prop_all_sections_make_a_standup(yesterday in filler(), today in filler(), blockers in filler()) {
        let text = format!("Yesterday: {}\nToday: {}\nBlockers: {}", yesterday, today, blockers);
        let result = classify(&text);
        prop_assert!(result.is_standup);
        prop_assert!(result.validation_errors.is_empty());
    }

    #[test]
    fn prop_missing_sections_are_reported_in_order(mask in 1u8..7, body in filler()) {
        let present: Vec<Section> = Section::ALL
            .iter()
            .enumerate()
            .filter(|(i, _)| mask & (1u8 << *i) != 0)
            .map(|(_, s)| *s)
            .collect();
        let text = present
            .iter()
            .map(|s| format!("{}: {}", s.name(), body))
            .collect::<Vec<_>>()
            .join("\n");

        let result = classify(&text);
        let expected: Vec<String> = Section::ALL
            .iter()
            .filter(|s| !present.contains(s))
            .map(|s| s.missing_error().to_string())
            .collect();

        prop_assert!(!result.is_standup);
        prop_assert!(result.advisory_notes.is_empty());
        prop_assert_eq!(result.validation_errors, expected);
    }

    #[test]
    fn prop_classification_never_panics(text in any::<String>()) {
        let result = classify(&text);
        prop_assert_eq!(result.is_standup, result.validation_errors.is_empty());
    }
}
