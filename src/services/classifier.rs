//! Standup classification
//!
//! Decides whether a free-text message is a standup report and, when it is,
//! suggests how to make it more useful. A standup has three sections,
//! found by keyword at the start of a word in any letter case:
//!
//! | section   | keywords                                               |
//! |-----------|--------------------------------------------------------|
//! | yesterday | `yesterday`, `вчера`                                   |
//! | today     | `today`, `сегодня`                                     |
//! | blockers  | `blocker`, `problem`, `impediment`, `блокер`, `проблем` |
//!
//! Classification is pure: no I/O, same text in, same result out.

use std::sync::OnceLock;
use regex::Regex;
use serde::Serialize;
use crate::utils::helpers::count_words;

/// Texts longer than this get a "be concise" advisory
pub const LONG_REPORT_CHARS: usize = 3000;
/// "yesterday" and "today" together holding fewer words than this get a
/// "very short" advisory
pub const SHORT_REPORT_WORDS: usize = 3;

/// One of the required parts of a standup, in check order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Section {
    Yesterday,
    Today,
    Blockers,
}

impl Section {
    pub const ALL: [Section; 3] = [Section::Yesterday, Section::Today, Section::Blockers];

    pub fn name(&self) -> &'static str {
        match self {
            Section::Yesterday => "yesterday",
            Section::Today => "today",
            Section::Blockers => "blockers",
        }
    }

    pub fn missing_error(&self) -> &'static str {
        match self {
            Section::Yesterday => "- no \"yesterday\" section: what did you do yesterday? (keywords: yesterday, вчера)",
            Section::Today => "- no \"today\" section: what are you going to do today? (keywords: today, сегодня)",
            Section::Blockers => "- no \"blockers\" section: is anything in your way? (keywords: blockers, problems, блокеры, проблемы)",
        }
    }

    pub fn empty_advice(&self) -> &'static str {
        match self {
            Section::Yesterday => "The \"yesterday\" section is empty, list what you finished or worked on.",
            Section::Today => "The \"today\" section is empty, write down what you plan to do.",
            Section::Blockers => "The \"blockers\" section is empty, write \"none\" if nothing blocks you.",
        }
    }

    fn pattern(&self) -> &'static Regex {
        static YESTERDAY: OnceLock<Regex> = OnceLock::new();
        static TODAY: OnceLock<Regex> = OnceLock::new();
        static BLOCKERS: OnceLock<Regex> = OnceLock::new();

        let (cell, source) = match self {
            Section::Yesterday => (&YESTERDAY, r"(?i)\b(?:yesterday|вчера)\w*"),
            Section::Today => (&TODAY, r"(?i)\b(?:today|сегодня)\w*"),
            Section::Blockers => (&BLOCKERS, r"(?i)\b(?:blocker|problem|impediment|блокер|проблем)\w*"),
        };
        cell.get_or_init(|| Regex::new(source).expect("section pattern is valid"))
    }
}

pub const EMPTY_MESSAGE_ERROR: &str = "- the message is empty";
pub const SHORT_REPORT_ADVICE: &str = "The report is very short, add a few details so the team knows what is going on.";
pub const LONG_REPORT_ADVICE: &str = "The report is very long, try to keep it concise and link details instead.";

/// Outcome of classifying a message
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ClassificationResult {
    pub is_standup: bool,
    /// One entry per missing section, in check order
    pub validation_errors: Vec<String>,
    /// Suggestions for an accepted standup; never affects `is_standup`
    pub advisory_notes: Vec<String>,
}

/// Where a section keyword sits in the text
#[derive(Debug, Clone, Copy)]
struct Marker {
    section: Section,
    start: usize,
    end: usize,
}

/// Classify `text` as a standup
pub fn classify(text: &str) -> ClassificationResult {
    if text.trim().is_empty() {
        return ClassificationResult {
            is_standup: false,
            validation_errors: vec![EMPTY_MESSAGE_ERROR.to_string()],
            advisory_notes: Vec::new(),
        };
    }

    let markers = find_markers(text);
    let validation_errors: Vec<String> = Section::ALL
        .iter()
        .filter(|section| !markers.iter().any(|m| m.section == **section))
        .map(|section| section.missing_error().to_string())
        .collect();

    if !validation_errors.is_empty() {
        return ClassificationResult {
            is_standup: false,
            validation_errors,
            advisory_notes: Vec::new(),
        };
    }

    ClassificationResult {
        is_standup: true,
        validation_errors: Vec::new(),
        advisory_notes: advise(text, &markers),
    }
}

/// Shorthand for `classify(text).is_standup`
pub fn is_standup(text: &str) -> bool {
    classify(text).is_standup
}

/// First marker of every section present in `text`, ordered by position
fn find_markers(text: &str) -> Vec<Marker> {
    let mut markers: Vec<Marker> = Section::ALL
        .iter()
        .filter_map(|section| {
            section.pattern().find(text).map(|m| Marker {
                section: *section,
                start: m.start(),
                end: m.end(),
            })
        })
        .collect();
    markers.sort_by_key(|m| m.start);
    markers
}

/// Text between a section's keyword and the next section's keyword
fn section_contents<'a>(text: &'a str, markers: &[Marker]) -> Vec<(Section, &'a str)> {
    markers
        .iter()
        .enumerate()
        .map(|(i, marker)| {
            let end = markers.get(i + 1).map_or(text.len(), |next| next.start);
            // Overlapping keywords such as "today's problems" leave nothing
            let body = if marker.end < end { &text[marker.end..end] } else { "" };
            let body = body.trim_matches(|c: char| c.is_whitespace() || matches!(c, ':' | '-' | '—' | '–' | '.' | ','));
            (marker.section, body)
        })
        .collect()
}

fn advise(text: &str, markers: &[Marker]) -> Vec<String> {
    let contents = section_contents(text, markers);
    let mut notes = Vec::new();

    for section in Section::ALL {
        let empty = contents
            .iter()
            .any(|(s, body)| *s == section && body.is_empty());
        if empty {
            notes.push(section.empty_advice().to_string());
        }
    }

    if notes.is_empty() {
        let words: usize = contents
            .iter()
            .filter(|(s, _)| *s != Section::Blockers)
            .map(|(_, body)| count_words(body))
            .sum();
        if words < SHORT_REPORT_WORDS {
            notes.push(SHORT_REPORT_ADVICE.to_string());
        }
    }

    if text.chars().count() > LONG_REPORT_CHARS {
        notes.push(LONG_REPORT_ADVICE.to_string());
    }

    notes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_well_formed_standup_has_no_advice() {
        let result = classify("yesterday: fixed bug\ntoday: tests\nblockers: none");
        assert!(result.is_standup);
        assert!(result.validation_errors.is_empty());
        assert!(result.advisory_notes.is_empty());
    }

    #[test]
    fn test_no_markers_lists_all_three_in_order() {
        let result = classify("hey team, standup time");
        assert!(!result.is_standup);
        assert_eq!(
            result.validation_errors,
            vec![
                Section::Yesterday.missing_error().to_string(),
                Section::Today.missing_error().to_string(),
                Section::Blockers.missing_error().to_string(),
            ]
        );
        assert!(result.advisory_notes.is_empty());
    }

    #[test]
    fn test_single_missing_marker() {
        let result = classify("Yesterday: deploy\nToday: review");
        assert!(!result.is_standup);
        assert_eq!(result.validation_errors, vec![Section::Blockers.missing_error().to_string()]);
    }

    #[test]
    fn test_empty_text_has_single_error() {
        for text in ["", "   \n\t"] {
            let result = classify(text);
            assert!(!result.is_standup);
            assert_eq!(result.validation_errors, vec![EMPTY_MESSAGE_ERROR.to_string()]);
        }
    }

    #[test]
    fn test_keywords_are_case_insensitive() {
        assert!(is_standup("YESTERDAY: a b\nToDaY: c d\nBLOCKERS: none at all"));
        assert!(is_standup("Вчера: чинил баги\nСегодня: тесты\nПроблемы: нет"));
    }

    #[test]
    fn test_keyword_must_start_a_word() {
        // "nottoday" does not open a today section
        let result = classify("yesterday: a\nnottoday: b\nblockers: none");
        assert!(!result.is_standup);
        assert_eq!(result.validation_errors, vec![Section::Today.missing_error().to_string()]);
    }

    #[test]
    fn test_sections_in_any_order() {
        assert!(is_standup("blockers: none\ntoday: tests\nyesterday: fixed bug"));
    }

    #[test]
    fn test_empty_section_advice_in_check_order() {
        let result = classify("yesterday:\ntoday: write the migration\nblockers:");
        assert!(result.is_standup);
        assert_eq!(
            result.advisory_notes,
            vec![
                Section::Yesterday.empty_advice().to_string(),
                Section::Blockers.empty_advice().to_string(),
            ]
        );
    }

    #[test]
    fn test_short_report_advice() {
        let result = classify("yesterday: x today: y blockers:-");
        assert!(result.is_standup);
        assert_eq!(result.advisory_notes, vec![Section::Blockers.empty_advice().to_string()]);

        let result = classify("yesterday: x today: y blockers: no");
        assert_eq!(result.advisory_notes, vec![SHORT_REPORT_ADVICE.to_string()]);

        // A one-word blockers section is normal
        let result = classify("yesterday: fixed bug today: tests blockers: none");
        assert!(result.advisory_notes.is_empty());
    }

    #[test]
    fn test_long_report_advice() {
        let filler = "worked on the importer ".repeat(150);
        let text = format!("yesterday: {}\ntoday: more\nblockers: none", filler);
        let result = classify(&text);
        assert!(result.is_standup);
        assert_eq!(result.advisory_notes, vec![LONG_REPORT_ADVICE.to_string()]);
    }

    #[test]
    fn test_mention_does_not_disturb_sections() {
        let result = classify("@standup_bot\nyesterday: fixed bug\ntoday: tests\nblockers: none");
        assert!(result.is_standup);
        assert!(result.advisory_notes.is_empty());
    }
}
