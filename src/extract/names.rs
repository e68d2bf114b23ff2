//! Engineer name extraction for site-hours (Format B) timesheets.
//!
//! Format B sheets rarely state the engineer's name in a reliable field, so
//! extraction is a fallback chain of heuristics, each a pure function
//! returning an optional match; the first success wins:
//!
//! 1. the labeled `FOR EMERSON:` free-text field, filtered against
//!    signature and engineer-label noise,
//! 2. known directory names matched as substrings of the source name,
//! 3. a generic token-splitting pass over the source stem.

use regex::Regex;
use std::sync::LazyLock;

use crate::config::EngineerDirectory;

static LABELED_FIELD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"FOR EMERSON:\s*([A-Za-z][A-Za-z ]+?)(?:_{2,}|\n)").expect("valid regex")
});

/// Tokens that never form part of a name in timesheet file names.
const STOP_WORDS: [&str; 12] = [
    "onshore",
    "offshore",
    "emerson",
    "time",
    "sheet",
    "signed",
    "ts",
    "timesheet",
    "lta",
    "bvs",
    "qatif",
    "gosp",
];

/// Extracts the engineer name from a Format B timesheet, or `None` when
/// every heuristic fails.
pub(crate) fn extract_name_format_b(
    text: &str,
    source: &str,
    directory: &EngineerDirectory,
) -> Option<String> {
    from_labeled_field(text)
        .or_else(|| from_known_names(source, directory))
        .or_else(|| from_source_tokens(source))
}

/// Heuristic 1: the `FOR EMERSON:` field, when it holds an actual name
/// rather than signature scribble or the "ENGINEER" label itself.
fn from_labeled_field(text: &str) -> Option<String> {
    let captured = LABELED_FIELD_RE.captures(text)?;
    let name = captured[1].trim().to_string();
    let upper = name.to_uppercase();
    if name.len() > 2 && !upper.contains("SIGNATURE") && !upper.contains("ENG") {
        Some(name)
    } else {
        None
    }
}

/// Heuristic 2: a directory name embedded in the source name, either
/// verbatim or with spaces flattened to underscores.
fn from_known_names(source: &str, directory: &EngineerDirectory) -> Option<String> {
    directory
        .names()
        .find(|name| source.contains(name) || source.contains(&name.replace(' ', "_")))
        .map(str::to_string)
}

/// Heuristic 3: split the source stem on separators, drop stop words and
/// tokens containing digits, and keep up to two remaining tokens.
fn from_source_tokens(source: &str) -> Option<String> {
    let stem = source
        .rsplit(['/', '\\'])
        .next()
        .map(|base| base.split_once('.').map_or(base, |(s, _)| s))?;

    let mut name_parts: Vec<&str> = Vec::new();
    for token in stem.split(['_', '-']) {
        if token.is_empty()
            || STOP_WORDS.contains(&token.to_lowercase().as_str())
            || token.chars().any(|c| c.is_ascii_digit())
        {
            continue;
        }
        name_parts.push(token);
        if name_parts.len() >= 2 {
            break;
        }
    }

    if name_parts.is_empty() {
        None
    } else {
        Some(name_parts.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineerProfile;
    use crate::models::{Category, EngineerLevel};

    fn directory() -> EngineerDirectory {
        [
            (
                "Ankit Modi".to_string(),
                EngineerProfile {
                    category: Category::Onshore,
                    level: EngineerLevel::ServiceField,
                },
            ),
            (
                "Atif".to_string(),
                EngineerProfile {
                    category: Category::Onshore,
                    level: EngineerLevel::ServiceField,
                },
            ),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_labeled_field_wins() {
        let text = "SERVICE TIME SHEET\nFOR EMERSON: Ankit Modi________________\n";
        let name = extract_name_format_b(text, "sheet.pdf", &directory());
        assert_eq!(name.as_deref(), Some("Ankit Modi"));
    }

    #[test]
    fn test_labeled_field_rejects_signature_noise() {
        let text = "FOR EMERSON: SIGNATURE OF CLIENT\n";
        // Falls through to the filename heuristics.
        let name = extract_name_format_b(text, "LTA138_BVS_Onshore_TS_Signed_Emerson_Ankit_Modi_Jan.pdf", &directory());
        assert_eq!(name.as_deref(), Some("Ankit Modi"));
    }

    #[test]
    fn test_labeled_field_rejects_engineer_label() {
        assert_eq!(from_labeled_field("FOR EMERSON: ENGINEER NAME\n"), None);
    }

    #[test]
    fn test_known_name_with_underscores_matches() {
        let name = from_known_names("sheets/Signed_Ankit_Modi_week2.pdf", &directory());
        assert_eq!(name.as_deref(), Some("Ankit Modi"));
    }

    #[test]
    fn test_generic_tokens_skip_stop_words_and_digits() {
        let name = from_source_tokens("Atif_Onshore_EMERSON_time_sheet_GOSP01.pdf");
        assert_eq!(name.as_deref(), Some("Atif"));
    }

    #[test]
    fn test_generic_tokens_keep_at_most_two() {
        let name = from_source_tokens("Suraj_Negi_Extra_Token.pdf");
        assert_eq!(name.as_deref(), Some("Suraj Negi"));
    }

    #[test]
    fn test_all_heuristics_failing_returns_none() {
        let empty: EngineerDirectory = EngineerDirectory::default();
        let name = extract_name_format_b("", "2026_01_timesheet.pdf", &empty);
        assert_eq!(name, None);
    }
}
