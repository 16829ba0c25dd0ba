//! Turns model output that should be a JSON array into typed records.
//!
//! Parsing runs in two explicit stages. The whole trimmed text is tried first;
//! only if that fails is the array starting at the leftmost `[` tried on its
//! own, closed first by its matching `]` and then by the rightmost `]`.
//! Either stage accepts the batch only if every element deserializes, and a
//! failure of the second stage ends the parse.

use serde::de::DeserializeOwned;

use crate::error::{AntakshariError, Result};

/// Which stage produced a successful parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseStage {
    Strict,
    Salvage,
}

#[derive(Debug)]
pub struct Parsed<T> {
    pub records: Vec<T>,
    pub stage: ParseStage,
}

/// Parse `text` into records, treating absent or blank text as an empty result.
pub fn parse_records<T: DeserializeOwned>(text: Option<&str>) -> Result<Vec<T>> {
    parse_staged(text).map(|parsed| parsed.records)
}

pub fn parse_staged<T: DeserializeOwned>(text: Option<&str>) -> Result<Parsed<T>> {
    let Some(raw) = text else {
        return Ok(Parsed {
            records: Vec::new(),
            stage: ParseStage::Strict,
        });
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(Parsed {
            records: Vec::new(),
            stage: ParseStage::Strict,
        });
    }

    match strict::<T>(trimmed) {
        Ok(records) => Ok(Parsed {
            records,
            stage: ParseStage::Strict,
        }),
        Err(strict_err) => {
            tracing::debug!("Strict parse failed: {}", strict_err);
            let spans = array_spans(trimmed);
            if spans.is_empty() {
                return Err(AntakshariError::format(raw));
            }
            for span in spans {
                match strict::<T>(span) {
                    Ok(records) => {
                        tracing::warn!(
                            "Recovered {} record(s) from non-conforming model output",
                            records.len()
                        );
                        return Ok(Parsed {
                            records,
                            stage: ParseStage::Salvage,
                        });
                    }
                    Err(salvage_err) => {
                        tracing::debug!("Salvage parse failed: {}", salvage_err);
                    }
                }
            }
            Err(AntakshariError::format(raw))
        }
    }
}

fn strict<T: DeserializeOwned>(text: &str) -> serde_json::Result<Vec<T>> {
    serde_json::from_str(text)
}

/// Candidate array spans starting at the leftmost `[`: first up to its
/// matching `]`, then up to the rightmost `]` when that differs.
fn array_spans(text: &str) -> Vec<&str> {
    let Some(start) = text.find('[') else {
        return Vec::new();
    };
    let mut spans = Vec::with_capacity(2);
    if let Some(end) = matching_bracket(text, start) {
        spans.push(&text[start..=end]);
    }
    if let Some(end) = text.rfind(']') {
        if end > start && spans.last().is_none_or(|s| s.len() != end - start + 1) {
            spans.push(&text[start..=end]);
        }
    }
    spans
}

/// Byte index of the `]` closing the `[` at `start`, skipping brackets inside
/// JSON strings.
fn matching_bracket(text: &str, start: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for (i, c) in text[start..].char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(start + i);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::models::Song;

    fn song(title: &str, movie: &str, lyrics: &str) -> Song {
        Song {
            title: title.to_string(),
            movie: movie.to_string(),
            lyrics: lyrics.to_string(),
        }
    }

    #[test]
    fn test_bare_array_round_trips() {
        let songs = vec![
            song("Ajeeb Dastan Hai Yeh", "Dil Apna Aur Preet Parai", "Line one\nLine two"),
            song("Aaj Phir Jeene Ki", "Guide", "Another\nPair"),
        ];
        let text = serde_json::to_string(&songs).unwrap();
        let parsed = parse_staged::<Song>(Some(&text)).unwrap();
        assert_eq!(parsed.stage, ParseStage::Strict);
        assert_eq!(parsed.records, songs);
    }

    #[test]
    fn test_empty_or_missing_text_is_empty_result() {
        assert!(parse_records::<Song>(None).unwrap().is_empty());
        assert!(parse_records::<Song>(Some("")).unwrap().is_empty());
        assert!(parse_records::<Song>(Some("  \n ")).unwrap().is_empty());
    }

    #[test]
    fn test_empty_array_is_empty_result() {
        assert!(parse_records::<Song>(Some("[]")).unwrap().is_empty());
    }

    #[test]
    fn test_salvages_fenced_json() {
        let text = "Here are the songs:\n```json\n[{\"title\":\"A\",\"movie\":\"B\",\"lyrics\":\"L1\\nL2\"}]\n```";
        let parsed = parse_staged::<Song>(Some(text)).unwrap();
        assert_eq!(parsed.stage, ParseStage::Salvage);
        assert_eq!(parsed.records, vec![song("A", "B", "L1\nL2")]);
    }

    #[test]
    fn test_salvages_fenced_json_followed_by_citation() {
        let text = "```json\n[{\"title\":\"A\",\"movie\":\"B\",\"lyrics\":\"L1\\nL2\"}]\n```\nSource: [1]";
        let parsed = parse_staged::<Song>(Some(text)).unwrap();
        assert_eq!(parsed.stage, ParseStage::Salvage);
        assert_eq!(parsed.records, vec![song("A", "B", "L1\nL2")]);
    }

    #[test]
    fn test_brackets_inside_strings_do_not_end_the_array() {
        let text = "Songs: [{\"title\":\"Ek [Do] Teen\",\"movie\":\"Tezaab\",\"lyrics\":\"L1\\nL2\"}] (see [2])";
        let parsed = parse_staged::<Song>(Some(text)).unwrap();
        assert_eq!(parsed.records[0].title, "Ek [Do] Teen");
    }

    #[test]
    fn test_array_span_candidates() {
        assert_eq!(array_spans("x [1, [2] y ]"), vec!["[1, [2] y ]"]);
        assert_eq!(array_spans("x [1] y [2] z"), vec!["[1]", "[1] y [2]"]);
        assert!(array_spans("no arrays").is_empty());
    }

    #[test]
    fn test_no_array_is_format_error() {
        let err = parse_records::<Song>(Some("Sorry, I can't help with that.")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
        assert!(err.to_string().contains("Sorry, I can't help"));
    }

    #[test]
    fn test_reversed_brackets_is_format_error() {
        let err = parse_records::<Song>(Some("] nothing here [")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
    }

    #[test]
    fn test_missing_field_fails_whole_batch() {
        let text = r#"[{"title":"A","movie":"B","lyrics":"L1\nL2"},{"title":"C","lyrics":"L3\nL4"}]"#;
        let err = parse_records::<Song>(Some(text)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
    }

    #[test]
    fn test_missing_field_inside_prose_fails_whole_batch() {
        let text = r#"Result: [{"title":"C","lyrics":"L3\nL4"}] done"#;
        let err = parse_records::<Song>(Some(text)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
    }

    #[test]
    fn test_object_instead_of_array_is_format_error() {
        let text = r#"{"title":"A","movie":"B","lyrics":"L1\nL2"}"#;
        let err = parse_records::<Song>(Some(text)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
    }
}
