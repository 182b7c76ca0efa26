use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::error::AnalysisError;
use super::models::ModelVerdict;
use crate::utils::log_preview;

lazy_static! {
    static ref GREEDY_OBJECT: Regex = Regex::new(r"(?s)\{.*\}").expect("valid regex");
}


/// How the JSON object is located inside a free-text model reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonExtraction {
    /// First `{` through the last `}` anywhere in the reply.
    #[default]
    Greedy,
    /// First `{` through its matching `}`, ignoring braces inside JSON strings.
    Balanced,
}


pub fn extract_json_object(reply: &str, mode: JsonExtraction) -> Option<&str> {
    match mode {
        JsonExtraction::Greedy => GREEDY_OBJECT.find(reply).map(|m| m.as_str()),
        JsonExtraction::Balanced => balanced_object(reply),
    }
}

fn balanced_object(reply: &str) -> Option<&str> {
    let start = reply.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in reply[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    let end = start + offset + ch.len_utf8();
                    return Some(&reply[start..end]);
                }
            }
            _ => {}
        }
    }

    None
}


pub fn parse_verdict(reply: &str, mode: JsonExtraction) -> Result<ModelVerdict, AnalysisError> {
    let object = extract_json_object(reply, mode).ok_or_else(|| {
        AnalysisError::unparseable(format!(
            "no JSON object in reply: {}",
            log_preview(reply, 200)
        ))
    })?;

    serde_json::from_str::<ModelVerdict>(object).map_err(|e| {
        AnalysisError::unparseable(format!(
            "{e} while decoding: {}",
            log_preview(object, 200)
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRAILING_BRACE: &str =
        r#"{"scammerScore": 10, "summary": "Fine.", "reasons": []} Note: ignore the stray } here"#;

    #[test]
    fn test_extract_with_surrounding_prose() {
        let reply = r#"Here is the result: {"scammerScore": 42, "summary": "Mixed signals.", "reasons": ["a","b","c","d"]} Hope it helps."#;
        let expected = r#"{"scammerScore": 42, "summary": "Mixed signals.", "reasons": ["a","b","c","d"]}"#;
        assert_eq!(extract_json_object(reply, JsonExtraction::Greedy), Some(expected));
        assert_eq!(extract_json_object(reply, JsonExtraction::Balanced), Some(expected));
    }

    #[test]
    fn test_extract_spans_newlines() {
        let reply = "```json\n{\n  \"scammerScore\": 5\n}\n```";
        assert_eq!(
            extract_json_object(reply, JsonExtraction::Greedy),
            Some("{\n  \"scammerScore\": 5\n}")
        );
    }

    #[test]
    fn test_greedy_runs_to_last_brace() {
        let extracted = extract_json_object(TRAILING_BRACE, JsonExtraction::Greedy).unwrap();
        assert!(extracted.ends_with("stray }"));
        assert!(parse_verdict(TRAILING_BRACE, JsonExtraction::Greedy).is_err());
    }

    #[test]
    fn test_balanced_stops_at_matching_brace() {
        let extracted = extract_json_object(TRAILING_BRACE, JsonExtraction::Balanced).unwrap();
        assert_eq!(extracted, r#"{"scammerScore": 10, "summary": "Fine.", "reasons": []}"#);

        let verdict = parse_verdict(TRAILING_BRACE, JsonExtraction::Balanced).unwrap();
        assert_eq!(verdict.validated_score().unwrap(), 10);
    }

    #[test]
    fn test_balanced_ignores_braces_in_strings() {
        let reply = r#"{"scammerScore": 80, "summary": "Uses {fake} \"escrow}\" links", "reasons": ["x"]} trailing"#;
        let verdict = parse_verdict(reply, JsonExtraction::Balanced).unwrap();
        assert_eq!(verdict.summary, r#"Uses {fake} "escrow}" links"#);
    }

    #[test]
    fn test_no_braces_is_unparseable() {
        for mode in [JsonExtraction::Greedy, JsonExtraction::Balanced] {
            assert_eq!(extract_json_object("I cannot help with that.", mode), None);
            let err = parse_verdict("I cannot help with that.", mode).unwrap_err();
            assert!(matches!(err, AnalysisError::UnparseableCompletion { .. }));
        }
    }

    #[test]
    fn test_unclosed_object() {
        assert_eq!(extract_json_object("{\"scammerScore\": 3", JsonExtraction::Greedy), None);
        assert_eq!(extract_json_object("{\"scammerScore\": 3", JsonExtraction::Balanced), None);
    }

    #[test]
    fn test_invalid_json_is_unparseable() {
        let err = parse_verdict("{scammerScore: high}", JsonExtraction::Greedy).unwrap_err();
        assert!(matches!(err, AnalysisError::UnparseableCompletion { .. }));
    }

    #[test]
    fn test_non_numeric_score_is_unparseable() {
        let reply = r#"{"scammerScore": "very high", "summary": "s", "reasons": []}"#;
        let err = parse_verdict(reply, JsonExtraction::Greedy).unwrap_err();
        assert!(matches!(err, AnalysisError::UnparseableCompletion { .. }));
    }

    #[test]
    fn test_missing_or_null_summary_defaults_to_empty() {
        let verdict =
            parse_verdict(r#"{"scammerScore": 42, "reasons": ["a"]}"#, JsonExtraction::Greedy).unwrap();
        assert_eq!(verdict.summary, "");
        assert_eq!(verdict.reasons, vec!["a"]);

        let verdict = parse_verdict(
            r#"{"scammerScore": 42, "summary": null, "reasons": null}"#,
            JsonExtraction::Greedy,
        )
        .unwrap();
        assert_eq!(verdict.summary, "");
        assert!(verdict.reasons.is_empty());
        assert_eq!(verdict.validated_score().unwrap(), 42);
    }

    #[test]
    fn test_missing_reasons_defaults_to_empty() {
        let verdict =
            parse_verdict(r#"{"scammerScore": 20, "summary": "ok"}"#, JsonExtraction::Greedy).unwrap();
        assert!(verdict.reasons.is_empty());
    }

    #[test]
    fn test_extraction_mode_deserializes_lowercase() {
        let mode: JsonExtraction = serde_json::from_str("\"balanced\"").unwrap();
        assert_eq!(mode, JsonExtraction::Balanced);
        assert_eq!(JsonExtraction::default(), JsonExtraction::Greedy);
    }
}
