//! Structured response parsing.
//!
//! Backends are asked for bare JSON but often wrap it in a fenced code
//! block. These functions strip one such fence and parse what remains.
//! Nothing here repairs truncated or invalid JSON: that is reported as
//! [`MalformedResponse`] and handled by the caller's fallback policy.
//!
//! | Function | Purpose |
//! |----------|---------|
//! | [`strip_code_fence`] | Remove a leading ```` ```lang ```` and trailing ```` ``` ```` |
//! | [`parse_structured`] | Fence-strip, then parse as JSON |
//! | [`decode_verdict`] | Parse and deserialize into a verdict type |
//! | [`decode_final`] | As above, and require a decisive outcome |

use crate::core::string::excerpt;
use crate::verdict::entities::{Decision, FinalVerdict};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

/// Characters of raw text kept for diagnostics
pub const EXCERPT_CHARS: usize = 200;

const FENCE: &str = "```";

/// The backend returned text that is not the structured data requested.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Failed to parse structured response: {reason}\nResponse text: {excerpt}")]
pub struct MalformedResponse {
    pub reason: String,
    /// First [`EXCERPT_CHARS`] characters of the raw text
    pub excerpt: String,
}

impl MalformedResponse {
    pub fn new(reason: impl Into<String>, raw: &str) -> Self {
        Self {
            reason: reason.into(),
            excerpt: excerpt(raw, EXCERPT_CHARS),
        }
    }
}

fn is_tag_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '+' | '.')
}

/// Strip a single surrounding code fence, optionally language-tagged.
///
/// Text without a fence is returned trimmed and otherwise untouched.
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix(FENCE) else {
        return strip_closing_fence(trimmed);
    };

    let tag_len = rest.find(|c: char| !is_tag_char(c)).unwrap_or(rest.len());
    let after_tag = &rest[tag_len..];
    // A bare scalar such as ```true``` looks like a tag with nothing after it
    let tagged = tag_len > 0
        && (after_tag.starts_with(['{', '['])
            || (after_tag.starts_with(char::is_whitespace)
                && !strip_closing_fence(after_tag).is_empty()));

    strip_closing_fence(if tagged { after_tag } else { rest })
}

fn strip_closing_fence(body: &str) -> &str {
    let body = body.trim();
    body.strip_suffix(FENCE).unwrap_or(body).trim()
}

/// Parse backend text as JSON after stripping a surrounding code fence.
pub fn parse_structured(text: &str) -> Result<Value, MalformedResponse> {
    let body = strip_code_fence(text);
    if body.is_empty() {
        return Err(MalformedResponse::new("empty response", text));
    }
    serde_json::from_str(body).map_err(|e| MalformedResponse::new(e.to_string(), text))
}

/// Parse and deserialize a verdict; missing or mistyped fields are malformed.
pub fn decode_verdict<T: DeserializeOwned>(text: &str) -> Result<T, MalformedResponse> {
    let value = parse_structured(text)?;
    if !value.is_object() {
        return Err(MalformedResponse::new("expected a JSON object", text));
    }
    serde_json::from_value(value).map_err(|e| MalformedResponse::new(e.to_string(), text))
}

/// Decode a final verdict, refusing an undecided outcome.
pub fn decode_final(text: &str) -> Result<FinalVerdict, MalformedResponse> {
    let verdict: FinalVerdict = decode_verdict(text)?;
    if verdict.decision == Decision::Undetermined {
        return Err(MalformedResponse::new(
            "final verdict must decide for Side A or Side B",
            text,
        ));
    }
    Ok(verdict)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verdict::entities::{InterimVerdict, Leaning};
    use serde_json::json;

    fn payloads() -> Vec<Value> {
        vec![
            json!({"summary": "s", "nested": {"list": [1, 2, 3]}}),
            json!([{"a": "```"}, null, true]),
            json!({}),
            json!({"text": "line one\nline two"}),
        ]
    }

    #[test]
    fn test_fenced_payloads_match_direct_parse() {
        for payload in payloads() {
            let raw = serde_json::to_string_pretty(&payload).unwrap();
            let direct = parse_structured(&raw).unwrap();
            for wrapped in [
                format!("```json\n{}\n```", raw),
                format!("```JSON\n{}\n```", raw),
                format!("```\n{}\n```", raw),
                format!("  ```javascript\n{}```  ", raw),
                format!("```json{}```", raw),
            ] {
                assert_eq!(parse_structured(&wrapped).unwrap(), direct, "{}", wrapped);
            }
            assert_eq!(direct, payload);
        }
    }

    #[test]
    fn test_scalar_after_untagged_fence() {
        assert_eq!(parse_structured("```true\n```").unwrap(), json!(true));
        assert_eq!(parse_structured("```123\n```").unwrap(), json!(123));
        assert_eq!(parse_structured("```\ntrue\n```").unwrap(), json!(true));
        assert_eq!(parse_structured("```json\nnull\n```").unwrap(), Value::Null);
    }

    #[test]
    fn test_unfenced_text_is_trimmed() {
        assert_eq!(strip_code_fence("  {\"a\":1}\n"), "{\"a\":1}");
    }

    #[test]
    fn test_invalid_text_is_malformed() {
        for text in [
            "",
            "```json\n```",
            "I think Side A wins.",
            "```json\n{\"summary\": \"truncated",
            "Here is the verdict: {\"summary\": \"s\"}",
        ] {
            let err = parse_structured(text).unwrap_err();
            assert!(err.excerpt.len() <= text.len());
        }
    }

    #[test]
    fn test_excerpt_is_bounded() {
        let text = "x".repeat(1000);
        let err = parse_structured(&text).unwrap_err();
        assert_eq!(err.excerpt.chars().count(), EXCERPT_CHARS);
        assert!(err.to_string().contains("Response text:"));
    }

    #[test]
    fn test_decode_missing_field_is_malformed() {
        let text = r#"{"summary": "s", "reasoning": "r", "leaningTowards": "Neutral"}"#;
        let err = decode_verdict::<InterimVerdict>(text).unwrap_err();
        assert!(err.reason.contains("strengthsA"));
    }

    #[test]
    fn test_decode_fenced_interim() {
        let text = "```json\n{\"summary\":\"s\",\"reasoning\":\"r\",\"leaningTowards\":\"Side B\",\
                    \"strengthsA\":\"a\",\"strengthsB\":\"b\",\"areasNeedingClarification\":\"c\"}\n```";
        let verdict: InterimVerdict = decode_verdict(text).unwrap();
        assert_eq!(verdict.leaning_towards, Leaning::SideB);
    }

    #[test]
    fn test_decode_array_is_malformed() {
        assert!(decode_verdict::<InterimVerdict>("[]").is_err());
    }

    #[test]
    fn test_decode_final_refuses_undetermined() {
        let text = json!({
            "decision": "Undetermined",
            "summary": "s", "caseSummary": "c",
            "sideAArguments": {"title": "t", "content": "a"},
            "sideBArguments": {"title": "t", "content": "b"},
            "reasoning": "r", "legalBasis": [], "keyFindings": [], "remedy": "z"
        })
        .to_string();
        assert!(decode_final(&text).is_err());
    }
}
