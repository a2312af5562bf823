//! Normalization of raw provider payloads into a stable result shape.
//!
//! The normalizer is total: any payload the provider can legally return
//! (including one with no text and no grounding metadata at all) maps to
//! a well-formed [`SearchResult`]. A partially populated payload is never
//! an error.

use gemini_client::GenerateContentResponse;
use serde::Serialize;

/// Fallback summary when the provider returns no text.
pub const NO_INFORMATION: &str = "No information found.";

/// A single citation backing the summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Source {
    /// Source URI, empty when the provider omitted it
    pub uri: String,

    /// Source page title, empty when the provider omitted it
    pub title: String,
}

/// Normalized outcome of a successful investigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    /// Synthesized narrative; never empty
    pub summary: String,

    /// Citations in the provider's order; may be empty
    pub sources: Vec<Source>,

    /// Human-readable completion time
    pub timestamp: String,
}

/// Map a raw provider payload to a [`SearchResult`].
///
/// Defaults, per field:
/// - missing or empty text becomes the [`NO_INFORMATION`] sentinel;
/// - a missing chunk list yields empty `sources`;
/// - chunks without a web reference are dropped;
/// - a web reference missing `uri` or `title` keeps the chunk, with an
///   empty string in the gap.
///
/// Chunk order is preserved. `completed_at` is the capture time supplied
/// by the caller once the response arrived.
pub fn normalize(raw: &GenerateContentResponse, completed_at: impl Into<String>) -> SearchResult {
    let summary = raw
        .text()
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| NO_INFORMATION.to_string());

    let sources = raw
        .grounding_chunks()
        .iter()
        .filter_map(|chunk| chunk.web.as_ref())
        .map(|web| Source {
            uri: web.uri.clone().unwrap_or_default(),
            title: web.title.clone().unwrap_or_default(),
        })
        .collect();

    SearchResult {
        summary,
        sources,
        timestamp: completed_at.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(value: serde_json::Value) -> GenerateContentResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_full_payload() {
        let raw = response(json!({
            "candidates": [{
                "content": {"parts": [{"text": "Jane Doe is a researcher..."}]},
                "groundingMetadata": {
                    "groundingChunks": [
                        {"web": {"uri": "https://example.com", "title": "Example"}}
                    ]
                }
            }]
        }));

        let result = normalize(&raw, "2026-08-30 12:00:00");

        assert_eq!(result.summary, "Jane Doe is a researcher...");
        assert_eq!(
            result.sources,
            vec![Source {
                uri: "https://example.com".into(),
                title: "Example".into(),
            }]
        );
        assert!(!result.timestamp.is_empty());
    }

    #[test]
    fn test_missing_text_yields_sentinel() {
        let raw = response(json!({"candidates": []}));
        let result = normalize(&raw, "t");

        assert_eq!(result.summary, NO_INFORMATION);
        assert!(result.sources.is_empty());
    }

    #[test]
    fn test_null_text_yields_sentinel() {
        let raw = response(json!({
            "candidates": [{"content": {"parts": [{"text": null}]}}]
        }));

        assert_eq!(normalize(&raw, "t").summary, NO_INFORMATION);
    }

    #[test]
    fn test_chunk_without_web_is_dropped() {
        let raw = response(json!({
            "candidates": [{
                "content": {"parts": [{"text": "summary"}]},
                "groundingMetadata": {
                    "groundingChunks": [
                        {},
                        {"web": {"uri": "https://a.example", "title": "A"}}
                    ]
                }
            }]
        }));

        let result = normalize(&raw, "t");
        assert_eq!(result.sources.len(), 1);
        assert_eq!(result.sources[0].uri, "https://a.example");
    }

    #[test]
    fn test_partial_web_fields_default_to_empty() {
        let raw = response(json!({
            "candidates": [{
                "content": {"parts": [{"text": "summary"}]},
                "groundingMetadata": {
                    "groundingChunks": [
                        {"web": {"title": "No URI"}},
                        {"web": {"uri": "https://b.example"}}
                    ]
                }
            }]
        }));

        let result = normalize(&raw, "t");
        assert_eq!(
            result.sources,
            vec![
                Source {
                    uri: String::new(),
                    title: "No URI".into(),
                },
                Source {
                    uri: "https://b.example".into(),
                    title: String::new(),
                },
            ]
        );
    }

    #[test]
    fn test_source_order_preserved() {
        let raw = response(json!({
            "candidates": [{
                "content": {"parts": [{"text": "summary"}]},
                "groundingMetadata": {
                    "groundingChunks": [
                        {"web": {"uri": "https://1.example", "title": "1"}},
                        {},
                        {"web": {"uri": "https://2.example", "title": "2"}},
                        {"web": {"uri": "https://3.example", "title": "3"}}
                    ]
                }
            }]
        }));

        let uris: Vec<_> = normalize(&raw, "t")
            .sources
            .into_iter()
            .map(|s| s.uri)
            .collect();
        assert_eq!(
            uris,
            vec!["https://1.example", "https://2.example", "https://3.example"]
        );
    }

    #[test]
    fn test_idempotent() {
        let raw = response(json!({
            "candidates": [{
                "content": {"parts": [{"text": "summary"}]},
                "groundingMetadata": {
                    "groundingChunks": [{"web": {"uri": "https://a.example", "title": "A"}}]
                }
            }]
        }));

        assert_eq!(normalize(&raw, "t"), normalize(&raw, "t"));
    }
}
