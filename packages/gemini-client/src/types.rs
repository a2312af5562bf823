//! Gemini API request and response types.
//!
//! Request types serialize to the `generateContent` wire format; response
//! types deserialize permissively, so a payload with missing candidates,
//! parts, or grounding metadata still decodes cleanly.

use serde::{Deserialize, Serialize};

// =============================================================================
// Request
// =============================================================================

/// A `generateContent` request.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateContentRequest {
    /// Conversation contents (single-turn: one user content)
    pub contents: Vec<Content>,

    /// Enabled tools (e.g. Google Search grounding)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<Tool>,
}

impl GenerateContentRequest {
    /// Create a single-turn text request.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.into(),
                }],
            }],
            tools: Vec::new(),
        }
    }

    /// Enable the Google Search grounding tool so the model may attach
    /// web citations to its answer.
    pub fn with_google_search(mut self) -> Self {
        self.tools.push(Tool {
            google_search: GoogleSearch {},
        });
        self
    }

    /// Whether the Google Search grounding tool is enabled.
    pub fn has_google_search(&self) -> bool {
        !self.tools.is_empty()
    }

    /// The text of the first part, if any.
    pub fn prompt_text(&self) -> Option<&str> {
        self.contents
            .first()
            .and_then(|c| c.parts.first())
            .map(|p| p.text.as_str())
    }
}

/// One turn of conversation content.
#[derive(Debug, Clone, Serialize)]
pub struct Content {
    /// Content parts (text only; no inline media)
    pub parts: Vec<Part>,
}

/// A single text part.
#[derive(Debug, Clone, Serialize)]
pub struct Part {
    /// Part text
    pub text: String,
}

/// A tool enablement entry.
#[derive(Debug, Clone, Serialize)]
pub struct Tool {
    /// Google Search grounding, enabled by presence
    pub google_search: GoogleSearch,
}

/// Google Search grounding configuration (empty object on the wire).
#[derive(Debug, Clone, Serialize)]
pub struct GoogleSearch {}

// =============================================================================
// Response
// =============================================================================

/// A `generateContent` response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateContentResponse {
    /// Generated candidates; the first one is the answer
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate's parts, or `None` when
    /// the response carries no text at all.
    pub fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let mut text = String::new();
        for part in &content.parts {
            if let Some(t) = &part.text {
                text.push_str(t);
            }
        }
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }

    /// Grounding chunks of the first candidate, empty when absent.
    pub fn grounding_chunks(&self) -> &[GroundingChunk] {
        self.candidates
            .first()
            .and_then(|c| c.grounding_metadata.as_ref())
            .map(|m| m.grounding_chunks.as_slice())
            .unwrap_or(&[])
    }
}

/// One generated candidate.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// Generated content
    pub content: Option<CandidateContent>,

    /// Grounding metadata attached when search grounding ran
    pub grounding_metadata: Option<GroundingMetadata>,
}

/// Content of a generated candidate.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CandidateContent {
    /// Generated parts
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

/// A part of a generated candidate; text may be absent for non-text parts.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponsePart {
    /// Part text
    pub text: Option<String>,
}

/// Grounding metadata for one candidate.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroundingMetadata {
    /// Retrieved grounding chunks, in citation order
    #[serde(default)]
    pub grounding_chunks: Vec<GroundingChunk>,
}

/// One unit of grounding metadata, possibly referencing a web source.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GroundingChunk {
    /// Web reference, absent for non-web grounding
    pub web: Option<WebSource>,
}

/// A web reference inside a grounding chunk.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebSource {
    /// Source URI
    pub uri: Option<String>,

    /// Source page title
    pub title: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serializes_without_nulls() {
        let request = GenerateContentRequest::new("hello").with_google_search();
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["contents"][0]["parts"][0]["text"], "hello");
        assert!(json["tools"][0]["google_search"].is_object());
    }

    #[test]
    fn test_request_omits_empty_tools() {
        let request = GenerateContentRequest::new("hello");
        let json = serde_json::to_value(&request).unwrap();

        assert!(json.get("tools").is_none());
        assert!(!request.has_google_search());
    }

    #[test]
    fn test_prompt_text() {
        let request = GenerateContentRequest::new("find Jane Doe");
        assert_eq!(request.prompt_text(), Some("find Jane Doe"));
    }

    #[test]
    fn test_response_text_joins_parts() {
        let response: GenerateContentResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{
                "content": {
                    "parts": [{"text": "Jane "}, {"text": "Doe"}]
                }
            }]
        }))
        .unwrap();

        assert_eq!(response.text().as_deref(), Some("Jane Doe"));
    }

    #[test]
    fn test_response_decodes_empty_payloads() {
        let empty: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(empty.text().is_none());
        assert!(empty.grounding_chunks().is_empty());

        let no_content: GenerateContentResponse =
            serde_json::from_value(serde_json::json!({"candidates": [{}]})).unwrap();
        assert!(no_content.text().is_none());
        assert!(no_content.grounding_chunks().is_empty());
    }

    #[test]
    fn test_response_ignores_unknown_fields() {
        let response: GenerateContentResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{
                "content": {"parts": [{"text": "ok"}], "role": "model"},
                "finishReason": "STOP",
                "groundingMetadata": {
                    "groundingChunks": [{"web": {"uri": "https://example.com"}}],
                    "webSearchQueries": ["jane doe"]
                }
            }],
            "modelVersion": "gemini-2.5-flash"
        }))
        .unwrap();

        assert_eq!(response.text().as_deref(), Some("ok"));
        let chunks = response.grounding_chunks();
        assert_eq!(chunks.len(), 1);
        let web = chunks[0].web.as_ref().unwrap();
        assert_eq!(web.uri.as_deref(), Some("https://example.com"));
        assert!(web.title.is_none());
    }
}
