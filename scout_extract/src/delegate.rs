//! Delegate-backed extraction with unconditional fallback to the patterns.
//!
//! A delegate is any external service able to answer a structured instruction,
//! typically an LLM. Its answer is used only when it decodes cleanly into a
//! [`SearchParameters`] object; every other outcome (error, timeout, empty or
//! malformed reply) reruns the prompt through [`PatternExtractor`]. The two
//! paths are never merged.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

use scout_core::{Extraction, ParameterExtractor, SearchParameters};

use crate::engine::PatternExtractor;

pub const DEFAULT_DELEGATE_TIMEOUT: Duration = Duration::from_secs(15);

/// What a delegate handed back.
#[derive(Debug, Clone, PartialEq)]
pub enum DelegateReply {
    /// JSON-encoded text, possibly wrapped in a Markdown code fence.
    Text(String),
    /// An already-decoded value.
    Structured(Value),
    /// The delegate had nothing to say.
    Empty,
}

#[async_trait]
pub trait Delegate: Send + Sync {
    async fn process(&self, instruction: &str) -> anyhow::Result<DelegateReply>;
}

#[derive(Debug, Error)]
pub enum DelegateError {
    #[error("delegate timed out after {0:?}")]
    Timeout(Duration),

    #[error("delegate call failed: {0}")]
    Call(anyhow::Error),

    #[error("delegate returned no content")]
    Empty,

    #[error("delegate reply is not valid parameter JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("delegate reply is not a JSON object")]
    NotAnObject,
}

/// Build the instruction sent to the delegate for `prompt`.
#[must_use]
pub fn build_instruction(prompt: &str) -> String {
    format!(
        r#"Analyze this navigation request and extract the following information:

User Request: "{prompt}"

Please extract and return a JSON object with these fields:
- category: The main type of place (cafe, restaurant, bar, museum, etc.)
- event_type: More specific event type if applicable
- amenities: List of desired amenities (wifi, parking, outdoor seating, etc.)
- dietary_restrictions: List of dietary needs (vegan, vegetarian, gluten-free, etc.)
- price_range: Price preference ($, $$, $$$, $$$$)
- location_context: Where on the route (halfway, near destination, on route)
- destination: The destination city or area
- origin: The starting point if mentioned
- time_preference: General time preference (morning, afternoon, evening, after work)
- specific_time: Specific time mentioned, as 24-hour HH:MM
- day_preference: Day preference (today, tomorrow, weekend)
- party_size: Number of people if mentioned
- vibe: Atmosphere preference (romantic, casual, business, family)
- accessibility_needs: Accessibility requirements

Return only valid JSON, no additional text."#
    )
}

/// Decode a delegate reply into parameters.
///
/// Missing or `null` keys are treated as absent. Anything that is not a JSON
/// object, or whose fields have the wrong types, is an error.
pub fn decode_reply(reply: DelegateReply) -> Result<SearchParameters, DelegateError> {
    let value = match reply {
        DelegateReply::Empty => return Err(DelegateError::Empty),
        DelegateReply::Structured(value) => value,
        DelegateReply::Text(text) => {
            let body = strip_code_fence(text.trim());
            if body.is_empty() {
                return Err(DelegateError::Empty);
            }
            serde_json::from_str(body)?
        }
    };

    if !value.is_object() {
        return Err(DelegateError::NotAnObject);
    }

    Ok(serde_json::from_value(value)?)
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // Drop the info string ("json") on the opening line.
    let rest = rest.split_once('\n').map_or("", |(_, body)| body);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

/// Routes extraction through a [`Delegate`], falling back to patterns.
pub struct DelegateExtractor<D> {
    delegate: D,
    fallback: PatternExtractor,
    timeout: Duration,
}

impl<D: Delegate> DelegateExtractor<D> {
    pub fn new(delegate: D) -> Self {
        info!("Creating delegate extractor");
        Self {
            delegate,
            fallback: PatternExtractor::new(),
            timeout: DEFAULT_DELEGATE_TIMEOUT,
        }
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn try_delegate(&self, prompt: &str) -> Result<SearchParameters, DelegateError> {
        let instruction = build_instruction(prompt);
        let reply = tokio::time::timeout(self.timeout, self.delegate.process(&instruction))
            .await
            .map_err(|_| DelegateError::Timeout(self.timeout))?
            .map_err(DelegateError::Call)?;
        decode_reply(reply)
    }
}

#[async_trait]
impl<D: Delegate> ParameterExtractor for DelegateExtractor<D> {
    async fn extract(&self, prompt: &str) -> Extraction {
        if prompt.trim().is_empty() {
            return Extraction::from_patterns(SearchParameters::default());
        }

        match self.try_delegate(prompt).await {
            Ok(parameters) => {
                debug!("Delegate extraction succeeded");
                Extraction::from_delegate(parameters)
            }
            Err(e) => {
                warn!("Delegate extraction failed, using patterns: {e}");
                Extraction::from_patterns(self.fallback.extract(prompt))
            }
        }
    }

    fn uses_delegate(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn instruction_embeds_prompt_and_fields() {
        let instruction = build_instruction("quiet bar near Boston");
        assert!(instruction.contains(r#"User Request: "quiet bar near Boston""#));
        for field in ["category", "dietary_restrictions", "accessibility_needs"] {
            assert!(instruction.contains(&format!("- {field}:")));
        }
        assert!(instruction.ends_with("Return only valid JSON, no additional text."));
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn decodes_plain_json_text() {
        let reply = DelegateReply::Text(r#"{"category":"bar","party_size":2}"#.to_string());
        let params = decode_reply(reply).expect("valid reply should decode");
        assert_eq!(params.category.as_deref(), Some("bar"));
        assert_eq!(params.party_size, Some(2));
        assert!(params.amenities.is_empty());
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn decodes_fenced_json_text() {
        let reply =
            DelegateReply::Text("```json\n{\"vibe\": \"casual\"}\n```".to_string());
        let params = decode_reply(reply).expect("fenced reply should decode");
        assert_eq!(params.vibe.as_deref(), Some("casual"));
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn decodes_structured_value() {
        let reply = DelegateReply::Structured(json!({
            "destination": "Newark",
            "amenities": ["wifi"],
            "accessibility_needs": null,
        }));
        let params = decode_reply(reply).expect("structured reply should decode");
        assert_eq!(params.destination.as_deref(), Some("Newark"));
        assert_eq!(params.amenities, vec!["wifi"]);
        assert!(params.accessibility_needs.is_empty());
    }

    #[test]
    fn rejects_unusable_replies() {
        assert!(matches!(
            decode_reply(DelegateReply::Empty),
            Err(DelegateError::Empty)
        ));
        assert!(matches!(
            decode_reply(DelegateReply::Text("   ".to_string())),
            Err(DelegateError::Empty)
        ));
        assert!(matches!(
            decode_reply(DelegateReply::Text("sure! here you go".to_string())),
            Err(DelegateError::Parse(_))
        ));
        assert!(matches!(
            decode_reply(DelegateReply::Text("null".to_string())),
            Err(DelegateError::NotAnObject)
        ));
        assert!(matches!(
            decode_reply(DelegateReply::Structured(json!(["cafe"]))),
            Err(DelegateError::NotAnObject)
        ));
        assert!(matches!(
            decode_reply(DelegateReply::Structured(json!({"party_size": "four"}))),
            Err(DelegateError::Parse(_))
        ));
    }

    #[test]
    fn strip_code_fence_variants() {
        assert_eq!(strip_code_fence("{}"), "{}");
        assert_eq!(strip_code_fence("```\n{}\n```"), "{}");
        assert_eq!(strip_code_fence("```json\n{\"a\":1}```"), "{\"a\":1}");
        assert_eq!(strip_code_fence("```"), "");
    }
}
