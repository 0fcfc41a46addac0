//! Delegate routing and fallback behaviour.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use scout_extract::{
    Delegate, DelegateExtractor, DelegateReply, ExtractionSource, ParameterExtractor,
    PatternExtractor,
};

const PROMPTS: [&str; 4] = [
    "Find a vegan cafe open after 7pm on my route to Brooklyn",
    "I need a rest stop with clean bathrooms halfway to Philadelphia",
    "Looking for a romantic restaurant for dinner tonight",
    "Family-friendly restaurant for 4 people this weekend",
];

struct Failing;

#[async_trait]
impl Delegate for Failing {
    async fn process(&self, _instruction: &str) -> anyhow::Result<DelegateReply> {
        anyhow::bail!("delegate unavailable")
    }
}

struct Replying(DelegateReply);

#[async_trait]
impl Delegate for Replying {
    async fn process(&self, _instruction: &str) -> anyhow::Result<DelegateReply> {
        Ok(self.0.clone())
    }
}

struct Slow;

#[async_trait]
impl Delegate for Slow {
    async fn process(&self, _instruction: &str) -> anyhow::Result<DelegateReply> {
        tokio::time::sleep(Duration::from_secs(5)).await;
        Ok(DelegateReply::Structured(json!({"category": "spa"})))
    }
}

struct Counting(Arc<AtomicUsize>);

#[async_trait]
impl Delegate for Counting {
    async fn process(&self, instruction: &str) -> anyhow::Result<DelegateReply> {
        self.0.fetch_add(1, Ordering::SeqCst);
        assert!(instruction.contains("User Request:"));
        Ok(DelegateReply::Text(r#"{"category": "museum"}"#.to_string()))
    }
}

async fn assert_falls_back<D: Delegate>(extractor: &DelegateExtractor<D>) {
    let patterns = PatternExtractor::new();
    for prompt in PROMPTS {
        let extraction = extractor.extract(prompt).await;
        assert_eq!(extraction.source, ExtractionSource::Pattern);
        assert_eq!(extraction.parameters, patterns.extract(prompt));
    }
}

#[tokio::test]
async fn test_failing_delegate_matches_patterns() {
    assert_falls_back(&DelegateExtractor::new(Failing)).await;
}

#[tokio::test]
async fn test_empty_reply_matches_patterns() {
    assert_falls_back(&DelegateExtractor::new(Replying(DelegateReply::Empty))).await;
}

#[tokio::test]
async fn test_unparsable_reply_matches_patterns() {
    let reply = DelegateReply::Text("I think they want a cafe.".to_string());
    assert_falls_back(&DelegateExtractor::new(Replying(reply))).await;
}

#[tokio::test]
async fn test_non_object_reply_matches_patterns() {
    let reply = DelegateReply::Structured(json!("cafe"));
    assert_falls_back(&DelegateExtractor::new(Replying(reply))).await;
}

#[tokio::test]
async fn test_timeout_matches_patterns() {
    let extractor = DelegateExtractor::new(Slow).with_timeout(Duration::from_millis(20));
    assert_falls_back(&extractor).await;
}

#[tokio::test]
async fn test_json_text_reply_is_used_verbatim() {
    let reply = DelegateReply::Text(
        r#"{"category": "restaurant", "price_range": "$$", "party_size": 2, "origin": "Hoboken"}"#
            .to_string(),
    );
    let extractor = DelegateExtractor::new(Replying(reply));
    let extraction = extractor.extract(PROMPTS[0]).await;

    assert!(extraction.used_delegate());
    let params = extraction.parameters;
    assert_eq!(params.category.as_deref(), Some("restaurant"));
    assert_eq!(params.price_range.as_deref(), Some("$$"));
    assert_eq!(params.party_size, Some(2));
    assert_eq!(params.origin.as_deref(), Some("Hoboken"));
    // Nothing from the pattern path leaks in.
    assert!(params.dietary_restrictions.is_empty());
    assert_eq!(params.destination, None);
}

#[tokio::test]
async fn test_structured_reply_is_used() {
    let reply = DelegateReply::Structured(json!({
        "category": "outdoors",
        "accessibility_needs": ["step-free access"],
    }));
    let extractor = DelegateExtractor::new(Replying(reply));
    let extraction = extractor.extract("somewhere to walk the dog").await;

    assert_eq!(extraction.source, ExtractionSource::Delegate);
    assert_eq!(extraction.parameters.category.as_deref(), Some("outdoors"));
    assert_eq!(
        extraction.parameters.accessibility_needs,
        vec!["step-free access"]
    );
}

#[tokio::test]
async fn test_blank_prompt_skips_delegate() {
    let calls = Arc::new(AtomicUsize::new(0));
    let extractor = DelegateExtractor::new(Counting(calls.clone()));

    let extraction = extractor.extract("   ").await;
    assert!(extraction.parameters.is_empty());
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    let extraction = extractor.extract("an old gallery").await;
    assert_eq!(extraction.parameters.category.as_deref(), Some("museum"));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_delegate_extractor_behind_trait_object() {
    let extractor: Arc<dyn ParameterExtractor> = Arc::new(DelegateExtractor::new(Failing));
    assert!(extractor.uses_delegate());

    let extraction = extractor.extract(PROMPTS[3]).await;
    assert!(!extraction.used_delegate());
    assert_eq!(extraction.parameters.party_size, Some(4));
}
