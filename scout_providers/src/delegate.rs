//! Adapts a chat provider into an extraction delegate.

use async_trait::async_trait;
use scout_core::{ChatMessage, LLMProvider};
use scout_extract::{Delegate, DelegateReply};
use tracing::debug;

const SYSTEM_PROMPT: &str = "You are a specialized assistant for a navigation app. \
Your role is to extract structured search parameters from natural language requests \
about places, venues and locations along a travel route. Answer with a single JSON object.";

/// Sends the extraction instruction as a one-shot chat.
pub struct ProviderDelegate<P> {
    provider: P,
    model: String,
}

impl<P: LLMProvider> ProviderDelegate<P> {
    /// Use the provider's default model.
    pub fn new(provider: P) -> Self {
        let model = provider.get_default_model().to_string();
        Self { provider, model }
    }
}

#[async_trait]
impl<P: LLMProvider> Delegate for ProviderDelegate<P> {
    async fn process(&self, instruction: &str) -> anyhow::Result<DelegateReply> {
        let messages = [
            ChatMessage::system(SYSTEM_PROMPT),
            ChatMessage::user(instruction),
        ];
        let response = self.provider.chat(&messages, &self.model).await?;

        if let Some(usage) = &response.usage {
            debug!("Delegate used {} tokens", usage.total_tokens);
        }

        if response.content.trim().is_empty() {
            return Ok(DelegateReply::Empty);
        }
        Ok(DelegateReply::Text(response.content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scout_core::{LLMResponse, ParameterExtractor, Role};
    use scout_extract::DelegateExtractor;
    use std::sync::Mutex;

    struct Scripted {
        reply: String,
        seen: Mutex<Vec<(Vec<Role>, String)>>,
    }

    impl Scripted {
        fn new(reply: &str) -> Self {
            Self {
                reply: reply.to_string(),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl LLMProvider for Scripted {
        async fn chat(&self, messages: &[ChatMessage], model: &str) -> anyhow::Result<LLMResponse> {
            if let Ok(mut seen) = self.seen.lock() {
                seen.push((messages.iter().map(|m| m.role).collect(), model.to_string()));
            }
            Ok(LLMResponse {
                content: self.reply.clone(),
                usage: None,
            })
        }

        fn get_default_model(&self) -> &str {
            "scripted-1"
        }
    }

    #[tokio::test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    async fn sends_system_and_user_messages() {
        let delegate = ProviderDelegate::new(Scripted::new("{}"));
        let reply = delegate
            .process("extract this")
            .await
            .expect("scripted provider never fails");
        assert_eq!(reply, DelegateReply::Text("{}".to_string()));

        let seen = delegate.provider.seen.lock().expect("lock should not be poisoned");
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, vec![Role::System, Role::User]);
        assert_eq!(seen[0].1, "scripted-1");
    }

    #[tokio::test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    async fn blank_content_is_empty_reply() {
        let delegate = ProviderDelegate::new(Scripted::new("  \n"));
        let reply = delegate.process("x").await.expect("scripted provider never fails");
        assert_eq!(reply, DelegateReply::Empty);
    }

    #[tokio::test]
    async fn provider_answer_drives_extraction() {
        let provider =
            Scripted::new("```json\n{\"category\": \"spa\", \"vibe\": \"relaxed\"}\n```");
        let extractor = DelegateExtractor::new(ProviderDelegate::new(provider));
        let extraction = extractor.extract("somewhere to unwind").await;
        assert!(extraction.used_delegate());
        assert_eq!(extraction.parameters.category.as_deref(), Some("spa"));
        assert_eq!(extraction.parameters.vibe.as_deref(), Some("relaxed"));
    }
}
