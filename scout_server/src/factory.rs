use std::sync::Arc;

use scout_config::DelegateConfig;
use scout_extract::{DelegateExtractor, ParameterExtractor, PatternExtractor};
use scout_providers::{ProviderDelegate, ZhipuProvider};

/// Build the extractor for a resolved credential.
///
/// A credential with the delegate enabled gives an LLM-backed extractor that
/// falls back to patterns; anything else gives the pattern extractor.
#[must_use]
pub fn build_extractor(
    config: &DelegateConfig,
    api_key: Option<&str>,
) -> Arc<dyn ParameterExtractor> {
    match api_key {
        Some(key) if config.enabled => {
            let provider = ZhipuProvider::new(key.to_string())
                .with_base_url(config.base_url.clone())
                .with_model(config.model.clone());
            Arc::new(
                DelegateExtractor::new(ProviderDelegate::new(provider))
                    .with_timeout(config.timeout()),
            )
        }
        _ => Arc::new(PatternExtractor::new()),
    }
}
