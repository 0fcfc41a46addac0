//! The extraction seam shared by the pattern and delegate strategies.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::SearchParameters;

/// Which strategy produced an extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionSource {
    Pattern,
    Delegate,
}

/// Result of a single extraction call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub parameters: SearchParameters,
    pub source: ExtractionSource,
}

impl Extraction {
    #[must_use]
    pub const fn from_patterns(parameters: SearchParameters) -> Self {
        Self {
            parameters,
            source: ExtractionSource::Pattern,
        }
    }

    #[must_use]
    pub const fn from_delegate(parameters: SearchParameters) -> Self {
        Self {
            parameters,
            source: ExtractionSource::Delegate,
        }
    }

    #[must_use]
    pub fn used_delegate(&self) -> bool {
        self.source == ExtractionSource::Delegate
    }
}

/// Maps a free-text prompt to [`SearchParameters`].
///
/// Implementations are total: there is no error path, the worst outcome is an
/// all-absent record.
#[async_trait]
pub trait ParameterExtractor: Send + Sync {
    async fn extract(&self, prompt: &str) -> Extraction;

    /// Whether this extractor may route calls to an external delegate.
    fn uses_delegate(&self) -> bool {
        false
    }
}
