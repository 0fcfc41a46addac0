#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

//! Search-parameter extraction: table-driven pattern matching with an
//! optional delegate that always degrades to the patterns.

pub mod cache;
pub mod delegate;
pub mod engine;
pub mod patterns;

pub use cache::{DEFAULT_CACHE_CAPACITY, DEFAULT_CACHE_KEY, ExtractorCache};
pub use delegate::{
    DEFAULT_DELEGATE_TIMEOUT, Delegate, DelegateError, DelegateExtractor, DelegateReply,
    build_instruction, decode_reply,
};
pub use engine::PatternExtractor;
pub use scout_core::{Extraction, ExtractionSource, ParameterExtractor, SearchParameters};
