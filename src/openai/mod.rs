//! OpenAI completions API client.

pub mod client;

use async_trait::async_trait;

use crate::error::CompletionError;

pub use client::{CompletionClient, DEFAULT_BASE_URL, DEFAULT_MODEL, SamplingParams};

/// Completion service the suggestion engine talks to.
///
/// Takes a prompt and a desired completion count, returns the raw
/// completion texts. A rate-limit response (HTTP 429) is signalled as
/// [`CompletionError::RateLimited`], separately from other failures, so
/// the caller can refresh its credential and retry.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionBackend {
    async fn complete(
        &self,
        credential: &str,
        prompt: &str,
        count: u32,
    ) -> Result<Vec<String>, CompletionError>;
}
