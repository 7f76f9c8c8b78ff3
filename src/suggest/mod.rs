//! Suggestion engine: turn a staged diff into ranked commit-message
//! candidates via the completion service.

pub mod candidates;
pub mod prompt;

use tracing::debug;

use crate::config::{ConfigStore, Credential, CredentialStore};
use crate::error::{CompletionError, SuggestionError};
use crate::host::{Host, Notice};
use crate::openai::CompletionBackend;

pub use candidates::{SuggestionCandidate, rank_unique, strip_rank};
pub use prompt::build_prompt;

pub struct SuggestionEngine<'a, B: CompletionBackend + ?Sized> {
    backend: &'a B,
}

impl<'a, B: CompletionBackend + ?Sized> SuggestionEngine<'a, B> {
    pub fn new(backend: &'a B) -> Self {
        Self { backend }
    }

    /// Request `count` completions for `diff` and shape them into ranked,
    /// deduplicated candidates.
    ///
    /// On a rate-limit failure the user is told the credential expired and
    /// asked for a new one; with a fresh credential the whole request is
    /// retried exactly once. A declined refresh or a second rate limit
    /// yields `None` (no suggestions). Any other failure propagates.
    pub async fn generate<C: ConfigStore>(
        &self,
        credentials: &mut CredentialStore<C>,
        host: &dyn Host,
        credential: Credential,
        diff: &str,
        count: u32,
    ) -> Result<Option<Vec<SuggestionCandidate>>, SuggestionError> {
        let prompt = build_prompt(diff);
        let mut credential = credential;
        let mut refreshed = false;

        // Explicit bound: at most one refresh-and-retry cycle, regardless
        // of how the backend keeps failing.
        loop {
            match self
                .backend
                .complete(credential.secret(), &prompt, count)
                .await
            {
                Ok(texts) => {
                    let ranked = rank_unique(texts);
                    debug!(candidates = ranked.len(), "completions ranked");
                    return Ok(Some(ranked));
                }
                Err(CompletionError::RateLimited) => {
                    if refreshed {
                        debug!("rate limited again after credential refresh");
                        return Ok(None);
                    }
                    refreshed = true;

                    host.notify(
                        Notice::Error,
                        "The API key was rejected (rate limited or expired). Enter a new key to retry.",
                    );

                    match credentials.get_credential(host, true)? {
                        Some(fresh) => credential = fresh,
                        None => return Ok(None),
                    }
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
}
