//! API credential acquisition and persistence.

use std::fmt;

use crate::config::ConfigStore;
use crate::error::CredentialError;
use crate::host::Host;

/// An opaque API secret.
///
/// The `Debug` form never prints the value.
#[derive(Clone)]
pub struct Credential(String);

impl Credential {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn secret(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(..)")
    }
}

/// Obtains the API credential, soliciting and persisting it when needed.
///
/// The backing [`ConfigStore`] is the only persistent state this component
/// touches, and it is only ever overwritten with a non-empty, user-supplied
/// value.
pub struct CredentialStore<C: ConfigStore> {
    config: C,
}

impl<C: ConfigStore> CredentialStore<C> {
    pub fn new(config: C) -> Self {
        Self { config }
    }

    /// Return the credential, prompting the user when none is persisted or
    /// when `force_refresh` asks for a fresh one.
    ///
    /// Returns `None` when the user cancels the prompt or submits an empty
    /// value; nothing is persisted in that case.
    pub fn get_credential(
        &mut self,
        host: &dyn Host,
        force_refresh: bool,
    ) -> Result<Option<Credential>, CredentialError> {
        if !force_refresh {
            if let Some(key) = self.config.api_key() {
                return Ok(Some(Credential(key)));
            }
        }

        let Some(entered) = host.prompt_secret("Enter your OpenAI API key")? else {
            return Ok(None);
        };

        let entered = entered.trim().to_string();
        if entered.is_empty() {
            return Ok(None);
        }

        self.config.set_api_key(&entered)?;
        Ok(Some(Credential(entered)))
    }
}
