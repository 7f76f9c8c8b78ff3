//! Persisted user configuration.
//!
//! A single TOML file in the per-user config directory holds the API key
//! (the only persisted secret) and an optional default model override.
//! Edits are format-preserving so user comments survive key rewrites.

pub mod credentials;

use std::io::Write;
use std::path::{Path, PathBuf};

use toml_edit::DocumentMut;
use tracing::debug;

use crate::error::ConfigError;

pub use credentials::{Credential, CredentialStore};

const API_KEY: &str = "api_key";
const MODEL: &str = "model";

/// Handle to the process-wide configuration store.
///
/// Injected into the components that need it so credential refresh and
/// concurrent invocations are testable by substitution.
pub trait ConfigStore {
    /// The persisted API key, if a non-empty one is present.
    fn api_key(&self) -> Option<String>;

    /// Persist a new API key, outliving this invocation.
    fn set_api_key(&mut self, value: &str) -> Result<(), ConfigError>;
}

/// TOML-file-backed configuration.
pub struct FileConfig {
    path: PathBuf,
    doc: DocumentMut,
}

impl FileConfig {
    /// Default config file location: `<config_dir>/mantis/config.toml`.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_dir()
            .map(|dir| dir.join("mantis").join("config.toml"))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Load the config from `path`. A missing file is an empty config.
    pub fn load(path: PathBuf) -> Result<Self, ConfigError> {
        let doc = match std::fs::read_to_string(&path) {
            Ok(text) => text
                .parse::<DocumentMut>()
                .map_err(|e| ConfigError::Parse {
                    path: path.display().to_string(),
                    source: e,
                })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("no config file at {}, starting empty", path.display());
                DocumentMut::new()
            }
            Err(e) => {
                return Err(ConfigError::Read {
                    path: path.display().to_string(),
                    source: e,
                });
            }
        };

        Ok(Self { path, doc })
    }

    /// Load the config from the default location.
    pub fn load_default() -> Result<Self, ConfigError> {
        Self::load(Self::default_path()?)
    }

    /// The configured default model, if set.
    pub fn model(&self) -> Option<String> {
        self.doc
            .get(MODEL)
            .and_then(|v| v.as_str())
            .filter(|s| !s.is_empty())
            .map(String::from)
    }

    fn write_error(&self, source: std::io::Error) -> ConfigError {
        ConfigError::Write {
            path: self.path.display().to_string(),
            source,
        }
    }

    /// Write the document back atomically: tempfile in the target
    /// directory, then rename over the config file.
    fn save(&self) -> Result<(), ConfigError> {
        let parent = self.path.parent().unwrap_or(Path::new("."));
        std::fs::create_dir_all(parent).map_err(|e| self.write_error(e))?;

        let mut tmp =
            tempfile::NamedTempFile::new_in(parent).map_err(|e| self.write_error(e))?;
        tmp.write_all(self.doc.to_string().as_bytes())
            .map_err(|e| self.write_error(e))?;
        tmp.persist(&self.path)
            .map_err(|e| self.write_error(e.error))?;

        Ok(())
    }
}

impl ConfigStore for FileConfig {
    fn api_key(&self) -> Option<String> {
        self.doc
            .get(API_KEY)
            .and_then(|v| v.as_str())
            .filter(|s| !s.is_empty())
            .map(String::from)
    }

    fn set_api_key(&mut self, value: &str) -> Result<(), ConfigError> {
        self.doc[API_KEY] = toml_edit::value(value);
        self.save()
    }
}
