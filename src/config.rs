//! Configuration for the remote sample store

use std::time::Duration;

use url::Url;

use crate::error::{Error, Result};

/// Connection settings for the remote store.
///
/// The service URL and access key are the two values the subsystem needs
/// from its environment. They are passed in explicitly (or read once via
/// [`StoreConfig::from_env`]) rather than consulted globally, so tests can
/// construct stores against arbitrary endpoints.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Base URL of the Supabase project
    pub url: Url,
    /// API key sent with every request
    pub api_key: String,
    /// Optional per-request timeout; requests wait indefinitely when unset
    pub request_timeout: Option<Duration>,
}

impl StoreConfig {
    /// Create a new configuration, validating the URL
    pub fn new(url: &str, api_key: &str) -> Result<Self> {
        let url = Url::parse(url)?;
        if api_key.is_empty() {
            return Err(Error::config("api key cannot be empty"));
        }
        Ok(Self {
            url,
            api_key: api_key.to_string(),
            request_timeout: None,
        })
    }

    /// Read `SUPABASE_URL` and `SUPABASE_KEY` from the process environment
    pub fn from_env() -> Result<Self> {
        let url = std::env::var("SUPABASE_URL")
            .map_err(|_| Error::config("SUPABASE_URL environment variable not found"))?;
        let api_key = std::env::var("SUPABASE_KEY")
            .map_err(|_| Error::config("SUPABASE_KEY environment variable not found"))?;
        Self::new(&url, &api_key)
    }

    /// Set the per-request timeout
    pub fn with_request_timeout(mut self, value: Option<Duration>) -> Self {
        self.request_timeout = value;
        self
    }
}
