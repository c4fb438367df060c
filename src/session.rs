//! Explicit session state for talking to the REST store
//!
//! A [`Session`] is built once from settings and command-line flags and
//! handed to whatever needs to reach the store. The aggregation engine never
//! sees it.

use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::config::Settings;
use crate::error::{FinanceError, FinanceResult};

/// A bearer token that is wiped from memory on drop
///
/// Never printed: both `Debug` and `Display` redact the contents.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretString {
    inner: String,
}

impl SecretString {
    pub fn new(s: impl Into<String>) -> Self {
        Self { inner: s.into() }
    }

    /// Borrow the secret; keep the borrow short
    pub fn expose(&self) -> &str {
        &self.inner
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl From<String> for SecretString {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for SecretString {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretString")
            .field("len", &self.inner.len())
            .finish()
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED {} bytes]", self.inner.len())
    }
}

/// Who is talking to which store
#[derive(Debug, Clone)]
pub struct Session {
    api_base_url: String,
    user_id: String,
    token: Option<SecretString>,
}

impl Session {
    /// Create a session; a trailing slash on the base URL is dropped
    pub fn new(
        api_base_url: impl Into<String>,
        user_id: impl Into<String>,
        token: Option<SecretString>,
    ) -> FinanceResult<Self> {
        let api_base_url = api_base_url.into().trim().trim_end_matches('/').to_string();
        if !(api_base_url.starts_with("http://") || api_base_url.starts_with("https://")) {
            return Err(FinanceError::Config(format!(
                "API URL must start with http:// or https:// (got '{}')",
                api_base_url
            )));
        }

        let user_id = user_id.into().trim().to_string();
        if user_id.is_empty() {
            return Err(FinanceError::Config(
                "No user configured. Pass --user or set FINTRACK_USER".into(),
            ));
        }

        let token = token.filter(|t| !t.is_empty());

        Ok(Self {
            api_base_url,
            user_id,
            token,
        })
    }

    /// Build a session from settings, letting explicit values override them
    pub fn from_settings(
        settings: &Settings,
        api_url: Option<String>,
        user: Option<String>,
        token: Option<SecretString>,
    ) -> FinanceResult<Self> {
        let api_base_url = api_url.unwrap_or_else(|| settings.api_base_url.clone());
        let user_id = user
            .or_else(|| settings.user_id.clone())
            .unwrap_or_default();
        Self::new(api_base_url, user_id, token)
    }

    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn token(&self) -> Option<&SecretString> {
        self.token.as_ref()
    }

    /// Absolute URL for an API path such as `/api/expenses`
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base_url, path.trim_start_matches('/'))
    }
}
