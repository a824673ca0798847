//! API keys for the search and model endpoints.
//!
//! Keys live in a `secrecy` box and only leave it when a request is built.

use secrecy::{ExposeSecret, SecretBox};
use std::fmt;

/// An API key that redacts itself in `Debug` output.
pub struct ApiKey(SecretBox<str>);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(SecretBox::new(key.into().into_boxed_str()))
    }

    /// The raw key, for query parameters and bearer headers.
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }

    pub fn is_empty(&self) -> bool {
        self.expose().is_empty()
    }
}

impl Clone for ApiKey {
    fn clone(&self) -> Self {
        Self::new(self.expose())
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ApiKey")
            .field(&format_args!("[REDACTED]"))
            .finish()
    }
}

impl From<String> for ApiKey {
    fn from(key: String) -> Self {
        Self::new(key)
    }
}

impl From<&str> for ApiKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}
