use std::fmt::{Debug, Formatter};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::{ExchangeError, ExchangeId, ValidationError};

const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Opaque API secret. Bytes are only handed to signers; `Debug` never prints them.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiSecret(Vec<u8>);

impl ApiSecret {
    pub fn new(secret: impl Into<String>) -> Result<Self, ValidationError> {
        let secret = secret.into();
        if secret.trim().is_empty() {
            return Err(ValidationError::EmptyApiSecret);
        }
        Ok(Self(secret.into_bytes()))
    }

    /// Raw UTF-8 bytes, used as the HMAC key by URL-signing exchanges.
    pub fn expose_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Decodes the secret as standard base64, used by exchanges that issue encoded keys.
    pub fn decode_base64(&self) -> Result<Vec<u8>, ExchangeError> {
        STANDARD
            .decode(self.0.as_slice())
            .map_err(|_| ExchangeError::configuration("api secret is not valid base64"))
    }
}

impl Debug for ApiSecret {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiSecret(<redacted>)")
    }
}

/// API key plus secret for private calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    api_key: String,
    api_secret: ApiSecret,
}

impl Credentials {
    pub fn new(
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ValidationError::EmptyApiKey);
        }
        Ok(Self {
            api_key: api_key.trim().to_owned(),
            api_secret: ApiSecret::new(api_secret)?,
        })
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn api_secret(&self) -> &ApiSecret {
        &self.api_secret
    }
}

/// Per-adapter settings: where to send requests, how long to wait, and who is calling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeConfig {
    pub base_url: String,
    pub credentials: Option<Credentials>,
    pub timeout_ms: u64,
}

impl ExchangeConfig {
    pub fn new(exchange: ExchangeId) -> Self {
        Self {
            base_url: exchange.default_base_url().to_owned(),
            credentials: None,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    /// Reads `COINBRIDGE_<EXCHANGE>_API_KEY`, `_API_SECRET` and `_BASE_URL`.
    pub fn from_env(exchange: ExchangeId) -> Self {
        Self::from_lookup(exchange, |name| std::env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable variable lookup.
    pub fn from_lookup(exchange: ExchangeId, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let prefix = format!("COINBRIDGE_{}", exchange.env_segment());
        let read = |suffix: &str| {
            lookup(&format!("{prefix}_{suffix}")).filter(|value| !value.trim().is_empty())
        };

        let mut config = Self::new(exchange);
        if let Some(base_url) = read("BASE_URL") {
            config = config.with_base_url(base_url);
        }
        if let (Some(key), Some(secret)) = (read("API_KEY"), read("API_SECRET")) {
            config.credentials = Credentials::new(key, secret).ok();
        }
        config
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Credentials required by a private call; missing ones fail before any request is built.
    pub fn require_credentials(&self) -> Result<&Credentials, ExchangeError> {
        self.credentials.as_ref().ok_or_else(|| {
            ExchangeError::configuration("private call requires an api key and secret")
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::ExchangeErrorKind;

    #[test]
    fn secret_debug_is_redacted() {
        let credentials = Credentials::new("key-1", "very-secret").expect("valid credentials");
        let rendered = format!("{credentials:?}");

        assert!(rendered.contains("key-1"));
        assert!(!rendered.contains("very-secret"));
    }

    #[test]
    fn rejects_blank_key_and_secret() {
        assert_eq!(
            Credentials::new("  ", "secret"),
            Err(ValidationError::EmptyApiKey)
        );
        assert_eq!(
            Credentials::new("key", ""),
            Err(ValidationError::EmptyApiSecret)
        );
    }

    #[test]
    fn invalid_base64_secret_is_configuration_error() {
        let secret = ApiSecret::new("not*base64!").expect("non-empty secret");
        let err = secret.decode_base64().expect_err("must fail");
        assert_eq!(err.kind(), ExchangeErrorKind::Configuration);
    }

    #[test]
    fn lookup_requires_both_key_and_secret() {
        let vars = HashMap::from([
            ("COINBRIDGE_BITTREX_API_KEY", "key"),
            ("COINBRIDGE_BITTREX_BASE_URL", "http://localhost:8080/"),
        ]);
        let config = ExchangeConfig::from_lookup(ExchangeId::Bittrex, |name| {
            vars.get(name).map(|value| (*value).to_owned())
        });

        assert_eq!(config.base_url, "http://localhost:8080");
        assert!(config.credentials.is_none());
        assert_eq!(
            config.require_credentials().expect_err("must fail").kind(),
            ExchangeErrorKind::Configuration
        );
    }

    #[test]
    fn lookup_builds_credentials() {
        let vars = HashMap::from([
            ("COINBRIDGE_CRYPTOPIA_API_KEY", "key"),
            ("COINBRIDGE_CRYPTOPIA_API_SECRET", "c2VjcmV0"),
        ]);
        let config = ExchangeConfig::from_lookup(ExchangeId::Cryptopia, |name| {
            vars.get(name).map(|value| (*value).to_owned())
        });

        assert_eq!(config.base_url, "https://www.cryptopia.co.nz");
        let credentials = config.require_credentials().expect("credentials set");
        assert_eq!(credentials.api_key(), "key");
    }
}
