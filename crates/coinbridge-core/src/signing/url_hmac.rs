use std::sync::Arc;

use hmac::{Hmac, Mac};
use sha2::Sha512;

use crate::signing::{NonceSource, RequestSigner, TickNonce};
use crate::{Credentials, ExchangeError, HttpAuth, HttpRequest};

type HmacSha512 = Hmac<Sha512>;

/// Header carrying the URL signature.
pub const SIGNATURE_HEADER: &str = "apisign";

/// Uppercase hex HMAC-SHA512 of the complete URL, keyed by the raw secret bytes.
pub fn url_signature(secret: &[u8], url: &str) -> Result<String, ExchangeError> {
    let mut mac = HmacSha512::new_from_slice(secret).map_err(|e| {
        ExchangeError::configuration(format!("failed to create HMAC signer: {e}"))
    })?;
    mac.update(url.as_bytes());
    Ok(hex::encode_upper(mac.finalize().into_bytes()))
}

/// Appends `apikey` and `nonce` to the query string.
pub fn append_key_and_nonce(url: &str, api_key: &str, nonce: &str) -> String {
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{url}{separator}apikey={api_key}&nonce={nonce}")
}

/// Hash-of-URL scheme: key and nonce are embedded in the query, then the whole URL is
/// signed and the signature travels in the `apisign` header.
#[derive(Clone)]
pub struct UrlHmacSigner {
    nonces: Arc<dyn NonceSource>,
}

impl UrlHmacSigner {
    pub fn new() -> Self {
        Self::with_nonce_source(Arc::new(TickNonce::new()))
    }

    pub fn with_nonce_source(nonces: Arc<dyn NonceSource>) -> Self {
        Self { nonces }
    }
}

impl Default for UrlHmacSigner {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestSigner for UrlHmacSigner {
    fn next_nonce(&self) -> String {
        self.nonces.next_nonce()
    }

    fn sign_with_nonce(
        &self,
        credentials: &Credentials,
        mut request: HttpRequest,
        nonce: &str,
    ) -> Result<HttpRequest, ExchangeError> {
        request.url = append_key_and_nonce(&request.url, credentials.api_key(), nonce);
        let signature = url_signature(credentials.api_secret().expose_bytes(), &request.url)?;
        Ok(request.with_auth(&HttpAuth::header(SIGNATURE_HEADER, signature)))
    }
}
