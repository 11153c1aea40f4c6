//! Request signing for private calls.
//!
//! Two independent schemes are provided:
//!
//! | Signer | Nonce | Signature | Transport |
//! |--------|-------|-----------|-----------|
//! | [`UrlHmacSigner`] | increasing tick count ([`TickNonce`]) | uppercase hex HMAC-SHA512 of the full URL | `apisign` header, key and nonce in the query |
//! | [`AmxSigner`] | random 128-bit token ([`RandomNonce`]) | base64 HMAC-SHA256 of key, method, encoded URI, nonce and body MD5 | `Authorization: amx key:sig:nonce` |
//!
//! Signers hold no credentials. Secrets are borrowed from [`Credentials`] for the
//! duration of one `sign` call and nothing derived from them is logged.

mod amx;
mod nonce;
mod url_hmac;

pub use amx::{amx_signature, content_hash, encode_uri, AmxSigner};
pub use nonce::{NonceSource, RandomNonce, TickNonce, UNIX_EPOCH_TICKS};
pub use url_hmac::{append_key_and_nonce, url_signature, UrlHmacSigner, SIGNATURE_HEADER};

use crate::{Credentials, ExchangeError, HttpRequest};

/// Attaches authentication to an outgoing private request.
pub trait RequestSigner: Send + Sync {
    /// A fresh nonce for one request.
    fn next_nonce(&self) -> String;

    /// Signs `request` using a caller-supplied nonce. Pure: no state is touched.
    fn sign_with_nonce(
        &self,
        credentials: &Credentials,
        request: HttpRequest,
        nonce: &str,
    ) -> Result<HttpRequest, ExchangeError>;

    fn sign(
        &self,
        credentials: &Credentials,
        request: HttpRequest,
    ) -> Result<HttpRequest, ExchangeError> {
        let nonce = self.next_nonce();
        self.sign_with_nonce(credentials, request, &nonce)
    }
}
