use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use hmac::{Hmac, Mac};
use md5::{Digest, Md5};
use sha2::Sha256;

use crate::signing::{NonceSource, RandomNonce, RequestSigner};
use crate::{Credentials, ExchangeError, HttpAuth, HttpRequest};

type HmacSha256 = Hmac<Sha256>;

/// Base64 MD5 of the body, or an empty string when there is no body.
pub fn content_hash(body: Option<&str>) -> String {
    body.map(|body| STANDARD.encode(Md5::digest(body.as_bytes())))
        .unwrap_or_default()
}

/// Lower-cases the absolute URI and percent-encodes it with lowercase escapes.
///
/// Every byte outside the unreserved set is escaped, including `!*()`, and a space
/// becomes `%20`. Exchanges that sign with form-style encoding (`+` for space, `!*()`
/// left bare) agree only on URIs built from unreserved characters and `:/.`.
pub fn encode_uri(uri: &str) -> String {
    urlencoding::encode(&uri.to_lowercase()).to_lowercase()
}

/// Base64 HMAC-SHA256 over `key + "POST" + encoded uri + nonce + content hash`.
pub fn amx_signature(
    api_key: &str,
    secret: &[u8],
    uri: &str,
    nonce: &str,
    body: Option<&str>,
) -> Result<String, ExchangeError> {
    let payload = format!(
        "{api_key}POST{}{nonce}{}",
        encode_uri(uri),
        content_hash(body)
    );
    let mut mac = HmacSha256::new_from_slice(secret).map_err(|e| {
        ExchangeError::configuration(format!("failed to create HMAC signer: {e}"))
    })?;
    mac.update(payload.as_bytes());
    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}

/// Composite-signature scheme sent as `Authorization: amx key:signature:nonce`.
///
/// The secret is base64 key material; a secret that does not decode is a configuration error.
#[derive(Clone)]
pub struct AmxSigner {
    nonces: Arc<dyn NonceSource>,
}

impl AmxSigner {
    pub fn new() -> Self {
        Self::with_nonce_source(Arc::new(RandomNonce))
    }

    pub fn with_nonce_source(nonces: Arc<dyn NonceSource>) -> Self {
        Self { nonces }
    }
}

impl Default for AmxSigner {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestSigner for AmxSigner {
    fn next_nonce(&self) -> String {
        self.nonces.next_nonce()
    }

    fn sign_with_nonce(
        &self,
        credentials: &Credentials,
        request: HttpRequest,
        nonce: &str,
    ) -> Result<HttpRequest, ExchangeError> {
        let secret = credentials.api_secret().decode_base64()?;
        let signature = amx_signature(
            credentials.api_key(),
            &secret,
            &request.url,
            nonce,
            request.body.as_deref(),
        )?;
        let value = format!("amx {}:{signature}:{nonce}", credentials.api_key());
        Ok(request.with_auth(&HttpAuth::header("authorization", value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ExchangeErrorKind;

    const URI: &str = "https://www.cryptopia.co.nz/Api/GetBalance";
    const NONCE: &str = "0123456789abcdef0123456789abcdef";
    const SECRET: &[u8] = b"secret-key-bytes";

    #[test]
    fn encodes_uri_lowercase() {
        assert_eq!(
            encode_uri(URI),
            "https%3a%2f%2fwww.cryptopia.co.nz%2fapi%2fgetbalance"
        );
    }

    #[test]
    fn hashes_body_with_md5() {
        assert_eq!(
            content_hash(Some(r#"{"Currency":"BTC"}"#)),
            "doXgX1stGoLPbxEecbhr+Q=="
        );
        assert_eq!(content_hash(None), "");
    }

    #[test]
    fn signature_matches_regression_vectors() {
        let with_body = amx_signature("cryptopia-key", SECRET, URI, NONCE, Some(r#"{"Currency":"BTC"}"#))
            .expect("must sign");
        assert_eq!(with_body, "1LR7bUpdyIMDYaDbt+k5yt3qFLZvtotL/jZx6Xk5mo0=");

        let without_body =
            amx_signature("cryptopia-key", SECRET, URI, NONCE, None).expect("must sign");
        assert_eq!(without_body, "Qrl4Oo3eG3TUasjhGZAiarP32aVLpaxAn8l0pxeFDr4=");
    }

    #[test]
    fn fresh_nonces_change_the_signature() {
        let credentials =
            Credentials::new("cryptopia-key", "c2VjcmV0LWtleS1ieXRlcw==").expect("credentials");
        let signer = AmxSigner::new();
        let request = HttpRequest::post(URI).with_body(r#"{"Currency":"BTC"}"#);

        let first = signer.sign(&credentials, request.clone()).expect("must sign");
        let second = signer.sign(&credentials, request).expect("must sign");

        assert_ne!(
            first.headers.get("authorization"),
            second.headers.get("authorization")
        );
    }

    #[test]
    fn header_carries_key_signature_and_nonce() {
        let credentials =
            Credentials::new("cryptopia-key", "c2VjcmV0LWtleS1ieXRlcw==").expect("credentials");
        let request = HttpRequest::post(URI).with_body(r#"{"Currency":"BTC"}"#);

        let signed = AmxSigner::new()
            .sign_with_nonce(&credentials, request, NONCE)
            .expect("must sign");

        assert_eq!(
            signed.headers.get("authorization").map(String::as_str),
            Some(
                "amx cryptopia-key:1LR7bUpdyIMDYaDbt+k5yt3qFLZvtotL/jZx6Xk5mo0=:0123456789abcdef0123456789abcdef"
            )
        );
    }

    #[test]
    fn undecodable_secret_is_configuration_error() {
        let credentials = Credentials::new("cryptopia-key", "%%%").expect("credentials");
        let err = AmxSigner::new()
            .sign_with_nonce(&credentials, HttpRequest::post(URI), NONCE)
            .expect_err("must fail");
        assert_eq!(err.kind(), ExchangeErrorKind::Configuration);
    }
}
