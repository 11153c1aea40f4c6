use coinbridge_core::signing::{amx_signature, content_hash, encode_uri, url_signature};
use coinbridge_core::{
    BalanceRequest, CurrencyRef, Exchange, ExchangeErrorKind, ExchangeId, RandomNonce,
    RequestSigner, TickNonce, UrlHmacSigner,
};
use coinbridge_tests::{
    bittrex, cryptopia, Arc, Credentials, FixedNonce, ScriptedHttpClient, BITTREX_KEY,
    BITTREX_SECRET, CRYPTOPIA_KEY, FIXED_NONCE,
};

const BALANCES_SIGNATURE: &str = "FDE305F8553291D53C2E4A59DF900B74C7A41D372101D8DAF98EEC4E9FF934AD2EC24A36112E403FAE8168CD7E8E3AFF5661F80EBCA82E7F576DEB83B0A0A54C";
const BTC_BALANCE_SIGNATURE: &str = "513CB0EA95ED9F4B5429984817EA1A1FDF39E1C0EA7C152CE08FDC3BD1157C3CD401D9BFB232E05FE70CFB27F45F0002DC1A91B49182F8CA33B63899B9D2ED5C";
const AMX_BALANCE_SIGNATURE: &str = "1LR7bUpdyIMDYaDbt+k5yt3qFLZvtotL/jZx6Xk5mo0=";
const AMX_EMPTY_BODY_SIGNATURE: &str = "Qrl4Oo3eG3TUasjhGZAiarP32aVLpaxAn8l0pxeFDr4=";
const AMX_SECRET_BYTES: &[u8] = b"secret-key-bytes";
const CRYPTOPIA_BALANCE_URI: &str = "https://www.cryptopia.co.nz/Api/GetBalance";

const EMPTY_BALANCES: &str = r#"{"success":true,"message":"","result":[]}"#;

#[tokio::test]
async fn bittrex_all_balances_matches_pinned_vector() {
    let client = Arc::new(ScriptedHttpClient::new().respond(EMPTY_BALANCES));
    let adapter = bittrex(client.clone())
        .with_nonce_source(Arc::new(FixedNonce("636000000000000000")));

    let response = adapter
        .balances(BalanceRequest::all())
        .await
        .expect("balances call should succeed");
    assert!(response.is_success());

    let request = &client.requests()[0];
    assert_eq!(
        request.url,
        "https://bittrex.com/api/v1.1/account/getbalances?apikey=bittrex-key&nonce=636000000000000000"
    );
    assert_eq!(
        request.headers.get("apisign").map(String::as_str),
        Some(BALANCES_SIGNATURE)
    );
}

#[tokio::test]
async fn bittrex_filtered_balance_signs_currency_in_query() {
    let client = Arc::new(ScriptedHttpClient::new().respond(
        r#"{"success":true,"message":"","result":{"Currency":"BTC","Balance":0,"Available":0,"Pending":0}}"#,
    ));
    let adapter = bittrex(client.clone())
        .with_nonce_source(Arc::new(FixedNonce("636000000000000001")));
    let currency = CurrencyRef::code("BTC").expect("valid code");

    adapter
        .balances(BalanceRequest::for_currency(currency))
        .await
        .expect("balance call should succeed");

    let request = &client.requests()[0];
    assert_eq!(
        request.url,
        "https://bittrex.com/api/v1.1/account/getbalance?currency=BTC&apikey=bittrex-key&nonce=636000000000000001"
    );
    assert_eq!(
        request.headers.get("apisign").map(String::as_str),
        Some(BTC_BALANCE_SIGNATURE)
    );
}

#[test]
fn url_signature_is_pure() {
    let url = "https://bittrex.com/api/v1.1/account/getbalances?apikey=bittrex-key&nonce=636000000000000000";
    let first = url_signature(BITTREX_SECRET.as_bytes(), url).expect("signature");
    let second = url_signature(BITTREX_SECRET.as_bytes(), url).expect("signature");

    assert_eq!(first, second);
    assert_eq!(first, BALANCES_SIGNATURE);
    assert_eq!(first.len(), 128);
    assert!(first.chars().all(|ch| ch.is_ascii_digit() || ch.is_ascii_uppercase()));
}

#[test]
fn url_signer_uses_fresh_increasing_nonces() {
    let signer = UrlHmacSigner::with_nonce_source(Arc::new(TickNonce::new()));
    let credentials = Credentials::new(BITTREX_KEY, BITTREX_SECRET).expect("credentials");

    let first = signer
        .sign(
            &credentials,
            coinbridge_core::HttpRequest::get("https://bittrex.com/api/v1.1/account/getbalances"),
        )
        .expect("signed");
    let second = signer
        .sign(
            &credentials,
            coinbridge_core::HttpRequest::get("https://bittrex.com/api/v1.1/account/getbalances"),
        )
        .expect("signed");

    let nonce = |url: &str| -> u64 {
        url.rsplit("nonce=")
            .next()
            .and_then(|value| value.parse().ok())
            .expect("numeric nonce")
    };
    assert!(nonce(&second.url) > nonce(&first.url));
    assert_ne!(first.headers.get("apisign"), second.headers.get("apisign"));
}

#[tokio::test]
async fn cryptopia_balance_matches_pinned_vector() {
    let client = Arc::new(
        ScriptedHttpClient::new().respond(r#"{"Success":true,"Error":null,"Data":[]}"#),
    );
    let adapter = cryptopia(client.clone()).with_nonce_source(Arc::new(FixedNonce(FIXED_NONCE)));
    let currency = CurrencyRef::code("BTC").expect("valid code");

    adapter
        .balances(BalanceRequest::for_currency(currency))
        .await
        .expect("balance call should succeed");

    let request = &client.requests()[0];
    assert_eq!(request.url, CRYPTOPIA_BALANCE_URI);
    assert_eq!(request.body.as_deref(), Some(r#"{"Currency":"BTC"}"#));
    assert_eq!(
        request.headers.get("authorization").cloned(),
        Some(format!(
            "amx {CRYPTOPIA_KEY}:{AMX_BALANCE_SIGNATURE}:{FIXED_NONCE}"
        ))
    );
}

#[test]
fn amx_inputs_are_byte_exact() {
    assert_eq!(
        encode_uri(CRYPTOPIA_BALANCE_URI),
        "https%3a%2f%2fwww.cryptopia.co.nz%2fapi%2fgetbalance"
    );
    assert_eq!(
        content_hash(Some(r#"{"Currency":"BTC"}"#)),
        "doXgX1stGoLPbxEecbhr+Q=="
    );
    assert_eq!(content_hash(None), "");
    assert_eq!(
        amx_signature(
            CRYPTOPIA_KEY,
            AMX_SECRET_BYTES,
            CRYPTOPIA_BALANCE_URI,
            FIXED_NONCE,
            None
        )
        .expect("signature"),
        AMX_EMPTY_BODY_SIGNATURE
    );
}

#[test]
fn amx_random_nonces_change_the_signature() {
    let nonces = RandomNonce;
    let first = coinbridge_core::NonceSource::next_nonce(&nonces);
    let second = coinbridge_core::NonceSource::next_nonce(&nonces);
    assert_ne!(first, second);

    let body = Some(r#"{"Currency":"BTC"}"#);
    let sign = |nonce: &str| {
        amx_signature(CRYPTOPIA_KEY, AMX_SECRET_BYTES, CRYPTOPIA_BALANCE_URI, nonce, body)
            .expect("signature")
    };
    assert_ne!(sign(&first), sign(&second));
}

#[tokio::test]
async fn cryptopia_secret_must_be_base64() {
    let client = Arc::new(ScriptedHttpClient::new());
    let config = coinbridge_core::ExchangeConfig::new(ExchangeId::Cryptopia).with_credentials(
        Credentials::new(CRYPTOPIA_KEY, "not base64!").expect("non-empty credentials"),
    );
    let adapter = coinbridge_core::CryptopiaAdapter::with_http_client(config, client.clone());

    let err = adapter
        .balances(BalanceRequest::all())
        .await
        .expect_err("undecodable secret must fail");

    assert_eq!(err.kind(), ExchangeErrorKind::Configuration);
    assert!(client.requests().is_empty());
}
