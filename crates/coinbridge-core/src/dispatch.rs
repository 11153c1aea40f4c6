//! Request building and the call pipeline shared by all adapters.
//!
//! ```text
//! CallParams ─▶ RouteStyle ─▶ (private: credentials ─▶ RequestSigner) ─▶ HttpClient
//!                                                                          │
//!   ApiResponse<T> ◀── parse ◀── ShapeTranslator ◀── empty? "No Response." ◀┘
//! ```

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::call::{CallKind, PrivateCall, PublicCall};
use crate::envelope::parse_canonical;
use crate::shape::ShapeTranslator;
use crate::signing::RequestSigner;
use crate::{ApiResponse, ExchangeConfig, ExchangeError, ExchangeId, HttpClient, HttpRequest};

const PREVIEW_CHARS: usize = 160;

/// Exchange-agnostic parameters of one call; each [`RouteStyle`] picks what it needs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallParams {
    /// Endpoint name for styles that do not derive it from the call kind.
    pub operation: Option<&'static str>,
    pub segments: Vec<String>,
    pub query: Vec<(&'static str, String)>,
    pub body: Option<String>,
}

impl CallParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn operation(operation: &'static str) -> Self {
        Self {
            operation: Some(operation),
            ..Self::default()
        }
    }

    pub fn segment(mut self, segment: impl ToString) -> Self {
        self.segments.push(segment.to_string());
        self
    }

    pub fn query(mut self, name: &'static str, value: impl ToString) -> Self {
        self.query.push((name, value.to_string()));
        self
    }

    pub fn json_body<B: Serialize>(mut self, body: &B) -> Result<Self, ExchangeError> {
        let encoded = serde_json::to_string(body).map_err(|e| {
            ExchangeError::invalid_request(format!("failed to encode request body: {e}"))
        })?;
        self.body = Some(encoded);
        Ok(self)
    }

    /// `?a=1&b=2` with percent-encoded values, or empty.
    pub fn query_string(&self) -> String {
        if self.query.is_empty() {
            return String::new();
        }
        let pairs: Vec<String> = self
            .query
            .iter()
            .map(|(name, value)| format!("{name}={}", urlencoding::encode(value)))
            .collect();
        format!("?{}", pairs.join("&"))
    }
}

/// Per-exchange endpoint convention.
pub trait RouteStyle: Send + Sync {
    fn public_request(&self, base_url: &str, call: PublicCall, params: &CallParams) -> HttpRequest;

    /// Unsigned private request; the dispatcher signs it afterwards.
    fn private_request(
        &self,
        base_url: &str,
        call: PrivateCall,
        params: &CallParams,
    ) -> HttpRequest;
}

/// Runs calls for one exchange: build, sign, send, translate, parse.
#[derive(Clone)]
pub struct CallDispatcher {
    exchange: ExchangeId,
    config: ExchangeConfig,
    http_client: Arc<dyn HttpClient>,
    routes: Arc<dyn RouteStyle>,
    signer: Arc<dyn RequestSigner>,
    translator: ShapeTranslator,
}

impl CallDispatcher {
    pub fn new(
        exchange: ExchangeId,
        config: ExchangeConfig,
        http_client: Arc<dyn HttpClient>,
        routes: Arc<dyn RouteStyle>,
        signer: Arc<dyn RequestSigner>,
        translator: ShapeTranslator,
    ) -> Self {
        Self {
            exchange,
            config,
            http_client,
            routes,
            signer,
            translator,
        }
    }

    pub fn with_signer(mut self, signer: Arc<dyn RequestSigner>) -> Self {
        self.signer = signer;
        self
    }

    pub const fn exchange(&self) -> ExchangeId {
        self.exchange
    }

    pub fn config(&self) -> &ExchangeConfig {
        &self.config
    }

    pub async fn public<T>(
        &self,
        call: PublicCall,
        params: CallParams,
    ) -> Result<ApiResponse<T>, ExchangeError>
    where
        T: DeserializeOwned + Send,
    {
        let request = self
            .routes
            .public_request(&self.config.base_url, call, &params)
            .with_timeout_ms(self.config.timeout_ms);
        self.execute(CallKind::Public(call), request).await
    }

    /// Fails with a configuration error before any request is built when credentials are missing.
    pub async fn private<T>(
        &self,
        call: PrivateCall,
        params: CallParams,
    ) -> Result<ApiResponse<T>, ExchangeError>
    where
        T: DeserializeOwned + Send,
    {
        let credentials = self.config.require_credentials()?;
        let unsigned = self
            .routes
            .private_request(&self.config.base_url, call, &params)
            .with_timeout_ms(self.config.timeout_ms);
        let request = self.signer.sign(credentials, unsigned)?;
        self.execute(CallKind::Private(call), request).await
    }

    async fn execute<T>(
        &self,
        kind: CallKind,
        request: HttpRequest,
    ) -> Result<ApiResponse<T>, ExchangeError>
    where
        T: DeserializeOwned + Send,
    {
        debug!(
            exchange = %self.exchange,
            call = %kind,
            method = request.method.as_str(),
            path = request.path_for_log(),
            "dispatching exchange call"
        );

        let response = self.http_client.execute(request).await.map_err(|error| {
            ExchangeError::transport(format!("{kind} on {} failed: {error}", self.exchange))
        })?;

        if !response.is_success() {
            return Err(ExchangeError::transport(format!(
                "{kind} on {} returned HTTP {}",
                self.exchange, response.status
            )));
        }

        if response.body.trim().is_empty() {
            warn!(exchange = %self.exchange, call = %kind, "exchange returned an empty body");
            return Ok(ApiResponse::no_response());
        }

        let canonical = self.translator.translate(kind, &response.body);
        let parsed = parse_canonical::<T>(&canonical).map_err(|error| {
            if kind.is_private() {
                debug!(
                    exchange = %self.exchange,
                    call = %kind,
                    body_len = canonical.len(),
                    "response did not match canonical shape"
                );
            } else {
                debug!(
                    exchange = %self.exchange,
                    call = %kind,
                    preview = %preview(&canonical),
                    "response did not match canonical shape"
                );
            }
            ExchangeError::shape_mismatch(format!(
                "{kind} on {}: {}",
                self.exchange,
                error.message()
            ))
        })?;

        if let Some(reason) = parsed.error() {
            warn!(exchange = %self.exchange, call = %kind, reason, "exchange reported failure");
        }
        Ok(parsed)
    }
}

fn preview(body: &str) -> String {
    let mut chars = body.chars();
    let head: String = chars.by_ref().take(PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}
