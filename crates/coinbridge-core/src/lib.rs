//! # Coinbridge Core
//!
//! One exchange-agnostic contract over crypto exchange REST APIs with incompatible
//! JSON schemas, signing schemes and endpoint conventions.
//!
//! ## Overview
//!
//! - **Canonical domain models** for currencies, markets, order books, balances and orders
//! - **Shape translation** from each exchange's native JSON to the canonical field names
//! - **Request signing** for private calls (URL HMAC-SHA512 and `amx` HMAC-SHA256)
//! - **Call dispatch** with per-exchange endpoint conventions
//! - **Exchange adapters** behind the [`Exchange`] trait
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | Exchange adapters (Bittrex, Cryptopia) |
//! | [`call`] | Public and private call kinds |
//! | [`config`] | Base URLs, credentials and timeouts |
//! | [`derive`] | Fields computed after parsing (`Change`, `Total`, merges) |
//! | [`dispatch`] | Request building and the shared call pipeline |
//! | [`domain`] | Canonical models and identifiers |
//! | [`envelope`] | Canonical `Success`/`Error`/`Data` response |
//! | [`error`] | Error types |
//! | [`exchange`] | The [`Exchange`] trait, request types and capabilities |
//! | [`http_client`] | HTTP client abstraction |
//! | [`shape`] | Ordered response-shape rule tables |
//! | [`signing`] | Request signers and nonce sources |
//! | [`source`] | Exchange identifiers |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use coinbridge_core::{BittrexAdapter, Exchange, MarketRequest, TradePair};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let adapter = BittrexAdapter::default();
//!
//!     let request = MarketRequest::new(TradePair::new("BTC", "LTC")?);
//!     let response = adapter.market(request).await?;
//!
//!     match response.data() {
//!         Some(market) => println!("{} last {} ({}%)", market.label, market.last_price, market.change),
//!         None => println!("failed: {:?}", response.error()),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  Caller         │
//! └────────┬────────┘
//!          │ canonical request
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ Exchange        │────▶│ Call Dispatcher  │
//! │ (Adapter Trait) │     │ (RouteStyle)     │
//! └────────┬────────┘     └────────┬─────────┘
//!          │                       │ private only
//!          │                       ▼
//!          │              ┌──────────────────┐     ┌──────────────────┐
//!          │              │ Request Signer   │────▶│ HTTP Client      │
//!          │              └──────────────────┘     │ (reqwest/none)   │
//!          │                                       └────────┬─────────┘
//!          │                                                ▼
//!          │              ┌──────────────────┐     ┌──────────────────┐
//!          │◀─────────────│ Envelope Parser  │◀────│ Shape Translator │
//!          │              └──────────────────┘     └──────────────────┘
//!          ▼
//! ┌─────────────────┐
//! │ Derived fields  │
//! │ (Change, Total) │
//! └─────────────────┘
//! ```
//!
//! ## Error Handling
//!
//! Remote failures and empty bodies come back as `Success=false` envelopes. Everything
//! else is an [`ExchangeError`]:
//!
//! ```rust
//! use coinbridge_core::{ExchangeError, ExchangeErrorKind};
//!
//! fn handle_error(error: ExchangeError) {
//!     match error.kind() {
//!         ExchangeErrorKind::Configuration => {
//!             // Supply credentials
//!         }
//!         ExchangeErrorKind::UnsupportedOperation => {
//!             // Use another exchange
//!         }
//!         ExchangeErrorKind::Transport => {
//!             // Caller decides whether to retry
//!         }
//!         _ => {}
//!     }
//! }
//! ```
//!
//! ## Security
//!
//! - API keys are read from environment variables or passed in explicitly
//! - Secrets, signatures and nonces are never logged
//! - Private call URLs are logged without their query string
//! - HTTPS goes through reqwest with its default TLS backend

pub mod adapters;
pub mod call;
pub mod config;
pub mod derive;
pub mod dispatch;
pub mod domain;
pub mod envelope;
pub mod error;
pub mod exchange;
pub mod http_client;
pub mod shape;
pub mod signing;
pub mod source;

#[cfg(test)]
mod test_support;

// Adapter implementations
pub use adapters::{adapter_for, BittrexAdapter, CryptopiaAdapter};

// Call kinds
pub use call::{CallKind, PrivateCall, PublicCall};

// Configuration
pub use config::{ApiSecret, Credentials, ExchangeConfig};

// Domain models
pub use domain::{
    Balance, Currency, CurrencyCode, CurrencyRef, DepositAddress, ExchangeTime, Market,
    MarketTrade, OpenOrder, OrderBook, OrderBookEntry, RecordId, SubmitTradeOutcome,
    TradeHistoryEntry, TradePair, TradePairInfo, Transaction, TransactionDirection,
};

// Envelope types
pub use envelope::{ApiResponse, NO_RESPONSE};

// Error types
pub use error::{ExchangeError, ExchangeErrorKind, ValidationError};

// Exchange trait and request types
pub use exchange::{
    BalanceRequest, CancelTradeRequest, CapabilitySet, DepositAddressRequest, Exchange,
    ExchangeFuture, MarketHistoryRequest, MarketOrdersRequest, MarketRequest, MarketsRequest,
    OpenOrdersRequest, Operation, SubmitTradeRequest, SubmitWithdrawRequest, TradeHistoryRequest,
    TradeSide, TransactionRequest,
};

// HTTP client types
pub use http_client::{
    HttpAuth, HttpClient, HttpError, HttpMethod, HttpRequest, HttpResponse, NoopHttpClient,
    ReqwestHttpClient,
};

// Signing
pub use signing::{AmxSigner, NonceSource, RandomNonce, RequestSigner, TickNonce, UrlHmacSigner};

// Exchange identifiers
pub use source::ExchangeId;
