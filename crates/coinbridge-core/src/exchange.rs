//! Exchange adapter contract and request types.
//!
//! This module defines the uniform surface (`Exchange`) that every exchange
//! implementation satisfies, along with the request types for each operation.
//!
//! # Operations
//!
//! | Operation | Request | Data | Access |
//! |-----------|---------|------|--------|
//! | Currencies | - | `Vec<Currency>` | public |
//! | Trade pairs | - | `Vec<TradePairInfo>` | public |
//! | Markets | [`MarketsRequest`] | `Vec<Market>` | public |
//! | Market | [`MarketRequest`] | `Market` | public |
//! | Market history | [`MarketHistoryRequest`] | `Vec<MarketTrade>` | public |
//! | Market orders | [`MarketOrdersRequest`] | `OrderBook` | public |
//! | Balances | [`BalanceRequest`] | `Vec<Balance>` | private |
//! | Deposit address | [`DepositAddressRequest`] | `DepositAddress` | private |
//! | Open orders | [`OpenOrdersRequest`] | `Vec<OpenOrder>` | private |
//! | Trade history | [`TradeHistoryRequest`] | `Vec<TradeHistoryEntry>` | private |
//! | Transactions | [`TransactionRequest`] | `Vec<Transaction>` | private |
//! | Submit trade | [`SubmitTradeRequest`] | `SubmitTradeOutcome` | private |
//! | Cancel trade | [`CancelTradeRequest`] | `Vec<RecordId>` | private |
//! | Submit withdraw | [`SubmitWithdrawRequest`] | `RecordId` | private |
//!
//! # Example
//!
//! ```rust,ignore
//! use coinbridge_core::{BittrexAdapter, Exchange, MarketRequest, TradePair};
//!
//! async fn last_price(adapter: &BittrexAdapter) -> Result<(), coinbridge_core::ExchangeError> {
//!     let pair = TradePair::new("BTC", "LTC")?;
//!     let response = adapter.market(MarketRequest::new(pair)).await?;
//!
//!     match response.data() {
//!         Some(market) => println!("{}: {}", market.label, market.last_price),
//!         None => println!("failed: {:?}", response.error()),
//!     }
//!     Ok(())
//! }
//! ```

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

use rust_decimal::Decimal;

use crate::domain::{
    Balance, Currency, CurrencyCode, CurrencyRef, DepositAddress, Market, MarketTrade, OpenOrder,
    OrderBook, RecordId, SubmitTradeOutcome, TradeHistoryEntry, TradePair, TradePairInfo,
    Transaction, TransactionDirection,
};
use crate::{ApiResponse, ExchangeError, ExchangeId, ValidationError};

/// Logical operation used for capability checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Currencies,
    TradePairs,
    Markets,
    Market,
    MarketHistory,
    MarketOrders,
    Balances,
    DepositAddress,
    OpenOrders,
    TradeHistory,
    Transactions,
    SubmitTrade,
    CancelTrade,
    SubmitWithdraw,
}

impl Operation {
    pub const ALL: [Self; 14] = [
        Self::Currencies,
        Self::TradePairs,
        Self::Markets,
        Self::Market,
        Self::MarketHistory,
        Self::MarketOrders,
        Self::Balances,
        Self::DepositAddress,
        Self::OpenOrders,
        Self::TradeHistory,
        Self::Transactions,
        Self::SubmitTrade,
        Self::CancelTrade,
        Self::SubmitWithdraw,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Currencies => "currencies",
            Self::TradePairs => "trade_pairs",
            Self::Markets => "markets",
            Self::Market => "market",
            Self::MarketHistory => "market_history",
            Self::MarketOrders => "market_orders",
            Self::Balances => "balances",
            Self::DepositAddress => "deposit_address",
            Self::OpenOrders => "open_orders",
            Self::TradeHistory => "trade_history",
            Self::Transactions => "transactions",
            Self::SubmitTrade => "submit_trade",
            Self::CancelTrade => "cancel_trade",
            Self::SubmitWithdraw => "submit_withdraw",
        }
    }

    const fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operations an exchange adapter implements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapabilitySet {
    bits: u16,
}

impl CapabilitySet {
    pub const fn none() -> Self {
        Self { bits: 0 }
    }

    pub const fn full() -> Self {
        let mut set = Self::none();
        let mut index = 0;
        while index < Operation::ALL.len() {
            set = set.with(Operation::ALL[index]);
            index += 1;
        }
        set
    }

    pub const fn with(self, operation: Operation) -> Self {
        Self {
            bits: self.bits | operation.bit(),
        }
    }

    pub const fn without(self, operation: Operation) -> Self {
        Self {
            bits: self.bits & !operation.bit(),
        }
    }

    pub const fn supports(self, operation: Operation) -> bool {
        self.bits & operation.bit() != 0
    }

    pub fn supported_operations(self) -> Vec<&'static str> {
        Operation::ALL
            .into_iter()
            .filter(|operation| self.supports(*operation))
            .map(Operation::as_str)
            .collect()
    }

    /// Fails with `UnsupportedOperation` when `operation` is missing.
    pub fn ensure(self, exchange: ExchangeId, operation: Operation) -> Result<(), ExchangeError> {
        if self.supports(operation) {
            Ok(())
        } else {
            Err(ExchangeError::unsupported_operation(exchange, operation))
        }
    }
}

/// Request payload for all market summaries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarketsRequest {
    pub hours: Option<u32>,
}

impl MarketsRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hours(mut self, hours: u32) -> Result<Self, ValidationError> {
        self.hours = Some(positive(hours, "hours")?);
        Ok(self)
    }
}

/// Request payload for one market summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketRequest {
    pub pair: TradePair,
    pub hours: Option<u32>,
}

impl MarketRequest {
    pub fn new(pair: TradePair) -> Self {
        Self { pair, hours: None }
    }

    pub fn with_hours(mut self, hours: u32) -> Result<Self, ValidationError> {
        self.hours = Some(positive(hours, "hours")?);
        Ok(self)
    }
}

/// Request payload for a market's public trade history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketHistoryRequest {
    pub pair: TradePair,
    pub hours: Option<u32>,
}

impl MarketHistoryRequest {
    pub fn new(pair: TradePair) -> Self {
        Self { pair, hours: None }
    }

    pub fn with_hours(mut self, hours: u32) -> Result<Self, ValidationError> {
        self.hours = Some(positive(hours, "hours")?);
        Ok(self)
    }
}

/// Request payload for a market's order book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketOrdersRequest {
    pub pair: TradePair,
    pub count: Option<u32>,
}

impl MarketOrdersRequest {
    pub fn new(pair: TradePair) -> Self {
        Self { pair, count: None }
    }

    pub fn with_count(mut self, count: u32) -> Result<Self, ValidationError> {
        self.count = Some(positive(count, "count")?);
        Ok(self)
    }
}

/// Request payload for balances: all currencies, or one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BalanceRequest {
    pub currency: Option<CurrencyRef>,
}

impl BalanceRequest {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn for_currency(currency: impl Into<CurrencyRef>) -> Self {
        Self {
            currency: Some(currency.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepositAddressRequest {
    pub currency: CurrencyRef,
}

impl DepositAddressRequest {
    pub fn new(currency: impl Into<CurrencyRef>) -> Self {
        Self {
            currency: currency.into(),
        }
    }
}

/// Request payload for resting orders, optionally limited to one market.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpenOrdersRequest {
    pub pair: Option<TradePair>,
    pub count: Option<u32>,
}

impl OpenOrdersRequest {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn for_pair(pair: TradePair) -> Self {
        Self {
            pair: Some(pair),
            count: None,
        }
    }

    pub fn with_count(mut self, count: u32) -> Result<Self, ValidationError> {
        self.count = Some(positive(count, "count")?);
        Ok(self)
    }
}

/// Request payload for the account's trade history, optionally limited to one market.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TradeHistoryRequest {
    pub pair: Option<TradePair>,
    pub count: Option<u32>,
}

impl TradeHistoryRequest {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn for_pair(pair: TradePair) -> Self {
        Self {
            pair: Some(pair),
            count: None,
        }
    }

    pub fn with_count(mut self, count: u32) -> Result<Self, ValidationError> {
        self.count = Some(positive(count, "count")?);
        Ok(self)
    }
}

/// Request payload for deposits and withdrawals.
///
/// Without a direction, adapters fetch withdrawals then deposits and concatenate them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionRequest {
    pub direction: Option<TransactionDirection>,
    pub currency: Option<CurrencyCode>,
    pub count: Option<u32>,
}

impl TransactionRequest {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn direction(direction: TransactionDirection) -> Self {
        Self {
            direction: Some(direction),
            ..Self::default()
        }
    }

    pub fn for_currency(mut self, currency: CurrencyCode) -> Self {
        self.currency = Some(currency);
        self
    }

    pub fn with_count(mut self, count: u32) -> Result<Self, ValidationError> {
        self.count = Some(positive(count, "count")?);
        Ok(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TradeSide {
    Buy,
    Sell,
}

impl TradeSide {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Buy => "Buy",
            Self::Sell => "Sell",
        }
    }
}

/// Request payload for placing a limit order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitTradeRequest {
    pub pair: TradePair,
    pub side: TradeSide,
    pub amount: Decimal,
    pub rate: Decimal,
}

impl SubmitTradeRequest {
    pub fn new(
        pair: TradePair,
        side: TradeSide,
        amount: Decimal,
        rate: Decimal,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            pair,
            side,
            amount: positive_decimal(amount, "amount")?,
            rate: positive_decimal(rate, "rate")?,
        })
    }
}

/// What to cancel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CancelTradeRequest {
    All,
    Order(RecordId),
    TradePair(TradePair),
}

/// Request payload for withdrawing funds to an external address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitWithdrawRequest {
    pub currency: CurrencyRef,
    pub amount: Decimal,
    pub address: String,
    pub payment_id: Option<String>,
}

impl SubmitWithdrawRequest {
    pub fn new(
        currency: impl Into<CurrencyRef>,
        amount: Decimal,
        address: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let address = address.into();
        if address.trim().is_empty() {
            return Err(ValidationError::EmptyField { field: "address" });
        }
        Ok(Self {
            currency: currency.into(),
            amount: positive_decimal(amount, "amount")?,
            address: address.trim().to_owned(),
            payment_id: None,
        })
    }

    pub fn with_payment_id(mut self, payment_id: impl Into<String>) -> Self {
        self.payment_id = Some(payment_id.into());
        self
    }
}

fn positive(value: u32, field: &'static str) -> Result<u32, ValidationError> {
    if value == 0 {
        return Err(ValidationError::NonPositiveValue { field });
    }
    Ok(value)
}

fn positive_decimal(value: Decimal, field: &'static str) -> Result<Decimal, ValidationError> {
    if value <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveValue { field });
    }
    Ok(value)
}

/// Boxed future returned by every [`Exchange`] operation.
pub type ExchangeFuture<'a, T> =
    Pin<Box<dyn Future<Output = Result<ApiResponse<T>, ExchangeError>> + Send + 'a>>;

/// Exchange adapter contract.
///
/// Every operation resolves to one of three outcomes:
///
/// - `Ok` with `Success = true` and populated `Data`
/// - `Ok` with `Success = false`: the exchange reported a failure, or the transport
///   returned an empty body (`Error = "No Response."`)
/// - `Err(ExchangeError)`: missing credentials, transport failure, a body that does not
///   fit the canonical shape, or an operation this exchange does not implement
///
/// [`ApiResponse::flatten`] folds the `Err` channel into the envelope when callers prefer
/// a single shape.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; one adapter serves many sequential calls.
pub trait Exchange: Send + Sync {
    fn id(&self) -> ExchangeId;

    fn capabilities(&self) -> CapabilitySet;

    /// The exchange's native label for `pair`, as sent on the wire.
    fn market_label(&self, pair: &TradePair) -> String;

    fn currencies<'a>(&'a self) -> ExchangeFuture<'a, Vec<Currency>>;

    fn trade_pairs<'a>(&'a self) -> ExchangeFuture<'a, Vec<TradePairInfo>>;

    /// Market summaries with `Change` filled in.
    fn markets<'a>(&'a self, req: MarketsRequest) -> ExchangeFuture<'a, Vec<Market>>;

    fn market<'a>(&'a self, req: MarketRequest) -> ExchangeFuture<'a, Market>;

    /// Public trades, each stamped with the pair's canonical label.
    fn market_history<'a>(
        &'a self,
        req: MarketHistoryRequest,
    ) -> ExchangeFuture<'a, Vec<MarketTrade>>;

    /// Order book rows, each stamped with the pair's canonical label and `Total`.
    fn market_orders<'a>(&'a self, req: MarketOrdersRequest) -> ExchangeFuture<'a, OrderBook>;

    fn balances<'a>(&'a self, req: BalanceRequest) -> ExchangeFuture<'a, Vec<Balance>>;

    fn deposit_address<'a>(
        &'a self,
        req: DepositAddressRequest,
    ) -> ExchangeFuture<'a, DepositAddress>;

    fn open_orders<'a>(&'a self, req: OpenOrdersRequest) -> ExchangeFuture<'a, Vec<OpenOrder>>;

    fn trade_history<'a>(
        &'a self,
        req: TradeHistoryRequest,
    ) -> ExchangeFuture<'a, Vec<TradeHistoryEntry>>;

    /// Deposits and withdrawals, each tagged with its direction by the adapter.
    fn transactions<'a>(
        &'a self,
        req: TransactionRequest,
    ) -> ExchangeFuture<'a, Vec<Transaction>>;

    fn submit_trade<'a>(
        &'a self,
        req: SubmitTradeRequest,
    ) -> ExchangeFuture<'a, SubmitTradeOutcome>;

    /// Ids of the cancelled orders.
    fn cancel_trade<'a>(&'a self, req: CancelTradeRequest) -> ExchangeFuture<'a, Vec<RecordId>>;

    /// Id of the created withdrawal.
    fn submit_withdraw<'a>(&'a self, req: SubmitWithdrawRequest) -> ExchangeFuture<'a, RecordId>;
}
