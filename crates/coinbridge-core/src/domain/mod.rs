//! # Domain Models
//!
//! Canonical types every exchange adapter produces, whatever the exchange's native JSON.
//!
//! ## Models
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Currency`] | Listed currency with fees and status |
//! | [`TradePairInfo`] | Market listing with trading limits |
//! | [`Market`] | Market summary, including derived `Change` |
//! | [`MarketTrade`] | Public trade history row |
//! | [`OrderBook`] | Buy/sell [`OrderBookEntry`] rows with derived `Total` |
//! | [`Balance`] | Account balance per currency |
//! | [`DepositAddress`] | Deposit address per currency |
//! | [`TradeHistoryEntry`] | Account trade history row |
//! | [`Transaction`] | Deposit or withdrawal tagged by [`TransactionDirection`] |
//! | [`OpenOrder`] | Resting account order |
//! | [`SubmitTradeOutcome`] | Result of placing an order |
//!
//! ## Identifiers
//!
//! - [`TradePair`] - instrument with canonical `BASE-CURRENCY` label
//! - [`CurrencyCode`] / [`CurrencyRef`] - validated ticker, or exchange numeric id
//! - [`RecordId`] - numeric or UUID record identifier
//! - [`ExchangeTime`] - UTC timestamp parsed from the exchanges' offset-less ISO strings
//!
//! Records deserialize with every field optional: an exchange that omits a field yields
//! the field's default rather than a parse failure.

mod lookup;
mod models;
mod pair;
mod record_id;
mod timestamp;

pub use lookup::{currencies_by_symbol, markets_by_label, trade_pairs_by_label};
pub use models::{
    Balance, Currency, DepositAddress, Market, MarketTrade, OpenOrder, OrderBook, OrderBookEntry,
    SubmitTradeOutcome, TradeHistoryEntry, TradePairInfo, Transaction, TransactionDirection,
};
pub use pair::{CurrencyCode, CurrencyRef, TradePair};
pub use record_id::RecordId;
pub use timestamp::ExchangeTime;
