use std::fmt::{Display, Formatter};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{ExchangeTime, RecordId};

/// Listed currency.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Currency {
    pub id: Option<u64>,
    pub name: String,
    pub symbol: String,
    pub algorithm: String,
    pub withdraw_fee: Decimal,
    pub min_withdraw: Decimal,
    pub max_withdraw: Decimal,
    pub min_base_trade: Decimal,
    pub deposit_confirmations: u32,
    pub status: String,
    pub status_message: String,
    pub listing_status: String,
}

/// Tradable market listing with trading limits.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct TradePairInfo {
    pub id: Option<u64>,
    pub label: String,
    pub currency: String,
    pub symbol: String,
    pub base_currency: String,
    pub base_symbol: String,
    pub status: String,
    pub status_message: String,
    pub trade_fee: Decimal,
    pub minimum_trade: Decimal,
    pub maximum_trade: Decimal,
    pub minimum_base_trade: Decimal,
    pub maximum_base_trade: Decimal,
    pub minimum_price: Decimal,
    pub maximum_price: Decimal,
}

/// Market summary over the exchange's rolling window.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Market {
    pub trade_pair_id: Option<u64>,
    pub label: String,
    pub ask_price: Decimal,
    pub bid_price: Decimal,
    pub low: Decimal,
    pub high: Decimal,
    pub volume: Decimal,
    pub last_price: Decimal,
    pub buy_volume: Decimal,
    pub sell_volume: Decimal,
    /// Percent change against `prev_day`.
    pub change: Decimal,
    pub open: Decimal,
    pub close: Decimal,
    pub base_volume: Decimal,
    pub buy_base_volume: Decimal,
    pub sell_base_volume: Decimal,
    pub prev_day: Decimal,
    pub open_buy_orders: u32,
    pub open_sell_orders: u32,
}

/// One executed trade from a market's public history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct MarketTrade {
    pub id: Option<RecordId>,
    pub trade_pair_id: Option<u64>,
    pub label: String,
    #[serde(rename = "Type")]
    pub side: String,
    pub price: Decimal,
    pub amount: Decimal,
    pub total: Decimal,
    pub timestamp: Option<ExchangeTime>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct OrderBookEntry {
    pub trade_pair_id: Option<u64>,
    pub label: String,
    pub price: Decimal,
    pub volume: Decimal,
    pub total: Decimal,
}

/// Both sides of a market's order book.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct OrderBook {
    pub buy: Vec<OrderBookEntry>,
    pub sell: Vec<OrderBookEntry>,
}

/// Account balance for one currency.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Balance {
    pub currency_id: Option<u64>,
    pub symbol: String,
    pub total: Decimal,
    pub available: Decimal,
    pub unconfirmed: Decimal,
    pub held_for_trades: Decimal,
    pub pending_withdraw: Decimal,
    pub address: String,
    pub base_address: String,
    pub status: String,
    pub status_message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct DepositAddress {
    pub currency: String,
    pub address: String,
    pub base_address: String,
}

/// One of the account's own filled trades.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct TradeHistoryEntry {
    pub trade_id: Option<RecordId>,
    pub trade_pair_id: Option<u64>,
    pub market: String,
    #[serde(rename = "Type")]
    pub side: String,
    pub rate: Decimal,
    pub amount: Decimal,
    pub total: Decimal,
    pub fee: Decimal,
    pub time_stamp: Option<ExchangeTime>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct OpenOrder {
    pub order_id: Option<RecordId>,
    pub trade_pair_id: Option<u64>,
    pub market: String,
    #[serde(rename = "Type")]
    pub side: String,
    pub rate: Decimal,
    pub amount: Decimal,
    pub total: Decimal,
    pub remaining: Decimal,
    pub time_stamp: Option<ExchangeTime>,
}

/// Direction of a funds movement. Set by the adapter, never trusted from the exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionDirection {
    Deposit,
    #[serde(alias = "Withdraw", alias = "Withdrawl")]
    Withdrawal,
}

impl TransactionDirection {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Deposit => "Deposit",
            Self::Withdrawal => "Withdrawal",
        }
    }
}

impl Display for TransactionDirection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Deposit or withdrawal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Transaction {
    pub id: Option<RecordId>,
    pub currency: String,
    pub tx_id: String,
    #[serde(rename = "Type")]
    pub direction: Option<TransactionDirection>,
    pub amount: Decimal,
    pub fee: Decimal,
    pub status: String,
    pub confirmations: u32,
    pub timestamp: Option<ExchangeTime>,
    pub address: String,
}

/// Result of placing an order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct SubmitTradeOutcome {
    pub order_id: Option<RecordId>,
    pub filled_orders: Vec<RecordId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transaction_direction_accepts_exchange_spellings() {
        for raw in ["\"Withdraw\"", "\"Withdrawl\"", "\"Withdrawal\""] {
            let parsed: TransactionDirection = serde_json::from_str(raw).expect("must parse");
            assert_eq!(parsed, TransactionDirection::Withdrawal);
        }
        assert_eq!(
            serde_json::to_string(&TransactionDirection::Withdrawal).expect("serializes"),
            "\"Withdrawal\""
        );
    }

    #[test]
    fn market_trade_reads_canonical_fields() {
        let trade: MarketTrade = serde_json::from_str(
            r#"{"TradePairId":100,"Label":"BTC-LTC","Type":"Sell","Price":0.0025,"Amount":"12.5","Total":0.03125,"Timestamp":1404890370}"#,
        )
        .expect("trade should parse");

        assert_eq!(trade.trade_pair_id, Some(100));
        assert_eq!(trade.side, "Sell");
        assert_eq!(trade.price, Decimal::new(25, 4));
        assert_eq!(trade.amount, Decimal::new(125, 1));
        assert!(trade.timestamp.is_some());
    }
}
