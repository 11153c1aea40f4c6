use crate::call::{PrivateCall, PublicCall};
use crate::shape::ShapeRule;

/// Ordered rule lists for one exchange.
///
/// Rules run prelude first, then the call's own list, each in order. Later rules see the
/// keys produced by earlier ones.
#[derive(Debug)]
pub struct ShapeTable {
    /// Top-level key a native body must carry for translation to run.
    pub marker: Option<&'static str>,
    pub prelude: &'static [ShapeRule],
    pub public: fn(PublicCall) -> &'static [ShapeRule],
    pub private: fn(PrivateCall) -> &'static [ShapeRule],
}

/// Exchanges whose bodies are already canonical.
pub static PASSTHROUGH: ShapeTable = ShapeTable {
    marker: None,
    prelude: &[],
    public: no_public_rules,
    private: no_private_rules,
};

pub static BITTREX: ShapeTable = ShapeTable {
    marker: Some("success"),
    prelude: &BITTREX_PRELUDE,
    public: bittrex_public,
    private: bittrex_private,
};

fn no_public_rules(_: PublicCall) -> &'static [ShapeRule] {
    &[]
}

fn no_private_rules(_: PrivateCall) -> &'static [ShapeRule] {
    &[]
}

const fn rename(from: &'static str, to: &'static str) -> ShapeRule {
    ShapeRule::rename(from, to)
}

const fn nested(parent: &'static str, from: &'static str, to: &'static str) -> ShapeRule {
    ShapeRule::RenameNested { parent, from, to }
}

const ACTIVE_FLAG: ShapeRule = ShapeRule::MapFlag {
    from: "IsActive",
    to: "Status",
    when_true: "OK",
    when_false: "Offline",
};

const WRAP_DATA: ShapeRule = ShapeRule::WrapInList { key: "Data" };

static BITTREX_PRELUDE: [ShapeRule; 3] = [
    rename("result", "Data"),
    rename("success", "Success"),
    rename("message", "Message"),
];

static BITTREX_CURRENCIES: [ShapeRule; 7] = [
    rename("CurrencyLong", "Name"),
    rename("Currency", "Symbol"),
    rename("MinConfirmation", "DepositConfirmations"),
    rename("TxFee", "WithdrawFee"),
    ACTIVE_FLAG,
    rename("CoinType", "Algorithm"),
    rename("Notice", "StatusMessage"),
];

// BaseCurrency must become BaseSymbol before BaseCurrencyLong takes its name.
static BITTREX_TRADE_PAIRS: [ShapeRule; 8] = [
    rename("MarketCurrencyLong", "Currency"),
    rename("MarketCurrency", "Symbol"),
    rename("BaseCurrency", "BaseSymbol"),
    rename("BaseCurrencyLong", "BaseCurrency"),
    rename("MinTradeSize", "MinimumBaseTrade"),
    rename("MarketName", "Label"),
    ACTIVE_FLAG,
    rename("Notice", "StatusMessage"),
];

// The single-market endpoint answers with a one-element list.
static BITTREX_MARKET: [ShapeRule; 5] = [
    ShapeRule::UnwrapSingleton { key: "Data" },
    rename("MarketName", "Label"),
    rename("Last", "LastPrice"),
    rename("Ask", "AskPrice"),
    rename("Bid", "BidPrice"),
];

static BITTREX_MARKETS: [ShapeRule; 4] = [
    rename("MarketName", "Label"),
    rename("Last", "LastPrice"),
    rename("Ask", "AskPrice"),
    rename("Bid", "BidPrice"),
];

static BITTREX_MARKET_HISTORY: [ShapeRule; 3] = [
    rename("Quantity", "Amount"),
    rename("OrderType", "Type"),
    rename("TimeStamp", "Timestamp"),
];

// Sides are renamed first so the nested rules can find them.
static BITTREX_MARKET_ORDERS: [ShapeRule; 6] = [
    rename("buy", "Buy"),
    rename("sell", "Sell"),
    nested("Buy", "Quantity", "Volume"),
    nested("Buy", "Rate", "Price"),
    nested("Sell", "Quantity", "Volume"),
    nested("Sell", "Rate", "Price"),
];

// Filtered balance, order and transaction queries return a single object; it is wrapped
// before any element rule runs.
static BITTREX_BALANCE: [ShapeRule; 5] = [
    WRAP_DATA,
    rename("Currency", "Symbol"),
    rename("Balance", "Total"),
    rename("Pending", "Unconfirmed"),
    rename("CryptoAddress", "Address"),
];

static BITTREX_TRADE_HISTORY: [ShapeRule; 7] = [
    WRAP_DATA,
    rename("OrderUuid", "TradeId"),
    rename("Exchange", "Market"),
    rename("OrderType", "Type"),
    rename("Quantity", "Amount"),
    rename("Price", "Rate"),
    rename("Commission", "Fee"),
];

static BITTREX_TRANSACTIONS: [ShapeRule; 7] = [
    WRAP_DATA,
    rename("PaymentUuid", "Id"),
    rename("LastUpdated", "Timestamp"),
    rename("Opened", "Timestamp"),
    ShapeRule::MapFlag {
        from: "Authorized",
        to: "Status",
        when_true: "Authorized",
        when_false: "Pending",
    },
    rename("TxCost", "Fee"),
    rename("CryptoAddress", "Address"),
];

fn bittrex_public(call: PublicCall) -> &'static [ShapeRule] {
    match call {
        PublicCall::GetCurrencies => &BITTREX_CURRENCIES,
        PublicCall::GetTradePairs => &BITTREX_TRADE_PAIRS,
        PublicCall::GetMarket => &BITTREX_MARKET,
        PublicCall::GetMarkets => &BITTREX_MARKETS,
        PublicCall::GetMarketHistory => &BITTREX_MARKET_HISTORY,
        PublicCall::GetMarketOrders => &BITTREX_MARKET_ORDERS,
    }
}

fn bittrex_private(call: PrivateCall) -> &'static [ShapeRule] {
    match call {
        PrivateCall::GetBalance => &BITTREX_BALANCE,
        PrivateCall::GetTradeHistory => &BITTREX_TRADE_HISTORY,
        PrivateCall::GetTransactions => &BITTREX_TRANSACTIONS,
        PrivateCall::GetDepositAddress
        | PrivateCall::CancelTrade
        | PrivateCall::GetOpenOrders
        | PrivateCall::SubmitTrade
        | PrivateCall::SubmitWithdraw => &[],
    }
}
