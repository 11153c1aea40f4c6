use std::fmt::{Display, Formatter};

/// Unauthenticated market-data calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PublicCall {
    GetCurrencies,
    GetTradePairs,
    GetMarkets,
    GetMarket,
    GetMarketHistory,
    GetMarketOrders,
}

impl PublicCall {
    pub const ALL: [Self; 6] = [
        Self::GetCurrencies,
        Self::GetTradePairs,
        Self::GetMarkets,
        Self::GetMarket,
        Self::GetMarketHistory,
        Self::GetMarketOrders,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::GetCurrencies => "GetCurrencies",
            Self::GetTradePairs => "GetTradePairs",
            Self::GetMarkets => "GetMarkets",
            Self::GetMarket => "GetMarket",
            Self::GetMarketHistory => "GetMarketHistory",
            Self::GetMarketOrders => "GetMarketOrders",
        }
    }
}

impl Display for PublicCall {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Authenticated account-scoped calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrivateCall {
    CancelTrade,
    GetTradeHistory,
    GetOpenOrders,
    GetBalance,
    SubmitTrade,
    GetTransactions,
    GetDepositAddress,
    SubmitWithdraw,
}

impl PrivateCall {
    pub const ALL: [Self; 8] = [
        Self::CancelTrade,
        Self::GetTradeHistory,
        Self::GetOpenOrders,
        Self::GetBalance,
        Self::SubmitTrade,
        Self::GetTransactions,
        Self::GetDepositAddress,
        Self::SubmitWithdraw,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CancelTrade => "CancelTrade",
            Self::GetTradeHistory => "GetTradeHistory",
            Self::GetOpenOrders => "GetOpenOrders",
            Self::GetBalance => "GetBalance",
            Self::SubmitTrade => "SubmitTrade",
            Self::GetTransactions => "GetTransactions",
            Self::GetDepositAddress => "GetDepositAddress",
            Self::SubmitWithdraw => "SubmitWithdraw",
        }
    }
}

impl Display for PrivateCall {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Either call family; selects translation rules and whether signing applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallKind {
    Public(PublicCall),
    Private(PrivateCall),
}

impl CallKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Public(call) => call.as_str(),
            Self::Private(call) => call.as_str(),
        }
    }

    pub const fn is_private(self) -> bool {
        matches!(self, Self::Private(_))
    }
}

impl Display for CallKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<PublicCall> for CallKind {
    fn from(value: PublicCall) -> Self {
        Self::Public(value)
    }
}

impl From<PrivateCall> for CallKind {
    fn from(value: PrivateCall) -> Self {
        Self::Private(value)
    }
}
