use std::sync::Arc;

use crate::call::{PrivateCall, PublicCall};
use crate::derive::{
    fill_market_change, merge_transactions, stamp_direction, stamp_order_book, trade_total,
};
use crate::dispatch::{CallDispatcher, CallParams, RouteStyle};
use crate::domain::{
    Balance, Currency, CurrencyCode, CurrencyRef, DepositAddress, Market, MarketTrade, OpenOrder,
    OrderBook, RecordId, SubmitTradeOutcome, TradeHistoryEntry, TradePair, TradePairInfo,
    Transaction, TransactionDirection,
};
use crate::exchange::{
    BalanceRequest, CancelTradeRequest, CapabilitySet, DepositAddressRequest, Exchange,
    ExchangeFuture, MarketHistoryRequest, MarketOrdersRequest, MarketRequest, MarketsRequest,
    OpenOrdersRequest, Operation, SubmitTradeRequest, SubmitWithdrawRequest, TradeHistoryRequest,
    TransactionRequest,
};
use crate::http_client::{HttpClient, HttpRequest, ReqwestHttpClient};
use crate::shape::{ShapeTranslator, BITTREX};
use crate::signing::{NonceSource, UrlHmacSigner};
use crate::{ApiResponse, ExchangeConfig, ExchangeError, ExchangeId};

const API_VERSION: &str = "v1.1";

const CAPABILITIES: CapabilitySet = CapabilitySet::full()
    .without(Operation::OpenOrders)
    .without(Operation::SubmitTrade)
    .without(Operation::CancelTrade)
    .without(Operation::SubmitWithdraw);

/// Path-and-query endpoints: `/api/v1.1/{public|account}/{operation}?...`.
#[derive(Debug, Default, Clone, Copy)]
pub struct BittrexRoutes;

impl BittrexRoutes {
    const fn public_operation(call: PublicCall) -> &'static str {
        match call {
            PublicCall::GetCurrencies => "getcurrencies",
            PublicCall::GetTradePairs => "getmarkets",
            PublicCall::GetMarkets => "getmarketsummaries",
            PublicCall::GetMarket => "getmarketsummary",
            PublicCall::GetMarketHistory => "getmarkethistory",
            PublicCall::GetMarketOrders => "getorderbook",
        }
    }

    const fn private_operation(call: PrivateCall) -> &'static str {
        match call {
            PrivateCall::GetBalance => "getbalances",
            PrivateCall::GetDepositAddress => "getdepositaddress",
            PrivateCall::GetTradeHistory => "getorderhistory",
            PrivateCall::GetTransactions => "getdeposithistory",
            PrivateCall::GetOpenOrders => "getopenorders",
            PrivateCall::SubmitTrade => "submittrade",
            PrivateCall::CancelTrade => "cancel",
            PrivateCall::SubmitWithdraw => "withdraw",
        }
    }
}

impl RouteStyle for BittrexRoutes {
    fn public_request(&self, base_url: &str, call: PublicCall, params: &CallParams) -> HttpRequest {
        let operation = params
            .operation
            .unwrap_or_else(|| Self::public_operation(call));
        HttpRequest::get(format!(
            "{base_url}/api/{API_VERSION}/public/{operation}{}",
            params.query_string()
        ))
    }

    fn private_request(
        &self,
        base_url: &str,
        call: PrivateCall,
        params: &CallParams,
    ) -> HttpRequest {
        let operation = params
            .operation
            .unwrap_or_else(|| Self::private_operation(call));
        HttpRequest::get(format!(
            "{base_url}/api/{API_VERSION}/account/{operation}{}",
            params.query_string()
        ))
        .with_header("accept", "application/json")
    }
}

/// Bittrex adapter: URL-signed GET calls and translated response shapes.
#[derive(Clone)]
pub struct BittrexAdapter {
    dispatcher: CallDispatcher,
}

impl Default for BittrexAdapter {
    fn default() -> Self {
        Self::new(ExchangeConfig::from_env(ExchangeId::Bittrex))
    }
}

impl BittrexAdapter {
    pub fn new(config: ExchangeConfig) -> Self {
        Self::with_http_client(config, Arc::new(ReqwestHttpClient::new()))
    }

    pub fn with_http_client(config: ExchangeConfig, http_client: Arc<dyn HttpClient>) -> Self {
        Self {
            dispatcher: CallDispatcher::new(
                ExchangeId::Bittrex,
                config,
                http_client,
                Arc::new(BittrexRoutes),
                Arc::new(UrlHmacSigner::new()),
                ShapeTranslator::new(&BITTREX),
            ),
        }
    }

    pub fn with_nonce_source(mut self, nonces: Arc<dyn NonceSource>) -> Self {
        self.dispatcher = self
            .dispatcher
            .with_signer(Arc::new(UrlHmacSigner::with_nonce_source(nonces)));
        self
    }

    fn currency_symbol(currency: &CurrencyRef) -> Result<&CurrencyCode, ExchangeError> {
        match currency {
            CurrencyRef::Code(code) => Ok(code),
            CurrencyRef::Id(id) => Err(ExchangeError::invalid_request(format!(
                "bittrex addresses currencies by symbol, not id {id}"
            ))),
        }
    }

    /// Summaries always cover the last 24 hours; any other window is refused.
    fn reject_hours(hours: Option<u32>) -> Result<(), ExchangeError> {
        match hours {
            Some(hours) => Err(ExchangeError::invalid_request(format!(
                "bittrex does not filter by hours (requested {hours})"
            ))),
            None => Ok(()),
        }
    }

    /// One history leg, stamped with its direction and cut to `count` before any merge.
    async fn transactions_leg(
        &self,
        direction: TransactionDirection,
        currency: Option<&CurrencyCode>,
        count: Option<u32>,
    ) -> Result<ApiResponse<Vec<Transaction>>, ExchangeError> {
        let operation = match direction {
            TransactionDirection::Withdrawal => "getwithdrawalhistory",
            TransactionDirection::Deposit => "getdeposithistory",
        };
        let mut params = CallParams::operation(operation);
        if let Some(currency) = currency {
            params = params.query("currency", currency);
        }
        let response: ApiResponse<Vec<Transaction>> = self
            .dispatcher
            .private(PrivateCall::GetTransactions, params)
            .await?;
        Ok(response.map_data(|mut entries| {
            if let Some(count) = count {
                entries.truncate(count as usize);
            }
            stamp_direction(&mut entries, direction);
            entries
        }))
    }

    /// Operations without a Bittrex endpoint; the refusal comes from the capability set.
    fn unsupported<'a, T: Send + 'a>(&'a self, operation: Operation) -> ExchangeFuture<'a, T> {
        Box::pin(async move {
            CAPABILITIES.ensure(self.id(), operation)?;
            Err(ExchangeError::unsupported_operation(self.id(), operation))
        })
    }
}

impl Exchange for BittrexAdapter {
    fn id(&self) -> ExchangeId {
        ExchangeId::Bittrex
    }

    fn capabilities(&self) -> CapabilitySet {
        CAPABILITIES
    }

    fn market_label(&self, pair: &TradePair) -> String {
        pair.label()
    }

    fn currencies<'a>(&'a self) -> ExchangeFuture<'a, Vec<Currency>> {
        Box::pin(async move {
            self.dispatcher
                .public(PublicCall::GetCurrencies, CallParams::new())
                .await
        })
    }

    fn trade_pairs<'a>(&'a self) -> ExchangeFuture<'a, Vec<TradePairInfo>> {
        Box::pin(async move {
            self.dispatcher
                .public(PublicCall::GetTradePairs, CallParams::new())
                .await
        })
    }

    fn markets<'a>(&'a self, req: MarketsRequest) -> ExchangeFuture<'a, Vec<Market>> {
        Box::pin(async move {
            Self::reject_hours(req.hours)?;
            let response: ApiResponse<Vec<Market>> = self
                .dispatcher
                .public(PublicCall::GetMarkets, CallParams::new())
                .await?;
            Ok(response.map_data(|mut markets| {
                markets.iter_mut().for_each(fill_market_change);
                markets
            }))
        })
    }

    fn market<'a>(&'a self, req: MarketRequest) -> ExchangeFuture<'a, Market> {
        Box::pin(async move {
            Self::reject_hours(req.hours)?;
            let params = CallParams::new().query("market", self.market_label(&req.pair));
            let response: ApiResponse<Market> =
                self.dispatcher.public(PublicCall::GetMarket, params).await?;
            Ok(response.map_data(|mut market| {
                fill_market_change(&mut market);
                market
            }))
        })
    }

    fn market_history<'a>(
        &'a self,
        req: MarketHistoryRequest,
    ) -> ExchangeFuture<'a, Vec<MarketTrade>> {
        Box::pin(async move {
            Self::reject_hours(req.hours)?;
            let label = req.pair.label();
            let params = CallParams::new().query("market", self.market_label(&req.pair));
            let response: ApiResponse<Vec<MarketTrade>> = self
                .dispatcher
                .public(PublicCall::GetMarketHistory, params)
                .await?;
            Ok(response.map_data(|mut trades| {
                for trade in &mut trades {
                    trade.label = label.clone();
                }
                trades
            }))
        })
    }

    fn market_orders<'a>(&'a self, req: MarketOrdersRequest) -> ExchangeFuture<'a, OrderBook> {
        Box::pin(async move {
            let label = req.pair.label();
            let params = CallParams::new()
                .query("market", self.market_label(&req.pair))
                .query("type", "both");
            let response: ApiResponse<OrderBook> = self
                .dispatcher
                .public(PublicCall::GetMarketOrders, params)
                .await?;
            Ok(response.map_data(|mut book| {
                if let Some(count) = req.count {
                    let count = count as usize;
                    book.buy.truncate(count);
                    book.sell.truncate(count);
                }
                stamp_order_book(&mut book, &label);
                book
            }))
        })
    }

    fn balances<'a>(&'a self, req: BalanceRequest) -> ExchangeFuture<'a, Vec<Balance>> {
        Box::pin(async move {
            let params = match &req.currency {
                Some(currency) => CallParams::operation("getbalance")
                    .query("currency", Self::currency_symbol(currency)?),
                None => CallParams::operation("getbalances"),
            };
            self.dispatcher.private(PrivateCall::GetBalance, params).await
        })
    }

    fn deposit_address<'a>(
        &'a self,
        req: DepositAddressRequest,
    ) -> ExchangeFuture<'a, DepositAddress> {
        Box::pin(async move {
            let params = CallParams::operation("getdepositaddress")
                .query("currency", Self::currency_symbol(&req.currency)?);
            self.dispatcher
                .private(PrivateCall::GetDepositAddress, params)
                .await
        })
    }

    fn open_orders<'a>(&'a self, req: OpenOrdersRequest) -> ExchangeFuture<'a, Vec<OpenOrder>> {
        let _ = req;
        self.unsupported(Operation::OpenOrders)
    }

    fn trade_history<'a>(
        &'a self,
        req: TradeHistoryRequest,
    ) -> ExchangeFuture<'a, Vec<TradeHistoryEntry>> {
        Box::pin(async move {
            let mut params = CallParams::operation("getorderhistory");
            if let Some(pair) = &req.pair {
                params = params.query("market", self.market_label(pair));
            }
            let response: ApiResponse<Vec<TradeHistoryEntry>> = self
                .dispatcher
                .private(PrivateCall::GetTradeHistory, params)
                .await?;
            Ok(response.map_data(|mut trades| {
                if let Some(count) = req.count {
                    trades.truncate(count as usize);
                }
                for trade in &mut trades {
                    trade.total = trade_total(trade.amount, trade.rate, trade.fee);
                }
                trades
            }))
        })
    }

    fn transactions<'a>(
        &'a self,
        req: TransactionRequest,
    ) -> ExchangeFuture<'a, Vec<Transaction>> {
        Box::pin(async move {
            let currency = req.currency.as_ref();
            match req.direction {
                Some(direction) => self.transactions_leg(direction, currency, req.count).await,
                None => {
                    let withdrawals = self
                        .transactions_leg(TransactionDirection::Withdrawal, currency, req.count)
                        .await?;
                    if !withdrawals.is_success() {
                        return Ok(withdrawals);
                    }
                    let deposits = self
                        .transactions_leg(TransactionDirection::Deposit, currency, req.count)
                        .await?;
                    Ok(merge_transactions(withdrawals, deposits))
                }
            }
        })
    }

    fn submit_trade<'a>(
        &'a self,
        req: SubmitTradeRequest,
    ) -> ExchangeFuture<'a, SubmitTradeOutcome> {
        let _ = req;
        self.unsupported(Operation::SubmitTrade)
    }

    fn cancel_trade<'a>(&'a self, req: CancelTradeRequest) -> ExchangeFuture<'a, Vec<RecordId>> {
        let _ = req;
        self.unsupported(Operation::CancelTrade)
    }

    fn submit_withdraw<'a>(&'a self, req: SubmitWithdrawRequest) -> ExchangeFuture<'a, RecordId> {
        let _ = req;
        self.unsupported(Operation::SubmitWithdraw)
    }
}
