use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::call::{PrivateCall, PublicCall};
use crate::derive::{merge_transactions, stamp_direction, stamp_order_book};
use crate::dispatch::{CallDispatcher, CallParams, RouteStyle};
use crate::domain::{
    Balance, Currency, CurrencyCode, CurrencyRef, DepositAddress, Market, MarketTrade, OpenOrder,
    OrderBook, RecordId, SubmitTradeOutcome, TradeHistoryEntry, TradePair, TradePairInfo,
    Transaction, TransactionDirection,
};
use crate::exchange::{
    BalanceRequest, CancelTradeRequest, CapabilitySet, DepositAddressRequest, Exchange,
    ExchangeFuture, MarketHistoryRequest, MarketOrdersRequest, MarketRequest, MarketsRequest,
    OpenOrdersRequest, SubmitTradeRequest, SubmitWithdrawRequest, TradeHistoryRequest,
    TransactionRequest,
};
use crate::http_client::{HttpClient, HttpRequest, ReqwestHttpClient};
use crate::shape::ShapeTranslator;
use crate::signing::{AmxSigner, NonceSource};
use crate::{ApiResponse, ExchangeConfig, ExchangeError, ExchangeId};

/// Path-segment GETs for public calls, JSON POSTs for private ones.
#[derive(Debug, Default, Clone, Copy)]
pub struct CryptopiaRoutes;

impl RouteStyle for CryptopiaRoutes {
    fn public_request(&self, base_url: &str, call: PublicCall, params: &CallParams) -> HttpRequest {
        let mut url = format!("{base_url}/Api/{call}");
        for segment in &params.segments {
            url.push('/');
            url.push_str(&urlencoding::encode(segment));
        }
        HttpRequest::get(url)
    }

    fn private_request(
        &self,
        base_url: &str,
        call: PrivateCall,
        params: &CallParams,
    ) -> HttpRequest {
        HttpRequest::post(format!("{base_url}/Api/{call}"))
            .with_header("content-type", "application/json; charset=utf-8")
            .with_body(params.body.clone().unwrap_or_else(|| "{}".to_owned()))
    }
}

/// `LTC/BTC` to `BTC-LTC`; labels already canonical pass through.
pub fn canonical_label(native: &str) -> String {
    match native.split_once('/') {
        Some((currency, base)) => format!("{base}-{currency}"),
        None => native.to_owned(),
    }
}

/// Public path segment for a market: the numeric id when known, else `LTC_BTC`.
fn market_segment(pair: &TradePair) -> String {
    match pair.id {
        Some(id) => id.to_string(),
        None => format!("{}_{}", pair.currency, pair.base),
    }
}

fn native_market(pair: &TradePair) -> String {
    format!("{}/{}", pair.currency, pair.base)
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
struct CurrencyBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    currency_id: Option<u64>,
}

impl CurrencyBody {
    fn from_ref(currency: Option<&CurrencyRef>) -> Self {
        match currency {
            Some(CurrencyRef::Code(code)) => Self {
                currency: Some(code.to_string()),
                currency_id: None,
            },
            Some(CurrencyRef::Id(id)) => Self {
                currency: None,
                currency_id: Some(*id),
            },
            None => Self::default(),
        }
    }
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
struct MarketBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    market: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    trade_pair_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    count: Option<u32>,
}

impl MarketBody {
    fn new(pair: Option<&TradePair>, count: Option<u32>) -> Self {
        match pair {
            Some(TradePair { id: Some(id), .. }) => Self {
                market: None,
                trade_pair_id: Some(*id),
                count,
            },
            Some(pair) => Self {
                market: Some(native_market(pair)),
                trade_pair_id: None,
                count,
            },
            None => Self {
                count,
                ..Self::default()
            },
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct TransactionsBody {
    #[serde(rename = "Type")]
    direction: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    count: Option<u32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct SubmitTradeBody {
    #[serde(flatten)]
    market: MarketBody,
    #[serde(rename = "Type")]
    side: &'static str,
    #[serde(with = "rust_decimal::serde::float")]
    rate: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    amount: Decimal,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct CancelTradeBody {
    #[serde(rename = "Type")]
    scope: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    order_id: Option<RecordId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    trade_pair_id: Option<u64>,
}

impl CancelTradeBody {
    fn from_request(req: &CancelTradeRequest) -> Result<Self, ExchangeError> {
        Ok(match req {
            CancelTradeRequest::All => Self {
                scope: "All",
                order_id: None,
                trade_pair_id: None,
            },
            CancelTradeRequest::Order(order_id) => Self {
                scope: "Trade",
                order_id: Some(order_id.clone()),
                trade_pair_id: None,
            },
            CancelTradeRequest::TradePair(pair) => {
                let id = pair.id.ok_or_else(|| {
                    ExchangeError::invalid_request(format!(
                        "cancelling by trade pair needs the numeric id of {pair}"
                    ))
                })?;
                Self {
                    scope: "TradePair",
                    order_id: None,
                    trade_pair_id: Some(id),
                }
            }
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct SubmitWithdrawBody {
    #[serde(flatten)]
    currency: CurrencyBody,
    address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    payment_id: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    amount: Decimal,
}

/// Cryptopia adapter: canonical-shaped bodies, HMAC-SHA256 `amx` authorization.
#[derive(Clone)]
pub struct CryptopiaAdapter {
    dispatcher: CallDispatcher,
}

impl Default for CryptopiaAdapter {
    fn default() -> Self {
        Self::new(ExchangeConfig::from_env(ExchangeId::Cryptopia))
    }
}

impl CryptopiaAdapter {
    pub fn new(config: ExchangeConfig) -> Self {
        Self::with_http_client(config, Arc::new(ReqwestHttpClient::new()))
    }

    pub fn with_http_client(config: ExchangeConfig, http_client: Arc<dyn HttpClient>) -> Self {
        Self {
            dispatcher: CallDispatcher::new(
                ExchangeId::Cryptopia,
                config,
                http_client,
                Arc::new(CryptopiaRoutes),
                Arc::new(AmxSigner::new()),
                ShapeTranslator::passthrough(),
            ),
        }
    }

    pub fn with_nonce_source(mut self, nonces: Arc<dyn NonceSource>) -> Self {
        self.dispatcher = self
            .dispatcher
            .with_signer(Arc::new(AmxSigner::with_nonce_source(nonces)));
        self
    }

    /// One history leg, filtered by currency and then cut to `count`.
    ///
    /// The endpoint has no currency filter, so a filtered leg fetches the server's
    /// default page unlimited by `count` and truncates after filtering. Entries past
    /// that page are not seen.
    async fn transactions_leg(
        &self,
        direction: TransactionDirection,
        currency: Option<&CurrencyCode>,
        count: Option<u32>,
    ) -> Result<ApiResponse<Vec<Transaction>>, ExchangeError> {
        let body = TransactionsBody {
            direction: match direction {
                TransactionDirection::Withdrawal => "Withdraw",
                TransactionDirection::Deposit => "Deposit",
            },
            count: count.filter(|_| currency.is_none()),
        };
        let response: ApiResponse<Vec<Transaction>> = self
            .dispatcher
            .private(PrivateCall::GetTransactions, CallParams::new().json_body(&body)?)
            .await?;
        Ok(response.map_data(|mut entries| {
            if let Some(currency) = currency {
                entries.retain(|entry| entry.currency.eq_ignore_ascii_case(currency.as_str()));
            }
            if let Some(count) = count {
                entries.truncate(count as usize);
            }
            stamp_direction(&mut entries, direction);
            entries
        }))
    }
}

impl Exchange for CryptopiaAdapter {
    fn id(&self) -> ExchangeId {
        ExchangeId::Cryptopia
    }

    fn capabilities(&self) -> CapabilitySet {
        CapabilitySet::full()
    }

    fn market_label(&self, pair: &TradePair) -> String {
        market_segment(pair)
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
            let response: ApiResponse<Vec<TradePairInfo>> = self
                .dispatcher
                .public(PublicCall::GetTradePairs, CallParams::new())
                .await?;
            Ok(response.map_data(|mut pairs| {
                for pair in &mut pairs {
                    pair.label = canonical_label(&pair.label);
                }
                pairs
            }))
        })
    }

    fn markets<'a>(&'a self, req: MarketsRequest) -> ExchangeFuture<'a, Vec<Market>> {
        Box::pin(async move {
            let mut params = CallParams::new();
            if let Some(hours) = req.hours {
                params = params.segment(hours);
            }
            let response: ApiResponse<Vec<Market>> =
                self.dispatcher.public(PublicCall::GetMarkets, params).await?;
            Ok(response.map_data(|mut markets| {
                for market in &mut markets {
                    market.label = canonical_label(&market.label);
                }
                markets
            }))
        })
    }

    fn market<'a>(&'a self, req: MarketRequest) -> ExchangeFuture<'a, Market> {
        Box::pin(async move {
            let mut params = CallParams::new().segment(self.market_label(&req.pair));
            if let Some(hours) = req.hours {
                params = params.segment(hours);
            }
            let response: ApiResponse<Market> =
                self.dispatcher.public(PublicCall::GetMarket, params).await?;
            Ok(response.map_data(|mut market| {
                market.label = canonical_label(&market.label);
                market
            }))
        })
    }

    fn market_history<'a>(
        &'a self,
        req: MarketHistoryRequest,
    ) -> ExchangeFuture<'a, Vec<MarketTrade>> {
        Box::pin(async move {
            let label = req.pair.label();
            let mut params = CallParams::new().segment(self.market_label(&req.pair));
            if let Some(hours) = req.hours {
                params = params.segment(hours);
            }
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
            let mut params = CallParams::new().segment(self.market_label(&req.pair));
            if let Some(count) = req.count {
                params = params.segment(count);
            }
            let response: ApiResponse<OrderBook> = self
                .dispatcher
                .public(PublicCall::GetMarketOrders, params)
                .await?;
            Ok(response.map_data(|mut book| {
                stamp_order_book(&mut book, &label);
                book
            }))
        })
    }

    fn balances<'a>(&'a self, req: BalanceRequest) -> ExchangeFuture<'a, Vec<Balance>> {
        Box::pin(async move {
            let body = CurrencyBody::from_ref(req.currency.as_ref());
            self.dispatcher
                .private(PrivateCall::GetBalance, CallParams::new().json_body(&body)?)
                .await
        })
    }

    fn deposit_address<'a>(
        &'a self,
        req: DepositAddressRequest,
    ) -> ExchangeFuture<'a, DepositAddress> {
        Box::pin(async move {
            let body = CurrencyBody::from_ref(Some(&req.currency));
            self.dispatcher
                .private(
                    PrivateCall::GetDepositAddress,
                    CallParams::new().json_body(&body)?,
                )
                .await
        })
    }

    fn open_orders<'a>(&'a self, req: OpenOrdersRequest) -> ExchangeFuture<'a, Vec<OpenOrder>> {
        Box::pin(async move {
            let body = MarketBody::new(req.pair.as_ref(), req.count);
            let response: ApiResponse<Vec<OpenOrder>> = self
                .dispatcher
                .private(PrivateCall::GetOpenOrders, CallParams::new().json_body(&body)?)
                .await?;
            Ok(response.map_data(|mut orders| {
                for order in &mut orders {
                    order.market = canonical_label(&order.market);
                }
                orders
            }))
        })
    }

    fn trade_history<'a>(
        &'a self,
        req: TradeHistoryRequest,
    ) -> ExchangeFuture<'a, Vec<TradeHistoryEntry>> {
        Box::pin(async move {
            let body = MarketBody::new(req.pair.as_ref(), req.count);
            let response: ApiResponse<Vec<TradeHistoryEntry>> = self
                .dispatcher
                .private(
                    PrivateCall::GetTradeHistory,
                    CallParams::new().json_body(&body)?,
                )
                .await?;
            Ok(response.map_data(|mut trades| {
                for trade in &mut trades {
                    trade.market = canonical_label(&trade.market);
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
        Box::pin(async move {
            let body = SubmitTradeBody {
                market: MarketBody::new(Some(&req.pair), None),
                side: req.side.as_str(),
                rate: req.rate,
                amount: req.amount,
            };
            self.dispatcher
                .private(PrivateCall::SubmitTrade, CallParams::new().json_body(&body)?)
                .await
        })
    }

    fn cancel_trade<'a>(&'a self, req: CancelTradeRequest) -> ExchangeFuture<'a, Vec<RecordId>> {
        Box::pin(async move {
            let body = CancelTradeBody::from_request(&req)?;
            self.dispatcher
                .private(PrivateCall::CancelTrade, CallParams::new().json_body(&body)?)
                .await
        })
    }

    fn submit_withdraw<'a>(&'a self, req: SubmitWithdrawRequest) -> ExchangeFuture<'a, RecordId> {
        Box::pin(async move {
            let body = SubmitWithdrawBody {
                currency: CurrencyBody::from_ref(Some(&req.currency)),
                address: req.address,
                payment_id: req.payment_id,
                amount: req.amount,
            };
            self.dispatcher
                .private(
                    PrivateCall::SubmitWithdraw,
                    CallParams::new().json_body(&body)?,
                )
                .await
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::*;
    use crate::exchange::TradeSide;
    use crate::test_support::{block_on, ScriptedHttpClient};
    use crate::{Credentials, ExchangeErrorKind};

    const BASE: &str = "https://cryptopia.test";

    struct FixedNonce;

    impl NonceSource for FixedNonce {
        fn next_nonce(&self) -> String {
            "0123456789abcdef0123456789abcdef".to_owned()
        }
    }

    fn config() -> ExchangeConfig {
        ExchangeConfig::new(ExchangeId::Cryptopia)
            .with_base_url(BASE)
            .with_credentials(
                Credentials::new("cryptopia-key", "c2VjcmV0LWtleS1ieXRlcw==").expect("creds"),
            )
    }

    fn adapter(client: Arc<ScriptedHttpClient>) -> CryptopiaAdapter {
        CryptopiaAdapter::with_http_client(config(), client)
    }

    fn sent_body(client: &ScriptedHttpClient, index: usize) -> Value {
        let body = client.requests()[index].body.clone().expect("body");
        serde_json::from_str(&body).expect("json body")
    }

    fn pair() -> TradePair {
        TradePair::new("BTC", "LTC").expect("pair")
    }

    #[test]
    fn native_labels_become_canonical() {
        assert_eq!(canonical_label("LTC/BTC"), "BTC-LTC");
        assert_eq!(canonical_label("BTC-LTC"), "BTC-LTC");
    }

    #[test]
    fn public_path_uses_id_or_underscore_label() {
        let adapter = adapter(Arc::new(ScriptedHttpClient::new()));
        assert_eq!(adapter.market_label(&pair()), "LTC_BTC");
        assert_eq!(adapter.market_label(&pair().with_id(100)), "100");
    }

    #[test]
    fn order_book_request_has_segments_and_stamped_rows() {
        let client = Arc::new(ScriptedHttpClient::new().respond(
            r#"{"Success":true,"Message":null,"Error":null,"Data":{"Buy":[{"TradePairId":100,"Label":"LTC/BTC","Price":0.01,"Volume":2,"Total":0.02}],"Sell":[]}}"#,
        ));
        let adapter = adapter(client.clone());
        let req = MarketOrdersRequest::new(pair().with_id(100))
            .with_count(5)
            .expect("count");

        let book = block_on(adapter.market_orders(req))
            .expect("must succeed")
            .into_data()
            .expect("book");

        assert_eq!(
            client.requests()[0].url,
            "https://cryptopia.test/Api/GetMarketOrders/100/5"
        );
        assert_eq!(book.buy[0].label, "BTC-LTC");
        assert_eq!(book.buy[0].total, Decimal::new(2, 2));
        assert!(book.sell.is_empty());
    }

    #[test]
    fn private_call_posts_signed_json() {
        let client = Arc::new(ScriptedHttpClient::new().respond(
            r#"{"Success":true,"Error":null,"Data":[{"CurrencyId":1,"Symbol":"BTC","Total":10.3,"Available":6.3,"Unconfirmed":0,"HeldForTrades":4,"PendingWithdraw":0,"Address":"4HMjBARzTNdUpXCYkZDTHq8vmJQkdxXyFg","Status":"OK","StatusMessage":null,"BaseAddress":null}]}"#,
        ));
        let adapter = adapter(client.clone()).with_nonce_source(Arc::new(FixedNonce));
        let currency = CurrencyRef::code("btc").expect("code");

        let balances = block_on(adapter.balances(BalanceRequest::for_currency(currency)))
            .expect("must succeed")
            .into_data()
            .expect("balances");
        assert_eq!(balances[0].held_for_trades, Decimal::from(4));
        assert_eq!(balances[0].currency_id, Some(1));

        let request = &client.requests()[0];
        assert_eq!(request.url, "https://cryptopia.test/Api/GetBalance");
        assert_eq!(sent_body(&client, 0), json!({"Currency": "BTC"}));
        let authorization = request.headers.get("authorization").expect("signed");
        assert!(authorization.starts_with("amx cryptopia-key:"));
        assert!(authorization.ends_with(":0123456789abcdef0123456789abcdef"));
    }

    #[test]
    fn trade_history_markets_are_canonical() {
        let client = Arc::new(ScriptedHttpClient::new().respond(
            r#"{"Success":true,"Error":null,"Data":[{"TradeId":23467,"TradePairId":100,"Market":"LTC/BTC","Type":"Buy","Rate":0.00000034,"Amount":145.98,"Total":0.0000496,"Fee":0.0000001,"TimeStamp":"2014-12-07T20:04:05.3947572"}]}"#,
        ));
        let adapter = adapter(client.clone());

        let trades = block_on(adapter.trade_history(TradeHistoryRequest::for_pair(pair())))
            .expect("must succeed")
            .into_data()
            .expect("trades");

        assert_eq!(trades[0].market, "BTC-LTC");
        assert_eq!(trades[0].trade_id, Some(RecordId::Number(23467)));
        assert_eq!(sent_body(&client, 0), json!({"Market": "LTC/BTC"}));
    }

    #[test]
    fn transactions_without_direction_merge_both_legs() {
        let client = Arc::new(
            ScriptedHttpClient::new()
                .respond(r#"{"Success":true,"Data":[{"Id":1,"Currency":"BTC","Amount":1}]}"#)
                .respond(
                    r#"{"Success":true,"Data":[{"Id":2,"Currency":"DOT","Amount":2},{"Id":3,"Currency":"BTC","Amount":3}]}"#,
                ),
        );
        let adapter = adapter(client.clone());
        let req = TransactionRequest::all().for_currency(CurrencyCode::parse("BTC").expect("code"));

        let entries = block_on(adapter.transactions(req))
            .expect("must succeed")
            .into_data()
            .expect("entries");

        let ids: Vec<Option<u64>> = entries
            .iter()
            .map(|entry| entry.id.as_ref().and_then(RecordId::as_number))
            .collect();
        assert_eq!(ids, [Some(1), Some(3)]);
        assert_eq!(entries[0].direction, Some(TransactionDirection::Withdrawal));
        assert_eq!(entries[1].direction, Some(TransactionDirection::Deposit));
        assert_eq!(sent_body(&client, 0), json!({"Type": "Withdraw"}));
        assert_eq!(sent_body(&client, 1), json!({"Type": "Deposit"}));
    }

    #[test]
    fn filtered_transactions_truncate_after_filtering() {
        let client = Arc::new(
            ScriptedHttpClient::new()
                .respond(r#"{"Success":true,"Data":[{"Id":1,"Currency":"DOT","Amount":1},{"Id":2,"Currency":"BTC","Amount":2},{"Id":3,"Currency":"BTC","Amount":3}]}"#)
                .respond(r#"{"Success":true,"Data":[{"Id":4,"Currency":"DOT","Amount":4},{"Id":5,"Currency":"BTC","Amount":5}]}"#),
        );
        let adapter = adapter(client.clone());
        let req = TransactionRequest::all()
            .for_currency(CurrencyCode::parse("BTC").expect("code"))
            .with_count(1)
            .expect("count");

        let entries = block_on(adapter.transactions(req))
            .expect("must succeed")
            .into_data()
            .expect("entries");

        let ids: Vec<Option<u64>> = entries
            .iter()
            .map(|entry| entry.id.as_ref().and_then(RecordId::as_number))
            .collect();
        assert_eq!(ids, [Some(2), Some(5)]);
        assert_eq!(sent_body(&client, 0), json!({"Type": "Withdraw"}));
        assert_eq!(sent_body(&client, 1), json!({"Type": "Deposit"}));
    }

    #[test]
    fn unfiltered_transaction_count_is_sent_per_leg() {
        let client = Arc::new(
            ScriptedHttpClient::new()
                .respond(r#"{"Success":true,"Data":[{"Id":1,"Currency":"BTC","Amount":1}]}"#)
                .respond(r#"{"Success":true,"Data":[{"Id":2,"Currency":"BTC","Amount":2}]}"#),
        );
        let adapter = adapter(client.clone());
        let req = TransactionRequest::all().with_count(1).expect("count");

        let entries = block_on(adapter.transactions(req))
            .expect("must succeed")
            .into_data()
            .expect("entries");

        assert_eq!(entries.len(), 2);
        assert_eq!(sent_body(&client, 0), json!({"Type": "Withdraw", "Count": 1}));
        assert_eq!(sent_body(&client, 1), json!({"Type": "Deposit", "Count": 1}));
    }

    #[test]
    fn failed_withdrawal_leg_skips_deposits() {
        let client = Arc::new(
            ScriptedHttpClient::new().respond(r#"{"Success":false,"Error":"Nonce has already been used"}"#),
        );
        let adapter = adapter(client.clone());

        let response = block_on(adapter.transactions(TransactionRequest::all())).expect("envelope");

        assert!(!response.is_success());
        assert_eq!(response.error(), Some("Nonce has already been used"));
        assert_eq!(client.requests().len(), 1);
    }

    #[test]
    fn submit_trade_sends_numbers() {
        let client = Arc::new(
            ScriptedHttpClient::new()
                .respond(r#"{"Success":true,"Error":null,"Data":{"OrderId":23467,"FilledOrders":[44310,44311]}}"#),
        );
        let adapter = adapter(client.clone());
        let req = SubmitTradeRequest::new(
            pair().with_id(100),
            TradeSide::Sell,
            Decimal::from(123),
            Decimal::new(5, 1),
        )
        .expect("valid");

        let outcome = block_on(adapter.submit_trade(req))
            .expect("must succeed")
            .into_data()
            .expect("outcome");

        assert_eq!(outcome.order_id, Some(RecordId::Number(23467)));
        assert_eq!(outcome.filled_orders.len(), 2);
        assert_eq!(
            sent_body(&client, 0),
            json!({"TradePairId": 100, "Type": "Sell", "Rate": 0.5, "Amount": 123.0})
        );
    }

    #[test]
    fn cancel_by_pair_requires_numeric_id() {
        let client = Arc::new(ScriptedHttpClient::new());
        let adapter = adapter(client.clone());

        let err = block_on(adapter.cancel_trade(CancelTradeRequest::TradePair(pair())))
            .expect_err("must fail");

        assert_eq!(err.kind(), ExchangeErrorKind::InvalidRequest);
        assert!(client.requests().is_empty());
    }

    #[test]
    fn withdraw_body_omits_missing_payment_id() {
        let client = Arc::new(
            ScriptedHttpClient::new().respond(r#"{"Success":true,"Error":null,"Data":2036}"#),
        );
        let adapter = adapter(client.clone());
        let req = SubmitWithdrawRequest::new(CurrencyRef::Id(2), Decimal::new(25, 1), " DAddr ")
            .expect("valid");

        let id = block_on(adapter.submit_withdraw(req))
            .expect("must succeed")
            .into_data()
            .expect("id");

        assert_eq!(id, RecordId::Number(2036));
        assert_eq!(
            sent_body(&client, 0),
            json!({"CurrencyId": 2, "Address": "DAddr", "Amount": 2.5})
        );
    }
}
