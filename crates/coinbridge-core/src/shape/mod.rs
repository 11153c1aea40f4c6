//! Response-shape translation.
//!
//! Each exchange owns a [`ShapeTable`]: an ordered list of [`ShapeRule`]s per call kind
//! that rewrites the exchange's native JSON into the canonical field names and nesting.
//! Translation is deterministic and never fails. A body that is not JSON or lacks the
//! table's marker key comes back unchanged, so the parser downstream reports the mismatch.

mod rules;
mod tables;

pub use rules::ShapeRule;
pub use tables::{ShapeTable, BITTREX, PASSTHROUGH};

use serde_json::Value;

use crate::call::CallKind;

/// Applies one exchange's [`ShapeTable`] to raw response bodies.
#[derive(Debug, Clone, Copy)]
pub struct ShapeTranslator {
    table: &'static ShapeTable,
}

impl ShapeTranslator {
    pub const fn new(table: &'static ShapeTable) -> Self {
        Self { table }
    }

    pub const fn passthrough() -> Self {
        Self::new(&PASSTHROUGH)
    }

    /// Full rule sequence for `call`: prelude first, then the call's own rules.
    pub fn rules(&self, call: CallKind) -> impl Iterator<Item = &'static ShapeRule> {
        let specific = match call {
            CallKind::Public(call) => (self.table.public)(call),
            CallKind::Private(call) => (self.table.private)(call),
        };
        self.table.prelude.iter().chain(specific.iter())
    }

    pub fn translate(&self, call: CallKind, raw: &str) -> String {
        if self.rules(call).next().is_none() {
            return raw.to_owned();
        }
        let Ok(mut body) = serde_json::from_str::<Value>(raw) else {
            return raw.to_owned();
        };
        if !self.translate_value(call, &mut body) {
            return raw.to_owned();
        }
        body.to_string()
    }

    /// Rewrites `body` in place; returns `false` when the marker is missing and nothing ran.
    pub fn translate_value(&self, call: CallKind, body: &mut Value) -> bool {
        if let Some(marker) = self.table.marker {
            let has_marker = body
                .as_object()
                .is_some_and(|map| map.contains_key(marker));
            if !has_marker {
                return false;
            }
        }
        for rule in self.rules(call) {
            rule.apply(body);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::call::{PrivateCall, PublicCall};

    fn bittrex() -> ShapeTranslator {
        ShapeTranslator::new(&BITTREX)
    }

    #[test]
    fn passthrough_returns_body_verbatim() {
        let raw = r#"{"Success":true,"Data":[{"Symbol":"BTC"}]}"#;
        let translated =
            ShapeTranslator::passthrough().translate(PublicCall::GetCurrencies.into(), raw);
        assert_eq!(translated, raw);
    }

    #[test]
    fn missing_marker_is_a_no_op() {
        let raw = r#"{"error":"maintenance"}"#;
        assert_eq!(bittrex().translate(PublicCall::GetCurrencies.into(), raw), raw);
    }

    #[test]
    fn non_json_is_returned_unchanged() {
        let raw = "<html>Bad Gateway</html>";
        assert_eq!(bittrex().translate(PublicCall::GetMarkets.into(), raw), raw);
    }

    #[test]
    fn trade_pair_rule_order_keeps_base_symbol() {
        let mut body = json!({
            "success": true,
            "message": "",
            "result": [{
                "MarketCurrency": "LTC",
                "BaseCurrency": "BTC",
                "MarketCurrencyLong": "Litecoin",
                "BaseCurrencyLong": "Bitcoin",
                "MinTradeSize": 0.01,
                "MarketName": "BTC-LTC",
                "IsActive": true
            }]
        });
        assert!(bittrex().translate_value(PublicCall::GetTradePairs.into(), &mut body));

        assert_eq!(
            body,
            json!({
                "Success": true,
                "Message": "",
                "Data": [{
                    "Symbol": "LTC",
                    "BaseSymbol": "BTC",
                    "Currency": "Litecoin",
                    "BaseCurrency": "Bitcoin",
                    "MinimumBaseTrade": 0.01,
                    "Label": "BTC-LTC",
                    "Status": "OK"
                }]
            })
        );
    }

    #[test]
    fn reordered_rules_would_lose_base_symbol() {
        let mut body = json!({"BaseCurrency": "BTC", "BaseCurrencyLong": "Bitcoin"});
        ShapeRule::rename("BaseCurrencyLong", "BaseCurrency").apply(&mut body);
        ShapeRule::rename("BaseCurrency", "BaseSymbol").apply(&mut body);

        assert_eq!(body, json!({"BaseSymbol": "Bitcoin"}));
    }

    #[test]
    fn single_balance_is_wrapped_before_renames() {
        let mut body = json!({
            "success": true,
            "message": "",
            "result": {"Currency": "BTC", "Balance": 4.2, "Available": 4.0, "Pending": 0.2}
        });
        bittrex().translate_value(PrivateCall::GetBalance.into(), &mut body);

        assert_eq!(
            body["Data"],
            json!([{"Symbol": "BTC", "Total": 4.2, "Available": 4.0, "Unconfirmed": 0.2}])
        );
    }

    #[test]
    fn every_call_has_a_rule_list() {
        for call in PublicCall::ALL {
            assert!(bittrex().rules(call.into()).count() >= 3);
            assert_eq!(ShapeTranslator::passthrough().rules(call.into()).count(), 0);
        }
        for call in PrivateCall::ALL {
            assert!(bittrex().rules(call.into()).count() >= 3);
        }
    }
}
