use std::collections::BTreeMap;

use crate::domain::{Currency, Market, TradePairInfo};

/// Indexes currencies by ticker. Later duplicates replace earlier ones.
pub fn currencies_by_symbol(currencies: &[Currency]) -> BTreeMap<String, Currency> {
    currencies
        .iter()
        .map(|currency| (currency.symbol.clone(), currency.clone()))
        .collect()
}

/// Indexes trade pairs by label.
pub fn trade_pairs_by_label(pairs: &[TradePairInfo]) -> BTreeMap<String, TradePairInfo> {
    pairs
        .iter()
        .map(|pair| (pair.label.clone(), pair.clone()))
        .collect()
}

/// Indexes market summaries by label.
pub fn markets_by_label(markets: &[Market]) -> BTreeMap<String, Market> {
    markets
        .iter()
        .map(|market| (market.label.clone(), market.clone()))
        .collect()
}
