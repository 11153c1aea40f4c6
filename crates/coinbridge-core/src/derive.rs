//! Per-record fields computed by adapters after parsing.

use rust_decimal::Decimal;

use crate::domain::{Market, OrderBook, Transaction, TransactionDirection};
use crate::ApiResponse;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// `(last / prev_day - 1) * 100`; zero when there is no previous price.
pub fn percent_change(last: Decimal, prev_day: Decimal) -> Decimal {
    last.checked_div(prev_day)
        .and_then(|ratio| (ratio - Decimal::ONE).checked_mul(HUNDRED))
        .unwrap_or(Decimal::ZERO)
}

pub fn order_total(price: Decimal, volume: Decimal) -> Decimal {
    price * volume
}

/// `amount * rate + fee`.
pub fn trade_total(amount: Decimal, rate: Decimal, fee: Decimal) -> Decimal {
    amount * rate + fee
}

pub fn fill_market_change(market: &mut Market) {
    market.change = percent_change(market.last_price, market.prev_day);
}

/// Stamps every row of both sides with `label` and `Total = Price * Volume`.
pub fn stamp_order_book(book: &mut OrderBook, label: &str) {
    for entry in book.buy.iter_mut().chain(book.sell.iter_mut()) {
        entry.label = label.to_owned();
        entry.total = order_total(entry.price, entry.volume);
    }
}

pub fn stamp_direction(transactions: &mut [Transaction], direction: TransactionDirection) {
    for transaction in transactions {
        transaction.direction = Some(direction);
    }
}

/// Concatenates the withdrawal leg then the deposit leg, tagging each entry's direction.
///
/// A leg that did not succeed is returned as the result; nothing is partially merged.
pub fn merge_transactions(
    withdrawals: ApiResponse<Vec<Transaction>>,
    deposits: ApiResponse<Vec<Transaction>>,
) -> ApiResponse<Vec<Transaction>> {
    if !withdrawals.success || withdrawals.data.is_none() {
        return withdrawals;
    }
    if !deposits.success || deposits.data.is_none() {
        return deposits;
    }
    let mut merged = withdrawals.data.unwrap_or_default();
    let mut incoming = deposits.data.unwrap_or_default();

    stamp_direction(&mut merged, TransactionDirection::Withdrawal);
    stamp_direction(&mut incoming, TransactionDirection::Deposit);
    merged.append(&mut incoming);
    ApiResponse::success(merged)
}
