use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;

/// Aggregate wallet figures taken unchanged from the balance endpoints.
#[derive(Clone, Debug, Getters, PartialEq, new)]
pub struct WalletSummary {
    total_balance: Decimal,
    future_balance: Decimal,
    investment_count: usize,
}
