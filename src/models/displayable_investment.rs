use chrono::NaiveDate;
use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;

use super::AssetType;

/// The join of an investment with its asset, ready for rendering.
/// Recomputed on every fetch, never persisted.
#[derive(Clone, Debug, Getters, PartialEq, new)]
pub struct DisplayableInvestment {
    id: String,
    asset_name: String,
    asset_subtitle: String,
    asset_type: AssetType,
    value: Decimal,
    expected_return: Decimal,
    return_profit: Decimal,
    return_percentage: String,
    investment_date: NaiveDate,
    maturity_date: NaiveDate,
    is_history: bool,
}
