use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::{Asset, DisplayableInvestment, Investment};

/// Joins raw investments with their assets and computes the simulated
/// return figures shown in the wallet. Investments whose asset is not in
/// the catalog are dropped. Input order is preserved.
///
/// The 0.1 damping on the profit figure mirrors the backend's display
/// simulation; it is not an interest calculation.
pub fn enrich(
    investments: &[Investment],
    assets: &[Asset],
    is_history: bool,
) -> Vec<DisplayableInvestment> {
    investments
        .iter()
        .filter_map(|investment| {
            // Linear scan is fine for catalogs of tens to low-hundreds
            let asset = assets.iter().find(|a| a.id() == investment.asset_id())?;

            let value = *investment.initial_value();
            let profit = value * *asset.profitability() * dec!(0.1);
            let expected_return = value + profit;
            let return_percentage = if value > Decimal::ZERO {
                format!("{:.2}%", profit / value * dec!(100))
            } else {
                String::from("0.00%")
            };

            let bank = asset.name().split_whitespace().nth(1).unwrap_or("Genérico");

            let maturity_date = if is_history {
                (*investment.withdraw_date()).unwrap_or(*asset.maturity_date())
            } else {
                *asset.maturity_date()
            };

            Some(DisplayableInvestment::new(
                investment.id().clone(),
                asset.name().clone(),
                format!("Banco {}", bank),
                *asset.asset_type(),
                value,
                expected_return,
                profit,
                return_percentage,
                *investment.purchase_date(),
                maturity_date,
                is_history,
            ))
        })
        .collect()
}
