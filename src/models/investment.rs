use chrono::NaiveDate;
use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, Getters, PartialEq, Serialize, new)]
#[serde(rename_all = "camelCase")]
pub struct Investment {
    id: String,
    asset_id: String,
    initial_value: Decimal,
    purchase_date: NaiveDate,
    #[serde(default)]
    withdraw_date: Option<NaiveDate>,
}

impl Investment {
    pub fn is_history(&self) -> bool {
        self.withdraw_date.is_some()
    }
}
