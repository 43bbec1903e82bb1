use chrono::NaiveDate;
use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

#[derive(Clone, Debug, Deserialize, Getters, PartialEq, Serialize, new)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    id: String,
    name: String,
    asset_type: AssetType,
    profitability: Decimal,
    maturity_date: NaiveDate,
    #[serde(default)]
    minimum_value: Option<Decimal>,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Clone, Copy, Debug, Deserialize, Display, EnumIter, Eq, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetType {
    #[strum(serialize = "CDB")]
    Cdb,
    #[strum(serialize = "LCI")]
    Lci,
    #[strum(serialize = "LCA")]
    Lca,
    #[strum(serialize = "CRI")]
    Cri,
    #[strum(serialize = "CRA")]
    Cra,
    #[strum(serialize = "Tesouro Direto")]
    TesouroDireto,
}
