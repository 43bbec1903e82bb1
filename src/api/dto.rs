use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, new)]
pub struct AuthRequestDto {
    username: String,
    password: String,
}

#[derive(Debug, Deserialize, Getters)]
pub struct AuthResponseDto {
    token: String,
}

#[derive(Clone, Debug, Serialize, new)]
pub struct RegisterRequestDto {
    name: String,
    lastname: String,
    email: String,
    password: String,
}

#[derive(Debug, Deserialize, Getters)]
pub struct MessageResponseDto {
    message: String,
}

#[derive(Debug, Serialize, new)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentRequestDto {
    initial_value: Decimal,
    asset_id: String,
}
