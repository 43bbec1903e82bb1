use anyhow::{Error, Result};
use chrono::NaiveDate;
use log::{debug, warn};
use reqwest::Client;
use rust_decimal::Decimal;

use crate::{
    api::{
        dto::{AuthRequestDto, AuthResponseDto, InvestmentRequestDto, MessageResponseDto,
              RegisterRequestDto},
        utils,
    },
    models::{Asset, Investment},
    session::Session,
};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api/v1";

/// Typed gateway over the wallet backend. Authenticated calls read the
/// bearer token from the injected session and fail before any network
/// I/O when no valid token is stored.
#[derive(Clone, Debug)]
pub struct WalletApi {
    client: Client,
    base_url: String,
    session: Session,
}

impl WalletApi {
    pub fn new(base_url: String, session: Session) -> Self {
        Self {
            client: Client::new(),
            base_url,
            session,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn bearer_token(&self) -> Result<String> {
        self.session
            .token()
            .ok_or_else(|| Error::msg("No auth token found"))
    }

    async fn get_authed(&self, path: &str) -> Result<reqwest::Response> {
        let token = self.bearer_token()?;
        debug!("GET {}", path);
        self.client
            .get(self.url(path))
            .bearer_auth(token)
            .send()
            .await
            .map_err(network_error)
    }

    /// Logs in and stores the returned token in the session.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<()> {
        let body = AuthRequestDto::new(username.to_string(), password.to_string());
        let res = self
            .client
            .post(self.url("/authenticate"))
            .json(&body)
            .send()
            .await
            .map_err(network_error)?;

        let auth: AuthResponseDto = utils::parse_response(res, "Authentication failed").await?;
        self.session.store_token(auth.token())?;

        Ok(())
    }

    pub async fn register(&self, user: RegisterRequestDto) -> Result<String> {
        let res = self
            .client
            .post(self.url("/register"))
            .json(&user)
            .send()
            .await
            .map_err(network_error)?;

        let msg: MessageResponseDto = utils::parse_response(res, "Registration failed").await?;
        Ok(msg.message().to_string())
    }

    pub async fn list_assets(&self) -> Result<Vec<Asset>> {
        let res = self.get_authed("/asset").await?;
        utils::parse_response(res, "Failed to fetch assets").await
    }

    pub async fn list_investments(&self) -> Result<Vec<Investment>> {
        let res = self.get_authed("/wallet/investment").await?;
        utils::parse_response(res, "Failed to fetch user investments").await
    }

    pub async fn list_history(&self) -> Result<Vec<Investment>> {
        let res = self.get_authed("/wallet/history").await?;
        utils::parse_response(res, "Failed to fetch user history investments").await
    }

    pub async fn create_investment(&self, initial_value: Decimal, asset_id: &str) -> Result<()> {
        let token = self.bearer_token()?;
        let body = InvestmentRequestDto::new(initial_value, asset_id.to_string());
        let res = self
            .client
            .post(self.url("/wallet/investment"))
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .map_err(network_error)?;

        utils::expect_success(res, "Failed to register investment").await
    }

    pub async fn withdraw_investment(&self, investment_id: &str) -> Result<()> {
        let token = self.bearer_token()?;
        let path = format!("/wallet/investment/withdraw/{}", investment_id);
        let res = self
            .client
            .post(self.url(&path))
            .bearer_auth(token)
            .send()
            .await
            .map_err(network_error)?;

        utils::expect_success(res, "Failed to withdraw investment").await
    }

    pub async fn remove_investment(&self, investment_id: &str) -> Result<()> {
        let token = self.bearer_token()?;
        let path = format!("/wallet/investment/{}", investment_id);
        let res = self
            .client
            .delete(self.url(&path))
            .bearer_auth(token)
            .send()
            .await
            .map_err(network_error)?;

        utils::expect_success(res, "Failed to remove investment").await
    }

    pub async fn total_balance(&self) -> Result<Decimal> {
        let res = self.get_authed("/wallet/totalBalance").await?;
        utils::parse_response(res, "Failed to fetch total balance").await
    }

    pub async fn future_balance(&self) -> Result<Decimal> {
        let res = self.get_authed("/wallet/futureBalance").await?;
        utils::parse_response(res, "Failed to fetch future balance").await
    }

    /// Returns the backend's preformatted text report relative to the
    /// given date.
    pub async fn report(&self, relative_date: NaiveDate) -> Result<String> {
        let token = self.bearer_token()?;
        let res = self
            .client
            .get(self.url("/wallet/report"))
            .query(&[("relativeDate", relative_date.to_string())])
            .bearer_auth(token)
            .send()
            .await
            .map_err(network_error)?;

        utils::text_response(res, "Failed to fetch wallet report").await
    }
}

fn network_error(err: reqwest::Error) -> Error {
    warn!("Request failed without a response: {}", err);
    Error::msg("Network error. Please check your connection.")
}
