use anyhow::{Context, Error, Result};
use log::warn;
use reqwest::Response;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Best human-readable message for a failed response: the server's
/// structured `message` field when present, the per-endpoint fallback
/// otherwise.
async fn error_message(res: Response, fallback: &str) -> String {
    let text = res.text().await.unwrap_or_default();
    serde_json::from_str::<Value>(&text)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_else(|| fallback.to_string())
}

/// A transport failure while reading the body gets the same message as
/// a failed connection, so the user never sees a raw reqwest error.
fn body_error(err: reqwest::Error) -> Error {
    warn!("Failed to read response body: {}", err);
    Error::msg("Network error. Please check your connection.")
}

pub async fn parse_response<T>(res: Response, fallback: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    if !res.status().is_success() {
        return Err(Error::msg(error_message(res, fallback).await));
    }

    let text = res.text().await.map_err(body_error)?;
    serde_json::from_str(&text).with_context(|| format!("Unexpected API response: {}", text))
}

pub async fn expect_success(res: Response, fallback: &str) -> Result<()> {
    if !res.status().is_success() {
        return Err(Error::msg(error_message(res, fallback).await));
    }

    Ok(())
}

pub async fn text_response(res: Response, fallback: &str) -> Result<String> {
    if !res.status().is_success() {
        return Err(Error::msg(error_message(res, fallback).await));
    }

    res.text().await.map_err(body_error)
}
