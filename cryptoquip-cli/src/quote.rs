//! Remote quote service client.
use cryptoquip_game::{PuzzleConfig, Quote};
use reqwest::StatusCode;
use std::time::Duration;
use thiserror::Error;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum QuoteError {
    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Quote service answered {0}")]
    Status(StatusCode),
    #[error("Malformed quote payload: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("Quote service returned an empty quotation")]
    Empty,
}

/// Fetch one random quotation no longer than the configured length.
///
/// # Errors
///
/// Returns an error on network failure, a non-success status, or a body that
/// is not a `{ content, author }` object.
pub async fn fetch_quote(config: &PuzzleConfig) -> Result<Quote, QuoteError> {
    let client = reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()?;
    log::debug!("requesting quote from {}", config.quote_url);
    let response = client
        .get(&config.quote_url)
        .query(&[("maxLength", config.max_quote_length)])
        .send()
        .await?;
    let status = response.status();
    if !status.is_success() {
        return Err(QuoteError::Status(status));
    }
    let body = response.text().await?;
    parse_quote(&body)
}

/// Decode a quote service body.
///
/// Accepts either a single object or a one-element array, the two shapes
/// quote services commonly answer with.
///
/// # Errors
///
/// Returns [`QuoteError::Malformed`] or [`QuoteError::Empty`].
pub fn parse_quote(body: &str) -> Result<Quote, QuoteError> {
    let value: serde_json::Value = serde_json::from_str(body)?;
    let value = match value {
        serde_json::Value::Array(mut items) if !items.is_empty() => items.swap_remove(0),
        other => other,
    };
    let quote: Quote = serde_json::from_value(value)?;
    if quote.content.trim().is_empty() {
        return Err(QuoteError::Empty);
    }
    Ok(quote)
}
