// Adapters layer: HTTP implementations of the `RateProvider` port.

pub mod pair_quote;
pub mod rate_table;

pub use pair_quote::PairQuoteProvider;
pub use rate_table::RateTableProvider;

use crate::domain::model::CurrencyCode;
use crate::utils::error::{GuideError, Result};
use reqwest::Client;
use std::collections::HashMap;
use std::time::Duration;
use url::Url;

/// 建立共用的 HTTP client，逾時由傳輸層負責
pub fn build_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!("doha-guide/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(GuideError::ApiError)
}

pub(crate) fn endpoint_url(provider: &str, endpoint: &str, segments: &[&str]) -> Result<Url> {
    let invalid = |reason: String| GuideError::ConfigError {
        message: format!("{} endpoint {:?}: {}", provider, endpoint, reason),
    };

    let mut url = Url::parse(endpoint).map_err(|e| invalid(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| invalid("URL cannot be a base".to_string()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// 從 `rates` 對照表取出目標幣別的匯率，必須是正數
pub(crate) fn target_rate(
    provider: &str,
    rates: &HashMap<String, serde_json::Value>,
    target: &CurrencyCode,
) -> Result<f64> {
    let value = rates
        .get(target.as_str())
        .ok_or_else(|| GuideError::InvalidPayload {
            provider: provider.to_string(),
            reason: format!("no rate for {}", target),
        })?;

    match value.as_f64() {
        Some(rate) if rate.is_finite() && rate > 0.0 => Ok(rate),
        _ => Err(GuideError::InvalidPayload {
            provider: provider.to_string(),
            reason: format!("rate for {} is not a positive number: {}", target, value),
        }),
    }
}
