use crate::adapters::{endpoint_url, target_rate};
use crate::domain::model::{CurrencyCode, RateResult};
use crate::domain::ports::RateProvider;
use crate::utils::error::{GuideError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;

/// 備援來源：取得單一基準幣別的完整匯率表
///
/// `GET {endpoint}/latest/EUR`，回應格式為
/// `{"result": "success", "time_last_update_utc": "...", "rates": {...}}`.
pub struct RateTableProvider {
    client: Client,
    endpoint: String,
}

#[derive(Debug, Deserialize)]
struct RateTableResponse {
    #[serde(default)]
    result: Option<String>,
    #[serde(default)]
    time_last_update_utc: Option<String>,
    #[serde(default)]
    rates: HashMap<String, serde_json::Value>,
}

impl RateTableProvider {
    pub const NAME: &'static str = "rate-table";

    pub fn new(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

/// RFC 2822 時間戳轉成 `YYYY-MM-DD HH:MM UTC`，無法解析時保留原字串
fn update_label(raw: &str) -> String {
    DateTime::parse_from_rfc2822(raw)
        .map(|dt| dt.with_timezone(&Utc).format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

#[async_trait]
impl RateProvider for RateTableProvider {
    fn name(&self) -> &str {
        Self::NAME
    }

    async fn fetch_rate(&self, source: &CurrencyCode, target: &CurrencyCode) -> Result<RateResult> {
        let url = endpoint_url(Self::NAME, &self.endpoint, &["latest", source.as_str()])?;

        tracing::debug!("Making rate request to: {}", url);
        let response = self.client.get(url).send().await?;
        tracing::debug!("{} response status: {}", Self::NAME, response.status());

        if !response.status().is_success() {
            return Err(GuideError::ProviderStatus {
                provider: Self::NAME.to_string(),
                status: response.status().as_u16(),
            });
        }

        let body = response.text().await?;
        let payload: RateTableResponse = serde_json::from_str(&body)?;

        if let Some(result) = payload.result.as_deref() {
            if result != "success" {
                return Err(GuideError::InvalidPayload {
                    provider: Self::NAME.to_string(),
                    reason: format!("result was {:?}", result),
                });
            }
        }

        let rate = target_rate(Self::NAME, &payload.rates, target)?;
        let label = payload
            .time_last_update_utc
            .as_deref()
            .map(update_label)
            .unwrap_or_default();

        RateResult::new(rate, label).ok_or_else(|| GuideError::InvalidPayload {
            provider: Self::NAME.to_string(),
            reason: format!("rate {} rejected", rate),
        })
    }
}
