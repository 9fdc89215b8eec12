use crate::adapters::{endpoint_url, target_rate};
use crate::domain::model::{CurrencyCode, RateResult};
use crate::domain::ports::RateProvider;
use crate::utils::error::{GuideError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;

/// 主要來源：每個幣別組合一次請求
///
/// `GET {endpoint}/latest?from=EUR&to=QAR`，回應格式為
/// `{"base": "EUR", "date": "2026-10-15", "rates": {"QAR": 4.21}}`.
pub struct PairQuoteProvider {
    client: Client,
    endpoint: String,
}

#[derive(Debug, Deserialize)]
struct PairQuoteResponse {
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    rates: HashMap<String, serde_json::Value>,
}

impl PairQuoteProvider {
    pub const NAME: &'static str = "pair-quote";

    pub fn new(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl RateProvider for PairQuoteProvider {
    fn name(&self) -> &str {
        Self::NAME
    }

    async fn fetch_rate(&self, source: &CurrencyCode, target: &CurrencyCode) -> Result<RateResult> {
        let mut url = endpoint_url(Self::NAME, &self.endpoint, &["latest"])?;
        url.query_pairs_mut()
            .append_pair("from", source.as_str())
            .append_pair("to", target.as_str());

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
        let payload: PairQuoteResponse = serde_json::from_str(&body)?;
        let rate = target_rate(Self::NAME, &payload.rates, target)?;

        RateResult::new(rate, payload.date.unwrap_or_default()).ok_or_else(|| {
            GuideError::InvalidPayload {
                provider: Self::NAME.to_string(),
                reason: format!("rate {} rejected", rate),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use std::time::Duration;

    fn provider(server: &MockServer) -> PairQuoteProvider {
        let client = crate::adapters::build_client(Duration::from_secs(5)).unwrap();
        PairQuoteProvider::new(client, server.base_url())
    }

    fn code(s: &str) -> CurrencyCode {
        s.parse().unwrap()
    }

    #[tokio::test]
    async fn test_fetch_rate_success() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/latest")
                .query_param("from", "EUR")
                .query_param("to", "QAR");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "amount": 1.0,
                    "base": "EUR",
                    "date": "2026-10-15",
                    "rates": {"QAR": 4.2113}
                }));
        });

        let result = provider(&server)
            .fetch_rate(&code("EUR"), &code("QAR"))
            .await
            .unwrap();

        api_mock.assert();
        assert_eq!(result.rate(), 4.2113);
        assert_eq!(result.as_of_label(), "2026-10-15");
    }

    #[tokio::test]
    async fn test_missing_date_gives_empty_label() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/latest");
            then.status(200)
                .json_body(serde_json::json!({"rates": {"QAR": 3.64}}));
        });

        let result = provider(&server)
            .fetch_rate(&code("USD"), &code("QAR"))
            .await
            .unwrap();

        assert_eq!(result.as_of_label(), "");
    }

    #[tokio::test]
    async fn test_non_success_status_is_failure() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/latest");
            then.status(404);
        });

        let err = provider(&server)
            .fetch_rate(&code("XAU"), &code("QAR"))
            .await
            .unwrap_err();

        assert!(matches!(err, GuideError::ProviderStatus { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_missing_target_rate_is_failure() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/latest");
            then.status(200)
                .json_body(serde_json::json!({"date": "2026-10-15", "rates": {"USD": 1.08}}));
        });

        let err = provider(&server)
            .fetch_rate(&code("EUR"), &code("QAR"))
            .await
            .unwrap_err();

        assert!(matches!(err, GuideError::InvalidPayload { .. }));
    }

    #[tokio::test]
    async fn test_unparseable_body_is_failure() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/latest");
            then.status(200).body("<html>maintenance</html>");
        });

        let err = provider(&server)
            .fetch_rate(&code("EUR"), &code("QAR"))
            .await
            .unwrap_err();

        assert!(matches!(err, GuideError::SerializationError(_)));
    }
}
