use crate::domain::model::{CurrencyCode, RateResult};
use crate::domain::ports::RateProvider;
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderFailure {
    pub provider: String,
    pub reason: String,
}

/// 所有來源都失敗，僅供日誌使用，不顯示給使用者
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionFailure {
    pub attempts: Vec<ProviderFailure>,
}

impl fmt::Display for ResolutionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.attempts.is_empty() {
            return f.write_str("no rate providers configured");
        }
        let parts: Vec<String> = self
            .attempts
            .iter()
            .map(|a| format!("{}: {}", a.provider, a.reason))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

/// 依序嘗試的匯率來源，直到有一個成功
#[derive(Clone)]
pub struct FallbackChain {
    providers: Arc<[Arc<dyn RateProvider>]>,
}

impl FallbackChain {
    pub fn new(providers: Vec<Arc<dyn RateProvider>>) -> Self {
        Self {
            providers: providers.into(),
        }
    }

    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    pub async fn resolve(
        &self,
        source: &CurrencyCode,
        target: &CurrencyCode,
    ) -> Result<RateResult, ResolutionFailure> {
        let mut failure = ResolutionFailure::default();

        for provider in self.providers.iter() {
            match provider.fetch_rate(source, target).await {
                Ok(result) => {
                    tracing::debug!(
                        "{} resolved {}->{} = {}",
                        provider.name(),
                        source,
                        target,
                        result.rate()
                    );
                    return Ok(result);
                }
                Err(e) => {
                    tracing::warn!("{} failed for {}: {}", provider.name(), source, e);
                    failure.attempts.push(ProviderFailure {
                        provider: provider.name().to_string(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        Err(failure)
    }
}

impl fmt::Debug for FallbackChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FallbackChain")
            .field("providers", &self.provider_names())
            .finish()
    }
}
