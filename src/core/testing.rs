use crate::domain::model::{CurrencyCode, RateResult};
use crate::domain::ports::RateProvider;
use crate::utils::error::{GuideError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// 記憶體內的來源，只回應設定過的幣別，其餘回傳 503
#[derive(Clone)]
pub(crate) struct ScriptedProvider {
    name: String,
    rates: HashMap<String, (f64, String)>,
    calls: Arc<AtomicUsize>,
}

impl ScriptedProvider {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            rates: HashMap::new(),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub(crate) fn with_rate(self, code: &str, rate: f64) -> Self {
        self.with_rate_as_of(code, rate, "")
    }

    pub(crate) fn with_rate_as_of(mut self, code: &str, rate: f64, as_of: &str) -> Self {
        self.rates
            .insert(code.to_string(), (rate, as_of.to_string()));
        self
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn shared(&self) -> Arc<dyn RateProvider> {
        Arc::new(self.clone())
    }
}

#[async_trait]
impl RateProvider for ScriptedProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch_rate(&self, source: &CurrencyCode, _target: &CurrencyCode) -> Result<RateResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        match self.rates.get(source.as_str()) {
            Some((rate, as_of)) => {
                RateResult::new(*rate, as_of.clone()).ok_or_else(|| GuideError::InvalidPayload {
                    provider: self.name.clone(),
                    reason: format!("rate {} is not positive", rate),
                })
            }
            None => Err(GuideError::ProviderStatus {
                provider: self.name.clone(),
                status: 503,
            }),
        }
    }
}
