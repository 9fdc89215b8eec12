use crate::core::fallback::{FallbackChain, ResolutionFailure};
use crate::domain::model::{CurrencyCode, RateFetchState, RateResult};
use crate::utils::error::RATE_UNAVAILABLE_MESSAGE;

/// 一次查詢的最終結果，標記發起它的 epoch
#[derive(Debug, Clone)]
pub struct RateOutcome {
    pub epoch: u64,
    pub source: CurrencyCode,
    pub resolution: Result<RateResult, ResolutionFailure>,
}

/// 單次選擇對應的網路工作，可脫離控制器獨立執行，結果再交回 `settle`
#[derive(Debug, Clone)]
pub struct PendingResolution {
    epoch: u64,
    source: CurrencyCode,
    target: CurrencyCode,
    chain: FallbackChain,
}

impl PendingResolution {
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn source(&self) -> &CurrencyCode {
        &self.source
    }

    pub async fn resolve(self) -> RateOutcome {
        let resolution = self.chain.resolve(&self.source, &self.target).await;
        RateOutcome {
            epoch: self.epoch,
            source: self.source,
            resolution,
        }
    }
}

/// 追蹤選擇的幣別與其兌換目標幣別的即時匯率
///
/// 每次選擇取得新的 epoch 並整個替換狀態，清除先前的匯率。
/// epoch 不是目前值的結果一律丟棄，畫面永遠由最後一次選擇決定。
#[derive(Debug)]
pub struct RateFetchController {
    target: CurrencyCode,
    chain: FallbackChain,
    state: RateFetchState,
}

impl RateFetchController {
    pub fn new(target: CurrencyCode, initial: CurrencyCode, chain: FallbackChain) -> Self {
        Self {
            target,
            chain,
            state: RateFetchState::idle(initial),
        }
    }

    pub fn state(&self) -> &RateFetchState {
        &self.state
    }

    /// 開始新的選擇，回傳待執行的網路工作
    ///
    /// 選到目標幣別本身時直接以匯率 1 完成，回傳 `None`
    pub fn select_currency(&mut self, code: CurrencyCode) -> Option<PendingResolution> {
        let epoch = self.state.request_epoch + 1;

        if code == self.target {
            tracing::debug!("{} is the target currency, rate is 1", code);
            self.state = RateFetchState {
                selection: code,
                result: Some(RateResult::identity()),
                loading: false,
                error_message: None,
                request_epoch: epoch,
            };
            return None;
        }

        tracing::debug!("selecting {} (epoch {})", code, epoch);
        self.state = RateFetchState {
            selection: code.clone(),
            result: None,
            loading: true,
            error_message: None,
            request_epoch: epoch,
        };

        Some(PendingResolution {
            epoch,
            source: code,
            target: self.target.clone(),
            chain: self.chain.clone(),
        })
    }

    /// 套用查詢結果，過期的結果回傳 `false`
    pub fn settle(&mut self, outcome: RateOutcome) -> bool {
        if outcome.epoch != self.state.request_epoch {
            tracing::debug!(
                "discarding stale outcome for {} (epoch {}, current {})",
                outcome.source,
                outcome.epoch,
                self.state.request_epoch
            );
            return false;
        }

        match outcome.resolution {
            Ok(result) => {
                self.state.result = Some(result);
                self.state.error_message = None;
            }
            Err(failure) => {
                tracing::warn!("no rate for {}: {}", outcome.source, failure);
                self.state.result = None;
                self.state.error_message = Some(RATE_UNAVAILABLE_MESSAGE.to_string());
            }
        }
        self.state.loading = false;
        true
    }

    /// 選擇並直接等待結果，給沒有事件迴圈的呼叫端使用
    pub async fn refresh(&mut self, code: CurrencyCode) -> &RateFetchState {
        if let Some(pending) = self.select_currency(code) {
            let outcome = pending.resolve().await;
            self.settle(outcome);
        }
        &self.state
    }
}
