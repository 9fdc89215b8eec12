use crate::domain::model::{CurrencyCode, RateResult, TimerTick};
use crate::utils::error::Result;
use async_trait::async_trait;
use tokio::sync::mpsc;

/// 外部唯讀匯率來源
#[async_trait]
pub trait RateProvider: Send + Sync {
    fn name(&self) -> &str;

    /// 一單位 `source` 可換得的 `target` 數量
    async fn fetch_rate(&self, source: &CurrencyCode, target: &CurrencyCode)
        -> Result<RateResult>;
}

/// 自動輪播計時器送出 tick 的目的地
///
/// 沒有接收者時回傳 `false`，計時器隨即停止
pub trait TickSink: Send + Sync + 'static {
    fn deliver(&self, tick: TimerTick) -> bool;
}

impl<E> TickSink for mpsc::UnboundedSender<E>
where
    E: From<TimerTick> + Send + 'static,
{
    fn deliver(&self, tick: TimerTick) -> bool {
        self.send(E::from(tick)).is_ok()
    }
}

/// 弱參照的佇列不會讓視圖保持存活，只在送出當下升級
impl<E> TickSink for mpsc::WeakUnboundedSender<E>
where
    E: From<TimerTick> + Send + 'static,
{
    fn deliver(&self, tick: TimerTick) -> bool {
        match self.upgrade() {
            Some(tx) => tx.send(E::from(tick)).is_ok(),
            None => false,
        }
    }
}
