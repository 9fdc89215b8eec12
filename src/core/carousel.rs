use crate::domain::model::{CarouselState, TimerTick};
use crate::domain::ports::TickSink;
use crate::utils::error::{GuideError, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

pub const DEFAULT_AUTO_ADVANCE: Duration = Duration::from_millis(5000);

struct ArmedTimer {
    id: u64,
    handle: JoinHandle<()>,
}

/// 在固定且非空的項目間輪播，可自動前進也可手動切換
///
/// 任何時刻最多只有一個自動前進計時器。暫停時取消計時器，恢復時重新計算完整週期。
/// 每個 tick 帶有觸發它的計時器編號，不屬於目前計時器的 tick 一律丟棄。
///
/// # Panics
///
/// `start` 與 `set_paused(false)` 會以 `tokio::spawn` 建立計時器，
/// 必須在 Tokio runtime 內呼叫，否則會 panic。
pub struct CarouselController<T> {
    items: Vec<T>,
    state: CarouselState,
    period: Duration,
    sink: Arc<dyn TickSink>,
    timer: Option<ArmedTimer>,
    last_timer_id: u64,
}

impl<T> CarouselController<T> {
    pub fn new(items: Vec<T>, period: Duration, sink: Arc<dyn TickSink>) -> Result<Self> {
        if items.is_empty() {
            return Err(GuideError::EmptyCarousel);
        }

        Ok(Self {
            items,
            state: CarouselState {
                current_index: 0,
                paused: false,
            },
            period,
            sink,
            timer: None,
            last_timer_id: 0,
        })
    }

    pub fn state(&self) -> CarouselState {
        self.state
    }

    pub fn current(&self) -> &T {
        &self.items[self.state.current_index]
    }

    pub fn has_timer(&self) -> bool {
        self.timer.is_some()
    }

    pub fn next(&mut self) {
        self.state.current_index = (self.state.current_index + 1) % self.items.len();
        tracing::debug!("carousel -> {}", self.state.current_index);
    }

    pub fn prev(&mut self) {
        let len = self.items.len();
        self.state.current_index = (self.state.current_index + len - 1) % len;
        tracing::debug!("carousel -> {}", self.state.current_index);
    }

    /// 超出範圍的索引回傳錯誤，狀態不變
    pub fn go_to(&mut self, index: usize) -> Result<()> {
        if index >= self.items.len() {
            return Err(GuideError::IndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        self.state.current_index = index;
        tracing::debug!("carousel -> {}", index);
        Ok(())
    }

    /// 暫停狀態確實改變時回傳 `true`
    ///
    /// # Panics
    ///
    /// 由暫停恢復時需要 Tokio runtime
    pub fn set_paused(&mut self, paused: bool) -> bool {
        if self.state.paused == paused {
            return false;
        }

        self.state.paused = paused;
        if paused {
            self.disarm();
        } else {
            self.arm();
        }
        true
    }

    /// 啟動自動前進計時器 (已暫停或已在執行時不動作)
    ///
    /// # Panics
    ///
    /// 不在 Tokio runtime 內呼叫時會 panic
    pub fn start(&mut self) {
        if !self.state.paused && self.timer.is_none() {
            self.arm();
        }
    }

    /// 套用計時器 tick，確實前進時回傳 `true`
    pub fn on_tick(&mut self, tick: TimerTick) -> bool {
        match &self.timer {
            Some(armed) if armed.id == tick.timer && !self.state.paused => {
                self.next();
                true
            }
            _ => {
                tracing::debug!("dropping tick from cancelled timer {}", tick.timer);
                false
            }
        }
    }

    /// 取消計時器，拆除視圖時呼叫
    pub fn shutdown(&mut self) {
        self.disarm();
    }

    fn arm(&mut self) {
        self.disarm();

        self.last_timer_id += 1;
        let id = self.last_timer_id;
        let period = self.period;
        let sink = Arc::clone(&self.sink);

        let handle = tokio::spawn(async move {
            // 第一次觸發在一個完整週期之後，不立即觸發
            let mut ticker = time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if !sink.deliver(TimerTick { timer: id }) {
                    break;
                }
            }
        });

        tracing::debug!("armed auto-advance timer {} ({:?})", id, period);
        self.timer = Some(ArmedTimer { id, handle });
    }

    fn disarm(&mut self) {
        if let Some(armed) = self.timer.take() {
            armed.handle.abort();
            tracing::debug!("cancelled auto-advance timer {}", armed.id);
        }
    }
}

impl<T> Drop for CarouselController<T> {
    fn drop(&mut self) {
        self.disarm();
    }
}
