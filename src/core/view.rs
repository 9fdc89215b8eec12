use crate::core::accordion::AccordionController;
use crate::core::carousel::CarouselController;
use crate::core::fallback::FallbackChain;
use crate::core::rate_fetch::{RateFetchController, RateOutcome};
use crate::domain::model::{CurrencyCode, Intent, TimerTick, ViewSnapshot};
use crate::utils::error::{GuideError, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};

#[derive(Debug, Clone)]
pub struct ViewOptions {
    pub auto_advance: Duration,
    pub target_currency: CurrencyCode,
    pub initial_currency: CurrencyCode,
}

/// 視圖迴圈處理的所有事件，使用者意圖、計時器 tick 與匯率結果共用同一個佇列
#[derive(Debug)]
pub enum ViewEvent {
    Intent(Intent),
    Tick(TimerTick),
    RateSettled(RateOutcome),
}

impl From<TimerTick> for ViewEvent {
    fn from(tick: TimerTick) -> Self {
        ViewEvent::Tick(tick)
    }
}

/// 呈現層持有的控制端：送出意圖、讀取快照
#[derive(Debug, Clone)]
pub struct GuideHandle {
    events: mpsc::UnboundedSender<ViewEvent>,
    snapshots: watch::Receiver<ViewSnapshot>,
}

impl GuideHandle {
    pub fn send(&self, intent: Intent) -> Result<()> {
        self.events
            .send(ViewEvent::Intent(intent))
            .map_err(|_| GuideError::ViewClosed)
    }

    pub fn snapshot(&self) -> ViewSnapshot {
        self.snapshots.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewSnapshot> {
        self.snapshots.clone()
    }
}

/// 持有三個控制器，依抵達順序逐一處理事件
///
/// 控制器之間互不相通，視圖只負責轉送。每個改變狀態的事件之後發佈一次快照。
/// 視圖本身只持有佇列的弱參照，所有 `GuideHandle` 釋放後迴圈結束，輪播計時器一併取消。
pub struct GuideView<T> {
    carousel: CarouselController<T>,
    accordion: AccordionController,
    rates: RateFetchController,
    events_tx: mpsc::WeakUnboundedSender<ViewEvent>,
    events_rx: mpsc::UnboundedReceiver<ViewEvent>,
    snapshots: watch::Sender<ViewSnapshot>,
}

impl<T: Send + 'static> GuideView<T> {
    pub fn new(
        items: Vec<T>,
        panel_ids: Vec<String>,
        chain: FallbackChain,
        options: ViewOptions,
    ) -> Result<(Self, GuideHandle)> {
        let (events_tx, events_rx) = mpsc::unbounded_channel::<ViewEvent>();
        let weak_tx = events_tx.downgrade();

        let carousel =
            CarouselController::new(items, options.auto_advance, Arc::new(weak_tx.clone()))?;
        let accordion = AccordionController::new(panel_ids);
        let rates = RateFetchController::new(
            options.target_currency,
            options.initial_currency,
            chain,
        );

        let initial = ViewSnapshot {
            carousel: carousel.state(),
            accordion: accordion.state().clone(),
            rates: rates.state().clone(),
        };
        let (snapshots_tx, snapshots_rx) = watch::channel(initial);

        let view = Self {
            carousel,
            accordion,
            rates,
            events_tx: weak_tx,
            events_rx,
            snapshots: snapshots_tx,
        };
        let handle = GuideHandle {
            events: events_tx,
            snapshots: snapshots_rx,
        };
        Ok((view, handle))
    }

    pub fn snapshot(&self) -> ViewSnapshot {
        ViewSnapshot {
            carousel: self.carousel.state(),
            accordion: self.accordion.state().clone(),
            rates: self.rates.state().clone(),
        }
    }

    pub async fn run(mut self) {
        self.carousel.start();
        let initial = self.rates.state().selection.clone();
        self.select_currency(initial);
        self.publish();

        // 單一佇列，處理順序即抵達順序
        while let Some(event) = self.events_rx.recv().await {
            self.handle_event(event);
            self.publish();
        }

        self.carousel.shutdown();
        tracing::debug!("guide view closed");
    }

    fn handle_intent(&mut self, intent: Intent) {
        tracing::debug!("intent: {:?}", intent);
        let applied = match intent {
            Intent::HoverStart => {
                self.carousel.set_paused(true);
                Ok(())
            }
            Intent::HoverEnd => {
                self.carousel.set_paused(false);
                Ok(())
            }
            Intent::NavigateNext => {
                self.carousel.next();
                Ok(())
            }
            Intent::NavigatePrev => {
                self.carousel.prev();
                Ok(())
            }
            Intent::NavigateTo(index) => self.carousel.go_to(index),
            Intent::TogglePanel(id) => self.accordion.toggle(&id),
            Intent::SelectCurrency(code) => code
                .parse::<CurrencyCode>()
                .map(|code| self.select_currency(code)),
        };

        if let Err(e) = applied {
            tracing::warn!("ignoring intent: {}", e);
        }
    }

    fn handle_event(&mut self, event: ViewEvent) {
        match event {
            ViewEvent::Intent(intent) => self.handle_intent(intent),
            ViewEvent::Tick(tick) => {
                self.carousel.on_tick(tick);
            }
            ViewEvent::RateSettled(outcome) => {
                self.rates.settle(outcome);
            }
        }
    }

    fn select_currency(&mut self, code: CurrencyCode) {
        if let Some(pending) = self.rates.select_currency(code) {
            let tx = self.events_tx.clone();
            tokio::spawn(async move {
                let outcome = pending.resolve().await;
                // 視圖已關閉時直接丟棄結果
                if let Some(tx) = tx.upgrade() {
                    let _ = tx.send(ViewEvent::RateSettled(outcome));
                }
            });
        }
    }

    fn publish(&self) {
        let next = self.snapshot();
        self.snapshots.send_if_modified(|current| {
            if *current != next {
                *current = next;
                true
            } else {
                false
            }
        });
    }
}
