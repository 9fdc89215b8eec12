use crate::utils::error::{GuideError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// ISO-4217 風格的三碼幣別，一律以大寫保存
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for CurrencyCode {
    type Err = GuideError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.len() == 3 && trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
            Ok(Self(trimmed.to_ascii_uppercase()))
        } else {
            Err(GuideError::InvalidCurrencyCode {
                value: s.to_string(),
            })
        }
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = GuideError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.0
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarouselState {
    pub current_index: usize,
    pub paused: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccordionState {
    pub open_id: Option<String>,
}

/// 一單位來源幣別可換得的目標幣別數量
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateResult {
    rate: f64,
    as_of_label: String,
}

impl RateResult {
    pub fn new(rate: f64, as_of_label: impl Into<String>) -> Option<Self> {
        if rate.is_finite() && rate > 0.0 {
            Some(Self {
                rate,
                as_of_label: as_of_label.into(),
            })
        } else {
            None
        }
    }

    pub fn identity() -> Self {
        Self {
            rate: 1.0,
            as_of_label: String::new(),
        }
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn as_of_label(&self) -> &str {
        &self.as_of_label
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchPhase {
    Idle,
    Loading,
    Resolved,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateFetchState {
    pub selection: CurrencyCode,
    pub result: Option<RateResult>,
    pub loading: bool,
    pub error_message: Option<String>,
    pub request_epoch: u64,
}

impl RateFetchState {
    pub fn idle(selection: CurrencyCode) -> Self {
        Self {
            selection,
            result: None,
            loading: false,
            error_message: None,
            request_epoch: 0,
        }
    }

    pub fn phase(&self) -> FetchPhase {
        if self.loading {
            FetchPhase::Loading
        } else if self.result.is_some() {
            FetchPhase::Resolved
        } else if self.error_message.is_some() {
            FetchPhase::Failed
        } else {
            FetchPhase::Idle
        }
    }
}

/// 自動前進的一次 tick，帶有觸發它的計時器編號
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerTick {
    pub timer: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    HoverStart,
    HoverEnd,
    NavigateNext,
    NavigatePrev,
    NavigateTo(usize),
    TogglePanel(String),
    SelectCurrency(String),
}

impl FromStr for Intent {
    type Err = GuideError;

    /// 解析簡短文字指令，例如 `goto 3`、`toggle layover`、`currency EUR`
    fn from_str(s: &str) -> Result<Self> {
        let unknown = || GuideError::UnknownCommand {
            input: s.trim().to_string(),
        };
        let mut parts = s.split_whitespace();
        let command = parts.next().ok_or_else(unknown)?;
        let arg = parts.next();
        if parts.next().is_some() {
            return Err(unknown());
        }

        match (command.to_ascii_lowercase().as_str(), arg) {
            ("hover", None) => Ok(Intent::HoverStart),
            ("leave", None) => Ok(Intent::HoverEnd),
            ("next", None) => Ok(Intent::NavigateNext),
            ("prev", None) => Ok(Intent::NavigatePrev),
            // 使用者看到的編號從 1 開始
            ("goto", Some(n)) => match n.parse::<usize>() {
                Ok(n) if n >= 1 => Ok(Intent::NavigateTo(n - 1)),
                _ => Err(unknown()),
            },
            ("toggle", Some(id)) => Ok(Intent::TogglePanel(id.to_string())),
            ("currency", Some(code)) => Ok(Intent::SelectCurrency(code.to_string())),
            _ => Err(unknown()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewSnapshot {
    pub carousel: CarouselState,
    pub accordion: AccordionState,
    pub rates: RateFetchState,
}
