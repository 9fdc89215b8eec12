pub mod adapters;
pub mod config;
pub mod content;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::GuideConfig;
pub use crate::core::{
    accordion::AccordionController,
    carousel::CarouselController,
    fallback::FallbackChain,
    rate_fetch::RateFetchController,
    view::{GuideHandle, GuideView, ViewOptions},
};
pub use domain::model::{CurrencyCode, FetchPhase, Intent, RateResult, ViewSnapshot};
pub use utils::error::{GuideError, Result};
