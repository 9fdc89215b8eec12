pub mod accordion;
pub mod carousel;
pub mod fallback;
pub mod rate_fetch;
pub mod view;

#[cfg(test)]
pub(crate) mod testing;

pub use crate::domain::model::{
    AccordionState, CarouselState, CurrencyCode, Intent, RateFetchState, RateResult,
    ViewSnapshot,
};
pub use crate::domain::ports::{RateProvider, TickSink};
pub use crate::utils::error::Result;
