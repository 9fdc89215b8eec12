use thiserror::Error;

/// 兩個匯率來源都失敗時顯示給使用者的訊息
pub const RATE_UNAVAILABLE_MESSAGE: &str =
    "Live exchange rate is unavailable right now. Please try again in a moment.";

#[derive(Error, Debug)]
pub enum GuideError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Provider {provider} responded with status {status}")]
    ProviderStatus { provider: String, status: u16 },

    #[error("Provider {provider} returned an unusable payload: {reason}")]
    InvalidPayload { provider: String, reason: String },

    #[error("Invalid currency code: {value:?}")]
    InvalidCurrencyCode { value: String },

    #[error("Carousel index {index} is out of range (length {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Unknown panel: {id}")]
    UnknownPanel { id: String },

    #[error("Carousel needs at least one item")]
    EmptyCarousel,

    #[error("Unrecognised command: {input:?}")]
    UnknownCommand { input: String },

    #[error("The guide view has shut down")]
    ViewClosed,
}

impl GuideError {
    pub fn user_friendly_message(&self) -> String {
        match self {
            GuideError::ApiError(_)
            | GuideError::ProviderStatus { .. }
            | GuideError::InvalidPayload { .. } => RATE_UNAVAILABLE_MESSAGE.to_string(),
            GuideError::ConfigError { message } => format!("Configuration problem: {}", message),
            GuideError::InvalidConfigValueError { field, reason, .. } => {
                format!("Please check `{}` in your configuration: {}", field, reason)
            }
            GuideError::InvalidCurrencyCode { value } => {
                format!("{:?} is not a currency code (expected something like EUR)", value)
            }
            GuideError::IndexOutOfRange { len, .. } => {
                format!("Pick an attraction between 1 and {}", len)
            }
            GuideError::UnknownPanel { id } => format!("There is no question called {:?}", id),
            GuideError::UnknownCommand { input } => format!("Unknown command: {}", input),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, GuideError>;
