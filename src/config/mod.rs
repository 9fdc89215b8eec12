#[cfg(feature = "cli")]
pub mod cli;

#[cfg(feature = "cli")]
pub use cli::CliConfig;

use crate::adapters::{build_client, PairQuoteProvider, RateTableProvider};
use crate::core::carousel::DEFAULT_AUTO_ADVANCE;
use crate::core::fallback::FallbackChain;
use crate::core::view::ViewOptions;
use crate::domain::ports::RateProvider;
use crate::utils::error::{GuideError, Result};
use crate::utils::validation::{
    validate_currency_code, validate_positive_number, validate_range, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_PRIMARY_ENDPOINT: &str = "https://api.frankfurter.app";
pub const DEFAULT_FALLBACK_ENDPOINT: &str = "https://open.er-api.com/v6";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuideConfig {
    pub carousel: CarouselConfig,
    pub rates: RatesConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    pub auto_advance_ms: u64,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            auto_advance_ms: DEFAULT_AUTO_ADVANCE.as_millis() as u64,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatesConfig {
    pub target_currency: String,
    pub default_currency: String,
    pub request_timeout_seconds: u64,
    pub primary: ProviderConfig,
    pub fallback: ProviderConfig,
}

impl Default for RatesConfig {
    fn default() -> Self {
        Self {
            target_currency: "QAR".to_string(),
            default_currency: "USD".to_string(),
            request_timeout_seconds: 10,
            primary: ProviderConfig {
                endpoint: DEFAULT_PRIMARY_ENDPOINT.to_string(),
            },
            fallback: ProviderConfig {
                endpoint: DEFAULT_FALLBACK_ENDPOINT.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub endpoint: String,
}

impl GuideConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置，缺少的欄位使用預設值
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| GuideError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${RATES_ENDPOINT})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| GuideError::ConfigError {
            message: format!("env substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_positive_number("carousel.auto_advance_ms", self.carousel.auto_advance_ms, 100)?;
        validate_currency_code("rates.target_currency", &self.rates.target_currency)?;
        validate_currency_code("rates.default_currency", &self.rates.default_currency)?;
        validate_range(
            "rates.request_timeout_seconds",
            self.rates.request_timeout_seconds,
            1,
            120,
        )?;
        validate_url("rates.primary.endpoint", &self.rates.primary.endpoint)?;
        validate_url("rates.fallback.endpoint", &self.rates.fallback.endpoint)?;
        Ok(())
    }

    pub fn auto_advance(&self) -> Duration {
        Duration::from_millis(self.carousel.auto_advance_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.rates.request_timeout_seconds)
    }

    pub fn view_options(&self) -> Result<ViewOptions> {
        Ok(ViewOptions {
            auto_advance: self.auto_advance(),
            target_currency: validate_currency_code(
                "rates.target_currency",
                &self.rates.target_currency,
            )?,
            initial_currency: validate_currency_code(
                "rates.default_currency",
                &self.rates.default_currency,
            )?,
        })
    }

    /// 先查主要的 pair-quote 來源，失敗再改用 rate-table 備援
    pub fn build_chain(&self) -> Result<FallbackChain> {
        let client = build_client(self.request_timeout())?;
        let providers: Vec<Arc<dyn RateProvider>> = vec![
            Arc::new(PairQuoteProvider::new(
                client.clone(),
                self.rates.primary.endpoint.clone(),
            )),
            Arc::new(RateTableProvider::new(
                client,
                self.rates.fallback.endpoint.clone(),
            )),
        ];
        Ok(FallbackChain::new(providers))
    }
}

impl Validate for GuideConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[carousel]
auto_advance_ms = 7000

[rates]
target_currency = "QAR"
default_currency = "EUR"
request_timeout_seconds = 5

[rates.primary]
endpoint = "https://rates.example.com"

[rates.fallback]
endpoint = "https://backup.example.com/v6"
"#;

        let config = GuideConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.auto_advance(), Duration::from_millis(7000));
        assert_eq!(config.rates.default_currency, "EUR");
        assert_eq!(config.rates.primary.endpoint, "https://rates.example.com");
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config = GuideConfig::from_toml_str("[carousel]\nauto_advance_ms = 3000\n").unwrap();

        assert_eq!(config.carousel.auto_advance_ms, 3000);
        assert_eq!(config.rates, RatesConfig::default());

        let empty = GuideConfig::from_toml_str("").unwrap();
        assert_eq!(empty, GuideConfig::default());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("DOHA_GUIDE_TEST_FALLBACK", "https://fallback.test");

        let toml_content = r#"
[rates.fallback]
endpoint = "${DOHA_GUIDE_TEST_FALLBACK}"
"#;

        let config = GuideConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.rates.fallback.endpoint, "https://fallback.test");

        std::env::remove_var("DOHA_GUIDE_TEST_FALLBACK");
    }

    #[test]
    fn test_unset_env_var_is_left_alone() {
        let toml_content = r#"
[rates.primary]
endpoint = "${DOHA_GUIDE_TEST_NEVER_SET}"
"#;

        let config = GuideConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.rates.primary.endpoint, "${DOHA_GUIDE_TEST_NEVER_SET}");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation() {
        let mut config = GuideConfig::default();
        assert!(config.validate().is_ok());

        config.rates.target_currency = "riyal".to_string();
        assert!(config.validate().is_err());

        let mut config = GuideConfig::default();
        config.carousel.auto_advance_ms = 0;
        assert!(config.validate().is_err());

        let mut config = GuideConfig::default();
        config.rates.fallback.endpoint = "ftp://rates.example.com".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = GuideConfig::from_toml_str("[carousel\nauto_advance_ms = ").unwrap_err();
        assert!(matches!(err, GuideError::ConfigError { .. }));
    }

    #[test]
    fn test_view_options_from_config() {
        let options = GuideConfig::default().view_options().unwrap();
        assert_eq!(options.target_currency.as_str(), "QAR");
        assert_eq!(options.initial_currency.as_str(), "USD");
        assert_eq!(options.auto_advance, Duration::from_millis(5000));
        assert_eq!(options.auto_advance, DEFAULT_AUTO_ADVANCE);
    }

    #[test]
    fn test_default_chain_order() {
        let chain = GuideConfig::default().build_chain().unwrap();
        assert_eq!(
            chain.provider_names(),
            vec![PairQuoteProvider::NAME, RateTableProvider::NAME]
        );
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[rates]\ndefault_currency = \"GBP\"\n")
            .unwrap();

        let config = GuideConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.rates.default_currency, "GBP");
    }
}
