use crate::config::GuideConfig;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "doha-guide")]
#[command(about = "Day in Doha guide: attractions carousel, travel Q&A and a live currency converter")]
pub struct CliConfig {
    #[arg(long, help = "Path to a TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Currency to convert from at start-up, e.g. EUR")]
    pub currency: Option<String>,

    #[arg(long, help = "Carousel auto-advance period in milliseconds")]
    pub auto_advance_ms: Option<u64>,

    #[arg(long, help = "Print snapshots as JSON lines")]
    pub json: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// 載入配置檔 (或預設值)，套用命令列覆寫後驗證
    pub fn load_guide_config(&self) -> Result<GuideConfig> {
        let mut config = match &self.config {
            Some(path) => GuideConfig::from_file(path)?,
            None => GuideConfig::default(),
        };

        if let Some(currency) = &self.currency {
            config.rates.default_currency = currency.clone();
        }
        if let Some(ms) = self.auto_advance_ms {
            config.carousel.auto_advance_ms = ms;
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_overrides_apply_on_top_of_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[carousel]\nauto_advance_ms = 9000\n[rates]\ndefault_currency = \"GBP\"\n")
            .unwrap();

        let cli = CliConfig::parse_from([
            "doha-guide",
            "--config",
            temp_file.path().to_str().unwrap(),
            "--currency",
            "eur",
        ]);
        let config = cli.load_guide_config().unwrap();

        assert_eq!(config.rates.default_currency, "eur");
        assert_eq!(config.carousel.auto_advance_ms, 9000);
    }

    #[test]
    fn test_bad_override_fails_validation() {
        let cli = CliConfig::parse_from(["doha-guide", "--currency", "euros"]);
        assert!(cli.load_guide_config().is_err());
    }

    #[test]
    fn test_defaults_without_flags() {
        let cli = CliConfig::parse_from(["doha-guide"]);
        assert!(!cli.json);
        assert_eq!(cli.load_guide_config().unwrap(), GuideConfig::default());
    }
}
