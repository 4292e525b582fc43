//! Configuration module for the storefront CLI.
//!
//! Handles loading configuration from the TOML file, CLI overrides and the
//! environment.

pub mod file;

use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use storefront_core::config::{CheckoutConfig, FeeSchedule};
use storefront_sdk::auth::AuthContext;
use thiserror::Error;
use url::Url;

use crate::config::file::FileConfig;

/// Environment variable holding the buyer's bearer token.
pub const TOKEN_ENV: &str = "STOREFRONT_TOKEN";

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("validation error: {0}")]
    ValidationError(String),

    #[error("STOREFRONT_TOKEN environment variable not set")]
    MissingToken,
}

/// Loaded configuration.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub base_url: Url,
    pub checkout: CheckoutConfig,
}

/// Configuration loader that handles the complete loading process.
pub struct ConfigLoader {
    config_path: PathBuf,
    base_url_override: Option<Url>,
}

impl ConfigLoader {
    /// Create a new config loader.
    pub fn new(config_path: impl AsRef<Path>, base_url_override: Option<Url>) -> Self {
        Self {
            config_path: config_path.as_ref().to_path_buf(),
            base_url_override,
        }
    }

    /// Read the file, apply CLI overrides, validate and convert.
    pub fn load(&self) -> Result<LoadedConfig, ConfigError> {
        let config_content = std::fs::read_to_string(&self.config_path)?;
        self.parse(&config_content)
    }

    fn parse(&self, content: &str) -> Result<LoadedConfig, ConfigError> {
        let mut file_config: FileConfig = toml::from_str(content)?;

        if let Some(base_url) = &self.base_url_override {
            file_config.api.base_url = base_url.clone();
        }

        self.validate(&file_config)?;
        Ok(build_loaded_config(file_config))
    }

    fn validate(&self, config: &FileConfig) -> Result<(), ConfigError> {
        let fees = &config.fees;
        for (name, rate) in [
            ("escrow_rate", fees.escrow_rate),
            ("standard_rate", fees.standard_rate),
        ] {
            if rate < Decimal::ZERO || rate >= Decimal::ONE {
                return Err(ConfigError::ValidationError(format!(
                    "fees.{name} must be in [0, 1), got {rate}"
                )));
            }
        }
        if fees.sales_tax < Decimal::ZERO {
            return Err(ConfigError::ValidationError(format!(
                "fees.sales_tax must not be negative, got {}",
                fees.sales_tax
            )));
        }

        for (name, url) in [
            ("api.base_url", &config.api.base_url),
            ("checkout.return_url", &config.checkout.return_url),
            ("checkout.cancel_url", &config.checkout.cancel_url),
        ] {
            if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
                return Err(ConfigError::ValidationError(format!(
                    "{name} must be an absolute http(s) URL, got {url}"
                )));
            }
        }
        Ok(())
    }
}

fn build_loaded_config(file_config: FileConfig) -> LoadedConfig {
    let fees = FeeSchedule::new(
        file_config.fees.escrow_rate,
        file_config.fees.standard_rate,
        file_config.fees.sales_tax,
    );
    let checkout = CheckoutConfig::new(
        file_config.checkout.return_url,
        file_config.checkout.cancel_url,
    )
    .with_fees(fees)
    .with_default_gateway(file_config.checkout.default_gateway);

    LoadedConfig {
        base_url: file_config.api.base_url,
        checkout,
    }
}

/// Read the bearer token from the environment.
pub fn get_auth_token() -> Result<AuthContext, ConfigError> {
    match std::env::var(TOKEN_ENV) {
        Ok(token) if !token.trim().is_empty() => Ok(AuthContext::bearer(token)),
        _ => Err(ConfigError::MissingToken),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use storefront_sdk::objects::PaymentGateway;

    const BASE: &str = r#"
[api]
base_url = "https://api.example.com/"

[checkout]
default_gateway = "paypal"
return_url = "https://shop.example.com/ok"
cancel_url = "https://shop.example.com/cancel"
"#;

    fn loader() -> ConfigLoader {
        ConfigLoader::new("./storefront.toml", None)
    }

    #[test]
    fn test_converts_into_runtime_config() {
        let loaded = loader().parse(BASE).unwrap();
        assert_eq!(loaded.base_url.as_str(), "https://api.example.com/");
        assert_eq!(loaded.checkout.fees, FeeSchedule::default());
        assert_eq!(loaded.checkout.default_gateway, PaymentGateway::Paypal);
        assert_eq!(loaded.checkout.cancel_url.path(), "/cancel");
    }

    #[test]
    fn test_base_url_override() {
        let override_url = Url::parse("http://localhost:9000/").unwrap();
        let loaded = ConfigLoader::new("./storefront.toml", Some(override_url.clone()))
            .parse(BASE)
            .unwrap();
        assert_eq!(loaded.base_url, override_url);
    }

    #[test]
    fn test_rate_out_of_range_is_rejected() {
        let content = format!("{BASE}\n[fees]\nescrow_rate = \"1.0\"\n");
        let err = loader().parse(&content).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(msg) if msg.contains("escrow_rate")));
    }

    #[test]
    fn test_negative_tax_is_rejected() {
        let content = format!("{BASE}\n[fees]\nsales_tax = \"-0.5\"\n");
        assert!(matches!(
            loader().parse(&content),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_custom_fees_pass_through() {
        let content = format!("{BASE}\n[fees]\nstandard_rate = \"0.03\"\nsales_tax = \"1.5\"\n");
        let loaded = loader().parse(&content).unwrap();
        assert_eq!(loaded.checkout.fees.standard_rate, dec!(0.03));
        assert_eq!(loaded.checkout.fees.sales_tax, dec!(1.5));
        assert_eq!(loaded.checkout.fees.escrow_rate, dec!(0.10));
    }

    #[test]
    fn test_non_http_url_is_rejected() {
        let content = BASE.replace("https://shop.example.com/ok", "mailto:ops@example.com");
        assert!(matches!(
            loader().parse(&content),
            Err(ConfigError::ValidationError(msg)) if msg.contains("return_url")
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = ConfigLoader::new("/nonexistent/storefront.toml", None)
            .load()
            .unwrap_err();
        assert!(matches!(err, ConfigError::IoError(_)));
    }
}
