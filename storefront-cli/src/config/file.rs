//! TOML file configuration structures.
//!
//! These structs directly map to the `storefront.toml` file format.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use storefront_core::config::FeeSchedule;
use storefront_sdk::objects::PaymentGateway;
use url::Url;

/// Root configuration structure as read from the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileConfig {
    pub api: ApiConfig,
    #[serde(default)]
    pub fees: FeesConfig,
    pub checkout: CheckoutConfig,
}

/// Backend connection section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Root of the storefront REST API, e.g. `https://api.example.com/`.
    pub base_url: Url,
}

/// Protection-fee and tax section. Every key is optional.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeesConfig {
    #[serde(default = "default_escrow_rate")]
    pub escrow_rate: Decimal,
    #[serde(default = "default_standard_rate")]
    pub standard_rate: Decimal,
    #[serde(default = "default_sales_tax")]
    pub sales_tax: Decimal,
}

impl Default for FeesConfig {
    fn default() -> Self {
        Self {
            escrow_rate: default_escrow_rate(),
            standard_rate: default_standard_rate(),
            sales_tax: default_sales_tax(),
        }
    }
}

fn default_escrow_rate() -> Decimal {
    FeeSchedule::DEFAULT_ESCROW_RATE
}

fn default_standard_rate() -> Decimal {
    FeeSchedule::DEFAULT_STANDARD_RATE
}

fn default_sales_tax() -> Decimal {
    FeeSchedule::DEFAULT_SALES_TAX
}

/// Checkout section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutConfig {
    /// Gateway for saved cards and bank accounts.
    #[serde(default = "default_gateway")]
    pub default_gateway: PaymentGateway,
    pub return_url: Url,
    pub cancel_url: Url,
}

fn default_gateway() -> PaymentGateway {
    PaymentGateway::Paytabs
}
