//! ISO-4217 currency codes and the currency-conversion endpoint types.

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// A three-letter ISO-4217 currency code, stored upper-cased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "CompactString", into = "CompactString")]
pub struct Currency(CompactString);

#[derive(Debug, thiserror::Error)]
#[error("invalid currency code: {0:?}")]
pub struct InvalidCurrency(pub String);

impl Currency {
    /// Parse a currency code. Case-insensitive, surrounding whitespace ignored.
    pub fn new(code: &str) -> Result<Self, InvalidCurrency> {
        let trimmed = code.trim();
        if trimmed.len() != 3 || !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(InvalidCurrency(code.to_owned()));
        }
        Ok(Self(CompactString::from(trimmed.to_ascii_uppercase())))
    }

    pub fn usd() -> Self {
        Self(CompactString::const_new("USD"))
    }

    pub fn code(&self) -> &str {
        &self.0
    }

    /// Number of digits after the decimal point in the currency's minor unit.
    pub fn minor_units(&self) -> u32 {
        match self.code() {
            "JPY" | "KRW" | "VND" | "CLP" | "ISK" | "UGX" => 0,
            _ => 2,
        }
    }

    /// Display symbol for well-known currencies.
    pub fn symbol(&self) -> Option<&'static str> {
        let symbol = match self.code() {
            "USD" => "$",
            "EUR" => "€",
            "GBP" => "£",
            "JPY" => "¥",
            "INR" => "₹",
            "KRW" => "₩",
            "NGN" => "₦",
            "TRY" => "₺",
            _ => return None,
        };
        Some(symbol)
    }
}

impl TryFrom<CompactString> for Currency {
    type Error = InvalidCurrency;

    fn try_from(value: CompactString) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<Currency> for CompactString {
    fn from(value: Currency) -> Self {
        value.0
    }
}

impl std::str::FromStr for Currency {
    type Err = InvalidCurrency;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Request body for `POST /api/currency/convert`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertCurrencyRequest {
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: rust_decimal::Decimal,
    pub from_currency: Currency,
    pub to_currency: Currency,
}

/// Converted amount and the rate the backend used.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertCurrencyResponse {
    #[serde(with = "rust_decimal::serde::float")]
    pub converted_amount: rust_decimal::Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub exchange_rate: rust_decimal::Decimal,
    #[serde(with = "time::serde::rfc3339::option", default)]
    pub last_updated: Option<time::OffsetDateTime>,
}
