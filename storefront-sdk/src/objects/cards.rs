//! Saved payment cards.

use serde::{Deserialize, Serialize};

use super::payment::PaymentGateway;

/// A card the user has saved with one of the payment gateways.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: String,
    #[serde(default)]
    pub brand: Option<String>,
    pub last4: String,
    #[serde(default)]
    pub exp_month: Option<u8>,
    #[serde(default)]
    pub exp_year: Option<u16>,
    #[serde(default)]
    pub cardholder_name: Option<String>,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub gateway: Option<PaymentGateway>,
}

impl Card {
    /// Short label such as `Visa •••• 4242`.
    pub fn display_label(&self) -> String {
        let brand = self.brand.as_deref().unwrap_or("Card");
        format!("{brand} •••• {}", self.last4)
    }
}

/// Response of `GET /api/cards`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardListResponse {
    #[serde(default)]
    pub cards: Vec<Card>,
}

fn default_true() -> bool {
    true
}
