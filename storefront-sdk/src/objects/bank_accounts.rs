//! Bank accounts registered for payments and withdrawals.

use serde::{Deserialize, Serialize};

use super::currency::Currency;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankAccount {
    pub id: String,
    pub bank_name: String,
    pub account_holder_name: String,
    /// Masked account number, e.g. `****6789`.
    #[serde(default)]
    pub account_number: Option<String>,
    #[serde(default)]
    pub iban: Option<String>,
    #[serde(default)]
    pub currency: Option<Currency>,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl BankAccount {
    /// Last four characters of whichever account identifier is known.
    pub fn last4(&self) -> Option<&str> {
        let number = self.account_number.as_deref().or(self.iban.as_deref())?;
        let start = number.char_indices().rev().nth(3).map_or(0, |(i, _)| i);
        Some(&number[start..])
    }

    pub fn display_label(&self) -> String {
        match self.last4() {
            Some(last4) => format!("{} •••• {last4}", self.bank_name),
            None => self.bank_name.clone(),
        }
    }
}

/// Response of `GET /api/bank-accounts`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankAccountListResponse {
    #[serde(default)]
    pub accounts: Vec<BankAccount>,
}

fn default_true() -> bool {
    true
}
