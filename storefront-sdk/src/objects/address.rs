//! Shipping addresses.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressType {
    #[default]
    Home,
    Work,
    Other,
}

/// A shipping address as stored by the address book.
///
/// The checkout treats this record as opaque and never mutates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    pub full_name: String,
    pub street1: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street2: Option<String>,
    pub city: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    pub zip_code: String,
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub address_type: AddressType,
}

impl ShippingAddress {
    /// Whether every required line carries a non-blank value.
    pub fn is_complete(&self) -> bool {
        [
            &self.full_name,
            &self.street1,
            &self.city,
            &self.zip_code,
            &self.country,
        ]
        .iter()
        .all(|field| !field.trim().is_empty())
    }
}

/// Response of `GET /api/addresses/default`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultAddressResponse {
    pub address: Option<ShippingAddress>,
}
