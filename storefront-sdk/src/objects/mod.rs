pub mod address;
pub mod bank_accounts;
pub mod cards;
pub mod currency;
pub mod payment;

pub use address::{AddressType, DefaultAddressResponse, ShippingAddress};
pub use bank_accounts::{BankAccount, BankAccountListResponse};
pub use cards::{Card, CardListResponse};
pub use currency::{ConvertCurrencyRequest, ConvertCurrencyResponse, Currency, InvalidCurrency};
pub use payment::{
    BankAccountDetails, CardDetails, ConfirmCardPaymentResponse, CreatePaymentRequest,
    CreatePaymentResponse, GatewayError, InitializePaymentRequest, InitializePaymentResponse,
    PaymentGateway, PaymentIntentSummary, PaymentStatus, PaymentSummary, ProtectionMode,
    StatusTone,
};

/// Pull a human-readable message out of an error response body.
///
/// The backend reports failures as `{"message": "..."}` or
/// `{"error": "..."}`. Anything else yields `None`.
pub fn server_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["message", "error"]
        .iter()
        .find_map(|key| value.get(key).and_then(|v| v.as_str()))
        .filter(|msg| !msg.trim().is_empty())
        .map(str::to_owned)
}
