//! Payment creation and initialization types.
//!
//! A checkout is a two-phase handshake with the backend: a payment record is
//! created first, then initialized with the gateway. The initialize response
//! tells the client what to do next.

use serde::{Deserialize, Serialize};
use url::Url;

use super::address::ShippingAddress;
use super::currency::Currency;

/// Payment gateways the backend can route a payment through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentGateway {
    Stripe,
    Paytabs,
    Paypal,
}

impl std::fmt::Display for PaymentGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentGateway::Stripe => write!(f, "stripe"),
            PaymentGateway::Paytabs => write!(f, "paytabs"),
            PaymentGateway::Paypal => write!(f, "paypal"),
        }
    }
}

impl std::str::FromStr for PaymentGateway {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stripe" => Ok(PaymentGateway::Stripe),
            "paytabs" => Ok(PaymentGateway::Paytabs),
            "paypal" => Ok(PaymentGateway::Paypal),
            other => Err(format!("unknown payment gateway: {other}")),
        }
    }
}

/// Buyer protection chosen at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProtectionMode {
    Escrow,
    Standard,
}

impl ProtectionMode {
    pub fn from_escrow_flag(use_escrow: bool) -> Self {
        if use_escrow {
            ProtectionMode::Escrow
        } else {
            ProtectionMode::Standard
        }
    }
}

/// Itemized price sent along with a payment-creation request. Amounts go
/// over the wire as JSON numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSummary {
    #[serde(with = "rust_decimal::serde::float")]
    pub product_price: rust_decimal::Decimal,
    pub protection_mode: ProtectionMode,
    #[serde(with = "rust_decimal::serde::float")]
    pub protection_fee: rust_decimal::Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub shipping_cost: rust_decimal::Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub sales_tax: rust_decimal::Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: rust_decimal::Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardDetails {
    pub card_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankAccountDetails {
    pub account_id: String,
}

/// Request body for `POST /api/payments/create`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentRequest {
    pub product_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offer_id: Option<String>,
    pub payment_gateway: PaymentGateway,
    pub currency: Currency,
    pub shipping_address: ShippingAddress,
    pub payment_summary: PaymentSummary,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_details: Option<CardDetails>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_account_details: Option<BankAccountDetails>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentResponse {
    #[serde(alias = "id")]
    pub payment_id: String,
}

/// Request body for `POST /api/payments/initialize`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializePaymentRequest {
    pub payment_id: String,
    pub return_url: Url,
    pub cancel_url: Url,
}

/// Raw initialize response. Several fields may be present at once; the
/// checkout decides which one wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializePaymentResponse {
    #[serde(default)]
    pub client_secret: Option<String>,
    #[serde(default)]
    pub publishable_key: Option<String>,
    #[serde(default)]
    pub payment_url: Option<Url>,
    #[serde(default)]
    pub transaction_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentIntentSummary {
    pub id: String,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayError {
    #[serde(default)]
    pub code: Option<String>,
    pub message: String,
}

/// Result of confirming a card payment with the gateway's client secret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmCardPaymentResponse {
    #[serde(default)]
    pub payment_intent: Option<PaymentIntentSummary>,
    #[serde(default)]
    pub error: Option<GatewayError>,
}

/// Payment status as reported by the backend, which owns the lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Processing,
    Completed,
    Failed,
    Cancelled,
    Refunded,
    #[serde(other)]
    Unknown,
}

/// Colour family used when rendering a status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusTone {
    Neutral,
    Progress,
    Success,
    Danger,
}

impl PaymentStatus {
    pub fn tone(self) -> StatusTone {
        match self {
            PaymentStatus::Pending | PaymentStatus::Processing => StatusTone::Progress,
            PaymentStatus::Completed => StatusTone::Success,
            PaymentStatus::Failed | PaymentStatus::Cancelled => StatusTone::Danger,
            PaymentStatus::Refunded | PaymentStatus::Unknown => StatusTone::Neutral,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            PaymentStatus::Completed
                | PaymentStatus::Failed
                | PaymentStatus::Cancelled
                | PaymentStatus::Refunded
        )
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentStatus::Pending => write!(f, "pending"),
            PaymentStatus::Processing => write!(f, "processing"),
            PaymentStatus::Completed => write!(f, "completed"),
            PaymentStatus::Failed => write!(f, "failed"),
            PaymentStatus::Cancelled => write!(f, "cancelled"),
            PaymentStatus::Refunded => write!(f, "refunded"),
            PaymentStatus::Unknown => write!(f, "unknown"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_summary_amounts_are_json_numbers() {
        let summary = PaymentSummary {
            product_price: dec!(80),
            protection_mode: ProtectionMode::Escrow,
            protection_fee: dec!(8.00),
            shipping_cost: dec!(5),
            sales_tax: dec!(0.72),
            total: dec!(93.72),
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["total"], serde_json::json!(93.72));
        assert_eq!(json["salesTax"], serde_json::json!(0.72));
        assert!(json["productPrice"].is_number());
        assert_eq!(json["protectionMode"], "escrow");

        let back: PaymentSummary = serde_json::from_value(json).unwrap();
        assert_eq!(back.total, dec!(93.72));
        assert_eq!(back.product_price, dec!(80));
    }

    #[test]
    fn test_initialize_response_with_multiple_fields() {
        let json = r#"{
            "clientSecret": "pi_123_secret_456",
            "publishableKey": "pk_test_abc",
            "paymentUrl": "https://secure.paytabs.com/payment/page/abc"
        }"#;
        let resp: InitializePaymentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.client_secret.as_deref(), Some("pi_123_secret_456"));
        assert!(resp.payment_url.is_some());
        assert!(resp.transaction_id.is_none());
    }

    #[test]
    fn test_create_response_alias_and_gateway_parsing() {
        let resp: CreatePaymentResponse = serde_json::from_str(r#"{"id":"p_9"}"#).unwrap();
        assert_eq!(resp.payment_id, "p_9");

        let gateway: PaymentGateway = serde_json::from_str("\"paytabs\"").unwrap();
        assert_eq!(gateway, PaymentGateway::Paytabs);
        assert_eq!("Stripe".parse::<PaymentGateway>().unwrap(), PaymentGateway::Stripe);
        assert!("venmo".parse::<PaymentGateway>().is_err());
    }

    #[test]
    fn test_payment_status_tone() {
        let status: PaymentStatus = serde_json::from_str("\"processing\"").unwrap();
        assert_eq!(status.tone(), StatusTone::Progress);
        assert!(!status.is_terminal());

        let unknown: PaymentStatus = serde_json::from_str("\"on_hold\"").unwrap();
        assert_eq!(unknown, PaymentStatus::Unknown);
        assert_eq!(unknown.tone(), StatusTone::Neutral);

        assert_eq!(PaymentStatus::Failed.tone(), StatusTone::Danger);
        assert!(PaymentStatus::Refunded.is_terminal());
        assert_eq!(PaymentStatus::Cancelled.to_string(), "cancelled");
    }

    #[test]
    fn test_confirm_response_parsing() {
        let declined: ConfirmCardPaymentResponse = serde_json::from_str(
            r#"{"error":{"code":"card_declined","message":"Your card was declined."}}"#,
        )
        .unwrap();
        assert!(declined.payment_intent.is_none());
        assert_eq!(
            declined.error.map(|e| e.message).as_deref(),
            Some("Your card was declined.")
        );

        let ok: ConfirmCardPaymentResponse = serde_json::from_str(
            r#"{"paymentIntent":{"id":"pi_1","status":"succeeded"}}"#,
        )
        .unwrap();
        assert_eq!(ok.payment_intent.map(|p| p.id).as_deref(), Some("pi_1"));
    }
}
