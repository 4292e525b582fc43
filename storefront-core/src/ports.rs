//! Collaborator interfaces used by the checkout core.
//!
//! Every collaborator is a REST endpoint on the storefront backend (or a
//! gateway-side card confirmation). The core only talks to them through
//! these traits; [`crate::remote`] implements them on top of the SDK
//! clients, and tests substitute doubles.

use async_trait::async_trait;
use storefront_sdk::objects::{
    BankAccount, Card, ConfirmCardPaymentResponse, ConvertCurrencyRequest,
    ConvertCurrencyResponse, CreatePaymentRequest, CreatePaymentResponse,
    InitializePaymentRequest, InitializePaymentResponse, ShippingAddress,
};
use thiserror::Error;

/// A collaborator call that did not produce a usable response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteError {
    /// The backend answered with a non-success status.
    #[error("request rejected with status {status}")]
    Rejected { status: u16, message: Option<String> },

    /// The request never produced a response (network, TLS, timeout).
    #[error("transport failure: {0}")]
    Transport(String),

    /// The response arrived but could not be understood.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl RemoteError {
    /// Message supplied by the backend, when there is one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            RemoteError::Rejected { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

/// The two-phase payment handshake.
#[async_trait]
pub trait PaymentApi: Send + Sync {
    async fn create_payment(
        &self,
        request: &CreatePaymentRequest,
    ) -> Result<CreatePaymentResponse, RemoteError>;

    async fn initialize_payment(
        &self,
        request: &InitializePaymentRequest,
    ) -> Result<InitializePaymentResponse, RemoteError>;
}

/// Gateway-side confirmation of a card payment using its client secret.
#[async_trait]
pub trait CardConfirmer: Send + Sync {
    async fn confirm_card_payment(
        &self,
        client_secret: &str,
        publishable_key: Option<&str>,
    ) -> Result<ConfirmCardPaymentResponse, RemoteError>;
}

/// Saved payment instruments. Each call fetches a fresh copy.
#[async_trait]
pub trait PaymentMethodSource: Send + Sync {
    async fn user_cards(&self, active_only: bool) -> Result<Vec<Card>, RemoteError>;

    async fn bank_accounts(&self, active_only: bool) -> Result<Vec<BankAccount>, RemoteError>;
}

#[async_trait]
pub trait AddressBook: Send + Sync {
    /// The default shipping address, or `None` if the user has none.
    async fn default_address(&self) -> Result<Option<ShippingAddress>, RemoteError>;
}

#[async_trait]
pub trait CurrencyConverter: Send + Sync {
    async fn convert(
        &self,
        request: &ConvertCurrencyRequest,
    ) -> Result<ConvertCurrencyResponse, RemoteError>;
}
