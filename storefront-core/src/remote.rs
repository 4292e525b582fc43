//! Port implementations backed by the SDK HTTP clients.

use async_trait::async_trait;
use storefront_sdk::client::{
    AddressClient, BankAccountClient, CardClient, ClientError, CurrencyClient, PaymentClient,
};
use storefront_sdk::objects::{
    BankAccount, Card, ConvertCurrencyRequest, ConvertCurrencyResponse, CreatePaymentRequest,
    CreatePaymentResponse, InitializePaymentRequest, InitializePaymentResponse, ShippingAddress,
};

use crate::ports::{AddressBook, CurrencyConverter, PaymentApi, PaymentMethodSource, RemoteError};

impl From<ClientError> for RemoteError {
    fn from(err: ClientError) -> Self {
        let message = err.server_message();
        match err {
            ClientError::Api { status, .. } => RemoteError::Rejected {
                status: status.as_u16(),
                message,
            },
            ClientError::Json(e) => RemoteError::InvalidResponse(e.to_string()),
            ClientError::Http(e) if e.is_decode() => RemoteError::InvalidResponse(e.to_string()),
            ClientError::Http(e) => RemoteError::Transport(e.to_string()),
            ClientError::Url(e) => RemoteError::Transport(e.to_string()),
        }
    }
}

#[async_trait]
impl PaymentApi for PaymentClient {
    async fn create_payment(
        &self,
        request: &CreatePaymentRequest,
    ) -> Result<CreatePaymentResponse, RemoteError> {
        Ok(PaymentClient::create_payment(self, request).await?)
    }

    async fn initialize_payment(
        &self,
        request: &InitializePaymentRequest,
    ) -> Result<InitializePaymentResponse, RemoteError> {
        Ok(PaymentClient::initialize_payment(self, request).await?)
    }
}

/// Cards and bank accounts fetched from their separate endpoints.
#[derive(Debug, Clone)]
pub struct RemotePaymentMethods {
    pub cards: CardClient,
    pub bank_accounts: BankAccountClient,
}

impl RemotePaymentMethods {
    pub fn new(cards: CardClient, bank_accounts: BankAccountClient) -> Self {
        Self {
            cards,
            bank_accounts,
        }
    }
}

#[async_trait]
impl PaymentMethodSource for RemotePaymentMethods {
    async fn user_cards(&self, active_only: bool) -> Result<Vec<Card>, RemoteError> {
        Ok(self.cards.get_user_cards(active_only).await?)
    }

    async fn bank_accounts(&self, active_only: bool) -> Result<Vec<BankAccount>, RemoteError> {
        Ok(self.bank_accounts.get_bank_accounts(active_only).await?)
    }
}

#[async_trait]
impl AddressBook for AddressClient {
    async fn default_address(&self) -> Result<Option<ShippingAddress>, RemoteError> {
        Ok(self.get_default_address().await?)
    }
}

#[async_trait]
impl CurrencyConverter for CurrencyClient {
    async fn convert(
        &self,
        request: &ConvertCurrencyRequest,
    ) -> Result<ConvertCurrencyResponse, RemoteError> {
        Ok(self.convert_currency(request).await?)
    }
}
