//! Payment creation and initialization.

use reqwest::Client;
use url::Url;

use super::{ClientError, Endpoint, parse_response};
use crate::auth::AuthContext;
use crate::objects::payment::{
    CreatePaymentRequest, CreatePaymentResponse, InitializePaymentRequest,
    InitializePaymentResponse,
};

/// Typed HTTP client for the two-phase payment handshake.
///
/// Each call is attempted exactly once. Retrying a creation call without an
/// idempotency key could leave duplicate payment records on the backend, so
/// resubmission is left to the caller.
#[derive(Debug, Clone)]
pub struct PaymentClient {
    endpoint: Endpoint,
}

impl PaymentClient {
    /// Create a new `PaymentClient`.
    ///
    /// * `base_url` – root URL of the storefront backend.
    /// * `auth` – credentials attached to every request.
    pub fn new(base_url: Url, auth: AuthContext) -> Self {
        Self {
            endpoint: Endpoint::new(base_url, auth),
        }
    }

    /// Replace the default `reqwest::Client` with a custom one (e.g. to
    /// configure timeouts or a proxy).
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.endpoint.set_http_client(client);
        self
    }

    /// `POST /api/payments/create` – create a payment record.
    pub async fn create_payment(
        &self,
        request: &CreatePaymentRequest,
    ) -> Result<CreatePaymentResponse, ClientError> {
        let resp = self
            .endpoint
            .post("/api/payments/create")?
            .json(request)
            .send()
            .await?;

        parse_response(resp).await
    }

    /// `POST /api/payments/initialize` – hand a created payment to its
    /// gateway.
    pub async fn initialize_payment(
        &self,
        request: &InitializePaymentRequest,
    ) -> Result<InitializePaymentResponse, ClientError> {
        let resp = self
            .endpoint
            .post("/api/payments/initialize")?
            .json(request)
            .send()
            .await?;

        parse_response(resp).await
    }
}
