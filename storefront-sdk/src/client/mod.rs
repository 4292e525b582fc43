//! HTTP clients for the storefront REST backend.
//!
//! Gated behind the `client` cargo feature so downstream crates that only
//! need the shared types do not pull in `reqwest`.

mod addresses;
mod bank_accounts;
mod cards;
mod currency;
mod payments;

pub use addresses::AddressClient;
pub use bank_accounts::BankAccountClient;
pub use cards::CardClient;
pub use currency::CurrencyClient;
pub use payments::PaymentClient;

use reqwest::{Client, RequestBuilder, StatusCode};
use url::Url;

use crate::auth::{AUTHORIZATION_HEADER, AuthContext};
use crate::objects::server_message;

/// Errors produced by the SDK HTTP clients.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Transport-level failure (DNS, TLS, connection reset, …).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server returned a non-2xx status code.
    #[error("api error: status {status}, body: {body}")]
    Api { status: StatusCode, body: String },

    /// Response body could not be deserialized.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The base URL could not be joined with the endpoint path.
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
}

impl ClientError {
    /// The message the backend attached to a failed request, if any.
    pub fn server_message(&self) -> Option<String> {
        match self {
            ClientError::Api { body, .. } => server_message(body),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Http(err) => err.status(),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }
}

/// Connection details shared by every client: the HTTP client, the backend
/// root and the caller's credentials.
#[derive(Debug, Clone)]
pub(crate) struct Endpoint {
    http: Client,
    base_url: Url,
    auth: AuthContext,
}

impl Endpoint {
    pub(crate) fn new(base_url: Url, auth: AuthContext) -> Self {
        Self {
            http: Client::new(),
            base_url,
            auth,
        }
    }

    pub(crate) fn set_http_client(&mut self, client: Client) {
        self.http = client;
    }

    pub(crate) fn get(&self, path: &str) -> Result<RequestBuilder, ClientError> {
        let url = self.base_url.join(path)?;
        Ok(self.authorize(self.http.get(url)))
    }

    pub(crate) fn post(&self, path: &str) -> Result<RequestBuilder, ClientError> {
        let url = self.base_url.join(path)?;
        Ok(self.authorize(self.http.post(url)))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.auth.header_value() {
            Some(value) => request.header(AUTHORIZATION_HEADER, value),
            None => request,
        }
    }
}

pub(crate) async fn parse_response<T: serde::de::DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<T, ClientError> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        tracing::debug!(%status, "storefront api request failed");
        return Err(ClientError::Api { status, body });
    }
    let bytes = resp.bytes().await?;
    serde_json::from_slice(&bytes).map_err(ClientError::Json)
}
