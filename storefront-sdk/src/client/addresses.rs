//! Address book.

use reqwest::{Client, StatusCode};
use url::Url;

use super::{ClientError, Endpoint, parse_response};
use crate::auth::AuthContext;
use crate::objects::address::{DefaultAddressResponse, ShippingAddress};

#[derive(Debug, Clone)]
pub struct AddressClient {
    endpoint: Endpoint,
}

impl AddressClient {
    pub fn new(base_url: Url, auth: AuthContext) -> Self {
        Self {
            endpoint: Endpoint::new(base_url, auth),
        }
    }

    /// Replace the default `reqwest::Client` with a custom one.
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.endpoint.set_http_client(client);
        self
    }

    /// `GET /api/addresses/default` – the user's default shipping address.
    ///
    /// A `404` means the user has not saved one yet and maps to `Ok(None)`.
    pub async fn get_default_address(&self) -> Result<Option<ShippingAddress>, ClientError> {
        let resp = self
            .endpoint
            .get("/api/addresses/default")?
            .send()
            .await?;

        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let body: DefaultAddressResponse = parse_response(resp).await?;
        Ok(body.address)
    }
}
