//! Currency conversion.

use reqwest::Client;
use url::Url;

use super::{ClientError, Endpoint, parse_response};
use crate::auth::AuthContext;
use crate::objects::currency::{ConvertCurrencyRequest, ConvertCurrencyResponse};

#[derive(Debug, Clone)]
pub struct CurrencyClient {
    endpoint: Endpoint,
}

impl CurrencyClient {
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

    /// `POST /api/currency/convert` – convert an amount between currencies.
    pub async fn convert_currency(
        &self,
        request: &ConvertCurrencyRequest,
    ) -> Result<ConvertCurrencyResponse, ClientError> {
        let resp = self
            .endpoint
            .post("/api/currency/convert")?
            .json(request)
            .send()
            .await?;

        parse_response(resp).await
    }
}
