//! Saved cards.

use reqwest::Client;
use url::Url;

use super::{ClientError, Endpoint, parse_response};
use crate::auth::AuthContext;
use crate::objects::cards::{Card, CardListResponse};

#[derive(Debug, Clone)]
pub struct CardClient {
    endpoint: Endpoint,
}

impl CardClient {
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

    /// `GET /api/cards?activeOnly=…` – list the user's saved cards.
    pub async fn get_user_cards(&self, active_only: bool) -> Result<Vec<Card>, ClientError> {
        let resp = self
            .endpoint
            .get("/api/cards")?
            .query(&[("activeOnly", active_only)])
            .send()
            .await?;

        let list: CardListResponse = parse_response(resp).await?;
        Ok(list.cards)
    }
}
