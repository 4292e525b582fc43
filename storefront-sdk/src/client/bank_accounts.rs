//! Bank accounts.

use reqwest::Client;
use url::Url;

use super::{ClientError, Endpoint, parse_response};
use crate::auth::AuthContext;
use crate::objects::bank_accounts::{BankAccount, BankAccountListResponse};

#[derive(Debug, Clone)]
pub struct BankAccountClient {
    endpoint: Endpoint,
}

impl BankAccountClient {
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

    /// `GET /api/bank-accounts?activeOnly=…` – list the user's bank accounts.
    pub async fn get_bank_accounts(
        &self,
        active_only: bool,
    ) -> Result<Vec<BankAccount>, ClientError> {
        let resp = self
            .endpoint
            .get("/api/bank-accounts")?
            .query(&[("activeOnly", active_only)])
            .send()
            .await?;

        let list: BankAccountListResponse = parse_response(resp).await?;
        Ok(list.accounts)
    }
}
