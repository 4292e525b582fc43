//! Interpreting the initialize response.

use std::fmt;

use storefront_sdk::objects::InitializePaymentResponse;
use url::Url;

/// What the client must do after a payment has been initialized.
#[derive(Clone, PartialEq, Eq)]
pub enum NextAction {
    /// Confirm the payment in an embedded card element.
    ConfirmClientSecret {
        client_secret: String,
        publishable_key: Option<String>,
    },
    /// Navigate to the gateway's hosted payment page.
    Redirect(Url),
    /// Nothing left to do.
    Completed { transaction_id: String },
}

impl NextAction {
    /// Decide the next action. A response may carry several fields at once;
    /// the first matching rule wins:
    ///
    /// 1. new-card entry with a client secret → confirm the client secret,
    /// 2. a payment URL → redirect,
    /// 3. otherwise completed, with the transaction id or else the payment id.
    pub fn resolve(
        response: InitializePaymentResponse,
        new_card_entry: bool,
        payment_id: &str,
    ) -> Self {
        let client_secret = response.client_secret.filter(|s| !s.is_empty());
        if let (true, Some(client_secret)) = (new_card_entry, client_secret) {
            return NextAction::ConfirmClientSecret {
                client_secret,
                publishable_key: response.publishable_key,
            };
        }
        if let Some(url) = response.payment_url {
            return NextAction::Redirect(url);
        }
        let transaction_id = response
            .transaction_id
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| payment_id.to_owned());
        NextAction::Completed { transaction_id }
    }
}

impl fmt::Debug for NextAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NextAction::ConfirmClientSecret {
                publishable_key, ..
            } => f
                .debug_struct("ConfirmClientSecret")
                .field("client_secret", &"<redacted>")
                .field("publishable_key", publishable_key)
                .finish(),
            NextAction::Redirect(url) => f.debug_tuple("Redirect").field(url).finish(),
            NextAction::Completed { transaction_id } => f
                .debug_struct("Completed")
                .field("transaction_id", transaction_id)
                .finish(),
        }
    }
}

/// A payment waiting for card confirmation.
#[derive(Clone, PartialEq, Eq)]
pub struct PendingConfirmation {
    pub payment_id: String,
    pub client_secret: String,
    pub publishable_key: Option<String>,
}

impl fmt::Debug for PendingConfirmation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingConfirmation")
            .field("payment_id", &self.payment_id)
            .field("client_secret", &"<redacted>")
            .field("publishable_key", &self.publishable_key)
            .finish()
    }
}

/// Result of a successful checkout attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    Completed {
        payment_id: String,
        transaction_id: String,
    },
    /// The host should navigate to `payment_url`.
    Redirect { payment_id: String, payment_url: Url },
    /// The host should confirm the card, then call
    /// [`CheckoutOrchestrator::confirm_card`](super::CheckoutOrchestrator::confirm_card).
    AwaitingConfirmation(PendingConfirmation),
}

impl CheckoutOutcome {
    pub(crate) fn from_action(payment_id: String, action: NextAction) -> Self {
        match action {
            NextAction::ConfirmClientSecret {
                client_secret,
                publishable_key,
            } => CheckoutOutcome::AwaitingConfirmation(PendingConfirmation {
                payment_id,
                client_secret,
                publishable_key,
            }),
            NextAction::Redirect(payment_url) => CheckoutOutcome::Redirect {
                payment_id,
                payment_url,
            },
            NextAction::Completed { transaction_id } => CheckoutOutcome::Completed {
                payment_id,
                transaction_id,
            },
        }
    }

    pub fn payment_id(&self) -> &str {
        match self {
            CheckoutOutcome::Completed { payment_id, .. }
            | CheckoutOutcome::Redirect { payment_id, .. } => payment_id,
            CheckoutOutcome::AwaitingConfirmation(pending) => &pending.payment_id,
        }
    }
}
