//! Runtime configuration for the checkout core.
//!
//! These types hold validated values. Loading and parsing them from a file is
//! the host's job.

mod fees;

pub use fees::FeeSchedule;

use storefront_sdk::objects::PaymentGateway;
use url::Url;

/// Everything the checkout orchestrator needs besides its collaborators.
#[derive(Debug, Clone)]
pub struct CheckoutConfig {
    /// Protection-fee rates and the fixed sales tax.
    pub fees: FeeSchedule,
    /// Gateway used for saved instruments. New-card entry always goes
    /// through Stripe.
    pub default_gateway: PaymentGateway,
    /// Where the gateway sends the buyer after a successful payment.
    pub return_url: Url,
    /// Where the gateway sends the buyer after cancelling.
    pub cancel_url: Url,
}

impl CheckoutConfig {
    /// Create a new CheckoutConfig with the default fee schedule and gateway.
    pub fn new(return_url: Url, cancel_url: Url) -> Self {
        Self {
            fees: FeeSchedule::default(),
            default_gateway: PaymentGateway::Paytabs,
            return_url,
            cancel_url,
        }
    }

    pub fn with_fees(mut self, fees: FeeSchedule) -> Self {
        self.fees = fees;
        self
    }

    pub fn with_default_gateway(mut self, gateway: PaymentGateway) -> Self {
        self.default_gateway = gateway;
        self
    }

    /// The return URL for a specific payment, tagged with its id so the
    /// landing page can reconcile it.
    pub fn return_url_for(&self, payment_id: &str) -> Url {
        let mut url = self.return_url.clone();
        url.query_pairs_mut().append_pair("paymentId", payment_id);
        url
    }
}
