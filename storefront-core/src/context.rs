//! Loading what a checkout screen needs before the buyer submits.
//!
//! Cards, bank accounts and the default address are fetched independently
//! and concurrently. Nothing is cached: each checkout screen loads its own
//! copy, so a card deleted from the wallet screen simply fails the
//! stale-selection check at submit time.

use storefront_sdk::objects::ShippingAddress;
use tracing::{debug, warn};

use crate::payment_method::{PaymentMethodOption, PaymentMethodSelector, list_methods};
use crate::ports::{AddressBook, PaymentMethodSource, RemoteError};

/// Freshly loaded checkout inputs.
#[derive(Debug, Clone, Default)]
pub struct CheckoutContext {
    pub methods: Vec<PaymentMethodOption>,
    pub default_address: Option<ShippingAddress>,
}

impl CheckoutContext {
    /// Fetch active cards, active bank accounts and the default address.
    ///
    /// Any failing list call fails the whole load. A missing default address
    /// is not an error.
    pub async fn load<M, A>(methods: &M, addresses: &A) -> Result<Self, RemoteError>
    where
        M: PaymentMethodSource + ?Sized,
        A: AddressBook + ?Sized,
    {
        let (cards, accounts, address) = tokio::join!(
            methods.user_cards(true),
            methods.bank_accounts(true),
            addresses.default_address(),
        );

        let cards = cards.inspect_err(|e| warn!("failed to load cards: {}", e))?;
        let accounts = accounts.inspect_err(|e| warn!("failed to load bank accounts: {}", e))?;
        let default_address =
            address.inspect_err(|e| warn!("failed to load default address: {}", e))?;

        debug!(
            cards = cards.len(),
            bank_accounts = accounts.len(),
            has_address = default_address.is_some(),
            "checkout context loaded"
        );

        Ok(Self {
            methods: list_methods(&cards, &accounts),
            default_address,
        })
    }

    /// A selector over the loaded methods with the default instrument
    /// pre-selected.
    pub fn selector(&self) -> PaymentMethodSelector {
        let mut selector = PaymentMethodSelector::new(self.methods.clone());
        selector.select_default();
        selector
    }
}
