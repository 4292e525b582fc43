//! Test doubles and fixtures shared by the checkout integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use storefront_core::checkout::CheckoutRequest;
use storefront_core::config::CheckoutConfig;
use storefront_core::payment_method::{PaymentMethodSelection, list_methods};
use storefront_core::ports::{CardConfirmer, PaymentApi, RemoteError};
use storefront_core::pricing::PricingInput;
use storefront_sdk::objects::{
    AddressType, BankAccount, Card, ConfirmCardPaymentResponse, CreatePaymentRequest,
    CreatePaymentResponse, Currency, GatewayError, InitializePaymentRequest,
    InitializePaymentResponse, PaymentIntentSummary, ShippingAddress,
};
use tokio::sync::Notify;
use url::Url;

/// A scripted payment backend that records every call.
pub struct ScriptedPayments {
    pub create_calls: AtomicUsize,
    pub init_calls: AtomicUsize,
    pub created: Mutex<Vec<CreatePaymentRequest>>,
    pub initialized: Mutex<Vec<InitializePaymentRequest>>,
    create_result: Result<CreatePaymentResponse, RemoteError>,
    init_result: Result<InitializePaymentResponse, RemoteError>,
    /// Signalled when `create_payment` is entered.
    pub entered: Arc<Notify>,
    /// When set, `create_payment` waits for this before answering.
    pub gate: Option<Arc<Notify>>,
}

impl ScriptedPayments {
    pub fn new(init: InitializePaymentResponse) -> Self {
        Self {
            create_calls: AtomicUsize::new(0),
            init_calls: AtomicUsize::new(0),
            created: Mutex::new(Vec::new()),
            initialized: Mutex::new(Vec::new()),
            create_result: Ok(CreatePaymentResponse {
                payment_id: "pay_1".into(),
            }),
            init_result: Ok(init),
            entered: Arc::new(Notify::new()),
            gate: None,
        }
    }

    pub fn completing() -> Self {
        Self::new(InitializePaymentResponse {
            transaction_id: Some("txn_1".into()),
            ..Default::default()
        })
    }

    pub fn failing_create(error: RemoteError) -> Self {
        Self {
            create_result: Err(error),
            ..Self::completing()
        }
    }

    pub fn failing_init(error: RemoteError) -> Self {
        Self {
            init_result: Err(error),
            ..Self::completing()
        }
    }

    pub fn gated(mut self) -> Self {
        self.gate = Some(Arc::new(Notify::new()));
        self
    }

    pub fn creates(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn inits(&self) -> usize {
        self.init_calls.load(Ordering::SeqCst)
    }

    pub fn last_create(&self) -> CreatePaymentRequest {
        self.created.lock().unwrap().last().cloned().unwrap()
    }

    pub fn last_init(&self) -> InitializePaymentRequest {
        self.initialized.lock().unwrap().last().cloned().unwrap()
    }
}

#[async_trait]
impl PaymentApi for ScriptedPayments {
    async fn create_payment(
        &self,
        request: &CreatePaymentRequest,
    ) -> Result<CreatePaymentResponse, RemoteError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        self.created.lock().unwrap().push(request.clone());
        self.entered.notify_one();
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.create_result.clone()
    }

    async fn initialize_payment(
        &self,
        request: &InitializePaymentRequest,
    ) -> Result<InitializePaymentResponse, RemoteError> {
        self.init_calls.fetch_add(1, Ordering::SeqCst);
        self.initialized.lock().unwrap().push(request.clone());
        self.init_result.clone()
    }
}

/// Card confirmation double returning a fixed answer.
pub struct FixedConfirmer {
    pub response: Result<ConfirmCardPaymentResponse, RemoteError>,
    pub calls: AtomicUsize,
}

impl FixedConfirmer {
    pub fn succeeding(intent_id: &str) -> Self {
        Self::with_status(intent_id, "succeeded")
    }

    pub fn with_status(intent_id: &str, status: &str) -> Self {
        Self {
            response: Ok(ConfirmCardPaymentResponse {
                payment_intent: Some(PaymentIntentSummary {
                    id: intent_id.into(),
                    status: Some(status.into()),
                }),
                error: None,
            }),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn declining(message: &str) -> Self {
        Self {
            response: Ok(ConfirmCardPaymentResponse {
                payment_intent: None,
                error: Some(GatewayError {
                    code: Some("card_declined".into()),
                    message: message.into(),
                }),
            }),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl CardConfirmer for FixedConfirmer {
    async fn confirm_card_payment(
        &self,
        _client_secret: &str,
        _publishable_key: Option<&str>,
    ) -> Result<ConfirmCardPaymentResponse, RemoteError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.response.clone()
    }
}

pub fn config() -> CheckoutConfig {
    CheckoutConfig::new(
        Url::parse("https://shop.example.com/payment/success").unwrap(),
        Url::parse("https://shop.example.com/payment/cancel").unwrap(),
    )
}

pub fn address() -> ShippingAddress {
    ShippingAddress {
        full_name: "Jane Doe".into(),
        street1: "1 Market St".into(),
        street2: Some("Suite 200".into()),
        city: "San Francisco".into(),
        state: Some("CA".into()),
        zip_code: "94105".into(),
        country: "US".into(),
        phone_number: Some("+14155550100".into()),
        address_type: AddressType::Work,
    }
}

pub fn card(id: &str) -> Card {
    Card {
        id: id.into(),
        brand: Some("Visa".into()),
        last4: "4242".into(),
        exp_month: Some(1),
        exp_year: Some(2031),
        cardholder_name: Some("Jane Doe".into()),
        is_default: false,
        is_active: true,
        gateway: None,
    }
}

pub fn bank_account(id: &str) -> BankAccount {
    BankAccount {
        id: id.into(),
        bank_name: "Chase".into(),
        account_holder_name: "Jane Doe".into(),
        account_number: Some("****6789".into()),
        iban: None,
        currency: Some(Currency::usd()),
        is_default: false,
        is_active: true,
    }
}

pub fn pricing(use_escrow: bool) -> PricingInput {
    PricingInput {
        product_price: dec!(100),
        offer_amount: Some(dec!(80)),
        shipping_cost: dec!(5),
        use_escrow,
        currency: Currency::usd(),
    }
}

/// An order for `prod_1`. Cards `c1`, `c2` and bank account `b1` are loaded.
pub fn request(selection: PaymentMethodSelection) -> CheckoutRequest {
    CheckoutRequest {
        product_id: "prod_1".into(),
        offer_id: Some("offer_1".into()),
        pricing: pricing(true),
        shipping_address: Some(address()),
        selection: Some(selection),
        available_methods: list_methods(&[card("c1"), card("c2")], &[bank_account("b1")]),
    }
}

pub fn saved_card(id: &str) -> PaymentMethodSelection {
    PaymentMethodSelection::SavedCard { card_id: id.into() }
}

pub fn price(value: Decimal) -> PricingInput {
    PricingInput {
        product_price: value,
        ..pricing(true)
    }
}
