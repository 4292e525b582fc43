//! Checkout orchestrator.
//!
//! Validates an order locally, then drives the two-phase handshake with the
//! backend: create a payment record, initialize it with the gateway, and
//! interpret the reply. The phases run strictly in sequence and each runs
//! once. A failed call is reported, never retried: resubmitting is a new,
//! independent attempt.
//!
//! Only one attempt may be in flight per orchestrator. A second submit while
//! one is running is rejected with `ALREADY_PROCESSING` before any network
//! call is made.

mod guard;
mod outcome;
mod state;

pub use outcome::{CheckoutOutcome, NextAction, PendingConfirmation};
pub use state::{CheckoutFailure, CheckoutState, FailureCategory, FailureReason};

use std::sync::atomic::{AtomicBool, Ordering};

use storefront_sdk::objects::{
    BankAccountDetails, CardDetails, CreatePaymentRequest, InitializePaymentRequest,
    PaymentGateway, ShippingAddress,
};
use tokio::sync::watch;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::CheckoutConfig;
use crate::events::{Notification, Notifier};
use crate::payment_method::{self, PaymentMethodOption, PaymentMethodSelection};
use crate::ports::{CardConfirmer, PaymentApi};
use crate::pricing::{PricingBreakdown, PricingCalculator, PricingInput};
use guard::InFlightGuard;

/// Everything the buyer submitted, plus the method list as currently loaded.
#[derive(Debug, Clone)]
pub struct CheckoutRequest {
    pub product_id: String,
    pub offer_id: Option<String>,
    pub pricing: PricingInput,
    pub shipping_address: Option<ShippingAddress>,
    pub selection: Option<PaymentMethodSelection>,
    pub available_methods: Vec<PaymentMethodOption>,
}

/// Gateway for a selection: new-card entry always goes through Stripe,
/// saved instruments through the account's configured default.
pub fn gateway_for(selection: &PaymentMethodSelection, default_gateway: PaymentGateway) -> PaymentGateway {
    match selection {
        PaymentMethodSelection::NewCard => PaymentGateway::Stripe,
        PaymentMethodSelection::SavedCard { .. } | PaymentMethodSelection::BankAccount { .. } => {
            default_gateway
        }
    }
}

/// Drives checkout attempts against a [`PaymentApi`].
pub struct CheckoutOrchestrator<P> {
    payments: P,
    config: CheckoutConfig,
    calculator: PricingCalculator,
    in_flight: AtomicBool,
    state_tx: watch::Sender<CheckoutState>,
    notifier: Notifier,
}

impl<P: PaymentApi> CheckoutOrchestrator<P> {
    /// Create a new CheckoutOrchestrator. Notifications are discarded until
    /// a sender is attached with [`with_notifier`](Self::with_notifier).
    pub fn new(payments: P, config: CheckoutConfig) -> Self {
        let (state_tx, _) = watch::channel(CheckoutState::Idle);
        Self {
            payments,
            calculator: PricingCalculator::new(config.fees),
            config,
            in_flight: AtomicBool::new(false),
            state_tx,
            notifier: Notifier::disabled(),
        }
    }

    pub fn with_notifier(mut self, notifier: Notifier) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn payments(&self) -> &P {
        &self.payments
    }

    pub fn config(&self) -> &CheckoutConfig {
        &self.config
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> CheckoutState {
        self.state_tx.borrow().clone()
    }

    /// Watch state transitions.
    pub fn subscribe(&self) -> watch::Receiver<CheckoutState> {
        self.state_tx.subscribe()
    }

    /// Whether an attempt currently holds the checkout.
    pub fn is_processing(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Price the order as the buyer would be charged, without submitting.
    pub fn quote(&self, input: &PricingInput) -> Result<PricingBreakdown, CheckoutFailure> {
        Ok(self.calculator.compute(input)?)
    }

    /// Claim the checkout for a new attempt.
    ///
    /// Returns immediately: either an attempt ready to [`run`](CheckoutAttempt::run)
    /// or an `ALREADY_PROCESSING` failure if another attempt is in flight.
    pub fn begin(&self, request: CheckoutRequest) -> Result<CheckoutAttempt<'_, P>, CheckoutFailure> {
        let Some(guard) = InFlightGuard::try_acquire(&self.in_flight) else {
            warn!(product_id = %request.product_id, "checkout submitted while another is in flight");
            let failure = CheckoutFailure::new(FailureReason::AlreadyProcessing);
            self.notifier.notify(Notification::from(&failure));
            return Err(failure);
        };
        Ok(CheckoutAttempt {
            orchestrator: self,
            request,
            attempt_id: Uuid::now_v7(),
            guard: guard.reset_on_abandon(&self.state_tx),
        })
    }

    /// Validate and run one checkout attempt.
    pub async fn submit(&self, request: CheckoutRequest) -> Result<CheckoutOutcome, CheckoutFailure> {
        self.begin(request)?.run().await
    }

    /// Finish a payment that needed card confirmation.
    ///
    /// A decline here is reported as `GATEWAY_DECLINED` and carries the
    /// payment id, because the payment record already exists on the backend.
    pub async fn confirm_card<C: CardConfirmer + ?Sized>(
        &self,
        pending: PendingConfirmation,
        confirmer: &C,
    ) -> Result<CheckoutOutcome, CheckoutFailure> {
        let Some(guard) = InFlightGuard::try_acquire(&self.in_flight) else {
            let failure = CheckoutFailure::new(FailureReason::AlreadyProcessing);
            self.notifier.notify(Notification::from(&failure));
            return Err(failure);
        };

        debug!(payment_id = %pending.payment_id, "confirming card payment");
        let result = confirmer
            .confirm_card_payment(&pending.client_secret, pending.publishable_key.as_deref())
            .await;

        let result = match result {
            Ok(response) => match (response.error, response.payment_intent) {
                (Some(error), _) => Err(CheckoutFailure::with_server_message(
                    FailureReason::GatewayDeclined,
                    Some(&error.message),
                )),
                (None, Some(intent)) if intent_succeeded(intent.status.as_deref()) => {
                    Ok(CheckoutOutcome::Completed {
                        payment_id: pending.payment_id.clone(),
                        transaction_id: intent.id,
                    })
                }
                (None, Some(intent)) => Err(CheckoutFailure::with_server_message(
                    FailureReason::GatewayDeclined,
                    Some(&format!(
                        "Payment was not completed (status: {}).",
                        intent.status.as_deref().unwrap_or("unknown")
                    )),
                )),
                (None, None) => Err(CheckoutFailure::new(FailureReason::GatewayDeclined)),
            },
            Err(e) => Err(CheckoutFailure::with_server_message(
                FailureReason::GatewayDeclined,
                e.server_message(),
            )),
        }
        .map_err(|failure| failure.for_payment(pending.payment_id.clone()));

        guard.release();
        self.finish(&pending.payment_id, &result);
        result
    }

    /// Publish the terminal state of an attempt and notify the user.
    fn finish(&self, context: &str, result: &Result<CheckoutOutcome, CheckoutFailure>) {
        match result {
            Ok(outcome) => {
                let (state, notification) = match outcome {
                    CheckoutOutcome::Completed {
                        payment_id,
                        transaction_id,
                    } => (
                        CheckoutState::Completed {
                            payment_id: payment_id.clone(),
                            transaction_id: transaction_id.clone(),
                        },
                        Notification::success("Payment completed successfully."),
                    ),
                    CheckoutOutcome::Redirect {
                        payment_id,
                        payment_url,
                    } => (
                        CheckoutState::AwaitingRedirect {
                            payment_id: payment_id.clone(),
                            payment_url: payment_url.clone(),
                        },
                        Notification::info("Redirecting to the payment page."),
                    ),
                    CheckoutOutcome::AwaitingConfirmation(pending) => (
                        CheckoutState::AwaitingClientSecretConfirmation {
                            payment_id: pending.payment_id.clone(),
                        },
                        Notification::info("Please confirm your card details."),
                    ),
                };
                info!(context, payment_id = %outcome.payment_id(), "checkout step finished");
                self.state_tx.send_replace(state);
                self.notifier.notify(notification);
            }
            Err(failure) => {
                warn!(
                    context,
                    reason = failure.reason.code(),
                    payment_id = failure.payment_id.as_deref(),
                    "checkout failed: {}",
                    failure.message
                );
                self.state_tx.send_replace(CheckoutState::Failed(failure.clone()));
                self.notifier.notify(Notification::from(failure));
            }
        }
    }

    fn set_state(&self, state: CheckoutState) {
        self.state_tx.send_replace(state);
    }

    /// Local precondition checks, in order: address, payment method, price.
    /// Builds the creation payload on success.
    fn prepare(&self, request: &CheckoutRequest) -> Result<PreparedPayment, CheckoutFailure> {
        let address = request
            .shipping_address
            .as_ref()
            .filter(|address| address.is_complete())
            .ok_or_else(|| CheckoutFailure::new(FailureReason::NoAddress))?;

        payment_method::validate(request.selection.as_ref(), &request.available_methods)?;
        let selection = request
            .selection
            .as_ref()
            .ok_or_else(|| CheckoutFailure::new(FailureReason::NoSelection))?;

        let breakdown = self.calculator.compute(&request.pricing)?;

        let (card_details, bank_account_details) = match selection {
            PaymentMethodSelection::SavedCard { card_id } => (
                Some(CardDetails {
                    card_id: card_id.clone(),
                }),
                None,
            ),
            PaymentMethodSelection::BankAccount { account_id } => (
                None,
                Some(BankAccountDetails {
                    account_id: account_id.clone(),
                }),
            ),
            PaymentMethodSelection::NewCard => (None, None),
        };

        let create = CreatePaymentRequest {
            product_id: request.product_id.clone(),
            offer_id: request.offer_id.clone(),
            payment_gateway: gateway_for(selection, self.config.default_gateway),
            currency: breakdown.currency.clone(),
            shipping_address: address.clone(),
            payment_summary: breakdown.to_summary(),
            card_details,
            bank_account_details,
        };

        Ok(PreparedPayment {
            create,
            new_card_entry: selection.is_new_card(),
        })
    }
}

struct PreparedPayment {
    create: CreatePaymentRequest,
    new_card_entry: bool,
}

/// Statuses after which the in-app flow has nothing left to do.
///
/// `processing` and `requires_capture` mean the gateway accepted the card
/// and settles asynchronously. The backend learns the final result from the
/// gateway and owns the payment's status from then on, so the buyer sees
/// `Completed` here and `PaymentStatus::Processing` on the order page. A
/// confirmer that reports neither an error nor a status is taken at its word.
/// Any other status (`requires_payment_method`, `canceled`, ...) is a decline.
fn intent_succeeded(status: Option<&str>) -> bool {
    matches!(
        status,
        None | Some("succeeded") | Some("processing") | Some("requires_capture")
    )
}

/// A claimed checkout attempt. Holds the orchestrator until it finishes or
/// is dropped.
pub struct CheckoutAttempt<'a, P> {
    orchestrator: &'a CheckoutOrchestrator<P>,
    request: CheckoutRequest,
    attempt_id: Uuid,
    guard: InFlightGuard<'a>,
}

impl<P: PaymentApi> CheckoutAttempt<'_, P> {
    /// Id carried by every log line of this attempt.
    pub fn attempt_id(&self) -> Uuid {
        self.attempt_id
    }

    /// Run the attempt to an outcome or a failure.
    pub async fn run(self) -> Result<CheckoutOutcome, CheckoutFailure> {
        let CheckoutAttempt {
            orchestrator,
            request,
            attempt_id,
            guard,
        } = self;

        let result = drive(orchestrator, &request, attempt_id).await;

        guard.release();
        orchestrator.finish(&attempt_id.to_string(), &result);
        result
    }
}

async fn drive<P: PaymentApi>(
    orchestrator: &CheckoutOrchestrator<P>,
    request: &CheckoutRequest,
    attempt_id: Uuid,
) -> Result<CheckoutOutcome, CheckoutFailure> {
    orchestrator.set_state(CheckoutState::Validating);
    let prepared = orchestrator.prepare(request)?;

    orchestrator.set_state(CheckoutState::Creating);
    info!(
        %attempt_id,
        product_id = %prepared.create.product_id,
        gateway = %prepared.create.payment_gateway,
        total = %prepared.create.payment_summary.total,
        currency = %prepared.create.currency,
        "creating payment"
    );
    let created = orchestrator
        .payments
        .create_payment(&prepared.create)
        .await
        .map_err(|e| {
            warn!(%attempt_id, "payment creation failed: {}", e);
            CheckoutFailure::with_server_message(FailureReason::CreateFailed, e.server_message())
        })?;

    let payment_id = created.payment_id;
    if payment_id.trim().is_empty() {
        return Err(CheckoutFailure::with_server_message(
            FailureReason::CreateFailed,
            Some("The server did not return a payment id."),
        ));
    }

    orchestrator.set_state(CheckoutState::Initializing);
    debug!(%attempt_id, %payment_id, "initializing payment");
    let init = InitializePaymentRequest {
        payment_id: payment_id.clone(),
        return_url: orchestrator.config.return_url_for(&payment_id),
        cancel_url: orchestrator.config.cancel_url.clone(),
    };
    let response = orchestrator
        .payments
        .initialize_payment(&init)
        .await
        .map_err(|e| {
            warn!(%attempt_id, %payment_id, "payment initialization failed: {}", e);
            CheckoutFailure::with_server_message(FailureReason::InitFailed, e.server_message())
                .for_payment(payment_id.clone())
        })?;

    let action = NextAction::resolve(response, prepared.new_card_entry, &payment_id);
    debug!(%attempt_id, %payment_id, ?action, "payment initialized");
    Ok(CheckoutOutcome::from_action(payment_id, action))
}
