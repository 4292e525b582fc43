//! Checkout states and failure reasons.

use url::Url;

use crate::payment_method::SelectionError;
use crate::pricing::PricingError;

/// Where a checkout attempt currently stands.
///
/// `Idle → Validating → Creating → Initializing → {Completed |
/// AwaitingRedirect | AwaitingClientSecretConfirmation | Failed}`. A failed
/// precondition jumps straight from `Validating` to `Failed`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CheckoutState {
    #[default]
    Idle,
    Validating,
    Creating,
    Initializing,
    Completed {
        payment_id: String,
        transaction_id: String,
    },
    /// Control leaves the app for the gateway's hosted page.
    AwaitingRedirect { payment_id: String, payment_url: Url },
    /// An embedded card element must confirm the client secret.
    AwaitingClientSecretConfirmation { payment_id: String },
    Failed(CheckoutFailure),
}

impl CheckoutState {
    /// Whether a network phase is in progress.
    pub fn is_processing(&self) -> bool {
        matches!(
            self,
            CheckoutState::Validating | CheckoutState::Creating | CheckoutState::Initializing
        )
    }

    /// Whether the in-app flow has nothing left to do.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            CheckoutState::Completed { .. }
                | CheckoutState::AwaitingRedirect { .. }
                | CheckoutState::Failed(_)
        )
    }
}

/// Broad family of a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureCategory {
    /// Detected locally before any network call.
    Precondition,
    /// A backend call failed or returned an error.
    Transport,
    /// The gateway declined after the payment record was created.
    Gateway,
    /// Another attempt is still in flight.
    Concurrency,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureReason {
    NoAddress,
    NoSelection,
    StaleSelection,
    InvalidPrice,
    InvalidShipping,
    CreateFailed,
    InitFailed,
    GatewayDeclined,
    AlreadyProcessing,
}

impl FailureReason {
    /// Stable machine-readable code.
    pub fn code(self) -> &'static str {
        match self {
            FailureReason::NoAddress => "NO_ADDRESS",
            FailureReason::NoSelection => "NO_SELECTION",
            FailureReason::StaleSelection => "STALE_SELECTION",
            FailureReason::InvalidPrice => "INVALID_PRICE",
            FailureReason::InvalidShipping => "INVALID_SHIPPING",
            FailureReason::CreateFailed => "CREATE_FAILED",
            FailureReason::InitFailed => "INIT_FAILED",
            FailureReason::GatewayDeclined => "GATEWAY_DECLINED",
            FailureReason::AlreadyProcessing => "ALREADY_PROCESSING",
        }
    }

    pub fn category(self) -> FailureCategory {
        match self {
            FailureReason::NoAddress
            | FailureReason::NoSelection
            | FailureReason::StaleSelection
            | FailureReason::InvalidPrice
            | FailureReason::InvalidShipping => FailureCategory::Precondition,
            FailureReason::CreateFailed | FailureReason::InitFailed => FailureCategory::Transport,
            FailureReason::GatewayDeclined => FailureCategory::Gateway,
            FailureReason::AlreadyProcessing => FailureCategory::Concurrency,
        }
    }

    /// Message shown when the backend did not supply one.
    pub fn default_message(self) -> &'static str {
        match self {
            FailureReason::NoAddress => "Please add a shipping address before checking out.",
            FailureReason::NoSelection => "Please select a payment method.",
            FailureReason::StaleSelection => {
                "The selected payment method is no longer available. Please choose another."
            }
            FailureReason::InvalidPrice => "This item does not have a valid price.",
            FailureReason::InvalidShipping => "The shipping cost for this order is invalid.",
            FailureReason::CreateFailed => "Failed to create payment. Please try again.",
            FailureReason::InitFailed => "Failed to initialize payment. Please try again.",
            FailureReason::GatewayDeclined => "Your payment could not be completed.",
            FailureReason::AlreadyProcessing => "Your payment is already being processed.",
        }
    }
}

impl std::fmt::Display for FailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// A failed checkout attempt: a reason code plus a message for the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{reason}: {message}")]
pub struct CheckoutFailure {
    pub reason: FailureReason,
    pub message: String,
    /// Set when a payment record already exists on the backend, so a retry
    /// must account for it instead of starting from scratch.
    pub payment_id: Option<String>,
}

impl CheckoutFailure {
    pub fn new(reason: FailureReason) -> Self {
        Self {
            reason,
            message: reason.default_message().to_owned(),
            payment_id: None,
        }
    }

    /// Use the backend's message when it supplied a non-empty one.
    pub fn with_server_message(reason: FailureReason, message: Option<&str>) -> Self {
        match message.map(str::trim).filter(|m| !m.is_empty()) {
            Some(message) => Self {
                reason,
                message: message.to_owned(),
                payment_id: None,
            },
            None => Self::new(reason),
        }
    }

    pub fn for_payment(mut self, payment_id: impl Into<String>) -> Self {
        self.payment_id = Some(payment_id.into());
        self
    }

    pub fn category(&self) -> FailureCategory {
        self.reason.category()
    }
}

impl From<SelectionError> for CheckoutFailure {
    fn from(err: SelectionError) -> Self {
        match err {
            SelectionError::NoSelection => CheckoutFailure::new(FailureReason::NoSelection),
            SelectionError::StaleSelection => CheckoutFailure::new(FailureReason::StaleSelection),
        }
    }
}

impl From<PricingError> for CheckoutFailure {
    fn from(err: PricingError) -> Self {
        match err {
            PricingError::InvalidPrice(_) | PricingError::Overflow => {
                CheckoutFailure::new(FailureReason::InvalidPrice)
            }
            PricingError::InvalidShipping(_) => CheckoutFailure::new(FailureReason::InvalidShipping),
        }
    }
}
