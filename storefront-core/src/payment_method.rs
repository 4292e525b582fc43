//! Payment method selection.
//!
//! Merges saved cards and bank accounts into one display list, records the
//! buyer's choice, and checks that choice against the list as it stands when
//! the buyer submits. Selection is never validated at select time: the lists
//! can be reloaded (or an instrument deleted elsewhere) in between.

use storefront_sdk::objects::{BankAccount, Card};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentMethodKind {
    SavedCard,
    BankAccount,
}

/// One entry of the merged payment-method list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentMethodOption {
    pub kind: PaymentMethodKind,
    pub id: String,
    pub label: String,
    pub is_default: bool,
}

impl From<&Card> for PaymentMethodOption {
    fn from(card: &Card) -> Self {
        Self {
            kind: PaymentMethodKind::SavedCard,
            id: card.id.clone(),
            label: card.display_label(),
            is_default: card.is_default,
        }
    }
}

impl From<&BankAccount> for PaymentMethodOption {
    fn from(account: &BankAccount) -> Self {
        Self {
            kind: PaymentMethodKind::BankAccount,
            id: account.id.clone(),
            label: account.display_label(),
            is_default: account.is_default,
        }
    }
}

/// The buyer's choice of instrument.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PaymentMethodSelection {
    SavedCard { card_id: String },
    NewCard,
    BankAccount { account_id: String },
}

impl PaymentMethodSelection {
    pub fn is_new_card(&self) -> bool {
        matches!(self, PaymentMethodSelection::NewCard)
    }

    /// Whether `option` is the instrument this selection refers to.
    fn refers_to(&self, option: &PaymentMethodOption) -> bool {
        match self {
            PaymentMethodSelection::SavedCard { card_id } => {
                option.kind == PaymentMethodKind::SavedCard && option.id == *card_id
            }
            PaymentMethodSelection::BankAccount { account_id } => {
                option.kind == PaymentMethodKind::BankAccount && option.id == *account_id
            }
            PaymentMethodSelection::NewCard => false,
        }
    }
}

impl From<&PaymentMethodOption> for PaymentMethodSelection {
    fn from(option: &PaymentMethodOption) -> Self {
        match option.kind {
            PaymentMethodKind::SavedCard => PaymentMethodSelection::SavedCard {
                card_id: option.id.clone(),
            },
            PaymentMethodKind::BankAccount => PaymentMethodSelection::BankAccount {
                account_id: option.id.clone(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("no payment method selected")]
    NoSelection,

    #[error("selected payment method is no longer available")]
    StaleSelection,
}

/// Merge cards and bank accounts into one list: cards first, then bank
/// accounts, each in the order received.
pub fn list_methods(cards: &[Card], bank_accounts: &[BankAccount]) -> Vec<PaymentMethodOption> {
    cards
        .iter()
        .map(PaymentMethodOption::from)
        .chain(bank_accounts.iter().map(PaymentMethodOption::from))
        .collect()
}

/// Check a selection against the currently loaded methods.
pub fn validate(
    selection: Option<&PaymentMethodSelection>,
    current_methods: &[PaymentMethodOption],
) -> Result<(), SelectionError> {
    match selection {
        None => Err(SelectionError::NoSelection),
        Some(PaymentMethodSelection::NewCard) => Ok(()),
        Some(selection) => {
            if current_methods.iter().any(|option| selection.refers_to(option)) {
                Ok(())
            } else {
                Err(SelectionError::StaleSelection)
            }
        }
    }
}

/// Holds the loaded method list and the buyer's current choice.
#[derive(Debug, Clone, Default)]
pub struct PaymentMethodSelector {
    methods: Vec<PaymentMethodOption>,
    selection: Option<PaymentMethodSelection>,
}

impl PaymentMethodSelector {
    pub fn new(methods: Vec<PaymentMethodOption>) -> Self {
        Self {
            methods,
            selection: None,
        }
    }

    /// Build from freshly loaded lists.
    pub fn from_lists(cards: &[Card], bank_accounts: &[BankAccount]) -> Self {
        Self::new(list_methods(cards, bank_accounts))
    }

    pub fn methods(&self) -> &[PaymentMethodOption] {
        &self.methods
    }

    pub fn selection(&self) -> Option<&PaymentMethodSelection> {
        self.selection.as_ref()
    }

    /// Replace the method list after a reload. The current selection is kept
    /// as-is and re-checked on [`validate`](Self::validate).
    pub fn replace_methods(&mut self, methods: Vec<PaymentMethodOption>) {
        self.methods = methods;
    }

    /// Record the buyer's choice of a listed instrument.
    pub fn select(&mut self, option: &PaymentMethodOption) -> PaymentMethodSelection {
        let selection = PaymentMethodSelection::from(option);
        self.selection = Some(selection.clone());
        selection
    }

    /// Switch to entering a new card.
    pub fn select_new_card(&mut self) -> PaymentMethodSelection {
        self.selection = Some(PaymentMethodSelection::NewCard);
        PaymentMethodSelection::NewCard
    }

    pub fn clear(&mut self) {
        self.selection = None;
    }

    /// Pre-select the default instrument, if the buyer has not chosen yet.
    pub fn select_default(&mut self) -> Option<PaymentMethodSelection> {
        if self.selection.is_none() {
            let default = self.methods.iter().find(|option| option.is_default)?;
            self.selection = Some(PaymentMethodSelection::from(default));
        }
        self.selection.clone()
    }

    pub fn validate(&self) -> Result<(), SelectionError> {
        validate(self.selection.as_ref(), &self.methods)
    }
}
