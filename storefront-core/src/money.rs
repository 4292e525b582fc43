//! Money arithmetic and display.
//!
//! Everything here is pure. Amounts are `rust_decimal::Decimal`, never
//! floats, and currencies never mix implicitly: converting between them is an
//! explicit step (see [`crate::conversion`]).

use rust_decimal::{Decimal, RoundingStrategy};
use storefront_sdk::objects::Currency;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyError {
    #[error("amount must not be negative: {0}")]
    Negative(Decimal),

    #[error("currency mismatch: {left} vs {right}")]
    CurrencyMismatch { left: Currency, right: Currency },

    #[error("amount overflowed")]
    Overflow,
}

/// A non-negative amount in a single currency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Money {
    amount: Decimal,
    currency: Currency,
}

impl Money {
    pub fn new(amount: Decimal, currency: Currency) -> Result<Self, MoneyError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(MoneyError::Negative(amount));
        }
        Ok(Self { amount, currency })
    }

    pub fn zero(currency: Currency) -> Self {
        Self {
            amount: Decimal::ZERO,
            currency,
        }
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn currency(&self) -> &Currency {
        &self.currency
    }

    /// Add two amounts of the same currency. Fails instead of panicking
    /// when the sum does not fit in a `Decimal`.
    pub fn checked_add(&self, other: &Money) -> Result<Money, MoneyError> {
        if self.currency != other.currency {
            return Err(MoneyError::CurrencyMismatch {
                left: self.currency.clone(),
                right: other.currency.clone(),
            });
        }
        let amount = self
            .amount
            .checked_add(other.amount)
            .ok_or(MoneyError::Overflow)?;
        Ok(Money {
            amount,
            currency: self.currency.clone(),
        })
    }

    pub fn rounded(&self) -> Money {
        Money {
            amount: round2(self.amount),
            currency: self.currency.clone(),
        }
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&format_money(self.amount, &self.currency))
    }
}

/// Round half-up (away from zero) to two decimal places.
pub fn round2(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Format an amount for display, e.g. `$1,234.50`, `¥1,235` or `AED 99.00`.
///
/// Standard currencies always show two decimals; zero-decimal currencies
/// show none. Currencies without a known symbol are prefixed by their code.
pub fn format_money(amount: Decimal, currency: &Currency) -> String {
    let scale = currency.minor_units();
    let mut rounded = amount
        .round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero)
        .abs();
    rounded.rescale(scale);

    let digits = rounded.to_string();
    let (whole, fraction) = match digits.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (digits.as_str(), None),
    };

    let mut out = String::with_capacity(digits.len() + 8);
    if amount.is_sign_negative() && !rounded.is_zero() {
        out.push('-');
    }
    match currency.symbol() {
        Some(symbol) => out.push_str(symbol),
        None => {
            out.push_str(currency.code());
            out.push(' ');
        }
    }
    out.push_str(&group_thousands(whole));
    if let Some(fraction) = fraction {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

fn group_thousands(whole: &str) -> String {
    let len = whole.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
