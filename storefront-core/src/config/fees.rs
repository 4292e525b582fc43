//! Protection-fee and tax configuration.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Rates applied by the pricing calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeSchedule {
    /// Fraction of the base price charged for escrow protection.
    pub escrow_rate: Decimal,
    /// Fraction of the base price charged for standard protection.
    pub standard_rate: Decimal,
    /// Flat sales tax added to every order.
    pub sales_tax: Decimal,
}

impl FeeSchedule {
    pub const DEFAULT_ESCROW_RATE: Decimal = dec!(0.10);
    pub const DEFAULT_STANDARD_RATE: Decimal = dec!(0.05);
    pub const DEFAULT_SALES_TAX: Decimal = dec!(0.72);

    /// Create a new FeeSchedule.
    pub fn new(escrow_rate: Decimal, standard_rate: Decimal, sales_tax: Decimal) -> Self {
        Self {
            escrow_rate,
            standard_rate,
            sales_tax,
        }
    }

    /// The same rates with a different flat sales tax.
    pub fn with_sales_tax(self, sales_tax: Decimal) -> Self {
        Self { sales_tax, ..self }
    }

    /// Rate for the selected protection mode.
    pub fn protection_rate(&self, use_escrow: bool) -> Decimal {
        if use_escrow {
            self.escrow_rate
        } else {
            self.standard_rate
        }
    }
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_ESCROW_RATE,
            Self::DEFAULT_STANDARD_RATE,
            Self::DEFAULT_SALES_TAX,
        )
    }
}
