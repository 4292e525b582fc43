//! Pricing calculator.
//!
//! Turns a product price, an optional accepted offer, a shipping cost and
//! the buyer's protection choice into an itemized [`PricingBreakdown`].
//!
//! All inputs must already be in one working currency. The calculator never
//! converts; see [`crate::conversion::normalize_amounts`].

use rust_decimal::Decimal;
use storefront_sdk::objects::{Currency, PaymentSummary, ProtectionMode};
use thiserror::Error;

use crate::config::FeeSchedule;
use crate::money::round2;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    #[error("product price must be positive, got {0}")]
    InvalidPrice(Decimal),

    #[error("shipping cost must not be negative, got {0}")]
    InvalidShipping(Decimal),

    #[error("order total is too large to represent")]
    Overflow,
}

/// Inputs to a price computation.
///
/// `shipping_cost` is required: a free-shipping order passes zero
/// explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricingInput {
    pub product_price: Decimal,
    pub offer_amount: Option<Decimal>,
    pub shipping_cost: Decimal,
    pub use_escrow: bool,
    pub currency: Currency,
}

/// Itemized price of an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricingBreakdown {
    /// Effective base price: the accepted offer if any, else the list price.
    pub product_price: Decimal,
    pub protection_mode: ProtectionMode,
    pub protection_fee: Decimal,
    pub shipping_cost: Decimal,
    pub sales_tax: Decimal,
    /// Sum of the above, rounded half-up to two decimals.
    pub total: Decimal,
    pub currency: Currency,
}

impl PricingBreakdown {
    /// Whether an accepted offer replaced the list price.
    pub fn offer_applied(&self, list_price: Decimal) -> bool {
        self.product_price != list_price
    }

    pub fn to_summary(&self) -> PaymentSummary {
        PaymentSummary {
            product_price: self.product_price,
            protection_mode: self.protection_mode,
            protection_fee: self.protection_fee,
            shipping_cost: self.shipping_cost,
            sales_tax: self.sales_tax,
            total: self.total,
        }
    }
}

impl From<&PricingBreakdown> for PaymentSummary {
    fn from(value: &PricingBreakdown) -> Self {
        value.to_summary()
    }
}

/// Computes breakdowns from a [`FeeSchedule`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PricingCalculator {
    fees: FeeSchedule,
}

impl PricingCalculator {
    pub fn new(fees: FeeSchedule) -> Self {
        Self { fees }
    }

    pub fn fees(&self) -> &FeeSchedule {
        &self.fees
    }

    /// Compute the breakdown for `input`.
    ///
    /// Deterministic: the same input always yields the same breakdown.
    pub fn compute(&self, input: &PricingInput) -> Result<PricingBreakdown, PricingError> {
        if input.product_price <= Decimal::ZERO {
            return Err(PricingError::InvalidPrice(input.product_price));
        }
        if input.shipping_cost < Decimal::ZERO {
            return Err(PricingError::InvalidShipping(input.shipping_cost));
        }

        let base_price = effective_price(input.product_price, input.offer_amount);
        let protection_fee = base_price
            .checked_mul(self.fees.protection_rate(input.use_escrow))
            .ok_or(PricingError::Overflow)?;
        let sales_tax = self.fees.sales_tax;
        let total = [protection_fee, input.shipping_cost, sales_tax]
            .into_iter()
            .try_fold(base_price, Decimal::checked_add)
            .map(round2)
            .ok_or(PricingError::Overflow)?;

        Ok(PricingBreakdown {
            product_price: base_price,
            protection_mode: ProtectionMode::from_escrow_flag(input.use_escrow),
            protection_fee,
            shipping_cost: input.shipping_cost,
            sales_tax,
            total,
            currency: input.currency.clone(),
        })
    }

    /// Both protection options side by side, for a chooser that shows what
    /// each would cost. Returns `(escrow, standard)`.
    pub fn compare_protection(
        &self,
        input: &PricingInput,
    ) -> Result<(PricingBreakdown, PricingBreakdown), PricingError> {
        let escrow = self.compute(&PricingInput {
            use_escrow: true,
            ..input.clone()
        })?;
        let standard = self.compute(&PricingInput {
            use_escrow: false,
            ..input.clone()
        })?;
        Ok((escrow, standard))
    }
}

/// An accepted offer overrides the list price when it is positive.
fn effective_price(product_price: Decimal, offer_amount: Option<Decimal>) -> Decimal {
    match offer_amount {
        Some(offer) if offer > Decimal::ZERO => offer,
        _ => product_price,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn input(
        product_price: Decimal,
        offer_amount: Option<Decimal>,
        shipping_cost: Decimal,
        use_escrow: bool,
    ) -> PricingInput {
        PricingInput {
            product_price,
            offer_amount,
            shipping_cost,
            use_escrow,
            currency: Currency::usd(),
        }
    }

    #[test]
    fn test_offer_overrides_list_price_with_escrow() {
        let calc = PricingCalculator::default();
        let breakdown = calc
            .compute(&input(dec!(100), Some(dec!(80)), dec!(5), true))
            .unwrap();
        assert_eq!(breakdown.product_price, dec!(80));
        assert_eq!(breakdown.protection_fee, dec!(8.00));
        assert_eq!(breakdown.sales_tax, dec!(0.72));
        assert_eq!(breakdown.total, dec!(93.72));
        assert_eq!(breakdown.protection_mode, ProtectionMode::Escrow);
        assert!(breakdown.offer_applied(dec!(100)));
    }

    #[test]
    fn test_standard_protection_fee() {
        let calc = PricingCalculator::default();
        let breakdown = calc
            .compute(&input(dec!(100), Some(dec!(80)), dec!(5), false))
            .unwrap();
        assert_eq!(breakdown.protection_fee, dec!(4.00));
        assert_eq!(breakdown.total, dec!(89.72));
        assert_eq!(breakdown.protection_mode, ProtectionMode::Standard);
    }

    #[test]
    fn test_non_positive_offer_is_ignored() {
        let calc = PricingCalculator::default();
        for offer in [None, Some(dec!(0)), Some(dec!(-10))] {
            let breakdown = calc.compute(&input(dec!(50), offer, dec!(0), true)).unwrap();
            assert_eq!(breakdown.product_price, dec!(50));
            assert_eq!(breakdown.total, dec!(55.72));
            assert!(!breakdown.offer_applied(dec!(50)));
        }
    }

    #[test]
    fn test_rejects_non_positive_price() {
        let calc = PricingCalculator::default();
        assert_eq!(
            calc.compute(&input(dec!(0), None, dec!(5), true)),
            Err(PricingError::InvalidPrice(dec!(0)))
        );
        assert_eq!(
            calc.compute(&input(dec!(-5), Some(dec!(80)), dec!(5), false)),
            Err(PricingError::InvalidPrice(dec!(-5)))
        );
    }

    #[test]
    fn test_rejects_negative_shipping() {
        let calc = PricingCalculator::default();
        assert_eq!(
            calc.compute(&input(dec!(10), None, dec!(-0.01), true)),
            Err(PricingError::InvalidShipping(dec!(-0.01)))
        );
    }

    #[test]
    fn test_huge_amounts_fail_instead_of_overflowing() {
        let calc = PricingCalculator::default();
        assert_eq!(
            calc.compute(&input(Decimal::MAX, None, dec!(0), true)),
            Err(PricingError::Overflow)
        );
        assert_eq!(
            calc.compute(&input(dec!(10), Some(Decimal::MAX), dec!(0), false)),
            Err(PricingError::Overflow)
        );
        assert_eq!(
            calc.compute(&input(dec!(10), None, Decimal::MAX, true)),
            Err(PricingError::Overflow)
        );
    }

    #[test]
    fn test_total_is_rounded_half_up() {
        let calc = PricingCalculator::new(FeeSchedule::default().with_sales_tax(dec!(0)));
        // 10.05 * 1.05 = 10.5525
        let breakdown = calc
            .compute(&input(dec!(10.05), None, dec!(0), false))
            .unwrap();
        assert_eq!(breakdown.total, dec!(10.55));
        // 0.10 * 1.05 = 0.105
        let breakdown = calc
            .compute(&input(dec!(0.10), None, dec!(0), false))
            .unwrap();
        assert_eq!(breakdown.total, dec!(0.11));
    }

    #[test]
    fn test_compare_protection() {
        let calc = PricingCalculator::default();
        let (escrow, standard) = calc
            .compare_protection(&input(dec!(100), Some(dec!(80)), dec!(5), true))
            .unwrap();
        assert_eq!(escrow.total, dec!(93.72));
        assert_eq!(standard.total, dec!(89.72));
    }

    #[test]
    fn test_summary_mirrors_breakdown() {
        let breakdown = PricingCalculator::default()
            .compute(&input(dec!(20), None, dec!(3.5), false))
            .unwrap();
        let summary = PaymentSummary::from(&breakdown);
        assert_eq!(summary.total, breakdown.total);
        assert_eq!(summary.protection_fee, dec!(1.00));
        assert_eq!(summary.protection_mode, ProtectionMode::Standard);
    }
}
