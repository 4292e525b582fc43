//! Explicit currency normalization before pricing.
//!
//! The pricing calculator requires every amount in one working currency.
//! This module performs that conversion through the [`CurrencyConverter`]
//! port so it is always a visible step, never an implicit one.

use rust_decimal::Decimal;
use storefront_sdk::objects::{ConvertCurrencyRequest, Currency};
use thiserror::Error;
use tracing::debug;

use crate::money::{Money, round2};
use crate::ports::{CurrencyConverter, RemoteError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    #[error("currency conversion from {from} to {to} failed: {source}")]
    Remote {
        from: Currency,
        to: Currency,
        #[source]
        source: RemoteError,
    },

    #[error("converter returned a negative amount: {0}")]
    NegativeResult(Decimal),
}

/// Product price and shipping cost expressed in the working currency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedAmounts {
    pub product_price: Decimal,
    pub shipping_cost: Decimal,
    pub currency: Currency,
}

/// Convert a single amount into `target`. Same-currency amounts are returned
/// without calling the converter.
pub async fn convert_to<C: CurrencyConverter + ?Sized>(
    converter: &C,
    money: &Money,
    target: &Currency,
) -> Result<Decimal, ConversionError> {
    if money.currency() == target {
        return Ok(money.amount());
    }

    let request = ConvertCurrencyRequest {
        amount: money.amount(),
        from_currency: money.currency().clone(),
        to_currency: target.clone(),
    };
    let response = converter
        .convert(&request)
        .await
        .map_err(|source| ConversionError::Remote {
            from: money.currency().clone(),
            to: target.clone(),
            source,
        })?;

    debug!(
        from = %money.currency(),
        to = %target,
        rate = %response.exchange_rate,
        "converted amount"
    );

    let converted = round2(response.converted_amount);
    if converted < Decimal::ZERO {
        return Err(ConversionError::NegativeResult(converted));
    }
    Ok(converted)
}

/// Bring the product price and shipping cost into `working_currency`.
pub async fn normalize_amounts<C: CurrencyConverter + ?Sized>(
    converter: &C,
    product_price: &Money,
    shipping_cost: &Money,
    working_currency: &Currency,
) -> Result<NormalizedAmounts, ConversionError> {
    let product_price = convert_to(converter, product_price, working_currency).await?;
    let shipping_cost = convert_to(converter, shipping_cost, working_currency).await?;
    Ok(NormalizedAmounts {
        product_price,
        shipping_cost,
        currency: working_currency.clone(),
    })
}
