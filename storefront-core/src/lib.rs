#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![forbid(unsafe_code)]

pub mod checkout;
pub mod config;
pub mod context;
pub mod conversion;
pub mod events;
pub mod money;
pub mod payment_method;
pub mod ports;
pub mod pricing;
pub mod remote;
