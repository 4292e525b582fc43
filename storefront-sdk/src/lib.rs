//! Wire types and HTTP clients for the marketplace storefront backend.
//!
//! The [`objects`] module mirrors the JSON shapes exchanged with the REST
//! backend. The [`client`] module, enabled by the `client` feature, wraps each
//! endpoint in a typed `reqwest` call.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![forbid(unsafe_code)]

pub mod auth;
#[cfg(feature = "client")]
pub mod client;
pub mod objects;
