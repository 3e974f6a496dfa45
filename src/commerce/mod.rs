//! `SellAuth` commerce API integration.
//!
//! A thin request/response client: every call either returns a decoded payload or an
//! [`Error::Commerce`](crate::errors::Error::Commerce) carrying the HTTP status and body.
//! Nothing is retried.

/// HTTP client
pub mod client;
/// Response payloads
pub mod types;

pub use client::SellAuthClient;
pub use types::{Checkout, Customer, Invoice, InvoiceProduct, Product};
