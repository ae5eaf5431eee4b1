//! VNPay callback verification.
//!
//! [`params`] holds the callback parameter mapping and its query-string
//! codec; [`signature`] holds canonicalization, HMAC-SHA512 signing and
//! constant-time verification.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![forbid(unsafe_code)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod params;
pub mod signature;

pub use params::{CallbackParams, ParamsError};
pub use signature::{HashSecret, SignatureError, VerificationResult, verify};
