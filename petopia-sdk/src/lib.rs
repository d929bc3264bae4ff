//! Wire types and the LiqPay signing scheme for the Petopia checkout.
//!
//! Nothing in this crate performs I/O. The server and core crates build on
//! [`signature`] for both directions of the payment flow.

#![forbid(unsafe_code)]

pub mod objects;
pub mod signature;
