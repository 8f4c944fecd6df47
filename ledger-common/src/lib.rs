//! Shared types for talking to a ledger node: account addresses, request and
//! response models, and the [`LedgerClient`] boundary every transport implements.

pub mod address;
pub mod client;
pub mod models;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use address::Address;
pub use client::{error::TransportError, LedgerClient};
pub use models::{
    ledger_index::LedgerIndex,
    request::Request,
    response::{AccountRoot, ErrorCondition, Response, ResponseStatus, ACCOUNT_NOT_FOUND},
};
