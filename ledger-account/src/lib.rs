//! Account queries against a ledger node.
//!
//! [`query`] holds the async operations, [`blocking`] wraps each of them for
//! callers without an async runtime. Both take the account address and a
//! borrowed [`LedgerClient`](ledger_common::LedgerClient).

pub mod blocking;
pub mod config;
pub mod error;
pub mod query;

pub use blocking::BlockingAccountQueryService;
pub use config::QueryConfig;
pub use error::{AccountError, RequestFailure, Result};
pub use query::AccountQueryService;
