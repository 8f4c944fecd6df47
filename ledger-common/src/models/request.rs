use serde::{Deserialize, Serialize};

use crate::{address::Address, models::ledger_index::LedgerIndex};

/// Asks the node for the account-root object of an account.
///
/// # Fields
///
/// - `account`: the account to look up.
/// - `ledger_index`: ledger version to read the object from.
/// - `queue`: also return queued transactions (only valid with `current`).
/// - `signer_lists`: also return the account's signer lists.
/// - `strict`: only accept a canonical address, not a public key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountInfoRequest {
    pub account: Address,
    pub ledger_index: LedgerIndex,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub queue: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signer_lists: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strict: Option<bool>,
}

/// Asks the node for the trust lines held by an account.
///
/// `peer` narrows the result to lines shared with one counterparty; `limit` and
/// `marker` page through accounts with many lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountLinesRequest {
    pub account: Address,
    pub ledger_index: LedgerIndex,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub peer: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marker: Option<serde_json::Value>,
}

/// A request description handed to a [`LedgerClient`](crate::LedgerClient).
///
/// How it travels (JSON-RPC, WebSocket) is up to the client; the serde
/// representation carries the method name in `command`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Request {
    AccountInfo(AccountInfoRequest),
    AccountLines(AccountLinesRequest),
}

impl Request {
    pub fn account_info(account: impl Into<Address>, ledger_index: LedgerIndex) -> Self {
        Request::AccountInfo(AccountInfoRequest {
            account: account.into(),
            ledger_index,
            queue: None,
            signer_lists: None,
            strict: None,
        })
    }

    pub fn account_lines(account: impl Into<Address>, ledger_index: LedgerIndex) -> Self {
        Request::AccountLines(AccountLinesRequest {
            account: account.into(),
            ledger_index,
            peer: None,
            limit: None,
            marker: None,
        })
    }

    /// Method name as the node knows it.
    pub fn command(&self) -> &'static str {
        match self {
            Request::AccountInfo(_) => "account_info",
            Request::AccountLines(_) => "account_lines",
        }
    }

    /// The account this request is about.
    pub fn account(&self) -> &Address {
        match self {
            Request::AccountInfo(req) => &req.account,
            Request::AccountLines(req) => &req.account,
        }
    }

    pub fn ledger_index(&self) -> LedgerIndex {
        match self {
            Request::AccountInfo(req) => req.ledger_index,
            Request::AccountLines(req) => req.ledger_index,
        }
    }
}
