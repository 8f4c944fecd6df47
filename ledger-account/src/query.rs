//! Account queries as `async fn`s over any [`LedgerClient`].
//!
//! Two families of operations:
//!
//! - **Unwrapping** (`does_account_exist`, `get_next_valid_seq_number`,
//!   `get_balance`, `get_account_root`): a ledger-level error becomes an
//!   [`AccountError`], since the typed result has no room for one.
//! - **Raw** (`get_account_info`, `get_account_lines`): the node's
//!   [`Response`] is returned as-is, ledger errors included. Only a transport
//!   failure is an `Err`.
//!
//! Each operation issues exactly one request and keeps no state between calls.

use ledger_common::{
    AccountRoot, Address, ErrorCondition, LedgerClient, LedgerIndex, Request, Response,
};
use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    config::QueryConfig,
    error::{AccountError, RequestFailure, Result},
};

/// Issues account queries at the ledger versions named by its [`QueryConfig`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccountQueryService {
    config: QueryConfig,
}

impl AccountQueryService {
    pub fn new(config: QueryConfig) -> Self {
        AccountQueryService { config }
    }

    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    /// `true` if the account is in the ledger, `false` if the node reports it
    /// as not found. Any other error is returned.
    pub async fn does_account_exist<C>(
        &self,
        address: impl Into<Address>,
        client: &C,
    ) -> Result<bool>
    where
        C: LedgerClient + ?Sized,
    {
        let address = address.into();
        let req = Request::account_info(address.clone(), self.config.ledger_index);
        let response = send(req, client).await?;
        if response.is_successful() {
            return Ok(true);
        }

        match classify(&address, &response) {
            AccountError::NotFound { .. } => Ok(false),
            e => Err(e),
        }
    }

    /// The account's `Sequence` field, unchanged.
    ///
    /// This is the sequence recorded in the queried ledger. Transactions still
    /// queued elsewhere are not accounted for, so two callers submitting
    /// concurrently for the same account can be handed the same value.
    pub async fn get_next_valid_seq_number<C>(
        &self,
        address: impl Into<Address>,
        client: &C,
    ) -> Result<u32>
    where
        C: LedgerClient + ?Sized,
    {
        let address = address.into();
        let root = self
            .account_root_at(&address, self.config.sequence_ledger_index, client)
            .await?;
        sequence_of(&root)
    }

    /// Native balance in drops (the smallest unit), unconverted.
    pub async fn get_balance<C>(&self, address: impl Into<Address>, client: &C) -> Result<u64>
    where
        C: LedgerClient + ?Sized,
    {
        let address = address.into();
        let root = self.account_root_at(&address, self.config.ledger_index, client).await?;
        balance_of(&root)
    }

    /// The account-root object exactly as the node returned it.
    pub async fn get_account_root<C>(
        &self,
        address: impl Into<Address>,
        client: &C,
    ) -> Result<AccountRoot>
    where
        C: LedgerClient + ?Sized,
    {
        let address = address.into();
        self.account_root_at(&address, self.config.ledger_index, client).await
    }

    /// The full `account_info` reply. A reply with `status: error` is still `Ok`.
    pub async fn get_account_info<C>(
        &self,
        address: impl Into<Address>,
        client: &C,
    ) -> Result<Response>
    where
        C: LedgerClient + ?Sized,
    {
        let req = Request::account_info(address, self.config.ledger_index);
        send(req, client).await
    }

    /// The full `account_lines` reply (trust lines in `result.lines`).
    /// A reply with `status: error` is still `Ok`.
    pub async fn get_account_lines<C>(
        &self,
        address: impl Into<Address>,
        client: &C,
    ) -> Result<Response>
    where
        C: LedgerClient + ?Sized,
    {
        let req = Request::account_lines(address, self.config.ledger_index);
        send(req, client).await
    }

    async fn account_root_at<C>(
        &self,
        address: &Address,
        ledger_index: LedgerIndex,
        client: &C,
    ) -> Result<AccountRoot>
    where
        C: LedgerClient + ?Sized,
    {
        let response = send(Request::account_info(address.clone(), ledger_index), client).await?;
        if !response.is_successful() {
            return Err(classify(address, &response));
        }

        match response.result.get("account_data") {
            Some(Value::Object(root)) => Ok(root.clone()),
            Some(_) => Err(AccountError::MalformedResponse(
                "account_data is not an object".to_string(),
            )),
            None => Err(AccountError::MalformedResponse(
                "account_info reply has no account_data".to_string(),
            )),
        }
    }
}

async fn send<C>(req: Request, client: &C) -> Result<Response>
where
    C: LedgerClient + ?Sized,
{
    debug!(
        command = req.command(),
        address = %req.account(),
        ledger_index = %req.ledger_index(),
        "sending ledger request"
    );
    Ok(client.request(req).await?)
}

fn classify(address: &Address, response: &Response) -> AccountError {
    match response.error_condition() {
        Some(ErrorCondition::NotFound) => {
            debug!(address = %address, "account not found");
            AccountError::NotFound { address: address.clone() }
        }
        _ => {
            let failure = RequestFailure::from_response(response);
            warn!(address = %address, error = %failure, "ledger request failed");
            AccountError::RequestFailure(failure)
        }
    }
}

fn sequence_of(root: &AccountRoot) -> Result<u32> {
    root.get("Sequence")
        .and_then(Value::as_u64)
        .and_then(|seq| u32::try_from(seq).ok())
        .ok_or_else(|| AccountError::MalformedResponse("missing or invalid Sequence".to_string()))
}

// Nodes send `Balance` as a decimal string; plain integers are accepted too.
fn balance_of(root: &AccountRoot) -> Result<u64> {
    let parsed = match root.get("Balance") {
        Some(Value::String(s)) => s.parse::<u64>().ok(),
        Some(Value::Number(n)) => n.as_u64(),
        _ => None,
    };
    parsed.ok_or_else(|| AccountError::MalformedResponse("missing or invalid Balance".to_string()))
}

pub async fn does_account_exist<C>(address: impl Into<Address>, client: &C) -> Result<bool>
where
    C: LedgerClient + ?Sized,
{
    AccountQueryService::default().does_account_exist(address, client).await
}

pub async fn get_next_valid_seq_number<C>(address: impl Into<Address>, client: &C) -> Result<u32>
where
    C: LedgerClient + ?Sized,
{
    AccountQueryService::default().get_next_valid_seq_number(address, client).await
}

pub async fn get_balance<C>(address: impl Into<Address>, client: &C) -> Result<u64>
where
    C: LedgerClient + ?Sized,
{
    AccountQueryService::default().get_balance(address, client).await
}

pub async fn get_account_root<C>(address: impl Into<Address>, client: &C) -> Result<AccountRoot>
where
    C: LedgerClient + ?Sized,
{
    AccountQueryService::default().get_account_root(address, client).await
}

pub async fn get_account_info<C>(address: impl Into<Address>, client: &C) -> Result<Response>
where
    C: LedgerClient + ?Sized,
{
    AccountQueryService::default().get_account_info(address, client).await
}

pub async fn get_account_lines<C>(address: impl Into<Address>, client: &C) -> Result<Response>
where
    C: LedgerClient + ?Sized,
{
    AccountQueryService::default().get_account_lines(address, client).await
}
