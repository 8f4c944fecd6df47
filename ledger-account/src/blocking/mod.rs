//! Blocking versions of the account queries in [`crate::query`].
//!
//! Every call builds a single-use runtime, runs one query on it and tears it
//! down again. Results and errors are those of the async query, unchanged.
//! These functions must not be called from async code: inside a runtime they
//! return [`AccountError::Usage`](crate::error::AccountError::Usage).

mod bridge;

use ledger_common::{AccountRoot, Address, LedgerClient, Response};

use crate::{config::QueryConfig, error::Result, query::AccountQueryService};
use bridge::run_to_completion;

/// Blocking counterpart of [`AccountQueryService`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlockingAccountQueryService {
    inner: AccountQueryService,
}

impl BlockingAccountQueryService {
    pub fn new(config: QueryConfig) -> Self {
        BlockingAccountQueryService {
            inner: AccountQueryService::new(config),
        }
    }

    pub fn config(&self) -> &QueryConfig {
        self.inner.config()
    }

    pub fn does_account_exist<C>(&self, address: impl Into<Address>, client: &C) -> Result<bool>
    where
        C: LedgerClient + ?Sized,
    {
        run_to_completion("does_account_exist", self.inner.does_account_exist(address, client))
    }

    pub fn get_next_valid_seq_number<C>(
        &self,
        address: impl Into<Address>,
        client: &C,
    ) -> Result<u32>
    where
        C: LedgerClient + ?Sized,
    {
        run_to_completion(
            "get_next_valid_seq_number",
            self.inner.get_next_valid_seq_number(address, client),
        )
    }

    pub fn get_balance<C>(&self, address: impl Into<Address>, client: &C) -> Result<u64>
    where
        C: LedgerClient + ?Sized,
    {
        run_to_completion("get_balance", self.inner.get_balance(address, client))
    }

    pub fn get_account_root<C>(
        &self,
        address: impl Into<Address>,
        client: &C,
    ) -> Result<AccountRoot>
    where
        C: LedgerClient + ?Sized,
    {
        run_to_completion("get_account_root", self.inner.get_account_root(address, client))
    }

    pub fn get_account_info<C>(&self, address: impl Into<Address>, client: &C) -> Result<Response>
    where
        C: LedgerClient + ?Sized,
    {
        run_to_completion("get_account_info", self.inner.get_account_info(address, client))
    }

    pub fn get_account_lines<C>(&self, address: impl Into<Address>, client: &C) -> Result<Response>
    where
        C: LedgerClient + ?Sized,
    {
        run_to_completion("get_account_lines", self.inner.get_account_lines(address, client))
    }
}

/// Whether the account exists in the validated ledger.
///
/// # Errors
/// Any ledger error other than "account not found", and transport failures.
pub fn does_account_exist<C>(address: impl Into<Address>, client: &C) -> Result<bool>
where
    C: LedgerClient + ?Sized,
{
    BlockingAccountQueryService::default().does_account_exist(address, client)
}

/// The account's recorded sequence number in the current ledger.
pub fn get_next_valid_seq_number<C>(address: impl Into<Address>, client: &C) -> Result<u32>
where
    C: LedgerClient + ?Sized,
{
    BlockingAccountQueryService::default().get_next_valid_seq_number(address, client)
}

/// The account's native balance in drops.
pub fn get_balance<C>(address: impl Into<Address>, client: &C) -> Result<u64>
where
    C: LedgerClient + ?Sized,
{
    BlockingAccountQueryService::default().get_balance(address, client)
}

/// The account-root object for the address.
pub fn get_account_root<C>(address: impl Into<Address>, client: &C) -> Result<AccountRoot>
where
    C: LedgerClient + ?Sized,
{
    BlockingAccountQueryService::default().get_account_root(address, client)
}

/// The raw `account_info` reply.
///
/// # Errors
/// Transport failures only; ledger errors come back inside the [`Response`].
pub fn get_account_info<C>(address: impl Into<Address>, client: &C) -> Result<Response>
where
    C: LedgerClient + ?Sized,
{
    BlockingAccountQueryService::default().get_account_info(address, client)
}

/// The raw `account_lines` reply.
///
/// # Errors
/// Transport failures only; ledger errors come back inside the [`Response`].
pub fn get_account_lines<C>(address: impl Into<Address>, client: &C) -> Result<Response>
where
    C: LedgerClient + ?Sized,
{
    BlockingAccountQueryService::default().get_account_lines(address, client)
}
