use std::{
    collections::HashMap,
    fmt,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::{
    address::Address,
    client::{error::TransportError, LedgerClient},
    models::{
        ledger_index::LedgerIndex,
        request::Request,
        response::{AccountRoot, Response, ACCOUNT_NOT_FOUND},
    },
};

pub type RequestHook = Arc<dyn Fn(&Request) + Send + Sync>;

/// Scripted failure for one address.
#[derive(Debug, Clone)]
pub enum MockFailure {
    /// The round trip breaks down before any reply.
    Transport(String),
    /// The node replies with `status: error` and this error token.
    Ledger {
        error: String,
        error_code: Option<i64>,
        error_message: Option<String>,
    },
}

/// In-memory ledger node answering `account_info` and `account_lines`.
///
/// Clones share state, so a test can keep a handle to inspect
/// `requests_received` after passing the client into a query.
#[derive(Default, Clone)]
pub struct MockLedger {
    pub accounts: Arc<Mutex<HashMap<Address, AccountRoot>>>,
    pub trust_lines: Arc<Mutex<HashMap<Address, Vec<Value>>>>,
    pub failures: Arc<Mutex<HashMap<Address, MockFailure>>>,
    pub requests_received: Arc<Mutex<Vec<Request>>>,
    pub hook: Arc<Mutex<Option<RequestHook>>>,
    /// Sequence of the open ledger. The last closed ledger is one below it,
    /// the last validated ledger two below.
    pub ledger_current_index: u32,
}

impl fmt::Debug for MockLedger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockLedger")
            .field("accounts", &lock(&self.accounts).len())
            .field("ledger_current_index", &self.ledger_current_index)
            .field("hook", &"Fn hook (not Debug)")
            .finish()
    }
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockLedger {
    pub fn new() -> Self {
        MockLedger {
            ledger_current_index: 1_000,
            ..Default::default()
        }
    }

    /// Adds a funded account with the given sequence and balance in drops.
    pub fn with_account(self, address: impl Into<Address>, sequence: u32, balance: u64) -> Self {
        let address = address.into();
        let mut root = Map::new();
        root.insert("Account".to_string(), Value::from(address.as_str()));
        root.insert("Balance".to_string(), Value::from(balance.to_string()));
        root.insert("Flags".to_string(), Value::from(0));
        root.insert("LedgerEntryType".to_string(), Value::from("AccountRoot"));
        root.insert("OwnerCount".to_string(), Value::from(0));
        root.insert("Sequence".to_string(), Value::from(sequence));
        self.with_account_root(address, root)
    }

    /// Adds an account whose root object is used verbatim.
    pub fn with_account_root(self, address: impl Into<Address>, root: AccountRoot) -> Self {
        lock(&self.accounts).insert(address.into(), root);
        self
    }

    pub fn with_trust_line(self, address: impl Into<Address>, line: Value) -> Self {
        lock(&self.trust_lines)
            .entry(address.into())
            .or_default()
            .push(line);
        self
    }

    pub fn with_failure(self, address: impl Into<Address>, failure: MockFailure) -> Self {
        lock(&self.failures).insert(address.into(), failure);
        self
    }

    /// Runs `hook` for every request, before the reply is built.
    pub fn with_hook(self, hook: RequestHook) -> Self {
        *lock(&self.hook) = Some(hook);
        self
    }

    pub fn set_balance(&self, address: &Address, balance: u64) {
        if let Some(root) = lock(&self.accounts).get_mut(address) {
            root.insert("Balance".to_string(), Value::from(balance.to_string()));
        }
    }

    pub fn requests(&self) -> Vec<Request> {
        lock(&self.requests_received).clone()
    }

    fn not_found() -> Response {
        Response::failure(ACCOUNT_NOT_FOUND, Some(19), Some("Account not found."))
    }

    // Nodes name the open ledger `ledger_current_index`; closed and
    // validated ledgers come back as `ledger_index`.
    fn ledger_fields(&self, ledger_index: LedgerIndex) -> Map<String, Value> {
        let validated_index = self.ledger_current_index.saturating_sub(2);
        let (key, seq, validated) = match ledger_index {
            LedgerIndex::Current => ("ledger_current_index", self.ledger_current_index, false),
            LedgerIndex::Closed => {
                ("ledger_index", self.ledger_current_index.saturating_sub(1), false)
            }
            LedgerIndex::Validated => ("ledger_index", validated_index, true),
            LedgerIndex::Sequence(seq) => ("ledger_index", seq, seq <= validated_index),
        };

        let mut fields = Map::new();
        fields.insert(key.to_string(), Value::from(seq));
        fields.insert("validated".to_string(), Value::from(validated));
        fields.insert("status".to_string(), Value::from("success"));
        fields
    }

    fn account_info(&self, address: &Address, ledger_index: LedgerIndex) -> Response {
        let root = match lock(&self.accounts).get(address) {
            Some(root) => root.clone(),
            None => return Self::not_found(),
        };
        let mut result = self.ledger_fields(ledger_index);
        result.insert("account_data".to_string(), Value::Object(root));
        Response::success(result)
    }

    fn account_lines(&self, address: &Address, ledger_index: LedgerIndex) -> Response {
        if !lock(&self.accounts).contains_key(address) {
            return Self::not_found();
        }
        let lines = lock(&self.trust_lines)
            .get(address)
            .cloned()
            .unwrap_or_default();
        let mut result = self.ledger_fields(ledger_index);
        result.insert("account".to_string(), Value::from(address.as_str()));
        result.insert("lines".to_string(), Value::Array(lines));
        Response::success(result)
    }
}

#[async_trait]
impl LedgerClient for MockLedger {
    async fn request(&self, req: Request) -> Result<Response, TransportError> {
        lock(&self.requests_received).push(req.clone());

        let hook = lock(&self.hook).clone();
        if let Some(hook) = hook {
            hook(&req);
        }

        let failure = lock(&self.failures).get(req.account()).cloned();
        match failure {
            Some(MockFailure::Transport(msg)) => return Err(TransportError::Connection(msg)),
            Some(MockFailure::Ledger { error, error_code, error_message }) => {
                return Ok(Response::failure(&error, error_code, error_message.as_deref()));
            }
            None => {}
        }

        let response = match &req {
            Request::AccountInfo(info) => self.account_info(&info.account, info.ledger_index),
            Request::AccountLines(lines) => self.account_lines(&lines.account, lines.ledger_index),
        };
        tracing::trace!(command = req.command(), account = %req.account(), "mock ledger replied");
        Ok(response)
    }
}
