use std::{
    sync::{Arc, Mutex},
    thread,
    time::Duration,
};

use async_trait::async_trait;
use ledger_account::{blocking, AccountError, BlockingAccountQueryService, QueryConfig};
use ledger_common::{
    mock::{MockFailure, MockLedger},
    LedgerClient, LedgerIndex, Request, Response, ResponseStatus, TransportError,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("ledger_account=trace")
        .try_init();
}

fn mock_ledger() -> MockLedger {
    MockLedger::new().with_account("rTest...1", 5, 1_000_000)
}

#[test]
fn test_existing_account() {
    init_tracing();
    let client = mock_ledger();

    assert_eq!(blocking::get_next_valid_seq_number("rTest...1", &client).unwrap(), 5);
    assert_eq!(blocking::get_balance("rTest...1", &client).unwrap(), 1_000_000);
    assert!(blocking::does_account_exist("rTest...1", &client).unwrap());

    let root = blocking::get_account_root("rTest...1", &client).unwrap();
    assert_eq!(root["Account"], "rTest...1");
    assert_eq!(root["Sequence"], 5);
}

#[test]
fn test_missing_account() {
    init_tracing();
    let client = mock_ledger();

    assert!(!blocking::does_account_exist("rMissing...0", &client).unwrap());

    let err = blocking::get_balance("rMissing...0", &client).unwrap_err();
    assert!(err.is_not_found());

    // Raw operation hands back the error reply instead of failing.
    let info = blocking::get_account_info("rMissing...0", &client).unwrap();
    assert_eq!(info.status, ResponseStatus::Error);
    assert_eq!(info.error(), Some("actNotFound"));
}

#[test]
fn test_ledger_error_policy() {
    init_tracing();
    let client = mock_ledger().with_failure(
        "rTest...1",
        MockFailure::Ledger {
            error: "lgrNotFound".to_string(),
            error_code: Some(21),
            error_message: Some("ledgerNotFound".to_string()),
        },
    );

    assert!(matches!(
        blocking::get_account_root("rTest...1", &client),
        Err(AccountError::RequestFailure(_))
    ));
    assert!(blocking::get_balance("rTest...1", &client).is_err());
    assert!(blocking::get_next_valid_seq_number("rTest...1", &client).is_err());
    assert!(blocking::does_account_exist("rTest...1", &client).is_err());

    let info = blocking::get_account_info("rTest...1", &client).unwrap();
    assert_eq!(info.status, ResponseStatus::Error);
    let lines = blocking::get_account_lines("rTest...1", &client).unwrap();
    assert_eq!(lines.status, ResponseStatus::Error);
}

#[test]
fn test_transport_failure_passes_through() {
    let client =
        mock_ledger().with_failure("rTest...1", MockFailure::Transport("reset by peer".into()));

    let err = blocking::get_account_lines("rTest...1", &client).unwrap_err();
    match err {
        AccountError::Transport(TransportError::Connection(msg)) => {
            assert_eq!(msg, "reset by peer")
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_account_lines() {
    let client = mock_ledger().with_trust_line(
        "rTest...1",
        serde_json::json!({
            "account": "rIssuer",
            "currency": "USD",
            "balance": "12.5",
            "limit": "100"
        }),
    );

    let resp = blocking::get_account_lines("rTest...1", &client).unwrap();
    assert!(resp.is_successful());
    assert_eq!(resp.result["account"], "rTest...1");
    assert_eq!(resp.result["lines"][0]["currency"], "USD");
}

#[test]
fn test_repeated_calls_give_same_result() {
    let client = mock_ledger();

    let first = blocking::get_account_info("rTest...1", &client).unwrap();
    let second = blocking::get_account_info("rTest...1", &client).unwrap();
    assert_eq!(first, second);

    assert_eq!(
        blocking::get_balance("rTest...1", &client).unwrap(),
        blocking::get_balance("rTest...1", &client).unwrap()
    );
    // No caching: every call reaches the client.
    assert_eq!(client.requests().len(), 4);
}

#[test]
fn test_reads_latest_state() {
    let client = mock_ledger();
    assert_eq!(blocking::get_balance("rTest...1", &client).unwrap(), 1_000_000);

    client.set_balance(&"rTest...1".into(), 750_000);
    assert_eq!(blocking::get_balance("rTest...1", &client).unwrap(), 750_000);
}

#[test]
fn test_nested_call_is_a_usage_error() {
    init_tracing();
    let nested_outcome: Arc<Mutex<Option<bool>>> = Arc::new(Mutex::new(None));
    let inner = mock_ledger();

    let outcome = Arc::clone(&nested_outcome);
    let client = mock_ledger().with_hook(Arc::new(move |_req: &Request| {
        let result = blocking::get_balance("rTest...1", &inner);
        *outcome.lock().unwrap() = Some(matches!(result, Err(AccountError::Usage(_))));
    }));

    // The outer call still completes normally.
    assert_eq!(blocking::get_balance("rTest...1", &client).unwrap(), 1_000_000);
    assert_eq!(*nested_outcome.lock().unwrap(), Some(true));
}

#[tokio::test]
async fn test_blocking_call_inside_async_code_is_refused() {
    let client = mock_ledger();
    let err = blocking::does_account_exist("rTest...1", &client).unwrap_err();
    assert!(err.is_usage());
    // Nothing was sent.
    assert!(client.requests().is_empty());
}

#[test]
fn test_threads_do_not_interfere() {
    let client = Arc::new(
        mock_ledger()
            .with_account("rOther...2", 9, 42)
            .with_account("rThird...3", 1, 7),
    );

    let handles: Vec<_> = [("rTest...1", 5u32), ("rOther...2", 9), ("rThird...3", 1)]
        .into_iter()
        .flat_map(|(address, expected)| {
            (0..4).map(move |_| (address, expected))
        })
        .map(|(address, expected)| {
            let client = Arc::clone(&client);
            thread::spawn(move || {
                let seq = blocking::get_next_valid_seq_number(address, &client).unwrap();
                assert_eq!(seq, expected);
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(client.requests().len(), 12);
}

#[test]
fn test_configured_ledger_index() {
    let client = mock_ledger();
    let service = BlockingAccountQueryService::new(
        QueryConfig::default()
            .with_ledger_index(LedgerIndex::Closed)
            .with_sequence_ledger_index(LedgerIndex::Validated),
    );

    assert_eq!(service.get_next_valid_seq_number("rTest...1", &client).unwrap(), 5);
    assert!(service.does_account_exist("rTest...1", &client).unwrap());

    let indexes: Vec<LedgerIndex> =
        client.requests().iter().map(Request::ledger_index).collect();
    assert_eq!(indexes, vec![LedgerIndex::Validated, LedgerIndex::Closed]);
}

/// Answers after a delay, so the query really suspends on a timer.
struct SlowLedger {
    inner: MockLedger,
    delay: Duration,
}

#[async_trait]
impl LedgerClient for SlowLedger {
    async fn request(&self, req: Request) -> Result<Response, TransportError> {
        tokio::time::sleep(self.delay).await;
        self.inner.request(req).await
    }
}

#[test]
fn test_suspending_client() {
    let client = SlowLedger {
        inner: mock_ledger(),
        delay: Duration::from_millis(20),
    };

    assert_eq!(blocking::get_balance("rTest...1", &client).unwrap(), 1_000_000);
}

#[test]
fn test_trait_object_client() {
    let client: Box<dyn LedgerClient> = Box::new(mock_ledger());
    assert!(blocking::does_account_exist("rTest...1", client.as_ref()).unwrap());
    assert!(blocking::does_account_exist("rTest...1", &client).unwrap());
}
