use std::future::Future;

use tokio::runtime::{Builder, Handle};
use tracing::{error, trace};

use crate::error::{AccountError, Result};

/// Drives `future` to completion on a runtime created for this call alone.
///
/// The runtime is current-thread, lives only for this call, and is dropped
/// before returning. Calling this from a thread that is already inside a tokio
/// runtime returns [`AccountError::Usage`]; blocking there would stall that
/// runtime's scheduler.
pub(crate) fn run_to_completion<F, T>(operation: &'static str, future: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    if Handle::try_current().is_ok() {
        error!(operation, "blocking account query called inside an async runtime");
        return Err(AccountError::Usage(format!(
            "{} blocks the calling thread and cannot run inside an async runtime; \
             use ledger_account::query::{} instead",
            operation, operation
        )));
    }

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(AccountError::Runtime)?;

    trace!(operation, "runtime started");
    let result = runtime.block_on(future);
    drop(runtime);
    trace!(operation, "runtime torn down");

    result
}
