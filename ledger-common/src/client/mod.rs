pub mod error;

use std::sync::Arc;

use async_trait::async_trait;

use crate::models::{request::Request, response::Response};
use error::TransportError;

/// A connection to a ledger node.
///
/// Implementors own connection state, retries and timeouts. Callers borrow a
/// client for the duration of one request and never keep it.
///
/// `Ok` means a reply arrived, including replies whose status is `error`;
/// `Err` is reserved for transport breakdowns.
#[async_trait]
pub trait LedgerClient: Send + Sync {
    async fn request(&self, req: Request) -> Result<Response, TransportError>;
}

#[async_trait]
impl<T: LedgerClient + ?Sized> LedgerClient for &T {
    async fn request(&self, req: Request) -> Result<Response, TransportError> {
        (**self).request(req).await
    }
}

#[async_trait]
impl<T: LedgerClient + ?Sized> LedgerClient for Box<T> {
    async fn request(&self, req: Request) -> Result<Response, TransportError> {
        (**self).request(req).await
    }
}

#[async_trait]
impl<T: LedgerClient + ?Sized> LedgerClient for Arc<T> {
    async fn request(&self, req: Request) -> Result<Response, TransportError> {
        (**self).request(req).await
    }
}
