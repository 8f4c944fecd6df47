use ledger_common::{Address, Response, TransportError};
use thiserror::Error;

/// Ledger-level error reported by the node for a request that did reach it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestFailure {
    pub error: String,
    pub error_code: Option<i64>,
    pub error_message: Option<String>,
}

impl RequestFailure {
    pub fn from_response(response: &Response) -> Self {
        RequestFailure {
            error: response.error().unwrap_or("unknown").to_string(),
            error_code: response.error_code(),
            error_message: response.error_message().map(str::to_string),
        }
    }
}

impl std::fmt::Display for RequestFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.error)?;
        if let Some(code) = self.error_code {
            write!(f, " ({})", code)?;
        }
        if let Some(message) = &self.error_message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum AccountError {
    /// The account is not in the queried ledger version.
    #[error("Account not found: {address}")]
    NotFound { address: Address },

    #[error("Request failed: {0}")]
    RequestFailure(RequestFailure),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// A blocking call was made on a thread that is already driving a runtime.
    #[error("Usage error: {0}")]
    Usage(String),

    /// The node answered successfully but without the expected fields.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Runtime error: {0}")]
    Runtime(#[source] std::io::Error),
}

impl AccountError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, AccountError::NotFound { .. })
    }

    pub fn is_usage(&self) -> bool {
        matches!(self, AccountError::Usage(_))
    }
}

pub type Result<T> = std::result::Result<T, AccountError>;
