use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Error token the node returns when the requested account is not in the ledger.
pub const ACCOUNT_NOT_FOUND: &str = "actNotFound";

/// The account-root ledger object, exactly as the node returned it
/// (`Account`, `Balance`, `Sequence`, `Flags`, `OwnerCount`, ...).
pub type AccountRoot = Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Error,
}

/// Classification of a ledger-level error response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorCondition {
    /// The queried entity does not exist in the requested ledger version.
    NotFound,
    /// Any other error token (`invalidParams`, `actMalformed`, `lgrNotFound`, ...).
    Other(String),
}

/// Envelope for one node reply.
///
/// A ledger-level error is data, not a Rust error: `status` is `Error` and
/// `result` carries `error`, `error_code` and `error_message` as sent by the node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub status: ResponseStatus,
    #[serde(default)]
    pub result: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub response_type: Option<String>,
}

impl Response {
    pub fn success(result: Map<String, Value>) -> Self {
        Response {
            status: ResponseStatus::Success,
            result,
            id: None,
            response_type: Some("response".to_string()),
        }
    }

    /// Builds an error reply in the shape nodes use.
    pub fn failure(error: &str, error_code: Option<i64>, error_message: Option<&str>) -> Self {
        let mut result = Map::new();
        result.insert("error".to_string(), Value::from(error));
        if let Some(code) = error_code {
            result.insert("error_code".to_string(), Value::from(code));
        }
        if let Some(message) = error_message {
            result.insert("error_message".to_string(), Value::from(message));
        }
        result.insert("status".to_string(), Value::from("error"));

        Response {
            status: ResponseStatus::Error,
            result,
            id: None,
            response_type: Some("response".to_string()),
        }
    }

    pub fn is_successful(&self) -> bool {
        self.status == ResponseStatus::Success
    }

    /// The node's error token, e.g. `actNotFound`.
    pub fn error(&self) -> Option<&str> {
        self.result.get("error").and_then(Value::as_str)
    }

    pub fn error_code(&self) -> Option<i64> {
        self.result.get("error_code").and_then(Value::as_i64)
    }

    pub fn error_message(&self) -> Option<&str> {
        self.result.get("error_message").and_then(Value::as_str)
    }

    /// `None` for successful responses.
    pub fn error_condition(&self) -> Option<ErrorCondition> {
        if self.is_successful() {
            return None;
        }
        match self.error() {
            Some(ACCOUNT_NOT_FOUND) => Some(ErrorCondition::NotFound),
            Some(other) => Some(ErrorCondition::Other(other.to_string())),
            None => Some(ErrorCondition::Other("unknown".to_string())),
        }
    }

    pub fn from_json(json_str: &str) -> Result<Self, String> {
        serde_json::from_str(json_str).map_err(|e| e.to_string())
    }
}
