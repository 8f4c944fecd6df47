use ledger_common::LedgerIndex;
use serde::{Deserialize, Serialize};

/// Which ledger version each query reads from.
///
/// Defaults: `validated` for every lookup except the sequence number, which
/// reads the open (`current`) ledger so it reflects transactions already
/// applied there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    pub ledger_index: LedgerIndex,
    pub sequence_ledger_index: LedgerIndex,
}

impl Default for QueryConfig {
    fn default() -> Self {
        QueryConfig {
            ledger_index: LedgerIndex::Validated,
            sequence_ledger_index: LedgerIndex::Current,
        }
    }
}

impl QueryConfig {
    pub fn with_ledger_index(mut self, ledger_index: LedgerIndex) -> Self {
        self.ledger_index = ledger_index;
        self
    }

    pub fn with_sequence_ledger_index(mut self, ledger_index: LedgerIndex) -> Self {
        self.sequence_ledger_index = ledger_index;
        self
    }

    pub fn from_json(json_str: &str) -> Result<Self, String> {
        serde_json::from_str(json_str).map_err(|e| e.to_string())
    }
}
