use serde::{Deserialize, Serialize};

/// Ledger version a query is answered from.
///
/// Nodes accept either a shortcut name or a ledger sequence number:
///
/// - `validated`: the most recent ledger agreed by consensus.
/// - `current`: the open ledger still collecting transactions.
/// - `closed`: the most recently closed, not yet validated ledger.
/// - `<n>`: a specific ledger by sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "LedgerIndexRepr", into = "LedgerIndexRepr")]
pub enum LedgerIndex {
    #[default]
    Validated,
    Current,
    Closed,
    Sequence(u32),
}

#[derive(Clone, Copy, Serialize, Deserialize)]
#[serde(untagged)]
enum LedgerIndexRepr {
    Shortcut(Shortcut),
    Sequence(u32),
}

#[derive(Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Shortcut {
    Validated,
    Current,
    Closed,
}

impl From<LedgerIndexRepr> for LedgerIndex {
    fn from(repr: LedgerIndexRepr) -> Self {
        match repr {
            LedgerIndexRepr::Shortcut(Shortcut::Validated) => LedgerIndex::Validated,
            LedgerIndexRepr::Shortcut(Shortcut::Current) => LedgerIndex::Current,
            LedgerIndexRepr::Shortcut(Shortcut::Closed) => LedgerIndex::Closed,
            LedgerIndexRepr::Sequence(seq) => LedgerIndex::Sequence(seq),
        }
    }
}

impl From<LedgerIndex> for LedgerIndexRepr {
    fn from(index: LedgerIndex) -> Self {
        match index {
            LedgerIndex::Validated => LedgerIndexRepr::Shortcut(Shortcut::Validated),
            LedgerIndex::Current => LedgerIndexRepr::Shortcut(Shortcut::Current),
            LedgerIndex::Closed => LedgerIndexRepr::Shortcut(Shortcut::Closed),
            LedgerIndex::Sequence(seq) => LedgerIndexRepr::Sequence(seq),
        }
    }
}

impl std::fmt::Display for LedgerIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LedgerIndex::Validated => write!(f, "validated"),
            LedgerIndex::Current => write!(f, "current"),
            LedgerIndex::Closed => write!(f, "closed"),
            LedgerIndex::Sequence(seq) => write!(f, "{}", seq),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_shortcuts_serialize_as_names() {
        assert_eq!(serde_json::to_value(LedgerIndex::Validated).unwrap(), json!("validated"));
        assert_eq!(serde_json::to_value(LedgerIndex::Current).unwrap(), json!("current"));
        assert_eq!(
            serde_json::to_value(LedgerIndex::Sequence(71_000_000)).unwrap(),
            json!(71_000_000)
        );
    }

    #[test]
    fn test_parse_from_config_values() {
        let closed: LedgerIndex = serde_json::from_value(json!("closed")).unwrap();
        assert_eq!(closed, LedgerIndex::Closed);

        let seq: LedgerIndex = serde_json::from_value(json!(42)).unwrap();
        assert_eq!(seq, LedgerIndex::Sequence(42));

        assert!(serde_json::from_value::<LedgerIndex>(json!("latest")).is_err());
    }
}
