use serde::{Deserialize, Serialize};

/// Slot name the non-taxable set is stored under unless configured otherwise.
pub const DEFAULT_STORE_KEY: &str = "nonTaxableCategories";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChangeKind {
    Loaded,
    Flagged {
        category_id: String,
        non_taxable: bool,
    },
    Replaced,
    Cleared,
}

/// Delivered to subscribers after every mutation. `members` is sorted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NonTaxableChange {
    pub kind: ChangeKind,
    pub members: Vec<String>,
}

impl NonTaxableChange {
    pub fn count(&self) -> usize {
        self.members.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub(crate) u64);
