pub mod non_taxable;

pub use crate::domain::model::{ChangeKind, NonTaxableChange, SubscriptionId, DEFAULT_STORE_KEY};
pub use crate::domain::ports::KeyValueStore;
pub use crate::utils::error::Result;
pub use non_taxable::NonTaxableCategorySet;
