pub mod adapters;
#[cfg(feature = "cli")]
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};
pub use config::StoreConfig;

pub use self::adapters::{JsonFileStore, MemoryStore};
pub use self::core::{
    ChangeKind, KeyValueStore, NonTaxableCategorySet, NonTaxableChange, SubscriptionId,
    DEFAULT_STORE_KEY,
};
pub use self::utils::error::{Result, StoreError};
