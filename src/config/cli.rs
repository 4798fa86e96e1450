use crate::config::toml_config::StoreConfig;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "flagctl")]
#[command(about = "Manage the categories whose tax checkbox defaults to unchecked")]
pub struct CliConfig {
    #[arg(long, help = "TOML configuration file")]
    pub config: Option<String>,

    #[arg(long, help = "JSON store file (overrides store.path)")]
    pub store_path: Option<String>,

    #[arg(long, help = "Slot key inside the store (overrides store.key)")]
    pub key: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print every non-taxable category, one per line
    List,
    /// Print the number of non-taxable categories
    Count,
    /// Print whether a category is non-taxable
    Check { category_id: String },
    /// Mark a category non-taxable
    Set { category_id: String },
    /// Mark a category taxable again
    Unset { category_id: String },
    /// Replace the whole set with the given categories
    Replace { category_ids: Vec<String> },
    /// Remove every category from the set
    Clear,
}

impl CliConfig {
    /// 合併設定檔與命令列參數 (命令列優先)
    pub fn resolve(&self) -> Result<StoreConfig> {
        let mut config = match &self.config {
            Some(path) => StoreConfig::from_file(path)?,
            None => StoreConfig::default(),
        };

        if let Some(path) = &self.store_path {
            config.store.path = Some(path.clone());
        }
        if let Some(key) = &self.key {
            config.store.key = Some(key.clone());
        }

        config.validate()?;
        Ok(config)
    }
}
