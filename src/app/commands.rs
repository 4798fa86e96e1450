use crate::config::{Command, StoreConfig};
use crate::core::{KeyValueStore, NonTaxableCategorySet};
use anyhow::{anyhow, Context, Result};

/// 執行單一 flagctl 指令，回傳要輸出到 stdout 的文字
pub fn run_command(config: &StoreConfig, command: Command) -> Result<String> {
    let mut set = config.open_set()?;
    tracing::debug!(
        "Opened '{}' in {} ({} categories)",
        set.key(),
        config.store_path(),
        set.count()
    );

    let output = match command {
        Command::List => set.members().join("\n"),
        Command::Count => set.count().to_string(),
        Command::Check { category_id } => set.is_non_taxable(&category_id).to_string(),
        Command::Set { category_id } => {
            set.set_non_taxable(category_id, true);
            ensure_persisted(&set)?;
            set.count().to_string()
        }
        Command::Unset { category_id } => {
            set.set_non_taxable(category_id, false);
            ensure_persisted(&set)?;
            set.count().to_string()
        }
        Command::Replace { category_ids } => {
            set.set_all_non_taxable(category_ids);
            ensure_persisted(&set)?;
            set.count().to_string()
        }
        Command::Clear => {
            set.clear_all();
            ensure_persisted(&set)?;
            set.count().to_string()
        }
    };

    Ok(output)
}

/// Read the slot back and fail unless it matches the in-memory set.
///
/// The set itself only logs write failures, so callers that report
/// success to an operator check here first.
pub fn ensure_persisted<S: KeyValueStore>(set: &NonTaxableCategorySet<S>) -> Result<()> {
    let mut stored = set
        .store()
        .string_array(set.key())
        .with_context(|| format!("Change to '{}' was not saved", set.key()))?
        .unwrap_or_default();
    stored.sort();
    stored.dedup();

    let expected = set.members();
    if stored != expected {
        return Err(anyhow!(
            "Change to '{}' was not saved: store holds {} categories, expected {}",
            set.key(),
            stored.len(),
            expected.len()
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{JsonFileStore, MemoryStore};
    use crate::config::toml_config::StoreSection;
    use crate::core::DEFAULT_STORE_KEY;
    use crate::utils::error::StoreError;
    use std::path::Path;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn config_for(path: &Path) -> StoreConfig {
        StoreConfig {
            store: StoreSection {
                path: Some(path.to_str().unwrap().to_string()),
                key: None,
            },
            logging: None,
        }
    }

    #[test]
    fn test_replace_then_list() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config = config_for(&temp_dir.path().join("defaults.json"));

        let replace = Command::Replace {
            category_ids: vec!["b".to_string(), "a".to_string(), "b".to_string()],
        };
        assert_eq!(run_command(&config, replace)?, "2");
        assert_eq!(run_command(&config, Command::List)?, "a\nb");
        assert_eq!(run_command(&config, Command::Count)?, "2");

        Ok(())
    }

    #[test]
    fn test_check() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config = config_for(&temp_dir.path().join("defaults.json"));

        run_command(&config, Command::Set { category_id: "cat-1".to_string() })?;

        let check = |id: &str| Command::Check { category_id: id.to_string() };
        assert_eq!(run_command(&config, check("cat-1"))?, "true");
        assert_eq!(run_command(&config, check("cat-2"))?, "false");

        assert_eq!(
            run_command(&config, Command::Unset { category_id: "cat-1".to_string() })?,
            "0"
        );
        assert_eq!(run_command(&config, check("cat-1"))?, "false");

        Ok(())
    }

    #[test]
    fn test_clear() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("defaults.json");
        let config = config_for(&path);

        run_command(&config, Command::Replace { category_ids: vec!["A".to_string()] })?;
        assert_eq!(run_command(&config, Command::Clear)?, "0");
        assert_eq!(run_command(&config, Command::List)?, "");

        let store = JsonFileStore::new(&path);
        assert_eq!(store.string_array(DEFAULT_STORE_KEY)?, Some(vec![]));

        Ok(())
    }

    #[test]
    fn test_write_to_corrupt_store_is_an_error() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("defaults.json");
        std::fs::write(&path, "{ truncated")?;
        let config = config_for(&path);

        let err = run_command(&config, Command::Set { category_id: "cat-1".to_string() })
            .unwrap_err();

        assert!(err.to_string().contains("was not saved"));
        assert!(matches!(
            err.downcast_ref::<StoreError>(),
            Some(StoreError::SerializationError(_))
        ));
        assert_eq!(std::fs::read_to_string(&path)?, "{ truncated");

        Ok(())
    }

    #[test]
    fn test_ensure_persisted_detects_divergence() {
        let store = Arc::new(MemoryStore::new());
        let mut set = NonTaxableCategorySet::new(store.clone());
        set.load();
        set.set_all_non_taxable(["A", "B"]);
        assert!(ensure_persisted(&set).is_ok());

        store
            .set_string_array(DEFAULT_STORE_KEY, &["A".to_string()])
            .unwrap();
        assert!(ensure_persisted(&set).is_err());
    }
}
