use crate::adapters::JsonFileStore;
use crate::core::{NonTaxableCategorySet, DEFAULT_STORE_KEY};
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

static ENV_VAR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"));

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub store: StoreSection,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreSection {
    pub path: Option<String>,
    pub key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
}

impl StoreConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);
        Ok(toml::from_str(&processed_content)?)
    }

    /// 替換環境變數 (例如 ${POS_DATA_DIR})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR_PATTERN
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        let path = validation::validate_required_field("store.path", &self.store.path)?;
        validation::validate_path("store.path", path)?;

        if let Some(key) = &self.store.key {
            validation::validate_non_empty_string("store.key", key)?;
        }

        if let Some(level) = self.logging.as_ref().and_then(|l| l.level.as_deref()) {
            validation::validate_one_of("logging.level", level, &LOG_LEVELS)?;
        }

        Ok(())
    }

    /// 取得儲存檔路徑 (未設定時為空字串)
    pub fn store_path(&self) -> &str {
        self.store.path.as_deref().unwrap_or_default()
    }

    pub fn store_key(&self) -> &str {
        self.store.key.as_deref().unwrap_or(DEFAULT_STORE_KEY)
    }

    pub fn log_level(&self) -> &str {
        self.logging
            .as_ref()
            .and_then(|l| l.level.as_deref())
            .unwrap_or("info")
    }

    /// 驗證後開啟檔案儲存並載入非應稅分類集合
    pub fn open_set(&self) -> Result<NonTaxableCategorySet<JsonFileStore>> {
        self.validate_config()?;

        let store = JsonFileStore::new(self.store_path());
        let mut set = NonTaxableCategorySet::with_key(store, self.store_key());
        set.load();
        Ok(set)
    }
}

impl Validate for StoreConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::StoreError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[store]
path = "./data/defaults.json"
key = "register-1.nonTaxable"

[logging]
level = "debug"
"#;

        let config = StoreConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.store_path(), "./data/defaults.json");
        assert_eq!(config.store_key(), "register-1.nonTaxable");
        assert_eq!(config.log_level(), "debug");
    }

    #[test]
    fn test_defaults() {
        let config = StoreConfig::from_toml_str("[store]\npath = \"defaults.json\"\n").unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.store_key(), DEFAULT_STORE_KEY);
        assert_eq!(config.log_level(), "info");
    }

    #[test]
    fn test_missing_path_is_rejected() {
        let config = StoreConfig::from_toml_str("[store]\nkey = \"k\"\n").unwrap();
        assert!(matches!(
            config.validate(),
            Err(StoreError::MissingConfigError { field }) if field == "store.path"
        ));

        let config = StoreConfig::from_toml_str("").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let empty_key = StoreConfig::from_toml_str("[store]\npath = \"a.json\"\nkey = \" \"\n").unwrap();
        assert!(empty_key.validate().is_err());

        let bad_level = StoreConfig::from_toml_str(
            "[store]\npath = \"a.json\"\n[logging]\nlevel = \"chatty\"\n",
        )
        .unwrap();
        assert!(matches!(
            bad_level.validate(),
            Err(StoreError::InvalidConfigValueError { field, .. }) if field == "logging.level"
        ));
    }

    #[test]
    fn test_syntax_error() {
        assert!(matches!(
            StoreConfig::from_toml_str("[store\npath ="),
            Err(StoreError::TomlParseError(_))
        ));
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("CATEGORY_TAX_FLAGS_TEST_DIR", "/var/lib/pos");
        let config = StoreConfig::from_toml_str(
            "[store]\npath = \"${CATEGORY_TAX_FLAGS_TEST_DIR}/defaults.json\"\nkey = \"${CATEGORY_TAX_FLAGS_UNSET_VAR}\"\n",
        )
        .unwrap();

        assert_eq!(config.store_path(), "/var/lib/pos/defaults.json");
        assert_eq!(config.store_key(), "${CATEGORY_TAX_FLAGS_UNSET_VAR}");
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[store]\npath = \"defaults.json\"").unwrap();

        let config = StoreConfig::from_file(file.path()).unwrap();
        assert_eq!(config.store_path(), "defaults.json");
    }

    #[test]
    fn test_open_set_rejects_invalid_config() {
        assert!(StoreConfig::default().open_set().is_err());
    }
}
