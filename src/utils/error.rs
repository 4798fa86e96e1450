use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlParseError(#[from] toml::de::Error),

    #[error("Value stored under '{key}' is not a string array (found {found})")]
    TypeMismatchError { key: String, found: String },

    #[error("Store lock poisoned")]
    PoisonedError,

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid configuration value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl StoreError {
    /// 給使用者的修復建議
    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            StoreError::IoError(_) => {
                "Check that the configuration file (--config) and the store file (--store-path) exist and are accessible"
            }
            StoreError::SerializationError(_) => {
                "The store file is not valid JSON; restore it from a backup or remove it"
            }
            StoreError::TomlParseError(_) => "Fix the syntax of the configuration file",
            StoreError::TypeMismatchError { .. } => {
                "Clear the slot (flagctl clear) to overwrite the unexpected value"
            }
            StoreError::PoisonedError => "Restart the process",
            StoreError::MissingConfigError { .. } | StoreError::InvalidConfigValueError { .. } => {
                "Review the configuration file or command-line flags"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
