use thiserror::Error;

#[derive(Error, Debug)]
pub enum UtilError {
    #[error("Invalid argument `{argument}`: {reason}")]
    InvalidArgument { argument: String, reason: String },

    #[error("Invalid date pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

impl UtilError {
    pub fn invalid_argument(argument: &str, reason: impl Into<String>) -> Self {
        UtilError::InvalidArgument {
            argument: argument.to_string(),
            reason: reason.into(),
        }
    }

    /// 給 CLI 使用者看的簡短訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            UtilError::InvalidArgument { argument, reason } => {
                format!("參數 {} 不正確: {}", argument, reason)
            }
            UtilError::InvalidPattern { pattern, .. } => {
                format!("無法識別的日期格式: {}", pattern)
            }
            UtilError::IoError(e) => format!("讀取檔案失敗: {}", e),
            UtilError::SerializationError(e) => format!("輸出序列化失敗: {}", e),
            UtilError::ConfigValidationError { field, message } => {
                format!("配置錯誤 ({}): {}", field, message)
            }
            UtilError::InvalidConfigValueError { field, value, .. } => {
                format!("配置 {} 的值 '{}' 無效", field, value)
            }
            UtilError::MissingConfigError { field } => format!("缺少必要配置: {}", field),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            UtilError::InvalidArgument { .. } => "Check the command arguments and try again",
            UtilError::InvalidPattern { .. } => {
                "Use tokens such as yyyy, MM, dd, HH, mm, ss, SSS and quote literal text with '"
            }
            UtilError::IoError(_) => "Make sure the config file exists and is readable",
            UtilError::SerializationError(_) => "Retry without --json",
            UtilError::ConfigValidationError { .. }
            | UtilError::InvalidConfigValueError { .. }
            | UtilError::MissingConfigError { .. } => {
                "Fix the TOML configuration file or run without --config"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, UtilError>;
