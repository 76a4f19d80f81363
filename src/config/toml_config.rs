use crate::domain::model::{MaskOptions, RandomOptions, DEFAULT_MASK_CHAR};
use crate::utils::error::{Result, UtilError};
use crate::utils::logger::LogFormat;
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_DATE_PATTERN: &str = "yyyy-MM-dd HH:mm:ss";
pub const DEFAULT_RANDOM_LENGTH: i32 = 16;
const MAX_RANDOM_LENGTH: i32 = 4096;
const LOG_FORMATS: [&str; 2] = ["compact", "json"];
const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UtilConfig {
    pub mask: MaskConfig,
    pub random: RandomConfig,
    pub date: DateConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MaskConfig {
    pub mask_char: String,
    pub shorten: bool,
}

impl Default for MaskConfig {
    fn default() -> Self {
        Self {
            mask_char: DEFAULT_MASK_CHAR.to_string(),
            shorten: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomConfig {
    pub default_length: i32,
    pub only_number: bool,
}

impl Default for RandomConfig {
    fn default() -> Self {
        Self {
            default_length: DEFAULT_RANDOM_LENGTH,
            only_number: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DateConfig {
    pub default_pattern: String,
}

impl Default for DateConfig {
    fn default() -> Self {
        Self {
            default_pattern: DEFAULT_DATE_PATTERN.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: None,
            format: "compact".to_string(),
        }
    }
}

impl UtilConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(UtilError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| UtilError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${MASK_CHAR})，找不到的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        use std::sync::OnceLock;

        static ENV_VAR: OnceLock<Regex> = OnceLock::new();
        let re = ENV_VAR.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("valid env var regex"));

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        if self.mask.mask_char.chars().count() != 1 {
            return Err(UtilError::InvalidConfigValueError {
                field: "mask.mask_char".to_string(),
                value: self.mask.mask_char.clone(),
                reason: "Mask character must be exactly one character".to_string(),
            });
        }

        validation::validate_range(
            "random.default_length",
            self.random.default_length,
            1,
            MAX_RANDOM_LENGTH,
        )?;

        validation::validate_non_empty_string("date.default_pattern", &self.date.default_pattern)?;
        crate::core::date_pattern::DatePattern::compile(&self.date.default_pattern).map_err(
            |e| UtilError::InvalidConfigValueError {
                field: "date.default_pattern".to_string(),
                value: self.date.default_pattern.clone(),
                reason: e.to_string(),
            },
        )?;

        validation::validate_one_of("logging.format", &self.logging.format, &LOG_FORMATS)?;
        if let Some(level) = &self.logging.level {
            validation::validate_one_of("logging.level", level, &LOG_LEVELS)?;
        }

        Ok(())
    }

    /// 取得遮蔽字元
    pub fn mask_char(&self) -> char {
        self.mask.mask_char.chars().next().unwrap_or(DEFAULT_MASK_CHAR)
    }

    /// 依配置產生中間遮蔽的參數
    pub fn mask_options(&self) -> MaskOptions {
        MaskOptions {
            shorten: self.mask.shorten,
            ..MaskOptions::default().with_mask_char(self.mask_char())
        }
    }

    pub fn random_options(&self, length: Option<i32>, only_number: bool) -> RandomOptions {
        RandomOptions {
            length: length.unwrap_or(self.random.default_length),
            only_number: only_number || self.random.only_number,
        }
    }

    pub fn date_pattern(&self) -> &str {
        &self.date.default_pattern
    }

    pub fn log_format(&self) -> LogFormat {
        match self.logging.format.as_str() {
            "json" => LogFormat::Json,
            _ => LogFormat::Compact,
        }
    }
}

impl Validate for UtilConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
