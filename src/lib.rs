pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use config::toml_config::UtilConfig;
pub use core::date_pattern::DatePattern;
pub use core::{DateRange, MaskOptions, Period, RandomOptions};
pub use utils::error::{Result, UtilError};
