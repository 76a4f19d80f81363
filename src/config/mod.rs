pub mod toml_config;

#[cfg(feature = "cli")]
use crate::domain::model::Period;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "commons-util")]
#[command(about = "String masking, random strings, date ranges and number parsing")]
pub struct CliConfig {
    #[arg(long, help = "Path to a TOML configuration file")]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Print results as JSON")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Mask the middle of a value, or an explicit window
    Mask {
        value: String,
        #[arg(long)]
        start: Option<usize>,
        #[arg(long)]
        length: Option<usize>,
        #[arg(long)]
        shorten: bool,
    },
    /// Mask 4 characters after a 3 character prefix
    MaskMobile { value: String },
    /// Mask the local part of an email address
    MaskEmail { value: String },
    /// Generate a random string
    Random {
        #[arg(long, allow_negative_numbers = true)]
        length: Option<i32>,
        #[arg(long, help = "Digits only, never starting with 0")]
        numeric: bool,
    },
    /// Join path segments with single slashes
    JoinPath {
        #[arg(required = true)]
        pieces: Vec<String>,
    },
    /// Print the start and end of the period containing a date
    Range {
        period: Period,
        #[arg(long, help = "Date to use instead of now")]
        date: Option<String>,
        #[arg(long, help = "Pattern for --date and the output")]
        pattern: Option<String>,
    },
    /// Format epoch milliseconds in the local time zone
    FormatMillis {
        millis: i64,
        #[arg(long)]
        pattern: Option<String>,
    },
    /// Report whether a value is an integer or a decimal
    CheckNumber { value: String },
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(path) = &self.config {
            validation::validate_path("config", path)?;
        }

        match &self.command {
            Command::Mask { start, length, .. } => {
                // 指定遮蔽區段時兩個參數都要有
                if start.is_some() {
                    validation::validate_required_field("length", length)?;
                }
                if length.is_some() {
                    validation::validate_required_field("start", start)?;
                }
            }
            Command::Range { pattern: Some(pattern), .. }
            | Command::FormatMillis { pattern: Some(pattern), .. } => {
                validation::validate_non_empty_string("pattern", pattern)?;
            }
            _ => {}
        }

        Ok(())
    }
}
