use anyhow::Context;
use clap::Parser;
use commons_util::core::{dates, mask, numbers, strings};
use commons_util::utils::{logger, validation::Validate};
use commons_util::{CliConfig, Command, MaskOptions, UtilConfig, UtilError};
use serde_json::{json, Value};

/// 指令的執行結果：文字輸出與 JSON 輸出
struct Output {
    text: String,
    json: Value,
}

impl Output {
    fn new(text: impl Into<String>, json: Value) -> Self {
        Self {
            text: text.into(),
            json,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    // 初始化日誌
    logger::init_cli_logger(cli.verbose, config.logging.level.as_deref(), config.log_format());
    tracing::debug!("CLI config: {:?}", cli);

    match run(&cli.command, &config) {
        Ok(output) => print_output(&output, cli.json)?,
        Err(e) => {
            tracing::error!("❌ Command failed: {}", e);
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    }

    Ok(())
}

fn load_config(cli: &CliConfig) -> commons_util::Result<UtilConfig> {
    cli.validate()?;

    let config = match &cli.config {
        Some(path) => UtilConfig::from_file(path)?,
        None => UtilConfig::default(),
    };
    config.validate()?;

    Ok(config)
}

fn run(command: &Command, config: &UtilConfig) -> commons_util::Result<Output> {
    let output = match command {
        Command::Mask {
            value,
            start,
            length,
            shorten,
        } => {
            let mut options = config.mask_options();
            if let (Some(start), Some(length)) = (start, length) {
                options = MaskOptions {
                    window: Some((*start, *length)),
                    ..options
                };
            }
            if *shorten {
                options = options.shortened();
            }
            let masked = mask::mask_with(value.as_str(), options);
            Output::new(masked.clone(), json!({ "masked": masked }))
        }
        Command::MaskMobile { value } => {
            let masked = mask::mask_mobile(value.as_str());
            Output::new(masked.clone(), json!({ "masked": masked }))
        }
        Command::MaskEmail { value } => {
            let masked = mask::mask_email(value.as_str()).unwrap_or_default();
            Output::new(masked.clone(), json!({ "masked": masked }))
        }
        Command::Random { length, numeric } => {
            let options = config.random_options(*length, *numeric);
            let value = strings::random_string(options)?;
            Output::new(value.clone(), json!({ "value": value }))
        }
        Command::JoinPath { pieces } => {
            let path = strings::join_path(pieces.iter().map(String::as_str));
            Output::new(path.clone(), json!({ "path": path }))
        }
        Command::Range {
            period,
            date,
            pattern,
        } => {
            let pattern = pattern.as_deref().unwrap_or(config.date_pattern());
            let range = match date {
                Some(date) => {
                    let parsed = dates::parse_date(date.as_str(), pattern).ok_or_else(|| {
                        UtilError::invalid_argument(
                            "date",
                            format!("'{}' does not match pattern '{}'", date, pattern),
                        )
                    })?;
                    dates::range_of(*period, &parsed)
                }
                None => dates::range_of_current(*period, &commons_util::core::SystemClock),
            };

            let start = dates::format_date(Some(&range.start), pattern);
            let end = dates::format_date(Some(&range.end), pattern);
            Output::new(
                format!("{}\t{}", start, end),
                json!({
                    "period": period,
                    "start": start,
                    "end": end,
                    "rfc3339": serde_json::to_value(&range)?,
                }),
            )
        }
        Command::FormatMillis { millis, pattern } => {
            let pattern = pattern.as_deref().unwrap_or(config.date_pattern());
            let formatted = dates::format_millis(Some(*millis), pattern);
            Output::new(formatted.clone(), json!({ "formatted": formatted }))
        }
        Command::CheckNumber { value } => {
            let is_integer = numbers::is_integer(value.as_str());
            let is_decimal = numbers::is_decimal(value.as_str());
            let decimal = numbers::to_big_decimal(value.as_str(), Default::default());
            Output::new(
                format!("integer={} decimal={} value={}", is_integer, is_decimal, decimal),
                json!({
                    "integer": is_integer,
                    "decimal": is_decimal,
                    "value": decimal.to_string(),
                }),
            )
        }
    };

    Ok(output)
}

fn print_output(output: &Output, as_json: bool) -> anyhow::Result<()> {
    if as_json {
        let rendered =
            serde_json::to_string_pretty(&output.json).context("Failed to render JSON output")?;
        println!("{}", rendered);
    } else {
        println!("{}", output.text);
    }
    Ok(())
}
