use api_types::Currency;
use clap::Parser;
use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/dindin.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub currency: Currency,
    pub timezone: String,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:3000".to_string(),
            currency: Currency::Eur,
            timezone: "Europe/Rome".to_string(),
            log_level: "warn".to_string(),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "dindin", disable_version_flag = true)]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override base URL of the transactions store (e.g. http://127.0.0.1:3000).
    #[arg(long)]
    base_url: Option<String>,
    /// Override display currency (eur, usd, brl).
    #[arg(long)]
    currency: Option<String>,
    /// Override timezone for date display (IANA name).
    #[arg(long)]
    timezone: Option<String>,
    /// Override log level (error, warn, info, debug, trace).
    #[arg(long)]
    log_level: Option<String>,
}

/// Resolves settings: defaults, then config file, then `DINDIN_TUI_*`
/// environment variables, then CLI flags.
pub fn load() -> Result<AppConfig> {
    let args = Args::parse();

    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let settings: AppConfig = config::Config::builder()
        .add_source(config::File::with_name(config_path).required(false))
        .add_source(config::Environment::with_prefix("DINDIN_TUI"))
        .set_override_option("base_url", args.base_url)?
        .set_override_option("currency", args.currency)?
        .set_override_option("timezone", args.timezone)?
        .set_override_option("log_level", args.log_level)?
        .build()?
        .try_deserialize()?;

    Ok(settings)
}
