use std::env;
use std::fs;
use chrono::NaiveTime;
use chrono_tz::Tz;
use log::LevelFilter;
use serde::Deserialize;
use crate::errors::ConfigError;

#[derive(Deserialize)]
pub struct OctopusParameters {
    #[serde(default = "default_octopus_url")]
    pub base_url: String,
    pub product_code: String,
    pub tariff_code: String,
}

#[derive(Deserialize)]
pub struct TelegramParameters {
    #[serde(default = "default_telegram_url")]
    pub api_url: String,
    #[serde(default)]
    pub bot_token: String,
    #[serde(default)]
    pub chat_id: String,
}

impl Default for TelegramParameters {
    fn default() -> Self {
        Self { api_url: default_telegram_url(), bot_token: String::new(), chat_id: String::new() }
    }
}

/// Parameters for the two competing tariffs and the assumed consumption.
/// All prices and standing charges are in pence, rates in pence per kWh.
#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct TariffParameters {
    pub consumption_per_half_hour: f64,
    pub dynamic_standing_charge: f64,
    pub flat_standing_charge: f64,
    pub flat_off_peak_rate: f64,
    pub flat_peak_rate: f64,
    pub off_peak_start: NaiveTime,
    pub off_peak_end: NaiveTime,
    pub alert_threshold: f64,
    pub duration_slots: Vec<usize>,
}

impl Default for TariffParameters {
    fn default() -> Self {
        Self {
            consumption_per_half_hour: 2.2,
            dynamic_standing_charge: 59.26,
            flat_standing_charge: 41.74,
            flat_off_peak_rate: 9.0,
            flat_peak_rate: 30.92,
            off_peak_start: NaiveTime::from_hms_opt(0, 30, 0).unwrap_or(NaiveTime::MIN),
            off_peak_end: NaiveTime::from_hms_opt(5, 30, 0).unwrap_or(NaiveTime::MIN),
            alert_threshold: 27.8,
            duration_slots: (1..=7).collect(),
        }
    }
}

#[derive(Deserialize)]
pub struct Files {
    pub chart_path: String,
    pub table_path: String,
    pub last_run_file: String,
}

#[derive(Deserialize)]
pub struct General {
    pub log_path: String,
    pub log_level: LevelFilter,
    pub log_to_stdout: bool,
    #[serde(default = "default_timezone")]
    pub timezone: Tz,
}

#[derive(Deserialize)]
pub struct Config {
    pub octopus: OctopusParameters,
    #[serde(default)]
    pub telegram: TelegramParameters,
    #[serde(default)]
    pub tariff: TariffParameters,
    pub files: Files,
    pub general: General,
}

fn default_octopus_url() -> String {
    "https://api.octopus.energy/v1".to_string()
}

fn default_telegram_url() -> String {
    "https://api.telegram.org".to_string()
}

fn default_timezone() -> Tz {
    chrono_tz::Europe::London
}

/// Loads the configuration file and returns a struct with all configuration items.
/// Telegram credentials found in the environment (BOT_TOKEN and CHAT_ID) take precedence
/// over those in the file.
///
/// # Arguments
///
/// * 'config_path' - path to the configuration file
pub fn load_config(config_path: &str) -> Result<Config, ConfigError> {
    let toml = fs::read_to_string(config_path)?;
    parse_config(&toml, |key| env::var(key).ok())
}

/// Parses a configuration document and applies credential overrides
///
/// # Arguments
///
/// * 'toml' - the configuration document
/// * 'lookup' - returns the value of an environment variable, if set
fn parse_config(toml: &str, lookup: impl Fn(&str) -> Option<String>) -> Result<Config, ConfigError> {
    let mut config: Config = toml::from_str(toml)?;

    if let Some(token) = lookup("BOT_TOKEN") {
        config.telegram.bot_token = token;
    }
    if let Some(chat_id) = lookup("CHAT_ID") {
        config.telegram.chat_id = chat_id;
    }

    if config.telegram.bot_token.is_empty() {
        return Err(ConfigError::from("telegram bot token not configured (BOT_TOKEN)"));
    }
    if config.telegram.chat_id.is_empty() {
        return Err(ConfigError::from("telegram chat id not configured (CHAT_ID)"));
    }
    if config.tariff.duration_slots.is_empty() {
        return Err(ConfigError::from("at least one duration slot count is required"));
    }

    Ok(config)
}
