//! Startup configuration.
//!
//! Every value can be given as a flag or through the environment (a `.env`
//! file is loaded by `main` before parsing).  The four required values are
//! parsed as optional so that [`Config::validate`] can report all missing
//! ones in a single error instead of clap stopping at the first.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::error::ConfigError;

#[derive(Debug, Clone, Parser)]
#[command(name = "homework-status-bot")]
#[command(about = "Relays homework review status changes to a Telegram chat", long_about = None)]
pub struct Config {
    /// Credential for the homework API
    #[arg(long, env = "PRACTICUM_TOKEN", hide_env_values = true)]
    pub practicum_token: Option<String>,

    /// Telegram bot token
    #[arg(long, env = "TELEGRAM_TOKEN", hide_env_values = true)]
    pub telegram_token: Option<String>,

    /// Chat that receives notifications
    #[arg(long, env = "TELEGRAM_CHAT_ID")]
    pub telegram_chat_id: Option<String>,

    /// Homework status endpoint URL
    #[arg(long, env = "ENDPOINT")]
    pub endpoint: Option<String>,

    /// Telegram Bot API base URL
    #[arg(long, env = "TELEGRAM_API_URL", default_value = "https://api.telegram.org")]
    pub telegram_api_url: String,

    /// Seconds between polls
    #[arg(
        long,
        env = "RETRY_PERIOD",
        default_value_t = 600,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub retry_period: u64,

    /// How far back the first poll looks, in seconds [default: retry period]
    #[arg(long, env = "LOOK_BACK")]
    pub look_back: Option<u64>,

    /// Timeout for each HTTP request, in seconds
    #[arg(
        long,
        env = "HTTP_TIMEOUT",
        default_value_t = 30,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub http_timeout: u64,

    /// Append log lines to this file instead of stderr
    #[arg(long, env = "LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

/// Configuration with every required value present.
#[derive(Debug, Clone)]
pub struct Settings {
    pub practicum_token: String,
    pub telegram_token: String,
    pub telegram_chat_id: String,
    pub endpoint: String,
    pub telegram_api_url: String,
    pub retry_period: Duration,
    pub look_back: Duration,
    pub http_timeout: Duration,
}

impl Config {
    /// Check that all required values are present and non-empty.
    pub fn validate(&self) -> Result<Settings, ConfigError> {
        let mut missing = Vec::new();
        let mut require = |value: &Option<String>, name: &'static str| {
            match value.as_deref().map(str::trim) {
                Some(v) if !v.is_empty() => v.to_string(),
                _ => {
                    missing.push(name);
                    String::new()
                }
            }
        };

        let practicum_token = require(&self.practicum_token, "PRACTICUM_TOKEN");
        let telegram_token = require(&self.telegram_token, "TELEGRAM_TOKEN");
        let telegram_chat_id = require(&self.telegram_chat_id, "TELEGRAM_CHAT_ID");
        let endpoint = require(&self.endpoint, "ENDPOINT");

        if !missing.is_empty() {
            return Err(ConfigError(missing));
        }

        Ok(Settings {
            practicum_token,
            telegram_token,
            telegram_chat_id,
            endpoint,
            telegram_api_url: self.telegram_api_url.clone(),
            retry_period: Duration::from_secs(self.retry_period),
            look_back: Duration::from_secs(self.look_back.unwrap_or(self.retry_period)),
            http_timeout: Duration::from_secs(self.http_timeout),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Parse from flags only, so the test does not depend on the environment.
    fn parse(args: &[&str]) -> Config {
        let mut config =
            Config::try_parse_from(std::iter::once("homework-status-bot").chain(args.iter().copied()))
                .unwrap();
        for (flag, field) in [
            ("--practicum-token", &mut config.practicum_token),
            ("--telegram-token", &mut config.telegram_token),
            ("--telegram-chat-id", &mut config.telegram_chat_id),
            ("--endpoint", &mut config.endpoint),
        ] {
            if !args.contains(&flag) {
                *field = None;
            }
        }
        config
    }

    const FULL: &[&str] = &[
        "--practicum-token",
        "p-token",
        "--telegram-token",
        "t-token",
        "--telegram-chat-id",
        "42",
        "--endpoint",
        "https://practicum.example/api/",
    ];

    #[test]
    fn complete_config_validates() {
        let settings = parse(FULL).validate().unwrap();
        assert_eq!(settings.practicum_token, "p-token");
        assert_eq!(settings.telegram_chat_id, "42");
        assert_eq!(settings.endpoint, "https://practicum.example/api/");
    }

    #[test]
    fn look_back_defaults_to_retry_period() {
        let mut args = FULL.to_vec();
        args.extend(["--retry-period", "120"]);
        let settings = parse(&args).validate().unwrap();
        assert_eq!(settings.retry_period, Duration::from_secs(120));
        assert_eq!(settings.look_back, Duration::from_secs(120));

        args.extend(["--look-back", "86400"]);
        let settings = parse(&args).validate().unwrap();
        assert_eq!(settings.look_back, Duration::from_secs(86400));
    }

    #[test]
    fn zero_period_and_timeout_are_rejected() {
        for flag in ["--retry-period", "--http-timeout"] {
            let mut args = vec!["homework-status-bot"];
            args.extend_from_slice(FULL);
            args.extend([flag, "0"]);
            let err = Config::try_parse_from(args.iter().copied()).unwrap_err();
            assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation, "{flag}");

            args.pop();
            args.push("1");
            assert!(Config::try_parse_from(args.iter().copied()).is_ok(), "{flag}");
        }
    }

    #[test]
    fn reports_every_missing_value() {
        let err = parse(&["--telegram-token", "t"]).validate().unwrap_err();
        assert_eq!(
            err,
            ConfigError(vec!["PRACTICUM_TOKEN", "TELEGRAM_CHAT_ID", "ENDPOINT"])
        );
    }

    #[test]
    fn blank_values_count_as_missing() {
        let mut args = FULL.to_vec();
        args[1] = "  ";
        let err = parse(&args).validate().unwrap_err();
        assert_eq!(err, ConfigError(vec!["PRACTICUM_TOKEN"]));
    }
}
